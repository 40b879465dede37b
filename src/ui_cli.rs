use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::quantity::QuantityKind;
use crate::units::UnitSystem;
use crate::vessel::{
    self, sweep, OptimizationReport, OptimizerSettings, SafetyFactorGrid, VesselField,
    VesselModel, VesselUpdate,
};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Inputs,
    Calculate,
    MinimizeOuter,
    MaximizeInner,
    Sweep,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_INPUTS,
        keys::MAIN_MENU_CALCULATE,
        keys::MAIN_MENU_MIN_OD,
        keys::MAIN_MENU_MAX_ID,
        keys::MAIN_MENU_SWEEP,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        prompt(tr.t(keys::PROMPT_MENU_SELECT))?;
        // 입력이 끝나면(EOF) 종료로 처리한다.
        let Some(sel) = read_line_from(&mut io::stdin().lock())? else {
            return Ok(MenuChoice::Exit);
        };
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 메뉴 번호를 선택지로 해석한다.
pub fn parse_menu_choice(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::Inputs),
        "2" => Some(MenuChoice::Calculate),
        "3" => Some(MenuChoice::MinimizeOuter),
        "4" => Some(MenuChoice::MaximizeInner),
        "5" => Some(MenuChoice::Sweep),
        "6" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 설계값 입력 메뉴. 엔터는 기존 값 유지, 숫자가 아니면 0으로 처리한다.
pub fn handle_inputs(tr: &Translator, model: &mut VesselModel) -> Result<(), AppError> {
    println!("{}", tr.t(keys::INPUTS_HEADING));
    println!("{}", tr.t(keys::INPUTS_HINT));
    let units = model.unit_system();
    let current = *model.inputs();
    let mut update = VesselUpdate::new();
    for field in VesselField::ALL {
        let label = format!(
            "{} [{}] ({}): ",
            tr.t(field_prompt_key(field)),
            units.symbol(field.quantity()),
            current
                .get(field)
                .map(|v| format!("{v}"))
                .unwrap_or_else(|| "-".to_string())
        );
        let raw = read_line(&label)?;
        let raw = raw.trim();
        if field == VesselField::DeratedYieldStress && raw == "-" {
            update = update.clear_derated_yield_stress();
            continue;
        }
        if let Some(value) = sanitize_number(raw) {
            update = update.with(field, value);
        }
    }
    model.modify(update)?;
    print_results(tr, model);
    Ok(())
}

/// 입력 문자열 정리: 빈 값은 `None`(유지), 숫자가 아니면 0.
pub fn sanitize_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0))
}

fn field_prompt_key(field: VesselField) -> &'static str {
    match field {
        VesselField::ExternalPressure => keys::PROMPT_EXTERNAL_PRESSURE,
        VesselField::InternalPressure => keys::PROMPT_INTERNAL_PRESSURE,
        VesselField::OuterDiameter => keys::PROMPT_OUTER_DIAMETER,
        VesselField::InnerDiameter => keys::PROMPT_INNER_DIAMETER,
        VesselField::YieldStress => keys::PROMPT_YIELD_STRESS,
        VesselField::DeratedYieldStress => keys::PROMPT_DERATED_YIELD_STRESS,
    }
}

/// 최소 외경 탐색 메뉴.
pub fn handle_minimize_outer(
    tr: &Translator,
    model: &mut VesselModel,
    settings: &OptimizerSettings,
    verbose: bool,
) -> Result<(), AppError> {
    let report = vessel::minimize_outer_diameter(model, settings)?;
    print_report(tr, model, &report, verbose);
    print_results(tr, model);
    Ok(())
}

/// 최대 내경 탐색 메뉴.
pub fn handle_maximize_inner(
    tr: &Translator,
    model: &mut VesselModel,
    settings: &OptimizerSettings,
    verbose: bool,
) -> Result<(), AppError> {
    let report = vessel::maximize_inner_diameter(model, settings)?;
    print_report(tr, model, &report, verbose);
    print_results(tr, model);
    Ok(())
}

/// 안전율 맵의 기본 범위.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    pub inner: (f64, f64),
    pub outer: (f64, f64),
    pub step: f64,
}

/// 현재 직경의 ±5% 범위, 간격은 0.005 in (SI에서는 mm로 환산).
pub fn default_sweep_range(model: &VesselModel) -> SweepRange {
    let inputs = model.inputs();
    let step = UnitSystem::US.convert(
        QuantityKind::Length,
        sweep::DEFAULT_STEP,
        model.unit_system(),
    );
    SweepRange {
        inner: (inputs.inner_diameter * 0.95, inputs.inner_diameter * 1.05),
        outer: (inputs.outer_diameter * 0.95, inputs.outer_diameter * 1.05),
        step,
    }
}

/// 안전율 맵 메뉴. 각 내경에서 안전율 1 이상이 되는 최소 외경을 표로 보여준다.
pub fn handle_sweep(tr: &Translator, model: &VesselModel) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SWEEP_HEADING));
    let range = default_sweep_range(model);
    let unit = model.unit_system().symbol(QuantityKind::Length);
    let ask = |key: &str, default: f64| {
        read_f64_or(&format!("{} [{unit}] ({default:.4}): ", tr.t(key)), default)
    };
    let id_min = ask(keys::PROMPT_INNER_MIN, range.inner.0)?;
    let id_max = ask(keys::PROMPT_INNER_MAX, range.inner.1)?;
    let od_min = ask(keys::PROMPT_OUTER_MIN, range.outer.0)?;
    let od_max = ask(keys::PROMPT_OUTER_MAX, range.outer.1)?;
    let step = ask(keys::PROMPT_STEP, range.step)?;
    let grid =
        vessel::safety_factor_grid(model.inputs(), (id_min, id_max), (od_min, od_max), step)?;
    print_grid(tr, model, &grid);
    Ok(())
}

/// 설정 메뉴. 단위 시스템을 바꾸면 현재 입력값도 함께 환산한다.
pub fn handle_settings(
    tr: &Translator,
    cfg: &mut Config,
    model: &mut VesselModel,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_UNIT_SYSTEM),
        cfg.unit_system.as_code()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let target = match sel.trim() {
        "" => return Ok(()),
        "1" => UnitSystem::US,
        "2" => UnitSystem::SI,
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    };
    model.convert_units(target)?;
    cfg.unit_system = target;
    cfg.default_vessel = *model.inputs();
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), target.as_code());
    Ok(())
}

/// 계산 결과 표를 출력한다.
pub fn print_results(tr: &Translator, model: &VesselModel) {
    let units = model.unit_system();
    let p = units.symbol(QuantityKind::Pressure);
    let inputs = model.inputs();
    let dash = || "-".to_string();

    println!("{}", tr.t(keys::RESULT_HEADING));
    println!(
        "{}",
        if model.is_external_load_dominant() {
            tr.t(keys::RESULT_LOAD_EXTERNAL)
        } else {
            tr.t(keys::RESULT_LOAD_INTERNAL)
        }
    );
    println!("{}", tr.t(keys::RESULT_COLUMNS));
    println!(
        "{}: {:.1} {p} / {:.0} / {}",
        tr.t(keys::RESULT_AVERAGE_STRESS),
        model.average_linear_stress(),
        model.allowable_average_stress_at_room(),
        model
            .allowable_average_stress_at_derated_temp()
            .map(|v| format!("{v:.0}"))
            .unwrap_or_else(dash)
    );
    println!(
        "{}: {:.1} {p} / {:.0} / {}",
        tr.t(keys::RESULT_MAX_STRESS),
        model.max_local_stress(),
        inputs.yield_stress,
        inputs
            .derated_yield_stress
            .map(|v| format!("{v:.0}"))
            .unwrap_or_else(dash)
    );
    println!(
        "{}: {:.3} / {} {p}",
        tr.t(keys::RESULT_BURST),
        model.max_burst_internal_pressure(),
        model
            .max_burst_internal_pressure_derated()
            .map(|v| format!("{v:.3}"))
            .unwrap_or_else(dash)
    );
    println!(
        "{}: {:.3} / {} {p}",
        tr.t(keys::RESULT_COLLAPSE),
        model.max_collapse_external_pressure(),
        model
            .max_collapse_external_pressure_derated()
            .map(|v| format!("{v:.3}"))
            .unwrap_or_else(dash)
    );
    let verdict = |sf: f64| {
        if sf < 1.0 {
            tr.t(keys::RESULT_FAIL)
        } else {
            tr.t(keys::RESULT_PASS)
        }
    };
    let room = model.safety_factor_at_room();
    print!(
        "{}: {room:.3} ({})",
        tr.t(keys::RESULT_SAFETY_FACTOR),
        verdict(room)
    );
    match model.safety_factor_at_derated_temp() {
        Some(derated) => println!(" / {derated:.3} ({})", verdict(derated)),
        None => println!(" / -"),
    }
}

/// 직경 최적화 결과를 출력한다. `verbose`면 반복별 구간도 함께 출력한다.
pub fn print_report(
    tr: &Translator,
    model: &VesselModel,
    report: &OptimizationReport,
    verbose: bool,
) {
    let unit = model.unit_system().symbol(QuantityKind::Length);
    if report.used_barlow_estimate {
        println!("{}", tr.t(keys::OPTIMIZE_BARLOW_NOTE));
    }
    let key = match report.field {
        VesselField::InnerDiameter => keys::OPTIMIZE_MAX_ID,
        _ => keys::OPTIMIZE_MIN_OD,
    };
    println!(
        "{} {:.3} {unit} ({:.3} -> {:.5}), SF = {:.4}",
        tr.t(key),
        report.diameter,
        report.initial_diameter,
        report.diameter,
        report.safety_factor
    );
    println!("{} {}", tr.t(keys::OPTIMIZE_ITERATIONS), report.iterations);
    if verbose {
        for (i, step) in report.trace.iter().enumerate() {
            eprintln!(
                "[{:>3}] [{:.6}, {:.6}] mid={:.6} f={:+.6}",
                i + 1,
                step.lower,
                step.upper,
                step.midpoint,
                step.residual
            );
        }
    }
}

/// 안전율 맵의 경계(각 내경에서 안전율 1 이상 최소 외경)를 출력한다.
pub fn print_grid(tr: &Translator, model: &VesselModel, grid: &SafetyFactorGrid) {
    let unit = model.unit_system().symbol(QuantityKind::Length);
    println!("{} [{unit}]", tr.t(keys::SWEEP_BOUNDARY));
    for (id, od) in grid.feasible_boundary() {
        match od {
            Some(od) => println!("{id:>10.4} -> {od:.4}"),
            None => println!("{id:>10.4} -> {}", tr.t(keys::SWEEP_NONE)),
        }
    }
    println!("max SF = {:.3}", grid.max());
}

fn prompt(text: &str) -> Result<(), AppError> {
    print!("{text}");
    io::stdout().flush().map_err(AppError::Io)
}

/// 한 줄을 읽는다. 입력이 끝났으면 `None`.
pub fn read_line_from<R: BufRead>(reader: &mut R) -> Result<Option<String>, AppError> {
    let mut buf = String::new();
    let read = reader.read_line(&mut buf).map_err(AppError::Io)?;
    Ok((read > 0).then_some(buf))
}

// EOF는 빈 입력(기존 값 유지)으로 취급한다.
fn read_line(text: &str) -> Result<String, AppError> {
    prompt(text)?;
    Ok(read_line_from(&mut io::stdin().lock())?.unwrap_or_default())
}

fn read_f64_or(prompt: &str, default: f64) -> Result<f64, AppError> {
    let s = read_line(prompt)?;
    Ok(sanitize_number(&s).unwrap_or(default))
}
