use crate::cli::{Command, SweepArgs, VesselArgs};
use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;
use crate::units::UnitSystem;
use crate::vessel::{self, OptimizeError, SweepError, VesselError, VesselModel, VesselUpdate};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 용기 입력/계산 오류
    Vessel(VesselError),
    /// 직경 최적화 오류
    Optimize(OptimizeError),
    /// 안전율 맵 계산 오류
    Sweep(SweepError),
    /// 알 수 없는 단위 시스템 문자열
    UnknownUnitSystem(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Vessel(e) => write!(f, "용기 계산 오류: {e}"),
            AppError::Optimize(e) => write!(f, "직경 최적화 오류: {e}"),
            AppError::Sweep(e) => write!(f, "안전율 맵 오류: {e}"),
            AppError::UnknownUnitSystem(u) => write!(f, "알 수 없는 단위 시스템: {u}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<VesselError> for AppError {
    fn from(value: VesselError) -> Self {
        AppError::Vessel(value)
    }
}

impl From<OptimizeError> for AppError {
    fn from(value: OptimizeError) -> Self {
        AppError::Optimize(value)
    }
}

impl From<SweepError> for AppError {
    fn from(value: SweepError) -> Self {
        AppError::Sweep(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 계산 오류는 출력 후 메뉴로 돌아가고, 입출력/설정 오류만 루프를 끝낸다.
pub fn run(config: &mut Config, tr: &Translator, verbose: bool) -> Result<(), AppError> {
    let mut model = VesselModel::new(config.default_vessel, config.unit_system)?;
    loop {
        let choice = ui_cli::main_menu(tr)?;
        let outcome = match choice {
            MenuChoice::Inputs => ui_cli::handle_inputs(tr, &mut model),
            MenuChoice::Calculate => {
                ui_cli::print_results(tr, &model);
                Ok(())
            }
            MenuChoice::MinimizeOuter => {
                ui_cli::handle_minimize_outer(tr, &mut model, &config.optimizer, verbose)
            }
            MenuChoice::MaximizeInner => {
                ui_cli::handle_maximize_inner(tr, &mut model, &config.optimizer, verbose)
            }
            MenuChoice::Sweep => ui_cli::handle_sweep(tr, &model),
            MenuChoice::Settings => ui_cli::handle_settings(tr, config, &mut model),
            MenuChoice::Exit => {
                config.default_vessel = *model.inputs();
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        match outcome {
            Err(err @ (AppError::Io(_) | AppError::Config(_))) => return Err(err),
            Err(err) => eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX)),
            Ok(()) if choice == MenuChoice::Settings => config.save()?,
            Ok(()) => {}
        }
    }
    Ok(())
}

/// 설정의 기본 용기값에 명령행 인수를 덮어써 모델을 만든다.
pub fn build_model(config: &Config, args: &VesselArgs) -> Result<VesselModel, AppError> {
    let mut model = VesselModel::new(config.default_vessel, config.unit_system)?;
    if let Some(code) = args.units.as_deref() {
        let target = UnitSystem::parse(code)
            .ok_or_else(|| AppError::UnknownUnitSystem(code.to_string()))?;
        model.convert_units(target)?;
    }
    let mut update = VesselUpdate {
        external_pressure: args.p_ext,
        internal_pressure: args.p_int,
        outer_diameter: args.outer_diameter,
        inner_diameter: args.inner_diameter,
        yield_stress: args.yield_stress,
        derated_yield_stress: args.derated,
        clear_derated_yield_stress: false,
    };
    if args.no_derated {
        update = update.clear_derated_yield_stress();
    }
    model.modify(update)?;
    Ok(model)
}

/// 비대화형 하위 명령을 실행한다.
pub fn run_command(
    command: &Command,
    config: &Config,
    tr: &Translator,
    verbose: bool,
) -> Result<(), AppError> {
    match command {
        Command::Calc(args) => {
            let model = build_model(config, args)?;
            ui_cli::print_results(tr, &model);
        }
        Command::MinOd(args) => {
            let mut model = build_model(config, args)?;
            let report = vessel::minimize_outer_diameter(&mut model, &config.optimizer)?;
            ui_cli::print_report(tr, &model, &report, verbose);
            ui_cli::print_results(tr, &model);
        }
        Command::MaxId(args) => {
            let mut model = build_model(config, args)?;
            let report = vessel::maximize_inner_diameter(&mut model, &config.optimizer)?;
            ui_cli::print_report(tr, &model, &report, verbose);
            ui_cli::print_results(tr, &model);
        }
        Command::Sweep(SweepArgs {
            vessel: args,
            id_min,
            id_max,
            od_min,
            od_max,
            step,
        }) => {
            let model = build_model(config, args)?;
            let inputs = model.inputs();
            let range = ui_cli::default_sweep_range(&model);
            let grid = vessel::safety_factor_grid(
                inputs,
                (id_min.unwrap_or(range.inner.0), id_max.unwrap_or(range.inner.1)),
                (od_min.unwrap_or(range.outer.0), od_max.unwrap_or(range.outer.1)),
                step.unwrap_or(range.step),
            )?;
            ui_cli::print_grid(tr, &model, &grid);
        }
    }
    Ok(())
}
