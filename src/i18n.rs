use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_INPUTS: &str = "main_menu.inputs";
    pub const MAIN_MENU_CALCULATE: &str = "main_menu.calculate";
    pub const MAIN_MENU_MIN_OD: &str = "main_menu.min_od";
    pub const MAIN_MENU_MAX_ID: &str = "main_menu.max_id";
    pub const MAIN_MENU_SWEEP: &str = "main_menu.sweep";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const INPUTS_HEADING: &str = "inputs.heading";
    pub const INPUTS_HINT: &str = "inputs.hint";
    pub const PROMPT_EXTERNAL_PRESSURE: &str = "prompt.external_pressure";
    pub const PROMPT_INTERNAL_PRESSURE: &str = "prompt.internal_pressure";
    pub const PROMPT_OUTER_DIAMETER: &str = "prompt.outer_diameter";
    pub const PROMPT_INNER_DIAMETER: &str = "prompt.inner_diameter";
    pub const PROMPT_YIELD_STRESS: &str = "prompt.yield_stress";
    pub const PROMPT_DERATED_YIELD_STRESS: &str = "prompt.derated_yield_stress";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_COLUMNS: &str = "result.columns";
    pub const RESULT_AVERAGE_STRESS: &str = "result.average_stress";
    pub const RESULT_MAX_STRESS: &str = "result.max_stress";
    pub const RESULT_BURST: &str = "result.burst";
    pub const RESULT_COLLAPSE: &str = "result.collapse";
    pub const RESULT_SAFETY_FACTOR: &str = "result.safety_factor";
    pub const RESULT_LOAD_EXTERNAL: &str = "result.load_external";
    pub const RESULT_LOAD_INTERNAL: &str = "result.load_internal";
    pub const RESULT_PASS: &str = "result.pass";
    pub const RESULT_FAIL: &str = "result.fail";

    pub const OPTIMIZE_MIN_OD: &str = "optimize.min_od";
    pub const OPTIMIZE_MAX_ID: &str = "optimize.max_id";
    pub const OPTIMIZE_ITERATIONS: &str = "optimize.iterations";
    pub const OPTIMIZE_BARLOW_NOTE: &str = "optimize.barlow_note";

    pub const SWEEP_HEADING: &str = "sweep.heading";
    pub const PROMPT_INNER_MIN: &str = "prompt.inner_min";
    pub const PROMPT_INNER_MAX: &str = "prompt.inner_max";
    pub const PROMPT_OUTER_MIN: &str = "prompt.outer_min";
    pub const PROMPT_OUTER_MAX: &str = "prompt.outer_max";
    pub const PROMPT_STEP: &str = "prompt.step";
    pub const SWEEP_BOUNDARY: &str = "sweep.boundary";
    pub const SWEEP_NONE: &str = "sweep.none";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_UNIT_SYSTEM: &str = "settings.current_unit_system";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 > 내장 영어 > 내장 한국어 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| normalize_locale_string(&value))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Pressure Vessel Toolbox ===",
        MAIN_MENU_INPUTS => "1) 설계값 입력",
        MAIN_MENU_CALCULATE => "2) 응력/안전율 계산",
        MAIN_MENU_MIN_OD => "3) 최소 외경 찾기",
        MAIN_MENU_MAX_ID => "4) 최대 내경 찾기",
        MAIN_MENU_SWEEP => "5) 내경/외경 안전율 맵",
        MAIN_MENU_SETTINGS => "6) 설정 (단위 시스템)",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        INPUTS_HEADING => "\n-- 설계값 입력 --",
        INPUTS_HINT => "엔터: 기존 값 유지, 숫자가 아닌 값은 0으로 처리됩니다.",
        PROMPT_EXTERNAL_PRESSURE => "외압",
        PROMPT_INTERNAL_PRESSURE => "내압",
        PROMPT_OUTER_DIAMETER => "외경",
        PROMPT_INNER_DIAMETER => "내경",
        PROMPT_YIELD_STRESS => "항복응력",
        PROMPT_DERATED_YIELD_STRESS => "고온 항복응력 ('-' 입력 시 제외)",
        RESULT_HEADING => "\n-- 계산 결과 --",
        RESULT_COLUMNS => "항목 / 계산값 / 상온 허용 / 고온 허용",
        RESULT_AVERAGE_STRESS => "평균 선형응력",
        RESULT_MAX_STRESS => "최대 국부응력",
        RESULT_BURST => "파열 기준 최대 내압",
        RESULT_COLLAPSE => "붕괴 기준 최대 외압",
        RESULT_SAFETY_FACTOR => "최소 안전율",
        RESULT_LOAD_EXTERNAL => "하중 방향: 외압 지배 (k = 0.80)",
        RESULT_LOAD_INTERNAL => "하중 방향: 내압 지배 (k = 2/3)",
        RESULT_PASS => "만족",
        RESULT_FAIL => "불만족",
        OPTIMIZE_MIN_OD => "최소 외경:",
        OPTIMIZE_MAX_ID => "최대 내경:",
        OPTIMIZE_ITERATIONS => "반복 횟수:",
        OPTIMIZE_BARLOW_NOTE => "현재 안전율 < 1 이므로 Barlow 두께로 탐색 구간을 추정했습니다.",
        SWEEP_HEADING => "\n-- 내경/외경 안전율 맵 --",
        PROMPT_INNER_MIN => "내경 최소",
        PROMPT_INNER_MAX => "내경 최대",
        PROMPT_OUTER_MIN => "외경 최소",
        PROMPT_OUTER_MAX => "외경 최대",
        PROMPT_STEP => "간격",
        SWEEP_BOUNDARY => "내경 → 안전율 1 이상 최소 외경",
        SWEEP_NONE => "범위 내 없음",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "현재 단위 시스템:",
        SETTINGS_OPTIONS => "1) US (in, psi)  2) SI (mm, MPa)",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "단위 시스템이 변경되었습니다:",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Pressure Vessel Toolbox ===",
        MAIN_MENU_INPUTS => "1) Enter design values",
        MAIN_MENU_CALCULATE => "2) Calculate stresses / safety factors",
        MAIN_MENU_MIN_OD => "3) Minimum outer diameter",
        MAIN_MENU_MAX_ID => "4) Maximum inner diameter",
        MAIN_MENU_SWEEP => "5) ID/OD safety factor map",
        MAIN_MENU_SETTINGS => "6) Settings (unit system)",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        INPUTS_HEADING => "\n-- Design Values --",
        INPUTS_HINT => "Enter keeps the current value; non-numeric input is treated as 0.",
        PROMPT_EXTERNAL_PRESSURE => "External pressure",
        PROMPT_INTERNAL_PRESSURE => "Internal pressure",
        PROMPT_OUTER_DIAMETER => "Outer diameter",
        PROMPT_INNER_DIAMETER => "Inner diameter",
        PROMPT_YIELD_STRESS => "Yield stress",
        PROMPT_DERATED_YIELD_STRESS => "Derated yield stress ('-' to omit)",
        RESULT_HEADING => "\n-- Results --",
        RESULT_COLUMNS => "Item / Calculated / Allowable (room) / Allowable (derated)",
        RESULT_AVERAGE_STRESS => "Average linear stress",
        RESULT_MAX_STRESS => "Maximum local stress",
        RESULT_BURST => "Internal pressure for burst",
        RESULT_COLLAPSE => "External pressure for collapse",
        RESULT_SAFETY_FACTOR => "Minimum safety factor",
        RESULT_LOAD_EXTERNAL => "Load direction: external (k = 0.80)",
        RESULT_LOAD_INTERNAL => "Load direction: internal (k = 2/3)",
        RESULT_PASS => "OK",
        RESULT_FAIL => "FAIL",
        OPTIMIZE_MIN_OD => "Minimum OD:",
        OPTIMIZE_MAX_ID => "Maximum ID:",
        OPTIMIZE_ITERATIONS => "Iterations:",
        OPTIMIZE_BARLOW_NOTE => "Safety factor < 1, search bracket estimated from Barlow thickness.",
        SWEEP_HEADING => "\n-- ID/OD Safety Factor Map --",
        PROMPT_INNER_MIN => "ID min",
        PROMPT_INNER_MAX => "ID max",
        PROMPT_OUTER_MIN => "OD min",
        PROMPT_OUTER_MAX => "OD max",
        PROMPT_STEP => "Step",
        SWEEP_BOUNDARY => "ID -> minimum OD with safety factor >= 1",
        SWEEP_NONE => "none in range",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "Current unit system:",
        SETTINGS_OPTIONS => "1) US (in, psi)  2) SI (mm, MPa)",
        SETTINGS_PROMPT_CHANGE => "Number to change (Enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; unit system unchanged.",
        SETTINGS_SAVED => "Unit system changed to:",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_and_korean_catalogues() {
        assert_eq!(Translator::new("en").t(keys::RESULT_PASS), "OK");
        assert_eq!(Translator::new("ko").t(keys::RESULT_PASS), "만족");
        assert_eq!(Translator::new("fr").language(), Language::Ko);
        assert_eq!(Translator::new("en").t("no.such.key"), "[missing translation]");
    }

    #[test]
    fn explicit_language_wins_over_config() {
        assert_eq!(resolve_language("ko_KR", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-US")), "en");
    }

    #[test]
    fn locale_strings_are_trimmed_to_language() {
        assert_eq!(normalize_locale_string("ko_KR.UTF-8").as_deref(), Some("ko"));
        assert_eq!(normalize_locale_string("en-GB").as_deref(), Some("en"));
        assert_eq!(normalize_locale_string("de_DE"), None);
    }

    #[test]
    fn nested_tables_become_dotted_keys() {
        let map = parse_toml_to_map("[result]\npass = \"Bestanden\"\n").expect("map");
        assert_eq!(map.get(keys::RESULT_PASS).map(String::as_str), Some("Bestanden"));
        assert!(parse_toml_to_map("").is_none());
    }
}
