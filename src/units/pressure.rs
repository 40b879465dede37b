use serde::{Deserialize, Serialize};

/// 압력(응력) 단위. 내부 기준은 MPa이다.
/// 항복응력 등 응력값도 같은 단위 체계를 따른다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Psi,
    MegaPascal,
}

/// 1 psi = 0.006895 MPa (도면/계산서에서 쓰는 4자리 환산값)
pub const MPA_PER_PSI: f64 = 0.006895;

impl PressureUnit {
    /// 화면 표시용 단위 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            PressureUnit::Psi => "psi",
            PressureUnit::MegaPascal => "MPa",
        }
    }
}

/// 주어진 압력을 MPa 로 변환한다.
pub fn to_mpa(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Psi => value * MPA_PER_PSI,
        PressureUnit::MegaPascal => value,
    }
}

/// MPa 값을 원하는 단위로 변환한다.
pub fn from_mpa(value_mpa: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Psi => value_mpa / MPA_PER_PSI,
        PressureUnit::MegaPascal => value_mpa,
    }
}

/// 압력을 원하는 단위로 변환한다.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    if from == to {
        return value;
    }
    let mpa = to_mpa(value, from);
    from_mpa(mpa, to)
}
