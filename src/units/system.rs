use serde::{Deserialize, Serialize};

use crate::quantity::QuantityKind;
use crate::units::{convert_length, convert_pressure, LengthUnit, PressureUnit};

/// 용기 입력값이 따르는 단위 시스템.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// 미국 관용 단위 (in, psi)
    US,
    /// SI (mm, MPa)
    SI,
}

impl UnitSystem {
    pub fn length_unit(&self) -> LengthUnit {
        match self {
            UnitSystem::US => LengthUnit::Inch,
            UnitSystem::SI => LengthUnit::Millimeter,
        }
    }

    pub fn pressure_unit(&self) -> PressureUnit {
        match self {
            UnitSystem::US => PressureUnit::Psi,
            UnitSystem::SI => PressureUnit::MegaPascal,
        }
    }

    /// 물리량 종류에 맞는 단위 기호를 돌려준다.
    pub fn symbol(&self, kind: QuantityKind) -> &'static str {
        match kind {
            QuantityKind::Length => self.length_unit().symbol(),
            QuantityKind::Pressure => self.pressure_unit().symbol(),
        }
    }

    /// 값 하나를 현재 시스템에서 `target` 시스템으로 환산한다.
    pub fn convert(&self, kind: QuantityKind, value: f64, target: UnitSystem) -> f64 {
        match kind {
            QuantityKind::Length => {
                convert_length(value, self.length_unit(), target.length_unit())
            }
            QuantityKind::Pressure => {
                convert_pressure(value, self.pressure_unit(), target.pressure_unit())
            }
        }
    }

    /// 문자열(US/SI)을 단위 시스템으로 해석한다. 대소문자는 무시한다.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "US" | "IMPERIAL" => Some(UnitSystem::US),
            "SI" | "METRIC" => Some(UnitSystem::SI),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            UnitSystem::US => "US",
            UnitSystem::SI => "SI",
        }
    }
}
