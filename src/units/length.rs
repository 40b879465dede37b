use serde::{Deserialize, Serialize};

/// 길이 단위. 내부 기준은 밀리미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Inch,
    Millimeter,
}

/// 1 in = 25.4 mm
pub const MM_PER_INCH: f64 = 25.4;

impl LengthUnit {
    /// 화면 표시용 단위 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Inch => "in",
            LengthUnit::Millimeter => "mm",
        }
    }
}

fn to_millimeter(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Inch => value * MM_PER_INCH,
        LengthUnit::Millimeter => value,
    }
}

fn from_millimeter(value_mm: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Inch => value_mm / MM_PER_INCH,
        LengthUnit::Millimeter => value_mm,
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    if from == to {
        return value;
    }
    let mm = to_millimeter(value, from);
    from_millimeter(mm, to)
}
