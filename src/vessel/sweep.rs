//! 내경/외경 조합에 대한 안전율 격자 계산 (설계 범위 시각화용).

use thiserror::Error;

use super::error::VesselError;
use super::model::{evaluate, VesselInputs, VesselModel, VesselUpdate};

/// 격자 기본 간격 (길이 단위)
pub const DEFAULT_STEP: f64 = 0.005;

/// 축 하나에 허용하는 최대 점 개수
pub const MAX_POINTS_PER_AXIS: usize = 100_000;

/// 격자 계산 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    #[error("잘못된 범위: [{min}, {max}], 간격 {step}")]
    InvalidRange { min: f64, max: f64, step: f64 },

    #[error(transparent)]
    Vessel(#[from] VesselError),
}

/// 모델의 내경/외경을 바꾸고 상온 안전율을 돌려준다.
///
/// OD ≤ ID 이면 계산하지 않고 0을 돌려주며 모델도 바꾸지 않는다.
pub fn check_diameters(
    model: &mut VesselModel,
    inner_diameter: f64,
    outer_diameter: f64,
) -> Result<f64, VesselError> {
    if outer_diameter <= inner_diameter {
        return Ok(0.0);
    }
    model.modify(
        VesselUpdate::new()
            .inner_diameter(inner_diameter)
            .outer_diameter(outer_diameter),
    )?;
    Ok(model.safety_factor_at_room())
}

/// 안전율 격자. `values[j][i]`는 `outer_diameters[j]`, `inner_diameters[i]` 조합의 값이다.
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyFactorGrid {
    pub inner_diameters: Vec<f64>,
    pub outer_diameters: Vec<f64>,
    pub values: Vec<Vec<f64>>,
}

impl SafetyFactorGrid {
    /// 각 내경에서 상온 안전율 1.0 이상이 되는 최소 외경. 없으면 `None`.
    pub fn feasible_boundary(&self) -> Vec<(f64, Option<f64>)> {
        self.inner_diameters
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let od = self
                    .outer_diameters
                    .iter()
                    .zip(&self.values)
                    .find(|(_, row)| row[i] >= 1.0)
                    .map(|(&od, _)| od);
                (id, od)
            })
            .collect()
    }

    pub fn max(&self) -> f64 {
        self.values
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

/// `min`부터 `max`까지 `step` 간격의 값 (양 끝 포함).
///
/// 점 개수가 `MAX_POINTS_PER_AXIS`를 넘으면 `InvalidRange`이다.
pub fn diameter_range(min: f64, max: f64, step: f64) -> Result<Vec<f64>, SweepError> {
    let invalid = || SweepError::InvalidRange { min, max, step };
    if step.is_nan() || step <= 0.0 || !min.is_finite() || !max.is_finite() || min > max {
        return Err(invalid());
    }
    // 부동소수 오차로 마지막 점이 빠지지 않도록 약간의 여유를 둔다.
    let intervals = ((max - min) / step + 1e-9).floor();
    if !intervals.is_finite() || intervals >= MAX_POINTS_PER_AXIS as f64 {
        return Err(invalid());
    }
    let count = intervals as usize + 1;
    Ok((0..count).map(|i| min + i as f64 * step).collect())
}

/// 압력/항복응력은 `template`을 따르고 직경만 바꿔 가며 상온 안전율 격자를 만든다.
pub fn safety_factor_grid(
    template: &VesselInputs,
    inner_range: (f64, f64),
    outer_range: (f64, f64),
    step: f64,
) -> Result<SafetyFactorGrid, SweepError> {
    let inner_diameters = diameter_range(inner_range.0, inner_range.1, step)?;
    let outer_diameters = diameter_range(outer_range.0, outer_range.1, step)?;

    let mut values = Vec::with_capacity(outer_diameters.len());
    for &od in &outer_diameters {
        let mut row = Vec::with_capacity(inner_diameters.len());
        for &id in &inner_diameters {
            if od <= id {
                row.push(0.0);
                continue;
            }
            let inputs = VesselInputs {
                outer_diameter: od,
                inner_diameter: id,
                ..*template
            };
            row.push(evaluate(&inputs)?.safety_factor_at_room);
        }
        values.push(row);
    }

    Ok(SafetyFactorGrid {
        inner_diameters,
        outer_diameters,
        values,
    })
}
