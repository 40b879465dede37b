//! 안전율 1.0을 만족하는 최소 외경 / 최대 내경을 이분법으로 찾는다.
//!
//! 각 평가는 모델의 직경을 바꾸고 전체를 재계산한다. 탐색이 끝나면 모델은
//! 수렴한 직경(구간 중 안전율 ≥ 1 쪽 끝)으로 수정된 상태로 남는다.

use serde::{Deserialize, Serialize};

use super::error::OptimizeError;
use super::model::{VesselField, VesselModel, VesselUpdate};
use super::stress;

/// 이분법 탐색 설정.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// 외경 탐색 수렴 허용오차 (구간 폭)
    pub outer_tolerance: f64,
    /// 내경 탐색 수렴 허용오차 (구간 폭)
    pub inner_tolerance: f64,
    /// 반대쪽 직경과 유지할 최소 간격
    pub clearance: f64,
    /// 이분법 반복 상한
    pub max_iterations: usize,
    /// 안전율 < 1 일 때 Barlow 추정 구간을 넓히는 최대 횟수
    pub max_bracket_expansions: usize,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            outer_tolerance: 0.00001,
            inner_tolerance: 0.0001,
            clearance: 0.001,
            max_iterations: 200,
            max_bracket_expansions: 50,
        }
    }
}

impl OptimizerSettings {
    /// 허용오차는 유한한 양수, 간격은 유한한 0 이상, 반복 상한은 1 이상이어야 한다.
    pub fn validate(&self) -> Result<(), OptimizeError> {
        let invalid = |setting: &'static str, value: f64| {
            Err(OptimizeError::InvalidSettings { setting, value })
        };
        for (setting, value) in [
            ("outer_tolerance", self.outer_tolerance),
            ("inner_tolerance", self.inner_tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(setting, value);
            }
        }
        if !self.clearance.is_finite() || self.clearance < 0.0 {
            return invalid("clearance", self.clearance);
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations", 0.0);
        }
        Ok(())
    }
}

/// 반복 한 번의 구간 기록.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionStep {
    pub lower: f64,
    pub upper: f64,
    pub midpoint: f64,
    /// 중점에서의 f(x) = SF - 1
    pub residual: f64,
}

/// 탐색 결과 요약.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationReport {
    pub field: VesselField,
    pub initial_diameter: f64,
    pub diameter: f64,
    /// 최종 직경에서의 지배 안전율 (상온/감소 중 작은 값)
    pub safety_factor: f64,
    pub iterations: usize,
    /// 안전율 < 1 에서 출발해 Barlow 추정으로 구간을 만든 경우 true
    pub used_barlow_estimate: bool,
    pub trace: Vec<BisectionStep>,
}

/// 안전율이 1.0이 되는 최소 외경을 찾아 모델에 반영한다.
pub fn minimize_outer_diameter(
    model: &mut VesselModel,
    settings: &OptimizerSettings,
) -> Result<OptimizationReport, OptimizeError> {
    settings.validate()?;
    rollback_on_error(model, |model| shrink_outer(model, settings))
}

/// 안전율이 1.0이 되는 최대 내경을 찾아 모델에 반영한다.
pub fn maximize_inner_diameter(
    model: &mut VesselModel,
    settings: &OptimizerSettings,
) -> Result<OptimizationReport, OptimizeError> {
    settings.validate()?;
    rollback_on_error(model, |model| grow_inner(model, settings))
}

// 실패하면 탐색 중 바뀐 직경을 되돌린다.
fn rollback_on_error<F>(
    model: &mut VesselModel,
    search: F,
) -> Result<OptimizationReport, OptimizeError>
where
    F: FnOnce(&mut VesselModel) -> Result<OptimizationReport, OptimizeError>,
{
    let snapshot = model.clone();
    let result = search(model);
    if result.is_err() {
        *model = snapshot;
    }
    result
}

fn shrink_outer(
    model: &mut VesselModel,
    settings: &OptimizerSettings,
) -> Result<OptimizationReport, OptimizeError> {
    let inputs = *model.inputs();
    let (upper, used_barlow_estimate) = if model.min_safety_factor() >= 1.0 {
        (inputs.outer_diameter, false)
    } else {
        let thickness = barlow_thickness(model, inputs.outer_diameter)?;
        // 벽은 양쪽에 있으므로 두께 t를 더하려면 직경을 2t 늘린다.
        let upper = expand_until_feasible(
            model,
            VesselField::OuterDiameter,
            inputs.outer_diameter + 2.0 * thickness,
            thickness,
            settings,
        )?;
        (upper, true)
    };
    let lower = inputs.inner_diameter + settings.clearance;
    let search = Search {
        field: VesselField::OuterDiameter,
        tolerance: settings.outer_tolerance,
        max_iterations: settings.max_iterations,
        initial_diameter: inputs.outer_diameter,
        used_barlow_estimate,
    };
    // 외경이 클수록 안전하므로 상한 쪽이 실현 가능한 끝이다.
    search.run(model, lower, upper, Feasible::Upper)
}

fn grow_inner(
    model: &mut VesselModel,
    settings: &OptimizerSettings,
) -> Result<OptimizationReport, OptimizeError> {
    let inputs = *model.inputs();
    let (lower, used_barlow_estimate) = if model.min_safety_factor() >= 1.0 {
        (inputs.inner_diameter, false)
    } else {
        let thickness = barlow_thickness(model, inputs.inner_diameter)?;
        let lower = expand_until_feasible(
            model,
            VesselField::InnerDiameter,
            inputs.inner_diameter - 2.0 * thickness,
            thickness,
            settings,
        )?;
        (lower, true)
    };
    let upper = inputs.outer_diameter - settings.clearance;
    let search = Search {
        field: VesselField::InnerDiameter,
        tolerance: settings.inner_tolerance,
        max_iterations: settings.max_iterations,
        initial_diameter: inputs.inner_diameter,
        used_barlow_estimate,
    };
    search.run(model, lower, upper, Feasible::Lower)
}

fn barlow_thickness(model: &VesselModel, reference: f64) -> Result<f64, OptimizeError> {
    let inputs = model.inputs();
    let differential = inputs.differential_pressure();
    if differential <= f64::EPSILON {
        return Err(OptimizeError::DegeneratePressure { differential });
    }
    Ok(stress::barlow_thickness(
        differential,
        reference,
        inputs.governing_allowable(),
    ))
}

// 추정 직경에서 안전율이 1 이상이 될 때까지 구간을 넓힌다.
// 첫 추정 이후의 확장 폭은 벽 두께가 아니라 직경 기준 thickness / SF 이다.
fn expand_until_feasible(
    model: &mut VesselModel,
    field: VesselField,
    start: f64,
    thickness: f64,
    settings: &OptimizerSettings,
) -> Result<f64, OptimizeError> {
    let direction = match field {
        VesselField::InnerDiameter => -1.0,
        _ => 1.0,
    };
    let mut candidate = start;
    for _ in 0..=settings.max_bracket_expansions {
        if candidate <= 0.0 {
            break;
        }
        model.modify(VesselUpdate::single(field, candidate))?;
        let safety_factor = model.min_safety_factor();
        if safety_factor >= 1.0 {
            return Ok(candidate);
        }
        candidate += direction * thickness / safety_factor;
    }
    Err(OptimizeError::NoFeasibleBracket {
        diameter: field,
        last_tried: candidate,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Feasible {
    Lower,
    Upper,
}

struct Search {
    field: VesselField,
    tolerance: f64,
    max_iterations: usize,
    initial_diameter: f64,
    used_barlow_estimate: bool,
}

impl Search {
    // f(x) = SF(x) - 1. 평가할 때마다 모델이 x로 수정된다.
    fn residual(&self, model: &mut VesselModel, diameter: f64) -> Result<f64, OptimizeError> {
        model.modify(VesselUpdate::single(self.field, diameter))?;
        Ok(model.min_safety_factor() - 1.0)
    }

    fn run(
        &self,
        model: &mut VesselModel,
        mut lower: f64,
        mut upper: f64,
        feasible: Feasible,
    ) -> Result<OptimizationReport, OptimizeError> {
        let mut f_lower = self.residual(model, lower)?;
        let mut f_upper = self.residual(model, upper)?;
        let mut trace = Vec::new();
        let mut iterations = 0;

        if f_lower * f_upper > 0.0 {
            if f_lower < 0.0 {
                return Err(OptimizeError::NoSignChange { lower, upper });
            }
            // 구간 전체가 안전율 ≥ 1: 간격 한계까지 줄이거나 늘릴 수 있다.
            match feasible {
                Feasible::Upper => upper = lower,
                Feasible::Lower => lower = upper,
            }
        }

        while upper - lower > self.tolerance {
            if iterations >= self.max_iterations {
                return Err(OptimizeError::NotConverged {
                    iterations,
                    width: upper - lower,
                });
            }
            iterations += 1;
            let midpoint = 0.5 * (lower + upper);
            let f_mid = self.residual(model, midpoint)?;
            trace.push(BisectionStep {
                lower,
                upper,
                midpoint,
                residual: f_mid,
            });
            if f_mid == 0.0 {
                lower = midpoint;
                upper = midpoint;
            } else if f_lower * f_mid <= 0.0 {
                upper = midpoint;
                f_upper = f_mid;
            } else if f_mid * f_upper <= 0.0 {
                lower = midpoint;
                f_lower = f_mid;
            } else {
                return Err(OptimizeError::NoSignChange { lower, upper });
            }
        }

        let diameter = match feasible {
            Feasible::Lower => lower,
            Feasible::Upper => upper,
        };
        model.modify(VesselUpdate::single(self.field, diameter))?;
        Ok(OptimizationReport {
            field: self.field,
            initial_diameter: self.initial_diameter,
            diameter,
            safety_factor: model.min_safety_factor(),
            iterations,
            used_barlow_estimate: self.used_barlow_estimate,
            trace,
        })
    }
}
