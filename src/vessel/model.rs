use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::VesselError;
use super::stress::{self, PrincipalStresses};
use crate::quantity::QuantityKind;
use crate::units::UnitSystem;

/// 용기의 설계 입력 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VesselField {
    ExternalPressure,
    InternalPressure,
    OuterDiameter,
    InnerDiameter,
    YieldStress,
    DeratedYieldStress,
}

impl VesselField {
    pub const ALL: [VesselField; 6] = [
        VesselField::ExternalPressure,
        VesselField::InternalPressure,
        VesselField::OuterDiameter,
        VesselField::InnerDiameter,
        VesselField::YieldStress,
        VesselField::DeratedYieldStress,
    ];

    /// 항목이 속하는 물리량. 단위 변환 시 이 값으로 환산 계수를 고른다.
    pub fn quantity(&self) -> QuantityKind {
        match self {
            VesselField::OuterDiameter | VesselField::InnerDiameter => QuantityKind::Length,
            VesselField::ExternalPressure
            | VesselField::InternalPressure
            | VesselField::YieldStress
            | VesselField::DeratedYieldStress => QuantityKind::Pressure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VesselField::ExternalPressure => "external_pressure",
            VesselField::InternalPressure => "internal_pressure",
            VesselField::OuterDiameter => "outer_diameter",
            VesselField::InnerDiameter => "inner_diameter",
            VesselField::YieldStress => "yield_stress",
            VesselField::DeratedYieldStress => "derated_yield_stress",
        }
    }
}

impl fmt::Display for VesselField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 용기 설계 입력값. 하나의 단위 시스템 안에서 일관된 값이어야 한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselInputs {
    pub external_pressure: f64,
    pub internal_pressure: f64,
    pub outer_diameter: f64,
    pub inner_diameter: f64,
    pub yield_stress: f64,
    /// 고온(감소) 허용응력. 없으면 상온 항복응력만 평가한다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derated_yield_stress: Option<f64>,
}

impl Default for VesselInputs {
    /// 기본 설계값 (US 단위: psi, in). 400°F 감소 항복응력 포함.
    fn default() -> Self {
        Self {
            external_pressure: 15.0,
            internal_pressure: 0.0,
            outer_diameter: 1.695,
            inner_diameter: 1.460,
            yield_stress: 120.0,
            derated_yield_stress: Some(116.0),
        }
    }
}

impl VesselInputs {
    /// 항목 값을 읽는다. 감소 항복응력이 없으면 `None`.
    pub fn get(&self, field: VesselField) -> Option<f64> {
        match field {
            VesselField::ExternalPressure => Some(self.external_pressure),
            VesselField::InternalPressure => Some(self.internal_pressure),
            VesselField::OuterDiameter => Some(self.outer_diameter),
            VesselField::InnerDiameter => Some(self.inner_diameter),
            VesselField::YieldStress => Some(self.yield_stress),
            VesselField::DeratedYieldStress => self.derated_yield_stress,
        }
    }

    fn set(&mut self, field: VesselField, value: f64) {
        match field {
            VesselField::ExternalPressure => self.external_pressure = value,
            VesselField::InternalPressure => self.internal_pressure = value,
            VesselField::OuterDiameter => self.outer_diameter = value,
            VesselField::InnerDiameter => self.inner_diameter = value,
            VesselField::YieldStress => self.yield_stress = value,
            VesselField::DeratedYieldStress => self.derated_yield_stress = Some(value),
        }
    }

    /// 값이 있는 모든 항목을 (항목, 물리량, 값) 순서로 나열한다.
    pub fn fields(&self) -> impl Iterator<Item = (VesselField, QuantityKind, f64)> + '_ {
        VesselField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|v| (field, field.quantity(), v)))
    }

    /// 외압이 내압보다 큰지 여부.
    pub fn is_external_load_dominant(&self) -> bool {
        self.external_pressure > self.internal_pressure
    }

    /// |P_ext - P_int|
    pub fn differential_pressure(&self) -> f64 {
        (self.external_pressure - self.internal_pressure).abs()
    }

    /// 상온/감소 허용응력 중 작은 값.
    pub fn governing_allowable(&self) -> f64 {
        match self.derated_yield_stress {
            Some(derated) => self.yield_stress.min(derated),
            None => self.yield_stress,
        }
    }

    /// 입력 범위와 OD > ID 조건을 검사한다.
    pub fn validate(&self) -> Result<(), VesselError> {
        for (field, _, value) in self.fields() {
            let ok = match field {
                VesselField::ExternalPressure | VesselField::InternalPressure => {
                    value.is_finite() && value >= 0.0
                }
                _ => value.is_finite() && value > 0.0,
            };
            if !ok {
                return Err(VesselError::InvalidInput { field, value });
            }
        }
        if self.outer_diameter <= self.inner_diameter {
            return Err(VesselError::InvalidGeometry {
                outer: self.outer_diameter,
                inner: self.inner_diameter,
            });
        }
        Ok(())
    }

    /// 모든 항목을 `from` 단위 시스템에서 `to`로 환산한 사본을 만든다.
    pub fn converted(&self, from: UnitSystem, to: UnitSystem) -> VesselInputs {
        let mut out = *self;
        for (field, kind, value) in self.fields() {
            out.set(field, from.convert(kind, value, to));
        }
        out
    }
}

/// 부분 수정 요청. `None`인 항목은 기존 값을 유지한다.
///
/// 명시적인 `Some(0.0)`은 정상적인 0 값으로 적용된다.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VesselUpdate {
    pub external_pressure: Option<f64>,
    pub internal_pressure: Option<f64>,
    pub outer_diameter: Option<f64>,
    pub inner_diameter: Option<f64>,
    pub yield_stress: Option<f64>,
    pub derated_yield_stress: Option<f64>,
    /// 감소 항복응력을 제거한다. `derated_yield_stress`보다 우선한다.
    pub clear_derated_yield_stress: bool,
}

impl VesselUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn external_pressure(mut self, value: f64) -> Self {
        self.external_pressure = Some(value);
        self
    }

    pub fn internal_pressure(mut self, value: f64) -> Self {
        self.internal_pressure = Some(value);
        self
    }

    pub fn outer_diameter(mut self, value: f64) -> Self {
        self.outer_diameter = Some(value);
        self
    }

    pub fn inner_diameter(mut self, value: f64) -> Self {
        self.inner_diameter = Some(value);
        self
    }

    pub fn yield_stress(mut self, value: f64) -> Self {
        self.yield_stress = Some(value);
        self
    }

    pub fn derated_yield_stress(mut self, value: f64) -> Self {
        self.derated_yield_stress = Some(value);
        self
    }

    pub fn clear_derated_yield_stress(mut self) -> Self {
        self.clear_derated_yield_stress = true;
        self
    }

    /// 항목 하나를 지정한다.
    pub fn with(self, field: VesselField, value: f64) -> Self {
        match field {
            VesselField::ExternalPressure => self.external_pressure(value),
            VesselField::InternalPressure => self.internal_pressure(value),
            VesselField::OuterDiameter => self.outer_diameter(value),
            VesselField::InnerDiameter => self.inner_diameter(value),
            VesselField::YieldStress => self.yield_stress(value),
            VesselField::DeratedYieldStress => self.derated_yield_stress(value),
        }
    }

    /// 한 항목만 바꾸는 요청을 만든다.
    pub fn single(field: VesselField, value: f64) -> Self {
        Self::new().with(field, value)
    }

    /// 기존 입력에 적용한 결과 입력값.
    pub fn apply_to(&self, base: &VesselInputs) -> VesselInputs {
        let derated_yield_stress = if self.clear_derated_yield_stress {
            None
        } else {
            self.derated_yield_stress.or(base.derated_yield_stress)
        };
        VesselInputs {
            external_pressure: self.external_pressure.unwrap_or(base.external_pressure),
            internal_pressure: self.internal_pressure.unwrap_or(base.internal_pressure),
            outer_diameter: self.outer_diameter.unwrap_or(base.outer_diameter),
            inner_diameter: self.inner_diameter.unwrap_or(base.inner_diameter),
            yield_stress: self.yield_stress.unwrap_or(base.yield_stress),
            derated_yield_stress,
        }
    }
}

/// 안전율로부터 얻은 최대 허용 압력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureRating {
    /// 파열 기준 최대 내압
    pub max_internal: f64,
    /// 붕괴 기준 최대 외압
    pub max_external: f64,
}

impl PressureRating {
    // 같은 안전율을 양 방향에 그대로 적용한다.
    fn from_safety_factor(safety_factor: f64, differential: f64) -> Self {
        let rating = safety_factor * differential;
        Self {
            max_internal: rating,
            max_external: rating,
        }
    }
}

/// 입력으로부터 유도되는 계산 결과 전체.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselResults {
    pub external_load_dominant: bool,
    /// 평균 응력에 적용한 하중 방향 보정계수 k
    pub load_factor: f64,
    pub inner_stresses: PrincipalStresses,
    pub outer_stresses: PrincipalStresses,
    pub von_mises_inner: f64,
    pub von_mises_outer: f64,
    pub max_local_stress: f64,
    pub average_linear_stress: f64,
    pub safety_factor_at_room: f64,
    pub safety_factor_at_derated_temp: Option<f64>,
    pub room_rating: PressureRating,
    pub derated_rating: Option<PressureRating>,
}

impl VesselResults {
    /// 상온/감소 온도 안전율 중 작은 값.
    pub fn min_safety_factor(&self) -> f64 {
        match self.safety_factor_at_derated_temp {
            Some(derated) => self.safety_factor_at_room.min(derated),
            None => self.safety_factor_at_room,
        }
    }
}

const DEGENERATE_STRESS_RATIO: f64 = 1e-9;

/// 입력을 검증한 뒤 모든 결과를 계산한다. 모델을 만들지 않는 순수 함수이다.
pub fn evaluate(inputs: &VesselInputs) -> Result<VesselResults, VesselError> {
    inputs.validate()?;
    derive(inputs)
}

// 검증을 통과한 입력에 대해서만 호출한다.
fn derive(inputs: &VesselInputs) -> Result<VesselResults, VesselError> {
    let VesselInputs {
        external_pressure: p_ext,
        internal_pressure: p_int,
        outer_diameter: od,
        inner_diameter: id,
        ..
    } = *inputs;

    let inner_stresses = stress::inner_surface(p_ext, p_int, od, id);
    let outer_stresses = stress::outer_surface(p_ext, p_int, od, id);
    let von_mises_inner = inner_stresses.von_mises();
    let von_mises_outer = outer_stresses.von_mises();
    let max_local_stress = von_mises_inner.max(von_mises_outer);
    let average_linear_stress = (von_mises_inner + von_mises_outer) / 2.0;

    let degenerate = || VesselError::DegenerateStress {
        max_local: max_local_stress,
        average: average_linear_stress,
    };
    // 내외압이 같으면 이론상 0이지만 반올림 오차가 남으므로 압력 크기 대비로 판단한다.
    if max_local_stress <= DEGENERATE_STRESS_RATIO * p_ext.max(p_int) {
        return Err(degenerate());
    }

    let external_load_dominant = inputs.is_external_load_dominant();
    let load_factor = stress::load_factor(external_load_dominant);
    let factor_for = |allowable: f64| {
        stress::governing_safety_factor(
            allowable,
            load_factor,
            max_local_stress,
            average_linear_stress,
        )
        .ok_or_else(degenerate)
    };

    let safety_factor_at_room = factor_for(inputs.yield_stress)?;
    let safety_factor_at_derated_temp = inputs.derated_yield_stress.map(factor_for).transpose()?;

    let differential = inputs.differential_pressure();
    let room_rating = PressureRating::from_safety_factor(safety_factor_at_room, differential);
    let derated_rating = safety_factor_at_derated_temp
        .map(|sf| PressureRating::from_safety_factor(sf, differential));

    Ok(VesselResults {
        external_load_dominant,
        load_factor,
        inner_stresses,
        outer_stresses,
        von_mises_inner,
        von_mises_outer,
        max_local_stress,
        average_linear_stress,
        safety_factor_at_room,
        safety_factor_at_derated_temp,
        room_rating,
        derated_rating,
    })
}

/// 후육 원통형 압력용기 모델.
///
/// 생성과 수정 시 항상 전체 결과를 다시 계산하므로 결과가 입력보다 오래된 상태는 없다.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselModel {
    inputs: VesselInputs,
    unit_system: UnitSystem,
    results: VesselResults,
}

impl VesselModel {
    /// 입력을 검증하고 모든 결과를 계산해 모델을 만든다.
    pub fn new(inputs: VesselInputs, unit_system: UnitSystem) -> Result<Self, VesselError> {
        let results = evaluate(&inputs)?;
        Ok(Self {
            inputs,
            unit_system,
            results,
        })
    }

    pub fn inputs(&self) -> &VesselInputs {
        &self.inputs
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn results(&self) -> &VesselResults {
        &self.results
    }

    /// 부분 수정 후 전체 재계산. 실패하면 모델은 이전 상태 그대로이다.
    pub fn modify(&mut self, update: VesselUpdate) -> Result<(), VesselError> {
        let candidate = update.apply_to(&self.inputs);
        self.replace_inputs(candidate)
    }

    /// 현재 입력으로 결과를 다시 계산한다.
    pub fn recompute(&mut self) -> Result<(), VesselError> {
        self.results = derive(&self.inputs)?;
        Ok(())
    }

    /// 입력 전체를 교체한다. 검증과 계산이 모두 성공해야 반영된다.
    pub fn replace_inputs(&mut self, inputs: VesselInputs) -> Result<(), VesselError> {
        let results = evaluate(&inputs)?;
        self.inputs = inputs;
        self.results = results;
        Ok(())
    }

    /// 모든 입력을 `target` 단위 시스템으로 환산하고 재계산한다.
    pub fn convert_units(&mut self, target: UnitSystem) -> Result<(), VesselError> {
        if self.unit_system == target {
            return Ok(());
        }
        let converted = self.inputs.converted(self.unit_system, target);
        self.replace_inputs(converted)?;
        self.unit_system = target;
        Ok(())
    }

    pub fn is_external_load_dominant(&self) -> bool {
        self.results.external_load_dominant
    }

    pub fn load_factor(&self) -> f64 {
        self.results.load_factor
    }

    pub fn max_local_stress(&self) -> f64 {
        self.results.max_local_stress
    }

    pub fn average_linear_stress(&self) -> f64 {
        self.results.average_linear_stress
    }

    /// 평균 선형응력의 상온 허용값 (Y·k)
    pub fn allowable_average_stress_at_room(&self) -> f64 {
        self.inputs.yield_stress * self.results.load_factor
    }

    /// 평균 선형응력의 감소 온도 허용값 (Y_derated·k)
    pub fn allowable_average_stress_at_derated_temp(&self) -> Option<f64> {
        self.inputs
            .derated_yield_stress
            .map(|derated| derated * self.results.load_factor)
    }

    pub fn safety_factor_at_room(&self) -> f64 {
        self.results.safety_factor_at_room
    }

    pub fn safety_factor_at_derated_temp(&self) -> Option<f64> {
        self.results.safety_factor_at_derated_temp
    }

    pub fn min_safety_factor(&self) -> f64 {
        self.results.min_safety_factor()
    }

    pub fn max_burst_internal_pressure(&self) -> f64 {
        self.results.room_rating.max_internal
    }

    pub fn max_collapse_external_pressure(&self) -> f64 {
        self.results.room_rating.max_external
    }

    pub fn max_burst_internal_pressure_derated(&self) -> Option<f64> {
        self.results.derated_rating.map(|r| r.max_internal)
    }

    pub fn max_collapse_external_pressure_derated(&self) -> Option<f64> {
        self.results.derated_rating.map(|r| r.max_external)
    }
}
