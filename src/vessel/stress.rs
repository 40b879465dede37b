//! Lamé 후육 원통 이론 기반 응력/안전율 계산식.
//!
//! 모든 함수는 순수 함수이며 입력 검증은 호출자(`VesselModel`)가 담당한다.

/// 외압이 지배적일 때 평균 응력에 적용하는 허용응력 보정계수.
pub const K_EXTERNAL: f64 = 0.80;
/// 내압이 지배적일 때의 보정계수 (2/3, 계산서 관례상 0.666666 사용)
pub const K_INTERNAL: f64 = 0.666666;

/// 한 지점의 주응력 3성분.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalStresses {
    pub hoop: f64,
    pub axial: f64,
    pub radial: f64,
}

impl PrincipalStresses {
    /// 이 지점의 von Mises 등가응력.
    pub fn von_mises(&self) -> f64 {
        von_mises(self.hoop, self.axial, self.radial)
    }
}

/// 내면(ID)의 주응력을 계산한다.
pub fn inner_surface(p_ext: f64, p_int: f64, od: f64, id: f64) -> PrincipalStresses {
    let od2 = od * od;
    let id2 = id * id;
    let denom = od2 - id2;
    PrincipalStresses {
        hoop: p_int * (od2 + id2) / denom - 2.0 * p_ext * od2 / denom,
        axial: axial(p_ext, p_int, od2, id2, denom),
        radial: -p_int,
    }
}

/// 외면(OD)의 주응력을 계산한다.
pub fn outer_surface(p_ext: f64, p_int: f64, od: f64, id: f64) -> PrincipalStresses {
    let od2 = od * od;
    let id2 = id * id;
    let denom = od2 - id2;
    PrincipalStresses {
        hoop: 2.0 * p_int * id2 / denom - p_ext * (od2 + id2) / denom,
        axial: axial(p_ext, p_int, od2, id2, denom),
        radial: -p_ext,
    }
}

// 축방향 응력은 내면/외면이 동일하다.
fn axial(p_ext: f64, p_int: f64, od2: f64, id2: f64, denom: f64) -> f64 {
    p_int * id2 / denom - p_ext * od2 / denom
}

/// 세 주응력으로부터 von Mises 등가응력을 계산한다.
pub fn von_mises(s1: f64, s2: f64, s3: f64) -> f64 {
    (0.5 * ((s1 - s2).powi(2) + (s2 - s3).powi(2) + (s3 - s1).powi(2))).sqrt()
}

/// 하중 방향에 따른 보정계수 k.
pub fn load_factor(external_dominant: bool) -> f64 {
    if external_dominant {
        K_EXTERNAL
    } else {
        K_INTERNAL
    }
}

/// 허용값 대비 안전율. `value`가 0이면 정의되지 않으므로 `None`.
pub fn safety_factor(value: f64, allowable: f64) -> Option<f64> {
    if value == 0.0 || !value.is_finite() {
        return None;
    }
    Some(allowable / value)
}

/// 최대 국부응력과 보정된 평균 선형응력 중 더 보수적인 안전율.
///
/// SF = min(Y / σ_max, Y·k / σ_avg)
pub fn governing_safety_factor(
    allowable: f64,
    k: f64,
    max_local: f64,
    average_linear: f64,
) -> Option<f64> {
    let local = safety_factor(max_local, allowable)?;
    let average = safety_factor(average_linear, allowable * k)?;
    Some(local.min(average))
}

/// Barlow 박육 근사식으로 필요한 벽 두께를 추정한다.
///
/// t = ΔP · D / (2 · S)
pub fn barlow_thickness(differential: f64, diameter: f64, allowable: f64) -> f64 {
    differential * diameter / (2.0 * allowable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn von_mises_reference_values() {
        assert_eq!(von_mises(80.0, 80.0, 0.0), 80.0);
        assert_eq!(von_mises(80.0, -80.0, 80.0), 160.0);
    }

    #[test]
    fn hydrostatic_state_has_no_equivalent_stress() {
        let s = inner_surface(10.0, 10.0, 2.0, 1.0);
        assert!(s.von_mises().abs() < 1e-12);
    }

    #[test]
    fn zero_stress_has_no_safety_factor() {
        assert_eq!(safety_factor(0.0, 120.0), None);
        assert_eq!(safety_factor(60.0, 120.0), Some(2.0));
    }

    #[test]
    fn load_factor_follows_dominant_side() {
        assert_eq!(load_factor(true), 0.80);
        assert_eq!(load_factor(false), 0.666666);
    }
}
