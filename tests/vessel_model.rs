//! 기본 설계값(15 psi 외압, OD 1.695 in, ID 1.460 in) 기준 회귀 테스트.
use approx::assert_relative_eq;
use pressure_vessel_toolbox::units::UnitSystem;
use pressure_vessel_toolbox::vessel::{
    evaluate, VesselError, VesselField, VesselInputs, VesselModel, VesselUpdate,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn default_vessel() -> VesselModel {
    VesselModel::new(VesselInputs::default(), UnitSystem::US).expect("default vessel")
}

#[test]
fn default_vessel_stresses() {
    let v = default_vessel();
    assert_close("max local", v.max_local_stress(), 100.676, 1e-3);
    assert_close("average linear", v.average_linear_stress(), 87.685, 1e-3);
    assert!(v.is_external_load_dominant());
    assert_eq!(v.load_factor(), 0.80);
}

#[test]
fn default_vessel_safety_factors_and_ratings() {
    let v = default_vessel();
    assert_close("SF room", v.safety_factor_at_room(), 1.094826, 1e-5);
    let derated = v.safety_factor_at_derated_temp().expect("derated modeled");
    assert_close("SF derated", derated, 1.058332, 1e-5);
    assert_eq!(v.min_safety_factor(), derated);

    // 같은 안전율을 파열/붕괴 양쪽에 적용한다.
    assert_close("burst", v.max_burst_internal_pressure(), 16.422387, 1e-5);
    assert_eq!(
        v.max_burst_internal_pressure(),
        v.max_collapse_external_pressure()
    );
    let burst_derated = v.max_burst_internal_pressure_derated().expect("derated");
    assert_relative_eq!(burst_derated, derated * 15.0, max_relative = 1e-12);
    assert_relative_eq!(v.allowable_average_stress_at_room(), 96.0);
}

#[test]
fn internal_pressure_uses_two_thirds_factor() {
    let inputs = VesselInputs {
        external_pressure: 0.0,
        internal_pressure: 15.0,
        ..VesselInputs::default()
    };
    let v = VesselModel::new(inputs, UnitSystem::US).expect("internal vessel");
    assert!(!v.is_external_load_dominant());
    assert_eq!(v.load_factor(), 0.666666);
    assert_close("SF room", v.safety_factor_at_room(), 0.912354, 1e-5);
}

#[test]
fn increasing_external_pressure_lowers_safety_factor() {
    let mut v = default_vessel();
    let sf_before = v.safety_factor_at_room();
    v.modify(VesselUpdate::new().external_pressure(20.0))
        .expect("modify p_ext");
    assert_eq!(v.inputs().external_pressure, 20.0);
    assert!(v.safety_factor_at_room() < sf_before);
    assert_close("SF room @20", v.safety_factor_at_room(), 0.821119, 1e-5);
}

#[test]
fn empty_update_is_idempotent() {
    let mut v = default_vessel();
    let before = v.clone();
    v.modify(VesselUpdate::new()).expect("empty update");
    assert_eq!(v, before);
    v.recompute().expect("recompute");
    assert_eq!(v, before);
}

#[test]
fn explicit_zero_is_applied() {
    let inputs = VesselInputs {
        internal_pressure: 5.0,
        ..VesselInputs::default()
    };
    let mut v = VesselModel::new(inputs, UnitSystem::US).expect("vessel");
    v.modify(VesselUpdate::new().external_pressure(0.0))
        .expect("zero external pressure");
    assert_eq!(v.inputs().external_pressure, 0.0);
    assert!(!v.is_external_load_dominant());
}

#[test]
fn invalid_geometry_is_rejected_without_touching_model() {
    let mut v = default_vessel();
    let before = v.clone();
    let err = v
        .modify(VesselUpdate::new().outer_diameter(1.460))
        .expect_err("OD == ID");
    assert_eq!(
        err,
        VesselError::InvalidGeometry {
            outer: 1.460,
            inner: 1.460
        }
    );
    assert_eq!(v, before);

    let inputs = VesselInputs {
        outer_diameter: 1.0,
        ..VesselInputs::default()
    };
    assert!(matches!(
        VesselModel::new(inputs, UnitSystem::US),
        Err(VesselError::InvalidGeometry { .. })
    ));
}

#[test]
fn non_positive_inputs_are_rejected() {
    let cases = [
        (VesselField::InnerDiameter, VesselUpdate::new().inner_diameter(0.0)),
        (VesselField::YieldStress, VesselUpdate::new().yield_stress(-1.0)),
        (
            VesselField::DeratedYieldStress,
            VesselUpdate::new().derated_yield_stress(0.0),
        ),
        (
            VesselField::ExternalPressure,
            VesselUpdate::new().external_pressure(-3.0),
        ),
    ];
    for (field, update) in cases {
        let mut v = default_vessel();
        match v.modify(update) {
            Err(VesselError::InvalidInput { field: f, .. }) => assert_eq!(f, field),
            other => panic!("{field}: expected InvalidInput, got {other:?}"),
        }
    }
}

#[test]
fn zero_or_balanced_pressure_is_degenerate() {
    let zero = VesselInputs {
        external_pressure: 0.0,
        internal_pressure: 0.0,
        ..VesselInputs::default()
    };
    assert!(matches!(
        evaluate(&zero),
        Err(VesselError::DegenerateStress { .. })
    ));

    let balanced = VesselInputs {
        external_pressure: 15.0,
        internal_pressure: 15.0,
        ..VesselInputs::default()
    };
    assert!(matches!(
        evaluate(&balanced),
        Err(VesselError::DegenerateStress { .. })
    ));
}

#[test]
fn derated_stress_is_optional() {
    let mut v = default_vessel();
    v.modify(VesselUpdate::new().clear_derated_yield_stress())
        .expect("clear derated");
    assert_eq!(v.inputs().derated_yield_stress, None);
    assert_eq!(v.safety_factor_at_derated_temp(), None);
    assert_eq!(v.max_burst_internal_pressure_derated(), None);
    assert_eq!(v.min_safety_factor(), v.safety_factor_at_room());
}

#[test]
fn evaluate_matches_model() {
    let v = default_vessel();
    let results = evaluate(v.inputs()).expect("evaluate");
    assert_eq!(&results, v.results());
    assert_relative_eq!(
        results.max_local_stress,
        results.von_mises_inner.max(results.von_mises_outer)
    );
}
