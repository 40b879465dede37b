//! 직경 조합 점검과 안전율 격자 테스트.
use pressure_vessel_toolbox::units::UnitSystem;
use pressure_vessel_toolbox::vessel::sweep::{diameter_range, DEFAULT_STEP, MAX_POINTS_PER_AXIS};
use pressure_vessel_toolbox::vessel::{
    check_diameters, safety_factor_grid, SweepError, VesselInputs, VesselModel,
};

fn default_model() -> VesselModel {
    VesselModel::new(VesselInputs::default(), UnitSystem::US).expect("default vessel")
}

#[test]
fn check_diameters_returns_room_safety_factor() {
    let mut v = default_model();
    let sf = check_diameters(&mut v, 1.460, 1.695).expect("valid");
    assert!((sf - 1.094826).abs() < 1e-5, "SF={sf}");
    assert_eq!(sf, v.safety_factor_at_room());

    let sf = check_diameters(&mut v, 1.400, 1.800).expect("valid");
    assert_eq!(v.inputs().inner_diameter, 1.400);
    assert_eq!(v.inputs().outer_diameter, 1.800);
    assert!(sf > 1.094826);
}

#[test]
fn check_diameters_skips_inverted_geometry() {
    let mut v = default_model();
    let before = v.clone();
    assert_eq!(check_diameters(&mut v, 1.8, 1.7).expect("skipped"), 0.0);
    assert_eq!(check_diameters(&mut v, 1.7, 1.7).expect("skipped"), 0.0);
    assert_eq!(v, before);
}

#[test]
fn diameter_range_includes_both_ends() {
    let r = diameter_range(1.6, 1.75, DEFAULT_STEP).expect("range");
    assert_eq!(r.len(), 31);
    assert_eq!(r[0], 1.6);
    assert!((r[30] - 1.75).abs() < 1e-12);

    let single = diameter_range(1.5, 1.5, 0.01).expect("range");
    assert_eq!(single, vec![1.5]);
}

#[test]
fn diameter_range_rejects_bad_input() {
    assert!(matches!(
        diameter_range(1.0, 2.0, 0.0),
        Err(SweepError::InvalidRange { .. })
    ));
    assert!(matches!(
        diameter_range(2.0, 1.0, 0.1),
        Err(SweepError::InvalidRange { .. })
    ));
    assert!(diameter_range(1.0, 2.0, f64::NAN).is_err());
    assert!(diameter_range(f64::NAN, 2.0, 0.1).is_err());
}

#[test]
fn diameter_range_rejects_excessive_point_count() {
    assert!(matches!(
        diameter_range(1.0, 2.0, 1e-320),
        Err(SweepError::InvalidRange { .. })
    ));
    assert!(matches!(
        diameter_range(1.0, 2.0, 1e-9),
        Err(SweepError::InvalidRange { .. })
    ));
    let template = VesselInputs::default();
    assert!(safety_factor_grid(&template, (1.4, 1.5), (1.6, 1.7), 1e-12).is_err());

    let step = 1.0 / (MAX_POINTS_PER_AXIS - 1) as f64;
    let r = diameter_range(0.0, 1.0, step).expect("largest allowed range");
    assert_eq!(r.len(), MAX_POINTS_PER_AXIS);
}

#[test]
fn grid_shape_and_inverted_cells() {
    let template = VesselInputs::default();
    let grid = safety_factor_grid(&template, (1.40, 1.50), (1.45, 1.75), 0.05).expect("grid");
    assert_eq!(grid.inner_diameters.len(), 3);
    assert_eq!(grid.outer_diameters.len(), 7);
    assert_eq!(grid.values.len(), 7);
    assert!(grid.values.iter().all(|row| row.len() == 3));

    // OD 1.45 는 ID 1.45, 1.50 보다 작거나 같다.
    assert_eq!(grid.values[0][1], 0.0);
    assert_eq!(grid.values[0][2], 0.0);
    assert!(grid.values[0][0] > 0.0);

    // 같은 내경에서 외경이 커질수록 안전율이 커진다.
    for i in 0..3 {
        let column: Vec<f64> = grid.values.iter().map(|row| row[i]).collect();
        assert!(column.windows(2).all(|w| w[1] >= w[0]));
    }
    assert_eq!(grid.max(), grid.values[6][0]);
}

#[test]
fn feasible_boundary_tracks_unit_safety_factor() {
    let template = VesselInputs::default();
    let grid =
        safety_factor_grid(&template, (1.46, 1.46), (1.60, 1.75), DEFAULT_STEP).expect("grid");
    let boundary = grid.feasible_boundary();
    assert_eq!(boundary.len(), 1);
    let (id, od) = boundary[0];
    assert_eq!(id, 1.46);
    let od = od.expect("feasible outer diameter in range");
    assert!((1.670..=1.680).contains(&od), "OD={od}");

    let thin = safety_factor_grid(&template, (1.46, 1.46), (1.47, 1.50), 0.01).expect("grid");
    assert_eq!(thin.feasible_boundary(), vec![(1.46, None)]);
}

#[test]
fn grid_reports_degenerate_template() {
    let template = VesselInputs {
        external_pressure: 0.0,
        internal_pressure: 0.0,
        ..VesselInputs::default()
    };
    let err = safety_factor_grid(&template, (1.4, 1.5), (1.6, 1.7), 0.05).expect_err("degenerate");
    assert!(matches!(err, SweepError::Vessel(_)));
}
