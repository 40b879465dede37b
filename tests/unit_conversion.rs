//! US(in, psi) ↔ SI(mm, MPa) 환산 테스트.
use approx::assert_relative_eq;
use pressure_vessel_toolbox::quantity::QuantityKind;
use pressure_vessel_toolbox::units::{
    convert_length, convert_pressure, LengthUnit, PressureUnit, UnitSystem,
};
use pressure_vessel_toolbox::vessel::{VesselInputs, VesselModel};

#[test]
fn us_to_si_scales_each_field_by_quantity() {
    let mut v = VesselModel::new(VesselInputs::default(), UnitSystem::US).expect("vessel");
    let start = *v.inputs();
    v.convert_units(UnitSystem::SI).expect("to SI");
    assert_eq!(v.unit_system(), UnitSystem::SI);

    let converted: Vec<_> = v.inputs().fields().collect();
    assert_eq!(converted.len(), 6);
    for ((field, kind, new_value), (_, _, old_value)) in converted.into_iter().zip(start.fields())
    {
        let factor = match kind {
            QuantityKind::Length => 25.4,
            QuantityKind::Pressure => 0.006895,
        };
        assert!(
            (new_value - old_value * factor).abs() < 1e-9,
            "{field}: {new_value} vs {}",
            old_value * factor
        );
    }
    assert_relative_eq!(v.inputs().outer_diameter, 43.053, max_relative = 1e-12);
    assert_relative_eq!(v.inputs().external_pressure, 0.103425, max_relative = 1e-12);
}

#[test]
fn safety_factor_is_unit_independent() {
    let us = VesselModel::new(VesselInputs::default(), UnitSystem::US).expect("vessel");
    let mut si = us.clone();
    si.convert_units(UnitSystem::SI).expect("to SI");
    assert_relative_eq!(
        si.safety_factor_at_room(),
        us.safety_factor_at_room(),
        max_relative = 1e-9
    );
    assert_relative_eq!(
        si.max_local_stress(),
        us.max_local_stress() * 0.006895,
        max_relative = 1e-9
    );
}

#[test]
fn round_trip_restores_inputs() {
    let mut v = VesselModel::new(VesselInputs::default(), UnitSystem::US).expect("vessel");
    let start = *v.inputs();
    v.convert_units(UnitSystem::SI).expect("to SI");
    v.convert_units(UnitSystem::US).expect("back to US");
    assert_eq!(v.unit_system(), UnitSystem::US);
    for ((field, _, after), (_, _, before)) in v.inputs().fields().zip(start.fields()) {
        let rel = ((after - before) / before.max(1.0)).abs();
        assert!(rel < 1e-6, "{field}: {before} -> {after}");
    }
}

#[test]
fn converting_to_same_system_is_noop() {
    let mut v = VesselModel::new(VesselInputs::default(), UnitSystem::US).expect("vessel");
    let before = v.clone();
    v.convert_units(UnitSystem::US).expect("noop");
    assert_eq!(v, before);
}

#[test]
fn scalar_converters() {
    assert_relative_eq!(convert_length(1.0, LengthUnit::Inch, LengthUnit::Millimeter), 25.4);
    assert_relative_eq!(convert_length(25.4, LengthUnit::Millimeter, LengthUnit::Inch), 1.0);
    assert_relative_eq!(
        convert_pressure(1.0, PressureUnit::MegaPascal, PressureUnit::Psi),
        1.0 / 0.006895
    );
    assert_eq!(UnitSystem::parse("si"), Some(UnitSystem::SI));
    assert_eq!(UnitSystem::parse(" US "), Some(UnitSystem::US));
    assert_eq!(UnitSystem::parse("bar"), None);
    assert_eq!(UnitSystem::SI.symbol(QuantityKind::Pressure), "MPa");
}
