//! 후육 원통형 압력용기 계산 엔진.

pub mod error;
pub mod model;
pub mod optimizer;
pub mod stress;
pub mod sweep;

pub use error::{OptimizeError, VesselError};
pub use model::{
    evaluate, PressureRating, VesselField, VesselInputs, VesselModel, VesselResults,
    VesselUpdate,
};
pub use optimizer::{
    maximize_inner_diameter, minimize_outer_diameter, OptimizationReport, OptimizerSettings,
};
pub use sweep::{check_diameters, safety_factor_grid, SafetyFactorGrid, SweepError};
