//! pf-rock: rock-fluid curve models for petroflow.
//!
//! Provides:
//! - Saturation normalisation onto the mobile range
//! - Capillary pressure models (Brooks-Corey, van Genuchten, Leverett J-function)
//!   with forward and inverse evaluation
//! - Two-phase Corey curves and three-phase oil relative permeability
//!   (Stone I, Stone II, Aziz-Settari, Hustad-Holt)
//! - A closed registry resolving model names and flat parameter sets
//! - Parallel curve sweeps over saturation grids
//!
//! # Example
//!
//! ```
//! use pf_rock::{ModelParams, resolve};
//!
//! let params = ModelParams::new()
//!     .with("irreducible", 0.2)
//!     .with("residual", 0.1)
//!     .with("entry_pressure", 5_000.0)
//!     .with("lambda", 2.0);
//!
//! let model = resolve("brooks_corey", &params).unwrap();
//! let pc = model.as_capillary().unwrap();
//! let p = pc.pressure(0.5).unwrap();
//! let sw = pc.saturation(p).unwrap();
//! assert!((sw - 0.5).abs() < 1e-9);
//! ```

pub mod capillary;
pub mod error;
pub mod params;
pub mod registry;
pub mod relperm;
pub mod saturation;
pub mod sweeps;

// Re-exports for ergonomics
pub use capillary::{BrooksCorey, CapillaryPressure, LeverettJ, RockDescriptor, VanGenuchten};
pub use error::{RockError, RockResult};
pub use params::ModelParams;
pub use registry::{Model, ModelFamily, ModelKind, RegistryEntry, lookup, model_names, resolve, resolve_with_policy};
pub use relperm::{
    AzizSettari, CoreyCurves, CoreyParams, HustadHolt, RelPermTriple, StoneI, StoneII,
    ThreePhaseRelPerm, TwoPhaseValues,
};
pub use saturation::{RangePolicy, SaturationNormalizer, ThreePhaseSaturation};
pub use sweeps::{CurveTable, SaturationSweep, sweep_capillary, sweep_relperm};
