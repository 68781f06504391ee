//! Curve tables over saturation grids.
//!
//! Points are independent, so evaluation fans out across the rayon pool.
//! Failures are kept per point rather than aborting the sweep.

use crate::capillary::CapillaryPressure;
use crate::error::{RockError, RockResult};
use crate::relperm::{RelPermTriple, ThreePhaseRelPerm};
use rayon::prelude::*;

/// Uniform saturation grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationSweep {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
}

impl SaturationSweep {
    pub fn new(start: f64, end: f64, num_points: usize) -> RockResult<Self> {
        for (name, value) in [("start", start), ("end", end)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RockError::invalid(name, value, "sweep bound must lie in [0, 1]"));
            }
        }
        if num_points < 2 {
            return Err(RockError::invalid(
                "num_points",
                num_points as f64,
                "sweep must have at least 2 points",
            ));
        }
        if (start - end).abs() < 1e-12 {
            return Err(RockError::invalid(
                "end",
                end,
                "start and end values must be different",
            ));
        }
        Ok(Self {
            start,
            end,
            num_points,
        })
    }

    /// Grid points, endpoint exact.
    pub fn generate_points(&self) -> Vec<f64> {
        let delta = (self.end - self.start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| self.start + i as f64 * delta)
            .collect();
        points[self.num_points - 1] = self.end;
        points
    }
}

/// Per-point results of a sweep.
#[derive(Debug, Clone)]
pub struct CurveTable<T> {
    pub saturations: Vec<f64>,
    pub values: Vec<RockResult<T>>,
}

impl<T: Copy> CurveTable<T> {
    pub fn num_successful(&self) -> usize {
        self.values.iter().filter(|v| v.is_ok()).count()
    }

    pub fn num_failed(&self) -> usize {
        self.values.len() - self.num_successful()
    }

    /// `(saturation, value)` pairs for the points that evaluated.
    pub fn successful(&self) -> Vec<(f64, T)> {
        self.saturations
            .iter()
            .zip(&self.values)
            .filter_map(|(s, v)| v.as_ref().ok().map(|v| (*s, *v)))
            .collect()
    }
}

/// Capillary pressure against wetting-phase saturation.
pub fn sweep_capillary(model: &dyn CapillaryPressure, sweep: &SaturationSweep) -> CurveTable<f64> {
    let saturations = sweep.generate_points();
    let values: Vec<RockResult<f64>> = saturations.par_iter().map(|&sw| model.pressure(sw)).collect();
    let table = CurveTable {
        saturations,
        values,
    };
    tracing::debug!(
        model = model.name(),
        points = table.saturations.len(),
        failed = table.num_failed(),
        "capillary sweep complete"
    );
    table
}

/// Relative permeabilities against water saturation at fixed gas saturation;
/// oil fills the remainder, `So = 1 - Sw - Sg`.
pub fn sweep_relperm(
    model: &dyn ThreePhaseRelPerm,
    sweep: &SaturationSweep,
    sg: f64,
) -> CurveTable<RelPermTriple> {
    let saturations = sweep.generate_points();
    let values: Vec<RockResult<RelPermTriple>> = saturations
        .par_iter()
        .map(|&sw| model.evaluate(sw, 1.0 - sw - sg, sg))
        .collect();
    let table = CurveTable {
        saturations,
        values,
    };
    tracing::debug!(
        model = model.name(),
        points = table.saturations.len(),
        failed = table.num_failed(),
        sg,
        "relperm sweep complete"
    );
    table
}
