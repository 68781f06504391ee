//! Rachford-Rice vapor fraction solver.
//!
//! The residual
//!
//! ```text
//! f(v) = sum z_i (K_i - 1) / (1 + v (K_i - 1))
//! ```
//!
//! is strictly decreasing between its asymptotes `1/(1 - K_max)` and
//! `1/(1 - K_min)`, so a root inside that window is unique. The solver runs a
//! Newton iteration on `v`, tightening the window on the sign of `f` and
//! bisecting whenever a Newton step would leave it. By default the full window
//! is searched (negative flash); `restrict_to_physical` limits it to `[0, 1]`.

use crate::error::{FlashError, FlashResult};
use crate::feed::Feed;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Newton configuration for the vapor fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RachfordRiceConfig {
    /// Iteration cap
    pub max_iterations: usize,
    /// Absolute tolerance on the Newton step `|f/f'|`
    pub tolerance: f64,
    /// Search `[0, 1]` only and report single-phase feeds as errors
    pub restrict_to_physical: bool,
}

impl Default for RachfordRiceConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            restrict_to_physical: false,
        }
    }
}

/// Phase state implied by a vapor fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseState {
    /// `v <= 0`
    Liquid,
    /// `0 < v < 1`
    TwoPhase,
    /// `v >= 1`
    Vapor,
}

impl PhaseState {
    pub fn from_vapor_fraction(v: f64) -> Self {
        if v <= 0.0 {
            PhaseState::Liquid
        } else if v >= 1.0 {
            PhaseState::Vapor
        } else {
            PhaseState::TwoPhase
        }
    }
}

/// Where the solver is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashStage {
    Iterating,
    Converged,
    Diverged,
    MaxIterExceeded,
}

impl FlashStage {
    pub fn is_terminal(self) -> bool {
        !matches!(self, FlashStage::Iterating)
    }
}

/// Snapshot of one Newton iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationEvent {
    /// 1-based iteration count
    pub iteration: usize,
    /// Vapor fraction the residual was evaluated at
    pub vapor_fraction: f64,
    pub residual: f64,
    pub derivative: f64,
    /// Accepted update, `v_next - v`
    pub step: f64,
    /// The Newton step left the bracket and was replaced by bisection
    pub bisected: bool,
}

/// Converged split of a feed into liquid and vapor.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSplit {
    vapor_fraction: f64,
    liquid: DVector<f64>,
    vapor: DVector<f64>,
    iterations: usize,
    residual: f64,
}

impl PhaseSplit {
    pub fn vapor_fraction(&self) -> f64 {
        self.vapor_fraction
    }

    /// `1 - v`
    pub fn liquid_fraction(&self) -> f64 {
        1.0 - self.vapor_fraction
    }

    /// Liquid mole fractions `x`.
    pub fn liquid(&self) -> &DVector<f64> {
        &self.liquid
    }

    /// Vapor mole fractions `y = K x`.
    pub fn vapor(&self) -> &DVector<f64> {
        &self.vapor
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `f(v)` at the returned vapor fraction.
    pub fn residual(&self) -> f64 {
        self.residual
    }

    pub fn phase_state(&self) -> PhaseState {
        PhaseState::from_vapor_fraction(self.vapor_fraction)
    }
}

/// Step-wise Rachford-Rice solver.
///
/// Construction performs the initial bracketing; each [`step`](Self::step)
/// performs one Newton iteration until the stage becomes terminal.
#[derive(Debug, Clone)]
pub struct RachfordRiceSolver<'a> {
    feed: &'a Feed,
    config: RachfordRiceConfig,
    lower: f64,
    upper: f64,
    vapor_fraction: f64,
    iteration: usize,
    stage: FlashStage,
}

impl<'a> RachfordRiceSolver<'a> {
    pub fn new(feed: &'a Feed, config: RachfordRiceConfig) -> FlashResult<Self> {
        let (mut lower, mut upper) = match feed.active_k_range() {
            // Every K is one: f vanishes identically and so does f'
            None => (f64::NEG_INFINITY, f64::INFINITY),
            Some((k_min, k_max)) => {
                if k_max < 1.0 {
                    return Err(single_phase(feed, PhaseState::Liquid));
                }
                if k_min > 1.0 {
                    return Err(single_phase(feed, PhaseState::Vapor));
                }
                (1.0 / (1.0 - k_max), 1.0 / (1.0 - k_min))
            }
        };

        if config.restrict_to_physical && feed.active_k_range().is_some() {
            if feed.residual(0.0) < 0.0 {
                return Err(single_phase(feed, PhaseState::Liquid));
            }
            if feed.residual(1.0) > 0.0 {
                return Err(single_phase(feed, PhaseState::Vapor));
            }
            lower = lower.max(0.0);
            upper = upper.min(1.0);
        }

        let vapor_fraction = if lower.is_finite() && upper.is_finite() {
            0.5 * (lower + upper)
        } else {
            0.5
        };

        tracing::trace!(lower, upper, vapor_fraction, "rachford-rice bracket");

        Ok(Self {
            feed,
            config,
            lower,
            upper,
            vapor_fraction,
            iteration: 0,
            stage: FlashStage::Iterating,
        })
    }

    pub fn stage(&self) -> FlashStage {
        self.stage
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn vapor_fraction(&self) -> f64 {
        self.vapor_fraction
    }

    /// Current search window `(lower, upper)`.
    pub fn bracket(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Perform one Newton iteration.
    ///
    /// Calling `step` after the stage became terminal repeats the terminal
    /// outcome without iterating further.
    pub fn step(&mut self) -> FlashResult<IterationEvent> {
        match self.stage {
            FlashStage::Iterating => {}
            FlashStage::Converged => {
                return Ok(IterationEvent {
                    iteration: self.iteration,
                    vapor_fraction: self.vapor_fraction,
                    residual: self.feed.residual(self.vapor_fraction),
                    derivative: self.feed.derivative(self.vapor_fraction),
                    step: 0.0,
                    bisected: false,
                });
            }
            FlashStage::Diverged => {
                return Err(FlashError::Diverged {
                    iteration: self.iteration,
                    vapor_fraction: self.vapor_fraction,
                });
            }
            FlashStage::MaxIterExceeded => return Err(self.non_convergence()),
        }

        if self.iteration >= self.config.max_iterations {
            self.stage = FlashStage::MaxIterExceeded;
            let err = self.non_convergence();
            tracing::warn!(%err, "rachford-rice iteration cap reached");
            return Err(err);
        }
        self.iteration += 1;

        let v = self.vapor_fraction;
        let f = self.feed.residual(v);
        let df = self.feed.derivative(v);

        if df == 0.0 || !df.is_finite() || !f.is_finite() {
            self.stage = FlashStage::Diverged;
            tracing::warn!(
                iteration = self.iteration,
                vapor_fraction = v,
                derivative = df,
                "rachford-rice derivative vanished"
            );
            return Err(FlashError::Diverged {
                iteration: self.iteration,
                vapor_fraction: v,
            });
        }

        // f is decreasing: a positive residual puts the root above v
        if f > 0.0 {
            self.lower = v;
        } else if f < 0.0 {
            self.upper = v;
        }

        let newton = v - f / df;
        let converging = (newton - v).abs() < self.config.tolerance;
        let inside = newton > self.lower && newton < self.upper;
        let bounded = self.lower.is_finite() && self.upper.is_finite();
        let (next, bisected) = if converging || inside || !bounded {
            (newton, false)
        } else {
            (0.5 * (self.lower + self.upper), true)
        };

        let event = IterationEvent {
            iteration: self.iteration,
            vapor_fraction: v,
            residual: f,
            derivative: df,
            step: next - v,
            bisected,
        };
        tracing::trace!(
            iteration = event.iteration,
            vapor_fraction = v,
            residual = f,
            step = event.step,
            bisected,
            "rachford-rice iteration"
        );

        self.vapor_fraction = next;
        if event.step.abs() < self.config.tolerance {
            self.stage = FlashStage::Converged;
            tracing::debug!(
                iterations = self.iteration,
                vapor_fraction = next,
                "rachford-rice converged"
            );
        }

        Ok(event)
    }

    /// The phase split, once converged.
    pub fn split(&self) -> Option<PhaseSplit> {
        if self.stage != FlashStage::Converged {
            return None;
        }
        let v = self.vapor_fraction;
        let liquid = self.feed.liquid(v);
        let vapor = liquid.component_mul(self.feed.k());
        Some(PhaseSplit {
            vapor_fraction: v,
            liquid,
            vapor,
            iterations: self.iteration,
            residual: self.feed.residual(v),
        })
    }

    /// Iterate to a terminal stage, reporting every iteration.
    pub fn run<F>(mut self, mut on_iteration: F) -> FlashResult<PhaseSplit>
    where
        F: FnMut(&IterationEvent),
    {
        loop {
            let event = self.step()?;
            on_iteration(&event);
            if let Some(split) = self.split() {
                return Ok(split);
            }
        }
    }

    fn non_convergence(&self) -> FlashError {
        FlashError::NonConvergence {
            iterations: self.iteration,
            vapor_fraction: self.vapor_fraction,
            residual: self.feed.residual(self.vapor_fraction),
        }
    }
}

fn single_phase(feed: &Feed, phase: PhaseState) -> FlashError {
    let err = FlashError::SinglePhase {
        phase,
        f_at_zero: feed.residual(0.0),
        f_at_one: feed.residual(1.0),
    };
    tracing::debug!(%err, "no phase split");
    err
}

/// Solve for the vapor fraction and phase compositions of `feed`.
pub fn solve(feed: &Feed, config: &RachfordRiceConfig) -> FlashResult<PhaseSplit> {
    solve_with_progress(feed, config, |_| {})
}

/// [`solve`], invoking `on_iteration` after every Newton iteration.
pub fn solve_with_progress<F>(
    feed: &Feed,
    config: &RachfordRiceConfig,
    on_iteration: F,
) -> FlashResult<PhaseSplit>
where
    F: FnMut(&IterationEvent),
{
    RachfordRiceSolver::new(feed, *config)?.run(on_iteration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(z: &[f64], k: &[f64]) -> Feed {
        Feed::new(z.to_vec(), k.to_vec()).unwrap()
    }

    #[test]
    fn default_config() {
        let config = RachfordRiceConfig::default();
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.tolerance, 1e-10);
        assert!(!config.restrict_to_physical);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: RachfordRiceConfig =
            serde_yaml::from_str("restrict_to_physical: true").unwrap();
        assert!(config.restrict_to_physical);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn initial_bracket_spans_asymptotes() {
        let f = feed(&[0.5, 0.3, 0.2], &[2.0, 1.0, 0.5]);
        let solver = RachfordRiceSolver::new(&f, RachfordRiceConfig::default()).unwrap();
        assert_eq!(solver.bracket(), (-1.0, 2.0));
        assert_eq!(solver.vapor_fraction(), 0.5);
        assert_eq!(solver.stage(), FlashStage::Iterating);
    }

    #[test]
    fn physical_bracket_is_unit_interval() {
        let f = feed(&[0.5, 0.5], &[2.0, 0.5]);
        let config = RachfordRiceConfig {
            restrict_to_physical: true,
            ..Default::default()
        };
        let solver = RachfordRiceSolver::new(&f, config).unwrap();
        assert_eq!(solver.bracket(), (0.0, 1.0));
    }

    #[test]
    fn steps_until_converged() {
        let f = feed(&[0.5, 0.5], &[2.0, 0.5]);
        let mut solver = RachfordRiceSolver::new(&f, RachfordRiceConfig::default()).unwrap();
        assert!(solver.split().is_none());
        while !solver.stage().is_terminal() {
            solver.step().unwrap();
        }
        assert_eq!(solver.stage(), FlashStage::Converged);
        // Symmetric feed: f(v) = 0.5/(1+v) - 0.25/(1-0.5v), root at v = 0.5
        let split = solver.split().unwrap();
        assert!((split.vapor_fraction() - 0.5).abs() < 1e-9);
        assert_eq!(split.phase_state(), PhaseState::TwoPhase);
    }

    #[test]
    fn bisects_when_newton_leaves_bracket() {
        // The wide window leaves the midpoint on the flat branch, so early
        // Newton steps overshoot the bracket
        let f = feed(&[0.45, 0.53, 0.02], &[249.09, 5.43, 0.08]);
        let mut events = Vec::new();
        let split =
            solve_with_progress(&f, &RachfordRiceConfig::default(), |e| events.push(*e)).unwrap();
        assert!(events.iter().any(|e| e.bisected));
        assert!(split.residual().abs() < 1e-8);
        let (lo, hi) = (1.0 / (1.0 - 249.09), 1.0 / (1.0 - 0.08));
        assert!(split.vapor_fraction() > lo && split.vapor_fraction() < hi);
    }

    #[test]
    fn terminal_stage_is_sticky() {
        let f = feed(&[0.5, 0.5], &[1.0, 1.0]);
        let mut solver = RachfordRiceSolver::new(&f, RachfordRiceConfig::default()).unwrap();
        assert!(matches!(solver.step(), Err(FlashError::Diverged { .. })));
        assert_eq!(solver.stage(), FlashStage::Diverged);
        assert!(matches!(solver.step(), Err(FlashError::Diverged { iteration: 1, .. })));
    }

    #[test]
    fn phase_state_thresholds() {
        assert_eq!(PhaseState::from_vapor_fraction(-0.2), PhaseState::Liquid);
        assert_eq!(PhaseState::from_vapor_fraction(0.0), PhaseState::Liquid);
        assert_eq!(PhaseState::from_vapor_fraction(0.3), PhaseState::TwoPhase);
        assert_eq!(PhaseState::from_vapor_fraction(1.0), PhaseState::Vapor);
        assert_eq!(PhaseState::from_vapor_fraction(1.14), PhaseState::Vapor);
    }
}
