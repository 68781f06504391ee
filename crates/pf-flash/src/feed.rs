//! Feed composition and equilibrium ratios.

use crate::error::{FlashError, FlashResult};
use nalgebra::DVector;
use pf_core::numeric::{Tolerances, nearly_equal};

/// Tolerance on `sum(z) = 1`.
const FEED_SUM_TOL: Tolerances = Tolerances {
    abs: 1e-8,
    rel: 0.0,
};

/// Validated feed mole fractions `z` with per-component K-values.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    z: DVector<f64>,
    k: DVector<f64>,
}

impl Feed {
    /// Requires at least two components, every `z_i` in (0, 1) summing to one,
    /// and every `K_i` finite and positive.
    pub fn new(z: Vec<f64>, k: Vec<f64>) -> FlashResult<Self> {
        if z.len() < 2 {
            return Err(FlashError::InvalidComposition {
                what: format!("need at least 2 components, got {}", z.len()),
            });
        }
        if z.len() != k.len() {
            return Err(FlashError::InvalidComposition {
                what: format!("{} mole fractions but {} K-values", z.len(), k.len()),
            });
        }
        for (i, &zi) in z.iter().enumerate() {
            if !(zi > 0.0 && zi < 1.0) {
                return Err(FlashError::InvalidComposition {
                    what: format!("z[{i}] = {zi} outside (0, 1)"),
                });
            }
        }
        let sum: f64 = z.iter().sum();
        if !nearly_equal(sum, 1.0, FEED_SUM_TOL) {
            return Err(FlashError::InvalidComposition {
                what: format!("mole fractions sum to {sum}"),
            });
        }
        for (i, &ki) in k.iter().enumerate() {
            if !(ki.is_finite() && ki > 0.0) {
                return Err(FlashError::InvalidComposition {
                    what: format!("K[{i}] = {ki} must be finite and positive"),
                });
            }
        }

        Ok(Self {
            z: DVector::from_vec(z),
            k: DVector::from_vec(k),
        })
    }

    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    pub fn z(&self) -> &DVector<f64> {
        &self.z
    }

    pub fn k(&self) -> &DVector<f64> {
        &self.k
    }

    fn terms(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.z.iter().copied().zip(self.k.iter().map(|k| k - 1.0))
    }

    /// `f(v) = sum z_i (K_i - 1) / (1 + v (K_i - 1))`
    pub fn residual(&self, v: f64) -> f64 {
        self.terms().map(|(z, c)| z * c / (1.0 + v * c)).sum()
    }

    /// `f'(v) = -sum z_i (K_i - 1)^2 / (1 + v (K_i - 1))^2`
    pub fn derivative(&self, v: f64) -> f64 {
        -self
            .terms()
            .map(|(z, c)| {
                let d = 1.0 + v * c;
                z * c * c / (d * d)
            })
            .sum::<f64>()
    }

    /// Smallest and largest K among components with `K != 1`; `None` when
    /// every component has `K = 1`.
    pub fn active_k_range(&self) -> Option<(f64, f64)> {
        self.k
            .iter()
            .copied()
            .filter(|k| (k - 1.0).abs() > f64::EPSILON)
            .fold(None, |acc, k| match acc {
                None => Some((k, k)),
                Some((lo, hi)) => Some((lo.min(k), hi.max(k))),
            })
    }

    /// `x_i = z_i / (1 + v (K_i - 1))`
    pub fn liquid(&self, v: f64) -> DVector<f64> {
        DVector::from_iterator(self.len(), self.terms().map(|(z, c)| z / (1.0 + v * c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_feed() {
        let feed = Feed::new(vec![0.5, 0.3, 0.2], vec![2.0, 1.0, 0.5]).unwrap();
        assert_eq!(feed.len(), 3);
        assert_eq!(feed.active_k_range(), Some((0.5, 2.0)));
    }

    #[test]
    fn rejects_bad_compositions() {
        assert!(Feed::new(vec![1.0], vec![2.0]).is_err());
        assert!(Feed::new(vec![0.5, 0.5], vec![2.0]).is_err());
        assert!(Feed::new(vec![0.5, 0.4], vec![2.0, 0.5]).is_err());
        assert!(Feed::new(vec![1.2, -0.2], vec![2.0, 0.5]).is_err());
        assert!(Feed::new(vec![0.5, 0.5], vec![2.0, 0.0]).is_err());
        assert!(Feed::new(vec![0.5, 0.5], vec![f64::NAN, 0.5]).is_err());
    }

    #[test]
    fn residual_and_derivative_known_values() {
        let feed = Feed::new(vec![0.5, 0.3, 0.2], vec![2.0, 1.0, 0.5]).unwrap();
        // f(0) = sum z (K - 1)
        assert!((feed.residual(0.0) - 0.4).abs() < 1e-15);
        // f'(0) = -sum z (K - 1)^2
        assert!((feed.derivative(0.0) + 0.55).abs() < 1e-15);
    }

    #[test]
    fn unit_k_values_are_inactive() {
        let feed = Feed::new(vec![0.5, 0.5], vec![1.0, 1.0]).unwrap();
        assert_eq!(feed.active_k_range(), None);
        assert_eq!(feed.derivative(0.3), 0.0);
    }
}
