//! Three-phase relative permeability scenarios shared by every model.

use pf_rock::{CoreyCurves, CoreyParams, ModelParams, RockError, ThreePhaseRelPerm, resolve};
use proptest::prelude::*;

const MODELS: [&str; 4] = ["stones_I", "stones_II", "aziz_settari", "hustad_holt"];

/// Corey curves shared by every scenario; `sgc` varies.
fn params(sgc: f64) -> ModelParams {
    ModelParams::new()
        .with("swc", 0.15)
        .with("sorw", 0.2)
        .with("sorg", 0.08)
        .with("sgc", sgc)
        .with("krocw", 0.9)
        .with("krw_max", 0.4)
        .with("krg_max", 0.8)
        .with("nw", 3.0)
        .with("now", 2.0)
        .with("ng", 2.0)
        .with("nog", 3.0)
}

const CRITICAL_GAS: [f64; 2] = [0.0, 0.05];

fn model_with(name: &str, sgc: f64) -> Box<dyn ThreePhaseRelPerm> {
    match resolve(name, &params(sgc)).unwrap() {
        pf_rock::Model::RelPerm(m) => m,
        other => panic!("{name} resolved to {other:?}"),
    }
}

fn model(name: &str) -> Box<dyn ThreePhaseRelPerm> {
    model_with(name, 0.0)
}

#[test]
fn saturation_sum_violation() {
    for name in MODELS {
        let err = model(name).evaluate(0.3, 0.3, 0.3).unwrap_err();
        assert!(
            matches!(err, RockError::SaturationSum { sum, .. } if (sum - 0.9).abs() < 1e-12),
            "{name}: {err:?}"
        );
    }
}

#[test]
fn watered_out_oil_is_immobile() {
    // Sw = 1 - Sorw, So = Sorw, Sg = 0
    for name in MODELS {
        let kr = model(name).evaluate(0.8, 0.2, 0.0).unwrap();
        assert_eq!(kr.kro, 0.0, "{name}");
        assert!((kr.krw - 0.4).abs() < 1e-12, "{name}");
        assert_eq!(kr.krg, 0.0, "{name}");
    }
}

#[test]
fn two_phase_limit_without_gas() {
    for sgc in CRITICAL_GAS {
        let curves = CoreyCurves::new(CoreyParams {
            swc: 0.15,
            sorw: 0.2,
            sorg: 0.08,
            sgc,
            krocw: 0.9,
            krw_max: 0.4,
            krg_max: 0.8,
            nw: 3.0,
            now: 2.0,
            ng: 2.0,
            nog: 3.0,
        })
        .unwrap();
        for name in MODELS {
            let m = model_with(name, sgc);
            // 0.16 sits below Swc + Sgc when Sgc > 0
            for sw in [0.16, 0.2, 0.4, 0.6] {
                let kr = m.evaluate(sw, 1.0 - sw, 0.0).unwrap();
                let expected = curves.krow(sw).unwrap();
                assert!(
                    (kr.kro - expected).abs() < 1e-10,
                    "{name} sgc={sgc} sw={sw}: {} vs {expected}",
                    kr.kro
                );
            }
        }
    }
}

#[test]
fn connate_water_oil_endpoint() {
    for sgc in CRITICAL_GAS {
        for name in MODELS {
            let kr = model_with(name, sgc).evaluate(0.15, 0.85, 0.0).unwrap();
            assert!((kr.kro - 0.9).abs() < 1e-12, "{name} sgc={sgc}: {}", kr.kro);
        }
    }
}

#[test]
fn models_can_be_shared_across_threads() {
    let m: std::sync::Arc<dyn ThreePhaseRelPerm> = model("stones_I").into();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let m = m.clone();
            std::thread::spawn(move || {
                let sg = 0.05 * i as f64;
                m.evaluate(0.3, 0.7 - sg, sg).unwrap()
            })
        })
        .collect();
    for h in handles {
        let kr = h.join().unwrap();
        assert!((0.0..=1.0).contains(&kr.kro));
    }
}

proptest! {
    #[test]
    fn outputs_bounded(sw in 0.0_f64..1.0, frac in 0.0_f64..1.0) {
        let so = (1.0 - sw) * frac;
        let sg = (1.0 - sw - so).max(0.0);
        for name in MODELS {
            let kr = model(name).evaluate(sw, so, sg).unwrap();
            for v in [kr.kro, kr.krw, kr.krg] {
                prop_assert!((0.0..=1.0).contains(&v), "{} gave {:?}", name, kr);
            }
        }
    }
}

/// Oil relative permeability at `fixed` water (or gas) saturation, with oil
/// taking `frac` of the remaining pore space.
fn kro_along(m: &dyn ThreePhaseRelPerm, fixed_water: bool, fixed: f64, frac: f64) -> f64 {
    let so = (1.0 - fixed) * frac;
    let other = (1.0 - fixed - so).max(0.0);
    let (sw, sg) = if fixed_water { (fixed, other) } else { (other, fixed) };
    m.evaluate(sw, so, sg).unwrap().kro
}

proptest! {
    #[test]
    fn kro_non_decreasing_in_oil_saturation(
        fixed in 0.0_f64..1.0,
        a in 0.0_f64..=1.0,
        b in 0.0_f64..=1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        for sgc in CRITICAL_GAS {
            for name in MODELS {
                let m = model_with(name, sgc);
                for fixed_water in [true, false] {
                    let before = kro_along(m.as_ref(), fixed_water, fixed, lo);
                    let after = kro_along(m.as_ref(), fixed_water, fixed, hi);
                    prop_assert!(
                        after >= before - 1e-12,
                        "{} sgc={} fixed_water={} fixed={}: kro fell from {} to {}",
                        name, sgc, fixed_water, fixed, before, after
                    );
                }
            }
        }
    }
}
