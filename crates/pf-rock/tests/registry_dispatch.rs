//! Model registry integration tests.
//!
//! Resolution goes through the public name vocabulary and flat parameter maps,
//! the same surface a simulator configuration layer would use.

use pf_rock::{ModelFamily, ModelParams, RockError, resolve};

fn corey_params() -> ModelParams {
    ModelParams::new()
        .with("swc", 0.2)
        .with("sorw", 0.25)
        .with("sorg", 0.1)
        .with("sgc", 0.05)
        .with("krocw", 0.8)
        .with("krw_max", 0.3)
        .with("krg_max", 0.9)
        .with("nw", 2.0)
        .with("now", 2.5)
        .with("ng", 2.0)
        .with("nog", 2.0)
}

#[test]
fn unknown_model_rejected() {
    let err = resolve("unknown_model", &ModelParams::new()).unwrap_err();
    match err {
        RockError::UnknownModel { name, valid } => {
            assert_eq!(name, "unknown_model");
            assert!(valid.contains(&"brooks_corey"));
            assert!(valid.contains(&"hustad_holt"));
        }
        other => panic!("expected UnknownModel, got {other:?}"),
    }
}

#[test]
fn brooks_corey_with_empty_mobile_range() {
    let params = ModelParams::new()
        .with("irreducible", 0.6)
        .with("residual", 0.5);
    let err = resolve("brooks_corey", &params).unwrap_err();
    assert_eq!(
        err,
        RockError::InvalidBounds {
            irreducible: 0.6,
            residual: 0.5
        }
    );
}

#[test]
fn missing_required_parameter() {
    let params = ModelParams::new()
        .with("irreducible", 0.2)
        .with("residual", 0.1)
        .with("entry_pressure", 1_000.0);
    let err = resolve("brooks_corey", &params).unwrap_err();
    assert!(err.is_invalid_parameter());
    assert!(err.to_string().contains("lambda"));
}

#[test]
fn negative_exponent_rejected() {
    let params = ModelParams::new()
        .with("irreducible", 0.2)
        .with("residual", 0.1)
        .with("entry_pressure", 1_000.0)
        .with("lambda", -2.0);
    let err = resolve("brooks_corey", &params).unwrap_err();
    assert!(matches!(err, RockError::InvalidParameter { ref name, .. } if name == "lambda"));
}

#[test]
fn unexpected_parameter_rejected() {
    let params = corey_params().with("n", 2.0);
    let err = resolve("stones_II", &params).unwrap_err();
    assert!(err.is_invalid_parameter());
    assert!(err.to_string().contains("sum_tolerance"));
}

#[test]
fn every_relperm_name_resolves() {
    for name in ["stones_I", "stones_II", "aziz_settari", "hustad_holt"] {
        let model = resolve(name, &corey_params()).unwrap();
        assert_eq!(model.family(), ModelFamily::RelativePermeability);
        assert_eq!(model.name(), name);
        let kr = model.as_relperm().unwrap().evaluate(0.3, 0.5, 0.2).unwrap();
        assert!((0.0..=1.0).contains(&kr.kro), "{name}: kro={}", kr.kro);
    }
}

#[test]
fn every_capillary_name_resolves() {
    let cases = [
        (
            "brooks_corey",
            ModelParams::new()
                .with("irreducible", 0.2)
                .with("residual", 0.1)
                .with("entry_pressure", 5_000.0)
                .with("lambda", 2.0),
        ),
        (
            "van_genuchten",
            ModelParams::new()
                .with("irreducible", 0.2)
                .with("residual", 0.1)
                .with("gamma", 1e-4)
                .with("n", 2.5)
                .with("m", 0.6),
        ),
        (
            "j_function",
            ModelParams::new()
                .with("irreducible", 0.2)
                .with("residual", 0.1)
                .with("j_entry", 0.25)
                .with("lambda", 2.0)
                .with("permeability_md", 150.0)
                .with("porosity", 0.22)
                .with("interfacial_tension", 0.025)
                .with("contact_angle_deg", 30.0),
        ),
    ];
    for (name, params) in cases {
        let model = resolve(name, &params).unwrap();
        assert_eq!(model.family(), ModelFamily::CapillaryPressure);
        assert!(model.as_relperm().is_none());
        let pc = model.as_capillary().unwrap();
        assert!(pc.pressure(0.5).unwrap() > 0.0, "{name}");
    }
}

#[test]
fn names_match_case_insensitively() {
    let model = resolve("Stones_i", &corey_params()).unwrap();
    assert_eq!(model.name(), "stones_I");
}

#[test]
fn hustad_holt_exponent_configurable() {
    let default = resolve("hustad_holt", &corey_params()).unwrap();
    let steep = resolve("hustad_holt", &corey_params().with("n", 4.0)).unwrap();
    let a = default.as_relperm().unwrap().evaluate(0.3, 0.5, 0.2).unwrap().kro;
    let b = steep.as_relperm().unwrap().evaluate(0.3, 0.5, 0.2).unwrap().kro;
    assert!(b < a);
}

#[test]
fn j_function_rejects_zero_porosity() {
    let params = ModelParams::new()
        .with("irreducible", 0.2)
        .with("residual", 0.1)
        .with("j_entry", 0.25)
        .with("lambda", 2.0)
        .with("permeability_md", 150.0)
        .with("porosity", 0.0)
        .with("interfacial_tension", 0.025);
    let err = resolve("j_function", &params).unwrap_err();
    assert!(matches!(err, RockError::InvalidParameter { ref name, .. } if name == "porosity"));
}

#[test]
fn params_load_from_yaml() {
    let yaml = "
irreducible: 0.15
residual: 0.05
gamma: 2.0e-4
n: 3.0
";
    let params: ModelParams = serde_yaml::from_str(yaml).unwrap();
    let model = resolve("van_genuchten", &params).unwrap();
    let pc = model.as_capillary().unwrap();
    let sw = 0.6;
    let back = pc.saturation(pc.pressure(sw).unwrap()).unwrap();
    assert!((back - sw).abs() < 1e-9);
}
