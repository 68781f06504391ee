//! Closed model registry.
//!
//! Model names resolve against a fixed table compiled into the crate; there is
//! no name-based loading of anything outside it. Lookup is case-insensitive.

use crate::capillary::{BrooksCorey, CapillaryPressure, LeverettJ, RockDescriptor, VanGenuchten};
use crate::error::{RockError, RockResult};
use crate::params::ModelParams;
use crate::relperm::{
    AzizSettari, CoreyCurves, CoreyParams, DEFAULT_HUSTAD_HOLT_EXPONENT, HustadHolt, StoneI,
    StoneII, ThreePhaseRelPerm,
};
use crate::saturation::{DEFAULT_SUM_TOLERANCE, RangePolicy, SaturationNormalizer};
use pf_core::units::{deg, md};

/// Every registered model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    BrooksCorey,
    VanGenuchten,
    JFunction,
    StonesI,
    StonesII,
    AzizSettari,
    HustadHolt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    CapillaryPressure,
    RelativePermeability,
}

type Builder = fn(&ModelParams, RangePolicy) -> RockResult<Model>;

/// One row of the registry table.
#[derive(Clone, Copy)]
pub struct RegistryEntry {
    pub kind: ModelKind,
    pub name: &'static str,
    pub family: ModelFamily,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    build: Builder,
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("family", &self.family)
            .finish()
    }
}

impl RegistryEntry {
    pub fn accepts(&self, key: &str) -> bool {
        self.required.iter().chain(self.optional).any(|k| *k == key)
    }

    fn accepted(&self) -> Vec<&'static str> {
        self.required.iter().chain(self.optional).copied().collect()
    }
}

const CURVE_REQUIRED: &[&str] = &["swc", "sorw", "sorg", "sgc", "nw", "now", "ng", "nog"];

static REGISTRY: [RegistryEntry; 7] = [
    RegistryEntry {
        kind: ModelKind::BrooksCorey,
        name: "brooks_corey",
        family: ModelFamily::CapillaryPressure,
        required: &["irreducible", "residual", "entry_pressure", "lambda"],
        optional: &[],
        build: build_brooks_corey,
    },
    RegistryEntry {
        kind: ModelKind::VanGenuchten,
        name: "van_genuchten",
        family: ModelFamily::CapillaryPressure,
        required: &["irreducible", "residual", "gamma", "n"],
        optional: &["m"],
        build: build_van_genuchten,
    },
    RegistryEntry {
        kind: ModelKind::JFunction,
        name: "j_function",
        family: ModelFamily::CapillaryPressure,
        required: &[
            "irreducible",
            "residual",
            "j_entry",
            "lambda",
            "permeability_md",
            "porosity",
            "interfacial_tension",
        ],
        optional: &["contact_angle_deg"],
        build: build_j_function,
    },
    RegistryEntry {
        kind: ModelKind::StonesI,
        name: "stones_I",
        family: ModelFamily::RelativePermeability,
        required: CURVE_REQUIRED,
        optional: &["krocw", "krw_max", "krg_max", "sum_tolerance", "som"],
        build: build_stones_i,
    },
    RegistryEntry {
        kind: ModelKind::StonesII,
        name: "stones_II",
        family: ModelFamily::RelativePermeability,
        required: CURVE_REQUIRED,
        optional: &["krocw", "krw_max", "krg_max", "sum_tolerance"],
        build: build_stones_ii,
    },
    RegistryEntry {
        kind: ModelKind::AzizSettari,
        name: "aziz_settari",
        family: ModelFamily::RelativePermeability,
        required: CURVE_REQUIRED,
        optional: &["krocw", "krw_max", "krg_max", "sum_tolerance"],
        build: build_aziz_settari,
    },
    RegistryEntry {
        kind: ModelKind::HustadHolt,
        name: "hustad_holt",
        family: ModelFamily::RelativePermeability,
        required: CURVE_REQUIRED,
        optional: &["krocw", "krw_max", "krg_max", "sum_tolerance", "som", "n"],
        build: build_hustad_holt,
    },
];

/// A constructed model.
#[derive(Debug)]
pub enum Model {
    Capillary(Box<dyn CapillaryPressure>),
    RelPerm(Box<dyn ThreePhaseRelPerm>),
}

impl Model {
    pub fn name(&self) -> &str {
        match self {
            Model::Capillary(m) => m.name(),
            Model::RelPerm(m) => m.name(),
        }
    }

    pub fn family(&self) -> ModelFamily {
        match self {
            Model::Capillary(_) => ModelFamily::CapillaryPressure,
            Model::RelPerm(_) => ModelFamily::RelativePermeability,
        }
    }

    pub fn as_capillary(&self) -> Option<&dyn CapillaryPressure> {
        match self {
            Model::Capillary(m) => Some(m.as_ref()),
            Model::RelPerm(_) => None,
        }
    }

    pub fn as_relperm(&self) -> Option<&dyn ThreePhaseRelPerm> {
        match self {
            Model::RelPerm(m) => Some(m.as_ref()),
            Model::Capillary(_) => None,
        }
    }
}

/// Registered names in table order.
pub fn model_names() -> Vec<&'static str> {
    REGISTRY.iter().map(|e| e.name).collect()
}

/// Registry rows, e.g. for listing accepted parameters.
pub fn entries() -> &'static [RegistryEntry] {
    &REGISTRY
}

/// Case-insensitive lookup.
pub fn lookup(name: &str) -> RockResult<&'static RegistryEntry> {
    let wanted = name.trim();
    REGISTRY
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| RockError::UnknownModel {
            name: name.to_string(),
            valid: model_names(),
        })
}

/// Resolve a model by name with the default [`RangePolicy`].
pub fn resolve(name: &str, params: &ModelParams) -> RockResult<Model> {
    resolve_with_policy(name, params, RangePolicy::default())
}

/// Resolve a model by name; `policy` governs saturations outside the mobile
/// range of a capillary curve or of any two-phase Corey curve.
pub fn resolve_with_policy(
    name: &str,
    params: &ModelParams,
    policy: RangePolicy,
) -> RockResult<Model> {
    let entry = match lookup(name) {
        Ok(entry) => entry,
        Err(err) => {
            tracing::warn!(model = name, "unknown model requested");
            return Err(err);
        }
    };

    if let Some(key) = params.names().find(|key| !entry.accepts(key)) {
        return Err(RockError::UnexpectedParameter {
            model: entry.name,
            name: key.to_string(),
            accepted: entry.accepted(),
        });
    }

    let model = (entry.build)(params, policy)?;
    tracing::debug!(
        model = entry.name,
        family = ?entry.family,
        parameters = params.names().count(),
        "resolved model"
    );
    Ok(model)
}

/// Endpoint bounds come first so an empty mobile range is reported before any
/// missing shape parameter.
fn capillary_normalizer(
    model: &'static str,
    params: &ModelParams,
    policy: RangePolicy,
) -> RockResult<SaturationNormalizer> {
    let irreducible = params.require(model, "irreducible")?;
    let residual = params.require(model, "residual")?;
    SaturationNormalizer::with_policy(irreducible, residual, policy)
}

fn build_brooks_corey(params: &ModelParams, policy: RangePolicy) -> RockResult<Model> {
    const NAME: &str = "brooks_corey";
    let normalizer = capillary_normalizer(NAME, params, policy)?;
    let model = BrooksCorey::new(
        normalizer,
        params.require(NAME, "entry_pressure")?,
        params.require(NAME, "lambda")?,
    )?;
    Ok(Model::Capillary(Box::new(model)))
}

fn build_van_genuchten(params: &ModelParams, policy: RangePolicy) -> RockResult<Model> {
    const NAME: &str = "van_genuchten";
    let normalizer = capillary_normalizer(NAME, params, policy)?;
    let gamma = params.require(NAME, "gamma")?;
    let n = params.require(NAME, "n")?;
    let model = match params.maybe("m")? {
        Some(m) => VanGenuchten::new(normalizer, gamma, n, m)?,
        None => VanGenuchten::mualem(normalizer, gamma, n)?,
    };
    Ok(Model::Capillary(Box::new(model)))
}

fn build_j_function(params: &ModelParams, policy: RangePolicy) -> RockResult<Model> {
    const NAME: &str = "j_function";
    let normalizer = capillary_normalizer(NAME, params, policy)?;
    let j_curve = BrooksCorey::new(
        normalizer,
        params.require(NAME, "j_entry")?,
        params.require(NAME, "lambda")?,
    )?;
    let rock = RockDescriptor::new(
        md(params.require(NAME, "permeability_md")?),
        params.require(NAME, "porosity")?,
        params.require(NAME, "interfacial_tension")?,
        deg(params.optional("contact_angle_deg", 0.0)?),
    )?;
    Ok(Model::Capillary(Box::new(LeverettJ::new(
        Box::new(j_curve),
        rock,
    ))))
}

fn corey_curves(
    model: &'static str,
    params: &ModelParams,
    policy: RangePolicy,
) -> RockResult<CoreyCurves> {
    let curve_params = CoreyParams {
        swc: params.require(model, "swc")?,
        sorw: params.require(model, "sorw")?,
        sorg: params.require(model, "sorg")?,
        sgc: params.require(model, "sgc")?,
        krocw: params.optional("krocw", 1.0)?,
        krw_max: params.optional("krw_max", 1.0)?,
        krg_max: params.optional("krg_max", 1.0)?,
        nw: params.require(model, "nw")?,
        now: params.require(model, "now")?,
        ng: params.require(model, "ng")?,
        nog: params.require(model, "nog")?,
    };
    CoreyCurves::with_policy(curve_params, policy)
}

fn sum_tolerance(params: &ModelParams) -> RockResult<f64> {
    params.optional("sum_tolerance", DEFAULT_SUM_TOLERANCE)
}

fn build_stones_i(params: &ModelParams, policy: RangePolicy) -> RockResult<Model> {
    let curves = corey_curves("stones_I", params, policy)?;
    let model = StoneI::new(curves, params.maybe("som")?)?.with_sum_tolerance(sum_tolerance(params)?)?;
    Ok(Model::RelPerm(Box::new(model)))
}

fn build_stones_ii(params: &ModelParams, policy: RangePolicy) -> RockResult<Model> {
    let curves = corey_curves("stones_II", params, policy)?;
    let model = StoneII::new(curves).with_sum_tolerance(sum_tolerance(params)?)?;
    Ok(Model::RelPerm(Box::new(model)))
}

fn build_aziz_settari(params: &ModelParams, policy: RangePolicy) -> RockResult<Model> {
    let curves = corey_curves("aziz_settari", params, policy)?;
    let model = AzizSettari::new(curves).with_sum_tolerance(sum_tolerance(params)?)?;
    Ok(Model::RelPerm(Box::new(model)))
}

fn build_hustad_holt(params: &ModelParams, policy: RangePolicy) -> RockResult<Model> {
    let curves = corey_curves("hustad_holt", params, policy)?;
    let n = params.optional("n", DEFAULT_HUSTAD_HOLT_EXPONENT)?;
    let model = HustadHolt::new(curves, n, params.maybe("som")?)?
        .with_sum_tolerance(sum_tolerance(params)?)?;
    Ok(Model::RelPerm(Box::new(model)))
}
