use super::{CapillaryPressure, finite_result, non_negative_pressure};
use crate::error::{RockError, RockResult};
use crate::params::positive;
use crate::saturation::SaturationNormalizer;
use pf_core::units::{Angle, Area, radians, square_meters};

/// Rock/fluid pair entering the Leverett scaling group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RockDescriptor {
    permeability: Area,
    porosity: f64,
    interfacial_tension: f64, // N/m
    contact_angle: Angle,
}

impl RockDescriptor {
    pub fn new(
        permeability: Area,
        porosity: f64,
        interfacial_tension: f64,
        contact_angle: Angle,
    ) -> RockResult<Self> {
        positive("permeability", square_meters(permeability))?;
        if !(porosity > 0.0 && porosity <= 1.0) {
            return Err(RockError::invalid("porosity", porosity, "must lie in (0, 1]"));
        }
        positive("interfacial_tension", interfacial_tension)?;
        let cos_theta = radians(contact_angle).cos();
        if cos_theta <= f64::EPSILON {
            return Err(RockError::invalid(
                "contact_angle",
                radians(contact_angle).to_degrees(),
                "must be below 90 degrees for a wetting phase",
            ));
        }

        Ok(Self {
            permeability,
            porosity,
            interfacial_tension,
            contact_angle,
        })
    }

    pub fn permeability(&self) -> Area {
        self.permeability
    }

    pub fn porosity(&self) -> f64 {
        self.porosity
    }

    pub fn interfacial_tension(&self) -> f64 {
        self.interfacial_tension
    }

    pub fn contact_angle(&self) -> Angle {
        self.contact_angle
    }

    /// `sqrt(k/phi)` in metres.
    pub fn length_scale(&self) -> f64 {
        (square_meters(self.permeability) / self.porosity).sqrt()
    }

    /// `sigma * cos(theta)` in N/m.
    pub fn wetting_tension(&self) -> f64 {
        self.interfacial_tension * radians(self.contact_angle).cos()
    }
}

/// Dimensionless `J = pc * sqrt(k/phi) / (sigma cos(theta))`.
pub fn j_value(pc: f64, rock: &RockDescriptor) -> f64 {
    pc * rock.length_scale() / rock.wetting_tension()
}

/// Inverse of [`j_value`].
pub fn pc_from_j(j: f64, rock: &RockDescriptor) -> f64 {
    j * rock.wetting_tension() / rock.length_scale()
}

/// Capillary pressure on a target rock obtained through the Leverett J-function.
///
/// The wrapped curve is either already dimensionless (J against saturation) or a
/// pressure curve measured on a source rock, in which case it is converted to J
/// with the source rock's scaling group first.
#[derive(Debug)]
pub struct LeverettJ {
    curve: Box<dyn CapillaryPressure>,
    to_j: f64,
    target: RockDescriptor,
}

impl LeverettJ {
    /// `j_curve` returns J directly.
    pub fn new(j_curve: Box<dyn CapillaryPressure>, target: RockDescriptor) -> Self {
        Self {
            curve: j_curve,
            to_j: 1.0,
            target,
        }
    }

    /// Move a curve measured on `source` onto `target`.
    pub fn rescale(
        measured: Box<dyn CapillaryPressure>,
        source: &RockDescriptor,
        target: RockDescriptor,
    ) -> Self {
        Self {
            curve: measured,
            to_j: source.length_scale() / source.wetting_tension(),
            target,
        }
    }

    pub fn target(&self) -> &RockDescriptor {
        &self.target
    }

    /// J at wetting-phase saturation `sw`.
    pub fn j(&self, sw: f64) -> RockResult<f64> {
        Ok(self.curve.pressure(sw)? * self.to_j)
    }
}

impl CapillaryPressure for LeverettJ {
    fn name(&self) -> &str {
        "j_function"
    }

    fn normalizer(&self) -> &SaturationNormalizer {
        self.curve.normalizer()
    }

    fn pressure(&self, sw: f64) -> RockResult<f64> {
        let pc = pc_from_j(self.j(sw)?, &self.target);
        finite_result(pc, "Leverett capillary pressure")
    }

    fn saturation(&self, pc: f64) -> RockResult<f64> {
        let pc = non_negative_pressure(pc, "Leverett capillary pressure")?;
        let curve_value = j_value(pc, &self.target) / self.to_j;
        self.curve.saturation(curve_value)
    }
}
