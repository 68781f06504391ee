// pf-core/src/units.rs

use uom::si::f64::{Angle as UomAngle, Area as UomArea};

// Rock descriptor quantities (SI, f64)
pub type Angle = UomAngle;
pub type Area = UomArea;

/// One millidarcy expressed in square metres.
pub const MILLIDARCY_M2: f64 = 9.869_233e-16;

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

/// Permeability given in millidarcy.
#[inline]
pub fn md(v: f64) -> Area {
    m2(v * MILLIDARCY_M2)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

/// Plain SI magnitudes for arithmetic that leaves the type system.
#[inline]
pub fn square_meters(a: Area) -> f64 {
    use uom::si::area::square_meter;
    a.get::<square_meter>()
}

#[inline]
pub fn radians(a: Angle) -> f64 {
    use uom::si::angle::radian;
    a.get::<radian>()
}
