use std::f64::consts::PI;

use super::units::{
    check_non_negative, check_positive, Charge, Frequency, MagneticField, Mass, NumberDensity,
};
use crate::constants::SPEED_OF_LIGHT_CGS;
use crate::error::PlasmaError;

fn with_unit(omega: f64, to_hz: bool) -> Frequency {
    let freq = Frequency::rad_per_s(omega);
    match to_hz {
        true => freq.to_hz(),
        false => freq,
    }
}

/// Particle cyclotron frequency qB/(mc).
///
/// The sign follows the charge, so electrons gyrate at a negative frequency.
pub fn cyclotron_frequency(
    q: Charge,
    b: MagneticField,
    m: Mass,
    to_hz: bool,
) -> Result<Frequency, PlasmaError> {
    let b = check_non_negative("B", b.gauss())?;
    let m = check_positive("m", m.grams())?;
    let q = q.statcoulombs();
    if !q.is_finite() {
        return Err(PlasmaError::NotFinite {
            name: "q",
            value: q,
        });
    }
    Ok(with_unit(q * b / (m * SPEED_OF_LIGHT_CGS), to_hz))
}

/// Plasma frequency sqrt(4 pi n q^2 / m) of a single species
pub fn plasma_frequency_generic(
    n: NumberDensity,
    q: Charge,
    m: Mass,
    to_hz: bool,
) -> Result<Frequency, PlasmaError> {
    let n = check_non_negative("n", n.per_cm3())?;
    let m = check_positive("m", m.grams())?;
    let q = q.statcoulombs();
    if !q.is_finite() {
        return Err(PlasmaError::NotFinite {
            name: "q",
            value: q,
        });
    }
    Ok(with_unit((4.0 * PI * n * q * q / m).sqrt(), to_hz))
}

/// Electron cyclotron frequency
pub fn oce(b: MagneticField, to_hz: bool) -> Result<Frequency, PlasmaError> {
    cyclotron_frequency(Charge::elementary(-1.0), b, Mass::electron(), to_hz)
}

/// Ion cyclotron frequency for charge state `z`
pub fn oci(z: f64, b: MagneticField, m_i: Mass, to_hz: bool) -> Result<Frequency, PlasmaError> {
    cyclotron_frequency(Charge::elementary(z), b, m_i, to_hz)
}

/// Electron plasma frequency
pub fn ope(n_e: NumberDensity, to_hz: bool) -> Result<Frequency, PlasmaError> {
    plasma_frequency_generic(n_e, Charge::elementary(-1.0), Mass::electron(), to_hz)
}

/// Ion plasma frequency for charge state `z`
pub fn opi(z: f64, n_i: NumberDensity, m_i: Mass, to_hz: bool) -> Result<Frequency, PlasmaError> {
    plasma_frequency_generic(n_i, Charge::elementary(z), m_i, to_hz)
}

/// Upper hybrid frequency sqrt(ope^2 + oce^2)
pub fn ouh(n_e: NumberDensity, b: MagneticField, to_hz: bool) -> Result<Frequency, PlasmaError> {
    let ope = ope(n_e, false)?.angular();
    let oce = oce(b, false)?.angular();
    Ok(with_unit((ope * ope + oce * oce).sqrt(), to_hz))
}

/// Lower hybrid frequency, 1/olh^2 = 1/(oci^2 + opi^2) + 1/(|oce| oci)
pub fn olh(
    n_i: NumberDensity,
    z: f64,
    m_i: Mass,
    b: MagneticField,
    to_hz: bool,
) -> Result<Frequency, PlasmaError> {
    // Neither ion frequency exists without an ion charge
    if z == 0.0 {
        return Err(PlasmaError::Zero("Z"));
    }
    let oci = oci(z, b, m_i, false)?.angular();
    let opi = opi(z, n_i, m_i, false)?.angular();
    let oce = oce(b, false)?.angular();

    let ion_term = oci * oci + opi * opi;
    let hybrid_term = oce.abs() * oci.abs();
    if ion_term == 0.0 || hybrid_term == 0.0 {
        return Err(PlasmaError::Zero("B"));
    }
    Ok(with_unit(
        1.0 / (1.0 / ion_term + 1.0 / hybrid_term).sqrt(),
        to_hz,
    ))
}
