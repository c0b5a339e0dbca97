use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt::Display;

use crate::constants::*;
use crate::error::PlasmaError;

/// Electric charge, stored in statcoulombs
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Charge(f64);

impl Charge {
    pub fn from_statcoulombs(value: f64) -> Self {
        Self(value)
    }

    pub fn from_coulombs(value: f64) -> Self {
        Self(value * STATC_PER_COULOMB)
    }

    /// A charge of `z` elementary charges (negative for electrons)
    pub fn elementary(z: f64) -> Self {
        Self(z * ELEMENTARY_CHARGE_CGS)
    }

    pub fn statcoulombs(&self) -> f64 {
        self.0
    }

    pub fn coulombs(&self) -> f64 {
        self.0 / STATC_PER_COULOMB
    }
}

/// Magnetic field strength, stored in gauss
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct MagneticField(f64);

impl MagneticField {
    pub fn from_gauss(value: f64) -> Self {
        Self(value)
    }

    pub fn from_tesla(value: f64) -> Self {
        Self(value * GAUSS_PER_TESLA)
    }

    pub fn gauss(&self) -> f64 {
        self.0
    }

    pub fn tesla(&self) -> f64 {
        self.0 / GAUSS_PER_TESLA
    }
}

/// Particle mass, stored in grams
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Mass(f64);

impl Mass {
    pub fn from_grams(value: f64) -> Self {
        Self(value)
    }

    pub fn from_kilograms(value: f64) -> Self {
        Self(value * 1.0e3)
    }

    /// A mass given in atomic mass units
    pub fn from_amu(value: f64) -> Self {
        Self(value * AMU_CGS)
    }

    pub fn electron() -> Self {
        Self(ELECTRON_MASS_CGS)
    }

    pub fn proton() -> Self {
        Self(PROTON_MASS_CGS)
    }

    pub fn grams(&self) -> f64 {
        self.0
    }

    pub fn kilograms(&self) -> f64 {
        self.0 * 1.0e-3
    }
}

/// Particle number density, stored in cm^-3
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct NumberDensity(f64);

impl NumberDensity {
    pub fn from_per_cm3(value: f64) -> Self {
        Self(value)
    }

    pub fn from_per_m3(value: f64) -> Self {
        Self(value * 1.0e-6)
    }

    pub fn per_cm3(&self) -> f64 {
        self.0
    }

    pub fn per_m3(&self) -> f64 {
        self.0 * 1.0e6
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyUnit {
    RadPerSecond,
    Hertz,
}

/// An angular (rad/s) or ordinary (Hz) frequency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    pub value: f64,
    pub unit: FrequencyUnit,
}

impl Frequency {
    pub fn rad_per_s(value: f64) -> Self {
        Self {
            value,
            unit: FrequencyUnit::RadPerSecond,
        }
    }

    pub fn hz(value: f64) -> Self {
        Self {
            value,
            unit: FrequencyUnit::Hertz,
        }
    }

    pub fn to_hz(self) -> Self {
        match self.unit {
            FrequencyUnit::Hertz => self,
            FrequencyUnit::RadPerSecond => Self::hz(self.value / (2.0 * PI)),
        }
    }

    pub fn to_rad_per_s(self) -> Self {
        match self.unit {
            FrequencyUnit::RadPerSecond => self,
            FrequencyUnit::Hertz => Self::rad_per_s(self.value * 2.0 * PI),
        }
    }

    /// Angular frequency, converted to rad/s if needed
    pub(crate) fn angular(&self) -> f64 {
        self.to_rad_per_s().value
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            FrequencyUnit::RadPerSecond => write!(f, "{:e} rad/s", self.value),
            FrequencyUnit::Hertz => write!(f, "{:e} Hz", self.value),
        }
    }
}

/// Quantities entering a formula must be finite and not negative
pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<f64, PlasmaError> {
    if !value.is_finite() {
        Err(PlasmaError::NotFinite { name, value })
    } else if value < 0.0 {
        Err(PlasmaError::Negative { name, value })
    } else {
        Ok(value)
    }
}

/// Quantities a formula divides by must also be non-zero
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<f64, PlasmaError> {
    match check_non_negative(name, value)? {
        v if v == 0.0 => Err(PlasmaError::Zero(name)),
        v => Ok(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_conversions() {
        assert_relative_eq!(
            Charge::from_coulombs(ELEMENTARY_CHARGE_SI).statcoulombs(),
            ELEMENTARY_CHARGE_CGS,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            Charge::elementary(-1.0).coulombs(),
            -ELEMENTARY_CHARGE_SI,
            max_relative = 1e-9
        );
        assert_relative_eq!(MagneticField::from_tesla(0.1).gauss(), 1000.0);
        assert_relative_eq!(MagneticField::from_gauss(2500.0).tesla(), 0.25);
        assert_relative_eq!(Mass::from_kilograms(1.0e-3).grams(), 1.0);
        assert_relative_eq!(Mass::from_amu(4.0).grams(), 4.0 * AMU_CGS);
        assert_relative_eq!(NumberDensity::from_per_m3(1.0e18).per_cm3(), 1.0e12);
        assert_relative_eq!(NumberDensity::from_per_cm3(1.0e12).per_m3(), 1.0e18);
    }

    #[test]
    fn test_frequency_units() {
        let f = Frequency::rad_per_s(2.0 * PI * 50.0);
        assert_eq!(f.to_hz().unit, FrequencyUnit::Hertz);
        assert_relative_eq!(f.to_hz().value, 50.0);
        assert_relative_eq!(Frequency::hz(50.0).to_rad_per_s().value, f.value);
        assert_eq!(Frequency::hz(50.0).to_hz(), Frequency::hz(50.0));
        assert_eq!(Frequency::hz(1.5e9).to_string(), "1.5e9 Hz");
    }

    #[test]
    fn test_checks() {
        assert_eq!(check_non_negative("B", 0.0), Ok(0.0));
        assert_eq!(
            check_non_negative("B", -1.0),
            Err(PlasmaError::Negative {
                name: "B",
                value: -1.0
            })
        );
        assert!(matches!(
            check_non_negative("n", f64::NAN),
            Err(PlasmaError::NotFinite { name: "n", .. })
        ));
        assert_eq!(check_positive("m", 0.0), Err(PlasmaError::Zero("m")));
    }
}
