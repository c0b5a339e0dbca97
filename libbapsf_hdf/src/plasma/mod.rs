//! Characteristic plasma frequencies.
//!
//! All formulas are evaluated in Gaussian cgs units, following the NRL Plasma Formulary. The
//! quantity types in [`units`] can be built from SI or cgs values, so callers never convert
//! units by hand.
pub mod parameters;
pub mod units;

pub use parameters::{
    cyclotron_frequency, olh, oce, oci, ope, opi, ouh, plasma_frequency_generic,
};
pub use units::{Charge, Frequency, FrequencyUnit, MagneticField, Mass, NumberDensity};
