// Group and attribute names used by the LaPD HDF5 software.

/// Root attribute holding the LaPD HDF5 software version
pub const LAPD_VERSION_ATTR: &str = "LaPD HDF5 software version";

/// Group holding the machine state information (MSI) diagnostics
pub const MSI_GROUP: &str = "MSI";
/// Group holding the digitizer data, control devices, and run configuration
pub const DATA_GROUP: &str = "Raw data + config";
pub const DATA_RUN_SEQUENCE_GROUP: &str = "Data run sequence";

pub const KNOWN_MSI_DIAGNOSTICS: [&str; 5] = [
    "Discharge",
    "Gas pressure",
    "Heater",
    "Interferometer array",
    "Magnetic field",
];

// Experiment info attributes on the data group
pub const INVESTIGATOR_ATTR: &str = "Investigator";
pub const EXP_NAME_ATTR: &str = "Experiment name";
pub const EXP_DESCRIPTION_ATTR: &str = "Experiment description";
pub const EXP_SET_NAME_ATTR: &str = "Experiment set name";
pub const EXP_SET_DESCRIPTION_ATTR: &str = "Experiment set description";

// Run info attributes on the data group
pub const RUN_NAME_ATTR: &str = "Data run";
pub const RUN_DESCRIPTION_ATTR: &str = "Description";
pub const RUN_STATUS_ATTR: &str = "Status";
pub const RUN_DATE_ATTR: &str = "Status date";

// SIS 3301 (LaPD 1.1)
pub const SIS3301_GROUP: &str = "SIS 3301";
pub const SIS3301_BIT: u8 = 14;
pub const SIS3301_CLOCK_MHZ: f64 = 100.0;
pub const SIS3301_CONFIG_PREFIX: &str = "Configuration:";
pub const SIS3301_SHOT_AVERAGE_ATTR: &str = "Shots to average";
pub const SIS3301_SAMPLE_AVERAGE_ATTR: &str = "Samples to average";

// SIS crate (LaPD 1.2)
pub const SIS_CRATE_GROUP: &str = "SIS crate";
pub const SIS3302_BIT: u8 = 16;
pub const SIS3302_CLOCK_MHZ: f64 = 100.0;
pub const SIS3305_BIT: u8 = 10;
/// Channels on a SIS 3302 board
pub const SIS3302_CHANNELS: u8 = 8;
/// Channels on each of the two FPGAs of a SIS 3305 board
pub const SIS3305_FPGA_CHANNELS: u8 = 4;
/// SIS 3305 clock rates [GHz] indexed by the 'Channel mode' attribute
pub const SIS3305_CLOCK_MODES_GHZ: [f64; 3] = [1.25, 2.5, 5.0];
pub const SIS_CRATE_BOARD_TYPES_ATTR: &str = "SIS crate board types";
pub const SIS_CRATE_SLOTS_ATTR: &str = "SIS crate slot numbers";
pub const SIS_CRATE_CONFIG_INDICES_ATTR: &str = "SIS crate config indices";
pub const SIS_CRATE_CONTROLLER_SLOT: i64 = 3;
pub const SIS3302_BOARD_TYPE: i64 = 2;
pub const SIS3305_BOARD_TYPE: i64 = 3;
pub const SIS3305_CHANNEL_MODE_ATTR: &str = "Channel mode";
pub const SIS3302_SHOT_AVERAGE_ATTR: &str = "Shot averaging (software)";
pub const SIS3302_SAMPLE_AVERAGE_ATTR: &str = "Sample averaging (hardware)";

// Control devices
pub const SIX_K_COMPUMOTOR_GROUP: &str = "6K Compumotor";
pub const NI_XZ_GROUP: &str = "NI_XZ";
pub const NI_XYZ_GROUP: &str = "NI_XYZ";
pub const WAVEFORM_GROUP: &str = "Waveform";

// Physical constants in Gaussian cgs units

/// Speed of light [cm/s]
pub const SPEED_OF_LIGHT_CGS: f64 = 2.997_924_58e10;
/// Elementary charge [statC]
pub const ELEMENTARY_CHARGE_CGS: f64 = 4.803_204_712_570_263e-10;
/// Elementary charge [C]
pub const ELEMENTARY_CHARGE_SI: f64 = 1.602_176_634e-19;
/// Electron mass [g]
pub const ELECTRON_MASS_CGS: f64 = 9.109_383_701_5e-28;
/// Proton mass [g]
pub const PROTON_MASS_CGS: f64 = 1.672_621_923_69e-24;
/// Atomic mass unit [g]
pub const AMU_CGS: f64 = 1.660_539_066_60e-24;
/// Number of statcoulombs in one coulomb (10 c / (cm/s))
pub const STATC_PER_COULOMB: f64 = 2.997_924_58e9;
/// Number of gauss in one tesla
pub const GAUSS_PER_TESLA: f64 = 1.0e4;
