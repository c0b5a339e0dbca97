use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("Attribute {0} failed due to HDF5 error: {1}")]
    HDF5Error(String, #[source] hdf5::Error),
    #[error("Attribute {0} does not exist")]
    Missing(String),
    #[error("Attribute {0} does not hold a string")]
    NotAString(String),
}

#[derive(Debug, Error)]
pub enum FileInfoError {
    #[error("Could not open HDF5 file because file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("FileInfo failed due to HDF5 error: {0}")]
    HDF5Error(#[from] hdf5::Error),
    #[error("FileInfo failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("FileInfo failed due to attribute error: {0}")]
    AttributeError(#[from] AttributeError),
}

#[derive(Debug, Error)]
pub enum DigitizerMapError {
    #[error("DigitizerMap failed due to HDF5 error: {0}")]
    HDF5Error(#[from] hdf5::Error),
    #[error("DigitizerMap failed due to attribute error: {0}")]
    AttributeError(#[from] AttributeError),
    #[error("SIS crate slot {0} does not correspond to a known board")]
    UnknownSlot(i64),
    #[error("Board {0} of adc {1} does not correspond to a known SIS crate slot")]
    UnknownBoard(u8, String),
    #[error("{0} is not a known SIS adc")]
    UnknownAdc(String),
    #[error("SIS 3305 channel mode {0} is not a known clock mode")]
    UnknownClockMode(i64),
    #[error("Could not parse a config index from adc group {0}")]
    BadConfigGroupName(String),
    #[error("Channel group {0} does not carry Board and Channel attributes")]
    BadChannelGroup(String),
    #[error("Attribute {0} does not name a valid channel")]
    BadChannel(String),
}

#[derive(Debug, Error)]
pub enum DatasetNameError {
    #[error("Expected exactly one active configuration but found {0}")]
    NoUniqueActiveConfig(usize),
    #[error("Configuration {0} is not a known configuration")]
    UnknownConfig(String),
    #[error("Configuration {0} is not active")]
    InactiveConfig(String),
    #[error("Configuration {0} has no active adc")]
    NoActiveAdc(String),
    #[error("Adc {0} is not active in configuration {1}")]
    InactiveAdc(String, String),
    #[error("Board {0} channel {1} is not connected in configuration {2}")]
    InvalidBoardChannel(u8, u8, String),
    #[error("Dataset name could not be built due to DigitizerMap error: {0}")]
    MapError(#[from] DigitizerMapError),
}

#[derive(Debug, Error)]
pub enum MsiMapError {
    #[error("MsiMap failed due to HDF5 error: {0}")]
    HDF5Error(#[from] hdf5::Error),
    #[error("MsiMap failed due to attribute error: {0}")]
    AttributeError(#[from] AttributeError),
    #[error("dataset ({0}) not found")]
    MissingDataset(String),
    #[error("'{0}' does not match expected shape")]
    BadShape(String),
    #[error("'{0}' does not have the field '{1}'")]
    MissingField(String, String),
    #[error("'{0}' is not a compound dataset")]
    NotCompound(String),
    #[error("no diagnostic mapper is known for '{0}'")]
    UnknownDiagnostic(String),
}

#[derive(Debug, Error)]
pub enum ControlMapError {
    #[error("ControlMap failed due to HDF5 error: {0}")]
    HDF5Error(#[from] hdf5::Error),
    #[error("ControlMap failed due to attribute error: {0}")]
    AttributeError(#[from] AttributeError),
    #[error("Control device group {0} has no configurations")]
    NoConfigurations(String),
    #[error("no control mapper is known for '{0}'")]
    UnknownControl(String),
}

#[derive(Debug, Error)]
pub enum HdfMapError {
    #[error("Mapping of HDF5 file is not known for LaPD version {0}")]
    UnknownVersion(String),
    #[error("HDF5 file was not generated by the LaPD")]
    NotLapd,
    #[error("HdfMap failed due to HDF5 error: {0}")]
    HDF5Error(#[from] hdf5::Error),
}

#[derive(Debug, Error)]
pub enum OverviewError {
    #[error("Overview failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Overview failed to convert configs to yaml: {0}")]
    ParsingError(#[from] serde_yaml::Error),
    #[error("Overview failed due to FileInfo error: {0}")]
    FileInfoError(#[from] FileInfoError),
    #[error("Overview failed due to HdfMap error: {0}")]
    MapError(#[from] HdfMapError),
    #[error("Overview failed to format the report date: {0}")]
    DateError(#[from] time::error::Format),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlasmaError {
    #[error("Quantity {name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("Quantity {name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("Quantity {0} must be non-zero")]
    Zero(&'static str),
}
