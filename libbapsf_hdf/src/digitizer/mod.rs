//! Mapping of the SIS digitizers.
//!
//! Some nomenclature for the data acquisition chain:
//!
//! - DAQ: the whole system (all digitizers, the computer, etc.)
//! - digitizer: a device that collects data, e.g. the main SIS digitizer
//! - adc: the element of a digitizer that does the analog-to-digital conversion, e.g. the SIS 3302
//! - board: a cluster of channels on an adc
//! - channel: the actual hook-up location on the adc
//!
//! A digitizer group holds one sub-group per data configuration, and datasets whose names
//! start with the name of the configuration that recorded them.
pub mod sis3301;
pub mod sis_crate;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

use super::attrs::render_attr;
use super::error::{DatasetNameError, DigitizerMapError};
use super::hdf_map::LapdVersion;

/// The analog-to-digital converters found in LaPD digitizers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Adc {
    #[serde(rename = "SIS 3301")]
    Sis3301,
    #[serde(rename = "SIS 3302")]
    Sis3302,
    #[serde(rename = "SIS 3305")]
    Sis3305,
}

impl Display for Adc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sis3301 => write!(f, "SIS 3301"),
            Self::Sis3302 => write!(f, "SIS 3302"),
            Self::Sis3305 => write!(f, "SIS 3305"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockUnit {
    MHz,
    GHz,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockRate {
    pub value: f64,
    pub unit: ClockUnit,
}

impl ClockRate {
    pub fn mhz(value: f64) -> Self {
        Self {
            value,
            unit: ClockUnit::MHz,
        }
    }

    pub fn ghz(value: f64) -> Self {
        Self {
            value,
            unit: ClockUnit::GHz,
        }
    }

    pub fn as_hz(&self) -> f64 {
        match self.unit {
            ClockUnit::MHz => self.value * 1.0e6,
            ClockUnit::GHz => self.value * 1.0e9,
        }
    }
}

impl Display for ClockRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {:?}", self.value, self.unit)
    }
}

/// Recording settings of one board of an adc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdcSettings {
    pub bit: u8,
    /// None if the file does not say how the board was clocked
    pub clock_rate: Option<ClockRate>,
    /// Number of recorded shots, from the dataset shape
    pub nshotnum: Option<usize>,
    /// Number of samples per shot, from the dataset shape
    pub nt: Option<usize>,
    pub shot_average: Option<u32>,
    pub sample_average: Option<u32>,
}

impl AdcSettings {
    pub fn new(bit: u8, clock_rate: Option<ClockRate>) -> Self {
        Self {
            bit,
            clock_rate,
            nshotnum: None,
            nt: None,
            shot_average: None,
            sample_average: None,
        }
    }
}

/// A board and the channels connected on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub board: u8,
    pub channels: Vec<u8>,
    pub settings: AdcSettings,
}

/// A single data configuration of a digitizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// True if this configuration recorded data in the file
    pub active: bool,
    /// Adcs used by the configuration
    pub adcs: Vec<Adc>,
    /// Name of the configuration group
    pub group_name: String,
    /// Absolute path to the configuration group
    pub group_path: String,
    pub connections: BTreeMap<Adc, Vec<Connection>>,
}

impl DataConfig {
    pub fn find_connection(&self, adc: Adc, board: u8, channel: u8) -> Option<&Connection> {
        self.connections
            .get(&adc)?
            .iter()
            .find(|conn| conn.board == board && conn.channels.contains(&channel))
    }
}

/// The resolved name of a dataset along with the recording settings of its channel
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetName {
    pub name: String,
    pub adc: Adc,
    pub settings: AdcSettings,
}

/// The map of a digitizer group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitizerMap {
    pub device_name: String,
    pub group_path: String,
    pub version: LapdVersion,
    pub configs: BTreeMap<String, DataConfig>,
}

impl DigitizerMap {
    /// Build the map of the SIS digitizer group for the given LaPD version
    pub fn new(group: &hdf5::Group, version: LapdVersion) -> Result<Self, DigitizerMapError> {
        let configs = match version {
            LapdVersion::V1_1 => sis3301::build_configs(group)?,
            LapdVersion::V1_2 => sis_crate::build_configs(group)?,
        };
        Ok(Self {
            device_name: version.sis_group().to_string(),
            group_path: group.name(),
            version,
            configs,
        })
    }

    /// All adcs the digitizer can carry
    pub fn adcs(&self) -> &'static [Adc] {
        self.version.sis_adcs()
    }

    pub fn n_active_configs(&self) -> usize {
        self.configs.values().filter(|c| c.active).count()
    }

    /// Build the name of the dataset holding the data of a board/channel.
    ///
    /// If `config_name` is None the single active configuration is assumed; if `adc` is None
    /// the first adc of the configuration is assumed (the SIS 3302 when both are present).
    pub fn construct_dataset_name(
        &self,
        board: u8,
        channel: u8,
        config_name: Option<&str>,
        adc: Option<Adc>,
    ) -> Result<DatasetName, DatasetNameError> {
        let config_name = match config_name {
            Some(name) => name.to_string(),
            None => {
                let active: Vec<&String> = self
                    .configs
                    .iter()
                    .filter(|(_, c)| c.active)
                    .map(|(name, _)| name)
                    .collect();
                if active.len() != 1 {
                    return Err(DatasetNameError::NoUniqueActiveConfig(active.len()));
                }
                log::warn!("config_name not specified, assuming {}.", active[0]);
                active[0].clone()
            }
        };

        let config = self
            .configs
            .get(&config_name)
            .ok_or_else(|| DatasetNameError::UnknownConfig(config_name.clone()))?;
        if !config.active {
            return Err(DatasetNameError::InactiveConfig(config_name));
        }

        let adc = match adc {
            Some(a) => a,
            None => {
                let first = *config
                    .adcs
                    .first()
                    .ok_or_else(|| DatasetNameError::NoActiveAdc(config_name.clone()))?;
                log::warn!("No adc specified, so assuming {first}.");
                first
            }
        };
        if !config.adcs.contains(&adc) {
            return Err(DatasetNameError::InactiveAdc(adc.to_string(), config_name));
        }

        let connection = config.find_connection(adc, board, channel).ok_or(
            DatasetNameError::InvalidBoardChannel(board, channel, config_name.clone()),
        )?;

        Ok(DatasetName {
            name: format_dataset_name(&config_name, adc, board, channel)?,
            adc,
            settings: connection.settings.clone(),
        })
    }
}

/// Format the dataset name used by the DAQ for a given configuration, adc, board and channel
pub fn format_dataset_name(
    config_name: &str,
    adc: Adc,
    board: u8,
    channel: u8,
) -> Result<String, DigitizerMapError> {
    match adc {
        Adc::Sis3301 => Ok(format!("{config_name} [{board}:{channel}]")),
        Adc::Sis3302 => {
            let slot = sis_crate::board_to_slot(board, adc)?;
            Ok(format!("{config_name} [Slot {slot}: SIS 3302 ch {channel}]"))
        }
        Adc::Sis3305 => {
            let slot = sis_crate::board_to_slot(board, adc)?;
            let (fpga, ch) = if channel <= 4 {
                (1, channel)
            } else {
                (2, channel - 4)
            };
            Ok(format!(
                "{config_name} [Slot {slot}: SIS 3305 FPGA {fpga} ch {ch}]"
            ))
        }
    }
}

/// Dataset names are "<config name> [<board/channel>]", so a config is active if any dataset
/// carries its name followed by the bracket
pub(crate) fn is_config_active(config_name: &str, dataset_names: &[String]) -> bool {
    let prefix = format!("{config_name} [");
    dataset_names.iter().any(|name| name.starts_with(&prefix))
}

/// Averaging attributes are either integers or strings like "Average 4 Samples".
/// A factor of 1 (or "No averaging") means no averaging.
pub(crate) fn read_average(loc: &hdf5::Location, name: &str) -> Option<u32> {
    render_attr(loc, name)
        .ok()?
        .split_whitespace()
        .find_map(|word| word.parse::<u32>().ok())
        .filter(|n| *n > 1)
}

/// Fill nshotnum and nt of every connection from the shape of its first channel's dataset
pub(crate) fn fill_dataset_shapes(
    sis_group: &hdf5::Group,
    config_name: &str,
    dataset_names: &[String],
    config: &mut DataConfig,
) -> Result<(), DigitizerMapError> {
    for (adc, connections) in config.connections.iter_mut() {
        for conn in connections.iter_mut() {
            let Some(channel) = conn.channels.first() else {
                continue;
            };
            let name = format_dataset_name(config_name, *adc, conn.board, *channel)?;
            if !dataset_names.contains(&name) {
                continue;
            }
            let shape = sis_group.dataset(&name)?.shape();
            if shape.len() == 2 {
                conn.settings.nshotnum = Some(shape[0]);
                conn.settings.nt = Some(shape[1]);
            }
        }
    }
    Ok(())
}
