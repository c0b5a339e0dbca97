use hdf5::Group;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use super::attrs::{basename, split_members};
use super::constants::*;
use super::control::{ContType, ControlMap};
use super::digitizer::{Adc, DigitizerMap};
use super::error::HdfMapError;
use super::file_info::LapdFile;
use super::msi::MsiMap;

/// The versions of the LaPD HDF5 software whose layout we know how to map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LapdVersion {
    #[serde(rename = "1.1")]
    V1_1,
    #[serde(rename = "1.2")]
    V1_2,
}

impl LapdVersion {
    pub fn msi_diagnostics(&self) -> &'static [&'static str] {
        &KNOWN_MSI_DIAGNOSTICS
    }

    /// Name of the group holding the SIS digitizer
    pub fn sis_group(&self) -> &'static str {
        match self {
            Self::V1_1 => SIS3301_GROUP,
            Self::V1_2 => SIS_CRATE_GROUP,
        }
    }

    pub fn sis_adcs(&self) -> &'static [Adc] {
        match self {
            Self::V1_1 => &[Adc::Sis3301],
            Self::V1_2 => &[Adc::Sis3302, Adc::Sis3305],
        }
    }

    /// Path of the SIS digitizer group relative to the file root
    pub fn sis_path(&self) -> String {
        format!("{DATA_GROUP}/{}", self.sis_group())
    }
}

impl Display for LapdVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1_1 => write!(f, "1.1"),
            Self::V1_2 => write!(f, "1.2"),
        }
    }
}

impl FromStr for LapdVersion {
    type Err = HdfMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.1" => Ok(Self::V1_1),
            "1.2" => Ok(Self::V1_2),
            other => Err(HdfMapError::UnknownVersion(other.to_string())),
        }
    }
}

/// Everything we found, and failed to find, in a LaPD file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HdfMap {
    pub version: LapdVersion,
    pub msi: BTreeMap<String, MsiMap>,
    pub digitizers: BTreeMap<String, DigitizerMap>,
    pub controls: BTreeMap<String, ControlMap>,
    pub has_data_run_sequence: bool,
    /// Paths of groups in the MSI and data groups which could not be mapped
    pub unknowns: Vec<String>,
    has_msi_group: bool,
    has_data_group: bool,
}

impl HdfMap {
    /// Map the layout of a LaPD file.
    ///
    /// Only a file of unknown version (or one without a version) is an error. Devices which fail
    /// to map are logged and listed in the unknowns.
    pub fn new(file: &LapdFile) -> Result<Self, HdfMapError> {
        let version: LapdVersion = match file.lapd_version() {
            Some(version) => version.parse().inspect_err(|_| {
                log::warn!(
                    "Mapping of HDF5 file ({}) is not known for LaPD version {version}",
                    file.path().to_string_lossy()
                )
            })?,
            None => return Err(HdfMapError::NotLapd),
        };

        let handle = file.handle();
        let has_msi_group = file.has_group(MSI_GROUP);
        let has_data_group = file.has_group(DATA_GROUP);

        let mut map = Self {
            version,
            msi: BTreeMap::new(),
            digitizers: BTreeMap::new(),
            controls: BTreeMap::new(),
            has_data_run_sequence: false,
            unknowns: Vec::new(),
            has_msi_group,
            has_data_group,
        };

        if has_msi_group {
            map.map_msi(&handle.group(MSI_GROUP)?)?;
        }
        if has_data_group {
            map.map_data_group(&handle.group(DATA_GROUP)?)?;
        }

        Ok(map)
    }

    fn map_msi(&mut self, msi_group: &Group) -> Result<(), HdfMapError> {
        for group in msi_group.groups()? {
            let name = basename(&group.name()).to_string();
            if !self.version.msi_diagnostics().contains(&name.as_str()) {
                self.unknowns.push(group.name());
                continue;
            }
            match MsiMap::new(&group) {
                Ok(msi) => {
                    self.msi.insert(name, msi);
                }
                Err(e) => {
                    log::warn!("Mapping for MSI Diagnostic '{name}' was unsuccessful ({e})");
                    self.unknowns.push(group.name());
                }
            }
        }
        Ok(())
    }

    fn map_data_group(&mut self, data_group: &Group) -> Result<(), HdfMapError> {
        let (subgroup_names, _) = split_members(data_group)?;
        let sis_group = self.version.sis_group();

        for name in subgroup_names {
            let group = data_group.group(&name)?;
            if name == DATA_RUN_SEQUENCE_GROUP {
                self.has_data_run_sequence = true;
            } else if name == sis_group {
                match DigitizerMap::new(&group, self.version) {
                    Ok(digitizer) => {
                        self.digitizers.insert(name, digitizer);
                    }
                    Err(e) => {
                        log::warn!("Mapping for Digitizer '{name}' was unsuccessful ({e})");
                        self.unknowns.push(group.name());
                    }
                }
            } else if ContType::from_device_name(&name).is_some() {
                match ControlMap::new(&group) {
                    Ok(control) => {
                        self.controls.insert(name, control);
                    }
                    Err(e) => {
                        log::warn!("Mapping for Control Device '{name}' was unsuccessful ({e})");
                        self.unknowns.push(group.name());
                    }
                }
            } else {
                self.unknowns.push(group.name());
            }
        }
        Ok(())
    }

    /// The digitizer recording the main data of the run (the SIS digitizer)
    pub fn main_digitizer(&self) -> Option<&DigitizerMap> {
        self.digitizers.get(self.version.sis_group())
    }

    pub fn has_msi_group(&self) -> bool {
        self.has_msi_group
    }

    pub fn has_data_group(&self) -> bool {
        self.has_data_group
    }
}
