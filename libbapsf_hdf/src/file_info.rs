use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::attrs::{has_attr, read_string_attr, read_string_attr_or_default};
use super::constants::*;
use super::error::FileInfoError;

/// Experiment description attributes stored on the data group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpInfo {
    pub investigator: String,
    pub exp_name: String,
    pub exp_description: String,
    pub exp_set_name: String,
    pub exp_set_description: String,
}

/// Data run attributes stored on the data group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunInfo {
    pub run_name: String,
    pub run_description: String,
    pub run_status: String,
    pub run_date: String,
}

/// Everything the overview reports about the file itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub filename: String,
    pub absolute_path: PathBuf,
    pub size_bytes: u64,
    pub lapd_version: Option<String>,
    pub exp: ExpInfo,
    pub run: RunInfo,
}

/// An opened HDF5 file, presumably written by the LaPD DAQ.
///
/// Opening a file which was not generated by the LaPD is not an error, but it is logged, and
/// any mapping of such a file will most likely come up empty.
#[derive(Debug)]
pub struct LapdFile {
    handle: hdf5::File,
    path: PathBuf,
}

impl LapdFile {
    /// Open an HDF5 file read-only
    pub fn open(path: &Path) -> Result<Self, FileInfoError> {
        if !path.exists() {
            return Err(FileInfoError::BadFilePath(path.to_path_buf()));
        }
        let handle = hdf5::File::open(path)?;
        let file = Self {
            handle,
            path: path.to_path_buf(),
        };
        if !file.is_lapd() {
            log::warn!(
                "HDF5 file ({}) was not generated by the LaPD.",
                path.to_string_lossy()
            );
        }
        Ok(file)
    }

    pub fn handle(&self) -> &hdf5::File {
        &self.handle
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if the root group carries the LaPD software version attribute
    pub fn is_lapd(&self) -> bool {
        has_attr(&self.handle, LAPD_VERSION_ATTR)
    }

    /// The LaPD HDF5 software version string, if any
    pub fn lapd_version(&self) -> Option<String> {
        read_string_attr(&self.handle, LAPD_VERSION_ATTR)
            .ok()
            .map(|v| v.trim().to_string())
    }

    pub fn has_group(&self, path: &str) -> bool {
        self.handle.link_exists(path) && self.handle.group(path).is_ok()
    }

    pub fn exp_info(&self) -> ExpInfo {
        match self.handle.group(DATA_GROUP) {
            Ok(group) => ExpInfo {
                investigator: read_string_attr_or_default(&group, INVESTIGATOR_ATTR),
                exp_name: read_string_attr_or_default(&group, EXP_NAME_ATTR),
                exp_description: read_string_attr_or_default(&group, EXP_DESCRIPTION_ATTR),
                exp_set_name: read_string_attr_or_default(&group, EXP_SET_NAME_ATTR),
                exp_set_description: read_string_attr_or_default(
                    &group,
                    EXP_SET_DESCRIPTION_ATTR,
                ),
            },
            Err(_) => ExpInfo::default(),
        }
    }

    pub fn run_info(&self) -> RunInfo {
        match self.handle.group(DATA_GROUP) {
            Ok(group) => RunInfo {
                run_name: read_string_attr_or_default(&group, RUN_NAME_ATTR),
                run_description: read_string_attr_or_default(&group, RUN_DESCRIPTION_ATTR),
                run_status: read_string_attr_or_default(&group, RUN_STATUS_ATTR),
                run_date: read_string_attr_or_default(&group, RUN_DATE_ATTR),
            },
            Err(_) => RunInfo::default(),
        }
    }

    /// Collect the general file information
    pub fn info(&self) -> Result<FileInfo, FileInfoError> {
        let absolute_path = std::fs::canonicalize(&self.path)?;
        let size_bytes = self.path.metadata()?.len();
        let filename = self
            .path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(FileInfo {
            filename,
            absolute_path,
            size_bytes,
            lapd_version: self.lapd_version(),
            exp: self.exp_info(),
            run: self.run_info(),
        })
    }
}
