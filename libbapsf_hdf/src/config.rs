use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::ConfigError;

/// Structure representing the application configuration: which files to report on and where
/// the reports go. Configs are seralizable and deserializable to YAML using serde and serde_yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub hdf_files: Vec<PathBuf>,
    /// Directory the reports are saved to. If None, reports are printed to the terminal
    pub report_directory: Option<PathBuf>,
    /// Include the digitizer, control, and MSI details in the reports
    pub detailed: bool,
}

impl Default for Config {
    /// Generate a new Config object with no files
    fn default() -> Self {
        Self {
            hdf_files: Vec::new(),
            report_directory: None,
            detailed: true,
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Write the configuration to a YAML file
    pub fn write_config_file(&self, config_path: &Path) -> Result<(), ConfigError> {
        let yaml_str = serde_yaml::to_string(self)?;
        std::fs::write(config_path, yaml_str)?;
        Ok(())
    }

    /// Get the path of the report for an HDF5 file, if reports are saved to a directory
    pub fn report_path(&self, hdf_path: &Path) -> Option<PathBuf> {
        let directory = self.report_directory.as_ref()?;
        let stem = hdf_path.file_stem()?;
        Some(directory.join(format!("{}.txt", stem.to_string_lossy())))
    }

    pub fn is_report_directory_valid(&self) -> bool {
        match &self.report_directory {
            Some(directory) => directory.is_dir(),
            None => true,
        }
    }

    pub fn has_files(&self) -> bool {
        !self.hdf_files.is_empty()
    }
}
