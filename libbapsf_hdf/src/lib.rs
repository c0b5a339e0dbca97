//! # bapsf_hdf
//!
//! bapsf_hdf is a toolkit for the HDF5 files written by the data acquisition of the Large
//! Plasma Device (LaPD) at the Basic Plasma Science Facility (BaPSF), written in Rust. It
//! discovers which digitizers, machine state information (MSI) diagnostics, and control
//! devices were recorded in a file, maps out how their datasets are laid out, and renders
//! that map as a human readable overview report. It also evaluates the characteristic
//! plasma frequencies from physical quantities.
//!
//! ## Installation
//!
//! Currently the only method of install is from source, which is laid out below.
//!
//! ### Rust
//!
//! If you have not used Rust before, you will most likely need to install the Rust tool
//! chain. See the [Rust docs](https://www.rust-lang.org/tools/install) for installation
//! instructions.
//!
//! ### HDF5
//!
//! Before building bapsf_hdf, HDF5 must be installed. Typically this will be installed
//! using a package manager (homebrew, apt, etc), and the Rust libraries will auto detect
//! the location of the HDF install. If HDF5 is installed to a custom location, write the
//! following snippet into the file `.cargo/config.toml` in the bapsf_hdf repository:
//!
//! ```toml
//! [env]
//! HDF5_DIR="/path/to/my/hdf5/install/"
//!
//! [build]
//! rustflags="-C link-args=-Wl,-rpath,/path/to/my/hdf5/install/lib"
//! ```
//!
//! ### Building & Install
//!
//! To build and install the CLI use `cargo install --path ./bapsf_hdf_cli` from the top
//! level bapsf_hdf repository. See the `bapsf_hdf_cli` README for usage.
//!
//! ## Configuration
//!
//! The CLI reads a YAML configuration listing the files to report on:
//!
//! ```yml
//! hdf_files:
//! - /path/to/run_01.hdf5
//! report_directory: null
//! detailed: true
//! ```
//!
//! If `report_directory` is `null` the reports are printed to the terminal, otherwise each
//! report is saved as `<report_directory>/<hdf5 file stem>.txt`. `detailed` controls
//! whether the digitizer, control device, and MSI reports are included.
//!
//! ## LaPD HDF5 Layout
//!
//! The mapping understands the layouts written by versions 1.1 and 1.2 of the LaPD HDF5
//! software:
//!
//! ```text
//! run.hdf5 - LaPD HDF5 software version
//! MSI
//! |---- Discharge, Gas pressure, Heater, Interferometer array, Magnetic field
//! Raw data + config - Investigator, Experiment name, Data run, Status date, ...
//! |---- Data run sequence
//! |---- SIS 3301 (1.1) or SIS crate (1.2)
//! |    |---- <configuration groups>
//! |    |---- <configuration name> [<board/channel>](dset)
//! |---- 6K Compumotor, NI_XZ, NI_XYZ, Waveform
//! ```
//!
//! Groups which could not be mapped are reported as unknowns rather than failing the
//! whole map.
pub mod attrs;
pub mod config;
pub mod constants;
pub mod control;
pub mod digitizer;
pub mod error;
pub mod file_info;
pub mod hdf_map;
pub mod msi;
pub mod overview;
pub mod plasma;

#[cfg(test)]
mod test_fixtures;
