// Synthetic LaPD files written to temporary directories for the tests.
//
// lapd_1dot1.hdf5
// Raw data + config - Investigator, Experiment name, ...
// |---- SIS 3301
// |    |---- Configuration: run config - Samples to average, Shots to average
// |    |    |---- Board 1 / Channel 1, Channel 2
// |    |    |---- Board 2 / Channel 3
// |    |---- Configuration: spare config
// |    |    |---- Board 1 / Channel 1
// |    |---- run config [1:1](dset), run config [1:2](dset)
//
// lapd_1dot2.hdf5
// MSI
// |---- Discharge, Gas pressure, Heater, Interferometer array, Magnetic field, Mystery
// Raw data + config
// |---- 6K Compumotor, Data run sequence, SIS crate, Unmapped device, Waveform
use hdf5::types::VarLenUnicode;
use hdf5::{Dataset, Group, H5Type, Location};
use ndarray::Array2;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const NSHOTS: usize = 4;

#[derive(H5Type, Clone, Copy, Default)]
#[repr(C)]
struct MagneticFieldSummary {
    #[hdf5(rename = "Shot number")]
    shot_number: i32,
    #[hdf5(rename = "Timestamp")]
    timestamp: f64,
    #[hdf5(rename = "Data valid")]
    data_valid: i8,
    #[hdf5(rename = "Peak magnetic field")]
    peak_field: f32,
}

#[derive(H5Type, Clone, Copy, Default)]
#[repr(C)]
struct DischargeSummary {
    #[hdf5(rename = "Shot number")]
    shot_number: i32,
    #[hdf5(rename = "Timestamp")]
    timestamp: f64,
    #[hdf5(rename = "Data valid")]
    data_valid: i8,
    #[hdf5(rename = "Pulse length")]
    pulse_length: f32,
    #[hdf5(rename = "Peak current")]
    peak_current: f32,
    #[hdf5(rename = "Bank voltage")]
    bank_voltage: f32,
}

#[derive(H5Type, Clone, Copy, Default)]
#[repr(C)]
struct GasPressureSummary {
    #[hdf5(rename = "Shot number")]
    shot_number: i32,
    #[hdf5(rename = "Timestamp")]
    timestamp: f64,
    #[hdf5(rename = "Data valid")]
    data_valid: i8,
    #[hdf5(rename = "Fill pressure")]
    fill_pressure: f32,
    #[hdf5(rename = "Peak AMU")]
    peak_amu: f32,
    #[hdf5(rename = "RGA partial pressures")]
    partial_pressures: [f32; 3],
}

#[derive(H5Type, Clone, Copy, Default)]
#[repr(C)]
struct HeaterSummary {
    #[hdf5(rename = "Shot number")]
    shot_number: i32,
    #[hdf5(rename = "Timestamp")]
    timestamp: f64,
    #[hdf5(rename = "Data valid")]
    data_valid: i8,
    #[hdf5(rename = "Heater current")]
    current: f32,
    #[hdf5(rename = "Heater voltage")]
    voltage: f32,
    #[hdf5(rename = "Heater temperature")]
    temperature: f32,
}

#[derive(H5Type, Clone, Copy, Default)]
#[repr(C)]
struct InterferometerSummary {
    #[hdf5(rename = "Shot number")]
    shot_number: i32,
    #[hdf5(rename = "Timestamp")]
    timestamp: f64,
    #[hdf5(rename = "Data valid")]
    data_valid: i8,
    #[hdf5(rename = "Peak density")]
    peak_density: f32,
}

pub fn str_attr(loc: &Location, name: &str, value: &str) {
    loc.new_attr::<VarLenUnicode>()
        .create(name)
        .unwrap()
        .write_scalar(&VarLenUnicode::from_str(value).unwrap())
        .unwrap();
}

pub fn int_attr(loc: &Location, name: &str, value: i32) {
    loc.new_attr::<i32>()
        .create(name)
        .unwrap()
        .write_scalar(&value)
        .unwrap();
}

pub fn float_attr(loc: &Location, name: &str, value: f64) {
    loc.new_attr::<f64>()
        .create(name)
        .unwrap()
        .write_scalar(&value)
        .unwrap();
}

pub fn int_array_attr(loc: &Location, name: &str, values: &[i32]) {
    loc.new_attr_builder().with_data(values).create(name).unwrap();
}

pub fn float_array_attr(loc: &Location, name: &str, values: &[f64]) {
    loc.new_attr_builder().with_data(values).create(name).unwrap();
}

fn write_rows<T: H5Type>(group: &Group, name: &str, rows: &[T]) -> Dataset {
    group.new_dataset_builder().with_data(rows).create(name).unwrap()
}

fn write_signal(group: &Group, name: &str, nshots: usize, nt: usize) -> Dataset {
    group
        .new_dataset_builder()
        .with_data(&Array2::<f32>::zeros((nshots, nt)))
        .create(name)
        .unwrap()
}

fn write_digitizer_data(group: &Group, name: &str, nshots: usize, nt: usize) {
    group
        .new_dataset_builder()
        .with_data(&Array2::<i16>::zeros((nshots, nt)))
        .create(name)
        .unwrap();
}

fn write_run_attrs(data_group: &Group) {
    str_attr(data_group, "Investigator", "Everson");
    str_attr(data_group, "Experiment name", "Alfven waves");
    str_attr(data_group, "Experiment description", "Shear waves\nin the LaPD");
    str_attr(data_group, "Experiment set name", "Waves");
    str_attr(data_group, "Experiment set description", "Wave studies");
    str_attr(data_group, "Data run", "test run");
    str_attr(data_group, "Description", "line one\nline two");
    str_attr(data_group, "Status", "Completed");
    str_attr(data_group, "Status date", "3/1/2017 1:02:03 PM");
}

fn write_channel_group(board_group: &Group, board: i32, channel: i32) {
    let group = board_group
        .create_group(&format!("Channel {channel}"))
        .unwrap();
    int_attr(&group, "Board", board);
    int_attr(&group, "Channel", channel);
}

/// A LaPD 1.1 file with a SIS 3301 digitizer and no MSI
pub fn write_lapd_1dot1(dir: &Path) -> PathBuf {
    let path = dir.join("lapd_1dot1.hdf5");
    let file = hdf5::File::create(&path).unwrap();
    str_attr(&file, "LaPD HDF5 software version", "1.1");

    let data_group = file.create_group("Raw data + config").unwrap();
    write_run_attrs(&data_group);

    let sis = data_group.create_group("SIS 3301").unwrap();
    let run_config = sis.create_group("Configuration: run config").unwrap();
    str_attr(&run_config, "Samples to average", "Average 4 Samples");
    int_attr(&run_config, "Shots to average", 1);
    let board1 = run_config.create_group("Board 1").unwrap();
    write_channel_group(&board1, 1, 1);
    write_channel_group(&board1, 1, 2);
    let board2 = run_config.create_group("Board 2").unwrap();
    write_channel_group(&board2, 2, 3);

    let spare_config = sis.create_group("Configuration: spare config").unwrap();
    let board1 = spare_config.create_group("Board 1").unwrap();
    write_channel_group(&board1, 1, 1);

    write_digitizer_data(&sis, "run config [1:1]", 10, 64);
    write_digitizer_data(&sis, "run config [1:2]", 10, 64);

    path
}

fn write_sis_crate(data_group: &Group) {
    let sis = data_group.create_group("SIS crate").unwrap();

    let config01 = sis.create_group("config01").unwrap();
    int_array_attr(&config01, "SIS crate board types", &[1, 2, 2, 3]);
    int_array_attr(&config01, "SIS crate slot numbers", &[3, 5, 7, 13]);
    int_array_attr(&config01, "SIS crate config indices", &[0, 0, 1, 0]);

    let brd1 = config01
        .create_group("SIS crate 3302 configurations[0]")
        .unwrap();
    str_attr(&brd1, "Enabled 1", "TRUE");
    str_attr(&brd1, "Enabled 2", "TRUE");
    str_attr(&brd1, "Enabled 3", "FALSE");
    int_attr(&brd1, "Shot averaging (software)", 8);
    str_attr(&brd1, "Sample averaging (hardware)", "Average 2 Samples");

    let brd2 = config01
        .create_group("SIS crate 3302 configurations[1]")
        .unwrap();
    str_attr(&brd2, "Enabled 8", "TRUE");

    let fast = config01
        .create_group("SIS crate 3305 configurations[0]")
        .unwrap();
    str_attr(&fast, "FPGA 1 Enabled 1", "TRUE");
    str_attr(&fast, "FPGA 2 Enabled 2", "TRUE");
    int_attr(&fast, "Channel mode", 1);

    config01
        .create_group("SIS crate 3302 calibration[0]")
        .unwrap();

    let config02 = sis.create_group("config02").unwrap();
    int_array_attr(&config02, "SIS crate board types", &[1, 2]);
    int_array_attr(&config02, "SIS crate slot numbers", &[3, 5]);
    int_array_attr(&config02, "SIS crate config indices", &[0, 0]);
    let brd1 = config02
        .create_group("SIS crate 3302 configurations[0]")
        .unwrap();
    str_attr(&brd1, "Enabled 1", "TRUE");

    write_digitizer_data(&sis, "config01 [Slot 5: SIS 3302 ch 1]", 5, 32);
    write_digitizer_data(&sis, "config01 [Slot 5: SIS 3302 ch 2]", 5, 32);
    write_digitizer_data(&sis, "config01 [Slot 13: SIS 3305 FPGA 1 ch 1]", 5, 64);
}

fn write_controls(data_group: &Group) {
    let six_k = data_group.create_group("6K Compumotor").unwrap();
    six_k.create_group("Motion list: line x").unwrap();
    let probe = six_k.create_group("Probe: probe1").unwrap();
    int_attr(&probe, "Receptacle", 2);
    int_attr(&probe, "Port", 7);
    write_rows(&six_k, "XY[2]: probe1", &[0.0_f64, 1.0, 2.0, 3.0]);

    let waveform = data_group.create_group("Waveform").unwrap();
    let config = waveform.create_group("config01").unwrap();
    str_attr(&config, "IP address", "192.168.1.5");
    float_attr(&config, "Frequency", 1000.0);
}

/// Heater summary dataset with `nshots` rows
pub fn write_heater_summary(group: &Group, name: &str, nshots: usize) -> Dataset {
    let rows: Vec<HeaterSummary> = (0..nshots)
        .map(|i| HeaterSummary {
            shot_number: i as i32 + 1,
            temperature: 900.0,
            ..Default::default()
        })
        .collect();
    write_rows(group, name, &rows)
}

/// Interferometer subgroup "Interferometer [index]" with `nshots` rows
pub fn write_interferometer(array_group: &Group, index: usize, nshots: usize) {
    let group = array_group
        .create_group(&format!("Interferometer [{index}]"))
        .unwrap();
    str_attr(&group, "Calibration tag", &format!("if {index}"));
    float_attr(
        &group,
        "Interferometer z location",
        100.0 * (index as f64 + 1.0),
    );
    float_attr(&group, "n_bar_L", 1.0e13);
    float_attr(&group, "Start time", -0.01);
    float_attr(&group, "Timestep", 1.0e-5);

    let rows: Vec<InterferometerSummary> = (0..nshots)
        .map(|i| InterferometerSummary {
            shot_number: i as i32 + 1,
            ..Default::default()
        })
        .collect();
    write_rows(&group, "Interferometer summary list", &rows);
    write_signal(&group, "Interferometer trace", nshots, 8);
}

fn write_msi(file: &hdf5::File) {
    let msi = file.create_group("MSI").unwrap();

    let magnet = msi.create_group("Magnetic field").unwrap();
    float_array_attr(&magnet, "Profile z locations", &[-300.0, 0.0, 300.0]);
    write_signal(&magnet, "Magnet power supply currents", NSHOTS, 10);
    write_signal(&magnet, "Magnetic field profile", NSHOTS, 3);
    let rows: Vec<MagneticFieldSummary> = (0..NSHOTS)
        .map(|i| MagneticFieldSummary {
            shot_number: i as i32 + 1,
            peak_field: 1000.0,
            ..Default::default()
        })
        .collect();
    write_rows(&magnet, "Magnetic field summary", &rows);

    let discharge = msi.create_group("Discharge").unwrap();
    float_attr(&discharge, "Current conversion factor", 2.0);
    float_attr(&discharge, "Voltage conversion factor", 1.5);
    float_attr(&discharge, "Timestep", 4.0e-5);
    write_signal(&discharge, "Cathode-anode voltage", NSHOTS, 16);
    write_signal(&discharge, "Discharge current", NSHOTS, 16);
    let rows: Vec<DischargeSummary> = (0..NSHOTS)
        .map(|i| DischargeSummary {
            shot_number: i as i32 + 1,
            ..Default::default()
        })
        .collect();
    write_rows(&discharge, "Discharge summary", &rows);

    let gas = msi.create_group("Gas pressure").unwrap();
    float_array_attr(&gas, "RGA AMUs", &[2.0, 4.0, 28.0]);
    str_attr(&gas, "RGA calibration tag", "rga 2017");
    write_signal(&gas, "RGA partial pressures", NSHOTS, 3);
    let rows: Vec<GasPressureSummary> = (0..NSHOTS)
        .map(|i| GasPressureSummary {
            shot_number: i as i32 + 1,
            ..Default::default()
        })
        .collect();
    write_rows(&gas, "Gas pressure summary", &rows);

    let heater = msi.create_group("Heater").unwrap();
    str_attr(&heater, "Heater calibration tag", "heater 2017");
    write_heater_summary(&heater, "Heater summary", NSHOTS);

    let interferometers = msi.create_group("Interferometer array").unwrap();
    int_attr(&interferometers, "Interferometer count", 2);
    write_interferometer(&interferometers, 0, NSHOTS);
    write_interferometer(&interferometers, 1, NSHOTS);

    msi.create_group("Mystery").unwrap();
}

/// A LaPD 1.2 file with a SIS crate digitizer, MSI diagnostics, and control devices
pub fn write_lapd_1dot2(dir: &Path) -> PathBuf {
    let path = dir.join("lapd_1dot2.hdf5");
    let file = hdf5::File::create(&path).unwrap();
    str_attr(&file, "LaPD HDF5 software version", "1.2");

    write_msi(&file);

    let data_group = file.create_group("Raw data + config").unwrap();
    write_run_attrs(&data_group);
    write_sis_crate(&data_group);
    write_controls(&data_group);
    data_group.create_group("Data run sequence").unwrap();
    data_group.create_group("Unmapped device").unwrap();

    path
}

/// An HDF5 file which was not written by the LaPD
pub fn write_plain_file(dir: &Path) -> PathBuf {
    let path = dir.join("plain.hdf5");
    let file = hdf5::File::create(&path).unwrap();
    let group = file.create_group("data").unwrap();
    write_rows(&group, "values", &[1_i32, 2, 3]);
    path
}

/// An HDF5 file claiming a LaPD software version we cannot map
pub fn write_unknown_version(dir: &Path) -> PathBuf {
    let path = dir.join("lapd_2dot0.hdf5");
    let file = hdf5::File::create(&path).unwrap();
    str_attr(&file, "LaPD HDF5 software version", "2.0");
    file.create_group("Raw data + config").unwrap();
    path
}
