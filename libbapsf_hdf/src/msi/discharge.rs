// MSI/Discharge
// |---- Cathode-anode voltage(dset) - one row per shot
// |---- Discharge current(dset) - one row per shot
// |---- Discharge summary(dset) - compound, one row per shot
use hdf5::Group;

use super::{
    map_general_attrs, map_signal, map_summary_fields, require_datasets, summary_shape, DType,
    MsiConfigs, SummaryField,
};
use crate::error::MsiMapError;

const VOLTAGE: &str = "Cathode-anode voltage";
const CURRENT: &str = "Discharge current";
const SUMMARY: &str = "Discharge summary";

const META: [SummaryField; 3] = [
    SummaryField {
        key: "pulse length",
        field: "Pulse length",
        dtype: DType::F32,
    },
    SummaryField {
        key: "peak current",
        field: "Peak current",
        dtype: DType::F32,
    },
    SummaryField {
        key: "bank voltage",
        field: "Bank voltage",
        dtype: DType::F32,
    },
];

const GENERAL: [(&str, &str); 4] = [
    ("current conversion factor", "Current conversion factor"),
    ("voltage conversion factor", "Voltage conversion factor"),
    ("t0", "Start time"),
    ("dt", "Timestep"),
];

pub fn build_configs(group: &Group) -> Result<MsiConfigs, MsiMapError> {
    require_datasets(group, &[VOLTAGE, CURRENT, SUMMARY])?;

    let mut configs = MsiConfigs::default();
    map_general_attrs(group, &GENERAL, &[], &mut configs);

    let summary = group.dataset(SUMMARY)?;
    configs.shape = summary_shape(&summary)?;
    map_summary_fields(&summary, &META, &mut configs)?;

    let nshots = configs.shape[0];
    map_signal(&group.dataset(VOLTAGE)?, "voltage", nshots, &mut configs)?;
    map_signal(&group.dataset(CURRENT)?, "current", nshots, &mut configs)?;

    Ok(configs)
}
