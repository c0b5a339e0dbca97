// MSI/Heater
// |---- Heater summary(dset) - compound, one row per shot
use hdf5::Group;

use super::{
    map_general_attrs, map_summary_fields, require_datasets, summary_shape, DType, MsiConfigs,
    SummaryField,
};
use crate::error::MsiMapError;

const SUMMARY: &str = "Heater summary";

const META: [SummaryField; 3] = [
    SummaryField {
        key: "current",
        field: "Heater current",
        dtype: DType::F32,
    },
    SummaryField {
        key: "voltage",
        field: "Heater voltage",
        dtype: DType::F32,
    },
    SummaryField {
        key: "temperature",
        field: "Heater temperature",
        dtype: DType::F32,
    },
];

pub fn build_configs(group: &Group) -> Result<MsiConfigs, MsiMapError> {
    require_datasets(group, &[SUMMARY])?;

    let mut configs = MsiConfigs::default();
    map_general_attrs(
        group,
        &[],
        &[("calib tag", "Heater calibration tag")],
        &mut configs,
    );

    let summary = group.dataset(SUMMARY)?;
    configs.shape = summary_shape(&summary)?;
    map_summary_fields(&summary, &META, &mut configs)?;

    Ok(configs)
}
