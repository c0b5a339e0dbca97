// MSI/Magnetic field
// |---- Magnet power supply currents(dset) - one row per shot
// |---- Magnetic field profile(dset) - one row per shot
// |---- Magnetic field summary(dset) - compound, one row per shot
use hdf5::Group;

use super::{
    map_signal, map_summary_fields, read_numbers, require_datasets, summary_shape, DType,
    MsiConfigs, SummaryField,
};
use crate::error::MsiMapError;

const PS_CURRENTS: &str = "Magnet power supply currents";
const PROFILE: &str = "Magnetic field profile";
const SUMMARY: &str = "Magnetic field summary";

const META: [SummaryField; 1] = [SummaryField {
    key: "peak magnetic field",
    field: "Peak magnetic field",
    dtype: DType::F32,
}];

pub fn build_configs(group: &Group) -> Result<MsiConfigs, MsiMapError> {
    require_datasets(group, &[PS_CURRENTS, PROFILE, SUMMARY])?;

    let mut configs = MsiConfigs::default();
    configs
        .general
        .insert(String::from("z"), read_numbers(group, "Profile z locations")?);

    let summary = group.dataset(SUMMARY)?;
    configs.shape = summary_shape(&summary)?;
    map_summary_fields(&summary, &META, &mut configs)?;

    let nshots = configs.shape[0];
    map_signal(&group.dataset(PS_CURRENTS)?, "magnet ps current", nshots, &mut configs)?;
    map_signal(&group.dataset(PROFILE)?, "magnetic field", nshots, &mut configs)?;

    Ok(configs)
}
