// MSI/Gas pressure
// |---- Gas pressure summary(dset) - compound, one row per shot
// |---- RGA partial pressures(dset) - one row per shot
use hdf5::Group;

use super::{
    map_general_attrs, map_signal, map_summary_fields, read_numbers, require_datasets,
    summary_shape, DType, MsiConfigs, SummaryField,
};
use crate::attrs::has_attr;
use crate::error::MsiMapError;

const SUMMARY: &str = "Gas pressure summary";
const PARTIAL_PRESSURES: &str = "RGA partial pressures";
const RGA_AMUS_ATTR: &str = "RGA AMUs";

const META: [SummaryField; 3] = [
    SummaryField {
        key: "pressure",
        field: "Fill pressure",
        dtype: DType::F32,
    },
    SummaryField {
        key: "peak AMU",
        field: "Peak AMU",
        dtype: DType::F32,
    },
    SummaryField {
        key: "partial pressure",
        field: "RGA partial pressures",
        dtype: DType::F32,
    },
];

pub fn build_configs(group: &Group) -> Result<MsiConfigs, MsiMapError> {
    require_datasets(group, &[SUMMARY, PARTIAL_PRESSURES])?;

    let mut configs = MsiConfigs::default();
    if has_attr(group, RGA_AMUS_ATTR) {
        configs
            .general
            .insert(String::from("RGA AMUs"), read_numbers(group, RGA_AMUS_ATTR)?);
    }
    map_general_attrs(
        group,
        &[],
        &[
            ("ion gauge calibration tag", "Ion gauge calibration tag"),
            ("RGA calibration tag", "RGA calibration tag"),
        ],
        &mut configs,
    );

    let summary = group.dataset(SUMMARY)?;
    configs.shape = summary_shape(&summary)?;
    map_summary_fields(&summary, &META, &mut configs)?;

    let nshots = configs.shape[0];
    map_signal(
        &group.dataset(PARTIAL_PRESSURES)?,
        "RGA partial pressures",
        nshots,
        &mut configs,
    )?;

    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msi::GeneralValue;
    use crate::test_fixtures::write_lapd_1dot2;

    #[test]
    fn test_build_configs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_lapd_1dot2(dir.path());
        let file = hdf5::File::open(&path).unwrap();
        let configs = build_configs(&file.group("MSI/Gas pressure").unwrap()).unwrap();

        assert_eq!(configs.shape, vec![4]);
        assert_eq!(
            configs.general["RGA AMUs"],
            GeneralValue::Numbers(vec![2.0, 4.0, 28.0])
        );
        assert_eq!(
            configs.general["RGA calibration tag"],
            GeneralValue::Text(String::from("rga 2017"))
        );
        assert!(!configs.general.contains_key("ion gauge calibration tag"));

        // Array members of the summary contribute their dimensions
        assert_eq!(configs.meta["partial pressure"].shape, vec![vec![3]]);
        assert_eq!(configs.meta["pressure"].shape, vec![Vec::<usize>::new()]);
        assert_eq!(
            configs.signals["RGA partial pressures"].shape,
            vec![vec![3]]
        );
    }
}
