//! Mapping of the machine state information (MSI) diagnostics.
//!
//! Each MSI diagnostic group holds a 1D compound "summary" dataset (one row per shot) and
//! optionally 2D signal datasets with one row per shot. The map records where each quantity
//! lives (dataset path and compound field), its per-shot shape, and its data type.
pub mod discharge;
pub mod gas_pressure;
pub mod heater;
pub mod interferometer;
pub mod magnetic_field;

use hdf5::types::TypeDescriptor;
use hdf5::{Dataset, Group};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::attrs::{basename, read_float_array_attr, read_float_attr, read_string_attr};
use crate::error::MsiMapError;

pub const SHOT_NUMBER_FIELD: &str = "Shot number";
pub const TIMESTAMP_FIELD: &str = "Timestamp";
pub const DATA_VALID_FIELD: &str = "Data valid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DType {
    I8,
    I32,
    F32,
    F64,
}

/// Where a quantity is stored: one entry in `dset_paths` and `shape` per contributing dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMap {
    pub dset_paths: Vec<String>,
    /// Compound field holding the quantity; None if the whole dataset is the quantity
    pub dset_field: Option<String>,
    pub shape: Vec<Vec<usize>>,
    pub dtype: DType,
}

impl FieldMap {
    pub fn new(dset_field: Option<&str>, dtype: DType) -> Self {
        Self {
            dset_paths: Vec::new(),
            dset_field: dset_field.map(String::from),
            shape: Vec::new(),
            dtype,
        }
    }

    fn push(&mut self, path: String, shape: Vec<usize>) {
        self.dset_paths.push(path);
        self.shape.push(shape);
    }
}

/// Diagnostic wide values, usually read from group attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneralValue {
    Count(usize),
    Number(f64),
    Numbers(Vec<f64>),
    Text(String),
    Texts(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsiConfigs {
    /// Shape of the summary, i.e. (number of shots,)
    pub shape: Vec<usize>,
    pub general: BTreeMap<String, GeneralValue>,
    pub shotnum: FieldMap,
    pub signals: BTreeMap<String, FieldMap>,
    pub meta: BTreeMap<String, FieldMap>,
}

impl Default for MsiConfigs {
    fn default() -> Self {
        Self {
            shape: Vec::new(),
            general: BTreeMap::new(),
            shotnum: FieldMap::new(Some(SHOT_NUMBER_FIELD), DType::I32),
            signals: BTreeMap::new(),
            meta: BTreeMap::new(),
        }
    }
}

/// A compound field of a summary dataset and the meta key it is reported under
#[derive(Debug, Clone, Copy)]
pub(crate) struct SummaryField {
    pub key: &'static str,
    pub field: &'static str,
    pub dtype: DType,
}

/// Meta fields present in every summary dataset
pub(crate) const COMMON_META: [SummaryField; 2] = [
    SummaryField {
        key: "timestamp",
        field: TIMESTAMP_FIELD,
        dtype: DType::F64,
    },
    SummaryField {
        key: "data valid",
        field: DATA_VALID_FIELD,
        dtype: DType::I8,
    },
];

/// The map of a single MSI diagnostic group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsiMap {
    pub device_name: String,
    pub group_path: String,
    pub configs: MsiConfigs,
}

impl MsiMap {
    /// Map a diagnostic group, dispatching on the group name
    pub fn new(group: &Group) -> Result<Self, MsiMapError> {
        let group_path = group.name();
        let device_name = basename(&group_path).to_string();
        let configs = match device_name.as_str() {
            "Discharge" => discharge::build_configs(group)?,
            "Gas pressure" => gas_pressure::build_configs(group)?,
            "Heater" => heater::build_configs(group)?,
            "Interferometer array" => interferometer::build_configs(group)?,
            "Magnetic field" => magnetic_field::build_configs(group)?,
            _ => return Err(MsiMapError::UnknownDiagnostic(device_name)),
        };
        Ok(Self {
            device_name,
            group_path,
            configs,
        })
    }
}

/// Every named dataset must exist in the group
pub(crate) fn require_datasets(group: &Group, names: &[&str]) -> Result<(), MsiMapError> {
    for name in names {
        if !group.link_exists(name) || group.dataset(name).is_err() {
            return Err(MsiMapError::MissingDataset(name.to_string()));
        }
    }
    Ok(())
}

/// Dimensions a compound member contributes per row (empty for scalar members)
fn descriptor_dims(ty: &TypeDescriptor) -> Vec<usize> {
    match ty {
        TypeDescriptor::FixedArray(inner, n) => {
            let mut dims = vec![*n];
            dims.extend(descriptor_dims(inner));
            dims
        }
        _ => Vec::new(),
    }
}

/// Per-row shape of a named field in a compound dataset
pub(crate) fn compound_field_shape(dset: &Dataset, field: &str) -> Result<Vec<usize>, MsiMapError> {
    let label = basename(&dset.name()).to_string();
    match dset.dtype()?.to_descriptor()? {
        TypeDescriptor::Compound(compound) => compound
            .fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| descriptor_dims(&f.ty))
            .ok_or_else(|| MsiMapError::MissingField(label, field.to_string())),
        _ => Err(MsiMapError::NotCompound(label)),
    }
}

/// Check a summary dataset is 1D and return its shape
pub(crate) fn summary_shape(dset: &Dataset) -> Result<Vec<usize>, MsiMapError> {
    if dset.ndim() == 1 {
        Ok(dset.shape())
    } else {
        Err(MsiMapError::BadShape(format!("/{}", basename(&dset.name()))))
    }
}

/// Check a signal dataset is 2D with one row per shot and return the per-shot shape
pub(crate) fn signal_shape(dset: &Dataset, nshots: usize) -> Result<Vec<usize>, MsiMapError> {
    let shape = dset.shape();
    if shape.len() == 2 && shape[0] == nshots {
        Ok(vec![shape[1]])
    } else {
        Err(MsiMapError::BadShape(format!("/{}", basename(&dset.name()))))
    }
}

/// Record the shot number and the given meta fields of a summary dataset
pub(crate) fn map_summary_fields(
    dset: &Dataset,
    fields: &[SummaryField],
    configs: &mut MsiConfigs,
) -> Result<(), MsiMapError> {
    let path = dset.name();
    let shape = compound_field_shape(dset, SHOT_NUMBER_FIELD)?;
    configs.shotnum.push(path.clone(), shape);

    for field in COMMON_META.iter().chain(fields.iter()) {
        let shape = compound_field_shape(dset, field.field)?;
        configs
            .meta
            .entry(field.key.to_string())
            .or_insert_with(|| FieldMap::new(Some(field.field), field.dtype))
            .push(path.clone(), shape);
    }
    Ok(())
}

/// Record a whole-dataset signal
pub(crate) fn map_signal(
    dset: &Dataset,
    key: &str,
    nshots: usize,
    configs: &mut MsiConfigs,
) -> Result<(), MsiMapError> {
    let shape = signal_shape(dset, nshots)?;
    configs
        .signals
        .entry(key.to_string())
        .or_insert_with(|| FieldMap::new(None, DType::F32))
        .push(dset.name(), shape);
    Ok(())
}

/// Copy optional attributes into the general values; absent attributes are skipped
pub(crate) fn map_general_attrs(
    group: &Group,
    numbers: &[(&str, &str)],
    texts: &[(&str, &str)],
    configs: &mut MsiConfigs,
) {
    for (key, attr) in numbers {
        if let Ok(value) = read_float_attr(group, attr) {
            configs
                .general
                .insert(key.to_string(), GeneralValue::Number(value));
        }
    }
    for (key, attr) in texts {
        if let Ok(value) = read_string_attr(group, attr) {
            configs
                .general
                .insert(key.to_string(), GeneralValue::Text(value));
        }
    }
}

pub(crate) fn read_numbers(group: &Group, attr: &str) -> Result<GeneralValue, MsiMapError> {
    Ok(GeneralValue::Numbers(read_float_array_attr(group, attr)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{write_heater_summary, write_lapd_1dot2};

    #[test]
    fn test_compound_field_shape() {
        let dir = tempfile::tempdir().unwrap();
        let file = hdf5::File::create(dir.path().join("summary.h5")).unwrap();
        let dset = write_heater_summary(&file, "Heater summary", 4);
        assert_eq!(compound_field_shape(&dset, "Shot number").unwrap(), Vec::<usize>::new());
        assert!(matches!(
            compound_field_shape(&dset, "Not a field"),
            Err(MsiMapError::MissingField(_, _))
        ));
        assert_eq!(summary_shape(&dset).unwrap(), vec![4]);

        let plain = file
            .new_dataset_builder()
            .with_data(&ndarray::Array2::<f32>::zeros((4, 3)))
            .create("plain")
            .unwrap();
        assert!(matches!(
            compound_field_shape(&plain, "Shot number"),
            Err(MsiMapError::NotCompound(_))
        ));
        assert_eq!(signal_shape(&plain, 4).unwrap(), vec![3]);
        assert!(signal_shape(&plain, 5).is_err());
        assert!(summary_shape(&plain).is_err());
    }

    #[test]
    fn test_msi_map_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_lapd_1dot2(dir.path());
        let file = hdf5::File::open(&path).unwrap();
        let map = MsiMap::new(&file.group("MSI/Magnetic field").unwrap()).unwrap();
        assert_eq!(map.device_name, "Magnetic field");
        assert_eq!(map.group_path, "/MSI/Magnetic field");

        let unknown = file.group("MSI/Mystery").unwrap();
        assert!(matches!(
            MsiMap::new(&unknown),
            Err(MsiMapError::UnknownDiagnostic(_))
        ));
    }
}
