//! Small helpers over the hdf5 attribute and group API.
//!
//! LaPD files are written by LabVIEW and h5py tooling, so string attributes show up both as
//! fixed-length ASCII and as variable-length UTF-8, and "scalar" values are sometimes stored
//! as length-1 arrays. These helpers hide that from the mappers.
use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Attribute, Group, H5Type, Location};

use super::error::AttributeError;

/// Largest fixed-length string we read from an attribute. Longer fixed-length strings are
/// truncated to this many bytes
const STRING_CAPACITY: usize = 4096;

fn open_attr(loc: &Location, name: &str) -> Result<Attribute, AttributeError> {
    if !has_attr(loc, name) {
        return Err(AttributeError::Missing(name.to_string()));
    }
    loc.attr(name)
        .map_err(|e| AttributeError::HDF5Error(name.to_string(), e))
}

fn descriptor(attr: &Attribute, name: &str) -> Result<TypeDescriptor, AttributeError> {
    attr.dtype()
        .and_then(|dt| dt.to_descriptor())
        .map_err(|e| AttributeError::HDF5Error(name.to_string(), e))
}

/// Read the first element of an attribute, whether stored as a scalar or an array
fn read_first<T: H5Type>(attr: &Attribute) -> hdf5::Result<Option<T>> {
    if attr.is_scalar() {
        attr.read_scalar::<T>().map(Some)
    } else {
        Ok(attr.read_raw::<T>()?.into_iter().next())
    }
}

/// Check if the location carries an attribute with the given name
pub fn has_attr(loc: &Location, name: &str) -> bool {
    match loc.attr_names() {
        Ok(names) => names.iter().any(|n| n == name),
        Err(_) => false,
    }
}

/// Read a string attribute, accepting fixed and variable length encodings.
///
/// Fixed-length strings longer than 4096 bytes are truncated, with a warning.
pub fn read_string_attr(loc: &Location, name: &str) -> Result<String, AttributeError> {
    let attr = open_attr(loc, name)?;
    let to_err = |e| AttributeError::HDF5Error(name.to_string(), e);
    let dtype = descriptor(&attr, name)?;
    if let TypeDescriptor::FixedAscii(size) | TypeDescriptor::FixedUnicode(size) = &dtype {
        if *size > STRING_CAPACITY {
            log::warn!("Attribute {name} holds {size} bytes, reading the first {STRING_CAPACITY}.");
        }
    }
    let value = match dtype {
        TypeDescriptor::VarLenUnicode => {
            read_first::<VarLenUnicode>(&attr).map(|s| s.map(|s| s.as_str().to_owned()))
        }
        TypeDescriptor::VarLenAscii => {
            read_first::<VarLenAscii>(&attr).map(|s| s.map(|s| s.as_str().to_owned()))
        }
        TypeDescriptor::FixedAscii(_) => read_first::<FixedAscii<STRING_CAPACITY>>(&attr)
            .map(|s| s.map(|s| s.as_str().to_owned())),
        TypeDescriptor::FixedUnicode(_) => read_first::<FixedUnicode<STRING_CAPACITY>>(&attr)
            .map(|s| s.map(|s| s.as_str().to_owned())),
        _ => return Err(AttributeError::NotAString(name.to_string())),
    };
    Ok(value.map_err(to_err)?.unwrap_or_default())
}

/// Read a string attribute, returning an empty string if it is absent or not a string
pub fn read_string_attr_or_default(loc: &Location, name: &str) -> String {
    read_string_attr(loc, name).unwrap_or_default()
}

/// Read an integer attribute (any integer width is converted to i64)
pub fn read_int_attr(loc: &Location, name: &str) -> Result<i64, AttributeError> {
    let attr = open_attr(loc, name)?;
    read_first::<i64>(&attr)
        .map_err(|e| AttributeError::HDF5Error(name.to_string(), e))?
        .ok_or_else(|| AttributeError::Missing(name.to_string()))
}

/// Read a floating point attribute (converted to f64)
pub fn read_float_attr(loc: &Location, name: &str) -> Result<f64, AttributeError> {
    let attr = open_attr(loc, name)?;
    read_first::<f64>(&attr)
        .map_err(|e| AttributeError::HDF5Error(name.to_string(), e))?
        .ok_or_else(|| AttributeError::Missing(name.to_string()))
}

pub fn read_int_array_attr(loc: &Location, name: &str) -> Result<Vec<i64>, AttributeError> {
    let attr = open_attr(loc, name)?;
    attr.read_raw::<i64>()
        .map_err(|e| AttributeError::HDF5Error(name.to_string(), e))
}

pub fn read_float_array_attr(loc: &Location, name: &str) -> Result<Vec<f64>, AttributeError> {
    let attr = open_attr(loc, name)?;
    attr.read_raw::<f64>()
        .map_err(|e| AttributeError::HDF5Error(name.to_string(), e))
}

/// LabVIEW stores booleans as the strings "TRUE"/"FALSE"
pub fn read_flag_attr(loc: &Location, name: &str) -> Result<bool, AttributeError> {
    Ok(read_string_attr(loc, name)?.contains("TRUE"))
}

/// Render any attribute as a string for display; numbers and arrays use their debug format
pub fn render_attr(loc: &Location, name: &str) -> Result<String, AttributeError> {
    let attr = open_attr(loc, name)?;
    match descriptor(&attr, name)? {
        TypeDescriptor::Float(_) => Ok(format_values(&read_float_array_attr(loc, name)?)),
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) | TypeDescriptor::Enum(_) => {
            Ok(format_values(&read_int_array_attr(loc, name)?))
        }
        _ => read_string_attr(loc, name),
    }
}

fn format_values<T: std::fmt::Debug>(values: &[T]) -> String {
    if values.len() == 1 {
        format!("{:?}", values[0])
    } else {
        format!("{:?}", values)
    }
}

/// Final component of an HDF5 path
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Split the members of a group into (subgroup names, dataset names)
pub fn split_members(group: &Group) -> Result<(Vec<String>, Vec<String>), hdf5::Error> {
    let subgroups = group
        .groups()?
        .iter()
        .map(|g| basename(&g.name()).to_string())
        .collect();
    let datasets = group
        .datasets()?
        .iter()
        .map(|d| basename(&d.name()).to_string())
        .collect();
    Ok((subgroups, datasets))
}
