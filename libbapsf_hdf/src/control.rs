//! Mapping of the probe drive and waveform control devices in the data group.
//!
//! Each control device records, per shot, the state it put the experiment in (probe position,
//! waveform, ...). The map records the device configurations and the datasets the device wrote.
use hdf5::Group;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::attrs::{basename, has_attr, read_int_attr, render_attr, split_members};
use super::constants::*;
use super::error::ControlMapError;

const PROBE_PREFIX: &str = "Probe:";
const MOTION_LIST_PREFIX: &str = "Motion list:";

/// The kind of state a control device sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContType {
    Motion,
    Waveform,
}

impl ContType {
    /// The control type of a known control device group, None if the group is not a known device
    pub fn from_device_name(name: &str) -> Option<Self> {
        match name {
            SIX_K_COMPUMOTOR_GROUP | NI_XZ_GROUP | NI_XYZ_GROUP => Some(Self::Motion),
            WAVEFORM_GROUP => Some(Self::Waveform),
            _ => None,
        }
    }
}

/// A probe driven by the 6K Compumotor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub probe_name: String,
    pub receptacle: Option<i64>,
    pub port: Option<String>,
    /// Every motion list defined for the device
    pub motion_lists: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlConfig {
    Probe(ProbeConfig),
    /// Attribute name -> rendered attribute value
    Settings(BTreeMap<String, String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlMap {
    pub device_name: String,
    pub group_path: String,
    pub contype: ContType,
    pub dset_paths: Vec<String>,
    pub configs: BTreeMap<String, ControlConfig>,
}

impl ControlMap {
    /// Map a control device group, dispatching on the group name
    pub fn new(group: &Group) -> Result<Self, ControlMapError> {
        let group_path = group.name();
        let device_name = basename(&group_path).to_string();
        let contype = ContType::from_device_name(&device_name)
            .ok_or_else(|| ControlMapError::UnknownControl(device_name.clone()))?;

        let configs = match device_name.as_str() {
            SIX_K_COMPUMOTOR_GROUP => six_k_configs(group)?,
            _ => generic_configs(group)?,
        };
        if configs.is_empty() {
            return Err(ControlMapError::NoConfigurations(group_path));
        }

        let (_, dataset_names) = split_members(group)?;
        let dset_paths = dataset_names
            .iter()
            .map(|name| format!("{group_path}/{name}"))
            .collect();

        Ok(Self {
            device_name,
            group_path,
            contype,
            dset_paths,
            configs,
        })
    }
}

/// Strip a "<prefix> " from a group name
fn strip_group_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix).map(str::trim)
}

// 6K Compumotor
// |---- Motion list: <name> - motion list parameters
// |---- Probe: <name> - Receptacle, Port
// |---- <run datasets>(dset)
fn six_k_configs(group: &Group) -> Result<BTreeMap<String, ControlConfig>, ControlMapError> {
    let (subgroup_names, _) = split_members(group)?;

    let motion_lists: Vec<String> = subgroup_names
        .iter()
        .filter_map(|name| strip_group_prefix(name, MOTION_LIST_PREFIX))
        .map(String::from)
        .collect();

    let mut configs = BTreeMap::new();
    for name in subgroup_names.iter() {
        let Some(probe_name) = strip_group_prefix(name, PROBE_PREFIX) else {
            continue;
        };
        let probe_group = group.group(name)?;
        let receptacle = match has_attr(&probe_group, "Receptacle") {
            true => Some(read_int_attr(&probe_group, "Receptacle")?),
            false => None,
        };
        let port = match has_attr(&probe_group, "Port") {
            true => Some(render_attr(&probe_group, "Port")?),
            false => None,
        };
        configs.insert(
            probe_name.to_string(),
            ControlConfig::Probe(ProbeConfig {
                probe_name: probe_name.to_string(),
                receptacle,
                port,
                motion_lists: motion_lists.clone(),
            }),
        );
    }
    Ok(configs)
}

/// Every subgroup is a configuration described by its attributes
fn generic_configs(group: &Group) -> Result<BTreeMap<String, ControlConfig>, ControlMapError> {
    let mut configs = BTreeMap::new();
    for subgroup in group.groups()? {
        let mut settings = BTreeMap::new();
        for attr_name in subgroup.attr_names()? {
            settings.insert(attr_name.clone(), render_attr(&subgroup, &attr_name)?);
        }
        configs.insert(
            basename(&subgroup.name()).to_string(),
            ControlConfig::Settings(settings),
        );
    }
    Ok(configs)
}
