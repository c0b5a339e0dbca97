// The SIS 3301 digitizer of LaPD 1.1 files.
//
// SIS 3301
// |---- Configuration: <config name> - Shots to average, Samples to average
// |    |---- <board group>
// |    |    |---- <channel group> - Board, Channel
// |---- <config name> [<board>:<channel>](dset)
use hdf5::Group;
use std::collections::BTreeMap;

use crate::attrs::{read_int_attr, split_members};
use crate::constants::*;
use crate::error::DigitizerMapError;
use super::{
    fill_dataset_shapes, is_config_active, read_average, Adc, AdcSettings, ClockRate,
    Connection, DataConfig,
};

/// A configuration group is named "Configuration: <config name>"
pub fn parse_config_name(name: &str) -> Option<String> {
    let mut words = name.split_whitespace();
    match words.next() {
        Some(SIS3301_CONFIG_PREFIX) => Some(words.collect::<Vec<&str>>().join(" ")),
        _ => None,
    }
}

/// Build the data configurations found in the SIS 3301 group
pub fn build_configs(
    sis_group: &Group,
) -> Result<BTreeMap<String, DataConfig>, DigitizerMapError> {
    let (subgroup_names, dataset_names) = split_members(sis_group)?;
    let mut configs = BTreeMap::new();

    for name in subgroup_names {
        let Some(config_name) = parse_config_name(&name) else {
            continue;
        };
        let config_group = sis_group.group(&name)?;

        let mut settings =
            AdcSettings::new(SIS3301_BIT, Some(ClockRate::mhz(SIS3301_CLOCK_MHZ)));
        settings.shot_average = read_average(&config_group, SIS3301_SHOT_AVERAGE_ATTR);
        settings.sample_average = read_average(&config_group, SIS3301_SAMPLE_AVERAGE_ATTR);

        let mut connections = BTreeMap::new();
        connections.insert(Adc::Sis3301, find_connections(&config_group, &settings)?);

        let mut config = DataConfig {
            active: is_config_active(&config_name, &dataset_names),
            adcs: vec![Adc::Sis3301],
            group_name: name.clone(),
            group_path: config_group.name(),
            connections,
        };
        fill_dataset_shapes(sis_group, &config_name, &dataset_names, &mut config)?;
        configs.insert(config_name, config);
    }

    Ok(configs)
}

/// Board and channel numbers must fit the u8 the DAQ displays them as
fn read_u8_attr(group: &Group, name: &str) -> Option<u8> {
    read_int_attr(group, name)
        .ok()
        .and_then(|value| u8::try_from(value).ok())
}

/// Each board group holds one group per connected channel, which carry the Board and
/// Channel numbers as attributes
fn find_connections(
    config_group: &Group,
    settings: &AdcSettings,
) -> Result<Vec<Connection>, DigitizerMapError> {
    let mut connections = Vec::new();
    for board_group in config_group.groups()? {
        let mut board: Option<u8> = None;
        let mut channels: Vec<u8> = Vec::new();
        for channel_group in board_group.groups()? {
            let (Some(brd), Some(ch)) = (
                read_u8_attr(&channel_group, "Board"),
                read_u8_attr(&channel_group, "Channel"),
            ) else {
                return Err(DigitizerMapError::BadChannelGroup(channel_group.name()));
            };
            if board.is_none() {
                board = Some(brd);
            }
            channels.push(ch);
        }

        match board {
            Some(board) => {
                channels.sort_unstable();
                connections.push(Connection {
                    board,
                    channels,
                    settings: settings.clone(),
                });
            }
            None => log::warn!(
                "Board group {} has no connected channels, skipping it.",
                board_group.name()
            ),
        }
    }
    Ok(connections)
}
