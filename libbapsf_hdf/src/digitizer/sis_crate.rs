// The SIS crate digitizer of LaPD 1.2 files, holding SIS 3302 and SIS 3305 boards.
//
// SIS crate
// |---- <config name> - SIS crate board types, SIS crate slot numbers, SIS crate config indices
// |    |---- SIS crate 3302 configurations[<index>] - Enabled <ch>, Shot averaging (software), ...
// |    |---- SIS crate 3305 configurations[<index>] - FPGA <n> Enabled <ch>, Channel mode
// |    |---- SIS crate 3302 calibration[<index>]
// |---- <config name> [Slot <slot>: SIS 3302 ch <ch>](dset)
// |---- <config name> [Slot <slot>: SIS 3305 FPGA <n> ch <ch>](dset)
use hdf5::Group;
use std::collections::BTreeMap;

use crate::attrs::{
    basename, read_flag_attr, read_int_array_attr, read_int_attr, split_members,
};
use crate::constants::*;
use crate::error::DigitizerMapError;
use super::{
    fill_dataset_shapes, is_config_active, read_average, Adc, AdcSettings, ClockRate,
    Connection, DataConfig,
};

/// A board of the crate as described by the configuration attributes
#[derive(Debug, Clone, Copy, PartialEq)]
struct SlotInfo {
    config_index: i64,
    board: u8,
    adc: Adc,
}

/// Map a SIS crate slot number to the DAQ displayed board number
pub fn slot_to_board(slot: i64) -> Result<(u8, Adc), DigitizerMapError> {
    match slot {
        5 => Ok((1, Adc::Sis3302)),
        7 => Ok((2, Adc::Sis3302)),
        9 => Ok((3, Adc::Sis3302)),
        11 => Ok((4, Adc::Sis3302)),
        13 => Ok((1, Adc::Sis3305)),
        15 => Ok((2, Adc::Sis3305)),
        _ => Err(DigitizerMapError::UnknownSlot(slot)),
    }
}

/// Map a DAQ board number back to its SIS crate slot number
pub fn board_to_slot(board: u8, adc: Adc) -> Result<i64, DigitizerMapError> {
    match (board, adc) {
        (1, Adc::Sis3302) => Ok(5),
        (2, Adc::Sis3302) => Ok(7),
        (3, Adc::Sis3302) => Ok(9),
        (4, Adc::Sis3302) => Ok(11),
        (1, Adc::Sis3305) => Ok(13),
        (2, Adc::Sis3305) => Ok(15),
        _ => Err(DigitizerMapError::UnknownBoard(board, adc.to_string())),
    }
}

/// Build the data configurations found in the SIS crate group.
///
/// Every sub-group of the SIS crate group is a configuration.
pub fn build_configs(
    sis_group: &Group,
) -> Result<BTreeMap<String, DataConfig>, DigitizerMapError> {
    let (subgroup_names, dataset_names) = split_members(sis_group)?;
    let mut configs = BTreeMap::new();

    for name in subgroup_names {
        let config_group = sis_group.group(&name)?;
        let adcs = config_adcs(&config_group)?;

        let mut connections = BTreeMap::new();
        for adc in adcs.iter() {
            connections.insert(*adc, find_connections(*adc, &config_group)?);
        }

        let mut config = DataConfig {
            active: is_config_active(&name, &dataset_names),
            adcs,
            group_name: name.clone(),
            group_path: config_group.name(),
            connections,
        };
        fill_dataset_shapes(sis_group, &name, &dataset_names, &mut config)?;
        configs.insert(name, config);
    }

    Ok(configs)
}

/// The adcs used by a configuration, SIS 3302 always first
fn config_adcs(config_group: &Group) -> Result<Vec<Adc>, DigitizerMapError> {
    let board_types = read_int_array_attr(config_group, SIS_CRATE_BOARD_TYPES_ATTR)?;
    let mut adcs = Vec::new();
    if board_types.contains(&SIS3302_BOARD_TYPE) {
        adcs.push(Adc::Sis3302);
    }
    if board_types.contains(&SIS3305_BOARD_TYPE) {
        adcs.push(Adc::Sis3305);
    }
    Ok(adcs)
}

/// Parse the index out of an adc configuration group name like "SIS crate 3302 configurations[1]"
fn parse_config_index(name: &str) -> Result<i64, DigitizerMapError> {
    let start = name.rfind('[');
    let stop = name.rfind(']');
    match (start, stop) {
        (Some(start), Some(stop)) if start < stop => name[(start + 1)..stop]
            .trim()
            .parse::<i64>()
            .map_err(|_| DigitizerMapError::BadConfigGroupName(name.to_string())),
        _ => Err(DigitizerMapError::BadConfigGroupName(name.to_string())),
    }
}

fn slot_infos(config_group: &Group) -> Result<Vec<SlotInfo>, DigitizerMapError> {
    let slots = read_int_array_attr(config_group, SIS_CRATE_SLOTS_ATTR)?;
    let indices = read_int_array_attr(config_group, SIS_CRATE_CONFIG_INDICES_ATTR)?;
    let mut infos = Vec::new();
    for (slot, index) in slots.iter().zip(indices.iter()) {
        if *slot == SIS_CRATE_CONTROLLER_SLOT {
            continue;
        }
        let (board, adc) = slot_to_board(*slot)?;
        infos.push(SlotInfo {
            config_index: *index,
            board,
            adc,
        });
    }
    Ok(infos)
}

/// Board channel enabled by an "Enabled <ch>" (3302) or "FPGA <n> Enabled <ch>" (3305)
/// attribute. FPGA 2 channels follow the four FPGA 1 channels. None if the name carries no
/// channel number
fn enabled_channel(adc: Adc, attr_name: &str) -> Result<Option<u8>, DigitizerMapError> {
    let Some(channel) = attr_name
        .rsplit(' ')
        .next()
        .and_then(|word| word.parse::<u8>().ok())
    else {
        return Ok(None);
    };
    let bad_channel = || DigitizerMapError::BadChannel(attr_name.to_string());
    match adc {
        Adc::Sis3305 => {
            if !(1..=SIS3305_FPGA_CHANNELS).contains(&channel) {
                return Err(bad_channel());
            }
            match attr_name.contains("FPGA 2") {
                true => Ok(Some(channel + SIS3305_FPGA_CHANNELS)),
                false => Ok(Some(channel)),
            }
        }
        _ if (1..=SIS3302_CHANNELS).contains(&channel) => Ok(Some(channel)),
        _ => Err(bad_channel()),
    }
}

/// SIS 3305 clock rate for a 'Channel mode' attribute value
fn sis3305_clock_rate(mode: i64) -> Result<ClockRate, DigitizerMapError> {
    usize::try_from(mode)
        .ok()
        .and_then(|m| SIS3305_CLOCK_MODES_GHZ.get(m))
        .map(|clock| ClockRate::ghz(*clock))
        .ok_or(DigitizerMapError::UnknownClockMode(mode))
}

fn find_connections(adc: Adc, config_group: &Group) -> Result<Vec<Connection>, DigitizerMapError> {
    let infos = slot_infos(config_group)?;
    let adc_tag = match adc {
        Adc::Sis3302 => "3302",
        Adc::Sis3305 => "3305",
        Adc::Sis3301 => return Err(DigitizerMapError::UnknownAdc(adc.to_string())),
    };

    let mut connections = Vec::new();
    // Calibration groups sit next to the configuration groups and are skipped
    for adc_group in config_group.groups()? {
        let group_name = basename(&adc_group.name()).to_string();
        if !group_name.contains("configurations") || !group_name.contains(adc_tag) {
            continue;
        }

        let config_index = parse_config_index(&group_name)?;
        let Some(info) = infos
            .iter()
            .find(|info| info.adc == adc && info.config_index == config_index)
        else {
            log::warn!("No {adc} board uses configuration group {group_name}, skipping it.");
            continue;
        };

        let mut channels: Vec<u8> = Vec::new();
        let mut settings = match adc {
            Adc::Sis3305 => AdcSettings::new(SIS3305_BIT, None),
            _ => AdcSettings::new(SIS3302_BIT, Some(ClockRate::mhz(SIS3302_CLOCK_MHZ))),
        };
        for attr_name in adc_group.attr_names()? {
            if attr_name.contains("Enable") {
                let Some(channel) = enabled_channel(adc, &attr_name)? else {
                    continue;
                };
                if read_flag_attr(&adc_group, &attr_name)? {
                    channels.push(channel);
                }
            } else if adc == Adc::Sis3305 && attr_name.contains(SIS3305_CHANNEL_MODE_ATTR) {
                let mode = read_int_attr(&adc_group, &attr_name)?;
                settings.clock_rate = Some(sis3305_clock_rate(mode)?);
            }
        }
        if settings.clock_rate.is_none() {
            log::warn!(
                "{group_name} has no {SIS3305_CHANNEL_MODE_ATTR}, the clock rate is unknown."
            );
        }

        if adc == Adc::Sis3302 {
            settings.shot_average = read_average(&adc_group, SIS3302_SHOT_AVERAGE_ATTR);
            settings.sample_average = read_average(&adc_group, SIS3302_SAMPLE_AVERAGE_ATTR);
        }

        channels.sort_unstable();
        connections.push(Connection {
            board: info.board,
            channels,
            settings,
        });
    }

    connections.sort_by_key(|conn| conn.board);
    Ok(connections)
}
