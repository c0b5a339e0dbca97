// MSI/Interferometer array - Interferometer count
// |---- Interferometer [<n>] - Calibration tag, Interferometer z location, n_bar_L, Start time, Timestep
// |    |---- Interferometer summary list(dset) - compound, one row per shot
// |    |---- Interferometer trace(dset) - one row per shot
use hdf5::Group;

use super::{
    map_signal, map_summary_fields, require_datasets, summary_shape, DType, GeneralValue,
    MsiConfigs, SummaryField,
};
use crate::attrs::{basename, read_float_attr, read_int_attr, read_string_attr_or_default};
use crate::error::MsiMapError;

const SUMMARY: &str = "Interferometer summary list";
const TRACE: &str = "Interferometer trace";

const META: [SummaryField; 1] = [SummaryField {
    key: "peak density",
    field: "Peak density",
    dtype: DType::F32,
}];

/// Values kept per interferometer, in order of the interferometer groups
#[derive(Debug, Default)]
struct PerInterferometer {
    calib_tags: Vec<String>,
    z: Vec<f64>,
    n_bar_l: Vec<f64>,
    t0: Vec<f64>,
    dt: Vec<f64>,
}

/// Index N of an "Interferometer [N]" group; unparsable names sort last
fn interferometer_index(path: &str) -> usize {
    let name = basename(path);
    name.rfind('[')
        .zip(name.rfind(']'))
        .and_then(|(start, stop)| name.get((start + 1)..stop))
        .and_then(|index| index.trim().parse::<usize>().ok())
        .unwrap_or(usize::MAX)
}

pub fn build_configs(group: &Group) -> Result<MsiConfigs, MsiMapError> {
    let mut interferometers: Vec<Group> = group
        .groups()?
        .into_iter()
        .filter(|g| basename(&g.name()).starts_with("Interferometer ["))
        .collect();
    interferometers.sort_by_key(|g| interferometer_index(&g.name()));
    if interferometers.is_empty() {
        return Err(MsiMapError::MissingDataset(format!("{SUMMARY}, {TRACE}")));
    }

    let mut configs = MsiConfigs::default();
    let count = read_int_attr(group, "Interferometer count")
        .ok()
        .and_then(|c| usize::try_from(c).ok())
        .unwrap_or(interferometers.len());
    configs
        .general
        .insert(String::from("n interferometers"), GeneralValue::Count(count));

    let mut per = PerInterferometer::default();
    for interferometer in interferometers.iter() {
        require_datasets(interferometer, &[SUMMARY, TRACE])?;

        per.calib_tags
            .push(read_string_attr_or_default(interferometer, "Calibration tag"));
        per.z.push(read_float_attr(interferometer, "Interferometer z location")?);
        per.n_bar_l.push(read_float_attr(interferometer, "n_bar_L")?);
        per.t0.push(read_float_attr(interferometer, "Start time")?);
        per.dt.push(read_float_attr(interferometer, "Timestep")?);

        let summary = interferometer.dataset(SUMMARY)?;
        let shape = summary_shape(&summary)?;
        if configs.shape.is_empty() {
            configs.shape = shape;
        } else if configs.shape != shape {
            return Err(MsiMapError::BadShape(format!(
                "/{}/{SUMMARY}",
                basename(&interferometer.name())
            )));
        }
        map_summary_fields(&summary, &META, &mut configs)?;

        let key = basename(&interferometer.name()).to_lowercase();
        map_signal(&interferometer.dataset(TRACE)?, &key, configs.shape[0], &mut configs)?;
    }

    configs
        .general
        .insert(String::from("calib tag"), GeneralValue::Texts(per.calib_tags));
    configs
        .general
        .insert(String::from("z"), GeneralValue::Numbers(per.z));
    configs
        .general
        .insert(String::from("n_bar_L"), GeneralValue::Numbers(per.n_bar_l));
    configs
        .general
        .insert(String::from("t0"), GeneralValue::Numbers(per.t0));
    configs
        .general
        .insert(String::from("dt"), GeneralValue::Numbers(per.dt));

    Ok(configs)
}
