use clap::{value_parser, Arg, ArgMatches, Command};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use std::path::PathBuf;

use libbapsf_hdf::config::Config;
use libbapsf_hdf::error::PlasmaError;
use libbapsf_hdf::overview::report_hdf_file;
use libbapsf_hdf::plasma::{self, MagneticField, Mass, NumberDensity};

/// Default ion mass [amu], helium as in most LaPD runs
const DEFAULT_ION_MASS_AMU: &str = "4.002602";

/// Log the characteristic frequencies of the plasma described on the command line
fn print_frequencies(matches: &ArgMatches) -> Result<(), PlasmaError> {
    // All arguments have defaults or are required
    let bfield = MagneticField::from_gauss(*matches.get_one::<f64>("bfield").unwrap());
    let z = *matches.get_one::<f64>("z").unwrap();
    let m_i = Mass::from_amu(*matches.get_one::<f64>("ion-mass").unwrap());

    log::info!("Magnetic field: {} G", bfield.gauss());
    log::info!("Ion charge state: {z}, ion mass: {} g", m_i.grams());
    log::info!("Electron cyclotron: {}", plasma::oce(bfield, true)?);
    log::info!("Ion cyclotron: {}", plasma::oci(z, bfield, m_i, true)?);

    if let Some(density) = matches.get_one::<f64>("density") {
        let n_e = NumberDensity::from_per_cm3(*density);
        let n_i = NumberDensity::from_per_cm3(*density / z);
        log::info!("Density: {} cm^-3", n_e.per_cm3());
        log::info!("Electron plasma: {}", plasma::ope(n_e, true)?);
        log::info!("Ion plasma: {}", plasma::opi(z, n_i, m_i, true)?);
        log::info!("Upper hybrid: {}", plasma::ouh(n_e, bfield, true)?);
        log::info!("Lower hybrid: {}", plasma::olh(n_i, z, m_i, bfield, true)?);
    }
    Ok(())
}

fn main() {
    // Create a cli
    let matches = Command::new("bapsf_hdf_cli")
        .arg_required_else_help(true)
        .subcommand(Command::new("new").about("Make a template configuration yaml file"))
        .subcommand(
            Command::new("freq")
                .about("Print the characteristic plasma frequencies")
                .arg(
                    Arg::new("bfield")
                        .long("bfield")
                        .required(true)
                        .value_parser(value_parser!(f64))
                        .help("Magnetic field [G]"),
                )
                .arg(
                    Arg::new("density")
                        .long("density")
                        .value_parser(value_parser!(f64))
                        .help("Electron density [cm^-3]"),
                )
                .arg(
                    Arg::new("z")
                        .long("z")
                        .default_value("1")
                        .value_parser(value_parser!(f64))
                        .help("Ion charge state"),
                )
                .arg(
                    Arg::new("ion-mass")
                        .long("ion-mass")
                        .default_value(DEFAULT_ION_MASS_AMU)
                        .value_parser(value_parser!(f64))
                        .help("Ion mass [amu]"),
                ),
        )
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .help("Path to the configuration file"),
        )
        .get_matches();

    // Initialize feedback
    let logger = simplelog::TermLogger::new(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );

    let pb_manager = MultiProgress::new();

    LogWrapper::new(pb_manager.clone(), logger)
        .try_init()
        .expect("Could not create logging/progress!");

    if let Some(("freq", freq_matches)) = matches.subcommand() {
        if let Err(e) = print_frequencies(freq_matches) {
            log::error!("{e}");
        }
        return;
    }

    // Parse the cli
    let config_path = match matches.get_one::<String>("path") {
        Some(p) => PathBuf::from(p),
        None => {
            log::error!("A configuration path is required, use -p <path>");
            return;
        }
    };

    if let Some(("new", _)) = matches.subcommand() {
        log::info!(
            "Making a template config at {}...",
            config_path.to_string_lossy()
        );
        match Config::default().write_config_file(&config_path) {
            Ok(()) => log::info!("Done."),
            Err(e) => log::error!("Could not write the template config: {e}"),
        }
        return;
    }

    // Load our config
    log::info!("Loading config from {}...", config_path.to_string_lossy());
    let config = match Config::read_config_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    log::info!("Config successfully loaded.");
    log::info!("Number of HDF5 files: {}", config.hdf_files.len());
    match &config.report_directory {
        Some(dir) => log::info!("Report directory: {}", dir.to_string_lossy()),
        None => log::info!("Reports will be printed to the terminal"),
    }
    log::info!("Detailed reports: {}", config.detailed);

    if !config.has_files() {
        log::warn!("No HDF5 files were given in the config, nothing to do.");
        return;
    }
    if !config.is_report_directory_valid() {
        log::error!("The report directory does not exist!");
        return;
    }

    // Setup the progress bar
    let pb = pb_manager.add(ProgressBar::new(config.hdf_files.len() as u64));
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
        pb.set_style(style);
    }

    let mut n_failed = 0;
    for hdf_path in config.hdf_files.iter() {
        pb.set_message(hdf_path.to_string_lossy().to_string());
        // Terminal reports are written while the bar is hidden
        match pb_manager.suspend(|| report_hdf_file(hdf_path, &config)) {
            Ok(Some(report)) => log::info!("Saved report to {}", report.to_string_lossy()),
            Ok(None) => (),
            Err(e) => {
                log::error!("Report of {} failed: {e}", hdf_path.to_string_lossy());
                n_failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish();

    if n_failed > 0 {
        log::warn!("{n_failed} file(s) could not be reported, see the errors above.");
    }
    log::info!("Done.");
}
