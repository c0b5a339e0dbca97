use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::OffsetDateTime;

use super::config::Config;
use super::digitizer::{Connection, DigitizerMap};
use super::error::OverviewError;
use super::file_info::{FileInfo, LapdFile};
use super::hdf_map::HdfMap;

/// Column at which the found column of a status line starts
const FOUND_COLUMN: usize = 54;
const FOUND_WIDTH: usize = 7;

/// Column widths of the digitizer connection table
const CONNECTION_WIDTH: usize = 51;
const BIT_WIDTH: usize = 5;
const CLOCK_WIDTH: usize = 13;
const NSHOTNUM_WIDTH: usize = 10;
const NT_WIDTH: usize = 10;
const SHOT_AVE_WIDTH: usize = 11;

/// Format one line of the report tree. The item is indented with tree branches and padded so
/// that the found and note columns line up across the report.
pub fn status_line(item: &str, found: &str, note: &str, indent: usize) -> String {
    let prefix = match indent {
        0 => String::new(),
        _ => format!("{}+-- ", "|   ".repeat(indent - 1)),
    };
    let item = format!("{prefix}{item} ");
    format!("{item:<FOUND_COLUMN$} {found:<FOUND_WIDTH$}{note}")
}

fn opt_string<T: ToString>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::from("None"),
    }
}

/// The date the report was generated, in local time when the offset is known
fn report_date() -> Result<String, OverviewError> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let format = format_description!(
        "[month padding:none]/[day padding:none]/[year] [hour repr:12 padding:none]:[minute]:[second] [period]"
    );
    Ok(now.format(format)?)
}

/// Human readable overview of a mapped LaPD file
#[derive(Debug)]
pub struct HdfOverview<'a> {
    file: &'a LapdFile,
    map: &'a HdfMap,
    info: FileInfo,
}

impl<'a> HdfOverview<'a> {
    pub fn new(file: &'a LapdFile, map: &'a HdfMap) -> Result<Self, OverviewError> {
        Ok(Self {
            file,
            map,
            info: file.info()?,
        })
    }

    /// Print the full report to the terminal
    pub fn print(&self) -> Result<(), OverviewError> {
        let mut out = std::io::stdout().lock();
        self.report_full(&mut out)
    }

    /// Save the full report to a text file. If no path is given the report is written next to
    /// the HDF5 file, with the same name and a .txt extension. Returns the path written to
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, OverviewError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => self.file.path().with_extension("txt"),
        };
        let mut out = BufWriter::new(File::create(&path)?);
        self.report_full(&mut out)?;
        out.flush()?;
        log::info!("Saved overview to {}", path.to_string_lossy());
        Ok(path)
    }

    pub fn report_full<W: Write>(&self, out: &mut W) -> Result<(), OverviewError> {
        self.write_report(out, true)
    }

    /// Write the report, with or without the detailed device reports
    pub fn write_report<W: Write>(&self, out: &mut W, detailed: bool) -> Result<(), OverviewError> {
        self.report_header(out)?;
        self.report_general(out)?;
        self.report_discovery(out)?;
        if detailed {
            self.report_details(out)?;
        }
        Ok(())
    }

    pub fn report_header<W: Write>(&self, out: &mut W) -> Result<(), OverviewError> {
        writeln!(out, "{}", "=".repeat(72))?;
        writeln!(out, "{} Overview", self.info.filename)?;
        writeln!(
            out,
            "Generated by libbapsf_hdf (v{})",
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(out, "Generated date: {}", report_date()?)?;
        writeln!(out, "{}\n\n", "=".repeat(72))?;
        Ok(())
    }

    pub fn report_general<W: Write>(&self, out: &mut W) -> Result<(), OverviewError> {
        let info = &self.info;
        writeln!(out, "Filename:     {}", info.filename)?;
        writeln!(out, "Abs. Path:    {}", info.absolute_path.to_string_lossy())?;
        writeln!(
            out,
            "File size:    {}",
            human_bytes::human_bytes(info.size_bytes as f64)
        )?;
        writeln!(
            out,
            "LaPD version: {}",
            info.lapd_version.as_deref().unwrap_or("unknown")
        )?;
        writeln!(out, "Investigator: {}", info.exp.investigator)?;
        writeln!(out, "Run Date:     {}", info.run.run_date)?;

        writeln!(out, "\nExp. and Run Structure:")?;
        writeln!(out, "  (set)  {}", info.exp.exp_set_name)?;
        writeln!(out, "  (exp)  +-- {}", info.exp.exp_name)?;
        writeln!(out, "  (run)  |   +-- {}", info.run.run_name)?;

        writeln!(out, "\nRun Description:")?;
        for line in info.run.run_description.lines() {
            writeln!(out, "    {line}")?;
        }

        writeln!(out, "\nExp. Description:")?;
        for line in info.exp.exp_description.lines() {
            writeln!(out, "    {line}")?;
        }
        Ok(())
    }

    pub fn report_discovery<W: Write>(&self, out: &mut W) -> Result<(), OverviewError> {
        writeln!(out, "\n\nDiscovery Report")?;
        writeln!(out, "----------------\n")?;
        self.msi_discovery(out)?;
        self.data_discovery(out)
    }

    fn msi_discovery<W: Write>(&self, out: &mut W) -> Result<(), OverviewError> {
        let found = match self.map.has_msi_group() {
            true => "found",
            false => "missing",
        };
        writeln!(out, "{}", status_line("MSI/", found, "", 0))?;
        let item = format!("diagnostics ({})", self.map.msi.len());
        writeln!(out, "{}", status_line(&item, "", "", 1))?;
        for name in self.map.msi.keys() {
            writeln!(out, "{}", status_line(name, "", "", 2))?;
        }
        Ok(())
    }

    fn data_discovery<W: Write>(&self, out: &mut W) -> Result<(), OverviewError> {
        let found = match self.map.has_data_group() {
            true => "found",
            false => "missing",
        };
        writeln!(out, "{}", status_line("Raw data + config/", found, "", 0))?;

        let found = match self.map.has_data_run_sequence {
            true => "",
            false => "not mapped",
        };
        writeln!(out, "{}", status_line("Data run sequence", found, "", 1))?;

        let item = format!("digitizers ({})", self.map.digitizers.len());
        writeln!(out, "{}", status_line(&item, "", "", 1))?;
        for name in self.map.digitizers.keys() {
            writeln!(out, "{}", status_line(&self.digitizer_label(name), "", "", 2))?;
        }

        let item = format!("control devices ({})", self.map.controls.len());
        writeln!(out, "{}", status_line(&item, "", "", 1))?;
        for name in self.map.controls.keys() {
            writeln!(out, "{}", status_line(name, "", "", 2))?;
        }

        let item = format!("Unknowns ({})", self.map.unknowns.len());
        writeln!(out, "{}", status_line(&item, "aka unmapped", "", 0))?;
        for unknown in self.map.unknowns.iter() {
            writeln!(out, "{}", status_line(unknown, "", "", 1))?;
        }
        Ok(())
    }

    fn digitizer_label(&self, name: &str) -> String {
        match self.map.main_digitizer() {
            Some(main) if main.device_name == name => format!("{name} (main)"),
            _ => name.to_string(),
        }
    }

    pub fn report_details<W: Write>(&self, out: &mut W) -> Result<(), OverviewError> {
        writeln!(out, "\n\nDetailed Reports")?;
        writeln!(out, "-----------------")?;
        self.report_digitizers(out, None)?;
        self.report_controls(out, None)?;
        self.report_msi(out, None)
    }

    /// Report a single digitizer, or all of them if the name is None or unknown
    pub fn report_digitizers<W: Write>(
        &self,
        out: &mut W,
        name: Option<&str>,
    ) -> Result<(), OverviewError> {
        let name = name.filter(|n| self.map.digitizers.contains_key(*n));
        write_title(out, "Digitizer Report", name)?;

        for (key, digi) in self.map.digitizers.iter() {
            if name.is_some_and(|n| n != key.as_str()) {
                continue;
            }
            writeln!(out, "{}", status_line(&self.digitizer_label(key), "", "", 0))?;
            let adcs: Vec<String> = digi.adcs().iter().map(|a| a.to_string()).collect();
            writeln!(
                out,
                "{}",
                status_line(&format!("adc's:  {adcs:?}"), "", "", 1)
            )?;
            report_digitizer_configs(out, digi)?;
        }
        Ok(())
    }

    /// Report a single control device, or all of them if the name is None or unknown
    pub fn report_controls<W: Write>(
        &self,
        out: &mut W,
        name: Option<&str>,
    ) -> Result<(), OverviewError> {
        let name = name.filter(|n| self.map.controls.contains_key(*n));
        write_title(out, "Control Device Report", name)?;

        for (key, control) in self.map.controls.iter() {
            if name.is_some_and(|n| n != key.as_str()) {
                continue;
            }
            writeln!(out, "{}", status_line(&control.device_name, "", "", 0))?;
            let item = format!("path:     {}", control.group_path);
            writeln!(out, "{}", status_line(&item, "", "", 1))?;
            let item = format!("contype:  {:?}", control.contype);
            writeln!(out, "{}", status_line(&item, "", "", 1))?;

            let item = format!("Configurations Detected ({})", control.configs.len());
            writeln!(out, "{}", status_line(&item, "", "", 1))?;
            for (config_name, config) in control.configs.iter() {
                writeln!(out, "{}", status_line(config_name, "", "", 2))?;
                write_yaml_lines(out, config, 3)?;
            }
        }
        Ok(())
    }

    /// Report a single MSI diagnostic, or all of them if the name is None or unknown
    pub fn report_msi<W: Write>(
        &self,
        out: &mut W,
        name: Option<&str>,
    ) -> Result<(), OverviewError> {
        let name = name.filter(|n| self.map.msi.contains_key(*n));
        write_title(out, "MSI Diagnostic Report", name)?;

        for (key, diag) in self.map.msi.iter() {
            if name.is_some_and(|n| n != key.as_str()) {
                continue;
            }
            writeln!(out, "{}", status_line(&diag.device_name, "", "", 0))?;
            let item = format!("path:  {}", diag.group_path);
            writeln!(out, "{}", status_line(&item, "", "", 1))?;
            writeln!(out, "{}", status_line("configs", "", "", 1))?;
            write_yaml_lines(out, &diag.configs, 2)?;
        }
        Ok(())
    }
}

/// Map an HDF5 file and report on it as the configuration asks: saved to the report directory
/// when one is set, printed to the terminal otherwise. Returns the path of a saved report
pub fn report_hdf_file(hdf_path: &Path, config: &Config) -> Result<Option<PathBuf>, OverviewError> {
    let file = LapdFile::open(hdf_path)?;
    let map = HdfMap::new(&file)?;
    let overview = HdfOverview::new(&file, &map)?;

    match config.report_path(hdf_path) {
        Some(report_path) => {
            let mut out = BufWriter::new(File::create(&report_path)?);
            overview.write_report(&mut out, config.detailed)?;
            out.flush()?;
            Ok(Some(report_path))
        }
        None => {
            let mut out = std::io::stdout().lock();
            overview.write_report(&mut out, config.detailed)?;
            Ok(None)
        }
    }
}

fn write_title<W: Write>(
    out: &mut W,
    title: &str,
    name: Option<&str>,
) -> Result<(), OverviewError> {
    let title = match name {
        Some(n) => format!("{title} ({n} ONLY)"),
        None => title.to_string(),
    };
    writeln!(out, "\n\n{title}")?;
    writeln!(out, "{}\n", "^".repeat(title.len()))?;
    Ok(())
}

fn write_yaml_lines<W: Write, T: serde::Serialize>(
    out: &mut W,
    value: &T,
    indent: usize,
) -> Result<(), OverviewError> {
    let yaml = serde_yaml::to_string(value)?;
    for line in yaml.lines() {
        writeln!(out, "{}", status_line(line, "", "", indent))?;
    }
    Ok(())
}

fn connection_line(line_indent: &str, conn: &Connection) -> String {
    let settings = &conn.settings;
    format!(
        "{:<CONNECTION_WIDTH$}{:<BIT_WIDTH$}{:<CLOCK_WIDTH$}{:<NSHOTNUM_WIDTH$}{:<NT_WIDTH$}{:<SHOT_AVE_WIDTH$}{}",
        format!("{line_indent}({}, {:?})", conn.board, conn.channels),
        settings.bit,
        opt_string(&settings.clock_rate),
        opt_string(&settings.nshotnum),
        opt_string(&settings.nt),
        opt_string(&settings.shot_average),
        opt_string(&settings.sample_average),
    )
}

fn report_digitizer_configs<W: Write>(
    out: &mut W,
    digi: &DigitizerMap,
) -> Result<(), OverviewError> {
    let nconfigs = digi.configs.len();
    let item = format!("Configurations Detected ({nconfigs})");
    if nconfigs == 0 {
        writeln!(out, "{}", status_line(&item, "", "", 1))?;
        return Ok(());
    }

    let nactive = digi.n_active_configs();
    let note = format!("({nactive} active, {} inactive)", nconfigs - nactive);
    writeln!(out, "{}", status_line(&item, "", &note, 1))?;

    let line_indent = format!("{}+-- ", "|   ".repeat(4));
    for (config_name, config) in digi.configs.iter() {
        let note = match config.active {
            true => "active",
            false => "NOT active",
        };
        writeln!(out, "{}", status_line(config_name, "", note, 2))?;

        let adcs: Vec<String> = config.adcs.iter().map(|a| a.to_string()).collect();
        let item = format!("adc's (active):  {adcs:?}");
        writeln!(out, "{}", status_line(&item, "", "", 3))?;
        let item = format!("path: {}", config.group_path);
        writeln!(out, "{}", status_line(&item, "", "", 3))?;

        for (adc, connections) in config.connections.iter() {
            let item = format!("{adc} adc connections");
            writeln!(out, "{}", status_line(&item, "", "", 3))?;
            writeln!(
                out,
                "{:<CONNECTION_WIDTH$}{:<BIT_WIDTH$}{:<CLOCK_WIDTH$}{:<NSHOTNUM_WIDTH$}{:<NT_WIDTH$}{:<SHOT_AVE_WIDTH$}sample ave.",
                format!("{line_indent}(brd, [ch, ...])"),
                "bit",
                "clock rate",
                "nshotnum",
                "nt",
                "shot ave."
            )?;
            for conn in connections.iter() {
                writeln!(out, "{}", connection_line(&line_indent, conn))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HdfMapError;
    use crate::test_fixtures::{write_lapd_1dot1, write_lapd_1dot2};

    fn render(path: &Path, detailed: bool) -> String {
        let file = LapdFile::open(path).unwrap();
        let map = HdfMap::new(&file).unwrap();
        let overview = HdfOverview::new(&file, &map).unwrap();
        let mut out: Vec<u8> = Vec::new();
        overview.write_report(&mut out, detailed).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_status_line() {
        let line = status_line("MSI/", "found", "", 0);
        assert_eq!(line.len(), 62);
        assert!(line.starts_with("MSI/ "));
        assert_eq!(&line[55..], "found  ");

        let line = status_line("config01", "", "active", 2);
        assert!(line.starts_with("|   +-- config01 "));
        assert!(line.ends_with("active"));
        assert_eq!(line.find("active"), Some(62));

        assert!(status_line("Heater", "", "", 1).starts_with("+-- Heater "));
    }

    #[test]
    fn test_report_1dot2() {
        let dir = tempfile::tempdir().unwrap();
        let report = render(&write_lapd_1dot2(dir.path()), true);

        assert!(report.starts_with(&"=".repeat(72)));
        assert!(report.contains("lapd_1dot2.hdf5 Overview"));
        assert!(report.contains("LaPD version: 1.2"));
        assert!(report.contains("+-- diagnostics (5)"));
        assert!(report.contains("|   +-- SIS crate (main)"));
        assert!(report.contains("+-- control devices (2)"));
        assert!(report.contains("Unknowns (2)"));
        assert!(report.contains("+-- /MSI/Mystery"));
        assert!(report.contains("Configurations Detected (2)"));
        assert!(report.contains("(1 active, 1 inactive)"));
        assert!(report.contains("SIS 3305 adc connections"));
        assert!(report.contains("MSI Diagnostic Report"));
        assert!(report.contains("contype:  Motion"));

        let header = report
            .lines()
            .find(|l| l.contains("(brd, [ch, ...])"))
            .unwrap();
        assert_eq!(header.find("bit"), Some(51));
        assert_eq!(header.find("clock rate"), Some(56));
        assert!(header.ends_with("sample ave."));

        let row = report.lines().find(|l| l.contains("(1, [1, 2])")).unwrap();
        assert_eq!(&row[51..56], "16   ");
        assert_eq!(&row[56..69], "100.0 MHz    ");
        assert!(row.ends_with('2'));
    }

    #[test]
    fn test_report_1dot1_brief() {
        let dir = tempfile::tempdir().unwrap();
        let report = render(&write_lapd_1dot1(dir.path()), false);

        assert!(report.contains("Investigator: Everson"));
        assert!(report.contains("  (exp)  +-- Alfven waves"));
        assert!(report.contains("    line one\n    line two"));
        assert!(report.contains("MSI/"));
        assert!(report.contains("missing"));
        assert!(report.contains("not mapped"));
        assert!(!report.contains("Detailed Reports"));
    }

    #[test]
    fn test_report_name_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_lapd_1dot2(dir.path());
        let file = LapdFile::open(&path).unwrap();
        let map = HdfMap::new(&file).unwrap();
        let overview = HdfOverview::new(&file, &map).unwrap();

        let mut out: Vec<u8> = Vec::new();
        overview.report_msi(&mut out, Some("Heater")).unwrap();
        let report = String::from_utf8(out).unwrap();
        assert!(report.contains("MSI Diagnostic Report (Heater ONLY)"));
        assert!(!report.contains("Discharge"));

        let mut out: Vec<u8> = Vec::new();
        overview.report_controls(&mut out, Some("Nope")).unwrap();
        let report = String::from_utf8(out).unwrap();
        assert!(!report.contains("ONLY"));
        assert!(report.contains("6K Compumotor"));
        assert!(report.contains("Waveform"));
    }

    #[test]
    fn test_report_hdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_lapd_1dot2(dir.path());
        let reports = tempfile::tempdir().unwrap();
        let config = Config {
            hdf_files: vec![path.clone()],
            report_directory: Some(reports.path().to_path_buf()),
            detailed: false,
        };

        let saved = report_hdf_file(&path, &config).unwrap();
        assert_eq!(saved, Some(reports.path().join("lapd_1dot2.txt")));
        let text = std::fs::read_to_string(reports.path().join("lapd_1dot2.txt")).unwrap();
        assert!(text.contains("Discovery Report"));
        assert!(!text.contains("Detailed Reports"));

        let plain = crate::test_fixtures::write_plain_file(dir.path());
        assert!(matches!(
            report_hdf_file(&plain, &config),
            Err(OverviewError::MapError(_))
        ));

        let unknown = crate::test_fixtures::write_unknown_version(dir.path());
        assert!(matches!(
            report_hdf_file(&unknown, &config),
            Err(OverviewError::MapError(HdfMapError::UnknownVersion(_)))
        ));
        assert!(!reports.path().join("lapd_2dot0.txt").exists());
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_lapd_1dot1(dir.path());
        let file = LapdFile::open(&path).unwrap();
        let map = HdfMap::new(&file).unwrap();
        let overview = HdfOverview::new(&file, &map).unwrap();

        let saved = overview.save(None).unwrap();
        assert_eq!(saved, dir.path().join("lapd_1dot1.txt"));
        let text = std::fs::read_to_string(&saved).unwrap();
        assert!(text.contains("Digitizer Report"));

        let custom = dir.path().join("custom.txt");
        assert_eq!(overview.save(Some(&custom)).unwrap(), custom);
        assert!(custom.exists());
    }
}
