//! Writes every chart specification to disk as JSON.
//!
//! The output directory ends up with `summary.json`, `age_groups.json`, one
//! `map_{year}.json` per mortality year and one `incidence_{year}.json` per
//! incidence year.

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{Dashboard, DashboardError};

/// Files written by [`export_charts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub files: Vec<PathBuf>,
}

/// Exports the summary and every chart of `dashboard` into `out_dir`,
/// creating it if needed.
///
/// # Errors
///
/// Returns [`DashboardError`] if the directory or a file cannot be written.
pub fn export_charts(dashboard: &Dashboard, out_dir: &Path) -> Result<ExportReport, DashboardError> {
    std::fs::create_dir_all(out_dir)?;

    let mut report = ExportReport::default();

    write_json(out_dir, "summary.json", dashboard.summary(), &mut report)?;
    write_json(
        out_dir,
        "age_groups.json",
        dashboard.age_group_chart(),
        &mut report,
    )?;

    for &year in dashboard.years() {
        let chart = dashboard.map_chart(year);
        write_json(out_dir, &format!("map_{year}.json"), &chart, &mut report)?;
    }

    for (year, chart) in dashboard
        .yearly_series()
        .years()
        .into_iter()
        .zip(dashboard.incidence_charts())
    {
        write_json(out_dir, &format!("incidence_{year}.json"), chart, &mut report)?;
    }

    log::info!(
        "Exported {} files to {}",
        report.files.len(),
        out_dir.display()
    );

    Ok(report)
}

fn write_json<T: Serialize + ?Sized>(
    dir: &Path,
    name: &str,
    value: &T,
    report: &mut ExportReport,
) -> Result<(), DashboardError> {
    let path = dir.join(name);
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    log::debug!("Wrote {}", path.display());
    report.files.push(path);
    Ok(())
}
