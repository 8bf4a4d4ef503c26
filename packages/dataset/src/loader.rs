//! Header-driven CSV parsing into typed records.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use malaria_dash_dataset_models::{
    AgeDeathRecord, DatasetKind, Datasets, IncidenceRecord, MortalityRecord, age_death_columns,
    incidence_columns, mortality_columns,
};

use crate::DatasetError;
use crate::progress::ProgressCallback;

/// Locations of the three dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub mortality: PathBuf,
    pub age_deaths: PathBuf,
    pub incidence: PathBuf,
}

impl DatasetPaths {
    /// Paths using each dataset's default file name inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            mortality: dir.join(DatasetKind::Mortality.default_file_name()),
            age_deaths: dir.join(DatasetKind::AgeDeaths.default_file_name()),
            incidence: dir.join(DatasetKind::Incidence.default_file_name()),
        }
    }

    /// Path of the given dataset.
    #[must_use]
    pub fn path(&self, kind: DatasetKind) -> &Path {
        match kind {
            DatasetKind::Mortality => &self.mortality,
            DatasetKind::AgeDeaths => &self.age_deaths,
            DatasetKind::Incidence => &self.incidence,
        }
    }
}

/// Loads all three datasets from disk, advancing `progress` once per file.
///
/// # Errors
///
/// Returns [`DatasetError`] for the first dataset that cannot be opened or
/// parsed.
pub fn load_all(
    paths: &DatasetPaths,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Datasets, DatasetError> {
    progress.set_total(DatasetKind::all().len() as u64);

    progress.set_message(format!("Loading {}", DatasetKind::Mortality));
    let mortality = load_mortality(open(DatasetKind::Mortality, &paths.mortality)?)?;
    progress.inc(1);

    progress.set_message(format!("Loading {}", DatasetKind::AgeDeaths));
    let age_deaths = load_age_deaths(open(DatasetKind::AgeDeaths, &paths.age_deaths)?)?;
    progress.inc(1);

    progress.set_message(format!("Loading {}", DatasetKind::Incidence));
    let incidence = load_incidence(open(DatasetKind::Incidence, &paths.incidence)?)?;
    progress.inc(1);

    progress.finish(format!(
        "Loaded {} mortality, {} age, {} incidence rows",
        mortality.len(),
        age_deaths.len(),
        incidence.len()
    ));

    Ok(Datasets {
        mortality,
        age_deaths,
        incidence,
    })
}

fn open(kind: DatasetKind, path: &Path) -> Result<File, DatasetError> {
    log::debug!("Opening {kind} dataset at {}", path.display());
    File::open(path).map_err(|source| DatasetError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Parses the mortality dataset.
///
/// # Errors
///
/// Returns [`DatasetError`] if a required column is missing or a cell cannot
/// be parsed.
pub fn load_mortality<R: Read>(reader: R) -> Result<Vec<MortalityRecord>, DatasetError> {
    parse_rows(DatasetKind::Mortality, reader, |row| {
        Ok(MortalityRecord {
            entity: row.text(mortality_columns::ENTITY)?,
            code: row.optional_text(mortality_columns::CODE),
            year: row.year(mortality_columns::YEAR)?,
            rate: row.number(mortality_columns::RATE)?,
        })
    })
}

/// Parses the deaths-by-age dataset.
///
/// # Errors
///
/// Returns [`DatasetError`] if a required column is missing or a cell cannot
/// be parsed.
pub fn load_age_deaths<R: Read>(reader: R) -> Result<Vec<AgeDeathRecord>, DatasetError> {
    parse_rows(DatasetKind::AgeDeaths, reader, |row| {
        Ok(AgeDeathRecord {
            entity: row.text(age_death_columns::ENTITY)?,
            code: row.optional_text(age_death_columns::CODE),
            year: row.year(age_death_columns::YEAR)?,
            age_group: row.text(age_death_columns::AGE_GROUP)?,
            deaths: row.number(age_death_columns::DEATHS)?,
        })
    })
}

/// Parses the incidence dataset.
///
/// # Errors
///
/// Returns [`DatasetError`] if a required column is missing or a cell cannot
/// be parsed.
pub fn load_incidence<R: Read>(reader: R) -> Result<Vec<IncidenceRecord>, DatasetError> {
    parse_rows(DatasetKind::Incidence, reader, |row| {
        Ok(IncidenceRecord {
            entity: row.text(incidence_columns::ENTITY)?,
            code: row.optional_text(incidence_columns::CODE),
            year: row.year(incidence_columns::YEAR)?,
            incidence: row.number(incidence_columns::INCIDENCE)?,
        })
    })
}

/// Reads the header row, checks every required column is present, then maps
/// each data row through `parse`.
fn parse_rows<R, T, F>(kind: DatasetKind, reader: R, parse: F) -> Result<Vec<T>, DatasetError>
where
    R: Read,
    F: Fn(&Row<'_>) -> Result<T, DatasetError>,
{
    let csv_err = |source| DatasetError::Csv { kind, source };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(kind, reader.headers().map_err(csv_err)?)?;

    let mut records = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut row_number: u64 = 0;

    while reader.read_record(&mut record).map_err(csv_err)? {
        row_number += 1;
        let row = Row {
            kind,
            number: row_number,
            record: &record,
            columns: &columns,
        };
        records.push(parse(&row)?);
    }

    log::info!("Parsed {} {kind} records", records.len());

    Ok(records)
}

/// Maps required header names to their positions in the file.
struct ColumnIndex {
    positions: BTreeMap<&'static str, usize>,
}

impl ColumnIndex {
    fn from_headers(kind: DatasetKind, headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let trimmed: Vec<&str> = headers.iter().map(str::trim).collect();
        let mut positions = BTreeMap::new();

        for column in kind.required_columns() {
            let idx = trimmed.iter().position(|h| h == column).ok_or_else(|| {
                DatasetError::MissingColumn {
                    kind,
                    column: (*column).to_string(),
                }
            })?;
            positions.insert(*column, idx);
        }

        Ok(Self { positions })
    }
}

/// One data row with typed, column-name based accessors.
struct Row<'a> {
    kind: DatasetKind,
    number: u64,
    record: &'a csv::StringRecord,
    columns: &'a ColumnIndex,
}

impl Row<'_> {
    /// Trimmed cell text, or `None` when the row is too short to reach the
    /// column.
    fn cell(&self, column: &str) -> Option<&str> {
        self.columns
            .positions
            .get(column)
            .and_then(|&idx| self.record.get(idx))
            .map(str::trim)
    }

    fn raw(&self, column: &str) -> Result<&str, DatasetError> {
        self.cell(column).ok_or_else(|| self.invalid(column, ""))
    }

    fn text(&self, column: &str) -> Result<String, DatasetError> {
        match self.raw(column)? {
            "" => Err(self.invalid(column, "")),
            value => Ok(value.to_string()),
        }
    }

    fn optional_text(&self, column: &str) -> Option<String> {
        self.cell(column)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn year(&self, column: &str) -> Result<i32, DatasetError> {
        let value = self.raw(column)?;
        value.parse().map_err(|_| self.invalid(column, value))
    }

    fn number(&self, column: &str) -> Result<f64, DatasetError> {
        let value = self.raw(column)?;
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(self.invalid(column, value)),
        }
    }

    fn invalid(&self, column: &str, value: &str) -> DatasetError {
        DatasetError::InvalidValue {
            kind: self.kind,
            row: self.number,
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MORTALITY_CSV: &str = "\
Entity,Code,Year,\"Deaths - Malaria - Sex: Both - Age: Age-standardized (Rate) (per 100,000 people)\"
Afghanistan,AFG,1990,6.80291399083832
Sub-Saharan Africa,,1990,142.5
";

    const AGE_CSV: &str = "\
,entity,code,year,age_group,deaths
1,Afghanistan,AFG,1990,Under 5,184.606
2,Afghanistan,AFG,1991,Under 5,191.658
";

    const INCIDENCE_CSV: &str = "\
Entity,Code,Year,\"Incidence of malaria (per 1,000 population at risk) (per 1,000 population at risk)\"
Algeria,DZA,2000,0.037
Angola,AGO,2000,298.1
";

    #[test]
    fn parses_mortality_rows() {
        let rows = load_mortality(MORTALITY_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].entity, "Afghanistan");
        assert_eq!(rows[0].code.as_deref(), Some("AFG"));
        assert_eq!(rows[0].year, 1990);
        assert!((rows[0].rate - 6.802_913_990_838_32).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_code_is_region() {
        let rows = load_mortality(MORTALITY_CSV.as_bytes()).unwrap();
        assert_eq!(rows[1].code, None);
        assert!(!rows[1].is_country());
    }

    #[test]
    fn ignores_unnamed_index_column() {
        let rows = load_age_deaths(AGE_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].age_group, "Under 5");
        assert_eq!(rows[1].year, 1991);
        assert!((rows[1].deaths - 191.658).abs() < 1e-9);
    }

    #[test]
    fn parses_incidence_rows() {
        let rows = load_incidence(INCIDENCE_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].entity, "Angola");
        assert!((rows[1].incidence - 298.1).abs() < 1e-9);
    }

    #[test]
    fn column_order_does_not_matter() {
        let csv = "\
Year,\"Incidence of malaria (per 1,000 population at risk) (per 1,000 population at risk)\",Entity,Code
2000,12.5,Benin,BEN
";
        let rows = load_incidence(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].entity, "Benin");
        assert_eq!(rows[0].year, 2000);
    }

    #[test]
    fn missing_column_fails() {
        let csv = "Entity,Code,Year,Rate\nAfghanistan,AFG,1990,6.8\n";
        let err = load_mortality(csv.as_bytes()).unwrap_err();
        match err {
            DatasetError::MissingColumn { kind, column } => {
                assert_eq!(kind, DatasetKind::Mortality);
                assert_eq!(column, mortality_columns::RATE);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_year_reports_row_and_column() {
        let csv = "\
,entity,code,year,age_group,deaths
1,Afghanistan,AFG,1990,Under 5,184.606
2,Afghanistan,AFG,nineteen,Under 5,191.658
";
        let err = load_age_deaths(csv.as_bytes()).unwrap_err();
        match err {
            DatasetError::InvalidValue {
                row, column, value, ..
            } => {
                assert_eq!(row, 2);
                assert_eq!(column, "year");
                assert_eq!(value, "nineteen");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_numeric_cell_fails() {
        let csv = "\
Entity,Code,Year,\"Incidence of malaria (per 1,000 population at risk) (per 1,000 population at risk)\"
Algeria,DZA,2000,
";
        assert!(matches!(
            load_incidence(csv.as_bytes()),
            Err(DatasetError::InvalidValue { row: 1, .. })
        ));
    }

    #[test]
    fn truncated_row_fails() {
        let csv = "\
Year,\"Incidence of malaria (per 1,000 population at risk) (per 1,000 population at risk)\",Code,Entity
2000,12.5
";
        match load_incidence(csv.as_bytes()).unwrap_err() {
            DatasetError::InvalidValue {
                row, column, value, ..
            } => {
                assert_eq!(row, 1);
                assert_eq!(column, incidence_columns::ENTITY);
                assert_eq!(value, "");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_age_group_fails() {
        let csv = "\
,entity,code,year,age_group,deaths
1,Afghanistan,AFG,1990,,184.606
";
        assert!(matches!(
            load_age_deaths(csv.as_bytes()),
            Err(DatasetError::InvalidValue { row: 1, ref column, .. }) if column == "age_group"
        ));
    }

    #[test]
    fn header_only_file_is_empty() {
        let csv = "Entity,Code,Year,\"Deaths - Malaria - Sex: Both - Age: Age-standardized (Rate) (per 100,000 people)\"\n";
        assert!(load_mortality(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let paths = DatasetPaths::in_dir(Path::new("/nonexistent/malaria"));
        let err = load_all(&paths, &crate::progress::null_progress()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Io {
                kind: DatasetKind::Mortality,
                ..
            }
        ));
        assert!(err.to_string().contains("malaria_deaths.csv"));
    }

    #[test]
    fn default_paths_use_dataset_file_names() {
        let paths = DatasetPaths::in_dir(Path::new("data"));
        assert_eq!(paths.path(DatasetKind::AgeDeaths), Path::new("data/malaria_deaths_age.csv"));
        assert_eq!(paths.incidence, PathBuf::from("data/malaria_inc.csv"));
    }
}
