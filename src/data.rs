//! Catalogue Loading and Lookup
//!
//! Loads the reference waste catalogue from CSV using Polars and indexes it by
//! normalized item name. Every column is read as text and validated row by
//! row here, so one dirty row costs that row only, never the whole load.
//!
//! Column names drift between dataset generations; each field accepts a small
//! set of header aliases (see `COLUMN_ALIASES`). Rows with more fields than
//! the header and bytes that are not valid UTF-8 are tolerated the same way:
//! the former are skipped as malformed, the latter decoded lossily.

use crate::error::{RecommendError, Result};
use crate::types::{WasteCategory, WasteRecord, NOT_AVAILABLE};
use crate::utils::{clean_field, normalize_key};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Catalogue field → accepted (normalized) header names, in preference order
const COLUMN_ALIASES: &[(Field, &[&str])] = &[
    (Field::ItemName, &["waste_item", "item_name"]),
    (Field::Category, &["category", "material"]),
    (Field::Weight, &["weight_grams"]),
    (Field::Carbon, &["carbon_impact_score", "carbon_saved_g"]),
    (Field::Disposal, &["disposal_type", "disposal_method"]),
    (Field::Recyclable, &["recyclable"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    ItemName,
    Category,
    Weight,
    Carbon,
    Disposal,
    Recyclable,
}

/// Summary of a catalogue load
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Data rows seen (header excluded)
    pub rows_read: usize,
    pub records_loaded: usize,
    /// Rows rejected by validation
    pub skipped: Vec<RecommendError>,
    /// Records whose normalized name was already indexed
    pub duplicate_names: usize,
}

/// Immutable, indexed waste catalogue
#[derive(Debug, Clone)]
pub struct Catalogue {
    /// Records in load order
    records: Vec<WasteRecord>,
    /// Normalized name → index of first occurrence
    index: FxHashMap<String, usize>,
    /// Normalized names in load order, first occurrences only
    names: Vec<String>,
    report: LoadReport,
    /// Backing file, if loaded from disk
    source: Option<PathBuf>,
}

/// Where a load failed: I/O is worth retrying, content is not
enum LoadFailure {
    Io(String),
    Content(String),
}

impl Catalogue {
    /// Load the catalogue from a CSV file
    ///
    /// Fails with `DatasetUnavailable` when the file is missing, unreadable,
    /// lacks a required column, or yields no valid rows.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::load_inner(path).map_err(|failure| match failure {
            LoadFailure::Io(reason) | LoadFailure::Content(reason) => {
                RecommendError::dataset(path.display().to_string(), reason)
            }
        })
    }

    /// Reload from disk during a running session
    ///
    /// I/O failures are retried `retries` times before surfacing as
    /// `Transient`. Content failures surface immediately as
    /// `DatasetUnavailable`.
    pub fn load_with_retry(path: impl AsRef<Path>, retries: usize) -> Result<Self> {
        let path = path.as_ref();
        let mut attempts = 0;

        loop {
            attempts += 1;
            match Self::load_inner(path) {
                Ok(catalogue) => return Ok(catalogue),
                Err(LoadFailure::Content(reason)) => {
                    return Err(RecommendError::dataset(path.display().to_string(), reason));
                }
                Err(LoadFailure::Io(reason)) if attempts > retries => {
                    return Err(RecommendError::Transient { attempts, reason });
                }
                Err(LoadFailure::Io(reason)) => {
                    tracing::warn!(
                        "Catalogue read failed (attempt {}): {}; retrying",
                        attempts,
                        reason
                    );
                }
            }
        }
    }

    /// Load the catalogue from in-memory CSV bytes
    pub fn from_reader(bytes: impl AsRef<[u8]>, source_name: &str) -> Result<Self> {
        Self::from_bytes(bytes.as_ref().to_vec())
            .map_err(|reason| RecommendError::dataset(source_name, reason))
    }

    /// Build a catalogue from already-parsed records
    pub fn from_records(records: Vec<WasteRecord>) -> Self {
        let rows_read = records.len();
        let mut catalogue = Self::index_records(records);
        catalogue.report.rows_read = rows_read;
        catalogue
    }

    fn load_inner(path: &Path) -> std::result::Result<Self, LoadFailure> {
        let bytes = fs::read(path).map_err(|e| LoadFailure::Io(e.to_string()))?;

        let mut catalogue = Self::from_bytes(bytes).map_err(LoadFailure::Content)?;
        catalogue.source = Some(path.to_path_buf());

        tracing::info!(
            "Loaded catalogue {:?}: {} records ({} rows, {} skipped, {} duplicate names)",
            path,
            catalogue.report.records_loaded,
            catalogue.report.rows_read,
            catalogue.report.skipped.len(),
            catalogue.report.duplicate_names,
        );

        Ok(catalogue)
    }

    /// Parse CSV bytes into an all-text frame and validate it
    fn from_bytes(bytes: Vec<u8>) -> std::result::Result<Self, String> {
        let overlong = overlong_rows(&bytes);

        // Ragged lines are cut to the header width here; `overlong` marks them
        // so validation can reject them
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .map_parse_options(|opts| {
                opts.with_truncate_ragged_lines(true)
                    .with_encoding(CsvEncoding::LossyUtf8)
            })
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(|e| e.to_string())?;

        Self::from_frame(&df, &overlong)
    }

    /// Validate rows of an all-text DataFrame into records
    ///
    /// `overlong` maps 1-based data rows to their field count when the source
    /// line had more fields than the header.
    fn from_frame(
        df: &DataFrame,
        overlong: &FxHashMap<usize, usize>,
    ) -> std::result::Result<Self, String> {
        let columns = resolve_columns(df)?;

        let names = text_column(df, &columns, Field::ItemName)?;
        let categories = text_column(df, &columns, Field::Category)?;
        let weights = text_column(df, &columns, Field::Weight)?;
        let carbons = text_column(df, &columns, Field::Carbon)?;
        let disposals = text_column(df, &columns, Field::Disposal)?;
        let recyclables = text_column(df, &columns, Field::Recyclable)?;

        let cell = |col: Option<&StringChunked>, idx: usize| -> Option<String> {
            col.and_then(|c| c.get(idx))
                .map(|s| clean_field(s).to_string())
                .filter(|s| !s.is_empty())
        };

        let mut records = Vec::with_capacity(df.height());
        let mut skipped = Vec::new();

        for idx in 0..df.height() {
            // 1-based data row, header excluded
            let row = idx + 1;
            if let Some(&fields) = overlong.get(&row) {
                let err = RecommendError::MalformedRecord {
                    row,
                    reason: format!("{} fields, header has {}", fields, df.width()),
                };
                tracing::warn!("Skipping catalogue row: {}", err);
                skipped.push(err);
                continue;
            }

            let parsed = parse_row(
                row,
                cell(names, idx),
                cell(categories, idx),
                cell(weights, idx),
                cell(carbons, idx),
                cell(disposals, idx),
                cell(recyclables, idx),
            );

            match parsed {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!("Skipping catalogue row: {}", err);
                    skipped.push(err);
                }
            }
        }

        if records.is_empty() {
            return Err(format!(
                "no valid records ({} rows read, {} skipped)",
                df.height(),
                skipped.len()
            ));
        }

        let mut catalogue = Self::index_records(records);
        catalogue.report.rows_read = df.height();
        catalogue.report.skipped = skipped;
        Ok(catalogue)
    }

    fn index_records(records: Vec<WasteRecord>) -> Self {
        let mut index = FxHashMap::default();
        let mut names = Vec::with_capacity(records.len());
        let mut duplicate_names = 0;

        for (position, record) in records.iter().enumerate() {
            let key = normalize_key(&record.item_name);
            if index.contains_key(&key) {
                tracing::debug!("Duplicate catalogue name '{}' at record {}", key, position);
                duplicate_names += 1;
                continue;
            }
            index.insert(key.clone(), position);
            names.push(key);
        }

        let report = LoadReport {
            rows_read: 0,
            records_loaded: records.len(),
            skipped: Vec::new(),
            duplicate_names,
        };

        Catalogue {
            records,
            index,
            names,
            report,
            source: None,
        }
    }

    /// Exact lookup by normalized name
    pub fn lookup_exact(&self, name: &str) -> Option<&WasteRecord> {
        self.index
            .get(&normalize_key(name))
            .map(|&position| &self.records[position])
    }

    /// First record (load order) whose normalized name contains the substring
    pub fn lookup_contains(&self, substring: &str) -> Option<&WasteRecord> {
        let needle = normalize_key(substring);
        if needle.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|record| normalize_key(&record.item_name).contains(&needle))
    }

    /// Normalized candidate names in load order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn records(&self) -> &[WasteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Backing file, when loaded from disk
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Data rows (1-based, header excluded) with more fields than the header
///
/// Quote-aware; blank lines are not counted as rows.
fn overlong_rows(bytes: &[u8]) -> FxHashMap<usize, usize> {
    let mut field_counts = Vec::new();
    let mut fields = 1;
    let mut in_quotes = false;
    let mut blank = true;

    for &byte in bytes {
        match byte {
            b'"' => {
                in_quotes = !in_quotes;
                blank = false;
            }
            b',' if !in_quotes => {
                fields += 1;
                blank = false;
            }
            b'\n' if !in_quotes => {
                if !blank {
                    field_counts.push(fields);
                }
                fields = 1;
                blank = true;
            }
            b'\r' => {}
            _ => blank = false,
        }
    }
    if !blank {
        field_counts.push(fields);
    }

    let Some((&header, rows)) = field_counts.split_first() else {
        return FxHashMap::default();
    };
    rows.iter()
        .enumerate()
        .filter(|&(_, &count)| count > header)
        .map(|(idx, &count)| (idx + 1, count))
        .collect()
}

/// Text view of a resolved column, None when the field has no column
fn text_column<'a>(
    df: &'a DataFrame,
    columns: &FxHashMap<Field, String>,
    field: Field,
) -> std::result::Result<Option<&'a StringChunked>, String> {
    match columns.get(&field) {
        Some(name) => df
            .column(name)
            .and_then(|c| c.str())
            .map(Some)
            .map_err(|e| format!("column '{}' is not text: {}", name, e)),
        None => Ok(None),
    }
}

/// Map each field to the actual header present in the frame
fn resolve_columns(df: &DataFrame) -> std::result::Result<FxHashMap<Field, String>, String> {
    let headers: Vec<(String, String)> = df
        .get_column_names()
        .into_iter()
        .map(|name| (normalize_key(name.as_str()), name.to_string()))
        .collect();

    let mut resolved = FxHashMap::default();
    for (field, aliases) in COLUMN_ALIASES {
        let found = aliases.iter().find_map(|alias| {
            headers
                .iter()
                .find(|(normalized, _)| normalized == alias)
                .map(|(_, original)| original.clone())
        });
        if let Some(original) = found {
            resolved.insert(*field, original);
        }
    }

    for required in [Field::ItemName, Field::Category] {
        if !resolved.contains_key(&required) {
            let accepted = COLUMN_ALIASES
                .iter()
                .find(|(field, _)| *field == required)
                .map(|(_, aliases)| aliases.join(" | "))
                .unwrap_or_default();
            return Err(format!(
                "missing required column ({}); found {:?}",
                accepted,
                headers.iter().map(|(_, original)| original).collect::<Vec<_>>()
            ));
        }
    }

    Ok(resolved)
}

fn parse_row(
    row: usize,
    item_name: Option<String>,
    category: Option<String>,
    weight: Option<String>,
    carbon: Option<String>,
    disposal: Option<String>,
    recyclable: Option<String>,
) -> Result<WasteRecord> {
    let malformed = |reason: String| RecommendError::MalformedRecord { row, reason };

    let item_name = item_name.ok_or_else(|| malformed("empty item name".to_string()))?;
    let category: WasteCategory = category
        .ok_or_else(|| malformed(format!("'{}' has no category", item_name)))?
        .parse()
        .map_err(|e| malformed(format!("'{}': {}", item_name, e)))?;

    let number = |label: &str, raw: Option<String>| -> Result<Option<f64>> {
        match raw {
            None => Ok(None),
            Some(text) => match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Some(value)),
                _ => Err(malformed(format!(
                    "'{}' has non-numeric {} '{}'",
                    item_name, label, text
                ))),
            },
        }
    };

    let weight_grams = number("weight", weight)?;
    if let Some(w) = weight_grams {
        if w < 0.0 {
            return Err(malformed(format!("'{}' has negative weight {}", item_name, w)));
        }
    }
    let carbon_impact_score = number("carbon impact", carbon)?;

    Ok(WasteRecord {
        item_name,
        category,
        weight_grams,
        carbon_impact_score,
        disposal_type: disposal.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        recyclable: recyclable.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    })
}
