// src/pairs/io.rs
use std::{
    fs,
    io::{BufWriter, ErrorKind, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use tempfile::NamedTempFile;

use super::{AllowedSet, record::RecordFormat};
use crate::{
    config::{ParseMode, SaveMode, StoreOptions},
    error::PairsError,
    tokens::{ALL_KINDS, N_KINDS},
};

/// All pairs disallowed; the state before any file has been read.
pub fn initialize() -> AllowedSet {
    AllowedSet::new()
}

// -------------------- text records --------------------

/// What a parse saw, line by line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub accepted: usize,
    pub blank: usize,
    pub malformed: usize,
    pub unknown: usize,
}

impl ParseReport {
    pub fn skipped(&self) -> usize {
        self.malformed + self.unknown
    }
}

/// Parses the text of a pairs file.
///
/// In [`ParseMode::Permissive`] malformed lines and unknown names are
/// counted and skipped. In [`ParseMode::Strict`] the first one is returned
/// as a [`PairsError::Line`].
pub fn parse_pairs(
    text: &str,
    format: &RecordFormat,
    mode: ParseMode,
) -> Result<(AllowedSet, ParseReport), PairsError> {
    let mut set = initialize();
    let mut report = ParseReport::default();

    for (i, line) in text.lines().enumerate() {
        match format.parse_record(line) {
            Ok(Some(pair)) => {
                set.allow(pair);
                report.accepted += 1;
            }
            Ok(None) => report.blank += 1,
            Err(e) if mode == ParseMode::Strict => {
                return Err(PairsError::Line {
                    line: i + 1,
                    source: Box::new(e),
                });
            }
            Err(e) => {
                log::debug!("skipping line {}: {e}", i + 1);
                match e {
                    PairsError::UnknownToken { .. } => report.unknown += 1,
                    _ => report.malformed += 1,
                }
            }
        }
    }

    Ok((set, report))
}

/// One record per allowed pair, row-major, newline-terminated.
pub fn render_pairs(set: &AllowedSet, format: &RecordFormat) -> String {
    let lines: Vec<String> = set.allowed().map(|p| format.format_record(p)).collect();
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Loads `path` with default options. A missing file is an empty set.
pub fn load(path: impl AsRef<Path>) -> Result<AllowedSet, PairsError> {
    let options = StoreOptions::default().with_path(path);
    load_with(&options.path, &options)
}

/// Loads `path` using the format and parse mode from `options`.
pub fn load_with(path: impl AsRef<Path>, options: &StoreOptions) -> Result<AllowedSet, PairsError> {
    load_report(path.as_ref(), options).map(|(set, _)| set)
}

pub(crate) fn load_report(
    path: &Path,
    options: &StoreOptions,
) -> Result<(AllowedSet, ParseReport), PairsError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("{} not found; starting with no allowed pairs", path.display());
            return Ok((initialize(), ParseReport::default()));
        }
        Err(source) => {
            return Err(PairsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let (set, report) = parse_pairs(&text, &options.format, options.parse_mode)?;
    log::info!(
        "loaded {} allowed pairs from {} ({} lines skipped)",
        set.count_allowed(),
        path.display(),
        report.skipped()
    );
    Ok((set, report))
}

/// Overwrites `path` with every allowed pair, using default options.
pub fn save(path: impl AsRef<Path>, set: &AllowedSet) -> Result<(), PairsError> {
    save_with(path, set, &StoreOptions::default())
}

/// Overwrites `path` using the format and save mode from `options`.
pub fn save_with(
    path: impl AsRef<Path>,
    set: &AllowedSet,
    options: &StoreOptions,
) -> Result<(), PairsError> {
    let path = path.as_ref();
    let text = render_pairs(set, &options.format);
    write_bytes(path, text.as_bytes(), options.save_mode)?;
    log::debug!(
        "wrote {} records to {} ({:?})",
        set.count_allowed(),
        path.display(),
        options.save_mode
    );
    Ok(())
}

fn write_bytes(path: &Path, bytes: &[u8], mode: SaveMode) -> Result<(), PairsError> {
    let written = match mode {
        SaveMode::Truncate => write_truncate(path, bytes),
        SaveMode::Atomic => write_atomic(path, bytes),
    };
    written.map_err(|source| PairsError::Persistence {
        path: path.to_path_buf(),
        source,
    })
}

fn write_truncate(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let f = fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    w.write_all(bytes)?;
    w.flush()
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// -------------------- JSON interchange --------------------

#[serde_as]
#[derive(Serialize, Deserialize)]
struct MatrixDisk {
    kinds: Vec<String>,
    #[serde_as(as = "[_; N_KINDS]")]
    rows: [u32; N_KINDS],
}

impl From<&AllowedSet> for MatrixDisk {
    fn from(set: &AllowedSet) -> Self {
        Self {
            kinds: ALL_KINDS.iter().map(|k| k.name().to_string()).collect(),
            rows: *set.rows(),
        }
    }
}

impl MatrixDisk {
    fn into_set(self) -> Result<AllowedSet, PairsError> {
        let same_catalog = self.kinds.len() == N_KINDS
            && self.kinds.iter().zip(ALL_KINDS).all(|(a, k)| a == k.name());
        if !same_catalog {
            return Err(PairsError::CatalogMismatch {
                expected: N_KINDS,
                found: self.kinds,
            });
        }
        Ok(AllowedSet::from_rows(self.rows))
    }
}

/// Writes the matrix as `{ "kinds": [...], "rows": [...] }`, one bit mask per row.
pub fn save_json(path: impl AsRef<Path>, set: &AllowedSet) -> Result<(), PairsError> {
    save_json_with(path, set, &StoreOptions::default())
}

/// Like [`save_json`], honouring `options.save_mode`.
pub fn save_json_with(
    path: impl AsRef<Path>,
    set: &AllowedSet,
    options: &StoreOptions,
) -> Result<(), PairsError> {
    let path = path.as_ref();
    let mut bytes = serde_json::to_vec_pretty(&MatrixDisk::from(set))?;
    bytes.push(b'\n');
    write_bytes(path, &bytes, options.save_mode)?;
    log::debug!(
        "wrote JSON matrix with {} allowed pairs to {}",
        set.count_allowed(),
        path.display()
    );
    Ok(())
}

pub fn load_json_bytes(data: &[u8]) -> Result<AllowedSet, PairsError> {
    serde_json::from_slice::<MatrixDisk>(data)?.into_set()
}
