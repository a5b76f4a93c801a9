// src/config.rs
// Store options: where the pairs file lives and how it is read and written.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pairs::record::RecordFormat;

/// Default pairs file, relative to the working directory.
pub const DEFAULT_PATH: &str = "allowed_pairs.txt";

/// How a load treats lines it cannot turn into a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Skip malformed lines and unknown token names.
    #[default]
    Permissive,
    /// Fail on the first malformed line or unknown token name.
    Strict,
}

/// How a save replaces the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// Truncate the target and write in place.
    #[default]
    Truncate,
    /// Write a sibling temp file, then rename it over the target.
    Atomic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    pub path: PathBuf,
    pub format: RecordFormat,
    pub parse_mode: ParseMode,
    pub save_mode: SaveMode,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            format: RecordFormat::default(),
            parse_mode: ParseMode::default(),
            save_mode: SaveMode::default(),
        }
    }
}

impl StoreOptions {
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_format(mut self, format: RecordFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    pub fn with_save_mode(mut self, mode: SaveMode) -> Self {
        self.save_mode = mode;
        self
    }
}
