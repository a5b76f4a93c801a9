// src/pairs/session.rs
// An editing session: the in-memory matrix plus the file it came from.
// Front ends read and mutate cells only through this type.

use super::{AllowedSet, ParseReport, io};
use crate::{config::StoreOptions, error::PairsError, tokens::TokenKind};

pub struct Session {
    options: StoreOptions,
    set: AllowedSet,
    last_report: ParseReport,
    dirty: bool,
}

impl Session {
    /// Loads the pairs file named by `options` (or starts empty if it is missing).
    pub fn open(options: StoreOptions) -> Result<Self, PairsError> {
        let (set, last_report) = io::load_report(&options.path, &options)?;
        Ok(Self {
            options,
            set,
            last_report,
            dirty: false,
        })
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn set(&self) -> &AllowedSet {
        &self.set
    }

    /// Line counts from the most recent load.
    pub fn last_report(&self) -> ParseReport {
        self.last_report
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn get(&self, from: TokenKind, to: TokenKind) -> bool {
        self.set.get(from, to)
    }

    pub fn set_allowed(&mut self, from: TokenKind, to: TokenKind, allowed: bool) {
        if self.set.get(from, to) != allowed {
            self.set.set(from, to, allowed);
            self.dirty = true;
        }
    }

    pub fn toggle(&mut self, from: TokenKind, to: TokenKind) -> bool {
        self.dirty = true;
        self.set.toggle(from, to)
    }

    pub fn clear(&mut self) {
        if !self.set.is_empty() {
            self.set.clear();
            self.dirty = true;
        }
    }

    /// Replaces the in-memory matrix with whatever is on disk now.
    pub fn reload(&mut self) -> Result<(), PairsError> {
        let (set, report) = io::load_report(&self.options.path, &self.options)?;
        self.set = set;
        self.last_report = report;
        self.dirty = false;
        Ok(())
    }

    /// Rewrites the whole file from the in-memory matrix.
    pub fn save(&mut self) -> Result<(), PairsError> {
        io::save_with(&self.options.path, &self.set, &self.options)?;
        self.dirty = false;
        log::info!("allowed pairs saved to {}", self.options.path.display());
        Ok(())
    }
}
