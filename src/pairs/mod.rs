// src/pairs/mod.rs
pub mod grid;
pub mod io;
pub mod record;
pub mod session;

use std::fmt;

pub use grid::GridView;
pub use io::{
    ParseReport, initialize, load, load_json_bytes, load_with, parse_pairs, render_pairs, save,
    save_json, save_json_with, save_with,
};
pub use record::{DEFAULT_QUALIFIER, RecordFormat};
pub use session::Session;

use crate::tokens::{ALL_KINDS, N_KINDS, TokenKind};

/// One cell of the matrix: a transition from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionPair {
    pub from: TokenKind,
    pub to: TokenKind,
}

impl TransitionPair {
    pub const fn new(from: TokenKind, to: TokenKind) -> Self {
        Self { from, to }
    }
}

impl From<(TokenKind, TokenKind)> for TransitionPair {
    fn from((from, to): (TokenKind, TokenKind)) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for TransitionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

// One row mask per `from` kind; bit `to.index()` is set when the pair is allowed.
const _: () = assert!(N_KINDS <= u32::BITS as usize);

/// Allowed flag for every ordered pair of token kinds.
///
/// The set always covers all `N_KINDS * N_KINDS` pairs; a pair that was never
/// allowed simply reads as `false`.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct AllowedSet {
    rows: [u32; N_KINDS],
}

impl AllowedSet {
    /// All pairs disallowed.
    pub const fn new() -> Self {
        Self {
            rows: [0; N_KINDS],
        }
    }

    pub(crate) fn from_rows(rows: [u32; N_KINDS]) -> Self {
        let mask = full_row_mask();
        let mut rows = rows;
        for r in rows.iter_mut() {
            *r &= mask;
        }
        Self { rows }
    }

    pub(crate) fn rows(&self) -> &[u32; N_KINDS] {
        &self.rows
    }

    /// Number of entries, allowed or not. Always `N_KINDS * N_KINDS`.
    pub const fn len(&self) -> usize {
        N_KINDS * N_KINDS
    }

    pub fn get(&self, from: TokenKind, to: TokenKind) -> bool {
        self.rows[from.index()] & bit(to) != 0
    }

    pub fn contains(&self, pair: TransitionPair) -> bool {
        self.get(pair.from, pair.to)
    }

    pub fn set(&mut self, from: TokenKind, to: TokenKind, allowed: bool) {
        let row = &mut self.rows[from.index()];
        if allowed {
            *row |= bit(to);
        } else {
            *row &= !bit(to);
        }
    }

    pub fn allow(&mut self, pair: TransitionPair) {
        self.set(pair.from, pair.to, true);
    }

    pub fn deny(&mut self, pair: TransitionPair) {
        self.set(pair.from, pair.to, false);
    }

    /// Flips one cell and returns its new value.
    pub fn toggle(&mut self, from: TokenKind, to: TokenKind) -> bool {
        self.rows[from.index()] ^= bit(to);
        self.get(from, to)
    }

    pub fn clear(&mut self) {
        self.rows = [0; N_KINDS];
    }

    pub fn count_allowed(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones() as usize).sum()
    }

    /// True when no pair is allowed.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }

    /// Every pair with its flag, row-major in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (TransitionPair, bool)> + '_ {
        ALL_KINDS.iter().flat_map(move |&from| {
            ALL_KINDS
                .iter()
                .map(move |&to| (TransitionPair::new(from, to), self.get(from, to)))
        })
    }

    /// Allowed pairs only, row-major in catalog order.
    pub fn allowed(&self) -> impl Iterator<Item = TransitionPair> + '_ {
        self.iter().filter_map(|(p, on)| on.then_some(p))
    }

    /// Destinations allowed after `from`, in catalog order.
    pub fn row(&self, from: TokenKind) -> impl Iterator<Item = TokenKind> + '_ {
        ALL_KINDS.iter().copied().filter(move |&to| self.get(from, to))
    }

    /// Sources that may precede `to`, in catalog order.
    pub fn column(&self, to: TokenKind) -> impl Iterator<Item = TokenKind> + '_ {
        ALL_KINDS.iter().copied().filter(move |&from| self.get(from, to))
    }
}

#[inline]
fn bit(k: TokenKind) -> u32 {
    1u32 << k.index()
}

#[inline]
fn full_row_mask() -> u32 {
    if N_KINDS == u32::BITS as usize {
        u32::MAX
    } else {
        (1u32 << N_KINDS) - 1
    }
}

impl FromIterator<TransitionPair> for AllowedSet {
    fn from_iter<I: IntoIterator<Item = TransitionPair>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<TransitionPair> for AllowedSet {
    fn extend<I: IntoIterator<Item = TransitionPair>>(&mut self, iter: I) {
        for p in iter {
            self.allow(p);
        }
    }
}

impl fmt::Debug for AllowedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.allowed()).finish()
    }
}
