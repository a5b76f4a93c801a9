// src/pairs/grid.rs
// Plain-text rendering of the matrix. Rows are `from` kinds, columns are `to`
// kinds; column labels are written top-down, one character per line.

use std::fmt::Write as _;

use super::{AllowedSet, TransitionPair};
use crate::tokens::ALL_KINDS;

const CORNER: &str = "From ↓ / To →";
const ALLOWED: char = 'x';
const DENIED: char = '.';

pub struct GridView<'a> {
    set: &'a AllowedSet,
    highlight: Option<TransitionPair>,
}

impl<'a> GridView<'a> {
    pub fn new(set: &'a AllowedSet) -> Self {
        Self {
            set,
            highlight: None,
        }
    }

    /// Marks the row and column of `pair`.
    pub fn highlight(mut self, pair: impl Into<Option<TransitionPair>>) -> Self {
        self.highlight = pair.into();
        self
    }

    pub fn render(&self) -> String {
        let label_w = ALL_KINDS
            .iter()
            .map(|k| k.name().len())
            .max()
            .unwrap_or(0)
            .max(CORNER.chars().count())
            + 2;
        let label_h = ALL_KINDS.iter().map(|k| k.name().len()).max().unwrap_or(0);

        let mut out = String::new();

        // Column labels, written vertically and aligned to the bottom.
        for line in 0..label_h {
            let caption = if line + 1 == label_h { CORNER } else { "" };
            let _ = write!(out, "{caption:<label_w$}");
            for k in ALL_KINDS {
                let name = k.name().as_bytes();
                let pad = label_h - name.len();
                let c = if line >= pad { name[line - pad] as char } else { ' ' };
                out.push(c);
                out.push(' ');
            }
            trim_line_end(&mut out);
            out.push('\n');
        }

        if let Some(hl) = self.highlight {
            let _ = write!(out, "{:label_w$}", "");
            for k in ALL_KINDS {
                out.push(if *k == hl.to { 'v' } else { ' ' });
                out.push(' ');
            }
            trim_line_end(&mut out);
            out.push('\n');
        }

        for &from in ALL_KINDS {
            let marker = match self.highlight {
                Some(hl) if hl.from == from => '>',
                _ => ' ',
            };
            let _ = write!(out, "{marker}{:<w$}", from.name(), w = label_w - 1);
            for &to in ALL_KINDS {
                out.push(if self.set.get(from, to) { ALLOWED } else { DENIED });
                out.push(' ');
            }
            trim_line_end(&mut out);
            out.push('\n');
        }

        out
    }
}

fn trim_line_end(out: &mut String) {
    let keep = out.trim_end_matches(' ').len();
    out.truncate(keep);
}
