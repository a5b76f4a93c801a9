// src/tokens.rs
//
// Token catalog: the fixed, ordered list of lexer token kinds that forms both
// axes of the transition matrix.

use std::{fmt, str::FromStr, sync::OnceLock};

use hashbrown::HashMap;

use crate::error::PairsError;

macro_rules! token_kinds {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Token kinds emitted by the downstream expression lexer.
        ///
        /// Discriminants follow catalog order, so `kind as u32 == kind.index()`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u32)]
        pub enum TokenKind {
            $($variant,)+
        }

        /// Every kind, in catalog order.
        pub const ALL_KINDS: &[TokenKind] = &[$(TokenKind::$variant,)+];

        impl TokenKind {
            /// Upper-case name as it appears in `Lexer::TokenType`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $name,)+
                }
            }
        }
    };
}

token_kinds! {
    None => "NONE",
    Float => "FLOAT",
    Int => "INT",
    Id => "ID",
    X => "X",
    Y => "Y",
    Z => "Z",
    W => "W",
    LPar => "LPAR",
    RPar => "RPAR",
    Plus => "PLUS",
    Minus => "MINUS",
    Mult => "MULT",
    Caret => "CARET",
    Assign => "ASSIGN",
    Comma => "COMMA",
    Calc => "CALC",
    DerX => "DERX",
    DerY => "DERY",
    DerZ => "DERZ",
    DerW => "DERW",
    IntX => "INTX",
    IntY => "INTY",
    IntZ => "INTZ",
    IntW => "INTW",
    Invalid => "INVALID",
    EndOfFile => "ENDOFFILE",
}

pub const N_KINDS: usize = ALL_KINDS.len();

/// The catalog, in grid order.
pub fn catalog() -> &'static [TokenKind] {
    ALL_KINDS
}

fn name_index() -> &'static HashMap<&'static str, TokenKind> {
    static INDEX: OnceLock<HashMap<&'static str, TokenKind>> = OnceLock::new();
    INDEX.get_or_init(|| ALL_KINDS.iter().map(|&k| (k.name(), k)).collect())
}

impl TokenKind {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Exact, case-sensitive lookup against the catalog.
    pub fn from_name(name: &str) -> Result<Self, PairsError> {
        name_index()
            .get(name)
            .copied()
            .ok_or_else(|| PairsError::UnknownToken {
                name: name.to_string(),
            })
    }
}

impl core::convert::TryFrom<u32> for TokenKind {
    type Error = ();
    fn try_from(v: u32) -> Result<Self, ()> {
        ALL_KINDS.get(v as usize).copied().ok_or(())
    }
}

impl FromStr for TokenKind {
    type Err = PairsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
