// src/lib.rs
//! Allowed token-transition matrix for the expression lexer.
//!
//! [`tokens`] holds the fixed catalog of token kinds, [`pairs`] the matrix of
//! allowed `(from, to)` transitions and its on-disk record format.

pub mod config;
pub mod error;
pub mod pairs;
pub mod tokens;

pub use config::{DEFAULT_PATH, ParseMode, SaveMode, StoreOptions};
pub use error::PairsError;
pub use pairs::{AllowedSet, TransitionPair};
pub use tokens::{N_KINDS, TokenKind, catalog};
