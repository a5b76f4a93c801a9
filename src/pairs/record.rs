// src/pairs/record.rs
// One line of the pairs file:
//
//   { Lexer::TokenType::ID, Lexer::TokenType::PLUS },
//
// i.e. a C++ aggregate initializer, ready to paste into a table of allowed
// transitions.

use serde::{Deserialize, Serialize};

use super::TransitionPair;
use crate::{error::PairsError, tokens::TokenKind};

/// Qualifier written in front of each token name.
pub const DEFAULT_QUALIFIER: &str = "Lexer::TokenType::";

/// Decorations stripped from both ends of a line before splitting.
const DECORATION: &[char] = &['{', '}', ','];

/// Serialized as the bare qualifier string; validated on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordFormat {
    qualifier: String,
}

impl Default for RecordFormat {
    fn default() -> Self {
        Self {
            qualifier: DEFAULT_QUALIFIER.to_string(),
        }
    }
}

impl TryFrom<String> for RecordFormat {
    type Error = PairsError;
    fn try_from(qualifier: String) -> Result<Self, PairsError> {
        Self::new(qualifier)
    }
}

impl From<RecordFormat> for String {
    fn from(f: RecordFormat) -> String {
        f.qualifier
    }
}

impl RecordFormat {
    /// The qualifier must survive the line parser: no decoration characters,
    /// no line breaks, no leading or trailing whitespace.
    pub fn new(qualifier: impl Into<String>) -> Result<Self, PairsError> {
        let qualifier = qualifier.into();
        if qualifier.contains(DECORATION)
            || qualifier.contains(['\n', '\r'])
            || qualifier.trim() != qualifier
        {
            return Err(PairsError::InvalidQualifier { qualifier });
        }
        Ok(Self { qualifier })
    }

    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    pub fn format_record(&self, pair: TransitionPair) -> String {
        let q = &self.qualifier;
        format!("{{ {q}{}, {q}{} }},", pair.from, pair.to)
    }

    /// Parses one line. Blank (or decoration-only) lines yield `Ok(None)`.
    pub fn parse_record(&self, line: &str) -> Result<Option<TransitionPair>, PairsError> {
        let body = line.trim().trim_matches(DECORATION);
        if body.trim().is_empty() {
            return Ok(None);
        }

        let mut parts = body.split(',');
        let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(PairsError::MalformedRecord {
                text: line.trim().to_string(),
            });
        };

        let from = self.resolve(from, line)?;
        let to = self.resolve(to, line)?;
        Ok(Some(TransitionPair::new(from, to)))
    }

    fn resolve(&self, part: &str, line: &str) -> Result<TokenKind, PairsError> {
        let part = part.trim();
        let name = if self.qualifier.is_empty() {
            part
        } else {
            part.strip_prefix(self.qualifier.as_str()).unwrap_or(part).trim()
        };
        if name.is_empty() {
            return Err(PairsError::MalformedRecord {
                text: line.trim().to_string(),
            });
        }
        TokenKind::from_name(name)
    }
}
