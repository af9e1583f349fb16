use thiserror::Error;

/// Errors raised while locating or reading the embedded game list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// No `<variable> = [` literal exists in the document.
    #[error("game list `{0}` not found in document")]
    ListNotFound(String),

    /// The literal opens but never reaches its closing `]`.
    #[error("game list `{variable}` starting on line {line} is never closed")]
    Unterminated { variable: String, line: usize },

    /// A record inside the literal could not be read.
    #[error("malformed entry on line {line} ({reason}): {content}")]
    Malformed {
        line: usize,
        content: String,
        reason: String,
    },
}

impl ParseError {
    /// Build a [`ParseError::Malformed`] for the line containing byte `offset`.
    pub(crate) fn malformed(text: &str, offset: usize, reason: impl Into<String>) -> Self {
        let offset = offset.min(text.len());
        let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line_end = text[offset..]
            .find('\n')
            .map_or(text.len(), |i| offset + i);
        Self::Malformed {
            line: line_number(text, offset),
            content: text[line_start..line_end].trim().to_string(),
            reason: reason.into(),
        }
    }
}

/// 1-based line number of byte `offset` in `text`.
pub(crate) fn line_number(text: &str, offset: usize) -> usize {
    text[..offset.min(text.len())].matches('\n').count() + 1
}

/// Errors raised by catalog edits. Nothing is modified when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("section not found: {0}")]
    SectionNotFound(String),

    #[error("section already exists: {0}")]
    DuplicateSection(String),

    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error("no game at position {position} in section {section}")]
    PositionOutOfRange { section: usize, position: usize },
}
