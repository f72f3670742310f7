use std::fmt;
use thiserror::Error;

/// Part of a record an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Section {
    Index,
    Group(u8),
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Index => write!(f, "index"),
            Section::Group(id) => write!(f, "group {}", id),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Truncated file in {section} at offset {offset}: need {needed} bytes, {available} available"
    )]
    Truncated {
        section: Section,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Malformed index slot {slot} at offset {offset}: {text:?}")]
    MalformedIndex {
        slot: usize,
        offset: usize,
        text: String,
    },

    #[error("Malformed field {element} of group {group} at offset {offset}: {text:?}")]
    MalformedField {
        group: u8,
        element: usize,
        offset: usize,
        text: String,
    },

    #[error("Malformed sounder settings field `{field}` at offset {offset}: {reason}")]
    MalformedRecord {
        field: &'static str,
        offset: usize,
        reason: String,
    },

    #[error("Separator mismatch in {section} at offset {offset}: found {found:02X?}")]
    SeparatorMismatch {
        section: Section,
        offset: usize,
        found: [u8; 2],
    },

    #[error("Group {group} is not decodable but the index reports {count} elements")]
    UnexpectedGroup { group: u8, count: usize, offset: usize },
}

impl Error {
    pub fn section(&self) -> Option<Section> {
        match self {
            Error::Io(_) => None,
            Error::Truncated { section, .. } | Error::SeparatorMismatch { section, .. } => {
                Some(*section)
            }
            Error::MalformedIndex { .. } => Some(Section::Index),
            Error::MalformedField { group, .. } | Error::UnexpectedGroup { group, .. } => {
                Some(Section::Group(*group))
            }
            Error::MalformedRecord { .. } => Some(Section::Group(3)),
        }
    }

    /// Byte offset into the decoded buffer where the problem was found.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Io(_) => None,
            Error::Truncated { offset, .. }
            | Error::MalformedIndex { offset, .. }
            | Error::MalformedField { offset, .. }
            | Error::MalformedRecord { offset, .. }
            | Error::SeparatorMismatch { offset, .. }
            | Error::UnexpectedGroup { offset, .. } => Some(*offset),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
