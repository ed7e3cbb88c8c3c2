//! Error types for the command system
//!
//! Every rejection is a value: the dispatcher validates first and returns the
//! first failure without touching the document.

use std::fmt;

use pdt_mesh::{MeshError, ObjectMode};
use thiserror::Error;

use crate::args::{Mode, Opcode};

/// Result type for command operations
pub type CmdResult<T = ()> = Result<T, CmdError>;

/// Coarse classification of a failure, for error sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The command text or its arguments are malformed
    Format,
    /// The scene is not in a state the command can act on
    State,
    /// The target position could not be computed
    Computation,
    /// The document rejected an edit after validation passed
    Geometry,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Format => "format",
            ErrorKind::State => "state",
            ErrorKind::Computation => "computation",
            ErrorKind::Geometry => "geometry",
        })
    }
}

/// Errors that can occur during command parsing
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("command too short: need an opcode, a mode and arguments")]
    TooShort,

    #[error("invalid opcode '{0}': expected one of C D E G N P S V")]
    InvalidOpcode(char),

    #[error("invalid mode '{0}': expected one of A D I P")]
    InvalidMode(char),

    /// Only raised under the strict number policy
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("parse error: {0}")]
    Syntax(String),
}

impl From<nom::Err<nom::error::Error<&str>>> for ParseError {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => ParseError::TooShort,
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                let shown: String = e.input.chars().take(20).collect();
                ParseError::Syntax(format!("at '{}'", shown))
            }
        }
    }
}

/// Errors that can occur during command execution
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CmdError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{mode} mode needs {expected} value(s), got {got}")]
    WrongArgCount {
        mode: Mode,
        expected: usize,
        got: usize,
    },

    #[error("{opcode} does not accept {mode} mode")]
    UnsupportedMode { opcode: Opcode, mode: Mode },

    #[error("no active object")]
    NoActiveObject,

    #[error("{opcode} is not available in {mode} mode")]
    WrongMode { opcode: Opcode, mode: ObjectMode },

    #[error("nothing selected")]
    NothingSelected,

    #[error("no active vertex: select a vertex individually first")]
    NoActiveVertex,

    #[error("a face is selected; splitting would break the topology")]
    FaceSelected,

    #[error("select exactly one edge (found {0})")]
    WrongEdgeCount(usize),

    #[error("select at least one edge")]
    NoEdgesSelected,

    #[error("selection does not define a percentage reference")]
    NoResult,

    #[error("geometry error: {0}")]
    Geometry(#[from] MeshError),
}

impl CmdError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CmdError::Parse(_) | CmdError::WrongArgCount { .. } | CmdError::UnsupportedMode { .. } => {
                ErrorKind::Format
            }
            CmdError::NoActiveObject
            | CmdError::WrongMode { .. }
            | CmdError::NothingSelected
            | CmdError::NoActiveVertex
            | CmdError::FaceSelected
            | CmdError::WrongEdgeCount(_)
            | CmdError::NoEdgesSelected => ErrorKind::State,
            CmdError::NoResult => ErrorKind::Computation,
            CmdError::Geometry(_) => ErrorKind::Geometry,
        }
    }

    pub(crate) fn wrong_mode(opcode: Opcode, mode: ObjectMode) -> Self {
        CmdError::WrongMode { opcode, mode }
    }
}
