// src/exit.rs
//! Process exit codes for `docgen`.
//!
//! Provides a stable contract for editor integrations and scripts.

use crate::error::DocGenError;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocGenExit {
    /// Run completed. Individual items may still lack documentation.
    Success,
    /// The input file could not be read.
    InputUnavailable,
    /// The input did not parse; `errors.json` holds the diagnostics.
    ParseFailure,
    /// Any other error (I/O, config, serialization).
    Error,
}

impl DocGenExit {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputUnavailable | Self::ParseFailure | Self::Error => 1,
        }
    }
}

impl From<&DocGenError> for DocGenExit {
    fn from(e: &DocGenError) -> Self {
        match e {
            DocGenError::InputUnavailable { .. } => Self::InputUnavailable,
            DocGenError::ParseFailure(_) => Self::ParseFailure,
            _ => Self::Error,
        }
    }
}

impl Termination for DocGenExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
