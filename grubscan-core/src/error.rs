// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Provides [`ScanError`], which encapsulates other errors

use thiserror::Error;

/// An `Error` resulting from the library.
#[derive(Error, Debug)]
pub enum ScanError {
    /// An error occurred while performing filesystem operations.
    #[error("Filesystem Error: {0}")]
    FsError(#[from] crate::system::fs::FsError),

    /// A configuration could not be parsed.
    #[error("Parse Error: {0}")]
    ParseError(#[from] crate::config::parsers::ParseError),

    /// Boot entries could not be encoded or decoded for the handoff.
    #[error("Handoff Error: {0}")]
    HandoffError(#[from] crate::config::handoff::HandoffError),
}
