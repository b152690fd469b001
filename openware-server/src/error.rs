// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Errors of the HTTP front end.
//!
//! Bridge failures are not listed here: they are answered with a 400 response
//! and never abort a connection.

pub type Result<T> = core::result::Result<T, ServerError>;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Socket or stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request line could not be understood.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// A response body could not be serialized.
    #[error("JSON encoding: {0}")]
    Json(#[from] serde_json::Error),
}
