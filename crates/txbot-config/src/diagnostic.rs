// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error diagnostics rendered through miette.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The TOML/env layer stack failed to deserialize.
    #[error("could not load configuration: {message}")]
    #[diagnostic(
        code(txbot::config::load),
        help("check txbot.toml against the documented sections: agent, business, channel, openai, storage, shell")
    )]
    Load {
        /// Figment's rendered error, including the offending key if any.
        message: String,
    },

    /// A semantic constraint on a config value failed.
    #[error("validation error: {message}")]
    #[diagnostic(code(txbot::config::validation))]
    Validation { message: String },
}

/// Render collected config errors to stderr for the operator.
pub fn render_errors(errors: Vec<ConfigError>) {
    for error in errors {
        eprintln!("{:?}", miette::Report::new(error));
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load {
            message: err.to_string(),
        }
    }
}
