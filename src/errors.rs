use std::{fmt, io, num::ParseFloatError, num::ParseIntError};
use thiserror::Error;

/// The crate's single error type. Domain kinds (`MalformedLine` through
/// `EmitOverflow`) are what callers match on; the rest exist so `?` works
/// against the handful of std/url conversions the parser needs internally.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed SDP line {0}: expected `<letter>=<value>`")]
    MalformedLine(usize),

    #[error("missing required field `{field}` in {context}")]
    MissingRequired { field: String, context: String },

    #[error("unknown value `{literal}` for enumerated field `{field}`")]
    UnknownEnumValue { field: String, literal: String },

    #[error("malformed compound value for `{field}`: `{raw}`")]
    MalformedCompoundValue { field: String, raw: String },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("emitted SDP would be truncated")]
    EmitOverflow,

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("fmt error: {0}")]
    Fmt(#[from] fmt::Error),

    #[error("parse url failed: {0}")]
    Url(#[from] url::ParseError),

    #[error("parse integer failed: {0}")]
    ParseInt(#[from] ParseIntError),

    #[error("parse float failed: {0}")]
    ParseFloat(#[from] ParseFloatError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub fn missing(field: impl Into<String>, context: impl Into<String>) -> Self {
        Error::MissingRequired {
            field: field.into(),
            context: context.into(),
        }
    }

    pub fn unknown_enum(field: impl Into<String>, literal: impl Into<String>) -> Self {
        Error::UnknownEnumValue {
            field: field.into(),
            literal: literal.into(),
        }
    }

    pub fn malformed_compound(field: impl Into<String>, raw: impl Into<String>) -> Self {
        Error::MalformedCompoundValue {
            field: field.into(),
            raw: raw.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
