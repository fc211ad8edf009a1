//! An RFC 8866 SDP parser with SMPTE ST 2110 (-20 uncompressed video, -22
//! JPEG-XS, -30 PCM audio) typing and an SDP template emitter for NMOS
//! sender/receiver advertisements.
//!
//! The two-stage parse (generic grammar → typed session) lives across
//! [`reader`], [`attributes`], and [`st2110`]. [`emit`] is the reverse
//! path.

pub mod attributes;
pub mod config;
pub mod emit;
pub mod errors;
pub mod media;
pub mod reader;
pub mod session;
pub mod st2110;


pub use emit::{emit as emit_config, EmitConfig, Role};
pub use errors::{Error, Result};
pub use session::Session;

pub const CRLF: &str = "\r\n";
pub const LF: &str = "\n";

/// Parses an SDP text payload into a fully-typed [`Session`]. No partial
/// result is ever returned: every error kind is fatal to the parse.
pub fn parse(sdp_text: &str) -> Result<Session> {
    reader::parse(sdp_text)
}

/// Produces an SDP advertisement for the given configuration.
pub fn emit(config: &EmitConfig) -> Result<Vec<u8>> {
    emit::emit(config)
}

/// The connection address of the first video media in `session`.
pub fn session_video_host(session: &Session) -> Result<String> {
    let media = session
        .media_descriptions
        .iter()
        .find(|m| m.as_video().is_some())
        .ok_or_else(|| Error::missing("video media", "session"))?;
    session
        .connection_information_for(media)
        .map(|c| c.connection_address.clone())
        .ok_or_else(|| Error::missing("connection-information", "video media"))
}

/// The port of the first video media in `session`.
pub fn session_video_port(session: &Session) -> Result<String> {
    let (common, _) = session
        .media_descriptions
        .iter()
        .find_map(|m| m.as_video())
        .ok_or_else(|| Error::missing("video media", "session"))?;
    Ok(common.port.to_string())
}

/// CLI convenience: reads an SDP file from disk into a string.
pub fn read_file(path: impl AsRef<std::path::Path>) -> std::io::Result<String> {
    std::fs::read_to_string(path)
}
