//! Optional defaults for building many [`crate::emit::EmitConfig`]
//! records, loaded the way `app/config.rs`'s `AppConfig` loads its settings.
//! Never required by `parse`/`emit` themselves.

use crate::errors::Result;
use serde::Deserialize;

/// Fallback values a caller may mix into several [`crate::emit::EmitConfig`]
/// records instead of repeating them. Nothing here is consulted by
/// `crate::parse` or `crate::emit` directly.
#[derive(Debug, Clone, Deserialize)]
pub struct EmitDefaults {
    pub default_payload_type_video: u8,
    pub default_payload_type_audio: u8,
    pub default_multicast_ttl: u8,
    pub default_ptp: bool,
}

impl Default for EmitDefaults {
    fn default() -> Self {
        EmitDefaults {
            default_payload_type_video: 96,
            default_payload_type_audio: 97,
            default_multicast_ttl: 64,
            default_ptp: true,
        }
    }
}

impl EmitDefaults {
    /// Loads defaults from an optional config file (TOML/YAML/JSON, by
    /// extension) layered under the `ST2110SDP_` environment prefix, the
    /// same two-source layering `app/config.rs::AppConfig::new` performs.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::with_name(path).required(false));
        }
        builder = builder.add_source(::config::Environment::with_prefix("ST2110SDP"));
        let settings = builder.build()?;
        match settings.try_deserialize::<EmitDefaults>() {
            Ok(defaults) => Ok(defaults),
            Err(_) => Ok(EmitDefaults::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_defaults_with_no_sources() {
        let defaults = EmitDefaults::load(None).unwrap();
        assert_eq!(defaults.default_payload_type_video, 96);
        assert_eq!(defaults.default_payload_type_audio, 97);
    }
}
