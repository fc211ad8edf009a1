//! The generic attribute decoder. Recognized `a=` lines are parsed into
//! structured fields; everything else is tolerated and kept raw.

pub mod fmtp;
pub mod image_attr;
pub mod rtpmap;
pub mod source_filter;

pub use fmtp::{Fmtp, FmtpParams, FmtpToken};
pub use image_attr::ImageAttr;
pub use rtpmap::RtpMap;
pub use source_filter::SourceFilter;

use crate::errors::Result;

/// One decoded `a=` line, before it is folded into an [`Attributes`] bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeLine {
    RtpMap(RtpMap),
    Fmtp(Fmtp),
    SourceFilter(SourceFilter),
    ImageAttr(ImageAttr),
    MediaClock(String),
    Framerate(f64),
    /// Recognized name but no structured form needed (`recvonly`,
    /// `sendrecv`, NMOS `x-nvnmos-*`, `ptime`, `ts-refclk`, ...).
    Unknown(String),
}

pub fn decode_attribute_line(raw: &str) -> Result<AttributeLine> {
    let (name, value) = raw.split_once(':').unwrap_or((raw, ""));
    Ok(match name {
        "rtpmap" => AttributeLine::RtpMap(value.parse()?),
        "fmtp" => AttributeLine::Fmtp(value.parse()?),
        "source-filter" => AttributeLine::SourceFilter(value.parse()?),
        "imageattr" => AttributeLine::ImageAttr(value.parse()?),
        "mediaclk" => AttributeLine::MediaClock(value.to_string()),
        "framerate" => AttributeLine::Framerate(value.trim().parse::<f64>()?),
        _ => AttributeLine::Unknown(raw.to_string()),
    })
}

/// The structured attribute vocabulary recognized at both session and
/// media scope. `unknown` collects anything the decoder didn't recognize,
/// each entry already logged at `info` level when it was pushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub rtp_map: Vec<RtpMap>,
    pub fmtp: Vec<Fmtp>,
    pub source_filter: Option<SourceFilter>,
    pub image_attributes: Vec<ImageAttr>,
    pub media_clock: Option<String>,
    pub framerate: Option<f64>,
    pub unknown: Vec<String>,
}

impl Attributes {
    /// Decodes one `a=` line's value (without the leading `a=`) and folds
    /// it into this bundle: repeatable attributes accumulate, singleton
    /// attributes overwrite a prior value with a diagnostic.
    pub fn record(&mut self, raw: &str) -> Result<()> {
        match decode_attribute_line(raw)? {
            AttributeLine::RtpMap(rtp_map) => self.rtp_map.push(rtp_map),
            AttributeLine::Fmtp(fmtp) => self.fmtp.push(fmtp),
            AttributeLine::SourceFilter(source_filter) => {
                if self.source_filter.is_some() {
                    tracing::warn!(attribute = "source-filter", "overwriting prior value");
                }
                self.source_filter = Some(source_filter);
            }
            AttributeLine::ImageAttr(image_attr) => self.image_attributes.push(image_attr),
            AttributeLine::MediaClock(media_clock) => {
                if self.media_clock.is_some() {
                    tracing::warn!(attribute = "mediaclk", "overwriting prior value");
                }
                self.media_clock = Some(media_clock);
            }
            AttributeLine::Framerate(framerate) => {
                if self.framerate.is_some() {
                    tracing::warn!(attribute = "framerate", "overwriting prior value");
                }
                self.framerate = Some(framerate);
            }
            AttributeLine::Unknown(raw) => {
                tracing::info!(attribute = %raw, "unrecognized SDP attribute, preserved verbatim");
                self.unknown.push(raw);
            }
        }
        Ok(())
    }

    pub fn get_rtp_map(&self, payload_type: u8) -> Option<&RtpMap> {
        self.rtp_map.iter().find(|r| r.payload_type == payload_type)
    }

    pub fn get_fmtp(&self, payload_type: u8) -> Option<&Fmtp> {
        self.fmtp.iter().find(|f| f.payload_type == payload_type)
    }

    /// Every `a=` line this bundle carries, in teacher-style trivial form
    /// (used by the `Display` impl; emitted lines get no `\r\n` here, the
    /// caller appends it).
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for rtp_map in &self.rtp_map {
            out.push(rtp_map.to_string());
        }
        for fmtp in &self.fmtp {
            out.push(fmtp.to_string());
        }
        if let Some(source_filter) = &self.source_filter {
            out.push(source_filter.to_string());
        }
        for image_attr in &self.image_attributes {
            out.push(image_attr.to_string());
        }
        if let Some(media_clock) = &self.media_clock {
            out.push(format!("a=mediaclk:{media_clock}"));
        }
        if let Some(framerate) = self.framerate {
            out.push(format!("a=framerate:{framerate}"));
        }
        for unknown in &self.unknown {
            out.push(format!("a={unknown}"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_attribute_is_preserved_not_rejected() {
        let mut attrs = Attributes::default();
        attrs.record("recvonly").unwrap();
        assert_eq!(attrs.unknown, vec!["recvonly".to_string()]);
    }

    #[test]
    fn second_framerate_overwrites() {
        let mut attrs = Attributes::default();
        attrs.record("framerate:25").unwrap();
        attrs.record("framerate:50").unwrap();
        assert_eq!(attrs.framerate, Some(50.0));
    }

    #[test]
    fn rtpmap_and_fmtp_accumulate() {
        let mut attrs = Attributes::default();
        attrs.record("rtpmap:96 raw/90000").unwrap();
        attrs.record("rtpmap:97 L24/48000/2").unwrap();
        assert_eq!(attrs.rtp_map.len(), 2);
        assert_eq!(attrs.get_rtp_map(97).unwrap().encoding_name, "L24");
    }
}
