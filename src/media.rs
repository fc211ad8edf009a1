//! The tagged-variant media description used in place of the original's
//! base-class/downcast design.

use crate::attributes::Attributes;
use crate::errors::{Error, Result};
use crate::session::{BandwidthInformation, ConnectionInformation};
use crate::st2110::{audio, data, video};
use std::fmt;
use std::str::FromStr;

/// `m=<media> <port>[/<number of ports>] <proto> <fmt> ...`'s media field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
    Text,
    Application,
    Message,
    Image,
    Other(String),
}

impl From<&str> for MediaKind {
    fn from(s: &str) -> Self {
        match s {
            "audio" => MediaKind::Audio,
            "video" => MediaKind::Video,
            "text" => MediaKind::Text,
            "application" => MediaKind::Application,
            "message" => MediaKind::Message,
            "image" => MediaKind::Image,
            other => MediaKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Text => write!(f, "text"),
            MediaKind::Application => write!(f, "application"),
            MediaKind::Message => write!(f, "message"),
            MediaKind::Image => write!(f, "image"),
            MediaKind::Other(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaProtocol {
    RtpAvp,
    RtpSAvp,
    RtpSAvpF,
    Udp,
    Other(String),
}

impl FromStr for MediaProtocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "RTP/AVP" => MediaProtocol::RtpAvp,
            "RTP/SAVP" => MediaProtocol::RtpSAvp,
            "RTP/SAVPF" => MediaProtocol::RtpSAvpF,
            "udp" => MediaProtocol::Udp,
            other => MediaProtocol::Other(other.to_string()),
        })
    }
}

impl fmt::Display for MediaProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaProtocol::RtpAvp => write!(f, "RTP/AVP"),
            MediaProtocol::RtpSAvp => write!(f, "RTP/SAVP"),
            MediaProtocol::RtpSAvpF => write!(f, "RTP/SAVPF"),
            MediaProtocol::Udp => write!(f, "udp"),
            MediaProtocol::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Fields every media block carries regardless of kind.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCommon {
    pub payloads: Vec<u8>,
    pub port: u16,
    pub port_range: Option<u16>,
    pub protocol: MediaProtocol,
    pub media_title: Option<String>,
    pub connection_information: Option<ConnectionInformation>,
    pub bandwidth_informations: Vec<BandwidthInformation>,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaDescription {
    Video {
        common: MediaCommon,
        video: video::VideoDescription,
    },
    Audio {
        common: MediaCommon,
        channel_order: Option<String>,
    },
    Data {
        common: MediaCommon,
        config: Option<String>,
    },
}

impl MediaDescription {
    pub fn common(&self) -> &MediaCommon {
        match self {
            MediaDescription::Video { common, .. } => common,
            MediaDescription::Audio { common, .. } => common,
            MediaDescription::Data { common, .. } => common,
        }
    }

    pub fn as_video(&self) -> Option<(&MediaCommon, &video::VideoDescription)> {
        match self {
            MediaDescription::Video { common, video } => Some((common, video)),
            _ => None,
        }
    }
}

/// Every `rtpmap`/`fmtp` attribute must reference a payload type that
/// appears in the containing media block's `m=` line.
fn validate_payload_types(common: &MediaCommon) -> Result<()> {
    for rtp_map in &common.attributes.rtp_map {
        if !common.payloads.contains(&rtp_map.payload_type) {
            return Err(Error::InvariantViolation(format!(
                "rtpmap payload type {} is not declared in the media line's payload list",
                rtp_map.payload_type
            )));
        }
    }
    for fmtp in &common.attributes.fmtp {
        if !common.payloads.contains(&fmtp.payload_type) {
            return Err(Error::InvariantViolation(format!(
                "fmtp payload type {} is not declared in the media line's payload list",
                fmtp.payload_type
            )));
        }
    }
    Ok(())
}

/// Per-media dispatch: builds a [`MediaDescription`] from a decoded `m=`
/// line plus the attributes gathered for its scope.
pub fn type_media(
    kind: MediaKind,
    common: MediaCommon,
    session_framerate_attr: Option<f64>,
) -> Result<MediaDescription> {
    validate_payload_types(&common)?;
    match kind {
        MediaKind::Video => {
            let fmtp = common
                .attributes
                .fmtp
                .first()
                .ok_or_else(|| Error::missing("fmtp", "video media"))?
                .clone();
            let framerate_attr = common.attributes.framerate.or(session_framerate_attr);
            let video = video::type_video(&fmtp, framerate_attr)?;
            Ok(MediaDescription::Video { common, video })
        }
        MediaKind::Audio => {
            let channel_order = common
                .attributes
                .fmtp
                .first()
                .map(|fmtp| {
                    let params = crate::attributes::FmtpParams::parse(&fmtp.config);
                    params
                        .raw("channel-order")
                        .map(audio::parse_channel_order)
                        .transpose()
                })
                .transpose()?
                .flatten();
            Ok(MediaDescription::Audio {
                common,
                channel_order,
            })
        }
        other => {
            let config = data::type_data(common.attributes.fmtp.first());
            let _ = other;
            Ok(MediaDescription::Data { common, config })
        }
    }
}
