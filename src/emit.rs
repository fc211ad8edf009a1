//! The SDP template emitter. Produces RFC-8866-compliant sender/receiver
//! advertisements carrying the NMOS `x-nvnmos-*` extension attributes,
//! grounded in `NmosTestSender.cpp`'s `init_video_sdp`/`init_audio_sdp`.

use crate::errors::{Error, Result};
use crate::media::MediaKind;
use serde::Deserialize;
use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

/// The original source's templates cap their `snprintf` buffer at 2048
/// bytes; a complete implementation should error rather than truncate.
const MAX_EMIT_LEN: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Sender,
    Receiver,
}

/// Configuration record for one sender/receiver SDP advertisement.
/// Deserializable so a caller can build many of these from a config file
/// via `crate::config`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmitConfig {
    pub role: Role,
    pub media_kind: String,
    pub stream_id: String,
    pub interface_ip: String,
    pub label: String,
    pub description: Option<String>,
    pub group_hint: Option<String>,
    pub ptp: bool,
    pub encoding: String,
    pub fmtp: String,
    pub multicast_ip: String,
    pub dst_port: u16,
    pub src_port: Option<u16>,
    pub payload_type: u8,
    pub src_ip: Option<String>,
}

fn ts_refclk_lines(ptp: bool) -> String {
    if ptp {
        "a=ts-refclk:ptp=IEEE1588-2008:AC-DE-48-23-45-67-01-9F:42\r\n\
a=ts-refclk:ptp=IEEE1588-2008:traceable\r\n"
            .to_string()
    } else {
        "a=ts-refclk:localmac=CA-FE-01-CA-FE-02\r\n".to_string()
    }
}

/// Emits an ASCII byte sequence with `\r\n` terminators, in a fixed field
/// order matching the original template.
pub fn emit(config: &EmitConfig) -> Result<Vec<u8>> {
    let media_kind = MediaKind::from(config.media_kind.as_str());
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut out = String::new();
    write!(out, "v=0\r\n")?;
    write!(
        out,
        "o=- {timestamp} {timestamp} IN IP4 {}\r\n",
        config.interface_ip
    )?;
    write!(out, "s={}\r\n", config.label)?;
    if let Some(description) = &config.description {
        write!(out, "i={description}\r\n")?;
    }
    write!(out, "t=0 0\r\n")?;
    write!(out, "a=x-nvnmos-id:{}\r\n", config.stream_id)?;
    if let Some(group_hint) = &config.group_hint {
        write!(out, "a=x-nvnmos-group-hint:{group_hint}\r\n")?;
    }
    write!(out, "a=x-nvnmos-iface-ip:{}\r\n", config.interface_ip)?;
    if config.role == Role::Sender {
        if let Some(src_port) = config.src_port {
            write!(out, "a=x-nvnmos-src-port:{src_port}\r\n")?;
        }
    }
    write!(
        out,
        "m={} {} RTP/AVP {}\r\n",
        media_kind, config.dst_port, config.payload_type
    )?;
    write!(out, "c=IN IP4 {}/64\r\n", config.multicast_ip)?;
    if let Some(src_ip) = &config.src_ip {
        write!(
            out,
            "a=source-filter:incl IN IP4 {} {src_ip}\r\n",
            config.multicast_ip
        )?;
    }
    write!(out, "a=rtpmap:{} {}\r\n", config.payload_type, config.encoding)?;
    write!(out, "a=fmtp:{} {}\r\n", config.payload_type, config.fmtp)?;
    if config.role == Role::Sender && media_kind == MediaKind::Audio {
        write!(out, "a=ptime:1\r\n")?;
    }
    if config.role == Role::Sender {
        out.push_str(&ts_refclk_lines(config.ptp));
    }
    write!(out, "a=mediaclk:direct=0\r\n")?;

    if out.len() > MAX_EMIT_LEN {
        return Err(Error::EmitOverflow);
    }
    Ok(out.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_sender_config() -> EmitConfig {
        EmitConfig {
            role: Role::Sender,
            media_kind: "video".to_string(),
            stream_id: "sender-video".to_string(),
            interface_ip: "192.168.56.1".to_string(),
            label: "NvNmos Video Sender".to_string(),
            description: None,
            group_hint: Some("tx-0:video".to_string()),
            ptp: true,
            encoding: "raw/90000".to_string(),
            fmtp: "sampling=YCbCr-4:2:2; exactframerate=50; depth=10; colorimetry=BT709; \
PM=2110GPM; SSN=ST2110-20:2017; TP=2110TPN;"
                .to_string(),
            multicast_ip: "239.1.2.3".to_string(),
            dst_port: 5020,
            src_port: Some(5004),
            payload_type: 96,
            src_ip: None,
        }
    }

    #[test]
    fn every_line_is_crlf_terminated() {
        let bytes = emit(&video_sender_config()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        for line in text.split_inclusive('\n') {
            assert!(line.ends_with("\r\n"), "line missing CRLF: {line:?}");
        }
    }

    #[test]
    fn emitted_video_sdp_round_trips_host_and_port() {
        let bytes = emit(&video_sender_config()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let session = crate::parse(&text).unwrap();
        assert_eq!(crate::session_video_host(&session).unwrap(), "239.1.2.3");
        assert_eq!(crate::session_video_port(&session).unwrap(), "5020");
    }

    #[test]
    fn receiver_omits_sender_only_lines() {
        let mut config = video_sender_config();
        config.role = Role::Receiver;
        config.src_port = None;
        let text = String::from_utf8(emit(&config).unwrap()).unwrap();
        assert!(!text.contains("x-nvnmos-src-port"));
        assert!(!text.contains("ts-refclk"));
    }

    #[test]
    fn audio_sender_includes_ptime_and_optional_description() {
        let mut config = video_sender_config();
        config.media_kind = "audio".to_string();
        config.description = Some("NvNmos Audio Sender".to_string());
        config.encoding = "L24/48000/2".to_string();
        config.fmtp = "channel-order=SMPTE2110.(ST);".to_string();
        let text = String::from_utf8(emit(&config).unwrap()).unwrap();
        assert!(text.contains("a=ptime:1\r\n"));
        assert!(text.contains("i=NvNmos Audio Sender\r\n"));
    }
}
