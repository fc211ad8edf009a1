//! The tokenizer and typed session builder wired together: raw text in,
//! a fully-typed [`Session`] out.

use crate::attributes::Attributes;
use crate::errors::{Error, Result};
use crate::media::{type_media, MediaCommon, MediaKind, MediaProtocol};
use crate::session::{
    BandwidthInformation, ConnectionInformation, EncryptionKey, NetType, Origin, RepeatTime, Session,
    TimeActive, TimeDescription, TimeZoneAdjustment,
};

struct RawLine<'a> {
    letter: char,
    value: &'a str,
    line_no: usize,
}

/// Splits raw SDP into `(type_letter, value)` records, one per
/// non-empty line. Lines not matching `<letter>=<value>` fail with
/// `Error::MalformedLine`.
fn tokenize(text: &str) -> Result<Vec<RawLine<'_>>> {
    let mut lines = Vec::new();
    for (idx, raw_line) in text.split('\n').enumerate() {
        let line_no = idx + 1;
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if line.is_empty() {
            continue;
        }
        let (letter_field, value) = line
            .split_once('=')
            .ok_or(Error::MalformedLine(line_no))?;
        let mut chars = letter_field.chars();
        let letter = chars.next().ok_or(Error::MalformedLine(line_no))?;
        if chars.next().is_some() {
            return Err(Error::MalformedLine(line_no));
        }
        lines.push(RawLine { letter, value, line_no });
    }
    match lines.first() {
        Some(first) if first.letter == 'v' => Ok(lines),
        _ => Err(Error::MalformedLine(1)),
    }
}

/// Scopes are `Session` until the first `m=` line, then `Media(i)` for
/// every subsequent line up to the next `m=`.
fn split_scopes<'a, 'b>(lines: &'a [RawLine<'b>]) -> (&'a [RawLine<'b>], Vec<&'a [RawLine<'b>]>) {
    let Some(first_m) = lines.iter().position(|l| l.letter == 'm') else {
        return (lines, Vec::new());
    };
    let session_lines = &lines[..first_m];
    let mut media_blocks = Vec::new();
    let mut start = first_m;
    for i in (first_m + 1)..=lines.len() {
        if i == lines.len() || lines[i].letter == 'm' {
            media_blocks.push(&lines[start..i]);
            start = i;
        }
    }
    (session_lines, media_blocks)
}

pub fn parse(text: &str) -> Result<Session> {
    let lines = tokenize(text)?;
    build_session(&lines)
}

fn build_session(lines: &[RawLine<'_>]) -> Result<Session> {
    let (session_lines, media_blocks) = split_scopes(lines);

    let mut protocol_version = None;
    let mut origin = None;
    let mut session_name = None;
    let mut session_information = None;
    let mut uri = None;
    let mut email_address = Vec::new();
    let mut phone_number = Vec::new();
    let mut connection_information = None;
    let mut bandwidth_informations = Vec::new();
    let mut time_active = None;
    let mut repeat_times = Vec::new();
    let mut time_zone_adjustments = Vec::new();
    let mut encryption_key = None;
    let mut attributes = Attributes::default();

    for line in session_lines {
        match line.letter {
            'v' => {
                protocol_version = Some(
                    line.value
                        .trim()
                        .parse::<u32>()
                        .map_err(|_| Error::MalformedLine(line.line_no))?,
                )
            }
            'o' => origin = Some(parse_origin(line.value, line.line_no)?),
            's' => session_name = Some(line.value.to_string()),
            'i' => session_information = Some(line.value.to_string()),
            'u' => uri = Some(url::Url::parse(line.value.trim())?),
            'e' => email_address.push(line.value.to_string()),
            'p' => phone_number.push(line.value.to_string()),
            'c' => connection_information = Some(parse_connection(line.value, line.line_no)?),
            'b' => bandwidth_informations.push(parse_bandwidth(line.value, line.line_no)?),
            't' => time_active = Some(parse_time_active(line.value, line.line_no)?),
            'r' => repeat_times.push(parse_repeat(line.value, line.line_no)?),
            'z' => time_zone_adjustments.extend(parse_zone(line.value, line.line_no)?),
            'k' => encryption_key = Some(parse_key(line.value)),
            'a' => attributes.record(line.value)?,
            _ => return Err(Error::MalformedLine(line.line_no)),
        }
    }

    if !repeat_times.is_empty() {
        return Err(Error::Unsupported("repeat-times".to_string()));
    }
    if !time_zone_adjustments.is_empty() {
        return Err(Error::Unsupported("time-zone-adjustment".to_string()));
    }

    let protocol_version = protocol_version.ok_or_else(|| Error::missing("v", "session"))?;
    let origin = origin.ok_or_else(|| Error::missing("o", "session"))?;
    let session_name = session_name.ok_or_else(|| Error::missing("s", "session"))?;
    let time_active = time_active.ok_or_else(|| Error::missing("t", "session"))?;

    let mut media_descriptions = Vec::with_capacity(media_blocks.len());
    for block in media_blocks {
        media_descriptions.push(build_media(block, attributes.framerate)?);
    }

    for media in &media_descriptions {
        if media.common().connection_information.is_none() && connection_information.is_none() {
            return Err(Error::missing("connection-information", "media or session"));
        }
    }

    Ok(Session {
        protocol_version,
        origin,
        session_name,
        session_information,
        uri,
        email_address,
        phone_number,
        connection_information,
        bandwidth_informations,
        time_description: TimeDescription {
            time_active,
            repeat_times: Vec::new(),
            time_zone_adjustments: Vec::new(),
        },
        encryption_key,
        attributes,
        media_descriptions,
    })
}

fn build_media(block: &[RawLine<'_>], session_framerate: Option<f64>) -> Result<crate::media::MediaDescription> {
    let m_line = &block[0];
    let mut fields = m_line.value.split_whitespace();
    let media_str = fields.next().ok_or(Error::MalformedLine(m_line.line_no))?;
    let port_field = fields.next().ok_or(Error::MalformedLine(m_line.line_no))?;
    let proto_str = fields.next().ok_or(Error::MalformedLine(m_line.line_no))?;
    let payloads = fields
        .map(|p| {
            p.parse::<u8>()
                .map_err(|_| Error::malformed_compound("m", m_line.value))
        })
        .collect::<Result<Vec<u8>>>()?;

    let (port, port_range) = match port_field.split_once('/') {
        Some((p, r)) => (
            p.parse::<u16>().map_err(|_| Error::MalformedLine(m_line.line_no))?,
            Some(r.parse::<u16>().map_err(|_| Error::MalformedLine(m_line.line_no))?),
        ),
        None => (
            port_field.parse::<u16>().map_err(|_| Error::MalformedLine(m_line.line_no))?,
            None,
        ),
    };
    let protocol: MediaProtocol = proto_str.parse()?;
    let kind = MediaKind::from(media_str);

    let mut media_title = None;
    let mut connection_information = None;
    let mut bandwidth_informations = Vec::new();
    let mut attributes = Attributes::default();

    for line in &block[1..] {
        match line.letter {
            'i' => media_title = Some(line.value.to_string()),
            'c' => connection_information = Some(parse_connection(line.value, line.line_no)?),
            'b' => bandwidth_informations.push(parse_bandwidth(line.value, line.line_no)?),
            'k' => {}
            'a' => attributes.record(line.value)?,
            _ => return Err(Error::MalformedLine(line.line_no)),
        }
    }

    let common = MediaCommon {
        payloads,
        port,
        port_range,
        protocol,
        media_title,
        connection_information,
        bandwidth_informations,
        attributes,
    };
    type_media(kind, common, session_framerate)
}

fn parse_origin(value: &str, line_no: usize) -> Result<Origin> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(Error::MalformedLine(line_no));
    }
    Ok(Origin {
        username: fields[0].to_string(),
        session_id: fields[1].parse().map_err(|_| Error::MalformedLine(line_no))?,
        session_version: fields[2].parse().map_err(|_| Error::MalformedLine(line_no))?,
        net_type: NetType::from(fields[3]),
        addr_type: fields[4].parse()?,
        unicast_address: fields[5].to_string(),
    })
}

fn parse_connection(value: &str, line_no: usize) -> Result<ConnectionInformation> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(Error::MalformedLine(line_no));
    }
    ConnectionInformation::parse(fields[0], fields[1], fields[2])
}

fn parse_bandwidth(value: &str, line_no: usize) -> Result<BandwidthInformation> {
    let (bw_type, limit) = value.split_once(':').ok_or(Error::MalformedLine(line_no))?;
    Ok(BandwidthInformation {
        bw_type: bw_type.parse()?,
        limit: limit.parse().map_err(|_| Error::MalformedLine(line_no))?,
    })
}

fn parse_time_active(value: &str, line_no: usize) -> Result<TimeActive> {
    let mut fields = value.split_whitespace();
    let start = fields
        .next()
        .ok_or(Error::MalformedLine(line_no))?
        .parse()
        .map_err(|_| Error::MalformedLine(line_no))?;
    // The stop time is stored into `stop`, not `start`.
    let stop = fields
        .next()
        .ok_or(Error::MalformedLine(line_no))?
        .parse()
        .map_err(|_| Error::MalformedLine(line_no))?;
    Ok(TimeActive { start, stop })
}

fn parse_typed_time(raw: &str, line_no: usize) -> Result<i64> {
    let (num_str, unit) = match raw.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => (&raw[..raw.len() - 1], c),
        _ => (raw, 's'),
    };
    let num: i64 = num_str.parse().map_err(|_| Error::MalformedLine(line_no))?;
    let multiplier: i64 = match unit {
        'd' => 86400,
        'h' => 3600,
        'm' => 60,
        's' => 1,
        _ => return Err(Error::MalformedLine(line_no)),
    };
    num.checked_mul(multiplier)
        .ok_or_else(|| Error::malformed_compound("repeat-time", raw))
}

fn parse_repeat(value: &str, line_no: usize) -> Result<RepeatTime> {
    let mut fields = value.split_whitespace();
    let interval = parse_typed_time(fields.next().ok_or(Error::MalformedLine(line_no))?, line_no)?;
    let duration = parse_typed_time(fields.next().ok_or(Error::MalformedLine(line_no))?, line_no)?;
    let offsets = fields
        .map(|f| parse_typed_time(f, line_no))
        .collect::<Result<Vec<i64>>>()?;
    Ok(RepeatTime {
        interval,
        duration,
        offsets,
    })
}

fn parse_zone(value: &str, line_no: usize) -> Result<Vec<TimeZoneAdjustment>> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    if fields.is_empty() || fields.len() % 2 != 0 {
        return Err(Error::MalformedLine(line_no));
    }
    fields
        .chunks(2)
        .map(|pair| {
            Ok(TimeZoneAdjustment {
                adjustment_time: pair[0].parse().map_err(|_| Error::MalformedLine(line_no))?,
                offset: parse_typed_time(pair[1], line_no)?,
            })
        })
        .collect()
}

fn parse_key(value: &str) -> EncryptionKey {
    match value.split_once(':') {
        Some((method, key)) => EncryptionKey {
            method: method.to_string(),
            key: Some(key.to_string()),
        },
        None => EncryptionKey {
            method: value.to_string(),
            key: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_SDP: &str = "v=0\r\n\
o=- 123 123 IN IP4 192.168.56.1\r\n\
s=-\r\n\
c=IN IP4 239.1.2.3/32\r\n\
t=0 0\r\n";

    #[test]
    fn parses_minimal_session_with_no_media() {
        let session = parse(MINIMAL_SDP).unwrap();
        assert_eq!(session.protocol_version, 0);
        assert_eq!(session.origin.session_id, 123);
        assert_eq!(session.time_description.time_active.start, 0);
        assert_eq!(session.time_description.time_active.stop, 0);
        assert!(session.media_descriptions.is_empty());
    }

    #[test]
    fn time_line_does_not_swap_start_and_stop() {
        let sdp = MINIMAL_SDP.replace("t=0 0", "t=100 200");
        let session = parse(&sdp).unwrap();
        assert_eq!(session.time_description.time_active.start, 100);
        assert_eq!(session.time_description.time_active.stop, 200);
    }

    #[test]
    fn rejects_malformed_line() {
        let sdp = "v=0\r\nbroken-line\r\n";
        assert!(matches!(parse(sdp), Err(Error::MalformedLine(2))));
    }

    #[test]
    fn rejects_missing_first_version_line() {
        let sdp = "o=- 1 1 IN IP4 1.2.3.4\r\ns=-\r\nt=0 0\r\n";
        assert!(parse(sdp).is_err());
    }

    #[test]
    fn media_without_connection_info_anywhere_fails() {
        let sdp = "v=0\r\no=- 1 1 IN IP4 1.2.3.4\r\ns=-\r\nt=0 0\r\nm=video 5000 RTP/AVP 96\r\n";
        assert!(parse(sdp).is_err());
    }

    #[test]
    fn media_inherits_session_connection_information() {
        let sdp = format!(
            "{MINIMAL_SDP}m=video 5000 RTP/AVP 96\r\na=fmtp:96 SSN=ST2110-20:2017; exactframerate=25; depth=10; \
PM=2110GPM; sampling=YCbCr-4:2:2; colorimetry=BT709;\r\n"
        );
        let session = parse(&sdp).unwrap();
        assert_eq!(session.media_descriptions.len(), 1);
        let (common, _) = session.media_descriptions[0].as_video().unwrap();
        assert!(common.connection_information.is_none());
        assert_eq!(
            session.connection_information_for(&session.media_descriptions[0]),
            session.connection_information.as_ref()
        );
    }

    #[test]
    fn repeat_time_is_unsupported() {
        let sdp = MINIMAL_SDP.to_string() + "r=7d 1h 0 25h\r\n";
        assert!(matches!(parse(&sdp), Err(Error::Unsupported(_))));
    }

    #[test]
    fn fmtp_payload_type_outside_media_line_is_rejected() {
        let sdp = format!(
            "{MINIMAL_SDP}m=video 5000 RTP/AVP 96\r\na=fmtp:97 SSN=ST2110-20:2017; exactframerate=25; \
depth=10; PM=2110GPM; sampling=YCbCr-4:2:2; colorimetry=BT709;\r\n"
        );
        assert!(matches!(parse(&sdp), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn rtpmap_payload_type_outside_media_line_is_rejected() {
        let sdp = format!(
            "{MINIMAL_SDP}m=audio 5030 RTP/AVP 97\r\na=rtpmap:98 L24/48000/2\r\n"
        );
        assert!(matches!(parse(&sdp), Err(Error::InvariantViolation(_))));
    }
}
