use crate::errors::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// `a=rtpmap:<payload type> <encoding name>/<clock rate>[/<encoding parameters>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpMap {
    pub payload_type: u8,
    pub encoding_name: String,
    pub clock_rate: u32,
    pub encoding_params: Option<String>,
}

impl FromStr for RtpMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (pt, rest) = s
            .split_once(' ')
            .ok_or_else(|| Error::malformed_compound("rtpmap", s))?;
        let payload_type = pt
            .parse::<u8>()
            .map_err(|_| Error::malformed_compound("rtpmap", s))?;
        let mut fields = rest.splitn(3, '/');
        let encoding_name = fields
            .next()
            .ok_or_else(|| Error::malformed_compound("rtpmap", s))?
            .to_string();
        let clock_rate = fields
            .next()
            .ok_or_else(|| Error::malformed_compound("rtpmap", s))?
            .parse::<u32>()
            .map_err(|_| Error::malformed_compound("rtpmap", s))?;
        let encoding_params = fields.next().map(str::to_string);
        Ok(RtpMap {
            payload_type,
            encoding_name,
            clock_rate,
            encoding_params,
        })
    }
}

impl fmt::Display for RtpMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a=rtpmap:{} {}/{}",
            self.payload_type, self.encoding_name, self.clock_rate
        )?;
        if let Some(params) = &self.encoding_params {
            write!(f, "/{params}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_audio_rtpmap() {
        let rtpmap: RtpMap = "97 L24/48000/2".parse().unwrap();
        assert_eq!(rtpmap.payload_type, 97);
        assert_eq!(rtpmap.encoding_name, "L24");
        assert_eq!(rtpmap.clock_rate, 48000);
        assert_eq!(rtpmap.encoding_params.as_deref(), Some("2"));
    }

    #[test]
    fn parses_video_rtpmap_without_params() {
        let rtpmap: RtpMap = "96 raw/90000".parse().unwrap();
        assert_eq!(rtpmap.encoding_params, None);
        assert_eq!(rtpmap.to_string(), "a=rtpmap:96 raw/90000");
    }

    #[test]
    fn rejects_missing_clock_rate() {
        assert!("96 raw".parse::<RtpMap>().is_err());
    }
}
