//! The uncompressed (ST 2110-20) vs JPEG-XS (ST 2110-22) video typing
//! branch.

use crate::attributes::{Fmtp, FmtpParams};
use crate::errors::{Error, Result};
use crate::st2110::enums::{standard_from_ssn, Colorimetry, Depth, PackingMode, Range, Sampling, Standard, Tcs, Tp};

#[derive(Debug, Clone, PartialEq)]
pub struct VideoDescription {
    pub standard: Standard,
    pub framerate_num: u32,
    pub framerate_den: u32,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub sampling: Option<Sampling>,
    pub depth: Option<Depth>,
    pub colorimetry: Option<Colorimetry>,
    pub packing_mode: Option<PackingMode>,
    pub tcs: Tcs,
    pub range: Range,
    pub interlaced: bool,
    pub segmented: bool,
    pub par: (u32, u32),
    pub max_udp: u32,
    pub tp: Option<Tp>,
    pub cmax: Option<u32>,
}

/// Parses `30000/1001`, `30000.1001`, and bare integers. Both fractional
/// spellings are accepted on parse, but only the slash form is emitted
/// back out (`crate::emit`).
pub fn parse_framerate(raw: &str) -> Result<(u32, u32)> {
    let raw = raw.trim();
    if let Some((num, den)) = raw.split_once('/') {
        return Ok((
            num.parse().map_err(|_| Error::malformed_compound("framerate", raw))?,
            den.parse().map_err(|_| Error::malformed_compound("framerate", raw))?,
        ));
    }
    if let Some((num, den)) = raw.split_once('.') {
        return Ok((
            num.parse().map_err(|_| Error::malformed_compound("framerate", raw))?,
            den.parse().map_err(|_| Error::malformed_compound("framerate", raw))?,
        ));
    }
    let num: u32 = raw.parse().map_err(|_| Error::malformed_compound("framerate", raw))?;
    Ok((num, 1))
}

fn parse_par(raw: &str) -> Result<(u32, u32)> {
    let (w, h) = raw
        .split_once(':')
        .ok_or_else(|| Error::malformed_compound("PAR", raw))?;
    Ok((
        w.parse().map_err(|_| Error::malformed_compound("PAR", raw))?,
        h.parse().map_err(|_| Error::malformed_compound("PAR", raw))?,
    ))
}

/// Runs the video-typing algorithm against a media block's first `fmtp`
/// entry and its session/media-level `a=framerate:` value, if any.
pub fn type_video(fmtp: &Fmtp, framerate_attr: Option<f64>) -> Result<VideoDescription> {
    let params = FmtpParams::parse(&fmtp.config);
    let standard = standard_from_ssn(params.raw("SSN"))?;

    match standard {
        Standard::Uncompressed => {
            for field in ["exactframerate", "depth", "colorimetry", "PM", "sampling"] {
                params.require(field, "uncompressed video")?;
            }
        }
        Standard::Jpegxs => {
            params.require("TP", "JPEG-XS video")?;
        }
    }

    let (framerate_num, framerate_den) = resolve_framerate(&params, framerate_attr, standard)?;

    let sampling = match params.raw("sampling") {
        Some(raw) => {
            let sampling: Sampling = raw.parse()?;
            if sampling == Sampling::Key {
                return Err(Error::Unsupported(
                    "KEY sampling declared in SDP is not supported".to_string(),
                ));
            }
            Some(sampling)
        }
        None => None,
    };
    let depth = params.raw("depth").map(str::parse).transpose()?;
    let colorimetry = params.raw("colorimetry").map(str::parse).transpose()?;
    let packing_mode = params.raw("PM").map(str::parse).transpose()?;
    let tp = params.raw("TP").map(str::parse).transpose()?;
    let cmax = params
        .raw("CMAX")
        .map(|raw| raw.parse::<u32>().map_err(|_| Error::malformed_compound("CMAX", raw)))
        .transpose()?;

    let tcs: Tcs = match params.raw("TCS") {
        Some(raw) => raw.parse()?,
        None => Tcs::Sdr,
    };
    let range: Range = match params.raw("RANGE") {
        Some(raw) => raw.parse()?,
        None => Range::Narrow,
    };
    if colorimetry == Some(Colorimetry::Bt2100) && range == Range::FullProtect {
        return Err(Error::InvariantViolation(
            "BT2100 colorimetry cannot be paired with FULLPROTECT range".to_string(),
        ));
    }

    let par = match params.raw("PAR") {
        Some(raw) => parse_par(raw)?,
        None => (1, 1),
    };
    let width = params
        .raw("width")
        .map(|raw| raw.parse::<u32>().map_err(|_| Error::malformed_compound("width", raw)))
        .transpose()?;
    let height = params
        .raw("height")
        .map(|raw| raw.parse::<u32>().map_err(|_| Error::malformed_compound("height", raw)))
        .transpose()?;

    Ok(VideoDescription {
        standard,
        framerate_num,
        framerate_den,
        width,
        height,
        sampling,
        depth,
        colorimetry,
        packing_mode,
        tcs,
        range,
        interlaced: params.contains("interlace"),
        segmented: params.contains("segmented"),
        par,
        max_udp: 1460,
        tp,
        cmax,
    })
}

fn resolve_framerate(
    params: &FmtpParams,
    framerate_attr: Option<f64>,
    standard: Standard,
) -> Result<(u32, u32)> {
    let fmtp_framerate = params.raw("exactframerate").map(parse_framerate).transpose()?;
    match (fmtp_framerate, framerate_attr) {
        (Some(fmtp_fr), Some(attr_fr)) => {
            let fmtp_decimal = fmtp_fr.0 as f64 / fmtp_fr.1 as f64;
            if (fmtp_decimal - attr_fr).abs() > 1e-6 {
                return Err(Error::InvariantViolation(
                    "exactframerate and a=framerate attribute disagree".to_string(),
                ));
            }
            Ok(fmtp_fr)
        }
        (Some(fmtp_fr), None) => Ok(fmtp_fr),
        (None, Some(attr_fr)) => Ok((attr_fr.round() as u32, 1)),
        (None, None) => Err(Error::missing(
            "exactframerate",
            match standard {
                Standard::Uncompressed => "uncompressed video",
                Standard::Jpegxs => "JPEG-XS video",
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_framerate_spellings() {
        assert_eq!(parse_framerate("25").unwrap(), (25, 1));
        assert_eq!(parse_framerate("30000/1001").unwrap(), (30000, 1001));
        assert_eq!(parse_framerate("30000.1001").unwrap(), (30000, 1001));
    }

    #[test]
    fn uncompressed_1080p50_video() {
        let fmtp = Fmtp {
            payload_type: 96,
            config: "sampling=YCbCr-4:2:2; width=1920; height=1080; exactframerate=50; depth=10; \
TCS=SDR; colorimetry=BT709; PM=2110GPM; SSN=ST2110-20:2017; TP=2110TPN;"
                .to_string(),
        };
        let video = type_video(&fmtp, None).unwrap();
        assert_eq!(video.standard, Standard::Uncompressed);
        assert_eq!(video.sampling, Some(Sampling::Ycbcr422));
        assert_eq!(video.depth, Some(Depth::Int10));
        assert_eq!(video.colorimetry, Some(Colorimetry::Bt709));
        assert_eq!(video.packing_mode, Some(PackingMode::Gpm));
        assert_eq!(video.tcs, Tcs::Sdr);
        assert_eq!((video.framerate_num, video.framerate_den), (50, 1));
    }

    #[test]
    fn jpegxs_fractional_framerate() {
        let fmtp = Fmtp {
            payload_type: 96,
            config: "SSN=ST2110-22:2022; TP=2110TPNL; exactframerate=30000/1001;".to_string(),
        };
        let video = type_video(&fmtp, None).unwrap();
        assert_eq!(video.standard, Standard::Jpegxs);
        assert_eq!(video.tp, Some(Tp::NarrowLinear));
        assert_eq!((video.framerate_num, video.framerate_den), (30000, 1001));
    }

    #[test]
    fn bt2100_with_fullprotect_is_invariant_violation() {
        let fmtp = Fmtp {
            payload_type: 96,
            config: "SSN=ST2110-20:2017; exactframerate=25; depth=10; PM=2110GPM; \
sampling=YCbCr-4:2:2; colorimetry=BT2100; RANGE=FULLPROTECT;"
                .to_string(),
        };
        assert!(matches!(
            type_video(&fmtp, None),
            Err(Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn unknown_colorimetry_is_rejected() {
        let fmtp = Fmtp {
            payload_type: 96,
            config: "SSN=ST2110-20:2017; exactframerate=25; depth=10; PM=2110GPM; \
sampling=YCbCr-4:2:2; colorimetry=BT9999;"
                .to_string(),
        };
        assert!(matches!(
            type_video(&fmtp, None),
            Err(Error::UnknownEnumValue { .. })
        ));
    }

    #[test]
    fn key_sampling_is_unsupported() {
        let fmtp = Fmtp {
            payload_type: 96,
            config: "SSN=ST2110-20:2017; exactframerate=25; depth=10; PM=2110GPM; \
colorimetry=BT709; sampling=KEY;"
                .to_string(),
        };
        assert!(matches!(type_video(&fmtp, None), Err(Error::Unsupported(_))));
    }

    #[test]
    fn missing_uncompressed_field_is_reported() {
        let fmtp = Fmtp {
            payload_type: 96,
            config: "SSN=ST2110-20:2017; exactframerate=25; depth=10;".to_string(),
        };
        assert!(matches!(
            type_video(&fmtp, None),
            Err(Error::MissingRequired { .. })
        ));
    }
}
