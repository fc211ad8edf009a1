//! The closed ST 2110 vocabularies, bit-exact against `SDPEnums.h`/
//! `SDPParser.cpp`'s `Set*` family.

use crate::errors::{Error, Result};
use std::fmt;
use std::str::FromStr;

macro_rules! closed_enum {
    ($name:ident, $field:literal, { $($variant:ident => $literal:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($literal => Ok($name::$variant)),+,
                    other => Err(Error::unknown_enum($field, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($name::$variant => write!(f, $literal)),+
                }
            }
        }
    };
}

closed_enum!(Sampling, "sampling", {
    Ycbcr444 => "YCbCr-4:4:4",
    Ycbcr422 => "YCbCr-4:2:2",
    Ycbcr420 => "YCbCr-4:2:0",
    Clycbcr444 => "CLYCbCr-4:4:4",
    Clycbcr422 => "CLYCbCr-4:2:2",
    Clycbcr420 => "CLYCbCr-4:2:0",
    Ictcp444 => "ICtCp-4:4:4",
    Ictcp422 => "ICtCp-4:2:2",
    Ictcp420 => "ICtCp-4:2:0",
    Rgb => "RGB",
    Xyz => "XYZ",
    // Syntactically valid, but `crate::st2110::video` rejects it as
    // `Error::Unsupported` the moment it's observed.
    Key => "KEY",
});

closed_enum!(Colorimetry, "colorimetry", {
    Bt601 => "BT601",
    Bt709 => "BT709",
    Bt2020 => "BT2020",
    Bt2100 => "BT2100",
    St20651 => "ST2065-1",
    St20653 => "ST2065-3",
    Unspecified => "UNSPECIFIED",
    Xyz => "XYZ",
    Alpha => "ALPHA",
});

closed_enum!(PackingMode, "PM", {
    Gpm => "2110GPM",
    Bpm => "2110BPM",
});

closed_enum!(Tcs, "TCS", {
    Sdr => "SDR",
    Pq => "PQ",
    Hlg => "HLG",
    Linear => "LINEAR",
    Bt2100LinPq => "BT2100LINPQ",
    Bt2100LinHlg => "BT2100LINHLG",
    St20651 => "ST2065-1",
    St4281 => "ST428-1",
    Density => "DENSITY",
    St2115LogS3 => "ST2115LOGS3",
    Unspecified => "UNSPECIFIED",
});

closed_enum!(Range, "RANGE", {
    Narrow => "NARROW",
    Full => "FULL",
    FullProtect => "FULLPROTECT",
});

closed_enum!(Tp, "TP", {
    Narrow => "2110TPN",
    NarrowLinear => "2110TPNL",
    Wide => "2110TPW",
});

/// Derived from `SSN`, never parsed as a standalone literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standard {
    Uncompressed,
    Jpegxs,
}

/// `depth ∈ {8, 10, 12, 16, 16f}`; `16f` decodes to `Float16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    Int8,
    Int10,
    Int12,
    Int16,
    Float16,
}

impl FromStr for Depth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "8" => Ok(Depth::Int8),
            "10" => Ok(Depth::Int10),
            "12" => Ok(Depth::Int12),
            "16" => Ok(Depth::Int16),
            "16f" => Ok(Depth::Float16),
            other => Err(Error::unknown_enum("depth", other)),
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depth::Int8 => write!(f, "8"),
            Depth::Int10 => write!(f, "10"),
            Depth::Int12 => write!(f, "12"),
            Depth::Int16 => write!(f, "16"),
            Depth::Float16 => write!(f, "16f"),
        }
    }
}

/// Routes `SSN` to a [`Standard`]. Absence of the field defaults to
/// `Jpegxs`.
pub fn standard_from_ssn(ssn: Option<&str>) -> Result<Standard> {
    match ssn {
        None => Ok(Standard::Jpegxs),
        Some(ssn) if ssn.starts_with("ST2110-20:") => Ok(Standard::Uncompressed),
        Some(ssn) if ssn.starts_with("ST2110-22:") => Ok(Standard::Jpegxs),
        Some(other) => Err(Error::unknown_enum("SSN", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_round_trips() {
        for literal in ["YCbCr-4:2:2", "ICtCp-4:4:4", "RGB", "KEY"] {
            let sampling: Sampling = literal.parse().unwrap();
            assert_eq!(sampling.to_string(), literal);
        }
    }

    #[test]
    fn depth_decodes_float16_from_16f() {
        assert_eq!("16f".parse::<Depth>().unwrap(), Depth::Float16);
        assert_eq!(Depth::Float16.to_string(), "16f");
    }

    #[test]
    fn unknown_literal_is_rejected() {
        let err = "BT9999".parse::<Colorimetry>().unwrap_err();
        assert!(matches!(err, Error::UnknownEnumValue { .. }));
    }

    #[test]
    fn ssn_routes_to_standard() {
        assert_eq!(
            standard_from_ssn(Some("ST2110-20:2017")).unwrap(),
            Standard::Uncompressed
        );
        assert_eq!(
            standard_from_ssn(Some("ST2110-22:2022")).unwrap(),
            Standard::Jpegxs
        );
        assert_eq!(standard_from_ssn(None).unwrap(), Standard::Jpegxs);
        assert!(standard_from_ssn(Some("ST2110-30:2017")).is_err());
    }
}
