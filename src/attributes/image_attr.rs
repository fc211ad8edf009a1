use crate::errors::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// `a=imageattr:<pt> <dir1> <attrs1> [<dir2> <attrs2>]`, per RFC 6236. The
/// per-direction attribute blobs are kept raw; this crate has no downstream
/// consumer that needs them parsed further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttr {
    pub payload_type: Option<u8>,
    pub dir1: String,
    pub attrs1: String,
    pub dir2: Option<String>,
    pub attrs2: Option<String>,
}

impl FromStr for ImageAttr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut fields = s.splitn(2, ' ');
        let pt_field = fields
            .next()
            .ok_or_else(|| Error::malformed_compound("imageattr", s))?;
        let payload_type = match pt_field {
            "*" => None,
            other => Some(
                other
                    .parse::<u8>()
                    .map_err(|_| Error::malformed_compound("imageattr", s))?,
            ),
        };
        let rest = fields
            .next()
            .ok_or_else(|| Error::malformed_compound("imageattr", s))?;
        let (dir1, attrs1, remainder) = split_direction(rest, s)?;
        let (dir2, attrs2) = match remainder {
            Some(remainder) => {
                let (dir2, attrs2, trailing) = split_direction(remainder, s)?;
                if trailing.is_some() {
                    return Err(Error::malformed_compound("imageattr", s));
                }
                (Some(dir2), Some(attrs2))
            }
            None => (None, None),
        };
        Ok(ImageAttr {
            payload_type,
            dir1,
            attrs1,
            dir2,
            attrs2,
        })
    }
}

fn split_direction<'a>(s: &'a str, whole: &str) -> Result<(String, String, Option<&'a str>)> {
    let s = s.trim_start();
    let (dir, rest) = s
        .split_once(' ')
        .ok_or_else(|| Error::malformed_compound("imageattr", whole))?;
    if dir != "send" && dir != "recv" {
        return Err(Error::unknown_enum("imageattr direction", dir));
    }
    let rest = rest.trim_start();
    if let Some(boundary) = rest.find([' ']) {
        let after = rest[boundary..].trim_start();
        if after.starts_with("send") || after.starts_with("recv") {
            return Ok((dir.to_string(), rest[..boundary].to_string(), Some(after)));
        }
    }
    Ok((dir.to_string(), rest.to_string(), None))
}

impl fmt::Display for ImageAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a=imageattr:")?;
        match self.payload_type {
            Some(pt) => write!(f, "{pt}")?,
            None => write!(f, "*")?,
        }
        write!(f, " {} {}", self.dir1, self.attrs1)?;
        if let (Some(dir2), Some(attrs2)) = (&self.dir2, &self.attrs2) {
            write!(f, " {dir2} {attrs2}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_direction() {
        let attr: ImageAttr = "97 send [x=1920,y=1080]".parse().unwrap();
        assert_eq!(attr.payload_type, Some(97));
        assert_eq!(attr.dir1, "send");
        assert_eq!(attr.attrs1, "[x=1920,y=1080]");
        assert_eq!(attr.dir2, None);
    }

    #[test]
    fn parses_wildcard_payload() {
        let attr: ImageAttr = "* send [x=1920,y=1080] recv [x=1280,y=720]"
            .parse()
            .unwrap();
        assert_eq!(attr.payload_type, None);
        assert_eq!(attr.dir2.as_deref(), Some("recv"));
        assert_eq!(attr.attrs2.as_deref(), Some("[x=1280,y=720]"));
    }
}
