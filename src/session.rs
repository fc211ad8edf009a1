//! Generic RFC 8866 data model. Everything here is SDP-general; ST 2110
//! specifics live in [`crate::st2110`] and [`crate::media`].

use crate::errors::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// `nettype` token. SDP only defines `IN`, but the grammar is open-ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetType {
    In,
    Other(String),
}

impl From<&str> for NetType {
    fn from(value: &str) -> Self {
        match value {
            "IN" => NetType::In,
            other => NetType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetType::In => write!(f, "IN"),
            NetType::Other(s) => write!(f, "{s}"),
        }
    }
}

/// `addrtype` token, carrying an integer IP-version code (4 or 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrType {
    Ip4,
    Ip6,
}

impl AddrType {
    pub fn version(&self) -> u8 {
        match self {
            AddrType::Ip4 => 4,
            AddrType::Ip6 => 6,
        }
    }
}

impl FromStr for AddrType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "IP4" => Ok(AddrType::Ip4),
            "IP6" => Ok(AddrType::Ip6),
            other => Err(Error::unknown_enum("addrtype", other)),
        }
    }
}

impl fmt::Display for AddrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddrType::Ip4 => write!(f, "IP4"),
            AddrType::Ip6 => write!(f, "IP6"),
        }
    }
}

/// `o=<username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub username: String,
    pub session_id: u64,
    pub session_version: u64,
    pub net_type: NetType,
    pub addr_type: AddrType,
    pub unicast_address: String,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "o={} {} {} {} {} {}",
            self.username,
            self.session_id,
            self.session_version,
            self.net_type,
            self.addr_type,
            self.unicast_address
        )
    }
}

/// `c=<nettype> <addrtype> <connection-address>`, where the address may
/// carry a `/ttl[/range]` suffix for multicast groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInformation {
    pub net_type: NetType,
    pub addr_type: AddrType,
    pub connection_address: String,
    pub ttl: Option<u8>,
    pub range: Option<u32>,
}

impl ConnectionInformation {
    pub fn parse(net_type: &str, addr_type: &str, address_field: &str) -> Result<Self> {
        let addr_type: AddrType = addr_type.parse()?;
        let mut parts = address_field.split('/');
        let connection_address = parts
            .next()
            .ok_or_else(|| Error::malformed_compound("connection-address", address_field))?
            .to_string();
        let ttl = match (addr_type, parts.next()) {
            (AddrType::Ip4, Some(ttl)) => Some(
                ttl.parse::<u8>()
                    .map_err(|_| Error::malformed_compound("connection-address", address_field))?,
            ),
            (AddrType::Ip4, None) => None,
            (AddrType::Ip6, Some(_)) => {
                return Err(Error::malformed_compound("connection-address", address_field));
            }
            (AddrType::Ip6, None) => None,
        };
        let range = match parts.next() {
            Some(r) => Some(
                r.parse::<u32>()
                    .map_err(|_| Error::malformed_compound("connection-address", address_field))?,
            ),
            None => None,
        };
        if parts.next().is_some() {
            return Err(Error::malformed_compound("connection-address", address_field));
        }
        Ok(ConnectionInformation {
            net_type: NetType::from(net_type),
            addr_type,
            connection_address,
            ttl,
            range,
        })
    }
}

impl fmt::Display for ConnectionInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c={} {} {}", self.net_type, self.addr_type, self.connection_address)?;
        if let Some(ttl) = self.ttl {
            write!(f, "/{ttl}")?;
        }
        if let Some(range) = self.range {
            write!(f, "/{range}")?;
        }
        Ok(())
    }
}

/// `b=<bwtype>:<bandwidth>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BandwidthType {
    Ct,
    As,
    Experimental(String),
}

impl FromStr for BandwidthType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CT" => Ok(BandwidthType::Ct),
            "AS" => Ok(BandwidthType::As),
            other if other.starts_with("X-") => Ok(BandwidthType::Experimental(other.to_string())),
            other => Err(Error::unknown_enum("bwtype", other)),
        }
    }
}

impl fmt::Display for BandwidthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandwidthType::Ct => write!(f, "CT"),
            BandwidthType::As => write!(f, "AS"),
            BandwidthType::Experimental(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandwidthInformation {
    pub bw_type: BandwidthType,
    pub limit: u64,
}

impl fmt::Display for BandwidthInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b={}:{}", self.bw_type, self.limit)
    }
}

/// `t=<start-time> <stop-time>`. `0 0` means a permanent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeActive {
    pub start: u64,
    pub stop: u64,
}

impl fmt::Display for TimeActive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={} {}", self.start, self.stop)
    }
}

/// Modeled but not accepted by the parser: a session carrying a non-empty
/// `r=` line fails with `Error::Unsupported`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepeatTime {
    pub interval: i64,
    pub duration: i64,
    pub offsets: Vec<i64>,
}

/// Modeled but not accepted by the parser; see [`RepeatTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeZoneAdjustment {
    pub adjustment_time: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeDescription {
    pub time_active: TimeActive,
    pub repeat_times: Vec<RepeatTime>,
    pub time_zone_adjustments: Vec<TimeZoneAdjustment>,
}

/// `k=<method>[:<key>]`, obsolete in RFC 8866 but still must parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionKey {
    pub method: String,
    pub key: Option<String>,
}

impl fmt::Display for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k={}", self.method)?;
        if let Some(key) = &self.key {
            write!(f, ":{key}")?;
        }
        Ok(())
    }
}

/// The root record produced by [`crate::parse`]. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub protocol_version: u32,
    pub origin: Origin,
    pub session_name: String,
    pub session_information: Option<String>,
    pub uri: Option<url::Url>,
    pub email_address: Vec<String>,
    pub phone_number: Vec<String>,
    pub connection_information: Option<ConnectionInformation>,
    pub bandwidth_informations: Vec<BandwidthInformation>,
    pub time_description: TimeDescription,
    pub encryption_key: Option<EncryptionKey>,
    pub attributes: crate::attributes::Attributes,
    pub media_descriptions: Vec<crate::media::MediaDescription>,
}

impl Session {
    /// Every media block either carries its own connection information or
    /// inherits the session's.
    pub fn connection_information_for(
        &self,
        media: &crate::media::MediaDescription,
    ) -> Option<&ConnectionInformation> {
        media
            .common()
            .connection_information
            .as_ref()
            .or(self.connection_information.as_ref())
    }
}
