use crate::errors::{Error, Result};
use crate::session::{AddrType, NetType};
use std::fmt;
use std::str::FromStr;

/// `incl` or `excl` from RFC 4570's source-filter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Incl,
    Excl,
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Incl => write!(f, "incl"),
            FilterMode::Excl => write!(f, "excl"),
        }
    }
}

/// `a=source-filter: <mode> <net-type> <addr-type> <dest-address> <src-list>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFilter {
    pub filter_mode: FilterMode,
    pub net_type: NetType,
    pub addr_type: AddrType,
    pub dest_address: String,
    pub src_list: Vec<String>,
}

impl FromStr for SourceFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut fields = s.trim().split_whitespace();
        let mode = fields
            .next()
            .ok_or_else(|| Error::malformed_compound("source-filter", s))?;
        let filter_mode = match mode {
            "incl" => FilterMode::Incl,
            "excl" => FilterMode::Excl,
            other => return Err(Error::unknown_enum("source-filter mode", other)),
        };
        let net_type = fields
            .next()
            .ok_or_else(|| Error::malformed_compound("source-filter", s))?;
        let addr_type: AddrType = fields
            .next()
            .ok_or_else(|| Error::malformed_compound("source-filter", s))?
            .parse()?;
        let dest_address = fields
            .next()
            .ok_or_else(|| Error::malformed_compound("source-filter", s))?
            .to_string();
        let src_list: Vec<String> = fields.map(str::to_string).collect();
        if src_list.is_empty() {
            return Err(Error::malformed_compound("source-filter", s));
        }
        Ok(SourceFilter {
            filter_mode,
            net_type: NetType::from(net_type),
            addr_type,
            dest_address,
            src_list,
        })
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a=source-filter:{} {} {} {} {}",
            self.filter_mode,
            self.net_type,
            self.addr_type,
            self.dest_address,
            self.src_list.join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_source() {
        let filter: SourceFilter = " incl IN IP4 239.1.2.3 192.168.56.1".parse().unwrap();
        assert_eq!(filter.filter_mode, FilterMode::Incl);
        assert_eq!(filter.dest_address, "239.1.2.3");
        assert_eq!(filter.src_list, vec!["192.168.56.1".to_string()]);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!("maybe IN IP4 239.1.2.3 192.168.56.1"
            .parse::<SourceFilter>()
            .is_err());
    }
}
