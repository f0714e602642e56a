// SPDX-License-Identifier: Apache-2.0

use std::net::Ipv6Addr;

use crate::{
    buffer::{Buffer, BufferMut},
    DhcpError, DhcpV6OptionValue, DhcpV6Options, ErrorContext, ErrorKind,
};

fn validate_lifetimes(
    preferred_sec: u32,
    valid_sec: u32,
) -> Result<(), DhcpError> {
    if preferred_sec > valid_sec {
        return Err(DhcpError::new(
            ErrorKind::InvalidLifetimes,
            format!(
                "Preferred lifetime {preferred_sec}s exceeds valid lifetime \
                 {valid_sec}s"
            ),
        ));
    }
    Ok(())
}

fn validate_ipv6(addr: Ipv6Addr) -> Result<(), DhcpError> {
    if addr.to_ipv4_mapped().is_some() {
        return Err(DhcpError::new(
            ErrorKind::InvalidIp,
            format!("{addr} is an IPv4-mapped address"),
        ));
    }
    Ok(())
}

/// OPTION_IA_NA, RFC 8415 - 21.4. An identity association for
/// non-temporary addresses: IAID, T1/T2 renewal timers and encapsulated
/// options, normally one or more OPTION_IAADDR.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[non_exhaustive]
pub struct DhcpV6OptionIaNa {
    pub iaid: [u8; 4],
    pub t1_sec: u32,
    pub t2_sec: u32,
    pub options: DhcpV6Options,
}

impl DhcpV6OptionIaNa {
    pub fn new(
        iaid: [u8; 4],
        t1_sec: u32,
        t2_sec: u32,
        options: DhcpV6Options,
    ) -> Self {
        Self {
            iaid,
            t1_sec,
            t2_sec,
            options,
        }
    }

    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        if raw.len() < 12 {
            return Err(DhcpError::new(
                ErrorKind::InvalidIaNa,
                format!(
                    "OPTION_IA_NA requires at least 12 bytes, got {}",
                    raw.len()
                ),
            ));
        }
        let mut buf = Buffer::new(raw);
        let mut iaid = [0u8; 4];
        iaid.copy_from_slice(
            buf.get_bytes(4).context("Invalid OPTION_IA_NA IAID")?,
        );
        Ok(Self {
            iaid,
            t1_sec: buf.get_u32_be().context("Invalid OPTION_IA_NA T1")?,
            t2_sec: buf.get_u32_be().context("Invalid OPTION_IA_NA T2")?,
            options: DhcpV6Options::parse(&mut buf)
                .context("Invalid OPTION_IA_NA options")?,
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_bytes(&self.iaid);
        buf.write_u32_be(self.t1_sec);
        buf.write_u32_be(self.t2_sec);
        self.options.emit(buf);
    }
}

impl DhcpV6OptionValue for DhcpV6OptionIaNa {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }
}

/// OPTION_IA_TA, RFC 8415 - 21.5. An identity association for temporary
/// addresses. Unlike IA_NA, it carries no T1/T2 timers.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[non_exhaustive]
pub struct DhcpV6OptionIaTa {
    pub iaid: [u8; 4],
    pub options: DhcpV6Options,
}

impl DhcpV6OptionIaTa {
    pub fn new(iaid: [u8; 4], options: DhcpV6Options) -> Self {
        Self { iaid, options }
    }

    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        if raw.len() < 4 {
            return Err(DhcpError::new(
                ErrorKind::InvalidIaTa,
                format!(
                    "OPTION_IA_TA requires at least 4 bytes, got {}",
                    raw.len()
                ),
            ));
        }
        let mut buf = Buffer::new(raw);
        let mut iaid = [0u8; 4];
        iaid.copy_from_slice(
            buf.get_bytes(4).context("Invalid OPTION_IA_TA IAID")?,
        );
        Ok(Self {
            iaid,
            options: DhcpV6Options::parse(&mut buf)
                .context("Invalid OPTION_IA_TA options")?,
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_bytes(&self.iaid);
        self.options.emit(buf);
    }
}

impl DhcpV6OptionValue for DhcpV6OptionIaTa {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }
}

/// OPTION_IA_PD, RFC 3633 - 9. An identity association for delegated
/// prefixes, normally carrying one or more OPTION_IAPREFIX.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[non_exhaustive]
pub struct DhcpV6OptionIaPd {
    pub iaid: [u8; 4],
    pub t1_sec: u32,
    pub t2_sec: u32,
    pub options: DhcpV6Options,
}

impl DhcpV6OptionIaPd {
    pub fn new(
        iaid: [u8; 4],
        t1_sec: u32,
        t2_sec: u32,
        options: DhcpV6Options,
    ) -> Self {
        Self {
            iaid,
            t1_sec,
            t2_sec,
            options,
        }
    }

    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        if raw.len() < 12 {
            return Err(DhcpError::new(
                ErrorKind::InvalidIaPd,
                format!(
                    "OPTION_IA_PD requires at least 12 bytes, got {}",
                    raw.len()
                ),
            ));
        }
        let mut buf = Buffer::new(raw);
        let mut iaid = [0u8; 4];
        iaid.copy_from_slice(
            buf.get_bytes(4).context("Invalid OPTION_IA_PD IAID")?,
        );
        Ok(Self {
            iaid,
            t1_sec: buf.get_u32_be().context("Invalid OPTION_IA_PD T1")?,
            t2_sec: buf.get_u32_be().context("Invalid OPTION_IA_PD T2")?,
            options: DhcpV6Options::parse(&mut buf)
                .context("Invalid OPTION_IA_PD options")?,
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_bytes(&self.iaid);
        buf.write_u32_be(self.t1_sec);
        buf.write_u32_be(self.t2_sec);
        self.options.emit(buf);
    }
}

impl DhcpV6OptionValue for DhcpV6OptionIaPd {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }
}

/// OPTION_IAADDR, RFC 8415 - 21.6. An IPv6 address with its preferred and
/// valid lifetimes, encapsulated in an IA_NA or IA_TA option.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6OptionIaAddr {
    pub address: Ipv6Addr,
    pub preferred_lifetime_sec: u32,
    pub valid_lifetime_sec: u32,
    pub options: DhcpV6Options,
}

impl Default for DhcpV6OptionIaAddr {
    fn default() -> Self {
        Self {
            address: Ipv6Addr::UNSPECIFIED,
            preferred_lifetime_sec: 0,
            valid_lifetime_sec: 0,
            options: DhcpV6Options::new(),
        }
    }
}

impl DhcpV6OptionIaAddr {
    /// Fails with [ErrorKind::InvalidLifetimes] when the preferred
    /// lifetime exceeds the valid lifetime, and with [ErrorKind::InvalidIp]
    /// when the address is IPv4-mapped.
    pub fn new(
        address: Ipv6Addr,
        preferred_lifetime_sec: u32,
        valid_lifetime_sec: u32,
        options: DhcpV6Options,
    ) -> Result<Self, DhcpError> {
        validate_ipv6(address)
            .context("Invalid OPTION_IAADDR address")?;
        validate_lifetimes(preferred_lifetime_sec, valid_lifetime_sec)
            .context("Invalid OPTION_IAADDR lifetimes")?;
        Ok(Self {
            address,
            preferred_lifetime_sec,
            valid_lifetime_sec,
            options,
        })
    }

    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        if raw.len() < 24 {
            return Err(DhcpError::new(
                ErrorKind::InvalidIaAddr,
                format!(
                    "OPTION_IAADDR requires at least 24 bytes, got {}",
                    raw.len()
                ),
            ));
        }
        let mut buf = Buffer::new(raw);
        let address = buf
            .get_ipv6()
            .context("Invalid OPTION_IAADDR address")?;
        let preferred_lifetime_sec = buf
            .get_u32_be()
            .context("Invalid OPTION_IAADDR preferred lifetime")?;
        let valid_lifetime_sec = buf
            .get_u32_be()
            .context("Invalid OPTION_IAADDR valid lifetime")?;
        validate_ipv6(address)
            .context("Invalid OPTION_IAADDR address")?;
        validate_lifetimes(preferred_lifetime_sec, valid_lifetime_sec)
            .context("Invalid OPTION_IAADDR lifetimes")?;
        Ok(Self {
            address,
            preferred_lifetime_sec,
            valid_lifetime_sec,
            options: DhcpV6Options::parse(&mut buf)
                .context("Invalid OPTION_IAADDR options")?,
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_ipv6(self.address);
        buf.write_u32_be(self.preferred_lifetime_sec);
        buf.write_u32_be(self.valid_lifetime_sec);
        self.options.emit(buf);
    }
}

impl DhcpV6OptionValue for DhcpV6OptionIaAddr {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }
}

/// OPTION_IAPREFIX, RFC 3633 - 10. A delegated prefix with its lifetimes,
/// encapsulated in an IA_PD option.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6OptionIaPrefix {
    pub preferred_lifetime_sec: u32,
    pub valid_lifetime_sec: u32,
    pub prefix_len: u8,
    pub prefix: Ipv6Addr,
    pub options: DhcpV6Options,
}

impl Default for DhcpV6OptionIaPrefix {
    fn default() -> Self {
        Self {
            preferred_lifetime_sec: 0,
            valid_lifetime_sec: 0,
            prefix_len: 0,
            prefix: Ipv6Addr::UNSPECIFIED,
            options: DhcpV6Options::new(),
        }
    }
}

impl DhcpV6OptionIaPrefix {
    pub fn new(
        prefix: Ipv6Addr,
        prefix_len: u8,
        preferred_lifetime_sec: u32,
        valid_lifetime_sec: u32,
        options: DhcpV6Options,
    ) -> Result<Self, DhcpError> {
        validate_ipv6(prefix).context("Invalid OPTION_IAPREFIX prefix")?;
        validate_lifetimes(preferred_lifetime_sec, valid_lifetime_sec)
            .context("Invalid OPTION_IAPREFIX lifetimes")?;
        Ok(Self {
            preferred_lifetime_sec,
            valid_lifetime_sec,
            prefix_len,
            prefix,
            options,
        })
    }

    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        if raw.len() < 25 {
            return Err(DhcpError::new(
                ErrorKind::InvalidIaPrefix,
                format!(
                    "OPTION_IAPREFIX requires at least 25 bytes, got {}",
                    raw.len()
                ),
            ));
        }
        let mut buf = Buffer::new(raw);
        let preferred_lifetime_sec = buf
            .get_u32_be()
            .context("Invalid OPTION_IAPREFIX preferred lifetime")?;
        let valid_lifetime_sec = buf
            .get_u32_be()
            .context("Invalid OPTION_IAPREFIX valid lifetime")?;
        let prefix_len = buf
            .get_u8()
            .context("Invalid OPTION_IAPREFIX prefix length")?;
        let prefix = buf
            .get_ipv6()
            .context("Invalid OPTION_IAPREFIX prefix")?;
        validate_ipv6(prefix).context("Invalid OPTION_IAPREFIX prefix")?;
        validate_lifetimes(preferred_lifetime_sec, valid_lifetime_sec)
            .context("Invalid OPTION_IAPREFIX lifetimes")?;
        Ok(Self {
            preferred_lifetime_sec,
            valid_lifetime_sec,
            prefix_len,
            prefix,
            options: DhcpV6Options::parse(&mut buf)
                .context("Invalid OPTION_IAPREFIX options")?,
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_u32_be(self.preferred_lifetime_sec);
        buf.write_u32_be(self.valid_lifetime_sec);
        buf.write_u8(self.prefix_len);
        buf.write_ipv6(self.prefix);
        self.options.emit(buf);
    }
}

impl DhcpV6OptionValue for DhcpV6OptionIaPrefix {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::DhcpV6OptionCode;

    #[test]
    fn iana_round_trip_with_nested_client_id() -> Result<(), DhcpError> {
        let mut nested = DhcpV6Options::new();
        nested.add_raw(DhcpV6OptionCode::ClientId, vec![0x00, 0x01]);
        let iana = DhcpV6OptionIaNa::new([1, 2, 3, 4], 30, 60, nested);

        let raw = iana.to_bytes();
        assert_eq!(
            raw,
            vec![
                1, 2, 3, 4, 0, 0, 0, 30, 0, 0, 0, 60, 0, 1, 0, 2, 0, 1
            ]
        );
        assert_eq!(DhcpV6OptionIaNa::parse(raw.as_slice())?, iana);
        Ok(())
    }

    #[test]
    fn iana_one_byte_short() {
        let e = DhcpV6OptionIaNa::parse(&[0u8; 11]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidIaNa);
    }

    #[test]
    fn iata_round_trip() -> Result<(), DhcpError> {
        let iata = DhcpV6OptionIaTa::new([0xde, 0xad, 0xbe, 0xef], {
            let mut opts = DhcpV6Options::new();
            opts.add(
                DhcpV6OptionCode::IaAddr,
                &DhcpV6OptionIaAddr::new(
                    Ipv6Addr::from_str("2001:db8::1").unwrap(),
                    60,
                    90,
                    DhcpV6Options::new(),
                )?,
            );
            opts
        });
        let raw = iata.to_bytes();
        assert_eq!(DhcpV6OptionIaTa::parse(raw.as_slice())?, iata);
        Ok(())
    }

    #[test]
    fn iata_one_byte_short() {
        let e = DhcpV6OptionIaTa::parse(&[0u8; 3]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidIaTa);
    }

    #[test]
    fn iapd_round_trip_with_prefix() -> Result<(), DhcpError> {
        let mut nested = DhcpV6Options::new();
        nested.add(
            DhcpV6OptionCode::IaPrefix,
            &DhcpV6OptionIaPrefix::new(
                Ipv6Addr::from_str("2001:db8:ffff::").unwrap(),
                48,
                3600,
                7200,
                DhcpV6Options::new(),
            )?,
        );
        let iapd = DhcpV6OptionIaPd::new([0, 0, 0, 1], 1800, 2880, nested);

        let raw = iapd.to_bytes();
        let parsed = DhcpV6OptionIaPd::parse(raw.as_slice())?;
        assert_eq!(parsed, iapd);
        assert_eq!(parsed.options.iaprefix()?[0].prefix_len, 48);
        Ok(())
    }

    #[test]
    fn iapd_one_byte_short() {
        let e = DhcpV6OptionIaPd::parse(&[0u8; 11]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidIaPd);
    }

    #[test]
    fn iaaddr_parse_fixture() -> Result<(), DhcpError> {
        let raw = &[
            0x20, 0x01, 0x0d, 0xb8, 0x00, 0x0a, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x07, 0x6d, 0x00, 0x00, 0x00, 0x78, 0x00, 0x00,
            0x00, 0x78,
        ];
        let addr = DhcpV6OptionIaAddr::parse(raw)?;
        assert_eq!(
            addr.address,
            Ipv6Addr::from_str("2001:db8:a::76d").unwrap()
        );
        assert_eq!(addr.preferred_lifetime_sec, 120);
        assert_eq!(addr.valid_lifetime_sec, 120);
        assert!(addr.options.is_empty());
        assert_eq!(addr.to_bytes().as_slice(), raw);
        Ok(())
    }

    #[test]
    fn iaaddr_one_byte_short() {
        let e = DhcpV6OptionIaAddr::parse(&[0u8; 23]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidIaAddr);
    }

    #[test]
    fn iaaddr_lifetime_law_on_parse() {
        let mut raw = [0u8; 24];
        raw[0] = 0x20;
        raw[1] = 0x01;
        raw[16..20].copy_from_slice(&90u32.to_be_bytes());
        raw[20..24].copy_from_slice(&60u32.to_be_bytes());
        let e = DhcpV6OptionIaAddr::parse(&raw).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidLifetimes);
    }

    #[test]
    fn iaaddr_lifetime_law_on_new() {
        let e = DhcpV6OptionIaAddr::new(
            Ipv6Addr::from_str("2001:db8::1").unwrap(),
            90,
            60,
            DhcpV6Options::new(),
        )
        .unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidLifetimes);
    }

    #[test]
    fn iaaddr_rejects_ipv4_mapped() {
        let e = DhcpV6OptionIaAddr::new(
            Ipv6Addr::from_str("::ffff:192.0.2.1").unwrap(),
            60,
            90,
            DhcpV6Options::new(),
        )
        .unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidIp);
    }

    #[test]
    fn iaprefix_round_trip_with_status() -> Result<(), DhcpError> {
        let raw = &[
            0x00, 0x01, 0x51, 0x80, 0x00, 0x01, 0x51, 0x80, 0x3c, 0x24, 0x0e,
            0x03, 0x9c, 0x0e, 0x29, 0xdb, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x0d, 0x00, 0x09, 0x00, 0x00, 0x53, 0x55,
            0x43, 0x43, 0x45, 0x53, 0x53,
        ];
        let prefix = DhcpV6OptionIaPrefix::parse(raw)?;
        assert_eq!(prefix.preferred_lifetime_sec, 86400);
        assert_eq!(prefix.valid_lifetime_sec, 86400);
        assert_eq!(prefix.prefix_len, 60);
        assert_eq!(
            prefix.prefix,
            Ipv6Addr::from_str("240e:39c:e29:dbf0::").unwrap()
        );
        assert_eq!(prefix.options.status_code()?.message, "SUCCESS");
        assert_eq!(prefix.to_bytes().as_slice(), raw);
        Ok(())
    }

    #[test]
    fn iaprefix_one_byte_short() {
        let e = DhcpV6OptionIaPrefix::parse(&[0u8; 24]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidIaPrefix);
    }

    #[test]
    fn iaprefix_lifetime_law_on_new() {
        let e = DhcpV6OptionIaPrefix::new(
            Ipv6Addr::from_str("2001:db8::").unwrap(),
            64,
            7200,
            3600,
            DhcpV6Options::new(),
        )
        .unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidLifetimes);
    }
}
