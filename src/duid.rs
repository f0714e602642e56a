// SPDX-License-Identifier: Apache-2.0

use std::time::{Duration, SystemTime};

use crate::{
    buffer::{Buffer, BufferMut},
    DhcpError, DhcpV6OptionValue, ErrorContext, ErrorKind,
};

const DUID_TYPE_LLT: u16 = 1;
const DUID_TYPE_EN: u16 = 2;
const DUID_TYPE_LL: u16 = 3;
const DUID_TYPE_UUID: u16 = 4;

/// DHCP Unique Identifier type registry.
///
/// Defined by RFC 8415, 11. DHCP Unique Identifier (DUID) and the IANA
/// DHCPv6 parameters registry.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[non_exhaustive]
pub enum DhcpV6DuidType {
    LinkLayerAddrPlusTime,
    EnterpriseNumber,
    LinkLayerAddr,
    Uuid,
    Unknown(u16),
}

impl From<DhcpV6DuidType> for u16 {
    fn from(v: DhcpV6DuidType) -> u16 {
        match v {
            DhcpV6DuidType::LinkLayerAddrPlusTime => DUID_TYPE_LLT,
            DhcpV6DuidType::EnterpriseNumber => DUID_TYPE_EN,
            DhcpV6DuidType::LinkLayerAddr => DUID_TYPE_LL,
            DhcpV6DuidType::Uuid => DUID_TYPE_UUID,
            DhcpV6DuidType::Unknown(d) => d,
        }
    }
}

impl From<u16> for DhcpV6DuidType {
    fn from(d: u16) -> Self {
        match d {
            DUID_TYPE_LLT => Self::LinkLayerAddrPlusTime,
            DUID_TYPE_EN => Self::EnterpriseNumber,
            DUID_TYPE_LL => Self::LinkLayerAddr,
            DUID_TYPE_UUID => Self::Uuid,
            _ => Self::Unknown(d),
        }
    }
}

impl std::fmt::Display for DhcpV6DuidType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LinkLayerAddrPlusTime => write!(f, "DUID-LLT"),
            Self::EnterpriseNumber => write!(f, "DUID-EN"),
            Self::LinkLayerAddr => write!(f, "DUID-LL"),
            Self::Uuid => write!(f, "DUID-UUID"),
            Self::Unknown(d) => write!(f, "DUID-Unknown({d})"),
        }
    }
}

/// DHCP Unique Identifier
///
/// A DUID identifies a client to a server or vice versa. The wire form
/// starts with a 2 octet type tag followed by a type specific body.
/// Parsing an unknown tag fails with [ErrorKind::UnknownDuid].
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum DhcpV6Duid {
    /// DUID Based on Link-Layer Address Plus Time
    LinkLayerAddressPlusTime(DhcpV6DuidLlt),
    /// DUID Assigned by Vendor Based on Enterprise Number
    EnterpriseNumber(DhcpV6DuidEn),
    /// DUID Based on Link-Layer Address
    LinkLayerAddress(DhcpV6DuidLl),
    /// DUID Based on Universally Unique Identifier
    Uuid(DhcpV6DuidUuid),
}

impl DhcpV6Duid {
    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        if raw.len() < 2 {
            return Err(DhcpError::new(
                ErrorKind::InvalidDuid,
                format!(
                    "Not enough bytes to determine DUID type, got {} bytes",
                    raw.len()
                ),
            ));
        }
        let mut buf = Buffer::new(raw);
        let id_type = buf.get_u16_be().context("Invalid DHCPv6 DUID type")?;
        match DhcpV6DuidType::from(id_type) {
            DhcpV6DuidType::LinkLayerAddrPlusTime => Ok(
                Self::LinkLayerAddressPlusTime(DhcpV6DuidLlt::parse_body(
                    &mut buf,
                    raw.len(),
                )?),
            ),
            DhcpV6DuidType::EnterpriseNumber => Ok(Self::EnterpriseNumber(
                DhcpV6DuidEn::parse_body(&mut buf, raw.len())?,
            )),
            DhcpV6DuidType::LinkLayerAddr => Ok(Self::LinkLayerAddress(
                DhcpV6DuidLl::parse_body(&mut buf, raw.len())?,
            )),
            DhcpV6DuidType::Uuid => {
                Ok(Self::Uuid(DhcpV6DuidUuid::parse_body(&mut buf, raw.len())?))
            }
            DhcpV6DuidType::Unknown(d) => Err(DhcpError::new(
                ErrorKind::UnknownDuid,
                format!("Unknown DUID type {d}"),
            )),
        }
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        match self {
            Self::LinkLayerAddressPlusTime(v) => v.emit(buf),
            Self::EnterpriseNumber(v) => v.emit(buf),
            Self::LinkLayerAddress(v) => v.emit(buf),
            Self::Uuid(v) => v.emit(buf),
        }
    }

    pub fn duid_type(&self) -> DhcpV6DuidType {
        match self {
            Self::LinkLayerAddressPlusTime(_) => {
                DhcpV6DuidType::LinkLayerAddrPlusTime
            }
            Self::EnterpriseNumber(_) => DhcpV6DuidType::EnterpriseNumber,
            Self::LinkLayerAddress(_) => DhcpV6DuidType::LinkLayerAddr,
            Self::Uuid(_) => DhcpV6DuidType::Uuid,
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }
}

impl DhcpV6OptionValue for DhcpV6Duid {
    fn to_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }
}

// RFC 8415 11.2. DUID Based on Link-Layer Address Plus Time (DUID-LLT)
// Indicate the base time is midnight (UTC), January 1, 2000
// This is calculated value by chrono:
//         chrono::Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
//       - chrono::Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()
const BASE_TIME: Duration = Duration::new(946684800, 0);

// Type 1
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6DuidLlt {
    pub hardware_type: u16,
    /// Seconds since midnight (UTC), January 1, 2000, modulo 2^32.
    pub time: u32,
    pub link_layer_address: Vec<u8>,
}

impl DhcpV6DuidLlt {
    /// Generate a DUID-LLT from a hardware type and link-layer address,
    /// stamped with the current time. Fails with
    /// [ErrorKind::InvalidDuidLltTime] when the system clock predates the
    /// 2000-01-01 UTC epoch.
    pub fn new(
        hardware_type: u16,
        link_layer_address: &[u8],
    ) -> Result<Self, DhcpError> {
        let time: u32 = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()
            .and_then(|s| s.checked_sub(BASE_TIME))
            .map(|t| t.as_secs() as u32)
            .ok_or_else(|| {
                DhcpError::new(
                    ErrorKind::InvalidDuidLltTime,
                    "DUID-LLT time predates 2000-01-01 UTC".to_string(),
                )
            })?;

        Ok(Self {
            hardware_type,
            time,
            link_layer_address: link_layer_address.to_vec(),
        })
    }

    fn parse_body(buf: &mut Buffer, len: usize) -> Result<Self, DhcpError> {
        if len < 8 {
            return Err(DhcpError::new(
                ErrorKind::InvalidDuidLlt,
                format!(
                    "Invalid DUID-LLT, expecting at least 8 bytes, got {len}"
                ),
            ));
        }
        Ok(Self {
            hardware_type: buf
                .get_u16_be()
                .context("Invalid DUID-LLT hardware type")?,
            time: buf.get_u32_be().context("Invalid DUID-LLT time")?,
            link_layer_address: buf
                .get_bytes(len - 8)
                .context("Invalid DUID-LLT link layer address")?
                .to_vec(),
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_u16_be(DUID_TYPE_LLT);
        buf.write_u16_be(self.hardware_type);
        buf.write_u32_be(self.time);
        buf.write_bytes(self.link_layer_address.as_slice());
    }
}

// Type 2
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6DuidEn {
    pub enterprise_number: u32,
    pub identifier: Vec<u8>,
}

impl DhcpV6DuidEn {
    pub fn new(enterprise_number: u32, identifier: &[u8]) -> Self {
        Self {
            enterprise_number,
            identifier: identifier.to_vec(),
        }
    }

    fn parse_body(buf: &mut Buffer, len: usize) -> Result<Self, DhcpError> {
        if len < 6 {
            return Err(DhcpError::new(
                ErrorKind::InvalidDuidEn,
                format!(
                    "Invalid DUID-EN, expecting at least 6 bytes, got {len}"
                ),
            ));
        }
        Ok(Self {
            enterprise_number: buf
                .get_u32_be()
                .context("Invalid DUID-EN enterprise number")?,
            identifier: buf
                .get_bytes(len - 6)
                .context("Invalid DUID-EN identifier")?
                .to_vec(),
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_u16_be(DUID_TYPE_EN);
        buf.write_u32_be(self.enterprise_number);
        buf.write_bytes(self.identifier.as_slice());
    }
}

// Type 3
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6DuidLl {
    pub hardware_type: u16,
    pub link_layer_address: Vec<u8>,
}

impl DhcpV6DuidLl {
    pub fn new(hardware_type: u16, link_layer_address: &[u8]) -> Self {
        Self {
            hardware_type,
            link_layer_address: link_layer_address.to_vec(),
        }
    }

    fn parse_body(buf: &mut Buffer, len: usize) -> Result<Self, DhcpError> {
        if len < 4 {
            return Err(DhcpError::new(
                ErrorKind::InvalidDuidLl,
                format!(
                    "Invalid DUID-LL, expecting at least 4 bytes, got {len}"
                ),
            ));
        }
        Ok(Self {
            hardware_type: buf
                .get_u16_be()
                .context("Invalid DUID-LL hardware type")?,
            link_layer_address: buf
                .get_bytes(len - 4)
                .context("Invalid DUID-LL link layer address")?
                .to_vec(),
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_u16_be(DUID_TYPE_LL);
        buf.write_u16_be(self.hardware_type);
        buf.write_bytes(self.link_layer_address.as_slice());
    }
}

// Type 4
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub struct DhcpV6DuidUuid {
    pub uuid: [u8; 16],
}

impl DhcpV6DuidUuid {
    pub fn new(uuid: [u8; 16]) -> Self {
        Self { uuid }
    }

    fn parse_body(buf: &mut Buffer, len: usize) -> Result<Self, DhcpError> {
        if len != 18 {
            return Err(DhcpError::new(
                ErrorKind::InvalidDuidUuid,
                format!(
                    "Invalid DUID-UUID, expecting 18 bytes, got {len} bytes"
                ),
            ));
        }
        let mut uuid = [0u8; 16];
        uuid.copy_from_slice(
            buf.get_bytes(16).context("Invalid DUID-UUID")?,
        );
        Ok(Self { uuid })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_u16_be(DUID_TYPE_UUID);
        buf.write_bytes(&self.uuid);
    }
}
