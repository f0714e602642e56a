// SPDX-License-Identifier: Apache-2.0

use crate::{
    buffer::{Buffer, BufferMut},
    DhcpError, DhcpV6OptionValue, ErrorContext, ErrorKind,
};

const STATUS_CODE_SUCCESS: u16 = 0;
const STATUS_CODE_UNSPEC_FAIL: u16 = 1;
const STATUS_CODE_NO_ADDRS_AVAIL: u16 = 2;
const STATUS_CODE_NO_BINDING: u16 = 3;
const STATUS_CODE_NOT_ON_LINK: u16 = 4;
const STATUS_CODE_USE_MULTICAST: u16 = 5;

/// DHCPv6 status code registry.
///
/// Defined by RFC 3315 - 24.4; later registry additions travel as
/// [DhcpV6StatusCode::Unknown] and round-trip unchanged.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum DhcpV6StatusCode {
    Success,
    UnspecFail,
    NoAddrsAvail,
    NoBinding,
    NotOnLink,
    UseMulticast,
    Unknown(u16),
}

impl From<DhcpV6StatusCode> for u16 {
    fn from(v: DhcpV6StatusCode) -> u16 {
        match v {
            DhcpV6StatusCode::Success => STATUS_CODE_SUCCESS,
            DhcpV6StatusCode::UnspecFail => STATUS_CODE_UNSPEC_FAIL,
            DhcpV6StatusCode::NoAddrsAvail => STATUS_CODE_NO_ADDRS_AVAIL,
            DhcpV6StatusCode::NoBinding => STATUS_CODE_NO_BINDING,
            DhcpV6StatusCode::NotOnLink => STATUS_CODE_NOT_ON_LINK,
            DhcpV6StatusCode::UseMulticast => STATUS_CODE_USE_MULTICAST,
            DhcpV6StatusCode::Unknown(d) => d,
        }
    }
}

impl From<u16> for DhcpV6StatusCode {
    fn from(d: u16) -> Self {
        match d {
            STATUS_CODE_SUCCESS => DhcpV6StatusCode::Success,
            STATUS_CODE_UNSPEC_FAIL => DhcpV6StatusCode::UnspecFail,
            STATUS_CODE_NO_ADDRS_AVAIL => DhcpV6StatusCode::NoAddrsAvail,
            STATUS_CODE_NO_BINDING => DhcpV6StatusCode::NoBinding,
            STATUS_CODE_NOT_ON_LINK => DhcpV6StatusCode::NotOnLink,
            STATUS_CODE_USE_MULTICAST => DhcpV6StatusCode::UseMulticast,
            _ => DhcpV6StatusCode::Unknown(d),
        }
    }
}

impl std::fmt::Display for DhcpV6StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::UnspecFail => write!(f, "UnspecFail"),
            Self::NoAddrsAvail => write!(f, "NoAddrsAvail"),
            Self::NoBinding => write!(f, "NoBinding"),
            Self::NotOnLink => write!(f, "NotOnLink"),
            Self::UseMulticast => write!(f, "UseMulticast"),
            Self::Unknown(d) => write!(f, "Unknown({d})"),
        }
    }
}

/// OPTION_STATUS_CODE, RFC 8415 - 21.13. A status code followed by a
/// UTF-8 message of any length, including zero.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DhcpV6OptionStatus {
    pub status: DhcpV6StatusCode,
    pub message: String,
}

impl DhcpV6OptionStatus {
    pub fn new(status: DhcpV6StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DhcpV6StatusCode::Success
    }

    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        if raw.len() < 2 {
            return Err(DhcpError::new(
                ErrorKind::InvalidStatusCode,
                format!(
                    "OPTION_STATUS_CODE requires at least 2 bytes, got {}",
                    raw.len()
                ),
            ));
        }
        let mut buf = Buffer::new(raw);
        Ok(Self {
            status: buf
                .get_u16_be()
                .context("Invalid OPTION_STATUS_CODE status")?
                .into(),
            message: buf
                .get_string_without_null(raw.len() - 2)
                .context("Invalid OPTION_STATUS_CODE message")?,
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_u16_be(self.status.into());
        buf.write_string_without_null(self.message.as_str());
    }
}

impl DhcpV6OptionValue for DhcpV6OptionStatus {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }
}
