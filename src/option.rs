// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;
use std::collections::HashMap;
use std::net::Ipv6Addr;
use std::time::Duration;

use crate::{
    buffer::{Buffer, BufferMut},
    option_misc::{
        parse_arch_types, parse_elapsed_time, parse_option_request,
        parse_preference, parse_rapid_commit, parse_unicast,
    },
    DhcpError, DhcpV6ArchType, DhcpV6Data, DhcpV6Duid, DhcpV6OptionAuth,
    DhcpV6OptionIaAddr, DhcpV6OptionIaNa, DhcpV6OptionIaPd,
    DhcpV6OptionIaPrefix, DhcpV6OptionIaTa, DhcpV6OptionNii,
    DhcpV6OptionRelayMsg, DhcpV6OptionRemoteId, DhcpV6OptionStatus,
    DhcpV6OptionVendorClass, DhcpV6OptionVendorOpts, ErrorContext, ErrorKind,
};

const OPTION_CLIENTID: u16 = 1;
const OPTION_SERVERID: u16 = 2;
const OPTION_IA_NA: u16 = 3;
const OPTION_IA_TA: u16 = 4;
const OPTION_IAADDR: u16 = 5;
const OPTION_ORO: u16 = 6;
const OPTION_PREFERENCE: u16 = 7;
const OPTION_ELAPSED_TIME: u16 = 8;
const OPTION_RELAY_MSG: u16 = 9;
const OPTION_AUTH: u16 = 11;
const OPTION_UNICAST: u16 = 12;
const OPTION_STATUS_CODE: u16 = 13;
const OPTION_RAPID_COMMIT: u16 = 14;
const OPTION_USER_CLASS: u16 = 15;
const OPTION_VENDOR_CLASS: u16 = 16;
const OPTION_VENDOR_OPTS: u16 = 17;
const OPTION_INTERFACE_ID: u16 = 18;
const OPTION_RECONF_MSG: u16 = 19;
const OPTION_RECONF_ACCEPT: u16 = 20;
const OPTION_IA_PD: u16 = 25;
const OPTION_IAPREFIX: u16 = 26;
const OPTION_REMOTE_ID: u16 = 37;
const OPT_BOOTFILE_URL: u16 = 59;
const OPT_BOOTFILE_PARAM: u16 = 60;
const OPTION_CLIENT_ARCH_TYPE: u16 = 61;
const OPTION_NII: u16 = 62;

/// DHCPv6 option code registry.
///
/// Defined by RFC 8415 - 21. DHCPv6 Options, RFC 3633, RFC 4649 and
/// RFC 5970. Codes absent from this registry are carried as
/// [DhcpV6OptionCode::Unknown] and round-trip unchanged.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[non_exhaustive]
pub enum DhcpV6OptionCode {
    ClientId,
    ServerId,
    IaNa,
    IaTa,
    IaAddr,
    OptionRequest,
    Preference,
    ElapsedTime,
    RelayMsg,
    Auth,
    Unicast,
    StatusCode,
    RapidCommit,
    UserClass,
    VendorClass,
    VendorOpts,
    InterfaceId,
    ReconfMsg,
    ReconfAccept,
    IaPd,
    IaPrefix,
    RemoteId,
    BootFileUrl,
    BootFileParam,
    ClientArchType,
    Nii,
    Unknown(u16),
}

impl From<DhcpV6OptionCode> for u16 {
    fn from(v: DhcpV6OptionCode) -> u16 {
        match v {
            DhcpV6OptionCode::ClientId => OPTION_CLIENTID,
            DhcpV6OptionCode::ServerId => OPTION_SERVERID,
            DhcpV6OptionCode::IaNa => OPTION_IA_NA,
            DhcpV6OptionCode::IaTa => OPTION_IA_TA,
            DhcpV6OptionCode::IaAddr => OPTION_IAADDR,
            DhcpV6OptionCode::OptionRequest => OPTION_ORO,
            DhcpV6OptionCode::Preference => OPTION_PREFERENCE,
            DhcpV6OptionCode::ElapsedTime => OPTION_ELAPSED_TIME,
            DhcpV6OptionCode::RelayMsg => OPTION_RELAY_MSG,
            DhcpV6OptionCode::Auth => OPTION_AUTH,
            DhcpV6OptionCode::Unicast => OPTION_UNICAST,
            DhcpV6OptionCode::StatusCode => OPTION_STATUS_CODE,
            DhcpV6OptionCode::RapidCommit => OPTION_RAPID_COMMIT,
            DhcpV6OptionCode::UserClass => OPTION_USER_CLASS,
            DhcpV6OptionCode::VendorClass => OPTION_VENDOR_CLASS,
            DhcpV6OptionCode::VendorOpts => OPTION_VENDOR_OPTS,
            DhcpV6OptionCode::InterfaceId => OPTION_INTERFACE_ID,
            DhcpV6OptionCode::ReconfMsg => OPTION_RECONF_MSG,
            DhcpV6OptionCode::ReconfAccept => OPTION_RECONF_ACCEPT,
            DhcpV6OptionCode::IaPd => OPTION_IA_PD,
            DhcpV6OptionCode::IaPrefix => OPTION_IAPREFIX,
            DhcpV6OptionCode::RemoteId => OPTION_REMOTE_ID,
            DhcpV6OptionCode::BootFileUrl => OPT_BOOTFILE_URL,
            DhcpV6OptionCode::BootFileParam => OPT_BOOTFILE_PARAM,
            DhcpV6OptionCode::ClientArchType => OPTION_CLIENT_ARCH_TYPE,
            DhcpV6OptionCode::Nii => OPTION_NII,
            DhcpV6OptionCode::Unknown(d) => d,
        }
    }
}

impl From<u16> for DhcpV6OptionCode {
    fn from(d: u16) -> Self {
        match d {
            OPTION_CLIENTID => Self::ClientId,
            OPTION_SERVERID => Self::ServerId,
            OPTION_IA_NA => Self::IaNa,
            OPTION_IA_TA => Self::IaTa,
            OPTION_IAADDR => Self::IaAddr,
            OPTION_ORO => Self::OptionRequest,
            OPTION_PREFERENCE => Self::Preference,
            OPTION_ELAPSED_TIME => Self::ElapsedTime,
            OPTION_RELAY_MSG => Self::RelayMsg,
            OPTION_AUTH => Self::Auth,
            OPTION_UNICAST => Self::Unicast,
            OPTION_STATUS_CODE => Self::StatusCode,
            OPTION_RAPID_COMMIT => Self::RapidCommit,
            OPTION_USER_CLASS => Self::UserClass,
            OPTION_VENDOR_CLASS => Self::VendorClass,
            OPTION_VENDOR_OPTS => Self::VendorOpts,
            OPTION_INTERFACE_ID => Self::InterfaceId,
            OPTION_RECONF_MSG => Self::ReconfMsg,
            OPTION_RECONF_ACCEPT => Self::ReconfAccept,
            OPTION_IA_PD => Self::IaPd,
            OPTION_IAPREFIX => Self::IaPrefix,
            OPTION_REMOTE_ID => Self::RemoteId,
            OPT_BOOTFILE_URL => Self::BootFileUrl,
            OPT_BOOTFILE_PARAM => Self::BootFileParam,
            OPTION_CLIENT_ARCH_TYPE => Self::ClientArchType,
            OPTION_NII => Self::Nii,
            _ => Self::Unknown(d),
        }
    }
}

impl Ord for DhcpV6OptionCode {
    fn cmp(&self, other: &Self) -> Ordering {
        u16::from(*self).cmp(&u16::from(*other))
    }
}

impl PartialOrd for DhcpV6OptionCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for DhcpV6OptionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClientId => write!(f, "OPTION_CLIENTID"),
            Self::ServerId => write!(f, "OPTION_SERVERID"),
            Self::IaNa => write!(f, "OPTION_IA_NA"),
            Self::IaTa => write!(f, "OPTION_IA_TA"),
            Self::IaAddr => write!(f, "OPTION_IAADDR"),
            Self::OptionRequest => write!(f, "OPTION_ORO"),
            Self::Preference => write!(f, "OPTION_PREFERENCE"),
            Self::ElapsedTime => write!(f, "OPTION_ELAPSED_TIME"),
            Self::RelayMsg => write!(f, "OPTION_RELAY_MSG"),
            Self::Auth => write!(f, "OPTION_AUTH"),
            Self::Unicast => write!(f, "OPTION_UNICAST"),
            Self::StatusCode => write!(f, "OPTION_STATUS_CODE"),
            Self::RapidCommit => write!(f, "OPTION_RAPID_COMMIT"),
            Self::UserClass => write!(f, "OPTION_USER_CLASS"),
            Self::VendorClass => write!(f, "OPTION_VENDOR_CLASS"),
            Self::VendorOpts => write!(f, "OPTION_VENDOR_OPTS"),
            Self::InterfaceId => write!(f, "OPTION_INTERFACE_ID"),
            Self::ReconfMsg => write!(f, "OPTION_RECONF_MSG"),
            Self::ReconfAccept => write!(f, "OPTION_RECONF_ACCEPT"),
            Self::IaPd => write!(f, "OPTION_IA_PD"),
            Self::IaPrefix => write!(f, "OPTION_IAPREFIX"),
            Self::RemoteId => write!(f, "OPTION_REMOTE_ID"),
            Self::BootFileUrl => write!(f, "OPT_BOOTFILE_URL"),
            Self::BootFileParam => write!(f, "OPT_BOOTFILE_PARAM"),
            Self::ClientArchType => write!(f, "OPTION_CLIENT_ARCH_TYPE"),
            Self::Nii => write!(f, "OPTION_NII"),
            Self::Unknown(d) => write!(f, "Unknown({d})"),
        }
    }
}

/// A value that can be marshaled into the payload of a DHCPv6 option,
/// without the option code and length header. Implemented by every option
/// type of this crate, allowing handlers to insert values through
/// [DhcpV6Options::add].
pub trait DhcpV6OptionValue {
    fn to_bytes(&self) -> Vec<u8>;
}

impl DhcpV6OptionValue for Ipv6Addr {
    fn to_bytes(&self) -> Vec<u8> {
        self.octets().to_vec()
    }
}

impl DhcpV6OptionValue for url::Url {
    fn to_bytes(&self) -> Vec<u8> {
        self.as_str().as_bytes().to_vec()
    }
}

/// DHCPv6 options container.
///
/// A multimap from option code to the raw value byte strings carried under
/// that code. DHCPv6 permits several instances of one option in a single
/// message (e.g. multiple OPTION_IA_NA), hence every code maps to a list.
/// The map itself is unordered; ordering is imposed at marshal time by
/// sorting on the numeric option code, with values under one code keeping
/// their insertion order.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct DhcpV6Options {
    data: HashMap<DhcpV6OptionCode, Vec<Vec<u8>>>,
}

impl DhcpV6Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marshal `value` and append it under `code`.
    pub fn add<V>(&mut self, code: DhcpV6OptionCode, value: &V)
    where
        V: DhcpV6OptionValue + ?Sized,
    {
        self.add_raw(code, value.to_bytes());
    }

    /// Append a raw value byte string under `code`. A zero-length value
    /// records bare presence (e.g. OPTION_RAPID_COMMIT).
    pub fn add_raw(&mut self, code: DhcpV6OptionCode, value: Vec<u8>) {
        self.data.entry(code).or_default().push(value);
    }

    pub fn remove(&mut self, code: DhcpV6OptionCode) {
        self.data.remove(&code);
    }

    pub fn contains(&self, code: DhcpV6OptionCode) -> bool {
        self.data.contains_key(&code)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All raw values stored under `code`, in insertion order.
    pub fn get(
        &self,
        code: DhcpV6OptionCode,
    ) -> Result<&[Vec<u8>], DhcpError> {
        self.data
            .get(&code)
            .map(|values| values.as_slice())
            .ok_or_else(|| {
                DhcpError::new(
                    ErrorKind::OptionNotPresent,
                    format!("Option {code} not present"),
                )
            })
    }

    /// The single raw value stored under `code`. Fails with
    /// [ErrorKind::InvalidPacket] when the option appears more than once.
    pub fn get_one(&self, code: DhcpV6OptionCode) -> Result<&[u8], DhcpError> {
        let values = self.get(code)?;
        if values.len() > 1 {
            return Err(DhcpError::new(
                ErrorKind::InvalidPacket,
                format!(
                    "Expecting exactly one {code} option, got {}",
                    values.len()
                ),
            ));
        }
        Ok(values[0].as_slice())
    }

    pub(crate) fn parse(buf: &mut Buffer) -> Result<Self, DhcpError> {
        let mut ret = Self::new();
        while !buf.is_empty() {
            if !buf.has(4) {
                return Err(DhcpError::new(
                    ErrorKind::InvalidOptions,
                    format!(
                        "Trailing {} bytes after DHCPv6 option list",
                        buf.remain_len()
                    ),
                ));
            }
            let code = buf
                .get_u16_be()
                .context("Invalid DHCPv6 option code")?;
            let len: usize = buf
                .get_u16_be()
                .context("Invalid DHCPv6 option length")?
                .into();
            if !buf.has(len) {
                return Err(DhcpError::new(
                    ErrorKind::InvalidOptions,
                    format!(
                        "DHCPv6 option {} declares {len} bytes but only {} \
                         remain",
                        DhcpV6OptionCode::from(code),
                        buf.remain_len()
                    ),
                ));
            }
            let data = buf
                .get_bytes(len)
                .context("Invalid DHCPv6 option data")?
                .to_vec();
            ret.add_raw(code.into(), data);
        }
        Ok(ret)
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        let mut codes: Vec<DhcpV6OptionCode> =
            self.data.keys().copied().collect();
        codes.sort_unstable();

        for code in codes {
            if let Some(values) = self.data.get(&code) {
                for value in values {
                    buf.write_u16_be(code.into());
                    buf.write_u16_be(value.len() as u16);
                    buf.write_bytes(value.as_slice());
                }
            }
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }

    fn parse_each<T>(
        &self,
        code: DhcpV6OptionCode,
        parse: fn(&[u8]) -> Result<T, DhcpError>,
    ) -> Result<Vec<T>, DhcpError> {
        self.get(code)?
            .iter()
            .map(|raw| parse(raw.as_slice()))
            .collect()
    }

    /// Client Identifier Option, RFC 8415 - 21.2.
    pub fn client_id(&self) -> Result<DhcpV6Duid, DhcpError> {
        DhcpV6Duid::parse(self.get_one(DhcpV6OptionCode::ClientId)?)
            .context("Invalid OPTION_CLIENTID")
    }

    /// Server Identifier Option, RFC 8415 - 21.3.
    pub fn server_id(&self) -> Result<DhcpV6Duid, DhcpError> {
        DhcpV6Duid::parse(self.get_one(DhcpV6OptionCode::ServerId)?)
            .context("Invalid OPTION_SERVERID")
    }

    /// All Identity Association for Non-temporary Addresses Options,
    /// RFC 8415 - 21.4. A client may include several in one message.
    pub fn iana(&self) -> Result<Vec<DhcpV6OptionIaNa>, DhcpError> {
        self.parse_each(DhcpV6OptionCode::IaNa, DhcpV6OptionIaNa::parse)
    }

    /// All Identity Association for Temporary Addresses Options,
    /// RFC 8415 - 21.5.
    pub fn iata(&self) -> Result<Vec<DhcpV6OptionIaTa>, DhcpError> {
        self.parse_each(DhcpV6OptionCode::IaTa, DhcpV6OptionIaTa::parse)
    }

    /// All IA Address Options, RFC 8415 - 21.6. Normally encapsulated in
    /// the options of an IA_NA or IA_TA option.
    pub fn iaaddr(&self) -> Result<Vec<DhcpV6OptionIaAddr>, DhcpError> {
        self.parse_each(DhcpV6OptionCode::IaAddr, DhcpV6OptionIaAddr::parse)
    }

    /// All Identity Association for Prefix Delegation Options,
    /// RFC 3633 - 9.
    pub fn iapd(&self) -> Result<Vec<DhcpV6OptionIaPd>, DhcpError> {
        self.parse_each(DhcpV6OptionCode::IaPd, DhcpV6OptionIaPd::parse)
    }

    /// All IA Prefix Options, RFC 3633 - 10. Normally encapsulated in the
    /// options of an IA_PD option.
    pub fn iaprefix(&self) -> Result<Vec<DhcpV6OptionIaPrefix>, DhcpError> {
        self.parse_each(
            DhcpV6OptionCode::IaPrefix,
            DhcpV6OptionIaPrefix::parse,
        )
    }

    /// Option Request Option, RFC 8415 - 21.7. The returned codes keep the
    /// client's stated preference order.
    pub fn option_request(
        &self,
    ) -> Result<Vec<DhcpV6OptionCode>, DhcpError> {
        parse_option_request(self.get_one(DhcpV6OptionCode::OptionRequest)?)
    }

    /// Preference Option, RFC 8415 - 21.8.
    pub fn preference(&self) -> Result<u8, DhcpError> {
        parse_preference(self.get_one(DhcpV6OptionCode::Preference)?)
    }

    /// Elapsed Time Option, RFC 8415 - 21.9. The wire value counts
    /// hundredths of a second; the returned duration has millisecond
    /// granularity.
    pub fn elapsed_time(&self) -> Result<Duration, DhcpError> {
        parse_elapsed_time(self.get_one(DhcpV6OptionCode::ElapsedTime)?)
    }

    /// Server Unicast Option, RFC 8415 - 21.12.
    pub fn unicast(&self) -> Result<Ipv6Addr, DhcpError> {
        parse_unicast(self.get_one(DhcpV6OptionCode::Unicast)?)
    }

    /// Status Code Option, RFC 8415 - 21.13.
    pub fn status_code(&self) -> Result<DhcpV6OptionStatus, DhcpError> {
        DhcpV6OptionStatus::parse(self.get_one(DhcpV6OptionCode::StatusCode)?)
    }

    /// Rapid Commit Option, RFC 8415 - 21.14. Present with zero-length
    /// data when the client requests the two-message exchange; any payload
    /// is a protocol error.
    pub fn rapid_commit(&self) -> Result<(), DhcpError> {
        parse_rapid_commit(self.get_one(DhcpV6OptionCode::RapidCommit)?)
    }

    /// User Class Option, RFC 8415 - 21.15.
    pub fn user_class(&self) -> Result<DhcpV6Data, DhcpError> {
        DhcpV6Data::parse(self.get_one(DhcpV6OptionCode::UserClass)?)
    }

    /// Vendor Class Option, RFC 8415 - 21.16.
    pub fn vendor_class(
        &self,
    ) -> Result<DhcpV6OptionVendorClass, DhcpError> {
        DhcpV6OptionVendorClass::parse(
            self.get_one(DhcpV6OptionCode::VendorClass)?,
        )
    }

    /// Vendor-specific Information Option, RFC 8415 - 21.17.
    pub fn vendor_opts(&self) -> Result<DhcpV6OptionVendorOpts, DhcpError> {
        DhcpV6OptionVendorOpts::parse(
            self.get_one(DhcpV6OptionCode::VendorOpts)?,
        )
    }

    /// Interface-Id Option, RFC 8415 - 21.18. Opaque bytes chosen by the
    /// relay agent.
    pub fn interface_id(&self) -> Result<Vec<u8>, DhcpError> {
        Ok(self.get_one(DhcpV6OptionCode::InterfaceId)?.to_vec())
    }

    /// Relay Agent Remote-ID Option, RFC 4649.
    pub fn remote_identifier(
        &self,
    ) -> Result<DhcpV6OptionRemoteId, DhcpError> {
        DhcpV6OptionRemoteId::parse(self.get_one(DhcpV6OptionCode::RemoteId)?)
    }

    /// Boot File URL Option, RFC 5970 - 3.1.
    pub fn boot_file_url(&self) -> Result<url::Url, DhcpError> {
        let raw = self.get_one(DhcpV6OptionCode::BootFileUrl)?;
        let text = std::str::from_utf8(raw).map_err(|e| {
            DhcpError::new(
                ErrorKind::InvalidUrl,
                format!("OPT_BOOTFILE_URL is not valid UTF-8: {e}"),
            )
        })?;
        url::Url::parse(text).map_err(|e| {
            DhcpError::new(
                ErrorKind::InvalidUrl,
                format!("Invalid OPT_BOOTFILE_URL {text}: {e}"),
            )
        })
    }

    /// Boot File Parameters Option, RFC 5970 - 3.2.
    pub fn boot_file_param(&self) -> Result<DhcpV6Data, DhcpError> {
        DhcpV6Data::parse(self.get_one(DhcpV6OptionCode::BootFileParam)?)
            .map_err(|e| {
                DhcpError::new(
                    ErrorKind::InvalidBootFileParam,
                    format!("Invalid OPT_BOOTFILE_PARAM: {}", e.msg()),
                )
            })
    }

    /// Client System Architecture Type Option, RFC 5970 - 3.3.
    pub fn client_arch_type(
        &self,
    ) -> Result<Vec<DhcpV6ArchType>, DhcpError> {
        parse_arch_types(self.get_one(DhcpV6OptionCode::ClientArchType)?)
    }

    /// Client Network Interface Identifier Option, RFC 5970 - 3.4.
    pub fn nii(&self) -> Result<DhcpV6OptionNii, DhcpError> {
        DhcpV6OptionNii::parse(self.get_one(DhcpV6OptionCode::Nii)?)
    }

    /// Authentication Option, RFC 8415 - 21.11.
    pub fn authentication(&self) -> Result<DhcpV6OptionAuth, DhcpError> {
        DhcpV6OptionAuth::parse(self.get_one(DhcpV6OptionCode::Auth)?)
    }

    /// Relay Message Option, RFC 8415 - 21.10.
    pub fn relay_message(&self) -> Result<DhcpV6OptionRelayMsg, DhcpError> {
        DhcpV6OptionRelayMsg::parse(
            self.get_one(DhcpV6OptionCode::RelayMsg)?,
        )
    }
}
