// SPDX-License-Identifier: Apache-2.0

use std::net::Ipv6Addr;
use std::time::Duration;

use crate::{
    buffer::{Buffer, BufferMut},
    DhcpError, DhcpV6OptionCode, DhcpV6OptionValue, DhcpV6Options,
    ErrorContext, ErrorKind,
};

/// Preference value carried in OPTION_PREFERENCE, RFC 8415 - 21.8.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct DhcpV6Preference(pub u8);

impl DhcpV6OptionValue for DhcpV6Preference {
    fn to_bytes(&self) -> Vec<u8> {
        vec![self.0]
    }
}

pub(crate) fn parse_preference(raw: &[u8]) -> Result<u8, DhcpError> {
    if raw.is_empty() {
        return Err(DhcpError::new(
            ErrorKind::UnexpectedEof,
            "OPTION_PREFERENCE requires 1 byte, got 0".to_string(),
        ));
    }
    if raw.len() != 1 {
        return Err(DhcpError::new(
            ErrorKind::InvalidPreference,
            format!("OPTION_PREFERENCE requires 1 byte, got {}", raw.len()),
        ));
    }
    Ok(raw[0])
}

/// Transaction time carried in OPTION_ELAPSED_TIME, RFC 8415 - 21.9.
/// The wire form counts hundredths of a second; marshaling wraps at
/// `u16::MAX` hundredths.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct DhcpV6ElapsedTime(pub Duration);

impl DhcpV6OptionValue for DhcpV6ElapsedTime {
    fn to_bytes(&self) -> Vec<u8> {
        let hundredths = (self.0.as_millis() / 10) as u16;
        hundredths.to_be_bytes().to_vec()
    }
}

pub(crate) fn parse_elapsed_time(raw: &[u8]) -> Result<Duration, DhcpError> {
    if raw.len() < 2 {
        return Err(DhcpError::new(
            ErrorKind::UnexpectedEof,
            format!("OPTION_ELAPSED_TIME requires 2 bytes, got {}", raw.len()),
        ));
    }
    if raw.len() != 2 {
        return Err(DhcpError::new(
            ErrorKind::InvalidElapsedTime,
            format!("OPTION_ELAPSED_TIME requires 2 bytes, got {}", raw.len()),
        ));
    }
    let hundredths = u16::from_be_bytes([raw[0], raw[1]]);
    Ok(Duration::from_millis(u64::from(hundredths) * 10))
}

/// Requested option codes carried in OPTION_ORO, RFC 8415 - 21.7, in the
/// client's preference order.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct DhcpV6OptionRequest(pub Vec<DhcpV6OptionCode>);

impl DhcpV6OptionValue for DhcpV6OptionRequest {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        for code in &self.0 {
            buf.write_u16_be((*code).into());
        }
        buf.data
    }
}

pub(crate) fn parse_option_request(
    raw: &[u8],
) -> Result<Vec<DhcpV6OptionCode>, DhcpError> {
    if raw.len() % 2 != 0 {
        return Err(DhcpError::new(
            ErrorKind::InvalidOptionRequest,
            format!(
                "OPTION_ORO length {} is not a multiple of 2",
                raw.len()
            ),
        ));
    }
    Ok(raw
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]).into())
        .collect())
}

pub(crate) fn parse_unicast(raw: &[u8]) -> Result<Ipv6Addr, DhcpError> {
    if raw.len() < 16 {
        return Err(DhcpError::new(
            ErrorKind::UnexpectedEof,
            format!("OPTION_UNICAST requires 16 bytes, got {}", raw.len()),
        ));
    }
    if raw.len() != 16 {
        return Err(DhcpError::new(
            ErrorKind::InvalidUnicast,
            format!("OPTION_UNICAST requires 16 bytes, got {}", raw.len()),
        ));
    }
    let mut octets = [0u8; 16];
    octets.copy_from_slice(raw);
    let addr = Ipv6Addr::from(octets);
    if addr.to_ipv4_mapped().is_some() {
        return Err(DhcpError::new(
            ErrorKind::InvalidUnicast,
            format!("OPTION_UNICAST {addr} is an IPv4-mapped address"),
        ));
    }
    Ok(addr)
}

/// OPTION_RAPID_COMMIT, RFC 8415 - 21.14. Bare presence requests the
/// two-message exchange; it carries no payload.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct DhcpV6RapidCommit;

impl DhcpV6OptionValue for DhcpV6RapidCommit {
    fn to_bytes(&self) -> Vec<u8> {
        Vec::new()
    }
}

pub(crate) fn parse_rapid_commit(raw: &[u8]) -> Result<(), DhcpError> {
    if !raw.is_empty() {
        return Err(DhcpError::new(
            ErrorKind::InvalidRapidCommit,
            format!(
                "OPTION_RAPID_COMMIT must be empty, got {} bytes",
                raw.len()
            ),
        ));
    }
    Ok(())
}

/// A sequence of length-prefixed byte strings, the framing shared by
/// OPTION_USER_CLASS, OPTION_VENDOR_CLASS and OPT_BOOTFILE_PARAM.
///
/// Wire form per entry: 2 bytes length, then that many bytes of data. At
/// least one entry must be present; trailing bytes are rejected.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct DhcpV6Data(pub Vec<Vec<u8>>);

impl DhcpV6Data {
    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        let mut buf = Buffer::new(raw);
        let mut entries: Vec<Vec<u8>> = Vec::new();
        while buf.remain_len() > 1 {
            let len: usize = buf
                .get_u16_be()
                .context("Invalid class data length")?
                .into();
            entries.push(
                buf.get_bytes(len)
                    .context("Invalid class data entry")?
                    .to_vec(),
            );
        }
        if entries.is_empty() {
            return Err(DhcpError::new(
                ErrorKind::InvalidClass,
                "Class data must contain at least one entry".to_string(),
            ));
        }
        if !buf.is_empty() {
            return Err(DhcpError::new(
                ErrorKind::InvalidClass,
                format!(
                    "Trailing {} bytes after class data entries",
                    buf.remain_len()
                ),
            ));
        }
        Ok(Self(entries))
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        for entry in &self.0 {
            buf.write_u16_be(entry.len() as u16);
            buf.write_bytes(entry.as_slice());
        }
    }
}

impl DhcpV6OptionValue for DhcpV6Data {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }
}

/// OPTION_VENDOR_CLASS, RFC 8415 - 21.16. An enterprise number followed
/// by vendor class data entries.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6OptionVendorClass {
    pub enterprise_number: u32,
    pub data: DhcpV6Data,
}

impl DhcpV6OptionVendorClass {
    pub fn new(enterprise_number: u32, data: DhcpV6Data) -> Self {
        Self {
            enterprise_number,
            data,
        }
    }

    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        let mut buf = Buffer::new(raw);
        let enterprise_number = buf
            .get_u32_be()
            .context("Invalid OPTION_VENDOR_CLASS enterprise number")?;
        let data = DhcpV6Data::parse(buf.get_remains())
            .context("Invalid OPTION_VENDOR_CLASS data")?;
        Ok(Self {
            enterprise_number,
            data,
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_u32_be(self.enterprise_number);
        self.data.emit(buf);
    }
}

impl DhcpV6OptionValue for DhcpV6OptionVendorClass {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }
}

/// OPTION_VENDOR_OPTS, RFC 8415 - 21.17. An enterprise number followed
/// by encapsulated vendor options.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6OptionVendorOpts {
    pub enterprise_number: u32,
    pub options: DhcpV6Options,
}

impl DhcpV6OptionVendorOpts {
    pub fn new(enterprise_number: u32, options: DhcpV6Options) -> Self {
        Self {
            enterprise_number,
            options,
        }
    }

    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        let mut buf = Buffer::new(raw);
        Ok(Self {
            enterprise_number: buf
                .get_u32_be()
                .context("Invalid OPTION_VENDOR_OPTS enterprise number")?,
            options: DhcpV6Options::parse(&mut buf)
                .context("Invalid OPTION_VENDOR_OPTS options")?,
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_u32_be(self.enterprise_number);
        self.options.emit(buf);
    }
}

impl DhcpV6OptionValue for DhcpV6OptionVendorOpts {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }
}

/// Relay Agent Remote-ID, RFC 4649. An enterprise number followed by an
/// opaque remote-id of at least one byte.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6OptionRemoteId {
    pub enterprise_number: u32,
    pub remote_id: Vec<u8>,
}

impl DhcpV6OptionRemoteId {
    pub fn new(enterprise_number: u32, remote_id: &[u8]) -> Self {
        Self {
            enterprise_number,
            remote_id: remote_id.to_vec(),
        }
    }

    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        if raw.len() < 5 {
            return Err(DhcpError::new(
                ErrorKind::UnexpectedEof,
                format!(
                    "OPTION_REMOTE_ID requires at least 5 bytes, got {}",
                    raw.len()
                ),
            ));
        }
        let mut buf = Buffer::new(raw);
        Ok(Self {
            enterprise_number: buf
                .get_u32_be()
                .context("Invalid OPTION_REMOTE_ID enterprise number")?,
            remote_id: buf.get_remains().to_vec(),
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_u32_be(self.enterprise_number);
        buf.write_bytes(self.remote_id.as_slice());
    }
}

impl DhcpV6OptionValue for DhcpV6OptionRemoteId {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }
}

/// OPTION_AUTH, RFC 8415 - 21.11.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6OptionAuth {
    pub protocol: u8,
    pub algorithm: u8,
    pub rdm: u8,
    pub replay_detection: u64,
    pub auth_info: Vec<u8>,
}

impl DhcpV6OptionAuth {
    pub fn new(
        protocol: u8,
        algorithm: u8,
        rdm: u8,
        replay_detection: u64,
        auth_info: &[u8],
    ) -> Self {
        Self {
            protocol,
            algorithm,
            rdm,
            replay_detection,
            auth_info: auth_info.to_vec(),
        }
    }

    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        let mut buf = Buffer::new(raw);
        Ok(Self {
            protocol: buf.get_u8().context("Invalid OPTION_AUTH protocol")?,
            algorithm: buf
                .get_u8()
                .context("Invalid OPTION_AUTH algorithm")?,
            rdm: buf.get_u8().context("Invalid OPTION_AUTH RDM")?,
            replay_detection: buf
                .get_u64_be()
                .context("Invalid OPTION_AUTH replay detection")?,
            auth_info: buf.get_remains().to_vec(),
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) {
        buf.write_u8(self.protocol);
        buf.write_u8(self.algorithm);
        buf.write_u8(self.rdm);
        buf.write_u64_be(self.replay_detection);
        buf.write_bytes(self.auth_info.as_slice());
    }
}

impl DhcpV6OptionValue for DhcpV6OptionAuth {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        self.emit(&mut buf);
        buf.data
    }
}

const ARCH_TYPE_INTEL_X86PC: u16 = 0;
const ARCH_TYPE_NEC_PC98: u16 = 1;
const ARCH_TYPE_EFI_ITANIUM: u16 = 2;
const ARCH_TYPE_DEC_ALPHA: u16 = 3;
const ARCH_TYPE_ARC_X86: u16 = 4;
const ARCH_TYPE_INTEL_LEAN_CLIENT: u16 = 5;
const ARCH_TYPE_EFI_IA32: u16 = 6;
const ARCH_TYPE_EFI_BC: u16 = 7;
const ARCH_TYPE_EFI_XSCALE: u16 = 8;
const ARCH_TYPE_EFI_X86_64: u16 = 9;

/// Client system architecture, RFC 4578 - 2.1, carried in
/// OPTION_CLIENT_ARCH_TYPE (RFC 5970 - 3.3).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[non_exhaustive]
pub enum DhcpV6ArchType {
    IntelX86Pc,
    NecPc98,
    EfiItanium,
    DecAlpha,
    ArcX86,
    IntelLeanClient,
    EfiIa32,
    EfiBc,
    EfiXscale,
    EfiX8664,
    Unknown(u16),
}

impl From<u16> for DhcpV6ArchType {
    fn from(d: u16) -> Self {
        match d {
            ARCH_TYPE_INTEL_X86PC => Self::IntelX86Pc,
            ARCH_TYPE_NEC_PC98 => Self::NecPc98,
            ARCH_TYPE_EFI_ITANIUM => Self::EfiItanium,
            ARCH_TYPE_DEC_ALPHA => Self::DecAlpha,
            ARCH_TYPE_ARC_X86 => Self::ArcX86,
            ARCH_TYPE_INTEL_LEAN_CLIENT => Self::IntelLeanClient,
            ARCH_TYPE_EFI_IA32 => Self::EfiIa32,
            ARCH_TYPE_EFI_BC => Self::EfiBc,
            ARCH_TYPE_EFI_XSCALE => Self::EfiXscale,
            ARCH_TYPE_EFI_X86_64 => Self::EfiX8664,
            _ => Self::Unknown(d),
        }
    }
}

impl From<DhcpV6ArchType> for u16 {
    fn from(v: DhcpV6ArchType) -> u16 {
        match v {
            DhcpV6ArchType::IntelX86Pc => ARCH_TYPE_INTEL_X86PC,
            DhcpV6ArchType::NecPc98 => ARCH_TYPE_NEC_PC98,
            DhcpV6ArchType::EfiItanium => ARCH_TYPE_EFI_ITANIUM,
            DhcpV6ArchType::DecAlpha => ARCH_TYPE_DEC_ALPHA,
            DhcpV6ArchType::ArcX86 => ARCH_TYPE_ARC_X86,
            DhcpV6ArchType::IntelLeanClient => ARCH_TYPE_INTEL_LEAN_CLIENT,
            DhcpV6ArchType::EfiIa32 => ARCH_TYPE_EFI_IA32,
            DhcpV6ArchType::EfiBc => ARCH_TYPE_EFI_BC,
            DhcpV6ArchType::EfiXscale => ARCH_TYPE_EFI_XSCALE,
            DhcpV6ArchType::EfiX8664 => ARCH_TYPE_EFI_X86_64,
            DhcpV6ArchType::Unknown(d) => d,
        }
    }
}

impl std::fmt::Display for DhcpV6ArchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IntelX86Pc => write!(f, "Intel x86PC"),
            Self::NecPc98 => write!(f, "NEC/PC98"),
            Self::EfiItanium => write!(f, "EFI Itanium"),
            Self::DecAlpha => write!(f, "DEC Alpha"),
            Self::ArcX86 => write!(f, "Arc x86"),
            Self::IntelLeanClient => write!(f, "Intel Lean Client"),
            Self::EfiIa32 => write!(f, "EFI IA32"),
            Self::EfiBc => write!(f, "EFI BC"),
            Self::EfiXscale => write!(f, "EFI Xscale"),
            Self::EfiX8664 => write!(f, "EFI x86-64"),
            Self::Unknown(d) => write!(f, "Unknown({d})"),
        }
    }
}

/// Architecture list for OPTION_CLIENT_ARCH_TYPE insertion.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct DhcpV6ArchTypes(pub Vec<DhcpV6ArchType>);

impl DhcpV6OptionValue for DhcpV6ArchTypes {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        for arch in &self.0 {
            buf.write_u16_be((*arch).into());
        }
        buf.data
    }
}

pub(crate) fn parse_arch_types(
    raw: &[u8],
) -> Result<Vec<DhcpV6ArchType>, DhcpError> {
    if raw.len() < 2 || raw.len() % 2 != 0 {
        return Err(DhcpError::new(
            ErrorKind::UnexpectedEof,
            format!(
                "OPTION_CLIENT_ARCH_TYPE requires an even length of at \
                 least 2, got {}",
                raw.len()
            ),
        ));
    }
    Ok(raw
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]).into())
        .collect())
}

/// Client Network Interface Identifier, RFC 5970 - 3.4. Exactly three
/// bytes: interface type, then the UNDI major and minor revision.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub struct DhcpV6OptionNii {
    pub interface_type: u8,
    pub major: u8,
    pub minor: u8,
}

impl DhcpV6OptionNii {
    pub fn new(interface_type: u8, major: u8, minor: u8) -> Self {
        Self {
            interface_type,
            major,
            minor,
        }
    }

    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        if raw.len() != 3 {
            return Err(DhcpError::new(
                ErrorKind::UnexpectedEof,
                format!("OPTION_NII requires 3 bytes, got {}", raw.len()),
            ));
        }
        Ok(Self {
            interface_type: raw[0],
            major: raw[1],
            minor: raw[2],
        })
    }
}

impl DhcpV6OptionValue for DhcpV6OptionNii {
    fn to_bytes(&self) -> Vec<u8> {
        vec![self.interface_type, self.major, self.minor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preference_exact() -> Result<(), DhcpError> {
        assert_eq!(parse_preference(&[0xff])?, 255);
        Ok(())
    }

    #[test]
    fn parse_preference_empty_is_eof() {
        assert_eq!(
            parse_preference(&[]).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn parse_preference_excess_is_invalid() {
        assert_eq!(
            parse_preference(&[0x01, 0x02]).unwrap_err().kind(),
            ErrorKind::InvalidPreference
        );
    }

    #[test]
    fn elapsed_time_is_hundredths() -> Result<(), DhcpError> {
        // 0x0101 hundredths of a second
        assert_eq!(
            parse_elapsed_time(&[0x01, 0x01])?,
            Duration::from_millis(2570)
        );
        assert_eq!(
            DhcpV6ElapsedTime(Duration::from_millis(2570)).to_bytes(),
            vec![0x01, 0x01]
        );
        Ok(())
    }

    #[test]
    fn elapsed_time_short_is_eof() {
        assert_eq!(
            parse_elapsed_time(&[0x01]).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn elapsed_time_marshal_wraps() {
        // 0x10000 hundredths of a second wraps to zero
        let long = DhcpV6ElapsedTime(Duration::from_millis(655360));
        assert_eq!(long.to_bytes(), vec![0x00, 0x00]);
    }

    #[test]
    fn option_request_preserves_order() -> Result<(), DhcpError> {
        let codes = parse_option_request(&[0x00, 0x17, 0x00, 0x03])?;
        assert_eq!(
            codes,
            vec![DhcpV6OptionCode::Unknown(23), DhcpV6OptionCode::IaNa]
        );
        assert_eq!(
            DhcpV6OptionRequest(codes).to_bytes(),
            vec![0x00, 0x17, 0x00, 0x03]
        );
        Ok(())
    }

    #[test]
    fn option_request_odd_length() {
        assert_eq!(
            parse_option_request(&[0x00, 0x17, 0x00]).unwrap_err().kind(),
            ErrorKind::InvalidOptionRequest
        );
    }

    #[test]
    fn unicast_rejects_ipv4_mapped() {
        let mapped: Ipv6Addr = "::ffff:192.0.2.1".parse().unwrap();
        assert_eq!(
            parse_unicast(&mapped.octets()).unwrap_err().kind(),
            ErrorKind::InvalidUnicast
        );
    }

    #[test]
    fn unicast_short_is_eof() {
        assert_eq!(
            parse_unicast(&[0x20, 0x01]).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn rapid_commit_must_be_empty() {
        assert!(parse_rapid_commit(&[]).is_ok());
        assert_eq!(
            parse_rapid_commit(&[0x00]).unwrap_err().kind(),
            ErrorKind::InvalidRapidCommit
        );
    }

    #[test]
    fn data_round_trip() -> Result<(), DhcpError> {
        let raw = &[0x00, 0x04, 0x74, 0x65, 0x73, 0x74, 0x00, 0x00];
        let data = DhcpV6Data::parse(raw)?;
        assert_eq!(data, DhcpV6Data(vec![b"test".to_vec(), Vec::new()]));
        assert_eq!(data.to_bytes().as_slice(), raw);
        Ok(())
    }

    #[test]
    fn data_rejects_empty() {
        assert_eq!(
            DhcpV6Data::parse(&[]).unwrap_err().kind(),
            ErrorKind::InvalidClass
        );
    }

    #[test]
    fn data_rejects_trailing_byte() {
        assert_eq!(
            DhcpV6Data::parse(&[0x00, 0x01, 0x61, 0x00])
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidClass
        );
    }

    #[test]
    fn data_rejects_overrun_entry() {
        assert_eq!(
            DhcpV6Data::parse(&[0x00, 0x05, 0x61]).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn vendor_class_round_trip() -> Result<(), DhcpError> {
        let raw = &[
            0x00, 0x00, 0x01, 0x37, 0x00, 0x05, 0x68, 0x65, 0x6c, 0x6c, 0x6f,
        ];
        let vc = DhcpV6OptionVendorClass::parse(raw)?;
        assert_eq!(vc.enterprise_number, 311);
        assert_eq!(vc.data, DhcpV6Data(vec![b"hello".to_vec()]));
        assert_eq!(vc.to_bytes().as_slice(), raw);
        Ok(())
    }

    #[test]
    fn vendor_opts_round_trip() -> Result<(), DhcpError> {
        let raw = &[
            0x00, 0x00, 0x01, 0x37, 0x00, 0x01, 0x00, 0x02, 0x00, 0x01,
        ];
        let vo = DhcpV6OptionVendorOpts::parse(raw)?;
        assert_eq!(vo.enterprise_number, 311);
        assert_eq!(
            vo.options.get_one(DhcpV6OptionCode::ClientId)?,
            &[0x00, 0x01]
        );
        assert_eq!(vo.to_bytes().as_slice(), raw);
        Ok(())
    }

    #[test]
    fn remote_id_minimum_length() {
        let raw = &[0x00, 0x00, 0x01, 0x37, 0xaa];
        let rid = DhcpV6OptionRemoteId::parse(raw).unwrap();
        assert_eq!(rid, DhcpV6OptionRemoteId::new(311, &[0xaa]));
        assert_eq!(
            DhcpV6OptionRemoteId::parse(&raw[..4]).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn auth_round_trip() -> Result<(), DhcpError> {
        let raw = &[
            0x03, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x09,
            0xde, 0xad, 0xbe, 0xef,
        ];
        let auth = DhcpV6OptionAuth::parse(raw)?;
        assert_eq!(
            auth,
            DhcpV6OptionAuth::new(3, 1, 0, 9, &[0xde, 0xad, 0xbe, 0xef])
        );
        assert_eq!(auth.to_bytes().as_slice(), raw);
        Ok(())
    }

    #[test]
    fn auth_one_byte_short_is_eof() {
        let raw = &[0x03, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(
            DhcpV6OptionAuth::parse(raw).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn arch_types_round_trip() -> Result<(), DhcpError> {
        let archs = parse_arch_types(&[0x00, 0x00, 0x00, 0x09])?;
        assert_eq!(
            archs,
            vec![DhcpV6ArchType::IntelX86Pc, DhcpV6ArchType::EfiX8664]
        );
        assert_eq!(
            DhcpV6ArchTypes(archs).to_bytes(),
            vec![0x00, 0x00, 0x00, 0x09]
        );
        Ok(())
    }

    #[test]
    fn arch_types_odd_or_empty() {
        assert_eq!(
            parse_arch_types(&[]).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
        assert_eq!(
            parse_arch_types(&[0x00, 0x00, 0x01]).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn nii_is_exactly_three_bytes() {
        assert_eq!(
            DhcpV6OptionNii::parse(&[0x01, 0x02, 0x01]).unwrap(),
            DhcpV6OptionNii::new(1, 2, 1)
        );
        assert_eq!(
            DhcpV6OptionNii::parse(&[0x01, 0x02]).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }
}
