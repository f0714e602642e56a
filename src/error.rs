// SPDX-License-Identifier: Apache-2.0

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Datagram too short, or option decoding failed while parsing a
    /// message or relay message.
    InvalidPacket,
    /// Trailing bytes, truncated option data, or a declared option length
    /// exceeding the remaining bytes.
    InvalidOptions,
    /// Transaction ID is not exactly 3 bytes.
    InvalidTransactionId,
    /// A typed accessor could not find the requested option.
    OptionNotPresent,
    /// An option unmarshaller received too few bytes.
    UnexpectedEof,
    /// Not enough bytes to determine a DUID type.
    InvalidDuid,
    /// DUID type is not LLT, EN, LL or UUID.
    UnknownDuid,
    InvalidDuidLlt,
    InvalidDuidEn,
    InvalidDuidLl,
    InvalidDuidUuid,
    /// DUID-LLT generation time predates the 2000-01-01 UTC epoch.
    InvalidDuidLltTime,
    InvalidIaNa,
    InvalidIaTa,
    InvalidIaAddr,
    InvalidIaPd,
    InvalidIaPrefix,
    /// Preferred lifetime exceeds valid lifetime.
    InvalidLifetimes,
    /// Not an IPv6 address.
    InvalidIp,
    InvalidOptionRequest,
    InvalidPreference,
    InvalidElapsedTime,
    InvalidRapidCommit,
    InvalidUnicast,
    /// Malformed user class, vendor class or other length-prefixed data.
    InvalidClass,
    InvalidBootFileParam,
    InvalidStatusCode,
    InvalidUrl,
    /// A hardware type could not be read for the interface.
    ParseHardwareType,
    /// Hardware type detection is not implemented on this platform.
    HardwareTypeNotImplemented,
    /// Socket or other OS level failure.
    Io,
    Bug,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DhcpError {
    kind: ErrorKind,
    msg: String,
}

impl DhcpError {
    pub fn new(kind: ErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }
}

impl std::fmt::Display for DhcpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl std::error::Error for DhcpError {}

impl From<std::io::Error> for DhcpError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, format!("IO error: {e}"))
    }
}

impl From<nix::errno::Errno> for DhcpError {
    fn from(e: nix::errno::Errno) -> Self {
        Self::new(ErrorKind::Io, format!("System error: {e}"))
    }
}

pub(crate) trait ErrorContext<T> {
    /// Prefix the error message of the `Err` arm, keeping its kind.
    fn context(self, message: &str) -> Result<T, DhcpError>;
}

impl<T> ErrorContext<T> for Result<T, DhcpError> {
    fn context(self, message: &str) -> Result<T, DhcpError> {
        self.map_err(|e| {
            DhcpError::new(e.kind, format!("{message}: {}", e.msg))
        })
    }
}
