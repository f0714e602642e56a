// SPDX-License-Identifier: Apache-2.0

use crate::{
    buffer::{Buffer, BufferMut},
    DhcpError, DhcpV6Options, ErrorKind,
};

const MSG_TYPE_SOLICIT: u8 = 1;
const MSG_TYPE_ADVERTISE: u8 = 2;
const MSG_TYPE_REQUEST: u8 = 3;
const MSG_TYPE_CONFIRM: u8 = 4;
const MSG_TYPE_RENEW: u8 = 5;
const MSG_TYPE_REBIND: u8 = 6;
const MSG_TYPE_REPLY: u8 = 7;
const MSG_TYPE_RELEASE: u8 = 8;
const MSG_TYPE_DECLINE: u8 = 9;
const MSG_TYPE_RECONFIGURE: u8 = 10;
const MSG_TYPE_INFORMATION_REQUEST: u8 = 11;
const MSG_TYPE_RELAY_FORWARD: u8 = 12;
const MSG_TYPE_RELAY_REPLY: u8 = 13;

/// DHCPv6 Message Type
///
/// Defined by RFC 8415 - 7.3. DHCP Message Types. Types absent from the
/// registry are carried as [DhcpV6MessageType::Unknown] and round-trip
/// unchanged.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum DhcpV6MessageType {
    Solicit,
    Advertise,
    Request,
    Confirm,
    Renew,
    Rebind,
    Reply,
    Release,
    Decline,
    Reconfigure,
    InformationRequest,
    RelayForward,
    RelayReply,
    Unknown(u8),
}

impl From<DhcpV6MessageType> for u8 {
    fn from(v: DhcpV6MessageType) -> u8 {
        match v {
            DhcpV6MessageType::Solicit => MSG_TYPE_SOLICIT,
            DhcpV6MessageType::Advertise => MSG_TYPE_ADVERTISE,
            DhcpV6MessageType::Request => MSG_TYPE_REQUEST,
            DhcpV6MessageType::Confirm => MSG_TYPE_CONFIRM,
            DhcpV6MessageType::Renew => MSG_TYPE_RENEW,
            DhcpV6MessageType::Rebind => MSG_TYPE_REBIND,
            DhcpV6MessageType::Reply => MSG_TYPE_REPLY,
            DhcpV6MessageType::Release => MSG_TYPE_RELEASE,
            DhcpV6MessageType::Decline => MSG_TYPE_DECLINE,
            DhcpV6MessageType::Reconfigure => MSG_TYPE_RECONFIGURE,
            DhcpV6MessageType::InformationRequest => {
                MSG_TYPE_INFORMATION_REQUEST
            }
            DhcpV6MessageType::RelayForward => MSG_TYPE_RELAY_FORWARD,
            DhcpV6MessageType::RelayReply => MSG_TYPE_RELAY_REPLY,
            DhcpV6MessageType::Unknown(d) => d,
        }
    }
}

impl From<u8> for DhcpV6MessageType {
    fn from(d: u8) -> Self {
        match d {
            MSG_TYPE_SOLICIT => Self::Solicit,
            MSG_TYPE_ADVERTISE => Self::Advertise,
            MSG_TYPE_REQUEST => Self::Request,
            MSG_TYPE_CONFIRM => Self::Confirm,
            MSG_TYPE_RENEW => Self::Renew,
            MSG_TYPE_REBIND => Self::Rebind,
            MSG_TYPE_REPLY => Self::Reply,
            MSG_TYPE_RELEASE => Self::Release,
            MSG_TYPE_DECLINE => Self::Decline,
            MSG_TYPE_RECONFIGURE => Self::Reconfigure,
            MSG_TYPE_INFORMATION_REQUEST => Self::InformationRequest,
            MSG_TYPE_RELAY_FORWARD => Self::RelayForward,
            MSG_TYPE_RELAY_REPLY => Self::RelayReply,
            _ => Self::Unknown(d),
        }
    }
}

impl std::fmt::Display for DhcpV6MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solicit => write!(f, "Solicit"),
            Self::Advertise => write!(f, "Advertise"),
            Self::Request => write!(f, "Request"),
            Self::Confirm => write!(f, "Confirm"),
            Self::Renew => write!(f, "Renew"),
            Self::Rebind => write!(f, "Rebind"),
            Self::Reply => write!(f, "Reply"),
            Self::Release => write!(f, "Release"),
            Self::Decline => write!(f, "Decline"),
            Self::Reconfigure => write!(f, "Reconfigure"),
            Self::InformationRequest => write!(f, "Information-request"),
            Self::RelayForward => write!(f, "Relay-forward"),
            Self::RelayReply => write!(f, "Relay-reply"),
            Self::Unknown(d) => write!(f, "Unknown({d})"),
        }
    }
}

pub(crate) const DHCPV6_TRANSACTION_ID_LEN: usize = 3;

/// A DHCPv6 client/server message, RFC 8415 - 8: a message type, a
/// 3 octet transaction-id and the option list.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6Message {
    pub msg_type: DhcpV6MessageType,
    pub xid: [u8; DHCPV6_TRANSACTION_ID_LEN],
    pub options: DhcpV6Options,
}

impl DhcpV6Message {
    /// Build a message from a borrowed transaction-id slice. Fails with
    /// [ErrorKind::InvalidTransactionId] unless the slice is exactly 3
    /// bytes.
    pub fn new(
        msg_type: DhcpV6MessageType,
        xid: &[u8],
        options: DhcpV6Options,
    ) -> Result<Self, DhcpError> {
        if xid.len() != DHCPV6_TRANSACTION_ID_LEN {
            return Err(DhcpError::new(
                ErrorKind::InvalidTransactionId,
                format!(
                    "Transaction ID must be exactly 3 bytes, got {}",
                    xid.len()
                ),
            ));
        }
        let mut ret = Self {
            msg_type,
            xid: [0; DHCPV6_TRANSACTION_ID_LEN],
            options,
        };
        ret.xid.copy_from_slice(xid);
        Ok(ret)
    }

    pub fn parse(payload: &[u8]) -> Result<Self, DhcpError> {
        if payload.len() < 4 {
            return Err(DhcpError::new(
                ErrorKind::InvalidPacket,
                format!(
                    "DHCPv6 message requires at least 4 bytes, got {}",
                    payload.len()
                ),
            ));
        }
        let mut buf = Buffer::new(&payload[4..]);
        let options = DhcpV6Options::parse(&mut buf).map_err(|e| {
            DhcpError::new(
                ErrorKind::InvalidPacket,
                format!("Invalid DHCPv6 message options: {}", e.msg()),
            )
        })?;
        let mut xid = [0u8; DHCPV6_TRANSACTION_ID_LEN];
        xid.copy_from_slice(&payload[1..4]);
        Ok(Self {
            msg_type: payload[0].into(),
            xid,
            options,
        })
    }

    pub fn emit(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        buf.write_u8(self.msg_type.into());
        buf.write_bytes(&self.xid);
        self.options.emit(&mut buf);
        buf.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DhcpV6OptionCode;

    #[test]
    fn emit_solicit_no_options() -> Result<(), DhcpError> {
        let msg = DhcpV6Message::new(
            DhcpV6MessageType::Solicit,
            &[0, 0, 0],
            DhcpV6Options::new(),
        )?;
        assert_eq!(msg.emit(), vec![1, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn emit_solicit_with_client_id() -> Result<(), DhcpError> {
        let mut options = DhcpV6Options::new();
        options.add_raw(DhcpV6OptionCode::ClientId, vec![0, 1]);
        let msg = DhcpV6Message::new(
            DhcpV6MessageType::Solicit,
            &[1, 2, 3],
            options,
        )?;
        assert_eq!(msg.emit(), vec![1, 1, 2, 3, 0, 1, 0, 2, 0, 1]);
        Ok(())
    }

    #[test]
    fn new_rejects_wrong_xid_length() {
        let e = DhcpV6Message::new(
            DhcpV6MessageType::Solicit,
            &[0, 0],
            DhcpV6Options::new(),
        )
        .unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidTransactionId);
    }

    #[test]
    fn parse_three_bytes_is_invalid() {
        let e = DhcpV6Message::parse(&[0, 0, 0]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidPacket);
    }

    #[test]
    fn parse_truncated_option_is_invalid() {
        // Declares a 1 byte option value but supplies none
        let e = DhcpV6Message::parse(&[0, 0, 0, 0, 0, 1, 0, 1]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidPacket);
    }

    #[test]
    fn parse_round_trip() -> Result<(), DhcpError> {
        let raw = vec![1, 1, 2, 3, 0, 1, 0, 2, 0, 1];
        let msg = DhcpV6Message::parse(raw.as_slice())?;
        assert_eq!(msg.msg_type, DhcpV6MessageType::Solicit);
        assert_eq!(msg.xid, [1, 2, 3]);
        assert_eq!(
            msg.options.get_one(DhcpV6OptionCode::ClientId)?,
            &[0, 1]
        );
        assert_eq!(msg.emit(), raw);
        Ok(())
    }

    #[test]
    fn unknown_message_type_round_trips() {
        let mt = DhcpV6MessageType::from(200);
        assert_eq!(mt, DhcpV6MessageType::Unknown(200));
        assert_eq!(u8::from(mt), 200);
    }

    #[test]
    fn message_type_registry() {
        for d in 1..=13u8 {
            assert_eq!(u8::from(DhcpV6MessageType::from(d)), d);
            assert_ne!(
                DhcpV6MessageType::from(d),
                DhcpV6MessageType::Unknown(d)
            );
        }
    }
}
