// SPDX-License-Identifier: Apache-2.0

use std::net::Ipv6Addr;

use crate::{
    buffer::{Buffer, BufferMut},
    DhcpError, DhcpV6Message, DhcpV6MessageType, DhcpV6OptionValue,
    DhcpV6Options, ErrorKind,
};

// msg-type(1) + hop-count(1) + link-address(16) + peer-address(16)
const RELAY_HEADER_LEN: usize = 34;

/// A DHCPv6 relay agent message, RFC 8415 - 9. Relay Agent/Server Message
/// Formats. Used with [DhcpV6MessageType::RelayForward] and
/// [DhcpV6MessageType::RelayReply].
///
/// RFC 8415 requires every relay message to carry an OPTION_RELAY_MSG in
/// its options. The codec does not enforce that; handlers relaying
/// messages are expected to.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6RelayMessage {
    pub msg_type: DhcpV6MessageType,
    /// Number of relay agents that have already relayed this message.
    pub hop_count: u8,
    /// Address identifying the link the client is located on.
    pub link_address: Ipv6Addr,
    /// Address of the client or relay agent the relayed message was
    /// received from.
    pub peer_address: Ipv6Addr,
    pub options: DhcpV6Options,
}

impl DhcpV6RelayMessage {
    pub fn parse(payload: &[u8]) -> Result<Self, DhcpError> {
        if payload.len() < RELAY_HEADER_LEN {
            return Err(DhcpError::new(
                ErrorKind::InvalidPacket,
                format!(
                    "DHCPv6 relay message requires at least \
                     {RELAY_HEADER_LEN} bytes, got {}",
                    payload.len()
                ),
            ));
        }
        let mut buf = Buffer::new(payload);
        let msg_type = match buf.get_u8() {
            Ok(d) => DhcpV6MessageType::from(d),
            Err(e) => {
                return Err(DhcpError::new(
                    ErrorKind::InvalidPacket,
                    format!("Invalid relay message type: {}", e.msg()),
                ))
            }
        };
        let hop_count = buf.get_u8().map_err(|e| {
            DhcpError::new(
                ErrorKind::InvalidPacket,
                format!("Invalid relay message hop count: {}", e.msg()),
            )
        })?;
        let link_address = buf.get_ipv6().map_err(|e| {
            DhcpError::new(
                ErrorKind::InvalidPacket,
                format!("Invalid relay message link address: {}", e.msg()),
            )
        })?;
        let peer_address = buf.get_ipv6().map_err(|e| {
            DhcpError::new(
                ErrorKind::InvalidPacket,
                format!("Invalid relay message peer address: {}", e.msg()),
            )
        })?;
        let options = DhcpV6Options::parse(&mut buf).map_err(|e| {
            DhcpError::new(
                ErrorKind::InvalidPacket,
                format!("Invalid relay message options: {}", e.msg()),
            )
        })?;
        Ok(Self {
            msg_type,
            hop_count,
            link_address,
            peer_address,
            options,
        })
    }

    pub fn emit(&self) -> Vec<u8> {
        let mut buf = BufferMut::new();
        buf.write_u8(self.msg_type.into());
        buf.write_u8(self.hop_count);
        buf.write_ipv6(self.link_address);
        buf.write_ipv6(self.peer_address);
        self.options.emit(&mut buf);
        buf.data
    }
}

/// OPTION_RELAY_MSG, RFC 8415 - 21.10. Opaque framing around either a
/// client/server message or a further relay message.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct DhcpV6OptionRelayMsg {
    raw: Vec<u8>,
}

impl DhcpV6OptionRelayMsg {
    pub fn from_message(msg: &DhcpV6Message) -> Self {
        Self { raw: msg.emit() }
    }

    pub fn from_relay_message(msg: &DhcpV6RelayMessage) -> Self {
        Self { raw: msg.emit() }
    }

    /// The carried client/server message.
    pub fn message(&self) -> Result<DhcpV6Message, DhcpError> {
        DhcpV6Message::parse(self.raw.as_slice())
    }

    /// The carried relay message, for relay chains deeper than one hop.
    pub fn nested_relay_message(
        &self,
    ) -> Result<DhcpV6RelayMessage, DhcpError> {
        DhcpV6RelayMessage::parse(self.raw.as_slice())
    }

    pub fn as_raw(&self) -> &[u8] {
        self.raw.as_slice()
    }

    pub(crate) fn parse(raw: &[u8]) -> Result<Self, DhcpError> {
        Ok(Self { raw: raw.to_vec() })
    }
}

impl DhcpV6OptionValue for DhcpV6OptionRelayMsg {
    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }
}
