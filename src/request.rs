// SPDX-License-Identifier: Apache-2.0

use std::net::SocketAddrV6;

use crate::{DhcpV6Message, DhcpV6MessageType, DhcpV6Options};

/// A processed DHCPv6 request received by the server: one instance per
/// inbound datagram, handed to the matching handler and released when the
/// handler returns.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6Request {
    /// DHCP message type, such as Solicit, Request or Renew.
    pub msg_type: DhcpV6MessageType,
    /// Transaction ID, preserved across every exchange of a transaction.
    pub xid: [u8; 3],
    /// Options sent by the client.
    pub options: DhcpV6Options,
    /// Length of the raw datagram in bytes.
    pub length: u64,
    /// Text form of the address the request was received from.
    pub remote_addr: String,
    packet: DhcpV6Message,
}

impl DhcpV6Request {
    pub fn new(
        packet: DhcpV6Message,
        length: u64,
        remote_addr: String,
    ) -> Self {
        Self {
            msg_type: packet.msg_type,
            xid: packet.xid,
            options: packet.options.clone(),
            length,
            remote_addr,
            packet,
        }
    }

    pub(crate) fn from_datagram(
        packet: DhcpV6Message,
        length: usize,
        remote_addr: &SocketAddrV6,
    ) -> Self {
        Self::new(packet, length as u64, remote_addr.to_string())
    }

    /// The decoded packet this request was assembled from, for handlers
    /// needing more than the pre-extracted fields.
    pub fn packet(&self) -> &DhcpV6Message {
        &self.packet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DhcpV6OptionCode, ErrorKind};

    #[test]
    fn request_mirrors_packet() {
        let mut options = DhcpV6Options::new();
        options.add_raw(DhcpV6OptionCode::ClientId, vec![0x00, 0x01]);
        let packet = DhcpV6Message::new(
            DhcpV6MessageType::Solicit,
            &[0xaa, 0xbb, 0xcc],
            options,
        )
        .unwrap();

        let addr: SocketAddrV6 = "[fe80::1]:546".parse().unwrap();
        let request =
            DhcpV6Request::from_datagram(packet.clone(), 10, &addr);

        assert_eq!(request.msg_type, DhcpV6MessageType::Solicit);
        assert_eq!(request.xid, [0xaa, 0xbb, 0xcc]);
        assert_eq!(request.length, 10);
        assert_eq!(request.remote_addr, "[fe80::1]:546");
        assert_eq!(request.packet(), &packet);
        assert_eq!(
            request.options.get_one(DhcpV6OptionCode::ClientId).unwrap(),
            &[0x00, 0x01]
        );
        assert_eq!(
            request.options.server_id().unwrap_err().kind(),
            ErrorKind::OptionNotPresent
        );
    }
}
