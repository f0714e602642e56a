// SPDX-License-Identifier: Apache-2.0

use std::io::IoSliceMut;
use std::net::{Ipv6Addr, SocketAddr, SocketAddrV6, UdpSocket};
use std::os::unix::io::AsRawFd;

use nix::sys::socket::{
    recvmsg, setsockopt, sockopt::Ipv6RecvPacketInfo, ControlMessageOwned,
    MsgFlags, SockaddrIn6,
};

use crate::{DhcpError, ErrorKind};

/// UDP port DHCPv6 servers and relay agents listen on, RFC 8415 - 7.2.
pub const SERVER_PORT: u16 = 547;

/// UDP port DHCPv6 clients listen on, RFC 8415 - 7.2. Replies relayed
/// onwards by a relay agent handler are addressed here.
pub const CLIENT_PORT: u16 = 546;

/// The narrow socket surface the server depends on. Implemented by
/// [UdpPacketConn] for real traffic; tests provide in-memory
/// implementations to exercise the serve loop without sockets.
///
/// The connection is closed by dropping it.
pub trait PacketConn: Send + Sync {
    /// Receive one datagram. Returns the byte count, the receiving
    /// interface index when control-message delivery is enabled, and the
    /// peer address.
    fn recv_from(
        &self,
        buf: &mut [u8],
    ) -> Result<(usize, Option<u32>, SocketAddrV6), DhcpError>;

    /// Send one datagram. Single-datagram sends are atomic, so the send
    /// path may be shared across request tasks.
    fn send_to(
        &self,
        data: &[u8],
        dst: &SocketAddrV6,
    ) -> Result<usize, DhcpError>;

    /// Enable or disable per-packet delivery of the receiving interface
    /// index.
    fn set_recv_interface_index(&self, enabled: bool)
        -> Result<(), DhcpError>;

    fn join_group(
        &self,
        iface_index: u32,
        group: Ipv6Addr,
    ) -> Result<(), DhcpError>;

    fn leave_group(
        &self,
        iface_index: u32,
        group: Ipv6Addr,
    ) -> Result<(), DhcpError>;
}

/// A UDP6 packet connection with `IPV6_RECVPKTINFO` based interface
/// reporting.
#[derive(Debug)]
pub struct UdpPacketConn {
    socket: UdpSocket,
}

impl UdpPacketConn {
    /// Bind to `addr`, e.g. `[::]:547`.
    pub fn bind(addr: &str) -> Result<Self, DhcpError> {
        log::debug!("Binding UDP6 packet connection on {addr}");
        let socket = UdpSocket::bind(addr)?;
        Ok(Self { socket })
    }
}

impl PacketConn for UdpPacketConn {
    fn recv_from(
        &self,
        buf: &mut [u8],
    ) -> Result<(usize, Option<u32>, SocketAddrV6), DhcpError> {
        let mut iov = [IoSliceMut::new(buf)];
        let mut cmsg_space = nix::cmsg_space!(libc::in6_pktinfo);
        let msg = recvmsg::<SockaddrIn6>(
            self.socket.as_raw_fd(),
            &mut iov,
            Some(&mut cmsg_space),
            MsgFlags::empty(),
        )?;

        let mut iface_index = None;
        for cmsg in msg.cmsgs() {
            if let ControlMessageOwned::Ipv6PacketInfo(pktinfo) = cmsg {
                iface_index = Some(pktinfo.ipi6_ifindex as u32);
            }
        }

        let addr = msg
            .address
            .map(|a: SockaddrIn6| {
                SocketAddrV6::new(
                    a.ip(),
                    a.port(),
                    a.flowinfo(),
                    a.scope_id(),
                )
            })
            .ok_or_else(|| {
                DhcpError::new(
                    ErrorKind::Io,
                    "recvmsg() returned no peer address".to_string(),
                )
            })?;

        Ok((msg.bytes, iface_index, addr))
    }

    fn send_to(
        &self,
        data: &[u8],
        dst: &SocketAddrV6,
    ) -> Result<usize, DhcpError> {
        Ok(self.socket.send_to(data, SocketAddr::V6(*dst))?)
    }

    fn set_recv_interface_index(
        &self,
        enabled: bool,
    ) -> Result<(), DhcpError> {
        setsockopt(self.socket.as_raw_fd(), Ipv6RecvPacketInfo, &enabled)?;
        Ok(())
    }

    fn join_group(
        &self,
        iface_index: u32,
        group: Ipv6Addr,
    ) -> Result<(), DhcpError> {
        log::debug!(
            "Joining multicast group {group} on interface {iface_index}"
        );
        Ok(self.socket.join_multicast_v6(&group, iface_index)?)
    }

    fn leave_group(
        &self,
        iface_index: u32,
        group: Ipv6Addr,
    ) -> Result<(), DhcpError> {
        log::debug!(
            "Leaving multicast group {group} on interface {iface_index}"
        );
        Ok(self.socket.leave_multicast_v6(&group, iface_index)?)
    }
}
