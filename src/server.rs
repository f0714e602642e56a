// SPDX-License-Identifier: Apache-2.0

use std::net::{Ipv6Addr, SocketAddrV6};
use std::sync::Arc;

use crate::{
    default_serve_mux,
    hwtype::{hardware_type, ARP_HW_TYPE_ETHERNET},
    DhcpError, DhcpV6Duid, DhcpV6DuidLl, DhcpV6Message, DhcpV6MessageType,
    DhcpV6OptionCode, DhcpV6Options, DhcpV6Request, DhcpV6ResponseSender,
    DhcpV6ServeMux, ErrorKind, PacketConn, UdpPacketConn,
};

/// All_DHCP_Relay_Agents_and_Servers, RFC 8415 - 7.1. Every DHCPv6
/// server and relay agent is a member of this link-scoped group.
pub const ALL_DHCP_RELAY_AGENTS_AND_SERVERS: Ipv6Addr =
    Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0x0001, 0x0002);

/// All_DHCP_Servers, RFC 8415 - 7.1. Used by relay agents to reach
/// servers they have no unicast address for.
pub const ALL_DHCP_SERVERS: Ipv6Addr =
    Ipv6Addr::new(0xff05, 0, 0, 0, 0, 0, 0x0001, 0x0003);

const DEFAULT_SERVER_ADDR: &str = "[::]:547";

// Large enough for any single DHCPv6 datagram on a standard MTU link.
const RECV_BUFFER_LEN: usize = 1500;

/// A DHCPv6 server bound to one network interface.
///
/// Traffic reported as arriving on any other interface is dropped.
/// Requests are dispatched to the configured [DhcpV6ServeMux], or to the
/// [default_serve_mux] when none is set.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct DhcpV6Server {
    iface_name: String,
    addr: String,
    handler: Option<Arc<DhcpV6ServeMux>>,
    multicast_groups: Vec<Ipv6Addr>,
    server_id: Option<DhcpV6Duid>,
    iface_index: u32,
}

impl DhcpV6Server {
    /// A server for `iface_name` with the RFC defaults: bound to
    /// `[::]:547`, joining both well-known server multicast groups, using
    /// the default mux, and deriving a DUID-LL from the interface at
    /// start-up.
    pub fn new(iface_name: &str) -> Self {
        Self {
            iface_name: iface_name.to_string(),
            addr: DEFAULT_SERVER_ADDR.to_string(),
            handler: None,
            multicast_groups: vec![
                ALL_DHCP_RELAY_AGENTS_AND_SERVERS,
                ALL_DHCP_SERVERS,
            ],
            server_id: None,
            iface_index: 0,
        }
    }

    /// Override the bind address, default `[::]:547`.
    pub fn set_addr(&mut self, addr: &str) -> &mut Self {
        self.addr = addr.to_string();
        self
    }

    /// Use `mux` instead of the process-wide default mux.
    pub fn set_handler(&mut self, mux: DhcpV6ServeMux) -> &mut Self {
        self.handler = Some(Arc::new(mux));
        self
    }

    /// Override the multicast groups joined at start-up. A pure relay
    /// agent deployment would keep only
    /// [ALL_DHCP_RELAY_AGENTS_AND_SERVERS].
    pub fn set_multicast_groups(&mut self, groups: &[Ipv6Addr]) -> &mut Self {
        self.multicast_groups = groups.to_vec();
        self
    }

    /// Set the server DUID sent as OPTION_SERVERID. Servers with stable
    /// storage should persist a DUID-LLT and configure it here; without
    /// one, a DUID-LL is derived from the interface at start-up.
    pub fn set_server_id(&mut self, duid: DhcpV6Duid) -> &mut Self {
        self.server_id = Some(duid);
        self
    }

    /// Bind, join the configured multicast groups on the interface and
    /// serve until a read error occurs. Start-up failures and read errors
    /// are returned; the groups are left and the connection closed on the
    /// way out.
    pub fn listen_and_serve(mut self) -> Result<(), DhcpError> {
        self.iface_index =
            nix::net::if_::if_nametoindex(self.iface_name.as_str())?;

        if self.server_id.is_none() {
            self.server_id = Some(self.generate_duid()?);
        }

        let conn = Arc::new(UdpPacketConn::bind(self.addr.as_str())?);
        conn.set_recv_interface_index(true)?;
        for group in &self.multicast_groups {
            conn.join_group(self.iface_index, *group)?;
        }

        let ret = self.serve(conn.clone());

        for group in &self.multicast_groups {
            if let Err(e) = conn.leave_group(self.iface_index, *group) {
                log::debug!("Failed to leave multicast group {group}: {e}");
            }
        }
        ret
    }

    /// Accept datagrams on `conn`, spawning a thread per request. The
    /// read loop owns the receiving side; request threads share the send
    /// path, which is atomic per datagram. A read error ends the loop and
    /// is returned.
    pub fn serve<C>(&self, conn: Arc<C>) -> Result<(), DhcpError>
    where
        C: PacketConn + 'static,
    {
        let mut buf = [0u8; RECV_BUFFER_LEN];
        loop {
            let (received, iface_index, remote_addr) =
                conn.recv_from(&mut buf)?;

            // Drop traffic bound for other interfaces on this machine
            if let Some(got) = iface_index {
                if self.iface_index != 0 && got != self.iface_index {
                    log::debug!(
                        "Dropping datagram from {remote_addr} on interface \
                         {got}, serving interface {}",
                        self.iface_index
                    );
                    continue;
                }
            }

            // The request thread owns a copy so the read loop can reuse
            // its buffer immediately
            let request_buf = buf[..received].to_vec();
            let conn = Arc::clone(&conn);
            let mux = self.handler.clone();
            let server_id = self.server_id.clone();
            std::thread::spawn(move || {
                serve_one(conn, mux, server_id, request_buf, remote_addr)
            });
        }
    }

    fn generate_duid(&self) -> Result<DhcpV6Duid, DhcpError> {
        let hardware_addr = iface_hardware_address(self.iface_name.as_str())?;
        let hardware_type = match hardware_type(self.iface_name.as_str()) {
            Ok(t) => t,
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::ParseHardwareType
                        | ErrorKind::HardwareTypeNotImplemented
                ) =>
            {
                log::debug!(
                    "Falling back to Ethernet hardware type for {}: {e}",
                    self.iface_name
                );
                ARP_HW_TYPE_ETHERNET
            }
            Err(e) => return Err(e),
        };
        Ok(DhcpV6Duid::LinkLayerAddress(DhcpV6DuidLl::new(
            hardware_type,
            hardware_addr.as_slice(),
        )))
    }
}

/// Handle one datagram to completion: decode, assemble the
/// request/response pair and dispatch. Decode failures drop the datagram.
fn serve_one<C>(
    conn: Arc<C>,
    mux: Option<Arc<DhcpV6ServeMux>>,
    server_id: Option<DhcpV6Duid>,
    buf: Vec<u8>,
    remote_addr: SocketAddrV6,
) where
    C: PacketConn,
{
    let packet = match DhcpV6Message::parse(buf.as_slice()) {
        Ok(p) => p,
        Err(e) => {
            log::debug!("Dropping malformed datagram from {remote_addr}: {e}");
            return;
        }
    };
    let request =
        DhcpV6Request::from_datagram(packet, buf.len(), &remote_addr);
    let mut response =
        DhcpV6Response::new(conn, remote_addr, &request, server_id);

    match mux {
        Some(mux) => mux.serve_dhcp(&mut response, &request),
        None => match default_serve_mux().read() {
            Ok(mux) => mux.serve_dhcp(&mut response, &request),
            Err(e) => {
                log::error!("BUG: default mux lock poisoned: {e}");
            }
        },
    }
}

/// The server side [DhcpV6ResponseSender]: replies go to the address the
/// request came from, carrying its transaction ID, with the client and
/// server identifiers pre-seeded.
struct DhcpV6Response<C: PacketConn> {
    conn: Arc<C>,
    remote_addr: SocketAddrV6,
    xid: [u8; 3],
    options: DhcpV6Options,
}

impl<C: PacketConn> DhcpV6Response<C> {
    fn new(
        conn: Arc<C>,
        remote_addr: SocketAddrV6,
        request: &DhcpV6Request,
        server_id: Option<DhcpV6Duid>,
    ) -> Self {
        let mut options = DhcpV6Options::new();
        if let Ok(client_id) =
            request.options.get_one(DhcpV6OptionCode::ClientId)
        {
            options.add_raw(DhcpV6OptionCode::ClientId, client_id.to_vec());
        }
        if let Some(duid) = server_id {
            options.add(DhcpV6OptionCode::ServerId, &duid);
        }
        Self {
            conn,
            remote_addr,
            xid: request.xid,
            options,
        }
    }
}

impl<C: PacketConn> DhcpV6ResponseSender for DhcpV6Response<C> {
    fn options(&mut self) -> &mut DhcpV6Options {
        &mut self.options
    }

    fn send(
        &mut self,
        msg_type: DhcpV6MessageType,
    ) -> Result<usize, DhcpError> {
        let packet =
            DhcpV6Message::new(msg_type, &self.xid, self.options.clone())?;
        self.conn
            .send_to(packet.emit().as_slice(), &self.remote_addr)
    }
}

fn iface_hardware_address(iface_name: &str) -> Result<Vec<u8>, DhcpError> {
    for ifaddr in nix::ifaddrs::getifaddrs()? {
        if ifaddr.interface_name != iface_name {
            continue;
        }
        if let Some(mac) = ifaddr
            .address
            .as_ref()
            .and_then(|a| a.as_link_addr())
            .and_then(|l| l.addr())
        {
            return Ok(mac.to_vec());
        }
    }
    Err(DhcpError::new(
        ErrorKind::Io,
        format!("No hardware address found for interface {iface_name}"),
    ))
}
