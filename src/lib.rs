// SPDX-License-Identifier: Apache-2.0

//! DHCPv6 server-side library, RFC 8415 (previously RFC 3315) and
//! related.
//!
//! Three layers:
//!  * A bit-exact wire codec for DHCPv6 messages, relay envelopes, DUIDs
//!    and the option family of RFC 8415/3633/4649/5970.
//!  * [DhcpV6Options], a multimap from option code to raw values with
//!    typed accessors, preserving DHCPv6's several-instances-per-code
//!    semantics and option encapsulation.
//!  * A serving core: [DhcpV6Server] joins the well-known multicast
//!    groups on one interface, decodes each datagram into a
//!    [DhcpV6Request] and dispatches it by message type through a
//!    [DhcpV6ServeMux] to user handlers, which reply through a
//!    [DhcpV6ResponseSender].
//!
//! Address policy is out of scope: which address a client gets, for how
//! long and how that survives restarts is the handler's business.
//!
//! ```no_run
//! use dhcpv6d::{DhcpV6MessageType, DhcpV6Server, DhcpV6ServeMux};
//!
//! fn main() -> Result<(), dhcpv6d::DhcpError> {
//!     let mut mux = DhcpV6ServeMux::new();
//!     mux.handle_func(DhcpV6MessageType::Solicit, |response, request| {
//!         // Inspect request.options, fill response.options()
//!         if let Err(e) = response.send(DhcpV6MessageType::Advertise) {
//!             log::error!("Failed to reply to {}: {e}", request.remote_addr);
//!         }
//!     });
//!
//!     let mut server = DhcpV6Server::new("eth0");
//!     server.set_handler(mux);
//!     server.listen_and_serve()
//! }
//! ```

mod buffer;
mod duid;
mod error;
mod hwtype;
mod msg;
mod mux;
mod option;
mod option_ia;
mod option_misc;
mod option_status;
mod recorder;
mod relay;
mod request;
mod server;
mod socket;

#[cfg(test)]
mod integ_tests;

pub use crate::duid::{
    DhcpV6Duid, DhcpV6DuidEn, DhcpV6DuidLl, DhcpV6DuidLlt, DhcpV6DuidType,
    DhcpV6DuidUuid,
};
pub use crate::error::{DhcpError, ErrorKind};
pub(crate) use crate::error::ErrorContext;
pub use crate::hwtype::hardware_type;
pub use crate::msg::{DhcpV6Message, DhcpV6MessageType};
pub use crate::mux::{
    default_serve_mux, handle, handle_func, DhcpV6Handler,
    DhcpV6ResponseSender, DhcpV6ServeMux,
};
pub use crate::option::{DhcpV6OptionCode, DhcpV6OptionValue, DhcpV6Options};
pub use crate::option_ia::{
    DhcpV6OptionIaAddr, DhcpV6OptionIaNa, DhcpV6OptionIaPd,
    DhcpV6OptionIaPrefix, DhcpV6OptionIaTa,
};
pub use crate::option_misc::{
    DhcpV6ArchType, DhcpV6ArchTypes, DhcpV6Data, DhcpV6ElapsedTime,
    DhcpV6OptionAuth, DhcpV6OptionNii, DhcpV6OptionRemoteId,
    DhcpV6OptionRequest, DhcpV6OptionVendorClass, DhcpV6OptionVendorOpts,
    DhcpV6Preference, DhcpV6RapidCommit,
};
pub use crate::option_status::{DhcpV6OptionStatus, DhcpV6StatusCode};
pub use crate::recorder::DhcpV6Recorder;
pub use crate::relay::{DhcpV6OptionRelayMsg, DhcpV6RelayMessage};
pub use crate::request::DhcpV6Request;
pub use crate::server::{
    DhcpV6Server, ALL_DHCP_RELAY_AGENTS_AND_SERVERS, ALL_DHCP_SERVERS,
};
pub use crate::socket::{PacketConn, UdpPacketConn, CLIENT_PORT, SERVER_PORT};
