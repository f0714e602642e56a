// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use crate::{DhcpError, DhcpV6MessageType, DhcpV6Options, DhcpV6Request};

/// Outbound half of a request/response pair handed to a handler.
///
/// The server pre-seeds [DhcpV6ResponseSender::options] with the client
/// identifier of the inbound request and the server DUID, and
/// [DhcpV6ResponseSender::send] reuses the inbound transaction ID.
/// Mutating the options after a send does not change what was already
/// transmitted.
pub trait DhcpV6ResponseSender {
    /// The options map emitted by the next [DhcpV6ResponseSender::send]
    /// call.
    fn options(&mut self) -> &mut DhcpV6Options;

    /// Build a reply of the given message type from the current options
    /// and write it to the peer the request came from. Returns the number
    /// of bytes sent.
    fn send(
        &mut self,
        msg_type: DhcpV6MessageType,
    ) -> Result<usize, DhcpError>;
}

/// A DHCPv6 request handler. Handlers may reply through the response
/// sender or stay silent, in which case the client will retry or contact
/// another server.
pub trait DhcpV6Handler: Send + Sync {
    fn serve_dhcp(
        &self,
        response: &mut dyn DhcpV6ResponseSender,
        request: &DhcpV6Request,
    );
}

impl<F> DhcpV6Handler for F
where
    F: Fn(&mut dyn DhcpV6ResponseSender, &DhcpV6Request) + Send + Sync,
{
    fn serve_dhcp(
        &self,
        response: &mut dyn DhcpV6ResponseSender,
        request: &DhcpV6Request,
    ) {
        self(response, request)
    }
}

/// A request multiplexer dispatching on the DHCPv6 message type.
///
/// Registration is expected to be complete before serving starts; the mux
/// is read-only while the server runs. A request whose message type has
/// no registered handler is dropped without a response.
#[derive(Default)]
pub struct DhcpV6ServeMux {
    handlers: HashMap<DhcpV6MessageType, Box<dyn DhcpV6Handler>>,
}

impl DhcpV6ServeMux {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `msg_type`, replacing any previous
    /// registration.
    pub fn handle<H>(&mut self, msg_type: DhcpV6MessageType, handler: H)
    where
        H: DhcpV6Handler + 'static,
    {
        self.handlers.insert(msg_type, Box::new(handler));
    }

    /// Register a plain function or closure for `msg_type`.
    pub fn handle_func<F>(&mut self, msg_type: DhcpV6MessageType, f: F)
    where
        F: Fn(&mut dyn DhcpV6ResponseSender, &DhcpV6Request)
            + Send
            + Sync
            + 'static,
    {
        self.handle(msg_type, f);
    }

    pub fn serve_dhcp(
        &self,
        response: &mut dyn DhcpV6ResponseSender,
        request: &DhcpV6Request,
    ) {
        if let Some(handler) = self.handlers.get(&request.msg_type) {
            handler.serve_dhcp(response, request);
        }
    }
}

impl std::fmt::Debug for DhcpV6ServeMux {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&DhcpV6MessageType> =
            self.handlers.keys().collect();
        types.sort_unstable();
        f.debug_struct("DhcpV6ServeMux")
            .field("handlers", &types)
            .finish()
    }
}

/// The process-wide mux used by servers configured without their own.
pub fn default_serve_mux() -> &'static RwLock<DhcpV6ServeMux> {
    static DEFAULT_SERVE_MUX: OnceLock<RwLock<DhcpV6ServeMux>> =
        OnceLock::new();
    DEFAULT_SERVE_MUX.get_or_init(|| RwLock::new(DhcpV6ServeMux::new()))
}

/// Register `handler` for `msg_type` on the default mux.
pub fn handle<H>(msg_type: DhcpV6MessageType, handler: H)
where
    H: DhcpV6Handler + 'static,
{
    if let Ok(mut mux) = default_serve_mux().write() {
        mux.handle(msg_type, handler);
    }
}

/// Register a plain function or closure for `msg_type` on the default
/// mux.
pub fn handle_func<F>(msg_type: DhcpV6MessageType, f: F)
where
    F: Fn(&mut dyn DhcpV6ResponseSender, &DhcpV6Request)
        + Send
        + Sync
        + 'static,
{
    handle(msg_type, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DhcpV6Message, DhcpV6Recorder};

    fn solicit_request(xid: [u8; 3]) -> DhcpV6Request {
        let packet = DhcpV6Message::new(
            DhcpV6MessageType::Solicit,
            &xid,
            DhcpV6Options::new(),
        )
        .unwrap();
        DhcpV6Request::new(packet, 4, "[fe80::1]:546".to_string())
    }

    #[test]
    fn dispatch_preserves_transaction_id() {
        let mut mux = DhcpV6ServeMux::new();
        mux.handle_func(DhcpV6MessageType::Solicit, |response, _request| {
            response.send(DhcpV6MessageType::Advertise).unwrap();
        });

        let request = solicit_request([0xf, 0, 0]);
        let mut recorder = DhcpV6Recorder::new(request.xid);
        mux.serve_dhcp(&mut recorder, &request);

        let sent = recorder.packet().expect("no response recorded");
        assert_eq!(sent.msg_type, DhcpV6MessageType::Advertise);
        assert_eq!(sent.xid, [0xf, 0, 0]);
    }

    #[test]
    fn unregistered_type_sends_nothing() {
        let mux = DhcpV6ServeMux::new();
        let request = solicit_request([1, 2, 3]);
        let mut recorder = DhcpV6Recorder::new(request.xid);
        mux.serve_dhcp(&mut recorder, &request);
        assert!(recorder.packet().is_none());
    }

    #[test]
    fn struct_handlers_dispatch() {
        struct Always;
        impl DhcpV6Handler for Always {
            fn serve_dhcp(
                &self,
                response: &mut dyn DhcpV6ResponseSender,
                _request: &DhcpV6Request,
            ) {
                response.send(DhcpV6MessageType::Reply).unwrap();
            }
        }

        let mut mux = DhcpV6ServeMux::new();
        mux.handle(DhcpV6MessageType::Request, Always);

        let packet = DhcpV6Message::new(
            DhcpV6MessageType::Request,
            &[9, 9, 9],
            DhcpV6Options::new(),
        )
        .unwrap();
        let request =
            DhcpV6Request::new(packet, 4, "[fe80::1]:546".to_string());
        let mut recorder = DhcpV6Recorder::new(request.xid);
        mux.serve_dhcp(&mut recorder, &request);
        assert_eq!(
            recorder.packet().map(|p| p.msg_type),
            Some(DhcpV6MessageType::Reply)
        );
    }

    #[test]
    fn default_mux_registration() {
        handle_func(DhcpV6MessageType::Rebind, |response, _request| {
            response.send(DhcpV6MessageType::Reply).unwrap();
        });

        let packet = DhcpV6Message::new(
            DhcpV6MessageType::Rebind,
            &[4, 5, 6],
            DhcpV6Options::new(),
        )
        .unwrap();
        let request =
            DhcpV6Request::new(packet, 4, "[fe80::1]:546".to_string());
        let mut recorder = DhcpV6Recorder::new(request.xid);
        default_serve_mux()
            .read()
            .unwrap()
            .serve_dhcp(&mut recorder, &request);
        assert_eq!(
            recorder.packet().map(|p| p.msg_type),
            Some(DhcpV6MessageType::Reply)
        );
    }
}
