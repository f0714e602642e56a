// SPDX-License-Identifier: Apache-2.0

use crate::{
    DhcpError, DhcpV6Message, DhcpV6MessageType, DhcpV6Options,
    DhcpV6ResponseSender,
};

/// An in-memory [DhcpV6ResponseSender] capturing what a handler sends,
/// for exercising handler logic without sockets.
///
/// ```
/// use dhcpv6d::{
///     DhcpV6MessageType, DhcpV6Recorder, DhcpV6ResponseSender,
/// };
///
/// let mut recorder = DhcpV6Recorder::new([0x0f, 0x00, 0x00]);
/// recorder.send(DhcpV6MessageType::Advertise).unwrap();
/// assert_eq!(
///     recorder.packet().map(|p| p.msg_type),
///     Some(DhcpV6MessageType::Advertise)
/// );
/// ```
#[derive(Debug, Default)]
pub struct DhcpV6Recorder {
    xid: [u8; 3],
    options: DhcpV6Options,
    sent: Option<DhcpV6Message>,
}

impl DhcpV6Recorder {
    /// A recorder answering with the given transaction ID, normally the
    /// one of the request under test.
    pub fn new(xid: [u8; 3]) -> Self {
        Self {
            xid,
            options: DhcpV6Options::new(),
            sent: None,
        }
    }

    pub fn transaction_id(&self) -> [u8; 3] {
        self.xid
    }

    /// The last packet captured by a send, if any.
    pub fn packet(&self) -> Option<&DhcpV6Message> {
        self.sent.as_ref()
    }

    /// Message type of the last captured packet.
    pub fn message_type(&self) -> Option<DhcpV6MessageType> {
        self.sent.as_ref().map(|p| p.msg_type)
    }
}

impl DhcpV6ResponseSender for DhcpV6Recorder {
    fn options(&mut self) -> &mut DhcpV6Options {
        &mut self.options
    }

    fn send(
        &mut self,
        msg_type: DhcpV6MessageType,
    ) -> Result<usize, DhcpError> {
        let packet =
            DhcpV6Message::new(msg_type, &self.xid, self.options.clone())?;
        let sent = packet.emit().len();
        self.sent = Some(packet);
        Ok(sent)
    }
}
