use std::io::Write;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use super::{Error, Event, Result};

/// Address of the monitoring agent's local client socket.
pub const DEFAULT_AGENT_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::LOCALHOST), 3030);

/// Destination for check events.
pub trait EventSink {
    /// Delivers a single event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be encoded or handed off.
    fn send(&mut self, event: &Event) -> Result<()>;
}

/// Sends each event as one UDP datagram to the monitoring agent.
#[derive(Debug)]
pub struct UdpSink {
    socket: UdpSocket,
    addr: SocketAddr,
}

impl UdpSink {
    /// Binds an ephemeral local socket for sending to `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bind`] if no local socket can be opened.
    pub fn new(addr: SocketAddr) -> Result<Self> {
        let local = match addr {
            SocketAddr::V4(_) => SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), 0),
            SocketAddr::V6(_) => SocketAddr::new(Ipv6Addr::UNSPECIFIED.into(), 0),
        };
        let socket = UdpSocket::bind(local).map_err(|source| Error::Bind { addr, source })?;
        log::debug!(
            "Sending events from `{}` to `{}`",
            socket
                .local_addr()
                .map_or_else(|_| local.to_string(), |a| a.to_string()),
            addr
        );

        Ok(Self { socket, addr })
    }
}

impl EventSink for UdpSink {
    fn send(&mut self, event: &Event) -> Result<()> {
        let line = event.to_line()?;
        self.socket
            .send_to(&line, self.addr)
            .map_err(|source| Error::Send {
                name: event.name.clone(),
                addr: self.addr,
                source,
            })?;
        log::trace!("Sent event `{}` ({} bytes)", event.name, line.len());
        Ok(())
    }
}

/// Writes each event as a JSON line instead of sending it. Used for dry runs.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for WriterSink<W> {
    fn send(&mut self, event: &Event) -> Result<()> {
        let line = event.to_line()?;
        self.writer
            .write_all(&line)
            .and_then(|_| self.writer.flush())
            .map_err(|source| Error::Write {
                name: event.name.clone(),
                source,
            })
    }
}
