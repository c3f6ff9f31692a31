use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use super::Transport;
use crate::error::{Error, Result};

/// Raw TCP connection, as used for Telnet-style chess servers.
pub struct TcpTransport {
    stream: TcpStream,
    peer: String,
    eof: bool,
}

impl TcpTransport {
    /// Connects and sets `poll` as the read timeout, so `receive` never
    /// blocks longer than that.
    pub fn connect(host: &str, port: u16, poll: Duration) -> Result<Self> {
        let peer = format!("{host}:{port}");
        log::info!("connecting to {peer}");
        let stream = TcpStream::connect((host, port))?;
        stream.set_read_timeout(Some(poll.max(Duration::from_millis(1))))?;
        stream.set_nodelay(true)?;
        Ok(Self { stream, peer, eof: false })
    }

    pub fn peer(&self) -> &str { &self.peer }
}

impl Transport for TcpTransport {
    fn is_open(&self) -> bool { !self.eof }

    fn send(&mut self, bytes: &[u8]) -> Result<usize> {
        if self.eof {
            return Err(Error::ConnectionClosed(self.peer.clone()));
        }
        self.stream.write_all(bytes)?;
        Ok(bytes.len())
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.eof {
            return Ok(0);
        }
        match self.stream.read(buf) {
            Ok(0) => {
                log::info!("{} closed the connection", self.peer);
                self.eof = true;
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted) => Ok(0),
            Err(e) => {
                self.eof = true;
                Err(e.into())
            }
        }
    }
}
