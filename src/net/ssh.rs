use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

use ssh2::{Channel, Session};

use super::Transport;
use crate::error::{Error, Result};

/// Terminal type announced for the remote pty.
pub const PTY_TERM: &str = "vt100";
/// 40 columns by 24 rows, the Minitel screen.
const PTY_SIZE: (u32, u32, u32, u32) = (40, 24, 0, 0);
const WRITE_RETRY: Duration = Duration::from_millis(1);

/// The byte stream of a remote shell.
pub trait ShellChannel: Read + Write {
    /// The remote side has sent end of file.
    fn at_eof(&self) -> bool;
}

impl ShellChannel for Channel {
    fn at_eof(&self) -> bool { self.eof() }
}

/// Interactive shell over SSH, password login, non-blocking reads.
pub struct SshTransport<C: ShellChannel = Channel> {
    channel: C,
    peer: String,
    poll: Duration,
    closed: bool,
}

impl SshTransport {
    /// Logs in and starts a shell on a vt100 pty. A read that finds nothing
    /// waits `poll` before reporting it.
    pub fn connect(host: &str, port: u16, user: &str, password: &str, poll: Duration) -> Result<Self> {
        let peer = format!("{user}@{host}:{port}");
        log::info!("connecting to {peer}");
        let tcp = TcpStream::connect((host, port))?;
        let mut session = Session::new()?;
        session.set_tcp_stream(tcp);
        session.handshake()?;
        if let Err(e) = session.userauth_password(user, password) {
            log::warn!("password login failed: {e}");
            return Err(Error::AuthFailed(peer));
        }
        if !session.authenticated() {
            return Err(Error::AuthFailed(peer));
        }
        let mut channel = session.channel_session()?;
        channel.request_pty(PTY_TERM, None, Some(PTY_SIZE))?;
        channel.shell()?;
        session.set_blocking(false);
        Ok(Self::with_channel(channel, peer, poll))
    }
}

impl<C: ShellChannel> SshTransport<C> {
    pub fn with_channel(channel: C, peer: String, poll: Duration) -> Self { Self { channel, peer, poll, closed: false } }

    pub fn peer(&self) -> &str { &self.peer }
}

fn would_block(e: &std::io::Error) -> bool { matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) }

impl<C: ShellChannel> Transport for SshTransport<C> {
    fn is_open(&self) -> bool { !self.closed && !self.channel.at_eof() }

    fn send(&mut self, bytes: &[u8]) -> Result<usize> {
        if !self.is_open() {
            return Err(Error::ConnectionClosed(self.peer.clone()));
        }
        let mut sent = 0;
        while sent < bytes.len() {
            match self.channel.write(&bytes[sent..]) {
                Ok(0) => {
                    self.closed = true;
                    return Err(Error::ConnectionClosed(self.peer.clone()));
                }
                Ok(n) => sent += n,
                Err(e) if would_block(&e) || e.kind() == ErrorKind::Interrupted => thread::sleep(WRITE_RETRY),
                Err(e) => {
                    self.closed = true;
                    return Err(e.into());
                }
            }
        }
        Ok(sent)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.is_open() {
            return Ok(0);
        }
        match self.channel.read(buf) {
            Ok(0) => {
                log::info!("{} closed the session", self.peer);
                self.closed = true;
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(e) if would_block(&e) || e.kind() == ErrorKind::Interrupted => {
                thread::sleep(self.poll);
                Ok(0)
            }
            Err(e) => {
                self.closed = true;
                Err(e.into())
            }
        }
    }
}
