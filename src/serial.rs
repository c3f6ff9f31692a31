//! Host end of the serial line: port settings, speed probing and speed
//! changes that keep both ends of the link in step.

use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::display::{Baud, DisplayDevice, VideotexEncoder};
use crate::error::Result;

/// How long a read waits for the next byte. Also the grace period for the
/// byte following an ESC key.
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Speeds tried when looking for the terminal, fastest first.
pub const PROBE_ORDER: [Baud; 4] = [Baud::B9600, Baud::B4800, Baud::B1200, Baud::B300];

/// PRO1 terminal status request.
const STATUS_REQUEST: [u8; 3] = [0x1B, 0x39, 0x70];
/// Third byte of the PRO2 answer to a status request.
const STATUS_REPLY: u8 = 0x71;
const REPLY_LEN: usize = 4;

/// A line whose speed the host can reprogram.
pub trait LineSpeed {
    fn set_line_speed(&mut self, baud: Baud) -> Result<()>;
}

impl LineSpeed for Box<dyn SerialPort> {
    fn set_line_speed(&mut self, baud: Baud) -> Result<()> {
        self.set_baud_rate(baud.bits_per_second())?;
        Ok(())
    }
}

/// Opens the device as a Minitel line: 7 data bits, even parity, one stop
/// bit, no flow control, reads bounded by [`READ_TIMEOUT`].
pub fn open(path: &Path, baud: Baud) -> Result<Box<dyn SerialPort>> {
    let port = serialport::new(path.to_string_lossy(), baud.bits_per_second())
        .data_bits(DataBits::Seven)
        .parity(Parity::Even)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(READ_TIMEOUT)
        .open()?;
    log::info!("opened {} at {} bps", path.display(), baud.bits_per_second());
    Ok(port)
}

/// Asks the terminal for its status and checks for a well-formed answer at
/// the line's current speed.
pub fn terminal_answers<P: Read + Write + ?Sized>(line: &mut P) -> Result<bool> {
    line.write_all(&STATUS_REQUEST)?;
    line.flush()?;
    let mut reply = Vec::with_capacity(REPLY_LEN);
    let mut byte = [0u8; 1];
    while reply.len() < REPLY_LEN {
        match line.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => reply.push(byte[0] & 0x7F),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(reply.len() == REPLY_LEN && reply[2] == STATUS_REPLY)
}

/// Finds the speed the terminal is set to by trying each one in
/// [`PROBE_ORDER`]. The line is left at the speed found, or at the last one
/// tried when the terminal never answers.
pub fn detect_speed<P: Read + Write + LineSpeed + ?Sized>(line: &mut P) -> Result<Option<Baud>> {
    for baud in PROBE_ORDER {
        line.set_line_speed(baud)?;
        if terminal_answers(line)? {
            log::info!("terminal answers at {} bps", baud.bits_per_second());
            return Ok(Some(baud));
        }
        log::debug!("no answer at {} bps", baud.bits_per_second());
    }
    Ok(None)
}

/// Switches the terminal to `baud`, then the host port.
///
/// The PRO2 command is flushed at the old speed before the port changes;
/// anything queued in the encoder goes out with it.
pub fn change_speed<W: Write + LineSpeed>(screen: &mut VideotexEncoder<W>, baud: Baud) -> Result<()> {
    log::info!("switching line to {} bps", baud.bits_per_second());
    screen.set_baud(baud);
    screen.flush()?;
    screen.get_mut().set_line_speed(baud)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::io;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Wrote(Vec<u8>),
        Speed(Baud),
    }

    /// A terminal sitting at `terminal` bps that answers status requests
    /// only when the host line runs at the same speed.
    struct FakeLine {
        terminal: Baud,
        host: Baud,
        mute: bool,
        events: Vec<Event>,
        inbox: VecDeque<u8>,
    }

    impl FakeLine {
        fn new(terminal: Baud, host: Baud) -> Self { Self { terminal, host, mute: false, events: Vec::new(), inbox: VecDeque::new() } }
    }

    impl Write for FakeLine {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.events.push(Event::Wrote(buf.to_vec()));
            if buf == STATUS_REQUEST && self.host == self.terminal && !self.mute {
                self.inbox.extend([0x1B, 0x3A, STATUS_REPLY, 0x40]);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    impl Read for FakeLine {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.inbox.pop_front() {
                Some(b) => {
                    buf[0] = b;
                    Ok(1)
                }
                None => Err(io::Error::new(ErrorKind::TimedOut, "quiet line")),
            }
        }
    }

    impl LineSpeed for FakeLine {
        fn set_line_speed(&mut self, baud: Baud) -> Result<()> {
            self.host = baud;
            self.events.push(Event::Speed(baud));
            Ok(())
        }
    }

    #[test]
    fn speed_command_leaves_before_the_port_switches() {
        let mut screen = VideotexEncoder::new(FakeLine::new(Baud::B1200, Baud::B1200));
        screen.clear_screen();
        change_speed(&mut screen, Baud::B4800).unwrap();
        let line = screen.get_ref();
        assert_eq!(line.events, vec![Event::Wrote(vec![0x0C, 0x1B, 0x3A, 0x6B, 0x76]), Event::Speed(Baud::B4800)]);
        assert_eq!(line.host, Baud::B4800);
    }

    #[test]
    fn detects_the_terminal_speed() {
        let mut line = FakeLine::new(Baud::B1200, Baud::B300);
        assert_eq!(detect_speed(&mut line).unwrap(), Some(Baud::B1200));
        assert_eq!(line.host, Baud::B1200);
        let tried: Vec<&Event> = line.events.iter().filter(|e| matches!(e, Event::Speed(_))).collect();
        assert_eq!(tried, vec![&Event::Speed(Baud::B9600), &Event::Speed(Baud::B4800), &Event::Speed(Baud::B1200)]);
    }

    #[test]
    fn silent_terminal_is_not_found() {
        let mut line = FakeLine::new(Baud::B1200, Baud::B1200);
        line.mute = true;
        assert_eq!(detect_speed(&mut line).unwrap(), None);
        assert_eq!(line.host, Baud::B300);
    }

    #[test]
    fn short_reply_is_no_answer() {
        let mut line = FakeLine::new(Baud::B9600, Baud::B300);
        line.inbox.extend([0x1B, 0x3A]);
        assert!(!terminal_answers(&mut line).unwrap());
    }
}
