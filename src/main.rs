use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use minitel_chess::config::Config;
use minitel_chess::display::{prepare_terminal, Baud, VideotexEncoder};
use minitel_chess::input::KeyboardDecoder;
use minitel_chess::net::{run_relay, spawn_key_reader, SshTransport, TcpTransport, Transport};
use minitel_chess::serial::{self, LineSpeed};
use minitel_chess::MiniChess;
use serialport::SerialPort;
use std::path::PathBuf;

type Line = Box<dyn SerialPort>;

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-player chess on a Minitel terminal", long_about = None)]
struct Args {
    /// JSON settings file; flags given here win over it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Serial device the terminal is plugged into
    #[arg(long, global = true)]
    device: Option<PathBuf>,

    /// Speed the terminal is currently set to; detected when omitted
    #[arg(long, global = true)]
    serial_baud: Option<u32>,

    /// Switch the terminal and the port to this speed first (300, 1200, 4800 or 9600)
    #[arg(long, global = true)]
    baud: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Local game between two players sharing the keyboard
    Play,
    /// Use the terminal as a Telnet or SSH client, e.g. for a chess server
    Relay {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Log in over SSH; the password comes from relay.password in the config
        #[arg(long)]
        ssh: bool,
        #[arg(long)]
        user: Option<String>,
    },
}

fn load_config(args: &Args) -> Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("reading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(device) = &args.device {
        cfg.device = device.clone();
    }
    if let Some(baud) = args.serial_baud {
        cfg.serial_baud = Some(baud);
    }
    if let Some(baud) = args.baud {
        cfg.terminal_baud = Some(baud);
    }
    if let Command::Relay { host, port, ssh, user } = &args.command {
        if let Some(host) = host {
            cfg.relay.host = host.clone();
        }
        if *ssh {
            cfg.relay.ssh = true;
        }
        if let Some(user) = user {
            cfg.relay.user = Some(user.clone());
        }
        if let Some(port) = port {
            if cfg.relay.ssh {
                cfg.relay.ssh_port = *port;
            } else {
                cfg.relay.port = *port;
            }
        }
    }
    Ok(cfg)
}

/// Opens the serial line at the terminal's speed, then moves both ends to
/// the requested speed if one is set.
fn open_terminal(cfg: &Config) -> Result<(KeyboardDecoder<Line>, VideotexEncoder<Line>)> {
    let path = &cfg.device;
    let port = match cfg.serial_baud()? {
        Some(baud) => serial::open(path, baud).with_context(|| format!("opening terminal device {}", path.display()))?,
        None => {
            let mut port = serial::open(path, Baud::B1200).with_context(|| format!("opening terminal device {}", path.display()))?;
            if serial::detect_speed(&mut port)?.is_none() {
                log::warn!("terminal did not answer at any speed, assuming 1200 bps");
                port.set_line_speed(Baud::B1200)?;
            }
            port
        }
    };
    let mut reader = port.try_clone().context("duplicating terminal handle")?;
    let mut screen = VideotexEncoder::new(port);
    if let Some(baud) = cfg.baud()? {
        serial::change_speed(&mut screen, baud).context("changing line speed")?;
        if !serial::terminal_answers(&mut reader)? {
            log::warn!("terminal silent after switching to {} bps", baud.bits_per_second());
        }
    }
    Ok((KeyboardDecoder::new(reader), screen))
}

fn play(cfg: &Config) -> Result<()> {
    let (mut keys, screen) = open_terminal(cfg)?;
    let mut game = MiniChess::new(screen);
    game.prepare_terminal().context("initialising terminal")?;
    game.start()?;
    log::info!("game started on {}", cfg.device.display());
    game.run(&mut keys)?;
    println!("Game over after {} moves", game.moves_played());
    Ok(())
}

fn connect(cfg: &Config) -> Result<Box<dyn Transport>> {
    let relay = &cfg.relay;
    let port = relay.active_port();
    if !relay.ssh {
        let tcp = TcpTransport::connect(&relay.host, port, relay.poll_interval())
            .with_context(|| format!("connecting to {}:{}", relay.host, port))?;
        return Ok(Box::new(tcp));
    }
    let Some(user) = relay.user.as_deref() else { bail!("SSH relay needs a user name (--user or relay.user)") };
    let Some(password) = relay.password.as_deref() else { bail!("SSH relay needs relay.password in the config file") };
    let ssh = SshTransport::connect(&relay.host, port, user, password, relay.poll_interval())
        .with_context(|| format!("logging in to {}:{}", relay.host, port))?;
    Ok(Box::new(ssh))
}

fn relay(cfg: &Config) -> Result<()> {
    let (keys, mut screen) = open_terminal(cfg)?;
    prepare_terminal(&mut screen).context("initialising terminal")?;
    let mut transport = connect(cfg)?;
    let key_rx = spawn_key_reader(keys);
    let stats = run_relay(transport.as_mut(), &mut screen, &key_rx)?;
    println!(
        "Disconnected from {}:{} ({} bytes received, {} sent)",
        cfg.relay.host,
        cfg.relay.active_port(),
        stats.bytes_in,
        stats.bytes_out
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = load_config(&args)?;
    match args.command {
        Command::Play => play(&cfg),
        Command::Relay { .. } => relay(&cfg),
    }
}
