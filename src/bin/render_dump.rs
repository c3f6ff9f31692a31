use anyhow::{Context, Result};
use clap::Parser;
use minitel_chess::board::Board;
use minitel_chess::display::VideotexEncoder;
use minitel_chess::MiniChess;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "render-dump", about = "Write the Videotex stream of a fresh board, for replay with cat > /dev/ttyUSB0")]
struct Args {
    /// Output file (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Leave out the terminal setup sequence
    #[arg(long)]
    no_prepare: bool,
    /// Draw the empty board only
    #[arg(long)]
    empty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut game = MiniChess::new(VideotexEncoder::new(Vec::new()));
    if !args.no_prepare {
        game.prepare_terminal()?;
    }
    game.start_with(if args.empty { Board::empty() } else { Board::standard() })?;
    let bytes = game.into_device().into_inner();
    log::info!("{} bytes of Videotex", bytes.len());
    match args.out {
        Some(path) => File::create(&path)
            .and_then(|mut f| f.write_all(&bytes))
            .with_context(|| format!("writing {}", path.display()))?,
        None => io::stdout().write_all(&bytes)?,
    }
    Ok(())
}
