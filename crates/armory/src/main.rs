use clap::{Parser, Subcommand};
use std::io::Write;
use std::os::unix::net::UnixStream;

const SOCKET_PATH: &str = "/tmp/armory.sock";

#[derive(Parser, Debug)]
#[command(name = "armory", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Highlight the previous weapon
    Prev,
    /// Highlight the next weapon
    Next,
    /// Open a slot, or advance within it if already open
    Slot {
        /// Slot number, 1 to 6
        #[arg(value_parser = clap::value_parser!(u8).range(1..=armory::MAX_SLOTS as i64))]
        number: u8,
    },
    /// Equip the highlighted weapon
    Confirm,
    /// Close the selector
    Cancel,
    /// Spend a round of the equipped weapon
    Fire,
    /// Fill the equipped weapon's magazine
    Refill,
    /// Throw away the equipped weapon
    Drop,
    /// Draw the HUD now
    Status,
    /// Reload the HUD configuration
    Reload,
}

impl Commands {
    fn line(&self) -> String {
        match self {
            Commands::Prev => "prev".into(),
            Commands::Next => "next".into(),
            Commands::Slot { number } => format!("slot {}", number),
            Commands::Confirm => "confirm".into(),
            Commands::Cancel => "cancel".into(),
            Commands::Fire => "fire".into(),
            Commands::Refill => "refill".into(),
            Commands::Drop => "drop".into(),
            Commands::Status => "status".into(),
            Commands::Reload => "reload".into(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let line = cli.command.line();
    log::debug!("Sending '{}'", line);
    send_command(&line)
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to armory-hud at {}: {}. Is armory-hud running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
