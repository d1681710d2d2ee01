use armory_hud::config;
use armory_hud::hud::HudApp;
use armory_hud::sys::runtime;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "armory-hud", version, about, long_about = None)]
struct Args {
    /// Write the default config file if none exists, print its path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let mut app = HudApp::new(&config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    while let Ok(event) = rx.recv_blocking() {
        app.update(event);
    }
    Ok(())
}
