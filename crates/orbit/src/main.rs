use clap::Parser;
use orbit::config;
use orbit::gui::app::AppModel;
use orbit::gui::menu::State;
use orbit::sys::runtime;
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "orbit", version, about = "Radial button menu", long_about = None)]
struct Cli {
    /// Write the default config file (if none exists), print its path and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_default_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let state = State::from_config(&config)?;

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.orbit.menu").with_args(Vec::new());

    app.run::<AppModel>((state, rx));
    Ok(())
}
