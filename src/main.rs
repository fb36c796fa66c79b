use clap::Parser;
use fruitpunch::core::config::{self, CliOverrides};
use fruitpunch::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fruitpunch", about = "Editor and runner for .smia disk scripts")]
struct Args {
    /// .smia file to open at startup
    file: Option<PathBuf>,

    /// Base URL of the execution service
    #[arg(long)]
    service_url: Option<String>,

    /// Directory that Save writes file.smia into
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The log level lives in the config, so load it before the logger exists
    let (studio_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (config::StudioConfig::default(), Some(e)),
    };
    let cli = CliOverrides {
        service_url: args.service_url,
        export_dir: args.export_dir,
    };
    let resolved = config::resolve(&studio_config, &cli);

    // Initialize file logger - writes to fruitpunch.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("fruitpunch.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!(
        "FruitPunch starting up (service: {}, export dir: {})",
        resolved.service_url,
        resolved.export_dir.display()
    );

    tui::run(resolved, args.file)
}
