use clap::Parser;
use ipam_sync::cli::Cli;
use ipam_sync::commands;
use ipam_sync::Settings;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use std::error::Error;

const LOG_CONFIG: &str = "log4rs.yml";

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging()?;
    log::info!("#Start main()");

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;
    commands::run(&cli, &settings)?;

    log::info!("#End main()");
    Ok(())
}

/// log4rs.yml when present, else info level to the console.
fn init_logging() -> Result<(), Box<dyn Error>> {
    if std::path::Path::new(LOG_CONFIG).exists() {
        log4rs::init_file(LOG_CONFIG, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {LOG_CONFIG}: {e}"))?;
        return Ok(());
    }
    let stdout = ConsoleAppender::builder().build();
    let config = log4rs::config::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}
