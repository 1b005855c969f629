use anyhow::bail;
use calstat_app::cli::Cli;
use calstat_app::render::{event_json, event_row};
use calstat_core::config::load_config;
use calstat_ical::ICalReader;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let reader_config = cli.reader_config(&config.reader)?;
    let input = cli.read_input()?;
    let reader = ICalReader::with_config(&input, reader_config);

    let Some(events) = reader.events()? else {
        bail!("calendar contains malformed events");
    };

    if !cli.json
        && let Some(name) = reader.calendar_name()
    {
        println!("# {name}");
    }

    for event in &events {
        if cli.json {
            println!("{}", event_json(event)?);
        } else {
            println!("{}", event_row(event, reader_config.default_zone));
        }
    }

    tracing::info!(count = events.len(), "Printed events");

    Ok(())
}
