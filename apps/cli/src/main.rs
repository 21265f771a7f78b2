#![allow(clippy::print_stdout)]

mod args;
mod report;

use crate::args::{Cli, Command};
use anyhow::{Context, Result};
use clap::Parser;
use luthier_domain::{Namespace, NamespaceSet, ParkSettings};
use luthier_kernel::config::load_settings;
use luthier_logger::Logger;
use luthier_park::IndustrialPark;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log = init_logger(&cli)?;

    let settings = load_settings(cli.settings.as_deref()).context("Critical: settings are malformed")?;
    let park = IndustrialPark::builder().settings(&settings).build();

    match cli.command {
        Command::Load { namespaces } => load(&park, &namespaces),
        Command::List { namespace } => {
            for name in park.configured_names(namespace)? {
                println!("{name}");
            }
            Ok(())
        },
        Command::Show { namespace, name } => show(&park, &settings, namespace, &name),
    }
}

fn init_logger(cli: &Cli) -> Result<Logger> {
    let builder = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .level(cli.level.into())
        .resolution_spans(cli.spans);

    let logger = match &cli.log_dir {
        Some(directory) => builder.directory(directory).json(cli.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

fn load(park: &IndustrialPark, namespaces: &[Namespace]) -> Result<()> {
    let selection = if namespaces.is_empty() {
        NamespaceSet::CONFIGURED
    } else {
        namespaces.iter().copied().collect()
    };

    for namespace in selection.namespaces() {
        let names = park.load(namespace).with_context(|| format!("Failed to load {namespace}"))?;
        for name in &names {
            info!(%namespace, name = %name, "Loaded");
        }
        println!("{namespace}: {} loaded", names.len());
    }
    Ok(())
}

fn show(park: &IndustrialPark, settings: &ParkSettings, namespace: Namespace, name: &str) -> Result<()> {
    if settings.eager_load {
        let loaded = park.load_all().context("Eager load failed")?;
        info!(loaded, "Eager load finished");
    }

    let entity = park.get(namespace, name).with_context(|| format!("Failed to resolve {namespace}/{name}"))?;
    println!("{}", report::describe(&entity));
    Ok(())
}
