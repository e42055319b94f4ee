use clap::Parser;
use venuego::config::Command;
use venuego::core::ConfigProvider;
use venuego::utils::error::ErrorSeverity;
use venuego::utils::{logger, validation::Validate};
use venuego::{
    CliConfig, HttpVenueSource, JsonFileStore, SortOrder, TomlConfig, VenueListing, VenueService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting venuego");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let command = cli.command.clone();
    let result = match cli.config.clone() {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(file_config) => {
                tracing::info!("Using configuration file {}", path.display());
                run(file_config, &command).await
            }
            Err(e) => Err(e),
        },
        None => run(cli, &command).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ venuego failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<C>(config: C, command: &Command) -> venuego::Result<()>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let source = HttpVenueSource::new(config.api_endpoint(), config.request_timeout())?;
    let store = JsonFileStore::new(config.storage_path());
    let service = VenueService::new(source, store, config);

    let catalog = service.fetch_catalog().await;
    let fetched_at = catalog.fetched_at.with_timezone(&chrono::Local).format("%H:%M:%S");

    match command {
        Command::List { query, sort } => {
            let order = SortOrder::from(*sort);
            let listings = service.list(&catalog, query, order).await;
            if listings.is_empty() {
                println!("No venues found. Try searching with different keywords.");
            } else {
                println!(
                    "{} venues (sort: {} {}, fetched {})",
                    listings.len(),
                    order,
                    order.symbol(),
                    fetched_at
                );
                print_listings(&listings);
            }
        }
        Command::Favourite { id } => {
            let ids = service.favourites().toggle_and_save(*id).await?;
            let name = catalog
                .find(*id)
                .map(|venue| venue.name.clone())
                .unwrap_or_else(|| format!("venue {}", id));
            if ids.contains(*id) {
                println!("♥ Added {} to favourites", name);
            } else {
                println!("♡ Removed {} from favourites", name);
            }
        }
        Command::RemoveLast => match service.favourites().remove_last_with_undo().await? {
            Some((_, token)) => {
                let name = catalog
                    .find(token.removed_id)
                    .map(|venue| venue.name.clone())
                    .unwrap_or_else(|| format!("venue {}", token.removed_id));
                println!("♡ Removed {} from favourites", name);
            }
            None => println!("No favourite venues yet."),
        },
        Command::Favourites => {
            let listings = service.favourite_listings(&catalog).await;
            if listings.is_empty() {
                println!("No favourite venues yet.");
            } else {
                let noun = if listings.len() == 1 { "venue" } else { "venues" };
                println!("{} {} saved (fetched {})", listings.len(), noun, fetched_at);
                print_listings(&listings);
            }
        }
    }

    Ok(())
}

fn print_listings(listings: &[VenueListing]) {
    for listing in listings {
        let venue = &listing.venue;
        println!(
            "{} {:>5}  {:<32} {:>6.1} km  ★ {:.1}  {}",
            if listing.is_favourite { "♥" } else { " " },
            venue.id,
            venue.name,
            venue.distance_km,
            venue.rating,
            venue.sports.join(", ")
        );
        if !venue.address.is_empty() {
            println!("         {}", venue.address);
        }
    }
}
