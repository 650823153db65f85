//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{output_batch, output_pricing, output_quote, output_review, output_suggestion};
use shipway_app::app::QuoteService;
use shipway_app::config::Config;
use shipway_app::repository::load_pricing;
use shipway_domain::service::{CodInput, FeeQuery};
use shipway_infra::image_prep::prepare_image_set;
use shipway_infra::order_loader::load_order_form;
use shipway_infra::pricing_loader::write_pricing_file;
use shipway_infra::quote_csv::load_quote_requests;
use shipway_types::{Error, OutputFormat, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Execute CLI command. Returns false when the input was rejected.
pub fn execute(cli: Cli) -> Result<bool> {
    // Load config
    let mut config = Config::load()?;
    init_tracing(&config.log_level, cli.verbose);

    // Override from CLI args
    if let Some(ref pricing) = cli.pricing {
        config.pricing_file = Some(pricing.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Config {
            show,
            set_format,
            set_pricing,
            clear_pricing,
            set_api_base,
            set_log_level,
            reset,
        } => {
            // Persist from the file as saved, not with this run's overrides
            let saved = Config::load()?;
            handle_config(
                saved,
                show,
                set_format,
                set_pricing,
                clear_pricing,
                set_api_base,
                set_log_level,
                reset,
            )?;
            Ok(true)
        }
        Commands::Pricing { init } => {
            let table = load_pricing(&config)?;
            if let Some(path) = init {
                write_pricing_file(&path, &table)?;
                eprintln!("Pricing table written to: {}", path.display());
            } else {
                output_pricing(output_format, &table)?;
            }
            Ok(true)
        }
        Commands::Quote {
            pickup,
            dropoff,
            weight,
            vehicle,
            cod,
        } => {
            let service = QuoteService::new(load_pricing(&config)?);
            let vehicle = match vehicle {
                Some(v) => Some(v),
                None => {
                    let suggested = service.suggest(weight);
                    if let Some(v) = suggested {
                        eprintln!("No vehicle given, using {} for {} kg", v, weight);
                    }
                    suggested
                }
            };
            let query = FeeQuery {
                pickup_lat: Some(pickup.lat),
                pickup_lng: Some(pickup.lng),
                dropoff_lat: Some(dropoff.lat),
                dropoff_lng: Some(dropoff.lng),
                weight_kg: Some(weight),
                vehicle_type: vehicle,
                cod_amount: CodInput::Amount(cod),
            };
            let fee = service.quote(&query);
            output_quote(output_format, &fee)?;
            Ok(fee.is_ok())
        }
        Commands::Validate { order } => {
            let form = load_order_form(&order)?;
            let service = QuoteService::new(load_pricing(&config)?);
            let review = service.review(&form);
            output_review(output_format, &review)?;
            Ok(review.validation.valid)
        }
        Commands::Prepare {
            order,
            images,
            output,
        } => handle_prepare(&config, output_format, &order, &images, output.as_deref()),
        Commands::Batch { csv, output } => {
            let rows = load_quote_requests(&csv)?;
            info!(path = %csv.display(), rows = rows.len(), "quote requests loaded");
            let service = QuoteService::new(load_pricing(&config)?);
            let outcomes = service.batch(&rows);

            if let Some(path) = output {
                let content = serde_json::to_string_pretty(&outcomes)?;
                std::fs::write(&path, content)?;
                eprintln!("Results saved to: {}", path.display());
            }
            output_batch(output_format, &outcomes)?;
            Ok(true)
        }
        Commands::Suggest { weight } => {
            let service = QuoteService::new(load_pricing(&config)?);
            let vehicle = service.suggest(weight);
            output_suggestion(output_format, weight, vehicle)?;
            Ok(vehicle.is_some())
        }
    }
}

fn handle_prepare(
    config: &Config,
    output_format: OutputFormat,
    order: &Path,
    images: &[PathBuf],
    output: Option<&Path>,
) -> Result<bool> {
    let form = load_order_form(order)?;
    let service = QuoteService::new(load_pricing(config)?);

    let review = service.review(&form);
    if !review.is_ready() {
        output_review(output_format, &review)?;
        return Ok(false);
    }

    let image_set = prepare_image_set(images)?;
    debug!(count = image_set.len(), "product images prepared");
    let envelope = service.prepare_submission(&form, &image_set, &config.api_base_url)?;

    match output {
        Some(path) => {
            envelope.write_to(path)?;
            eprintln!("Submission saved to: {}", path.display());
            eprintln!("Request ID: {}", envelope.request_id);
        }
        None => println!("{}", serde_json::to_string_pretty(&envelope)?),
    }
    Ok(true)
}

#[allow(clippy::too_many_arguments)]
fn handle_config(
    mut config: Config,
    show: bool,
    set_format: Option<OutputFormat>,
    set_pricing: Option<PathBuf>,
    clear_pricing: bool,
    set_api_base: Option<String>,
    set_log_level: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults.");
        return Ok(());
    }

    let mut modified = false;

    if let Some(format) = set_format {
        config.output_format = format;
        modified = true;
    }

    if let Some(path) = set_pricing {
        // Fail early on a table that would not load
        let probe = Config {
            pricing_file: Some(path.clone()),
            ..Config::default()
        };
        load_pricing(&probe)?;
        config.pricing_file = Some(path);
        modified = true;
    }

    if clear_pricing {
        config.pricing_file = None;
        modified = true;
    }

    if let Some(url) = set_api_base {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(shipway_types::ConfigError::ParseError(format!(
                "API base URL must start with http:// or https://: {}",
                url
            ))));
        }
        config.api_base_url = url;
        modified = true;
    }

    if let Some(level) = set_log_level {
        if EnvFilter::try_new(&level).is_err() {
            return Err(Error::Config(shipway_types::ConfigError::ParseError(format!(
                "invalid log level: {}",
                level
            ))));
        }
        config.log_level = level;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration saved.");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

/// Install the stderr log subscriber. RUST_LOG wins over the configured level.
fn init_tracing(log_level: &str, verbose: bool) {
    let fallback = if verbose { "debug" } else { log_level };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
