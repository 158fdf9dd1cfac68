mod cli;

use marquee::{
    catalog::{self, rank, CatalogClient, CatalogSource},
    config,
    driver::SessionDriver,
    engine::{
        self,
        headless::{HeadlessElement, HeadlessOptions},
        hls::{HttpLoaderFactory, MANIFEST_TIMEOUT},
        EngineAdapter,
    },
    session::{format_timestamp, SessionController, SessionOptions},
    store::{JsonFileStore, MemoryStore, PreferenceStore},
};
use marquee_core::events::EventPayload;
use marquee_core::{Catalog, ContentRef};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

struct PlayArgs {
    fallback_embed: Option<String>,
    seconds: u64,
    quality: Option<String>,
    ephemeral: bool,
    paused: bool,
    volume: Option<f64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "marquee=trace,marquee_core=debug,marquee_media=debug".to_string()
        } else {
            "marquee=info,marquee_core=info,marquee_media=info".to_string()
        }
    });

    // Logs go to stderr so command output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Rank { catalog, json } => rank_catalog(&catalog, json),
        Commands::Subtitles { catalog, json } => list_subtitles(&catalog, json),
        Commands::Play {
            catalog,
            fallback_embed,
            seconds,
            quality,
            ephemeral,
            paused,
            volume,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let catalog = read_catalog(&catalog)?;
            let args = PlayArgs {
                fallback_embed,
                seconds,
                quality,
                ephemeral,
                paused,
                volume,
            };
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            rt.block_on(play(config, catalog, args))
        }
        Commands::Fetch {
            tmdb_id,
            season,
            episode,
            output,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let content = match (season, episode) {
                (Some(s), Some(e)) => ContentRef::episode(tmdb_id, s, e),
                _ => ContentRef::movie(tmdb_id),
            };
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            rt.block_on(fetch(&config, content, output.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Init { path, force } => init_config(&path, force),
        Commands::Version => {
            println!("marquee {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn read_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {:?}", path))?;
    let catalog: Catalog = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog: {:?}", path))?;

    if catalog.is_expired(chrono::Utc::now()) {
        tracing::warn!("Catalog {:?} has expired; source urls may no longer resolve", path);
    }
    Ok(catalog)
}

fn rank_catalog(path: &Path, json: bool) -> Result<()> {
    let catalog = read_catalog(path)?;
    let groups = catalog::rank(&catalog.sources);

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("No sources in catalog.");
        return Ok(());
    }

    for group in &groups {
        println!("{} ({} sources)", group.label, group.members.len());
        for source in &group.members {
            println!(
                "  [{}] {} - {}",
                source.container, source.provider.name, source.url
            );
        }
    }

    if let Some(source) = rank::highest_ranked(&groups).and_then(|g| g.first()) {
        println!("\nDefault: {} ({})", source.url, catalog::label_of(source));
    }

    Ok(())
}

fn list_subtitles(path: &Path, json: bool) -> Result<()> {
    let catalog = read_catalog(path)?;
    let subtitles = catalog::dedupe(&catalog.subtitles);

    if json {
        println!("{}", serde_json::to_string_pretty(&subtitles)?);
        return Ok(());
    }

    println!(
        "Subtitles: {} ({} duplicates removed)",
        subtitles.len(),
        catalog.subtitles.len() - subtitles.len()
    );
    for (i, sub) in subtitles.iter().enumerate() {
        println!("  [{}] {} ({}) - {}", i, sub.label, sub.format, sub.url);
    }

    Ok(())
}

async fn play(config: config::Config, catalog: Catalog, args: PlayArgs) -> Result<()> {
    let (sink, events) = engine::event_channel();
    let loaders = Arc::new(HttpLoaderFactory::new(MANIFEST_TIMEOUT)?);
    let adapter = EngineAdapter::new(loaders, sink.clone());
    let element = HeadlessElement::new(
        sink,
        HeadlessOptions {
            native_hls: config.player.native_hls,
            viewport_height: config
                .player
                .surface_height
                .or(HeadlessOptions::default().viewport_height),
            autoplay: config.player.autoplay && !args.paused,
            ..Default::default()
        },
    );

    let store: Arc<dyn PreferenceStore> = if args.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        let path = config::preferences_path(&config);
        Arc::new(
            JsonFileStore::open(&path)
                .with_context(|| format!("Failed to open preference store: {:?}", path))?,
        )
    };

    let mut options = SessionOptions::from(&config.player);
    options.fallback_embed = args.fallback_embed;
    options.autoplay &= !args.paused;
    let mut controller = SessionController::new(adapter, element, store, options);

    let started = match args.quality.as_deref() {
        Some(label) => controller.initialize_from_catalog(catalog, Some(label)),
        None => controller.start(catalog),
    };
    if let Err(e) = started {
        println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
        controller.teardown();
        return Err(e).context("Session could not start");
    }

    let (driver, handle) = SessionDriver::new(controller, events);
    let mut rx = driver.bus().subscribe();
    let logger = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match event.payload {
                    EventPayload::Snapshot(_) => {}
                    payload => tracing::info!(event = ?payload, "Session event"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Event logger lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
    let task = tokio::spawn(driver.run());

    handle.activity().await?;
    if let Some(volume) = args.volume {
        handle.set_volume(volume).await?;
    }
    tokio::time::sleep(Duration::from_secs(args.seconds)).await;
    let snapshot = handle.snapshot().await?;
    handle.shutdown().await?;
    task.await.context("Session driver panicked")?;
    logger.abort();

    tracing::info!(
        position = %format_timestamp(snapshot.position_secs),
        duration = %format_timestamp(snapshot.duration_secs),
        "Playback stopped"
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

async fn fetch(config: &config::Config, content: ContentRef, output: Option<&Path>) -> Result<()> {
    let client = CatalogClient::new(
        &config.catalog.base_url,
        Duration::from_secs(config.catalog.timeout_secs),
    )?;
    let catalog = client
        .fetch(&content)
        .await
        .with_context(|| format!("Failed to fetch catalog for {}", content))?;

    let json = serde_json::to_string_pretty(&catalog)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write catalog: {:?}", path))?;
            println!(
                "Saved {} sources, {} subtitles to {:?}",
                catalog.sources.len(),
                catalog.subtitles.len(),
                path
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Controls hide after: {} ms", config.player.controls_hide_ms);
            println!(
                "  Auto-promote siblings: {}",
                config.player.auto_promote_siblings
            );
            println!("  Catalog: {}", config.catalog.base_url);
            println!("  Preferences: {:?}", config.preferences.path);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Catalog: {}", config.catalog.base_url);
        }
    }

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("Config file already exists: {:?} (use --force to update it)", path);
    }
    config::persist::save_config(path, &config::Config::default())?;
    println!("Wrote config to {:?}", path);
    Ok(())
}
