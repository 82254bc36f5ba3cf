mod app;
mod cli;
mod color;
mod config;
mod data;
mod error;
mod export;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use eframe::egui;

use app::CiteScopeApp;
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use data::loader::load_file;
use data::model::YearRange;
use export::export_charts;
use state::AppState;

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.init_config {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        std::fs::write(path, Config::default_toml())
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {}", path.display());
        return Ok(());
    }

    let config = load_config(&args)?;
    let mut state = AppState::new(config);
    apply_args(&mut state, &args);
    state.refresh_datasets();

    let initial = args.dataset.clone().or_else(|| state.datasets.first().cloned());

    if args.headless {
        let path = initial.context("no dataset given and none found in the datasets directory")?;
        return run_headless(&mut state, &path);
    }

    if let Some(path) = initial {
        state.open_dataset(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CiteScope – Publication Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(CiteScopeApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// File config (explicit or default location), then command-line overrides.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?.unwrap_or_default(),
    };
    config.merge_with_args(args);
    config.validate()?;
    Ok(config)
}

fn apply_args(state: &mut AppState, args: &Args) {
    if args.from.is_some() || args.to.is_some() {
        let range = YearRange::new(
            args.from.unwrap_or(state.range.from),
            args.to.unwrap_or(state.range.to),
        );
        state.set_range(range);
    }
    state.set_top_n(
        args.top_papers.unwrap_or(state.top_papers),
        args.top_keywords.unwrap_or(state.top_keywords),
    );
}

/// Load, aggregate and export without a window.
fn run_headless(state: &mut AppState, path: &Path) -> Result<()> {
    let table = load_file(path)?;
    state.set_table(table);

    let views = &state.views;
    log::info!("{} of {} publications in {}", state.filtered.len(), path.display(), state.range);
    if state.filtered.is_empty() {
        log::warn!("Nothing to export");
        return Ok(());
    }
    if let Some((first, last)) = state.filtered.year_bounds() {
        log::info!("Years covered: {first}-{last}");
    }
    if let Some(top) = views.most_cited.first() {
        log::info!("Most cited: {} ({} citations) {}", top.label, top.cited_by, top.title);
    }
    if let Some(top) = views.keywords.first() {
        log::info!("Top keyword: {} ({})", top.keyword, top.count);
    }

    export_charts(
        &state.export_dir,
        views,
        state.range,
        state.top_papers,
        state.top_keywords,
        &state.config().style,
    )?;
    Ok(())
}
