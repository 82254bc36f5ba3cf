use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::data::aggregate::Views;
use crate::data::filter::filter_by_year_range;
use crate::data::loader::{discover_datasets, load_file};
use crate::data::model::{PublicationTable, YearRange};
use crate::export::export_charts;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Startup configuration; never modified after construction.
    config: Config,

    /// Datasets found in the configured directory.
    pub datasets: Vec<PathBuf>,

    /// Path of the dataset currently shown.
    pub current_dataset: Option<PathBuf>,

    /// Loaded dataset (None until a file is loaded).
    pub table: Option<PublicationTable>,

    /// Inclusive year range selected with the sliders.
    pub range: YearRange,

    /// Number of bars on the most-cited chart.
    pub top_papers: usize,

    /// Number of bars on the keyword chart.
    pub top_keywords: usize,

    /// Publications inside `range` (cached).
    pub filtered: PublicationTable,

    /// Aggregates of `filtered` (cached).
    pub views: Views,

    /// Where exported charts go.
    pub export_dir: PathBuf,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the status message reports an error.
    pub status_is_error: bool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let limits = &config.limits;
        Self {
            datasets: Vec::new(),
            current_dataset: None,
            table: None,
            range: YearRange::new(limits.min_year, limits.max_year),
            top_papers: limits.max_papers,
            top_keywords: limits.max_keywords,
            filtered: PublicationTable::default(),
            views: Views::default(),
            export_dir: config.export.output_dir.clone(),
            status_message: None,
            status_is_error: false,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rescan the datasets directory.
    pub fn refresh_datasets(&mut self) {
        match discover_datasets(&self.config.data.datasets_dir) {
            Ok(found) => {
                log::info!(
                    "Found {} datasets in {}",
                    found.len(),
                    self.config.data.datasets_dir.display()
                );
                self.datasets = found;
            }
            Err(e) => {
                log::error!("Failed to scan datasets: {e:#}");
                self.set_error(format!("Error: {e:#}"));
            }
        }
    }

    /// Load a dataset from disk and make it current. Errors end up in the
    /// status message; the previously loaded table stays visible.
    pub fn open_dataset(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => {
                self.current_dataset = Some(path.to_path_buf());
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.set_error(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded table and recompute everything.
    pub fn set_table(&mut self, table: PublicationTable) {
        self.table = Some(table);
        self.status_message = None;
        self.status_is_error = false;
        self.refilter();
    }

    /// Change the year range and recompute.
    pub fn set_range(&mut self, range: YearRange) {
        self.range = range;
        self.refilter();
    }

    /// Recompute `filtered` and `views` after a range or dataset change.
    pub fn refilter(&mut self) {
        self.filtered = match &self.table {
            Some(table) => filter_by_year_range(table, self.range),
            None => PublicationTable::default(),
        };
        self.views = Views::compute(&self.filtered);
        log::debug!(
            "{} publications in {}, {} distinct keywords",
            self.filtered.len(),
            self.range,
            self.views.keywords.len()
        );
    }

    /// Clamp top-N values to `1..=max` from the config.
    pub fn set_top_n(&mut self, papers: usize, keywords: usize) {
        let limits = &self.config.limits;
        self.top_papers = papers.clamp(1, limits.max_papers);
        self.top_keywords = keywords.clamp(1, limits.max_keywords);
    }

    /// Write the three charts to `export_dir`. Returns whether files were written.
    pub fn export(&mut self) -> bool {
        if self.filtered.is_empty() {
            self.set_error("Nothing to export: no publications in the selected range".to_string());
            return false;
        }
        match export_charts(
            &self.export_dir,
            &self.views,
            self.range,
            self.top_papers,
            self.top_keywords,
            &self.config.style,
        ) {
            Ok(written) => {
                self.status_message = Some(format!(
                    "Exported {} charts to {}",
                    written.len(),
                    self.export_dir.display()
                ));
                self.status_is_error = false;
                true
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.set_error(format!("Error: {e}"));
                false
            }
        }
    }

    fn set_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = true;
    }
}
