//! rowgrid - Entry Point

use clap::Parser;
use rowgrid::backend::{MockBackend, MockConfig};
use rowgrid::config::{self, CliOverrides, ResolvedConfig};
use rowgrid::integration::{self, FilterArgs};
use rowgrid::logging::{self, LogDestination};
use rowgrid::model::{AppError, RowId, Status, ValidationError};
use rowgrid::state::{MutationCoordinator, Notifications, TableState};
use rowgrid::view_state::{ScrollPosition, Viewport};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::info;

/// rowgrid - virtualized table engine over a generated dataset
#[derive(Parser, Debug)]
#[command(name = "rowgrid")]
#[command(version)]
#[command(about = "Load, filter, window and mutate a large generated table")]
pub struct Args {
    /// Number of rows to load
    #[arg(long)]
    pub rows: Option<usize>,

    /// Case-insensitive name substring filter
    #[arg(long)]
    pub name: Option<String>,

    /// Role filter
    #[arg(long, value_parser = ["admin", "manager", "developer", "designer", "analyst", "intern"])]
    pub role: Option<String>,

    /// Status filter
    #[arg(long, value_parser = ["active", "inactive", "pending", "suspended"])]
    pub status: Option<String>,

    /// Minimum score (inclusive)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub score_min: Option<u8>,

    /// Maximum score (inclusive)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub score_max: Option<u8>,

    /// Scroll offset in pixels
    #[arg(long, conflicts_with = "scroll_to_row")]
    pub scroll: Option<u64>,

    /// Scroll so that this filtered row index is at the top
    #[arg(long)]
    pub scroll_to_row: Option<usize>,

    /// Extra rows rendered past each visible edge
    #[arg(long)]
    pub overscan: Option<usize>,

    /// Delete a row by id (repeatable)
    #[arg(long, value_parser = parse_row_id)]
    pub delete: Vec<RowId>,

    /// Set a row's status, as ID=STATUS (repeatable)
    #[arg(long, value_parser = parse_status_assignment)]
    pub set_status: Vec<(RowId, Status)>,

    /// Set a row's score, as ID=SCORE (repeatable)
    #[arg(long, value_parser = parse_score_assignment)]
    pub set_score: Vec<(RowId, i64)>,

    /// Bulk delete every row passing the filter
    #[arg(long)]
    pub bulk_delete_filtered: bool,

    /// Seed for the generated dataset
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip simulated backend latency
    #[arg(long)]
    pub no_latency: bool,

    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Log to stderr instead of the log file
    #[arg(long)]
    pub log_stderr: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            row_count: self.rows,
            overscan: self.overscan,
            seed: self.seed,
            no_latency: self.no_latency,
        }
    }

    fn filter_args(&self) -> FilterArgs {
        FilterArgs {
            name: self.name.clone(),
            role: self.role.clone(),
            status: self.status.clone(),
            score_min: self.score_min,
            score_max: self.score_max,
        }
    }

    fn scroll_position(&self) -> ScrollPosition {
        match (self.scroll_to_row, self.scroll) {
            (Some(row), _) => ScrollPosition::AtRow(row),
            (None, Some(offset)) => ScrollPosition::AtOffset(offset),
            (None, None) => ScrollPosition::Top,
        }
    }
}

fn parse_row_id(raw: &str) -> Result<RowId, ValidationError> {
    RowId::new(raw)
}

fn split_assignment(raw: &str) -> Result<(RowId, &str), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{raw}'"))?;
    Ok((RowId::new(id).map_err(|e| e.to_string())?, value))
}

fn parse_status_assignment(raw: &str) -> Result<(RowId, Status), String> {
    let (id, value) = split_assignment(raw)?;
    let status = value.parse::<Status>().map_err(|e| e.to_string())?;
    Ok((id, status))
}

fn parse_score_assignment(raw: &str) -> Result<(RowId, i64), String> {
    let (id, value) = split_assignment(raw)?;
    let score = value
        .parse::<i64>()
        .map_err(|e| format!("invalid score '{value}': {e}"))?;
    Ok((id, score))
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config_file = config::load_config_with_precedence(args.config.clone())?;
    let merged = config::merge_config(config_file);
    let with_env = config::apply_env_overrides(merged)?;
    Ok(config::apply_cli_overrides(with_env, args.cli_overrides()))
}

async fn run(args: &Args, config: &ResolvedConfig) -> Result<String, AppError> {
    let filter = integration::filter_spec_from_args(&args.filter_args())?;
    let mut viewport = Viewport::new(config.row_height, config.viewport_height, config.overscan)?;

    let backend = Rc::new(MockBackend::new(MockConfig {
        load_latency: config.load_latency(),
        mutation_latency: config.mutation_latency(),
        failure_rate: config.failure_rate,
        seed: config.seed,
    }));
    let state = Rc::new(RefCell::new(TableState::new(Notifications::new(
        config.notification_capacity,
    ))));
    let coordinator = MutationCoordinator::new(state.clone(), backend);

    coordinator
        .load(config.row_count)
        .await
        .map_err(AppError::Load)?;

    state.borrow_mut().set_filter(filter);

    for id in &args.delete {
        coordinator.delete_record(id).await;
    }
    for (id, status) in &args.set_status {
        coordinator.update_status(id, *status).await;
    }
    for (id, score) in &args.set_score {
        coordinator.update_score(id, *score).await;
    }

    let bulk = if args.bulk_delete_filtered {
        state.borrow_mut().bulk_select(true);
        Some(coordinator.bulk_delete_selected().await)
    } else {
        None
    };

    let state = state.borrow();
    viewport.scroll_to(args.scroll_position(), state.filtered_count());

    let mut snapshot = integration::snapshot(&state, &viewport);
    snapshot.bulk_delete = bulk;

    info!(
        total = snapshot.total_count,
        filtered = snapshot.filtered_count,
        first = snapshot.window.first_index,
        last = snapshot.window.last_index,
        "Snapshot ready"
    );

    if args.json {
        Ok(serde_json::to_string_pretty(&snapshot)?)
    } else {
        Ok(integration::render_text(&snapshot))
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let destination = if args.log_stderr {
        LogDestination::Stderr
    } else {
        LogDestination::File(config.log_file_path.clone())
    };
    logging::init(&destination)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let output = runtime.block_on(run(&args, &config))?;

    println!("{output}");
    Ok(())
}
