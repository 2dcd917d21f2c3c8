use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use eventplan_core::{
    generate_guests, load_event_config, load_guest_list, EventConfig, EventSession, EventSummary,
    Guest, SeatingChart, SessionError, Task, UndoPolicy, Venue,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] eventplan_core::ConfigError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no venue fits {guests} guests within ${budget:.2}")]
    NoVenueFits { guests: usize, budget: f64 },
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Event planning command-line interface", long_about = None)]
pub struct Cli {
    /// Path to eventplan.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lists the venue catalog
    Venues,
    /// Picks the cheapest venue that fits the budget and headcount
    Select(SelectArgs),
    /// Builds a seating chart for a venue
    Seat(SeatArgs),
    /// Replays preparation task operations
    Tasks(TaskArgs),
    /// Shows guests, venue and task totals
    Summary(SummaryArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct GuestSource {
    /// Guest list file (.toml, .yaml or .yml)
    #[arg(long, conflicts_with = "generate")]
    pub guest_file: Option<PathBuf>,
    /// Generate this many sample guests
    #[arg(long)]
    pub generate: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    /// Event budget
    #[arg(long)]
    pub budget: f64,
    /// Headcount, when no guest list is given
    #[arg(long, conflicts_with_all = ["guest_file", "generate"])]
    pub guests: Option<usize>,
    #[command(flatten)]
    pub source: GuestSource,
}

#[derive(Args, Debug, Clone, Default)]
pub struct VenueChoice {
    /// Select the venue by budget
    #[arg(long, conflicts_with = "venue")]
    pub budget: Option<f64>,
    /// Select the venue by catalog name
    #[arg(long)]
    pub venue: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SeatArgs {
    #[command(flatten)]
    pub choice: VenueChoice,
    #[command(flatten)]
    pub source: GuestSource,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UndoMode {
    Discard,
    Requeue,
}

impl From<UndoMode> for UndoPolicy {
    fn from(mode: UndoMode) -> Self {
        match mode {
            UndoMode::Discard => UndoPolicy::Discard,
            UndoMode::Requeue => UndoPolicy::Requeue,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct TaskArgs {
    /// Task to add, in order (repeatable)
    #[arg(long = "add")]
    pub add: Vec<String>,
    /// Number of tasks to execute after adding
    #[arg(long, default_value_t = 0)]
    pub execute: usize,
    /// Number of executed tasks to undo afterwards
    #[arg(long, default_value_t = 0)]
    pub undo: usize,
    /// Override the configured undo policy
    #[arg(long, value_enum)]
    pub undo_policy: Option<UndoMode>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub choice: VenueChoice,
    #[command(flatten)]
    pub source: GuestSource,
    /// Pending task to record (repeatable)
    #[arg(long = "task")]
    pub tasks: Vec<String>,
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .try_init();
}

pub fn run(cli: Cli) -> Result<()> {
    let context = AppContext::new(&cli)?;

    match &cli.command {
        Commands::Venues => {
            let venues = context.venue_list();
            render(&venues, cli.format)?;
        }
        Commands::Select(args) => {
            let report = context.select(args)?;
            render(&report, cli.format)?;
        }
        Commands::Seat(args) => {
            let report = context.seat(args)?;
            render(&report, cli.format)?;
        }
        Commands::Tasks(args) => {
            let report = context.tasks(args)?;
            render(&report, cli.format)?;
        }
        Commands::Summary(args) => {
            let summary = context.summary(args)?;
            render(&summary, cli.format)?;
        }
    }

    Ok(())
}

fn render<T>(value: &T, format: OutputFormat) -> Result<()>
where
    T: Serialize + DisplayFallback,
{
    match format {
        OutputFormat::Text => {
            println!("{}", value.display());
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{}", json);
            Ok(())
        }
    }
}

trait DisplayFallback {
    fn display(&self) -> String;
}

#[derive(Debug)]
struct AppContext {
    config: EventConfig,
}

impl AppContext {
    fn new(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => load_event_config(path)?,
            None => EventConfig::default(),
        };
        debug!(
            capacity_policy = ?config.seating.capacity_policy,
            undo_policy = %config.ledger.undo_policy,
            venues = config.venues.len(),
            "configuration loaded"
        );
        Ok(Self { config })
    }

    fn session(&self) -> EventSession {
        EventSession::from_config(&self.config)
    }

    fn venue_list(&self) -> VenueList {
        VenueList {
            rows: self.config.catalog(),
        }
    }

    fn load_guests(&self, source: &GuestSource) -> Result<Vec<Guest>> {
        match (&source.guest_file, source.generate) {
            (Some(path), _) => Ok(load_guest_list(path)?.all().to_vec()),
            (None, Some(count)) => Ok(generate_guests(count)),
            (None, None) => Err(AppError::InvalidInput(
                "provide --guest-file or --generate".to_string(),
            )),
        }
    }

    fn select(&self, args: &SelectArgs) -> Result<SelectionReport> {
        let budget = validate_budget(args.budget)?;
        let guest_count = match args.guests {
            Some(count) => count,
            None => self.load_guests(&args.source)?.len(),
        };
        let venue = eventplan_core::select_venue(&self.config.catalog(), budget, guest_count).cloned();
        Ok(SelectionReport {
            budget,
            guest_count,
            venue,
        })
    }

    fn seated_session(&self, choice: &VenueChoice, source: &GuestSource) -> Result<EventSession> {
        let mut session = self.session();
        session.extend_guests(self.load_guests(source)?);
        self.apply_choice(&mut session, choice)?;
        Ok(session)
    }

    fn apply_choice(&self, session: &mut EventSession, choice: &VenueChoice) -> Result<()> {
        match (&choice.venue, choice.budget) {
            (Some(name), _) => {
                session.choose_venue(name)?;
            }
            (None, Some(budget)) => {
                let budget = validate_budget(budget)?;
                if session.select_venue(budget)?.is_none() {
                    return Err(AppError::NoVenueFits {
                        guests: session.guests().count(),
                        budget,
                    });
                }
            }
            (None, None) => {}
        }
        Ok(())
    }

    fn seat(&self, args: &SeatArgs) -> Result<SeatingReport> {
        if args.choice.venue.is_none() && args.choice.budget.is_none() {
            return Err(AppError::InvalidInput(
                "provide --budget or --venue".to_string(),
            ));
        }
        let session = self.seated_session(&args.choice, &args.source)?;
        let chart = session.generate_seating()?;
        let venue = session
            .selected_venue()
            .cloned()
            .ok_or(SessionError::NoVenueSelected)?;
        Ok(SeatingReport { venue, chart })
    }

    fn tasks(&self, args: &TaskArgs) -> Result<TaskReport> {
        let mut config = self.config.clone();
        if let Some(mode) = args.undo_policy {
            config.ledger.undo_policy = mode.into();
        }
        let mut session = EventSession::from_config(&config);
        for description in &args.add {
            session.add_task(validate_task(description)?);
        }

        let executed: Vec<Task> = (0..args.execute)
            .map_while(|_| session.execute_next_task())
            .collect();
        let undone: Vec<Task> = (0..args.undo)
            .map_while(|_| session.undo_last_task())
            .collect();

        let ledger = session.ledger();
        Ok(TaskReport {
            undo_policy: ledger.undo_policy(),
            executed,
            undone,
            pending: ledger.pending().cloned().collect(),
            completed: ledger.completed().to_vec(),
        })
    }

    fn summary(&self, args: &SummaryArgs) -> Result<EventSummary> {
        let mut session = self.session();
        if args.source.guest_file.is_some() || args.source.generate.is_some() {
            session.extend_guests(self.load_guests(&args.source)?);
        }
        self.apply_choice(&mut session, &args.choice)?;
        for description in &args.tasks {
            session.add_task(validate_task(description)?);
        }
        Ok(session.summary())
    }
}

fn validate_budget(budget: f64) -> Result<f64> {
    if budget.is_finite() && budget >= 0.0 {
        Ok(budget)
    } else {
        Err(AppError::InvalidInput(format!(
            "budget must be a non-negative number, got {budget}"
        )))
    }
}

fn validate_task(description: &str) -> Result<&str> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        Err(AppError::InvalidInput("task cannot be empty".to_string()))
    } else {
        Ok(trimmed)
    }
}

fn describe_venue(venue: &Venue) -> String {
    format!(
        "{} (${:.2}, capacity {}, {} tables x {} seats)",
        venue.name, venue.cost, venue.capacity, venue.tables, venue.seats_per_table
    )
}

#[derive(Debug, Serialize)]
pub struct VenueList {
    pub rows: Vec<Venue>,
}

impl DisplayFallback for VenueList {
    fn display(&self) -> String {
        if self.rows.is_empty() {
            return "No venues".to_string();
        }
        self.rows
            .iter()
            .map(describe_venue)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct SelectionReport {
    pub budget: f64,
    pub guest_count: usize,
    pub venue: Option<Venue>,
}

impl DisplayFallback for SelectionReport {
    fn display(&self) -> String {
        match &self.venue {
            Some(venue) => format!("Selected: {}", describe_venue(venue)),
            None => format!(
                "No venue fits {} guests within ${:.2}",
                self.guest_count, self.budget
            ),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeatingReport {
    pub venue: Venue,
    pub chart: SeatingChart,
}

impl DisplayFallback for SeatingReport {
    fn display(&self) -> String {
        let mut lines = vec![format!("Seating for {}:", self.venue.name)];
        for (table, guests) in self.chart.tables() {
            let seated: Vec<String> = guests
                .iter()
                .map(|guest| format!("{}({})", guest.name, guest.group_tag))
                .collect();
            lines.push(format!("Table {table}: {}", seated.join(", ")));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct TaskReport {
    pub undo_policy: UndoPolicy,
    pub executed: Vec<Task>,
    pub undone: Vec<Task>,
    pub pending: Vec<Task>,
    pub completed: Vec<Task>,
}

impl DisplayFallback for TaskReport {
    fn display(&self) -> String {
        let mut lines = Vec::new();
        for task in &self.executed {
            lines.push(format!("Executed: {task}"));
        }
        for task in &self.undone {
            lines.push(format!("Undone: {task} ({})", self.undo_policy));
        }
        if self.executed.is_empty() && self.undone.is_empty() {
            lines.push("No tasks run".to_string());
        }
        lines.push(format!(
            "Remaining: {} | Completed: {}",
            self.pending.len(),
            self.completed.len()
        ));
        lines.join("\n")
    }
}

impl DisplayFallback for EventSummary {
    fn display(&self) -> String {
        let mut lines = vec!["=== Event Summary ===".to_string()];
        lines.push(format!("Guests: {}", self.guest_count));
        for (group, count) in &self.groups {
            let label = if group.is_empty() { "<none>" } else { group };
            lines.push(format!("  {label}: {count}"));
        }
        let venue = self
            .venue
            .as_ref()
            .map(|venue| format!("{} (${:.2})", venue.name, venue.cost))
            .unwrap_or_else(|| "None".to_string());
        lines.push(format!("Venue: {venue}"));
        lines.push(format!("Pending tasks: {}", self.pending_tasks));
        lines.join("\n")
    }
}
