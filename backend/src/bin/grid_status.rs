//! Terminal front-end for the weekly class grid.
//!
//! Prints the week (or a single day) for the configured dataset, marks the
//! crowded cells with their sub-grid shape and shows who is in class right
//! now.
//!
//! # Usage
//!
//! ```bash
//! # Whole week with the default configuration
//! cargo run --bin grid-status
//!
//! # One day, only two people, colors persisted to a file
//! PREFERENCES_PATH=prefs.json cargo run --bin grid-status -- lunes --only Ana --only Bo
//!
//! # Change a color and keep following presence until Ctrl-C
//! cargo run --bin grid-status -- --set-color 'Ana=#3366ff' --watch
//! ```
//!
//! # Environment Variables
//!
//! - `GRID_CONFIG`: configuration file (default: `grid-status.toml` search)
//! - `GRID_DATASET`: dataset JSON file
//! - `PREFERENCES_REPOSITORY`: `local` or `file`
//! - `PREFERENCES_PATH`: preference file for the `file` repository
//! - `PRESENCE_TICK_SECONDS`: presence refresh period
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use class_grid::config::AppConfig;
use class_grid::db::{PreferenceRepository, RepositoryFactory};
use class_grid::models::{load_dataset, Weekday};
use class_grid::services::{
    Clock, ColorPreferences, GridSpec, LocalClock, RenderedSlot, ScheduleBoard,
};

const CELL_WIDTH: usize = 14;

#[derive(Parser, Debug)]
#[command(name = "grid-status", version, about = "Weekly class grid and live presence")]
struct Cli {
    /// Print a single day (English or Spanish name) instead of the whole week
    day: Option<Weekday>,

    /// Configuration file
    #[arg(short, long, env = "GRID_CONFIG")]
    config: Option<PathBuf>,

    /// Dataset JSON file, overriding the configuration
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Change a person's color and save it, e.g. `Ana=#3366ff`
    #[arg(long = "set-color", value_name = "NAME=COLOR", value_parser = parse_color_edit)]
    set_color: Vec<(String, String)>,

    /// Show only these persons (repeatable)
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,

    /// Keep running and print presence changes until Ctrl-C
    #[arg(short, long)]
    watch: bool,
}

fn parse_color_edit(raw: &str) -> Result<(String, String), String> {
    let (name, color) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=COLOR, got '{}'", raw))?;
    let (name, color) = (name.trim(), color.trim());
    if name.is_empty() || color.is_empty() {
        return Err(format!("expected NAME=COLOR, got '{}'", raw));
    }
    Ok((name.to_string(), color.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the grid on stdout stays clean.
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_default_location()?,
    };
    config.apply_env_overrides()?;
    if let Some(path) = cli.dataset {
        config.dataset.path = path;
    }

    let raw = load_dataset(&config.dataset.path)?;
    info!(
        "Loaded {} schedules from {}",
        raw.len(),
        config.dataset.path.display()
    );

    let repository = RepositoryFactory::from_repository_config(&config.repository)
        .context("Failed to create preference repository")?;
    if !repository.health_check().unwrap_or(false) {
        warn!("Preference store is not available; color changes will not be saved");
    }
    let preferences = ColorPreferences::with_key(repository, config.repository.key.clone());
    let mut board = ScheduleBoard::open(&raw, preferences);

    for (name, color) in &cli.set_color {
        if board.set_color(name, color.as_str()) {
            info!("Color of {} set to {}", name, color);
        } else {
            warn!("No person named '{}' in the dataset", name);
        }
    }

    if !cli.only.is_empty() {
        board.show_only(cli.only.iter().map(String::as_str));
    }

    match cli.day {
        Some(day) => print_day(&board, day, &config.grid),
        None => print_week(&board, &config.grid),
    }

    let clock = LocalClock;
    print_presence(&board.currently_active(&clock.now()));

    if cli.watch {
        let ticker = board.start_presence(clock, config.presence.period());
        let mut updates = ticker.subscribe();
        info!(
            "Watching presence every {}s, press Ctrl-C to stop",
            config.presence.period().as_secs()
        );

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let names = updates.borrow_and_update().clone();
                    print_presence(&names);
                }
            }
        }

        ticker.stop();
        info!("Stopped");
    }

    Ok(())
}

fn print_week<R: PreferenceRepository>(board: &ScheduleBoard<R>, spec: &GridSpec) {
    let grid = board.week(spec);

    print!("{:<6}", "");
    for day in &grid.days {
        print!("{:<width$}", &day.name()[..3], width = CELL_WIDTH);
    }
    println!();

    for row in &grid.rows {
        print!("{:<6}", row.hour_slot.to_string());
        for cell in &row.cells {
            print!("{:<width$}", cell_label(&cell.slot), width = CELL_WIDTH);
        }
        println!();
    }

    let crowded: Vec<_> = grid.conflicts().collect();
    if !crowded.is_empty() {
        println!();
        for cell in crowded {
            println!(
                "{} {}: {} sessions in {}x{} ({:?})",
                cell.slot.day,
                cell.slot.hour_slot,
                cell.slot.len(),
                cell.layout.columns,
                cell.layout.rows,
                cell.layout.size_tier
            );
        }
    }
}

fn print_day<R: PreferenceRepository>(board: &ScheduleBoard<R>, day: Weekday, spec: &GridSpec) {
    println!("{}", day);
    for hour_slot in spec.hour_slots() {
        let slot = board.slot(day, hour_slot);
        if slot.is_empty() {
            println!("{}  -", hour_slot);
            continue;
        }

        let entries: Vec<String> = slot
            .active_sessions
            .iter()
            .map(|entry| match &entry.session.room {
                Some(room) => format!("{}: {} ({})", entry.person, entry.session.subject, room),
                None => format!("{}: {}", entry.person, entry.session.subject),
            })
            .collect();
        let layout = slot.layout();
        println!(
            "{}  {}  [{}x{} {:?}]",
            hour_slot,
            entries.join(", "),
            layout.columns,
            layout.rows,
            layout.size_tier
        );
    }
}

fn cell_label(slot: &RenderedSlot) -> String {
    if slot.is_empty() {
        return ".".to_string();
    }
    let label = slot
        .active_sessions
        .iter()
        .map(|entry| entry.person.as_str())
        .collect::<Vec<_>>()
        .join(",");
    if label.chars().count() < CELL_WIDTH {
        label
    } else {
        let mut short: String = label.chars().take(CELL_WIDTH - 2).collect();
        short.push('~');
        short
    }
}

fn print_presence(names: &[String]) {
    if names.is_empty() {
        println!("In class now: nobody");
    } else {
        println!("In class now: {}", names.join(", "));
    }
}
