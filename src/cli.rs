//! CLI interface for Mapty.
//!
//! Each command runs one session against terminal views: hydrate from
//! storage, resolve the current position, then replay the user events the
//! command stands for.
//!
//! - `mapty add running|cycling --at LAT,LNG ...`: click the map, fill the form, submit.
//! - `mapty list`: show every stored workout.
//! - `mapty goto <id>`: click a list entry; the map pans to it.

mod format;
mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::factory::WorkoutFactory;
use crate::model::{ActivityKind, Coords, Workout};
use crate::position::ResolvedPosition;
use crate::session::{FormFields, Session, SessionError, SessionState, Views};
use crate::storage::{SqliteBlobStore, WorkoutArchive};

use terminal::{TerminalAlert, TerminalForm, TerminalList, TerminalMap};

type TerminalSession =
    Session<TerminalMap, TerminalForm, TerminalList, TerminalAlert, SqliteBlobStore>;

/// Mapty: log runs and rides where they happened.
#[derive(Debug, Parser)]
#[command(name = "mapty")]
pub struct Cli {
    /// Current position as LAT,LNG. Falls back to MAPTY_POSITION, then `home` in the config.
    #[arg(long, global = true, allow_hyphen_values = true)]
    here: Option<Coords>,

    /// Directory holding the workout database (default `~/.mapty/`).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a workout at a point on the map.
    ///
    /// Values are checked the way the form checks them: distance, duration,
    /// and cadence or elevation gain must all be positive numbers.
    Add {
        /// Running or cycling.
        #[arg(value_enum)]
        kind: KindArg,

        /// Where the workout happened, as LAT,LNG.
        #[arg(long, allow_hyphen_values = true)]
        at: Coords,

        /// Distance in kilometres.
        #[arg(long, allow_hyphen_values = true)]
        distance: String,

        /// Duration in minutes.
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// Steps per minute (running).
        #[arg(long, allow_hyphen_values = true)]
        cadence: Option<String>,

        /// Elevation gain in metres (cycling).
        #[arg(long, allow_hyphen_values = true)]
        elevation: Option<String>,
    },

    /// List stored workouts, oldest first.
    List,

    /// Pan the map to a workout.
    Goto {
        /// Workout ID: full ID or unambiguous prefix (e.g. `a3b`).
        id: String,
    },
}

/// CLI-facing workout kind, mapped to the domain `ActivityKind`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Running,
    Cycling,
}

impl KindArg {
    fn to_domain(self) -> ActivityKind {
        match self {
            Self::Running => ActivityKind::Running,
            Self::Cycling => ActivityKind::Cycling,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();

    let form = match &cli.command {
        Command::Add {
            distance,
            duration,
            cadence,
            elevation,
            ..
        } => TerminalForm::prefilled(FormFields {
            distance: distance.clone(),
            duration: duration.clone(),
            cadence: cadence.clone().unwrap_or_default(),
            elevation: elevation.clone().unwrap_or_default(),
            ..FormFields::empty()
        }),
        Command::List | Command::Goto { .. } => TerminalForm::empty(),
    };
    let echo_list = !matches!(cli.command, Command::Goto { .. });

    let mut session = open_session(config, cli.data_dir, form, echo_list)?;
    session.start(&mut ResolvedPosition::new(cli.here, config.home));
    if session.state() == SessionState::AwaitingLocation {
        return Err("no position, so the map cannot be shown".to_string());
    }

    match cli.command {
        Command::Add { kind, at, .. } => cmd_add(&mut session, kind.to_domain(), at),
        Command::List => {
            cmd_list(&session);
            Ok(())
        }
        Command::Goto { id } => cmd_goto(&mut session, &id),
    }
}

fn open_session(
    config: &Config,
    data_dir: Option<PathBuf>,
    form: TerminalForm,
    echo_list: bool,
) -> Result<TerminalSession, String> {
    let root = data_dir
        .or_else(SqliteBlobStore::default_root)
        .ok_or("could not determine home directory")?;
    let blobs = SqliteBlobStore::open(&root)
        .map_err(|e| format!("failed to open storage at {}: {e}", root.display()))?;

    let views = Views {
        map: TerminalMap::default(),
        form,
        list: TerminalList::new(echo_list),
        alert: TerminalAlert,
    };
    Ok(Session::new(
        views,
        WorkoutArchive::new(blobs),
        WorkoutFactory::new(config.time_zone()?),
        config.view_settings(),
    ))
}

fn cmd_add(session: &mut TerminalSession, kind: ActivityKind, at: Coords) -> Result<(), String> {
    session.map_clicked(at);
    if kind == ActivityKind::Cycling {
        session.type_changed();
    }

    match session.submit() {
        Ok(id) => {
            if let Some(workout) = session.workouts().iter().find(|w| w.id() == &id) {
                eprintln!("Recorded {} ({})", workout.description(), id.short());
            }
            Ok(())
        }
        // The form has already alerted with the details.
        Err(SessionError::InvalidInput(_)) => Err("workout not recorded".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn cmd_list(session: &TerminalSession) {
    if session.workouts().is_empty() {
        println!("No workouts");
    }
    tracing::debug!(markers = session.marker_count(), "listed workouts");
}

fn cmd_goto(session: &mut TerminalSession, reference: &str) -> Result<(), String> {
    let id = resolve_workout(session.workouts(), reference)?
        .id()
        .to_string();
    session.entry_clicked(&id);
    Ok(())
}

/// Resolve a workout reference (full ID or unambiguous prefix) to a workout.
fn resolve_workout<'a>(workouts: &'a [Workout], reference: &str) -> Result<&'a Workout, String> {
    // Try an exact match first.
    if let Some(w) = workouts.iter().find(|w| w.id().as_str() == reference) {
        return Ok(w);
    }

    let matches: Vec<&Workout> = workouts
        .iter()
        .filter(|w| w.id().as_str().starts_with(reference))
        .collect();

    match matches.len() {
        0 => Err(format!("no workout matching '{reference}'")),
        1 => Ok(matches[0]),
        n => {
            let ids: Vec<&str> = matches.iter().map(|w| w.id().short()).collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {n} workouts: {}",
                ids.join(", ")
            ))
        }
    }
}
