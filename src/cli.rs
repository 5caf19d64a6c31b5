//! The command line interface for the program.
use crate::calendar::horizon_from_months;
use crate::input::eta_override::apply_override_args;
use crate::input::load_model;
use crate::log;
use crate::matrix_store::MatrixStore;
use crate::output::{create_output_directory, get_output_dir, write_schedule, write_timetable};
use crate::schedule::{MAX_STOP_INDEX, Projection};
use crate::settings::Settings;
use crate::timetable::Timetable;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;
pub mod matrix;
use matrix::MatrixSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// Project port-call itineraries for vessels on fixed rotations.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for the run command
#[derive(Args, Default)]
pub struct RunOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
    /// The vessel to project a schedule for (defaults to the one given in model.toml)
    #[arg(long)]
    pub vessel: Option<String>,
    /// Override the arrival time of a port call, in the form INDEX=INSTANT
    #[arg(long = "eta", value_name = "INDEX=INSTANT")]
    pub eta: Vec<String>,
    /// File to load saved transit times from, instead of the user's configuration directory
    #[arg(long)]
    pub matrix_file: Option<PathBuf>,
}

impl RunOpts {
    /// The store holding saved transit times
    fn matrix_store(&self) -> MatrixStore {
        self.matrix_file
            .clone()
            .map(MatrixStore::new)
            .unwrap_or_default()
    }
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Project the schedule for a model.
    Run {
        /// Path to the model directory.
        model_dir: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Validate a model.
    Validate {
        /// The path to the model directory.
        model_dir: PathBuf,
    },
    /// Manage example models.
    Example {
        /// The available subcommands for managing example models.
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Manage saved transit times.
    Matrix {
        /// The available subcommands for managing saved transit times.
        #[command(subcommand)]
        subcommand: MatrixSubcommands,
    },
    /// Manage program settings.
    Settings {
        /// The subcommands for managing the settings file
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run { model_dir, opts } => handle_run_command(&model_dir, &opts, None),
            Self::Validate { model_dir } => handle_validate_command(&model_dir, None),
            Self::Example { subcommand } => subcommand.execute(),
            Self::Matrix { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and execute the requested command
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load program settings, unless they have been provided
fn settings_or_load(settings: Option<Settings>) -> Result<Settings> {
    match settings {
        Some(settings) => Ok(settings),
        None => Settings::load().context("Failed to load settings."),
    }
}

/// Handle the `run` command.
pub fn handle_run_command(
    model_path: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = settings_or_load(settings)?;

    // Get path to output folder
    let output_path = match &opts.output_dir {
        Some(path) => path.clone(),
        None => get_output_dir(model_path)?,
    };
    let overwrite = create_output_directory(&output_path, opts.overwrite || settings.overwrite)
        .with_context(|| {
            format!(
                "Failed to create output directory: {}",
                output_path.display()
            )
        })?;

    log::init(Some(&settings.log_level), Some(&output_path))
        .context("Failed to initialise logging.")?;

    let model = load_model(model_path).context("Failed to load model.")?;
    info!("Loaded model from {}", model_path.display());
    info!("Output folder: {}", output_path.display());

    // NB: We have to wait until the logger is initialised to display this warning
    if overwrite {
        warn!("Output folder will be overwritten");
    }

    let vessel = model.select_vessel(opts.vessel.as_deref())?;
    let store = opts.matrix_store();
    let matrix = store.load(&model.transit_times);
    let mut overrides = model.overrides_for(&vessel.id);
    apply_override_args(&mut overrides, &opts.eta)?;

    let start = model.parameters.start();
    let horizon = horizon_from_months(start, model.parameters.horizon_months());
    info!(
        "Projecting schedule for {} from {start} to {horizon} ({} overrides)",
        vessel.name,
        overrides.len()
    );

    let Projection {
        stops,
        stopped_at_limit,
    } = Projection::new(&vessel.rotation, &matrix, start, horizon, &overrides);
    if stopped_at_limit {
        warn!(
            "Schedule stopped after {} port calls, before reaching {horizon}",
            MAX_STOP_INDEX + 1
        );
    }

    let timetable = Timetable::new(&stops, vessel.rotation.len());
    let title = format!("{} {}", model.parameters.schedule_title, vessel.name);
    write_schedule(&output_path, &stops, &model.ports)?;
    write_timetable(
        &output_path,
        &title,
        &timetable,
        &vessel.rotation,
        &model.ports,
    )?;

    match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => info!(
            "Projected {} port calls ({} rotation cycles) between {} and {}",
            stops.len(),
            timetable.len(),
            first.eta,
            last.etd
        ),
        _ => warn!("No port calls were projected for {}", vessel.name),
    }

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(model_path: &Path, settings: Option<Settings>) -> Result<()> {
    let settings = settings_or_load(settings)?;

    // Initialise program logger (we won't save log files when running the validate command)
    log::init(Some(&settings.log_level), None).context("Failed to initialise logging.")?;

    load_model(model_path).context("Failed to validate model.")?;
    info!("Model validation successful!");

    Ok(())
}
