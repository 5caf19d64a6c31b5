//! CLI commands for viewing and editing saved transit times.
use crate::input::load_model;
use crate::log;
use crate::matrix_store::MatrixStore;
use crate::port::{PortID, PortMap};
use crate::settings::Settings;
use crate::transit::TransitMatrix;
use crate::units::Days;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where saved transit times are kept
#[derive(Args)]
pub struct StoreOpts {
    /// File to use instead of the one in the user's configuration directory
    #[arg(long)]
    pub matrix_file: Option<PathBuf>,
}

impl StoreOpts {
    fn store(self) -> MatrixStore {
        self.matrix_file.map(MatrixStore::new).unwrap_or_default()
    }
}

/// Subcommands for saved transit times
#[derive(Subcommand)]
pub enum MatrixSubcommands {
    /// Print the transit time between every pair of a model's ports
    Show {
        /// The path to the model directory.
        model_dir: PathBuf,
        /// Location of saved transit times
        #[command(flatten)]
        store: StoreOpts,
    },
    /// Save the transit time between two ports
    Set {
        /// The port the vessel departs from
        from: String,
        /// The port the vessel arrives at
        to: String,
        /// Transit time in days
        days: f64,
        /// Location of saved transit times
        #[command(flatten)]
        store: StoreOpts,
    },
    /// Delete all saved transit times, so that model defaults are used
    Reset {
        /// Location of saved transit times
        #[command(flatten)]
        store: StoreOpts,
    },
    /// Get the path to where transit times are saved
    Path {
        /// Location of saved transit times
        #[command(flatten)]
        store: StoreOpts,
    },
}

impl MatrixSubcommands {
    /// Execute the supplied matrix subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::Show { model_dir, store } => handle_show_command(&model_dir, &store.store()),
            Self::Set {
                from,
                to,
                days,
                store,
            } => handle_set_command(&from, &to, Days(days), &store.store()),
            Self::Reset { store } => {
                let store = store.store();
                if store.reset()? {
                    println!("Deleted saved transit times: {}", store.path().display());
                } else {
                    println!("No saved transit times to delete");
                }
                Ok(())
            }
            Self::Path { store } => {
                println!("{}", store.store().path().display());
                Ok(())
            }
        }
    }
}

/// Initialise logging to the console only, so that problems with saved data are reported
fn init_console_log() -> Result<()> {
    let settings = Settings::load().context("Failed to load settings.")?;
    log::init(Some(&settings.log_level), None).context("Failed to initialise logging.")
}

fn handle_show_command(model_dir: &Path, store: &MatrixStore) -> Result<()> {
    init_console_log()?;
    let model = load_model(model_dir).context("Failed to load model.")?;
    let matrix = store.load(&model.transit_times);
    write_matrix_table(io::stdout().lock(), &model.ports, &matrix)
}

fn handle_set_command(from: &str, to: &str, days: Days, store: &MatrixStore) -> Result<()> {
    init_console_log()?;
    store
        .set_entry(PortID::new(from), PortID::new(to), days)
        .with_context(|| format!("Failed to save transit time from {from} to {to}"))?;
    println!("Transit time from {from} to {to} set to {days} days");

    Ok(())
}

/// Write the transit time between every pair of `ports` as CSV, one row per origin port
fn write_matrix_table<W: Write>(writer: W, ports: &PortMap, matrix: &TransitMatrix) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let header = std::iter::once("from").chain(ports.keys().map(|id| &*id.0));
    writer.write_record(header)?;
    for from in ports.keys() {
        let row = ports
            .keys()
            .map(|to| matrix.lookup(from, to).to_string());
        writer.write_record(std::iter::once(from.to_string()).chain(row))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{matrix, ports};
    use rstest::rstest;

    #[rstest]
    fn test_write_matrix_table(ports: PortMap, matrix: TransitMatrix) {
        let mut buf = Vec::new();
        write_matrix_table(&mut buf, &ports, &matrix).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "from,A,B,C\nA,0,1,2\nB,2,0,1\nC,2,2,0\n"
        );
    }
}
