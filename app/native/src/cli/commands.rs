//! CLI command definitions using Clap.
//!
//! IconStash takes exactly one action flag per invocation.

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, CommandFactory, Parser};
use clap_complete::{Generator, Shell, generate};
use colored::Colorize;

use crate::config::{self, IconStashConfig};
use crate::core::constants::config::DATA_DIR_ENV;
use crate::core::prelude::*;
use crate::desktop::{DesktopShell, FolderFlags, MoveReport, native_shell};
use crate::registry::SaveRegistry;
use crate::schema;
use crate::snapshot::{SnapshotEngine, WaitPolicy};

/// Registry driving the platform's desktop shell.
type NativeRegistry = SaveRegistry<SnapshotEngine<Box<dyn DesktopShell>>>;

/// IconStash - keep several desktops' worth of icons and switch between them.
#[derive(Parser, Debug)]
#[command(name = "iconstash")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(group(
    ArgGroup::new("action")
        .args(["read", "new", "load", "active", "schema", "completions"])
        .required(true)
))]
#[command(after_long_help = r#"Examples:
  iconstash -r            # List saved desktops
  iconstash -n Work       # Save the current desktop, start an empty "Work" desktop
  iconstash -l Default    # Save the current desktop, bring back "Default"
  iconstash -a            # Print the active desktop"#)]
pub struct Cli {
    /// List every saved desktop, one name per line.
    #[arg(short, long)]
    read: bool,

    /// Save the current desktop and create a new, empty desktop named NAME.
    #[arg(short, long, value_name = "NAME")]
    new: Option<String>,

    /// Save the current desktop and load the desktop named NAME.
    #[arg(short, long, value_name = "NAME")]
    load: Option<String>,

    /// Print the name of the active desktop.
    #[arg(short, long)]
    active: bool,

    /// Output the configuration file JSON Schema.
    #[arg(long)]
    schema: bool,

    /// Output shell completions for SHELL.
    ///
    /// Usage:
    ///   eval "$(iconstash --completions zsh)"
    ///   iconstash --completions fish > ~/.config/fish/completions/iconstash.fish
    #[arg(long, value_name = "SHELL", value_enum, verbatim_doc_comment)]
    completions: Option<Shell>,

    /// Folder holding the saved desktops (overrides `dataDir`).
    #[arg(long, value_name = "PATH", env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Configuration file to use instead of the default locations.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// The single action selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// List slot names.
    Read,
    /// Create a slot.
    New(String),
    /// Activate a slot.
    Load(String),
    /// Print the active slot.
    Active,
    /// Print the configuration schema.
    Schema,
    /// Print shell completions.
    Completions(Shell),
}

impl Cli {
    /// Number of `-v` flags given.
    #[must_use]
    pub const fn verbosity(&self) -> u8 { self.verbose }

    /// Returns the selected action.
    #[must_use]
    pub fn action(&self) -> Action {
        if let Some(name) = &self.new {
            Action::New(name.clone())
        } else if let Some(name) = &self.load {
            Action::Load(name.clone())
        } else if let Some(shell) = self.completions {
            Action::Completions(shell)
        } else if self.active {
            Action::Active
        } else if self.schema {
            Action::Schema
        } else {
            Action::Read
        }
    }

    /// Execute the selected action.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the action
    /// fails.
    pub fn execute(&self) -> Result<()> {
        match self.action() {
            Action::Schema => {
                println!("{}", schema::print_schema()?);
                return Ok(());
            }
            Action::Completions(shell) => {
                Self::print_completions(shell);
                return Ok(());
            }
            _ => {}
        }

        let config = self.load_config()?;
        let mut registry = self.open_registry(&config)?;

        match self.action() {
            Action::Read => {
                for name in registry.list() {
                    println!("{name}");
                }
            }
            Action::Active => println!("{}", registry.active()?.name()),
            Action::New(name) => {
                println!("Saving current desktop with name \"{name}\"");
                let captured = registry.create(&name)?;
                report_moves(&captured.moves);
                println!("Created new desktop \"{name}\"");
            }
            Action::Load(name) => {
                println!("Loading current desktop with name \"{name}\"");
                let switched = registry.activate(&name)?;
                report_moves(&switched.captured.moves);
                report_moves(&switched.restored.moves);
                for record in &switched.restored.unmatched {
                    let warning = "WARNING:".yellow();
                    eprintln!("{warning} no icon named \"{}\" came back", record.name);
                }
                println!("Loaded save \"{name}\"");
            }
            Action::Schema | Action::Completions(_) => {}
        }

        Ok(())
    }

    fn load_config(&self) -> Result<IconStashConfig> {
        if let Some(path) = &self.config {
            return Ok(config::load_config_from_path(path)?);
        }

        let (config, path) = config::load_config()?;
        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "using configuration file");
        }
        Ok(config)
    }

    fn open_registry(&self, config: &IconStashConfig) -> Result<NativeRegistry> {
        let data_dir = self
            .data_dir
            .clone()
            .or_else(|| config.resolve_data_dir())
            .ok_or_else(|| Error::config("no data directory could be determined"))?;

        let engine = SnapshotEngine::new(
            native_shell(config.resolve_desktop_dir()),
            WaitPolicy::from(&config.wait),
        )
        .with_final_flags(FolderFlags::from(&config.restore));

        SaveRegistry::open(data_dir, engine)
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "iconstash", &mut io::stdout());
    }
}

fn report_moves(moves: &MoveReport) {
    for failure in &moves.failed {
        let warning = "WARNING:".yellow();
        eprintln!("{warning} could not move \"{}\": {}", failure.name, failure.error);
    }
}
