//! CLI for the PixelPro gallery client.

mod commands;
mod terminal;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use pixelpro_core::config;
use pixelpro_core::query::{MediaKind, Orientation};

use commands::{
    run_browse, run_completions, run_man, run_saved_clear, run_saved_list, run_saved_remove,
    run_search, run_theme_show, run_theme_toggle, SearchArgs,
};

/// Top-level CLI for the PixelPro gallery client.
#[derive(Debug, Parser)]
#[command(name = "pixelpro")]
#[command(about = "PixelPro: browse, save and download stock photos and videos", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Interactive gallery session.
    Browse {
        /// Start with this search instead of the configured default.
        query: Option<String>,
        /// Media kind to start with (photos or videos).
        #[arg(long, default_value = "photos")]
        kind: MediaKind,
    },

    /// One-shot search; prints the result cards and exits.
    Search {
        /// Search term.
        query: String,
        /// Media kind (photos or videos).
        #[arg(long, default_value = "photos")]
        kind: MediaKind,
        /// Orientation filter (landscape, portrait, square).
        #[arg(long)]
        orientation: Option<Orientation>,
        /// Color filter (name or hex).
        #[arg(long)]
        color: Option<String>,
        /// Number of pages to load.
        #[arg(long, default_value = "1", value_name = "N")]
        pages: u32,
    },

    /// Inspect or edit saved items.
    Saved {
        #[command(subcommand)]
        action: Option<SavedAction>,
    },

    /// Show or toggle the theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page to stdout.
    Man,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum SavedAction {
    /// List saved items (default).
    List,
    /// Remove one saved item by media ID.
    Remove {
        /// Media identifier.
        id: u64,
    },
    /// Remove every saved item.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ThemeAction {
    /// Print the current theme (default).
    Show,
    /// Switch between light and dark.
    Toggle,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Generators need no configuration.
        match cli.command {
            CliCommand::Completions { shell } => return run_completions(Cli::command(), shell),
            CliCommand::Man => return run_man(Cli::command()),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Browse { query, kind } => run_browse(cfg, query, kind)?,
            CliCommand::Search {
                query,
                kind,
                orientation,
                color,
                pages,
            } => run_search(
                &cfg,
                &SearchArgs {
                    query,
                    kind,
                    orientation,
                    color,
                    pages,
                },
            )?,
            CliCommand::Saved { action } => match action.unwrap_or(SavedAction::List) {
                SavedAction::List => run_saved_list()?,
                SavedAction::Remove { id } => run_saved_remove(id)?,
                SavedAction::Clear => run_saved_clear()?,
            },
            CliCommand::Theme { action } => match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => run_theme_show()?,
                ThemeAction::Toggle => run_theme_toggle()?,
            },
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
