//! CLI command definitions for the `webgen` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod website;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Store and browse AI-generated websites.
#[derive(Parser)]
#[command(name = "webgen", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save a generated website from flags or a draft JSON file.
    Save(website::SaveArgs),

    /// Save the raw output of a generation service.
    Import {
        /// Prompt the output was generated from.
        #[arg(long)]
        prompt: String,

        /// Site type label sent with the prompt.
        #[arg(long = "type")]
        site_type: Option<String>,

        /// JSON file holding the generation output ("-" for stdin).
        #[arg(long)]
        file: PathBuf,
    },

    /// List stored websites, most recent first.
    #[command(alias = "ls")]
    List,

    /// Show a stored website.
    Show {
        /// Website slug.
        slug: String,
    },

    /// Delete a stored website.
    #[command(alias = "rm")]
    Delete {
        /// Website slug.
        slug: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Delete every stored website.
    Clear {
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Print the number of stored websites.
    Count,

    /// Preview the slug a title would get if saved now.
    Slug {
        /// Website title.
        title: String,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to config, then 3000).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to config, then 127.0.0.1).
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delete_alias() {
        let cli = Cli::try_parse_from(["webgen", "rm", "brew-haven-cafe-yw3v28", "--force"]).unwrap();
        match cli.command {
            Commands::Delete { slug, force } => {
                assert_eq!(slug, "brew-haven-cafe-yw3v28");
                assert!(force);
            }
            _ => panic!("expected delete"),
        }
    }

    #[test]
    fn test_parse_save_flags() {
        let cli = Cli::try_parse_from([
            "webgen",
            "save",
            "--title",
            "Brew Haven Cafe",
            "--prompt",
            "coffee shop",
            "--section",
            "hero",
            "--section",
            "menu",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Save(args) => {
                let draft = args.draft_from_flags();
                assert_eq!(draft.title, "Brew Haven Cafe");
                assert_eq!(draft.sections, vec!["hero", "menu"]);
                assert_eq!(draft.site_type, "website");
                assert_eq!(draft.tech_stack.framework, "html");
            }
            _ => panic!("expected save"),
        }
    }
}
