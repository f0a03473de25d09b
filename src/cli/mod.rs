//! CLI module for enumgen.
//!
//! Subcommands:
//! - `generate`: Write enum files for one or more categories
//! - `delete`: Remove a category's generated file
//! - `preview`: Print a category's enum without writing it
//! - `status`: Show targets and the ledger
//! - `base-dir`: Show or change the output directory

mod generate;
mod preview;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::context::Context;

/// enumgen - Enum generator for project tags, layers and input axes
#[derive(Parser)]
#[command(name = "enumgen")]
#[command(about = "Generate C# enums for tags, layers, sorting layers and input axes")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory (contains Assets/ and ProjectSettings/)
    #[arg(short, long, global = true, default_value = ".")]
    pub project: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate enum files
    Generate {
        /// Categories to generate (tag, layer, sorting-layer, button)
        categories: Vec<String>,

        /// Generate every category
        #[arg(long, conflicts_with = "categories")]
        all: bool,

        /// Class name for the generated enum (single category only)
        #[arg(long)]
        class_name: Option<String>,

        /// Change the output directory before generating
        #[arg(long)]
        base_dir: Option<String>,

        /// Answer yes to every confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete a generated enum file
    Delete {
        /// Category whose file to delete
        category: String,

        /// Answer yes to the confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the enum that would be generated
    Preview {
        /// Category to render
        category: String,

        /// Class name for the generated enum
        #[arg(long)]
        class_name: Option<String>,
    },

    /// Show target paths and the ledger
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the output directory
    BaseDir {
        /// New directory, relative to the source root
        dir: Option<String>,
    },
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        let ctx = Context::load(&self.project)?;
        match self.command {
            Command::Generate {
                ref categories,
                all,
                ref class_name,
                ref base_dir,
                yes,
            } => self.run_generate(
                &ctx,
                categories,
                all,
                class_name.as_deref(),
                base_dir.as_deref(),
                yes,
            ),
            Command::Delete { ref category, yes } => self.run_delete(&ctx, category, yes),
            Command::Preview {
                ref category,
                ref class_name,
            } => self.run_preview(&ctx, category, class_name.as_deref()),
            Command::Status { json } => self.run_status(&ctx, json),
            Command::BaseDir { ref dir } => self.run_base_dir(&ctx, dir.as_deref()),
        }
    }
}
