//! Status and base-dir command handlers.

use color_eyre::Result;

use crate::context::Context;
use crate::services::FileState;

use super::App;

impl App {
    /// Print each category's target path and recorded file.
    pub fn run_status(&self, ctx: &Context, json: bool) -> Result<()> {
        let engine = ctx.engine()?;
        let status = engine.status();

        if json {
            let value = serde_json::json!({
                "base_dir": engine.base_dir(),
                "categories": status,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        println!("Base directory: {}", engine.base_dir());
        for entry in &status {
            let state = match entry.state {
                FileState::Absent => "not generated",
                FileState::SameTarget => "up to date location",
                FileState::DifferentTarget => "recorded in another folder",
            };
            println!(
                "{:<14} {:<18} {}",
                entry.category.to_string(),
                entry.class_name,
                state
            );
            println!("  {}", entry.description);
            println!("  target:   {}", entry.target.display());
            if let Some(recorded) = &entry.recorded {
                println!(
                    "  recorded: {} ({})",
                    recorded.path.display(),
                    recorded.written_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
        }
        Ok(())
    }

    /// Show the base directory, or persist a new one.
    pub fn run_base_dir(&self, ctx: &Context, dir: Option<&str>) -> Result<()> {
        let mut engine = ctx.engine()?;
        if let Some(dir) = dir {
            engine.set_base_dir(dir)?;
            tracing::info!(base_dir = engine.base_dir(), "Saved base directory");
        }
        println!("{}", engine.base_dir());
        Ok(())
    }
}
