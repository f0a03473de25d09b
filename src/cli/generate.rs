//! Generate and delete command handlers.

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::context::Context;
use crate::ledger::LedgerStore;
use crate::models::Category;
use crate::preflight::PreflightGate;
use crate::prompt::{AssumeYes, PromptService, TerminalPrompt};
use crate::services::{Outcome, ReconciliationEngine, Session};

use super::App;

impl App {
    /// Run the generate command for the requested categories.
    pub fn run_generate(
        &self,
        ctx: &Context,
        categories: &[String],
        all: bool,
        class_name: Option<&str>,
        base_dir: Option<&str>,
        yes: bool,
    ) -> Result<()> {
        ctx.gate().check()?;

        let requested: Vec<String> = if all {
            Category::all().iter().map(|c| c.key().to_string()).collect()
        } else if categories.is_empty() {
            return Err(eyre!("Name at least one category or pass --all"));
        } else {
            categories.to_vec()
        };

        let mut engine = ctx.engine()?;
        if let Some(dir) = base_dir {
            engine.set_base_dir(dir)?;
        }
        if let Some(name) = class_name {
            let [category] = requested.as_slice() else {
                return Err(eyre!("--class-name applies to exactly one category"));
            };
            engine.set_class_name(category.parse()?, name)?;
        }

        let failed = if yes {
            run_requests(engine, AssumeYes, &requested, Session::generate_named)
        } else {
            run_requests(
                engine,
                TerminalPrompt::stdio(),
                &requested,
                Session::generate_named,
            )
        };
        finish(failed)
    }

    /// Run the delete command for one category.
    pub fn run_delete(&self, ctx: &Context, category: &str, yes: bool) -> Result<()> {
        ctx.gate().check()?;

        let engine = ctx.engine()?;
        let requested = [category.to_string()];
        let failed = if yes {
            run_requests(engine, AssumeYes, &requested, Session::delete_named)
        } else {
            run_requests(
                engine,
                TerminalPrompt::stdio(),
                &requested,
                Session::delete_named,
            )
        };
        finish(failed)
    }
}

/// Run one request per category name and print each outcome.
///
/// Returns the number of failed requests.
fn run_requests<S, P>(
    engine: ReconciliationEngine<S>,
    prompt: P,
    requested: &[String],
    request: fn(&mut Session<S, P>, &str) -> Outcome,
) -> usize
where
    S: LedgerStore,
    P: PromptService,
{
    let mut session = Session::new(engine, prompt);
    requested
        .iter()
        .map(|name| {
            let outcome = request(&mut session, name);
            report(name, &outcome);
            outcome
        })
        .filter(Outcome::is_failure)
        .count()
}

fn report(name: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Written { path, members } => {
            println!("{name}: wrote {members} members to {}", path.display())
        }
        Outcome::Deleted { path } => println!("{name}: deleted {}", path.display()),
        Outcome::Cancelled => println!("{name}: cancelled"),
        Outcome::NothingToDelete => println!("{name}: nothing to delete"),
        Outcome::Failed(e) => println!("{name}: failed [{}]", e.code()),
    }
}

fn finish(failed: usize) -> Result<()> {
    if failed == 0 {
        Ok(())
    } else {
        Err(eyre!("{} request(s) failed", failed))
    }
}
