//! Drives the engine through a prompt service.
//!
//! The engine hands back [`Step::Confirm`] and waits; the session asks the
//! [`PromptService`], feeds the answer back and turns every failure into a
//! notice, so callers only ever see an [`Outcome`].

use std::path::PathBuf;

use super::engine::{ReconciliationEngine, Step};
use crate::error::AppError;
use crate::ledger::LedgerStore;
use crate::models::Category;
use crate::prompt::PromptService;

/// Final result of one user request.
#[derive(Debug)]
pub enum Outcome {
    Written { path: PathBuf, members: usize },
    Deleted { path: PathBuf },
    Cancelled,
    NothingToDelete,
    /// The request failed; the user has already been notified.
    Failed(AppError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Engine plus the prompt service answering its questions.
pub struct Session<S: LedgerStore, P: PromptService> {
    engine: ReconciliationEngine<S>,
    prompt: P,
}

impl<S: LedgerStore, P: PromptService> Session<S, P> {
    pub fn new(engine: ReconciliationEngine<S>, prompt: P) -> Self {
        Self { engine, prompt }
    }

    pub fn engine(&self) -> &ReconciliationEngine<S> {
        &self.engine
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn generate(&mut self, category: Category) -> Outcome {
        let step = self.engine.request_generate(category);
        self.drive(step)
    }

    pub fn delete(&mut self, category: Category) -> Outcome {
        let step = self.engine.request_delete(category);
        self.drive(step)
    }

    /// Generate a category given by name.
    ///
    /// An unknown name is logged and reported as a failure.
    pub fn generate_named(&mut self, name: &str) -> Outcome {
        match name.parse::<Category>() {
            Ok(category) => self.generate(category),
            Err(e) => {
                tracing::error!(error = %e, "Ignoring generate request");
                Outcome::Failed(e)
            }
        }
    }

    /// Delete a category given by name.
    ///
    /// An unknown name is logged and reported as a failure.
    pub fn delete_named(&mut self, name: &str) -> Outcome {
        match name.parse::<Category>() {
            Ok(category) => self.delete(category),
            Err(e) => {
                tracing::error!(error = %e, "Ignoring delete request");
                Outcome::Failed(e)
            }
        }
    }

    fn drive(&mut self, mut step: Result<Step, AppError>) -> Outcome {
        loop {
            step = match step {
                Ok(Step::Confirm(confirmation)) => {
                    let answer = self.prompt.ask_yes_no(&confirmation.message);
                    self.engine.answer(answer)
                }
                Ok(Step::Written { path, members, .. }) => {
                    return Outcome::Written { path, members }
                }
                Ok(Step::Deleted { path, .. }) => return Outcome::Deleted { path },
                Ok(Step::Cancelled { .. }) => return Outcome::Cancelled,
                Ok(Step::NothingToDelete { category }) => {
                    self.prompt
                        .acknowledge(&format!("No {} file exists to delete.", category));
                    return Outcome::NothingToDelete;
                }
                Err(e) => {
                    tracing::error!(code = e.code(), error = %e, "Request failed");
                    self.prompt.acknowledge(&e.notice());
                    return Outcome::Failed(e);
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::PathResolver;
    use crate::ledger::MemoryLedgerStore;
    use crate::prompt::Answer;

    /// Replays canned answers and records every message shown.
    #[derive(Default)]
    struct Scripted {
        answers: Vec<Answer>,
        asked: Vec<String>,
        notices: Vec<String>,
    }

    impl PromptService for Scripted {
        fn ask_yes_no(&mut self, message: &str) -> Answer {
            self.asked.push(message.to_string());
            if self.answers.is_empty() {
                Answer::Dismissed
            } else {
                self.answers.remove(0)
            }
        }

        fn acknowledge(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    fn session(
        root: &std::path::Path,
        answers: Vec<Answer>,
    ) -> Session<MemoryLedgerStore, Scripted> {
        let engine = ReconciliationEngine::new(
            PathResolver::new(root),
            MemoryLedgerStore::default(),
            "Gen",
        )
        .unwrap()
        .with_source(Category::Layer, || vec!["Default".to_string(), "UI".to_string()]);
        Session::new(
            engine,
            Scripted {
                answers,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_overwrite_prompt_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path(), vec![Answer::Yes]);

        assert!(matches!(
            session.generate(Category::Layer),
            Outcome::Written { members: 2, .. }
        ));
        assert!(session.prompt().asked.is_empty());

        assert!(matches!(
            session.generate(Category::Layer),
            Outcome::Written { .. }
        ));
        assert_eq!(session.prompt().asked.len(), 1);
        assert!(session.prompt().asked[0].contains("Overwrite"));
        assert!(!session.engine().is_busy());
    }

    #[test]
    fn test_failures_become_notices() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path(), vec![]);

        let outcome = session.generate(Category::Tag);
        assert!(outcome.is_failure());
        assert_eq!(session.prompt().notices.len(), 1);
        assert!(session.prompt().notices[0].starts_with("[NO_CONTENT]"));
    }

    #[test]
    fn test_nothing_to_delete_is_acknowledged() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path(), vec![]);

        assert!(matches!(
            session.delete(Category::SortingLayer),
            Outcome::NothingToDelete
        ));
        assert_eq!(
            session.prompt().notices,
            vec!["No SortingLayer file exists to delete.".to_string()]
        );
        assert!(session.prompt().asked.is_empty());
    }

    #[test]
    fn test_unknown_category_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path(), vec![]);

        let outcome = session.generate_named("material");
        assert!(matches!(outcome, Outcome::Failed(AppError::UndefinedCategory(_))));
        assert!(session.prompt().notices.is_empty());
        assert_eq!(session.engine().store().saves(), 0);
    }

    #[test]
    fn test_dismissed_delete_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path(), vec![]);

        let Outcome::Written { path, .. } = session.generate(Category::Layer) else {
            panic!("expected write");
        };
        assert!(matches!(session.delete(Category::Layer), Outcome::Cancelled));
        assert!(path.exists());
        assert_eq!(session.engine().ledger().path(Category::Layer), Some(path.as_path()));
    }
}
