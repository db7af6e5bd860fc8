//! The conversion engine boundary
//!
//! The engine that parses headers and emits binding source is an external
//! collaborator reached through one synchronous call. This module owns only
//! the call boundary: the [`ConversionEngine`] trait, the placeholder
//! returned when no front-end is linked into the build, and a mock for
//! exercising the dispatcher in tests.

use std::sync::{Arc, Mutex};

use crate::error::{ForgeError, Result};
use crate::resolve::ResolvedTask;
use crate::task::ConverterMode;

/// One opaque, synchronous call into the external converter.
pub trait ConversionEngine {
    fn name(&self) -> &str;

    /// Run one fully resolved task. The outcome is propagated unchanged;
    /// callers add no retries and no partial-failure recovery.
    fn run_task(&self, task: &ResolvedTask) -> Result<()>;
}

/// Select the engine for a task's converter mode.
///
/// The real front-ends live outside this crate and are linked in by the
/// full generator build; a plain `bindforge` build gets a placeholder that
/// reports the missing link instead of silently producing nothing.
pub fn for_mode(mode: ConverterMode) -> Box<dyn ConversionEngine> {
    Box::new(UnlinkedEngine { mode })
}

struct UnlinkedEngine {
    mode: ConverterMode,
}

impl ConversionEngine for UnlinkedEngine {
    fn name(&self) -> &str {
        match self.mode {
            ConverterMode::Clang => "clang",
            ConverterMode::Ast => "ast",
        }
    }

    fn run_task(&self, task: &ResolvedTask) -> Result<()> {
        Err(ForgeError::Engine(format!(
            "no {} front-end is linked into this build (task '{}')",
            self.name(),
            task.name()
        )))
    }
}

/// Mock engine for tests: records every task it receives and returns
/// queued outcomes (FIFO), succeeding once the queue is empty.
#[derive(Clone, Default)]
pub struct MockEngine {
    outcomes: Arc<Mutex<Vec<Result<()>>>>,
    received: Arc<Mutex<Vec<String>>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next call.
    pub fn queue(&self, outcome: Result<()>) {
        self.outcomes.lock().unwrap().push(outcome);
    }

    /// Names of the tasks run so far, in order.
    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

impl ConversionEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn run_task(&self, task: &ResolvedTask) -> Result<()> {
        self.received.lock().unwrap().push(task.name().to_string());

        let mut queue = self.outcomes.lock().unwrap();
        if queue.is_empty() {
            Ok(())
        } else {
            queue.remove(0)
        }
    }
}
