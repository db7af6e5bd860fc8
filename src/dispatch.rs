//! Task dispatch
//!
//! A [`Dispatcher`] runs one resolved task end to end: it invokes the
//! conversion engine and measures wall-clock time from just before the call
//! to just after it returns, success or failure. It adds nothing else - no
//! retries, no result transformation; the engine's outcome passes through
//! unchanged.
//!
//! One invocation dispatches one task. A config collection may hold more
//! tasks than the first, but running a whole collection in one process is a
//! future extension point, not implemented behavior; the resolved base
//! directory already travels inside each task, so nothing here depends on
//! process-global state.

use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::engine::ConversionEngine;
use crate::error::Result;
use crate::resolve::ResolvedTask;

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub elapsed: Duration,
}

impl RunReport {
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

pub struct Dispatcher {
    engine: Box<dyn ConversionEngine>,
}

impl Dispatcher {
    pub fn new(engine: Box<dyn ConversionEngine>) -> Self {
        Self { engine }
    }

    /// Run one resolved task through the engine.
    pub fn run(&self, task: &ResolvedTask) -> Result<RunReport> {
        info!(
            task = task.name(),
            engine = self.engine.name(),
            "dispatching task"
        );

        let started = Instant::now();
        let outcome = self.engine.run_task(task);
        let elapsed = started.elapsed();

        match outcome {
            Ok(()) => {
                info!(task = task.name(), ?elapsed, "task finished");
                Ok(RunReport { elapsed })
            }
            Err(err) => {
                error!(task = task.name(), ?elapsed, %err, "task failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MockEngine;
    use crate::error::ForgeError;
    use crate::task::BindTask;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn resolved(name: &str) -> ResolvedTask {
        ResolvedTask {
            task: BindTask {
                name: name.into(),
                sources: vec!["api.h".into()],
                ..Default::default()
            },
            base_dir: PathBuf::from("/work"),
            type_map: BTreeMap::new(),
        }
    }

    #[test]
    fn test_run_reports_elapsed_time() {
        let engine = MockEngine::new();
        let dispatcher = Dispatcher::new(Box::new(engine.clone()));

        let report = dispatcher.run(&resolved("webgpu")).unwrap();
        assert!(report.seconds() >= 0.0);
        assert_eq!(engine.received(), vec!["webgpu"]);
    }

    #[test]
    fn test_engine_failure_passes_through_unchanged() {
        let engine = MockEngine::new();
        engine.queue(Err(ForgeError::Engine("parse blew up".into())));
        let dispatcher = Dispatcher::new(Box::new(engine));

        match dispatcher.run(&resolved("webgpu")).unwrap_err() {
            ForgeError::Engine(message) => assert_eq!(message, "parse blew up"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
