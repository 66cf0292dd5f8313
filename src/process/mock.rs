use std::sync::Mutex;

use crate::error::{PublishError, Result};
use crate::process::{CommandRunner, ExitOutcome, Invocation};

/// Records invocations instead of running them
///
/// Each program can be given a scripted outcome; anything unscripted succeeds.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    outcomes: Vec<(String, ExitOutcome)>,
    unstartable: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish every invocation of `program` with `outcome`
    pub fn with_outcome(mut self, program: impl Into<String>, outcome: ExitOutcome) -> Self {
        self.outcomes.push((program.into(), outcome));
        self
    }

    /// Fail to start `program`, as if it were not installed
    pub fn with_missing_program(mut self, program: impl Into<String>) -> Self {
        self.unstartable.push(program.into());
        self
    }

    /// Invocations seen so far, in order
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<ExitOutcome> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(invocation.clone());

        if self.unstartable.contains(&invocation.program) {
            return Err(PublishError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{}: command not found", invocation.program),
            )));
        }

        Ok(self
            .outcomes
            .iter()
            .find(|(program, _)| *program == invocation.program)
            .map(|(_, outcome)| *outcome)
            .unwrap_or_else(ExitOutcome::success))
    }
}
