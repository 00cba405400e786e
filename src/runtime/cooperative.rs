use crate::runtime::CancelToken;
use crate::runtime::FieldOutcome;
use crate::runtime::FieldTask;
use crate::runtime::Runtime;

/// A single-threaded cooperative scheduler.
///
/// Each group forms a FIFO batch: every task of the group is admitted
/// before the first one runs, and tasks run to completion one at a time on
/// the calling thread. Yield points sit at group boundaries: a task's
/// nested groups are scheduled as their own batches. No resolver ever
/// overlaps another, which makes this runtime safe for resolvers touching
/// thread-unfriendly state while still exercising the executor's group
/// machinery.
#[derive(Debug, Default)]
pub struct CooperativeRuntime {
    cancel_token: Option<CancelToken>,
}

impl CooperativeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel_token(cancel_token: CancelToken) -> Self {
        Self {
            cancel_token: Some(cancel_token),
        }
    }
}

impl Runtime for CooperativeRuntime {
    fn name(&self) -> &'static str {
        "cooperative"
    }

    fn run_group<'a>(&self, tasks: Vec<FieldTask<'a>>) -> Vec<FieldOutcome> {
        // FIFO admission, run-to-completion. Nested groups drain before
        // their parent task returns, preserving single-threaded execution.
        let mut queue: std::collections::VecDeque<FieldTask<'a>> = tasks.into();
        let mut outcomes = Vec::with_capacity(queue.len());
        while let Some(task) = queue.pop_front() {
            outcomes.push(task());
        }
        outcomes
    }

    fn cancel_token(&self) -> Option<&CancelToken> {
        self.cancel_token.as_ref()
    }
}
