//! The pluggable concurrency capability consumed by the executor.
//!
//! The executor never spawns threads or picks a scheduling order itself.
//! Instead it batches the independent field tasks of one selection-set
//! level into a group and hands the group to the [`Runtime`], which
//! decides how to run it: in order on the calling thread
//! ([`BlockingRuntime`]), through a single-threaded FIFO scheduler
//! ([`CooperativeRuntime`]), or on a work-stealing thread pool
//! ([`ThreadPoolRuntime`]).
//!
//! Mutation root fields never go through a runtime group; the executor
//! runs them strictly serially regardless of runtime.

mod blocking;
mod cooperative;
mod thread_pool;

pub use blocking::BlockingRuntime;
pub use cooperative::CooperativeRuntime;
pub use thread_pool::ThreadPoolRuntime;

use crate::Value;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Outcome of one field task within a group.
#[derive(Debug)]
pub enum FieldOutcome {
    /// The field completed to this value (possibly `Null` after a handled
    /// error).
    Value(Value),
    /// A non-nullable field failed; the null propagates to the enclosing
    /// selection set. The error was already recorded.
    PropagateNull,
}

/// One independent unit of field execution. Tasks in a group share no
/// mutable state and may run in any order, or in parallel.
pub type FieldTask<'a> = Box<dyn FnOnce() -> FieldOutcome + Send + 'a>;

/// A concurrency capability.
///
/// `run_group` receives the independent field tasks of one selection-set
/// level and must return their outcomes in input order. Implementations
/// may run tasks however they like; tasks recursively produce further
/// groups (subselections), so nested `run_group` calls must be supported.
pub trait Runtime: Send + Sync {
    fn name(&self) -> &'static str;

    fn run_group<'a>(&self, tasks: Vec<FieldTask<'a>>) -> Vec<FieldOutcome>;

    /// The runtime's cancellation token, if it exposes one. The executor
    /// checks it at each field boundary and stops dispatching new
    /// resolvers once it trips; in-flight resolvers run to completion.
    fn cancel_token(&self) -> Option<&CancelToken> {
        None
    }
}

/// A cooperative cancellation token. Cancelling is a one-way latch.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
