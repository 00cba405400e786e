use crate::runtime::CancelToken;
use crate::runtime::FieldOutcome;
use crate::runtime::FieldTask;
use crate::runtime::Runtime;
use rayon::prelude::IntoParallelIterator;
use rayon::prelude::ParallelIterator;

/// A bounded-thread-pool runtime backed by rayon.
///
/// Tasks within a group may run in parallel with one another; nested
/// groups ride the same pool via work stealing, so deep selection sets
/// don't exhaust threads. The executor guarantees tasks share no mutable
/// state, and it never mutates resolver-provided values, so resolver
/// results only need to be `Send`.
pub struct ThreadPoolRuntime {
    pool: rayon::ThreadPool,
    cancel_token: Option<CancelToken>,
}

impl ThreadPoolRuntime {
    /// Builds a runtime with `num_threads` pool threads (0 lets rayon pick
    /// one per core).
    pub fn new(num_threads: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        Ok(Self {
            pool: rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()?,
            cancel_token: None,
        })
    }

    pub fn with_cancel_token(mut self, cancel_token: CancelToken) -> Self {
        self.cancel_token = Some(cancel_token);
        self
    }
}

impl std::fmt::Debug for ThreadPoolRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPoolRuntime")
            .field("threads", &self.pool.current_num_threads())
            .finish_non_exhaustive()
    }
}

impl Runtime for ThreadPoolRuntime {
    fn name(&self) -> &'static str {
        "thread-pool"
    }

    fn run_group<'a>(&self, tasks: Vec<FieldTask<'a>>) -> Vec<FieldOutcome> {
        self.pool
            .install(|| tasks.into_par_iter().map(|task| task()).collect())
    }

    fn cancel_token(&self) -> Option<&CancelToken> {
        self.cancel_token.as_ref()
    }
}
