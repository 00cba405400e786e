use crate::runtime::CancelToken;
use crate::runtime::FieldOutcome;
use crate::runtime::FieldTask;
use crate::runtime::Runtime;

/// The simplest runtime: tasks run eagerly, in order, on the calling
/// thread. No parallelism, no interleaving. The right choice for simple
/// embeddings and tests.
#[derive(Debug, Default)]
pub struct BlockingRuntime {
    cancel_token: Option<CancelToken>,
}

impl BlockingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel_token(cancel_token: CancelToken) -> Self {
        Self {
            cancel_token: Some(cancel_token),
        }
    }
}

impl Runtime for BlockingRuntime {
    fn name(&self) -> &'static str {
        "blocking"
    }

    fn run_group<'a>(&self, tasks: Vec<FieldTask<'a>>) -> Vec<FieldOutcome> {
        tasks.into_iter().map(|task| task()).collect()
    }

    fn cancel_token(&self) -> Option<&CancelToken> {
        self.cancel_token.as_ref()
    }
}
