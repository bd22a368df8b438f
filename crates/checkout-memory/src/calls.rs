use std::sync::Arc;

use checkout_types::ports::GatewayError;
use dashmap::DashMap;

/// Per-operation call counts and injected failures.
#[derive(Clone, Default)]
pub struct CallLog {
    counts: Arc<DashMap<&'static str, usize>>,
    faults: Arc<DashMap<&'static str, GatewayError>>,
}

impl CallLog {
    pub(crate) fn record(&self, op: &'static str) -> Result<(), GatewayError> {
        *self.counts.entry(op).or_insert(0) += 1;
        match self.faults.get(op) {
            Some(err) => {
                tracing::debug!(op, "injected failure");
                Err(err.clone())
            }
            None => Ok(()),
        }
    }

    pub fn count(&self, op: &str) -> usize {
        self.counts.get(op).map(|c| *c).unwrap_or(0)
    }

    /// Makes every later call to `op` fail with `err`.
    pub fn fail(&self, op: &'static str, err: GatewayError) {
        self.faults.insert(op, err);
    }

    pub fn heal(&self, op: &str) {
        self.faults.remove(op);
    }
}
