//! # Fan-out Join
//!
//! [`join_all`] issues a batch of independent async operations concurrently and waits for
//! every one of them to settle before returning. It is a full join, not a race: a failure
//! does not cancel the siblings that are still in flight.
//!
//! The outcome is all-or-none:
//! - every operation succeeded: the values, in the order the operations were given
//!   (not the order they completed);
//! - at least one failed: the first failure observed. Every later failure is logged at
//!   `warn` and dropped.

use crate::framework::FrameworkError;
use std::fmt::Display;
use std::future::Future;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Runs `operations` concurrently and joins them.
///
/// `label` names the batch in log output.
pub async fn join_all<T, E, F>(label: &str, operations: Vec<F>) -> Result<Vec<T>, E>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Display + From<FrameworkError> + Send + 'static,
{
    let total = operations.len();
    let mut in_flight = JoinSet::new();
    for (index, operation) in operations.into_iter().enumerate() {
        in_flight.spawn(async move { (index, operation.await) });
    }

    let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
    let mut first_error: Option<E> = None;

    while let Some(joined) = in_flight.join_next().await {
        let outcome = match joined {
            Ok((index, outcome)) => outcome.map(|value| (index, value)),
            Err(e) => Err(E::from(FrameworkError::TaskFailed(e.to_string()))),
        };
        match outcome {
            Ok((index, value)) => slots[index] = Some(value),
            Err(e) if first_error.is_none() => first_error = Some(e),
            Err(e) => warn!(batch = label, error = %e, "Additional failure in batch"),
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    debug!(batch = label, count = total, "Batch settled");
    slots
        .into_iter()
        .collect::<Option<Vec<T>>>()
        .ok_or_else(|| E::from(FrameworkError::TaskFailed(format!("{label}: missing result"))))
}
