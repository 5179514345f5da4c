//! Cooperative cancellation

use std::sync::atomic::{AtomicBool, Ordering};

/// Returned when a run is stopped through its cancellation flag
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("analysis was cancelled")]
pub struct Cancelled;

/// Fail with `Cancelled` once the flag has been raised
#[inline]
pub(crate) fn check(flag: Option<&AtomicBool>) -> Result<(), Cancelled> {
    match flag {
        Some(flag) if flag.load(Ordering::Relaxed) => Err(Cancelled),
        _ => Ok(()),
    }
}
