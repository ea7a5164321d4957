//! Retry executor shared by every probe strategy.
//!
//! An attempt is any async operation returning `Result<(), String>`.
//! [`with_retries`] runs it up to `retries + 1` times back to back and
//! stops at the first success. There is no delay between attempts: each
//! attempt already waits up to the full probe timeout.

use std::future::Future;

/// Outcome of a single attempt.
#[derive(Debug)]
pub enum Attempt {
    /// Failed, and trying again may help.
    Retry(String),
    /// Failed in a way another attempt cannot fix.
    Abort(String),
}

impl From<String> for Attempt {
    fn from(message: String) -> Self {
        Self::Retry(message)
    }
}

/// Run `operation` until it succeeds or `retries + 1` attempts are spent.
///
/// The closure receives the 1-based attempt number. On exhaustion the
/// error of the last attempt is returned.
pub async fn with_retries<F, Fut>(retries: u32, mut operation: F) -> Result<(), String>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<(), Attempt>>,
{
    let attempts = retries.saturating_add(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(()) => return Ok(()),
            Err(Attempt::Abort(err)) => return Err(err),
            Err(Attempt::Retry(err)) => {
                if attempt >= attempts {
                    return Err(err);
                }
                tracing::debug!(attempt, attempts, error = %err, "attempt failed, retrying");
                attempt += 1;
            }
        }
    }
}
