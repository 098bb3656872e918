//! Bounded retry with linear backoff.

use std::io;
use std::path::Path;
use std::thread;

use icongen_core::RetryPolicy;

/// Runs `operation` until it succeeds or the policy's attempts run out.
///
/// Sleeps `policy.delay_after(n)` after failed attempt `n`. Returns the last
/// error together with the number of attempts made.
///
/// # Errors
///
/// Returns the error of the final attempt once `max_attempts` is exhausted.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::io;
/// use std::path::Path;
/// use icongen_core::RetryPolicy;
/// use icongen_files::retry::with_retry;
///
/// let calls = Cell::new(0);
/// let result = with_retry(&RetryPolicy::new(3, 0), "write", Path::new("a.razor"), || {
///     calls.set(calls.get() + 1);
///     if calls.get() < 3 {
///         Err(io::Error::other("busy"))
///     } else {
///         Ok(())
///     }
/// });
///
/// assert!(result.is_ok());
/// assert_eq!(calls.get(), 3);
/// ```
pub fn with_retry<T, F>(
    policy: &RetryPolicy,
    operation: &str,
    path: &Path,
    mut f: F,
) -> Result<T, (io::Error, u32)>
where
    F: FnMut() -> io::Result<T>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match f() {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    operation,
                    path = %path.display(),
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis(),
                    error = %e,
                    "filesystem operation failed, retrying"
                );
                thread::sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err((e, attempt)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::{Duration, Instant};

    fn busy() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "file in use")
    }

    #[test]
    fn test_succeeds_first_try() {
        let calls = Cell::new(0);
        let result = with_retry(&RetryPolicy::default(), "write", Path::new("x"), || {
            calls.set(calls.get() + 1);
            Ok(42)
        });

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_exhaustion_returns_last_error_and_attempts() {
        let calls = Cell::new(0);
        let result: Result<(), _> =
            with_retry(&RetryPolicy::new(3, 0), "delete", Path::new("x"), || {
                calls.set(calls.get() + 1);
                Err(busy())
            });

        let (err, attempts) = result.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(attempts, 3);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let calls = Cell::new(0);
        let _ = with_retry(&RetryPolicy::new(0, 0), "write", Path::new("x"), || {
            calls.set(calls.get() + 1);
            Err::<(), _>(busy())
        });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_linear_backoff_is_applied() {
        let calls = Cell::new(0);
        let start = Instant::now();
        let result = with_retry(&RetryPolicy::new(3, 10), "write", Path::new("x"), || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 { Err(busy()) } else { Ok(()) }
        });

        assert!(result.is_ok());
        // 10ms after the first failure, 20ms after the second
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
