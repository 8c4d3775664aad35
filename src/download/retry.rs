//! Pass-based retry driver.
//!
//! URLs are attempted in order. Every URL that fails is collected, a fixed
//! delay is applied, and the next URL is tried. After a full pass only the
//! failed URLs are attempted again, up to a bounded number of passes.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::config::Config;
use crate::download::state::RunReport;
use crate::error::{Error, Result};

/// Default number of passes over the failing URLs.
pub const DEFAULT_MAX_PASSES: u32 = 3;

/// Default pause after a failed URL.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Drives an action over a list of URLs with bounded retries.
#[derive(Debug, Clone)]
pub struct RetryDriver {
    max_passes: u32,
    delay: Duration,
}

impl Default for RetryDriver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PASSES, DEFAULT_RETRY_DELAY)
    }
}

impl RetryDriver {
    /// `max_passes` is clamped to at least one.
    pub fn new(max_passes: u32, delay: Duration) -> Self {
        Self {
            max_passes: max_passes.max(1),
            delay,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.options.max_passes, config.retry_delay())
    }

    pub fn max_passes(&self) -> u32 {
        self.max_passes
    }

    /// Run `action` over `urls` until every URL succeeded or the pass budget
    /// is spent.
    ///
    /// A URL that succeeded is never attempted again. On exhaustion the
    /// URLs still failing are returned in their original order inside
    /// [`Error::RetryExhausted`].
    pub async fn run<F, Fut>(&self, urls: &[String], mut action: F) -> Result<RunReport>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let mut report = RunReport::new(urls.len());
        let mut pending: Vec<String> = urls.to_vec();

        if pending.is_empty() {
            tracing::info!("Nothing to download");
            return Ok(report);
        }

        for pass in 1..=self.max_passes {
            report.passes = pass;
            let mut failed = Vec::new();
            let count = pending.len();

            if pass > 1 {
                tracing::info!(
                    "Retrying {} failed URL(s) (pass {}/{})",
                    count,
                    pass,
                    self.max_passes
                );
            }

            for (index, url) in pending.into_iter().enumerate() {
                tracing::info!("[{}/{}] Downloading {}", index + 1, count, url);
                report.record_attempt();

                match action(url.clone()).await {
                    Ok(()) => report.record_success(url),
                    Err(e) => {
                        tracing::error!(
                            "Failed to download {}: {}. Trying again in {} seconds...",
                            url,
                            e,
                            self.delay.as_secs()
                        );
                        tracing::debug!("{:?}", e);
                        failed.push(url);
                        if !self.delay.is_zero() {
                            sleep(self.delay).await;
                        }
                    }
                }
            }

            if failed.is_empty() {
                return Ok(report);
            }

            pending = failed;
        }

        tracing::error!(
            "Aborting download after {} consecutive failed passes",
            self.max_passes
        );
        tracing::info!(
            "{} of {} URL(s) downloaded",
            report.succeeded.len(),
            report.total
        );

        Err(Error::RetryExhausted { failed: pending })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn fail(url: &str) -> Error {
        Error::Fetch {
            url: url.to_string(),
            message: "unavailable".to_string(),
        }
    }

    #[tokio::test]
    async fn test_all_succeed_in_one_pass() {
        let driver = RetryDriver::new(3, Duration::ZERO);
        let mut calls = Vec::new();

        let report = driver
            .run(&urls(&["a", "b", "c"]), |url| {
                calls.push(url);
                async { Ok::<(), Error>(()) }
            })
            .await
            .unwrap();

        assert_eq!(calls, urls(&["a", "b", "c"]));
        assert_eq!(report.passes, 1);
        assert_eq!(report.attempts, 3);
        assert_eq!(report.succeeded, urls(&["a", "b", "c"]));
    }

    #[tokio::test]
    async fn test_only_failed_urls_are_retried() {
        let driver = RetryDriver::new(3, Duration::ZERO);
        let mut attempts: HashMap<String, u32> = HashMap::new();

        let report = driver
            .run(&urls(&["ok", "flaky", "ok2"]), |url| {
                let n = attempts.entry(url.clone()).or_default();
                *n += 1;
                let result = if url == "flaky" && *n < 2 {
                    Err(fail(&url))
                } else {
                    Ok(())
                };
                async move { result }
            })
            .await
            .unwrap();

        assert_eq!(attempts["ok"], 1);
        assert_eq!(attempts["ok2"], 1);
        assert_eq!(attempts["flaky"], 2);
        assert_eq!(report.passes, 2);
        assert_eq!(report.attempts, 4);
        assert_eq!(report.failed_attempts(), 1);
        assert_eq!(report.succeeded, urls(&["ok", "ok2", "flaky"]));
    }

    #[tokio::test]
    async fn test_exhaustion_names_still_failing_urls() {
        let driver = RetryDriver::new(3, Duration::ZERO);
        let mut attempts: HashMap<String, u32> = HashMap::new();

        let result = driver
            .run(&urls(&["bad1", "good", "bad2"]), |url| {
                *attempts.entry(url.clone()).or_default() += 1;
                let result = if url.starts_with("bad") {
                    Err(fail(&url))
                } else {
                    Ok(())
                };
                async move { result }
            })
            .await;

        match result {
            Err(Error::RetryExhausted { failed }) => {
                assert_eq!(failed, urls(&["bad1", "bad2"]));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert_eq!(attempts["bad1"], 3);
        assert_eq!(attempts["bad2"], 3);
        assert_eq!(attempts["good"], 1);
    }

    #[tokio::test]
    async fn test_attempts_bounded_by_max_passes() {
        for max_passes in 1..=4 {
            let driver = RetryDriver::new(max_passes, Duration::ZERO);
            let mut calls = 0u32;
            let result = driver
                .run(&urls(&["x"]), |url| {
                    calls += 1;
                    async move { Err::<(), _>(fail(&url)) }
                })
                .await;
            assert!(result.is_err());
            assert_eq!(calls, max_passes);
        }
    }

    #[tokio::test]
    async fn test_zero_passes_clamped_to_one() {
        let driver = RetryDriver::new(0, Duration::ZERO);
        assert_eq!(driver.max_passes(), 1);

        let mut calls = 0;
        let _ = driver
            .run(&urls(&["x"]), |url| {
                calls += 1;
                async move { Err::<(), _>(fail(&url)) }
            })
            .await;
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let driver = RetryDriver::default();
        let report = driver
            .run(&[], |_url| async { Ok::<(), Error>(()) })
            .await
            .unwrap();
        assert_eq!(report.passes, 0);
        assert_eq!(report.attempts, 0);
    }

    #[tokio::test]
    async fn test_delay_applied_after_failure() {
        let driver = RetryDriver::new(1, Duration::from_millis(50));
        let start = std::time::Instant::now();
        let _ = driver
            .run(&urls(&["x", "y"]), |url| async move { Err::<(), _>(fail(&url)) })
            .await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
