//! Download run bookkeeping.

/// Outcome of a completed retry run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of URLs handed to the driver.
    pub total: usize,

    /// URLs that eventually succeeded, in completion order.
    pub succeeded: Vec<String>,

    /// Number of passes performed.
    pub passes: u32,

    /// Number of individual download attempts.
    pub attempts: u32,
}

impl RunReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Attempts that did not succeed.
    pub fn failed_attempts(&self) -> u32 {
        self.attempts - self.succeeded.len() as u32
    }

    pub fn record_success(&mut self, url: String) {
        self.succeeded.push(url);
    }

    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }
}
