//! Running external tools (yt-dlp, ffmpeg) as subprocesses.

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;

/// Captured result of a finished process.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Last `lines` non-empty lines of stderr, joined with `; `.
    pub fn stderr_tail(&self, lines: usize) -> String {
        let tail: Vec<&str> = self
            .stderr
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let start = tail.len().saturating_sub(lines);
        tail[start..].join("; ")
    }
}

/// Run `program` with `args` to completion, capturing both output streams.
///
/// The child is killed if `timeout` elapses first, which is reported as
/// [`io::ErrorKind::TimedOut`]. A missing binary surfaces as
/// [`io::ErrorKind::NotFound`].
pub async fn run_tool<I, S>(
    program: &Path,
    args: I,
    timeout: Option<Duration>,
) -> io::Result<ToolOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    tracing::debug!("Running {:?}", command);

    let output = match timeout {
        Some(limit) => tokio::time::timeout(limit, command.output())
            .await
            .map_err(|_| {
                io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!(
                        "{} timed out after {}s",
                        program.display(),
                        limit.as_secs()
                    ),
                )
            })??,
        None => command.output().await?,
    };

    Ok(ToolOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_missing_binary_is_not_found() {
        let result = run_tool(
            &PathBuf::from("/nonexistent/definitely-not-a-tool"),
            ["--version"],
            None,
        )
        .await;
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_output_and_status() {
        let output = run_tool(
            Path::new("sh"),
            ["-c", "echo out; echo first >&2; echo second >&2; exit 3"],
            Some(Duration::from_secs(10)),
        )
        .await
        .unwrap();

        assert!(!output.success());
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr_tail(1), "second");
        assert_eq!(output.stderr_tail(5), "first; second");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_child() {
        let result = run_tool(Path::new("sleep"), ["5"], Some(Duration::from_millis(100))).await;
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::TimedOut);
    }
}
