//! Local provider — answers via an external command-line executable.
//!
//! The configured command is invoked with the user's message as its final
//! argument, with the vault root as working directory. Stdout (ANSI
//! escape sequences stripped) is the reply channel. A wall-clock timeout
//! and an output-size ceiling bound the external process; exceeding
//! either is a failure, not a hang.

use async_trait::async_trait;
use notewright_core::error::ProviderError;
use notewright_core::provider::{ChatRequest, Provider};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_OUTPUT_CAP: usize = 10 * 1024 * 1024;

/// A provider backed by a local executable.
pub struct LocalProvider {
    name: String,
    /// Program plus any fixed leading arguments (e.g. "opencode run").
    program: String,
    base_args: Vec<String>,
    workdir: Option<PathBuf>,
    timeout: Duration,
    output_cap: usize,
}

impl LocalProvider {
    /// Create a local provider from a command line such as "opencode run".
    /// The user message is appended as the final argument at call time.
    pub fn new(command: &str, workdir: Option<PathBuf>) -> Self {
        let mut parts = command.split_whitespace().map(String::from);
        let program = parts.next().unwrap_or_default();
        let base_args: Vec<String> = parts.collect();

        Self {
            name: "local".into(),
            program,
            base_args,
            workdir,
            timeout: DEFAULT_TIMEOUT,
            output_cap: DEFAULT_OUTPUT_CAP,
        }
    }

    /// Override the wall-clock timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the output-size ceiling in bytes.
    pub fn with_output_cap(mut self, cap: usize) -> Self {
        self.output_cap = cap;
        self
    }
}

#[async_trait]
impl Provider for LocalProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError> {
        if self.program.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Local command is not set".into(),
            ));
        }

        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(&self.base_args)
            .arg(&request.user_message)
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        debug!(program = %self.program, "Invoking local executable");

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                ProviderError::Timeout(format!(
                    "'{}' did not finish within {}s",
                    self.program,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| ProviderError::Process(format!("Failed to run '{}': {e}", self.program)))?;

        if output.stdout.len() + output.stderr.len() > self.output_cap {
            return Err(ProviderError::OutputTooLarge {
                limit: self.output_cap,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let cleaned = strip_ansi(&stdout).trim().to_string();

        // A non-zero exit that still produced output is treated as a valid
        // reply; only a silent failure is surfaced as an error.
        if !cleaned.is_empty() {
            return Ok(cleaned);
        }
        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(program = %self.program, exit_code = code, "Local executable failed with no output");
            return Err(ProviderError::Process(format!(
                "'{}' exited with code {code}: {stderr}",
                self.program
            )));
        }

        Ok(cleaned)
    }
}

/// Remove SGR color sequences (`ESC [ … m`) from terminal output.
/// Unterminated sequences are left untouched.
fn strip_ansi(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == 0x1b && i + 1 < bytes.len() && bytes[i + 1] == b'[' {
            let mut j = i + 2;
            while j < bytes.len() && (bytes[j].is_ascii_digit() || bytes[j] == b';') {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'm' {
                i = j + 1;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}
