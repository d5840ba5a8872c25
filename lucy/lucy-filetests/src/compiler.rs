//! The compiler under test.
//!
//! The harness only needs one capability from the compiler: turn a case file
//! into an IR file. [`Compiler`] is that seam; [`ExternalCompiler`] runs the
//! real executable and tests plug in fakes.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{CompilerCommand, HarnessConfig};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of running the compiler on one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub status: InvocationStatus,
    /// The IR file, if the compiler succeeded and the file exists
    pub artifact: Option<PathBuf>,
}

impl Invocation {
    pub fn succeeded(artifact: Option<PathBuf>) -> Self {
        Self {
            status: InvocationStatus::Succeeded,
            artifact,
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            status: InvocationStatus::Failed(detail.into()),
            artifact: None,
        }
    }

    pub fn timed_out(after: Duration) -> Self {
        Self {
            status: InvocationStatus::TimedOut(after),
            artifact: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationStatus {
    /// Exited with status 0
    Succeeded,
    /// Exited non-zero, was killed by a signal, or could not be started
    Failed(String),
    /// Killed after running longer than the timeout
    TimedOut(Duration),
}

/// Anything that can compile a case file to IR.
pub trait Compiler {
    /// Compile `case_path`, blocking until done.
    fn compile(&self, case_path: &Path) -> Invocation;
}

/// Runs the compiler executable as a child process.
#[derive(Debug, Clone)]
pub struct ExternalCompiler {
    command: CompilerCommand,
    output_extension: String,
    timeout: Option<Duration>,
}

impl ExternalCompiler {
    pub fn new(command: CompilerCommand, output_extension: impl Into<String>) -> Self {
        Self {
            command,
            output_extension: output_extension.into(),
            timeout: None,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.compiler.clone(), config.output_extension.clone())
            .with_timeout(config.timeout)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the command for `case_path`.
    ///
    /// The child runs inside the case's directory and is given the bare file
    /// name, so the IR file lands next to the case.
    fn command_for(&self, case_path: &Path) -> Command {
        let dir = case_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let file_name = case_path.file_name().unwrap_or(case_path.as_os_str());

        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.prefix_args)
            .arg("-c")
            .arg(file_name)
            .arg("--emit-ir")
            .arg(&self.command.backend_flag)
            .current_dir(dir);
        cmd
    }
}

impl Compiler for ExternalCompiler {
    fn compile(&self, case_path: &Path) -> Invocation {
        let mut cmd = self.command_for(case_path);
        log::debug!("running {cmd:?}");

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return Invocation::failed(format!(
                    "failed to start {}: {e}",
                    Path::new(&self.command.program).display()
                ));
            }
        };

        match wait_with_timeout(&mut child, self.timeout) {
            Ok(Some(status)) if status.success() => {
                let artifact = case_path.with_extension(&self.output_extension);
                Invocation::succeeded(artifact.is_file().then_some(artifact))
            }
            Ok(Some(status)) => Invocation::failed(describe_status(status)),
            Ok(None) => Invocation::timed_out(self.timeout.unwrap_or_default()),
            Err(e) => Invocation::failed(format!("failed to wait for compiler: {e}")),
        }
    }
}

/// Wait for `child`, killing it once `timeout` has elapsed.
///
/// Returns `Ok(None)` if the child was killed.
fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> io::Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return child.wait().map(Some);
    };

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            log::debug!("compiler exceeded {timeout:?}, killing pid {}", child.id());
            // The child may have exited between try_wait and kill
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("compiler exited with status {code}"),
        None => format!("compiler terminated abnormally ({status})"),
    }
}
