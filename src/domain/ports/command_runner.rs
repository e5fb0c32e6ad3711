//! CommandRunner port - abstraction over external tool invocation
//!
//! Every interaction with the package manager, database, service manager,
//! web server and firewall goes through this trait, so stages can be driven
//! against a fake host in tests.

use std::fmt;

use thiserror::Error;

/// A single external command, described as data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
    run_as: Option<String>,
    read_only: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            run_as: None,
            read_only: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Run as another OS user (`sudo -u <user>`)
    pub fn as_user(mut self, user: impl Into<String>) -> Self {
        self.run_as = Some(user.into());
        self
    }

    /// Mark as a probe that never mutates the host
    ///
    /// Dry runs execute read-only commands and only record the others.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn envs(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn run_as(&self) -> Option<&str> {
        self.run_as.as_deref()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Program followed by arguments, without the `sudo` wrapper
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(user) = &self.run_as {
            write!(f, "sudo -u {user} ")?;
        }
        for (key, value) in &self.env {
            write!(f, "{key}={value} ")?;
        }
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('\'') {
                write!(f, " '{}'", arg.replace('\'', r"'\''"))?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }

    /// Trimmed stdout
    pub fn text(&self) -> &str {
        self.stdout.trim()
    }
}

/// Command execution errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started at all
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited non-zero
    #[error("`{command}` exited with status {}: {}", display_status(.status), .stderr.trim())]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

fn display_status(status: &Option<i32>) -> String {
    status.map_or_else(|| "signal".to_string(), |code| code.to_string())
}

/// Abstract process runner
///
/// Implementations:
/// - `SystemRunner` - spawns real processes
/// - `DryRunRunner` - executes probes, records mutations
/// - test fakes that script a host
pub trait CommandRunner {
    /// Run the command and capture its output, whatever the exit status
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError>;

    /// Run the command and treat a non-zero exit as an error
    fn check(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        let output = self.run(spec)?;
        if output.is_success() {
            Ok(output)
        } else {
            Err(CommandError::Failed {
                command: spec.to_string(),
                status: output.status,
                stderr: output.stderr,
            })
        }
    }

    /// Probe: true when the command runs and exits zero
    fn succeeds(&self, spec: &CommandSpec) -> bool {
        self.run(spec).map(|o| o.is_success()).unwrap_or(false)
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        (**self).run(spec)
    }
}
