//! Process runner backed by `std::process::Command`

use std::process::{Command, Stdio};

use crate::domain::ports::{CommandError, CommandOutput, CommandRunner, CommandSpec};

/// Spawns real processes on the local host
///
/// Commands with a `run_as` user are wrapped in `sudo -u <user> --`; their
/// environment is passed through `env` because sudo resets it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn build(spec: &CommandSpec) -> Command {
        match spec.run_as() {
            Some(user) => {
                let mut cmd = Command::new("sudo");
                cmd.args(["-u", user, "--"]);
                if !spec.envs().is_empty() {
                    cmd.arg("env");
                    cmd.args(spec.envs().iter().map(|(k, v)| format!("{k}={v}")));
                }
                cmd.arg(spec.program()).args(spec.arguments());
                cmd
            }
            None => {
                let mut cmd = Command::new(spec.program());
                cmd.args(spec.arguments())
                    .envs(spec.envs().iter().map(|(k, v)| (k, v)));
                cmd
            }
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        log::debug!("$ {spec}");

        let output = Self::build(spec)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CommandError::Spawn {
                command: spec.to_string(),
                source,
            })?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.stdout.is_empty() {
            log::trace!("stdout: {}", result.stdout.trim_end());
        }
        if !result.stderr.is_empty() {
            log::trace!("stderr: {}", result.stderr.trim_end());
        }
        if !result.is_success() {
            log::debug!("`{}` exited with {:?}", spec.program(), result.status);
        }

        Ok(result)
    }
}
