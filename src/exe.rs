use std::{
    os::unix::process::ExitStatusExt,
    process::{Command, Output},
};

use anyhow::{anyhow, Context, Error};
use log::trace;

use crate::crate_private::Sealed;

/// Extension for `std::process::Output` to check exit status and produce
/// anyhow errors carrying the captured output.
pub trait OutputChecker: Sealed {
    fn is_success(&self) -> bool;

    /// Exit code, if the process exited normally.
    fn exit_code(&self) -> Option<i32>;

    /// Signal that terminated the process, if any.
    fn end_signal(&self) -> Option<i32>;

    fn output(&self) -> String;

    fn error_output(&self) -> String;

    /// All captured output, for error reporting.
    fn output_report(&self) -> String {
        let stdout = self.output();
        let stderr = self.error_output();

        let mut report = String::new();
        if !stdout.is_empty() {
            report += &format!("stdout:\n{stdout}\n");
        }
        if !stderr.is_empty() {
            if !report.is_empty() {
                report += "\n";
            }
            report += &format!("stderr:\n{stderr}\n");
        }
        report
    }

    fn explain_exit(&self) -> String {
        if let Some(code) = self.exit_code() {
            format!("process exited with status: {code}")
        } else if let Some(signal) = self.end_signal() {
            format!("process was terminated by signal: {signal}")
        } else {
            "process exited with unknown status".into()
        }
    }

    /// Produce an error if the process did not exit successfully.
    fn check(&self) -> Result<(), Error> {
        if self.is_success() {
            return Ok(());
        }

        Err(match self.output_report() {
            report if !report.is_empty() => {
                anyhow!("Process output:\n{report}").context(self.explain_exit())
            }
            _ => anyhow!("(No output was captured)").context(self.explain_exit()),
        })
    }

    /// Like [`OutputChecker::check`], but returns stdout on success.
    fn check_output(&self) -> Result<String, Error> {
        self.check()?;
        Ok(self.output())
    }
}

impl Sealed for Output {}

impl OutputChecker for Output {
    fn is_success(&self) -> bool {
        self.status.success()
    }

    fn exit_code(&self) -> Option<i32> {
        self.status.code()
    }

    fn end_signal(&self) -> Option<i32> {
        self.status.signal()
    }

    fn output(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into()
    }

    fn error_output(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into()
    }
}

/// Extension for `std::process::Command` to run a process and fail with a
/// descriptive error unless it exits successfully.
pub trait RunAndCheck: Sealed {
    fn run_and_check(&mut self) -> Result<(), Error>;
    fn output_and_check(&mut self) -> Result<String, Error>;
    fn render_command(&self) -> String;
}

impl Sealed for Command {}

impl RunAndCheck for Command {
    fn run_and_check(&mut self) -> Result<(), Error> {
        let rendered_command = self.render_command();
        trace!("Executing '{rendered_command}'");
        let output = self
            .output()
            .with_context(|| format!("Failed to execute: {rendered_command}"))?;
        trace!(
            "Executed '{rendered_command}': {}. Report:\n{}",
            output.explain_exit(),
            output.output_report(),
        );
        output
            .check()
            .with_context(|| format!("Error when running: {rendered_command}"))
    }

    fn output_and_check(&mut self) -> Result<String, Error> {
        let rendered_command = self.render_command();
        trace!("Executing '{rendered_command}'");
        let output = self
            .output()
            .with_context(|| format!("Failed to execute: {rendered_command}"))?;
        trace!(
            "Executed '{rendered_command}': {}. Report:\n{}",
            output.explain_exit(),
            output.output_report(),
        );
        output
            .check_output()
            .with_context(|| format!("Error when running: {rendered_command}"))
    }

    fn render_command(&self) -> String {
        if self.get_args().count() == 0 {
            self.get_program().to_string_lossy().into()
        } else {
            format!(
                "{} {}",
                self.get_program().to_string_lossy(),
                self.get_args()
                    .map(|arg| arg.to_string_lossy())
                    .map(|arg| if arg.contains(' ') {
                        format!("'{arg}'")
                    } else {
                        arg.into()
                    })
                    .collect::<Vec<_>>()
                    .join(" "),
            )
        }
    }
}
