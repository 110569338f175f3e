//! Package manager integration for installing and testing the project
//!
//! This module provides:
//! - The commands run against the project (`install`, `test`)
//! - Execution through a configured package manager binary
//!
//! The exit status is the only success signal. A command that cannot be
//! spawned is reported as a failed result rather than an error.

use std::fmt;
use std::path::Path;
use std::process::{Command, Output};

/// Package manager used when none is configured
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";

/// Command run against the project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManagerCommand {
    /// Install dependencies from the rewritten manifest
    Install,
    /// Run the project's test script
    Test,
}

impl PackageManagerCommand {
    /// Arguments passed to the package manager
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            PackageManagerCommand::Install => &["install"],
            PackageManagerCommand::Test => &["test"],
        }
    }
}

impl fmt::Display for PackageManagerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.args().join(" ").as_str())
    }
}

/// Result of a package manager invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// The command that was run
    pub command: PackageManagerCommand,
    /// Full command line, for display
    pub command_line: String,
    /// Whether the command succeeded
    pub success: bool,
    /// Exit code, if the process ran to completion
    pub exit_code: Option<i32>,
    /// Standard output from the command
    pub stdout: String,
    /// Standard error from the command
    pub stderr: String,
}

impl CommandResult {
    /// Create a result from a finished process
    pub fn from_output(
        command: PackageManagerCommand,
        command_line: String,
        output: &Output,
    ) -> Self {
        Self {
            command,
            command_line,
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Create a successful result
    pub fn success(command: PackageManagerCommand, command_line: impl Into<String>) -> Self {
        Self {
            command,
            command_line: command_line.into(),
            success: true,
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Create a failed result
    pub fn failure(
        command: PackageManagerCommand,
        command_line: impl Into<String>,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            command,
            command_line: command_line.into(),
            success: false,
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Trait for running package manager commands
pub trait PackageManagerRunner {
    /// Run a command in the specified directory
    fn run(&self, command: PackageManagerCommand, working_dir: &Path) -> CommandResult;
}

/// Runner that executes a real package manager binary
#[derive(Debug, Clone)]
pub struct SystemPackageManager {
    program: String,
}

impl SystemPackageManager {
    /// Create a runner for the given binary (`npm`, `yarn`, `pnpm`, ...)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The binary this runner invokes
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command_line(&self, command: PackageManagerCommand) -> String {
        format!("{} {}", self.program, command)
    }

    /// Run a command and capture output
    fn run_command(
        &self,
        command: PackageManagerCommand,
        working_dir: &Path,
    ) -> std::io::Result<Output> {
        Command::new(&self.program)
            .args(command.args())
            .current_dir(working_dir)
            .output()
    }
}

impl Default for SystemPackageManager {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE_MANAGER)
    }
}

impl PackageManagerRunner for SystemPackageManager {
    fn run(&self, command: PackageManagerCommand, working_dir: &Path) -> CommandResult {
        let command_line = self.command_line(command);

        match self.run_command(command, working_dir) {
            Ok(output) => CommandResult::from_output(command, command_line, &output),
            Err(e) => CommandResult::failure(
                command,
                command_line,
                None,
                format!("Failed to execute command: {}", e),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Mock runner recording the commands it receives
    struct MockPackageManager {
        fail_on: Option<PackageManagerCommand>,
        calls: RefCell<Vec<PackageManagerCommand>>,
    }

    impl MockPackageManager {
        fn new(fail_on: Option<PackageManagerCommand>) -> Self {
            Self {
                fail_on,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl PackageManagerRunner for MockPackageManager {
        fn run(&self, command: PackageManagerCommand, _working_dir: &Path) -> CommandResult {
            self.calls.borrow_mut().push(command);
            if self.fail_on == Some(command) {
                CommandResult::failure(command, "mock", Some(1), "failed")
            } else {
                CommandResult::success(command, "mock")
            }
        }
    }

    #[test]
    fn test_command_args() {
        assert_eq!(PackageManagerCommand::Install.args(), &["install"]);
        assert_eq!(PackageManagerCommand::Test.args(), &["test"]);
        assert_eq!(PackageManagerCommand::Test.to_string(), "test");
    }

    #[test]
    fn test_command_line() {
        let pm = SystemPackageManager::new("yarn");
        assert_eq!(pm.command_line(PackageManagerCommand::Install), "yarn install");
        assert_eq!(SystemPackageManager::default().program(), "npm");
    }

    #[test]
    fn test_command_result_success() {
        let result = CommandResult::success(PackageManagerCommand::Install, "npm install");
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.command_line, "npm install");
    }

    #[test]
    fn test_command_result_failure() {
        let result =
            CommandResult::failure(PackageManagerCommand::Test, "npm test", Some(1), "boom");
        assert!(!result.success);
        assert_eq!(result.stderr, "boom");
    }

    #[test]
    fn test_mock_records_calls() {
        let runner = MockPackageManager::new(Some(PackageManagerCommand::Test));
        let install = runner.run(PackageManagerCommand::Install, Path::new("."));
        let test = runner.run(PackageManagerCommand::Test, Path::new("."));

        assert!(install.success);
        assert!(!test.success);
        assert_eq!(
            *runner.calls.borrow(),
            vec![PackageManagerCommand::Install, PackageManagerCommand::Test]
        );
    }

    #[test]
    fn test_missing_binary_is_failed_result() {
        let dir = tempfile::tempdir().unwrap();
        let pm = SystemPackageManager::new("docusaurus-compat-no-such-binary");

        let result = pm.run(PackageManagerCommand::Install, dir.path());
        assert!(!result.success);
        assert_eq!(result.exit_code, None);
        assert!(result.stderr.contains("Failed to execute command"));
    }
}
