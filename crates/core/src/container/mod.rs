//! Container commands
//!
//! Each command takes a request parsed from positional arguments, drives a
//! [`ContainerStore`](crate::ContainerStore) through a fixed sequence of remote
//! calls and returns a report. Arguments 0 and 1 hold the program and command
//! names; command arguments start at index 2.

use std::fmt::Display;

use serde::Serialize;

use crate::error::{Error, Result};

pub mod create;
pub mod delete;
pub mod inspect;
pub mod list;
pub mod rename;
pub mod update;

pub use create::{CreateReport, CreateRequest, create_container};
pub use delete::{DeleteReport, DeleteRequest, delete_container};
pub use inspect::{InspectReport, InspectRequest, inspect_container};
pub use list::{ListReport, ListRequest, list_containers};
pub use rename::{RenameReport, RenameRequest, rename_container};
pub use update::{UpdateReport, UpdateRequest, update_container};

/// ANSI sequence clearing the current terminal line
pub const CLEAR_LINE: &str = "\x1b[2K";

/// Flag requesting that a container's objects are deleted with it
pub const FORCE_FLAG: &str = "-f";

/// Result of a successful container command
pub trait Report: Display + Serialize {
    /// Render the report as the line-clearing, `OK`-prefixed message
    fn render(&self) -> String {
        ok_message(self)
    }
}

/// Prefix a message body with a cleared line and a green `OK`
pub fn ok_message(body: &(impl Display + ?Sized)) -> String {
    format!(
        "\r{CLEAR_LINE}{}\n\n{body}\n",
        console::style("OK").green()
    )
}

/// Fetch a required positional argument
fn required_arg(args: &[String], index: usize, name: &'static str) -> Result<String> {
    args.get(index)
        .cloned()
        .ok_or(Error::MissingArgument { name })
}

/// Fetch a required container name argument
fn container_arg(args: &[String], index: usize, name: &'static str) -> Result<String> {
    let container = required_arg(args, index, name)?;
    check_container_name(&container)?;
    Ok(container)
}

/// Reject container names that collapse when placed in a URL path
pub fn check_container_name(name: &str) -> Result<()> {
    match name {
        "." | ".." => Err(Error::InvalidName {
            name: name.to_string(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use crate::traits::StageReporter;

    /// Reporter that records every stage it is given
    #[derive(Debug, Default)]
    pub struct RecordingReporter {
        stages: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        pub fn stages(&self) -> Vec<String> {
            self.stages.lock().unwrap().clone()
        }
    }

    impl StageReporter for RecordingReporter {
        fn set_stage(&self, stage: &str) {
            self.stages.lock().unwrap().push(stage.to_string());
        }
    }

    pub fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_message_layout() {
        let message = ok_message("Created container photos in OS svcA");
        assert!(message.starts_with("\r\x1b[2K"));
        assert!(message.contains("OK"));
        assert!(message.ends_with("\n\nCreated container photos in OS svcA\n"));
    }

    #[test]
    fn test_container_arg_rejects_dot_segments() {
        let args = testing::args(&["cf", "container", "svcA", ".."]);
        assert!(matches!(
            container_arg(&args, 3, "container"),
            Err(Error::InvalidName { ref name }) if name == ".."
        ));

        let args = testing::args(&["cf", "container", "svcA", ".hidden"]);
        assert_eq!(container_arg(&args, 3, "container").unwrap(), ".hidden");
        assert!(check_container_name(".").is_err());
    }

    #[test]
    fn test_required_arg() {
        let args = testing::args(&["cf", "containers", "svcA"]);
        assert_eq!(required_arg(&args, 2, "service").unwrap(), "svcA");
        assert!(matches!(
            required_arg(&args, 3, "container"),
            Err(Error::MissingArgument { name: "container" })
        ));
    }
}
