use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::GorefError;

/// Value of `ResultType` in every emitted record
pub const RESULT_KIND: &str = "RedirectAction";

/// Direction of the lookup requested by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Controller action under the cursor -> its view template
    GotoView,
    /// View template -> the controller source file
    GotoAction,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::GotoView => "mvc_goto_view",
            Command::GotoAction => "mvc_goto_action",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = GorefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mvc_goto_view" => Ok(Command::GotoView),
            "mvc_goto_action" => Ok(Command::GotoAction),
            other => Err(GorefError::UnknownCommand(other.to_string())),
        }
    }
}

/// One cursor position to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub file_path: PathBuf,
    /// Byte offset into the file
    pub offset: usize,
    pub command: Command,
}

impl ResolutionRequest {
    pub fn new(file_path: impl Into<PathBuf>, offset: usize, command: Command) -> Self {
        Self {
            file_path: file_path.into(),
            offset,
            command,
        }
    }
}

/// Diagnostics attached to a result. Advisory only, nothing reads them back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugInfo {
    #[serde(rename = "funcName", skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,

    #[serde(rename = "funcRecvTypeName", skip_serializing_if = "Option::is_none")]
    pub receiver_type_name: Option<String>,

    /// Set when the receiver clause had a shape we could not name
    #[serde(rename = "receiverShape", skip_serializing_if = "Option::is_none")]
    pub receiver_shape: Option<String>,

    #[serde(rename = "templatesDir", skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<String>,

    #[serde(rename = "actionName", skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,

    #[serde(rename = "ctrlName", skip_serializing_if = "Option::is_none")]
    pub ctrl_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of one resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionResult {
    /// `None` when no paired file exists under the convention
    pub target: Option<PathBuf>,
    pub debug_info: DebugInfo,
}

impl ResolutionResult {
    /// Result for a request whose resolution failed outright
    pub fn failed(err: &GorefError) -> Self {
        Self {
            target: None,
            debug_info: DebugInfo {
                error: Some(err.to_string()),
                ..DebugInfo::default()
            },
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_from_str() {
        assert_eq!("mvc_goto_view".parse::<Command>().unwrap(), Command::GotoView);
        assert_eq!(
            "mvc_goto_action".parse::<Command>().unwrap(),
            Command::GotoAction
        );
        assert!(matches!(
            "goto_view".parse::<Command>(),
            Err(GorefError::UnknownCommand(cmd)) if cmd == "goto_view"
        ));
    }

    #[test]
    fn test_command_display_matches_flag_value() {
        for command in [Command::GotoView, Command::GotoAction] {
            assert_eq!(command.to_string().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn test_empty_debug_info_serializes_to_empty_object() {
        let json = serde_json::to_string(&DebugInfo::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_failed_result_carries_error() {
        let err = GorefError::UnknownCommand("nope".to_string());
        let result = ResolutionResult::failed(&err);

        assert!(!result.is_resolved());
        assert_eq!(
            result.debug_info.error.as_deref(),
            Some("Unknown command: nope")
        );
    }
}
