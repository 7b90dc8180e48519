//! JSON record written to stdout for the editor integration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::{
    DebugInfo, GorefError, ResolutionRequest, ResolutionResult, Result, RESULT_KIND,
};

/// Echo of the command-line input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputInfo {
    pub input_file_path: String,
    pub input_offset: usize,
    pub input_cmd: String,
}

impl From<&ResolutionRequest> for InputInfo {
    fn from(request: &ResolutionRequest) -> Self {
        Self {
            input_file_path: request.file_path.display().to_string(),
            input_offset: request.offset,
            input_cmd: request.command.as_str().to_string(),
        }
    }
}

/// Resolved target; `file_path` is empty when nothing was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultInfo {
    pub file_path: String,
    /// Always 0, the target is a whole file
    pub offset: usize,
    pub result_type: String,
    pub debug_info: DebugInfo,
}

impl From<ResolutionResult> for ResultInfo {
    fn from(result: ResolutionResult) -> Self {
        Self {
            file_path: result
                .target
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            offset: 0,
            result_type: RESULT_KIND.to_string(),
            debug_info: result.debug_info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseEnvelope {
    pub input_info: InputInfo,
    pub result_info: ResultInfo,
}

impl ResponseEnvelope {
    pub fn new(request: &ResolutionRequest, result: ResolutionResult) -> Self {
        Self {
            input_info: InputInfo::from(request),
            result_info: ResultInfo::from(result),
        }
    }

    /// Record for input that never became a request, such as an unknown
    /// `--inputCmd`. The raw command is echoed back and nothing is resolved.
    pub fn rejected(file_path: &Path, offset: usize, input_cmd: &str, err: &GorefError) -> Self {
        Self {
            input_info: InputInfo {
                input_file_path: file_path.display().to_string(),
                input_offset: offset,
                input_cmd: input_cmd.to_string(),
            },
            result_info: ResultInfo::from(ResolutionResult::failed(err)),
        }
    }

    /// Encode as a single line of JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
