pub mod paths;

use std::path::Path;
use tracing::{debug, warn};

use crate::config::Config;
use crate::core::{Command, DebugInfo, ResolutionRequest, ResolutionResult, Result};
use crate::parser::{find_enclosing_function, EnclosingFunction, GoParser, Receiver};
use paths::{ancestor, base, dir, join};

/// Pairs controller actions with view templates by directory convention
pub struct Resolver {
    config: Config,
    parser: GoParser,
}

impl Resolver {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            config,
            parser: GoParser::new()?,
        })
    }

    /// Resolve one request. Only a failure to read or parse the controller
    /// source is an error; "nothing found" is an unresolved result.
    pub fn resolve(&mut self, request: &ResolutionRequest) -> Result<ResolutionResult> {
        debug!(
            "Resolving {} at {}:{}",
            request.command,
            request.file_path.display(),
            request.offset
        );

        let result = match request.command {
            Command::GotoView => self.resolve_view(request)?,
            Command::GotoAction => goto_action(&request.file_path, &self.config),
        };

        match &result.target {
            Some(target) => debug!("Resolved to {}", target.display()),
            None => debug!("No paired file for {}", request.file_path.display()),
        }

        Ok(result)
    }

    fn resolve_view(&mut self, request: &ResolutionRequest) -> Result<ResolutionResult> {
        let file = self.parser.parse_file(&request.file_path)?;

        let Some(function) = find_enclosing_function(
            &file.tree,
            &file.source,
            request.offset,
            &self.config.controller_suffix,
        ) else {
            debug!("Offset {} is not inside any function", request.offset);
            return Ok(ResolutionResult::default());
        };

        Ok(goto_view(&request.file_path, &function, &self.config))
    }
}

/// Map a controller action to `<root>/<templates_dir>/<Receiver>/<action>.<view_extension>`.
///
/// `<root>` is the controller file's directory walked up past `controllers_dir`.
pub fn goto_view(file_path: &Path, function: &EnclosingFunction, config: &Config) -> ResolutionResult {
    let mut debug_info = DebugInfo {
        function_name: Some(function.function_name.clone()),
        receiver_type_name: Some(function.receiver_type_name.clone()),
        ..DebugInfo::default()
    };

    if let Receiver::Unrecognized(shape) = &function.receiver {
        warn!(
            "Unrecognized receiver type `{}` on {}, no view group",
            shape, function.function_name
        );
        debug_info.receiver_shape = Some(shape.clone());
    }

    if function.function_name.is_empty() || function.receiver_type_name.is_empty() {
        return ResolutionResult {
            target: None,
            debug_info,
        };
    }

    let root = ancestor(&dir(file_path), config.controllers_depth());
    let group_dir = join(&root, &config.templates_dir).join(&function.receiver_type_name);
    let target = group_dir.join(format!(
        "{}.{}",
        function.function_name, config.view_extension
    ));

    ResolutionResult {
        target: Some(target),
        debug_info,
    }
}

/// Map `<root>/<templates_dir>/<Ctrl>/<action>.<view_extension>` to
/// `<root>/<controllers_dir>/<Ctrl>.<source_extension>`.
///
/// The template's grandparent directory must be named like the last
/// component of `templates_dir`, otherwise nothing is resolved.
pub fn goto_action(file_path: &Path, config: &Config) -> ResolutionResult {
    let ctrl_dir = dir(file_path);
    let templates_dir = dir(&ctrl_dir);

    let mut debug_info = DebugInfo {
        templates_dir: Some(templates_dir.display().to_string()),
        ..DebugInfo::default()
    };

    if base(&templates_dir) != config.templates_dir_name() {
        return ResolutionResult {
            target: None,
            debug_info,
        };
    }

    let file_name = base(file_path);
    let view_suffix = format!(".{}", config.view_extension);
    let action_name = file_name
        .strip_suffix(view_suffix.as_str())
        .unwrap_or(&file_name)
        .to_string();
    let ctrl_name = base(&ctrl_dir);

    let root = ancestor(&templates_dir, config.templates_depth());
    let target = join(&root, &config.controllers_dir)
        .join(format!("{}.{}", ctrl_name, config.source_extension));

    debug_info.action_name = Some(action_name);
    debug_info.ctrl_name = Some(ctrl_name);

    ResolutionResult {
        target: Some(target),
        debug_info,
    }
}
