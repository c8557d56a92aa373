use thiserror::Error;

#[derive(Error, Debug)]
pub enum GbuildError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("could not find '{tool}': {reason}")]
    ToolNotFound { tool: String, reason: String },
    #[error("command: {command} {args:?} ({status})\n{stderr}")]
    Subprocess {
        command: String,
        args: Vec<String>,
        status: String,
        stderr: String,
    },
    #[error("malformed output from '{command}': {reason}")]
    MalformedOutput { command: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GbuildError {
    pub fn tool_not_found(tool: impl Into<String>, reason: impl ToString) -> Self {
        GbuildError::ToolNotFound {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_tool_not_found(&self) -> bool {
        matches!(self, GbuildError::ToolNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, GbuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subprocess_message_carries_command_and_stderr() {
        let err = GbuildError::Subprocess {
            command: "/usr/bin/6g".to_string(),
            args: vec!["-o".to_string(), "main.6".to_string()],
            status: "exit status: 3".to_string(),
            stderr: "main.go:3: undefined: x".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/usr/bin/6g"));
        assert!(msg.contains("\"main.6\""));
        assert!(msg.contains("undefined: x"));
    }

    #[test]
    fn test_parse_error_position() {
        let err = GbuildError::Parse {
            line: 4,
            column: 2,
            message: "expected 'package'".to_string(),
        };
        assert_eq!(err.to_string(), "4:2: expected 'package'");
        assert!(!err.is_tool_not_found());
    }
}
