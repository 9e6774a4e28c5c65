//! Helper functions for the MCP server.

use crate::Error;
use rmcp::model::{CallToolResult, Content, ErrorCode, ErrorData as McpError};
use serde::Serialize;

/// Convert an [`Error`] to an MCP error with an appropriate error code.
///
/// Config problems and 4xx API responses point back at the caller's input
/// (`INVALID_PARAMS`); transport, parse, and 5xx failures are server-side
/// (`INTERNAL_ERROR`).
pub fn error_to_mcp(context: &str, error: Error) -> McpError {
    let (code, message) = match &error {
        Error::MissingVar(name) => (
            ErrorCode::INVALID_PARAMS,
            format!("{}: {} environment variable not set", context, name),
        ),
        Error::InvalidVar { name, value } => (
            ErrorCode::INVALID_PARAMS,
            format!("{}: invalid value for {} ({:?})", context, name, value),
        ),
        Error::Api { status, message } if (400..500).contains(status) => (
            ErrorCode::INVALID_PARAMS,
            format!("{}: {}", context, message),
        ),
        Error::Api { message, .. } => (
            ErrorCode::INTERNAL_ERROR,
            format!("{}: {}", context, message),
        ),
        Error::Http(e) => (
            ErrorCode::INTERNAL_ERROR,
            format!("{}: HTTP error - {}", context, e),
        ),
        Error::Parse(e) => (
            ErrorCode::INTERNAL_ERROR,
            format!("{}: failed to parse response - {}", context, e),
        ),
    };

    McpError::new(code, message, None)
}

/// Convert any Display error to an MCP error (for non-Error types).
pub fn to_mcp_error(context: &str, error: impl std::fmt::Display) -> McpError {
    McpError::new(
        ErrorCode::INTERNAL_ERROR,
        format!("{}: {}", context, error),
        None,
    )
}

/// Serialize a value to a JSON response.
pub fn json_response<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| to_mcp_error("Failed to serialize response", e))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Create a validation error with the given message.
pub fn validation_error(message: &str) -> McpError {
    McpError::new(ErrorCode::INVALID_PARAMS, message.to_string(), None)
}

/// Create a success response with a confirmation message.
pub fn success_response(message: &str) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        message.to_string(),
    )]))
}
