//! Error mapping for the MCP server

use cairn_core::{ErrorKind, PlannerError};
use rmcp::ErrorData;

/// Converts a planner error into an MCP error. Caller mistakes (unknown ids,
/// bad input, cycles) become invalid-params errors; everything else is an
/// internal error.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error.kind() {
        ErrorKind::NotFound | ErrorKind::InvalidInput | ErrorKind::Cycle => {
            ErrorData::invalid_params(text, None)
        }
        ErrorKind::Collaborator | ErrorKind::Configuration | ErrorKind::Io => {
            ErrorData::internal_error(text, None)
        }
    }
}
