//! Error mapping for the MCP server

use brewlab_core::BrewError;
use rmcp::ErrorData;

/// Maps a library error onto the closest MCP error code.
pub fn to_mcp_error(message: &str, error: &BrewError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        BrewError::RecipeNotFound { .. } | BrewError::ShareLinkNotFound { .. } => {
            ErrorData::resource_not_found(text, None)
        }
        BrewError::InvalidInput { .. } => ErrorData::invalid_params(text, None),
        BrewError::PermissionDenied { .. } => ErrorData::invalid_request(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_not_found_maps_to_resource_not_found() {
        let error = BrewError::RecipeNotFound {
            key: "aeropress".to_string(),
        };
        let mapped = to_mcp_error("Failed to get recipe", &error);
        assert_eq!(mapped.code, ErrorCode::RESOURCE_NOT_FOUND);
        assert!(mapped.message.contains("aeropress"));
    }

    #[test]
    fn test_permission_denied_is_invalid_request() {
        let error = BrewError::PermissionDenied {
            recipe_id: "abc".to_string(),
            owner_id: "guest".to_string(),
        };
        assert_eq!(
            to_mcp_error("Failed to publish", &error).code,
            ErrorCode::INVALID_REQUEST
        );
    }
}
