//! Tool Registry - central lookup and dispatch for all tools.
//!
//! The registry maps each tool name to its descriptor. It is filled once when
//! the server starts and only read afterwards.

use std::collections::BTreeMap;

use rmcp::model::Tool;
#[cfg(feature = "http")]
use tracing::warn;

use super::definitions::LetterCounterTool;
#[cfg(feature = "http")]
use super::error::ToolError;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - name to descriptor lookup for every available tool.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, Tool>,
}

impl ToolRegistry {
    /// Create a registry holding every tool definition.
    pub fn new() -> Self {
        let tools = BTreeMap::from([(LetterCounterTool::NAME, LetterCounterTool::to_tool())]);
        Self { tools }
    }

    /// Get all tool names, sorted.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.keys().copied().collect()
    }

    /// Whether a tool with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Look up a tool descriptor by name.
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for listing over the HTTP transport.
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tools.values().cloned().collect()
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            LetterCounterTool::NAME => LetterCounterTool::http_handler(arguments),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.tool_names(), vec!["letter_counter"]);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ToolRegistry::new();
        assert!(registry.contains("letter_counter"));
        assert!(!registry.contains("word_counter"));

        let tool = registry.get("letter_counter").unwrap();
        assert_eq!(tool.description.as_deref(), Some(LetterCounterTool::DESCRIPTION));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_letter_counter() {
        let registry = ToolRegistry::new();
        let result = registry
            .call_tool(
                "letter_counter",
                serde_json::json!({ "word": "Strawberry", "letter": "r" }),
            )
            .unwrap();
        assert_eq!(result["structuredContent"]["count"], 3);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_unknown() {
        let registry = ToolRegistry::new();
        let result = registry.call_tool("unknown", serde_json::json!({}));
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }
}
