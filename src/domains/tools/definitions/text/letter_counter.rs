//! Letter counter tool definition.
//!
//! Counts how many times a letter (or any substring) appears in a word,
//! ignoring case.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the letter counter tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LetterCounterParams {
    /// The word or phrase to analyze.
    pub word: String,

    /// The letter whose occurrences are counted.
    pub letter: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Letter counter tool - counts occurrences of a letter in a word.
pub struct LetterCounterTool;

impl LetterCounterTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "letter_counter";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Count how many times a letter appears in a word. \
        The comparison ignores case. Returns the number of occurrences.";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(word_len = params.word.chars().count()))]
    pub fn execute(params: &LetterCounterParams) -> CallToolResult {
        let count = count_occurrences(&params.word, &params.letter);
        debug!("Counted {} occurrence(s)", count);

        let mut result = CallToolResult::success(vec![Content::text(count.to_string())]);
        result.structured_content = Some(serde_json::json!({ "count": count }));
        result
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: LetterCounterParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        let result = Self::execute(&params);

        Ok(serde_json::json!({
            "content": result.content,
            "structuredContent": result.structured_content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<LetterCounterParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Letter Counter".into()),
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let params: LetterCounterParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Counting
// ============================================================================

/// Count non-overlapping occurrences of `letter` in `word`, ignoring case.
///
/// `letter` is not required to be a single character: longer needles are
/// counted as substrings, and an empty needle matches at every character
/// boundary.
pub fn count_occurrences(word: &str, letter: &str) -> usize {
    let word = word.to_lowercase();
    let letter = letter.to_lowercase();
    word.matches(letter.as_str()).count()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_execute_logs_length_not_word() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let params = LetterCounterParams {
            word: "hunter2secret".to_string(),
            letter: "e".to_string(),
        };
        tracing::subscriber::with_default(subscriber, || LetterCounterTool::execute(&params));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("word_len=13"));
        assert!(!output.contains("hunter2secret"));
    }

    #[test]
    fn test_count_known_words() {
        assert_eq!(count_occurrences("Strawberry", "r"), 3);
        assert_eq!(count_occurrences("Mississippi", "s"), 4);
        assert_eq!(count_occurrences("aaaa", "a"), 4);
    }

    #[test]
    fn test_count_is_case_insensitive() {
        for (word, letter) in [("Strawberry", "R"), ("MISSISSIPPI", "s"), ("AbAb", "a")] {
            assert_eq!(
                count_occurrences(word, letter),
                count_occurrences(&word.to_lowercase(), &letter.to_lowercase())
            );
        }
        assert_eq!(count_occurrences("STRAWBERRY", "r"), 3);
    }

    #[test]
    fn test_count_empty_word() {
        assert_eq!(count_occurrences("", "a"), 0);
        assert_eq!(count_occurrences("", "Z"), 0);
    }

    #[test]
    fn test_count_missing_letter() {
        assert_eq!(count_occurrences("Strawberry", "z"), 0);
    }

    #[test]
    fn test_count_substring_is_non_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("banana", "ana"), 1);
    }

    #[test]
    fn test_count_empty_letter_matches_boundaries() {
        assert_eq!(count_occurrences("abc", ""), 4);
        assert_eq!(count_occurrences("", ""), 1);
    }

    #[test]
    fn test_count_non_ascii() {
        assert_eq!(count_occurrences("Ärger ärgert", "ä"), 2);
    }

    #[test]
    fn test_execute_returns_count_as_text() {
        let params = LetterCounterParams {
            word: "Strawberry".to_string(),
            letter: "r".to_string(),
        };

        let result = LetterCounterTool::execute(&params);
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(text_of(&result), "3");
        assert_eq!(
            result.structured_content,
            Some(serde_json::json!({ "count": 3 }))
        );
    }

    #[test]
    fn test_to_tool_schema_requires_both_fields() {
        let tool = LetterCounterTool::to_tool();
        assert_eq!(tool.name, "letter_counter");

        let required = tool
            .input_schema
            .get("required")
            .and_then(|v| v.as_array())
            .expect("schema should list required fields");
        assert!(required.contains(&serde_json::json!("word")));
        assert!(required.contains(&serde_json::json!("letter")));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler() {
        let args = serde_json::json!({ "word": "Mississippi", "letter": "S" });
        let result = LetterCounterTool::http_handler(args).unwrap();
        assert_eq!(result["content"][0]["text"], "4");
        assert_eq!(result["isError"], false);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_missing_param() {
        let args = serde_json::json!({ "word": "Strawberry" });
        let result = LetterCounterTool::http_handler(args);
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
