//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes weak-word scanning, scoring, upgrading, synonym lookup, and spell
//! checking over stdio so editor assistants can call them as tools.
//!
//! Each `#[tool]` method builds a [`Request`] and returns the JSON of the
//! [`Response`] from [`Session::dispatch`]; no text processing happens here
//! beyond input validation.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use lexup_core::{Request, Session, Tone};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for tools that take a block of text.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TextParams {
    /// The text to analyze.
    pub text: String,
}

/// Parameters for the `upgrade_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UpgradeTextParams {
    /// The text to rewrite.
    pub text: String,
    /// Tone: "formal", "academic", "business", or "casual". Defaults to the configured tone.
    pub tone: Option<String>,
}

/// Parameters for the `get_synonyms` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetSynonymsParams {
    /// Word or phrase to look up.
    pub word: String,
    /// Tone: "formal", "academic", "business", or "casual". Defaults to the configured tone.
    pub tone: Option<String>,
}

/// MCP server exposing lexup to AI assistants.
#[derive(Clone)]
pub struct LexupServer {
    session: Arc<Session>,
    max_input_bytes: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for LexupServer {
    fn default() -> Self {
        Self::new(Session::builtin(), Some(lexup_core::DEFAULT_MAX_INPUT_BYTES))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn parse_tone(tone: Option<&str>) -> Result<Option<Tone>, McpError> {
    tone.map(str::parse)
        .transpose()
        .map_err(|e: String| McpError::invalid_params(e, None))
}

#[tool_router]
impl LexupServer {
    /// Create a server over a loaded session.
    pub fn new(session: Session, max_input_bytes: Option<usize>) -> Self {
        Self {
            session: Arc::new(session),
            max_input_bytes,
            tool_router: Self::tool_router(),
        }
    }

    fn respond(&self, tool: &str, request: Request) -> Result<CallToolResult, McpError> {
        let action = request.action();
        let response = self.session.dispatch(request);
        tracing::info!(tool, action, "MCP tool completed");
        to_json(&response)
    }

    fn check_input(&self, text: &str) -> Result<(), McpError> {
        if let Some(max) = self.max_input_bytes
            && text.len() > max
        {
            return Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            ));
        }
        Ok(())
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "tone": self.session.settings().tone,
        });

        if params.format == "json" {
            return to_json(&info);
        }
        let text = format!(
            "{} v{}\n{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_DESCRIPTION"),
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Locate weak words.
    #[tool(
        description = "Find weak or overused words in text. Returns `hits`, each with its byte offset and length."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn find_weak_words(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_input(&params.text)?;
        self.respond("find_weak_words", Request::Scan { text: params.text })
    }

    /// Score writing.
    #[tool(
        description = "Score writing from 0 to 100 by weak-word density. Returns the score, counts, and up to five replacement suggestions."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn score_writing(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_input(&params.text)?;
        self.respond("score_writing", Request::Score { text: params.text })
    }

    /// Rewrite text with stronger words.
    #[tool(
        description = "Replace weak words and phrases with stronger synonyms in the given tone. Returns the new text and each substitution."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn upgrade_text(
        &self,
        Parameters(params): Parameters<UpgradeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_input(&params.text)?;
        let tone = parse_tone(params.tone.as_deref())?;
        self.respond(
            "upgrade_text",
            Request::Upgrade {
                text: params.text,
                tone,
            },
        )
    }

    /// Synonyms for one word.
    #[tool(description = "Suggest synonyms for a word or phrase in the given tone, best first.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", word = %params.word))]
    fn get_synonyms(
        &self,
        Parameters(params): Parameters<GetSynonymsParams>,
    ) -> Result<CallToolResult, McpError> {
        let tone = parse_tone(params.tone.as_deref())?;
        self.respond(
            "get_synonyms",
            Request::Synonyms {
                word: params.word,
                tone,
            },
        )
    }

    /// Spell check.
    #[tool(
        description = "Find misspelled words. Returns `misspelled`, each with its byte offset and suggested corrections."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_spelling(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_input(&params.text)?;
        self.respond("check_spelling", Request::Spelling { text: params.text })
    }
}

#[tool_handler]
impl ServerHandler for LexupServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use find_weak_words and score_writing to review prose, \
                 upgrade_text to rewrite it, get_synonyms for single words, and \
                 check_spelling for typos.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    const SENTENCE: &str = "This is a very good and really important idea.";

    #[test]
    fn server_info_has_correct_name() {
        let server = LexupServer::default();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn server_has_tools_capability() {
        let server = LexupServer::default();
        let info = ServerHandler::get_info(&server);

        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn server_has_instructions() {
        let server = LexupServer::default();
        let info = ServerHandler::get_info(&server);

        let instructions = info.instructions.expect("server should have instructions");
        assert!(instructions.contains(env!("CARGO_PKG_NAME")));
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn json_of(result: &CallToolResult) -> serde_json::Value {
        assert!(!result.is_error.unwrap_or(false));
        let text = extract_text(result).expect("should have text content");
        serde_json::from_str(text).expect("valid JSON")
    }

    fn text(text: &str) -> Parameters<TextParams> {
        Parameters(TextParams {
            text: text.to_string(),
        })
    }

    #[test]
    fn get_info_tool_returns_text_by_default() {
        let server = LexupServer::default();
        let params = Parameters(GetInfoParams {
            format: "text".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");
        let text = extract_text(&result).expect("should have text content");
        assert!(text.contains(env!("CARGO_PKG_NAME")));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = LexupServer::default();
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });

        let json = json_of(&server.get_info(params).expect("get_info should succeed"));
        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["tone"], "formal");
    }

    #[test]
    fn find_weak_words_tool_reports_offsets() {
        let server = LexupServer::default();
        let json = json_of(&server.find_weak_words(text(SENTENCE)).unwrap());
        assert_eq!(json["action"], "scan");
        let hits = json["hits"].as_array().unwrap();
        assert_eq!(hits.len(), 4);
        assert_eq!(hits[0]["word"], "very");
        assert_eq!(hits[0]["index"], 10);
    }

    #[test]
    fn score_writing_tool_works() {
        let server = LexupServer::default();
        let json = json_of(&server.score_writing(text(SENTENCE)).unwrap());
        assert_eq!(json["action"], "score");
        assert_eq!(json["score"], 11);
        assert_eq!(json["weakWordCount"], 4);
        assert_eq!(json["totalWords"], 9);
    }

    #[test]
    fn upgrade_text_tool_honors_tone() {
        let server = LexupServer::default();
        let params = Parameters(UpgradeTextParams {
            text: "good".to_string(),
            tone: Some("casual".to_string()),
        });
        let json = json_of(&server.upgrade_text(params).unwrap());
        assert_eq!(json["text"], "great");
        assert_eq!(json["replacements"][0]["original"], "good");
    }

    #[test]
    fn upgrade_text_tool_rejects_unknown_tone() {
        let server = LexupServer::default();
        let params = Parameters(UpgradeTextParams {
            text: "good".to_string(),
            tone: Some("pirate".to_string()),
        });
        assert!(server.upgrade_text(params).is_err());
    }

    #[test]
    fn get_synonyms_tool_works() {
        let server = LexupServer::default();
        let params = Parameters(GetSynonymsParams {
            word: "good".to_string(),
            tone: Some("business".to_string()),
        });
        let json = json_of(&server.get_synonyms(params).unwrap());
        assert_eq!(json["tone"], "business");
        assert_eq!(json["synonyms"][0], "solid");
    }

    #[test]
    fn get_synonyms_tool_defaults_to_session_tone() {
        let session = Session::builtin().with_settings(lexup_core::settings::Settings {
            tone: Tone::Business,
            ..Default::default()
        });
        let server = LexupServer::new(session, None);
        let params = Parameters(GetSynonymsParams {
            word: "good".to_string(),
            tone: None,
        });
        let json = json_of(&server.get_synonyms(params).unwrap());
        assert_eq!(json["action"], "synonyms");
        assert_eq!(json["tone"], "business");
        assert_eq!(json["word"], "good");
    }

    #[test]
    fn tool_output_matches_dispatch() {
        let server = LexupServer::default();
        let expected = serde_json::to_value(Session::builtin().dispatch(Request::Upgrade {
            text: SENTENCE.to_string(),
            tone: Some(Tone::Academic),
        }))
        .unwrap();
        let params = Parameters(UpgradeTextParams {
            text: SENTENCE.to_string(),
            tone: Some("academic".to_string()),
        });
        assert_eq!(json_of(&server.upgrade_text(params).unwrap()), expected);
    }

    #[test]
    fn check_spelling_tool_works() {
        let server = LexupServer::default();
        let json = json_of(&server.check_spelling(text("teh end")).unwrap());
        assert_eq!(json["action"], "spelling");
        assert_eq!(json["misspelled"][0]["word"], "teh");
        assert_eq!(json["misspelled"][0]["suggestions"][0], "the");
    }

    #[test]
    fn oversized_input_is_rejected() {
        let server = LexupServer::new(Session::builtin(), Some(8));
        assert!(server.score_writing(text(SENTENCE)).is_err());
        assert!(server.score_writing(text("good")).is_ok());
    }
}
