//! Gemini `generateContent` client with function calling.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{ChatMessage, LlmClient, LlmError, LlmResponse, Role, ToolCall, ToolSchema};

/// Upper bound on one `generateContent` round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the Gemini REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> Result<LlmResponse, LlmError> {
        let body = build_request(messages, tools.unwrap_or_default());

        tracing::debug!(model, turns = body.contents.len(), "Calling Gemini");

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        parse_response(parsed)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<FunctionDeclarations>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_response: Option<FunctionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FunctionDeclarations {
    function_declarations: Vec<ToolSchema>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

fn build_request(messages: &[ChatMessage], tools: &[ToolSchema]) -> GenerateContentRequest {
    let mut system_parts = Vec::new();
    let mut contents: Vec<Content> = Vec::new();

    for message in messages {
        match message.role {
            Role::System => {
                if let Some(text) = &message.content {
                    system_parts.push(text_part(text));
                }
            }
            Role::User => contents.push(Content {
                role: Some("user".to_string()),
                parts: vec![text_part(message.content.as_deref().unwrap_or_default())],
            }),
            Role::Assistant => {
                let mut parts = Vec::new();
                if let Some(text) = message.content.as_deref().filter(|t| !t.is_empty()) {
                    parts.push(text_part(text));
                }
                for call in message.tool_calls.iter().flatten() {
                    parts.push(Part {
                        function_call: Some(FunctionCall {
                            name: call.name.clone(),
                            args: call.arguments.clone(),
                        }),
                        ..Default::default()
                    });
                }
                contents.push(Content {
                    role: Some("model".to_string()),
                    parts,
                });
            }
            Role::Tool => {
                let part = Part {
                    function_response: Some(FunctionResponse {
                        name: message.name.clone().unwrap_or_default(),
                        response: json!({ "result": message.content.clone().unwrap_or_default() }),
                    }),
                    ..Default::default()
                };
                // Results of one round of calls travel together in a single turn.
                match contents.last_mut() {
                    Some(last) if is_function_response_turn(last) => last.parts.push(part),
                    _ => contents.push(Content {
                        role: Some("user".to_string()),
                        parts: vec![part],
                    }),
                }
            }
        }
    }

    let system_instruction = (!system_parts.is_empty()).then(|| Content {
        role: None,
        parts: system_parts,
    });

    let tools = if tools.is_empty() {
        Vec::new()
    } else {
        vec![FunctionDeclarations {
            function_declarations: tools.to_vec(),
        }]
    };

    GenerateContentRequest {
        system_instruction,
        contents,
        tools,
    }
}

fn is_function_response_turn(content: &Content) -> bool {
    content.role.as_deref() == Some("user")
        && !content.parts.is_empty()
        && content.parts.iter().all(|p| p.function_response.is_some())
}

fn text_part(text: &str) -> Part {
    Part {
        text: Some(text.to_string()),
        ..Default::default()
    }
}

fn parse_response(response: GenerateContentResponse) -> Result<LlmResponse, LlmError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(LlmError::InvalidResponse(format!(
            "no response candidates ({})",
            reason
        )));
    };

    let Some(content) = candidate.content else {
        return Err(LlmError::InvalidResponse(format!(
            "candidate has no content (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    };

    let mut text = String::new();
    let mut calls = Vec::new();
    for part in content.parts {
        if let Some(t) = part.text {
            text.push_str(&t);
        }
        if let Some(call) = part.function_call {
            calls.push(ToolCall {
                id: format!("call_{}", calls.len()),
                name: call.name,
                arguments: call.args,
            });
        }
    }

    Ok(LlmResponse {
        content: (!text.is_empty()).then_some(text),
        tool_calls: (!calls.is_empty()).then_some(calls),
    })
}

/// Extract `error.message` from a Gemini error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
