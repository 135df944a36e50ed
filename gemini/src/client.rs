use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use deck_common::{decode_presentation, DeckConfig, GenerationError, Presentation};

use crate::prompt::{user_prompt, SYSTEM_INSTRUCTION};
use crate::schema::response_schema;

const API_KEY_HEADER: &str = "x-goog-api-key";
const ERROR_BODY_EXCERPT: usize = 200;

/// Client for Gemini's `generateContent` endpoint with JSON-constrained output.
///
/// One call per [`GeminiClient::generate`]; no retries and no request timeout.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>, base_url: &str) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GenerationError::transport(format!("http client build failed: {e}")))?;
        Ok(Self {
            http,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &DeckConfig) -> Result<Self, GenerationError> {
        Self::new(config.api_key.clone(), config.model.clone(), &config.base_url)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Generate a presentation for `topic`.
    pub async fn generate(&self, topic: &str) -> Result<Presentation, GenerationError> {
        let body = request_body(topic);
        let envelope = self.send(&body).await?;
        let text = extract_text(&envelope)?;
        debug!(chars = text.len(), "model returned text");

        let presentation = decode_presentation(&text).inspect_err(|e| {
            warn!(model = %self.model, error = %e, "Failed to parse model response");
        })?;
        info!(model = %self.model, slides = presentation.len(), "presentation generated");
        Ok(presentation)
    }

    async fn send(&self, body: &GenerateRequest<'_>) -> Result<String, GenerationError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GenerationError::transport("missing API key: set GEMINI_API_KEY"));
        };

        let url = self.endpoint();
        debug!(url = %url, model = %self.model, "sending generateContent request");
        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GenerationError::transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::transport(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = text.len(), "response received");

        if !status.is_success() {
            warn!(status = status.as_u16(), "generateContent returned an error status");
            return Err(GenerationError::transport(format!(
                "http {}: {}",
                status.as_u16(),
                excerpt(&text, ERROR_BODY_EXCERPT)
            )));
        }
        Ok(text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest<'a> {
    system_instruction: RequestContent<'a>,
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

/// Build the request body for one generation.
pub fn request_body(topic: &str) -> GenerateRequest<'static> {
    GenerateRequest {
        system_instruction: RequestContent {
            role: None,
            parts: vec![RequestPart { text: SYSTEM_INSTRUCTION.to_string() }],
        },
        contents: vec![RequestContent {
            role: Some("user"),
            parts: vec![RequestPart { text: user_prompt(topic) }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: response_schema(),
        },
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Pull the model's answer text out of a `generateContent` response body.
///
/// Text parts of the first candidate are concatenated; thought parts are skipped.
pub fn extract_text(body: &str) -> Result<String, GenerationError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::format(format!("unreadable response envelope: {e}")))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(GenerationError::format(format!("empty response: {reason}")));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(GenerationError::format(format!("candidate has no text (finish reason: {reason})")));
    }
    Ok(text)
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn deck_text() -> String {
        json!({
            "slides": [
                {"id": "s1", "title": "DALYs", "bulletPoints": ["YLD + YLL"], "chartType": "none"},
                {"id": "s2", "title": "Trends", "bulletPoints": ["Rising"], "chartType": "bar",
                 "chartData": [{"name": "1990", "value": 450}, {"name": "2019", "value": 600}]}
            ]
        })
        .to_string()
    }

    fn envelope(text: &str) -> String {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    /// Serve exactly one HTTP response and return the base URL plus a handle
    /// yielding the raw request text.
    async fn serve_once(status: u16, body: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });
        (format!("http://{addr}/v1beta"), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let length = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn request_body_matches_generate_content_shape() {
        let body = serde_json::to_value(request_body("Low back pain")).unwrap();
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["properties"]["slides"]["type"],
            "ARRAY"
        );
        assert_eq!(body["contents"][0]["role"], "user");
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Low back pain"));
        assert!(body["systemInstruction"].get("role").is_none());
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Global Burden of Disease"));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = GeminiClient::new(Some("k".into()), "gemini-test", "http://host/v1beta/").unwrap();
        assert_eq!(client.endpoint(), "http://host/v1beta/models/gemini-test:generateContent");
    }

    #[test]
    fn extract_text_joins_parts_and_skips_thoughts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "{\"slides\":" },
                    { "text": "[]}" }
                ]}
            }]
        })
        .to_string();
        assert_eq!(extract_text(&body).unwrap(), "{\"slides\":[]}");
    }

    #[test]
    fn extract_text_reports_block_reason() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
        let err = extract_text(&body).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn extract_text_rejects_empty_candidate() {
        let body = json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] }).to_string();
        let err = extract_text(&body).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn excerpt_is_char_safe() {
        assert_eq!(excerpt("ééé", 2), "éé...");
        assert_eq!(excerpt("  short ", 10), "short");
    }

    #[tokio::test]
    async fn missing_api_key_is_a_transport_error() {
        let client = GeminiClient::new(None, "gemini-test", "http://127.0.0.1:9").unwrap();
        let err = client.generate("topic").await.unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("API key"));
    }

    #[tokio::test]
    async fn blank_api_key_counts_as_missing() {
        let client = GeminiClient::new(Some("  ".into()), "gemini-test", "http://127.0.0.1:9").unwrap();
        assert!(client.generate("topic").await.unwrap_err().is_transport());
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = GeminiClient::new(Some("k".into()), "gemini-test", &format!("http://{addr}")).unwrap();
        assert!(client.generate("topic").await.unwrap_err().is_transport());
    }

    #[tokio::test]
    async fn decodes_successful_response() {
        let (base, server) = serve_once(200, envelope(&deck_text())).await;
        let client = GeminiClient::new(Some("secret-key".into()), "gemini-test", &base).unwrap();

        let deck = client.generate("Low back pain").await.unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.slides()[0].id, "s1");
        assert_eq!(deck.slides()[1].chart_data.len(), 2);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-test:generateContent"));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: secret-key"));
        assert!(request.contains("responseSchema"));
    }

    #[tokio::test]
    async fn rate_limit_is_a_transport_error() {
        let body = json!({ "error": { "code": 429, "status": "RESOURCE_EXHAUSTED" } }).to_string();
        let (base, server) = serve_once(429, body).await;
        let client = GeminiClient::new(Some("k".into()), "gemini-test", &base).unwrap();

        let err = client.generate("topic").await.unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("429"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn malformed_model_json_is_a_format_error() {
        let (base, server) = serve_once(200, envelope("{\"slides\": [ {\"id\": ")).await;
        let client = GeminiClient::new(Some("k".into()), "gemini-test", &base).unwrap();

        assert!(client.generate("topic").await.unwrap_err().is_format());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn missing_required_field_is_a_format_error() {
        let text = json!({ "slides": [{ "id": "s1", "title": "T", "chartType": "none" }] }).to_string();
        let (base, server) = serve_once(200, envelope(&text)).await;
        let client = GeminiClient::new(Some("k".into()), "gemini-test", &base).unwrap();

        let err = client.generate("topic").await.unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("bulletPoints"));
        server.await.unwrap();
    }
}
