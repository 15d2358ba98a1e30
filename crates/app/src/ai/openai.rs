//! `OpenAI` Images API client.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::OpenAiConfig;

use super::error::AiError;
use super::{GeneratedImage, GenerationInput, prompt::compose_prompt};

const OPENAI_IMAGES_ENDPOINT: &str = "https://api.openai.com/v1/images/generations";

/// Request payload for the Images API.
///
/// Kept conservative: the Images API has evolved across models, and a URL
/// response is the easiest to preview and store.
#[derive(Debug, Serialize)]
struct ImagesRequest<'a> {
    model: &'a str,
    prompt: String,
    size: &'static str,
    response_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

/// Generate an image via the `OpenAI` Images API.
///
/// A single request/response with no retry; a non-success status is reported
/// with the upstream status and body text.
///
/// # Errors
///
/// Returns `AiError::Http` on transport failure, `AiError::Upstream` on a
/// non-2xx response, and `AiError::EmptyResponse` when the payload carries
/// no image URL.
#[instrument(skip(http, config, input), fields(model = %config.model))]
pub async fn generate(
    http: &reqwest::Client,
    config: &OpenAiConfig,
    input: &GenerationInput,
) -> Result<GeneratedImage, AiError> {
    let request = ImagesRequest {
        model: &config.model,
        prompt: compose_prompt(input),
        size: "1024x1024",
        response_format: "url",
    };

    let response = http
        .post(OPENAI_IMAGES_ENDPOINT)
        .bearer_auth(config.api_key.expose_secret())
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = match response.text().await {
            Ok(body) if !body.is_empty() => body,
            _ => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        return Err(AiError::Upstream {
            provider: "openai",
            status: status.as_u16(),
            message,
        });
    }

    let payload: ImagesResponse = response.json().await?;
    let url = payload
        .data
        .into_iter()
        .next()
        .and_then(|d| d.url)
        .ok_or(AiError::EmptyResponse("OpenAI"))?;

    Ok(GeneratedImage {
        url,
        provider: "openai".to_string(),
        model: Some(config.model.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ImagesRequest {
            model: "gpt-image-1",
            prompt: "a fox".to_string(),
            size: "1024x1024",
            response_format: "url",
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["model"], "gpt-image-1");
        assert_eq!(json["size"], "1024x1024");
        assert_eq!(json["response_format"], "url");
    }

    #[test]
    fn test_response_with_url() {
        let payload: ImagesResponse =
            serde_json::from_str(r#"{"data":[{"url":"https://img.example/a.png"}]}"#)
                .expect("deserialize");
        assert_eq!(
            payload.data.into_iter().next().and_then(|d| d.url),
            Some("https://img.example/a.png".to_string())
        );
    }

    #[test]
    fn test_response_without_data() {
        let payload: ImagesResponse = serde_json::from_str(r#"{"created":123}"#).expect("deserialize");
        assert!(payload.data.is_empty());
    }

    #[test]
    fn test_response_with_null_url() {
        let payload: ImagesResponse =
            serde_json::from_str(r#"{"data":[{"b64_json":null,"url":null}]}"#).expect("deserialize");
        assert_eq!(payload.data.into_iter().next().and_then(|d| d.url), None);
    }
}
