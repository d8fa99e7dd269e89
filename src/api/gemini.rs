use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

const BASE_URL: &str = "https://generativelanguage.googleapis.com";
const GENERATE_ENDPOINT: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

/// Upload cap enforced before encoding.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

const ANALYSIS_PROMPT: &str = "You are an expert trading analyst. Analyze this trading chart image and provide:
1. Chart pattern identification (e.g., head and shoulders, triangles, flags, etc.)
2. Trend analysis (bullish, bearish, or neutral)
3. Key support and resistance levels
4. Potential entry and exit points
5. Risk assessment
6. Trading recommendations

Be specific, professional, and actionable. Format your response in clear sections.";

/// A chart screenshot validated and base64-encoded for the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    mime_type: String,
    data: String,
}

impl ChartImage {
    /// Validate raw upload bytes. Only images are accepted, capped at 10 MiB.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, ApiError> {
        if !mime_type.starts_with("image/") {
            return Err(ApiError::InvalidImage(format!(
                "expected an image, got {}",
                mime_type
            )));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ApiError::InvalidImage(
                "image size must be less than 10MB".to_string(),
            ));
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: BASE64.encode(bytes),
        })
    }

    /// Rehydrate an already-encoded payload, e.g. out of the history store.
    pub fn from_base64(data: String, mime_type: String) -> Self {
        Self { mime_type, data }
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Client for the Gemini vision endpoint used by the chart-analysis page.
pub struct GeminiClient {
    api_key: String,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http_client: reqwest::Client::new(),
        }
    }

    /// Send the chart to the model with the fixed analyst prompt and return
    /// the generated analysis text.
    pub async fn analyze_chart(&self, image: &ChartImage) -> Result<String, ApiError> {
        if self.api_key.is_empty() {
            return Err(ApiError::MissingApiKey);
        }

        let url = format!("{}{}?key={}", BASE_URL, GENERATE_ENDPOINT, self.api_key);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: ANALYSIS_PROMPT.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type().to_string(),
                            data: image.data().to_string(),
                        },
                    },
                ],
            }],
        };

        let response = self.http_client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .map(|detail| detail.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            log::warn!("chart analysis request failed: {} {}", status, message);
            return Err(ApiError::Gemini {
                status: status.as_u16(),
                message,
            });
        }

        let data: GenerateResponse = response.json().await?;
        data.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| ApiError::Parse("response carried no analysis text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_rejects_non_image_mime() {
        let err = ChartImage::from_bytes(b"%PDF-1.4", "application/pdf").unwrap_err();
        assert!(matches!(err, ApiError::InvalidImage(_)));
    }

    #[test]
    fn test_image_rejects_oversized_payload() {
        let huge = vec![0u8; MAX_IMAGE_BYTES + 1];
        let err = ChartImage::from_bytes(&huge, "image/jpeg").unwrap_err();
        assert!(matches!(err, ApiError::InvalidImage(_)));
    }

    #[test]
    fn test_image_encodes_base64() {
        let image = ChartImage::from_bytes(&[0xFF, 0xD8, 0xFF], "image/jpeg").unwrap();
        assert_eq!(image.data(), BASE64.encode([0xFF, 0xD8, 0xFF]));
        assert_eq!(image.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: "prompt".to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/jpeg".to_string(),
                            data: "AAAA".to_string(),
                        },
                    },
                ],
            }],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(
            json["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "image/jpeg"
        );
    }

    #[test]
    fn test_response_text_extraction() {
        let data: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Bullish flag forming."}]}}]}"#,
        )
        .unwrap();

        let text = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text);
        assert_eq!(text.as_deref(), Some("Bullish flag forming."));
    }

    #[test]
    fn test_empty_response_has_no_text() {
        let data: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(data.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_without_api_key() {
        let client = GeminiClient::new(String::new());
        let image = ChartImage::from_bytes(&[0xFF, 0xD8, 0xFF], "image/jpeg").unwrap();

        let err = client.analyze_chart(&image).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingApiKey));
    }
}
