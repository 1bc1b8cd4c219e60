use std::time::Duration;

use analyzer_logging::{analyzer_debug, analyzer_info, analyzer_warn};
use bytes::BytesMut;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};

use crate::interpret::interpret_payload;
use crate::{AnalysisReport, AnalysisRequest, AnalyzeError, FailureKind, MalformedResponse};

pub const DEFAULT_ENDPOINT: &str = "https://resume-analyzer-flask-production.up.railway.app/analyze";

#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    /// Full URL of the `/analyze` endpoint, without a trailing slash.
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Success bodies beyond this fail; error bodies are truncated to it.
    pub max_response_bytes: u64,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_response_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    /// Send one analysis request. Never retries.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalyzeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalyzer {
    settings: AnalyzerSettings,
}

impl ReqwestAnalyzer {
    pub fn new(settings: AnalyzerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, AnalyzeError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| AnalyzeError::new(FailureKind::Network, err.to_string()))
    }

    fn build_form(request: &AnalysisRequest) -> Result<Form, AnalyzeError> {
        let file = Part::bytes(request.file.contents.to_vec())
            .file_name(request.file.name.clone())
            .mime_str(&request.file.mime_type)
            .map_err(|err| AnalyzeError::new(FailureKind::Network, err.to_string()))?;
        Ok(Form::new()
            .part("file", file)
            .text("job_description", request.job_description.clone()))
    }
}

#[async_trait::async_trait]
impl Analyzer for ReqwestAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalyzeError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| AnalyzeError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = self.build_client()?;
        let form = Self::build_form(request)?;

        analyzer_info!(
            "POST {} file={} bytes={} job_description_len={}",
            endpoint,
            request.file.name,
            request.file.contents.len(),
            request.job_description.len()
        );

        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response, self.settings.max_response_bytes).await;
            analyzer_warn!("Analysis service returned {}: {}", status, body);
            return Err(AnalyzeError::new(
                FailureKind::HttpStatus {
                    status: status.as_u16(),
                    body,
                },
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(AnalyzeError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(AnalyzeError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        analyzer_debug!("Analysis response {} ({} bytes)", status, body.len());

        let text = String::from_utf8(body.to_vec()).map_err(|err| {
            AnalyzeError::from(MalformedResponse::InvalidEnvelope {
                message: err.to_string(),
            })
        })?;

        interpret_payload(&text).map_err(|err| {
            analyzer_warn!("Could not interpret analysis response: {}", err);
            if let Some(raw) = err.raw() {
                analyzer_debug!("Extracted text: {}", raw);
            }
            AnalyzeError::from(err)
        })
    }
}

/// Reads a non-2xx body verbatim, truncated to `max_bytes`.
///
/// A read failure keeps whatever arrived before it.
async fn read_error_body(response: reqwest::Response, max_bytes: u64) -> String {
    let status = response.status();
    let limit = usize::try_from(max_bytes).unwrap_or(usize::MAX);
    let mut body = BytesMut::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(err) => {
                analyzer_warn!("Failed to read error body for status {}: {}", status, err);
                break;
            }
        };
        let remaining = limit - body.len();
        if chunk.len() > remaining {
            body.extend_from_slice(&chunk[..remaining]);
            analyzer_debug!("Error body for status {} truncated at {} bytes", status, limit);
            break;
        }
        body.extend_from_slice(&chunk);
    }
    String::from_utf8_lossy(&body).into_owned()
}

fn map_reqwest_error(err: reqwest::Error) -> AnalyzeError {
    if err.is_timeout() {
        return AnalyzeError::new(FailureKind::Timeout, err.to_string());
    }
    AnalyzeError::new(FailureKind::Network, err.to_string())
}
