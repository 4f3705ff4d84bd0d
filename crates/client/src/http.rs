use crate::backend::{PhaseReporter, ReviewBackend};
use crate::config::ClientConfig;
use crate::error::BackendError;
use async_trait::async_trait;
use reqwest::Client;
use review_protocol::{BackendEvent, ErrorDetail, GenerationRequest, GenerationSuccess};

/// HTTP implementation of [`ReviewBackend`].
///
/// The generation endpoint answers a POST with an NDJSON progress stream:
/// `phase` events while the pipeline runs, one terminal `done` event with
/// the review id. Non-OK statuses carry the structured `detail` envelope
/// instead. Only the connect timeout is set here — the overall budget is
/// enforced by the controller so that a client-side timeout stays
/// distinguishable from an upstream one.
pub struct HttpReviewBackend {
    client: Client,
    generate_url: String,
}

impl HttpReviewBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        config.validate().map_err(BackendError::Transport)?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            generate_url: format!(
                "{}/reviews/generate",
                config.base_url.trim_end_matches('/')
            ),
        })
    }

    fn handle_event(
        line: &str,
        progress: &PhaseReporter,
        review_id: &mut Option<String>,
    ) {
        match serde_json::from_str::<BackendEvent>(line) {
            Ok(BackendEvent::Phase { phase }) => progress.report(phase),
            Ok(BackendEvent::Done { review_id: id }) => *review_id = Some(id),
            Err(e) => {
                log::warn!("skipping undecodable progress event ({e}): {line}");
            }
        }
    }
}

#[async_trait]
impl ReviewBackend for HttpReviewBackend {
    async fn generate(
        &self,
        request: &GenerationRequest,
        progress: &PhaseReporter,
    ) -> Result<GenerationSuccess, BackendError> {
        let response = self
            .client
            .post(&self.generate_url)
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Transport(format!("POST {} failed: {e}", self.generate_url)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                detail: ErrorDetail::from_body(&body).detail,
            });
        }

        let mut response = response;
        let mut buffer = String::new();
        let mut review_id = None;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| BackendError::Transport(format!("failed while reading progress stream: {e}")))?
        {
            buffer.push_str(&String::from_utf8_lossy(&chunk));
            while let Some(newline) = buffer.find('\n') {
                let line = buffer[..newline].trim().to_string();
                buffer.drain(..=newline);
                if !line.is_empty() {
                    Self::handle_event(&line, progress, &mut review_id);
                }
            }
        }

        let tail = buffer.trim();
        if !tail.is_empty() {
            Self::handle_event(tail, progress, &mut review_id);
        }

        review_id
            .map(|review_id| GenerationSuccess { review_id })
            .ok_or_else(|| BackendError::Stream("stream ended without a done event".to_string()))
    }
}
