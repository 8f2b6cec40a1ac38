//! # HTTP Service
//!
//! Executes the form's request off the event loop and reports the result as
//! a single `Completion` through a channel.

use crate::tui::events::Completion;
use anyhow::Result;
use reqwest::header::CONTENT_TYPE;
use std::fmt;
use tokio::sync::mpsc;

pub const URL_REQUIRED: &str = "URL is required";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Raw field values captured at submit time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: String,
    pub url: String,
    pub body: String,
}

impl RequestSpec {
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body: body.into(),
        }
    }

    /// Validate and normalise. Failures are already shaped as the completion
    /// the user should see.
    pub fn prepare(&self) -> std::result::Result<PreparedRequest, Completion> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(Completion::error(URL_REQUIRED));
        }

        let method = HttpMethod::parse(&self.method)?;
        Ok(PreparedRequest {
            method,
            url: url.to_string(),
            body: self.body.clone(),
        })
    }
}

/// Methods the form can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// Case-insensitive; blank means GET
    pub fn parse(raw: &str) -> std::result::Result<Self, Completion> {
        let method = raw.trim().to_uppercase();
        match method.as_str() {
            "" | "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            _ => Err(Completion::error(format!("unsupported method {method}"))),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: String,
}

/// Sends requests with a shared reqwest client
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    client: reqwest::Client,
}

impl RequestDispatcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    /// Run one request to completion. Never fails: every problem becomes
    /// `Completion::Error`.
    pub async fn dispatch(&self, spec: &RequestSpec) -> Completion {
        let request = match spec.prepare() {
            Ok(request) => request,
            Err(completion) => {
                tracing::debug!("Request rejected before sending: {}", completion);
                return completion;
            }
        };

        match self.send(&request).await {
            Ok((status, body)) => {
                tracing::debug!(
                    "{} {} answered {} ({} bytes)",
                    request.method,
                    request.url,
                    status,
                    body.len()
                );
                Completion::Success { status, body }
            }
            Err(e) => {
                // Show full error chain using anyhow's chain iterator
                let mut message = format!("{e}");
                for cause in e.chain().skip(1) {
                    message.push_str(&format!("\n  Caused by: {cause}"));
                }
                tracing::error!("HTTP request failed: {message}");
                Completion::Error { message }
            }
        }
    }

    async fn send(&self, request: &PreparedRequest) -> Result<(u16, String)> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self
                .client
                .post(&request.url)
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(request.body.clone()),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Owns the dispatcher and the completion channel used by the event loop
pub struct HttpService {
    dispatcher: RequestDispatcher,
    /// Channel for receiving async HTTP completions
    response_receiver: mpsc::Receiver<Completion>,
    /// Channel sender for async tasks to send completions
    response_sender: mpsc::Sender<Completion>,
}

impl HttpService {
    pub fn new() -> Result<Self> {
        Ok(Self::with_dispatcher(RequestDispatcher::new()?))
    }

    pub fn with_dispatcher(dispatcher: RequestDispatcher) -> Self {
        let (response_sender, response_receiver) = mpsc::channel(10);
        Self {
            dispatcher,
            response_receiver,
            response_sender,
        }
    }

    /// Execute a request on a detached tokio task. Exactly one completion
    /// is sent back per call.
    pub fn execute_async(&self, spec: RequestSpec) {
        let dispatcher = self.dispatcher.clone();
        let result_sender = self.response_sender.clone();

        tokio::spawn(async move {
            let completion = dispatcher.dispatch(&spec).await;
            // Ignore send errors (receiver might have been dropped)
            let _ = result_sender.send(completion).await;
        });
    }

    /// Check for a finished request without blocking
    pub fn poll_response(&mut self) -> Option<Completion> {
        self.response_receiver.try_recv().ok()
    }

    /// Wait for the next finished request
    pub async fn next_response(&mut self) -> Option<Completion> {
        self.response_receiver.recv().await
    }
}
