//! # Lookup Service
//!
//! Issues the hours request and reports completions back through a channel,
//! so the single-threaded controller never blocks on the network.
//!
//! At most one request is in flight. Starting a new one cancels the previous
//! request's token; its task drops the transport future and reports
//! [`LookupError::Cancelled`]. The timeout timer lives inside the request
//! future and is disarmed whenever that future settles.

use crate::repl::models::{Identifier, ResultRecord};
use crate::repl::services::lookup_error::LookupError;
use anyhow::Result;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Query parameter carrying the identifier
pub const IDENTIFIER_QUERY_PARAM: &str = "matricula";

/// Client-enforced request budget
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of one started request, tagged with the sequence number it was
/// started under
#[derive(Debug)]
pub struct FetchCompletion {
    pub seq: u64,
    pub identifier: Identifier,
    pub result: Result<ResultRecord, LookupError>,
}

pub struct LookupService {
    client: reqwest::Client,
    api_url: String,
    timeout: Duration,
    /// Token of the request currently in flight
    in_flight: Option<CancellationToken>,
    completion_sender: mpsc::Sender<FetchCompletion>,
    completion_receiver: mpsc::Receiver<FetchCompletion>,
}

impl LookupService {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let (completion_sender, completion_receiver) = mpsc::channel(16);
        let api_url = api_url.into();

        tracing::debug!("LookupService created for {} (timeout {:?})", api_url, timeout);

        Ok(Self {
            client,
            api_url,
            timeout,
            in_flight: None,
            completion_sender,
            completion_receiver,
        })
    }

    /// Fetch one record, awaiting the response in place
    pub async fn fetch(&self, identifier: &Identifier) -> Result<ResultRecord, LookupError> {
        request_record(&self.client, &self.api_url, self.timeout, identifier).await
    }

    /// Start a request in the background, cancelling any request in flight
    ///
    /// The outcome arrives as a [`FetchCompletion`] carrying `seq`.
    pub fn start(&mut self, seq: u64, identifier: Identifier) {
        self.cancel();

        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());

        let client = self.client.clone();
        let api_url = self.api_url.clone();
        let timeout = self.timeout;
        let sender = self.completion_sender.clone();

        tracing::debug!("Starting lookup #{} for {}", seq, identifier);

        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => Err(LookupError::Cancelled),
                result = request_record(&client, &api_url, timeout, &identifier) => result,
            };

            // Receiver may have been dropped with the controller
            let _ = sender
                .send(FetchCompletion {
                    seq,
                    identifier,
                    result,
                })
                .await;
        });
    }

    /// Signal the in-flight request to abort; returns whether one existed
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(token) => {
                token.cancel();
                tracing::debug!("Cancelled in-flight lookup");
                true
            }
            None => false,
        }
    }

    /// Non-blocking check for a finished request
    pub fn poll_completion(&mut self) -> Option<FetchCompletion> {
        self.completion_receiver.try_recv().ok()
    }

    /// Wait for the next finished request
    pub async fn next_completion(&mut self) -> Option<FetchCompletion> {
        self.completion_receiver.recv().await
    }
}

async fn request_record(
    client: &reqwest::Client,
    api_url: &str,
    timeout: Duration,
    identifier: &Identifier,
) -> Result<ResultRecord, LookupError> {
    match tokio::time::timeout(timeout, send_request(client, api_url, identifier)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!("Lookup for {} timed out after {:?}", identifier, timeout);
            Err(LookupError::Timeout(timeout))
        }
    }
}

async fn send_request(
    client: &reqwest::Client,
    api_url: &str,
    identifier: &Identifier,
) -> Result<ResultRecord, LookupError> {
    let response = client
        .get(api_url)
        .query(&[(IDENTIFIER_QUERY_PARAM, identifier.as_str())])
        .header(ACCEPT, "application/json")
        .header(CACHE_CONTROL, "no-store, no-cache")
        .header(PRAGMA, "no-cache")
        .send()
        .await
        .map_err(LookupError::from_transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        });
    }

    let body = response.text().await.map_err(LookupError::from_transport)?;
    Ok(ResultRecord::from_response_body(&body)?)
}
