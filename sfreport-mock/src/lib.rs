//! Scripted transport for sfreport tests and demos.
//!
//! [`MockTransport`] answers requests from a FIFO script and records every
//! request it sees. [`fixtures`] builds realistic login, describe, and
//! execution bodies.

use std::collections::VecDeque;

use async_trait::async_trait;
use sfreport_core::{HttpRequest, HttpResponse, Transport, TransportError};
use tokio::sync::Mutex;

pub mod fixtures;

/// Instruction for how the next request should be answered.
#[derive(Clone, Debug)]
pub enum MockBehavior {
    /// Answer with this status and body.
    Respond(HttpResponse),
    /// Fail at the transport level.
    Fail(TransportError),
}

#[derive(Default)]
struct InternalState {
    script: VecDeque<MockBehavior>,
    requests: Vec<HttpRequest>,
}

/// Transport that replays a script, one entry per request.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<InternalState>,
}

impl MockTransport {
    /// Empty script; every request fails until entries are queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a behavior.
    #[must_use]
    pub fn then(mut self, behavior: MockBehavior) -> Self {
        self.state.get_mut().script.push_back(behavior);
        self
    }

    /// Queue a response.
    #[must_use]
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.then(MockBehavior::Respond(HttpResponse::new(status, body)))
    }

    /// Queue a transport failure.
    #[must_use]
    pub fn fail(self, msg: impl Into<String>) -> Self {
        self.then(MockBehavior::Fail(TransportError::new(msg)))
    }

    /// Requests received so far, in order.
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Script entries not consumed yet.
    pub async fn remaining(&self) -> usize {
        self.state.lock().await.script.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut st = self.state.lock().await;
        let line = format!("{} {}", req.method.as_str(), req.url);
        st.requests.push(req);
        match st.script.pop_front() {
            Some(MockBehavior::Respond(resp)) => Ok(resp),
            Some(MockBehavior::Fail(err)) => Err(err),
            None => Err(TransportError::new(format!(
                "mock transport: nothing scripted for {line}"
            ))),
        }
    }
}
