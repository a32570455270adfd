// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scripted transport for tests

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{
    interpret_body, EventSink, ProgressEvent, RawResponse, ReadyState, Transport, TransportCall,
    TransportError,
};

/// A canned outcome for one call
#[derive(Debug, Clone)]
pub struct MockReply {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    upload_progress: Vec<ProgressEvent>,
    outcome: MockOutcome,
}

#[derive(Debug, Clone)]
enum MockOutcome {
    Complete,
    Error(String),
    /// End without completing or failing
    Hang,
}

impl MockReply {
    /// Reply with `status` and an empty body
    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
            upload_progress: Vec::new(),
            outcome: MockOutcome::Complete,
        }
    }

    /// 200 with a JSON body and `content-type: application/json`
    pub fn json(value: serde_json::Value) -> Self {
        Self::status(200)
            .header("Content-Type", "application/json")
            .body(value.to_string())
    }

    /// Fail with a transport error
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Error(message.into()),
            ..Self::status(0)
        }
    }

    /// Finish without reporting completion
    pub fn hang() -> Self {
        Self {
            outcome: MockOutcome::Hang,
            ..Self::status(0)
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Emit an upload progress event before completing
    pub fn upload_progress(mut self, event: ProgressEvent) -> Self {
        self.upload_progress.push(event);
        self
    }

    fn raw_headers(&self) -> String {
        self.headers
            .iter()
            .map(|(n, v)| format!("{}: {}\r\n", n, v))
            .collect()
    }
}

/// Transport that replays queued [`MockReply`]s and records every call
///
/// When the queue is empty, calls complete with `200` and an empty body.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    calls: Mutex<Vec<TransportCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply
    pub fn push(&self, reply: MockReply) -> &Self {
        self.replies.lock().push_back(reply);
        self
    }

    /// Calls seen so far, oldest first
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }

    /// Most recent call
    pub fn last_call(&self) -> Option<TransportCall> {
        self.calls.lock().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, call: TransportCall, events: EventSink) {
        let reply = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| MockReply::status(200));
        let response_type = call.response_type;
        self.calls.lock().push(call);

        events.ready_state(ReadyState::Opened);
        for progress in &reply.upload_progress {
            events.upload_progress(*progress);
        }

        match reply.outcome {
            MockOutcome::Error(ref message) => {
                events.error(TransportError::Other(message.clone()));
            }
            MockOutcome::Hang => {}
            MockOutcome::Complete => {
                events.ready_state(ReadyState::HeadersReceived);
                events.ready_state(ReadyState::Loading);
                let (response, response_text) = interpret_body(&reply.body, response_type);
                events.complete(RawResponse {
                    status: reply.status,
                    raw_headers: reply.raw_headers(),
                    response,
                    response_text,
                });
            }
        }
    }
}
