// ABOUTME: Test utilities for venturesynapse-agent, including stub completion runtimes.
// ABOUTME: Used in tests to drive the pipeline without real API calls and to inspect what was sent.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use venturesynapse_core::{ChatMessage, Role};

use crate::runtime::{CompletionError, CompletionRuntime};

/// One request a stub runtime received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub history: Vec<ChatMessage>,
}

impl RecordedCall {
    /// Content of the newest user message in the request.
    pub fn last_user_message(&self) -> &str {
        self.history
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Default)]
struct CallLog(Mutex<Vec<RecordedCall>>);

impl CallLog {
    fn record(&self, system_prompt: &str, history: &[ChatMessage]) -> RecordedCall {
        let call = RecordedCall {
            system_prompt: system_prompt.to_owned(),
            history: history.to_vec(),
        };
        if let Ok(mut calls) = self.0.lock() {
            calls.push(call.clone());
        }
        call
    }

    fn snapshot(&self) -> Vec<RecordedCall> {
        self.0.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

/// A stub runtime that answers every request by echoing the newest user message.
#[derive(Debug, Default)]
pub struct EchoRuntime {
    log: CallLog,
}

impl EchoRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.log.snapshot()
    }
}

#[async_trait]
impl CompletionRuntime for EchoRuntime {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        let call = self.log.record(system_prompt, history);
        Ok(format!("echo: {}", call.last_user_message()))
    }

    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}

/// A stub runtime that returns pre-configured replies in order, then fails
/// with `InvalidResponse` once the script is exhausted.
#[derive(Debug)]
pub struct ScriptedRuntime {
    replies: Mutex<VecDeque<String>>,
    log: CallLog,
}

impl ScriptedRuntime {
    pub fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(str::to_owned).collect()),
            log: CallLog::default(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.log.snapshot()
    }
}

#[async_trait]
impl CompletionRuntime for ScriptedRuntime {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        self.log.record(system_prompt, history);
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .ok_or_else(|| CompletionError::InvalidResponse("script exhausted".to_string()))
    }

    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
