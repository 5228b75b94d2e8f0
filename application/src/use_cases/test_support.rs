//! Test doubles shared by the use case tests

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use async_trait::async_trait;
use patterns_domain::{Model, RequestId};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

enum Script {
    Reply(String),
    Fail(GatewayError),
    Panic,
}

struct Entry {
    key: String,
    delay_ms: u64,
    script: Script,
}

/// Gateway that answers from a script keyed by prompt substring
///
/// The first entry whose key appears in the prompt wins. Unscripted prompts
/// fail unless `fail_all` supplied a fallback error.
pub struct ScriptedGateway {
    entries: Vec<Entry>,
    fallback: Option<GatewayError>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    models: Mutex<Vec<Model>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            models: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(self, key: &str, text: &str) -> Self {
        self.reply_after(key, 0, text)
    }

    pub fn reply_after(mut self, key: &str, delay_ms: u64, text: &str) -> Self {
        self.entries.push(Entry {
            key: key.to_string(),
            delay_ms,
            script: Script::Reply(text.to_string()),
        });
        self
    }

    pub fn fail(mut self, key: &str, error: GatewayError) -> Self {
        self.entries.push(Entry {
            key: key.to_string(),
            delay_ms: 0,
            script: Script::Fail(error),
        });
        self
    }

    pub fn panic_on(mut self, key: &str) -> Self {
        self.entries.push(Entry {
            key: key.to_string(),
            delay_ms: 0,
            script: Script::Panic,
        });
        self
    }

    pub fn fail_all(mut self, error: GatewayError) -> Self {
        self.fallback = Some(error);
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn models_seen(&self) -> Vec<Model> {
        self.models.lock().unwrap().clone()
    }

    pub fn prompts_seen(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn generate(&self, model: &Model, prompt: &str) -> Result<String, GatewayError> {
        self.models.lock().unwrap().push(model.clone());
        self.prompts.lock().unwrap().push(prompt.to_string());

        let entry = self.entries.iter().find(|e| prompt.contains(&e.key));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let outcome = match entry {
            Some(entry) => {
                if entry.delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(entry.delay_ms)).await;
                }
                match &entry.script {
                    Script::Reply(text) => Ok(text.clone()),
                    Script::Fail(error) => Err(error.clone()),
                    Script::Panic => panic!("scripted panic for {}", entry.key),
                }
            }
            None => Err(self
                .fallback
                .clone()
                .unwrap_or_else(|| GatewayError::Other(format!("unscripted prompt: {}", prompt)))),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(vec![Model::default()])
    }
}

/// Progress notifier that records every callback
#[derive(Default)]
pub struct RecordingProgress {
    started: Mutex<Option<usize>>,
    completed: Mutex<Vec<(String, bool)>>,
    finished: AtomicBool,
}

impl RecordingProgress {
    pub fn started(&self) -> Option<usize> {
        *self.started.lock().unwrap()
    }

    pub fn completed(&self) -> Vec<(String, bool)> {
        self.completed.lock().unwrap().clone()
    }

    pub fn finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_dispatch_start(&self, total_requests: usize) {
        *self.started.lock().unwrap() = Some(total_requests);
    }

    fn on_request_complete(&self, id: &RequestId, success: bool) {
        self.completed
            .lock()
            .unwrap()
            .push((id.to_string(), success));
    }

    fn on_dispatch_complete(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }
}
