//! Test backends — scripted and failing `TourBackend` implementations.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use tourguide_core::backend::{
    AskResponse, AttractionsResponse, ExplainResponse, SpeakQuery, SpeakResponse, TourBackend,
};
use tourguide_core::error::TourError;

type Scripted<T> = Mutex<VecDeque<Result<Option<T>, TourError>>>;

/// A backend that answers each endpoint from its own queue of scripted
/// results and records every call. An exhausted queue answers `Ok(None)`.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    attractions: Scripted<AttractionsResponse>,
    speak: Scripted<SpeakResponse>,
    explain: Scripted<ExplainResponse>,
    ask: Scripted<AskResponse>,
    speak_gate: Option<Arc<Notify>>,
    attraction_calls: Mutex<Vec<(f64, f64)>>,
    speak_calls: Mutex<Vec<SpeakQuery>>,
    explain_calls: Mutex<Vec<String>>,
    ask_calls: Mutex<Vec<String>>,
}

fn next<T>(queue: &Scripted<T>) -> Result<Option<T>, TourError> {
    queue.lock().unwrap().pop_front().unwrap_or(Ok(None))
}

impl ScriptedBackend {
    /// Creates a backend with empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a result for the next `/attractions` call.
    #[must_use]
    pub fn with_attractions(self, result: Result<Option<AttractionsResponse>, TourError>) -> Self {
        self.attractions.lock().unwrap().push_back(result);
        self
    }

    /// Queues a result for the next `/speak` call.
    #[must_use]
    pub fn with_speak(self, result: Result<Option<SpeakResponse>, TourError>) -> Self {
        self.speak.lock().unwrap().push_back(result);
        self
    }

    /// Holds every `/speak` answer until `gate` is notified once per call.
    /// The call itself is recorded before waiting.
    #[must_use]
    pub fn with_speak_gate(mut self, gate: Arc<Notify>) -> Self {
        self.speak_gate = Some(gate);
        self
    }

    /// Queues a result for the next `/explain` call.
    #[must_use]
    pub fn with_explain(self, result: Result<Option<ExplainResponse>, TourError>) -> Self {
        self.explain.lock().unwrap().push_back(result);
        self
    }

    /// Queues a result for the next `/ask` call.
    #[must_use]
    pub fn with_ask(self, result: Result<Option<AskResponse>, TourError>) -> Self {
        self.ask.lock().unwrap().push_back(result);
        self
    }

    /// Coordinates of every `/attractions` call.
    pub fn attraction_calls(&self) -> Vec<(f64, f64)> {
        self.attraction_calls.lock().unwrap().clone()
    }

    /// Every `/speak` query sent.
    pub fn speak_calls(&self) -> Vec<SpeakQuery> {
        self.speak_calls.lock().unwrap().clone()
    }

    /// Every name sent to `/explain`.
    pub fn explain_calls(&self) -> Vec<String> {
        self.explain_calls.lock().unwrap().clone()
    }

    /// Every query posted to `/ask`.
    pub fn ask_calls(&self) -> Vec<String> {
        self.ask_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TourBackend for ScriptedBackend {
    async fn attractions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<AttractionsResponse>, TourError> {
        self.attraction_calls
            .lock()
            .unwrap()
            .push((latitude, longitude));
        next(&self.attractions)
    }

    async fn speak(&self, query: &SpeakQuery) -> Result<Option<SpeakResponse>, TourError> {
        self.speak_calls.lock().unwrap().push(query.clone());
        if let Some(gate) = &self.speak_gate {
            gate.notified().await;
        }
        next(&self.speak)
    }

    async fn explain(&self, name: &str) -> Result<Option<ExplainResponse>, TourError> {
        self.explain_calls.lock().unwrap().push(name.to_owned());
        next(&self.explain)
    }

    async fn ask(&self, query: &str) -> Result<Option<AskResponse>, TourError> {
        self.ask_calls.lock().unwrap().push(query.to_owned());
        next(&self.ask)
    }
}

/// A backend whose every call fails with a network error.
#[derive(Debug)]
pub struct FailingBackend;

#[async_trait]
impl TourBackend for FailingBackend {
    async fn attractions(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<Option<AttractionsResponse>, TourError> {
        Err(TourError::Network("connection refused".into()))
    }

    async fn speak(&self, _query: &SpeakQuery) -> Result<Option<SpeakResponse>, TourError> {
        Err(TourError::Network("connection refused".into()))
    }

    async fn explain(&self, _name: &str) -> Result<Option<ExplainResponse>, TourError> {
        Err(TourError::Network("connection refused".into()))
    }

    async fn ask(&self, _query: &str) -> Result<Option<AskResponse>, TourError> {
        Err(TourError::Network("connection refused".into()))
    }
}
