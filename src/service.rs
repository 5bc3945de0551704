//! Isolated execution context for the engine.
//!
//! The engine runs on a dedicated worker thread and is driven by typed
//! request/response messages, one in flight at a time. A pathological
//! input's bounded-but-costly scan then blocks only the worker, never the
//! caller's interactive thread, and hard cancellation is "drop the service
//! and start a new one".

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;

use anyhow::{Context, Result, anyhow};

use crate::engine::{Engine, GeneratedPattern};
use crate::executor::TestResult;
use crate::explain::ExplanationResult;

#[derive(Debug, Clone)]
pub enum Request {
    Explain { pattern: String },
    Test { pattern: String, subject: String },
    Generate { description: String },
}

#[derive(Debug, Clone)]
pub enum Response {
    Explanation(ExplanationResult),
    Test(TestResult),
    Generated(GeneratedPattern),
}

pub struct EngineService {
    requests: Option<Sender<Request>>,
    responses: Receiver<Response>,
    worker: Option<JoinHandle<()>>,
}

impl EngineService {
    /// Spawn a worker owning a default-configured engine.
    pub fn spawn() -> Self {
        Self::with_engine(Engine::default())
    }

    /// Spawn a worker owning the given engine (alternate registries in
    /// tests).
    pub fn with_engine(engine: Engine) -> Self {
        let (request_tx, request_rx) = channel::<Request>();
        let (response_tx, response_rx) = channel::<Response>();
        let worker = std::thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let response = match request {
                    Request::Explain { pattern } => {
                        Response::Explanation(engine.explain(&pattern))
                    }
                    Request::Test { pattern, subject } => {
                        Response::Test(engine.test(&pattern, &subject))
                    }
                    Request::Generate { description } => {
                        Response::Generated(engine.generate_report(&description))
                    }
                };
                if response_tx.send(response).is_err() {
                    break;
                }
            }
        });
        Self {
            requests: Some(request_tx),
            responses: response_rx,
            worker: Some(worker),
        }
    }

    /// Send one request and block for its response. Taking `&mut self`
    /// keeps requests strictly one-in-flight.
    pub fn call(&mut self, request: Request) -> Result<Response> {
        self.requests
            .as_ref()
            .ok_or_else(|| anyhow!("engine service already shut down"))?
            .send(request)
            .context("engine worker is gone")?;
        self.responses.recv().context("engine worker died mid-request")
    }
}

impl Drop for EngineService {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        drop(self.requests.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
