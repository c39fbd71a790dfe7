//! Requests, their outcomes, and the dispatcher that runs them off the UI thread.
//!
//! Controllers never touch the network. They return a [`Request`]; the
//! [`Dispatcher`] spawns it on the tokio runtime and sends the [`Outcome`]
//! back over an mpsc channel that the event loop drains every tick.

use std::sync::Arc;
use std::sync::mpsc::Sender;

use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::api::{ApiError, ClientPayload, ClientService, Record};

use super::Route;

/// One transport call a controller wants made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// Tagged with the list controller's load sequence.
    List(u64),
    Get(String),
    Create(ClientPayload),
    Update(String, ClientPayload),
    Delete(String),
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::List(_) => "list",
            Request::Get(_) => "get",
            Request::Create(_) => "create",
            Request::Update(..) => "update",
            Request::Delete(_) => "delete",
        }
    }
}

/// Result of a finished [`Request`], tagged with the id it was issued for.
#[derive(Debug)]
pub enum Outcome {
    Listed {
        seq: u64,
        result: Result<Vec<Record>, ApiError>,
    },
    Fetched {
        id: String,
        result: Result<Record, ApiError>,
    },
    Created(Result<Record, ApiError>),
    Updated {
        id: String,
        result: Result<Record, ApiError>,
    },
    Deleted {
        id: String,
        result: Result<(), ApiError>,
    },
}

/// What a controller asks the event loop to do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Request(Request),
    Navigate(Route),
}

/// Spawns requests on a runtime and reports outcomes on a channel.
#[derive(Clone)]
pub struct Dispatcher {
    service: Arc<ClientService>,
    runtime: Handle,
    outcomes: Sender<Outcome>,
}

impl Dispatcher {
    pub fn new(service: ClientService, runtime: Handle, outcomes: Sender<Outcome>) -> Self {
        Self {
            service: Arc::new(service),
            runtime,
            outcomes,
        }
    }

    /// Fire and forget; the outcome arrives on the channel.
    pub fn dispatch(&self, request: Request) {
        debug!(request = request.name(), "dispatching");
        let service = Arc::clone(&self.service);
        let tx = self.outcomes.clone();
        self.runtime.spawn(async move {
            let outcome = execute(&service, request).await;
            if tx.send(outcome).is_err() {
                debug!("event loop gone, dropping outcome");
            }
        });
    }
}

/// Run one request to completion.
pub async fn execute(service: &ClientService, request: Request) -> Outcome {
    let outcome = match request {
        Request::List(seq) => Outcome::Listed {
            seq,
            result: service.list().await,
        },
        Request::Get(id) => {
            let result = service.get(&id).await;
            Outcome::Fetched { id, result }
        }
        Request::Create(payload) => Outcome::Created(service.create(&payload).await),
        Request::Update(id, payload) => {
            let result = service.update(&id, &payload).await;
            Outcome::Updated { id, result }
        }
        Request::Delete(id) => {
            let result = service.delete(&id).await;
            Outcome::Deleted { id, result }
        }
    };
    if let Some(err) = outcome.error() {
        warn!(
            error = %err,
            status = ?err.status(),
            cause = ?std::error::Error::source(err).map(|s| s.to_string()),
            "request failed"
        );
    }
    outcome
}

impl Outcome {
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Outcome::Listed { result: Err(e), .. }
            | Outcome::Created(Err(e))
            | Outcome::Fetched { result: Err(e), .. }
            | Outcome::Updated { result: Err(e), .. }
            | Outcome::Deleted { result: Err(e), .. } => Some(e),
            _ => None,
        }
    }
}
