//! Runs API calls off the UI thread and reports back over a channel.

use super::{ApiError, TodoApi};
use crate::domain::{NewTask, Task, TaskId, Ticket};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Why an update was sent, so its completion can be routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOrigin {
    Toggle,
    Edit,
}

/// A remote call the UI wants made
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Load { ticket: Ticket },
    Create { ticket: Ticket, task: NewTask },
    Update { ticket: Ticket, task: Task, origin: UpdateOrigin },
    Delete { ticket: Ticket, id: TaskId },
}

/// Result of a finished request, applied back on the UI thread
#[derive(Debug)]
pub enum Completion {
    Loaded { ticket: Ticket, result: Result<Vec<Task>, ApiError> },
    Created { ticket: Ticket, result: Result<Task, ApiError> },
    Updated { ticket: Ticket, origin: UpdateOrigin, result: Result<Task, ApiError> },
    Deleted { ticket: Ticket, id: TaskId, result: Result<(), ApiError> },
}

/// Perform one request against the API
pub async fn execute(api: &dyn TodoApi, request: Request) -> Completion {
    match request {
        Request::Load { ticket } => Completion::Loaded {
            ticket,
            result: api.list().await,
        },
        Request::Create { ticket, task } => Completion::Created {
            ticket,
            result: api.create(&task).await,
        },
        Request::Update { ticket, task, origin } => Completion::Updated {
            ticket,
            origin,
            result: api.update(&task).await,
        },
        Request::Delete { ticket, id } => {
            let result = api.delete(&id).await;
            Completion::Deleted { ticket, id, result }
        }
    }
}

/// Fire-and-forget request runner bound to a tokio runtime
pub struct Dispatcher {
    api: Arc<dyn TodoApi>,
    handle: Handle,
    tx: UnboundedSender<Completion>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn TodoApi>, handle: Handle) -> (Self, UnboundedReceiver<Completion>) {
        let (tx, rx) = unbounded_channel();
        (Self { api, handle, tx }, rx)
    }

    /// Spawn the request; its completion shows up on the receiver
    pub fn send(&self, request: Request) {
        tracing::debug!("dispatching {:?}", request);
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let completion = execute(api.as_ref(), request).await;
            if tx.send(completion).is_err() {
                tracing::debug!("completion dropped, UI already gone");
            }
        });
    }
}
