use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::io::api_client::{ApiError, TaskApi};
use crate::model::task::{Task, TaskFields, TaskId};

/// The UI element that issued a request. Each control has at most one
/// request in flight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    Loader,
    Form,
    Row(TaskId),
}

#[derive(Debug, Clone)]
pub enum Request {
    List,
    Create(TaskFields),
    Update(TaskId, TaskFields),
    Complete(TaskId),
    Delete(TaskId),
}

#[derive(Debug)]
pub enum Response {
    Listed(Result<Vec<Task>, ApiError>),
    Created(Result<Task, ApiError>),
    Updated(TaskId, Result<Task, ApiError>),
    Completed(TaskId, Result<Task, ApiError>),
    Deleted(TaskId, Result<(), ApiError>),
}

/// Identifies one issued request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub control: Control,
    pub seq: u64,
}

/// A finished request, sent from the worker back to the event loop
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub response: Response,
}

fn execute(api: &dyn TaskApi, request: Request) -> Response {
    match request {
        Request::List => Response::Listed(api.list_tasks()),
        Request::Create(fields) => Response::Created(api.create_task(&fields)),
        Request::Update(id, fields) => {
            let result = api.update_task(&id, &fields);
            Response::Updated(id, result)
        }
        Request::Complete(id) => {
            let result = api.complete_task(&id);
            Response::Completed(id, result)
        }
        Request::Delete(id) => {
            let result = api.delete_task(&id);
            Response::Deleted(id, result)
        }
    }
}

/// Runs API requests off the UI thread and hands back their completions.
///
/// Every request runs on its own worker thread. Completions are queued on
/// a channel and picked up by [`Dispatcher::poll`] once per tick. A
/// completion is delivered only if its ticket is still the current one for
/// its control; superseded ones are dropped. Dropping the dispatcher drops
/// the receiver, so late workers have nowhere to deliver.
pub struct Dispatcher {
    api: Arc<dyn TaskApi>,
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
    next_seq: u64,
    in_flight: HashMap<Control, u64>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        Dispatcher {
            api,
            tx,
            rx,
            next_seq: 0,
            in_flight: HashMap::new(),
        }
    }

    pub fn is_busy(&self, control: &Control) -> bool {
        self.in_flight.contains_key(control)
    }

    /// Number of requests still awaited
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Start `request` for `control`. A request already in flight for the
    /// same control is superseded and its response will be discarded.
    pub fn submit(&mut self, control: Control, request: Request) -> Ticket {
        self.next_seq += 1;
        let ticket = Ticket {
            control: control.clone(),
            seq: self.next_seq,
        };
        if self.in_flight.insert(control, ticket.seq).is_some() {
            tracing::debug!(seq = ticket.seq, "superseding in-flight request");
        }

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let worker_ticket = ticket.clone();
        thread::spawn(move || {
            let response = execute(api.as_ref(), request);
            let _ = tx.send(Completion {
                ticket: worker_ticket,
                response,
            });
        });
        ticket
    }

    /// Non-blocking poll for finished requests. Stale completions are dropped.
    pub fn poll(&mut self) -> Vec<Completion> {
        let mut ready = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            if let Some(c) = self.accept(completion) {
                ready.push(c);
            }
        }
        ready
    }

    /// Block until the next current completion arrives or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> Option<Completion> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            let completion = self.rx.recv_timeout(remaining).ok()?;
            if let Some(c) = self.accept(completion) {
                return Some(c);
            }
        }
    }

    fn accept(&mut self, completion: Completion) -> Option<Completion> {
        let Ticket { control, seq } = &completion.ticket;
        if self.in_flight.get(control) == Some(seq) {
            self.in_flight.remove(control);
            Some(completion)
        } else {
            tracing::debug!(seq, "discarding stale response");
            None
        }
    }
}
