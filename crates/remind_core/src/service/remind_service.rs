//! Serial background operation queue with observer notification.
//!
//! # Responsibility
//! - Accept create/update/delete requests from any thread.
//! - Execute them strictly in submission order against the store.
//! - Notify every registered observer after each operation completes.
//!
//! # Invariants
//! - At most one store mutation is in flight at any time.
//! - Completion events are delivered in execution (FIFO) order.
//! - Observers registered at completion time receive the event; observers
//!   removed before completion do not.

use crate::model::reminder::ReminderId;
use crate::store::reminder_store::ReminderStore;
use log::{error, info};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Handle identifying one registered observer.
pub type ObserverId = u64;

/// Mutation request accepted by the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpRequest {
    Create {
        title: String,
        time: i64,
    },
    Update {
        id: ReminderId,
        title: String,
        time: i64,
    },
    Delete {
        id: ReminderId,
    },
}

impl OpRequest {
    fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

/// Completion event broadcast to observers after each operation.
///
/// `Updated` and `Deleted` are emitted even when the id no longer exists;
/// zero affected rows is a normal outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpEvent {
    Created {
        id: ReminderId,
    },
    Updated {
        id: ReminderId,
    },
    Deleted {
        id: ReminderId,
    },
    /// The store rejected the operation. Carries the original request so
    /// screens can tell the user what exactly did not happen.
    Failed {
        request: OpRequest,
        message: String,
    },
}

type ObserverFn = Box<dyn Fn(&OpEvent) + Send>;

#[derive(Default)]
struct ObserverRegistry {
    next_id: ObserverId,
    observers: Vec<(ObserverId, ObserverFn)>,
}

/// Serial background operation queue over a reminder store.
///
/// Owns the single worker thread that holds the store side of the queue.
/// [`RemindService::shutdown`] (or dropping the service) stops accepting
/// requests, drains everything already queued, and joins the worker.
pub struct RemindService {
    tx: Option<Sender<OpRequest>>,
    worker: Option<JoinHandle<()>>,
    observers: Arc<Mutex<ObserverRegistry>>,
}

impl RemindService {
    /// Starts the worker thread that owns `store`.
    pub fn start<R>(store: R) -> Self
    where
        R: ReminderStore + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let observers = Arc::new(Mutex::new(ObserverRegistry::default()));
        let worker_observers = Arc::clone(&observers);
        let worker = thread::spawn(move || worker_loop(store, rx, worker_observers));

        Self {
            tx: Some(tx),
            worker: Some(worker),
            observers,
        }
    }

    /// Submits a mutation request for asynchronous execution.
    ///
    /// Non-blocking; execution order matches submission order. A request
    /// that cannot be queued any more (worker gone) is dropped and logged.
    pub fn submit(&self, request: OpRequest) {
        let Some(tx) = self.tx.as_ref() else {
            error!("event=op_submit module=service status=rejected reason=shutdown");
            return;
        };
        if tx.send(request).is_err() {
            error!("event=op_submit module=service status=error reason=worker_gone");
        }
    }

    /// Queues creation of a new reminder.
    pub fn create_reminder(&self, title: impl Into<String>, time: i64) {
        self.submit(OpRequest::Create {
            title: title.into(),
            time,
        });
    }

    /// Queues an update of an existing reminder's title and time.
    pub fn update_reminder(&self, id: ReminderId, title: impl Into<String>, time: i64) {
        self.submit(OpRequest::Update {
            id,
            title: title.into(),
            time,
        });
    }

    /// Queues deletion of a single reminder.
    pub fn delete_reminder(&self, id: ReminderId) {
        self.submit(OpRequest::Delete { id });
    }

    /// Queues deletion of a batch of reminders, one request per id.
    pub fn delete_reminders(&self, ids: &[ReminderId]) {
        for &id in ids {
            self.delete_reminder(id);
        }
    }

    /// Registers an observer called after every completed operation.
    ///
    /// Callbacks run on the worker thread, under the registry lock, in
    /// registration order; they must not register or remove observers.
    /// Use [`RemindService::subscribe`] to receive events on a thread of
    /// your own.
    pub fn add_observer(&self, callback: impl Fn(&OpEvent) + Send + 'static) -> ObserverId {
        let mut registry = lock_registry(&self.observers);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.observers.push((id, Box::new(callback)));
        id
    }

    /// Removes a previously registered observer.
    ///
    /// Operations completing after removal are no longer delivered to it.
    pub fn remove_observer(&self, id: ObserverId) {
        let mut registry = lock_registry(&self.observers);
        registry
            .observers
            .retain(|(observer_id, _)| *observer_id != id);
    }

    /// Registers a channel-backed observer and returns its receiver.
    ///
    /// Events arrive on the receiver in completion order, so the caller
    /// consumes them on whichever thread it owns.
    pub fn subscribe(&self) -> (ObserverId, Receiver<OpEvent>) {
        let (event_tx, event_rx) = mpsc::channel();
        let id = self.add_observer(move |event| {
            // A closed receiver only means the subscriber went away.
            let _ = event_tx.send(event.clone());
        });
        (id, event_rx)
    }

    /// Stops accepting requests, drains the queue, and joins the worker.
    pub fn shutdown(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("event=service_shutdown module=service status=error reason=worker_panicked");
            } else {
                info!("event=service_shutdown module=service status=ok");
            }
        }
    }
}

impl Drop for RemindService {
    fn drop(&mut self) {
        self.finish();
    }
}

fn worker_loop<R: ReminderStore>(
    store: R,
    requests: Receiver<OpRequest>,
    observers: Arc<Mutex<ObserverRegistry>>,
) {
    // Channel disconnect is the shutdown signal; everything already queued
    // is drained before the loop ends.
    while let Ok(request) = requests.recv() {
        let started_at = Instant::now();
        let event = execute(&store, &request);
        match &event {
            OpEvent::Failed { message, .. } => error!(
                "event=op_execute module=service status=error op={} duration_ms={} error={message}",
                request.kind(),
                started_at.elapsed().as_millis()
            ),
            _ => info!(
                "event=op_execute module=service status=ok op={} duration_ms={}",
                request.kind(),
                started_at.elapsed().as_millis()
            ),
        }
        notify(&observers, &event);
    }
}

fn execute<R: ReminderStore>(store: &R, request: &OpRequest) -> OpEvent {
    let outcome = match request {
        OpRequest::Create { title, time } => store
            .create(title, *time)
            .map(|id| OpEvent::Created { id }),
        OpRequest::Update { id, title, time } => store
            .update(*id, title, *time)
            .map(|_| OpEvent::Updated { id: *id }),
        OpRequest::Delete { id } => store
            .delete_by_id(*id)
            .map(|_| OpEvent::Deleted { id: *id }),
    };

    outcome.unwrap_or_else(|err| OpEvent::Failed {
        request: request.clone(),
        message: err.to_string(),
    })
}

fn notify(observers: &Arc<Mutex<ObserverRegistry>>, event: &OpEvent) {
    let registry = lock_registry(observers);
    for (_, observer) in &registry.observers {
        observer(event);
    }
}

fn lock_registry(observers: &Arc<Mutex<ObserverRegistry>>) -> MutexGuard<'_, ObserverRegistry> {
    observers.lock().unwrap_or_else(|err| err.into_inner())
}
