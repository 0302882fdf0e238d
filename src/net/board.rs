//! Status snapshot shared between the tick loop and the HTTP workers.
//!
//! The tick loop is the only writer: it publishes a fresh [`StatusReport`]
//! after every sensor pipeline run.  Server handlers only read the
//! snapshot, and they leave a note for every request they answer.  The
//! tick loop later drains those notes into [`AppEvent::RequestServed`](crate::app::events::AppEvent::RequestServed),
//! so events are only ever emitted from the loop thread.
//!
//! ```text
//!  tick loop ── publish ──▶ ┌────────────┐ ◀── serve ── httpd worker
//!            ◀── drain ──── │ StatusBoard │
//!                           └────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::app::presentation::StatusReport;
use crate::net::http::{self, Reply};

/// Served-request notes kept until the loop drains them; older ones are
/// dropped when the queue is full.
pub const SERVED_BACKLOG: usize = 8;

/// One answered request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedRequest {
    pub status: u16,
    pub path: heapless::String<64>,
}

struct Shared {
    report: StatusReport,
    backlog: heapless::Deque<ServedRequest, SERVED_BACKLOG>,
    served: u32,
}

/// Cheap to clone; every clone refers to the same snapshot.
#[derive(Clone)]
pub struct StatusBoard {
    inner: Arc<Mutex<Shared>>,
}

impl StatusBoard {
    pub fn new(initial: StatusReport) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Shared {
                report: initial,
                backlog: heapless::Deque::new(),
                served: 0,
            })),
        }
    }

    /// Replace the snapshot.
    pub fn publish(&self, report: StatusReport) {
        self.lock().report = report;
    }

    pub fn snapshot(&self) -> StatusReport {
        self.lock().report
    }

    /// Answer a GET for `uri` from the current snapshot and note it.
    pub fn serve(&self, uri: &str) -> Reply {
        let reply = http::respond(uri, || self.snapshot());

        let path = uri.split_once('?').map_or(uri, |(path, _)| path);
        let mut label = heapless::String::new();
        for c in path.chars() {
            if label.push(c).is_err() {
                break;
            }
        }

        let mut shared = self.lock();
        shared.served = shared.served.wrapping_add(1);
        if shared.backlog.is_full() {
            shared.backlog.pop_front();
        }
        let _ = shared.backlog.push_back(ServedRequest {
            status: reply.status,
            path: label,
        });
        reply
    }

    /// Hand every pending note to `f`, oldest first.
    pub fn drain_served(&self, mut f: impl FnMut(ServedRequest)) {
        let pending: heapless::Vec<ServedRequest, SERVED_BACKLOG> = {
            let mut shared = self.lock();
            core::iter::from_fn(|| shared.backlog.pop_front()).collect()
        };
        pending.into_iter().for_each(&mut f);
    }

    /// Requests answered since startup.
    pub fn served(&self) -> u32 {
        self.lock().served
    }

    /// A handler that panicked mid-update leaves at worst a stale snapshot,
    /// so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
