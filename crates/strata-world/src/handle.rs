//! Completion handles for regions that may still be generating.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use crossbeam_channel::Sender;

use crate::error::GenerationError;
use crate::pos::RegionPos;
use crate::region::Region;

enum State {
    Pending,
    Ready(Arc<Region>),
    Failed(GenerationError),
}

struct Inner {
    state: State,
    /// Notified with the region's position once it completes.
    subscribers: Vec<Sender<RegionPos>>,
}

/// Shared handle to a region's generation result.
///
/// Completed exactly once by the worker that generated the region. Any
/// number of threads may block on it or subscribe to its completion.
pub struct RegionHandle {
    pos: RegionPos,
    inner: Mutex<Inner>,
    done: Condvar,
    last_access: AtomicU64,
}

impl RegionHandle {
    pub(crate) fn new(pos: RegionPos) -> Self {
        Self {
            pos,
            inner: Mutex::new(Inner {
                state: State::Pending,
                subscribers: Vec::new(),
            }),
            done: Condvar::new(),
            last_access: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn pos(&self) -> RegionPos {
        self.pos
    }

    /// Whether the region has finished generating, successfully or not.
    pub fn is_done(&self) -> bool {
        !matches!(self.lock().state, State::Pending)
    }

    pub(crate) fn is_ready(&self) -> bool {
        matches!(self.lock().state, State::Ready(_))
    }

    /// The result, if generation has finished.
    pub fn try_get(&self) -> Option<Result<Arc<Region>, GenerationError>> {
        match &self.lock().state {
            State::Pending => None,
            State::Ready(region) => Some(Ok(Arc::clone(region))),
            State::Failed(err) => Some(Err(err.clone())),
        }
    }

    /// Block until generation finishes.
    pub fn wait(&self) -> Result<Arc<Region>, GenerationError> {
        let mut inner = self.lock();
        loop {
            match &inner.state {
                State::Pending => {}
                State::Ready(region) => return Ok(Arc::clone(region)),
                State::Failed(err) => return Err(err.clone()),
            }
            inner = self.done.wait(inner).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Send this region's position on `notify` once it completes, or right
    /// away if it already has.
    pub(crate) fn subscribe(&self, notify: Sender<RegionPos>) {
        let mut inner = self.lock();
        if matches!(inner.state, State::Pending) {
            inner.subscribers.push(notify);
        } else {
            let _ = notify.send(self.pos);
        }
    }

    /// Publish the result and wake every waiter. Later calls are ignored.
    pub(crate) fn complete(&self, result: Result<Arc<Region>, GenerationError>) {
        let mut inner = self.lock();
        if !matches!(inner.state, State::Pending) {
            return;
        }
        inner.state = match result {
            Ok(region) => State::Ready(region),
            Err(err) => State::Failed(err),
        };
        for subscriber in inner.subscribers.drain(..) {
            let _ = subscriber.send(self.pos);
        }
        drop(inner);
        self.done.notify_all();
    }

    pub(crate) fn touch(&self, tick: u64) {
        self.last_access.fetch_max(tick, Ordering::Relaxed);
    }

    /// Cache clock value of the most recent request for this region.
    pub fn last_access(&self) -> u64 {
        self.last_access.load(Ordering::Relaxed)
    }
}
