// Chunk: docs/chunks/preview_worker - Background rendering with stale-result suppression

//! Background preview rendering.
//!
//! A [`PreviewWorker`] owns a renderer on its own thread. Callers submit
//! requests and get back a generation number; only the result for the
//! newest generation is ever handed out. Requests that queue up while a
//! render is running are coalesced to the newest one, so a burst of cursor
//! movements costs at most one extra render.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};

use crate::captures::CaptureSource;
use crate::line::PreviewLine;
use crate::preview::{Content, PreviewRenderer};

struct Request {
    generation: u64,
    content: Content,
    language: Option<String>,
}

/// Rendered lines tagged with the request they answer.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewResult {
    pub generation: u64,
    pub lines: Vec<PreviewLine>,
}

pub struct PreviewWorker {
    requests: Option<Sender<Request>>,
    results: Receiver<PreviewResult>,
    latest: Arc<AtomicU64>,
    thread: Option<JoinHandle<()>>,
}

impl PreviewWorker {
    /// Moves `renderer` onto a new worker thread.
    pub fn spawn<S>(renderer: PreviewRenderer<S>) -> Self
    where
        S: CaptureSource + 'static,
    {
        let (request_tx, request_rx) = unbounded();
        let (result_tx, result_rx) = unbounded();
        let latest = Arc::new(AtomicU64::new(0));

        let worker_latest = Arc::clone(&latest);
        let thread = thread::spawn(move || run(renderer, request_rx, result_tx, worker_latest));

        Self {
            requests: Some(request_tx),
            results: result_rx,
            latest,
            thread: Some(thread),
        }
    }

    /// Queues a render and returns its generation. Any result for an
    /// earlier generation is discarded from here on.
    pub fn request(&self, content: impl Into<Content>, language: Option<&str>) -> u64 {
        let generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        let request = Request {
            generation,
            content: content.into(),
            language: language.map(str::to_string),
        };
        let sent = self
            .requests
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok());
        if !sent {
            log::warn!("preview worker is gone; dropping request {generation}");
        }
        generation
    }

    /// Generation of the most recent request.
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Returns the result for the newest request if it has arrived.
    /// Stale results are drained and dropped.
    pub fn try_latest(&self) -> Option<PreviewResult> {
        let mut found = None;
        for result in self.results.try_iter() {
            if result.generation == self.latest_generation() {
                found = Some(result);
            }
        }
        found
    }

    /// Blocks until the result for the newest request arrives, or the
    /// worker exits.
    pub fn recv_latest(&self) -> Option<PreviewResult> {
        while let Ok(result) = self.results.recv() {
            if result.generation == self.latest_generation() {
                return Some(result);
            }
        }
        None
    }

    /// Like [`recv_latest`](Self::recv_latest), giving up after `timeout`.
    pub fn recv_latest_timeout(&self, timeout: Duration) -> Option<PreviewResult> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.results.recv_deadline(deadline) {
                Ok(result) if result.generation == self.latest_generation() => {
                    return Some(result)
                }
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
    }
}

impl Drop for PreviewWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.requests.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("preview worker panicked");
            }
        }
    }
}

fn run<S: CaptureSource>(
    renderer: PreviewRenderer<S>,
    requests: Receiver<Request>,
    results: Sender<PreviewResult>,
    latest: Arc<AtomicU64>,
) {
    while let Ok(mut request) = requests.recv() {
        for newer in requests.try_iter() {
            request = newer;
        }
        if request.generation < latest.load(Ordering::Acquire) {
            log::trace!("skipping superseded preview {}", request.generation);
            continue;
        }

        let lines = renderer.render(&request.content, request.language.as_deref());
        let result = PreviewResult {
            generation: request.generation,
            lines,
        };
        if results.send(result).is_err() {
            break;
        }
    }
    log::debug!("preview worker exiting");
}
