//! Run context handed to the worker: the pause signal it polls and the sink it reports to.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::engine::progress::{NullSink, ProgressSink};
use crate::{ProgressUpdate, RunSummary};

/// Cooperative pause flag. Clones share the same flag.
///
/// The controller calls [`pause`](Self::pause) / [`resume`](Self::resume); the worker only reads it.
/// Pausing stops the walk at the next file or directory boundary and keeps everything already copied.
/// Resuming does not restart anything: a fresh run starts over from the top of the tree.
#[derive(Clone, Debug, Default)]
pub struct PauseSignal {
    flag: Arc<AtomicBool>,
}

impl PauseSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Everything the sift loop needs from its host, passed in explicitly.
pub struct RunContext<'a> {
    pause: PauseSignal,
    sink: Box<dyn ProgressSink + 'a>,
}

impl<'a> RunContext<'a> {
    pub fn new(pause: PauseSignal, sink: impl ProgressSink + 'a) -> Self {
        Self {
            pause,
            sink: Box::new(sink),
        }
    }

    /// Context with a fresh, never-set pause signal and no progress output.
    pub fn detached() -> Self {
        Self::new(PauseSignal::new(), NullSink)
    }

    pub fn pause_signal(&self) -> &PauseSignal {
        &self.pause
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    pub fn report(&mut self, update: &ProgressUpdate) {
        self.sink.on_file(update);
    }

    pub fn finish(&mut self, summary: &RunSummary) {
        self.sink.on_finish(summary);
    }
}
