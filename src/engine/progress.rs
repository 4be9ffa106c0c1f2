//! Progress reporting: the sink the worker writes to, and the terminal bar that renders it.

use crossbeam_channel::Sender;
use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

use crate::{ProgressUpdate, RunSummary};

/// Receives progress from the worker. Called on the worker thread; keep it fast or forward to a channel.
pub trait ProgressSink: Send {
    /// After every file examined, match or not.
    fn on_file(&mut self, update: &ProgressUpdate);

    /// Once, when the walk ends (finished or paused).
    fn on_finish(&mut self, _summary: &RunSummary) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressUpdate) + Send,
{
    fn on_file(&mut self, update: &ProgressUpdate) {
        self(update)
    }
}

/// Discards everything.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_file(&mut self, _update: &ProgressUpdate) {}
}

/// Message sent by [`ChannelSink`].
#[derive(Clone, Debug)]
pub enum ProgressEvent {
    File(ProgressUpdate),
    Finished(RunSummary),
}

/// Forwards progress over a channel so the controlling thread reads it without blocking the worker.
/// A dropped receiver is ignored.
pub struct ChannelSink {
    tx: Sender<ProgressEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<ProgressEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn on_file(&mut self, update: &ProgressUpdate) {
        let _ = self.tx.send(ProgressEvent::File(update.clone()));
    }

    fn on_finish(&mut self, summary: &RunSummary) {
        let _ = self.tx.send(ProgressEvent::Finished(summary.clone()));
    }
}

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Create the sifting bar. Total starts at 0 and is raised as updates arrive.
pub fn create_progress_bar(desc: &'static str) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = 0,
        desc = desc,
        animation = Animation::Classic,
        position = 0,
        unit = " files"
    )))
}

/// Bring the bar in line with `update`: total, position and current file name.
/// Uses try_lock so a contended bar never blocks the caller.
pub fn apply_update(pb: &ProgressBar, update: &ProgressUpdate) {
    if let Ok(mut bar) = pb.try_lock() {
        if bar.total != update.total {
            bar.total = update.total;
        }
        bar.set_postfix(update.current.clone());
        let _ = bar.update_to(update.processed);
    }
}

/// Force a refresh of the bar (e.g. so the last state shows before the summary).
pub fn refresh_bar(pb: &ProgressBar) {
    if let Ok(mut bar) = pb.try_lock() {
        let _ = bar.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_sink_sees_every_update() {
        let mut seen = Vec::new();
        {
            let mut sink = |u: &ProgressUpdate| seen.push(u.status_line());
            sink.on_file(&ProgressUpdate {
                processed: 1,
                total: 3,
                ..Default::default()
            });
            sink.on_file(&ProgressUpdate {
                processed: 2,
                total: 3,
                ..Default::default()
            });
        }
        assert_eq!(seen, vec!["1/3", "2/3"]);
    }

    #[test]
    fn channel_sink_forwards_and_survives_dropped_receiver() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut sink = ChannelSink::new(tx);
        sink.on_file(&ProgressUpdate {
            processed: 1,
            total: 1,
            matched: 0,
            current: "a.png".into(),
        });
        sink.on_finish(&RunSummary::default());
        assert!(matches!(rx.recv().unwrap(), ProgressEvent::File(u) if u.current == "a.png"));
        assert!(matches!(rx.recv().unwrap(), ProgressEvent::Finished(_)));
        drop(rx);
        sink.on_file(&ProgressUpdate::default());
    }
}
