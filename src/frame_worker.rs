// THEORY:
// The tracking algorithm assumes strict per-frame serialization: the band cursor and
// the re-localization order only make sense if pass N finishes before pass N+1
// starts. On a threaded runtime that is guaranteed by confining the pipeline to a
// single worker task. Frames are sent to it over a channel and the buffer comes back
// with the report, so the frame source regains ownership after every pass.

use crate::config::TrackerConfig;
use crate::core_modules::frame::OwnedFrame;
use crate::core_modules::occupancy::{HeapAllocator, MaskAllocator};
use crate::error::TrackerError;
use crate::pipeline::{FrameReport, MarkerPipeline};
use log::debug;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

const TASK_QUEUE_DEPTH: usize = 2;

/// A processed frame handed back to the frame source.
#[derive(Debug)]
pub struct FrameOutcome {
    /// The buffer that was submitted, with the overlay drawn into it if enabled.
    pub frame: OwnedFrame,
    pub report: Result<FrameReport, TrackerError>,
}

struct FrameTask {
    frame: OwnedFrame,
    result_sender: oneshot::Sender<FrameOutcome>,
}

/// Runs every pass of one `MarkerPipeline` on a single tokio task.
pub struct FrameWorker {
    task_sender: mpsc::Sender<FrameTask>,
    worker: JoinHandle<()>,
}

impl FrameWorker {
    /// Starts the worker. Must be called from within a tokio runtime.
    pub fn spawn(config: TrackerConfig) -> Result<Self, TrackerError> {
        Self::spawn_with_allocator(config, HeapAllocator)
    }

    pub fn spawn_with_allocator<A>(config: TrackerConfig, allocator: A) -> Result<Self, TrackerError>
    where
        A: MaskAllocator + Send + 'static,
    {
        let mut pipeline = MarkerPipeline::with_allocator(config, allocator)?;
        let (task_sender, mut task_receiver) = mpsc::channel::<FrameTask>(TASK_QUEUE_DEPTH);

        let worker = tokio::spawn(async move {
            while let Some(mut task) = task_receiver.recv().await {
                let report = task
                    .frame
                    .view_mut()
                    .and_then(|mut view| pipeline.process_frame(&mut view));
                let _ = task.result_sender.send(FrameOutcome {
                    frame: task.frame,
                    report,
                });
            }
            debug!("frame worker stopped");
        });

        Ok(Self {
            task_sender,
            worker,
        })
    }

    /// Submits one frame and waits for its pass to complete.
    pub async fn process(&self, frame: OwnedFrame) -> Result<FrameOutcome, TrackerError> {
        let (result_sender, result_receiver) = oneshot::channel();
        self.task_sender
            .send(FrameTask {
                frame,
                result_sender,
            })
            .await
            .map_err(|_| TrackerError::WorkerClosed)?;

        result_receiver.await.map_err(|_| TrackerError::WorkerClosed)
    }

    /// Stops accepting frames and waits for the worker to finish.
    pub async fn shutdown(self) {
        drop(self.task_sender);
        let _ = self.worker.await;
    }
}
