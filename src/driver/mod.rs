//! Per-stream traversal tasks and their scheduling.
//!
//! Two tasks run per configured stream: [`follow_stream`] walks forward from
//! the root and never gives up — a fruitless pass only pauses it for a
//! back-off interval — while [`backfill_stream`] walks backward from the
//! frontier once, best-effort, and self-terminates. [`Driver`] spawns both
//! on a task tracker and cancels the follow tasks through a shared token
//! when shutdown is requested.

mod backoff;

use std::sync::Arc;

pub use backoff::BackoffConfig;
use futures::Future;
use log::{debug, info};
use tokio::{select, signal, time::sleep};
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use crate::{connector::LedgerConnector, stream::Stream};


/// Behaviour of the forward-walking follow task.
#[derive(Clone, Copy, Debug, Default)]
pub struct FollowOptions {
    /// Retry timing after a fruitless pass.
    pub backoff: BackoffConfig,
    /// Stop when the stream's current end is reached instead of tailing.
    pub stop_at_end: bool,
}

/// Follow a stream forward from its root, live-tailing new blocks.
///
/// Fetch failures never terminate the task: the cursor stays positioned on
/// the failed address and is retried after a back-off delay, which resets
/// whenever a block is actually yielded. With `stop_at_end` set the task
/// returns on the first fruitless pass, mirroring a one-shot historical
/// read.
pub async fn follow_stream<C: LedgerConnector>(
    stream: Arc<Stream<C>>,
    options: FollowOptions,
    shutdown: CancellationToken,
) {
    let backoff = options.backoff.normalized();
    let mut delay = backoff.initial_delay;
    info!("following stream rooted at {}", stream.root_address());
    let mut cursor = stream.iterate(false);
    loop {
        select! {
            () = shutdown.cancelled() => {
                info!("stopped following stream rooted at {}", stream.root_address());
                return;
            }
            block = cursor.next() => match block {
                Some(block) => {
                    delay = backoff.initial_delay;
                    debug!(
                        "followed stream rooted at {} to block at {}",
                        stream.root_address(),
                        block.address()
                    );
                }
                None => {
                    if options.stop_at_end {
                        info!("reached the end of stream rooted at {}", stream.root_address());
                        return;
                    }
                    select! {
                        () = shutdown.cancelled() => return,
                        () = sleep(delay) => {}
                    }
                    delay = backoff.next_delay(delay);
                }
            }
        }
    }
}

/// Explore a stream backward from its current frontier.
///
/// A bounded, best-effort backfill: any failure is treated as "no further
/// history" and ends the task without retry.
pub async fn backfill_stream<C: LedgerConnector>(stream: Arc<Stream<C>>) {
    info!(
        "exploring stream rooted at {} backwards from {}",
        stream.root_address(),
        stream.latest_address()
    );
    let mut cursor = stream.iterate(true);
    while let Some(block) = cursor.next().await {
        debug!("backfilled block at {}", block.address());
    }
    info!(
        "finished exploring stream rooted at {} backwards",
        stream.root_address()
    );
}

/// Schedules follow and backfill tasks for a set of streams.
#[derive(Debug)]
pub struct Driver {
    tracker: TaskTracker,
    shutdown: CancellationToken,
}

impl Default for Driver {
    fn default() -> Self { Self::new() }
}

impl Driver {
    /// Create a driver with no scheduled streams.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: TaskTracker::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Token cancelled when the driver shuts down.
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken { self.shutdown.clone() }

    /// Spawn the follow and backfill tasks for `stream`.
    pub fn spawn_stream<C>(&self, stream: Arc<Stream<C>>, options: FollowOptions)
    where
        C: LedgerConnector + 'static,
    {
        info!(
            "scheduling traversal tasks for stream rooted at {}",
            stream.root_address()
        );
        self.tracker
            .spawn(follow_stream(Arc::clone(&stream), options, self.shutdown.clone()));
        self.tracker.spawn(backfill_stream(stream));
    }

    /// Run until a Ctrl+C signal is received.
    pub async fn run(self) {
        self.run_until(async {
            let _ = signal::ctrl_c().await;
        })
        .await;
    }

    /// Run until the `shutdown` future resolves, then cancel the follow
    /// tasks and wait for every task to finish.
    pub async fn run_until<S>(self, shutdown: S)
    where
        S: Future<Output = ()> + Send,
    {
        select! {
            () = shutdown => self.shutdown.cancel(),
            () = self.tracker.wait() => {}
        }
        self.tracker.close();
        self.tracker.wait().await;
    }
}
