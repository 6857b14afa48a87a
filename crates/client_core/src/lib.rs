use std::future::Future;

use tokio::task::JoinHandle;

pub mod codec;
pub mod error;
pub mod host;
pub mod orientation;
pub mod phone;
pub mod transport;

pub use codec::SampleCodec;
pub use error::RelayError;
pub use host::{spawn_host_poller, HostMonitor, HOST_POLL_INTERVAL};
pub use orientation::{DisplayedRotation, OrientationMapper, RotationTarget, BLEND_FACTOR};
pub use phone::{spawn_phone_streamer, PHONE_SEND_INTERVAL};
pub use transport::{HttpRelay, MotionRelay};

/// Owns a polling loop; the loop is aborted when the handle is stopped or dropped.
pub struct LoopHandle {
    task: JoinHandle<()>,
}

impl LoopHandle {
    pub(crate) fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            task: tokio::spawn(future),
        }
    }

    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
