use std::{sync::Arc, time::Duration};

use shared::{
    domain::{SessionEntry, SessionId},
    liveness::{is_connected, is_connected_now},
};
use tokio::{
    sync::Mutex,
    time::{interval, MissedTickBehavior},
};
use tracing::{trace, warn};

use crate::{
    orientation::{DisplayedRotation, OrientationMapper, RotationTarget},
    transport::MotionRelay,
    LoopHandle,
};

pub const HOST_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Host-side view of one session: the last entry seen, the rotation target
/// derived from it and the eased rotation being displayed.
#[derive(Debug, Default)]
pub struct HostMonitor {
    latest: Option<SessionEntry>,
    mapper: OrientationMapper,
    display: DisplayedRotation,
}

impl HostMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a poll result. An empty result leaves the previous entry in
    /// place so liveness decays on its own.
    pub fn observe(&mut self, entry: Option<SessionEntry>) {
        let Some(entry) = entry else {
            return;
        };
        self.mapper.apply(entry.sample.as_ref());
        self.latest = Some(entry);
    }

    pub fn latest(&self) -> Option<&SessionEntry> {
        self.latest.as_ref()
    }

    pub fn connected(&self) -> bool {
        is_connected_now(self.latest.as_ref())
    }

    pub fn connected_at(&self, now_ms: i64) -> bool {
        is_connected(self.latest.as_ref(), now_ms)
    }

    pub fn target(&self) -> RotationTarget {
        self.mapper.target()
    }

    /// Advances the displayed rotation by one frame toward the target.
    pub fn advance_frame(&mut self) -> RotationTarget {
        let target = self.mapper.target();
        self.display.step(&target)
    }

    pub fn displayed(&self) -> RotationTarget {
        self.display.current()
    }
}

/// Polls the relay right away and then on every tick, feeding `monitor`.
pub fn spawn_host_poller(
    relay: Arc<dyn MotionRelay>,
    session: SessionId,
    monitor: Arc<Mutex<HostMonitor>>,
    cadence: Duration,
) -> LoopHandle {
    LoopHandle::spawn(async move {
        let mut ticker = interval(cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            match relay.fetch(&session).await {
                Ok(entry) => {
                    trace!(%session, seq = entry.as_ref().map(|e| e.sequence), "polled relay");
                    monitor.lock().await.observe(entry);
                }
                Err(error) => warn!(%session, %error, "relay poll failed"),
            }
        }
    })
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod tests;
