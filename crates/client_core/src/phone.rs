use std::{sync::Arc, time::Duration};

use shared::domain::SessionId;
use tokio::{
    sync::Mutex,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::{codec::SampleCodec, transport::MotionRelay, LoopHandle};

pub const PHONE_SEND_INTERVAL: Duration = Duration::from_millis(33);

/// Posts the codec's current sample on every tick once one exists.
///
/// Each post is awaited before the next tick, so at most one request is in
/// flight; ticks that elapse meanwhile are skipped. Failures are logged and
/// the next tick simply tries again.
pub fn spawn_phone_streamer(
    relay: Arc<dyn MotionRelay>,
    session: SessionId,
    codec: Arc<Mutex<SampleCodec>>,
    cadence: Duration,
) -> LoopHandle {
    LoopHandle::spawn(async move {
        let mut ticker = interval(cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let Some(sample) = codec.lock().await.snapshot() else {
                continue;
            };
            match relay.ingest(&session, &sample).await {
                Ok(ack) => debug!(%session, seq = ack.seq, "sample delivered"),
                Err(error) => warn!(%session, %error, "sample delivery failed"),
            }
        }
    })
}

#[cfg(test)]
#[path = "tests/phone_tests.rs"]
mod tests;
