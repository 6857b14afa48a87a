use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{spawn_host_poller, HostMonitor, HttpRelay, HOST_POLL_INTERVAL};
use shared::{domain::SessionId, pairing::pairing_link};
use tokio::{
    sync::Mutex,
    time::{interval, MissedTickBehavior},
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const REPORT_EVERY_FRAMES: u32 = 30;

/// Host side of a motion link: polls a session and tracks its rotation.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:8443")]
    server_url: String,
    /// Session to watch; a new one is generated when omitted.
    #[arg(long)]
    session: Option<String>,
    /// Origin and path the phone should open. Defaults to the server url.
    #[arg(long)]
    phone_base: Option<String>,
    #[arg(long, default_value_t = HOST_POLL_INTERVAL.as_millis() as u64)]
    poll_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let session = args
        .session
        .as_deref()
        .and_then(SessionId::parse)
        .unwrap_or_else(SessionId::generate);
    let phone_base = args.phone_base.as_deref().unwrap_or(&args.server_url);
    let phone_base =
        Url::parse(phone_base).with_context(|| format!("invalid phone base '{phone_base}'"))?;
    println!("Session: {session}");
    println!("Open on phone: {}", pairing_link(&phone_base, &session));

    let relay = Arc::new(HttpRelay::new(&args.server_url)?);
    let monitor = Arc::new(Mutex::new(HostMonitor::new()));
    let poller = spawn_host_poller(
        relay,
        session.clone(),
        monitor.clone(),
        Duration::from_millis(args.poll_ms),
    );

    let mut frames = interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut was_connected = false;
    let mut frame: u32 = 0;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = frames.tick() => {}
        }

        let mut monitor = monitor.lock().await;
        let displayed = monitor.advance_frame();
        let connected = monitor.connected();
        if connected != was_connected {
            if connected {
                info!(%session, "receiving motion");
            } else {
                info!(%session, "waiting for phone");
            }
            was_connected = connected;
        }

        frame = frame.wrapping_add(1);
        if connected && frame % REPORT_EVERY_FRAMES == 0 {
            let seq = monitor.latest().map(|entry| entry.sequence);
            let quat = displayed.to_quat();
            info!(
                ?seq,
                x = displayed.x.to_degrees(),
                y = displayed.y.to_degrees(),
                z = displayed.z.to_degrees(),
                qw = quat.w,
                qx = quat.x,
                qy = quat.y,
                qz = quat.z,
                "rotation"
            );
        }
    }

    poller.stop();
    info!("host stopped");
    Ok(())
}
