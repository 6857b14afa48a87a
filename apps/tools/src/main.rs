use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{spawn_phone_streamer, HttpRelay, SampleCodec, PHONE_SEND_INTERVAL};
use serde_json::json;
use shared::{
    domain::{Role, SessionId},
    pairing::{pairing_link, parse_pairing_link},
};
use tokio::{sync::Mutex, time::interval};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

const SENSOR_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a phone pairing link, generating a session when none is given.
    Pair {
        #[arg(long, default_value = "http://127.0.0.1:8443/")]
        origin: String,
        #[arg(long)]
        session: Option<String>,
    },
    /// Stream synthetic sensor readings as a phone would.
    Simulate {
        /// Pairing link as opened on the phone; supplies server and session.
        #[arg(long, conflicts_with_all = ["server_url", "session"])]
        link: Option<String>,
        #[arg(long)]
        server_url: Option<String>,
        #[arg(long)]
        session: Option<String>,
        #[arg(long, default_value_t = 10)]
        seconds: u64,
        #[arg(long, default_value_t = PHONE_SEND_INTERVAL.as_millis() as u64)]
        send_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Pair { origin, session } => {
            let base = Url::parse(&origin).with_context(|| format!("invalid origin '{origin}'"))?;
            let session = session
                .as_deref()
                .and_then(SessionId::parse)
                .unwrap_or_else(SessionId::generate);
            println!("session={session}");
            println!("{}", pairing_link(&base, &session));
        }
        Command::Simulate {
            link,
            server_url,
            session,
            seconds,
            send_ms,
        } => {
            let (server_url, session) = match link {
                Some(link) => target_from_link(&link)?,
                None => {
                    let server_url = server_url.context("--server-url or --link is required")?;
                    let session = session
                        .as_deref()
                        .and_then(SessionId::parse)
                        .context("--session must be a non-empty id")?;
                    (server_url, session)
                }
            };
            simulate(
                &server_url,
                session,
                Duration::from_secs(seconds),
                Duration::from_millis(send_ms),
            )
            .await?;
        }
    }

    Ok(())
}

fn target_from_link(link: &str) -> Result<(String, SessionId)> {
    let url = Url::parse(link).with_context(|| format!("invalid pairing link '{link}'"))?;
    let (role, session) = parse_pairing_link(&url);
    if role != Role::Phone {
        bail!("pairing link is not a phone link: {link}");
    }
    let session = session.context("pairing link has no session")?;
    Ok((url.origin().ascii_serialization(), session))
}

/// Feeds a slowly turning, gently rocking device into the codec at sensor
/// rate while the streamer posts it at its own cadence.
async fn simulate(
    server_url: &str,
    session: SessionId,
    duration: Duration,
    send_every: Duration,
) -> Result<()> {
    let relay = Arc::new(HttpRelay::new(server_url)?);
    let codec = Arc::new(Mutex::new(SampleCodec::new()));
    info!(%session, server_url, "simulating phone");
    let streamer = spawn_phone_streamer(relay, session, codec.clone(), send_every);

    let started = Instant::now();
    let interval_ms = SENSOR_INTERVAL.as_secs_f64() * 1000.0;
    let mut sensor = interval(SENSOR_INTERVAL);
    while started.elapsed() < duration {
        sensor.tick().await;
        let t = started.elapsed().as_secs_f64();
        let alpha = (t * 30.0) % 360.0;
        let beta = 20.0 * (t * 0.8).sin();
        let gamma = 10.0 * (t * 1.3).cos();

        let mut codec = codec.lock().await;
        codec.merge_orientation(&json!({
            "alpha": alpha,
            "beta": beta,
            "gamma": gamma,
            "absolute": false,
        }));
        codec.merge_motion(&json!({
            "rotationRate": { "alpha": 30.0, "beta": 16.0 * (t * 0.8).cos(), "gamma": -13.0 * (t * 1.3).sin() },
            "acceleration": { "x": 0.0, "y": 0.0, "z": 0.0 },
            "accelerationIncludingGravity": {
                "x": 9.81 * gamma.to_radians().sin(),
                "y": 9.81 * beta.to_radians().sin(),
                "z": 9.81 * beta.to_radians().cos(),
            },
            "interval": interval_ms,
        }));
    }

    streamer.stop();
    info!("simulation finished");
    Ok(())
}
