//! boreal-hostd — the host-side sender daemon.
//!
//! Not safety-critical: runs on tokio, unlike the firmware's single-threaded
//! loop, because nothing here actuates anything directly — it only frames
//! and ships intents. The firmware's safety gate and watchdog are the last
//! line of defense regardless of how fast or slow this side runs.

mod intent_source;

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};

use boreal_core::collab::IntentSource;
use boreal_core::config::HostConfig;
use boreal_core::intent::IntentPacket;
use boreal_core::keys::KeyMaterial;
use boreal_core::wire;

use intent_source::FixedIntentSource;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = HostConfig::load().context("loading host config")?;
    tracing::info!(model_id = config.model_id, send_hz = config.send_hz, "boreal-hostd starting");

    let keys = KeyMaterial::load(&config.keys.key_material_path).context("loading key material")?;
    let mut port = serialport::new(&config.link.device, 115_200)
        .timeout(Duration::from_millis(50))
        .open()
        .context("opening serial link")?;

    // Stand-in until a real inference pipeline is wired in as an IntentSource.
    let mut source = FixedIntentSource::new(2, 27851, vec![30]);

    let mut seq: u32 = 0;
    let period = Duration::from_secs_f64(1.0 / config.send_hz as f64);
    let mut ticker = tokio::time::interval(period);

    loop {
        ticker.tick().await;
        let Some((intent_id, conf_q15, aux)) = source.next() else {
            continue;
        };

        seq += 1;
        let t_ms = now_ms();
        let packet = IntentPacket::new(intent_id, conf_q15, &aux);
        let frame = wire::encode(&keys.cipher_key(), keys.mac_key(), config.model_id, seq, t_ms, &packet);

        if let Err(err) = port.write_all(&frame) {
            tracing::error!(%err, "failed to write frame");
        }
    }
}

fn now_ms() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    (ms & 0xFFFF_FFFF) as u32
}
