//! boreald — the firmware brainstem daemon.
//!
//! A single-threaded cooperative loop: frame ingest, a 50 Hz control tick,
//! and the watchdog tick all run on one stack, in the order the core
//! contract requires (ingest → VM → gate → motor target → PID → watchdog).
//! Nothing here may block holding policy or motor state except the serial
//! read itself, which the link already makes non-blocking-tolerant.

mod motor_driver;
mod serial;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use boreal_core::collab::SerialLink;
use boreal_core::config::BrainstemConfig;
use boreal_core::keys::KeyMaterial;
use boreal_core::wire;
use boreal_services::Brainstem;

use motor_driver::LaggedMotorDriver;
use serial::DeviceLink;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = BrainstemConfig::load().context("loading brainstem config")?;
    tracing::info!(?config.link.device, "boreald starting");

    let keys = KeyMaterial::load(&config.keys.key_material_path)
        .context("loading key material")?;
    let bytecode = std::fs::read(&config.policy.bytecode_path).context("loading policy bytecode")?;

    let mut link = DeviceLink::open(&config.link.device, 115_200).context("opening serial link")?;
    let mut driver = LaggedMotorDriver::new();
    let mut brainstem = Brainstem::new(bytecode);

    let control_period = Duration::from_secs_f64(1.0 / config.control.control_hz as f64);
    let mut last_seq: u32 = 0;
    let mut read_buf = [0u8; wire::FRAME_LEN];
    let mut filled = 0usize;
    let mut next_tick = Instant::now() + control_period;

    loop {
        match link.read(&mut read_buf[filled..]) {
            Ok(0) => {}
            Ok(n) => {
                filled += n;
                if filled == wire::FRAME_LEN {
                    match wire::decode(&keys.cipher_key(), keys.mac_key(), last_seq, &read_buf) {
                        Ok(decoded) => {
                            last_seq = decoded.header.seq;
                            brainstem.admit_intent(&decoded.intent);
                        }
                        Err(err) => tracing::warn!(%err, "dropping frame"),
                    }
                    filled = 0;
                }
            }
            Err(err) => {
                tracing::error!(%err, "serial read failed");
                filled = 0;
            }
        }

        let now = Instant::now();
        if now >= next_tick {
            brainstem.control_tick(&mut driver);
            driver.settle();
            next_tick += control_period;
            if brainstem.is_safe_state() {
                tracing::debug!("brainstem in safe state");
            }
        } else {
            std::thread::sleep(Duration::from_micros(200));
        }
    }
}
