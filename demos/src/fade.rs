//! Fade the panel backlight up and down on an LEDC channel
//!
//! ```sh
//! % cargo build --bin fade
//! % espflash flash --monitor -p <serial port> target/xtensa-esp32s3-espidf/debug/fade
//! ```
use std::{thread, time::Duration};

use panel_backlight::{BacklightConfig, PwmConfig, esp};

/// Backlight pin of the Cardputer LCD
const BACKLIGHT_PIN: i32 = 38;

fn main() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let pwm = PwmConfig::new().resolution(10).frequency(5_000);
    let mut backlight = esp::backlight(BacklightConfig::pwm(BACKLIGHT_PIN, true, pwm));
    backlight.initialize()?;

    loop {
        for percent in (0..=100).chain((0..100).rev()).step_by(5) {
            backlight.set_brightness(percent)?;
            log::info!("brightness {:?}", backlight.brightness());
            thread::sleep(Duration::from_millis(100));
        }
    }
}
