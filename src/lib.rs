//! Display backlight control for embedded panels.
//!
//! A [`Backlight`] drives either a plain output pin (on/off) or a PWM channel
//! (graduated brightness) through the [`DigitalOutput`] and [`PwmOutput`]
//! capabilities. On ESP-IDF targets the `esp` module provides both on top
//! of the IDF GPIO and LEDC drivers; elsewhere the [`hal`] module adapts any
//! `embedded-hal` output pin or PWM channel.
pub mod backlight;
pub mod config;
pub mod error;
#[cfg(target_os = "espidf")]
pub mod esp;
pub mod hal;
pub mod peripheral;

pub use backlight::Backlight;
pub use config::{BacklightConfig, INITIAL_STATE, InitialState, PwmConfig, SpeedMode};
pub use error::{Error, Result};
pub use peripheral::{DigitalOutput, NoPwm, PwmOutput};
