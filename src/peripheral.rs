//! Hardware capabilities a backlight is driven through.
//!
//! Both traits address the hardware by number, the way the IDF drivers do,
//! so one implementation can serve any pin, timer or channel.
use anyhow::{Result, bail};

use crate::config::SpeedMode;

/// Highest pin number a GPIO bit mask can address
pub const MAX_GPIO: i32 = 63;

/// Single-bit GPIO mask for `pin`, as taken by the IDF `gpio_config`.
pub fn pin_bit_mask(pin: i32) -> Result<u64> {
    match u32::try_from(pin).ok().and_then(|pin| 1u64.checked_shl(pin)) {
        Some(mask) => Ok(mask),
        None => bail!("GPIO {pin} out of range (0..={MAX_GPIO})"),
    }
}

/// Digital output pin control
pub trait DigitalOutput {
    /// Configure `pin` as a push-pull output with pulls and interrupts disabled.
    fn configure_output(&mut self, pin: i32) -> Result<()>;

    /// Drive `pin`. Zero is low; how other values are interpreted is up to
    /// the implementation.
    fn set_level(&mut self, pin: i32, level: u32) -> Result<()>;

    /// Return `pin` to its reset state.
    fn reset(&mut self, pin: i32) -> Result<()>;
}

/// PWM timer and channel control
pub trait PwmOutput {
    fn configure_timer(
        &mut self,
        timer: u32,
        resolution_bits: u8,
        frequency_hz: u32,
        mode: SpeedMode,
    ) -> Result<()>;

    /// Bind `channel` to `timer` and route it to `pin`, starting at `initial_duty`.
    fn configure_channel(
        &mut self,
        channel: u32,
        timer: u32,
        pin: i32,
        initial_duty: u32,
        mode: SpeedMode,
    ) -> Result<()>;

    /// Stage a new duty value. It takes effect on [`PwmOutput::commit_duty`].
    fn set_duty(&mut self, channel: u32, duty: u32, mode: SpeedMode) -> Result<()>;

    fn commit_duty(&mut self, channel: u32, mode: SpeedMode) -> Result<()>;

    /// Stop PWM generation and hold the output at `idle_level`.
    fn stop(&mut self, channel: u32, idle_level: bool, mode: SpeedMode) -> Result<()>;
}

/// PWM capability for backlights wired to a plain output pin.
///
/// Every call fails; a GPIO-only [`Backlight`](crate::Backlight) never makes one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPwm;

impl PwmOutput for NoPwm {
    fn configure_timer(&mut self, timer: u32, _: u8, _: u32, _: SpeedMode) -> Result<()> {
        bail!("no PWM available for timer {timer}")
    }

    fn configure_channel(&mut self, channel: u32, _: u32, _: i32, _: u32, _: SpeedMode) -> Result<()> {
        bail!("no PWM available for channel {channel}")
    }

    fn set_duty(&mut self, channel: u32, _: u32, _: SpeedMode) -> Result<()> {
        bail!("no PWM available for channel {channel}")
    }

    fn commit_duty(&mut self, channel: u32, _: SpeedMode) -> Result<()> {
        bail!("no PWM available for channel {channel}")
    }

    fn stop(&mut self, channel: u32, _: bool, _: SpeedMode) -> Result<()> {
        bail!("no PWM available for channel {channel}")
    }
}
