//! Capabilities on top of `embedded-hal` pins and PWM channels.
//!
//! Useful on targets without an IDF driver, or to drive a backlight through
//! an I/O expander. Each adapter is bound to the one pin or channel number it
//! was created for and rejects calls addressed to any other.
//!
//! # Examples
//!
//! ```
//! use panel_backlight::{Backlight, hal::HalOutput};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::{ErrorType, OutputPin};
//! # struct Pin;
//! # impl ErrorType for Pin { type Error = Infallible; }
//! # impl OutputPin for Pin {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//!
//! let mut backlight = Backlight::with_pin(38, true, HalOutput::new(38, Pin));
//! backlight.initialize().unwrap();
//! backlight.disable().unwrap();
//! ```
use anyhow::{Result, anyhow, bail};
use embedded_hal::{digital::OutputPin, pwm::SetDutyCycle};
use log::debug;

use crate::{
    config::SpeedMode,
    peripheral::{DigitalOutput, PwmOutput},
};

/// [`DigitalOutput`] over an `embedded-hal` output pin.
///
/// Any nonzero level drives the pin high.
pub struct HalOutput<O> {
    pin_number: i32,
    pin: O,
}

impl<O> HalOutput<O>
where
    O: OutputPin,
{
    pub fn new(pin_number: i32, pin: O) -> Self {
        Self { pin_number, pin }
    }

    pub fn into_inner(self) -> O {
        self.pin
    }

    fn check(&self, pin: i32) -> Result<()> {
        if pin != self.pin_number {
            bail!("pin {pin} is not bound to this output (bound to {})", self.pin_number);
        }
        Ok(())
    }
}

impl<O> DigitalOutput for HalOutput<O>
where
    O: OutputPin,
{
    fn configure_output(&mut self, pin: i32) -> Result<()> {
        // The pin type is already an output.
        self.check(pin)
    }

    fn set_level(&mut self, pin: i32, level: u32) -> Result<()> {
        self.check(pin)?;
        let result = if level == 0 {
            self.pin.set_low()
        } else {
            self.pin.set_high()
        };
        result.map_err(|e| anyhow!("{:?}", e))
    }

    fn reset(&mut self, pin: i32) -> Result<()> {
        // Pin modes belong to the HAL; the level is left as is.
        self.check(pin)
    }
}

/// [`PwmOutput`] over an `embedded-hal` PWM channel.
///
/// The channel's period is fixed by the HAL, so the timer settings only
/// record the duty resolution; duties are rescaled from `2^resolution_bits`
/// counts to the channel's `max_duty_cycle()`. `set_duty` stages a value and
/// `commit_duty` writes it. An initial duty of `2^resolution_bits - 1` or more
/// starts the channel fully on.
pub struct HalPwm<C> {
    channel_id: u32,
    channel: C,
    timer: Option<(u32, u8)>,
    pending: Option<u32>,
}

impl<C> HalPwm<C>
where
    C: SetDutyCycle,
{
    pub fn new(channel_id: u32, channel: C) -> Self {
        Self {
            channel_id,
            channel,
            timer: None,
            pending: None,
        }
    }

    pub fn into_inner(self) -> C {
        self.channel
    }

    fn check(&self, channel: u32) -> Result<()> {
        if channel != self.channel_id {
            bail!("channel {channel} is not bound to this PWM (bound to {})", self.channel_id);
        }
        Ok(())
    }

    fn write(&mut self, duty: u32) -> Result<()> {
        let Some((_, bits)) = self.timer else {
            bail!("PWM timer for channel {} is not configured", self.channel_id);
        };
        let max = u64::from(self.channel.max_duty_cycle());
        let scaled = ((u64::from(duty) * max) >> bits).min(max);
        self.channel
            .set_duty_cycle(scaled as u16)
            .map_err(|e| anyhow!("{:?}", e))
    }
}

impl<C> PwmOutput for HalPwm<C>
where
    C: SetDutyCycle,
{
    fn configure_timer(
        &mut self,
        timer: u32,
        resolution_bits: u8,
        frequency_hz: u32,
        _mode: SpeedMode,
    ) -> Result<()> {
        if !(1..=crate::config::MAX_RESOLUTION_BITS).contains(&resolution_bits) {
            bail!("unsupported PWM resolution: {resolution_bits} bits");
        }
        debug!("timer {timer}: {resolution_bits} bits, {frequency_hz} Hz requested, period fixed by HAL");
        self.timer = Some((timer, resolution_bits));
        Ok(())
    }

    fn configure_channel(
        &mut self,
        channel: u32,
        timer: u32,
        _pin: i32,
        initial_duty: u32,
        _mode: SpeedMode,
    ) -> Result<()> {
        self.check(channel)?;
        let bits = match self.timer {
            Some((configured, bits)) if configured == timer => bits,
            _ => bail!("timer {timer} is not configured"),
        };
        self.pending = None;
        if initial_duty >= (1u32 << bits) - 1 {
            return self
                .channel
                .set_duty_cycle_fully_on()
                .map_err(|e| anyhow!("{:?}", e));
        }
        self.write(initial_duty)
    }

    fn set_duty(&mut self, channel: u32, duty: u32, _mode: SpeedMode) -> Result<()> {
        self.check(channel)?;
        self.pending = Some(duty);
        Ok(())
    }

    fn commit_duty(&mut self, channel: u32, _mode: SpeedMode) -> Result<()> {
        self.check(channel)?;
        match self.pending.take() {
            Some(duty) => self.write(duty),
            None => Ok(()),
        }
    }

    fn stop(&mut self, channel: u32, idle_level: bool, _mode: SpeedMode) -> Result<()> {
        self.check(channel)?;
        self.pending = None;
        let result = if idle_level {
            self.channel.set_duty_cycle_fully_on()
        } else {
            self.channel.set_duty_cycle_fully_off()
        };
        result.map_err(|e| anyhow!("{:?}", e))
    }
}
