//! LCD backlight controller
use log::{debug, info, warn};

use crate::{
    config::{BacklightConfig, INITIAL_STATE, InitialState},
    error::{Error, Result},
    peripheral::{DigitalOutput, NoPwm, PwmOutput},
};

/// Backlight controller
///
/// Drives the backlight through a plain output pin or, when the config asks
/// for PWM, through a timer/channel pair. The hardware is claimed by
/// [`initialize`](Self::initialize) and handed back by
/// [`release`](Self::release), which also runs on drop.
///
/// Brightness may be set before `initialize`; the driver calls are issued
/// regardless and it is up to the caller to initialize first.
///
/// # Examples
///
/// ```ignore
/// use panel_backlight::{Backlight, BacklightConfig, PwmConfig};
/// use panel_backlight::esp::{EspGpio, EspLedc};
///
/// let config = BacklightConfig::pwm(38, true, PwmConfig::new().resolution(8));
/// let mut backlight = Backlight::new(config, EspGpio, EspLedc);
/// backlight.initialize().unwrap();
/// backlight.set_brightness(60).unwrap();
/// ```
pub struct Backlight<D, P = NoPwm>
where
    D: DigitalOutput,
    P: PwmOutput,
{
    config: BacklightConfig,
    gpio: D,
    pwm: P,
    initialized: bool,
    brightness: Option<u8>,
}

impl<D> Backlight<D, NoPwm>
where
    D: DigitalOutput,
{
    /// On/off backlight on `pin_number`, lit when the pin is at `active_level`.
    pub fn with_pin(pin_number: i32, active_level: bool, gpio: D) -> Self {
        Self::new(BacklightConfig::gpio(pin_number, active_level), gpio, NoPwm)
    }
}

impl<D, P> Backlight<D, P>
where
    D: DigitalOutput,
    P: PwmOutput,
{
    /// Create new controller. No hardware is touched until `initialize`.
    pub fn new(config: BacklightConfig, gpio: D, pwm: P) -> Self {
        Self {
            config,
            gpio,
            pwm,
            initialized: false,
            brightness: None,
        }
    }

    pub fn config(&self) -> &BacklightConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Last brightness applied, in percent. `None` until the output has been
    /// driven, and again after `release`.
    pub fn brightness(&self) -> Option<u8> {
        self.brightness
    }

    /// Configure the pin or PWM channel and drive the initial state.
    pub fn initialize(&mut self) -> Result<()> {
        let pin = self.connected_pin()?;
        let config = self.config;
        let driven = starts_driven(INITIAL_STATE, config.active_level);

        if config.use_pwm {
            let pwm = config.pwm;
            let range = pwm
                .duty_range()
                .ok_or(Error::InvalidResolution(pwm.resolution_bits))?;
            let initial_duty = if driven { range - 1 } else { 0 };
            self.pwm
                .configure_timer(pwm.timer_id, pwm.resolution_bits, pwm.frequency_hz, pwm.speed_mode)
                .map_err(Error::peripheral("configure_timer"))?;
            self.pwm
                .configure_channel(pwm.channel_id, pwm.timer_id, pin, initial_duty, pwm.speed_mode)
                .map_err(Error::peripheral("configure_channel"))?;
        } else {
            self.gpio
                .configure_output(pin)
                .map_err(Error::peripheral("configure_output"))?;
            self.gpio
                .set_level(pin, driven.into())
                .map_err(Error::peripheral("set_level"))?;
        }

        self.brightness = Some(initial_brightness(INITIAL_STATE, config.active_level));
        self.initialized = true;
        info!("backlight initialized: {config}");
        Ok(())
    }

    /// Set brightness in percent. Values above 100 are treated as 100.
    pub fn set_brightness(&mut self, percent: u8) -> Result<()> {
        let pin = self.connected_pin()?;
        let percent = percent.min(100);
        let effective = effective_percent(percent, self.config.active_level);

        if self.config.use_pwm {
            let pwm = self.config.pwm;
            let range = pwm
                .duty_range()
                .ok_or(Error::InvalidResolution(pwm.resolution_bits))?;
            let duty = duty_cycle(range, effective);
            self.pwm
                .set_duty(pwm.channel_id, duty, pwm.speed_mode)
                .map_err(Error::peripheral("set_duty"))?;
            self.pwm
                .commit_duty(pwm.channel_id, pwm.speed_mode)
                .map_err(Error::peripheral("commit_duty"))?;
            debug!("backlight brightness {percent}% (duty {duty}/{range})");
        } else {
            // The raw percentage is handed to the pin driver as its level.
            self.gpio
                .set_level(pin, effective.into())
                .map_err(Error::peripheral("set_level"))?;
            debug!("backlight brightness {percent}% (level {effective})");
        }

        self.brightness = Some(percent);
        Ok(())
    }

    /// Turn on the backlight.
    pub fn enable(&mut self) -> Result<()> {
        self.set_brightness(100)
    }

    /// Turn off the backlight.
    pub fn disable(&mut self) -> Result<()> {
        self.set_brightness(0)
    }

    /// Stop driving the backlight and return the hardware to its idle state.
    ///
    /// Does nothing if the controller is not initialized. The controller is
    /// left uninitialized even if the driver reports an error.
    pub fn release(&mut self) -> Result<()> {
        let pin = self.connected_pin()?;
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;
        self.brightness = None;

        let result = if self.config.use_pwm {
            let pwm = self.config.pwm;
            self.pwm
                .stop(pwm.channel_id, !self.config.active_level, pwm.speed_mode)
                .map_err(Error::peripheral("stop"))
        } else {
            self.gpio.reset(pin).map_err(Error::peripheral("reset"))
        };
        info!("backlight released: {}", self.config);
        result
    }

    fn connected_pin(&self) -> Result<i32> {
        let pin = self.config.pin_number;
        if !self.config.is_connected() {
            warn!("backlight pin {pin} is not connected");
            return Err(Error::InvalidPin(pin));
        }
        Ok(pin)
    }
}

impl<D, P> Drop for Backlight<D, P>
where
    D: DigitalOutput,
    P: PwmOutput,
{
    fn drop(&mut self) {
        if self.initialized && let Err(e) = self.release() {
            warn!("failed to release backlight: {e}");
        }
    }
}

/// `true` if initialization drives level 1 / duty `2^bits - 1` rather than 0.
fn starts_driven(state: InitialState, active_level: bool) -> bool {
    state == InitialState::On && active_level
}

/// Brightness the panel shows right after initialization.
fn initial_brightness(state: InitialState, active_level: bool) -> u8 {
    // Level/duty 0 lights an active-low panel even under the "off" policy.
    if state == InitialState::On || !active_level { 100 } else { 0 }
}

/// Percentage the output has to be driven at for a requested brightness.
fn effective_percent(percent: u8, active_level: bool) -> u8 {
    if active_level { percent } else { 100 - percent }
}

/// Duty counts for `percent` of a `range`-count period, truncated.
fn duty_cycle(range: u32, percent: u8) -> u32 {
    range * u32::from(percent) / 100
}
