//! Backlight configuration
use std::fmt;

/// Initial output state applied by [`Backlight::initialize`](crate::Backlight::initialize).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialState {
    /// Drive the "light on" level (or full duty) for the configured polarity.
    On,
    /// Drive level 0 (or duty 0) regardless of polarity.
    Off,
}

/// Initial state policy, fixed at build time by the `default-on` feature.
pub const INITIAL_STATE: InitialState = if cfg!(feature = "default-on") {
    InitialState::On
} else {
    InitialState::Off
};

/// Largest duty resolution a PWM timer accepts
pub const MAX_RESOLUTION_BITS: u8 = 20;

/// PWM speed group
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SpeedMode {
    #[default]
    LowSpeed,
    /// Only present on chips with a high-speed LEDC group (ESP32).
    HighSpeed,
}

/// PWM timer and channel settings.
///
/// # Examples
///
/// ```
/// use panel_backlight::PwmConfig;
///
/// let pwm = PwmConfig::new().timer(1).channel(2).resolution(8).frequency(20_000);
/// assert_eq!(pwm.resolution_bits, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmConfig {
    pub resolution_bits: u8,
    pub timer_id: u32,
    pub channel_id: u32,
    pub frequency_hz: u32,
    pub speed_mode: SpeedMode,
}

impl PwmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn timer(mut self, timer_id: u32) -> Self {
        self.timer_id = timer_id;
        self
    }

    #[must_use]
    pub fn channel(mut self, channel_id: u32) -> Self {
        self.channel_id = channel_id;
        self
    }

    #[must_use]
    pub fn resolution(mut self, bits: u8) -> Self {
        self.resolution_bits = bits;
        self
    }

    #[must_use]
    pub fn frequency(mut self, hz: u32) -> Self {
        self.frequency_hz = hz;
        self
    }

    #[must_use]
    pub fn speed_mode(mut self, mode: SpeedMode) -> Self {
        self.speed_mode = mode;
        self
    }

    /// Number of duty counts in one period (`2^resolution_bits`).
    ///
    /// `None` when the resolution is outside `1..=MAX_RESOLUTION_BITS`.
    pub fn duty_range(&self) -> Option<u32> {
        match self.resolution_bits {
            1..=MAX_RESOLUTION_BITS => Some(1u32 << self.resolution_bits),
            _ => None,
        }
    }
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            resolution_bits: 10,
            timer_id: 0,
            channel_id: 0,
            frequency_hz: 5_000,
            speed_mode: SpeedMode::LowSpeed,
        }
    }
}

/// Backlight wiring.
///
/// A negative `pin_number` marks the backlight as not connected; every
/// operation on such a controller fails without touching the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacklightConfig {
    pub pin_number: i32,
    pub use_pwm: bool,
    /// `true` if a high level (or full duty) lights the panel.
    pub active_level: bool,
    /// Ignored unless `use_pwm` is set.
    pub pwm: PwmConfig,
}

impl BacklightConfig {
    /// On/off backlight on a plain output pin.
    pub fn gpio(pin_number: i32, active_level: bool) -> Self {
        Self {
            pin_number,
            use_pwm: false,
            active_level,
            pwm: PwmConfig::default(),
        }
    }

    /// Dimmable backlight on a PWM channel.
    pub fn pwm(pin_number: i32, active_level: bool, pwm: PwmConfig) -> Self {
        Self {
            pin_number,
            use_pwm: true,
            active_level,
            pwm,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.pin_number >= 0
    }
}

impl fmt::Display for BacklightConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let polarity = if self.active_level { "high" } else { "low" };
        if self.use_pwm {
            write!(
                f,
                "pwm pin {} (timer {}, channel {}, {} bits @ {} Hz, active {})",
                self.pin_number,
                self.pwm.timer_id,
                self.pwm.channel_id,
                self.pwm.resolution_bits,
                self.pwm.frequency_hz,
                polarity
            )
        } else {
            write!(f, "gpio pin {} (active {})", self.pin_number, polarity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpio_form_never_uses_pwm() {
        let config = BacklightConfig::gpio(5, true);
        assert_eq!(config.pin_number, 5);
        assert!(!config.use_pwm);
        assert!(config.active_level);
        assert!(config.is_connected());
    }

    #[test]
    fn negative_pin_is_not_connected() {
        assert!(!BacklightConfig::gpio(-1, true).is_connected());
    }

    #[test]
    fn duty_range_follows_resolution() {
        assert_eq!(PwmConfig::new().resolution(8).duty_range(), Some(256));
        assert_eq!(PwmConfig::new().resolution(20).duty_range(), Some(1 << 20));
        assert_eq!(PwmConfig::new().resolution(0).duty_range(), None);
        assert_eq!(PwmConfig::new().resolution(21).duty_range(), None);
    }

    #[test]
    fn display_describes_wiring() {
        let config = BacklightConfig::pwm(5, false, PwmConfig::new().resolution(8));
        assert_eq!(
            config.to_string(),
            "pwm pin 5 (timer 0, channel 0, 8 bits @ 5000 Hz, active low)"
        );
        assert_eq!(BacklightConfig::gpio(3, true).to_string(), "gpio pin 3 (active high)");
    }
}
