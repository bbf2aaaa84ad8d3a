//! ESP-IDF GPIO and LEDC drivers as backlight capabilities
//!
//! Pins, timers and channels are addressed by number, so the pin must not be
//! handed to any other driver while a [`Backlight`](crate::Backlight) owns it.
use anyhow::Result;
use esp_idf_hal::sys::{
    esp, gpio_config, gpio_config_t, gpio_int_type_t_GPIO_INTR_DISABLE,
    gpio_mode_t_GPIO_MODE_OUTPUT, gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
    gpio_pullup_t_GPIO_PULLUP_DISABLE, gpio_reset_pin, gpio_set_level, ledc_channel_config,
    ledc_channel_config_t, ledc_mode_t, ledc_stop, ledc_timer_config, ledc_timer_config_t,
    ledc_update_duty, ledc_set_duty,
};

use crate::{
    backlight::Backlight,
    config::{BacklightConfig, SpeedMode},
    peripheral::{DigitalOutput, PwmOutput, pin_bit_mask},
};

/// IDF GPIO driver
#[derive(Debug, Default, Clone, Copy)]
pub struct EspGpio;

/// IDF LEDC driver
#[derive(Debug, Default, Clone, Copy)]
pub struct EspLedc;

/// Create a backlight controller on the IDF drivers.
///
/// # Examples
///
/// ```ignore
/// use panel_backlight::{esp, BacklightConfig};
///
/// let mut backlight = esp::backlight(BacklightConfig::gpio(38, true));
/// backlight.initialize().unwrap();
/// backlight.disable().unwrap();
/// ```
pub fn backlight(config: BacklightConfig) -> Backlight<EspGpio, EspLedc> {
    Backlight::new(config, EspGpio, EspLedc)
}

fn speed_mode(mode: SpeedMode) -> ledc_mode_t {
    match mode {
        SpeedMode::LowSpeed => esp_idf_hal::sys::ledc_mode_t_LEDC_LOW_SPEED_MODE,
        #[cfg(esp32)]
        SpeedMode::HighSpeed => esp_idf_hal::sys::ledc_mode_t_LEDC_HIGH_SPEED_MODE,
        #[cfg(not(esp32))]
        SpeedMode::HighSpeed => {
            log::warn!("high speed LEDC mode unavailable, using low speed");
            esp_idf_hal::sys::ledc_mode_t_LEDC_LOW_SPEED_MODE
        }
    }
}

impl DigitalOutput for EspGpio {
    fn configure_output(&mut self, pin: i32) -> Result<()> {
        let io_conf = gpio_config_t {
            pin_bit_mask: pin_bit_mask(pin)?,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
            ..Default::default()
        };
        esp!(unsafe { gpio_config(&io_conf) })?;
        Ok(())
    }

    fn set_level(&mut self, pin: i32, level: u32) -> Result<()> {
        esp!(unsafe { gpio_set_level(pin, level) })?;
        Ok(())
    }

    fn reset(&mut self, pin: i32) -> Result<()> {
        esp!(unsafe { gpio_reset_pin(pin) })?;
        Ok(())
    }
}

impl PwmOutput for EspLedc {
    fn configure_timer(
        &mut self,
        timer: u32,
        resolution_bits: u8,
        frequency_hz: u32,
        mode: SpeedMode,
    ) -> Result<()> {
        // A zeroed clk_cfg selects LEDC_AUTO_CLK.
        let timer_conf = ledc_timer_config_t {
            speed_mode: speed_mode(mode),
            duty_resolution: resolution_bits.into(),
            timer_num: timer,
            freq_hz: frequency_hz,
            ..Default::default()
        };
        esp!(unsafe { ledc_timer_config(&timer_conf) })?;
        Ok(())
    }

    fn configure_channel(
        &mut self,
        channel: u32,
        timer: u32,
        pin: i32,
        initial_duty: u32,
        mode: SpeedMode,
    ) -> Result<()> {
        let channel_conf = ledc_channel_config_t {
            gpio_num: pin,
            speed_mode: speed_mode(mode),
            channel,
            timer_sel: timer,
            duty: initial_duty,
            hpoint: 0,
            ..Default::default()
        };
        esp!(unsafe { ledc_channel_config(&channel_conf) })?;
        Ok(())
    }

    fn set_duty(&mut self, channel: u32, duty: u32, mode: SpeedMode) -> Result<()> {
        esp!(unsafe { ledc_set_duty(speed_mode(mode), channel, duty) })?;
        Ok(())
    }

    fn commit_duty(&mut self, channel: u32, mode: SpeedMode) -> Result<()> {
        esp!(unsafe { ledc_update_duty(speed_mode(mode), channel) })?;
        Ok(())
    }

    fn stop(&mut self, channel: u32, idle_level: bool, mode: SpeedMode) -> Result<()> {
        esp!(unsafe { ledc_stop(speed_mode(mode), channel, idle_level.into()) })?;
        Ok(())
    }
}
