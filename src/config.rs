use std::path::PathBuf;
use std::time::Duration;
use anyhow::{bail, Result};
use clap::Parser;
use crate::constants::*;

/// Press the button, see a random picture, hear a boom.
#[derive(Parser, Debug, Clone)]
#[command(name = "flash-button", version, about)]
pub struct Config {
    /// Directory holding the images to flash
    #[arg(default_value = DEFAULT_IMAGE_DIR)]
    pub image_dir: PathBuf,

    /// Sound played on every press
    #[arg(long, default_value = DEFAULT_SOUND_PATH)]
    pub sound: PathBuf,

    /// How long an image stays on screen after the last press, in milliseconds
    #[arg(long, default_value_t = FLASH_DURATION.as_millis() as u64)]
    pub flash_ms: u64,

    /// Playback volume between 0 and 1
    #[arg(long, default_value_t = DEFAULT_VOLUME)]
    pub volume: f32,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: i32,

    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Start in fullscreen mode
    #[arg(long)]
    pub fullscreen: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.flash_ms == 0 {
            bail!("--flash-ms must be greater than zero");
        }
        if self.width <= 0 || self.height <= 0 {
            bail!("window size must be positive, got {}x{}", self.width, self.height);
        }
        if self.fps == 0 {
            bail!("--fps must be greater than zero");
        }
        if !(0.0..=1.0).contains(&self.volume) {
            bail!("--volume must be between 0 and 1, got {}", self.volume);
        }
        Ok(())
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }
}
