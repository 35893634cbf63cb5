use std::time::Duration;
use raylib::prelude::Color;

pub const WINDOW_WIDTH: i32 = 960;            // Initial window width
pub const WINDOW_HEIGHT: i32 = 540;           // Initial window height
pub const FPS: u32 = 60;                      // Frames per second

pub const FLASH_DURATION: Duration = Duration::from_millis(220); // How long the overlay stays up after an activation

pub const DEFAULT_IMAGE_DIR: &str = "assets";
pub const DEFAULT_SOUND_PATH: &str = "assets/vine-boom.mp3";
pub const DEFAULT_VOLUME: f32 = 1.0;

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

pub const PRELOAD_UPLOADS_PER_FRAME: usize = 4; // Textures uploaded per frame while prefetching

pub const BUTTON_WIDTH: f32 = 220.0;
pub const BUTTON_HEIGHT: f32 = 72.0;
pub const BUTTON_PRESSED_SCALE: f32 = 0.96;
pub const BUTTON_ROUNDNESS: f32 = 0.5;
pub const BUTTON_LABEL: &str = "Press me";
pub const BUTTON_FONT_SIZE: i32 = 28;

pub const BACKGROUND_TOP: Color = Color::new(10, 10, 10, 255);       // neutral-950
pub const BACKGROUND_BOTTOM: Color = Color::new(38, 38, 38, 255);    // neutral-800
pub const BUTTON_IDLE: Color = Color::new(220, 38, 38, 255);
pub const BUTTON_HOVERED: Color = Color::new(239, 68, 68, 255);
pub const BUTTON_PRESSED: Color = Color::new(185, 28, 28, 255);
pub const BUTTON_BORDER: Color = Color::new(254, 202, 202, 255);
