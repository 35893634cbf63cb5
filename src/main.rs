use std::time::Duration;
use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use raylib::prelude::*;

use flash_button::audio::{AudioSlot, RaylibSoundBackend};
use flash_button::catalog;
use flash_button::config::Config;
use flash_button::constants::PRELOAD_UPLOADS_PER_FRAME;
use flash_button::input::{FrameInput, InputTracker};
use flash_button::render::{button_bounds, draw_background, draw_button, draw_overlay};
use flash_button::texture_loader::{decode_texture, load_texture, TextureCache};
use flash_button::widget::FlashButton;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    config.validate()?;
    run(&config)
}

fn run(config: &Config) -> Result<()> {
    // --- Load Catalog ---
    let catalog = catalog::discover(&config.image_dir)
        .with_context(|| format!("Loading images from {:?}", config.image_dir))?;

    let mut builder = raylib::init();
    builder
        .size(config.width, config.height)
        .title("Flash Button")
        .vsync()
        .resizable();
    if config.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // Sounds borrow the device, so it must outlive the widget
    let audio_device = match RaylibAudio::init_audio_device() {
        Ok(device) => Some(device),
        Err(e) => {
            warn!("Audio device unavailable: {}", e);
            None
        }
    };

    let mut textures: TextureCache<Texture2D> = TextureCache::new(catalog.len());
    let mut widget = FlashButton::new(
        catalog,
        AudioSlot::new(RaylibSoundBackend::new(audio_device.as_ref()), &config.sound, config.volume),
        config.flash_duration(),
        rand::rng(),
    );
    widget.mount();

    let mut tracker = InputTracker::new();

    // --- Main Loop ---
    while !rl.window_should_close() {
        let now = Duration::from_secs_f64(rl.get_time());

        // 1. Upload whatever the prefetch thread has read so far
        for item in widget.take_prefetched(PRELOAD_UPLOADS_PER_FRAME) {
            if !textures.is_pending(item.index) {
                continue;
            }
            match item.result.and_then(|raw| decode_texture(&mut rl, &thread, &raw)) {
                Ok(texture) => {
                    textures.insert(item.index, texture);
                }
                Err(e) => {
                    warn!("Could not preload {:?}: {:#}", widget.catalog().get(item.index), e);
                    textures.mark_failed(item.index);
                }
            }
        }

        // 2. Pending reset first, it was armed by an earlier frame
        widget.tick(now);

        // 3. Input
        let screen_width = rl.get_screen_width();
        let screen_height = rl.get_screen_height();
        let bounds = button_bounds(screen_width as f32, screen_height as f32);

        let outcome = tracker.update(FrameInput {
            over_button: bounds.check_collision_point_rec(rl.get_mouse_position()),
            mouse_pressed: rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT),
            mouse_released: rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT),
            touching: rl.get_touch_point_count() > 0,
            tab_pressed: rl.is_key_pressed(KeyboardKey::KEY_TAB),
            activate_key_pressed: rl.is_key_pressed(KeyboardKey::KEY_ENTER)
                || rl.is_key_pressed(KeyboardKey::KEY_SPACE),
        });
        for event in outcome.events {
            widget.handle(event);
        }
        if outcome.activate {
            widget.activate(now);
        }

        // 4. Make sure the flashed image is loaded, even if prefetch has not reached it
        if let Some((index, path)) = widget.overlay() {
            textures.ensure_with(index, || load_texture(&mut rl, &thread, path));
        }
        let overlay_index = widget.overlay().map(|(index, _)| index);

        // --- Draw: background, overlay, button on top ---
        let mut d = rl.begin_drawing(&thread);
        draw_background(&mut d, screen_width, screen_height);
        if let Some(index) = overlay_index {
            draw_overlay(&mut d, textures.get(index), screen_width, screen_height);
        }
        draw_button(&mut d, bounds, widget.interaction());
    }

    info!("Window closed, {} images were loaded", textures.ready_count());
    widget.teardown();
    textures.clear();
    Ok(())
}
