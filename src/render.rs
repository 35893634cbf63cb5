use raylib::prelude::*;
use crate::constants::*;
use crate::interaction::Interaction;

/// Where the button sits for hit testing: centered, unscaled.
pub fn button_bounds(screen_width: f32, screen_height: f32) -> Rectangle {
    Rectangle::new(
        (screen_width - BUTTON_WIDTH) * 0.5,
        (screen_height - BUTTON_HEIGHT) * 0.5,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

fn scaled_around_center(rect: Rectangle, scale: f32) -> Rectangle {
    let width = rect.width * scale;
    let height = rect.height * scale;
    Rectangle::new(
        rect.x + (rect.width - width) * 0.5,
        rect.y + (rect.height - height) * 0.5,
        width,
        height,
    )
}

pub fn draw_background(d: &mut RaylibDrawHandle, screen_width: i32, screen_height: i32) {
    d.draw_rectangle_gradient_v(0, 0, screen_width, screen_height, BACKGROUND_TOP, BACKGROUND_BOTTOM);
}

// Black backdrop, then the image stretched to the whole window, aspect ratio ignored.
// A missing texture leaves just the backdrop.
pub fn draw_overlay(d: &mut RaylibDrawHandle, texture: Option<&Texture2D>, screen_width: i32, screen_height: i32) {
    d.draw_rectangle(0, 0, screen_width, screen_height, Color::BLACK);

    if let Some(texture) = texture {
        d.draw_texture_pro(
            texture,
            Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
            Rectangle::new(0.0, 0.0, screen_width as f32, screen_height as f32),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }
}

pub fn draw_button(d: &mut RaylibDrawHandle, bounds: Rectangle, interaction: Interaction) {
    let (rect, fill) = if interaction.pressed {
        (scaled_around_center(bounds, BUTTON_PRESSED_SCALE), BUTTON_PRESSED)
    } else if interaction.hovered {
        (bounds, BUTTON_HOVERED)
    } else {
        (bounds, BUTTON_IDLE)
    };

    if interaction.hovered {
        let border = Rectangle::new(rect.x - 3.0, rect.y - 3.0, rect.width + 6.0, rect.height + 6.0);
        d.draw_rectangle_rounded(border, BUTTON_ROUNDNESS, 16, BUTTON_BORDER);
    }
    d.draw_rectangle_rounded(rect, BUTTON_ROUNDNESS, 16, fill);

    let text_width = d.measure_text(BUTTON_LABEL, BUTTON_FONT_SIZE);
    d.draw_text(
        BUTTON_LABEL,
        (rect.x + (rect.width - text_width as f32) * 0.5) as i32,
        (rect.y + (rect.height - BUTTON_FONT_SIZE as f32) * 0.5) as i32,
        BUTTON_FONT_SIZE,
        Color::WHITE,
    );
}
