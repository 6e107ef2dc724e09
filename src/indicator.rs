use smart_leds::RGB8;

use crate::config::LAYER_COUNT;

/// Colour of the on-board LED while `layer` is active, off on the base layer.
pub fn layer_color(layer: usize) -> RGB8 {
    if layer == 0 {
        return RGB8::default();
    }
    let step = 255 / LAYER_COUNT;
    wheel((layer.min(LAYER_COUNT - 1) * step) as u8)
}

/// Convert a number from `0..=255` to an RGB color triplet.
///
/// The colours are a transition from red, to green, to blue and back to red.
fn wheel(mut wheel_pos: u8) -> RGB8 {
    wheel_pos = 255 - wheel_pos;
    if wheel_pos < 85 {
        // No green in this sector - red and blue only
        (255 - (wheel_pos * 3), 0, wheel_pos * 3).into()
    } else if wheel_pos < 170 {
        // No red in this sector - green and blue only
        wheel_pos -= 85;
        (0, wheel_pos * 3, 255 - (wheel_pos * 3)).into()
    } else {
        // No blue in this sector - red and green only
        wheel_pos -= 170;
        (wheel_pos * 3, 255 - (wheel_pos * 3), 0).into()
    }
}
