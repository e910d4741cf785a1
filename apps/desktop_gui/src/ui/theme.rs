use eframe::egui::Color32;

pub const TODAY_STROKE: Color32 = Color32::from_rgb(229, 57, 53);
pub const SELECTED_FILL: Color32 = Color32::from_rgb(88, 101, 242);
pub const OUTSIDE_TEXT: Color32 = Color32::from_rgb(140, 142, 150);
pub const FALLBACK_DOT: Color32 = Color32::from_rgb(128, 128, 128);

/// Parses the colors state definitions carry: `#rgb`, `#rrggbb` or a few
/// common names.
pub fn parse_color(raw: &str) -> Option<Color32> {
    let raw = raw.trim();
    if let Some(hex) = raw.strip_prefix('#') {
        return parse_hex(hex);
    }
    let color = match raw.to_ascii_lowercase().as_str() {
        "red" => Color32::RED,
        "green" => Color32::GREEN,
        "blue" => Color32::BLUE,
        "yellow" => Color32::YELLOW,
        "orange" => Color32::ORANGE,
        "black" => Color32::BLACK,
        "white" => Color32::WHITE,
        "gray" | "grey" => Color32::GRAY,
        _ => return None,
    };
    Some(color)
}

fn parse_hex(hex: &str) -> Option<Color32> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, i) in rgb.iter_mut().zip(0..3) {
                let nibble = channel(hex.get(i..i + 1)?)?;
                *slot = nibble * 17;
            }
            Some(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        }
        6 => Some(Color32::from_rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        _ => None,
    }
}

pub fn dot_color(raw: &str) -> Color32 {
    parse_color(raw).unwrap_or_else(|| {
        tracing::debug!(color = raw, "gui: unrecognized state color");
        FALLBACK_DOT
    })
}
