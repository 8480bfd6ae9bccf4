use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use schema_scope::data::model::Priority;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.6, 0.55))
        .collect()
}

// ---------------------------------------------------------------------------
// Score and priority colours
// ---------------------------------------------------------------------------

/// Red at 0 through amber to green at 100.
pub fn score_color(score: f64) -> Color32 {
    let t = (score.clamp(0.0, 100.0) / 100.0) as f32;
    hsl_to_color32(t * 120.0, 0.7, 0.45)
}

pub fn priority_color(priority: Priority) -> Color32 {
    match priority {
        Priority::High => hsl_to_color32(0.0, 0.7, 0.5),
        Priority::Medium => hsl_to_color32(40.0, 0.85, 0.5),
        Priority::Low => hsl_to_color32(120.0, 0.5, 0.45),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn test_score_color_runs_red_to_green() {
        let low = score_color(0.0);
        let high = score_color(100.0);
        assert!(low.r() > low.g());
        assert!(high.g() > high.r());
        assert_eq!(score_color(-10.0), low);
        assert_eq!(score_color(250.0), high);
    }
}
