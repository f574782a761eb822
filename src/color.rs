use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: pitch type → Color32
// ---------------------------------------------------------------------------

/// Maps pitch-type codes to distinct colours.
///
/// Built from the full season's pitch types so a pitch keeps its colour
/// when the player or pitch-type selection changes.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new<'a>(pitch_types: impl IntoIterator<Item = &'a str>) -> Self {
        let mut keys: Vec<&str> = pitch_types.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        let palette = generate_palette(keys.len());
        let mapping = keys
            .into_iter()
            .zip(palette)
            .map(|(k, c)| (k.to_string(), c))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a pitch type.
    pub fn color_for(&self, pitch_type: &str) -> Color32 {
        self.mapping
            .get(pitch_type)
            .copied()
            .unwrap_or(Color32::GRAY)
    }

    /// Legend entries (label → colour) for the given pitch types, in order.
    pub fn legend_entries<'a>(
        &self,
        pitch_types: impl IntoIterator<Item = &'a str>,
    ) -> Vec<(String, Color32)> {
        pitch_types
            .into_iter()
            .map(|t| (t.to_string(), self.color_for(t)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        let palette = generate_palette(5);
        assert_eq!(palette.len(), 5);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn colours_do_not_depend_on_input_order() {
        let a = ColorMap::new(["FF", "SL", "CH"]);
        let b = ColorMap::new(["CH", "FF", "SL", "FF"]);
        for t in ["FF", "SL", "CH"] {
            assert_eq!(a.color_for(t), b.color_for(t));
        }
        assert_eq!(a.color_for("KN"), Color32::GRAY);
    }
}
