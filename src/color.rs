use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Renderer-independent colour
// ---------------------------------------------------------------------------

/// An sRGB colour plus the name it was requested by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartColor {
    pub name: String,
    pub rgb: [u8; 3],
}

impl ChartColor {
    fn from_srgb(name: impl Into<String>, c: Srgb<u8>) -> Self {
        ChartColor {
            name: name.into(),
            rgb: [c.red, c.green, c.blue],
        }
    }

    fn hex(rgb: [u8; 3]) -> Self {
        ChartColor {
            name: format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]),
            rgb,
        }
    }
}

/// Seaborn colourway, used for series without an explicit colour.
pub const SEABORN: [[u8; 3]; 10] = [
    [76, 114, 176],
    [221, 132, 82],
    [85, 168, 104],
    [196, 78, 82],
    [129, 114, 179],
    [147, 120, 96],
    [218, 139, 195],
    [140, 140, 140],
    [204, 185, 116],
    [100, 181, 205],
];

/// The `i`-th colour of the seaborn colourway, wrapping around.
pub fn seaborn(i: usize) -> ChartColor {
    ChartColor::hex(SEABORN[i % SEABORN.len()])
}

/// Look up a CSS colour name such as `"darkslateblue"`.
pub fn resolve_color(name: &str) -> Option<ChartColor> {
    palette::named::from_str(&name.trim().to_ascii_lowercase()).map(|c| ChartColor::from_srgb(name.trim(), c))
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<ChartColor> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let c: Srgb<u8> = rgb.into_format();
            ChartColor::hex([c.red, c.green, c.blue])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → colour
// ---------------------------------------------------------------------------

/// Maps category labels to colours of a discrete sequence.
///
/// Labels are assigned in ascending order, cycling through the sequence
/// when there are more labels than colours. Names `palette` does not know
/// are replaced by generated colours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorMap {
    pub column: String,
    mapping: BTreeMap<String, ChartColor>,
}

impl ColorMap {
    pub fn from_sequence<S: AsRef<str>>(column: &str, labels: &[S], sequence: &[&str]) -> Self {
        let mut sorted: Vec<&str> = labels.iter().map(|s| s.as_ref()).collect();
        sorted.sort_unstable();
        sorted.dedup();

        let fallback = generate_palette(sequence.len().max(1));
        let colors: Vec<ChartColor> = if sequence.is_empty() {
            fallback
        } else {
            sequence
                .iter()
                .zip(fallback)
                .map(|(name, generated)| {
                    resolve_color(name).unwrap_or_else(|| {
                        log::warn!("Unknown colour name '{name}', using {}", generated.name);
                        generated
                    })
                })
                .collect()
        };

        let mapping = sorted
            .into_iter()
            .enumerate()
            .map(|(i, label)| (label.to_string(), colors[i % colors.len()].clone()))
            .collect();

        ColorMap {
            column: column.to_string(),
            mapping,
        }
    }

    /// Look up the colour for a given label.
    pub fn color_for(&self, label: &str) -> ChartColor {
        self.mapping.get(label).cloned().unwrap_or_else(|| seaborn(7))
    }

    /// Return the legend entries (label → colour) in label order.
    pub fn legend_entries(&self) -> Vec<(String, ChartColor)> {
        self.mapping
            .iter()
            .map(|(label, c)| (label.clone(), c.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_css_names() {
        assert_eq!(resolve_color("tomato").unwrap().rgb, [255, 99, 71]);
        assert_eq!(resolve_color("DarkSlateBlue").unwrap().rgb, [72, 61, 139]);
        assert_eq!(resolve_color("lightblue").unwrap().rgb, [173, 216, 230]);
        assert!(resolve_color("not-a-colour").is_none());
    }

    #[test]
    fn sequence_assigned_in_label_order() {
        let terms = ["60 months", "36 months"];
        let map = ColorMap::from_sequence("term", &terms, &["darkslateblue", "tomato"]);
        assert_eq!(map.color_for("36 months").name, "darkslateblue");
        assert_eq!(map.color_for("60 months").name, "tomato");
        let legend: Vec<String> = map.legend_entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(legend, ["36 months", "60 months"]);
    }

    #[test]
    fn sequence_cycles_and_falls_back() {
        let labels = ["a", "b", "c"];
        let map = ColorMap::from_sequence("x", &labels, &["tomato", "nonsense"]);
        assert_eq!(map.color_for("a").name, "tomato");
        assert!(map.color_for("b").name.starts_with('#'));
        assert_eq!(map.color_for("c"), map.color_for("a"));
    }

    #[test]
    fn palette_sizes() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
    }
}
