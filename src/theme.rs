//! Theme colors: Omeal brand palette, with per-key overrides from the
//! `[theme]` table of the config file.

use ratatui::style::Color;
use std::collections::BTreeMap;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,      // Brand orange: active borders, selected nav entry
    pub success: Color,     // Active / Available / Delivered, submit button
    pub danger: Color,      // Inactive / Cancelled, validation errors
    pub warning: Color,     // Pending, status line
    pub info: Color,        // In Progress, categories
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Secondary text
    pub bg_selected: Color, // Selected table row
    pub inactive: Color,    // Inactive borders
    pub header: Color,      // Table headers
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(255, 107, 53),   // #FF6B35
            success: Color::Rgb(46, 204, 113),  // #2ECC71
            danger: Color::Rgb(231, 76, 60),    // #E74C3C
            warning: Color::Rgb(241, 196, 15),  // #F1C40F
            info: Color::Rgb(52, 152, 219),     // #3498DB
            text: Color::Rgb(229, 231, 235),    // #E5E7EB
            text_dim: Color::Rgb(156, 163, 175), // #9CA3AF
            bg_selected: Color::Rgb(55, 65, 81), // #374151
            inactive: Color::Rgb(75, 85, 99),   // #4B5563
            header: Color::Rgb(255, 107, 53),
        }
    }
}

impl Theme {
    /// Brand defaults with any valid overrides applied
    pub fn load(overrides: &BTreeMap<String, String>) -> Self {
        let mut theme = Self::default();

        for (key, value) in overrides {
            let Some(color) = Self::parse_hex_color(value) else {
                tracing::warn!("Ignoring theme.{}: not a hex color: {}", key, value);
                continue;
            };
            match key.as_str() {
                "accent" => theme.accent = color,
                "success" => theme.success = color,
                "danger" => theme.danger = color,
                "warning" => theme.warning = color,
                "info" => theme.info = color,
                "text" => theme.text = color,
                "text_dim" => theme.text_dim = color,
                "bg_selected" => theme.bg_selected = color,
                "inactive" => theme.inactive = color,
                "header" => theme.header = color,
                _ => tracing::warn!("Unknown theme key: {}", key),
            }
        }

        theme
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Theme::parse_hex_color("#FF6B35"), Some(Color::Rgb(255, 107, 53)));
        assert_eq!(Theme::parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("#GG0000"), None);
        assert_eq!(Theme::parse_hex_color("#12345"), None);
    }

    #[test]
    fn test_overrides_apply_and_bad_values_are_ignored() {
        let mut overrides = BTreeMap::new();
        overrides.insert("accent".to_string(), "#000".to_string());
        overrides.insert("danger".to_string(), "red".to_string());
        overrides.insert("sparkle".to_string(), "#111111".to_string());

        let theme = Theme::load(&overrides);
        assert_eq!(theme.accent, Color::Rgb(0, 0, 0));
        assert_eq!(theme.danger, Theme::default().danger);
    }
}
