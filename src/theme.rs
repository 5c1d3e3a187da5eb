//! Handle the color theme
use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};

use crate::options::CommandOptions;

/// Theme defaults to Dark256
pub static DEFAULT_THEME: LazyLock<ColorTheme> = LazyLock::new(ColorTheme::dark256);

/// The color scheme of the palette UI
///
/// <pre>
/// +------------------+
/// | > query          |  --> prompt & query (or placeholder)
/// | Files            |  --> group_label
/// | > current line   |  --> cursor & current & current_match
/// |   normal line    |  --> normal & matched
/// |   3/10           |  --> spinner & info
/// +------------------+
/// </pre>
#[derive(Copy, Clone, Debug, Default)]
pub struct ColorTheme {
    /// Non-highlighted rows and general text
    pub normal: Style,
    /// Matched text on non-highlighted rows
    pub matched: Style,
    /// Highlighted row, non-matched text
    pub current: Style,
    /// Highlighted row, matched text
    pub current_match: Style,
    /// Query text/input
    pub query: Style,
    /// Placeholder shown while the query is empty
    pub placeholder: Style,
    /// Spinner
    pub spinner: Style,
    /// Info (matched/total counts)
    pub info: Style,
    /// Prompt prefix
    pub prompt: Style,
    /// Cursor/pointer (prefix of the highlighted row)
    pub cursor: Style,
    /// Group heading lines
    pub group_label: Style,
    /// The empty-state message
    pub empty: Style,
    /// Border
    pub border: Style,
}

impl ColorTheme {
    /// Setup the theme from the palette options
    pub fn init_from_options(options: &CommandOptions) -> ColorTheme {
        match std::env::var_os("NO_COLOR") {
            Some(no_color) if !no_color.is_empty() => ColorTheme::none(),
            _ => ColorTheme::from_options(&options.color),
        }
    }

    fn none() -> Self {
        Self {
            spinner: Style::default().bold(),
            placeholder: Style::default().dim(),
            empty: Style::default().dim(),
            ..ColorTheme::default()
        }
    }

    fn bw() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            matched: base.matched.underlined(),
            current: base.current.reversed(),
            current_match: base.current_match.reversed().underlined(),
            group_label: base.group_label.bold(),
            ..base
        }
    }

    fn default16() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            matched: base.matched.fg(Color::Green),
            current: base.current.fg(Color::Yellow),
            current_match: base.current_match.fg(Color::Green),
            spinner: base.spinner.fg(Color::Green),
            info: base.info.fg(Color::White),
            prompt: base.prompt.fg(Color::Blue),
            cursor: base.cursor.fg(Color::Red),
            group_label: base.group_label.fg(Color::Cyan),
            border: base.border.fg(Color::Black),
            ..base
        }
    }

    fn dark256() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            matched: base.matched.fg(Color::Indexed(108)).bg(Color::Indexed(0)),
            current: base.current.bg(Color::Indexed(236)),
            current_match: base.current_match.fg(Color::Indexed(151)).bg(Color::Indexed(236)),
            spinner: base.spinner.fg(Color::Indexed(148)),
            info: base.info.fg(Color::Indexed(144)),
            prompt: base.prompt.fg(Color::Indexed(110)),
            cursor: base.cursor.fg(Color::Indexed(161)),
            group_label: base.group_label.fg(Color::Indexed(109)),
            border: base.border.fg(Color::Indexed(59)),
            ..base
        }
    }

    fn light256() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            matched: base.matched.fg(Color::Indexed(0)).bg(Color::Indexed(220)),
            current: base.current.bg(Color::Indexed(251)),
            current_match: base.current_match.fg(Color::Indexed(66)).bg(Color::Indexed(251)),
            spinner: base.spinner.fg(Color::Indexed(65)),
            info: base.info.fg(Color::Indexed(101)),
            prompt: base.prompt.fg(Color::Indexed(25)),
            cursor: base.cursor.fg(Color::Indexed(161)),
            group_label: base.group_label.fg(Color::Indexed(31)),
            border: base.border.fg(Color::Indexed(145)),
            ..base
        }
    }

    fn set_color(&mut self, name: &str, spec: &str) {
        let spec_parts: Vec<_> = spec.split(&['+', ':']).collect();

        // Compute color
        let raw_color = spec_parts[0];
        let new_color = if raw_color.len() == 7 && raw_color.starts_with('#') {
            // RGB Hex color
            let r = u8::from_str_radix(&raw_color[1..3], 16).unwrap_or(255);
            let g = u8::from_str_radix(&raw_color[3..5], 16).unwrap_or(255);
            let b = u8::from_str_radix(&raw_color[5..7], 16).unwrap_or(255);
            Some(Color::Rgb(r, g, b))
        } else {
            raw_color.parse::<u8>().ok().map(Color::Indexed).or_else(|| {
                debug!("Unknown color '{}'", spec_parts[0]);
                None
            })
        };

        // Compute modifiers
        let mut modifier = Modifier::empty();
        for part in spec_parts.iter().skip(1) {
            if matches!(*part, "x" | "regular") {
                modifier = Modifier::empty()
            } else {
                modifier |= match *part {
                    "b" | "bold" => Modifier::BOLD,
                    "u" | "underlined" => Modifier::UNDERLINED,
                    "c" | "crossed-out" => Modifier::CROSSED_OUT,
                    "d" | "dim" => Modifier::DIM,
                    "i" | "italic" => Modifier::ITALIC,
                    "r" | "reverse" => Modifier::REVERSED,
                    m => {
                        debug!("Unknown modifier '{m}'");
                        Modifier::empty()
                    }
                };
            }
        }
        // Apply - check for layer suffixes (_fg, -fg, _bg, -bg)
        let (component_name, layer) = if name.ends_with("_fg") || name.ends_with("-fg") {
            (&name[..name.len() - 3], "fg")
        } else if name.ends_with("_bg") || name.ends_with("-bg") {
            (&name[..name.len() - 3], "bg")
        } else if name == "bg" {
            ("", "bg")
        } else {
            (name, "fg")
        };

        match component_name {
            "" | "normal" => {
                set_style(&mut self.normal, layer, new_color, modifier);
            }
            "matched" | "hl" => {
                set_style(&mut self.matched, layer, new_color, modifier);
            }
            "current" | "fg+" => {
                set_style(&mut self.current, layer, new_color, modifier);
            }
            "bg+" => {
                set_style(&mut self.current, "bg", new_color, modifier);
            }
            "current_match" | "hl+" => {
                set_style(&mut self.current_match, layer, new_color, modifier);
            }
            "query" => {
                set_style(&mut self.query, layer, new_color, modifier);
            }
            "placeholder" => {
                set_style(&mut self.placeholder, layer, new_color, modifier);
            }
            "spinner" => {
                set_style(&mut self.spinner, layer, new_color, modifier);
            }
            "info" => {
                set_style(&mut self.info, layer, new_color, modifier);
            }
            "prompt" => {
                set_style(&mut self.prompt, layer, new_color, modifier);
            }
            "cursor" | "pointer" => {
                set_style(&mut self.cursor, layer, new_color, modifier);
            }
            "group_label" | "group" => {
                set_style(&mut self.group_label, layer, new_color, modifier);
            }
            "empty" => {
                set_style(&mut self.empty, layer, new_color, modifier);
            }
            "border" => {
                set_style(&mut self.border, layer, new_color, modifier);
            }
            _ => {}
        }
    }

    fn from_options(color: &str) -> Self {
        let mut theme = ColorTheme::dark256();
        for pair in color.split(',') {
            if let Some((name, spec)) = pair.split_once(':') {
                theme.set_color(name, spec);
            } else {
                theme = match color {
                    "light" => ColorTheme::light256(),
                    "16" => ColorTheme::default16(),
                    "bw" => ColorTheme::bw(),
                    "none" | "empty" => ColorTheme::none(),
                    "dark" | "default" => ColorTheme::dark256(),
                    t => {
                        debug!("Unknown color theme '{t}'");
                        ColorTheme::dark256()
                    }
                };
            }
        }
        theme
    }
}

fn set_style(s: &mut Style, layer: &str, color: Option<Color>, modifier: Modifier) {
    if let Some(c) = color {
        *s = match layer {
            "fg" => s.fg(c),
            "bg" => s.bg(c),
            _ => *s,
        }
    }
    *s = s.add_modifier(modifier);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_themes() {
        let none = ColorTheme::none();
        // Spinner should be bold even in none theme
        assert!(none.spinner.add_modifier.contains(Modifier::BOLD));

        let bw = ColorTheme::bw();
        assert!(bw.matched.add_modifier.contains(Modifier::UNDERLINED));
        assert!(bw.current.add_modifier.contains(Modifier::REVERSED));

        let theme_16 = ColorTheme::default16();
        assert_eq!(theme_16.matched.fg, Some(Color::Green));
        assert_eq!(theme_16.matched.bg, None);

        let dark = ColorTheme::dark256();
        assert_eq!(dark.matched.fg, Some(Color::Indexed(108)));
        assert_eq!(dark.matched.bg, Some(Color::Indexed(0)));

        let light = ColorTheme::light256();
        assert_eq!(light.matched.fg, Some(Color::Indexed(0)));
        assert_eq!(light.matched.bg, Some(Color::Indexed(220)));
    }

    #[test]
    fn test_ansi_color_parsing() {
        let theme = ColorTheme::from_options("matched:108");
        assert_eq!(theme.matched.fg, Some(Color::Indexed(108)));

        let theme = ColorTheme::from_options("prompt:25");
        assert_eq!(theme.prompt.fg, Some(Color::Indexed(25)));
    }

    #[test]
    fn test_rgb_hex_color_parsing() {
        let theme = ColorTheme::from_options("matched:#ff0000");
        assert_eq!(theme.matched.fg, Some(Color::Rgb(255, 0, 0)));

        let theme = ColorTheme::from_options("prompt:#00ff00");
        assert_eq!(theme.prompt.fg, Some(Color::Rgb(0, 255, 0)));
    }

    #[test]
    fn test_color_with_modifiers() {
        let theme = ColorTheme::from_options("matched:108:bold");
        assert_eq!(theme.matched.fg, Some(Color::Indexed(108)));
        assert!(theme.matched.add_modifier.contains(Modifier::BOLD));

        let theme = ColorTheme::from_options("matched:108:bold:underlined");
        assert!(theme.matched.add_modifier.contains(Modifier::BOLD));
        assert!(theme.matched.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_component_name_aliases() {
        let theme = ColorTheme::from_options("hl:108");
        assert_eq!(theme.matched.fg, Some(Color::Indexed(108)));

        let theme = ColorTheme::from_options("fg+:254");
        assert_eq!(theme.current.fg, Some(Color::Indexed(254)));

        let theme = ColorTheme::from_options("bg+:236");
        assert_eq!(theme.current.bg, Some(Color::Indexed(236)));

        let theme = ColorTheme::from_options("pointer:161");
        assert_eq!(theme.cursor.fg, Some(Color::Indexed(161)));

        let theme = ColorTheme::from_options("group:31");
        assert_eq!(theme.group_label.fg, Some(Color::Indexed(31)));
    }

    #[test]
    fn test_background_color() {
        let theme = ColorTheme::from_options("matched_bg:0");
        assert_eq!(theme.matched.bg, Some(Color::Indexed(0)));

        let theme = ColorTheme::from_options("matched-bg:236");
        assert_eq!(theme.matched.bg, Some(Color::Indexed(236)));
    }

    #[test]
    fn test_base_theme_with_overrides() {
        let theme = ColorTheme::from_options("dark,matched:200");
        assert_eq!(theme.matched.fg, Some(Color::Indexed(200)));
        // Other colors should still be from dark theme
        assert!(theme.prompt.fg.is_some());
    }

    #[test]
    fn test_invalid_color_graceful_handling() {
        // Invalid color values are ignored, leaving the dark256 defaults
        let theme = ColorTheme::from_options("matched:invalid");
        assert_eq!(theme.matched.fg, Some(Color::Indexed(108)));
        assert_eq!(theme.matched.bg, Some(Color::Indexed(0)));
    }
}
