use std::env;

use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    TrueColor,
    Ansi256,
    Ansi16,
}

impl ColorMode {
    /// Parse a config / env value. Unknown values mean "detect".
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "24bit" | "truecolor" | "rgb" => Some(ColorMode::TrueColor),
            "256" | "ansi256" => Some(ColorMode::Ansi256),
            "16" | "ansi16" | "ansi" => Some(ColorMode::Ansi16),
            _ => None,
        }
    }

    /// `RSVP_COLOR_MODE`, then `COLORTERM` / `TERM` heuristics.
    pub fn detect() -> Self {
        if let Some(mode) = env::var("RSVP_COLOR_MODE")
            .ok()
            .and_then(|v| ColorMode::parse(&v))
        {
            return mode;
        }
        if let Ok(v) = env::var("COLORTERM") {
            let l = v.to_ascii_lowercase();
            if l.contains("truecolor") || l.contains("24bit") {
                return ColorMode::TrueColor;
            }
        }
        if let Ok(v) = env::var("TERM") {
            if v.to_ascii_lowercase().contains("256color") {
                return ColorMode::Ansi256;
            }
        }
        ColorMode::Ansi16
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiGroup {
    Border,
    FocusBorder,
    Dimmed,
    Title,
    Label,
    Value,
    Selected,
    Error,
    Success,
    Button,
    ButtonFocused,
    ButtonDisabled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Debug)]
pub struct Palette {
    pub fg: Rgb,
    pub dim: Rgb,
    pub border: Rgb,
    pub accent: Rgb,
    pub ok: Rgb,
    pub error: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            fg: Rgb(192, 202, 245),
            dim: Rgb(107, 112, 137),
            border: Rgb(59, 63, 81),
            accent: Rgb(122, 162, 247),
            ok: Rgb(158, 206, 106),
            error: Rgb(247, 118, 142),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub mode: ColorMode,
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ColorMode::Ansi16)
    }
}

impl Theme {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            palette: Palette::default(),
        }
    }

    /// Configured mode if given and valid, otherwise detect from the environment.
    pub fn from_config(color_mode: Option<&str>) -> Self {
        let mode = color_mode
            .and_then(ColorMode::parse)
            .unwrap_or_else(ColorMode::detect);
        Self::new(mode)
    }

    pub fn style(&self, group: UiGroup) -> Style {
        let p = &self.palette;
        match group {
            UiGroup::Border => Style::default().fg(self.color(p.border)),
            UiGroup::FocusBorder => Style::default().fg(self.color(p.accent)),
            UiGroup::Dimmed => Style::default().fg(self.color(p.dim)),
            UiGroup::Title => Style::default()
                .fg(self.color(p.fg))
                .add_modifier(Modifier::BOLD),
            UiGroup::Label => Style::default().fg(self.color(p.fg)),
            UiGroup::Value => Style::default().fg(self.color(p.accent)),
            UiGroup::Selected => Style::default()
                .fg(self.color(p.accent))
                .add_modifier(Modifier::BOLD),
            UiGroup::Error => Style::default().fg(self.color(p.error)),
            UiGroup::Success => Style::default()
                .fg(self.color(p.ok))
                .add_modifier(Modifier::BOLD),
            UiGroup::Button => Style::default().fg(self.color(p.fg)).bg(Color::Black),
            UiGroup::ButtonFocused => Style::default()
                .fg(Color::Black)
                .bg(self.color(p.accent))
                .add_modifier(Modifier::BOLD),
            UiGroup::ButtonDisabled => Style::default()
                .fg(self.color(p.dim))
                .add_modifier(Modifier::CROSSED_OUT),
        }
    }

    pub fn color(&self, rgb: Rgb) -> Color {
        match self.mode {
            ColorMode::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
            ColorMode::Ansi256 => Color::Indexed(rgb_to_ansi256(rgb)),
            ColorMode::Ansi16 => rgb_to_ansi16(rgb),
        }
    }
}

/// Nearest entry of the xterm 6x6x6 cube or grayscale ramp.
fn rgb_to_ansi256(Rgb(r, g, b): Rgb) -> u8 {
    let level = |c: u8| (c as f32 / 255.0 * 5.0).round() as u8;
    let (ri, gi, bi) = (level(r), level(g), level(b));
    let cube = 16 + 36 * ri + 6 * gi + bi;

    let avg = (r as f32 + g as f32 + b as f32) / 3.0;
    let gray_step = (avg / 255.0 * 23.0).round() as u8;

    let dist = |cr: f32, cg: f32, cb: f32| {
        (cr - r as f32).abs() + (cg - g as f32).abs() + (cb - b as f32).abs()
    };
    let step = |i: u8| i as f32 * 255.0 / 5.0;
    let d_cube = dist(step(ri), step(gi), step(bi));
    let gray = gray_step as f32 * 255.0 / 23.0;
    let d_gray = dist(gray, gray, gray);

    // Prefer the cube unless gray is clearly closer.
    if d_gray + 15.0 < d_cube {
        232 + gray_step
    } else {
        cube
    }
}

/// Nearest of the 8 base colors, bright variant for light inputs.
fn rgb_to_ansi16(Rgb(r, g, b): Rgb) -> Color {
    const BASE: [(Color, Color, (i32, i32, i32)); 8] = [
        (Color::Black, Color::DarkGray, (0, 0, 0)),
        (Color::Red, Color::LightRed, (205, 0, 0)),
        (Color::Green, Color::LightGreen, (0, 205, 0)),
        (Color::Yellow, Color::LightYellow, (205, 205, 0)),
        (Color::Blue, Color::LightBlue, (0, 0, 238)),
        (Color::Magenta, Color::LightMagenta, (205, 0, 205)),
        (Color::Cyan, Color::LightCyan, (0, 205, 205)),
        (Color::Gray, Color::White, (229, 229, 229)),
    ];
    let bright = (r as u16 + g as u16 + b as u16) / 3 > 128;
    let (r, g, b) = (r as i32, g as i32, b as i32);
    BASE.iter()
        .min_by_key(|(_, _, (cr, cg, cb))| (cr - r).abs() + (cg - g).abs() + (cb - b).abs())
        .map(|(normal, light, _)| if bright { *light } else { *normal })
        .unwrap_or(Color::White)
}
