//! Color values accepted by particle options and the conversions between
//! the color spaces they can be written in.

use serde::{Deserialize, Serialize};

use super::random::{Rng, SingleOrMultiple};

pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

/// Hue in degrees, saturation and value in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Rgba {
    pub fn rgb(&self) -> Rgb {
        Rgb { r: self.r, g: self.g, b: self.b }
    }
}

/// A color as it may appear in options: a CSS-like string, an `{r,g,b}`
/// object, an `{h,s,l}` object, or a wrapper holding either.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Text(String),
    Rgb(Rgb),
    Hsl(Hsl),
    Structured {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rgb: Option<Rgb>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hsl: Option<Hsl>,
    },
}

impl ColorValue {
    pub fn text(value: &str) -> Self {
        ColorValue::Text(value.to_string())
    }

    /// Resolves to a concrete color. `"random"` draws from `rng`.
    pub fn to_rgb(&self, rng: &mut Rng) -> Option<Rgb> {
        match self {
            ColorValue::Text(text) if text.trim().eq_ignore_ascii_case("random") => {
                Some(random_rgb(rng, 0))
            }
            ColorValue::Text(text) => string_to_rgb(text),
            ColorValue::Rgb(rgb) => Some(*rgb),
            ColorValue::Hsl(hsl) => Some(hsl_to_rgb(*hsl)),
            ColorValue::Structured { rgb: Some(rgb), .. } => Some(*rgb),
            ColorValue::Structured { hsl: Some(hsl), .. } => Some(hsl_to_rgb(*hsl)),
            ColorValue::Structured { .. } => None,
        }
    }
}

/// Picks one entry (at random when several are configured) and resolves it.
pub fn color_to_rgb(value: &SingleOrMultiple<ColorValue>, rng: &mut Rng) -> Option<Rgb> {
    value.pick(rng)?.to_rgb(rng)
}

pub fn string_to_rgba(input: &str) -> Option<Rgba> {
    let text = input.trim().to_ascii_lowercase();
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = function_args(&text, "rgba").or_else(|| function_args(&text, "rgb")) {
        return parse_rgb_args(&args);
    }
    if let Some(args) = function_args(&text, "hsla").or_else(|| function_args(&text, "hsl")) {
        return parse_hsl_args(&args).map(hsla_to_rgba);
    }
    None
}

pub fn string_to_rgb(input: &str) -> Option<Rgb> {
    string_to_rgba(input).map(|rgba| rgba.rgb())
}

pub fn string_to_alpha(input: &str) -> Option<f32> {
    string_to_rgba(input).map(|rgba| rgba.a)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i * 2..i * 2 + 2], 16).ok();
    let a = if expanded.len() == 8 { channel(3)? as f32 / 255.0 } else { 1.0 };
    Some(Rgba { r: channel(0)?, g: channel(1)?, b: channel(2)?, a })
}

fn function_args(text: &str, name: &str) -> Option<Vec<String>> {
    let inner = text.strip_prefix(name)?.trim_start().strip_prefix('(')?.strip_suffix(')')?;
    Some(
        inner
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn parse_number(part: &str) -> Option<f32> {
    let value: f32 = part.trim_end_matches('%').parse().ok()?;
    value.is_finite().then_some(value)
}

fn parse_alpha(part: Option<&String>) -> Option<f32> {
    match part {
        None => Some(1.0),
        Some(p) if p.ends_with('%') => parse_number(p).map(|v| (v / 100.0).clamp(0.0, 1.0)),
        Some(p) => parse_number(p).map(|v| v.clamp(0.0, 1.0)),
    }
}

fn parse_rgb_args(args: &[String]) -> Option<Rgba> {
    if args.len() < 3 || args.len() > 4 {
        return None;
    }
    let channel = |i: usize| parse_number(&args[i]).map(|v| v.round().clamp(0.0, 255.0) as u8);
    Some(Rgba { r: channel(0)?, g: channel(1)?, b: channel(2)?, a: parse_alpha(args.get(3))? })
}

fn parse_hsl_args(args: &[String]) -> Option<Hsla> {
    if args.len() < 3 || args.len() > 4 {
        return None;
    }
    Some(Hsla {
        h: parse_number(&args[0])?,
        s: parse_number(&args[1])?,
        l: parse_number(&args[2])?,
        a: parse_alpha(args.get(3))?,
    })
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0) / 360.0;
    let s = (hsl.s / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        let gray = to_channel(l);
        return Rgb { r: gray, g: gray, b: gray };
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb {
        r: to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
        g: to_channel(hue_to_channel(p, q, h)),
        b: to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
    }
}

pub fn hsla_to_rgba(hsla: Hsla) -> Rgba {
    let rgb = hsl_to_rgb(Hsl { h: hsla.h, s: hsla.s, l: hsla.l });
    Rgba { r: rgb.r, g: rgb.g, b: rgb.b, a: hsla.a }
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f32 / 255.0;
    let g = rgb.g as f32 / 255.0;
    let b = rgb.b as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl { h: h * 60.0, s: s * 100.0, l: l * 100.0 }
}

pub fn hsl_to_hsv(hsl: Hsl) -> Hsv {
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;
    let v = l + s * l.min(1.0 - l);
    let sv = if v == 0.0 { 0.0 } else { 2.0 * (1.0 - l / v) };
    Hsv { h: hsl.h, s: sv * 100.0, v: v * 100.0 }
}

pub fn hsv_to_hsl(hsv: Hsv) -> Hsl {
    let s = hsv.s / 100.0;
    let v = hsv.v / 100.0;
    let l = v * (1.0 - s / 2.0);
    let sl = if l == 0.0 || l == 1.0 { 0.0 } else { (v - l) / l.min(1.0 - l) };
    Hsl { h: hsv.h, s: sl * 100.0, l: l * 100.0 }
}

pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    hsl_to_rgb(hsv_to_hsl(hsv))
}

pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    hsl_to_hsv(rgb_to_hsl(rgb))
}

/// Random color with every channel in `[min, 256)`.
pub fn random_rgb(rng: &mut Rng, min: u8) -> Rgb {
    let mut channel = || rng.range(min as f32, 256.0).floor().clamp(min as f32, 255.0) as u8;
    Rgb { r: channel(), g: channel(), b: channel() }
}

pub fn style_from_rgb(rgb: Rgb, opacity: Option<f32>) -> String {
    format!("rgba({}, {}, {}, {})", rgb.r, rgb.g, rgb.b, opacity.unwrap_or(1.0))
}

pub fn style_from_hsl(hsl: Hsl, opacity: Option<f32>) -> String {
    format!("hsla({}, {}%, {}%, {})", hsl.h, hsl.s, hsl.l, opacity.unwrap_or(1.0))
}
