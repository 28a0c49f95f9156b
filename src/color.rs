//! Color model for terminal rendering.
//!
//! Supports 4-bit ANSI colors, 8-bit colors, and 24-bit true color, with
//! automatic downgrading to match what the terminal can display. Style
//! rules carry colors as strings (`"#ff00ff"`, `"212"`, `"red"`); this
//! module parses them and turns them into SGR code fragments.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex};

use lru::LruCache;
use regex::Regex;

/// RGB color triplet with values 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorTriplet {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorTriplet {
    /// Create a new color triplet from RGB components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns CSS-style hex format `#rrggbb`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Returns normalized RGB as floats in range 0.0-1.0.
    #[must_use]
    pub fn normalized(&self) -> (f64, f64, f64) {
        (
            f64::from(self.red) / 255.0,
            f64::from(self.green) / 255.0,
            f64::from(self.blue) / 255.0,
        )
    }

    /// Convert RGB to HLS (Hue, Lightness, Saturation).
    #[must_use]
    pub fn to_hls(&self) -> (f64, f64, f64) {
        let (r, g, b) = self.normalized();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = f64::midpoint(max, min);

        if (max - min).abs() < f64::EPSILON {
            return (0.0, lightness, 0.0);
        }

        let delta = max - min;
        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let hue = if (max - r).abs() < f64::EPSILON {
            (g - b) / delta + (if g < b { 6.0 } else { 0.0 })
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        (hue / 6.0, lightness, saturation)
    }
}

impl From<(u8, u8, u8)> for ColorTriplet {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl fmt::Display for ColorTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// Terminal color system capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ColorSystem {
    /// 4-bit ANSI colors (16 colors).
    #[default]
    Standard = 1,
    /// 8-bit colors (256 colors).
    EightBit = 2,
    /// 24-bit RGB colors (16 million colors).
    TrueColor = 3,
}

impl ColorSystem {
    /// Get the name of this color system.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::EightBit => "256",
            Self::TrueColor => "truecolor",
        }
    }
}

/// Type of color stored in a [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ColorType {
    /// Default terminal color (no RGB/number).
    #[default]
    Default = 0,
    /// 4-bit ANSI standard color (0-15).
    Standard = 1,
    /// 8-bit color (0-255).
    EightBit = 2,
    /// 24-bit RGB color.
    TrueColor = 3,
}

/// A terminal color that can be parsed from various formats.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    /// Name of the color (input that was parsed).
    pub name: String,
    /// Type of color.
    pub color_type: ColorType,
    /// Color number (for Standard and `EightBit`).
    pub number: Option<u8>,
    /// RGB components (for `TrueColor`).
    pub triplet: Option<ColorTriplet>,
}

impl Default for Color {
    fn default() -> Self {
        Self::default_color()
    }
}

impl Color {
    /// Create a new default color (no color applied).
    #[must_use]
    pub fn default_color() -> Self {
        Self {
            name: "default".to_string(),
            color_type: ColorType::Default,
            number: None,
            triplet: None,
        }
    }

    /// Create a color from an 8-bit ANSI number.
    #[must_use]
    pub fn from_ansi(number: u8) -> Self {
        let color_type = if number < 16 {
            ColorType::Standard
        } else {
            ColorType::EightBit
        };
        Self {
            name: format!("color({number})"),
            color_type,
            number: Some(number),
            triplet: None,
        }
    }

    /// Create a color from an RGB triplet as `TrueColor`.
    #[must_use]
    pub fn from_triplet(triplet: ColorTriplet) -> Self {
        Self {
            name: triplet.hex(),
            color_type: ColorType::TrueColor,
            number: None,
            triplet: Some(triplet),
        }
    }

    /// Create a color from RGB components.
    #[must_use]
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_triplet(ColorTriplet::new(red, green, blue))
    }

    /// Returns true if this is the default color.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self.color_type, ColorType::Default)
    }

    /// Get the RGB triplet for this color.
    #[must_use]
    pub fn get_truecolor(&self) -> ColorTriplet {
        match self.color_type {
            ColorType::Default => ColorTriplet::default(),
            ColorType::TrueColor => self.triplet.unwrap_or_default(),
            ColorType::Standard => self
                .number
                .and_then(|n| STANDARD_PALETTE.get(n as usize))
                .copied()
                .unwrap_or_default(),
            ColorType::EightBit => self
                .number
                .and_then(|n| EIGHT_BIT_PALETTE.get(n as usize))
                .copied()
                .unwrap_or_default(),
        }
    }

    /// Get ANSI escape codes for this color.
    #[must_use]
    pub fn get_ansi_codes(&self, foreground: bool) -> Vec<String> {
        match self.color_type {
            ColorType::Default => {
                vec![if foreground { "39" } else { "49" }.to_string()]
            }
            ColorType::Standard => {
                let number = self.number.unwrap_or(0);
                let code = if number < 8 {
                    if foreground { 30 + number } else { 40 + number }
                } else if foreground {
                    82 + number
                } else {
                    92 + number
                };
                vec![code.to_string()]
            }
            ColorType::EightBit => {
                let number = self.number.unwrap_or(0);
                vec![
                    if foreground { "38" } else { "48" }.to_string(),
                    "5".to_string(),
                    number.to_string(),
                ]
            }
            ColorType::TrueColor => {
                let triplet = self.triplet.unwrap_or_default();
                vec![
                    if foreground { "38" } else { "48" }.to_string(),
                    "2".to_string(),
                    triplet.red.to_string(),
                    triplet.green.to_string(),
                    triplet.blue.to_string(),
                ]
            }
        }
    }

    /// Downgrade color to a lower-capability color system.
    #[must_use]
    pub fn downgrade(&self, system: ColorSystem) -> Self {
        if self.is_default() {
            return self.clone();
        }

        match (self.color_type, system) {
            (ColorType::TrueColor, ColorSystem::EightBit) => {
                let triplet = self.triplet.unwrap_or_default();
                Self::from_ansi(rgb_to_eight_bit(triplet))
            }
            (ColorType::TrueColor | ColorType::EightBit, ColorSystem::Standard) => {
                Self::from_ansi(rgb_to_standard(self.get_truecolor()))
            }
            // Already at or below the target system.
            _ => self.clone(),
        }
    }

    /// Parse a color string (cached).
    ///
    /// Supported formats:
    /// - Named colors: `red`, `bright_blue`
    /// - Hex format: `#FF0000` or `#F00`
    /// - Color number: `color(196)` or bare `196`
    /// - RGB format: `rgb(255,0,0)`
    /// - Default: `default`
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] if the color string is empty, malformed,
    /// or names an unknown color.
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        static CACHE: LazyLock<Mutex<LruCache<String, Color>>> =
            LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

        let normalized = color.trim().to_lowercase();

        if let Ok(mut cache) = CACHE.lock()
            && let Some(cached) = cache.get(&normalized)
        {
            return Ok(cached.clone());
        }

        let result = Self::parse_uncached(&normalized)?;

        if let Ok(mut cache) = CACHE.lock() {
            cache.put(normalized, result.clone());
        }

        Ok(result)
    }

    fn parse_uncached(color: &str) -> Result<Self, ColorParseError> {
        static COLOR_NUM_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^color\((\d{1,3})\)$").expect("valid regex"));
        static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
                .expect("valid regex")
        });

        if color.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if color == "default" {
            return Ok(Self::default_color());
        }

        // Hex format: #RRGGBB or #RGB shorthand.
        if let Some(hex) = color.strip_prefix('#') {
            if hex.len() == 6
                && let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                )
            {
                return Ok(Self::from_rgb(r, g, b));
            }
            if hex.len() == 3 {
                let chars: Vec<char> = hex.chars().collect();
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&format!("{}{}", chars[0], chars[0]), 16),
                    u8::from_str_radix(&format!("{}{}", chars[1], chars[1]), 16),
                    u8::from_str_radix(&format!("{}{}", chars[2], chars[2]), 16),
                ) {
                    return Ok(Self::from_rgb(r, g, b));
                }
            }
            return Err(ColorParseError::InvalidHex(color.to_string()));
        }

        // Bare ANSI number, the form the built-in style sheets use.
        if color.bytes().all(|b| b.is_ascii_digit()) {
            return match color.parse::<u16>() {
                Ok(num) if num <= 255 => {
                    #[expect(clippy::cast_possible_truncation, reason = "verified num <= 255")]
                    Ok(Self::from_ansi(num as u8))
                }
                _ => Err(ColorParseError::InvalidColorNumber(color.to_string())),
            };
        }

        // color(N) format.
        if let Some(caps) = COLOR_NUM_RE.captures(color) {
            return match caps[1].parse::<u16>() {
                Ok(num) if num <= 255 => {
                    #[expect(clippy::cast_possible_truncation, reason = "verified num <= 255")]
                    Ok(Self::from_ansi(num as u8))
                }
                _ => Err(ColorParseError::InvalidColorNumber(color.to_string())),
            };
        }

        // rgb(R,G,B) format.
        if let Some(caps) = RGB_RE.captures(color) {
            if let (Ok(r), Ok(g), Ok(b)) = (
                caps[1].parse::<u16>(),
                caps[2].parse::<u16>(),
                caps[3].parse::<u16>(),
            ) && r <= 255
                && g <= 255
                && b <= 255
            {
                #[expect(clippy::cast_possible_truncation, reason = "verified values <= 255")]
                return Ok(Self::from_rgb(r as u8, g as u8, b as u8));
            }
            return Err(ColorParseError::InvalidRgb(color.to_string()));
        }

        if let Some(&number) = NAMED_COLORS.get(color) {
            return Ok(Self::from_ansi(number));
        }

        Err(ColorParseError::UnknownColor(color.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ColorTriplet> for Color {
    fn from(triplet: ColorTriplet) -> Self {
        Self::from_triplet(triplet)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::from_rgb(red, green, blue)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    InvalidColorNumber(String),
    InvalidRgb(String),
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::InvalidColorNumber(s) => write!(f, "Invalid color number: {s}"),
            Self::InvalidRgb(s) => write!(f, "Invalid RGB color: {s}"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

// ============================================================================
// Color Palettes
// ============================================================================

/// Standard 16-color ANSI palette.
pub static STANDARD_PALETTE: [ColorTriplet; 16] = [
    ColorTriplet::new(0, 0, 0),       // 0: Black
    ColorTriplet::new(170, 0, 0),     // 1: Red
    ColorTriplet::new(0, 170, 0),     // 2: Green
    ColorTriplet::new(170, 85, 0),    // 3: Yellow
    ColorTriplet::new(0, 0, 170),     // 4: Blue
    ColorTriplet::new(170, 0, 170),   // 5: Magenta
    ColorTriplet::new(0, 170, 170),   // 6: Cyan
    ColorTriplet::new(170, 170, 170), // 7: White
    ColorTriplet::new(85, 85, 85),    // 8: Bright Black
    ColorTriplet::new(255, 85, 85),   // 9: Bright Red
    ColorTriplet::new(85, 255, 85),   // 10: Bright Green
    ColorTriplet::new(255, 255, 85),  // 11: Bright Yellow
    ColorTriplet::new(85, 85, 255),   // 12: Bright Blue
    ColorTriplet::new(255, 85, 255),  // 13: Bright Magenta
    ColorTriplet::new(85, 255, 255),  // 14: Bright Cyan
    ColorTriplet::new(255, 255, 255), // 15: Bright White
];

/// Generate the 256-color palette.
fn generate_eight_bit_palette() -> [ColorTriplet; 256] {
    let mut palette = [ColorTriplet::default(); 256];

    for (i, &color) in STANDARD_PALETTE.iter().enumerate() {
        palette[i] = color;
    }

    // 16-231: 6x6x6 color cube
    let levels = [0u8, 95, 135, 175, 215, 255];
    for r in 0..6 {
        for g in 0..6 {
            for b in 0..6 {
                let index = 16 + r * 36 + g * 6 + b;
                palette[index] = ColorTriplet::new(levels[r], levels[g], levels[b]);
            }
        }
    }

    // 232-255: Grayscale ramp
    for i in 0..24 {
        #[expect(clippy::cast_possible_truncation, reason = "max value is 8+23*10=238")]
        let gray = (8 + i * 10) as u8;
        palette[232 + i] = ColorTriplet::new(gray, gray, gray);
    }

    palette
}

/// 256-color palette (lazy initialized).
pub static EIGHT_BIT_PALETTE: LazyLock<[ColorTriplet; 256]> =
    LazyLock::new(generate_eight_bit_palette);

// ============================================================================
// Color Conversion
// ============================================================================

/// Convert RGB to the nearest 8-bit color number.
#[must_use]
pub fn rgb_to_eight_bit(triplet: ColorTriplet) -> u8 {
    let (_, lightness, saturation) = triplet.to_hls();

    // Grayscale maps onto the 232-255 ramp.
    if saturation < 0.15 {
        if lightness < 0.04 {
            return 16;
        }
        if lightness > 0.96 {
            return 231;
        }
        #[expect(clippy::cast_possible_truncation, reason = "result is 0-24 range")]
        #[expect(clippy::cast_sign_loss, reason = "lightness is positive")]
        let gray_index = ((lightness - 0.04) / 0.92 * 24.0).round() as u8;
        return 232 + gray_index.min(23);
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "values are in 0-5 range"
    )]
    let quantize = |v: u8| -> usize {
        if v < 95 {
            (f64::from(v) / 95.0).round() as usize
        } else {
            1 + ((f64::from(v) - 95.0) / 40.0).round() as usize
        }
        .min(5)
    };

    let r_idx = quantize(triplet.red);
    let g_idx = quantize(triplet.green);
    let b_idx = quantize(triplet.blue);

    #[expect(clippy::cast_possible_truncation, reason = "result is in 16-231 range")]
    let color_index = (16 + r_idx * 36 + g_idx * 6 + b_idx) as u8;
    color_index
}

/// Convert RGB to the nearest standard 16-color number.
#[must_use]
pub fn rgb_to_standard(triplet: ColorTriplet) -> u8 {
    let mut best_index = 0u8;
    let mut best_distance = u32::MAX;

    for (i, &palette_color) in STANDARD_PALETTE.iter().enumerate() {
        let distance = color_distance(triplet, palette_color);
        if distance < best_distance {
            best_distance = distance;
            #[expect(clippy::cast_possible_truncation, reason = "palette has 16 entries")]
            {
                best_index = i as u8;
            }
        }
    }

    best_index
}

/// Weighted color distance (CIE76-like).
fn color_distance(c1: ColorTriplet, c2: ColorTriplet) -> u32 {
    let r1 = u32::from(c1.red);
    let g1 = u32::from(c1.green);
    let b1 = u32::from(c1.blue);
    let r2 = u32::from(c2.red);
    let g2 = u32::from(c2.green);
    let b2 = u32::from(c2.blue);

    let red_mean = u32::midpoint(r1, r2);
    let red_diff = r1.abs_diff(r2);
    let green_diff = g1.abs_diff(g2);
    let blue_diff = b1.abs_diff(b2);

    let red_weight = ((512 + red_mean) * red_diff * red_diff) >> 8;
    let green_weight = 4 * green_diff * green_diff;
    let blue_weight = ((767 - red_mean) * blue_diff * blue_diff) >> 8;

    red_weight + green_weight + blue_weight
}

/// Map of named colors to their ANSI numbers.
static NAMED_COLORS: LazyLock<HashMap<&'static str, u8>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("black", 0);
    m.insert("red", 1);
    m.insert("green", 2);
    m.insert("yellow", 3);
    m.insert("blue", 4);
    m.insert("magenta", 5);
    m.insert("cyan", 6);
    m.insert("white", 7);
    m.insert("bright_black", 8);
    m.insert("bright_red", 9);
    m.insert("bright_green", 10);
    m.insert("bright_yellow", 11);
    m.insert("bright_blue", 12);
    m.insert("bright_magenta", 13);
    m.insert("bright_cyan", 14);
    m.insert("bright_white", 15);
    m.insert("grey", 8);
    m.insert("gray", 8);
    m
});
