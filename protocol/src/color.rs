use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// An sRGB color with straight alpha.
///
/// On the wire a color is `#RRGGBB`, `transparent` or a basic CSS color keyword. Translucent colors made by
/// the board itself display as a CSS `rgba(...)` string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    pub const LIGHT_GRAY: Self = Self::rgb(0xCC, 0xCC, 0xCC);
    pub const TRANSPARENT: Self = Self::rgba(0x00, 0x00, 0x00, 0x00);

    const NAMED: [(&'static str, Self); 18] = [
        ("transparent", Self::TRANSPARENT),
        ("black", Self::BLACK),
        ("silver", Self::rgb(0xC0, 0xC0, 0xC0)),
        ("gray", Self::rgb(0x80, 0x80, 0x80)),
        ("white", Self::WHITE),
        ("maroon", Self::rgb(0x80, 0x00, 0x00)),
        ("red", Self::rgb(0xFF, 0x00, 0x00)),
        ("purple", Self::rgb(0x80, 0x00, 0x80)),
        ("fuchsia", Self::rgb(0xFF, 0x00, 0xFF)),
        ("green", Self::rgb(0x00, 0x80, 0x00)),
        ("lime", Self::rgb(0x00, 0xFF, 0x00)),
        ("olive", Self::rgb(0x80, 0x80, 0x00)),
        ("yellow", Self::rgb(0xFF, 0xFF, 0x00)),
        ("navy", Self::rgb(0x00, 0x00, 0x80)),
        ("blue", Self::rgb(0x00, 0x00, 0xFF)),
        ("teal", Self::rgb(0x00, 0x80, 0x80)),
        ("aqua", Self::rgb(0x00, 0xFF, 0xFF)),
        ("orange", Self::rgb(0xFF, 0xA5, 0x00)),
    ];

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, u8::MAX)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }

    /// Parses exactly `#RRGGBB`, case-insensitive.
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Looks up `transparent` or a basic CSS color keyword, case-insensitive.
    pub fn named(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name.trim()))
            .map(|&(_, color)| color)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else if self.a == 0 {
            f.write_str("transparent")
        } else {
            let alpha = f64::from(self.a) / 255.0;
            write!(f, "rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, alpha)
        }
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
            .or_else(|| Self::named(s))
            .ok_or_else(|| ParseError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
