use core::fmt;
use serde::{Deserialize, Serialize};

use crate::Color;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "svg"];

/// What a cell paints: nothing, a flat color, an image or literal text.
///
/// Content is carried as a plain string on the wire and classified on parse, so `"#FF0000"` is a color,
/// `"img/flag.png"` is an image and `"7"` is text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Content {
    #[default]
    Empty,
    Color(Color),
    Image(String),
    Text(String),
}

impl Content {
    pub fn parse(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else if let Some(color) = Color::parse_hex(value) {
            Self::Color(color)
        } else if is_image_ref(value) {
            Self::Image(value.to_string())
        } else {
            Self::Text(value.to_string())
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

fn is_image_ref(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    let is_url = ["http://", "https://"].iter().any(|scheme| {
        lower
            .strip_prefix(scheme)
            .is_some_and(|rest| !rest.is_empty() && !rest.contains([' ', '"']))
    });
    is_url || IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Color(color) => fmt::Display::fmt(color, f),
            Self::Image(src) => f.write_str(src),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Color> for Content {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<Content> for String {
    fn from(content: Content) -> Self {
        content.to_string()
    }
}

impl PartialEq<str> for Content {
    fn eq(&self, other: &str) -> bool {
        *self == Content::parse(other)
    }
}

impl PartialEq<&str> for Content {
    fn eq(&self, other: &&str) -> bool {
        *self == Content::parse(other)
    }
}
