//! Wire types shared between boards and the game logic that drives them.

use core::fmt;
use serde::{Deserialize, Serialize};

pub use color::*;
pub use command::*;
pub use content::*;
pub use detail::*;
pub use error::*;

mod color;
mod command;
mod content;
mod detail;
mod error;

/// Single cell index, used for columns, rows and board dimensions.
pub type Coord = u16;

/// Identity of one board. Must be unique among boards sharing a bus.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BoardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BoardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for BoardId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BoardId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
