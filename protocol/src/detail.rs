use serde::{Deserialize, Serialize};

use crate::*;

/// Published by a board once it has drawn itself and listens for commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyDetail {
    pub id: BoardId,
    pub component_name: String,
}

impl ReadyDetail {
    pub const COMPONENT_NAME: &'static str = "BOARD-CELL";

    pub fn new(id: BoardId) -> Self {
        Self {
            id,
            component_name: Self::COMPONENT_NAME.to_string(),
        }
    }
}

/// Snapshot of a clicked cell, taken at the moment of the click.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickDetail {
    pub id: BoardId,
    /// Pointer offset from the surface origin, in pixels.
    pub mousex: i32,
    pub mousey: i32,
    pub cellx: Coord,
    pub celly: Coord,
    pub content: Content,
    pub color: Color,
    pub bgcolor: Color,
}

impl ClickDetail {
    pub const fn cell(&self) -> (Coord, Coord) {
        (self.cellx, self.celly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_detail_uses_component_name_key() {
        let json = serde_json::to_value(ReadyDetail::new("3en3enraya".into())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "3en3enraya", "componentName": "BOARD-CELL"})
        );
    }

    #[test]
    fn click_detail_keeps_flat_field_names() {
        let detail = ClickDetail {
            id: "boardEnemy".into(),
            mousex: 120,
            mousey: 75,
            cellx: 2,
            celly: 1,
            content: Content::parse("img/water.png"),
            color: Color::WHITE,
            bgcolor: Color::rgb(0x22, 0x99, 0xFF),
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["cellx"], 2);
        assert_eq!(json["content"], "img/water.png");
        assert_eq!(json["bgcolor"], "#2299FF");
        assert_eq!(detail.cell(), (2, 1));
    }
}
