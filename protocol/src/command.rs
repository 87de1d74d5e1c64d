use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::*;

/// Row-major matrix as sent on the wire, `matrix[row][col]`.
pub type Matrix<T> = Vec<Vec<T>>;

/// Commands game logic broadcasts to boards.
///
/// Cell indices are zero-based, `cellx`/`x` is the column and `celly`/`y` the row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Command {
    /// Set one cell through the undo policy and redraw it.
    ChangeCellContent {
        cellx: Coord,
        celly: Coord,
        #[serde(default)]
        content: Content,
        #[serde(default)]
        color: Option<Color>,
        #[serde(default)]
        bgcolor: Option<Color>,
    },
    /// Replace every cell and redraw the whole board.
    ChangeAllCellsContent {
        content: Matrix<Content>,
        #[serde(default)]
        color: Option<Matrix<Color>>,
        #[serde(default)]
        bgcolor: Option<Matrix<Color>>,
    },
    /// Store content without undo handling or redraw.
    SetCellData {
        x: Coord,
        y: Coord,
        #[serde(default)]
        content: Content,
    },
    /// Store a full content matrix without redraw.
    SetAllCellData { content: Matrix<Content> },
    ClearCell { cellx: Coord, celly: Coord },
    ClearRow { row: Coord },
    ClearCol { col: Coord },
    ClearAll,
    ContentRefresh,
    EnableClick,
    DisableClick,
    /// Allow or suppress click notifications for one cell.
    SetCellEvent {
        cellx: Coord,
        celly: Coord,
        enabled: bool,
    },
}

impl Command {
    pub const NAMES: [&'static str; 12] = [
        "change-cell-content",
        "change-all-cells-content",
        "set-cell-data",
        "set-all-cell-data",
        "clear-cell",
        "clear-row",
        "clear-col",
        "clear-all",
        "content-refresh",
        "enable-click",
        "disable-click",
        "set-cell-event",
    ];

    /// Other event names for existing commands, as `(alias, name)`.
    pub const ALIASES: [(&'static str, &'static str); 4] = [
        ("change-cells-content", "change-all-cells-content"),
        ("clear-all-content", "clear-all"),
        ("enable-board-click", "enable-click"),
        ("disable-board-click", "disable-click"),
    ];

    /// Resolves a command name or one of its aliases.
    pub fn canonical_name(name: &str) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .copied()
            .find(|&known| known == name)
            .or_else(|| {
                Self::ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == name)
                    .map(|&(_, known)| known)
            })
    }

    /// Every name a command can arrive under, aliases included.
    pub fn event_names() -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .chain(Self::ALIASES.into_iter().map(|(alias, _)| alias))
    }

    pub const fn name(&self) -> &'static str {
        use Command::*;
        match self {
            ChangeCellContent { .. } => Self::NAMES[0],
            ChangeAllCellsContent { .. } => Self::NAMES[1],
            SetCellData { .. } => Self::NAMES[2],
            SetAllCellData { .. } => Self::NAMES[3],
            ClearCell { .. } => Self::NAMES[4],
            ClearRow { .. } => Self::NAMES[5],
            ClearCol { .. } => Self::NAMES[6],
            ClearAll => Self::NAMES[7],
            ContentRefresh => Self::NAMES[8],
            EnableClick => Self::NAMES[9],
            DisableClick => Self::NAMES[10],
            SetCellEvent { .. } => Self::NAMES[11],
        }
    }
}

/// A payload tagged with the board it is meant for.
///
/// Every board sees every message and keeps only those whose `id` matches its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Addressed<T> {
    pub id: BoardId,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Addressed<T> {
    pub fn new(id: impl Into<BoardId>, payload: T) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }

    pub fn is_for(&self, id: &BoardId) -> bool {
        self.id == *id
    }
}

impl Addressed<Command> {
    /// Builds a command from an event name and its JSON detail object, e.g. `"clear-row"` and
    /// `{"id": "board", "row": 3}`. Aliases such as `"clear-all-content"` are accepted.
    pub fn from_event(name: &str, detail: &str) -> Result<Self> {
        let Some(name) = Command::canonical_name(name) else {
            return Err(ParseError::UnknownCommand(name.to_string()));
        };

        let mut value: Value = serde_json::from_str(detail)?;
        let Some(object) = value.as_object_mut() else {
            return Err(ParseError::Malformed("detail must be an object".to_string()));
        };
        object.insert("type".to_string(), Value::String(name.to_string()));

        Ok(serde_json::from_value(value)?)
    }
}
