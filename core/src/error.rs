use cellboard_protocol::BoardId;
use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board id is missing")]
    MissingId,
    #[error("Board id \"{0}\" is already in use")]
    DuplicateId(BoardId),
    #[error("Invalid board dimensions {cols}x{rows}")]
    InvalidDimensions { cols: Coord, rows: Coord },
    #[error("Invalid cell size {0}px for a {1}-cell side")]
    InvalidCellSize(u32, Coord),
    #[error("Invalid coordinates ({col}, {row})")]
    InvalidCoords { col: i64, row: i64 },
    #[error("Matrix shape does not match the {cols}x{rows} board")]
    InvalidShape { cols: Coord, rows: Coord },
    #[error("Board has been torn down, no further commands are accepted")]
    TornDown,
}

pub type Result<T> = core::result::Result<T, BoardError>;
