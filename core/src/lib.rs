#![no_std]

extern crate alloc;

pub use cellboard_protocol::{
    self as protocol, Addressed, BoardId, ClickDetail, Color, Command, Content, Matrix, ParseError,
    ReadyDetail,
};

pub use board::*;
pub use bus::*;
pub use config::*;
pub use error::*;
pub use geometry::*;
pub use mapper::*;
pub use render::*;
pub use store::*;
pub use surface::*;
pub use types::*;
pub use undo::*;

mod board;
mod bus;
mod config;
mod error;
mod geometry;
mod mapper;
mod render;
mod store;
mod surface;
mod types;
mod undo;
