pub use cellboard_protocol::Coord;

/// Cell position `(col, row)`, also used for board size `(cols, rows)`.
pub type Coord2 = (Coord, Coord);

/// Pointer offset from the surface origin, in pixels.
pub type Px = i32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}
