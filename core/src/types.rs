/// Single coordinate axis, `(row, col)` components and the board dimension.
///
/// Signed so that callers can hand in positions computed from offsets (`row - 1`) and get
/// [`GameError::OutOfBounds`](crate::GameError::OutOfBounds) back instead of wrapping.
pub type Coord = i16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Largest supported board dimension, keeps `dimension²` inside [`CellCount`].
pub const MAX_DIMENSION: Coord = 255;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        debug_assert!(self.0 >= 0 && self.1 >= 0, "negative coords {self:?}");
        [self.0 as usize, self.1 as usize]
    }
}

pub const fn square(dimension: Coord) -> CellCount {
    let a = dimension as CellCount;
    a.saturating_mul(a)
}

/// Whether `coords` lies inside a `dimension × dimension` grid.
pub const fn in_bounds(coords: Coord2, dimension: Coord) -> bool {
    coords.0 >= 0 && coords.0 < dimension && coords.1 >= 0 && coords.1 < dimension
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (Coord, Coord), dimension: Coord) -> Option<Coord2> {
    let next = (coords.0.checked_add(delta.0)?, coords.1.checked_add(delta.1)?);
    in_bounds(next, dimension).then_some(next)
}

/// Moore neighborhood of a cell, clipped at the grid edges.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    dimension: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, dimension: Coord) -> Self {
        Self {
            center,
            dimension,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(
                self.center,
                DISPLACEMENTS[self.index as usize],
                self.dimension,
            );
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
