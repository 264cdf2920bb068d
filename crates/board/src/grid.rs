use gg_core::Coord;
use gg_core::SIDE;
use serde::Deserialize;
use serde::Serialize;

/// The 8 standard triples over a 3x3 grid: rows, columns, two diagonals.
const TRIPLES: [[(Coord, Coord); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A single 3x3 layer of optionally-occupied cells.
///
/// Used both for sub-grids (`Grid<Mark>`) and the master grid
/// (`Grid<Claim>`); [`Grid::winner`] is the one predicate shared by
/// both layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T>([[Option<T>; SIDE]; SIDE]);

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self(std::array::from_fn(|_| std::array::from_fn(|_| None)))
    }
}

impl<T> Grid<T>
where
    T: Copy + Eq,
{
    /// Cell contents at (row, col).
    pub fn get(&self, row: Coord, col: Coord) -> Option<T> {
        self.0[row][col]
    }
    /// Overwrite the cell at (row, col).
    pub fn set(&mut self, row: Coord, col: Coord, value: Option<T>) {
        self.0[row][col] = value;
    }
    /// True when no cell remains empty.
    pub fn is_full(&self) -> bool {
        self.0.iter().flatten().all(Option::is_some)
    }
    /// All cells in row-major order with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Coord, Option<T>)> + '_ {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| (r, c, *cell)))
    }
    /// View this grid through a cell projection, e.g. the master grid
    /// as a `Grid<Mark>` via [`crate::Claim::mark`].
    pub fn project<U, F>(&self, f: F) -> Grid<U>
    where
        U: Copy + Eq,
        F: Fn(T) -> Option<U>,
    {
        let mut grid = Grid::default();
        for (row, col, cell) in self.cells() {
            grid.set(row, col, cell.and_then(&f));
        }
        grid
    }
    /// Scan the 8 standard triples and return the common occupant if
    /// any triple is uniformly occupied.
    pub fn winner(&self) -> Option<T> {
        TRIPLES.iter().find_map(|triple| {
            let [a, b, c] = triple.map(|(row, col)| self.get(row, col));
            match (a, b, c) {
                (Some(x), Some(y), Some(z)) if x == y && y == z => Some(x),
                _ => None,
            }
        })
    }
}
