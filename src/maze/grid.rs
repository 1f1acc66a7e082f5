//! Wall, visited, and distance state for a bounded grid maze.
//!
//! Walls are undirected facts about edges, stored redundantly on both
//! endpoint cells for O(1) lookup from either side. Every mutation keeps the
//! two copies identical, so wall symmetry cannot be violated from outside.

/// Cardinal heading, in the fixed scan order used for all tie-breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Fixed priority order for direction scans: North, East, South, West.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Index into per-cell wall storage.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    #[inline]
    fn from_index(i: usize) -> Direction {
        Self::ALL[i % 4]
    }

    /// Unit offset of one move in this direction.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        Self::from_index(self.index() + 2)
    }

    #[inline]
    pub fn clockwise(self) -> Direction {
        Self::from_index(self.index() + 1)
    }

    #[inline]
    pub fn counter_clockwise(self) -> Direction {
        Self::from_index(self.index() + 3)
    }

    /// Number of clockwise quarter turns from `self` to `target` (0..=3).
    #[inline]
    pub fn turn_steps(self, target: Direction) -> usize {
        (target.index() + 4 - self.index()) % 4
    }
}

/// Grid cell coordinate. Identity is positional.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighboring coordinate one cell over; may be out of bounds.
    #[inline]
    pub fn neighbor(self, dir: Direction) -> CellCoord {
        let (dx, dy) = dir.offset();
        CellCoord::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn manhattan_distance(self, other: CellCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Direction from `self` to an adjacent cell, or `None` if not adjacent.
    pub fn direction_to(self, other: CellCoord) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| self.neighbor(dir) == other)
    }
}

/// Per-cell wall, visited, and distance state for a width x height grid.
#[derive(Clone, Debug)]
pub struct Maze {
    width: usize,
    height: usize,
    /// Wall flags per cell, indexed by `Direction::index()`
    walls: Vec<[bool; 4]>,
    /// Visited flags, monotonic until `reset`
    visited: Vec<bool>,
    /// Flood-fill distance field; `unreachable()` is the sentinel
    distances: Vec<i32>,
}

impl Maze {
    /// Create a maze with boundary walls seeded and everything else open.
    pub fn new(width: usize, height: usize) -> Self {
        let total = width * height;
        let mut maze = Self {
            width,
            height,
            walls: vec![[false; 4]; total],
            visited: vec![false; total],
            distances: vec![total as i32; total],
        };
        maze.seed_boundary_walls();
        maze
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sentinel distance meaning "unreachable": one more than the longest
    /// possible simple path.
    #[inline]
    pub fn unreachable(&self) -> i32 {
        (self.width * self.height) as i32
    }

    #[inline]
    pub fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    #[inline]
    fn idx(&self, cell: CellCoord) -> usize {
        (cell.y as usize) * self.width + (cell.x as usize)
    }

    /// Wall query. Out-of-bounds cells count as walled on every side, so the
    /// grid boundary acts as an implicit wall.
    #[inline]
    pub fn has_wall(&self, cell: CellCoord, dir: Direction) -> bool {
        if !self.in_bounds(cell) {
            return true;
        }
        self.walls[self.idx(cell)][dir.index()]
    }

    /// Record a wall on both endpoints of the edge. No-op out of bounds.
    pub fn set_wall(&mut self, cell: CellCoord, dir: Direction) {
        if !self.in_bounds(cell) {
            return;
        }
        let idx = self.idx(cell);
        self.walls[idx][dir.index()] = true;

        let neighbor = cell.neighbor(dir);
        if self.in_bounds(neighbor) {
            let nidx = self.idx(neighbor);
            self.walls[nidx][dir.opposite().index()] = true;
        }
    }

    /// Record the absence of a wall on both endpoints of the edge. Boundary
    /// edges are permanent walls and are never cleared.
    pub fn clear_wall(&mut self, cell: CellCoord, dir: Direction) {
        if !self.in_bounds(cell) {
            return;
        }
        let neighbor = cell.neighbor(dir);
        if !self.in_bounds(neighbor) {
            return;
        }
        let idx = self.idx(cell);
        self.walls[idx][dir.index()] = false;
        let nidx = self.idx(neighbor);
        self.walls[nidx][dir.opposite().index()] = false;
    }

    /// Open-edge query: no recorded wall and the neighbor is in bounds.
    #[inline]
    pub fn open_neighbor(&self, cell: CellCoord, dir: Direction) -> Option<CellCoord> {
        if self.has_wall(cell, dir) {
            return None;
        }
        let neighbor = cell.neighbor(dir);
        if self.in_bounds(neighbor) {
            Some(neighbor)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_visited(&self, cell: CellCoord) -> bool {
        self.in_bounds(cell) && self.visited[self.idx(cell)]
    }

    pub fn mark_visited(&mut self, cell: CellCoord) {
        if self.in_bounds(cell) {
            let idx = self.idx(cell);
            self.visited[idx] = true;
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }

    /// Fraction of cells marked visited.
    pub fn coverage(&self) -> f32 {
        self.visited_count() as f32 / (self.width * self.height) as f32
    }

    #[inline]
    pub fn distance(&self, cell: CellCoord) -> i32 {
        if !self.in_bounds(cell) {
            return self.unreachable();
        }
        self.distances[self.idx(cell)]
    }

    pub(crate) fn set_distance(&mut self, cell: CellCoord, value: i32) {
        if self.in_bounds(cell) {
            let idx = self.idx(cell);
            self.distances[idx] = value;
        }
    }

    /// Reset every distance to the unreachable sentinel.
    pub(crate) fn reset_distances(&mut self) {
        let sentinel = self.unreachable();
        self.distances.fill(sentinel);
    }

    /// Shift the whole distance field up by `amount`.
    pub(crate) fn shift_distances(&mut self, amount: i32) {
        for d in &mut self.distances {
            *d += amount;
        }
    }

    pub(crate) fn min_distance(&self) -> i32 {
        self.distances.iter().copied().min().unwrap_or(0)
    }

    /// Discard all accumulated knowledge: interior walls, visited flags, and
    /// distances. Boundary walls are re-seeded as permanent.
    pub fn reset(&mut self) {
        self.walls.fill([false; 4]);
        self.visited.fill(false);
        self.reset_distances();
        self.seed_boundary_walls();
    }

    fn seed_boundary_walls(&mut self) {
        for x in 0..self.width as i32 {
            let south = self.idx(CellCoord::new(x, 0));
            let north = self.idx(CellCoord::new(x, self.height as i32 - 1));
            self.walls[south][Direction::South.index()] = true;
            self.walls[north][Direction::North.index()] = true;
        }
        for y in 0..self.height as i32 {
            let west = self.idx(CellCoord::new(0, y));
            let east = self.idx(CellCoord::new(self.width as i32 - 1, y));
            self.walls[west][Direction::West.index()] = true;
            self.walls[east][Direction::East.index()] = true;
        }
    }
}
