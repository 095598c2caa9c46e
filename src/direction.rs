/// A cell coordinate on the grid. `y` grows downward (row index).
///
/// Positions are signed so the cursor can step past any edge; the grid
/// answers `None` for such cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step along `dir`.
    #[inline(always)]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// One of the four unit compass vectors the cursor can travel along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// (1, 0)
    East,
    /// (-1, 0)
    West,
    /// (0, -1)
    North,
    /// (0, 1)
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    /// The (dx, dy) unit vector.
    #[inline(always)]
    pub fn vector(self) -> (i64, i64) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
        }
    }

    /// Inverse of [`Direction::vector`]. Returns `None` unless exactly one
    /// component is nonzero with magnitude 1.
    pub fn from_vector(dx: i64, dy: i64) -> Option<Self> {
        match (dx, dy) {
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            _ => None,
        }
    }

    /// `/` mirror: (dx, dy) -> (-dy, -dx).
    pub fn reflect_slash(self) -> Self {
        match self {
            Direction::East => Direction::North,
            Direction::West => Direction::South,
            Direction::North => Direction::East,
            Direction::South => Direction::West,
        }
    }

    /// `\` mirror: (dx, dy) -> (dy, dx).
    pub fn reflect_backslash(self) -> Self {
        match self {
            Direction::East => Direction::South,
            Direction::West => Direction::North,
            Direction::North => Direction::West,
            Direction::South => Direction::East,
        }
    }

    /// Negate dx. Vertical travel is unaffected.
    pub fn flip_horizontal(self) -> Self {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            vertical => vertical,
        }
    }

    /// Negate dy. Horizontal travel is unaffected.
    pub fn flip_vertical(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            horizontal => horizontal,
        }
    }

    /// (dx, dy) -> (-dx, -dy).
    pub fn reverse(self) -> Self {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }

    /// Quarter turn counter-clockwise on screen: (dx, dy) -> (dy, -dx).
    pub fn rotate_left(self) -> Self {
        match self {
            Direction::East => Direction::North,
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
        }
    }

    /// Quarter turn clockwise on screen: (dx, dy) -> (-dy, dx).
    pub fn rotate_right(self) -> Self {
        match self {
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            Direction::North => Direction::East,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_roundtrip() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.vector();
            assert_eq!(Direction::from_vector(dx, dy), Some(dir));
        }
        assert_eq!(Direction::from_vector(0, 0), None);
        assert_eq!(Direction::from_vector(1, 1), None);
        assert_eq!(Direction::from_vector(2, 0), None);
    }

    #[test]
    fn test_slash_table() {
        assert_eq!(Direction::East.reflect_slash(), Direction::North);
        assert_eq!(Direction::West.reflect_slash(), Direction::South);
        assert_eq!(Direction::South.reflect_slash(), Direction::West);
        assert_eq!(Direction::North.reflect_slash(), Direction::East);
    }

    #[test]
    fn test_backslash_table() {
        assert_eq!(Direction::East.reflect_backslash(), Direction::South);
        assert_eq!(Direction::West.reflect_backslash(), Direction::North);
        assert_eq!(Direction::South.reflect_backslash(), Direction::East);
        assert_eq!(Direction::North.reflect_backslash(), Direction::West);
    }

    #[test]
    fn test_transforms_match_vector_formulas() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.vector();
            let v = |d: Direction| d.vector();
            assert_eq!(v(dir.reflect_slash()), (-dy, -dx));
            assert_eq!(v(dir.reflect_backslash()), (dy, dx));
            assert_eq!(v(dir.flip_horizontal()), (-dx, dy));
            assert_eq!(v(dir.flip_vertical()), (dx, -dy));
            assert_eq!(v(dir.reverse()), (-dx, -dy));
            assert_eq!(v(dir.rotate_left()), (dy, -dx));
            assert_eq!(v(dir.rotate_right()), (-dy, dx));
        }
    }

    #[test]
    fn test_rotations_are_inverse() {
        for dir in Direction::ALL {
            assert_eq!(dir.rotate_left().rotate_right(), dir);
            assert_eq!(dir.rotate_right().rotate_left(), dir);
            let four = dir.rotate_left().rotate_left().rotate_left().rotate_left();
            assert_eq!(four, dir);
            assert_eq!(dir.reverse().reverse(), dir);
        }
    }

    #[test]
    fn test_mirrors_are_involutions() {
        for dir in Direction::ALL {
            assert_eq!(dir.reflect_slash().reflect_slash(), dir);
            assert_eq!(dir.reflect_backslash().reflect_backslash(), dir);
            assert_eq!(dir.flip_horizontal().flip_horizontal(), dir);
            assert_eq!(dir.flip_vertical().flip_vertical(), dir);
        }
    }

    #[test]
    fn test_position_step() {
        let p = Position::new(3, 4);
        assert_eq!(p.step(Direction::East), Position::new(4, 4));
        assert_eq!(p.step(Direction::West), Position::new(2, 4));
        assert_eq!(p.step(Direction::North), Position::new(3, 3));
        assert_eq!(p.step(Direction::South), Position::new(3, 5));
        assert_eq!(Position::new(0, 0).step(Direction::West), Position::new(-1, 0));
    }
}
