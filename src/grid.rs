use crate::direction::Position;

const START: char = 'S';

/// An immutable program surface.
///
/// Rows may be ragged: every row is logically padded with spaces up to
/// `width`, the length of the longest row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Grid {
    /// Build a grid from source text.
    ///
    /// Rows are split on `'\n'` and lose at most one trailing `'\r'`. A
    /// trailing newline therefore yields a final empty row.
    pub fn parse(text: &str) -> Self {
        let rows: Vec<Vec<char>> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).chars().collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Where execution begins: the rightmost `S` of the bottommost row that
    /// contains one, or the origin if there is none.
    pub fn find_start(&self) -> Position {
        self.rows
            .iter()
            .enumerate()
            .rev()
            .find_map(|(y, row)| {
                row.iter()
                    .rposition(|&c| c == START)
                    .map(|x| Position::new(x as i64, y as i64))
            })
            .unwrap_or_default()
    }

    /// The character under `pos`, or `None` when `pos` is off the grid.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<char> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if y >= self.rows.len() || x >= self.width {
            return None;
        }
        Some(self.rows[y].get(x).copied().unwrap_or(' '))
    }
}
