use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CheckersError, Result};
use crate::moves::{Move, MoveKind, Square};
use crate::piece::{Color, Piece, Rank};

/// Up-left, up-right, down-left, down-right.
const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard opening layout: twelve men per side on the dark squares,
    /// dark on rows 0-2 and light on rows 5-7.
    pub fn new() -> Self {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// Put every piece back on its starting square.
    pub fn reset(&mut self) {
        self.squares = [[None; 8]; 8];
        for row in 0..8usize {
            let color = match row {
                0..=2 => Color::Dark,
                5..=7 => Color::Light,
                _ => continue,
            };
            // Even rows use the odd columns and vice versa.
            for col in ((row + 1) % 2..8).step_by(2) {
                self.squares[row][col] = Some(Piece::man(color));
            }
        }
    }

    fn in_bounds(row: i32, col: i32) -> bool {
        (0..8).contains(&row) && (0..8).contains(&col)
    }

    /// Offset `square` by `(dr, dc)`, or `None` if that falls off the board.
    fn offset(square: Square, dr: i32, dc: i32) -> Option<Square> {
        let r = square.0 as i32 + dr;
        let c = square.1 as i32 + dc;
        Self::in_bounds(r, c).then_some((r as usize, c as usize))
    }

    pub fn position_valid(position: Square) -> bool {
        position.0 < 8 && position.1 < 8
    }

    pub fn get_piece(&self, position: Square) -> Option<Piece> {
        if !Self::position_valid(position) {
            return None;
        }
        self.squares[position.0][position.1]
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, sq)| sq.map(|p| ((r, c), p)))
        })
    }

    pub fn piece_count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, position: Square, piece: Piece) {
        self.squares[position.0][position.1] = Some(piece);
    }

    /// Destinations reachable in one step or one jump from `position`.
    ///
    /// Men step forward only but may jump in all four directions; kings do
    /// both everywhere. With `must_capture` only jump landings are returned.
    pub fn list_moves_from(&self, position: Square, must_capture: bool) -> Vec<Square> {
        let mut destinations = Vec::new();
        let piece = match self.get_piece(position) {
            Some(p) => p,
            None => return destinations,
        };

        for &(dr, dc) in &DIAGONALS {
            let adjacent = match Self::offset(position, dr, dc) {
                Some(sq) => sq,
                None => continue,
            };
            match self.get_piece(adjacent) {
                None => {
                    if !must_capture && piece.may_step(dr) {
                        destinations.push(adjacent);
                    }
                }
                Some(other) if other.color != piece.color => {
                    if let Some(landing) = Self::offset(position, 2 * dr, 2 * dc) {
                        if self.get_piece(landing).is_none() {
                            destinations.push(landing);
                        }
                    }
                }
                Some(_) => {}
            }
        }

        destinations
    }

    /// Every destination reachable by any piece of `color`, without duplicates.
    pub fn list_moves_for_color(&self, color: Color, must_capture: bool) -> Vec<Square> {
        let mut destinations: Vec<Square> = self
            .pieces()
            .filter(|(_, p)| p.color == color)
            .flat_map(|(sq, _)| self.list_moves_from(sq, must_capture))
            .collect();
        destinations.sort_unstable();
        destinations.dedup();
        destinations
    }

    pub fn can_capture_from(&self, position: Square) -> bool {
        !self.list_moves_from(position, true).is_empty()
    }

    pub fn can_capture(&self, color: Color) -> bool {
        self.pieces()
            .any(|(sq, p)| p.color == color && self.can_capture_from(sq))
    }

    /// Move the piece on `source` to `destination`, crowning it on the far
    /// edge and removing a jumped piece.
    ///
    /// Mandatory capture is not enforced here; `Game` does that. The board is
    /// left untouched when an error is returned.
    pub fn execute_move(&mut self, source: Square, destination: Square) -> Result<MoveKind> {
        let mut piece = self.get_piece(source).ok_or_else(|| {
            CheckersError::SourceInvalid(format!(
                "no piece on ({}, {})",
                source.0, source.1
            ))
        })?;

        if !self.list_moves_from(source, false).contains(&destination) {
            return Err(CheckersError::DestinationInvalid(format!(
                "({}, {}) cannot move to ({}, {})",
                source.0, source.1, destination.0, destination.1
            )));
        }

        let mv = Move::new(source, destination);
        if destination.0 == piece.color.crowning_row() {
            piece.promote();
        }

        self.squares[source.0][source.1] = None;
        self.squares[destination.0][destination.1] = Some(piece);

        match mv.captured_square() {
            Some((r, c)) => {
                self.squares[r][c] = None;
                debug!("{} {} captured ({r}, {c})", piece.color, mv);
                Ok(MoveKind::Capture)
            }
            None => {
                debug!("{} {}", piece.color, mv);
                Ok(MoveKind::Simple)
            }
        }
    }

    /// One `row,col,color,rank` line per occupied square, row-major.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for ((r, c), p) in self.pieces() {
            text.push_str(&format!("{r},{c},{},{}\n", p.color, p.rank));
        }
        text
    }

    /// Replace the board contents with the pieces described by `text`.
    ///
    /// Blank lines are skipped. Any malformed line rejects the whole text and
    /// the current contents are kept.
    pub fn from_text(&mut self, text: &str) -> Result<()> {
        let mut squares = [[None; 8]; 8];
        for (index, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let ((r, c), piece) = parse_piece_line(line)
                .map_err(|e| CheckersError::Load(format!("line {}: {e}", index + 1)))?;
            if squares[r][c].is_some() {
                return Err(CheckersError::Load(format!(
                    "line {}: square ({r}, {c}) listed twice",
                    index + 1
                )));
            }
            squares[r][c] = Some(piece);
        }
        self.squares = squares;
        Ok(())
    }
}

fn parse_piece_line(line: &str) -> std::result::Result<(Square, Piece), String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [row, col, color, rank] = fields[..] else {
        return Err(format!("expected 4 fields, found {}: {line:?}", fields.len()));
    };
    let row: usize = row
        .parse()
        .map_err(|_| format!("bad row {row:?}"))?;
    let col: usize = col
        .parse()
        .map_err(|_| format!("bad column {col:?}"))?;
    if !Board::position_valid((row, col)) {
        return Err(format!("square ({row}, {col}) is off the board"));
    }
    let color = Color::from_token(color).ok_or_else(|| format!("unknown color {color:?}"))?;
    let rank = Rank::from_token(rank).ok_or_else(|| format!("unknown rank {rank:?}"))?;
    Ok(((row, col), Piece::new(color, rank)))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " +-0-+-1-+-2-+-3-+-4-+-5-+-6-+-7-+")?;
        for (r, row) in self.squares.iter().enumerate() {
            write!(f, "{r}|")?;
            for sq in row {
                match sq {
                    Some(p) => write!(f, " {p} |")?,
                    None => write!(f, "   |")?,
                }
            }
            writeln!(f)?;
            writeln!(f, " +---+---+---+---+---+---+---+---+")?;
        }
        Ok(())
    }
}
