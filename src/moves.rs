use std::fmt;

use serde::{Deserialize, Serialize};

/// A board coordinate as `(row, col)`, both in `0..8`.
pub type Square = (usize, usize);

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

/// What `Board::execute_move` did.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Simple,
    Capture,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Two-row moves are always jumps.
    pub fn is_jump(&self) -> bool {
        self.from.0.abs_diff(self.to.0) == 2
    }

    /// The square jumped over, if this is a jump.
    pub fn captured_square(&self) -> Option<Square> {
        if self.is_jump() {
            Some(((self.from.0 + self.to.0) / 2, (self.from.1 + self.to.1) / 2))
        } else {
            None
        }
    }

    /// History notation, e.g. "5,2-4,3" or "3,2x1,0" for a jump.
    pub fn to_notation(&self) -> String {
        let sep = if self.is_jump() { 'x' } else { '-' };
        format!(
            "{},{}{sep}{},{}",
            self.from.0, self.from.1, self.to.0, self.to.1
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}
