use serde::{Deserialize, Serialize};

use crate::engine::legal_moves;
use crate::game::{Game, GameStatus};
use crate::moves::{Move, Square};
use crate::piece::{Color, Piece};

/// Everything a front end needs to draw the game and offer moves.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GameSnapshot {
    /// `squares[row][col]`, row 0 at the top.
    pub squares: Vec<Vec<Option<Piece>>>,
    pub current_player: Color,
    pub must_capture: bool,
    pub forced_source: Option<Square>,
    pub legal_moves: Vec<Move>,
    pub status: GameStatus,
    pub light_score: usize,
    pub dark_score: usize,
    pub history: String,
}

impl GameSnapshot {
    pub fn from_game(game: &Game) -> Self {
        let board = game.board();
        let squares = (0..8)
            .map(|r| (0..8).map(|c| board.get_piece((r, c))).collect())
            .collect();

        GameSnapshot {
            squares,
            current_player: game.current_player(),
            must_capture: game.must_capture(),
            forced_source: game.forced_source(),
            legal_moves: legal_moves(game),
            status: game.status(),
            light_score: game.score(Color::Light),
            dark_score: game.score(Color::Dark),
            history: game.history().to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_of_opening() {
        let snap = GameSnapshot::from_game(&Game::new());
        assert_eq!(snap.squares.len(), 8);
        assert!(snap.squares.iter().all(|row| row.len() == 8));
        assert_eq!(snap.squares[7][0], Some(Piece::man(Color::Light)));
        assert_eq!(snap.squares[3][3], None);
        assert_eq!(snap.legal_moves.len(), 7);
        assert_eq!(snap.status, GameStatus::Ongoing);
        assert_eq!((snap.light_score, snap.dark_score), (0, 0));
    }

    #[test]
    fn json_uses_lowercase_words() {
        let mut game = Game::new();
        game.play((5, 2), (4, 3)).unwrap();
        let json = GameSnapshot::from_game(&game).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["current_player"], "dark");
        assert_eq!(value["must_capture"], false);
        assert_eq!(value["forced_source"], serde_json::Value::Null);
        assert_eq!(value["status"], "ongoing");
        assert_eq!(value["squares"][4][3]["color"], "light");
        assert_eq!(value["squares"][4][3]["rank"], "man");
        assert_eq!(value["history"], "light 5,2-4,3\n");
    }

    #[test]
    fn json_round_trips() {
        let snap = GameSnapshot::from_game(&Game::new());
        let back: GameSnapshot = serde_json::from_str(&snap.to_json().unwrap()).unwrap();
        assert_eq!(back, snap);
    }
}
