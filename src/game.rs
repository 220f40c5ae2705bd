use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::engine::legal_moves;
use crate::error::{CheckersError, Result};
use crate::moves::{Move, MoveKind, Square};
use crate::piece::Color;

/// Pieces each side starts with.
pub const STARTING_PIECES: usize = 12;

/// Light always opens.
const FIRST_PLAYER: Color = Color::Light;

const HISTORY_SEPARATOR: &str = "#";

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    Won(Color),
    /// The side to move still has pieces but nothing to play.
    Draw,
}

/// The result of `Game::play`.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PlayedMove {
    pub mv: Move,
    pub kind: MoveKind,
    pub promoted: bool,
    /// False when the same piece has to keep capturing.
    pub turn_ended: bool,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    current_player: Color,
    must_capture: bool,
    forced_source: Option<Square>,
    history: String,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            current_player: FIRST_PLAYER,
            must_capture: false,
            forced_source: None,
            history: String::new(),
        }
    }

    /// Start from an arbitrary position with `to_move` on turn.
    pub fn from_position(board: Board, to_move: Color) -> Self {
        let must_capture = board.can_capture(to_move);
        Game {
            board,
            current_player: to_move,
            must_capture,
            forced_source: None,
            history: String::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn must_capture(&self) -> bool {
        self.must_capture
    }

    pub fn forced_source(&self) -> Option<Square> {
        self.forced_source
    }

    pub fn history(&self) -> &str {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Check that the side to move may pick up the piece on `position`.
    pub fn validate_source(&self, position: Square) -> Result<()> {
        if self.must_capture && !self.board.can_capture_from(position) {
            return Err(CheckersError::SourceInvalid(
                "a capture is mandatory and this piece cannot capture".into(),
            ));
        }
        if let Some(forced) = self.forced_source {
            if forced != position {
                return Err(CheckersError::SourceInvalid(format!(
                    "you must keep capturing with the piece on ({}, {})",
                    forced.0, forced.1
                )));
            }
        }
        let piece = self.board.get_piece(position).ok_or_else(|| {
            CheckersError::SourceInvalid(format!("no piece on ({}, {})", position.0, position.1))
        })?;
        if piece.color != self.current_player {
            return Err(CheckersError::SourceInvalid(format!(
                "that piece is {}, it is {}'s turn",
                piece.color, self.current_player
            )));
        }
        Ok(())
    }

    pub fn validate_destination(&self, source: Square, destination: Square) -> Result<()> {
        if self
            .board
            .list_moves_from(source, self.must_capture)
            .contains(&destination)
        {
            Ok(())
        } else {
            Err(CheckersError::DestinationInvalid(format!(
                "({}, {}) is not reachable from ({}, {})",
                destination.0, destination.1, source.0, source.1
            )))
        }
    }

    /// Hand the turn to the other color. `must_capture` and `forced_source`
    /// are left for the caller to update.
    pub fn advance_turn(&mut self) {
        self.current_player = self.current_player.opposite();
        debug!("{} to move", self.current_player);
    }

    pub fn current_player_can_capture(&self) -> bool {
        self.board.can_capture(self.current_player)
    }

    /// Validate and commit one move for the side to move, then update the
    /// turn state: a capture that can be continued from the landing square
    /// keeps the turn and forces that square, anything else passes the turn.
    pub fn play(&mut self, source: Square, destination: Square) -> Result<PlayedMove> {
        self.validate_source(source)?;
        self.validate_destination(source, destination)?;

        let was_king = self.board.get_piece(source).is_some_and(|p| p.is_king());
        let kind = self.board.execute_move(source, destination)?;
        let promoted = !was_king && self.board.get_piece(destination).is_some_and(|p| p.is_king());

        let mv = Move::new(source, destination);
        self.history
            .push_str(&format!("{} {}\n", self.current_player, mv.to_notation()));

        let turn_ended = if kind == MoveKind::Capture && self.board.can_capture_from(destination) {
            self.must_capture = true;
            self.forced_source = Some(destination);
            false
        } else {
            self.forced_source = None;
            self.advance_turn();
            self.must_capture = self.current_player_can_capture();
            true
        };

        Ok(PlayedMove {
            mv,
            kind,
            promoted,
            turn_ended,
        })
    }

    pub fn status(&self) -> GameStatus {
        for color in [Color::Light, Color::Dark] {
            if self.board.piece_count(color) == 0 {
                return GameStatus::Won(color.opposite());
            }
        }
        if legal_moves(self).is_empty() {
            return GameStatus::Draw;
        }
        GameStatus::Ongoing
    }

    /// Opposing pieces taken by `color` so far.
    pub fn score(&self, color: Color) -> usize {
        STARTING_PIECES.saturating_sub(self.board.piece_count(color.opposite()))
    }

    /// Reset turn state and the board. The history is the caller's to clear.
    pub fn new_game(&mut self) {
        self.current_player = FIRST_PLAYER;
        self.must_capture = false;
        self.forced_source = None;
        self.board.reset();
        info!("new game");
    }

    /// Write the game as text: player to move, `must_capture`, forced source,
    /// one line per piece, then `#` and `history` if it is not empty.
    pub fn save<W: Write>(&self, mut writer: W, history: &str) -> Result<()> {
        let forced = match self.forced_source {
            Some((r, c)) => format!("{r},{c}"),
            None => "None".to_string(),
        };
        let must_capture = if self.must_capture { "True" } else { "False" };

        let mut text = format!("{}\n{must_capture}\n{forced}\n", self.current_player);
        text.push_str(&self.board.to_text());
        if !history.is_empty() {
            text.push_str(HISTORY_SEPARATOR);
            text.push('\n');
            text.push_str(history);
        }

        writer
            .write_all(text.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(CheckersError::Save)?;
        info!("saved game ({} pieces)", self.board.pieces().count());
        Ok(())
    }

    /// Replace the whole game with the one read from `reader`.
    ///
    /// Returns whether the save carried a history section. Nothing changes if
    /// the text is rejected.
    pub fn load<R: BufRead>(&mut self, mut reader: R) -> Result<bool> {
        let loaded = read_save(&mut reader).inspect_err(|e| warn!("{e}"))?;

        let has_history = loaded.history.is_some();
        self.board = loaded.board;
        self.current_player = loaded.current_player;
        self.must_capture = loaded.must_capture;
        self.forced_source = loaded.forced_source;
        self.history = loaded.history.unwrap_or_default();
        info!(
            "loaded game, {} to move{}",
            self.current_player,
            if has_history { ", with history" } else { "" }
        );
        Ok(has_history)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P, history: &str) -> Result<()> {
        let file = File::create(path).map_err(CheckersError::Save)?;
        self.save(BufWriter::new(file), history)
    }

    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<bool> {
        let file = File::open(path).map_err(|e| CheckersError::Load(e.to_string()))?;
        self.load(BufReader::new(file))
    }
}

struct SavedGame {
    board: Board,
    current_player: Color,
    must_capture: bool,
    forced_source: Option<Square>,
    history: Option<String>,
}

fn read_save<R: BufRead>(reader: &mut R) -> Result<SavedGame> {
    let color_line = required_line(reader, "player to move")?;
    let current_player = Color::from_token(&color_line)
        .ok_or_else(|| CheckersError::Load(format!("unknown color {color_line:?}")))?;

    let must_capture = match required_line(reader, "capture flag")?.as_str() {
        "True" | "true" => true,
        "False" | "false" => false,
        other => {
            return Err(CheckersError::Load(format!("bad capture flag {other:?}")));
        }
    };

    let forced_line = required_line(reader, "forced square")?;
    let forced_source = if forced_line == "None" {
        None
    } else {
        Some(parse_square(&forced_line)?)
    };

    let mut board_text = String::new();
    let mut history = None;
    while let Some(line) = next_line(reader)? {
        if line.is_empty() {
            break;
        }
        if line == HISTORY_SEPARATOR {
            let mut rest = String::new();
            reader
                .read_to_string(&mut rest)
                .map_err(|e| CheckersError::Load(e.to_string()))?;
            history = Some(rest);
            break;
        }
        board_text.push_str(&line);
        board_text.push('\n');
    }

    let mut board = Board::empty();
    board.from_text(&board_text)?;

    Ok(SavedGame {
        board,
        current_player,
        must_capture,
        forced_source,
        history,
    })
}

/// Next line without its terminator, or `None` at end of input.
fn next_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| CheckersError::Load(e.to_string()))?;
    if read == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(&['\n', '\r'][..]);
    Ok(Some(trimmed.to_string()))
}

fn required_line<R: BufRead>(reader: &mut R, what: &str) -> Result<String> {
    next_line(reader)?.ok_or_else(|| CheckersError::Load(format!("missing {what}")))
}

fn parse_square(text: &str) -> Result<Square> {
    let bad = || CheckersError::Load(format!("bad square {text:?}"));
    let (row, col) = text.split_once(',').ok_or_else(bad)?;
    let row: usize = row.trim().parse().map_err(|_| bad())?;
    let col: usize = col.trim().parse().map_err(|_| bad())?;
    if !Board::position_valid((row, col)) {
        return Err(bad());
    }
    Ok((row, col))
}
