// =============================================================================
// Move sources and pickers
//
// `legal_moves` lists every (source, destination) pair the side to move may
// play right now, honouring mandatory capture and a forced capture chain.
// Anything that chooses moves (a UI, a bot) sits behind `MovePicker` and only
// ever sees that list, so a stronger policy can replace `RandomPicker`
// without touching `Board` or `Game`.
// =============================================================================

use log::debug;

use crate::error::Result;
use crate::game::{Game, PlayedMove};
use crate::moves::Move;

/// Platform-appropriate random number in [0, 1).
/// Uses js_sys::Math::random() in WASM builds, rand crate natively.
fn random_f64() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Math::random()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

/// Every legal move for the side to move, grouped by source square in
/// row-major order.
pub fn legal_moves(game: &Game) -> Vec<Move> {
    let board = game.board();
    board
        .pieces()
        .filter(|(_, piece)| piece.color == game.current_player())
        .filter(|&(square, _)| game.validate_source(square).is_ok())
        .flat_map(|(square, _)| {
            board
                .list_moves_from(square, game.must_capture())
                .into_iter()
                .map(move |to| Move::new(square, to))
        })
        .collect()
}

/// A move-selection policy.
pub trait MovePicker {
    /// Pick one of `moves`, which are the legal moves in `game`.
    /// `None` means the picker declines (e.g. the list is empty).
    fn choose(&mut self, game: &Game, moves: &[Move]) -> Option<Move>;
}

/// Uniformly random choice. A placeholder opponent, not a strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPicker;

impl MovePicker for RandomPicker {
    fn choose(&mut self, _game: &Game, moves: &[Move]) -> Option<Move> {
        if moves.is_empty() {
            return None;
        }
        let index = (random_f64() * moves.len() as f64) as usize;
        Some(moves[index.min(moves.len() - 1)])
    }
}

/// Let `picker` play a whole turn, following the capture chain until the turn
/// passes. Returns the moves played; empty if there was nothing to play or the
/// picker declined.
pub fn play_turn<P: MovePicker + ?Sized>(game: &mut Game, picker: &mut P) -> Result<Vec<PlayedMove>> {
    let mut played = Vec::new();
    loop {
        let moves = legal_moves(game);
        let mv = match picker.choose(game, &moves) {
            Some(mv) => mv,
            None => break,
        };
        let result = game.play(mv.from, mv.to)?;
        played.push(result);
        if result.turn_ended {
            break;
        }
        debug!("capture chain continues from ({}, {})", mv.to.0, mv.to.1);
    }
    Ok(played)
}
