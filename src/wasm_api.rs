use std::io::Cursor;

use crate::engine::{legal_moves, play_turn, RandomPicker};
use crate::game::Game;
use crate::snapshot::GameSnapshot;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct MoveResult {
    #[serde(flatten)]
    state: Option<GameSnapshot>,
    error: Option<String>,
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub struct CheckersGame {
    game: Game,
    picker: RandomPicker,
}

#[wasm_bindgen]
impl CheckersGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CheckersGame {
        CheckersGame {
            game: Game::new(),
            picker: RandomPicker,
        }
    }

    pub fn new_game(&mut self) -> JsValue {
        self.game.new_game();
        self.game.clear_history();
        self.get_state()
    }

    pub fn get_state(&self) -> JsValue {
        to_js(&GameSnapshot::from_game(&self.game))
    }

    fn result(&self, error: Option<String>) -> JsValue {
        let state = match error {
            Some(_) => None,
            None => Some(GameSnapshot::from_game(&self.game)),
        };
        to_js(&MoveResult { state, error })
    }

    pub fn make_move(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    ) -> JsValue {
        match self.game.play((from_row, from_col), (to_row, to_col)) {
            Ok(_) => self.result(None),
            Err(e) => self.result(Some(e.to_string())),
        }
    }

    /// Play a full turn for the side to move, capture chain included.
    pub fn make_ai_move(&mut self) -> JsValue {
        match play_turn(&mut self.game, &mut self.picker) {
            Ok(_) => self.result(None),
            Err(e) => self.result(Some(e.to_string())),
        }
    }

    pub fn legal_moves_for_square(&self, row: usize, col: usize) -> JsValue {
        let targets: Vec<[usize; 2]> = legal_moves(&self.game)
            .iter()
            .filter(|m| m.from == (row, col))
            .map(|m| [m.to.0, m.to.1])
            .collect();
        to_js(&targets)
    }

    /// The save file text, with history when `with_history` is set.
    pub fn save_text(&self, with_history: bool) -> Result<String, JsValue> {
        let history = if with_history { self.game.history() } else { "" };
        let mut buf = Vec::new();
        self.game
            .save(&mut buf, history)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        String::from_utf8(buf).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn load_text(&mut self, text: &str) -> JsValue {
        match self.game.load(Cursor::new(text)) {
            Ok(_) => self.result(None),
            Err(e) => self.result(Some(e.to_string())),
        }
    }
}

impl Default for CheckersGame {
    fn default() -> Self {
        Self::new()
    }
}
