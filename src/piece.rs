use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row step of a simple move for a man of this color.
    /// Light starts on rows 5-7 and walks toward row 0, dark the other way.
    pub fn forward(self) -> i32 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    /// The far edge where a man of this color is crowned.
    pub fn crowning_row(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Color::Light => "light",
            Color::Dark => "dark",
        }
    }

    /// Parse a save-file token. Older saves spell the colors `blanc`/`noir`.
    pub fn from_token(s: &str) -> Option<Color> {
        match s {
            "light" | "blanc" => Some(Color::Light),
            "dark" | "noir" => Some(Color::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Man,
    King,
}

impl Rank {
    pub fn token(self) -> &'static str {
        match self {
            Rank::Man => "man",
            Rank::King => "king",
        }
    }

    /// Parse a save-file token, accepting the legacy `pion`/`dame` spelling.
    pub fn from_token(s: &str) -> Option<Rank> {
        match s {
            "man" | "pion" => Some(Rank::Man),
            "king" | "dame" => Some(Rank::King),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    pub fn new(color: Color, rank: Rank) -> Self {
        Piece { color, rank }
    }

    pub fn man(color: Color) -> Self {
        Piece::new(color, Rank::Man)
    }

    pub fn king(color: Color) -> Self {
        Piece::new(color, Rank::King)
    }

    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    /// Whether a non-capturing step with row delta `dr` is allowed.
    /// Captures ignore this: a man may jump backwards.
    pub fn may_step(&self, dr: i32) -> bool {
        self.is_king() || dr == self.color.forward()
    }

    /// Crowns the piece. Kings stay kings.
    pub fn promote(&mut self) {
        self.rank = Rank::King;
    }

    /// Single-character glyph used by the ASCII board.
    pub fn symbol(&self) -> char {
        match (self.color, self.rank) {
            (Color::Light, Rank::Man) => 'o',
            (Color::Light, Rank::King) => 'O',
            (Color::Dark, Rank::Man) => 'x',
            (Color::Dark, Rank::King) => 'X',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_toggles() {
        assert_eq!(Color::Light.opposite(), Color::Dark);
        assert_eq!(Color::Dark.opposite(), Color::Light);
    }

    #[test]
    fn tokens_accept_legacy_spelling() {
        assert_eq!(Color::from_token("blanc"), Some(Color::Light));
        assert_eq!(Color::from_token("noir"), Some(Color::Dark));
        assert_eq!(Rank::from_token("pion"), Some(Rank::Man));
        assert_eq!(Rank::from_token("dame"), Some(Rank::King));
        assert_eq!(Color::from_token("white"), None);
        assert_eq!(Rank::from_token("queen"), None);
    }

    #[test]
    fn men_step_forward_only_kings_any_way() {
        let light = Piece::man(Color::Light);
        assert!(light.may_step(-1));
        assert!(!light.may_step(1));
        let dark = Piece::man(Color::Dark);
        assert!(dark.may_step(1));
        assert!(!dark.may_step(-1));
        let king = Piece::king(Color::Dark);
        assert!(king.may_step(1) && king.may_step(-1));
    }

    #[test]
    fn promotion_is_one_way() {
        let mut p = Piece::man(Color::Light);
        p.promote();
        assert!(p.is_king());
        p.promote();
        assert_eq!(p.rank, Rank::King);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Piece::king(Color::Dark)).unwrap();
        assert_eq!(json, r#"{"color":"dark","rank":"king"}"#);
    }
}
