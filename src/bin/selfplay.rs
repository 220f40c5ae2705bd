use draughts::engine::{play_turn, RandomPicker};
use draughts::game::{Game, GameStatus};
use draughts::piece::Color;

const DEFAULT_MAX_PLIES: u32 = 200;

fn main() {
    let mut args = std::env::args().skip(1);
    let max_plies = match args.next() {
        Some(s) => match s.parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("usage: selfplay [max_plies] [save_path]");
                std::process::exit(2);
            }
        },
        None => DEFAULT_MAX_PLIES,
    };
    let save_path = args.next();

    let mut game = Game::new();
    let mut picker = RandomPicker;
    let mut plies = 0;

    while game.status() == GameStatus::Ongoing && plies < max_plies {
        match play_turn(&mut game, &mut picker) {
            Ok(played) if !played.is_empty() => plies += 1,
            Ok(_) => break,
            Err(e) => {
                eprintln!("engine played an illegal move: {e}");
                std::process::exit(1);
            }
        }
    }

    println!("{}", game.board());
    let result = match game.status() {
        GameStatus::Won(color) => format!("{color} wins"),
        GameStatus::Draw => "draw".to_string(),
        GameStatus::Ongoing => "ongoing".to_string(),
    };
    eprintln!(
        "Game over after {plies} turns: {result} (light {} - dark {})",
        game.score(Color::Light),
        game.score(Color::Dark)
    );

    if let Some(path) = save_path {
        if let Err(e) = game.save_to_path(&path, game.history()) {
            eprintln!("{e}");
            std::process::exit(1);
        }
        eprintln!("saved to {path}");
    }
}
