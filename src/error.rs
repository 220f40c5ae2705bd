/// Everything that can go wrong while playing, saving or loading a game.
///
/// Callers should match on the variant; the message is meant for display.
#[derive(Debug, thiserror::Error)]
pub enum CheckersError {
    /// Bad move origin: empty square, wrong color, a capture was mandatory,
    /// or another piece has to finish its capture chain.
    #[error("invalid source square: {0}")]
    SourceInvalid(String),

    /// The origin was fine but the target is not a legal destination.
    #[error("invalid destination square: {0}")]
    DestinationInvalid(String),

    /// Malformed or truncated save text, or a read failure.
    #[error("could not load game: {0}")]
    Load(String),

    #[error("could not save game: {0}")]
    Save(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CheckersError>;
