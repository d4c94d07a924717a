/// Misuse of the engine: an unsupported spots tier, a draw size other than
/// twenty, or a game started with arguments outside the playable options.
///
/// Expected runtime refusals (a bet the balance cannot cover, drawing while
/// no game is running) are not errors; those operations report them in
/// their return value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KenoError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type KenoResult<T> = Result<T, KenoError>;
