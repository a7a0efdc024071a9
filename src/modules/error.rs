use thiserror::Error;

/// Errors raised by the world and the ball controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("no ball in the world")]
    NoBall,
    #[error("a ball is already in the world")]
    BallAlreadyPlaced,
    #[error("ball is not waiting to be launched")]
    NotPlaced,
    #[error("body is not part of the world")]
    UnknownBody,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
