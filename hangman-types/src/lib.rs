pub mod errors;
pub mod messages;
pub mod round;
pub mod score;
pub mod word;

// Re-export all types
pub use errors::*;
pub use messages::*;
pub use round::*;
pub use score::*;
pub use word::*;

pub type SessionId = uuid::Uuid;
pub type RoundId = uuid::Uuid;
pub type CustomWordId = uuid::Uuid;
pub type ScoreId = uuid::Uuid;
