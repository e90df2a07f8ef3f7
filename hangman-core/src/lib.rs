pub mod memory;
pub mod profile;
pub mod recorder;
pub mod registry;
pub mod repository;
pub mod round;
pub mod round_events;
pub mod scoring;
pub mod session;
pub mod word_source;
pub mod word_validation;

// Re-export main components
pub use memory::*;
pub use profile::*;
pub use recorder::*;
pub use registry::*;
pub use repository::*;
pub use round::*;
pub use round_events::*;
pub use scoring::*;
pub use session::*;
pub use word_source::*;
pub use word_validation::*;
