pub mod prelude;

pub mod custom_words;
pub mod scores;
