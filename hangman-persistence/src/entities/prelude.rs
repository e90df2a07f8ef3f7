pub use super::custom_words::Entity as CustomWords;
pub use super::scores::Entity as Scores;
