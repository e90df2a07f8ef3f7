pub mod custom_word_repository;
pub mod score_repository;

pub use custom_word_repository::SeaOrmCustomWordRepository;
pub use score_repository::SeaOrmScoreRepository;
