use hangman_types::HangmanError;
use rand::Rng;
use tracing::debug;

use crate::TargetWord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCategory {
    pub name: String,
    pub words: Vec<TargetWord>,
}

const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Animals",
        &[
            "ELEPHANT", "GIRAFFE", "PENGUIN", "DOLPHIN", "CHEETAH", "KANGAROO", "SQUIRREL",
            "PANDA", "ZEBRA", "TIGER", "MONKEY", "JAGUAR", "RACCOON", "KOALA", "FLAMINGO",
        ],
    ),
    (
        "Fruits",
        &[
            "APPLE", "BANANA", "ORANGE", "STRAWBERRY", "WATERMELON", "PINEAPPLE", "GRAPE",
            "MANGO", "KIWI", "PEACH", "CHERRY", "LEMON", "COCONUT", "BLUEBERRY", "APRICOT",
        ],
    ),
    (
        "Countries",
        &[
            "CANADA", "JAPAN", "BRAZIL", "AUSTRALIA", "GERMANY", "MEXICO", "FRANCE", "ITALY",
            "SPAIN", "EGYPT", "INDIA", "CHINA", "RUSSIA", "SWEDEN", "THAILAND",
        ],
    ),
    (
        "Sports",
        &[
            "FOOTBALL", "BASKETBALL", "BASEBALL", "TENNIS", "SOCCER", "VOLLEYBALL", "CRICKET",
            "HOCKEY", "SWIMMING", "CYCLING", "SKIING", "SURFING", "BOXING", "GYMNASTICS",
            "RUGBY",
        ],
    ),
];

/// A word drawn from the source, along with the category it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedWord {
    pub category: String,
    pub word: TargetWord,
}

/// Categorized word lists used for random rounds
#[derive(Debug, Clone)]
pub struct WordSource {
    categories: Vec<WordCategory>,
}

impl WordSource {
    /// The built-in Animals / Fruits / Countries / Sports lists
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES
            .iter()
            .map(|(name, words)| WordCategory {
                name: name.to_string(),
                words: words
                    .iter()
                    .filter_map(|word| TargetWord::parse(word).ok())
                    .collect(),
            })
            .collect();

        Self { categories }
    }

    /// Build a source from caller-supplied lists, rejecting unplayable words
    pub fn from_categories<I, S, W>(categories: I) -> Result<Self, HangmanError>
    where
        I: IntoIterator<Item = (S, Vec<W>)>,
        S: Into<String>,
        W: AsRef<str>,
    {
        let mut parsed = Vec::new();

        for (name, words) in categories {
            let name = name.into();
            let words = words
                .iter()
                .map(|word| TargetWord::parse(word.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;

            if words.is_empty() {
                return Err(HangmanError::validation(format!(
                    "Category {} has no words",
                    name
                )));
            }

            parsed.push(WordCategory { name, words });
        }

        if parsed.is_empty() {
            return Err(HangmanError::validation("No word categories available"));
        }

        Ok(Self { categories: parsed })
    }

    pub fn categories(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    pub fn category(&self, name: &str) -> Option<&WordCategory> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn word_count(&self) -> usize {
        self.categories.iter().map(|c| c.words.len()).sum()
    }

    pub fn pick_random_word(&self, category: Option<&str>) -> PickedWord {
        self.pick_random_word_with(category, &mut rand::rng())
    }

    /// Uniform word from `category` when it is known. Otherwise a uniform
    /// category first, then a uniform word inside it, so small categories
    /// are not drowned out by large ones.
    pub fn pick_random_word_with<R: Rng + ?Sized>(
        &self,
        category: Option<&str>,
        rng: &mut R,
    ) -> PickedWord {
        let chosen = match category.and_then(|name| self.category(name)) {
            Some(known) => known,
            None => {
                if let Some(name) = category {
                    debug!("Unknown category '{}', picking one at random", name);
                }
                &self.categories[rng.random_range(0..self.categories.len())]
            }
        };

        let word = chosen.words[rng.random_range(0..chosen.words.len())].clone();

        PickedWord {
            category: chosen.name.clone(),
            word,
        }
    }
}

impl Default for WordSource {
    fn default() -> Self {
        Self::builtin()
    }
}
