use hangman_types::{RoundId, RoundOutcome, RoundSnapshot, WordOrigin};
use uuid::Uuid;

use crate::{ROUND_TIME_BUDGET_SECS, ScoringPolicy, TargetWord, normalize_letter};

pub const MAX_WRONG_GUESSES: u32 = 6;

/// Why a guess left the round untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredGuess {
    RoundOver,
    AlreadyGuessed,
    NotALetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Ignored(IgnoredGuess),
    Correct {
        letter: char,
    },
    Incorrect {
        letter: char,
        wrong_guesses: u32,
    },
    Won {
        letter: char,
        points: u32,
        time_taken: u32,
    },
    LostByGuesses {
        letter: char,
    },
}

impl GuessOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, GuessOutcome::Ignored(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GuessOutcome::Won { .. } | GuessOutcome::LostByGuesses { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The round was not in progress
    Ignored,
    Ticked { time_remaining: u32 },
    TimedOut,
}

/// Authoritative state of a single round.
///
/// A round is created in progress and only moves forward: once it is won or
/// lost every further guess and tick is ignored. Nothing here fails; bad
/// input is reported back as [`GuessOutcome::Ignored`].
#[derive(Debug, Clone)]
pub struct Round {
    id: RoundId,
    target: TargetWord,
    origin: WordOrigin,
    guessed: Vec<char>, // insertion order, for display
    correct: Vec<char>,
    incorrect: Vec<char>,
    wrong_guesses: u32,
    time_remaining: u32,
    time_budget: u32,
    outcome: RoundOutcome,
    points: Option<u32>,
}

impl Round {
    pub fn start(target: TargetWord, origin: WordOrigin) -> Self {
        Self::with_budget(target, origin, ROUND_TIME_BUDGET_SECS)
    }

    /// A round with a custom countdown. The budget is at least one second so
    /// a fresh round is never out of time.
    pub fn with_budget(target: TargetWord, origin: WordOrigin, time_budget: u32) -> Self {
        let time_budget = time_budget.max(1);
        Self {
            id: Uuid::new_v4(),
            target,
            origin,
            guessed: Vec::new(),
            correct: Vec::new(),
            incorrect: Vec::new(),
            wrong_guesses: 0,
            time_remaining: time_budget,
            time_budget,
            outcome: RoundOutcome::InProgress,
            points: None,
        }
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        if self.outcome.is_terminal() {
            return GuessOutcome::Ignored(IgnoredGuess::RoundOver);
        }

        let Some(letter) = normalize_letter(letter) else {
            return GuessOutcome::Ignored(IgnoredGuess::NotALetter);
        };

        if self.guessed.contains(&letter) {
            return GuessOutcome::Ignored(IgnoredGuess::AlreadyGuessed);
        }

        self.guessed.push(letter);

        if self.target.contains(letter) {
            self.correct.push(letter);

            // Checked after recording the letter, so a correct guess always wins first
            if self.is_solved() {
                let points = ScoringPolicy::compute_points(self.time_remaining, self.time_budget);
                self.outcome = RoundOutcome::Won;
                self.points = Some(points);
                return GuessOutcome::Won {
                    letter,
                    points,
                    time_taken: self.time_taken(),
                };
            }

            GuessOutcome::Correct { letter }
        } else {
            self.incorrect.push(letter);
            self.wrong_guesses += 1;

            if self.wrong_guesses >= MAX_WRONG_GUESSES {
                self.outcome = RoundOutcome::LostByGuesses;
                return GuessOutcome::LostByGuesses { letter };
            }

            GuessOutcome::Incorrect {
                letter,
                wrong_guesses: self.wrong_guesses,
            }
        }
    }

    /// One second of the countdown
    pub fn tick(&mut self) -> TickOutcome {
        if self.outcome.is_terminal() {
            return TickOutcome::Ignored;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);

        if self.time_remaining == 0 {
            self.outcome = RoundOutcome::LostByTimeout;
            return TickOutcome::TimedOut;
        }

        TickOutcome::Ticked {
            time_remaining: self.time_remaining,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.target.letters().all(|c| self.guessed.contains(&c))
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn target(&self) -> &TargetWord {
        &self.target
    }

    pub fn origin(&self) -> &WordOrigin {
        &self.origin
    }

    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed
    }

    pub fn correct_letters(&self) -> &[char] {
        &self.correct
    }

    pub fn incorrect_letters(&self) -> &[char] {
        &self.incorrect
    }

    pub fn wrong_guesses(&self) -> u32 {
        self.wrong_guesses
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn time_budget(&self) -> u32 {
        self.time_budget
    }

    pub fn time_taken(&self) -> u32 {
        ScoringPolicy::time_taken(self.time_remaining, self.time_budget)
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn points(&self) -> Option<u32> {
        self.points
    }

    pub fn masked_word(&self) -> String {
        self.target
            .letters()
            .map(|c| if self.guessed.contains(&c) { c } else { '_' })
            .collect()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            id: self.id,
            masked_word: self.masked_word(),
            word: self.is_over().then(|| self.target.to_string()),
            word_length: self.target.len() as u32,
            guessed_letters: self.guessed.clone(),
            correct_letters: self.correct.clone(),
            incorrect_letters: self.incorrect.clone(),
            wrong_guesses: self.wrong_guesses,
            max_wrong_guesses: MAX_WRONG_GUESSES,
            time_remaining: self.time_remaining,
            time_budget: self.time_budget,
            outcome: self.outcome,
            points: self.points,
            origin: self.origin.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WordSource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    fn round_with(word: &str) -> Round {
        Round::start(TargetWord::parse(word).unwrap(), WordOrigin::Supplied)
    }

    #[test]
    fn test_new_round_starts_clean() {
        let round = round_with("CAT");
        assert_eq!(round.outcome(), RoundOutcome::InProgress);
        assert_eq!(round.wrong_guesses(), 0);
        assert_eq!(round.time_remaining(), 120);
        assert!(round.guessed_letters().is_empty());
        assert_eq!(round.masked_word(), "___");
        assert_eq!(round.points(), None);
    }

    #[test]
    fn test_zero_budget_is_raised_to_one_second() {
        let mut round = Round::with_budget(
            TargetWord::parse("CAT").unwrap(),
            WordOrigin::Supplied,
            0,
        );
        assert_eq!(round.outcome(), RoundOutcome::InProgress);
        assert_eq!(round.time_budget(), 1);
        assert_eq!(round.time_remaining(), 1);

        assert_eq!(round.tick(), TickOutcome::TimedOut);
        assert_eq!(round.outcome(), RoundOutcome::LostByTimeout);
        assert_eq!(round.guess('C'), GuessOutcome::Ignored(IgnoredGuess::RoundOver));
        assert_eq!(round.points(), None);
    }

    #[test]
    fn test_cat_scenario() {
        let mut round = round_with("CAT");

        assert_eq!(round.guess('C'), GuessOutcome::Correct { letter: 'C' });
        assert_eq!(round.correct_letters(), &['C']);

        assert_eq!(
            round.guess('Z'),
            GuessOutcome::Incorrect {
                letter: 'Z',
                wrong_guesses: 1
            }
        );

        assert_eq!(round.guess('A'), GuessOutcome::Correct { letter: 'A' });
        assert_eq!(round.outcome(), RoundOutcome::InProgress);

        let outcome = round.guess('T');
        assert!(matches!(outcome, GuessOutcome::Won { letter: 'T', .. }));
        assert_eq!(round.outcome(), RoundOutcome::Won);
        assert_eq!(round.wrong_guesses(), 1);
        assert_eq!(round.masked_word(), "CAT");
    }

    #[test]
    fn test_dog_scenario_loses_on_sixth_wrong_guess() {
        let mut round = round_with("DOG");

        for (i, letter) in ['X', 'Y', 'Z', 'Q', 'W'].into_iter().enumerate() {
            let outcome = round.guess(letter);
            assert_eq!(
                outcome,
                GuessOutcome::Incorrect {
                    letter,
                    wrong_guesses: i as u32 + 1
                }
            );
            assert_eq!(round.outcome(), RoundOutcome::InProgress);
        }

        assert_eq!(round.guess('V'), GuessOutcome::LostByGuesses { letter: 'V' });
        assert_eq!(round.outcome(), RoundOutcome::LostByGuesses);
        assert_eq!(round.wrong_guesses(), 6);
    }

    #[test]
    fn test_timeout_after_full_budget() {
        let mut round = round_with("DOG");

        for expected in (1..120).rev() {
            assert_eq!(
                round.tick(),
                TickOutcome::Ticked {
                    time_remaining: expected
                }
            );
        }

        assert_eq!(round.tick(), TickOutcome::TimedOut);
        assert_eq!(round.outcome(), RoundOutcome::LostByTimeout);
        assert_eq!(round.wrong_guesses(), 0);
        assert_eq!(round.time_remaining(), 0);
    }

    #[test]
    fn test_repeat_guess_is_idempotent() {
        let mut round = round_with("HELLO");
        round.guess('L');
        round.guess('X');
        let before = round.snapshot();

        assert_eq!(
            round.guess('L'),
            GuessOutcome::Ignored(IgnoredGuess::AlreadyGuessed)
        );
        assert_eq!(
            round.guess('X'),
            GuessOutcome::Ignored(IgnoredGuess::AlreadyGuessed)
        );
        assert_eq!(
            round.guess('x'),
            GuessOutcome::Ignored(IgnoredGuess::AlreadyGuessed)
        );
        assert_eq!(round.snapshot(), before);
    }

    #[test]
    fn test_lowercase_guesses_are_folded() {
        let mut round = round_with("CAT");
        assert_eq!(round.guess('c'), GuessOutcome::Correct { letter: 'C' });
        assert_eq!(round.guessed_letters(), &['C']);
    }

    #[test]
    fn test_non_letters_are_ignored() {
        let mut round = round_with("CAT");
        for input in ['1', ' ', '-', 'é'] {
            assert_eq!(
                round.guess(input),
                GuessOutcome::Ignored(IgnoredGuess::NotALetter)
            );
        }
        assert!(round.guessed_letters().is_empty());
        assert_eq!(round.wrong_guesses(), 0);
    }

    #[test]
    fn test_terminal_round_rejects_guesses_and_ticks() {
        let mut round = round_with("A");
        assert!(round.guess('A').is_terminal());
        let before = round.snapshot();

        assert_eq!(
            round.guess('B'),
            GuessOutcome::Ignored(IgnoredGuess::RoundOver)
        );
        assert_eq!(round.tick(), TickOutcome::Ignored);
        assert_eq!(round.snapshot(), before);
    }

    #[test]
    fn test_repeated_letters_in_target() {
        let mut round = round_with("BANANA");
        round.guess('A');
        round.guess('N');
        assert_eq!(round.masked_word(), "_ANANA");
        assert!(matches!(round.guess('B'), GuessOutcome::Won { .. }));
    }

    #[test]
    fn test_win_points_follow_remaining_time() {
        let mut round = round_with("GO");
        for _ in 0..60 {
            round.tick();
        }
        round.guess('G');

        match round.guess('O') {
            GuessOutcome::Won {
                points, time_taken, ..
            } => {
                assert_eq!(points, 150);
                assert_eq!(time_taken, 60);
            }
            other => panic!("Expected a win, got {:?}", other),
        }
        assert_eq!(round.points(), Some(150));
    }

    #[test]
    fn test_word_revealed_only_when_over() {
        let mut round = round_with("DOG");
        assert_eq!(round.snapshot().word, None);

        for letter in ['A', 'B', 'C', 'E', 'F', 'H'] {
            round.guess(letter);
        }
        let snapshot = round.snapshot();
        assert_eq!(snapshot.outcome, RoundOutcome::LostByGuesses);
        assert_eq!(snapshot.word.as_deref(), Some("DOG"));
        assert_eq!(snapshot.masked_word, "___");
    }

    #[test]
    fn test_any_order_with_up_to_five_misses_wins() {
        let source = WordSource::builtin();
        let mut rng = StdRng::seed_from_u64(2024);

        for category in source.categories() {
            for word in &source.category(&category).unwrap().words {
                let mut letters: Vec<char> = word.letters().collect();
                letters.sort_unstable();
                letters.dedup();

                let mut misses: Vec<char> = ('A'..='Z').filter(|c| !word.contains(*c)).collect();
                misses.shuffle(&mut rng);
                misses.truncate(5);

                let mut sequence: Vec<char> = letters.iter().chain(misses.iter()).copied().collect();
                sequence.shuffle(&mut rng);

                let mut round = Round::start(word.clone(), WordOrigin::Supplied);
                for letter in sequence {
                    round.guess(letter);
                }

                assert_eq!(round.outcome(), RoundOutcome::Won, "word {}", word);
                assert!(round.wrong_guesses() <= 5);
            }
        }
    }

    #[test]
    fn test_random_play_always_ends_in_exactly_one_terminal_state() {
        let source = WordSource::builtin();
        let mut rng = StdRng::seed_from_u64(99);
        let mut alphabet: Vec<char> = ('A'..='Z').collect();

        for _ in 0..300 {
            let picked = source.pick_random_word_with(None, &mut rng);
            let mut round = Round::start(picked.word, WordOrigin::Supplied);
            alphabet.shuffle(&mut rng);

            for &letter in &alphabet {
                round.guess(letter);
                assert!(round.wrong_guesses() <= MAX_WRONG_GUESSES);
            }

            assert!(round.is_over());
            let outcome = round.outcome();
            let won = outcome == RoundOutcome::Won;
            let lost = outcome == RoundOutcome::LostByGuesses;
            assert!(won ^ lost);
            assert_eq!(won, round.is_solved());
        }
    }
}
