pub const BASE_POINTS: u32 = 100;
pub const MAX_TIME_BONUS: u32 = 100;
pub const ROUND_TIME_BUDGET_SECS: u32 = 120;

pub struct ScoringPolicy;

impl ScoringPolicy {
    /// `100 + floor(time_remaining / budget * 100)`, only meaningful for a won round
    pub fn compute_points(time_remaining: u32, budget: u32) -> u32 {
        if budget == 0 {
            return BASE_POINTS;
        }

        let remaining = time_remaining.min(budget) as u64;
        let bonus = remaining * MAX_TIME_BONUS as u64 / budget as u64;
        BASE_POINTS + bonus as u32
    }

    /// Seconds spent on the round
    pub fn time_taken(time_remaining: u32, budget: u32) -> u32 {
        budget.saturating_sub(time_remaining)
    }
}
