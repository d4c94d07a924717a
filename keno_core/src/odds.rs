//! Exact odds for the fixed prize charts.
//!
//! With `s` spots on the card and twenty of eighty numbers drawn, the number
//! of matches is hypergeometric:
//! `P(m) = C(s, m) * C(80 - s, 20 - m) / C(80, 20)`.

use serde::Serialize;

use crate::board::{DRAW_SIZE, MAX_NUMBER};
use crate::paytable::PayoutTable;

fn choose(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Probability that a card with `spots` numbers catches exactly `matches`.
pub fn match_probability(spots: usize, matches: usize) -> f64 {
    let pool = MAX_NUMBER as usize;
    if spots > pool || matches > spots || matches > DRAW_SIZE {
        return 0.0;
    }
    choose(spots, matches) * choose(pool - spots, DRAW_SIZE - matches) / choose(pool, DRAW_SIZE)
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct OddsSummary {
    pub spots: usize,
    /// Chance that a single drawing pays anything.
    pub win_probability: f64,
    /// "1 in N" odds of any prize.
    pub overall_odds: f64,
    /// Average amount returned per unit bet.
    pub expected_return: f64,
}

impl PayoutTable {
    pub fn match_probability(&self, matches: usize) -> f64 {
        match_probability(self.spots(), matches)
    }

    pub fn win_probability(&self) -> f64 {
        self.entries()
            .iter()
            .map(|e| self.match_probability(e.matches))
            .sum()
    }

    pub fn overall_odds(&self) -> f64 {
        1.0 / self.win_probability()
    }

    pub fn expected_return(&self) -> f64 {
        self.entries()
            .iter()
            .map(|e| self.match_probability(e.matches) * e.prize_multiplier as f64)
            .sum()
    }

    pub fn odds_summary(&self) -> OddsSummary {
        OddsSummary {
            spots: self.spots(),
            win_probability: self.win_probability(),
            overall_odds: self.overall_odds(),
            expected_return: self.expected_return(),
        }
    }
}
