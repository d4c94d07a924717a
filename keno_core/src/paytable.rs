use serde::Serialize;

use crate::board::SpotsTier;
use crate::error::KenoResult;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PaytableEntry {
    pub matches: usize,
    pub prize_multiplier: u64,
}

/// Fixed prize chart for one spots tier. Multipliers are paid per unit bet.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PayoutTable {
    tier: SpotsTier,
    entries: Vec<PaytableEntry>,
}

impl PayoutTable {
    /// Fails with `InvalidConfiguration` unless `spots` is 1, 4, 8 or 10.
    pub fn new(spots: usize) -> KenoResult<Self> {
        Ok(Self::for_tier(SpotsTier::from_spots(spots)?))
    }

    pub fn for_tier(tier: SpotsTier) -> Self {
        let chart: &[(usize, u64)] = match tier {
            SpotsTier::One => &[(1, 2)],
            SpotsTier::Four => &[(2, 1), (3, 5), (4, 75)],
            SpotsTier::Eight => &[(4, 2), (5, 12), (6, 50), (7, 750), (8, 10_000)],
            SpotsTier::Ten => &[
                (0, 5),
                (5, 2),
                (6, 15),
                (7, 40),
                (8, 450),
                (9, 4_250),
                (10, 100_000),
            ],
        };
        Self {
            tier,
            entries: chart
                .iter()
                .map(|&(matches, prize_multiplier)| PaytableEntry {
                    matches,
                    prize_multiplier,
                })
                .collect(),
        }
    }

    /// Prize for an exact match count, 0 when the count does not pay.
    pub fn lookup(&self, matches: usize) -> u64 {
        self.entries
            .iter()
            .find(|e| e.matches == matches)
            .map_or(0, |e| e.prize_multiplier)
    }

    pub fn tier(&self) -> SpotsTier {
        self.tier
    }

    pub fn spots(&self) -> usize {
        self.tier.spots()
    }

    /// Paying entries in ascending match order.
    pub fn entries(&self) -> &[PaytableEntry] {
        &self.entries
    }
}
