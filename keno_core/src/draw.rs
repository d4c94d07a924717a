use tracing::debug;

use crate::board::DRAW_SIZE;
use crate::error::{KenoError, KenoResult};
use crate::rng::{entropy_rng, sample_unique, KenoRng, ProvablyFairRng};

/// The house side of a drawing: twenty winning numbers and the subset of a
/// card that caught them. Only the latest drawing is kept; the values
/// returned from `generate` and `find_matches` are owned copies callers can
/// hold on to.
#[derive(Debug, Clone)]
pub struct Draw {
    rng: KenoRng,
    winning_numbers: Vec<u8>,
    matched_numbers: Vec<u8>,
}

impl Default for Draw {
    fn default() -> Self {
        Self::with_rng(entropy_rng())
    }
}

impl Draw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rng(rng: KenoRng) -> Self {
        Self {
            rng,
            winning_numbers: Vec::with_capacity(DRAW_SIZE),
            matched_numbers: Vec::new(),
        }
    }

    /// Replaces the winning numbers with `count` fresh ones. Only twenty-number
    /// draws exist; anything else is `InvalidConfiguration`.
    pub fn generate(&mut self, count: usize) -> KenoResult<Vec<u8>> {
        if count != DRAW_SIZE {
            return Err(KenoError::InvalidConfiguration(format!(
                "cannot generate {count} winning numbers, draws are always {DRAW_SIZE}"
            )));
        }
        self.winning_numbers = sample_unique(&mut self.rng, count);
        debug!(winning = ?self.winning_numbers, "generated draw");
        Ok(self.winning_numbers.clone())
    }

    /// Numbers from `player_numbers` present in the current draw, in the
    /// player's order. Duplicates in the input are matched once per
    /// occurrence.
    pub fn find_matches(&mut self, player_numbers: &[u8]) -> Vec<u8> {
        self.matched_numbers = player_numbers
            .iter()
            .copied()
            .filter(|n| self.winning_numbers.contains(n))
            .collect();
        self.matched_numbers.clone()
    }

    pub fn match_count(&mut self, player_numbers: &[u8]) -> usize {
        self.find_matches(player_numbers).len()
    }

    pub fn is_winning(&self, number: u8) -> bool {
        self.winning_numbers.contains(&number)
    }

    /// Winning numbers in the order they were drawn.
    pub fn winning_numbers(&self) -> &[u8] {
        &self.winning_numbers
    }

    pub fn matched_numbers(&self) -> &[u8] {
        &self.matched_numbers
    }

    /// Generator to hand over to a replacement draw.
    pub(crate) fn fork_rng(&mut self) -> KenoRng {
        use rand::SeedableRng;
        KenoRng::from_rng(&mut self.rng)
    }
}

/// Checks a published draw against the one the seed triple commits to.
pub fn verify_draw(seeds: &ProvablyFairRng, expected: &[u8]) -> bool {
    let mut draw = Draw::with_rng(seeds.rng());
    match draw.generate(DRAW_SIZE) {
        Ok(numbers) => numbers == expected,
        Err(_) => false,
    }
}
