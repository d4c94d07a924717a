use tracing::debug;

use crate::board::{SpotsTier, MAX_SPOTS};
use crate::error::KenoResult;
use crate::paytable::PayoutTable;
use crate::rng::{entropy_rng, sample_unique, KenoRng};

/// Ledger and card for the one player at the table.
#[derive(Debug, Clone)]
pub struct Player {
    balance: u64,
    current_bet: u64,
    selected_numbers: Vec<u8>,
    payout: Option<PayoutTable>,
    rng: KenoRng,
}

impl Player {
    pub fn new(initial_balance: u64) -> Self {
        Self::with_rng(initial_balance, entropy_rng())
    }

    pub fn with_rng(initial_balance: u64, rng: KenoRng) -> Self {
        Self {
            balance: initial_balance,
            current_bet: 0,
            selected_numbers: Vec::new(),
            payout: None,
            rng,
        }
    }

    pub fn initialize_payout(&mut self, spots: usize) -> KenoResult<()> {
        self.payout = Some(PayoutTable::new(spots)?);
        Ok(())
    }

    /// Takes a hand-picked card. Returns `Ok(false)` and changes nothing when
    /// the card holds fewer than one or more than ten numbers; a size in that
    /// range without a prize chart is an `InvalidConfiguration`.
    pub fn select_numbers(&mut self, numbers: &[u8]) -> KenoResult<bool> {
        if numbers.is_empty() || numbers.len() > MAX_SPOTS {
            return Ok(false);
        }
        let payout = PayoutTable::new(numbers.len())?;
        self.selected_numbers = numbers.to_vec();
        self.payout = Some(payout);
        Ok(true)
    }

    /// Replaces the card with `num_spots` random numbers.
    pub fn quick_pick(&mut self, num_spots: usize) -> KenoResult<Vec<u8>> {
        let tier = SpotsTier::from_spots(num_spots)?;
        self.selected_numbers = sample_unique(&mut self.rng, num_spots);
        self.payout = Some(PayoutTable::for_tier(tier));
        debug!(picks = ?self.selected_numbers, "quick pick");
        Ok(self.selected_numbers.clone())
    }

    /// Stakes `amount` on the next drawing. Refused when the amount is zero or
    /// more than the balance, in which case nothing changes.
    pub fn place_bet(&mut self, amount: u64) -> bool {
        if amount == 0 || amount > self.balance {
            return false;
        }
        self.current_bet = amount;
        self.balance -= amount;
        true
    }

    pub fn award_winnings(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub fn can_afford_bet(&self, amount: u64) -> bool {
        amount <= self.balance
    }

    pub fn calculate_winnings(&self, matches: usize) -> u64 {
        self.payout
            .as_ref()
            .map_or(0, |table| self.current_bet.saturating_mul(table.lookup(matches)))
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn selected_numbers(&self) -> &[u8] {
        &self.selected_numbers
    }

    pub fn spots_chosen(&self) -> usize {
        self.selected_numbers.len()
    }

    pub fn payout_table(&self) -> Option<&PayoutTable> {
        self.payout.as_ref()
    }

    pub(crate) fn fork_rng(&mut self) -> KenoRng {
        use rand::SeedableRng;
        KenoRng::from_rng(&mut self.rng)
    }
}
