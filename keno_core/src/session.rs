use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::{SpotsTier, DRAW_SIZE, MAX_DRAWINGS};
use crate::draw::Draw;
use crate::error::{KenoError, KenoResult};
use crate::player::Player;
use crate::rng::{entropy_rng, seeded_rng, KenoRng};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SessionState {
    /// No card in play.
    Idle,
    /// Accepting drawings.
    Active,
    /// Every requested drawing has been played.
    Finished,
}

/// Result of one processed drawing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DrawingOutcome {
    /// 1-based position of this drawing on the card.
    pub drawing: u32,
    pub total_drawings: u32,
    pub bet: u64,
    pub winning_numbers: Vec<u8>,
    pub matched_numbers: Vec<u8>,
    pub match_count: usize,
    pub winnings: u64,
    pub balance: u64,
}

/// One card of play: a player, the house draw, and the bookkeeping across
/// the one to four drawings the card was bought for.
#[derive(Debug, Clone)]
pub struct Session {
    player: Player,
    draw: Draw,
    active: bool,
    total_drawings: u32,
    drawings_played: u32,
    total_winnings: u64,
    current_drawing_winnings: u64,
}

impl Session {
    pub fn new(initial_balance: u64) -> Self {
        Self::with_rngs(initial_balance, entropy_rng(), entropy_rng())
    }

    /// Reproducible session: every draw and quick pick follows from `seed`.
    pub fn seeded(initial_balance: u64, seed: u64) -> Self {
        let mut root = seeded_rng(seed);
        let player_rng = KenoRng::from_rng(&mut root);
        Self::with_rngs(initial_balance, player_rng, root)
    }

    pub fn with_rngs(initial_balance: u64, player_rng: KenoRng, draw_rng: KenoRng) -> Self {
        Self {
            player: Player::with_rng(initial_balance, player_rng),
            draw: Draw::with_rng(draw_rng),
            active: false,
            total_drawings: 1,
            drawings_played: 0,
            total_winnings: 0,
            current_drawing_winnings: 0,
        }
    }

    /// Opens a card for `spots` numbers and `drawings` consecutive drawings.
    pub fn start_game(&mut self, spots: usize, drawings: u32) -> KenoResult<()> {
        let tier = SpotsTier::from_spots(spots)?;
        if !(1..=MAX_DRAWINGS).contains(&drawings) {
            return Err(KenoError::InvalidConfiguration(format!(
                "drawings must be between 1 and {MAX_DRAWINGS}, got {drawings}"
            )));
        }
        self.player.initialize_payout(tier.spots())?;
        self.total_drawings = drawings;
        self.drawings_played = 0;
        self.total_winnings = 0;
        self.current_drawing_winnings = 0;
        self.active = true;
        info!(%tier, drawings, "game started");
        Ok(())
    }

    /// Plays the next drawing against `player_numbers`.
    ///
    /// Returns `None` without drawing when no game is running or the bet is
    /// refused by the player's ledger.
    pub fn process_drawing(
        &mut self,
        player_numbers: &[u8],
        bet_amount: u64,
    ) -> Option<DrawingOutcome> {
        if !self.active {
            debug!("drawing refused: no game in progress");
            return None;
        }
        if !self.player.place_bet(bet_amount) {
            debug!(
                bet_amount,
                balance = self.player.balance(),
                "drawing refused: bet not accepted"
            );
            return None;
        }

        let winning_numbers = self.draw.generate(DRAW_SIZE).ok()?;
        let matched_numbers = self.draw.find_matches(player_numbers);
        let match_count = matched_numbers.len();

        let winnings = self.player.calculate_winnings(match_count);
        self.current_drawing_winnings = winnings;
        self.total_winnings = self.total_winnings.saturating_add(winnings);
        if winnings > 0 {
            self.player.award_winnings(winnings);
        }

        self.drawings_played += 1;
        if self.drawings_played >= self.total_drawings {
            self.active = false;
            info!(
                total_winnings = self.total_winnings,
                balance = self.player.balance(),
                "card finished"
            );
        }

        debug!(
            drawing = self.drawings_played,
            match_count,
            winnings,
            "drawing processed"
        );
        Some(DrawingOutcome {
            drawing: self.drawings_played,
            total_drawings: self.total_drawings,
            bet: bet_amount,
            winning_numbers,
            matched_numbers,
            match_count,
            winnings,
            balance: self.player.balance(),
        })
    }

    pub fn has_more_drawings(&self) -> bool {
        self.active && self.drawings_played < self.total_drawings
    }

    /// Back to `Idle` with a fresh player holding `initial_balance`.
    pub fn reset_game(&mut self, initial_balance: u64) {
        self.player = Player::with_rng(initial_balance, self.player.fork_rng());
        self.draw = Draw::with_rng(self.draw.fork_rng());
        self.drawings_played = 0;
        self.total_drawings = 1;
        self.total_winnings = 0;
        self.current_drawing_winnings = 0;
        self.active = false;
        debug!(initial_balance, "game reset");
    }

    pub fn state(&self) -> SessionState {
        if self.active {
            SessionState::Active
        } else if self.drawings_played > 0 && self.drawings_played >= self.total_drawings {
            SessionState::Finished
        } else {
            SessionState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_finished(&self) -> bool {
        self.state() == SessionState::Finished
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// For choosing numbers or quick picks between drawings.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn draw(&self) -> &Draw {
        &self.draw
    }

    /// Number of the last drawing played on this card, 0 before the first.
    pub fn current_drawing(&self) -> u32 {
        self.drawings_played
    }

    pub fn total_drawings(&self) -> u32 {
        self.total_drawings
    }

    pub fn total_winnings(&self) -> u64 {
        self.total_winnings
    }

    pub fn current_drawing_winnings(&self) -> u64 {
        self.current_drawing_winnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paytable::PayoutTable;

    const TEN: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

    #[test]
    fn starting_a_game() {
        let mut game = Session::seeded(100, 1);
        assert_eq!(game.state(), SessionState::Idle);
        game.start_game(1, 4).unwrap();
        assert!(game.is_active());
        assert_eq!(game.state(), SessionState::Active);
        assert_eq!(game.total_drawings(), 4);
        assert_eq!(game.current_drawing(), 0);
        assert_eq!(game.total_winnings(), 0);
        assert_eq!(game.player().payout_table().unwrap().spots(), 1);
    }

    #[test]
    fn start_rejects_unsupported_arguments() {
        let mut game = Session::seeded(100, 1);
        for (spots, drawings) in [(0, 1), (5, 1), (11, 1), (4, 0), (4, 5)] {
            assert!(matches!(
                game.start_game(spots, drawings),
                Err(KenoError::InvalidConfiguration(_))
            ));
        }
        assert_eq!(game.state(), SessionState::Idle);
        assert!(game.player().payout_table().is_none());
    }

    #[test]
    fn single_drawing_finishes_the_card() {
        let mut game = Session::seeded(100, 2);
        game.start_game(10, 1).unwrap();
        let out = game.process_drawing(&TEN, 100).unwrap();

        assert_eq!(out.drawing, 1);
        assert_eq!(out.winning_numbers.len(), 20);
        assert_eq!(out.match_count, out.matched_numbers.len());
        let table = PayoutTable::new(10).unwrap();
        assert_eq!(out.winnings, 100 * table.lookup(out.match_count));
        assert_eq!(game.player().balance(), out.winnings);
        assert_eq!(out.balance, game.player().balance());
        assert_eq!(game.current_drawing_winnings(), out.winnings);
        assert_eq!(game.total_winnings(), out.winnings);
        assert!(game.is_finished());
        assert!(!game.has_more_drawings());
    }

    #[test]
    fn refused_bet_does_not_draw() {
        let mut game = Session::seeded(100, 3);
        game.start_game(4, 2).unwrap();
        assert!(game.process_drawing(&[1, 2, 3, 4], 150).is_none());
        assert!(game.process_drawing(&[1, 2, 3, 4], 0).is_none());
        assert!(game.draw().winning_numbers().is_empty());
        assert_eq!(game.current_drawing(), 0);
        assert_eq!(game.player().balance(), 100);
        assert!(game.is_active());
    }

    #[test]
    fn finished_card_refuses_more_drawings_until_restarted() {
        let mut game = Session::seeded(1_000, 4);
        game.start_game(1, 1).unwrap();
        assert!(game.process_drawing(&[40], 10).is_some());
        let balance = game.player().balance();
        assert!(game.process_drawing(&[40], 10).is_none());
        assert_eq!(game.player().balance(), balance);
        assert_eq!(game.current_drawing(), 1);

        game.start_game(1, 2).unwrap();
        assert_eq!(game.current_drawing(), 0);
        assert_eq!(game.total_winnings(), 0);
        assert!(game.has_more_drawings());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut game = Session::seeded(100, 5);
        game.start_game(10, 4).unwrap();
        game.process_drawing(&[10, 20, 30, 40, 50, 60, 70, 80, 79, 78], 10)
            .unwrap();
        assert_eq!(game.total_drawings(), 4);

        game.reset_game(250);
        assert_eq!(game.state(), SessionState::Idle);
        assert!(!game.is_active());
        assert_eq!(game.player().balance(), 250);
        assert_eq!(game.player().current_bet(), 0);
        assert!(game.player().selected_numbers().is_empty());
        assert!(game.draw().winning_numbers().is_empty());
        assert_eq!(game.total_drawings(), 1);
        assert_eq!(game.current_drawing(), 0);
        assert_eq!(game.total_winnings(), 0);
        assert_eq!(game.current_drawing_winnings(), 0);
    }

    #[test]
    fn same_seed_same_card() {
        let play = |seed| {
            let mut game = Session::seeded(500, seed);
            game.start_game(8, 3).unwrap();
            let picks = game.player_mut().quick_pick(8).unwrap();
            let mut outcomes = Vec::new();
            while game.has_more_drawings() {
                outcomes.push(game.process_drawing(&picks, 5).unwrap());
            }
            (picks, outcomes)
        };
        assert_eq!(play(77), play(77));
        assert_ne!(play(77).1, play(78).1);
    }

    #[test]
    fn same_seed_same_cards_across_resets() {
        let play = |seed| {
            let mut game = Session::seeded(500, seed);
            let mut cards = Vec::new();
            for _ in 0..3 {
                game.start_game(4, 2).unwrap();
                let picks = game.player_mut().quick_pick(4).unwrap();
                let mut outcomes = Vec::new();
                while game.has_more_drawings() {
                    outcomes.push(game.process_drawing(&picks, 5).unwrap());
                }
                cards.push((picks, outcomes));
                game.reset_game(500);
            }
            cards
        };
        let cards = play(21);
        assert_eq!(cards, play(21));
        // Each reset continues the stream instead of replaying it.
        assert_ne!(cards[0].1, cards[1].1);
        assert_ne!(cards[1].1, cards[2].1);
    }
}
