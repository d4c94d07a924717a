pub mod board;
pub mod draw;
pub mod error;
pub mod odds;
pub mod paytable;
pub mod player;
pub mod rng;
pub mod session;

pub use crate::board::{SpotsTier, DRAW_SIZE, MAX_DRAWINGS, MAX_NUMBER, MAX_SPOTS, MIN_NUMBER};
pub use crate::draw::{verify_draw, Draw};
pub use crate::error::{KenoError, KenoResult};
pub use crate::odds::{match_probability, OddsSummary};
pub use crate::paytable::{PayoutTable, PaytableEntry};
pub use crate::player::Player;
pub use crate::rng::{derive_hash_hex, entropy_rng, seeded_rng, KenoRng, ProvablyFairRng};
pub use crate::session::{DrawingOutcome, Session, SessionState};
