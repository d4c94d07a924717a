use serde::{Deserialize, Serialize};

use crate::error::{KenoError, KenoResult};

pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 80;
/// Numbers drawn by the house per drawing.
pub const DRAW_SIZE: usize = 20;
pub const MAX_SPOTS: usize = 10;
pub const MAX_DRAWINGS: u32 = 4;

/// Spot counts a card can be played with; each has its own prize table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpotsTier {
    One,
    Four,
    Eight,
    Ten,
}

impl SpotsTier {
    pub const ALL: [SpotsTier; 4] = [SpotsTier::One, SpotsTier::Four, SpotsTier::Eight, SpotsTier::Ten];

    pub fn from_spots(spots: usize) -> KenoResult<Self> {
        match spots {
            1 => Ok(SpotsTier::One),
            4 => Ok(SpotsTier::Four),
            8 => Ok(SpotsTier::Eight),
            10 => Ok(SpotsTier::Ten),
            other => Err(KenoError::InvalidConfiguration(format!(
                "invalid number of spots: {other}"
            ))),
        }
    }

    pub fn spots(self) -> usize {
        match self {
            SpotsTier::One => 1,
            SpotsTier::Four => 4,
            SpotsTier::Eight => 8,
            SpotsTier::Ten => 10,
        }
    }
}

impl std::fmt::Display for SpotsTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} spot", self.spots())
    }
}
