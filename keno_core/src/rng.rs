use hmac::{Hmac, Mac};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::Sha256;

use crate::board::{MAX_NUMBER, MIN_NUMBER};

// Provably-fair seeding: server_seed (secret) + client_seed + nonce -> HMAC-SHA256 -> ChaCha8 seed.
// Publishing sha256(server_seed) up front lets a player re-derive every draw afterwards.

pub type HmacSha256 = Hmac<Sha256>;

/// Random source owned by a `Draw` or a `Player`.
pub type KenoRng = ChaCha8Rng;

pub fn derive_hash_hex(input: &[u8]) -> String {
    use sha2::Digest;
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Deterministic generator for tests and replays.
pub fn seeded_rng(seed: u64) -> KenoRng {
    KenoRng::seed_from_u64(seed)
}

/// Generator seeded from operating system entropy.
pub fn entropy_rng() -> KenoRng {
    KenoRng::from_os_rng()
}

/// Collects `count` distinct numbers from `[MIN_NUMBER, MAX_NUMBER]` by rejection
/// sampling. The result keeps generation order.
pub(crate) fn sample_unique<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<u8> {
    debug_assert!(count <= MAX_NUMBER as usize);
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let n = rng.random_range(MIN_NUMBER..=MAX_NUMBER);
        if !out.contains(&n) {
            out.push(n);
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvablyFairRng {
    pub server_seed: String, // secret
    pub client_seed: String,
    pub nonce: u64,
}

impl ProvablyFairRng {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        Self {
            server_seed: server_seed.into(),
            client_seed: client_seed.into(),
            nonce,
        }
    }

    pub fn server_seed_hash_hex(&self) -> String {
        derive_hash_hex(self.server_seed.as_bytes())
    }

    pub fn hmac_bytes(&self) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(self.server_seed.as_bytes()).expect("HMAC key");
        let msg = format!("{}:{}", self.client_seed, self.nonce);
        mac.update(msg.as_bytes());
        let res = mac.finalize().into_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&res);
        out
    }

    /// The generator this seed triple commits to.
    pub fn rng(&self) -> KenoRng {
        KenoRng::from_seed(self.hmac_bytes())
    }

    /// Seed triple for the next round.
    pub fn next_nonce(&self) -> Self {
        Self {
            nonce: self.nonce.wrapping_add(1),
            ..self.clone()
        }
    }
}
