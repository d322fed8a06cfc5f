//! Structural fingerprints for expressions.
//!
//! Every [`Expr`](crate::expr::Expr) carries a 32-bit hash computed when the node is built. Leaves
//! hash a textual payload with [`fast_hash`], and composite nodes fold the hashes of their
//! operands, in order, with [`combine_hash`]. Both use 32-bit FNV-1a, so the result is stable
//! across runs and platforms, unlike [`std::hash::DefaultHasher`].
//!
//! The hash is only a fast-reject check. Two expressions with the same hash are compared
//! structurally before they are considered equal.

/// The FNV-1a offset basis for 32-bit hashes.
const OFFSET_BASIS: u32 = 0x811c_9dc5;

/// The FNV-1a prime for 32-bit hashes.
const PRIME: u32 = 0x0100_0193;

/// An in-progress 32-bit FNV-1a hash.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a(u32);

impl Default for Fnv1a {
    fn default() -> Self {
        Self(OFFSET_BASIS)
    }
}

impl Fnv1a {
    /// Feeds the given bytes into the hash.
    pub fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= u32::from(byte);
            self.0 = self.0.wrapping_mul(PRIME);
        }
    }

    /// Feeds an already computed hash into this one, as four little-endian bytes.
    pub fn write_hash(&mut self, hash: u32) {
        self.write(&hash.to_le_bytes());
    }

    /// Returns the hash of everything written so far.
    pub fn finish(self) -> u32 {
        self.0
    }
}

/// Hashes the given payload with 32-bit FNV-1a.
pub fn fast_hash(payload: &str) -> u32 {
    let mut hasher = Fnv1a::default();
    hasher.write(payload.as_bytes());
    hasher.finish()
}

/// Folds a sequence of hashes into one.
///
/// The result depends on the order of the hashes; `[a, b]` and `[b, a]` hash differently.
pub fn combine_hash(hashes: impl IntoIterator<Item = u32>) -> u32 {
    let mut hasher = Fnv1a::default();
    for hash in hashes {
        hasher.write_hash(hash);
    }
    hasher.finish()
}
