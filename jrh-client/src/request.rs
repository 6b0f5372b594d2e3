//! Correlation ids for outgoing requests
//!
//! Every call gets a fresh id made of 12 random bytes encoded with the
//! URL-safe base64 alphabet, which yields 16 characters that embed directly
//! in a JSON string. Ids are not tracked: calls on a client are sequential, so
//! the only id that matters is the one just sent.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use jrh_core::RequestId;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Number of random bytes in an id
pub(crate) const ID_BYTES: usize = 12;

/// Generator of correlation ids
///
/// The random source is a `StdRng` seeded from the operating system on first
/// use and reused afterwards.
pub(crate) struct IdGenerator {
    rng: Option<StdRng>,
}

impl IdGenerator {
    pub(crate) fn new() -> Self {
        Self { rng: None }
    }

    /// Generate a new id
    pub(crate) fn next_id(&mut self) -> RequestId {
        let rng = self.rng.get_or_insert_with(StdRng::from_entropy);

        let mut bytes = [0u8; ID_BYTES];
        rng.fill_bytes(&mut bytes);

        RequestId::from(URL_SAFE.encode(bytes))
    }

    #[cfg(test)]
    fn is_seeded(&self) -> bool {
        self.rng.is_some()
    }
}
