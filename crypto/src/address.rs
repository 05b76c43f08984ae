//! Deterministic address derivation.

use crate::hash::blake2b_256_multi;
use skillrep_types::Address;

const ADDRESS_DOMAIN: &[u8] = b"skillrep/address/v1";

/// Derive an address from arbitrary seed bytes.
///
/// The result is never `Address::ZERO` in practice, so derived addresses are
/// always distinguishable from an unset cell.
pub fn derive_address(seed: &[u8]) -> Address {
    Address::new(blake2b_256_multi(&[ADDRESS_DOMAIN, seed]))
}
