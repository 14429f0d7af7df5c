use soroban_sdk::{Address, BytesN, Env, Vec};

use crate::storage::DataKey;
use crate::types::AllowlistKind;

/// Stored root for `kind`; the zero digest when never set.
pub fn root(env: &Env, kind: AllowlistKind) -> BytesN<32> {
    env.storage()
        .instance()
        .get(&DataKey::Root(kind))
        .unwrap_or_else(|| BytesN::from_array(env, &sorted_merkle::ZERO_DIGEST))
}

/// Overwrite both roots. Phase policy is enforced by the caller.
pub fn set_roots(env: &Env, dip_holder_root: &BytesN<32>, adopter_root: &BytesN<32>) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Root(AllowlistKind::DipHolder), dip_holder_root);
    instance.set(&DataKey::Root(AllowlistKind::Adopter), adopter_root);
}

/// Prove `identity` against the root selected by `kind`.
/// An unset root accepts nothing.
pub fn verify_membership(
    env: &Env,
    identity: &Address,
    proof: &Vec<BytesN<32>>,
    kind: AllowlistKind,
) -> bool {
    let root = root(env, kind);
    if sorted_merkle::is_zero(&root) {
        return false;
    }

    let leaf = sorted_merkle::leaf_for(env, identity);
    sorted_merkle::verify(env, &root, &leaf, proof)
}
