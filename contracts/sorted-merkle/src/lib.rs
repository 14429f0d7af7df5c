//! # Sorted-Pair Merkle Accumulator
//!
//! Keccak-256 Merkle proofs where every internal node is
//! `keccak256(min(a, b) || max(a, b))`. Because siblings are ordered by value
//! before hashing, a proof is just the list of sibling digests: no left/right
//! flags are needed to recompute the root.
//!
//! This is the convention produced by merkletreejs with `{ sort: true }` and
//! consumed by OpenZeppelin's `MerkleProof.verify`, so allowlists built with
//! that tooling verify here unchanged.
//!
//! Leaves are the keccak-256 of the raw identity bytes with no domain prefix.
//! For Soroban addresses the identity bytes are the address XDR encoding
//! (see [`leaf_for`]).

#![no_std]

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

/// Longest proof accepted by [`verify`]; supports 2^32 leaves.
pub const MAX_PROOF_LEN: u32 = 32;

/// The all-zero digest, used as the "no root set" marker.
pub const ZERO_DIGEST: [u8; 32] = [0u8; 32];

/// keccak-256 of arbitrary leaf bytes.
pub fn hash_leaf(env: &Env, data: &Bytes) -> BytesN<32> {
    env.crypto().keccak256(data).into()
}

/// Leaf digest for an account identity.
pub fn leaf_for(env: &Env, identity: &Address) -> BytesN<32> {
    hash_leaf(env, &identity.clone().to_xdr(env))
}

/// Hash two nodes in value order.
pub fn hash_pair(env: &Env, a: &BytesN<32>, b: &BytesN<32>) -> BytesN<32> {
    let a = a.to_array();
    let b = b.to_array();
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(&lo);
    buf[32..].copy_from_slice(&hi);
    env.crypto().keccak256(&Bytes::from_array(env, &buf)).into()
}

/// Returns true if `digest` is the all-zero marker.
pub fn is_zero(digest: &BytesN<32>) -> bool {
    digest.to_array() == ZERO_DIGEST
}

/// Fold `proof` over `leaf` and compare against `root`.
///
/// Never fails: malformed or oversized proofs simply return `false`.
/// An empty proof verifies only when `leaf == root`.
pub fn verify(env: &Env, root: &BytesN<32>, leaf: &BytesN<32>, proof: &Vec<BytesN<32>>) -> bool {
    if proof.len() > MAX_PROOF_LEN {
        return false;
    }

    let mut acc = leaf.clone();
    for sibling in proof.iter() {
        acc = hash_pair(env, &acc, &sibling);
    }

    &acc == root
}

/// Off-chain style tree builder, used by tests and tooling to produce roots
/// and proofs that match the on-chain verifier.
#[cfg(any(test, feature = "testutils"))]
pub mod tree {
    extern crate std;

    use super::{hash_pair, leaf_for, ZERO_DIGEST};
    use soroban_sdk::{Address, BytesN, Env, Vec};
    use std::vec::Vec as StdVec;

    /// Layers are stored bottom-up; leaves are sorted before building and an
    /// unpaired node is promoted to the next layer unchanged.
    pub struct MerkleTree {
        env: Env,
        layers: StdVec<StdVec<[u8; 32]>>,
    }

    impl MerkleTree {
        pub fn new(env: &Env, leaves: &[BytesN<32>]) -> Self {
            let mut base: StdVec<[u8; 32]> = leaves.iter().map(|l| l.to_array()).collect();
            base.sort();

            let mut layers = StdVec::new();
            layers.push(base);

            while layers.last().map(|l| l.len()).unwrap_or(0) > 1 {
                let prev = layers.last().unwrap();
                let mut next = StdVec::with_capacity((prev.len() + 1) / 2);
                for pair in prev.chunks(2) {
                    if pair.len() == 2 {
                        let a = BytesN::from_array(env, &pair[0]);
                        let b = BytesN::from_array(env, &pair[1]);
                        next.push(hash_pair(env, &a, &b).to_array());
                    } else {
                        next.push(pair[0]);
                    }
                }
                layers.push(next);
            }

            Self {
                env: env.clone(),
                layers,
            }
        }

        /// Build a tree whose leaves are the given identities.
        pub fn from_identities(env: &Env, identities: &[Address]) -> Self {
            let leaves: StdVec<BytesN<32>> = identities.iter().map(|a| leaf_for(env, a)).collect();
            Self::new(env, &leaves)
        }

        pub fn root(&self) -> BytesN<32> {
            let top = self
                .layers
                .last()
                .and_then(|l| l.first().copied())
                .unwrap_or(ZERO_DIGEST);
            BytesN::from_array(&self.env, &top)
        }

        /// Sibling path for `leaf`, or `None` if it is not in the tree.
        pub fn proof(&self, leaf: &BytesN<32>) -> Option<Vec<BytesN<32>>> {
            let target = leaf.to_array();
            let mut index = self.layers.first()?.iter().position(|l| *l == target)?;

            let mut path = Vec::new(&self.env);
            for layer in &self.layers[..self.layers.len() - 1] {
                let sibling = index ^ 1;
                if sibling < layer.len() {
                    path.push_back(BytesN::from_array(&self.env, &layer[sibling]));
                }
                index /= 2;
            }
            Some(path)
        }

        /// Proof for an identity leaf.
        pub fn proof_for(&self, identity: &Address) -> Option<Vec<BytesN<32>>> {
            self.proof(&leaf_for(&self.env, identity))
        }
    }
}
