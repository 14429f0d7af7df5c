use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::storage::DataKey;
use crate::types::UnitRange;

/// Ownership of one issued block. Stored once per mint, keyed by the block's
/// first unit id, so the write count of a mint does not depend on its size.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Holding {
    pub owner: Address,
    pub range: UnitRange,
}

/// Record `owner` for every unit in `range`.
///
/// Blocks are issued in id order, so appending keeps `HoldingStarts` sorted.
pub fn assign(env: &Env, owner: &Address, range: &UnitRange) {
    let store = env.storage().persistent();

    let mut starts: Vec<u32> = store
        .get(&DataKey::HoldingStarts)
        .unwrap_or_else(|| Vec::new(env));
    starts.push_back(range.first);
    store.set(&DataKey::HoldingStarts, &starts);
    store.set(
        &DataKey::Holding(range.first),
        &Holding {
            owner: owner.clone(),
            range: range.clone(),
        },
    );

    let balance_key = DataKey::Balance(owner.clone());
    let held: u32 = store.get(&balance_key).unwrap_or(0);
    store.set(&balance_key, &(held + range.count));
}

/// Owner of `unit`: the block with the greatest first id at or below it.
pub fn owner_of(env: &Env, unit: u32) -> Option<Address> {
    let store = env.storage().persistent();
    let starts: Vec<u32> = store.get(&DataKey::HoldingStarts)?;

    let index = match starts.binary_search(unit) {
        Ok(index) => index,
        Err(0) => return None,
        Err(next) => next - 1,
    };
    let holding: Holding = store.get(&DataKey::Holding(starts.get(index)?))?;
    holding.range.contains(unit).then_some(holding.owner)
}

pub fn balance_of(env: &Env, owner: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(owner.clone()))
        .unwrap_or(0)
}
