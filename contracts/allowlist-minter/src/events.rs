use soroban_sdk::{Address, BytesN};

use crate::types::{Category, SaleState};

// Typed Events
#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct RootsSetEvent {
    pub dip_holder_root: BytesN<32>,
    pub adopter_root: BytesN<32>,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseChangedEvent {
    pub from: SaleState,
    pub to: SaleState,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct UnitsMintedEvent {
    #[topic]
    pub category: Category,
    #[topic]
    pub to: Address,
    pub first: u32,
    pub count: u32,
    pub paid: i128,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct AdminXferEvent {
    pub old_admin: Address,
    pub new_admin: Address,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct ContractUpgraded {
    pub from: u32,
    pub to: u32,
}
