use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::types::{AllowlistKind, Category, MinterConfig, MinterError, SaleState};

pub const VERSION: u32 = 1;
const VERSION_KEY: Symbol = symbol_short!("ver");
const ADMIN: Symbol = symbol_short!("admin");
const CONFIG: Symbol = symbol_short!("config");
const LEDGER: Symbol = symbol_short!("ledger");

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Root(AllowlistKind),       // allowlist -> root digest
    Minted(Address, Category), // (wallet, category) -> units minted
    Holding(u32),              // first unit id of a block -> Holding
    HoldingStarts,             // ascending first ids of every block
    Balance(Address),          // owner -> units held
}

/// Every sale-wide counter in one record. Loaded once per invocation,
/// mutated in memory and written back only after all checks have passed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleLedger {
    pub phase: SaleState,
    pub dip_holder: u32,
    pub adopter: u32,
    pub public: u32,
    pub reserved: u32,
    pub minted: u32,
}

impl SaleLedger {
    pub fn new() -> Self {
        Self {
            phase: SaleState::Closed,
            dip_holder: 0,
            adopter: 0,
            public: 0,
            reserved: 0,
            minted: 0,
        }
    }

    pub fn total(&self, category: Category) -> u32 {
        match category {
            Category::DipHolder => self.dip_holder,
            Category::Adopter => self.adopter,
            Category::Public => self.public,
            Category::Reserved => self.reserved,
        }
    }

    pub fn total_mut(&mut self, category: Category) -> &mut u32 {
        match category {
            Category::DipHolder => &mut self.dip_holder,
            Category::Adopter => &mut self.adopter,
            Category::Public => &mut self.public,
            Category::Reserved => &mut self.reserved,
        }
    }
}

impl Default for SaleLedger {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&VERSION_KEY)
}

pub fn init(env: &Env, admin: &Address, config: &MinterConfig) {
    let instance = env.storage().instance();
    instance.set(&VERSION_KEY, &VERSION);
    instance.set(&ADMIN, admin);
    instance.set(&CONFIG, config);
    instance.set(&LEDGER, &SaleLedger::new());
}

pub fn version(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&VERSION_KEY)
        .unwrap_or(VERSION)
}

pub fn admin(env: &Env) -> Result<Address, MinterError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(MinterError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
}

pub fn config(env: &Env) -> Result<MinterConfig, MinterError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(MinterError::NotInitialized)
}

pub fn ledger(env: &Env) -> Result<SaleLedger, MinterError> {
    env.storage()
        .instance()
        .get(&LEDGER)
        .ok_or(MinterError::NotInitialized)
}

pub fn set_ledger(env: &Env, ledger: &SaleLedger) {
    env.storage().instance().set(&LEDGER, ledger);
}

pub fn minted_by(env: &Env, wallet: &Address, category: Category) -> u32 {
    let key = DataKey::Minted(wallet.clone(), category);
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_minted_by(env: &Env, wallet: &Address, category: Category, count: u32) {
    let key = DataKey::Minted(wallet.clone(), category);
    env.storage().persistent().set(&key, &count);
}
