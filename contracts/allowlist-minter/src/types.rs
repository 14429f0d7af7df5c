use soroban_sdk::{contracterror, contracttype, Address};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MinterError {
    /// Caller is not the admin, or the allowlist proof did not verify
    NotAuthorized = 1,
    /// Operation is not callable in the current sale state
    WrongPhase = 2,
    /// Attached payment differs from quantity * unit price
    PaymentMismatch = 3,
    /// Per-wallet, category or global cap would be exceeded
    QuotaExceeded = 4,
    /// Requested quantity is zero
    InvalidQuantity = 5,
    AlreadyInitialized = 6,
    InvalidConfig = 7,
    NotInitialized = 8,
}

/// Sale phase. Discriminants are part of the public interface.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SaleState {
    Closed = 0,
    PrivateSale = 1,
    PublicSale = 2,
}

/// Allowlist selector for private mints.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AllowlistKind {
    DipHolder = 0,
    Adopter = 1,
}

/// Accounting category. The two allowlists plus the public and reserved pools.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Category {
    DipHolder = 0,
    Adopter = 1,
    Public = 2,
    Reserved = 3,
}

impl From<AllowlistKind> for Category {
    fn from(kind: AllowlistKind) -> Self {
        match kind {
            AllowlistKind::DipHolder => Category::DipHolder,
            AllowlistKind::Adopter => Category::Adopter,
        }
    }
}

/// Contiguous block of unit ids `first..first + count`. Ids start at 1.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnitRange {
    pub first: u32,
    pub count: u32,
}

impl UnitRange {
    pub fn last(&self) -> u32 {
        self.first + self.count - 1
    }

    pub fn contains(&self, unit: u32) -> bool {
        unit >= self.first && unit < self.first + self.count
    }
}

/// Per-category allocation pools. `None` means no pool is configured.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CategoryCaps {
    pub dip_holder: Option<u32>,
    pub adopter: Option<u32>,
    pub public: Option<u32>,
    pub reserved: Option<u32>,
}

impl CategoryCaps {
    pub fn none() -> Self {
        Self {
            dip_holder: None,
            adopter: None,
            public: None,
            reserved: None,
        }
    }

    pub fn get(&self, category: Category) -> Option<u32> {
        match category {
            Category::DipHolder => self.dip_holder,
            Category::Adopter => self.adopter,
            Category::Public => self.public,
            Category::Reserved => self.reserved,
        }
    }
}

/// Optional token-holding requirement for DipHolder mints.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HolderGate {
    pub token: Address,
    pub min_balance: i128,
}

/// Constructor configuration. Immutable after deployment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinterConfig {
    pub max_supply: u32,
    pub payment_token: Address,
    pub treasury: Address,
    pub dip_holder_price: i128,
    pub adopter_price: i128,
    pub public_price: i128,
    pub private_wallet_cap: u32,
    pub public_wallet_cap: Option<u32>,
    pub category_caps: CategoryCaps,
    pub enforce_category_caps: bool,
    pub lock_roots_during_sale: bool,
    pub holder_gate: Option<HolderGate>,
}

impl MinterConfig {
    pub fn price(&self, category: Category) -> i128 {
        match category {
            Category::DipHolder => self.dip_holder_price,
            Category::Adopter => self.adopter_price,
            Category::Public => self.public_price,
            Category::Reserved => 0,
        }
    }

    pub fn validate(&self) -> Result<(), MinterError> {
        if self.max_supply == 0 {
            return Err(MinterError::InvalidConfig);
        }
        if self.dip_holder_price < 0 || self.adopter_price < 0 || self.public_price < 0 {
            return Err(MinterError::InvalidConfig);
        }
        if let Some(gate) = &self.holder_gate {
            if gate.min_balance < 0 {
                return Err(MinterError::InvalidConfig);
            }
        }
        Ok(())
    }
}

/// Read-only sale summary for frontends.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapacityReport {
    pub dip_holder: u32,
    pub adopter: u32,
    pub public: u32,
    pub reserved: u32,
    pub total_minted: u32,
    pub max_supply: u32,
    pub phase: SaleState,
}
