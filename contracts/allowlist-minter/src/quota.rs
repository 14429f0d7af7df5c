//! Quota ledger: capacity checks and counter updates for one reservation.
//!
//! `reserve` is pure over the in-memory [`SaleLedger`]; persisting the result
//! is left to the caller so a failed check never leaves a partial write.

use crate::storage::SaleLedger;
use crate::types::{Category, CategoryCaps, MinterConfig, MinterError, UnitRange};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum QuotaError {
    InvalidQuantity,
    GlobalCap,
    WalletCap,
    CategoryCap,
}

impl From<QuotaError> for MinterError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::InvalidQuantity => MinterError::InvalidQuantity,
            QuotaError::GlobalCap | QuotaError::WalletCap | QuotaError::CategoryCap => {
                MinterError::QuotaExceeded
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct QuotaRules {
    pub max_supply: u32,
    pub private_wallet_cap: u32,
    pub public_wallet_cap: Option<u32>,
    pub category_caps: CategoryCaps,
    pub enforce_category_caps: bool,
}

impl From<&MinterConfig> for QuotaRules {
    fn from(config: &MinterConfig) -> Self {
        Self {
            max_supply: config.max_supply,
            private_wallet_cap: config.private_wallet_cap,
            public_wallet_cap: config.public_wallet_cap,
            category_caps: config.category_caps.clone(),
            enforce_category_caps: config.enforce_category_caps,
        }
    }
}

impl QuotaRules {
    /// Per-wallet cap for `category`; `None` is unbounded.
    pub fn wallet_cap(&self, category: Category) -> Option<u32> {
        match category {
            Category::DipHolder | Category::Adopter => Some(self.private_wallet_cap),
            Category::Public => self.public_wallet_cap,
            Category::Reserved => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reservation {
    pub range: UnitRange,
    /// Wallet's new running count for the category.
    pub wallet_minted: u32,
}

/// Check order: quantity, global cap, wallet cap, category cap.
pub fn reserve(
    ledger: &mut SaleLedger,
    rules: &QuotaRules,
    category: Category,
    wallet_minted: u32,
    quantity: u32,
) -> Result<Reservation, QuotaError> {
    if quantity == 0 {
        return Err(QuotaError::InvalidQuantity);
    }

    let minted = ledger
        .minted
        .checked_add(quantity)
        .ok_or(QuotaError::GlobalCap)?;
    if minted > rules.max_supply {
        return Err(QuotaError::GlobalCap);
    }

    let wallet_total = wallet_minted
        .checked_add(quantity)
        .ok_or(QuotaError::WalletCap)?;
    if let Some(cap) = rules.wallet_cap(category) {
        if wallet_total > cap {
            return Err(QuotaError::WalletCap);
        }
    }

    let category_total = ledger
        .total(category)
        .checked_add(quantity)
        .ok_or(QuotaError::CategoryCap)?;
    if rules.enforce_category_caps {
        if let Some(cap) = rules.category_caps.get(category) {
            if category_total > cap {
                return Err(QuotaError::CategoryCap);
            }
        }
    }

    let range = UnitRange {
        first: ledger.minted + 1,
        count: quantity,
    };
    ledger.minted = minted;
    *ledger.total_mut(category) = category_total;

    Ok(Reservation {
        range,
        wallet_minted: wallet_total,
    })
}

/// Units still available under `category`: the configured pool minus what it
/// has issued, or the global remainder when no pool is configured.
pub fn remaining(ledger: &SaleLedger, rules: &QuotaRules, category: Category) -> u32 {
    match rules.category_caps.get(category) {
        Some(cap) => cap.saturating_sub(ledger.total(category)),
        None => rules.max_supply.saturating_sub(ledger.minted),
    }
}
