//! # Allowlist Minter
//!
//! Issuance controller for a capped batch of identical collectible units.
//!
//! A sale moves through three admin-controlled phases:
//! - `Closed`: only the admin may issue units (`reserve_mint`).
//! - `PrivateSale`: members of the DipHolder or Adopter allowlists mint with a
//!   sorted-pair keccak Merkle proof against the category root.
//! - `PublicSale`: anyone mints at the public price.
//!
//! Transitions are not ordered; the admin may move between any two phases.
//!
//! Every mint runs phase gate, authorization, payment check and quota check
//! before the first storage write, then commits the counters, records unit
//! ownership and collects payment into the treasury in the same invocation.

#![no_std]
use soroban_sdk::{
    contract, contractimpl, log, panic_with_error, token, Address, BytesN, Env, Vec,
};

mod allowlist;
mod events;
mod phase;
mod quota;
mod storage;
mod types;
mod units;

pub use types::{
    AllowlistKind, CapacityReport, Category, CategoryCaps, HolderGate, MinterConfig, MinterError,
    SaleState, UnitRange,
};

use events::{AdminXferEvent, ContractUpgraded, RootsSetEvent, UnitsMintedEvent};
use quota::QuotaRules;
use storage::{SaleLedger, VERSION};

#[contract]
pub struct AllowlistMinter;

#[contractimpl]
impl AllowlistMinter {
    /// Constructor: store admin and the immutable sale configuration.
    pub fn __constructor(env: Env, admin: Address, config: MinterConfig) {
        if storage::is_initialized(&env) {
            panic_with_error!(&env, MinterError::AlreadyInitialized);
        }
        if let Err(err) = config.validate() {
            panic_with_error!(&env, err);
        }

        storage::init(&env, &admin, &config);
        ContractUpgraded {
            from: 0,
            to: VERSION,
        }
        .publish(&env);
    }

    // ---------------------------------------------------------------------
    // Admin
    // ---------------------------------------------------------------------

    /// Replace both allowlist roots (admin only).
    /// With `lock_roots_during_sale` the sale must be `Closed`.
    pub fn set_roots(
        env: Env,
        admin: Address,
        dip_holder_root: BytesN<32>,
        adopter_root: BytesN<32>,
    ) -> Result<(), MinterError> {
        Self::require_admin(&env, &admin)?;

        let config = storage::config(&env)?;
        if config.lock_roots_during_sale {
            let ledger = storage::ledger(&env)?;
            phase::require(&env, &ledger, SaleState::Closed)?;
        }

        allowlist::set_roots(&env, &dip_holder_root, &adopter_root);
        RootsSetEvent {
            dip_holder_root,
            adopter_root,
        }
        .publish(&env);
        Ok(())
    }

    pub fn start_private_sale(env: Env, admin: Address) -> Result<SaleState, MinterError> {
        Self::move_to(&env, &admin, SaleState::PrivateSale)
    }

    pub fn start_public_sale(env: Env, admin: Address) -> Result<SaleState, MinterError> {
        Self::move_to(&env, &admin, SaleState::PublicSale)
    }

    /// Return to `Closed`. Does not undo any issuance.
    pub fn close_sale(env: Env, admin: Address) -> Result<SaleState, MinterError> {
        Self::move_to(&env, &admin, SaleState::Closed)
    }

    /// Issue units to `recipient` free of charge (admin only, any phase).
    /// Skips payment and per-wallet caps; the global cap still applies.
    pub fn reserve_mint(
        env: Env,
        admin: Address,
        recipient: Address,
        quantity: u32,
    ) -> Result<UnitRange, MinterError> {
        Self::require_admin(&env, &admin)?;

        let config = storage::config(&env)?;
        let mut ledger = storage::ledger(&env)?;
        Self::issue(
            &env,
            &config,
            &mut ledger,
            &recipient,
            Category::Reserved,
            quantity,
            0,
        )
    }

    /// Transfer admin rights (current admin only)
    pub fn transfer_admin(env: Env, new_admin: Address) -> Result<(), MinterError> {
        let old_admin = storage::admin(&env)?;
        old_admin.require_auth();

        storage::set_admin(&env, &new_admin);
        AdminXferEvent {
            old_admin,
            new_admin,
        }
        .publish(&env);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Issuance
    // ---------------------------------------------------------------------

    /// Allowlist mint during `PrivateSale`.
    ///
    /// `payment` must equal `quantity * price(kind)` exactly; it is pulled
    /// from `buyer` into the treasury once every check has passed.
    pub fn mint_private(
        env: Env,
        buyer: Address,
        quantity: u32,
        proof: Vec<BytesN<32>>,
        kind: AllowlistKind,
        payment: i128,
    ) -> Result<UnitRange, MinterError> {
        buyer.require_auth();

        let config = storage::config(&env)?;
        let mut ledger = storage::ledger(&env)?;
        phase::require(&env, &ledger, SaleState::PrivateSale)?;

        if !allowlist::verify_membership(&env, &buyer, &proof, kind) {
            log!(&env, "allowlist proof rejected", buyer, kind as u32);
            return Err(MinterError::NotAuthorized);
        }

        if kind == AllowlistKind::DipHolder {
            if let Some(gate) = &config.holder_gate {
                let held = token::TokenClient::new(&env, &gate.token).balance(&buyer);
                if held < gate.min_balance {
                    log!(&env, "holder balance too low", buyer, held);
                    return Err(MinterError::NotAuthorized);
                }
            }
        }

        Self::issue(
            &env,
            &config,
            &mut ledger,
            &buyer,
            kind.into(),
            quantity,
            payment,
        )
    }

    /// Open mint during `PublicSale`. No proof; per-wallet cap only if
    /// configured.
    pub fn mint_public(
        env: Env,
        buyer: Address,
        quantity: u32,
        payment: i128,
    ) -> Result<UnitRange, MinterError> {
        buyer.require_auth();

        let config = storage::config(&env)?;
        let mut ledger = storage::ledger(&env)?;
        phase::require(&env, &ledger, SaleState::PublicSale)?;

        Self::issue(
            &env,
            &config,
            &mut ledger,
            &buyer,
            Category::Public,
            quantity,
            payment,
        )
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    pub fn verify_membership(
        env: Env,
        identity: Address,
        proof: Vec<BytesN<32>>,
        kind: AllowlistKind,
    ) -> bool {
        allowlist::verify_membership(&env, &identity, &proof, kind)
    }

    /// Current (dip_holder_root, adopter_root); zero digests when unset.
    pub fn roots(env: Env) -> (BytesN<32>, BytesN<32>) {
        (
            allowlist::root(&env, AllowlistKind::DipHolder),
            allowlist::root(&env, AllowlistKind::Adopter),
        )
    }

    pub fn sale_state(env: Env) -> SaleState {
        storage::ledger(&env).unwrap_or_default().phase
    }

    /// Remaining units per category, total minted and phase.
    pub fn remaining_capacity(env: Env) -> Result<CapacityReport, MinterError> {
        let config = storage::config(&env)?;
        let ledger = storage::ledger(&env)?;
        let rules = QuotaRules::from(&config);

        Ok(CapacityReport {
            dip_holder: quota::remaining(&ledger, &rules, Category::DipHolder),
            adopter: quota::remaining(&ledger, &rules, Category::Adopter),
            public: quota::remaining(&ledger, &rules, Category::Public),
            reserved: quota::remaining(&ledger, &rules, Category::Reserved),
            total_minted: ledger.minted,
            max_supply: config.max_supply,
            phase: ledger.phase,
        })
    }

    pub fn total_supply(env: Env) -> u32 {
        storage::ledger(&env).unwrap_or_default().minted
    }

    /// Units issued so far under `category`.
    pub fn category_total(env: Env, category: Category) -> u32 {
        storage::ledger(&env).unwrap_or_default().total(category)
    }

    /// Units `wallet` has minted under `category`.
    pub fn minted_by(env: Env, wallet: Address, category: Category) -> u32 {
        storage::minted_by(&env, &wallet, category)
    }

    pub fn balance_of(env: Env, owner: Address) -> u32 {
        units::balance_of(&env, &owner)
    }

    pub fn owner_of(env: Env, unit: u32) -> Option<Address> {
        units::owner_of(&env, unit)
    }

    pub fn admin(env: Env) -> Result<Address, MinterError> {
        storage::admin(&env)
    }

    pub fn config(env: Env) -> Result<MinterConfig, MinterError> {
        storage::config(&env)
    }

    /// Contract version for upgrade tracking.
    pub fn version(env: Env) -> u32 {
        storage::version(&env)
    }

    // Internal helpers

    fn require_admin(env: &Env, caller: &Address) -> Result<(), MinterError> {
        caller.require_auth();
        if storage::admin(env)? != *caller {
            log!(env, "caller is not admin", caller.clone());
            return Err(MinterError::NotAuthorized);
        }
        Ok(())
    }

    fn move_to(env: &Env, admin: &Address, to: SaleState) -> Result<SaleState, MinterError> {
        Self::require_admin(env, admin)?;

        let mut ledger = storage::ledger(env)?;
        let state = phase::transition(env, &mut ledger, to);
        storage::set_ledger(env, &ledger);
        Ok(state)
    }

    /// Payment check, quota reservation, then commit.
    fn issue(
        env: &Env,
        config: &MinterConfig,
        ledger: &mut SaleLedger,
        recipient: &Address,
        category: Category,
        quantity: u32,
        payment: i128,
    ) -> Result<UnitRange, MinterError> {
        let expected = config
            .price(category)
            .checked_mul(quantity as i128)
            .ok_or(MinterError::PaymentMismatch)?;
        if payment != expected {
            log!(env, "payment mismatch", payment, expected);
            return Err(MinterError::PaymentMismatch);
        }

        let wallet_minted = storage::minted_by(env, recipient, category);
        let reservation = quota::reserve(
            ledger,
            &QuotaRules::from(config),
            category,
            wallet_minted,
            quantity,
        )?;

        if payment > 0 {
            token::TokenClient::new(env, &config.payment_token).transfer(
                recipient,
                &config.treasury,
                &payment,
            );
        }

        storage::set_minted_by(env, recipient, category, reservation.wallet_minted);
        units::assign(env, recipient, &reservation.range);
        storage::set_ledger(env, ledger);

        UnitsMintedEvent {
            category,
            to: recipient.clone(),
            first: reservation.range.first,
            count: reservation.range.count,
            paid: payment,
        }
        .publish(env);

        Ok(reservation.range)
    }
}
