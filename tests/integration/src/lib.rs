#![no_std]

// Integration test crate - all code is test-only

#[cfg(test)]
mod tests {
    extern crate std;
    use soroban_sdk::{
        testutils::Address as _,
        token::{StellarAssetClient, TokenClient},
        Address, Env,
    };
    use std::vec::Vec as StdVec;

    use allowlist_minter::{
        AllowlistKind, AllowlistMinterClient, CapacityReport, Category, CategoryCaps, HolderGate,
        MinterConfig, MinterError, SaleState, UnitRange,
    };
    use sorted_merkle::tree::MerkleTree;

    const UNIT: i128 = 10_000_000;
    const PRIVATE_PRICE: i128 = UNIT * 4 / 100;
    const PUBLIC_PRICE: i128 = UNIT * 5 / 100;

    /// Helper to set up a 500-unit sale with a payment token, a DIP holding
    /// token for the gate and ten wallets on each allowlist.
    struct SaleSystem {
        env: Env,
        minter: Address,
        payment: Address,
        dip: Address,
        admin: Address,
        treasury: Address,
        dip_holders: StdVec<Address>,
        adopters: StdVec<Address>,
        dip_tree: MerkleTree,
        adopter_tree: MerkleTree,
    }

    impl SaleSystem {
        fn new() -> Self {
            let env = Env::default();
            env.mock_all_auths();
            env.cost_estimate().budget().reset_unlimited();

            let admin = Address::generate(&env);
            let treasury = Address::generate(&env);
            let payment = env
                .register_stellar_asset_contract_v2(Address::generate(&env))
                .address();
            let dip = env
                .register_stellar_asset_contract_v2(Address::generate(&env))
                .address();

            let config = MinterConfig {
                max_supply: 500,
                payment_token: payment.clone(),
                treasury: treasury.clone(),
                dip_holder_price: PRIVATE_PRICE,
                adopter_price: PRIVATE_PRICE,
                public_price: PUBLIC_PRICE,
                private_wallet_cap: 3,
                public_wallet_cap: None,
                category_caps: CategoryCaps {
                    dip_holder: Some(30),
                    adopter: Some(25),
                    public: None,
                    reserved: Some(20),
                },
                enforce_category_caps: true,
                lock_roots_during_sale: false,
                holder_gate: Some(HolderGate {
                    token: dip.clone(),
                    min_balance: 30 * UNIT,
                }),
            };

            // Register with CAP-0058 constructor
            let minter = env.register(allowlist_minter::AllowlistMinter, (admin.clone(), config));

            let dip_holders: StdVec<Address> = (0..10).map(|_| Address::generate(&env)).collect();
            let adopters: StdVec<Address> = (0..10).map(|_| Address::generate(&env)).collect();
            let dip_tree = MerkleTree::from_identities(&env, &dip_holders);
            let adopter_tree = MerkleTree::from_identities(&env, &adopters);

            let system = Self {
                env,
                minter,
                payment,
                dip,
                admin,
                treasury,
                dip_holders,
                adopters,
                dip_tree,
                adopter_tree,
            };
            for wallet in system.dip_holders.iter().chain(system.adopters.iter()) {
                system.fund(wallet, UNIT);
            }
            system
        }

        fn minter_client(&self) -> AllowlistMinterClient {
            AllowlistMinterClient::new(&self.env, &self.minter)
        }

        fn payment_client(&self) -> TokenClient {
            TokenClient::new(&self.env, &self.payment)
        }

        fn fund(&self, wallet: &Address, amount: i128) {
            StellarAssetClient::new(&self.env, &self.payment).mint(wallet, &amount);
        }

        fn give_dip(&self, wallet: &Address, amount: i128) {
            StellarAssetClient::new(&self.env, &self.dip).mint(wallet, &amount);
        }

        fn mint_dip_holder(&self, index: usize, quantity: u32) -> Result<UnitRange, MinterError> {
            let wallet = &self.dip_holders[index];
            self.try_private(wallet, &self.dip_tree, AllowlistKind::DipHolder, quantity)
        }

        fn mint_adopter(&self, index: usize, quantity: u32) -> Result<UnitRange, MinterError> {
            let wallet = &self.adopters[index];
            self.try_private(wallet, &self.adopter_tree, AllowlistKind::Adopter, quantity)
        }

        fn try_private(
            &self,
            wallet: &Address,
            tree: &MerkleTree,
            kind: AllowlistKind,
            quantity: u32,
        ) -> Result<UnitRange, MinterError> {
            let proof = tree.proof_for(wallet).unwrap();
            let payment = PRIVATE_PRICE * quantity as i128;
            match self
                .minter_client()
                .try_mint_private(wallet, &quantity, &proof, &kind, &payment)
            {
                Ok(Ok(range)) => Ok(range),
                Err(Ok(err)) => Err(err),
                other => panic!("unexpected invocation result: {:?}", other),
            }
        }
    }

    #[test]
    fn test_full_sale_lifecycle() {
        let system = SaleSystem::new();
        let minter = system.minter_client();

        minter.set_roots(
            &system.admin,
            &system.dip_tree.root(),
            &system.adopter_tree.root(),
        );
        minter.start_private_sale(&system.admin);

        // Holders 1 and 2 never acquired the DIP holding minimum.
        for index in [0usize, 3, 4, 5, 6, 7, 8, 9] {
            system.give_dip(&system.dip_holders[index], 30 * UNIT);
        }

        assert_eq!(
            system.mint_dip_holder(0, 3),
            Ok(UnitRange { first: 1, count: 3 })
        );
        assert_eq!(system.mint_dip_holder(0, 1), Err(MinterError::QuotaExceeded));
        assert_eq!(system.mint_dip_holder(1, 3), Err(MinterError::NotAuthorized));
        assert_eq!(system.mint_dip_holder(2, 1), Err(MinterError::NotAuthorized));
        for index in 3..10 {
            system.mint_dip_holder(index, 3).unwrap();
        }
        assert_eq!(minter.category_total(&Category::DipHolder), 24);

        // Giveaway during the private sale.
        let giveaway = Address::generate(&system.env);
        assert_eq!(
            minter.reserve_mint(&system.admin, &giveaway, &20),
            UnitRange {
                first: 25,
                count: 20
            }
        );

        for index in 1..9 {
            system.mint_adopter(index, 3).unwrap();
        }
        assert_eq!(minter.category_total(&Category::Adopter), 24);

        // The adopter pool has one unit left.
        assert_eq!(system.mint_adopter(0, 3), Err(MinterError::QuotaExceeded));
        system.mint_adopter(0, 1).unwrap();
        assert_eq!(system.mint_adopter(9, 1), Err(MinterError::QuotaExceeded));
        assert_eq!(minter.total_supply(), 69);

        // Private proofs are rejected once public.
        minter.start_public_sale(&system.admin);
        assert_eq!(system.mint_dip_holder(9, 1), Err(MinterError::WrongPhase));

        let mut last_buyer = None;
        for _ in 0..86 {
            let buyer = Address::generate(&system.env);
            system.fund(&buyer, UNIT);
            minter.mint_public(&buyer, &5, &(5 * PUBLIC_PRICE));
            last_buyer = Some(buyer);
        }
        assert_eq!(minter.total_supply(), 499);

        let closer = Address::generate(&system.env);
        system.fund(&closer, UNIT);
        assert_eq!(
            minter.try_mint_public(&closer, &2, &(2 * PUBLIC_PRICE)),
            Err(Ok(MinterError::QuotaExceeded))
        );
        assert_eq!(
            minter.mint_public(&closer, &1, &PUBLIC_PRICE),
            UnitRange {
                first: 500,
                count: 1
            }
        );

        assert_eq!(
            minter.remaining_capacity(),
            CapacityReport {
                dip_holder: 6,
                adopter: 0,
                public: 0,
                reserved: 0,
                total_minted: 500,
                max_supply: 500,
                phase: SaleState::PublicSale,
            }
        );

        // Sold out: nothing more in any phase.
        assert_eq!(
            minter.try_mint_public(&closer, &1, &PUBLIC_PRICE),
            Err(Ok(MinterError::QuotaExceeded))
        );
        minter.start_private_sale(&system.admin);
        assert_eq!(system.mint_dip_holder(0, 1), Err(MinterError::QuotaExceeded));
        assert_eq!(
            minter.try_reserve_mint(&system.admin, &giveaway, &1),
            Err(Ok(MinterError::QuotaExceeded))
        );

        // Ownership and proceeds.
        assert_eq!(minter.owner_of(&1), Some(system.dip_holders[0].clone()));
        assert_eq!(minter.owner_of(&44), Some(giveaway.clone()));
        assert_eq!(minter.owner_of(&499), last_buyer);
        assert_eq!(minter.owner_of(&500), Some(closer.clone()));
        assert_eq!(minter.balance_of(&giveaway), 20);

        let private_units = 24 + 25;
        let public_units = 431;
        assert_eq!(
            system.payment_client().balance(&system.treasury),
            private_units * PRIVATE_PRICE + public_units * PUBLIC_PRICE
        );
    }

    #[test]
    fn test_roots_rotate_between_phases() {
        let system = SaleSystem::new();
        let minter = system.minter_client();
        let newcomer = Address::generate(&system.env);
        system.fund(&newcomer, UNIT);

        minter.set_roots(
            &system.admin,
            &system.dip_tree.root(),
            &system.adopter_tree.root(),
        );
        minter.start_private_sale(&system.admin);

        let mut expanded = system.adopters.clone();
        expanded.push(newcomer.clone());
        let expanded_tree = MerkleTree::from_identities(&system.env, &expanded);
        let proof = expanded_tree.proof_for(&newcomer).unwrap();

        assert!(!minter.verify_membership(&newcomer, &proof, &AllowlistKind::Adopter));
        minter.set_roots(&system.admin, &system.dip_tree.root(), &expanded_tree.root());
        assert!(minter.verify_membership(&newcomer, &proof, &AllowlistKind::Adopter));

        minter.mint_private(
            &newcomer,
            &2,
            &proof,
            &AllowlistKind::Adopter,
            &(2 * PRIVATE_PRICE),
        );
        assert_eq!(minter.minted_by(&newcomer, &Category::Adopter), 2);

        // Proofs against the old tree no longer verify for its members
        // whose path changed.
        let old = &system.adopters[0];
        let stale = system.adopter_tree.proof_for(old).unwrap();
        let fresh = expanded_tree.proof_for(old).unwrap();
        if stale != fresh {
            assert!(!minter.verify_membership(old, &stale, &AllowlistKind::Adopter));
        }
        assert!(minter.verify_membership(old, &fresh, &AllowlistKind::Adopter));
    }
}
