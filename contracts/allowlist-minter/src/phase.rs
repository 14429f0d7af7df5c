use soroban_sdk::{log, Env};

use crate::events::PhaseChangedEvent;
use crate::storage::SaleLedger;
use crate::types::{MinterError, SaleState};

/// Gate an operation on the current phase.
pub fn require(env: &Env, ledger: &SaleLedger, expected: SaleState) -> Result<(), MinterError> {
    if ledger.phase != expected {
        log!(env, "wrong phase", ledger.phase as u32, expected as u32);
        return Err(MinterError::WrongPhase);
    }
    Ok(())
}

/// Move to `to` from any phase, including backwards.
pub fn transition(env: &Env, ledger: &mut SaleLedger, to: SaleState) -> SaleState {
    let from = ledger.phase;
    ledger.phase = to;
    PhaseChangedEvent { from, to }.publish(env);
    to
}
