//! The game state reducer: a pure `(state, action) -> state` transition
//! function enforcing every rule of the run.
//!
//! Illegal-for-current-state actions return the state moved back unchanged.
//! Affordability failures also change nothing but append one explanatory log
//! line. All randomness is threaded through the state's own RNG cursor.

use tracing::debug;

use crate::action::{GameAction, UpgradeKind};
use crate::module::{Module, ModuleId, ModuleKind};
use crate::rng;
use crate::state::{
    BankReason, GameMode, GameState, GameStatus, RoundSnapshot, RoundStatus,
    INSTABILITY_COST_STEP, SLOT_CAPACITY_COST_STEP,
};

/// Apply one action to the state, producing the next state.
pub fn reduce(state: GameState, action: GameAction) -> GameState {
    match action {
        GameAction::DrawModule => draw_module(state),
        GameAction::StopAndBank => stop_and_bank(state),
        GameAction::BuyModule { kind } => buy_module(state, kind),
        GameAction::BuyUpgrade { kind } => buy_upgrade(state, kind),
        GameAction::StartNextRound => start_next_round(state),
        GameAction::NewRun {
            seed,
            mode,
            daily_date,
        } => GameState::with_options(seed, mode.unwrap_or(GameMode::Seeded), daily_date),
    }
}

/// Fisher-Yates shuffle of the discard under the state's RNG cursor; the
/// result becomes the new bag.
fn reshuffle(discard: Vec<Module>, cursor: u32) -> (Vec<Module>, u32) {
    let mut bag = discard;
    let mut cursor = cursor;
    for i in (1..bag.len()).rev() {
        let (j, next_cursor) = rng::next_index(cursor, i + 1);
        cursor = next_cursor;
        bag.swap(i, j);
    }
    (bag, cursor)
}

/// Remove a uniformly chosen module from the bag, preserving the relative
/// order of the remainder.
fn draw_one(bag: &mut Vec<Module>, cursor: u32) -> (Module, u32) {
    let (index, next_cursor) = rng::next_index(cursor, bag.len());
    (bag.remove(index), next_cursor)
}

fn draw_module(mut state: GameState) -> GameState {
    if state.status != GameStatus::Playing || state.round_status != RoundStatus::Drawing {
        return state;
    }

    if state.bag.is_empty() && !state.discard.is_empty() {
        let discard = std::mem::take(&mut state.discard);
        let (bag, cursor) = reshuffle(discard, state.rng_state);
        state.bag = bag;
        state.rng_state = cursor;
        state.push_log("Reshuffled discard into bag.".to_string());
    }

    if state.bag.is_empty() {
        state.push_log("No modules available to draw.".to_string());
        return state;
    }

    let (drawn, cursor) = draw_one(&mut state.bag, state.rng_state);
    state.rng_state = cursor;
    state.round_flux += drawn.gen_flux;
    state.round_credits += drawn.gen_credits;
    state.round_instability += drawn.add_instability;
    debug!(
        kind = ?drawn.kind,
        instability = state.round_instability,
        threshold = state.instability_threshold,
        "module drawn"
    );
    state.push_log(format!(
        "Drew {}. Round totals: {} flux, {} credits, instability {}/{}.",
        drawn.name,
        state.round_flux,
        state.round_credits,
        state.round_instability,
        state.instability_threshold
    ));
    state.active_pile.push(drawn);

    // Capacity is checked before instability; a draw triggering both counts
    // as a successful auto-bank.
    if state.active_pile.len() >= state.slot_capacity {
        return bank_round(state, BankReason::AutoCapacity);
    }
    if state.round_instability >= state.instability_threshold {
        return bust_round(state);
    }
    state
}

fn stop_and_bank(state: GameState) -> GameState {
    if state.status != GameStatus::Playing || state.round_status != RoundStatus::Drawing {
        return state;
    }
    bank_round(state, BankReason::Manual)
}

/// End the round successfully: move round resources into the banked totals,
/// record the snapshot, then evaluate the win condition.
fn bank_round(mut state: GameState, reason: BankReason) -> GameState {
    let round_number = state.rounds + 1;
    let warp_banked = state
        .active_pile
        .iter()
        .filter(|module| module.is_warp_core)
        .count() as u32;
    let drawn = std::mem::take(&mut state.active_pile);

    let snapshot = RoundSnapshot {
        number: round_number,
        status: RoundStatus::Stopped,
        bank_reason: Some(reason),
        drawn: drawn.clone(),
        round_flux: state.round_flux,
        round_credits: state.round_credits,
        round_instability: state.round_instability,
    };

    state.rounds = round_number;
    state.banked_flux += state.round_flux;
    state.banked_credits += state.round_credits;
    match reason {
        BankReason::Manual => state.push_log(format!(
            "Banked round {}: +{} flux, +{} credits.",
            round_number, state.round_flux, state.round_credits
        )),
        BankReason::AutoCapacity => state.push_log(format!(
            "Slot capacity reached. Auto-banked round {}: +{} flux, +{} credits.",
            round_number, state.round_flux, state.round_credits
        )),
    }
    debug!(
        round = round_number,
        reason = ?reason,
        flux = state.round_flux,
        credits = state.round_credits,
        "round banked"
    );

    state.round_flux = 0;
    state.round_credits = 0;
    state.round_instability = 0;
    state.last_discarded = drawn.clone();
    state.discard.extend(drawn);
    state.round_status = RoundStatus::Stopped;
    state.last_round = Some(snapshot);

    apply_win_check(state, warp_banked, round_number)
}

/// End the round in a meltdown: unbanked round resources are forfeited and
/// the pile moves to the discard.
fn bust_round(mut state: GameState) -> GameState {
    let round_number = state.rounds + 1;
    let drawn = std::mem::take(&mut state.active_pile);

    let snapshot = RoundSnapshot {
        number: round_number,
        status: RoundStatus::Busted,
        bank_reason: None,
        drawn: drawn.clone(),
        round_flux: state.round_flux,
        round_credits: state.round_credits,
        round_instability: state.round_instability,
    };

    state.push_log(format!(
        "Round {} meltdown: instability {}/{}. Lost unbanked rewards ({} flux, {} credits).",
        round_number,
        state.round_instability,
        state.instability_threshold,
        state.round_flux,
        state.round_credits
    ));
    debug!(
        round = round_number,
        instability = state.round_instability,
        "round busted"
    );

    state.rounds = round_number;
    state.volatility_exceeded_count += 1;
    state.round_flux = 0;
    state.round_credits = 0;
    state.round_instability = 0;
    state.last_discarded = drawn.clone();
    state.discard.extend(drawn);
    state.round_status = RoundStatus::Busted;
    state.last_round = Some(snapshot);
    state
}

fn apply_win_check(mut state: GameState, warp_banked: u32, round_number: u32) -> GameState {
    if warp_banked < state.warp_core_target {
        return state;
    }
    state.status = GameStatus::Won;
    state.score = Some(state.rounds);
    state.push_log(format!(
        "Warp protocol complete: banked {}/{} warp cores in round {}.",
        warp_banked, state.warp_core_target, round_number
    ));
    debug!(score = state.rounds, "run won");
    state
}

fn buy_module(mut state: GameState, kind: ModuleKind) -> GameState {
    if state.status != GameStatus::Playing || state.round_status == RoundStatus::Drawing {
        return state;
    }

    let cost_flux = kind.cost_flux();
    let cost_credits = kind.cost_credits();
    if state.banked_flux < cost_flux || state.banked_credits < cost_credits {
        state.push_log(format!("Not enough resources for {}.", kind.display_name()));
        return state;
    }

    state.banked_flux -= cost_flux;
    state.banked_credits -= cost_credits;
    let module = Module::new(kind, ModuleId(state.next_module_id));
    state.next_module_id += 1;
    state.push_log(format!("Purchased {} for {} flux.", module.name, cost_flux));
    debug!(kind = ?kind, id = module.id.0, "module purchased");
    state.bag.push(module);
    state
}

fn buy_upgrade(mut state: GameState, kind: UpgradeKind) -> GameState {
    if state.status != GameStatus::Playing || state.round_status == RoundStatus::Drawing {
        return state;
    }

    match kind {
        UpgradeKind::SlotCapacity => {
            let cost = state.next_slot_capacity_cost;
            if state.banked_credits < cost {
                state.push_log(format!(
                    "Not enough credits for slot capacity upgrade (cost {cost})."
                ));
                return state;
            }
            state.banked_credits -= cost;
            state.slot_capacity += 1;
            state.next_slot_capacity_cost += SLOT_CAPACITY_COST_STEP;
            state.push_log(format!("Upgraded slot capacity to {}.", state.slot_capacity));
        }
        UpgradeKind::InstabilityThreshold => {
            let cost = state.next_instability_cost;
            if state.banked_credits < cost {
                state.push_log(format!(
                    "Not enough credits for instability threshold upgrade (cost {cost})."
                ));
                return state;
            }
            state.banked_credits -= cost;
            state.instability_threshold += 1;
            state.next_instability_cost += INSTABILITY_COST_STEP;
            state.push_log(format!(
                "Upgraded instability threshold to {}.",
                state.instability_threshold
            ));
        }
    }
    debug!(kind = ?kind, "upgrade purchased");
    state
}

fn start_next_round(mut state: GameState) -> GameState {
    if state.status != GameStatus::Playing || state.round_status == RoundStatus::Drawing {
        return state;
    }

    // The discard is recycled as-is; shuffling happens lazily on the next
    // empty-bag draw.
    let recycled = std::mem::take(&mut state.discard);
    state.bag.extend(recycled);
    state.round_status = RoundStatus::Drawing;
    state.push_log(format!("Starting round {}.", state.rounds + 1));
    state
}
