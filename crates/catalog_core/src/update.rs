use crate::{CycleId, CycleStatus, Effect, Msg, RankParseError, StoreState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: StoreState, msg: Msg) -> (StoreState, Vec<Effect>) {
    let effects = match msg {
        Msg::RefreshRequested => {
            let replacing = state.status() == CycleStatus::Fetching;
            let cycle = state.begin_cycle();
            let mut effects = Vec::with_capacity(1 + usize::from(replacing));
            if replacing {
                effects.push(Effect::CancelInFlight);
            }
            effects.push(Effect::StartFetch { cycle });
            effects
        }
        Msg::FetchSucceeded { cycle, records } => {
            if !is_current(&state, cycle) {
                return (state, Vec::new());
            }
            report(state.publish(records))
        }
        Msg::FetchFailed { cycle, message } => {
            if !is_current(&state, cycle) {
                return (state, Vec::new());
            }
            state.fail(message);
            Vec::new()
        }
        Msg::PolicyChanged(policy) => {
            if policy == state.policy() {
                return (state, Vec::new());
            }
            report(state.set_policy(policy))
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

// Results are only accepted for the cycle that is still fetching.
fn is_current(state: &StoreState, cycle: CycleId) -> bool {
    state.status() == CycleStatus::Fetching && state.cycle() == cycle
}

fn report(rank_failures: Vec<RankParseError>) -> Vec<Effect> {
    if rank_failures.is_empty() {
        Vec::new()
    } else {
        vec![Effect::ReportRankFailures(rank_failures)]
    }
}
