//! Drains the unit queue, assigning the single remaining literal of every
//! clause whose residual is (still) a singleton. Queue entries can go stale
//! — the variable may already be assigned, or the clause may have grown
//! past one remaining literal since it was queued — propagation simply
//! skips those instead of treating them as errors.

use crate::solver::residual::Residual;
use crate::solver::state::State;
use crate::solver::trail::{Reason, Trail};

pub fn propagate(state: &mut State, trail: &mut Trail) {
    while state.propagator.conflict().is_none() {
        let Some(clause_id) = state.propagator.pop_unit() else {
            break;
        };

        let literal = match state.residual(clause_id) {
            Residual::Remaining(lits) if lits.len() == 1 => lits[0],
            _ => continue,
        };

        if state.vars[literal.var()].is_some() {
            continue;
        }

        state.stats.num_propagations += 1;
        trail.assign(
            state,
            literal.var(),
            literal.is_positive(),
            Reason::Clause(clause_id),
        );
    }
}
