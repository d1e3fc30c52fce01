//! Conflict-driven clause learning: given a clause whose residual just went
//! empty, derive a new clause implied by the formula that rules out the
//! assignment that led to the conflict.
//!
//! This is a single reverse pass over the trail (spec.md §4.4), not the
//! first-UIP early-stopping scan a watched-literal solver uses: every
//! implied (non-decision) trail entry touching the clause-under-construction
//! gets resolved away in trail order, and the pass only stops once the
//! clause stabilizes.

use crate::cnf::{Clause, ClauseId, Literal, VarId};
use crate::solver::clause_store::ClauseStore;
use crate::solver::error::InvariantError;
use crate::solver::trail::{Reason, Trail};

/// Resolves `c` and `d` on `var`: `c` must contain exactly one of `var`'s two
/// literals, `d` the other. The result is their union minus both of those.
pub fn resolve(c: &[Literal], d: &[Literal], var: VarId) -> Result<Vec<Literal>, InvariantError> {
    let pos = Literal::from_var(var, true);
    let neg = Literal::from_var(var, false);

    let (c_lit, d_lit) = if c.contains(&pos) {
        (pos, neg)
    } else if c.contains(&neg) {
        (neg, pos)
    } else {
        return Err(InvariantError::ResolutionPrecondition { var });
    };

    if !d.contains(&d_lit) {
        return Err(InvariantError::ResolutionPrecondition { var });
    }

    let mut result: Vec<Literal> = c.iter().copied().filter(|lit| *lit != c_lit).collect();
    for &lit in d {
        if lit != d_lit && !result.contains(&lit) {
            result.push(lit);
        }
    }
    Ok(result)
}

/// Derives the learned clause for the conflict at `conflict_id`, per
/// spec.md §4.4: starting from the conflicting clause's literals, walk the
/// trail from most to least recent, resolving away every implied variable
/// the accumulator still mentions. Decisions are never resolved away — they
/// are what the learned clause ultimately rules out.
pub fn analyze(
    trail: &Trail,
    store: &ClauseStore,
    conflict_id: ClauseId,
) -> Result<Vec<Literal>, InvariantError> {
    let mut learned: Vec<Literal> = store.get(conflict_id).literals.clone();

    for entry in trail.iter().rev() {
        let reason_id = match entry.reason {
            Reason::Clause(id) => id,
            Reason::Decision => continue,
        };

        let lit = Literal::from_var(entry.var, entry.value);
        if !learned.contains(&lit) && !learned.contains(&-lit) {
            continue;
        }

        learned = resolve(&store.get(reason_id).literals, &learned, entry.var)?;
    }

    Ok(Clause::new(learned).literals)
}

/// True once removing every literal falsified by `vars` leaves exactly one
/// literal in `clause` — the backtracking target spec.md §9's pop-until-unit
/// strategy pops down to.
pub fn is_unit_under(clause: &[Literal], vars: &[Option<bool>]) -> bool {
    clause.iter().filter(|lit| !lit.is_false(vars)).count() == 1
}
