//! The decision heuristic: spec.md §4.5's static occurrence-count rule.
//! Unlike VSIDS-style heuristics there is no activity bumping or decay —
//! every decision recomputes occurrence counts straight from the current
//! occurrence index.

use crate::cnf::Literal;
use crate::solver::state::State;

/// Picks the unassigned variable maximizing `max(|L[+v]|, |L[-v]|)`,
/// breaking ties toward the smallest variable id, with polarity `true` iff
/// `|L[+v]| >= |L[-v]|`. Returns `None` if every variable is assigned.
pub fn choose(state: &State) -> Option<Literal> {
    (1..=state.num_vars)
        .filter(|&var| state.vars[var].is_none())
        .map(|var| {
            let pos = state.store.occurrences(Literal::from_var(var, true)).len();
            let neg = state.store.occurrences(Literal::from_var(var, false)).len();
            (var, pos, neg)
        })
        .max_by_key(|&(var, pos, neg)| (pos.max(neg), std::cmp::Reverse(var)))
        .map(|(var, pos, neg)| Literal::from_var(var, pos >= neg))
}
