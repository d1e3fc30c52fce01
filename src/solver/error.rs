//! Internal invariant violations. These are bugs in the solver itself, never
//! a consequence of bad input — the loader has already rejected that by the
//! time any of this runs.

use crate::cnf::VarId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvariantError {
    #[error(
        "resolution precondition violated for variable {var}: reason and accumulator clauses \
         must each contain exactly one, opposite-polarity literal of it"
    )]
    ResolutionPrecondition { var: VarId },
}
