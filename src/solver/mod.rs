pub mod clause_store;
pub mod config;
pub mod conflict_analysis;
pub mod error;
pub mod heuristic;
pub mod propagation;
pub mod residual;
pub mod restart;
pub mod state;
pub mod statistics;
pub mod trail;

use crate::cnf::{Clause, Solution};
use crate::solver::config::Config;
use crate::solver::conflict_analysis::is_unit_under;
use crate::solver::propagation::propagate;
use crate::solver::restart::Restarter;
use crate::solver::state::State;
use crate::solver::statistics::StateStatistics;
use crate::solver::trail::{Reason, Trail};

/// Drives the search spec.md §4.5 describes: propagate to fixpoint, then
/// either report a solution, learn from a conflict, restart, or branch.
pub struct Solver {
    config: Config,
    state: State,
}

impl Solver {
    pub fn new(clauses: Vec<Clause>, num_vars: usize, config: Config) -> Self {
        Solver {
            state: State::new(clauses, num_vars),
            config,
        }
    }

    pub fn solve(&mut self) -> Solution {
        self.state.stats.start_timing();

        let mut trail = Trail::default();
        let mut restarter =
            Restarter::new(self.config.restart_policy, self.config.restart_interval);

        let result = loop {
            propagate(&mut self.state, &mut trail);

            if let Some(conflict_id) = self.state.propagator.take_conflict() {
                self.state.stats.num_conflicts += 1;
                restarter.conflict();

                if trail.is_empty() {
                    break None;
                }

                let learned = conflict_analysis::analyze(&trail, &self.state.store, conflict_id)
                    .unwrap_or_else(|err| panic!("{err}"));

                if learned.is_empty() {
                    break None;
                }

                while !is_unit_under(&learned, &self.state.vars) {
                    trail
                        .pop(&mut self.state)
                        .expect("learned clause never became unit while backtracking");
                }

                self.state.learn_clause(Clause { literals: learned });
                self.state.stats.num_learned_clauses += 1;
            } else if self.state.is_satisfied() {
                break Some(trail.witness());
            } else if restarter.check_if_restart_necessary() {
                self.state.stats.num_restarts += 1;
                while !trail.is_empty() {
                    trail.pop(&mut self.state);
                }
            } else {
                let decision = heuristic::choose(&self.state)
                    .expect("formula not satisfied but every variable is assigned");
                self.state.stats.num_decisions += 1;
                trail.assign(
                    &mut self.state,
                    decision.var(),
                    decision.is_positive(),
                    Reason::Decision,
                );
            }
        };

        self.state.stats.stop_timing();
        result
    }

    pub fn stats(&self) -> &StateStatistics {
        &self.state.stats
    }
}
