//! The clause arena and its literal occurrence index `L`.

use crate::cnf::{Clause, ClauseId, Literal};
use fnv::FnvHasher;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::ops::Index;

type FastHasher = BuildHasherDefault<FnvHasher>;

/// Owns every clause — original and learned — plus a direct-addressed
/// occurrence index: for a literal `lit` over `num_vars` variables, the
/// clauses mentioning it live at `by_literal[offset(lit)]`, where
/// `offset(lit) = lit.value() + num_vars` puts every possible literal value
/// `-num_vars..=num_vars` into `0..=2*num_vars`.
///
/// Clauses are content-identified: adding a clause whose (already
/// canonicalized) literal set matches one already present returns the
/// existing id instead of inserting a duplicate.
#[derive(Debug, Clone)]
pub struct ClauseStore {
    clauses: Vec<Clause>,
    by_literal: Vec<Vec<ClauseId>>,
    by_content: HashMap<Vec<Literal>, ClauseId, FastHasher>,
    num_vars: usize,
}

impl ClauseStore {
    pub fn new(clauses: Vec<Clause>, num_vars: usize) -> Self {
        let mut store = ClauseStore {
            clauses: Vec::new(),
            by_literal: vec![Vec::new(); 2 * num_vars + 1],
            by_content: HashMap::with_hasher(FastHasher::default()),
            num_vars,
        };
        for clause in clauses {
            store.add_clause(clause);
        }
        store
    }

    fn offset(&self, lit: Literal) -> usize {
        if lit.is_positive() {
            lit.var() + self.num_vars
        } else {
            self.num_vars - lit.var()
        }
    }

    /// Inserts `clause`, returning its id. If an equal clause (same literal
    /// set) already exists, returns that clause's id without inserting.
    pub fn add_clause(&mut self, clause: Clause) -> ClauseId {
        if let Some(&id) = self.by_content.get(&clause.literals) {
            return id;
        }

        let id = self.clauses.len();
        for &lit in &clause.literals {
            self.by_literal[self.offset(lit)].push(id);
        }
        self.by_content.insert(clause.literals.clone(), id);
        self.clauses.push(clause);
        id
    }

    pub fn get(&self, id: ClauseId) -> &Clause {
        &self.clauses[id]
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn occurrences(&self, lit: Literal) -> &[ClauseId] {
        &self.by_literal[self.offset(lit)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }
}

impl Index<ClauseId> for ClauseStore {
    type Output = Clause;

    fn index(&self, id: ClauseId) -> &Clause {
        &self.clauses[id]
    }
}
