//! DIMACS CNF parsing and result formatting — the loader collaborator spec.md §6
//! treats as external to the core solver (the core only ever sees an already
//! validated `Vec<Clause>` and a variable count).

use flate2::read::GzDecoder;
use itertools::Itertools;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::cnf::{Clause, Literal};

#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("file {0} not found")]
    FileNotFound(String),
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("file was empty")]
    EmptyFile,
    #[error("invalid DIMACS header: {0:?}")]
    InvalidHeader(String),
    #[error("malformed literal {0:?}")]
    MalformedLiteral(String),
    #[error("last clause must be terminated by 0")]
    UnterminatedClause,
    #[error("header declared {expected} clauses, found {found}")]
    ClauseCountMismatch { expected: usize, found: usize },
    #[error("header declared {expected} variables, but clauses reference up to {found}")]
    VariableCountMismatch { expected: usize, found: usize },
}

pub struct DimacsFile {
    pub num_vars: usize,
    pub clauses: Vec<Clause>,
}

pub fn clauses_from_dimacs_file(path: &str) -> Result<DimacsFile, DimacsError> {
    if !Path::new(path).exists() {
        return Err(DimacsError::FileNotFound(path.to_string()));
    }

    let to_io_err = |source| DimacsError::Io {
        path: path.to_string(),
        source,
    };

    let contents = if path.ends_with(".gz") {
        let file = std::fs::File::open(path).map_err(to_io_err)?;
        let mut decoder = GzDecoder::new(file);
        let mut result_string = String::new();
        decoder
            .read_to_string(&mut result_string)
            .map_err(to_io_err)?;
        result_string
    } else {
        std::fs::read_to_string(path).map_err(to_io_err)?
    };

    clauses_from_dimacs(&contents)
}

pub fn clauses_from_dimacs(input: &str) -> Result<DimacsFile, DimacsError> {
    let lines: Vec<&str> = input
        .lines()
        .filter(|line| !line.starts_with('c'))
        .filter(|line| !line.starts_with('%'))
        .filter(|line| !line.trim().is_empty())
        .collect();

    let header = lines
        .first()
        .ok_or(DimacsError::EmptyFile)?
        .split_whitespace()
        .collect::<Vec<&str>>();

    if header.len() != 4 || header[0] != "p" || header[1] != "cnf" {
        return Err(DimacsError::InvalidHeader(lines[0].to_string()));
    }
    let num_vars: usize = header[2]
        .parse()
        .map_err(|_| DimacsError::InvalidHeader(header.join(" ")))?;
    let num_clauses: usize = header[3]
        .parse()
        .map_err(|_| DimacsError::InvalidHeader(header.join(" ")))?;

    let tokens: Vec<Literal> = lines
        .iter()
        .filter(|line| !line.starts_with('p'))
        .join(" ")
        .split_whitespace()
        .map(|tok| {
            tok.parse::<Literal>()
                .map_err(|_| DimacsError::MalformedLiteral(tok.to_string()))
        })
        .collect::<Result<_, _>>()?;

    // Splitting the token stream on the `0` terminators yields one group per
    // clause plus a trailing group for whatever follows the last terminator,
    // which must be empty (a well-formed file never has trailing literals
    // without a closing 0).
    let mut clauses: Vec<Vec<Literal>> = if tokens.is_empty() {
        Vec::new()
    } else {
        let mut groups: Vec<Vec<Literal>> = tokens
            .split(|lit| lit.var() == 0)
            .map(|group| group.to_vec())
            .collect();
        match groups.last() {
            Some(trailing) if trailing.is_empty() => {
                groups.pop();
            }
            _ => return Err(DimacsError::UnterminatedClause),
        }
        groups
    };

    // The count check is against the number of clauses *declared*, before
    // collapsing duplicates — a file that declares 3 clauses and writes the
    // same one three times still matches `p cnf _ 3`.
    if clauses.len() != num_clauses {
        return Err(DimacsError::ClauseCountMismatch {
            expected: num_clauses,
            found: clauses.len(),
        });
    }

    let max_var = clauses
        .iter()
        .flat_map(|clause| clause.iter().map(|lit| lit.var()))
        .max()
        .unwrap_or(0);

    if max_var > num_vars {
        return Err(DimacsError::VariableCountMismatch {
            expected: num_vars,
            found: max_var,
        });
    }

    // spec.md §6: "Clauses identical as sets collapse." Canonicalize each
    // group first (sorts + dedups its own literals), then drop later groups
    // whose canonical literal set already appeared, keeping first-seen order.
    let mut seen = std::collections::HashSet::new();
    let clauses = std::mem::take(&mut clauses)
        .into_iter()
        .map(Clause::new)
        .filter(|clause| seen.insert(clause.literals.clone()))
        .collect_vec();

    Ok(DimacsFile { clauses, num_vars })
}

/// Renders a solver result as the `s`/`v` lines spec.md §6 mandates. Everything
/// else the CLI prints is diagnostic and goes through other channels.
pub fn solution_to_dimacs(solution: &Option<Vec<Literal>>) -> String {
    match solution {
        None => "s UNSATISFIABLE".to_string(),
        Some(witness) => {
            let body = witness.iter().map(|lit| lit.to_string()).join(" ");
            format!("s SATISFIABLE\nv {} 0", body)
        }
    }
}
