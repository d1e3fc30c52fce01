use satori::cnf::check_assignment;
use satori::dimacs::clauses_from_dimacs;
use satori::solver::config::Config;
use satori::solver::Solver;

fn solve_dimacs(input: &str) -> (Vec<satori::cnf::Clause>, satori::cnf::Solution) {
    let dimacs = clauses_from_dimacs(input).expect("well-formed DIMACS");
    let clauses = dimacs.clauses.clone();
    let mut solver = Solver::new(dimacs.clauses, dimacs.num_vars, Config::default());
    (clauses, solver.solve())
}

/// S1: a single positive unit clause is trivially satisfiable.
#[test]
fn s1_single_unit_clause() {
    let (_, solution) = solve_dimacs("p cnf 1 1\n1 0\n");
    assert_eq!(solution, Some(vec![satori::cnf::Literal::new(1)]));
}

/// S2: a variable and its negation both asserted as units is unsatisfiable.
#[test]
fn s2_contradictory_units() {
    let (_, solution) = solve_dimacs("p cnf 1 2\n1 0\n-1 0\n");
    assert_eq!(solution, None);
}

/// S3: a chain of implications propagates to a full satisfying assignment
/// without any decisions.
#[test]
fn s3_propagation_chain_needs_no_decisions() {
    let (clauses, solution) = solve_dimacs("p cnf 3 3\n1 0\n-1 2 0\n-2 3 0\n");
    let witness = solution.expect("satisfiable");
    assert!(check_assignment(&clauses, &witness));
    assert!(witness.contains(&satori::cnf::Literal::new(1)));
    assert!(witness.contains(&satori::cnf::Literal::new(2)));
    assert!(witness.contains(&satori::cnf::Literal::new(3)));
}

/// S4: no unit clauses at all — the heuristic must branch to make progress.
#[test]
fn s4_pure_branching_instance() {
    let (clauses, solution) =
        solve_dimacs("p cnf 2 3\n1 2 0\n-1 2 0\n1 -2 0\n");
    let witness = solution.expect("satisfiable");
    assert!(check_assignment(&clauses, &witness));
}

/// S5: two pigeons demanding the same single hole — unsatisfiable, and only
/// reachable by deriving a conflict and learning from it.
#[test]
fn s5_pigeonhole_requires_conflict_learning() {
    let (_, solution) = solve_dimacs("p cnf 2 3\n1 0\n2 0\n-1 -2 0\n");
    assert_eq!(solution, None);
}

/// S6: a four-variable instance mixing units, implications, and a
/// multi-literal clause that must eventually be satisfied by branching.
#[test]
fn s6_mixed_instance() {
    let (clauses, solution) = solve_dimacs(
        "p cnf 4 5\n1 0\n-1 2 3 0\n-2 4 0\n-3 4 0\n-4 1 0\n",
    );
    let witness = solution.expect("satisfiable");
    assert!(check_assignment(&clauses, &witness));
}

/// A formula declaring itself empty (0 clauses) is vacuously satisfiable.
#[test]
fn empty_formula_is_satisfiable() {
    let (_, solution) = solve_dimacs("p cnf 0 0\n");
    assert_eq!(solution, Some(vec![]));
}

/// A bare empty clause is unsatisfiable regardless of anything else declared.
#[test]
fn directly_declared_empty_clause_is_unsat() {
    let (_, solution) = solve_dimacs("p cnf 1 1\n0\n");
    assert_eq!(solution, None);
}

/// Duplicate literals and duplicate clauses collapse as sets; solving still
/// behaves as if the formula had been written without the repetition.
#[test]
fn duplicate_literals_and_clauses_do_not_change_the_answer() {
    let (clauses, solution) =
        solve_dimacs("p cnf 2 3\n1 1 2 0\n1 2 0\n-1 2 0\n");
    assert_eq!(clauses.len(), 2, "the two copies of `1 2` collapse to one clause");
    let witness = solution.expect("satisfiable");
    assert!(check_assignment(&clauses, &witness));
}

/// Restart policy choice must not change whether a formula is SAT or UNSAT
/// (property 7: restart neutrality).
#[test]
fn restart_policy_does_not_affect_the_verdict() {
    use satori::solver::restart::RestartPolicy;

    let input = "p cnf 4 5\n1 0\n-1 2 3 0\n-2 4 0\n-3 4 0\n-4 1 0\n";
    for policy in [
        RestartPolicy::FixedInterval,
        RestartPolicy::Geometric,
        RestartPolicy::Luby,
        RestartPolicy::NoRestarts,
    ] {
        let dimacs = clauses_from_dimacs(input).unwrap();
        let mut solver = Solver::new(
            dimacs.clauses.clone(),
            dimacs.num_vars,
            Config::new(policy, 1),
        );
        let solution = solver.solve();
        assert!(solution.is_some(), "formula is satisfiable under every policy");
        assert!(check_assignment(&dimacs.clauses, &solution.unwrap()));
    }
}
