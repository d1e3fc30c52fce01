use clap::Parser;
use colored::Colorize;
use satori::cnf::{check_assignment, Clause};
use satori::dimacs::{clauses_from_dimacs_file, solution_to_dimacs};
use satori::solver::config::Config;
use satori::solver::restart::RestartPolicy;
use satori::solver::statistics::StateStatistics;
use satori::solver::Solver;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a DIMACS CNF file (`.gz` is transparently decompressed).
    #[arg(index = 1)]
    file: Option<String>,

    /// Also write the `s`/`v` result to this path.
    #[arg(short, long)]
    out: Option<String>,

    /// Print only the `s`/`v` lines, no banner or statistics table.
    #[arg(short, long)]
    quiet: bool,

    #[arg(long, default_value = "fixed-interval")]
    restart_policy: RestartPolicy,

    #[arg(long, default_value_t = satori::solver::restart::DEFAULT_FIXED_INTERVAL)]
    restart_interval: usize,
}

fn main() {
    let args = Args::parse();

    let Some(path) = args.file.as_ref() else {
        std::process::exit(1);
    };

    let dimacs = match clauses_from_dimacs_file(path) {
        Ok(dimacs) => dimacs,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let config = Config::new(args.restart_policy, args.restart_interval);
    let mut solver = Solver::new(dimacs.clauses.clone(), dimacs.num_vars, config);
    let solution = solver.solve();

    let output = render(&args, &dimacs.clauses, &solution, solver.stats());
    println!("{output}");

    if let Some(out_path) = &args.out {
        if let Err(err) = std::fs::write(out_path, solution_to_dimacs(&solution)) {
            eprintln!("error writing {out_path}: {err}");
            std::process::exit(1);
        }
    }
}

fn render(
    args: &Args,
    clauses: &[Clause],
    solution: &Option<Vec<satori::cnf::Literal>>,
    stats: &StateStatistics,
) -> String {
    let verdict_line = solution_to_dimacs(solution);

    if args.quiet {
        return verdict_line;
    }

    let banner = match solution {
        Some(_) => "SATISFIABLE".green().bold(),
        None => "UNSATISFIABLE".red().bold(),
    };

    let mut diagnostics = format!("{BANNER}\n{banner}\n\n{}\n", stats.to_table());
    if let Some(witness) = solution {
        diagnostics.push_str(if check_assignment(clauses, witness) {
            "solution verified\n"
        } else {
            "WRONG SOLUTION\n"
        });
    }
    let diagnostics = diagnostics.replace('\n', "\nc ");

    format!("c {diagnostics}\n{verdict_line}")
}

const BANNER: &str = r#"
  ___  __ _| |_ ___  _ __(_)
 / __|/ _` | __/ _ \| '__| |
 \__ \ (_| | || (_) | |  | |
 |___/\__,_|\__\___/|_|  |_|
"#;
