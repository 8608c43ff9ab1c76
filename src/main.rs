use std::error::Error;
use std::process;
use std::time::Duration;

use clap::{App, Arg, ArgMatches};
use log::{info, warn};

use sokoban_planner::cache::SolutionCache;
use sokoban_planner::catalog::Catalog;
use sokoban_planner::config::Method;
use sokoban_planner::level::Level;
use sokoban_planner::moves::Moves;
use sokoban_planner::solver::{CancelToken, SolverErr};
use sokoban_planner::{LoadLevel, Solve};

/// Cache key for levels loaded from plain files
const FILES_SET: &str = "files";

struct Options {
    method: Method,
    timeout: Option<Duration>,
    include_steps: bool,
    quiet: bool,
}

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-planner")
        .author("martin-t")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds push sequences for Sokoban levels")
        .arg(
            Arg::with_name("method")
                .short("m")
                .long("method")
                .takes_value(true)
                .possible_values(&["bfs", "hill-climbing", "hybrid-heuristic"])
                .default_value("bfs")
                .help("search strategy"),
        )
        .arg(
            Arg::with_name("timeout")
                .short("t")
                .long("timeout")
                .takes_value(true)
                .value_name("SECS")
                .help("give up on a level after this many seconds"),
        )
        .arg(
            Arg::with_name("cache")
                .short("c")
                .long("cache")
                .takes_value(true)
                .value_name("CACHE")
                .help("JSON file to read and store solutions"),
        )
        .arg(
            Arg::with_name("steps")
                .long("steps")
                .help("print the board after every step, not just after pushes"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("don't print stats and boards"),
        )
        .arg(
            Arg::with_name("file")
                .required(true)
                .help("XSB level, or a JSON catalog with --set"),
        )
        .arg(
            Arg::with_name("set")
                .long("set")
                .takes_value(true)
                .value_name("SET")
                .help("level set in the catalog, solves all its levels without --level"),
        )
        .arg(
            Arg::with_name("level")
                .long("level")
                .takes_value(true)
                .value_name("ID")
                .requires("set")
                .help("level id in the set"),
        )
        .get_matches();

    match run(&matches) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}

/// Returns false if any level timed out
fn run(matches: &ArgMatches<'_>) -> Result<bool, Box<dyn Error>> {
    let options = Options {
        method: matches.value_of("method").unwrap_or("bfs").parse()?,
        timeout: matches
            .value_of("timeout")
            .map(|secs| secs.parse().map(Duration::from_secs))
            .transpose()?,
        include_steps: matches.is_present("steps"),
        quiet: matches.is_present("quiet"),
    };
    let path = matches.value_of("file").ok_or("Missing level file")?;

    let mut cache = match matches.value_of("cache") {
        Some(cache_path) => Some(SolutionCache::open(cache_path)?),
        None => None,
    };

    let mut all_finished = true;
    match matches.value_of("set") {
        None => {
            let level = path.load_level()?;
            all_finished &= process_level(&options, cache.as_mut(), FILES_SET, path, &level)?;
        }
        Some(set) => {
            let catalog = Catalog::load(path)?;
            let ids: Vec<String> = match matches.value_of("level") {
                Some(id) => vec![id.to_owned()],
                None => catalog.levels(set)?.map(str::to_owned).collect(),
            };
            for id in &ids {
                let level = catalog.level(set, id)?;
                all_finished &= process_level(&options, cache.as_mut(), set, id, &level)?;
            }
        }
    }

    if let Some(ref cache) = cache {
        cache.save()?;
    }
    Ok(all_finished)
}

fn process_level(
    options: &Options,
    cache: Option<&mut SolutionCache>,
    set: &str,
    id: &str,
    level: &Level,
) -> Result<bool, Box<dyn Error>> {
    // fall back to a solution found by any method
    let cached = cache.as_ref().and_then(|cache| {
        match cache.get(set, id, options.method) {
            Some(moves) => Some((moves, true)),
            None => cache.get_any(set, id).map(|moves| (moves, false)),
        }
    });
    let cached = cached.and_then(|(moves, same_method)| match level.replay(moves) {
        Ok(_) => Some((moves.clone(), same_method)),
        Err(err) => {
            warn!("Ignoring cached solution of {} {}: {}", set, id, err);
            None
        }
    });
    if let Some((moves, same_method)) = cached {
        if same_method {
            println!("Cached solution of {} using {}:", id, options.method);
        } else {
            println!("Cached solution of {}:", id);
        }
        print_solution(options, level, &moves)?;
        return Ok(true);
    }

    println!("Solving {} using {}...", id, options.method);
    let cancel = match options.timeout {
        Some(timeout) => CancelToken::with_timeout(timeout),
        None => CancelToken::new(),
    };
    let solver_ok = match level.solve(options.method, &cancel) {
        Ok(solver_ok) => solver_ok,
        Err(SolverErr::TimedOut) => {
            eprintln!("{}: {}", id, SolverErr::TimedOut);
            return Ok(false);
        }
    };
    info!("{:?}", solver_ok);

    if !options.quiet {
        println!("{}", solver_ok.stats);
    }
    match solver_ok.solution {
        Some(solution) => {
            println!("Found solution:");
            print_solution(options, level, &solution.moves)?;
            if let Some(cache) = cache {
                cache.insert(set, id, options.method, solution.moves);
            }
        }
        None => println!("No solution"),
    }
    Ok(true)
}

fn print_solution(options: &Options, level: &Level, moves: &Moves) -> Result<(), Box<dyn Error>> {
    if !options.quiet {
        print!("{}", level.format_solution(moves, options.include_steps)?);
    }
    println!("{}", moves);
    println!("Pushes: {}", moves.push_cnt());
    if options.include_steps {
        println!("LURD: {}", level.lurd(moves)?);
    }
    Ok(())
}
