//! Run the waypath search agents on a level and print what they found.
//!
//! Run: cargo run --bin waypath-demo -- [SCENARIO.json] [--strategy bfs|greedy|astar|all]
//!      [--eight] [--seed N]
//!
//! Without a scenario file a random level is generated from the seed.
//! Set `WAYPATH_LOG=debug` to see the search driver's log output.

mod render;
mod scenario;

use std::path::PathBuf;

use log::{info, warn};
use waypath_agents::{AgentConfig, AnyAgent, Connectivity, Plan, StrategyKind};
use waypath_core::TileLevel;

use crate::scenario::{Scenario, random_level};

#[derive(Debug, Default)]
struct Args {
    scenario: Option<PathBuf>,
    strategies: Vec<StrategyKind>,
    eight: bool,
    seed: u64,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--eight" | "-8" => args.eight = true,
            "--strategy" | "-s" => {
                let v = it.next().ok_or("--strategy needs a value")?;
                if v == "all" {
                    args.strategies = StrategyKind::ALL.to_vec();
                } else {
                    args.strategies.push(v.parse().map_err(|e| format!("{e}"))?);
                }
            }
            "--seed" => {
                let v = it.next().ok_or("--seed needs a value")?;
                args.seed = v.parse().map_err(|_| format!("bad seed \u{201c}{v}\u{201d}"))?;
            }
            "--help" | "-h" => {
                return Err(
                    "usage: waypath-demo [SCENARIO.json] [--strategy bfs|greedy|astar|all] \
                     [--eight] [--seed N]"
                        .to_string(),
                );
            }
            _ if arg.starts_with('-') => return Err(format!("unknown flag {arg}")),
            _ => args.scenario = Some(PathBuf::from(arg)),
        }
    }
    Ok(args)
}

fn run_one(level: &TileLevel, config: AgentConfig, kind: StrategyKind) {
    let mut agent = AnyAgent::with_config(level, kind, config);
    let plan = match agent.try_plan() {
        Ok(plan) => plan.clone(),
        Err(e) => {
            warn!("{kind}: {e}");
            return;
        }
    };

    println!("== {agent} ({:?})", agent.connectivity());
    let explored = agent.reachable_states().unwrap_or_default();
    match &plan {
        Plan::Found(path) => println!("path: {} moves", path.len() - 1),
        Plan::NoPath => println!("path: none"),
    }
    println!(
        "tree: depth {} height {} nodes {}",
        agent.tree_depth(),
        agent.tree_height(),
        explored.len()
    );
    if let Some(stats) = agent.stats() {
        println!(
            "search: {} expanded, {} generated, {} replaced, {} dropped, frontier peak {}",
            stats.expanded, stats.generated, stats.replaced, stats.dropped, stats.frontier_high_water
        );
    }
    print!("{}", render::overlay(level, &explored, plan.path()));
    println!();
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("WAYPATH_LOG", "info"))
        .format_timestamp(None)
        .init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let (level, mut config, mut strategies) = match &args.scenario {
        Some(path) => {
            let built = Scenario::load(path).and_then(|sc| {
                let (level, config) = sc.build()?;
                Ok((level, config, sc.strategies))
            });
            match built {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => match random_level(args.seed, waypath_agents::DEFAULT_STEP) {
            Ok((level, start, goal)) => {
                info!("random level, seed {}", args.seed);
                let config = AgentConfig {
                    start: Some(start),
                    goal: Some(goal),
                    ..AgentConfig::default()
                };
                (level, config, Vec::new())
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
    };

    if args.eight {
        config.connectivity = Connectivity::Eight;
    }
    if !args.strategies.is_empty() {
        strategies = args.strategies;
    }
    if strategies.is_empty() {
        strategies = StrategyKind::ALL.to_vec();
    }

    for kind in strategies {
        run_one(&level, config, kind);
    }
}
