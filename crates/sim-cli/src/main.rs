use std::env;

use contracts::{EngagementReport, SimConfig};
use sim_core::SimWorld;

fn print_usage() {
    println!("sim-cli <command>");
    println!("commands:");
    println!("  run <run_id> [seed] [minutes] [population]");
    println!("    runs the simulation and prints the engagement report");
    println!("    pass '-' for the seed to get a different outcome every run");
    println!("  run-json <run_id> [seed] [minutes] [population]");
    println!("    same run, report emitted as JSON on stdout");
    println!("  config");
    println!("    prints the default configuration as JSON");
}

fn parse_u64(value: &str, label: &str) -> Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|_| format!("invalid {label}: {value}"))
}

fn parse_optional_seed(value: Option<&String>) -> Result<Option<u64>, String> {
    match value.map(String::as_str) {
        None | Some("-") => Ok(None),
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|_| format!("invalid seed: {raw}")),
    }
}

fn build_config(args: &[String]) -> Result<SimConfig, String> {
    let run_id = args
        .get(2)
        .cloned()
        .ok_or_else(|| "missing run_id".to_string())?;

    let mut config = SimConfig::default();
    config.run_id = run_id;
    config.seed = parse_optional_seed(args.get(3))?;
    if let Some(raw) = args.get(4) {
        config.horizon_minutes = parse_u64(raw, "minutes")?;
    }
    if let Some(raw) = args.get(5) {
        config.population_size = parse_u64(raw, "population")? as usize;
    }
    Ok(config)
}

fn run_simulation(args: &[String], json: bool) -> Result<(), String> {
    let config = build_config(args)?;
    let mut world = SimWorld::new(config);
    let summary = world.run();
    let report = world.report();

    if json {
        let raw = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("failed to encode report: {err}"))?;
        println!("{raw}");
        eprintln!("{summary}");
    } else {
        print_report(&report);
        println!();
        println!("{summary}");
    }
    Ok(())
}

fn print_report(report: &EngagementReport) {
    println!("Simulation complete.");
    println!("Total posts: {}", report.total_posts);
    println!(" - by influential users: {}", report.influential_posts);
    println!(" - by ordinary users: {}", report.ordinary_posts);
    println!("Total retweets: {}", report.total_retweets);
    println!("Total likes: {}", report.total_likes);
    println!("Total replies: {}", report.total_replies);
    println!("Average likes per post: {:.2}", report.avg_likes_per_post);
    println!("Average replies per post: {:.2}", report.avg_replies_per_post);
    println!(
        "Average retweets per post: {:.2}",
        report.avg_retweets_per_post
    );
    println!();
    println!("Actions per hour:");
    for (hour, count) in report.actions_per_hour.iter().enumerate() {
        println!("Hour {hour:02}:00 - {hour:02}:59 : {count} actions");
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str);

    match command {
        Some("run") => {
            if let Err(err) = run_simulation(&args, false) {
                eprintln!("error: {err}");
                print_usage();
                std::process::exit(2);
            }
        }
        Some("run-json") => {
            if let Err(err) = run_simulation(&args, true) {
                eprintln!("error: {err}");
                print_usage();
                std::process::exit(2);
            }
        }
        Some("config") => match serde_json::to_string_pretty(&SimConfig::default()) {
            Ok(raw) => println!("{raw}"),
            Err(err) => {
                eprintln!("error: failed to encode config: {err}");
                std::process::exit(1);
            }
        },
        _ => {
            print_usage();
        }
    }
}
