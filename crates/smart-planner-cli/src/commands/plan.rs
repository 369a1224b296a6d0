use clap::Args;
use smart_planner_core::plan::total_hours;
use smart_planner_core::{local_now, Config};

use super::{open_session, CliResult};

#[derive(Args)]
pub struct PlanArgs {
    /// Hours to distribute (default from config)
    #[arg(long)]
    budget: Option<f64>,
    /// Maximum plan entries (default from config)
    #[arg(long)]
    max: Option<usize>,
    /// Print JSON instead of a numbered list
    #[arg(long)]
    json: bool,
}

pub fn run(args: PlanArgs) -> CliResult {
    let mut config = Config::load()?;
    if let Some(budget) = args.budget {
        config.plan.daily_budget_hours = budget;
    }
    if let Some(max) = args.max {
        config.plan.max_entries = max;
    }
    config.validate()?;

    let session = open_session()?;
    let plan = session.daily_plan(local_now(), &config.plan);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }
    if plan.is_empty() {
        println!("No pending tasks");
        return Ok(());
    }
    println!("Suggested plan:");
    for (i, entry) in plan.iter().enumerate() {
        let due = entry
            .due
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".into());
        println!("{}. {} ({}h), due {}", i + 1, entry.title, entry.hours, due);
    }
    println!("Total: {}h of {}h budget", total_hours(&plan), config.plan.daily_budget_hours);
    Ok(())
}
