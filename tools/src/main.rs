//! churn-runner: headless churn analysis runner for the Cardgoal desk.
//!
//! Usage:
//!   churn-runner --input orders.csv --data-dir ./data --export churned_hvcs.csv
//!   churn-runner --input orders.csv --flags contribution,hvc_drop
//!   churn-runner --input orders.csv --json

use anyhow::Result;
use cardgoal_core::{
    churn::{ChurnFlag, ChurnRecord},
    config::AnalysisConfig,
    insights::{ChurnStats, FlagCount},
    order,
    pipeline::{AnalysisRun, ChurnPipeline},
    report::{self, OverviewKpis},
};
use std::env;
use std::path::Path;

/// Everything a dashboard frontend needs to render one run.
#[derive(serde::Serialize)]
struct DashboardState {
    kpis: OverviewKpis,
    stats: ChurnStats,
    flag_breakdown: Vec<FlagCount>,
    insights: Vec<String>,
    churn_table: Vec<ChurnRecord>,
    churned_shown: Vec<ChurnRecord>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let input = parse_arg(&args, "--input", "orders.csv");
    let data_dir = parse_arg(&args, "--data-dir", "./data");
    let export = parse_arg(&args, "--export", "churned_hvcs.csv");
    let json_mode = args.iter().any(|a| a == "--json");
    let flags = parse_flags(&args)?;

    if !json_mode {
        println!("Cardgoal HVC Churn — churn-runner");
        println!("  input:     {input}");
        println!("  data_dir:  {data_dir}");
        println!("  export:    {export}");
        println!();
    }

    let config = AnalysisConfig::load(&data_dir)?;
    let orders = order::orders_from_path(Path::new(&input))?;

    let pipeline = ChurnPipeline::new(config);
    let run = pipeline.run(&orders)?;

    if json_mode {
        println!("{}", serde_json::to_string(&build_dashboard_state(&run, &flags))?);
    } else {
        print_summary(&run, &flags);
    }

    let written = report::export_churned_csv(Path::new(&export), &run.churn_table, &flags)?;
    if !json_mode {
        println!();
        println!("Wrote {written} churned HVCs to {export}");
    }

    Ok(())
}

fn build_dashboard_state(run: &AnalysisRun, flags: &[ChurnFlag]) -> DashboardState {
    DashboardState {
        kpis: report::overview_kpis(&run.churn_table, &run.stats, &run.flag_breakdown),
        stats: run.stats,
        flag_breakdown: run.flag_breakdown.clone(),
        insights: run.insights.clone(),
        churn_table: run.churn_table.clone(),
        churned_shown: report::filter_churned(&run.churn_table, flags)
            .into_iter()
            .cloned()
            .collect(),
    }
}

fn print_summary(run: &AnalysisRun, flags: &[ChurnFlag]) {
    let kpis = report::overview_kpis(&run.churn_table, &run.stats, &run.flag_breakdown);
    let shown = report::filter_churned(&run.churn_table, flags);

    println!("=== OVERVIEW METRICS ===");
    println!("  september HVCs: {}", kpis.september_hvc_count);
    println!("  churn rate:     {:.2}%", kpis.churn_rate * 100.0);
    println!("  top flag count: {}", kpis.top_flag_count);

    println!();
    println!("=== FLAG BREAKDOWN ===");
    for fc in &run.flag_breakdown {
        println!("  {:<18} {}", fc.flag.label(), fc.count);
    }

    println!();
    println!("=== KEY INSIGHTS ===");
    for line in &run.insights {
        println!("  - {line}");
    }

    println!();
    println!("=== FLAGGED CHURN USERS ===");
    if shown.is_empty() {
        println!("  (none)");
    } else {
        for r in &shown {
            println!(
                "  {} | contribution {:.2}% -> {:.2}% | success {:.2} -> {:.2} | flags: {}",
                r.user_id,
                r.sep_pct_contribution,
                r.oct_pct_contribution,
                r.sep_success_rate,
                r.oct_success_rate,
                flag_list(r),
            );
        }
    }
}

fn flag_list(record: &ChurnRecord) -> String {
    let tripped: Vec<&str> = ChurnFlag::ALL
        .iter()
        .filter(|&&f| record.has_flag(f))
        .map(|f| f.label())
        .collect();
    tripped.join(", ")
}

fn parse_flags(args: &[String]) -> Result<Vec<ChurnFlag>> {
    let Some(raw) = args
        .windows(2)
        .find(|w| w[0] == "--flags")
        .map(|w| w[1].as_str())
    else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(|token| match token.trim() {
            "contribution" => Ok(ChurnFlag::Contribution),
            "success" => Ok(ChurnFlag::Success),
            "hvc_drop" => Ok(ChurnFlag::HvcDrop),
            other => Err(anyhow::anyhow!(
                "Unknown churn flag '{other}' (expected contribution, success, hvc_drop)"
            )),
        })
        .collect()
}

fn parse_arg(args: &[String], flag: &str, default: &str) -> String {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
        .unwrap_or_else(|| default.to_string())
}
