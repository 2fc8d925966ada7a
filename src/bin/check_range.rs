//! Walk an observation sector day by day and report Sun angles and alarms.

use anyhow::anyhow;
use clap::Parser;
use std::path::PathBuf;
use sunshade_planner::attitude::Orientation;
use sunshade_planner::config::load_pointings;
use sunshade_planner::planner::{self, Overrides, PointingReview};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sector range check for spacecraft pointings (Sun angles and alarms per day)",
    allow_negative_numbers = true
)]
struct Cli {
    /// Ecliptic longitude offset of the boresight from antisolar at sector middle (deg)
    #[arg(long, required_unless_present = "pointings")]
    dlong: Option<f64>,

    /// Ecliptic declination of the pointing (deg)
    #[arg(long, required_unless_present = "pointings")]
    decl: Option<f64>,

    /// Roll about the boresight (deg)
    #[arg(long, default_value_t = 0.0)]
    roll: f64,

    /// YAML list or TOML file/directory of named pointings to review instead
    #[arg(long, conflicts_with_all = ["dlong", "decl"])]
    pointings: Option<PathBuf>,

    /// Planner manifest (TOML or YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Y angle limit override (deg)
    #[arg(long)]
    y_limit: Option<f64>,

    /// Half-sector length override (days)
    #[arg(long)]
    half_sector_days: Option<u32>,

    /// Use the truncated 57.296 degree conversion of legacy grids
    #[arg(long, default_value_t = false)]
    legacy_degrees: bool,

    /// Emit JSON instead of the text report
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Exit with an error when any day raises an alarm
    #[arg(long, default_value_t = false)]
    fail_on_alarm: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    planner::init_tracing(tracing::Level::WARN);

    let settings = planner::load_settings(
        cli.config.as_deref(),
        Overrides {
            y_limit_deg: cli.y_limit,
            half_sector_days: cli.half_sector_days,
            legacy_degrees: cli.legacy_degrees,
        },
    )?;

    let reviews = match (&cli.pointings, cli.dlong, cli.decl) {
        (Some(path), _, _) => {
            let pointings = load_pointings(path)?;
            planner::review_pointings(&pointings, &settings.constraints)
        }
        (None, Some(dlong), Some(decl)) => vec![PointingReview::new(
            "pointing",
            Orientation::new(dlong, decl, cli.roll),
            &settings.constraints,
        )],
        _ => return Err(anyhow!("either --pointings or both --dlong and --decl are required")),
    };

    if cli.json {
        let values: Vec<_> = reviews.iter().map(PointingReview::to_json).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        for review in &reviews {
            print_review(review);
        }
    }

    let alarmed: Vec<&str> = reviews
        .iter()
        .filter(|r| !r.summary.is_clear())
        .map(|r| r.name.as_str())
        .collect();
    if cli.fail_on_alarm && !alarmed.is_empty() {
        return Err(anyhow!("alarms raised for: {}", alarmed.join(", ")));
    }
    Ok(())
}

fn print_review(review: &PointingReview) {
    let o = &review.orientation;
    println!(
        "# {} dlong={} decl={} roll={}",
        review.name, o.dlong_deg, o.decl_deg, o.roll_deg
    );
    for day in &review.days {
        println!("{day}");
    }
    println!(
        "# allowable={} alarmed_days={}/{}",
        review.allowable, review.summary.alarmed_days, review.summary.days
    );
}
