//! Sweep the (dlong, decl, roll) grid and persist the allowable pointings.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use sunshade_planner::export::grid::{self as export_grid, GridFormat};
use sunshade_planner::planner::{self, Overrides};
use sunshade_planner::survey::build_grid;
use sunshade_planner::survey::grid::rows_per_roll;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Allowable-pointing grid builder (brute-force sweep over dlong, decl, roll)"
)]
struct Cli {
    /// Planner manifest (TOML or YAML) with constraint and grid settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output artifact (use '-' for stdout); defaults to the manifest's grid.output
    #[arg(long)]
    output: Option<PathBuf>,

    /// Artifact format; inferred from the output extension when omitted
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Y angle limit override (deg)
    #[arg(long)]
    y_limit: Option<f64>,

    /// Half-sector length override (days)
    #[arg(long)]
    half_sector_days: Option<u32>,

    /// Use the truncated 57.296 degree conversion of legacy grids
    #[arg(long, default_value_t = false)]
    legacy_degrees: bool,

    /// Print allowable row counts per roll slice
    #[arg(long, default_value_t = false)]
    per_roll: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum FormatArg {
    Json,
    Csv,
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
    let output = cli.output.unwrap_or(settings.output);
    let format = match cli.format {
        Some(FormatArg::Json) => GridFormat::Json,
        Some(FormatArg::Csv) => GridFormat::Csv,
        None => GridFormat::from_path(&output),
    };

    let grid = build_grid(&settings.grid, &settings.constraints)?;
    let rows: Vec<[f64; 3]> = grid.triples().collect();
    export_grid::write_grid(&output, format, &rows)?;

    if output.as_os_str() != "-" {
        println!(
            "allowable pointings: {} of {} cells -> {}",
            grid.len(),
            settings.grid.cell_count(),
            output.display()
        );
        if cli.per_roll {
            for (roll, count) in rows_per_roll(&grid) {
                println!("  roll {roll:>7.1}: {count}");
            }
        }
    }
    Ok(())
}
