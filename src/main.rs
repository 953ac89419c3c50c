//! Transition Risk CLI
//!
//! Drives the asset and portfolio flows over the demo catalog (or one loaded
//! from CSV) and prints the projected series.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use transition_risk::{
    asset::{load_assets, AssetCatalog, SearchFilters},
    export,
    portfolio::{GroupBy, PortfolioConfig, SortField},
    projection::{group_thousands, RetrofitFinancing, RetrofitPriority},
    wizard::{AssetEdit, AssetFlow, AssetSearch, DetailsOutcome, PortfolioFilter, PortfolioFlow},
    ChartView, ProjectionConfig, ProjectionResult, Scenario, ScenarioRunner, UnitMode,
};

#[derive(Parser)]
#[command(
    name = "transition-risk",
    version,
    about = "Climate-transition risk projections for commercial real estate"
)]
struct Cli {
    /// Load the asset catalog from this CSV file instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project NOI for up to three selected assets
    Asset(AssetArgs),
    /// Project portfolio buckets and show the risk breakdown
    Portfolio(PortfolioArgs),
    /// Compare every scenario for the selected assets
    Scenarios(ScenariosArgs),
    /// List catalog assets matching the search filters
    Catalog(CatalogArgs),
}

#[derive(Args)]
struct AssetArgs {
    /// Comma-separated catalog ids (at most three are kept)
    #[arg(long, value_delimiter = ',', required_unless_present = "custom")]
    ids: Vec<String>,

    /// Analyze a blank custom asset instead of catalog assets
    #[arg(long)]
    custom: bool,

    /// Override 2024 revenue on every asset
    #[arg(long)]
    revenue: Option<f64>,

    /// Override 2024 operating expenses on every asset
    #[arg(long)]
    opex: Option<f64>,

    /// baseline, 1.5c, 2c-immediate or 2c-delayed
    #[arg(long)]
    scenario: Option<String>,

    /// combined or split
    #[arg(long)]
    view: Option<String>,

    /// Print all 26 years instead of every 5th
    #[arg(long)]
    all_years: bool,

    /// Finance retrofits with the default loan instead of upfront
    #[arg(long)]
    loan: bool,

    /// Write the full projection to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the projection as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PortfolioArgs {
    /// Category=Option, repeatable
    #[arg(long = "filter")]
    filters: Vec<String>,

    #[arg(long)]
    scenario: Option<String>,

    /// count or currency
    #[arg(long)]
    unit: Option<String>,

    /// geography, lob, type, certs, energy or intensity
    #[arg(long)]
    group_by: Option<String>,

    /// Table sort field (postalCode, riskRating, dscrDelta, ltvDelta, energyDelta, retrofitCost)
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Write the property table to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the risk breakdown to this CSV file
    #[arg(long)]
    risk_csv: Option<PathBuf>,
}

#[derive(Args)]
struct ScenariosArgs {
    #[arg(long, value_delimiter = ',', required = true)]
    ids: Vec<String>,

    #[arg(long)]
    view: Option<String>,
}

#[derive(Args)]
struct CatalogArgs {
    #[arg(long, default_value = "")]
    search: String,

    #[arg(long, default_value = "")]
    city: String,

    #[arg(long = "type", default_value = "")]
    property_type: String,

    /// small, medium or large
    #[arg(long, default_value = "")]
    size: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let catalog = match &cli.catalog {
        Some(path) => {
            let assets = load_assets(path).with_context(|| format!("loading {}", path.display()))?;
            log::info!("Loaded {} assets from {}", assets.len(), path.display());
            AssetCatalog::new(assets)
        }
        None => AssetCatalog::mock(),
    };

    match cli.command {
        Command::Asset(args) => run_asset(&catalog, args),
        Command::Portfolio(args) => run_portfolio(args),
        Command::Scenarios(args) => run_scenarios(&catalog, args),
        Command::Catalog(args) => run_catalog(&catalog, args),
    }
}

/// Env-based config with any CLI overrides applied
fn projection_config(scenario: Option<&str>, view: Option<&str>) -> Result<ProjectionConfig> {
    let mut config = ProjectionConfig::from_env();
    if let Some(key) = scenario {
        config.scenario = Scenario::from_key(key)?;
    }
    if let Some(key) = view {
        config.view = ChartView::from_key(key)?;
    }
    Ok(config)
}

fn run_asset(catalog: &AssetCatalog, args: AssetArgs) -> Result<()> {
    let config = projection_config(args.scenario.as_deref(), args.view.as_deref())?;

    let search = AssetSearch::with_selection(args.ids.clone());
    if !args.custom && search.selected().len() < args.ids.len() {
        log::warn!("only the first {} assets are analyzed", search.selected().len());
    }

    let mut details = if args.custom {
        search.add_custom()
    } else {
        match search.continue_to_details(catalog) {
            Some(details) => details,
            None => bail!("none of {:?} are in the catalog", args.ids),
        }
    };

    // Walk every details page, applying overrides
    let handoff = loop {
        if let Some(revenue) = args.revenue {
            details.apply(AssetEdit::Revenue(revenue));
        }
        if let Some(opex) = args.opex {
            details.apply(AssetEdit::OpEx(opex));
        }
        match details.confirm() {
            DetailsOutcome::Next(next) => details = next,
            DetailsOutcome::Complete(handoff) => break handoff,
        }
    };

    let payload = handoff.to_json()?;
    let mut analysis = match AssetFlow::resume_analysis(Some(&payload)) {
        AssetFlow::Analysis(analysis) => analysis,
        other => bail!("asset handoff rejected, flow reset to {}", other.route().path()),
    };
    analysis.config = config;
    if args.loan {
        analysis.financing = RetrofitFinancing::default_loan();
    }

    let result = if args.all_years {
        analysis.projection()
    } else {
        analysis.chart()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Scenario: {}  View: {}",
            analysis.config.scenario.label(),
            analysis.config.view.key()
        );
        print_series(&result);
        print_retrofit(
            &analysis.retrofit_priorities(),
            &analysis.retrofit_schedules(),
            &analysis.financing,
        );
    }

    if let Some(path) = args.csv {
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        analysis.export_csv(file)?;
        println!("\nFull projection written to: {}", path.display());
    }

    Ok(())
}

fn run_portfolio(args: PortfolioArgs) -> Result<()> {
    let mut step = PortfolioFilter::new();
    for entry in &args.filters {
        let Some((category, option)) = entry.split_once('=') else {
            bail!("filter {:?} is not Category=Option", entry);
        };
        if !step.toggle(category.trim(), option.trim()) {
            bail!("unknown filter {:?}", entry);
        }
    }

    let payload = step.continue_to_analysis().to_json()?;
    let mut analysis = match PortfolioFlow::resume_analysis(Some(&payload)) {
        PortfolioFlow::Analysis(analysis) => analysis,
        other => bail!("portfolio handoff rejected, flow reset to {}", other.route().path()),
    };
    let config = PortfolioConfig::from_env();
    analysis.scenario = config.scenario;
    analysis.unit = config.unit;
    analysis.group_by = config.group_by;

    if let Some(key) = args.scenario.as_deref() {
        analysis.scenario = Scenario::from_key(key)?;
    }
    if let Some(key) = args.unit.as_deref() {
        analysis.unit = UnitMode::from_key(key)?;
    }
    if let Some(key) = args.group_by.as_deref() {
        analysis.group_by = GroupBy::from_key(key)?;
    }
    if let Some(key) = args.sort.as_deref() {
        let field = SortField::from_key(key)?;
        analysis.table.click(field);
        if args.desc {
            analysis.table.click(field);
        }
    }

    println!("Filters: {}", serde_json::to_string(analysis.filters())?);
    println!("Scenario: {}  Units: {}", analysis.scenario.label(), analysis.unit.key());
    let chart = analysis.chart();
    let header: String = chart.series.iter().map(|s| format!("{:>16}", s)).collect();
    println!("{:>6} {}", "Year", header);
    for point in &chart.points {
        let cells: String = point
            .values
            .iter()
            .map(|&v| format!("{:>16}", analysis.unit.format_value(v)))
            .collect();
        println!("{:>6} {}", point.year, cells);
    }

    println!("\nRisk by {}:", analysis.group_by.label());
    println!("{:<16} {:>6} {:>6} {:>6}", "Group", "Low", "Medium", "High");
    for row in analysis.risk_distribution() {
        println!("{:<16} {:>6} {:>6} {:>6}", row.name, row.low, row.medium, row.high);
    }

    println!(
        "\n{:<10} {:>4} {:>8} {:>8} {:>8} {:>12}",
        "Postal", "Risk", "DSCR Δ", "LTV Δ", "EUI Δ", "Retrofit"
    );
    for row in analysis.table.rows() {
        println!(
            "{:<10} {:>4} {:>8.2} {:>8.1} {:>8.1} {:>12}",
            row.postal_code,
            row.risk_rating.code(),
            row.dscr_delta,
            row.ltv_delta,
            row.energy_delta,
            format!("${}", group_thousands(row.retrofit_cost as i64)),
        );
    }

    if let Some(path) = args.csv {
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        analysis.export_csv(file)?;
        println!("\nTable written to: {}", path.display());
    }
    if let Some(path) = args.risk_csv {
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        export::write_risk_distribution_csv(&analysis.risk_distribution(), file)?;
        println!("Risk breakdown written to: {}", path.display());
    }

    Ok(())
}

fn run_scenarios(catalog: &AssetCatalog, args: ScenariosArgs) -> Result<()> {
    let search = AssetSearch::with_selection(args.ids.clone());
    let Some(details) = search.continue_to_details(catalog) else {
        bail!("none of {:?} are in the catalog", args.ids);
    };

    let runner = ScenarioRunner::new(projection_config(None, args.view.as_deref())?);
    for (scenario, result) in runner.run_all(details.assets()) {
        println!("\n{}", scenario.label());
        println!("{:<28} {:>14} {:>14} {:>9}", "Series", "2025", "2050", "Change");
        for s in result.summary() {
            println!(
                "{:<28} {:>14} {:>14} {:>8.1}%",
                s.name,
                group_thousands(s.first_value),
                group_thousands(s.last_value),
                s.change_pct
            );
        }
    }

    Ok(())
}

fn run_catalog(catalog: &AssetCatalog, args: CatalogArgs) -> Result<()> {
    let filters = SearchFilters {
        term: args.search,
        city: args.city,
        property_type: args.property_type,
        size: args.size,
    };

    println!(
        "{:<4} {:<24} {:<10} {:<12} {:>10} {:>6} {:>6} {:>4}",
        "Id", "Address", "City", "Type", "Size", "DSCR", "LTV", "Risk"
    );
    for asset in catalog.search(&filters) {
        println!(
            "{:<4} {:<24} {:<10} {:<12} {:>10} {:>6.2} {:>5.1}% {:>4}",
            asset.id,
            asset.address,
            asset.city,
            asset.property_type,
            group_thousands(asset.size as i64),
            asset.dscr,
            asset.ltv,
            asset.risk_rating.code(),
        );
    }
    println!("\nCities: {}", catalog.cities().join(", "));
    println!("Types:  {}", catalog.property_types().join(", "));

    Ok(())
}

fn print_series(result: &ProjectionResult) {
    let header: String = result.series.iter().map(|s| format!("{:>24}", s)).collect();
    println!("{:>6} {}", "Year", header);
    println!("{}", "-".repeat(7 + 24 * result.series.len()));
    for point in &result.points {
        let cells: String = point
            .values
            .iter()
            .map(|&v| format!("{:>24}", format!("${}", group_thousands(v))))
            .collect();
        println!("{:>6} {}", point.year, cells);
    }
}

fn print_retrofit(
    priorities: &[(String, RetrofitPriority)],
    schedules: &[(String, Vec<f64>)],
    financing: &RetrofitFinancing,
) {
    println!("\nRetrofit ({:?}):", financing);
    for ((name, priority), (_, schedule)) in priorities.iter().zip(schedules) {
        let payment = schedule.first().copied().unwrap_or(0.0);
        println!(
            "  {:<24} {}  (${}/yr x {})",
            name,
            priority.recommendation(),
            group_thousands(payment.round() as i64),
            schedule.len()
        );
    }
}
