//! DRIP Projection CLI
//!
//! Command-line interface for running DRIP projections, budgets,
//! sensitivity sweeps and the saved-portfolio book

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use drip_projection::budget::{BudgetInputs, Expenses};
use drip_projection::inputs::{load_inputs, PaymentFrequency, ProjectionInputs};
use drip_projection::portfolio::{ActualData, PortfolioBook};
use drip_projection::projection::{project, ProjectionResult};
use drip_projection::report::{format_currency, format_percent, write_csv, write_json};
use drip_projection::scenario::{ScenarioRunner, SweepField};

#[derive(Parser)]
#[command(name = "drip", version, about = "Canadian TFSA dividend reinvestment calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project a DRIP portfolio year by year
    Project {
        #[command(flatten)]
        inputs: InputArgs,

        /// Write the yearly table to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the full result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Summarize a monthly budget
    Budget {
        #[command(flatten)]
        budget: BudgetArgs,

        #[arg(long)]
        json: bool,
    },

    /// Vary one input across several values
    Sweep {
        /// yield, growth, appreciation, contribution or years
        #[arg(long)]
        field: SweepField,

        /// Comma-separated values, e.g. 3,4.5,6
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<f64>,

        #[command(flatten)]
        inputs: InputArgs,

        #[arg(long)]
        json: bool,
    },

    /// Manage saved portfolios in a local JSON file
    Portfolio {
        /// Portfolio book file (created on first save)
        #[arg(long, default_value = "portfolios.json")]
        book: PathBuf,

        #[command(subcommand)]
        action: PortfolioAction,
    },
}

#[derive(Subcommand)]
enum PortfolioAction {
    /// List saved portfolios with totals
    List,

    /// Project and save under a name
    Save {
        #[arg(long)]
        name: String,

        #[command(flatten)]
        inputs: InputArgs,
    },

    /// Record actual account results for a portfolio
    Actual {
        #[arg(long)]
        id: u64,

        #[arg(long)]
        current_value: Option<f64>,

        #[arg(long)]
        monthly_income: Option<f64>,

        #[arg(long)]
        total_dividends: Option<f64>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a saved portfolio
    Delete {
        #[arg(long)]
        id: u64,
    },
}

/// Projection inputs; flags override values loaded with --inputs
#[derive(Args, Debug, Default)]
struct InputArgs {
    /// JSON document with projection inputs (missing fields use defaults)
    #[arg(long = "inputs")]
    inputs_file: Option<PathBuf>,

    #[arg(long)]
    initial_investment: Option<f64>,

    #[arg(long)]
    monthly_contribution: Option<f64>,

    /// Annual dividend yield, percent
    #[arg(long)]
    dividend_yield: Option<f64>,

    /// Annual dividend growth, percent
    #[arg(long)]
    dividend_growth: Option<f64>,

    #[arg(long)]
    years: Option<u32>,

    /// Annual share price appreciation, percent
    #[arg(long)]
    appreciation: Option<f64>,

    /// 1, 2, 4, 12 or a name such as quarterly
    #[arg(long)]
    dividend_frequency: Option<PaymentFrequency>,

    #[arg(long)]
    contribution_frequency: Option<PaymentFrequency>,
}

impl InputArgs {
    fn resolve(&self) -> Result<ProjectionInputs> {
        let mut inputs = match &self.inputs_file {
            Some(path) => load_inputs(path)
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("failed to load inputs from {}", path.display()))?,
            None => ProjectionInputs::default(),
        };

        if let Some(v) = self.initial_investment {
            inputs.initial_investment = v;
        }
        if let Some(v) = self.monthly_contribution {
            inputs.monthly_contribution = v;
        }
        if let Some(v) = self.dividend_yield {
            inputs.annual_dividend_yield = v;
        }
        if let Some(v) = self.dividend_growth {
            inputs.dividend_growth_rate = v;
        }
        if let Some(v) = self.years {
            inputs.years_to_project = v;
        }
        if let Some(v) = self.appreciation {
            inputs.stock_appreciation_rate = v;
        }
        if let Some(v) = self.dividend_frequency {
            inputs.dividend_frequency = v;
        }
        if let Some(v) = self.contribution_frequency {
            inputs.contribution_frequency = v;
        }

        inputs.validate().context("invalid projection inputs")?;
        Ok(inputs)
    }
}

#[derive(Args, Debug)]
struct BudgetArgs {
    #[arg(long, default_value_t = 5_000.0)]
    income: f64,
    #[arg(long, default_value_t = 1_500.0)]
    housing: f64,
    #[arg(long, default_value_t = 400.0)]
    transportation: f64,
    #[arg(long, default_value_t = 600.0)]
    food: f64,
    #[arg(long, default_value_t = 200.0)]
    utilities: f64,
    #[arg(long, default_value_t = 80.0)]
    phone: f64,
    #[arg(long, default_value_t = 300.0)]
    entertainment: f64,
    #[arg(long, default_value_t = 500.0)]
    other: f64,
}

impl From<&BudgetArgs> for BudgetInputs {
    fn from(args: &BudgetArgs) -> Self {
        BudgetInputs {
            monthly_income: args.income,
            expenses: Expenses {
                housing: args.housing,
                transportation: args.transportation,
                food: args.food,
                utilities: args.utilities,
                phone: args.phone,
                entertainment: args.entertainment,
                other: args.other,
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Project { inputs, csv, json } => run_project(&inputs, csv.as_deref(), json),
        Command::Budget { budget, json } => run_budget(&budget, json),
        Command::Sweep { field, values, inputs, json } => run_sweep(field, &values, &inputs, json),
        Command::Portfolio { book, action } => run_portfolio(&book, action),
    }
}

fn run_project(args: &InputArgs, csv_path: Option<&Path>, json: bool) -> Result<()> {
    let inputs = args.resolve()?;
    let result = project(&inputs);

    if let Some(path) = csv_path {
        let file = File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
        write_csv(&result, BufWriter::new(file)).map_err(|e| anyhow::anyhow!("{}", e))?;
        log::info!("wrote {} rows to {}", result.snapshots.len(), path.display());
    }

    if json {
        write_json(&result, io::stdout().lock())?;
        println!();
    } else {
        print_projection(&result);
        if let Some(path) = csv_path {
            println!("\nFull results written to: {}", path.display());
        }
    }
    Ok(())
}

fn print_projection(result: &ProjectionResult) {
    let inputs = &result.inputs;
    println!("DRIP Projection");
    println!("===============\n");
    println!("  Initial Investment:   {}", format_currency(inputs.initial_investment));
    println!("  Monthly Contribution: {}", format_currency(inputs.monthly_contribution));
    println!("  Dividend Yield:       {:.2}% ({})", inputs.annual_dividend_yield, inputs.dividend_frequency);
    println!("  Dividend Growth:      {:.2}%", inputs.dividend_growth_rate);
    println!("  Appreciation:         {:.2}%", inputs.stock_appreciation_rate);
    println!("  Deposits:             {}", inputs.contribution_frequency);
    println!();

    println!(
        "{:>4} {:>14} {:>14} {:>12} {:>10} {:>7} {:>10} {:>12}",
        "Year", "Value", "Contributed", "Dividends", "Income/mo", "Yield", "Price", "Shares"
    );
    println!("{}", "-".repeat(90));
    for row in &result.snapshots {
        println!(
            "{:>4} {:>14} {:>14} {:>12} {:>10} {:>6}% {:>10.2} {:>12.2}",
            row.year,
            format_currency(row.portfolio_value),
            format_currency(row.total_contributions),
            format_currency(row.total_dividends),
            format_currency(row.monthly_income),
            row.dividend_yield,
            row.share_price,
            row.shares_owned,
        );
    }

    let analysis = &result.analysis;
    println!("\nAnalysis:");
    println!("  Ending Balance:        {}", format_currency(analysis.ending_balance));
    println!("  Total Return:          {}", format_percent(analysis.total_return_percent.as_deref()));
    println!("  Average Annual Return: {}", format_percent(analysis.average_annual_return.as_deref()));
    println!("  Yield on Cost:         {}", format_percent(analysis.yield_on_cost.as_deref()));
    println!("  Annual Income:         {}", format_currency(analysis.annual_dividend_income));
    println!("  Total Dividends Paid:  {}", format_currency(analysis.total_dividend_payments));
    println!("  Risk Level:            {}", analysis.risk_level);
    println!("  TFSA Efficiency:       {}", analysis.tfsa_efficiency);
    println!("\n  {}", analysis.recommendation);
}

fn run_budget(args: &BudgetArgs, json: bool) -> Result<()> {
    let budget = BudgetInputs::from(args);
    budget.validate().context("invalid budget")?;
    let summary = budget.summarize();

    if json {
        write_json(&summary, io::stdout().lock())?;
        println!();
        return Ok(());
    }

    println!("Monthly Budget");
    println!("==============\n");
    println!("  {:<16} {:>10}", "Income", format_currency(budget.monthly_income));
    for (name, amount) in budget.expenses.categories() {
        println!("  {:<16} {:>10}", name, format_currency(amount));
    }
    println!("  {}", "-".repeat(27));
    println!("  {:<16} {:>10}", "Total expenses", format_currency(summary.total_expenses));
    println!("  {:<16} {:>10}", "Remaining", format_currency(summary.remaining_income));
    println!(
        "  {:<16} {:>10}",
        "Savings rate",
        summary.savings_rate.as_deref().map_or("n/a".to_string(), |r| format!("{}%", r))
    );
    println!("  {:<16} {:>10}", "Health", summary.savings_health);
    if summary.investable_monthly > 0.0 {
        println!(
            "\n  Investing {} a month at a 4.5% yield would pay about {} a year in dividends.",
            format_currency(summary.investable_monthly * 12.0),
            format_currency(summary.projected_annual_dividends)
        );
    }
    Ok(())
}

fn run_sweep(field: SweepField, values: &[f64], args: &InputArgs, json: bool) -> Result<()> {
    let runner = ScenarioRunner::with_base(args.resolve()?);
    let points = runner
        .sensitivity(field, values)
        .with_context(|| format!("invalid {} sweep", field))?;

    if json {
        write_json(&points, io::stdout().lock())?;
        println!();
        return Ok(());
    }

    println!("Sensitivity: {}\n", field);
    println!("{:>10} {:>14} {:>14} {:>12} {:>10}", "Value", "Ending", "Income/yr", "Total Ret", "CAGR");
    println!("{}", "-".repeat(64));
    for point in &points {
        let analysis = &point.result.analysis;
        println!(
            "{:>10} {:>14} {:>14} {:>12} {:>10}",
            point.value,
            format_currency(analysis.ending_balance),
            format_currency(analysis.annual_dividend_income),
            format_percent(analysis.total_return_percent.as_deref()),
            format_percent(analysis.average_annual_return.as_deref()),
        );
    }
    Ok(())
}

fn run_portfolio(path: &Path, action: PortfolioAction) -> Result<()> {
    let mut book = PortfolioBook::load(path)
        .with_context(|| format!("failed to read portfolio book {}", path.display()))?;

    match action {
        PortfolioAction::List => {
            print_book(&book);
            return Ok(());
        }
        PortfolioAction::Save { name, inputs } => {
            let result = project(&inputs.resolve()?);
            let id = book.save(&name, &result, Utc::now())?;
            println!("Saved portfolio {} ({})", id, name.trim());
        }
        PortfolioAction::Actual {
            id,
            current_value,
            monthly_income,
            total_dividends,
            notes,
        } => {
            let actual = ActualData {
                current_value,
                monthly_income,
                total_dividends,
                notes,
            };
            book.update_actual(id, actual)?;
            println!("Updated actual data for portfolio {}", id);
        }
        PortfolioAction::Delete { id } => {
            let removed = book.delete(id)?;
            println!("Deleted portfolio {} ({})", id, removed.name);
        }
    }

    book.write_json(path)?;
    Ok(())
}

fn print_book(book: &PortfolioBook) {
    if book.is_empty() {
        println!("No saved portfolios.");
        return;
    }

    println!(
        "{:>4}  {:<28} {:>12} {:>14} {:>12} {:>14} {:>9}",
        "ID", "Name", "Created", "Projected", "Income/mo", "Actual", "Vs Proj"
    );
    println!("{}", "-".repeat(100));
    for record in book.iter() {
        let (projected, income) = record
            .final_projection()
            .map_or((0.0, 0.0), |s| (s.portfolio_value, s.monthly_income));
        let actual = match record.actual_value() {
            v if v > 0.0 => format_currency(v),
            _ => "-".to_string(),
        };
        let performance = record
            .performance_percent()
            .map_or("-".to_string(), |p| format!("{}%", p));

        println!(
            "{:>4}  {:<28} {:>12} {:>14} {:>12} {:>14} {:>9}",
            record.id,
            record.name,
            record.created_at.format("%Y-%m-%d"),
            format_currency(projected),
            format_currency(income),
            actual,
            performance,
        );
    }

    let stats = book.stats();
    println!("\nTotals ({} portfolios):", stats.portfolio_count);
    println!("  Projected Value:   {}", format_currency(stats.total_projected_value));
    println!("  Projected Income:  {} / year", format_currency(stats.total_projected_income));
    println!("  Contributions:     {}", format_currency(stats.total_contributions));
    println!("  Actual Value:      {}", format_currency(stats.total_actual_value));
}
