//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_snapshot_adapter::JsonSnapshotAdapter;
use crate::domain::calculator::Calculator;
use crate::domain::config_validation::{load_simulator_config, validate_simulator_config};
use crate::domain::error::FincalcError;
use crate::domain::form::FieldDefault;
use crate::domain::portfolio::Portfolio;
use crate::domain::report::CalculationReport;
use crate::domain::session::{run_session, SessionOutcome};
use crate::domain::snapshot::{load_portfolio, save_portfolio};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "fincalc", about = "Financial calculators and a paper-trading simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available calculators
    List,
    /// Show the input fields of a calculator
    Describe { name: String },
    /// Run the calculators whose sections appear in an inputs file
    Calc {
        #[arg(short, long)]
        inputs: PathBuf,
        /// Evaluate only this calculator
        #[arg(long)]
        only: Option<String>,
        /// Write the amortization schedule to a CSV file
        #[arg(long)]
        schedule_csv: Option<PathBuf>,
    },
    /// Run a scripted trading session
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        /// Write the transaction ledger to a CSV file
        #[arg(long)]
        ledger_csv: Option<PathBuf>,
        /// Resume from and save to this snapshot file
        #[arg(long)]
        state: Option<PathBuf>,
    },
    /// Validate a simulator configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::List => run_list(),
        Command::Describe { name } => run_describe(&name),
        Command::Calc {
            inputs,
            only,
            schedule_csv,
        } => run_calc(&inputs, only.as_deref(), schedule_csv.as_ref()),
        Command::Simulate {
            config,
            ledger_csv,
            state,
        } => run_simulate(&config, ledger_csv.as_ref(), state.as_ref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = FincalcError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn fail(err: &FincalcError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

/// Like [`fail`] but shows order parse errors against the script.
fn fail_with_orders(err: &FincalcError, config: &dyn ConfigPort) -> ExitCode {
    if let FincalcError::OrderParse(parse) = err {
        let script = config.get_string("simulator", "orders").unwrap_or_default();
        eprintln!(
            "error: failed to parse orders:\n{}",
            parse.display_with_context(&script)
        );
        return err.into();
    }
    fail(err)
}

fn run_list() -> ExitCode {
    let width = Calculator::ALL
        .iter()
        .map(|c| c.name().len())
        .max()
        .unwrap_or(0);
    for calc in Calculator::ALL {
        println!("{:<width$}  {}", calc.name(), calc.title(), width = width);
    }
    ExitCode::SUCCESS
}

fn run_describe(name: &str) -> ExitCode {
    let calc = match Calculator::from_name(name) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    println!("{} [{}]", calc.title(), calc.name());
    for field in calc.fields() {
        let default = match field.default {
            FieldDefault::Number(v) => v.to_string(),
            FieldDefault::Text(t) if t.is_empty() => "(none)".to_string(),
            FieldDefault::Text(t) => t.to_string(),
        };
        println!("  {:<24} {} (default {})", field.key, field.label, default);
    }
    ExitCode::SUCCESS
}

/// Calculators to run: the named one, or every calculator with a section.
fn select_calculators(
    config: &dyn ConfigPort,
    only: Option<&str>,
) -> Result<Vec<Calculator>, FincalcError> {
    if let Some(name) = only {
        return Ok(vec![Calculator::from_name(name)?]);
    }
    let mut selected = Vec::new();
    for section in config.sections() {
        match Calculator::from_name(&section) {
            Ok(calc) => selected.push(calc),
            Err(_) => log::warn!("skipping section [{}]: not a calculator", section),
        }
    }
    Ok(selected)
}

fn run_calc(inputs: &PathBuf, only: Option<&str>, schedule_csv: Option<&PathBuf>) -> ExitCode {
    eprintln!("Loading inputs from {}", inputs.display());
    let adapter = match load_config(inputs) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let calculators = match select_calculators(&adapter, only) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    if calculators.is_empty() {
        eprintln!("error: no calculator sections in {}", inputs.display());
        return ExitCode::from(2);
    }

    let mut reports: Vec<CalculationReport> = Vec::with_capacity(calculators.len());
    for calc in calculators {
        match calc.evaluate(&adapter) {
            Ok(report) => reports.push(report),
            Err(e) => return fail(&e),
        }
    }

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{report}");
    }

    if let Some(path) = schedule_csv {
        let Some(schedule) = reports.iter().find_map(|r| r.schedule.as_ref()) else {
            eprintln!("warning: no amortization schedule to export");
            return ExitCode::SUCCESS;
        };
        if let Err(e) = CsvReportAdapter.write_schedule(schedule, &path.display().to_string()) {
            return fail(&e);
        }
        eprintln!("Schedule written to {}", path.display());
    }

    ExitCode::SUCCESS
}

const EQUITY_CURVE_ROWS: usize = 10;

fn print_session(outcome: &SessionOutcome, starting_equity: f64, show_equity_curve: bool) {
    let prices = outcome.market.price_map();
    let equity = outcome.portfolio.total_equity(&prices);

    println!("=== Session Summary ===");
    println!("Ticks run:      {}", outcome.ticks_run);
    println!("Trades:         {}", outcome.portfolio.transactions.len());
    println!("Holdings:       {}", outcome.portfolio.holding_count());
    println!("Cash:           ${:.2}", outcome.portfolio.cash);
    println!("Holdings value: ${:.2}", outcome.portfolio.holdings_value(&prices));
    println!("Total equity:   ${:.2}", equity);
    println!("Change:         ${:.2}", equity - starting_equity);

    if !outcome.portfolio.holdings.is_empty() {
        println!();
        println!(
            "{:<8} {:>12} {:>12} {:>12} {:>12}",
            "Symbol", "Quantity", "Avg Price", "Price", "P&L"
        );
        for holding in &outcome.portfolio.holdings {
            let price = prices
                .get(&holding.symbol)
                .copied()
                .unwrap_or(holding.average_price);
            println!(
                "{:<8} {:>12.4} {:>12.2} {:>12.2} {:>12.2}",
                holding.symbol,
                holding.quantity,
                holding.average_price,
                price,
                holding.unrealized_pnl(price)
            );
        }
    }

    let curve = outcome.sampled_equity_curve(EQUITY_CURVE_ROWS);
    if show_equity_curve && !curve.is_empty() {
        println!();
        println!("{:>8} {:>14}", "Tick", "Equity");
        for point in &curve {
            println!("{:>8} {:>14.2}", point.tick, point.equity);
        }
    }

    if !outcome.rejections.is_empty() {
        println!();
        println!("Rejected orders:");
        for rejection in &outcome.rejections {
            println!("  [{}] {}: {}", rejection.tick, rejection.order, rejection.reason);
        }
    }
}

fn run_simulate(
    config_path: &PathBuf,
    ledger_csv: Option<&PathBuf>,
    state: Option<&PathBuf>,
) -> ExitCode {
    eprintln!("Loading simulator config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let sim = match load_simulator_config(&adapter) {
        Ok(s) => s,
        Err(e) => return fail_with_orders(&e, &adapter),
    };

    let store = state.map(|path| JsonSnapshotAdapter::new(path.clone()));
    let portfolio = match &store {
        Some(store) => match load_portfolio(store) {
            Ok(Some(p)) => {
                eprintln!("Resuming portfolio with {} trades", p.transactions.len());
                p
            }
            Ok(None) => Portfolio::new(sim.starting_cash),
            Err(e) => return fail(&e),
        },
        None => Portfolio::new(sim.starting_cash),
    };

    let starting_equity = portfolio.total_equity(&sim.market.price_map());
    let start = sim
        .start
        .unwrap_or_else(|| chrono::Local::now().naive_local());
    let show_equity_curve = sim.show_equity_curve;
    let mut rng = StdRng::seed_from_u64(sim.seed);

    eprintln!(
        "Running {} ticks over {} instruments (seed {})...",
        sim.ticks,
        sim.market.instruments().len(),
        sim.seed
    );
    let outcome = run_session(
        sim.market,
        portfolio,
        &sim.orders,
        sim.ticks,
        start,
        &mut rng,
    );

    print_session(&outcome, starting_equity, show_equity_curve);

    if let Some(store) = &store {
        if let Err(e) = save_portfolio(store, &outcome.portfolio) {
            return fail(&e);
        }
        if let Some(path) = state {
            eprintln!("Portfolio saved to {}", path.display());
        }
    }

    if let Some(path) = ledger_csv {
        if let Err(e) = CsvReportAdapter
            .write_ledger(&outcome.portfolio.transactions, &path.display().to_string())
        {
            return fail(&e);
        }
        eprintln!("Ledger written to {}", path.display());
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating simulator config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match validate_simulator_config(&adapter) {
        Ok(()) => {
            eprintln!("Configuration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => fail_with_orders(&e, &adapter),
    }
}
