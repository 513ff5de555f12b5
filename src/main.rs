// Entry point and high-level CLI flow.
//
// - Option [1] loads both period files and prints load diagnostics.
// - Options [2] and [3] narrow the dashboard to one salesperson or group.
// - Option [4] clears both filters.
// - Option [5] renders the dashboard and writes the exports.
// With `--batch` the files are loaded, the dashboard is rendered once, and the
// program exits.
use anyhow::{Context, Result};
use clap::Parser;
use sales_dashboard::config::{Args, DashboardConfig};
use sales_dashboard::filter::Selection;
use sales_dashboard::loader::{self, LoadReport};
use sales_dashboard::{output, reports, util, Session};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Read a single line of input after printing `prompt`.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn read_choice() -> String {
    read_line("Enter choice: ")
}

fn print_load_report(label: &str, report: &LoadReport) {
    println!("{}: {} records loaded", label, util::format_int(report.total_records as u64));
    if report.missing_salesperson > 0 || report.missing_group > 0 {
        println!(
            "  Note: {} without salesperson, {} without group (shown as N/A).",
            util::format_int(report.missing_salesperson as u64),
            util::format_int(report.missing_group as u64)
        );
    }
    if report.invalid_numbers > 0 {
        println!(
            "  Note: {} non-numeric values counted as zero.",
            util::format_int(report.invalid_numbers as u64)
        );
    }
}

/// Handle option [1]: read both files and replace the session's data.
///
/// Paths come from the command line when given, otherwise the user is asked.
fn handle_load(session: &mut Session, config: &DashboardConfig) -> bool {
    let prior = config.prior.clone().or_else(|| {
        let p = read_line("Prior-year file: ");
        (!p.is_empty()).then(|| PathBuf::from(p))
    });
    let current = config.current.clone().or_else(|| {
        let p = read_line("Current-year file: ");
        (!p.is_empty()).then(|| PathBuf::from(p))
    });

    match loader::load_pair(prior.as_deref(), current.as_deref()) {
        Ok(pair) => {
            print_load_report("Prior year", &pair.prior_report);
            print_load_report("Current year", &pair.current_report);
            session.load_pair(&pair);
            println!(
                "{} salespeople, {} product groups available for filtering.\n",
                session.salesperson_options().len(),
                session.group_options().len()
            );
            true
        }
        Err(e) => {
            error!("load failed: {}", e);
            eprintln!("Failed to load files: {}\n", e);
            false
        }
    }
}

/// Show numbered options and return the picked selection. `0` selects all.
fn prompt_selection(title: &str, options: &[String]) -> Option<Selection> {
    println!("{}", title);
    println!("[0] All");
    for (idx, opt) in options.iter().enumerate() {
        println!("[{}] {}", idx + 1, opt);
    }
    let choice = read_choice();
    match choice.parse::<usize>() {
        Ok(0) => Some(Selection::All),
        Ok(n) if n <= options.len() => Some(Selection::Only(options[n - 1].clone())),
        _ => {
            println!("Invalid choice.\n");
            None
        }
    }
}

fn handle_filter_salesperson(session: &mut Session) {
    if !session.is_loaded() {
        println!("Error: No data loaded. Please load the files first (option 1).\n");
        return;
    }
    if let Some(sel) = prompt_selection("Select salesperson:", &session.salesperson_options()) {
        session.set_salesperson(sel);
    }
}

fn handle_filter_group(session: &mut Session) {
    if !session.is_loaded() {
        println!("Error: No data loaded. Please load the files first (option 1).\n");
        return;
    }
    if let Some(sel) = prompt_selection("Select product group:", &session.group_options()) {
        session.set_group(sel);
    }
}

/// Handle option [5]: print the KPI block and both breakdown tables, and write
/// the CSV and JSON exports.
fn handle_generate_dashboard(session: &Session, config: &DashboardConfig) -> Result<()> {
    let aggregate = session.dashboard()?;
    let filter = session.filter();

    println!("Sales Dashboard");
    println!("(Salesperson: {}, Product group: {})\n", filter.salesperson, filter.group);

    output::preview_table_rows(&reports::kpi_cards(&aggregate.metrics), 3);

    let vendors = reports::breakdown_table(&aggregate.vendor_rows);
    println!("Sales by Salesperson\n");
    output::preview_table_rows(&vendors, config.preview_rows);

    let groups = reports::breakdown_table(&aggregate.group_rows);
    println!("Sales by Product Group\n");
    output::preview_table_rows(&groups, config.preview_rows);

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    output::write_csv(&config.vendor_csv(), &vendors)?;
    output::write_csv(&config.group_csv(), &groups)?;
    output::write_json(&config.summary_json(), &reports::generate_summary(&aggregate, filter))?;
    info!(dir = %config.output_dir.display(), "exports written");
    println!("(Full tables exported to {})\n", config.output_dir.display());
    Ok(())
}

fn run_batch(session: &mut Session, config: &DashboardConfig) -> Result<()> {
    let pair = loader::load_pair(config.prior.as_deref(), config.current.as_deref())
        .context("loading input files")?;
    print_load_report("Prior year", &pair.prior_report);
    print_load_report("Current year", &pair.current_report);
    println!();
    session.load_pair(&pair);
    session.set_filter(config.initial_filter.clone());
    handle_generate_dashboard(session, config)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = DashboardConfig::from(Args::parse());
    let mut session = Session::new();

    if config.batch {
        return run_batch(&mut session, &config);
    }

    loop {
        println!("Sales Dashboard:");
        println!("[1] Load the files");
        println!("[2] Filter by salesperson");
        println!("[3] Filter by product group");
        println!("[4] Clear filters");
        println!("[5] Generate dashboard");
        println!("[0] Exit\n");
        match read_choice().as_str() {
            "1" => {
                if handle_load(&mut session, &config) {
                    session.set_filter(config.initial_filter.clone());
                }
            }
            "2" => handle_filter_salesperson(&mut session),
            "3" => handle_filter_group(&mut session),
            "4" => {
                session.clear_filters();
                println!("Filters cleared.\n");
            }
            "5" => {
                println!();
                if let Err(e) = handle_generate_dashboard(&session, &config) {
                    eprintln!("Error: {:#}\n", e);
                }
            }
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter a number from 0 to 5.\n");
            }
        }
    }
    Ok(())
}
