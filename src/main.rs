use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use payslip::config::{config_dir, load_config, resolve_output_dir, CONFIG_TEMPLATE};
use payslip::slip::render_field;
use payslip::{generate_slips, load_records, BatchOptions, Field, LogoSource, PayslipError, Result};

#[derive(Parser)]
#[command(name = "payslip")]
#[command(version, about = "Generate salary slip PDFs from payroll spreadsheets", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.payslip or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Validate a payroll sheet and list its rows
    Check {
        /// Payroll spreadsheet (.xlsx, .xls, .ods or .csv)
        sheet: PathBuf,

        /// Number of rows to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Generate one salary slip PDF per row of a payroll sheet
    Generate {
        /// Payroll spreadsheet (.xlsx, .xls, .ods or .csv)
        sheet: PathBuf,

        /// Output directory (default: output_dir from config.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Logo path or URL (default: logo from config.toml)
        #[arg(long, conflicts_with = "no_logo")]
        logo: Option<String>,

        /// Render slips without a logo
        #[arg(long)]
        no_logo: bool,

        /// Number of render workers (default: workers from config.toml)
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Show the effective configuration
    Status,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Check { sheet, limit } => cmd_check(&sheet, limit),
        Commands::Generate {
            sheet,
            output,
            logo,
            no_logo,
            workers,
        } => cmd_generate(&cfg_dir, &sheet, output, logo, no_logo, workers),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(PayslipError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized payslip config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your company details and logo:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Check your payroll sheet:             payslip check <sheet.xlsx>");
    println!();
    println!("Then generate the slips:");
    println!("  payslip generate <sheet.xlsx>");

    Ok(())
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ROW")]
    row: usize,
    #[tabled(rename = "PERIOD")]
    period: String,
    #[tabled(rename = "CODE")]
    code: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "NET PAY")]
    net: String,
}

/// Validate a sheet's columns and list its records
fn cmd_check(sheet: &Path, limit: Option<usize>) -> Result<()> {
    let records = load_records(sheet)?;

    if records.is_empty() {
        println!("{} has all required columns but no rows.", sheet.display());
        return Ok(());
    }

    let shown = match limit {
        Some(n) => &records[..n.min(records.len())],
        None => &records[..],
    };

    let rows: Vec<RecordRow> = shown
        .iter()
        .map(|record| RecordRow {
            row: record.row,
            period: render_field(record, Field::MonthYear),
            code: render_field(record, Field::EmployeeCode),
            name: render_field(record, Field::Name),
            net: render_field(record, Field::NetSalary),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("{} record(s) ready for slip generation", records.len());

    Ok(())
}

/// Render every row of the sheet into a slip
fn cmd_generate(
    cfg_dir: &Path,
    sheet: &Path,
    output: Option<PathBuf>,
    logo: Option<String>,
    no_logo: bool,
    workers: Option<usize>,
) -> Result<()> {
    let config = load_config(cfg_dir)?;

    let output_dir =
        output.unwrap_or_else(|| resolve_output_dir(&config.slip.output_dir, cfg_dir));
    let logo = if no_logo {
        None
    } else {
        logo.or_else(|| config.slip.logo.clone())
            .map(|reference| LogoSource::parse(&reference))
    };
    let options = BatchOptions {
        workers: workers.unwrap_or(config.slip.workers),
        logo_timeout: config.slip.logo_timeout(),
    };

    // Schema errors surface here, before anything is written
    let records = load_records(sheet)?;
    let paths = generate_slips(
        &records,
        &config.company,
        logo.as_ref(),
        &output_dir,
        &options,
    )?;

    println!(
        "Generated {} slip(s) in {}",
        paths.len(),
        output_dir.display()
    );
    for path in &paths {
        println!("  {}", path.display());
    }

    Ok(())
}

/// Show the effective configuration
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let output_dir = resolve_output_dir(&config.slip.output_dir, cfg_dir);

    println!("Payslip Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Company:          {}", config.company.name);
    println!("Output directory: {}", output_dir.display());
    println!(
        "Logo:             {}",
        config.slip.logo.as_deref().unwrap_or("(none)")
    );
    println!("Workers:          {}", config.slip.workers);

    Ok(())
}
