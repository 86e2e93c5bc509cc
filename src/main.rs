use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use student_portal::config::{PortalConfig, SchedulerConfig};
use student_portal::import::ImportReport;
use student_portal::scheduler::SubmissionReport;
use student_portal::store::Student;
use student_portal::StudentPortal;

#[derive(Parser, Debug)]
#[command(name = "student-portal")]
#[command(version)]
#[command(about = "Student registry with rate-limited login, bulk import and an assignment worker pool")]
#[command(propagate_version = true)]
struct Args {
    #[command(flatten)]
    portal: PortalArgs,

    /// Output format for one-shot commands
    #[arg(long, short = 'o', global = true, default_value = "table")]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
struct PortalArgs {
    /// Failed logins before an id is locked out
    #[arg(long, global = true, default_value = "3")]
    max_login_attempts: u32,

    /// Number of assignment workers
    #[arg(long, global = true, default_value = "4")]
    workers: usize,

    /// Simulated processing time per assignment
    #[arg(long, global = true, default_value = "40")]
    job_duration_ms: u64,

    /// Disable the advisory submission timing warnings
    #[arg(long, global = true)]
    no_timing_warnings: bool,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Interactive menu (default)
    Shell,
    /// List the seeded students
    List,
    /// Import students from CSV files into the seeded store
    Import {
        /// CSV files with `id,name,program` rows
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Submit a batch of assignments to the worker pool
    Submit {
        /// Number of assignments
        count: usize,
    },
}

// =============================================================================
// JSON Output Types
// =============================================================================

#[derive(Serialize)]
struct SubmitOutput {
    results: Vec<String>,
    elapsed_ms: u128,
    expected_ms: u128,
    timing: String,
}

impl From<&SubmissionReport> for SubmitOutput {
    fn from(report: &SubmissionReport) -> Self {
        Self {
            results: report.results.iter().map(ToString::to_string).collect(),
            elapsed_ms: report.elapsed.as_millis(),
            expected_ms: report.expected.as_millis(),
            timing: report.timing.to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = PortalConfig::default()
        .with_max_login_attempts(args.portal.max_login_attempts)
        .with_scheduler(
            SchedulerConfig::default()
                .with_worker_count(args.portal.workers)
                .with_job_duration_ms(args.portal.job_duration_ms)
                .with_timing_warnings(!args.portal.no_timing_warnings),
        );
    let portal = StudentPortal::with_defaults(config);

    match args.command.unwrap_or(Commands::Shell) {
        Commands::Shell => run_shell(&portal).await?,
        Commands::List => print_students(&portal.students().await, &args.output)?,
        Commands::Import { files } => match portal.import_students(&files).await {
            Ok(report) => {
                print_import_report(&report, &args.output)?;
                print_students(&portal.students().await, &args.output)?;
            }
            Err(e) => {
                eprintln!("Error importing students: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Submit { count } => {
            let table = matches!(args.output, OutputFormat::Table);
            let report = portal
                .submit_assignments_with(count, |result| {
                    if table {
                        println!("{}", result);
                    }
                })
                .await?;
            print_submission(count, &report, &args.output)?;
        }
    }

    Ok(())
}

// =============================================================================
// Output Helpers
// =============================================================================

fn print_students(
    students: &[Student],
    output: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(students)?),
        OutputFormat::Table => {
            println!("{:<10} {:<24} {}", "ID", "NAME", "PROGRAM");
            for student in students {
                println!(
                    "{:<10} {:<24} {}",
                    student.id, student.name, student.study_program
                );
            }
        }
    }
    Ok(())
}

fn print_import_report(
    report: &ImportReport,
    output: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            println!(
                "Students imported successfully: {} record(s) from {} source(s).",
                report.imported,
                report.merged_sources.len()
            );
            for failure in &report.failed_sources {
                println!(
                    "Skipped {}: {}",
                    failure.source.display(),
                    failure.reason
                );
            }
        }
    }
    Ok(())
}

fn print_submission(
    count: usize,
    report: &SubmissionReport,
    output: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&SubmitOutput::from(report))?)
        }
        OutputFormat::Table => {
            println!("Submitting {} assignments took {:?}", count, report.elapsed);
        }
    }
    Ok(())
}

// =============================================================================
// Interactive Menu
// =============================================================================

const MENU: &str = "\
Welcome to the Student Portal!
1. Login
2. Register
3. Get Study Program
4. Modify Student
5. Bulk Import Student
6. Submit assignment
7. Exit";

async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    print!("{}", label);
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?.map(|line| line.trim().to_string()))
}

async fn run_shell(portal: &StudentPortal) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!();
        print_students(&portal.students().await, &OutputFormat::Table)?;
        println!();
        println!("{}", MENU);

        let Some(choice) = prompt(&mut lines, "Please choose an option: ").await? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let id = prompt(&mut lines, "Enter ID: ").await?.unwrap_or_default();
                let name = prompt(&mut lines, "Enter Name: ").await?.unwrap_or_default();
                report(portal.login(&id, &name).await);
            }
            "2" => {
                let id = prompt(&mut lines, "Enter ID: ").await?.unwrap_or_default();
                let name = prompt(&mut lines, "Enter Name: ").await?.unwrap_or_default();
                let program = prompt(&mut lines, "Enter Study Program: ")
                    .await?
                    .unwrap_or_default();
                report(portal.register(&id, &name, &program).await);
            }
            "3" => {
                let code = prompt(&mut lines, "Enter Program Code: ")
                    .await?
                    .unwrap_or_default();
                report(
                    portal
                        .study_program(&code)
                        .map(|name| format!("Study program: {}", name)),
                );
            }
            "4" => {
                let name = prompt(&mut lines, "Enter Student Name: ")
                    .await?
                    .unwrap_or_default();
                let code = prompt(&mut lines, "Enter New Program Code: ")
                    .await?
                    .unwrap_or_default();
                report(portal.change_study_program(&name, &code).await);
            }
            "5" => {
                let input = prompt(&mut lines, "Enter CSV filenames (comma-separated): ")
                    .await?
                    .unwrap_or_default();
                let files: Vec<PathBuf> = input
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(PathBuf::from)
                    .collect();
                match portal.import_students(&files).await {
                    Ok(r) => print_import_report(&r, &OutputFormat::Table)?,
                    Err(e) => println!("Error importing students: {}", e),
                }
            }
            "6" => {
                let input = prompt(&mut lines, "Enter number of assignments to submit: ")
                    .await?
                    .unwrap_or_default();
                match input.parse::<usize>() {
                    Ok(count) => {
                        let submission = portal
                            .submit_assignments_with(count, |result| println!("{}", result))
                            .await?;
                        print_submission(count, &submission, &OutputFormat::Table)?;
                    }
                    Err(_) => println!("Invalid number: {}", input),
                }
            }
            "7" => {
                println!("Exiting...");
                return Ok(());
            }
            _ => println!("Invalid option. Please try again."),
        }

        if prompt(&mut lines, "Press Enter to continue...").await?.is_none() {
            return Ok(());
        }
    }
}

fn report(outcome: student_portal::Result<String>) {
    match outcome {
        Ok(msg) => println!("{}", msg),
        Err(e) => println!("{}", e),
    }
}
