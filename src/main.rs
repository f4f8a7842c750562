use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payslip_mailer::application::{BatchGenerator, BatchSender, MailDispatcher, RunReport, SendOutcome};
use payslip_mailer::config::{ConfigLoader, DEFAULT_CONFIG_PATH};
use payslip_mailer::domain::ports::MailTransportBox;
use payslip_mailer::infrastructure::directory::{DEFAULT_OUTPUT_DIR, PayslipDirectory};
use payslip_mailer::infrastructure::outbox::OutboxTransport;
use payslip_mailer::infrastructure::pdf::PdfPayslipRenderer;
use payslip_mailer::infrastructure::smtp::SmtpMailTransport;
use payslip_mailer::interfaces::csv::{RecordReader, SalaryTableWriter};
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payroll CSV file (NAME, EMAIL, BASIC SALARY, ALLOWANCES, DEDUCTIONS)
    input: PathBuf,

    /// Settings file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory the payslips are written to and sent from
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    out_dir: PathBuf,

    /// Send the available payslips without asking when some are missing
    #[arg(long)]
    yes: bool,

    /// Generate documents only
    #[arg(long)]
    skip_send: bool,

    /// Send previously generated documents only
    #[arg(long)]
    skip_generate: bool,

    /// Deliver into an in-memory outbox instead of the SMTP relay
    #[arg(long)]
    dry_run: bool,

    /// Write a JSON report of every outcome to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let settings = ConfigLoader::from_file(&cli.config)?;
    info!(
        relay = %settings.mail.relay_host,
        port = settings.mail.relay_port,
        organization = %settings.branding.organization,
        "configuration loaded"
    );

    let file = File::open(&cli.input).into_diagnostic()?;
    let records = RecordReader::new(file).read_all()?;
    info!(records = records.len(), "payroll loaded");

    println!("Employee Salary Detail:");
    SalaryTableWriter::new(io::stdout().lock()).write_records(&records)?;

    let directory = PayslipDirectory::new(&cli.out_dir);
    let mut report = RunReport::default();

    if !cli.skip_generate {
        let renderer = PdfPayslipRenderer::new(settings.branding.clone());
        let generator = BatchGenerator::new(Box::new(renderer), directory.clone());
        report.generated = generator.generate_all(&records)?;
        info!(
            generated = report.generated_count(),
            total = records.len(),
            "generation finished"
        );
    }

    if !cli.skip_send {
        let transport: MailTransportBox = if cli.dry_run {
            Box::new(OutboxTransport::new())
        } else {
            Box::new(SmtpMailTransport::new(settings.mail.clone()))
        };
        let dispatcher = MailDispatcher::new(
            transport,
            settings.mail.sender.as_str(),
            settings.branding.organization.as_str(),
        );
        let sender = BatchSender::new(dispatcher, directory);

        let missing = sender.missing_documents(&records);
        let mut force = cli.yes;
        if !missing.is_empty() {
            println!("Warning: Missing PDFs for employees:");
            for name in &missing {
                println!("- {name}");
            }
            if !force {
                force = confirm("Continue sending available payslips? (yes/no): ")
                    .into_diagnostic()?;
            }
        }

        let outcome = sender.send_all(&records, force).await;
        match &outcome {
            SendOutcome::Completed(summary) => println!("\n{summary}"),
            SendOutcome::Declined { .. } => {
                warn!("sending cancelled by operator");
                println!("Email sending cancelled.");
            }
        }
        report.delivery = Some(outcome);
    }

    if let Some(path) = &cli.report {
        report.write_json(path)?;
        info!(path = %path.display(), "run report written");
    }

    Ok(())
}

/// Asks on stdout and reads one line from stdin; only `yes` agrees.
fn confirm(question: &str) -> io::Result<bool> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{question}")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
