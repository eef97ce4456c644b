use crate::render::{render_report, AuditSource};
use clap::{Args, Parser, Subcommand};
use gym_audit::config::{AppConfig, OutputFormat};
use gym_audit::error::AppError;
use gym_audit::telemetry;
use gym_audit::workflows::audit::{AuditReport, SampleScenario};
use gym_audit::workflows::import::AnswerImporter;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "gym-audit",
    about = "Score a functional-fitness gym from its audit questionnaire answers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Audit an answer export (.json or .csv)
    Analyze(AnalyzeArgs),
    /// Audit one of the bundled sample gyms
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Answer export to audit
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Output format (text or json); overrides AUDIT_OUTPUT_FORMAT
    #[arg(long, value_parser = parse_format)]
    pub(crate) format: Option<OutputFormat>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Sample gym to audit (performant or struggling)
    #[arg(long, value_parser = parse_scenario, default_value = "performant")]
    pub(crate) scenario: SampleScenario,
    /// Output format (text or json); overrides AUDIT_OUTPUT_FORMAT
    #[arg(long, value_parser = parse_format)]
    pub(crate) format: Option<OutputFormat>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Analyze(args) => run_analyze(args, &config),
        Command::Demo(args) => run_demo(args, &config),
    }
}

fn run_analyze(args: AnalyzeArgs, config: &AppConfig) -> Result<(), AppError> {
    let answers = AnswerImporter::from_path(&args.answers)?;
    let report = AuditReport::compute(&answers);
    let format = args.format.unwrap_or(config.report.format);

    info!(
        ?config.environment,
        answers = report.answer_count,
        global_score = report.scores.global_score,
        "audited answer export"
    );

    let source = AuditSource::Export(args.answers.display().to_string());
    render_report(&report, &source, format)
}

fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let answers = args.scenario.answers();
    let report = AuditReport::compute(&answers);
    let format = args.format.unwrap_or(config.report.format);

    info!(
        ?config.environment,
        scenario = %args.scenario,
        global_score = report.scores.global_score,
        "audited sample gym"
    );

    render_report(&report, &AuditSource::Sample(args.scenario), format)
}

fn parse_format(raw: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(raw).ok_or_else(|| format!("unknown output format '{raw}' (text, json)"))
}

fn parse_scenario(raw: &str) -> Result<SampleScenario, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "performant" => Ok(SampleScenario::Performant),
        "struggling" => Ok(SampleScenario::Struggling),
        _ => Err(format!("unknown scenario '{raw}' (performant, struggling)")),
    }
}
