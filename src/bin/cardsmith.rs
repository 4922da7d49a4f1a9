use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "cardsmith", version)]
struct Cli {
    /// Asset root holding backgrounds/, characters/, weapons/, armors/, languages/, ui_elements/ and fonts/.
    #[arg(long, global = true, env = "CARDSMITH_ASSETS", default_value = "assets")]
    assets: PathBuf,

    /// Directory that receives rendered cards.
    #[arg(long, global = true, env = "CARDSMITH_OUTPUT", default_value = "output")]
    output: PathBuf,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Keyword tables as JSON (see the `rules` subcommand for the format).
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Seed for reproducible character generation.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Name pool for female characters, one name per line.
    #[arg(long, global = true, default_value = "imiona_girl.txt")]
    girl_names: PathBuf,

    /// Name pool for male characters, one name per line.
    #[arg(long, global = true, default_value = "imiona_boy.txt")]
    boy_names: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive characters from the tag descriptors and write the sheet.
    Generate(SheetArgs),
    /// Render one card per sheet row.
    Render(SheetArgs),
    /// Generate, then render.
    All(SheetArgs),
    /// Print the active keyword tables as JSON.
    Rules,
}

#[derive(Parser, Debug)]
struct SheetArgs {
    /// Character sheet path.
    #[arg(long, default_value = "characters.csv")]
    sheet: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    match &cli.cmd {
        Command::Generate(args) => cmd_generate(&cli, &args.sheet),
        Command::Render(args) => cmd_render(&cli, &args.sheet),
        Command::All(args) => {
            cmd_generate(&cli, &args.sheet)?;
            cmd_render(&cli, &args.sheet)
        }
        Command::Rules => {
            println!("{}", load_rules(&cli)?.to_json_pretty()?);
            Ok(())
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file '{}'", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::<File>::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}

fn load_rules(cli: &Cli) -> anyhow::Result<cardsmith::RuleTables> {
    match &cli.rules {
        Some(path) => Ok(cardsmith::RuleTables::from_json_path(path)?),
        None => Ok(cardsmith::RuleTables::default()),
    }
}

fn cmd_generate(cli: &Cli, sheet: &Path) -> anyhow::Result<()> {
    let assets = cardsmith::AssetResolver::new(&cli.assets);
    let engine = cardsmith::TagRuleEngine::new(load_rules(cli)?);
    let names = cardsmith::NamePool::load(&cli.girl_names, &cli.boy_names)?;
    let pipeline =
        cardsmith::CharacterGenerationPipeline::new(engine, names, assets.characters_dir());

    let report = match cli.seed {
        Some(seed) => pipeline.run(&mut cardsmith::RngSource::seeded(seed), sheet)?,
        None => pipeline.run(&mut cardsmith::RngSource::from_entropy(), sheet)?,
    };

    for (path, reason) in &report.skipped {
        eprintln!("skipped {}: {reason}", path.display());
    }
    eprintln!(
        "wrote {} ({} characters)",
        sheet.display(),
        report.records.len()
    );
    Ok(())
}

fn cmd_render(cli: &Cli, sheet_path: &Path) -> anyhow::Result<()> {
    let assets = cardsmith::AssetResolver::new(&cli.assets);
    assets.require_render_dirs()?;
    let sheet = cardsmith::Sheet::read(sheet_path)?;

    let font_path = assets.font();
    let report = match cardsmith::ParleyText::load(&font_path) {
        Ok(text) => {
            tracing::info!(family = %text.family_name(), "loaded card font");
            render_with(cli, assets, text, &sheet)
        }
        Err(e) => {
            tracing::warn!(error = %e, "card font unavailable, using block glyphs");
            render_with(cli, assets, cardsmith::BlockGlyphs, &sheet)
        }
    };

    print_report(&report);
    if report.written.is_empty() && !sheet.is_empty() {
        anyhow::bail!("no card was rendered from '{}'", sheet_path.display());
    }
    Ok(())
}

fn render_with<T: cardsmith::TextRasterizer>(
    cli: &Cli,
    assets: cardsmith::AssetResolver,
    text: T,
    sheet: &cardsmith::Sheet,
) -> cardsmith::RenderReport {
    let compositor =
        cardsmith::CardCompositor::new(cardsmith::LayoutConfig::default(), assets, text);
    let output = cardsmith::OutputDir::new(&cli.output);
    cardsmith::CardRenderingPipeline::new(compositor, output).run(sheet)
}

fn print_report(report: &cardsmith::RenderReport) {
    for path in &report.written {
        eprintln!("wrote {}", path.display());
    }
    for issue in &report.skipped {
        eprintln!("skipped row {} ({}): {}", issue.row, issue.name, issue.reason);
    }
    for issue in &report.failed {
        eprintln!("failed row {} ({}): {}", issue.row, issue.name, issue.reason);
    }
    eprintln!(
        "{} written, {} skipped, {} failed",
        report.written.len(),
        report.skipped.len(),
        report.failed.len()
    );
}
