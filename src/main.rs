use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use sunquote::{
    GeneratorBuilder, PipelineError, ProposalGenerator, ProposalInput, ProposalRequest,
};

/// Generates commercial proposals for photovoltaic installations.
#[derive(Parser, Debug)]
#[command(name = "sunquote", version, about, long_about = None)]
struct Cli {
    /// JSON configuration file (work dir, resolution, document settings, content)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one PDF proposal per input file
    Generate {
        /// Proposal input files, nested or flat JSON
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Where the PDFs are written
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Also print each document as base64
        #[arg(long, default_value_t = false)]
        base64: bool,

        /// Also print the derived financial summary as JSON
        #[arg(long, default_value_t = false)]
        summary: bool,

        /// Stamp the documents with the current time
        #[arg(long, default_value_t = false)]
        timestamp: bool,
    },
    /// Render the monthly production chart of an input
    Chart {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Render the yearly return table of an input
    Table {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn read_input(path: &Path) -> Result<ProposalInput, PipelineError> {
    let raw = fs::read_to_string(path)?;
    let request: ProposalRequest = serde_json::from_str(&raw)?;
    let input = request.into_input();
    input.validate()?;
    Ok(input)
}

fn load_builder(config: Option<&Path>) -> Result<GeneratorBuilder, PipelineError> {
    match config {
        Some(path) => GeneratorBuilder::new().with_config_file(path),
        None => Ok(GeneratorBuilder::new()),
    }
}

// Renders into a scratch directory, then copies the image to where it was asked for.
fn preview<F>(generator: &ProposalGenerator, output: &Path, render: F) -> Result<(), PipelineError>
where
    F: FnOnce(&Path) -> Result<sunquote::ImageArtifact, PipelineError>,
{
    let scratch = tempfile::Builder::new()
        .prefix("preview_")
        .tempdir_in(&generator.config().work_dir)?;
    let artifact = render(scratch.path())?;
    fs::copy(artifact.path(), output)?;
    println!("Wrote {} ({}x{} px)", output.display(), artifact.width_px, artifact.height_px);
    Ok(())
}

fn generate(
    generator: &ProposalGenerator,
    inputs: &[PathBuf],
    output_dir: &Path,
    base64: bool,
    summary: bool,
) -> Result<(), PipelineError> {
    let proposals = inputs
        .iter()
        .map(|path| read_input(path))
        .collect::<Result<Vec<_>, _>>()?;
    fs::create_dir_all(output_dir)?;

    let mut failures = 0;
    for (path, result) in inputs.iter().zip(generator.generate_batch(&proposals)) {
        match result {
            Ok(proposal) => {
                let target = output_dir.join(&proposal.file_name);
                fs::write(&target, &proposal.bytes)?;
                println!("{} -> {}", path.display(), target.display());
                if summary {
                    println!("{}", serde_json::to_string_pretty(&proposal.summary)?);
                }
                if base64 {
                    println!("{}", proposal.to_base64());
                }
            }
            Err(e) => {
                failures += 1;
                log::error!("{}: {}", path.display(), e);
            }
        }
    }

    if failures > 0 {
        return Err(PipelineError::Config(format!(
            "{} of {} proposals failed",
            failures,
            inputs.len()
        )));
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let builder = load_builder(cli.config.as_deref())?;
    match cli.command {
        Command::Generate { inputs, output_dir, base64, summary, timestamp } => {
            let builder = if timestamp {
                let mut settings = builder.config().document.clone();
                settings.creation_date = Some(chrono::Utc::now());
                builder.with_document_settings(settings)
            } else {
                builder
            };
            let generator = builder.build()?;
            generate(&generator, &inputs, &output_dir, base64, summary)
        }
        Command::Chart { input, output } => {
            let generator = builder.build()?;
            let input = read_input(&input)?;
            preview(&generator, &output, |dir| {
                generator.render_production_chart(
                    &input.monthly_production,
                    input.system.modules.quantity,
                    dir,
                )
            })
        }
        Command::Table { input, output } => {
            let generator = builder.build()?;
            let input = read_input(&input)?;
            preview(&generator, &output, |dir| {
                generator.render_return_table(&input.yearly_returns, dir)
            })
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("sunquote=info"))
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
