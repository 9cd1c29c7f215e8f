mod backend;
mod config;
mod error;
mod export;
mod interview;
mod render;
mod request;
mod session;
mod transcript;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use backend::{Backend, BackendKind, GenerationBackend};
use error::InterviewError;
use interview::Interview;
use render::Palette;
use request::Tone;
use session::{Parameters, Session};

#[derive(Deserialize, Debug)]
struct Environment {
    anthropic_api_key: Option<String>,
    google_api_key: Option<String>,
}

impl Environment {
    fn api_key(&self, kind: BackendKind) -> Option<&str> {
        match kind {
            BackendKind::Anthropic => self.anthropic_api_key.as_deref(),
            BackendKind::Gemini => self.google_api_key.as_deref(),
        }
    }
}

#[derive(StructOpt, Debug)]
#[structopt(
    name = "character-interview",
    about = "Generate a fictional interview between two characters"
)]
struct Args {
    /// First character
    #[structopt(short = "a", long)]
    character_a: Option<String>,

    /// Second character
    #[structopt(short = "b", long)]
    character_b: Option<String>,

    /// What the characters should discuss
    #[structopt(short, long, default_value = "")]
    topic: String,

    /// Tone of the conversation (funny, dramatic, philosophical or creative)
    #[structopt(long, default_value = "Funny")]
    tone: Tone,

    /// Generation backend (anthropic or gemini); defaults to the config file's choice
    #[structopt(short = "m", long)]
    backend: Option<BackendKind>,

    /// API key for the backend; overrides ANTHROPIC_API_KEY / GOOGLE_API_KEY
    #[structopt(long)]
    api_key: Option<String>,

    /// Path to a configuration TOML file
    #[structopt(short = "c", long)]
    config: Option<PathBuf>,

    /// Directory exported transcripts are written to
    #[structopt(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Save the raw transcript after generating it
    #[structopt(long)]
    export: bool,

    /// Read a raw transcript from stdin instead of generating one
    #[structopt(long, conflicts_with = "interactive")]
    replay: bool,

    /// Keep prompting for new interviews
    #[structopt(short, long)]
    interactive: bool,

    /// Disable colors and styling
    #[structopt(long)]
    no_color: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

impl Args {
    fn palette(&self) -> Palette {
        if self.no_color {
            Palette::plain()
        } else {
            Palette::styled()
        }
    }

    fn parameters(&self) -> Parameters {
        Parameters {
            character_a: self.character_a.clone().unwrap_or_default(),
            character_b: self.character_b.clone().unwrap_or_default(),
            topic: self.topic.clone(),
            tone: self.tone,
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::from_args();
    init_tracing(args.verbose);

    let environment = envy::from_env::<Environment>().context("Failed to read environment")?;
    let config = config::Config::load(args.config.as_deref()).await?;

    if args.replay {
        return replay(&args).await;
    }

    let kind = args.backend.unwrap_or(config.backend);
    let backend = Backend::new(kind, config.settings(kind));
    let credential = args
        .api_key
        .as_deref()
        .or_else(|| environment.api_key(kind))
        .unwrap_or_default()
        .to_owned();

    if args.interactive {
        let input = std::io::stdin().lock().lines();
        interactive(&args, &backend, &credential, input).await?;
        return Ok(());
    }

    let interview = attempt(&args.parameters(), &credential, &backend).await?;
    print!("{}", render::render(&interview.transcript, &args.palette()));

    if args.export {
        save(&args.output_dir, &interview).await?;
    }

    Ok(())
}

async fn replay(args: &Args) -> Result<()> {
    let request = args.parameters().request()?;

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read transcript from stdin")?;

    let interview = Interview::from_raw(raw, request);
    print!("{}", render::render(&interview.transcript, &args.palette()));

    if args.export {
        save(&args.output_dir, &interview).await?;
    }

    Ok(())
}

async fn save(dir: &Path, interview: &Interview) -> Result<()> {
    let path = export::save(dir, interview, &chrono::Local::now()).await?;
    println!("Saved to {}", path.display());
    Ok(())
}

/// Validates the parameters and the credential, then calls the backend.
async fn attempt<B: GenerationBackend>(
    parameters: &Parameters,
    credential: &str,
    backend: &B,
) -> Result<Interview, InterviewError> {
    let request = parameters.request()?;
    interview::require_credential(backend.kind(), credential)?;

    println!("Generating interview…");
    interview::generate(request, credential, backend).await
}

enum Step {
    Edit,
    Generate,
    Act,
}

/// Runs the prompt loop until `quit` or end of input and returns the final session.
async fn interactive<B, I>(args: &Args, backend: &B, credential: &str, mut input: I) -> Result<Session>
where
    B: GenerationBackend,
    I: Iterator<Item = std::io::Result<String>>,
{
    let mut session = Session::new(args.parameters());
    let mut step = Step::Edit;

    loop {
        step = match step {
            Step::Edit => {
                let Some(parameters) = ask_parameters(&mut input, &session.parameters)? else {
                    return Ok(session);
                };
                session = session.with_parameters(parameters);
                Step::Generate
            }
            Step::Generate => match attempt(&session.parameters, credential, backend).await {
                Ok(interview) => {
                    print!("{}", render::render(&interview.transcript, &args.palette()));
                    session = session.with_interview(interview);
                    Step::Act
                }
                Err(error) => {
                    eprintln!("{error}");
                    // A failed tone retry keeps the interview it was meant to replace.
                    if session.current.is_some() {
                        Step::Act
                    } else {
                        Step::Edit
                    }
                }
            },
            Step::Act => {
                let Some(action) = ask(
                    &mut input,
                    "[s]ave, [n]ew interview, [t]ry different tone, [q]uit",
                    "q",
                )?
                else {
                    return Ok(session);
                };

                match action.to_lowercase().as_str() {
                    "s" | "save" => {
                        if let Some(interview) = &session.current {
                            save(&args.output_dir, interview).await?;
                        }
                        Step::Act
                    }
                    "n" | "new" => {
                        session = session.cleared();
                        Step::Edit
                    }
                    "t" | "tone" => {
                        let Some(tone) = ask_tone(&mut input, session.parameters.tone)? else {
                            return Ok(session);
                        };
                        let parameters = Parameters {
                            tone,
                            ..session.parameters.clone()
                        };
                        session = session.with_parameters(parameters);
                        Step::Generate
                    }
                    "q" | "quit" => return Ok(session),
                    other => {
                        eprintln!("Unknown action `{other}`");
                        Step::Act
                    }
                }
            }
        };
    }
}

/// Prompts for one value; a blank answer keeps `default`. `None` at end of input.
fn ask<I>(input: &mut I, label: &str, default: &str) -> Result<Option<String>>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    if default.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{default}]: ");
    }
    std::io::stdout().flush()?;

    let Some(line) = input.next() else {
        return Ok(None);
    };
    let line = line.context("Failed to read from stdin")?;
    let answer = line.trim();

    Ok(Some(if answer.is_empty() {
        default.to_owned()
    } else {
        answer.to_owned()
    }))
}

fn ask_tone<I>(input: &mut I, current: Tone) -> Result<Option<Tone>>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let label = format!("Tone ({})", Tone::choices());
    loop {
        let Some(answer) = ask(input, &label, &current.to_string())? else {
            return Ok(None);
        };
        match answer.parse() {
            Ok(tone) => return Ok(Some(tone)),
            Err(_) => eprintln!("Unknown tone `{answer}`"),
        }
    }
}

fn ask_parameters<I>(input: &mut I, last: &Parameters) -> Result<Option<Parameters>>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let Some(character_a) = ask(input, "First character", &last.character_a)? else {
        return Ok(None);
    };
    let Some(character_b) = ask(input, "Second character", &last.character_b)? else {
        return Ok(None);
    };
    let Some(topic) = ask(input, "Topic (optional)", &last.topic)? else {
        return Ok(None);
    };
    let Some(tone) = ask_tone(input, last.tone)? else {
        return Ok(None);
    };

    Ok(Some(Parameters {
        character_a,
        character_b,
        topic,
        tone,
    }))
}
