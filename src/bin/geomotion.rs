use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use geomotion::{RenderHandle, Script, SceneEvent, Session, SessionOpts};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "geomotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a script, play every transform and print the resulting scene as JSON.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Session options JSON (frame rate, timing, styles).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw final states without animating.
    #[arg(long)]
    direct: bool,

    /// Omit the per-frame event log and print only the final shapes.
    #[arg(long)]
    final_only: bool,

    /// Write the report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct GraphReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<SceneEvent>>,
    live: BTreeMap<RenderHandle, geomotion::LiveShape>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let script: Script = read_json(&args.in_path, "script")?;
    let opts = match &args.config {
        Some(path) => {
            let opts: SessionOpts = read_json(path, "config")?;
            opts.validate()?;
            opts
        }
        None => SessionOpts::default(),
    };

    let mut session = Session::new(opts)?;
    session.run_script(&script)?;
    let scenes = session.attach_recording_scenes();
    let commands = session.play_all(args.direct)?;
    tracing::info!(commands = commands.len(), graphs = scenes.len(), "done");

    let report: BTreeMap<String, GraphReport> = scenes
        .iter()
        .map(|(label, scene)| {
            let scene = scene.borrow();
            let report = GraphReport {
                events: (!args.final_only).then(|| scene.events().to_vec()),
                live: scene.live().clone(),
            };
            (label.clone(), report)
        })
        .collect();

    let json = serde_json::to_string_pretty(&report).context("serialize report")?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("write report '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{json}").context("write report")?;
        }
    }
    Ok(())
}
