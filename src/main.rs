use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use slide_canvas::camera::Point;
use slide_canvas::config::EditorConfig;
use slide_canvas::defaults::create_default_named;
use slide_canvas::doc::{ElementStyle, PartialElement};
use slide_canvas::engine::Engine;
use slide_canvas::error::{ConfigError, EditorError};
use slide_canvas::input::InputEvent;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot open input {path}: {source}")]
    Open { path: String, source: io::Error },
    #[error("read failed: {0}")]
    Read(#[from] io::Error),
    #[error("line {line}: invalid step: {source}")]
    Step { line: usize, source: serde_json::Error },
    #[error("line {line}: no element is selected")]
    NoSelection { line: usize },
    #[error("line {line}: {source}")]
    Editor { line: usize, source: EditorError },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "slide-canvas", about = "Slide canvas editor core: replay input scripts and inspect defaults")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSONL script of steps and print the final scene.
    Replay(ReplayArgs),
    /// Print the element `add` would create for a type.
    Defaults(DefaultsArgs),
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long, default_value = "-", help = "Input file path, or - for stdin")]
    input: String,

    #[arg(long, env = "SLIDE_CANVAS_CONFIG_FROM_ENV", default_value_t = false)]
    config_from_env: bool,

    #[arg(long, default_value_t = false, help = "Print every step's actions as JSONL before the scene")]
    actions: bool,
}

#[derive(Args, Debug)]
struct DefaultsArgs {
    #[arg(long = "type")]
    type_name: String,

    #[arg(long)]
    subtype: Option<String>,

    #[arg(long)]
    content: Option<String>,
}

/// One line of a replay script.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    Add {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        subtype: Option<String>,
        #[serde(default)]
        content: Option<String>,
    },
    /// Partial update of the selected element.
    Update { fields: PartialElement },
    /// Style patch for the selected element.
    Style { style: ElementStyle },
    /// Text typed into the selected text element.
    Text { text: String },
    /// Cell edit on the selected table.
    Cell { row: usize, col: usize, value: String },
    /// Double-click contract with an explicit anchor.
    RequestEdit { x: f64, y: f64 },
    Event { event: InputEvent },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay(args) => run_replay(&args),
        Command::Defaults(args) => run_defaults(&args),
    }
}

fn run_replay(args: &ReplayArgs) -> Result<(), CliError> {
    let config = if args.config_from_env { EditorConfig::from_env()? } else { EditorConfig::default() };
    let mut engine = Engine::with_config(config);

    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file =
            File::open(&args.input).map_err(|source| CliError::Open { path: args.input.clone(), source })?;
        Box::new(BufReader::new(file))
    };

    let mut applied = 0_usize;
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step: Step =
            serde_json::from_str(trimmed).map_err(|source| CliError::Step { line: line_no, source })?;
        let actions = apply_step(&mut engine, step, line_no)?;
        if args.actions {
            println!("{}", serde_json::to_string(&actions)?);
        }
        applied = applied.saturating_add(1);
    }

    tracing::info!(steps = applied, elements = engine.elements().len(), "replay finished");
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}

fn apply_step(engine: &mut Engine, step: Step, line: usize) -> Result<Vec<slide_canvas::engine::Action>, CliError> {
    let editor = |source| CliError::Editor { line, source };
    match step {
        Step::Add { type_name, subtype, content } => {
            let (_, actions) = engine.add_element_named(&type_name, subtype.as_deref(), content.as_deref());
            Ok(actions)
        }
        Step::Update { fields } => {
            let id = engine.selected().ok_or(CliError::NoSelection { line })?;
            engine.update_element(id, &fields).map_err(editor)
        }
        Step::Style { style } => {
            let id = engine.selected().ok_or(CliError::NoSelection { line })?;
            engine.update_element(id, &PartialElement::style(style)).map_err(editor)
        }
        Step::Text { text } => {
            let id = engine.selected().ok_or(CliError::NoSelection { line })?;
            engine.edit_text(id, &text).map_err(editor)
        }
        Step::Cell { row, col, value } => {
            let id = engine.selected().ok_or(CliError::NoSelection { line })?;
            engine.edit_cell(id, row, col, &value).map_err(editor)
        }
        Step::RequestEdit { x, y } => {
            let id = engine.selected().ok_or(CliError::NoSelection { line })?;
            engine.request_edit(id, Point::new(x, y)).map_err(editor)
        }
        Step::Event { event } => Ok(engine.handle(&event)),
    }
}

fn run_defaults(args: &DefaultsArgs) -> Result<(), CliError> {
    let position = EditorConfig::default().default_position;
    let element =
        create_default_named(&args.type_name, args.subtype.as_deref(), args.content.as_deref(), position);
    println!("{}", serde_json::to_string_pretty(&element)?);
    Ok(())
}
