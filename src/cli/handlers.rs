// src/cli/handlers.rs
use crate::artifacts::{ArtifactWriter, ErrorRecord};
use crate::cli::args::RunArgs;
use crate::config::Config;
use crate::error::DocGenError;
use crate::events::{EventKind, EventLogger};
use crate::exit::DocGenExit;
use crate::generator::{DocGenerator, OpenAiClient};
use crate::item::DocMap;
use crate::pipeline::{self, RunOptions};
use crate::placeholder::InjectOptions;
use crate::reporting::Console;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_BASE: &str = "input";

fn get_work_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Handles `docgen run`.
///
/// # Errors
/// Returns error for config, I/O or serialization failures. Missing input and
/// parse failures are reported through the exit code instead.
pub fn handle_run(args: &RunArgs) -> Result<DocGenExit> {
    let console = Console::new(args.quiet);
    let config = resolve_config(args)?;

    let out_dir = args.out.clone().unwrap_or_else(|| config.output.dir.clone());
    let base = args
        .base
        .clone()
        .or_else(|| file_stem(&args.input))
        .unwrap_or_else(|| DEFAULT_BASE.to_string());

    let events = EventLogger::new(&out_dir);
    if args.clean {
        events.reset()?;
    }
    let writer = ArtifactWriter::new(&out_dir, &base, &events)?;

    console.step("Input:", &args.input);
    console.step("Output:", &out_dir);
    console.step("Base:", Path::new(&base));
    events.log(EventKind::RunStarted {
        input: args.input.display().to_string(),
    });

    let raw = match fs::read_to_string(&args.input) {
        Ok(raw) => raw,
        Err(source) => {
            let err = DocGenError::InputUnavailable {
                source,
                path: args.input.clone(),
            };
            writer.write_failure(&[ErrorRecord::message(err.to_string())], false)?;
            console.error(&err.to_string());
            return Ok(DocGenExit::from(&err));
        }
    };

    let client = if args.no_generate {
        None
    } else {
        OpenAiClient::from_config(&config.generation)
    };
    if client.is_none() {
        console.notice("No API key or --no-generate given; skipping generation.");
    }

    let opts = RunOptions {
        inject: InjectOptions {
            replace_existing: config.output.replace_existing,
        },
    };
    let generator = client.as_ref().map(|c| c as &dyn DocGenerator);

    match pipeline::run(&raw, generator, opts, &events) {
        Ok(run) => {
            writer.write_run(&run)?;
            report_written(&console, &writer, &run);
            console.summary(&run);
            Ok(DocGenExit::Success)
        }
        Err(DocGenError::ParseFailure(errors)) => {
            let records: Vec<ErrorRecord> = errors.iter().map(ErrorRecord::from).collect();
            let path = writer.write_failure(&records, true)?;
            console.error(&format!("parse failed; see {}", path.display()));
            console.syntax_errors(&records);
            Ok(DocGenExit::ParseFailure)
        }
        Err(e) => Err(e.into()),
    }
}

/// Handles `docgen map`.
///
/// # Errors
/// Returns error if serialization fails.
pub fn handle_map(input: &Path) -> Result<DocGenExit> {
    let console = Console::new(true);
    let raw = match fs::read_to_string(input) {
        Ok(raw) => raw,
        Err(source) => {
            let err = DocGenError::InputUnavailable {
                source,
                path: input.to_path_buf(),
            };
            console.error(&err.to_string());
            return Ok(DocGenExit::from(&err));
        }
    };

    match pipeline::map_source(&raw, &EventLogger::disabled()) {
        Ok(map) => {
            println!("{}", serde_json::to_string_pretty(&map.items)?);
            Ok(DocGenExit::Success)
        }
        Err(DocGenError::ParseFailure(errors)) => {
            let records: Vec<ErrorRecord> = errors.iter().map(ErrorRecord::from).collect();
            console.error("parse failed");
            console.syntax_errors(&records);
            Ok(DocGenExit::ParseFailure)
        }
        Err(e) => Err(e.into()),
    }
}

/// Handles `docgen apply`.
///
/// # Errors
/// Returns error if either input is unreadable or the docs map is not valid JSON.
pub fn handle_apply(placeholder: &Path, docs: &Path, output: Option<&Path>) -> Result<DocGenExit> {
    let console = Console::new(output.is_none());
    let text = fs::read_to_string(placeholder)
        .with_context(|| format!("Failed to read {}", placeholder.display()))?;
    let json = fs::read_to_string(docs)
        .with_context(|| format!("Failed to read {}", docs.display()))?;
    let map: DocMap = serde_json::from_str(&json)
        .with_context(|| format!("Invalid docs map in {}", docs.display()))?;

    let applied = pipeline::apply_docs(&text, &map);

    match output {
        Some(path) => {
            fs::write(path, &applied.text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            console.wrote("Documented", path);
        }
        None => print!("{}", applied.text),
    }

    if !applied.unmatched.is_empty() {
        let ids: Vec<String> = applied.unmatched.iter().map(ToString::to_string).collect();
        console.notice(&format!("No documentation for: {}", ids.join(", ")));
    }
    Ok(DocGenExit::Success)
}

fn resolve_config(args: &RunArgs) -> Result<Config> {
    let mut config = Config::load(&get_work_dir())?;
    if let Some(model) = &args.model {
        config.generation.model.clone_from(model);
    }
    if let Some(base) = &args.api_base {
        config.generation.api_base.clone_from(base);
    }
    if let Some(secs) = args.timeout {
        config.generation.timeout_secs = secs;
    }
    if args.replace_existing {
        config.output.replace_existing = true;
    }
    Ok(config)
}

fn report_written(console: &Console, writer: &ArtifactWriter, run: &pipeline::DocRun) {
    console.wrote("Mapping", &writer.doc_map_path());
    console.wrote("Prompts", &writer.prompts_path());
    if run.placeholder.is_some() {
        console.wrote("Placeholders", &writer.placeholder_path());
    }
    if run.generation.is_some() {
        console.wrote("Generated", &writer.generated_docs_path());
    }
    if run.documented.is_some() {
        console.wrote("Documented", &writer.documented_path());
    }
    if run.preview.is_some() {
        console.wrote("Preview", &writer.preview_path());
    }
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
