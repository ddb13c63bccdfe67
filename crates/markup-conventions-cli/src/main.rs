mod args;
mod terminal;

use anyhow::{Context, Result, bail};
use args::{Cli, Command, ConfigAction, USAGE};
use markup_conventions_config::Config;
use markup_conventions_engine::{
    AuthoringError, ConventionDraft, DEFAULT_KEYWORD_COLOR, JsonFileStore, MarkupEngine,
    Resolution, SaveOutcome, builtins, conventions::model::is_hex_color,
};
use std::{
    env,
    io::{self, Read},
    process,
};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = match Cli::parse(env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    if cli.command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    // Flags win over the config file, which wins over built-in defaults
    let effective = Config {
        store_path: cli.store.clone().unwrap_or(config.store_path),
        keyword_color: cli.keyword_color.clone().or(config.keyword_color),
    };
    let keyword_color = effective
        .keyword_color
        .clone()
        .unwrap_or_else(|| DEFAULT_KEYWORD_COLOR.to_string());
    if !is_hex_color(&keyword_color) {
        bail!("Keyword color {keyword_color:?} is not #rgb or #rrggbb");
    }

    log::debug!("Using convention store {}", effective.store_path.display());
    let engine = MarkupEngine::new(JsonFileStore::new(effective.store_path.clone()));

    run(&engine, cli.command, &effective, &keyword_color)
}

fn run(
    engine: &MarkupEngine<JsonFileStore>,
    command: Command,
    effective: &Config,
    keyword_color: &str,
) -> Result<()> {
    match command {
        Command::Help => println!("{USAGE}"),
        Command::Config { action } => run_config(action, effective, keyword_color)?,
        Command::Render { text } => {
            let text = text_or_stdin(text)?;
            println!("{}", engine.try_parse(&text, keyword_color)?);
        }
        Command::Preview { text } => {
            let text = text_or_stdin(text)?;
            let mut stdout = io::stdout().lock();
            engine.try_segments(&text, |segments| {
                terminal::write_segments(&mut stdout, segments, keyword_color)
            })??;
        }
        Command::Add {
            opening,
            color,
            effects,
            description,
            edit_existing,
        } => {
            let mut draft = match ConventionDraft::from_input(&opening, &color, effects) {
                Ok(draft) => draft,
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            let resolution = if edit_existing {
                Resolution::EditExisting
            } else {
                Resolution::Reject
            };

            match engine.submit(draft, resolution) {
                Ok(SaveOutcome::Created(c)) => println!("Added {} as {}", c.syntax, c.key),
                Ok(SaveOutcome::Updated(c)) => println!("Updated {} ({})", c.key, c.syntax),
                Err(e @ AuthoringError::Conflict { .. }) => {
                    eprintln!("Error: {e}");
                    eprintln!("Re-run with --edit-existing to update it, or pick another opening");
                    process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::List => {
            for convention in builtins() {
                println!(
                    "{:<40} {:<10} {:<8} {}  (built-in)",
                    convention.key,
                    convention.syntax,
                    convention.color.to_string(),
                    convention.effects
                );
            }
            for convention in engine
                .custom_conventions()
                .context("Failed to read custom conventions")?
            {
                println!(
                    "{:<40} {:<10} {:<8} {}  {}",
                    convention.key,
                    convention.syntax,
                    convention.color.to_string(),
                    convention.effects,
                    convention.description
                );
            }
        }
        Command::Remove { key } => {
            let removed = engine.remove(&key)?;
            println!("Removed {} ({}text{})", key, removed.opening, removed.closing);
        }
    }
    Ok(())
}

fn run_config(action: ConfigAction, effective: &Config, keyword_color: &str) -> Result<()> {
    let config_path = Config::config_path();
    match action {
        ConfigAction::Show => {
            println!("config file:   {}", config_path.display());
            println!("store:         {}", effective.store_path.display());
            println!("keyword color: {keyword_color}");
        }
        ConfigAction::Init => {
            if config_path.exists() {
                eprintln!(
                    "Error: Config file already exists at {}",
                    config_path.display()
                );
                process::exit(1);
            }
            effective.save().context("Failed to write config file")?;
            println!("Wrote {}", config_path.display());
        }
    }
    Ok(())
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read text from stdin")?;
            Ok(buf.trim_end_matches('\n').to_string())
        }
    }
}
