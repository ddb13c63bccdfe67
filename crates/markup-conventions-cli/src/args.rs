use anyhow::{Result, anyhow, bail};
use markup_conventions_engine::{Effect, Effects};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: markup-conventions [--store <path>] [--keyword-color <hex>] <command>

Commands:
  render [text]        Render text (or stdin) to HTML
  preview [text]       Render text (or stdin) with terminal colors
  add <opening> <color|inherit|keyword> [glow] [bold] [flash] [pulse]
      [--description <text>] [--edit-existing]
                       Add a custom convention
  list                 List built-in and custom conventions
  remove <key>         Remove a custom convention
  config [show|init]   Show settings, or write them to the config file
  help                 Show this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Render {
        text: Option<String>,
    },
    Preview {
        text: Option<String>,
    },
    Add {
        opening: String,
        color: String,
        effects: Effects,
        description: Option<String>,
        edit_existing: bool,
    },
    List,
    Remove {
        key: String,
    },
    Config {
        action: ConfigAction,
    },
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    Init,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub store: Option<PathBuf>,
    pub keyword_color: Option<String>,
    pub command: Command,
}

impl Cli {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut store = None;
        let mut keyword_color = None;
        let mut description = None;
        let mut edit_existing = false;
        let mut positional = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--store" => store = Some(PathBuf::from(value_for(&arg, args.next())?)),
                "--keyword-color" => keyword_color = Some(value_for(&arg, args.next())?),
                "--description" => description = Some(value_for(&arg, args.next())?),
                "--edit-existing" => edit_existing = true,
                "-h" | "--help" => positional.insert(0, "help".to_string()),
                flag if flag.starts_with("--") => bail!("Unknown option {flag}"),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            None | Some("help") => Command::Help,
            Some("render") => Command::Render {
                text: joined(positional),
            },
            Some("preview") => Command::Preview {
                text: joined(positional),
            },
            Some("add") => {
                let opening = positional
                    .next()
                    .ok_or_else(|| anyhow!("add needs an opening sequence"))?;
                let color = positional
                    .next()
                    .ok_or_else(|| anyhow!("add needs a color, inherit or keyword"))?;
                let effects = positional
                    .map(|name| {
                        Effect::from_name(&name).ok_or_else(|| anyhow!("Unknown effect {name:?}"))
                    })
                    .collect::<Result<Effects>>()?;
                Command::Add {
                    opening,
                    color,
                    effects,
                    description,
                    edit_existing,
                }
            }
            Some("list") => Command::List,
            Some("remove") => Command::Remove {
                key: positional
                    .next()
                    .ok_or_else(|| anyhow!("remove needs a convention key"))?,
            },
            Some("config") => Command::Config {
                action: match positional.next().as_deref() {
                    None | Some("show") => ConfigAction::Show,
                    Some("init") => ConfigAction::Init,
                    Some(other) => bail!("Unknown config action {other:?}"),
                },
            },
            Some(other) => bail!("Unknown command {other:?}"),
        };

        Ok(Self {
            store,
            keyword_color,
            command,
        })
    }
}

fn value_for(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| anyhow!("{flag} needs a value"))
}

/// Remaining words as one text, or `None` to read stdin.
fn joined(words: impl Iterator<Item = String>) -> Option<String> {
    let words: Vec<_> = words.collect();
    (!words.is_empty()).then(|| words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Cli> {
        Cli::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_render_joins_words() {
        let cli = parse(&["render", "The", "<artifact>", "glows."]).unwrap();
        assert_eq!(
            cli.command,
            Command::Render {
                text: Some("The <artifact> glows.".to_string())
            }
        );
    }

    #[test]
    fn test_render_without_text_reads_stdin() {
        let cli = parse(&["render"]).unwrap();
        assert_eq!(cli.command, Command::Render { text: None });
    }

    #[test]
    fn test_global_options_anywhere() {
        let cli = parse(&[
            "preview",
            "--keyword-color",
            "#00ffff",
            "<x>",
            "--store",
            "/tmp/c.json",
        ])
        .unwrap();
        assert_eq!(cli.keyword_color.as_deref(), Some("#00ffff"));
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/c.json")));
        assert_eq!(
            cli.command,
            Command::Preview {
                text: Some("<x>".to_string())
            }
        );
    }

    #[test]
    fn test_add_with_effects() {
        let cli = parse(&[
            "add",
            ",.",
            "#888",
            "glow",
            "pulse",
            "--description",
            "Whispers",
            "--edit-existing",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Add {
                opening: ",.".to_string(),
                color: "#888".to_string(),
                effects: Effects::NONE.with(Effect::Glow).with(Effect::Pulse),
                description: Some("Whispers".to_string()),
                edit_existing: true,
            }
        );
    }

    #[rstest]
    #[case(&[], Command::Help)]
    #[case(&["help"], Command::Help)]
    #[case(&["list", "--help"], Command::Help)]
    #[case(&["list"], Command::List)]
    #[case(&["remove", "custom-1"], Command::Remove { key: "custom-1".to_string() })]
    #[case(&["config"], Command::Config { action: ConfigAction::Show })]
    #[case(&["config", "init"], Command::Config { action: ConfigAction::Init })]
    fn test_simple_commands(#[case] args: &[&str], #[case] expected: Command) {
        assert_eq!(parse(args).unwrap().command, expected);
    }

    #[rstest]
    #[case(&["add"], "opening")]
    #[case(&["add", "~"], "color")]
    #[case(&["add", "~", "inherit", "sparkle"], "sparkle")]
    #[case(&["remove"], "key")]
    #[case(&["frobnicate"], "frobnicate")]
    #[case(&["config", "reset"], "reset")]
    #[case(&["list", "--store"], "--store")]
    #[case(&["list", "--verbose"], "--verbose")]
    fn test_invalid_arguments(#[case] args: &[&str], #[case] mentions: &str) {
        let err = parse(args).unwrap_err();
        assert!(err.to_string().contains(mentions), "{err}");
    }
}
