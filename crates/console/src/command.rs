//! Console command language.
//!
//! One command per line. Tokens are split on whitespace; double quotes
//! group a token containing spaces. Warehouse names may also be written
//! unquoted: every token before the fixed numeric tail belongs to the name.

use thiserror::Error;

use boardstock_infra::config::parse_switch;
use boardstock_inventory::Counts;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{field} must be a number (got {value:?})")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be a whole number (got {value:?})")]
    InvalidCount { field: &'static str, value: String },

    #[error("unterminated quote")]
    UnterminatedQuote,
}

/// Requested change to the warning settings; `None` keeps the current value.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SettingsChange {
    pub threshold: Option<f64>,
    pub enabled: Option<bool>,
}

impl SettingsChange {
    pub fn is_empty(&self) -> bool {
        self.threshold.is_none() && self.enabled.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    List,
    Show {
        warehouse: String,
    },
    Add {
        name: String,
    },
    Store {
        warehouse: String,
        length: f64,
        width: f64,
        thickness: f64,
        counts: Counts,
    },
    Take {
        warehouse: String,
        specification: String,
        counts: Counts,
    },
    Calc {
        length: f64,
        width: f64,
        thickness: f64,
        counts: Counts,
    },
    Totals,
    Settings(SettingsChange),
    /// Movement journal, optionally for one warehouse, as text or JSON lines.
    History {
        warehouse: Option<String>,
        json: bool,
    },
    Quit,
}

const STORE_USAGE: &str = "store <warehouse> <l> <w> <t> <stacks> <bundles> <sheets>";
const TAKE_USAGE: &str = "take <warehouse> <spec> <stacks> <bundles> <sheets>";
const CALC_USAGE: &str = "calc <l> <w> <t> <stacks> <bundles> <sheets>";
const SETTINGS_USAGE: &str = "settings [threshold <v>] [on|off]";

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let tokens = tokenize(line)?;
        let Some((head, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "list" | "ls" => Command::List,
            "totals" => Command::Totals,
            "history" => {
                let json = args.iter().any(|a| a == "--json");
                let rest: Vec<String> = args.iter().filter(|a| *a != "--json").cloned().collect();
                Command::History {
                    warehouse: name_from(&rest),
                    json,
                }
            }
            "quit" | "exit" => Command::Quit,
            "show" => Command::Show {
                warehouse: name_from(args).ok_or(CommandError::Usage("show <warehouse>"))?,
            },
            "add" => Command::Add {
                name: name_from(args).ok_or(CommandError::Usage("add <name>"))?,
            },
            "store" => {
                let (name, tail) = split_tail(args, 6).ok_or(CommandError::Usage(STORE_USAGE))?;
                Command::Store {
                    warehouse: name,
                    length: number("length", &tail[0])?,
                    width: number("width", &tail[1])?,
                    thickness: number("thickness", &tail[2])?,
                    counts: counts(&tail[3..])?,
                }
            }
            "take" => {
                let (name, tail) = split_tail(args, 4).ok_or(CommandError::Usage(TAKE_USAGE))?;
                Command::Take {
                    warehouse: name,
                    specification: tail[0].clone(),
                    counts: counts(&tail[1..])?,
                }
            }
            "calc" => {
                if args.len() != 6 {
                    return Err(CommandError::Usage(CALC_USAGE));
                }
                Command::Calc {
                    length: number("length", &args[0])?,
                    width: number("width", &args[1])?,
                    thickness: number("thickness", &args[2])?,
                    counts: counts(&args[3..])?,
                }
            }
            "settings" => Command::Settings(settings_change(args)?),
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }
    if in_quotes {
        return Err(CommandError::UnterminatedQuote);
    }
    if !current.is_empty() || quoted {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Join the remaining tokens into one name; `None` when nothing is left.
fn name_from(args: &[String]) -> Option<String> {
    let name = args.join(" ");
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Split `args` into a non-empty name and exactly `tail` trailing tokens.
fn split_tail(args: &[String], tail: usize) -> Option<(String, &[String])> {
    if args.len() <= tail {
        return None;
    }
    let (name, rest) = args.split_at(args.len() - tail);
    Some((name_from(name)?, rest))
}

fn number(field: &'static str, raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>().map_err(|_| CommandError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn count(field: &'static str, raw: &str) -> Result<u32, CommandError> {
    raw.parse::<u32>().map_err(|_| CommandError::InvalidCount {
        field,
        value: raw.to_string(),
    })
}

fn counts(raw: &[String]) -> Result<Counts, CommandError> {
    Ok(Counts::new(
        count("stacks", &raw[0])?,
        count("bundles", &raw[1])?,
        count("sheets", &raw[2])?,
    ))
}

fn settings_change(args: &[String]) -> Result<SettingsChange, CommandError> {
    let mut change = SettingsChange::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.eq_ignore_ascii_case("threshold") {
            let raw = iter.next().ok_or(CommandError::Usage(SETTINGS_USAGE))?;
            change.threshold = Some(number("threshold", raw)?);
        } else if let Some(enabled) = parse_switch(arg) {
            change.enabled = Some(enabled);
        } else {
            return Err(CommandError::Usage(SETTINGS_USAGE));
        }
    }
    Ok(change)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn unquoted_warehouse_names_keep_their_spaces() {
        assert_eq!(
            parse("store 仓位 A 1.22 2.44 0.018 1 1 3"),
            Command::Store {
                warehouse: "仓位 A".into(),
                length: 1.22,
                width: 2.44,
                thickness: 0.018,
                counts: Counts::new(1, 1, 3),
            }
        );
    }

    #[test]
    fn quoted_names_and_specs() {
        assert_eq!(
            parse(r#"take "Bin A" 1.220×2.440×0.018 0 2 5"#),
            Command::Take {
                warehouse: "Bin A".into(),
                specification: "1.220×2.440×0.018".into(),
                counts: Counts::new(0, 2, 5),
            }
        );
    }

    #[test]
    fn add_joins_name_tokens() {
        assert_eq!(parse("add 仓位 F"), Command::Add { name: "仓位 F".into() });
        assert_eq!(
            Command::parse("add").unwrap_err(),
            CommandError::Usage("add <name>")
        );
    }

    #[test]
    fn store_without_name_is_usage_error() {
        assert_eq!(
            Command::parse("store 1 1 1 1 1 1").unwrap_err(),
            CommandError::Usage(STORE_USAGE)
        );
    }

    #[test]
    fn bad_numbers_name_the_field() {
        assert_eq!(
            Command::parse("calc 1 wide 1 1 1 1").unwrap_err(),
            CommandError::InvalidNumber {
                field: "width",
                value: "wide".into()
            }
        );
        assert_eq!(
            Command::parse("calc 1 1 1 -1 1 1").unwrap_err(),
            CommandError::InvalidCount {
                field: "stacks",
                value: "-1".into()
            }
        );
    }

    #[test]
    fn settings_accepts_threshold_and_switch_in_any_order() {
        assert_eq!(
            parse("settings off threshold 3.5"),
            Command::Settings(SettingsChange {
                threshold: Some(3.5),
                enabled: Some(false),
            })
        );
        assert_eq!(parse("settings"), Command::Settings(SettingsChange::default()));
        assert!(Command::parse("settings threshold").is_err());
        assert!(Command::parse("settings loud").is_err());
    }

    #[test]
    fn unknown_and_unterminated() {
        assert_eq!(
            Command::parse("dance").unwrap_err(),
            CommandError::Unknown("dance".into())
        );
        assert_eq!(
            Command::parse(r#"show "Bin A"#).unwrap_err(),
            CommandError::UnterminatedQuote
        );
    }

    #[test]
    fn history_takes_optional_warehouse_and_json_flag() {
        assert_eq!(
            parse("history"),
            Command::History {
                warehouse: None,
                json: false
            }
        );
        assert_eq!(
            parse("history --json 仓位 A"),
            Command::History {
                warehouse: Some("仓位 A".into()),
                json: true
            }
        );
    }

    #[test]
    fn aliases() {
        assert_eq!(parse("LS"), Command::List);
        assert_eq!(parse("exit"), Command::Quit);
        assert_eq!(parse("?"), Command::Help);
    }
}
