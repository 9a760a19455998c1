//! Line-driven interactive session.
//!
//! Each input line is one user action. It is parsed, applied to the controller
//! and rendered before the next line is read, so mutations never interleave.

use super::print::{print_messages, print_record, print_table};
use colored::Colorize;
use pumpz::api::{parse_column, PumpzApi};
use pumpz::commands::sort::SortKey;
use pumpz::error::{PumpzError, Result};
use pumpz::store::RecordStore;
use std::io::{BufRead, IsTerminal, Write};
use std::str::FromStr;

const PROMPT: &str = "pumpz> ";

const HELP: &str = "\
Commands:
  search <text>          Filter by name, type or area (empty text clears)
  sort <column>          Sort by column; repeat to flip direction
  page <n>               Go to page n
  next | prev            Move one page
  size <n>               Rows per page
  show                   Show the current page
  edit <id>              Start editing a pump (\"7\" for a text id)
  set <column> <value>   Change a field of the pump being edited
  save | cancel          Finish the edit
  help                   This text
  quit                   Leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Sort(String),
    Page(i64),
    Next,
    Prev,
    Size(usize),
    Show,
    Edit(String),
    Set { key: String, value: String },
    Save,
    Cancel,
    Help,
    Quit,
}

fn usage(msg: &str) -> PumpzError {
    PumpzError::Api(format!("usage: {}", msg))
}

impl FromStr for ShellCommand {
    type Err = PumpzError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let cmd = match word.to_lowercase().as_str() {
            "search" | "find" | "/" => ShellCommand::Search(rest.to_string()),
            "sort" if !rest.is_empty() => ShellCommand::Sort(rest.to_string()),
            "sort" => return Err(usage("sort <column>")),
            "page" | "p" => ShellCommand::Page(
                rest.parse()
                    .map_err(|_| usage("page <number>"))?,
            ),
            "next" | "n" => ShellCommand::Next,
            "prev" | "previous" => ShellCommand::Prev,
            "size" => ShellCommand::Size(rest.parse().map_err(|_| usage("size <number>"))?),
            "show" | "ls" | "" => ShellCommand::Show,
            "edit" | "e" if !rest.is_empty() => ShellCommand::Edit(rest.to_string()),
            "edit" | "e" => return Err(usage("edit <id>")),
            "set" => {
                let (key, value) = match rest.split_once(char::is_whitespace) {
                    Some((key, value)) => (key, value.trim()),
                    None if !rest.is_empty() => (rest, ""),
                    None => return Err(usage("set <column> <value>")),
                };
                ShellCommand::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            }
            "save" | "commit" => ShellCommand::Save,
            "cancel" => ShellCommand::Cancel,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => {
                return Err(PumpzError::Api(format!(
                    "unknown command '{}' (try 'help')",
                    other
                )))
            }
        };
        Ok(cmd)
    }
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

pub fn run<S: RecordStore, R: BufRead>(api: &mut PumpzApi<S>, input: R) -> Result<()> {
    let interactive = std::io::stdin().is_terminal();
    print_table(&api.view(), api.sort_state());

    let mut lines = input.lines();
    loop {
        if interactive {
            print!("{}", PROMPT);
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match line.parse::<ShellCommand>().and_then(|cmd| execute(api, cmd)) {
            Ok(Flow::Stop) => break,
            Ok(Flow::Continue) => {}
            Err(e) => println!("{}", format!("Error: {}", e).red()),
        }
    }
    Ok(())
}

fn execute<S: RecordStore>(api: &mut PumpzApi<S>, cmd: ShellCommand) -> Result<Flow> {
    match cmd {
        ShellCommand::Search(text) => {
            api.set_query(text);
            show(api);
        }
        ShellCommand::Sort(key) => {
            api.set_sort_column(SortKey::from(key.as_str()));
            show(api);
        }
        ShellCommand::Page(n) => {
            api.set_page(n);
            show(api);
        }
        ShellCommand::Next => {
            if api.next_page() {
                show(api);
            } else {
                println!("{}", "Already on the last page".dimmed());
            }
        }
        ShellCommand::Prev => {
            if api.prev_page() {
                show(api);
            } else {
                println!("{}", "Already on the first page".dimmed());
            }
        }
        ShellCommand::Size(n) => {
            api.set_page_size(n).map_err(|e| match e {
                PumpzError::InvalidPageSize(n) => PumpzError::Api(format!(
                    "page size {} is not allowed (choose from {:?})",
                    n,
                    api.page_sizes()
                )),
                other => other,
            })?;
            show(api);
        }
        ShellCommand::Show => show(api),
        ShellCommand::Edit(raw) => {
            let id = api
                .find_id(&raw)
                .ok_or_else(|| PumpzError::Api(format!("no pump with id {}", raw)))?;
            let result = api.begin_edit(&id)?;
            print_messages(&result.messages);
            if let Some(record) = api.edit_session().buffer() {
                print_record(record);
            }
        }
        ShellCommand::Set { key, value } => {
            let column = parse_column(&key)?;
            api.update_edit_field(column, value)?;
            if let Some(record) = api.edit_session().buffer() {
                print_record(record);
            }
        }
        ShellCommand::Save => {
            let result = api.commit_edit()?;
            print_messages(&result.messages);
            show(api);
        }
        ShellCommand::Cancel => {
            let result = api.cancel_edit()?;
            print_messages(&result.messages);
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => return Ok(Flow::Stop),
    }
    Ok(Flow::Continue)
}

fn show<S: RecordStore>(api: &PumpzApi<S>) {
    print_table(&api.view(), api.sort_state());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpz::config::PumpzConfig;
    use pumpz::model::{Column, FieldValue, Record};
    use pumpz::store::memory::InMemoryStore;

    fn parse(line: &str) -> ShellCommand {
        line.parse().unwrap()
    }

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(parse("search main pump"), ShellCommand::Search("main pump".into()));
        assert_eq!(parse("search"), ShellCommand::Search(String::new()));
        assert_eq!(parse("sort flowRate"), ShellCommand::Sort("flowRate".into()));
        assert_eq!(parse("page -1"), ShellCommand::Page(-1));
        assert_eq!(parse("  NEXT "), ShellCommand::Next);
        assert_eq!(parse("size 25"), ShellCommand::Size(25));
        assert_eq!(parse("edit P-7"), ShellCommand::Edit("P-7".into()));
        assert_eq!(
            parse("set name Main Pump 2"),
            ShellCommand::Set {
                key: "name".into(),
                value: "Main Pump 2".into()
            }
        );
        assert_eq!(
            parse("set block"),
            ShellCommand::Set {
                key: "block".into(),
                value: String::new()
            }
        );
        assert_eq!(parse(""), ShellCommand::Show);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!("page two".parse::<ShellCommand>().is_err());
        assert!("sort".parse::<ShellCommand>().is_err());
        assert!("set".parse::<ShellCommand>().is_err());
        assert!("launch".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn script_edits_and_saves() {
        let mut api = PumpzApi::new(InMemoryStore::new(), &PumpzConfig::default());
        api.load(vec![
            Record::new(1).with(Column::Name, "Main Pump"),
            Record::new(2).with(Column::Name, "Backup Pump"),
        ]);

        let script = "edit 2\nset name Spare Pump\nsave\nquit\nedit 1\n";
        run(&mut api, script.as_bytes()).unwrap();

        assert_eq!(api.store().records()[1].name, FieldValue::text("Spare Pump"));
        assert!(!api.edit_session().is_editing());
    }

    #[test]
    fn errors_do_not_stop_the_session() {
        let mut api = PumpzApi::new(InMemoryStore::new(), &PumpzConfig::default());
        api.load(vec![Record::new(1).with(Column::Name, "Main Pump")]);

        let script = "save\nset bogus 1\nedit 9\nsearch main\n";
        run(&mut api, script.as_bytes()).unwrap();

        assert_eq!(api.query(), "main");
    }
}
