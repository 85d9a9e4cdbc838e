//! A tiny line oriented command language for driving a [`Tree<Item>`]. This is what the
//! `counted-bst` binary runs but it is usable on its own.
//!
//! Each non-blank line holds one command. Lines starting with `#` are comments.
//!
//! | command           | output                                      |
//! |-------------------|---------------------------------------------|
//! | `insert <chars>`  | `inserted <c>` / `duplicate <c>` per char   |
//! | `remove <c>`      | `removed <c>` / `missing <c>`               |
//! | `retrieve <c>`    | `found <c>` / `missing <c>`                 |
//! | `depth <c>`       | the depth, or `-1`                          |
//! | `descendants <c>` | the number of descendants, or `-1`          |
//! | `count <c>`       | the occurrence count, or `0`                |
//! | `empty`           | nothing                                     |
//! | `is-empty`        | `true` / `false`                            |
//! | `print`           | the in-order dump of the tree               |
//! | `snapshot`        | nothing; remembers a deep copy of the tree  |
//! | `compare`         | `equal` / `not equal` against the snapshot  |
//!
//! Items are single non-whitespace characters. Whitespace only separates words, so `insert a b`
//! inserts `a` and `b`, and a whitespace item (such as [`Item::default`]) can only be stored
//! through [`Tree`] directly.
//!
//! # Examples
//!
//! ```
//! use counted_bst::script::{Script, Session};
//!
//! let script: Script = "insert dbfac\nremove b\ndepth c\nprint".parse()?;
//!
//! let mut output = String::new();
//! Session::new().run(&script, &mut output)?;
//!
//! assert_eq!(
//!     output,
//!     "inserted d\ninserted b\ninserted f\ninserted a\ninserted c\n\
//!      removed b\n\
//!      1\n\
//!      a 1\nc 1\nd 1\nf 1\n"
//! );
//! # Ok::<(), counted_bst::script::ScriptError>(())
//! ```

use std::fmt::{self, Write};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::{Item, Tree};

/// What the text format prints for a depth or descendant count of a missing item.
const NOT_FOUND: &str = "-1";

/// Everything that can go wrong parsing or running a script. Line numbers start at 1.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    /// The first word of a line isn't a command.
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand {
        /// Where the command was.
        line: usize,
        /// The word that isn't a command.
        command: String,
    },

    /// A command which works on an item was given none.
    #[error("line {line}: `{command}` needs an argument")]
    MissingArgument {
        /// Where the command was.
        line: usize,
        /// The command missing its argument.
        command: String,
    },

    /// A command which takes no argument was given one.
    #[error("line {line}: `{command}` takes no argument")]
    UnexpectedArgument {
        /// Where the command was.
        line: usize,
        /// The command given an argument.
        command: String,
    },

    /// A command which works on a single item was given more than one character.
    #[error("line {line}: expected a single character, got `{argument}`")]
    InvalidItem {
        /// Where the command was.
        line: usize,
        /// The whole argument as written.
        argument: String,
    },

    /// `compare` ran before any `snapshot` was taken.
    #[error("line {line}: `compare` before any `snapshot`")]
    NoSnapshot {
        /// Where the `compare` was.
        line: usize,
    },

    /// The output sink refused a write.
    #[error("failed to write output")]
    Format(#[from] fmt::Error),
}

/// A single parsed command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `insert <chars>`: insert one occurrence of each item, in order.
    Insert(Vec<Item>),
    /// `remove <c>`
    Remove(Item),
    /// `retrieve <c>`
    Retrieve(Item),
    /// `depth <c>`
    Depth(Item),
    /// `descendants <c>`
    Descendants(Item),
    /// `count <c>`
    Count(Item),
    /// `empty`: release every node.
    Empty,
    /// `is-empty`
    IsEmpty,
    /// `print`: the in-order dump.
    Print,
    /// `snapshot`: remember a deep copy of the tree.
    Snapshot,
    /// `compare`: structural equality against the last snapshot.
    Compare,
}

impl Command {
    /// Parses one non-blank, non-comment line.
    fn parse(line: usize, text: &str) -> Result<Self, ScriptError> {
        let mut words = text.split_whitespace();
        let name = words.next().unwrap_or_default();
        let argument: String = words.collect::<Vec<_>>().join(" ");

        let item = || single_item(line, name, &argument);
        let bare = |command: Command| {
            if argument.is_empty() {
                Ok(command)
            } else {
                Err(ScriptError::UnexpectedArgument {
                    line,
                    command: name.to_string(),
                })
            }
        };

        match name {
            "insert" => {
                let items: Vec<Item> = argument
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(Item::new)
                    .collect();
                if items.is_empty() {
                    return Err(ScriptError::MissingArgument {
                        line,
                        command: name.to_string(),
                    });
                }
                Ok(Command::Insert(items))
            }
            "remove" => item().map(Command::Remove),
            "retrieve" => item().map(Command::Retrieve),
            "depth" => item().map(Command::Depth),
            "descendants" => item().map(Command::Descendants),
            "count" => item().map(Command::Count),
            "empty" => bare(Command::Empty),
            "is-empty" => bare(Command::IsEmpty),
            "print" => bare(Command::Print),
            "snapshot" => bare(Command::Snapshot),
            "compare" => bare(Command::Compare),
            _ => Err(ScriptError::UnknownCommand {
                line,
                command: name.to_string(),
            }),
        }
    }
}

fn single_item(line: usize, command: &str, argument: &str) -> Result<Item, ScriptError> {
    let mut chars = argument.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(ScriptError::MissingArgument {
            line,
            command: command.to_string(),
        }),
        (Some(c), None) => Ok(Item::new(c)),
        (Some(_), Some(_)) => Err(ScriptError::InvalidItem {
            line,
            argument: argument.to_string(),
        }),
    }
}

/// A fully parsed script. Parsing validates every line up front so a typo at the end of a script
/// doesn't leave a half-run session behind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Script {
    /// Commands paired with the line they came from.
    commands: Vec<(usize, Command)>,
    /// The last text line parsed so far, blank lines and comments included.
    last_line: usize,
}

impl Script {
    /// Parses every line of `text`.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut script = Self::default();
        script.extend_from(text, 1)?;
        Ok(script)
    }

    /// Parses `text` and appends its commands, numbering its lines from `first_line`.
    pub fn extend_from(&mut self, text: &str, first_line: usize) -> Result<(), ScriptError> {
        for (offset, raw) in text.lines().enumerate() {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let line = first_line + offset;
            self.commands.push((line, Command::parse(line, trimmed)?));
        }
        let lines = text.lines().count();
        if lines > 0 {
            self.last_line = self.last_line.max(first_line + lines - 1);
        }
        Ok(())
    }

    /// The line after the last one this script was built from, for numbering appended text.
    /// Trailing blank lines and comments count.
    pub fn next_line(&self) -> usize {
        self.last_line + 1
    }

    /// The parsed commands in order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().map(|(_, command)| command)
    }

    /// How many commands the script holds.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the script holds no commands (only blank lines and comments).
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A tree plus the last snapshot taken of it.
#[derive(Debug, Default)]
pub struct Session {
    tree: Tree<Item>,
    snapshot: Option<Tree<Item>>,
}

impl Session {
    /// A session around an empty tree, with no snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree commands have been run against.
    pub fn tree(&self) -> &Tree<Item> {
        &self.tree
    }

    /// Runs every command of `script` in order, stopping at the first error.
    pub fn run<W: Write>(&mut self, script: &Script, out: &mut W) -> Result<(), ScriptError> {
        for (line, command) in &script.commands {
            self.execute(*line, command, out)?;
        }
        Ok(())
    }

    /// Runs a single command. `line` is only used for error reporting.
    pub fn execute<W: Write>(
        &mut self,
        line: usize,
        command: &Command,
        out: &mut W,
    ) -> Result<(), ScriptError> {
        debug!(line, ?command, "executing");
        match command {
            Command::Insert(items) => {
                for item in items {
                    let verb = if self.tree.insert(*item) {
                        "inserted"
                    } else {
                        "duplicate"
                    };
                    writeln!(out, "{} {}", verb, item)?;
                }
            }
            Command::Remove(item) => {
                let verb = if self.tree.remove(item) {
                    "removed"
                } else {
                    "missing"
                };
                writeln!(out, "{} {}", verb, item)?;
            }
            Command::Retrieve(item) => match self.tree.retrieve(item) {
                Some(found) => writeln!(out, "found {}", found)?,
                None => writeln!(out, "missing {}", item)?,
            },
            Command::Depth(item) => write_or_not_found(out, self.tree.depth(item))?,
            Command::Descendants(item) => write_or_not_found(out, self.tree.descendants(item))?,
            Command::Count(item) => writeln!(out, "{}", self.tree.count(item).unwrap_or(0))?,
            Command::Empty => self.tree.make_empty(),
            Command::IsEmpty => writeln!(out, "{}", self.tree.is_empty())?,
            Command::Print => write!(out, "{}", self.tree)?,
            Command::Snapshot => match &mut self.snapshot {
                Some(snapshot) => snapshot.clone_from(&self.tree),
                None => self.snapshot = Some(self.tree.clone()),
            },
            Command::Compare => {
                let snapshot = self
                    .snapshot
                    .as_ref()
                    .ok_or(ScriptError::NoSnapshot { line })?;
                let verdict = if *snapshot == self.tree {
                    "equal"
                } else {
                    "not equal"
                };
                writeln!(out, "{}", verdict)?;
            }
        }
        Ok(())
    }
}

fn write_or_not_found<W: Write>(out: &mut W, value: Option<usize>) -> fmt::Result {
    match value {
        Some(value) => writeln!(out, "{}", value),
        None => writeln!(out, "{}", NOT_FOUND),
    }
}
