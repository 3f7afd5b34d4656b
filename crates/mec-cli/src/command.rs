//! Parsing of shell command lines.
//!
//! A line is a command name followed by whitespace-separated arguments. Coordinates are written
//! as comma-separated numbers, such as `1,2,3`.

use std::{fmt, path::PathBuf};

use mec::id::ObjectId;

/// Byte range within a command line.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start as usize..self.end as usize]
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    span: Span,
    message: String,
}

impl Diagnostic {
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}: {}", self.span.start + 1, self.message())
    }
}

impl std::error::Error for Diagnostic {}

/// How a command refers to an object in the workspace.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Id(ObjectId),
    /// Fuzzy-matched against object names. Must match exactly one object.
    Name(String),
}

impl Target {
    fn parse(s: &str) -> Self {
        s.parse().map(Target::Id).unwrap_or_else(|_| Target::Name(s.into()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Vector {
        name: String,
        coordinates: Vec<f64>,
    },
    Point {
        name: String,
        coordinates: Vec<f64>,
    },
    Segment {
        name: String,
        start: Vec<f64>,
        end: Vec<f64>,
    },
    Parallelogram {
        name: String,
        corner: Vec<f64>,
        side_1: Vec<f64>,
        side_2: Vec<f64>,
    },
    List,
    Find {
        name: String,
    },
    Show {
        target: Target,
    },
    Rename {
        target: Target,
        name: String,
    },
    Delete {
        target: Target,
    },
    Wipe,
    Set {
        key: String,
        value: String,
    },
    Header,
    Save {
        path: Option<PathBuf>,
        overwrite: bool,
    },
    Load {
        path: Option<PathBuf>,
        overwrite: bool,
    },
    Norm {
        target: Target,
    },
    Midpoint {
        target: Target,
    },
    Closed {
        target: Target,
    },
    Coplanar {
        target: Target,
    },
    Help,
    Quit,
}

pub const HELP: &str = "\
vector NAME COORDS                      add a vector
point NAME COORDS                       add a point
segment NAME COORDS COORDS              add a segment between two positions
parallelogram NAME CORNER SIDE SIDE     add a parallelogram contour
list                                    list the workspace
find NAME                               search objects by name
show REF                                print an object
rename REF NAME                         rename an object
delete REF                              remove an object
wipe                                    remove every object
set KEY VALUE                           add a header property
header                                  print the headers
save [PATH] [--overwrite]               save the session
load [PATH] [--overwrite]               load a session
norm REF                                length of a vector
midpoint REF                            midpoint of a segment
closed REF                              whether a contour is closed
coplanar REF                            whether a contour is flat
help                                    print this help
quit                                    stop reading commands

COORDS are numbers separated by commas, like 1,2,3.
REF is an object ID (obj_...) or a name.";

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with("--")
}

fn words(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push(Span::new(s as u32, i as u32));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => (),
        }
    }
    if let Some(s) = start {
        spans.push(Span::new(s as u32, line.len() as u32));
    }
    spans
}

struct Args<'a> {
    line: &'a str,
    words: Vec<Span>,
    position: usize,
}

impl<'a> Args<'a> {
    fn next(&mut self) -> Option<(Span, &'a str)> {
        let span = *self.words.get(self.position)?;
        self.position += 1;
        Some((span, span.slice(self.line)))
    }

    /// Span to blame when an argument is missing: right past the end of the line.
    fn end(&self) -> Span {
        let end = self.line.trim_end().len() as u32;
        Span::new(end, end)
    }

    fn expect(&mut self, what: &str) -> Result<(Span, &'a str), Diagnostic> {
        let end = self.end();
        self.next()
            .ok_or_else(|| Diagnostic::error(end, format!("missing {what}")))
    }

    fn name(&mut self) -> Result<String, Diagnostic> {
        Ok(self.expect("name")?.1.into())
    }

    fn target(&mut self) -> Result<Target, Diagnostic> {
        Ok(Target::parse(self.expect("object name or ID")?.1))
    }

    fn coordinates(&mut self, what: &str) -> Result<Vec<f64>, Diagnostic> {
        let (span, word) = self.expect(what)?;
        parse_coordinates(word).ok_or_else(|| {
            Diagnostic::error(
                span,
                format!("malformed {what} (numbers separated by commas expected, like 1,2,3)"),
            )
        })
    }

    /// Everything from the next argument to the end of the line, with inner whitespace kept.
    fn rest(&mut self, what: &str) -> Result<String, Diagnostic> {
        let (span, _) = self.expect(what)?;
        self.position = self.words.len();
        Ok(self.line[span.start as usize..].trim_end().into())
    }

    fn path_and_overwrite(&mut self) -> Result<(Option<PathBuf>, bool), Diagnostic> {
        let mut path = None;
        let mut overwrite = false;
        while let Some((span, word)) = self.next() {
            if word == "--overwrite" {
                overwrite = true;
            } else if word.starts_with("--") {
                return Err(Diagnostic::error(span, "unknown flag (only --overwrite is supported)"));
            } else if path.is_none() {
                path = Some(PathBuf::from(word));
            } else {
                return Err(Diagnostic::error(span, "only one path may be given"));
            }
        }
        Ok((path, overwrite))
    }

    fn finish(self) -> Result<(), Diagnostic> {
        match self.words.get(self.position) {
            Some(&span) => Err(Diagnostic::error(span, "unexpected extra argument")),
            None => Ok(()),
        }
    }
}

/// Parses `1,2,3` into coordinates. Every comma-separated part must be a finite number.
pub fn parse_coordinates(word: &str) -> Option<Vec<f64>> {
    word.split(',')
        .map(|part| part.trim().parse::<f64>().ok().filter(|x| x.is_finite()))
        .collect()
}

/// Parses a single line. Blank lines and `--` comments produce no command.
pub fn parse(line: &str) -> Result<Option<Command>, Diagnostic> {
    if is_comment(line) {
        return Ok(None);
    }

    let mut args = Args {
        line,
        words: words(line),
        position: 0,
    };
    let Some((command_span, command)) = args.next() else {
        return Ok(None);
    };

    let command = match command {
        "vector" => Command::Vector {
            name: args.name()?,
            coordinates: args.coordinates("coordinates")?,
        },
        "point" => Command::Point {
            name: args.name()?,
            coordinates: args.coordinates("coordinates")?,
        },
        "segment" => Command::Segment {
            name: args.name()?,
            start: args.coordinates("start coordinates")?,
            end: args.coordinates("end coordinates")?,
        },
        "parallelogram" => Command::Parallelogram {
            name: args.name()?,
            corner: args.coordinates("corner coordinates")?,
            side_1: args.coordinates("first side")?,
            side_2: args.coordinates("second side")?,
        },
        "list" => Command::List,
        "find" => Command::Find {
            name: args.rest("name to search for")?,
        },
        "show" => Command::Show {
            target: args.target()?,
        },
        "rename" => Command::Rename {
            target: args.target()?,
            name: args.name()?,
        },
        "delete" => Command::Delete {
            target: args.target()?,
        },
        "wipe" => Command::Wipe,
        "set" => Command::Set {
            key: args.expect("header key")?.1.into(),
            value: args.rest("header value")?,
        },
        "header" => Command::Header,
        "save" => {
            let (path, overwrite) = args.path_and_overwrite()?;
            Command::Save { path, overwrite }
        }
        "load" => {
            let (path, overwrite) = args.path_and_overwrite()?;
            Command::Load { path, overwrite }
        }
        "norm" => Command::Norm {
            target: args.target()?,
        },
        "midpoint" => Command::Midpoint {
            target: args.target()?,
        },
        "closed" => Command::Closed {
            target: args.target()?,
        },
        "coplanar" => Command::Coplanar {
            target: args.target()?,
        },
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => {
            return Err(Diagnostic::error(
                command_span,
                "unknown command (type `help` to list commands)",
            ))
        }
    };

    args.finish()?;
    Ok(Some(command))
}

#[cfg(test)]
mod tests;
