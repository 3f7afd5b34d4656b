//! Executes commands against a session.
//!
//! The same code path runs lines typed into a terminal and lines read from a script, so a
//! design built interactively can be replayed from a file.

use std::{
    error::Error,
    fmt, fs,
    io::{self, BufRead, Write},
    path::Path,
};

use eyre::Context;
use mec::{
    geometry::{parallelogram, Contour, GeometryError, Point, Segment, Vector},
    id::{Named, ObjectId},
    object::Object,
    session::{Session, SessionError},
};
use tracing::{debug, instrument};

use crate::command::{self, Command, Diagnostic, Target};

#[derive(Debug)]
pub enum ShellError {
    Geometry(GeometryError),
    Session(SessionError),
    NoMatch(String),
    Ambiguous { name: String, count: usize },
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },
    Output(io::Error),
}

impl From<GeometryError> for ShellError {
    fn from(value: GeometryError) -> Self {
        Self::Geometry(value)
    }
}

impl From<SessionError> for ShellError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<io::Error> for ShellError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Geometry(e) => fmt::Display::fmt(e, f),
            ShellError::Session(e) => fmt::Display::fmt(e, f),
            ShellError::NoMatch(name) => write!(f, "no object is named like '{name}'"),
            ShellError::Ambiguous { name, count } => write!(
                f,
                "'{name}' matches {count} objects equally well; use an ID instead"
            ),
            ShellError::WrongKind { expected, found } => {
                write!(f, "expected a {expected}, but the object is a {found}")
            }
            ShellError::Output(_) => f.write_str("cannot write output"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ShellError::Geometry(e) => e.source(),
            ShellError::Session(e) => e.source(),
            ShellError::Output(e) => Some(e),
            _ => None,
        }
    }
}

/// Error produced by a single line: it either didn't parse, or failed to run.
#[derive(Debug)]
pub enum LineError {
    Parse(Diagnostic),
    Execute(ShellError),
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::Parse(diagnostic) => fmt::Display::fmt(diagnostic, f),
            LineError::Execute(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl Error for LineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LineError::Parse(_) => None,
            LineError::Execute(error) => error.source(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    session: Session,
}

impl Shell {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow, LineError> {
        match command::parse(line).map_err(LineError::Parse)? {
            Some(command) => self.execute(command, out).map_err(LineError::Execute),
            None => Ok(Flow::Continue),
        }
    }

    /// Runs every line of a script, stopping at the first one that fails.
    #[instrument(skip(self, out))]
    pub fn run_script(&mut self, path: &Path, out: &mut dyn Write) -> eyre::Result<()> {
        let script = fs::read_to_string(path)
            .with_context(|| format!("cannot read script '{}'", path.display()))?;

        for (index, line) in script.lines().enumerate() {
            let flow = self
                .run_line(line, out)
                .with_context(|| format!("{}:{}", path.display(), index + 1))?;
            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Reads commands until the input ends or `quit` is entered. Failing lines are reported and
    /// skipped.
    pub fn run_interactive(
        &mut self,
        input: impl BufRead,
        out: &mut dyn Write,
        prompt: bool,
    ) -> eyre::Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("cannot read command")?;

            match self.run_line(&line, out) {
                Ok(Flow::Continue) => (),
                Ok(Flow::Quit) => break,
                Err(LineError::Parse(diagnostic)) => {
                    let span = diagnostic.span();
                    eprintln!("error: {diagnostic}");
                    eprintln!("  {line}");
                    eprintln!(
                        "  {}{}",
                        " ".repeat(line[..span.start as usize].chars().count()),
                        "^".repeat(span.slice(&line).chars().count().max(1))
                    );
                }
                Err(error) => {
                    eprintln!("error: {error}");
                    let mut source = error.source();
                    while let Some(cause) = source {
                        eprintln!("  caused by: {cause}");
                        source = cause.source();
                    }
                }
            }
        }
        Ok(())
    }

    fn resolve(&self, target: &Target) -> Result<ObjectId, ShellError> {
        match target {
            Target::Id(id) => self
                .session
                .search_by_uid(*id)
                .map(|found| found.object.id())
                .ok_or(ShellError::Session(SessionError::NotFound(*id))),
            Target::Name(name) => match self.session.search_by_name(name).as_slice() {
                [] => Err(ShellError::NoMatch(name.clone())),
                [found] => Ok(found.object.id()),
                many => Err(ShellError::Ambiguous {
                    name: name.clone(),
                    count: many.len(),
                }),
            },
        }
    }

    fn object(&self, target: &Target) -> Result<&Object, ShellError> {
        let id = self.resolve(target)?;
        self.session
            .search_by_uid(id)
            .map(|found| found.object)
            .ok_or(ShellError::Session(SessionError::NotFound(id)))
    }

    fn add(&mut self, object: impl Into<Object>, out: &mut dyn Write) -> Result<(), ShellError> {
        let object = object.into();
        let kind = object.kind();
        let name = object.name().to_owned();
        let id = self.session.append(object);
        writeln!(out, "added {kind} {name} ({id})")?;
        Ok(())
    }

    fn list_entry(out: &mut dyn Write, index: usize, object: &Object) -> io::Result<()> {
        writeln!(
            out,
            "{index:>4}  {}  {:<8} {}",
            object.id(),
            object.kind(),
            object.name()
        )
    }

    pub fn execute(&mut self, command: Command, out: &mut dyn Write) -> Result<Flow, ShellError> {
        debug!(?command, "execute");

        match command {
            Command::Vector { name, coordinates } => {
                self.add(Vector::named(coordinates, name), out)?;
            }
            Command::Point { name, coordinates } => {
                self.add(Point::named(Vector::new(coordinates), name), out)?;
            }
            Command::Segment { name, start, end } => {
                let start = Point::at(start);
                let end = Point::at(end);
                start.position().check_dim(end.position())?;
                self.add(Segment::named(start, end, name), out)?;
            }
            Command::Parallelogram {
                name,
                corner,
                side_1,
                side_2,
            } => {
                let contour = parallelogram(
                    &Point::at(corner),
                    &Vector::new(side_1),
                    &Vector::new(side_2),
                    name,
                )?;
                self.add(contour, out)?;
            }

            Command::List => {
                for (index, object) in self.session.workspace().iter().enumerate() {
                    Self::list_entry(out, index, object)?;
                }
            }
            Command::Find { name } => {
                let found = self.session.search_by_name(&name);
                if found.is_empty() {
                    writeln!(out, "no match")?;
                }
                for found in found {
                    Self::list_entry(out, found.index, found.object)?;
                }
            }
            Command::Show { target } => {
                let object = self.object(&target)?;
                writeln!(out, "{object}")?;
            }
            Command::Rename { target, name } => {
                let id = self.resolve(&target)?;
                if let Some(object) = self.session.get_mut(id) {
                    object.set_name(name);
                }
            }
            Command::Delete { target } => {
                let id = self.resolve(&target)?;
                let object = self.session.delete(id)?;
                writeln!(out, "deleted {} {} ({id})", object.kind(), object.name())?;
            }
            Command::Wipe => self.session.wipe_workspace(),

            Command::Set { key, value } => self.session.add_to_header([(key, value)]),
            Command::Header => {
                writeln!(
                    out,
                    "mec_version = {}",
                    self.session.common_header().mec_version
                )?;
                let header = self.session.header();
                if let Some(filename) = &header.filename {
                    writeln!(out, "filename = {}", filename.display())?;
                }
                if let Some(saved_at) = &header.saved_at {
                    writeln!(out, "saved_at = {}", saved_at.to_rfc3339())?;
                }
                for (key, value) in &header.properties {
                    writeln!(out, "{key} = {value}")?;
                }
            }
            Command::Save { path, overwrite } => {
                self.session.save_to_file(path.as_deref(), overwrite)?;
                if let Some(filename) = &self.session.header().filename {
                    writeln!(out, "saved to {}", filename.display())?;
                }
            }
            Command::Load { path, overwrite } => {
                self.session.load_file(path.as_deref(), overwrite)?;
                writeln!(
                    out,
                    "loaded {} objects",
                    self.session.workspace().len()
                )?;
            }

            Command::Norm { target } => {
                let object = self.object(&target)?;
                let vector = object.as_vector().ok_or(ShellError::WrongKind {
                    expected: "vector",
                    found: object.kind(),
                })?;
                writeln!(out, "{}", vector.norm())?;
            }
            Command::Midpoint { target } => {
                let object = self.object(&target)?;
                let segment = object.as_segment().ok_or(ShellError::WrongKind {
                    expected: "segment",
                    found: object.kind(),
                })?;
                writeln!(out, "{}", segment.midpoint()?)?;
            }
            Command::Closed { target } => {
                let contour = self.contour(&target)?;
                writeln!(out, "{}", contour.is_closed())?;
            }
            Command::Coplanar { target } => {
                let contour = self.contour(&target)?;
                writeln!(out, "{}", contour.is_coplanar()?)?;
            }

            Command::Help => writeln!(out, "{}", command::HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn contour(&self, target: &Target) -> Result<&Contour, ShellError> {
        let object = self.object(target)?;
        object.as_contour().ok_or(ShellError::WrongKind {
            expected: "contour",
            found: object.kind(),
        })
    }
}

#[cfg(test)]
mod tests;
