//! Sessions record the objects being worked on. What is saved to a file is what is in the
//! workspace, along with a header describing the file.

use std::{
    error::Error,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    fuzzy::{self, Found, SearchSettings},
    id::{Named, ObjectId},
    object::Object,
    VERSION,
};

/// Header fixed by the library. It always describes the version that wrote the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommonHeader {
    pub mec_version: String,
}

impl Default for CommonHeader {
    fn default() -> Self {
        Self {
            mec_version: VERSION.into(),
        }
    }
}

/// User-controlled header, stored alongside the workspace.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Header {
    /// Where the session was last saved. Used when saving or loading without an explicit path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub properties: IndexMap<String, String>,
}

impl Header {
    pub fn is_empty(&self) -> bool {
        self.filename.is_none() && self.saved_at.is_none() && self.properties.is_empty()
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    common: &'a CommonHeader,
    header: &'a Header,
    workspace: &'a [Object],
}

#[derive(Deserialize)]
struct Document {
    common: CommonHeader,
    header: Header,
    workspace: Vec<Object>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    settings: SearchSettings,
    workspace: Vec<Object>,
    common: CommonHeader,
    header: Header,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SearchSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn workspace(&self) -> &[Object] {
        &self.workspace
    }

    pub fn common_header(&self) -> &CommonHeader {
        &self.common
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    pub fn set_header(&mut self, header: Header) {
        self.header = header;
    }

    pub fn clear_header(&mut self) {
        self.header = Header::default();
    }

    /// Adds properties to the header, replacing the values of keys that are already present.
    pub fn add_to_header<K, V>(&mut self, properties: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.header.properties.extend(
            properties
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }

    pub fn append(&mut self, object: impl Into<Object>) -> ObjectId {
        let object = object.into();
        let id = object.id();
        debug!("append {} {id}", object.kind());
        self.workspace.push(object);
        id
    }

    pub fn delete(&mut self, id: ObjectId) -> Result<Object, SessionError> {
        let index = self
            .search_by_uid(id)
            .ok_or(SessionError::NotFound(id))?
            .index;
        debug!("delete {id} at {index}");
        Ok(self.workspace.remove(index))
    }

    pub fn wipe_workspace(&mut self) {
        self.workspace.clear();
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.workspace.iter_mut().find(|object| object.id() == id)
    }

    /// Fuzzy search for objects by name. All objects sharing the best score are returned, and
    /// nothing is returned if that score is below the session's threshold.
    pub fn search_by_name(&self, name: &str) -> Vec<Found<'_, Object>> {
        fuzzy::search_by_name(&self.workspace, name, self.settings.min_score)
    }

    pub fn search_by_uid(&self, id: ObjectId) -> Option<Found<'_, Object>> {
        fuzzy::search_by_id(&self.workspace, id)
    }

    fn resolve_path(&self, path: Option<&Path>) -> Result<PathBuf, SessionError> {
        match path {
            Some(path) => Ok(path.to_owned()),
            None => self.header.filename.clone().ok_or(SessionError::NoFilename),
        }
    }

    /// Saves the headers and the workspace to `path`, or to the file the session was last saved
    /// to or loaded from. Missing parent directories are created.
    ///
    /// Fails without writing anything if an object has a coordinate that is not finite.
    pub fn save_to_file(&mut self, path: Option<&Path>, overwrite: bool) -> Result<(), SessionError> {
        let path = self.resolve_path(path)?;
        if let Some(object) = self.workspace.iter().find(|object| !object.is_finite()) {
            return Err(SessionError::NonFinite(object.id()));
        }

        self.header.filename = Some(path.clone());
        self.header.saved_at = Some(Utc::now());

        if path.exists() && !overwrite {
            return Err(SessionError::FileExists(path));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: path.clone(),
                source,
            })?;
        }

        let document = DocumentRef {
            common: &self.common,
            header: &self.header,
            workspace: &self.workspace,
        };
        let json = serde_json::to_string_pretty(&document).map_err(|source| {
            SessionError::Format {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, json).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            "saved {} objects to {}",
            self.workspace.len(),
            path.display()
        );
        Ok(())
    }

    /// Replaces the headers and the workspace with the contents of a saved file.
    ///
    /// Refuses to discard a non-empty workspace unless `overwrite` is set.
    pub fn load_file(&mut self, path: Option<&Path>, overwrite: bool) -> Result<(), SessionError> {
        if !self.workspace.is_empty() && !overwrite {
            return Err(SessionError::WorkspaceNotEmpty);
        }

        let path = self.resolve_path(path)?;
        let json = fs::read_to_string(&path).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })?;
        let document: Document =
            serde_json::from_str(&json).map_err(|source| SessionError::Format {
                path: path.clone(),
                source,
            })?;

        if document.common.mec_version != VERSION {
            warn!(
                "{} was written by mec {}, this is mec {VERSION}",
                path.display(),
                document.common.mec_version
            );
        }

        self.common = document.common;
        self.header = document.header;
        self.workspace = document.workspace;

        info!(
            "loaded {} objects from {}",
            self.workspace.len(),
            path.display()
        );
        Ok(())
    }
}

#[derive(Debug)]
pub enum SessionError {
    NotFound(ObjectId),
    /// No path was given, and the session has never been saved or loaded.
    NoFilename,
    FileExists(PathBuf),
    WorkspaceNotEmpty,
    /// The object has an infinite or NaN coordinate, which a session file cannot represent.
    NonFinite(ObjectId),
    Io { path: PathBuf, source: io::Error },
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotFound(id) => write!(f, "object {id} is not in the workspace"),
            SessionError::NoFilename => {
                f.write_str("no file name given, and the session was never saved")
            }
            SessionError::FileExists(path) => write!(
                f,
                "file '{}' already exists; set overwrite to overwrite it",
                path.display()
            ),
            SessionError::WorkspaceNotEmpty => {
                f.write_str("workspace is not empty; set overwrite to replace it")
            }
            SessionError::NonFinite(id) => {
                write!(f, "object {id} has a coordinate that is infinite or not a number")
            }
            SessionError::Io { path, .. } => write!(f, "cannot access '{}'", path.display()),
            SessionError::Format { path, .. } => {
                write!(f, "'{}' is not a valid session file", path.display())
            }
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SessionError::Io { source, .. } => Some(source),
            SessionError::Format { source, .. } => Some(source),
            _ => None,
        }
    }
}
