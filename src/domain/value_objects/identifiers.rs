use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};
use thiserror::Error;

/// Maximum length of a single-segment identifier in bytes
pub const MAX_SEGMENT_LEN: usize = 255;

/// Maximum length of a document URI in bytes
pub const MAX_URI_LEN: usize = 4096;

/// URI segments may not start with this; the store names its temp files with it
pub const RESERVED_SEGMENT_PREFIX: &str = ".docdepot-tmp-";

/// Identifier validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} contains null bytes")]
    ContainsNullBytes { field: &'static str },

    #[error("{field} too long: {length} bytes (max: {max})")]
    TooLong {
        field: &'static str,
        length: usize,
        max: usize,
    },

    #[error("{field} contains invalid character: {character:?}")]
    InvalidCharacter {
        field: &'static str,
        character: char,
    },

    #[error("{field} is a reserved name: {value}")]
    Reserved { field: &'static str, value: String },

    #[error("{field} is absolute but relative path expected: {value}")]
    UnexpectedAbsolute { field: &'static str, value: String },

    #[error("{field} escapes its parent directory: {value}")]
    PathTraversal { field: &'static str, value: String },
}

impl IdentifierError {
    /// Name of the rejected field
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::ContainsNullBytes { field }
            | Self::TooLong { field, .. }
            | Self::InvalidCharacter { field, .. }
            | Self::Reserved { field, .. }
            | Self::UnexpectedAbsolute { field, .. }
            | Self::PathTraversal { field, .. } => *field,
        }
    }

    /// Offending value, when it is safe to echo back
    pub fn value(&self) -> Option<String> {
        match self {
            Self::Reserved { value, .. }
            | Self::UnexpectedAbsolute { value, .. }
            | Self::PathTraversal { value, .. } => Some(value.clone()),
            _ => None,
        }
    }
}

/// Validate a name that maps onto exactly one directory level.
fn validate_segment(field: &'static str, value: &str) -> Result<(), IdentifierError> {
    if value.trim().is_empty() {
        return Err(IdentifierError::Empty { field });
    }

    if value.contains('\0') {
        return Err(IdentifierError::ContainsNullBytes { field });
    }

    if value.len() > MAX_SEGMENT_LEN {
        return Err(IdentifierError::TooLong {
            field,
            length: value.len(),
            max: MAX_SEGMENT_LEN,
        });
    }

    if matches!(value, "." | "..") {
        return Err(IdentifierError::Reserved {
            field,
            value: value.to_string(),
        });
    }

    if let Some(character) = value
        .chars()
        .find(|ch| *ch == '/' || *ch == '\\' || ch.is_control())
    {
        return Err(IdentifierError::InvalidCharacter { field, character });
    }

    // Platform prefixes such as `C:` would replace the root on join
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(IdentifierError::UnexpectedAbsolute {
            field,
            value: value.to_string(),
        }),
    }
}

/// Project identifier, a single directory below the storage root
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    pub const FIELD: &'static str = "project_id";

    pub fn new(value: &str) -> Result<Self, IdentifierError> {
        validate_segment(Self::FIELD, value)?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Branch name, a single directory below its project
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    pub const FIELD: &'static str = "branch_name";

    pub fn new(value: &str) -> Result<Self, IdentifierError> {
        validate_segment(Self::FIELD, value)?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Relative path of a document inside a branch.
///
/// Parsing normalizes separators and `.` segments and resolves `..`
/// lexically; a URI that would climb above the branch directory is
/// rejected, as are absolute paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentUri {
    /// Normalized segments, never empty
    segments: Vec<String>,
}

impl DocumentUri {
    pub const FIELD: &'static str = "document_uri";

    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let field = Self::FIELD;

        if raw.trim().is_empty() {
            return Err(IdentifierError::Empty { field });
        }

        if raw.contains('\0') {
            return Err(IdentifierError::ContainsNullBytes { field });
        }

        if raw.len() > MAX_URI_LEN {
            return Err(IdentifierError::TooLong {
                field,
                length: raw.len(),
                max: MAX_URI_LEN,
            });
        }

        let unified = raw.replace('\\', "/");
        if unified.starts_with('/') {
            return Err(IdentifierError::UnexpectedAbsolute {
                field,
                value: raw.to_string(),
            });
        }

        let mut segments: Vec<String> = Vec::new();
        for part in unified.split('/') {
            match part {
                "" | "." => continue,
                ".." => {
                    if segments.pop().is_none() {
                        return Err(IdentifierError::PathTraversal {
                            field,
                            value: raw.to_string(),
                        });
                    }
                }
                segment => {
                    if let Some(character) = segment.chars().find(|ch| ch.is_control()) {
                        return Err(IdentifierError::InvalidCharacter { field, character });
                    }
                    if segment.starts_with(RESERVED_SEGMENT_PREFIX) {
                        return Err(IdentifierError::Reserved {
                            field,
                            value: raw.to_string(),
                        });
                    }
                    let mut components = Path::new(segment).components();
                    if !matches!(
                        (components.next(), components.next()),
                        (Some(Component::Normal(_)), None)
                    ) {
                        return Err(IdentifierError::UnexpectedAbsolute {
                            field,
                            value: raw.to_string(),
                        });
                    }
                    segments.push(segment.to_string());
                }
            }
        }

        if segments.is_empty() {
            return Err(IdentifierError::Empty { field });
        }

        Ok(Self { segments })
    }

    /// Build a URI from a path relative to a branch directory.
    ///
    /// Names that are not valid UTF-8 are rejected rather than converted
    /// lossily, since the lossy URI would not address the file.
    pub fn from_relative_path(path: &Path) -> Result<Self, IdentifierError> {
        let segments = path
            .components()
            .map(|component| {
                component
                    .as_os_str()
                    .to_str()
                    .ok_or(IdentifierError::InvalidCharacter {
                        field: Self::FIELD,
                        character: char::REPLACEMENT_CHARACTER,
                    })
            })
            .collect::<Result<Vec<&str>, _>>()?;
        Self::parse(&segments.join("/"))
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Final path segment
    pub fn name(&self) -> &str {
        // parse guarantees at least one segment
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Extension of the final segment, without the dot
    pub fn extension(&self) -> Option<&str> {
        Path::new(self.name()).extension()?.to_str()
    }

    pub fn to_uri_string(&self) -> String {
        self.segments.join("/")
    }
}

macro_rules! impl_string_conversions {
    ($name:ident, $ctor:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", String::from(self.clone()))
            }
        }

        impl TryFrom<&str> for $name {
            type Error = IdentifierError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                $name::$ctor(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                $name::$ctor(&value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::$ctor(s)
            }
        }
    };
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl From<DocumentUri> for String {
    fn from(uri: DocumentUri) -> Self {
        uri.to_uri_string()
    }
}

impl_string_conversions!(ProjectId, new);
impl_string_conversions!(BranchName, new);
impl_string_conversions!(DocumentUri, parse);
