use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PathError;

pub const SEPARATOR: char = '/';

/// Workspace path as an ordered list of non-empty, exact-case segments.
///
/// The empty list is the workspace root. Segments are never empty, never made
/// only of dots and never contain `/` or NUL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NormalizedPath {
    segments: Vec<String>,
}

impl NormalizedPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Single-segment path; the caller guarantees `name` is a valid segment.
    pub(crate) fn project(name: &str) -> Self {
        Self {
            segments: vec![name.to_string()],
        }
    }

    /// Normalize a raw `/`-separated payload.
    ///
    /// Leading, trailing and repeated separators are dropped:
    /// `////MyProject///folder//` becomes `/MyProject/folder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use respath_core::NormalizedPath;
    ///
    /// let path = NormalizedPath::parse("////MyProject///folder///deep/myFile.ext//").unwrap();
    /// assert_eq!(path.segments(), ["MyProject", "folder", "deep", "myFile.ext"]);
    /// assert!(NormalizedPath::parse("/a/../b").is_err());
    /// assert!(NormalizedPath::parse("///").unwrap().is_root());
    /// ```
    pub fn parse(payload: &str) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        for segment in payload.split(SEPARATOR).filter(|s| !s.is_empty()) {
            check_segment(segment)?;
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path = Self::root();
        for segment in segments {
            let segment = segment.into();
            if segment.is_empty() {
                return Err(PathError::EmptySegment);
            }
            if segment.contains(SEPARATOR) {
                return Err(PathError::SeparatorInSegment(segment));
            }
            check_segment(&segment)?;
            path.segments.push(segment);
        }
        Ok(path)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// First segment, i.e. the project the path lives in.
    pub fn project_name(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    pub fn join(&self, segment: &str) -> Result<Self, PathError> {
        let mut path = self.clone();
        path.segments
            .extend(Self::from_segments([segment])?.segments);
        Ok(path)
    }

    pub fn starts_with(&self, prefix: &NormalizedPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

fn check_segment(segment: &str) -> Result<(), PathError> {
    if segment.chars().all(|c| c == '.') {
        return Err(PathError::ReservedSegment(segment.to_string()));
    }
    if segment.contains('\0') {
        return Err(PathError::NulCharacter);
    }
    Ok(())
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "{SEPARATOR}{segment}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for NormalizedPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NormalizedPath> for String {
    fn from(path: NormalizedPath) -> Self {
        path.to_string()
    }
}

impl std::str::FromStr for NormalizedPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
