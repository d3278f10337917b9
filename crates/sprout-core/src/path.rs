//! # JSON Paths — Structured Error Locations
//!
//! Root-anchored dotted/bracket paths (`$.resources[2].schema.fields[0].name`)
//! that mirror the shape of a property tree. Paths are handled as a list of
//! segments, never as raw string surgery, so transforms like resource
//! qualification cannot corrupt a location.
//!
//! The schema validator reports locations as JSON Pointers
//! (`/resources/0/name`); [`JsonPath::from_pointer`] converts those into the
//! dotted notation used by every check error.

use std::fmt;

/// One step in a JSON path: either an object member or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object member, rendered as `.name`.
    Field(String),
    /// An array index, rendered as `[i]`.
    Index(usize),
}

/// A root-anchored path into a property tree.
///
/// The empty path renders as `$` and denotes the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The document root, `$`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted/bracket path such as `$.resources[0].name`.
    ///
    /// Parsing is lenient: a missing `$` anchor is tolerated, and malformed
    /// bracket content falls back to a field segment so no location is ever
    /// dropped on the floor.
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        let trimmed = path.strip_prefix('$').unwrap_or(path);
        let mut chars = trimmed.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    let mut name = String::new();
                    while let Some(&next) = chars.peek() {
                        if next == '.' || next == '[' {
                            break;
                        }
                        name.push(next);
                        chars.next();
                    }
                    if !name.is_empty() {
                        segments.push(PathSegment::Field(name));
                    }
                }
                '[' => {
                    let mut inner = String::new();
                    for next in chars.by_ref() {
                        if next == ']' {
                            break;
                        }
                        inner.push(next);
                    }
                    match inner.parse::<usize>() {
                        Ok(i) => segments.push(PathSegment::Index(i)),
                        Err(_) => segments.push(PathSegment::Field(inner)),
                    }
                }
                other => {
                    // Bare leading field name without a dot.
                    let mut name = String::from(other);
                    while let Some(&next) = chars.peek() {
                        if next == '.' || next == '[' {
                            break;
                        }
                        name.push(next);
                        chars.next();
                    }
                    segments.push(PathSegment::Field(name));
                }
            }
        }

        Self { segments }
    }

    /// Convert a JSON Pointer (`/resources/0/name`) into a path.
    ///
    /// All-digit pointer tokens become index segments. Property trees never
    /// use purely numeric member names, so the conversion is unambiguous
    /// within this domain.
    pub fn from_pointer(pointer: &str) -> Self {
        let segments = pointer
            .split('/')
            .filter(|token| !token.is_empty())
            .map(|token| {
                let unescaped = token.replace("~1", "/").replace("~0", "~");
                match unescaped.parse::<usize>() {
                    Ok(i) => PathSegment::Index(i),
                    Err(_) => PathSegment::Field(unescaped),
                }
            })
            .collect();
        Self { segments }
    }

    /// Append an object member segment.
    pub fn push_field(&mut self, name: impl Into<String>) {
        self.segments.push(PathSegment::Field(name.into()));
    }

    /// Append an array index segment.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// The segments of this path, root first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns true for the bare root path `$`.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Re-anchor this path under `$.resources[index]`.
    pub fn qualify_resource(mut self, index: usize) -> Self {
        let mut segments = vec![
            PathSegment::Field("resources".to_string()),
            PathSegment::Index(index),
        ];
        segments.append(&mut self.segments);
        Self { segments }
    }

    /// Returns true if the path starts with `resources[index]`.
    pub fn is_under_resource(&self, index: usize) -> bool {
        matches!(
            self.segments.as_slice(),
            [PathSegment::Field(f), PathSegment::Index(i), ..]
                if f == "resources" && *i == index
        )
    }

    /// Remove a leading `resources[0]` segment pair if present.
    ///
    /// Used when a single resource has been checked through the
    /// package-shaped schema via a synthetic one-resource package. Paths
    /// without the prefix pass through unchanged.
    pub fn strip_resource_prefix(self) -> Self {
        if self.is_under_resource(0) {
            Self {
                segments: self.segments.into_iter().skip(2).collect(),
            }
        } else {
            self
        }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}
