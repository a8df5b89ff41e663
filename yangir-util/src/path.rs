//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

/// Errors raised by path segment manipulation.
#[derive(Debug, Eq, PartialEq)]
pub enum PathError {
    // Segment with more than one namespace separator.
    InvalidNamespace(String),
}

// ===== impl PathError =====

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::InvalidNamespace(segment) => {
                write!(f, "invalid namespace specifier in \"{segment}\"")
            }
        }
    }
}

impl std::error::Error for PathError {}

// ===== global functions =====

/// Splits an XPATH-style path on `/`, ignoring separators inside `[...]`
/// key predicates. The leading empty segment of an absolute path is kept so
/// callers can distinguish absolute from relative references.
pub fn split_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for c in path.chars() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '/' if depth == 0 => {
                segments.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    segments.push(current);
    segments
}

/// Drops `[...]` key predicates from a path segment. Key filters carry no
/// schema information.
pub fn strip_predicates(segment: &str) -> &str {
    match segment.find('[') {
        Some(index) => &segment[..index],
        None => segment,
    }
}

/// Strips the `prefix:` namespace qualifier from a path segment. More than
/// one `:` in a single segment is malformed.
pub fn strip_namespace(segment: &str) -> Result<&str, PathError> {
    let mut parts = segment.split(':');
    let first = parts.next().unwrap_or(segment);
    match (parts.next(), parts.next()) {
        (None, _) => Ok(first),
        (Some(name), None) => Ok(name),
        (Some(_), Some(_)) => {
            Err(PathError::InvalidNamespace(segment.to_owned()))
        }
    }
}

/// Renders path segments back into an absolute slash-separated path.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut path = String::new();
    for segment in segments {
        path.push('/');
        path.push_str(segment.as_ref());
    }
    path
}

// ===== tests =====
