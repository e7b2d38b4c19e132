//! Safe path access over untyped ESPN documents.
//!
//! Every lookup returns `None` for a missing key, a node of the wrong type or
//! an out-of-range index. Nothing in here can panic, so each extractor only
//! has to decide which placeholder to substitute.
use serde_json::Value;

/// One step of a lookup path: an object key or an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seg<'a> {
    Key(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for Seg<'a> {
    fn from(key: &'a str) -> Self {
        Seg::Key(key)
    }
}

impl From<usize> for Seg<'_> {
    fn from(index: usize) -> Self {
        Seg::Index(index)
    }
}

/// Build a `&[Seg]` lookup path: `path!["header", "competitions", 0]`.
#[macro_export]
macro_rules! path {
    ($($seg:expr),* $(,)?) => {
        &[$($crate::access::Seg::from($seg)),*]
    };
}

pub fn get<'v>(root: &'v Value, path: &[Seg<'_>]) -> Option<&'v Value> {
    path.iter().try_fold(root, |node, seg| match *seg {
        Seg::Key(key) => node.as_object()?.get(key),
        Seg::Index(index) => node.as_array()?.get(index),
    })
}

/// Render a scalar as display text. Strings come back as-is, numbers keep
/// their JSON spelling. Empty strings, null, bools and containers are absent.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn text(root: &Value, path: &[Seg<'_>]) -> Option<String> {
    get(root, path).and_then(scalar_text)
}

pub fn array<'v>(root: &'v Value, path: &[Seg<'_>]) -> Option<&'v [Value]> {
    get(root, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

/// Integral number at `path`. ESPN occasionally serializes periods as `5.0`.
pub fn int(root: &Value, path: &[Seg<'_>]) -> Option<i64> {
    let value = get(root, path)?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// The first non-empty text among several candidate paths.
pub fn first_text(root: &Value, paths: &[&[Seg<'_>]]) -> Option<String> {
    paths.iter().find_map(|path| text(root, path))
}
