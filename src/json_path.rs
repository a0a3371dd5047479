//! Property paths over untyped dialog documents.
//!
//! Dialog documents have no fixed schema, so every read and write goes through
//! a string-keyed / array-indexed path such as `triggers[0].actions[1].$kind`.
//! The accepted grammar is the one editor code already uses everywhere:
//!
//! ```text
//! path    := segment ( '.' name | '[' index ']' | '[' quoted ']' )*
//! segment := name | '[' index ']' | '[' quoted ']'
//! quoted  := '"' chars '"' | '\'' chars '\''
//! ```
//!
//! Numeric dotted names (`actions.0`) are accepted and index arrays the same
//! way `actions[0]` does.

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// One step of a parsed property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathKey {
    Key(String),
    Index(usize),
}

impl PathKey {
    /// Array position addressed by this key, if it can address one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathKey::Index(i) => Some(*i),
            PathKey::Key(k) => k.parse().ok(),
        }
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKey::Key(k) => f.write_str(k),
            PathKey::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Parse `path` into keys. The empty path yields no keys (the root).
pub fn parse(path: &str) -> Result<Vec<PathKey>> {
    let invalid = || Error::InvalidPath(path.to_string());
    let mut keys = Vec::new();
    let mut chars = path.char_indices().peekable();
    let mut after_dot = false;

    while let Some((start, c)) = chars.next() {
        match c {
            '.' => {
                if keys.is_empty() || after_dot {
                    return Err(invalid());
                }
                after_dot = true;
                continue;
            }
            '[' => {
                if after_dot {
                    return Err(invalid());
                }
                keys.push(parse_bracket(&mut chars).ok_or_else(invalid)?);
            }
            ']' => return Err(invalid()),
            _ => {
                // a name must open the path or follow a dot
                if !keys.is_empty() && !after_dot {
                    return Err(invalid());
                }
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    match next {
                        '.' | '[' => break,
                        ']' => return Err(invalid()),
                        _ => {
                            end = i + next.len_utf8();
                            chars.next();
                        }
                    }
                }
                keys.push(PathKey::Key(path[start..end].to_string()));
            }
        }
        after_dot = false;
    }

    if after_dot {
        return Err(invalid());
    }
    Ok(keys)
}

fn parse_bracket(chars: &mut Peekable<CharIndices<'_>>) -> Option<PathKey> {
    match chars.peek().map(|&(_, c)| c) {
        Some(quote @ ('"' | '\'')) => {
            chars.next();
            let mut key = String::new();
            loop {
                match chars.next()?.1 {
                    '\\' => key.push(chars.next()?.1),
                    c if c == quote => break,
                    c => key.push(c),
                }
            }
            match chars.next()?.1 {
                ']' => Some(PathKey::Key(key)),
                _ => None,
            }
        }
        _ => {
            let mut inner = String::new();
            loop {
                match chars.next()?.1 {
                    ']' => break,
                    c => inner.push(c),
                }
            }
            let inner = inner.trim();
            if inner.is_empty() {
                return None;
            }
            Some(match inner.parse::<usize>() {
                Ok(i) => PathKey::Index(i),
                Err(_) => PathKey::Key(inner.to_string()),
            })
        }
    }
}

/// Read the value at `path`. Unparseable or missing paths read as `None`.
pub fn get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let keys = parse(path).ok()?;
    get_keys(value, &keys)
}

/// Read the value addressed by already-parsed `keys`.
pub fn get_keys<'a>(value: &'a Value, keys: &[PathKey]) -> Option<&'a Value> {
    keys.iter().try_fold(value, step)
}

/// Resolve a single key against `value`.
pub fn step<'a>(value: &'a Value, key: &PathKey) -> Option<&'a Value> {
    match (value, key) {
        (Value::Object(map), PathKey::Key(k)) => map.get(k),
        (Value::Object(map), PathKey::Index(i)) => map.get(&i.to_string()),
        (Value::Array(items), key) => items.get(key.as_index()?),
        _ => None,
    }
}

/// Write `new_value` at `path`, creating missing intermediate containers.
///
/// A missing or `null` intermediate becomes an array when the next key is a
/// bracketed index and an object otherwise. Arrays grow with `null` padding,
/// at most [`MAX_ARRAY_GAP`] slots past their current end.
/// Writing through a scalar, or keying an array by a non-numeric name, fails
/// with [`Error::PathConflict`] and leaves `value` untouched at that point.
pub fn set(value: &mut Value, path: &str, new_value: Value) -> Result<()> {
    let keys = parse(path)?;
    set_keys(value, &keys, new_value, path)
}

/// Padding slots `set` will insert to reach an index past the end of an array.
pub const MAX_ARRAY_GAP: usize = 1024;

fn set_keys(target: &mut Value, keys: &[PathKey], new_value: Value, path: &str) -> Result<()> {
    let Some((key, rest)) = keys.split_first() else {
        *target = new_value;
        return Ok(());
    };

    if target.is_null() {
        *target = match key {
            PathKey::Index(_) => Value::Array(Vec::new()),
            PathKey::Key(_) => Value::Object(Map::new()),
        };
    }

    let slot = match target {
        Value::Object(map) => map.entry(key.to_string()).or_insert(Value::Null),
        Value::Array(items) => {
            let index =
                key.as_index().ok_or_else(|| Error::PathConflict { path: path.to_string(), found: "an array" })?;
            if items.len() <= index {
                let new_len = index
                    .checked_add(1)
                    .filter(|&len| len - items.len() <= MAX_ARRAY_GAP + 1)
                    .ok_or_else(|| {
                        Error::InvalidPath(format!("{path}: index {index} is past the end of {} items", items.len()))
                    })?;
                items.resize(new_len, Value::Null);
            }
            &mut items[index]
        }
        other => return Err(Error::PathConflict { path: path.to_string(), found: kind_name(other) }),
    };

    set_keys(slot, rest, new_value, path)
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(k: &str) -> PathKey {
        PathKey::Key(k.to_string())
    }

    #[test]
    fn parses_mixed_segments() {
        let keys = parse("triggers[0].actions[12].$designer.id").unwrap();
        assert_eq!(
            keys,
            vec![key("triggers"), PathKey::Index(0), key("actions"), PathKey::Index(12), key("$designer"), key("id")]
        );
    }

    #[test]
    fn parses_quoted_keys() {
        assert_eq!(parse(r#"triggers["1234"]"#).unwrap(), vec![key("triggers"), key("1234")]);
        assert_eq!(parse("a['b.c']").unwrap(), vec![key("a"), key("b.c")]);
        assert_eq!(parse(r#"a["x\"y"]"#).unwrap(), vec![key("a"), key("x\"y")]);
    }

    #[test]
    fn empty_path_is_root() {
        assert!(parse("").unwrap().is_empty());
        let doc = json!({"a": 1});
        assert_eq!(get(&doc, ""), Some(&doc));
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in [".a", "a..b", "a.", "a[", "a[]", "a]b", "a[0]b", "a.[0]", "a['b'"] {
            assert!(parse(bad).is_err(), "expected '{bad}' to be rejected");
        }
    }

    #[test]
    fn get_reads_nested_values() {
        let doc = json!({"triggers": [{"actions": [{"$kind": "A"}, {"$kind": "B"}]}]});
        assert_eq!(get(&doc, "triggers[0].actions[1].$kind"), Some(&json!("B")));
        assert_eq!(get(&doc, "triggers.0.actions.0.$kind"), Some(&json!("A")));
        assert_eq!(get(&doc, "triggers[0].actions[5]"), None);
        assert_eq!(get(&doc, "triggers[0].missing.deeper"), None);
        assert_eq!(get(&doc, "triggers[0].actions[0].$kind.x"), None);
    }

    #[test]
    fn set_creates_missing_containers() {
        let mut doc = json!({});
        set(&mut doc, "a.b[2].c", json!(true)).unwrap();
        assert_eq!(doc, json!({"a": {"b": [null, null, {"c": true}]}}));
    }

    #[test]
    fn set_replaces_existing_values() {
        let mut doc = json!({"triggers": [{"intent": "old"}]});
        set(&mut doc, "triggers[0].intent", json!("new")).unwrap();
        assert_eq!(doc, json!({"triggers": [{"intent": "new"}]}));
    }

    #[test]
    fn set_refuses_to_write_through_scalars() {
        let mut doc = json!({"a": "text"});
        let err = set(&mut doc, "a.b", json!(1)).unwrap_err();
        assert!(matches!(err, Error::PathConflict { found: "a string", .. }));
        assert_eq!(doc, json!({"a": "text"}));

        let mut doc = json!({"a": [1]});
        assert!(set(&mut doc, "a.name", json!(1)).is_err());
    }

    #[test]
    fn set_refuses_indices_far_past_the_end() {
        let mut doc = json!({"triggers": [{}]});
        for path in ["triggers[18446744073709551615]", "triggers[5000000]"] {
            let err = set(&mut doc, path, json!(1)).unwrap_err();
            assert!(matches!(err, Error::InvalidPath(_)), "{path}: {err}");
        }
        assert_eq!(doc, json!({"triggers": [{}]}));

        set(&mut doc, &format!("triggers[{}]", MAX_ARRAY_GAP + 1), json!(1)).unwrap();
        let items = doc["triggers"].as_array().unwrap();
        assert_eq!(items.len(), MAX_ARRAY_GAP + 2);
        assert_eq!(items[MAX_ARRAY_GAP + 1], json!(1));
    }
}
