/// Token loader: turns JSON token trees into a flat [`Dictionary`].
///
/// Three passes over the merged tree:
/// 1. collect every token (object with `value`/`$value`) in document order
/// 2. resolve `{dotted.path}` references, detecting unknown targets and cycles
/// 3. derive camel-case identifiers and reject collisions
use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::token::{Dictionary, Token};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("token source must be a JSON object")]
    NotAnObject,
    #[error("'{path}' is neither a token nor a group")]
    StrayValue { path: String },
    #[error("token '{path}' has a null value")]
    NullValue { path: String },
    #[error("token '{path}' produces invalid identifier '{name}'")]
    InvalidName { path: String, name: String },
    #[error("tokens '{first}' and '{second}' both map to name '{name}'")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
    #[error("token '{path}' references unknown token '{reference}'")]
    UnknownReference { path: String, reference: String },
    #[error("circular reference: {}", .0.join(" -> "))]
    CircularReference(Vec<String>),
}

#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Prepended to every path before the name transform.
    pub prefix: Option<String>,
}

/// Merge sources, then load the result.
pub fn load_dictionary(sources: &[Value], options: &LoaderOptions) -> Result<Dictionary, LoadError> {
    let merged = merge_sources(sources)?;
    load(&merged, options)
}

/// Deep-merge token trees left to right. Later scalars win; an overridden
/// key keeps the position it first appeared at.
pub fn merge_sources(sources: &[Value]) -> Result<Value, LoadError> {
    let mut merged = Map::new();
    for source in sources {
        let obj = source.as_object().ok_or(LoadError::NotAnObject)?;
        merge_into(&mut merged, obj);
    }
    Ok(Value::Object(merged))
}

fn merge_into(dst: &mut Map<String, Value>, src: &Map<String, Value>) {
    for (key, value) in src {
        match (dst.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                // an overriding token replaces the value whichever key spells it
                if token_value(incoming).is_some() {
                    existing.shift_remove("value");
                    existing.shift_remove("$value");
                }
                merge_into(existing, incoming);
            }
            (Some(slot), _) => *slot = value.clone(),
            (None, _) => {
                dst.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Load a single (already merged) token tree.
pub fn load(tree: &Value, options: &LoaderOptions) -> Result<Dictionary, LoadError> {
    let root = tree.as_object().ok_or(LoadError::NotAnObject)?;

    let mut raw = Vec::new();
    collect(root, &mut Vec::new(), &mut raw)?;
    debug!(tokens = raw.len(), "collected tokens");

    let mut resolver = Resolver::new(&raw);
    let mut names: HashMap<String, String> = HashMap::new();
    let mut all_tokens = Vec::with_capacity(raw.len());

    for (idx, token) in raw.iter().enumerate() {
        let dotted = token.dotted();
        let resolved = resolver.resolve(idx)?;
        let value = value_text(&resolved).ok_or_else(|| LoadError::NullValue {
            path: dotted.clone(),
        })?;

        let name = token_name(&token.path, options.prefix.as_deref());
        if !is_identifier(&name) {
            return Err(LoadError::InvalidName { path: dotted, name });
        }
        if let Some(first) = names.insert(name.clone(), dotted.clone()) {
            return Err(LoadError::DuplicateName {
                name,
                first,
                second: dotted,
            });
        }

        all_tokens.push(Token::new(name, value, token.path.clone()));
    }

    Ok(Dictionary::new(all_tokens))
}

struct RawToken {
    path: Vec<String>,
    value: Value,
}

impl RawToken {
    fn dotted(&self) -> String {
        self.path.join(".")
    }
}

fn token_value(obj: &Map<String, Value>) -> Option<&Value> {
    obj.get("value").or_else(|| obj.get("$value"))
}

fn collect(
    node: &Map<String, Value>,
    path: &mut Vec<String>,
    out: &mut Vec<RawToken>,
) -> Result<(), LoadError> {
    for (key, child) in node {
        // group metadata such as `$type` / `$description`
        if key.starts_with('$') {
            continue;
        }
        path.push(key.clone());
        match child {
            Value::Object(obj) => match token_value(obj) {
                Some(value) => out.push(RawToken {
                    path: path.clone(),
                    value: value.clone(),
                }),
                None => collect(obj, path, out)?,
            },
            _ => {
                return Err(LoadError::StrayValue {
                    path: path.join("."),
                })
            }
        }
        path.pop();
    }
    Ok(())
}

/// Piece of a string value: literal text or a `{...}` reference.
#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Text(&'a str),
    Ref(&'a str),
}

/// A `{` only opens a reference if a `}` follows with at least one char between.
fn split_references(s: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = s;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if close > 0 => {
                if open > 0 {
                    segments.push(Segment::Text(&rest[..open]));
                }
                segments.push(Segment::Ref(after[..close].trim()));
                rest = &after[close + 1..];
            }
            _ => {
                segments.push(Segment::Text(&rest[..open + 1]));
                rest = after;
            }
        }
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    segments
}

struct Resolver<'a> {
    raw: &'a [RawToken],
    index: HashMap<String, usize>,
    resolved: Vec<Option<Value>>,
    in_progress: Vec<usize>,
}

impl<'a> Resolver<'a> {
    fn new(raw: &'a [RawToken]) -> Self {
        let index = raw
            .iter()
            .enumerate()
            .map(|(i, t)| (t.dotted(), i))
            .collect();
        Self {
            raw,
            index,
            resolved: vec![None; raw.len()],
            in_progress: Vec::new(),
        }
    }

    fn resolve(&mut self, idx: usize) -> Result<Value, LoadError> {
        if let Some(v) = &self.resolved[idx] {
            return Ok(v.clone());
        }
        if let Some(pos) = self.in_progress.iter().position(|&i| i == idx) {
            let mut chain: Vec<String> = self.in_progress[pos..]
                .iter()
                .map(|&i| self.raw[i].dotted())
                .collect();
            chain.push(self.raw[idx].dotted());
            return Err(LoadError::CircularReference(chain));
        }

        self.in_progress.push(idx);
        let raw = self.raw;
        let value = self.resolve_value(idx, &raw[idx].value)?;
        self.in_progress.pop();

        self.resolved[idx] = Some(value.clone());
        Ok(value)
    }

    fn resolve_value(&mut self, owner: usize, value: &Value) -> Result<Value, LoadError> {
        match value {
            Value::String(s) => self.resolve_str(owner, s),
            Value::Array(items) => items
                .iter()
                .map(|v| self.resolve_value(owner, v))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(map) => {
                let mut out = Map::new();
                for (k, v) in map {
                    out.insert(k.clone(), self.resolve_value(owner, v)?);
                }
                Ok(Value::Object(out))
            }
            other => Ok(other.clone()),
        }
    }

    fn resolve_str(&mut self, owner: usize, s: &str) -> Result<Value, LoadError> {
        let segments = split_references(s);
        if !segments.iter().any(|seg| matches!(seg, Segment::Ref(_))) {
            return Ok(Value::String(s.to_string()));
        }

        // whole value is one reference: keep the target's JSON type
        if let [Segment::Ref(reference)] = segments.as_slice() {
            let target = self.lookup(owner, reference)?;
            return self.resolve(target);
        }

        let mut out = String::with_capacity(s.len());
        for seg in segments {
            match seg {
                Segment::Text(text) => out.push_str(text),
                Segment::Ref(reference) => {
                    let target = self.lookup(owner, reference)?;
                    let value = self.resolve(target)?;
                    let text = value_text(&value).ok_or_else(|| LoadError::NullValue {
                        path: self.raw[target].dotted(),
                    })?;
                    out.push_str(&text);
                }
            }
        }
        Ok(Value::String(out))
    }

    /// Accepts `{a.b}` and the legacy `{a.b.value}` spelling.
    fn lookup(&self, owner: usize, reference: &str) -> Result<usize, LoadError> {
        let stripped = reference
            .strip_suffix(".value")
            .or_else(|| reference.strip_suffix(".$value"));
        self.index
            .get(reference)
            .or_else(|| stripped.and_then(|r| self.index.get(r)))
            .copied()
            .ok_or_else(|| LoadError::UnknownReference {
                path: self.raw[owner].dotted(),
                reference: reference.to_string(),
            })
    }
}

/// Strings verbatim, other JSON as compact text. `None` for `null`.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn token_name(path: &[String], prefix: Option<&str>) -> String {
    let segments: Vec<&str> = prefix
        .into_iter()
        .chain(path.iter().map(String::as_str))
        .collect();
    camel_case(&segments)
}

/// `["color", "base", "blue-100"]` -> `colorBaseBlue100`.
pub fn camel_case(segments: &[&str]) -> String {
    let mut out = String::new();
    for (i, word) in segments.iter().flat_map(|s| split_words(s)).enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Words break on non-alphanumerics, lower->Upper, letter<->digit, and
/// before the last capital of an acronym (`XMLHttp` -> `XML`, `Http`).
fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_numeric() != c.is_numeric())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(|n| n.is_lowercase()));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
    // strict mode; declaration files are always modules
    "await", "implements", "interface", "let", "package", "private", "protected", "public",
    "static", "yield",
];

/// Valid as both a `const` binding and an `exports.` member.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$');
    starts_ok
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !RESERVED.contains(&name)
}
