//! Query-string construction for endpoint paths.

use crate::encode::{float_to_json, format_iso8601};
use crate::error::{MapperError, Result};
use crate::value::Value;

/// Ordered query parameters.
///
/// Values follow the encoder's rules: `null` is skipped, lists expand into
/// one pair per element, enumerations render as their wire scalar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, Value)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, builder style.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render `k=v&k=v`, percent-encoding keys and values.
    pub fn to_query_string(&self) -> Result<String> {
        let mut rendered = Vec::new();
        for (name, value) in &self.pairs {
            let key = urlencoding::encode(name);
            match value {
                Value::Null => {}
                Value::List(items) => {
                    for (idx, item) in items.iter().enumerate() {
                        if let Some(text) = render_scalar(item)
                            .ok_or_else(|| not_a_scalar(&format!("{name}[{idx}]"), item))?
                        {
                            rendered.push(format!("{key}={}", urlencoding::encode(&text)));
                        }
                    }
                }
                other => {
                    if let Some(text) =
                        render_scalar(other).ok_or_else(|| not_a_scalar(name, other))?
                    {
                        rendered.push(format!("{key}={}", urlencoding::encode(&text)));
                    }
                }
            }
        }
        Ok(rendered.join("&"))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Append the query string to `path`, adding `?` only when at least one pair
/// was emitted.
///
/// ```
/// use shelf_core::{QueryParams, Value, build_url};
///
/// let params = QueryParams::new()
///     .param("a", Value::Null)
///     .param("b", vec![1_i64, 2])
///     .param("c", "z");
/// assert_eq!(build_url("api/x", &params)?, "api/x?b=1&b=2&c=z");
/// # Ok::<(), shelf_core::MapperError>(())
/// ```
pub fn build_url(path: &str, params: &QueryParams) -> Result<String> {
    let query = params.to_query_string()?;
    if query.is_empty() {
        Ok(path.to_owned())
    } else {
        Ok(format!("{path}?{query}"))
    }
}

/// `Some(None)` for values that are skipped, `None` for values that cannot
/// appear in a query string.
fn render_scalar(value: &Value) -> Option<Option<String>> {
    let text = match value {
        Value::Null => return Some(None),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(n) => float_to_json(*n).to_string(),
        Value::String(s) => s.clone(),
        Value::DateTime(instant) => format_iso8601(instant),
        Value::Enum(variant) => variant.wire().to_string(),
        Value::Raw(serde_json::Value::String(s)) => s.clone(),
        Value::Raw(raw @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => {
            raw.to_string()
        }
        Value::Raw(serde_json::Value::Null) => return Some(None),
        Value::Raw(_) | Value::List(_) | Value::Map(_) | Value::Object(_) => return None,
    };
    Some(Some(text))
}

fn not_a_scalar(name: &str, value: &Value) -> MapperError {
    MapperError::MalformedShape {
        path: name.to_owned(),
        expected: "query scalar".to_owned(),
        found: value.kind().to_owned(),
    }
}
