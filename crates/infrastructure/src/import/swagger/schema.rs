//! Local `$ref` resolution and example synthesis.

use serde_json::{Map, Value};

/// Upper bound on chained `$ref` hops, so reference cycles terminate.
const MAX_REF_HOPS: usize = 16;

/// Resolves `#/...` references against the whole source document.
#[derive(Debug, Clone, Copy)]
pub struct RefResolver<'a> {
    root: &'a Value,
}

impl<'a> RefResolver<'a> {
    /// Creates a resolver over `root`.
    #[must_use]
    pub const fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Follows a `$ref` chain to its target. Unresolvable references (remote
    /// files, broken pointers) return the last value reached.
    #[must_use]
    pub fn resolve<'v>(&self, value: &'v Value) -> &'v Value
    where
        'a: 'v,
    {
        let mut current = value;
        for _ in 0..MAX_REF_HOPS {
            let Some(target) = current
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|reference| self.lookup(reference))
            else {
                break;
            };
            current = target;
        }
        current
    }

    fn lookup(&self, reference: &str) -> Option<&'a Value> {
        self.root.pointer(reference.strip_prefix('#')?)
    }

    /// Synthesizes a pretty-printed JSON example for a body schema.
    ///
    /// A schema-level `example` wins. Otherwise each top-level property gets
    /// a placeholder by type: strings `"string"`, numbers `0`, booleans
    /// `false`, arrays `[]`, objects `{}`, each overridden by the property's
    /// own `example` or `default` for scalar types.
    #[must_use]
    pub fn example_body(&self, schema: &Value) -> Option<String> {
        let schema = self.resolve(schema);
        if let Some(example) = schema.get("example") {
            return Some(render_example(example));
        }
        let example = match schema.get("properties").and_then(Value::as_object) {
            Some(properties) => Value::Object(
                properties
                    .iter()
                    .map(|(name, property)| (name.clone(), self.property_example(property)))
                    .collect(),
            ),
            None => match schema.get("type").and_then(Value::as_str) {
                Some("array") => Value::Array(Vec::new()),
                Some("object") => Value::Object(Map::new()),
                _ => return None,
            },
        };
        serde_json::to_string_pretty(&example).ok()
    }

    fn property_example(&self, property: &Value) -> Value {
        let property = self.resolve(property);
        let given = property
            .get("example")
            .or_else(|| property.get("default"))
            .cloned();
        match property.get("type").and_then(Value::as_str) {
            Some("string") => given.unwrap_or_else(|| Value::from("string")),
            Some("number" | "integer") => given.unwrap_or_else(|| Value::from(0)),
            Some("boolean") => given.unwrap_or(Value::Bool(false)),
            Some("array") => Value::Array(Vec::new()),
            Some("object") => Value::Object(Map::new()),
            _ if property.get("properties").is_some() => Value::Object(Map::new()),
            _ => given.unwrap_or(Value::Null),
        }
    }
}

/// Renders an `example` value as body text: strings verbatim, anything else
/// pretty-printed.
#[must_use]
pub fn render_example(example: &Value) -> String {
    match example {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
