// src/schema.rs
use regex::Regex;
use serde_json::{Map, Value};

/// Field-name -> format-rule template describing the shape of one
/// environment record. All store records must validate against this.
#[derive(Debug)]
pub struct EnvTemplate {
  fields: Vec<(String, Regex)>,
}

impl EnvTemplate {
  /// The standard template for a target-environment record.
  pub fn standard() -> Self {
    // The regexes are static, compiling them cannot fail.
    let fields = vec![
      ("envName", r"^.+$"),
      ("confluenceBaseUrl", r"^(https?)://[^\s$.?#].[^\s]*[^/]$"),
      ("username", r"^.*$"),
      ("password", r"^.*$"),
      ("spaceKey", r"(?i)^[a-z0-9]{0,255}$"),
    ];
    EnvTemplate {
      fields: fields
        .into_iter()
        .map(|(name, rule)| (name.to_string(), Regex::new(rule).unwrap()))
        .collect(),
    }
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Regex)> {
    self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
  }

  /// Looks up the format rule for a single field.
  pub fn rule(&self, field: &str) -> Option<&Regex> {
    self
      .fields
      .iter()
      .find(|(name, _)| name == field)
      .map(|(_, rule)| rule)
  }
}

/// Validates an arbitrary JSON object against a field template.
///
/// Returns true iff the key sets are exactly equal, every value is a
/// string, and every value satisfies its field's format rule. Never
/// errors on malformed input, only reports false.
pub fn validate(template: &EnvTemplate, record: &Map<String, Value>) -> bool {
  // Equal lengths plus every template key present implies equal key sets.
  if record.len() != template.len() {
    return false;
  }
  template.iter().all(|(name, rule)| {
    record
      .get(name)
      .and_then(Value::as_str)
      .map_or(false, |value| rule.is_match(value))
  })
}
