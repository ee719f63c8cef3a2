//! The form-field contract between calculator inputs and formula parameters.
//!
//! A calculator's inputs live in the config section named after it. Each field
//! has a declared default used when the key is missing or not a number;
//! range clamping is left to the formulas.

use crate::domain::error::FincalcError;
use crate::domain::formula::debt::Debt;
use crate::ports::config_port::ConfigPort;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Number(f64),
    Text(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub default: FieldDefault,
}

pub const fn number(key: &'static str, label: &'static str, default: f64) -> FieldSpec {
    FieldSpec {
        key,
        label,
        default: FieldDefault::Number(default),
    }
}

pub const fn text(key: &'static str, label: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        default: FieldDefault::Text(default),
    }
}

pub struct FormInputs<'a> {
    config: &'a dyn ConfigPort,
    section: &'a str,
    fields: &'static [FieldSpec],
}

impl<'a> FormInputs<'a> {
    pub fn new(config: &'a dyn ConfigPort, section: &'a str, fields: &'static [FieldSpec]) -> Self {
        FormInputs {
            config,
            section,
            fields,
        }
    }

    pub fn section(&self) -> &str {
        self.section
    }

    fn spec(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn number(&self, key: &str) -> f64 {
        let default = match self.spec(key).map(|f| f.default) {
            Some(FieldDefault::Number(v)) => v,
            _ => {
                debug_assert!(false, "{} has no numeric field {}", self.section, key);
                0.0
            }
        };
        self.config.get_double(self.section, key, default)
    }

    pub fn text(&self, key: &str) -> String {
        match self.config.get_string(self.section, key) {
            Some(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => match self.spec(key).map(|f| f.default) {
                Some(FieldDefault::Text(v)) => v.to_string(),
                _ => String::new(),
            },
        }
    }

    /// Keys in the section that the calculator does not declare.
    pub fn unknown_keys(&self) -> Vec<String> {
        self.config
            .keys(self.section)
            .into_iter()
            .filter(|k| self.spec(k).is_none())
            .collect()
    }

    pub fn invalid(&self, field: &str, reason: impl Into<String>) -> FincalcError {
        FincalcError::FieldInvalid {
            calculator: self.section.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parse `name:balance:rate_pct:minimum` entries separated by `;`.
pub fn parse_debts(input: &str) -> Result<Vec<Debt>, String> {
    let mut debts = Vec::new();
    for (idx, entry) in input.split(';').enumerate() {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!(
                "entry {} ({}) must be name:balance:rate:minimum",
                idx + 1,
                entry
            ));
        }
        let parse = |value: &str, what: &str| -> Result<f64, String> {
            value
                .parse::<f64>()
                .map_err(|_| format!("entry {}: {} '{}' is not a number", idx + 1, what, value))
        };
        debts.push(Debt::new(
            parts[0],
            parse(parts[1], "balance")?,
            parse(parts[2], "rate")?,
            parse(parts[3], "minimum")?,
        ));
    }
    Ok(debts)
}
