//! Typed field access over one JSON record, with errors that name the file,
//! the record and the field path.

use crate::core::chance::Chance;
use crate::core::error::DataError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub(crate) struct Record<'a> {
    file: &'a str,
    id: &'a str,
    prefix: String,
    fields: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    pub(crate) fn new(file: &'a str, id: &'a str, value: &'a Value) -> Result<Self, DataError> {
        Self::at(file, id, String::new(), value)
    }

    fn at(file: &'a str, id: &'a str, prefix: String, value: &'a Value) -> Result<Self, DataError> {
        match value {
            Value::Object(fields) => Ok(Self {
                file,
                id,
                prefix,
                fields,
            }),
            _ => Err(DataError::InvalidField {
                file: file.to_string(),
                record: id.to_string(),
                field: prefix.trim_end_matches('.').to_string(),
                reason: "must be an object".to_string(),
            }),
        }
    }

    fn path(&self, field: &str) -> String {
        format!("{}{}", self.prefix, field)
    }

    pub(crate) fn missing(&self, field: &str) -> DataError {
        DataError::MissingField {
            file: self.file.to_string(),
            record: self.id.to_string(),
            field: self.path(field),
        }
    }

    pub(crate) fn invalid(&self, field: &str, reason: impl Into<String>) -> DataError {
        DataError::InvalidField {
            file: self.file.to_string(),
            record: self.id.to_string(),
            field: self.path(field),
            reason: reason.into(),
        }
    }

    /// Deserializes an optional field. `expected` completes "must be ...".
    pub(crate) fn opt<T: DeserializeOwned>(
        &self,
        field: &str,
        expected: &str,
    ) -> Result<Option<T>, DataError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|_| self.invalid(field, format!("must be {}", expected))),
        }
    }

    pub(crate) fn req<T: DeserializeOwned>(&self, field: &str, expected: &str) -> Result<T, DataError> {
        self.opt(field, expected)?.ok_or_else(|| self.missing(field))
    }

    /// An `[x, y]` probability with a positive `y`.
    pub(crate) fn chance(&self, field: &str) -> Result<Option<Chance>, DataError> {
        let Some((x, y)) = self.opt::<(f64, f64)>(field, "a 2-item list of numbers")? else {
            return Ok(None);
        };
        if y <= 0.0 || x < 0.0 {
            return Err(self.invalid(field, "must be [x, y] with x >= 0 and y > 0"));
        }
        Ok(Some(Chance::new(x, y)))
    }

    /// Every element of the array at `field` as a nested record. A missing
    /// field yields no elements.
    pub(crate) fn children(&self, field: &str) -> Result<Vec<Record<'a>>, DataError> {
        let items = match self.fields.get(field) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(self.invalid(field, "must be a list")),
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                Self::at(
                    self.file,
                    self.id,
                    format!("{}{}[{}].", self.prefix, field, i),
                    item,
                )
            })
            .collect()
    }

    /// The object at `field` as a nested record.
    pub(crate) fn child(&self, field: &str) -> Result<Option<Record<'a>>, DataError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Self::at(self.file, self.id, format!("{}{}.", self.prefix, field), value).map(Some),
        }
    }
}
