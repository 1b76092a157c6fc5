//! Row values and decoding into structured models.
//!
//! A [`Row`] is an ordered list of `name -> value` pairs as handed back by an
//! [`Executor`](crate::database::Executor). A [`RowDecoder`] reads typed
//! fields out of it, optionally looking every key up under a prefix so that
//! joined result sets (`planets_id`, `moons_id`, ...) can be decoded into
//! separate models.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::DecodeError;
use crate::model::Model;
use crate::value::{SqlValue, ToSqlValue};

/// One result row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl ToSqlValue) -> Self {
        self.push(name, value);
        self
    }

    /// Appends a column in place.
    pub fn push(&mut self, name: impl Into<String>, value: impl ToSqlValue) {
        self.columns.push((name.into(), value.to_sql_value()));
    }

    /// Returns the first value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Returns whether a column named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Column names in row order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns whether the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Decodes the row into a model.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] naming the first field that is missing or
    /// has an incompatible value.
    pub fn decode<M: Model>(&self) -> Result<M, DecodeError> {
        M::decode(&RowDecoder::new(self))
    }

    /// Decodes the row into a model, reading `<prefix><field>` for every
    /// field.
    ///
    /// # Errors
    ///
    /// See [`Row::decode`].
    pub fn decode_prefixed<M: Model>(&self, prefix: &str) -> Result<M, DecodeError> {
        M::decode(&RowDecoder::with_prefix(self, prefix))
    }
}

impl<N: Into<String>> FromIterator<(N, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (N, SqlValue)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// Reads typed fields out of a row.
#[derive(Debug, Clone, Copy)]
pub struct RowDecoder<'r> {
    row: &'r Row,
    prefix: &'r str,
}

impl<'r> RowDecoder<'r> {
    /// Creates a decoder reading keys verbatim.
    #[must_use]
    pub const fn new(row: &'r Row) -> Self {
        Self { row, prefix: "" }
    }

    /// Creates a decoder prepending `prefix` to every key.
    #[must_use]
    pub const fn with_prefix(row: &'r Row, prefix: &'r str) -> Self {
        Self { row, prefix }
    }

    /// Returns the prefix.
    #[must_use]
    pub const fn prefix(&self) -> &'r str {
        self.prefix
    }

    /// Decodes one field.
    ///
    /// # Errors
    ///
    /// Fails with [`DecodeError::MissingColumn`] when the key is absent and
    /// `T` is not optional, and with [`DecodeError::TypeMismatch`] when the
    /// stored value cannot become a `T`.
    pub fn get<T: FromSqlValue>(&self, field: &str) -> Result<T, DecodeError> {
        let key = format!("{}{field}", self.prefix);
        match self.row.get(&key) {
            Some(value) => T::from_sql_value(value).ok_or_else(|| DecodeError::TypeMismatch {
                field: String::from(field),
                expected: T::EXPECTED,
                found: value.kind(),
            }),
            None => T::from_missing().ok_or(DecodeError::MissingColumn {
                field: String::from(field),
                key,
            }),
        }
    }
}

/// Conversion from a stored value into a Rust type.
pub trait FromSqlValue: Sized {
    /// Name of the expected kind, used in error messages.
    const EXPECTED: &'static str;

    /// Converts a value, returning `None` when it has the wrong kind.
    fn from_sql_value(value: &SqlValue) -> Option<Self>;

    /// The value used when the column is absent; `None` makes the column
    /// mandatory.
    fn from_missing() -> Option<Self> {
        None
    }
}

impl FromSqlValue for SqlValue {
    const EXPECTED: &'static str = "any";

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Null => Some(None),
            other => T::from_sql_value(other).map(Some),
        }
    }

    fn from_missing() -> Option<Self> {
        Some(None)
    }
}

impl FromSqlValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Bool(b) => Some(*b),
            // Backends storing booleans as TINYINT / INTEGER.
            SqlValue::Int(0) => Some(false),
            SqlValue::Int(1) => Some(true),
            _ => None,
        }
    }
}

impl FromSqlValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

macro_rules! from_sql_value_narrow_int {
    ($($t:ty),*) => {
        $(
            impl FromSqlValue for $t {
                const EXPECTED: &'static str = "integer";

                fn from_sql_value(value: &SqlValue) -> Option<Self> {
                    match value {
                        SqlValue::Int(i) => <$t>::try_from(*i).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

from_sql_value_narrow_int!(i8, i16, i32, u8, u16, u32, u64);

impl FromSqlValue for f64 {
    const EXPECTED: &'static str = "float";

    #[allow(clippy::cast_precision_loss)]
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Float(f) => Some(*f),
            SqlValue::Int(i) => Some(*i as Self),
            _ => None,
        }
    }
}

impl FromSqlValue for String {
    const EXPECTED: &'static str = "text";

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromSqlValue for Vec<u8> {
    const EXPECTED: &'static str = "blob";

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Blob(b) => Some(b.clone()),
            SqlValue::Text(s) => Some(s.clone().into_bytes()),
            _ => None,
        }
    }
}

impl FromSqlValue for NaiveDate {
    const EXPECTED: &'static str = "date";

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Date(d) => Some(*d),
            SqlValue::Text(s) => Self::parse_from_str(s, "%Y-%m-%d").ok(),
            _ => None,
        }
    }
}

impl FromSqlValue for NaiveDateTime {
    const EXPECTED: &'static str = "timestamp";

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Timestamp(t) => Some(*t),
            SqlValue::Text(s) => Self::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::new()
            .with("id", 1_i64)
            .with("name", "Earth")
            .with("moons_name", "Luna")
            .with("discovered", SqlValue::Null)
    }

    #[test]
    fn test_get_by_name() {
        let row = row();
        assert_eq!(row.len(), 4);
        assert_eq!(row.get("name"), Some(&SqlValue::Text(String::from("Earth"))));
        assert!(row.get("mass").is_none());
        assert_eq!(
            row.column_names().collect::<Vec<_>>(),
            vec!["id", "name", "moons_name", "discovered"]
        );
    }

    #[test]
    fn test_required_field() {
        let row = row();
        let decoder = RowDecoder::new(&row);
        assert_eq!(decoder.get::<i64>("id"), Ok(1));
        assert_eq!(
            decoder.get::<i64>("mass"),
            Err(DecodeError::MissingColumn {
                field: String::from("mass"),
                key: String::from("mass"),
            })
        );
        assert_eq!(
            decoder.get::<i64>("name"),
            Err(DecodeError::TypeMismatch {
                field: String::from("name"),
                expected: "integer",
                found: "text",
            })
        );
    }

    #[test]
    fn test_optional_field_tolerates_missing_and_null() {
        let row = row();
        let decoder = RowDecoder::new(&row);
        assert_eq!(decoder.get::<Option<String>>("discovered"), Ok(None));
        assert_eq!(decoder.get::<Option<String>>("mass"), Ok(None));
        assert_eq!(
            decoder.get::<Option<String>>("name"),
            Ok(Some(String::from("Earth")))
        );
        assert!(decoder.get::<String>("discovered").is_err());
    }

    #[test]
    fn test_prefixed_lookup() {
        let row = row();
        let decoder = RowDecoder::with_prefix(&row, "moons_");
        assert_eq!(decoder.get::<String>("name"), Ok(String::from("Luna")));
        assert_eq!(
            decoder.get::<i64>("id"),
            Err(DecodeError::MissingColumn {
                field: String::from("id"),
                key: String::from("moons_id"),
            })
        );
    }

    #[test]
    fn test_numeric_conversions() {
        let row = Row::new()
            .with("flag", 1_i64)
            .with("small", 300_i64)
            .with("ratio", 2_i64);
        let decoder = RowDecoder::new(&row);
        assert_eq!(decoder.get::<bool>("flag"), Ok(true));
        assert!(decoder.get::<u8>("small").is_err());
        assert_eq!(decoder.get::<u16>("small"), Ok(300));
        assert_eq!(decoder.get::<f64>("ratio"), Ok(2.0));
    }

    #[test]
    fn test_dates_from_text() {
        let row = Row::new().with("day", "2024-03-01");
        let decoder = RowDecoder::new(&row);
        assert_eq!(
            decoder.get::<NaiveDate>("day"),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }
}
