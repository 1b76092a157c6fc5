//! Structured models mapped onto table rows.

use crate::error::DecodeError;
use crate::row::RowDecoder;
use crate::value::SqlValue;

/// A struct whose fields map one-to-one onto table columns.
///
/// Usually implemented with `#[derive(Model)]` from `sqlforge-derive`:
///
/// ```rust,ignore
/// use sqlforge_derive::Model;
///
/// #[derive(Model)]
/// #[table(name = "planets")]
/// struct Planet {
///     id: Option<i64>,
///     name: String,
/// }
///
/// assert_eq!(Planet::COLUMNS, &["id", "name"]);
/// ```
pub trait Model: Sized {
    /// Table name.
    const TABLE: &'static str;

    /// Column names, in field order.
    const COLUMNS: &'static [&'static str];

    /// Builds a model from a row.
    ///
    /// # Errors
    ///
    /// Returns the first field that could not be decoded.
    fn decode(decoder: &RowDecoder<'_>) -> Result<Self, DecodeError>;

    /// Field values, in [`Model::COLUMNS`] order.
    fn values(&self) -> Vec<SqlValue>;
}
