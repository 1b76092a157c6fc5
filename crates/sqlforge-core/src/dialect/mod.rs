//! SQL dialect capability descriptors.
//!
//! Different databases have slightly different SQL syntax. A [`Dialect`] is
//! an immutable description of one backend's idiosyncrasies: how identifiers
//! are quoted, how bind placeholders look, how literals are encoded, and
//! which optional features exist. The serializer reads it; nothing writes
//! to it after construction.
//!
//! Descriptors derive `serde` traits so a backend's capabilities can be
//! loaded from configuration instead of being hard-coded.

mod presets;

use serde::{Deserialize, Serialize};

use crate::value::Literal;

/// Bind placeholder style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// Positional `?` placeholders.
    Question,
    /// Numbered `$1`, `$2`, ... placeholders.
    Dollar,
}

/// Conflict-resolution syntax understood by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertSyntax {
    /// `ON CONFLICT [(target)] DO NOTHING | DO UPDATE SET ...`.
    Standard,
    /// `INSERT IGNORE` / `ON DUPLICATE KEY UPDATE ...`.
    MySql,
    /// No conflict resolution at all.
    Unsupported,
}

/// How boolean literals are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanLiterals {
    /// `true` / `false`.
    Keywords,
    /// `1` / `0`.
    Numeric,
}

/// A backend's SQL capability descriptor.
///
/// Construct one with a preset ([`Dialect::generic`], [`Dialect::mysql`],
/// [`Dialect::postgres`], [`Dialect::sqlite`]) or deserialize it, then
/// adjust it with the `with_*` methods, which return a new descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    name: String,
    quote_open: char,
    quote_close: char,
    placeholder: PlaceholderStyle,
    supports_if_exists: bool,
    supports_returning: bool,
    supports_auto_increment: bool,
    auto_increment_keyword: String,
    supports_drop_behavior: bool,
    supports_multiple_alter_actions: bool,
    upsert_syntax: UpsertSyntax,
    #[serde(default)]
    conflict_target_required: bool,
    boolean_literals: BooleanLiterals,
    #[serde(default)]
    escape_backslash: bool,
}

impl Dialect {
    /// Returns the name of the dialect.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the opening and closing identifier quote characters.
    #[must_use]
    pub const fn identifier_quote(&self) -> (char, char) {
        (self.quote_open, self.quote_close)
    }

    /// Returns the placeholder style.
    #[must_use]
    pub const fn placeholder_style(&self) -> PlaceholderStyle {
        self.placeholder
    }

    /// Whether `IF EXISTS` / `IF NOT EXISTS` guards are understood.
    #[must_use]
    pub const fn supports_if_exists(&self) -> bool {
        self.supports_if_exists
    }

    /// Whether `RETURNING` is understood.
    #[must_use]
    pub const fn supports_returning(&self) -> bool {
        self.supports_returning
    }

    /// Whether columns can be declared auto-incrementing.
    #[must_use]
    pub const fn supports_auto_increment(&self) -> bool {
        self.supports_auto_increment
    }

    /// The keyword used for auto-increment columns.
    #[must_use]
    pub fn auto_increment_keyword(&self) -> &str {
        &self.auto_increment_keyword
    }

    /// Whether `DROP TABLE ... CASCADE | RESTRICT` is understood.
    #[must_use]
    pub const fn supports_drop_behavior(&self) -> bool {
        self.supports_drop_behavior
    }

    /// Whether one `ALTER TABLE` may carry several comma-separated actions.
    #[must_use]
    pub const fn supports_multiple_alter_actions(&self) -> bool {
        self.supports_multiple_alter_actions
    }

    /// The conflict-resolution syntax.
    #[must_use]
    pub const fn upsert_syntax(&self) -> UpsertSyntax {
        self.upsert_syntax
    }

    /// Whether `DO UPDATE` needs an explicit conflict target.
    #[must_use]
    pub const fn conflict_target_required(&self) -> bool {
        self.conflict_target_required
    }

    /// The boolean literal spelling.
    #[must_use]
    pub const fn boolean_literals(&self) -> BooleanLiterals {
        self.boolean_literals
    }

    /// Renames the dialect.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the identifier quote characters.
    #[must_use]
    pub const fn with_identifier_quote(mut self, open: char, close: char) -> Self {
        self.quote_open = open;
        self.quote_close = close;
        self
    }

    /// Sets the placeholder style.
    #[must_use]
    pub const fn with_placeholder(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder = style;
        self
    }

    /// Toggles `IF EXISTS` / `IF NOT EXISTS` support.
    #[must_use]
    pub const fn with_if_exists(mut self, supported: bool) -> Self {
        self.supports_if_exists = supported;
        self
    }

    /// Toggles `RETURNING` support.
    #[must_use]
    pub const fn with_returning(mut self, supported: bool) -> Self {
        self.supports_returning = supported;
        self
    }

    /// Sets the auto-increment keyword, or disables auto-increment with `None`.
    #[must_use]
    pub fn with_auto_increment(mut self, keyword: Option<&str>) -> Self {
        match keyword {
            Some(kw) => {
                self.supports_auto_increment = true;
                self.auto_increment_keyword = String::from(kw);
            }
            None => {
                self.supports_auto_increment = false;
                self.auto_increment_keyword.clear();
            }
        }
        self
    }

    /// Toggles `CASCADE` / `RESTRICT` support on `DROP TABLE`.
    #[must_use]
    pub const fn with_drop_behavior(mut self, supported: bool) -> Self {
        self.supports_drop_behavior = supported;
        self
    }

    /// Toggles multiple actions per `ALTER TABLE`.
    #[must_use]
    pub const fn with_multiple_alter_actions(mut self, supported: bool) -> Self {
        self.supports_multiple_alter_actions = supported;
        self
    }

    /// Sets the conflict-resolution syntax.
    #[must_use]
    pub const fn with_upsert_syntax(mut self, syntax: UpsertSyntax) -> Self {
        self.upsert_syntax = syntax;
        self
    }

    /// Requires (or not) a conflict target for `DO UPDATE`.
    #[must_use]
    pub const fn with_conflict_target_required(mut self, required: bool) -> Self {
        self.conflict_target_required = required;
        self
    }

    /// Sets the boolean literal spelling.
    #[must_use]
    pub const fn with_boolean_literals(mut self, literals: BooleanLiterals) -> Self {
        self.boolean_literals = literals;
        self
    }

    /// Toggles backslash escaping inside string literals.
    #[must_use]
    pub const fn with_backslash_escapes(mut self, escape: bool) -> Self {
        self.escape_backslash = escape;
        self
    }

    /// Quotes an identifier, doubling any embedded closing quote.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        out.push(self.quote_open);
        for c in name.chars() {
            if c == self.quote_close {
                out.push(c);
            }
            out.push(c);
        }
        out.push(self.quote_close);
        out
    }

    /// Returns the placeholder for the bind at `index` (1-based).
    #[must_use]
    pub fn placeholder(&self, index: usize) -> String {
        match self.placeholder {
            PlaceholderStyle::Question => String::from("?"),
            PlaceholderStyle::Dollar => format!("${index}"),
        }
    }

    /// Encodes an inline literal.
    ///
    /// Float literals must be finite: SQL has no token for NaN or the
    /// infinities. The serializer rejects them before they get here.
    #[must_use]
    pub fn encode_literal(&self, literal: &Literal) -> String {
        match literal {
            Literal::Null => String::from("NULL"),
            Literal::Boolean(b) => match (self.boolean_literals, b) {
                (BooleanLiterals::Keywords, true) => String::from("true"),
                (BooleanLiterals::Keywords, false) => String::from("false"),
                (BooleanLiterals::Numeric, true) => String::from("1"),
                (BooleanLiterals::Numeric, false) => String::from("0"),
            },
            Literal::Integer(n) => n.to_string(),
            Literal::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 {
                    format!("{f:.1}")
                } else {
                    f.to_string()
                }
            }
            Literal::String(s) => self.encode_string(s),
            Literal::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
            Literal::Timestamp(ts) => format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S%.f")),
        }
    }

    fn encode_string(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('\'');
        for c in s.chars() {
            match c {
                '\'' => out.push_str("''"),
                '\\' if self.escape_backslash => out.push_str("\\\\"),
                _ => out.push(c),
            }
        }
        out.push('\'');
        out
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::generic()
    }
}
