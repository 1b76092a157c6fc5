//! Built-in dialect presets.

use super::{BooleanLiterals, Dialect, PlaceholderStyle, UpsertSyntax};

impl Dialect {
    /// A generic dialect following ANSI SQL conventions.
    ///
    /// Double-quoted identifiers, `?` placeholders, no `RETURNING`, no
    /// auto-increment and no conflict resolution.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            name: String::from("generic"),
            quote_open: '"',
            quote_close: '"',
            placeholder: PlaceholderStyle::Question,
            supports_if_exists: true,
            supports_returning: false,
            supports_auto_increment: false,
            auto_increment_keyword: String::new(),
            supports_drop_behavior: true,
            supports_multiple_alter_actions: true,
            upsert_syntax: UpsertSyntax::Unsupported,
            conflict_target_required: false,
            boolean_literals: BooleanLiterals::Keywords,
            escape_backslash: false,
        }
    }

    /// MySQL / MariaDB.
    #[must_use]
    pub fn mysql() -> Self {
        Self {
            name: String::from("mysql"),
            quote_open: '`',
            quote_close: '`',
            placeholder: PlaceholderStyle::Question,
            supports_if_exists: true,
            supports_returning: false,
            supports_auto_increment: true,
            auto_increment_keyword: String::from("AUTO_INCREMENT"),
            supports_drop_behavior: true,
            supports_multiple_alter_actions: true,
            upsert_syntax: UpsertSyntax::MySql,
            conflict_target_required: false,
            boolean_literals: BooleanLiterals::Numeric,
            escape_backslash: true,
        }
    }

    /// PostgreSQL.
    ///
    /// Auto-increment is expressed through identity or serial types, so the
    /// column keyword is unavailable.
    #[must_use]
    pub fn postgres() -> Self {
        Self {
            name: String::from("postgres"),
            quote_open: '"',
            quote_close: '"',
            placeholder: PlaceholderStyle::Dollar,
            supports_if_exists: true,
            supports_returning: true,
            supports_auto_increment: false,
            auto_increment_keyword: String::new(),
            supports_drop_behavior: true,
            supports_multiple_alter_actions: true,
            upsert_syntax: UpsertSyntax::Standard,
            conflict_target_required: true,
            boolean_literals: BooleanLiterals::Keywords,
            escape_backslash: false,
        }
    }

    /// SQLite 3.35 or later.
    #[must_use]
    pub fn sqlite() -> Self {
        Self {
            name: String::from("sqlite"),
            quote_open: '"',
            quote_close: '"',
            placeholder: PlaceholderStyle::Question,
            supports_if_exists: true,
            supports_returning: true,
            supports_auto_increment: true,
            auto_increment_keyword: String::from("AUTOINCREMENT"),
            supports_drop_behavior: false,
            supports_multiple_alter_actions: false,
            upsert_syntax: UpsertSyntax::Standard,
            conflict_target_required: false,
            boolean_literals: BooleanLiterals::Numeric,
            escape_backslash: false,
        }
    }
}
