//! Dialect descriptors loaded from configuration and toggled per instance.

use sqlforge_core::builder::{DropTable, Query, Select};
use sqlforge_core::dialect::{BooleanLiterals, Dialect, PlaceholderStyle, UpsertSyntax};
use sqlforge_core::{col, Expr};

const DUCK_CONFIG: &str = r#"{
    "name": "duck",
    "quote_open": "\"",
    "quote_close": "\"",
    "placeholder": "dollar",
    "supports_if_exists": true,
    "supports_returning": true,
    "supports_auto_increment": false,
    "auto_increment_keyword": "",
    "supports_drop_behavior": false,
    "supports_multiple_alter_actions": true,
    "upsert_syntax": "standard",
    "boolean_literals": "keywords"
}"#;

#[test]
fn test_load_from_json() {
    let dialect: Dialect = serde_json::from_str(DUCK_CONFIG).unwrap();

    assert_eq!(dialect.name(), "duck");
    assert_eq!(dialect.placeholder_style(), PlaceholderStyle::Dollar);
    assert_eq!(dialect.upsert_syntax(), UpsertSyntax::Standard);
    assert!(!dialect.conflict_target_required());
    assert!(!dialect.supports_drop_behavior());

    let out = Select::new()
        .from("planets")
        .where_(col("id").eq(1_i64).and(col("name").eq("Earth")))
        .build(&dialect)
        .unwrap();
    assert_eq!(
        out.sql,
        "SELECT * FROM \"planets\" WHERE \"id\" = $1 AND \"name\" = $2"
    );
}

#[test]
fn test_presets_survive_serialization() {
    for dialect in [
        Dialect::generic(),
        Dialect::mysql(),
        Dialect::postgres(),
        Dialect::sqlite(),
    ] {
        let json = serde_json::to_string(&dialect).unwrap();
        let loaded: Dialect = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, dialect);
    }
}

#[test]
fn test_unknown_syntax_is_rejected() {
    let config = DUCK_CONFIG.replace("\"standard\"", "\"merge\"");
    assert!(serde_json::from_str::<Dialect>(&config).is_err());
}

#[test]
fn test_toggling_if_exists_changes_only_the_guard() {
    let on = Dialect::mysql();
    let off = Dialect::mysql().with_if_exists(false);

    let with_guard = DropTable::new("planets").if_exists().build(&on).unwrap();
    let without_guard = DropTable::new("planets").if_exists().build(&off).unwrap();

    assert_eq!(with_guard.sql, "DROP TABLE IF EXISTS `planets`");
    assert_eq!(without_guard.sql, "DROP TABLE `planets`");
    assert!(on.supports_if_exists());
}

#[test]
fn test_toggles_return_new_descriptors() {
    let base = Dialect::postgres();
    let numeric = base.clone().with_boolean_literals(BooleanLiterals::Numeric);

    assert_eq!(base.boolean_literals(), BooleanLiterals::Keywords);
    assert_eq!(numeric.boolean_literals(), BooleanLiterals::Numeric);

    let out = Select::new()
        .from("planets")
        .where_(Expr::column("habitable").eq(Expr::literal(true)))
        .build(&numeric)
        .unwrap();
    assert_eq!(out.sql, "SELECT * FROM \"planets\" WHERE \"habitable\" = 1");
    assert!(out.binds.is_empty());
}

#[test]
fn test_mysql_string_literals_escape_backslashes() {
    let out = Select::new()
        .from("planets")
        .where_(Expr::column("name").eq(Expr::literal(r"O'Neil\")))
        .build(&Dialect::mysql())
        .unwrap();
    assert_eq!(out.sql, r"SELECT * FROM `planets` WHERE `name` = 'O''Neil\\'");
}
