//! Statements handed to the execution port through `Database`.

mod common;

use common::{test_db, test_db_with_rows, text, RecordingExecutor};
use sqlforge_core::ast::OrderDirection;
use sqlforge_core::builder::{col, Query};
use sqlforge_core::dialect::Dialect;
use sqlforge_core::{sql, Database, DecodeError, Row, SqlError, SqlValue};

#[derive(Debug, PartialEq, sqlforge_derive::Model)]
#[table(name = "planets")]
struct Planet {
    id: i64,
    name: String,
    moons: Option<i32>,
}

fn planet_rows() -> Vec<Row> {
    vec![
        Row::new().with("id", 3_i64).with("name", "Earth").with("moons", 1_i64),
        Row::new()
            .with("id", 2_i64)
            .with("name", "Venus")
            .with("moons", SqlValue::Null),
    ]
}

#[tokio::test]
async fn test_run_sends_text_and_binds_once() {
    let db = test_db();
    let rows = db
        .update("planets")
        .set("name", "Terra")
        .where_(col("id").eq(3_i64))
        .run(&db)
        .await
        .unwrap();

    assert!(rows.is_empty());
    assert_eq!(
        db.executor().calls(),
        vec![(
            String::from("UPDATE `planets` SET `name` = ? WHERE `id` = ?"),
            vec![text("Terra"), SqlValue::Int(3)],
        )]
    );
}

#[tokio::test]
async fn test_select_all_decodes_models() {
    let db = test_db_with_rows(planet_rows());
    let planets: Vec<Planet> = db
        .select()
        .model_columns::<Planet>()
        .from("planets")
        .order_by("id", OrderDirection::Desc)
        .all(&db)
        .await
        .unwrap();

    assert_eq!(
        db.executor().last_sql(),
        "SELECT `id`, `name`, `moons` FROM `planets` ORDER BY `id` DESC"
    );
    assert_eq!(
        planets,
        vec![
            Planet {
                id: 3,
                name: String::from("Earth"),
                moons: Some(1),
            },
            Planet {
                id: 2,
                name: String::from("Venus"),
                moons: None,
            },
        ]
    );
}

#[tokio::test]
async fn test_select_first_limits_to_one() {
    let db = test_db_with_rows(planet_rows());
    let planet: Option<Planet> = db
        .select()
        .from("planets")
        .where_(col("name").like("E%"))
        .first(&db)
        .await
        .unwrap();

    assert_eq!(
        db.executor().last_sql(),
        "SELECT * FROM `planets` WHERE `name` LIKE ? LIMIT 1"
    );
    assert_eq!(planet.map(|p| p.id), Some(3));
}

#[tokio::test]
async fn test_first_on_empty_result() {
    let db = test_db();
    let planet: Option<Planet> = db.select().from("planets").first(&db).await.unwrap();
    assert!(planet.is_none());
}

#[tokio::test]
async fn test_decode_error_surfaces() {
    let db = test_db_with_rows(vec![Row::new().with("id", 1_i64)]);
    let err = db
        .select()
        .from("planets")
        .all::<Planet, _>(&db)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SqlError::Decode(DecodeError::MissingColumn { ref field, .. }) if field == "name"
    ));
}

#[tokio::test]
async fn test_executor_failure_is_wrapped() {
    let db = Database::new(RecordingExecutor::failing("connection reset"), Dialect::mysql());
    let err = db.delete("planets").run(&db).await.unwrap_err();

    assert!(matches!(err, SqlError::Execution(_)));
    assert_eq!(err.to_string(), "execution failed: connection reset");
    assert_eq!(db.executor().calls().len(), 1);
}

#[tokio::test]
async fn test_serialization_error_never_reaches_executor() {
    let db = test_db();
    let err = db
        .delete("planets")
        .returning(&["id"])
        .run(&db)
        .await
        .unwrap_err();

    assert!(matches!(err, SqlError::Unsupported { feature: "RETURNING", .. }));
    assert!(db.executor().calls().is_empty());
}

#[tokio::test]
async fn test_raw_query_through_database() {
    let db = test_db_with_rows(planet_rows());
    let min_id = 2_i64;
    let planets: Vec<Planet> = db
        .raw(sql!("SELECT * FROM " {ident: "planets"} " WHERE id >= " {bind: min_id}))
        .all(&db)
        .await
        .unwrap();

    assert_eq!(planets.len(), 2);
    assert_eq!(
        db.executor().calls(),
        vec![(
            String::from("SELECT * FROM `planets` WHERE id >= ?"),
            vec![SqlValue::Int(2)],
        )]
    );
}

#[tokio::test]
async fn test_ddl_round() {
    use sqlforge_core::ast::{ColumnConstraint, DataType};

    let db = test_db();
    db.create_table("planets")
        .if_not_exists()
        .column("id", DataType::Bigint, [ColumnConstraint::primary_key_auto()])
        .column("name", DataType::Text, [ColumnConstraint::NotNull])
        .run(&db)
        .await
        .unwrap();
    db.alter_table("planets")
        .add_column("moons", DataType::Integer, [])
        .run(&db)
        .await
        .unwrap();
    db.drop_table("planets").if_exists().run(&db).await.unwrap();

    let sql: Vec<String> = db.executor().calls().into_iter().map(|(s, _)| s).collect();
    assert_eq!(
        sql,
        vec![
            String::from(
                "CREATE TABLE IF NOT EXISTS `planets` \
                 (`id` BIGINT PRIMARY KEY AUTO_INCREMENT, `name` TEXT NOT NULL)"
            ),
            String::from("ALTER TABLE `planets` ADD COLUMN `moons` INTEGER"),
            String::from("DROP TABLE IF EXISTS `planets`"),
        ]
    );
}
