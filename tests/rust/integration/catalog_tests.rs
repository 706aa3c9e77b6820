//! Graph construction through catalog adapters.

use schemagraph::catalog::CONSTRAINTS_QUERY;
use schemagraph::{ExecutorCatalog, GraphConfig, SchemaGraph, SchemaGraphError, StaticCatalog};
use serde_json::json;

use super::common::{init_logging, MockExecutor};

#[tokio::test]
async fn test_executor_catalog_builds_graph() {
    init_logging();

    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .withf(|statement, parameters| {
            statement.to_string() == CONSTRAINTS_QUERY && parameters.to_vec() == vec!["sales".to_string()]
        })
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                json!({ "key_type": "primary", "table_name": "B", "column_name": "id",
                        "foreign_table_name": null, "foreign_column_name": null }),
                json!({ "key_type": "primary", "table_name": "A", "column_name": "id",
                        "foreign_table_name": null, "foreign_column_name": null }),
                json!({ "key_type": "foreign", "table_name": "A", "column_name": "a_id",
                        "foreign_table_name": "B", "foreign_column_name": "id" }),
            ])
        });

    let catalog = ExecutorCatalog::new(executor);
    let graph = SchemaGraph::from_catalog(&catalog, "sales", true)
        .await
        .unwrap();

    assert_eq!(graph.tables().collect::<Vec<_>>(), vec!["A", "B"]);
    let linkage = graph.linkage("A", "B").unwrap().unwrap();
    assert_eq!((linkage.from_column(), linkage.to_column()), ("a_id", "id"));
    assert!(graph.linkage("B", "A").unwrap().is_none());
}

#[tokio::test]
async fn test_catalog_failure_is_wrapped_with_schema() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .returning(|_, _| Err(anyhow::anyhow!("permission denied for schema sales").into()));

    let catalog = ExecutorCatalog::new(executor);
    let err = SchemaGraph::from_catalog(&catalog, "sales", true)
        .await
        .unwrap_err();

    match err {
        SchemaGraphError::Catalog { schema, source } => {
            assert_eq!(schema, "sales");
            assert!(source.to_string().contains("permission denied"));
        }
        other => panic!("expected Catalog error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_foreign_key_to_view_fails_build() {
    let catalog = StaticCatalog::from_json_str(
        r#"[
            {"key_type": "primary", "table_name": "orders", "column_name": "id"},
            {"key_type": "foreign", "table_name": "orders", "column_name": "customer_id",
             "foreign_table_name": "customer_summary", "foreign_column_name": "id"}
        ]"#,
    )
    .unwrap();

    let err = SchemaGraph::from_catalog(&catalog, "public", false)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SchemaGraphError::UnresolvedReference { ref from_table, ref to_table }
            if from_table == "orders" && to_table == "customer_summary"
    ));
}

#[tokio::test]
async fn test_rebuild_reflects_new_catalog() {
    let before = StaticCatalog::from_json_str(
        r#"[
            {"key_type": "primary", "table_name": "a", "column_name": "id"},
            {"key_type": "primary", "table_name": "c", "column_name": "id"}
        ]"#,
    )
    .unwrap();
    let graph = SchemaGraph::from_config(&before, &GraphConfig::default())
        .await
        .unwrap();
    assert!(graph.find_paths("a", "c", 1).unwrap().is_empty());

    let after = StaticCatalog::from_json_str(
        r#"[
            {"key_type": "primary", "table_name": "a", "column_name": "id"},
            {"key_type": "primary", "table_name": "b", "column_name": "id"},
            {"key_type": "primary", "table_name": "c", "column_name": "id"},
            {"key_type": "foreign", "table_name": "a", "column_name": "b_id",
             "foreign_table_name": "b", "foreign_column_name": "id"},
            {"key_type": "foreign", "table_name": "b", "column_name": "c_id",
             "foreign_table_name": "c", "foreign_column_name": "id"}
        ]"#,
    )
    .unwrap();
    let rebuilt = SchemaGraph::from_config(&after, &GraphConfig::default())
        .await
        .unwrap();

    let paths = rebuilt.find_paths("a", "c", 1).unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].table_names(), vec!["a", "b", "c"]);
    assert_eq!(rebuilt.schema_name(), "public");
}
