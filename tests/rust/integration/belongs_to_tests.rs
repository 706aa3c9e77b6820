//! Belongs-to evaluation end to end: catalog -> graph -> path -> SQL -> executor.

use mockall::Sequence;
use schemagraph::{SchemaGraph, SchemaGraphError, StaticCatalog};
use serde_json::json;

use super::common::{init_logging, shop_catalog, MockExecutor};

async fn shop_graph(directed: bool) -> SchemaGraph {
    init_logging();
    let catalog = StaticCatalog::new(shop_catalog());
    SchemaGraph::from_catalog(&catalog, "public", directed)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_order_belongs_to_customer() {
    let graph = shop_graph(true).await;

    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .withf(|statement, parameters| {
            statement.contains(r#"FROM "public"."orders""#)
                && statement.contains(
                    r#"JOIN "public"."customers" ON "public"."orders"."customer_id" = "public"."customers"."customer_id""#,
                )
                && statement.contains(r#"WHERE "orders"."order_id" = $1 AND "customers"."customer_id" = $2"#)
                && parameters.to_vec() == vec!["5".to_string(), "9".to_string()]
        })
        .times(1)
        .returning(|_, _| Ok(vec![json!({ "belongs": true })]));

    let belongs = graph
        .belongs_to("orders", "5", "customers", "9", &executor, 1)
        .await
        .unwrap();
    assert!(belongs);
}

#[tokio::test]
async fn test_false_or_empty_result_means_not_belonging() {
    let graph = shop_graph(true).await;

    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .times(1)
        .returning(|_, _| Ok(vec![json!({ "belongs": false })]));
    assert!(!graph
        .belongs_to("orders", "5", "customers", "9", &executor, 1)
        .await
        .unwrap());

    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .times(1)
        .returning(|_, _| Ok(vec![]));
    assert!(!graph
        .belongs_to("orders", "5", "customers", "9", &executor, 1)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_unknown_from_table() {
    let graph = shop_graph(true).await;
    let executor = MockExecutor::new();

    let result = graph
        .belongs_to("invoices", "5", "customers", "9", &executor, 1)
        .await;
    match result {
        Err(SchemaGraphError::UnknownTable { table }) => assert_eq!(table, "invoices"),
        other => panic!("expected UnknownTable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_multi_hop_join() {
    let graph = shop_graph(true).await;

    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .withf(|statement, _| {
            statement.matches("JOIN").count() == 2
                && statement.contains(r#"JOIN "public"."orders""#)
                && statement.contains(r#"JOIN "public"."stores""#)
        })
        .times(1)
        .returning(|_, _| Ok(vec![json!({ "belongs": "t" })]));

    assert!(graph
        .belongs_to("order_items", "1", "stores", "2", &executor, 3)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_candidates_run_serially_shortest_first() {
    // A second route from orders to customers, through stores.
    let mut rows = shop_catalog();
    rows.push(schemagraph::CatalogRow::foreign_key(
        "stores",
        "favourite_customer_id",
        "customers",
        "customer_id",
    ));
    let graph = SchemaGraph::from_rows(&rows, "public", false).unwrap();

    let paths: Vec<String> = graph
        .find_paths("orders", "customers", 5)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        paths,
        vec!["orders -> customers", "orders -> stores -> customers"]
    );

    let mut seq = Sequence::new();
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .withf(|statement, _| statement.matches("JOIN").count() == 1)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(vec![json!({ "belongs": false })]));
    executor
        .expect_execute()
        .withf(|statement, _| statement.matches("JOIN").count() == 2)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(vec![json!({ "belongs": 1 })]));

    assert!(graph
        .belongs_to("orders", "5", "customers", "9", &executor, 5)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_path_limit_caps_candidates() {
    let mut rows = shop_catalog();
    rows.push(schemagraph::CatalogRow::foreign_key(
        "stores",
        "favourite_customer_id",
        "customers",
        "customer_id",
    ));
    let graph = SchemaGraph::from_rows(&rows, "public", false).unwrap();

    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .times(1)
        .returning(|_, _| Ok(vec![json!({ "belongs": false })]));

    assert!(!graph
        .belongs_to("orders", "5", "customers", "9", &executor, 1)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_executor_failure_propagates() {
    let graph = shop_graph(true).await;

    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .times(1)
        .returning(|_, _| Err(anyhow::anyhow!("relation \"orders\" does not exist").into()));

    let err = graph
        .belongs_to("orders", "5", "customers", "9", &executor, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, SchemaGraphError::Execution { .. }));
    assert!(err.to_string().contains("does not exist"));
}

#[tokio::test]
async fn test_explicit_path() {
    let graph = shop_graph(true).await;

    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .withf(|statement, parameters| {
            statement.contains(r#"FROM "public"."order_items""#)
                && statement.contains(r#""products"."product_id" = $2"#)
                && parameters.to_vec() == vec!["17".to_string(), "3".to_string()]
        })
        .times(1)
        .returning(|_, _| Ok(vec![json!({ "belongs": true })]));

    assert!(graph
        .belongs_to_via(&["order_items", "products"], "17", "3", &executor)
        .await
        .unwrap());

    let unused = MockExecutor::new();
    let err = graph
        .belongs_to_via(&["order_items", "customers"], "17", "3", &unused)
        .await
        .unwrap_err();
    assert!(matches!(err, SchemaGraphError::InvalidPath { .. }));
}

#[tokio::test]
async fn test_shared_graph_across_tasks() {
    let graph = std::sync::Arc::new(shop_graph(true).await);

    let mut handles = Vec::new();
    for key in ["1", "2", "3"] {
        let graph = graph.clone();
        handles.push(tokio::spawn(async move {
            let mut executor = MockExecutor::new();
            executor
                .expect_execute()
                .returning(|_, parameters| {
                    Ok(vec![json!({ "belongs": parameters[0] == "2" })])
                });
            graph
                .belongs_to("orders", key, "stores", "9", &executor, 1)
                .await
                .unwrap()
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    assert_eq!(results, vec![false, true, false]);
}
