use async_trait::async_trait;
use mockall::mock;
use schemagraph::{BoxError, CatalogRow, QueryExecutor};
use serde_json::Value;

mock! {
    pub Executor {}

    #[async_trait]
    impl QueryExecutor for Executor {
        async fn execute(
            &self,
            statement: &str,
            parameters: &[String],
        ) -> Result<Vec<Value>, BoxError>;
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// customers <- orders -> stores, orders <- order_items -> products
pub fn shop_catalog() -> Vec<CatalogRow> {
    vec![
        CatalogRow::primary_key("customers", "customer_id"),
        CatalogRow::primary_key("orders", "order_id"),
        CatalogRow::primary_key("stores", "store_id"),
        CatalogRow::primary_key("order_items", "item_id"),
        CatalogRow::primary_key("products", "product_id"),
        CatalogRow::foreign_key("orders", "customer_id", "customers", "customer_id"),
        CatalogRow::foreign_key("orders", "store_id", "stores", "store_id"),
        CatalogRow::foreign_key("order_items", "order_id", "orders", "order_id"),
        CatalogRow::foreign_key("order_items", "product_id", "products", "product_id"),
    ]
}
