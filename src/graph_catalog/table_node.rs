use std::fmt;

/// A graph vertex: one base table and its primary-key column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableNode {
    table_name: String,
    primary_key_column: String,
}

impl TableNode {
    pub fn new(table_name: impl Into<String>, primary_key_column: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key_column: primary_key_column.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn primary_key_column(&self) -> &str {
        &self.primary_key_column
    }
}

impl fmt::Display for TableNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.table_name, self.primary_key_column)
    }
}

/// A directed edge attribute: the column on the source table joined to the
/// column on the target table.
///
/// For a foreign key `orders.customer_id -> customers.id` the forward linkage
/// is `(customer_id, id)`; an undirected build also stores the mirror
/// `(id, customer_id)` on the reverse edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Linkage {
    from_column: String,
    to_column: String,
}

impl Linkage {
    pub fn new(from_column: impl Into<String>, to_column: impl Into<String>) -> Self {
        Self {
            from_column: from_column.into(),
            to_column: to_column.into(),
        }
    }

    pub fn from_column(&self) -> &str {
        &self.from_column
    }

    pub fn to_column(&self) -> &str {
        &self.to_column
    }

    /// The same pairing seen from the other end.
    pub fn mirrored(&self) -> Self {
        Self {
            from_column: self.to_column.clone(),
            to_column: self.from_column.clone(),
        }
    }
}
