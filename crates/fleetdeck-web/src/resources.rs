//! Static registry of backend resources and their table definitions
//!
//! One generic list module parameterized by these definitions replaces a
//! per-entity table component for every resource. Adding a resource to
//! the dashboard means adding one entry here.

/// One column of a resource table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    /// JSON field key on the backend row object.
    pub key: &'static str,
    /// Header label.
    pub label: &'static str,
}

/// A backend-owned collection exposed via conventional REST endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ResourceDef {
    /// REST path segment and plural items key, e.g. `trucks`.
    pub name: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Table columns.
    pub columns: &'static [ColumnDef],
    /// Filter keys this table accepts; anything else in the URL is ignored.
    pub filter_keys: &'static [&'static str],
    /// Whether the table offers a date-range filter.
    pub date_filtered: bool,
}

const fn col(key: &'static str, label: &'static str) -> ColumnDef {
    ColumnDef { key, label }
}

/// All resources the dashboard knows about.
pub const RESOURCES: &[ResourceDef] = &[
    ResourceDef {
        name: "trucks",
        title: "Trucks",
        columns: &[
            col("plate", "Plate"),
            col("model", "Model"),
            col("capacity", "Capacity"),
            col("status", "Status"),
        ],
        filter_keys: &["companyId", "status"],
        date_filtered: false,
    },
    ResourceDef {
        name: "drivers",
        title: "Drivers",
        columns: &[
            col("name", "Name"),
            col("phone", "Phone"),
            col("licenseNumber", "License"),
            col("status", "Status"),
        ],
        filter_keys: &["companyId", "status"],
        date_filtered: false,
    },
    ResourceDef {
        name: "companies",
        title: "Companies",
        columns: &[col("name", "Name"), col("email", "Email"), col("city", "City")],
        filter_keys: &[],
        date_filtered: false,
    },
    ResourceDef {
        name: "categories",
        title: "Categories",
        columns: &[col("name", "Name"), col("productCount", "Products")],
        filter_keys: &[],
        date_filtered: false,
    },
    ResourceDef {
        name: "products",
        title: "Products",
        columns: &[
            col("name", "Name"),
            col("categoryName", "Category"),
            col("price", "Price"),
            col("unit", "Unit"),
        ],
        filter_keys: &["categoryId"],
        date_filtered: false,
    },
    ResourceDef {
        name: "stock",
        title: "Stock",
        columns: &[
            col("productName", "Product"),
            col("quantity", "Quantity"),
            col("warehouse", "Warehouse"),
        ],
        filter_keys: &["productId", "warehouseId"],
        date_filtered: false,
    },
    ResourceDef {
        name: "orders",
        title: "Orders",
        columns: &[
            col("reference", "Reference"),
            col("customerName", "Customer"),
            col("status", "Status"),
            col("totalAmount", "Total"),
            col("createdAt", "Created"),
        ],
        filter_keys: &["companyId", "status"],
        date_filtered: true,
    },
    ResourceDef {
        name: "users",
        title: "Users",
        columns: &[
            col("name", "Name"),
            col("email", "Email"),
            col("role", "Role"),
        ],
        filter_keys: &["role"],
        date_filtered: false,
    },
];

/// Look up a resource by its path segment.
#[must_use]
pub fn resource(name: &str) -> Option<&'static ResourceDef> {
    RESOURCES.iter().find(|def| def.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_resource() {
        let def = resource("trucks").map(|d| d.title);
        assert_eq!(def, Some("Trucks"));
    }

    #[test]
    fn test_lookup_unknown_resource() {
        assert!(resource("spaceships").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = RESOURCES.iter().map(|d| d.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RESOURCES.len());
    }
}
