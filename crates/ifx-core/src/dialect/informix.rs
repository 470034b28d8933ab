//! Informix query grammar.

use super::Dialect;
use crate::query::{Column, Condition, Connector, Lock, Order, Predicate, Query};
use crate::reserved::is_reserved;

/// Query grammar for the Informix engine.
///
/// Where it deviates from garden-variety SQL:
/// - pagination compiles into the select head (`select skip 10 first 5 ...`),
///   there is no trailing limit/offset clause;
/// - a locked select loses its `order by`, the engine rejects the combination;
/// - reserved identifiers are upper-cased instead of quoted, every other
///   identifier stays bare with `"` characters stripped;
/// - inserts always take the single-row shape, multi-row inserts are the
///   driver's job;
/// - union arms are not parenthesized.
#[derive(Debug, Clone, Default)]
pub struct InformixDialect {
    prefix: String,
}

impl InformixDialect {
    /// Creates the dialect with no table prefix.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefix: String::new(),
        }
    }

    /// Creates the dialect with a table prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn compile_columns(&self, query: &Query) -> String {
        let mut select = String::from("select");
        if let Some(offset) = query.offset {
            if offset > 0 {
                select.push_str(&format!(" skip {offset}"));
            }
        }
        if let Some(limit) = query.limit {
            if limit > 0 {
                select.push_str(&format!(" first {limit}"));
            }
        }
        if query.distinct {
            select.push_str(" distinct");
        }
        format!("{select} {}", self.select_list(&query.columns))
    }

    fn select_list(&self, columns: &[Column]) -> String {
        if columns.is_empty() {
            return String::from("*");
        }
        columns
            .iter()
            .map(|column| match column {
                Column::Name(name) => self.wrap(name),
                Column::Raw(sql) => sql.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn compile_aggregate(&self, query: &Query) -> String {
        let Some(aggregate) = &query.aggregate else {
            return String::new();
        };
        let mut column = if aggregate.column == "*" {
            String::from("*")
        } else {
            self.wrap(&aggregate.column)
        };
        if query.distinct && aggregate.column != "*" {
            column = format!("distinct {column}");
        }
        format!("select {}({column}) as aggregate", aggregate.function)
    }

    fn compile_from(&self, query: &Query) -> String {
        format!("from {}", self.wrap_table(&query.from))
    }

    fn compile_joins(&self, query: &Query) -> String {
        query
            .joins
            .iter()
            .map(|join| {
                let table = self.wrap_table(&join.table);
                if join.ons.is_empty() {
                    return format!("{} join {table}", join.kind.as_sql());
                }
                let mut on_sql = String::new();
                for (i, on) in join.ons.iter().enumerate() {
                    if i > 0 {
                        on_sql.push(' ');
                        on_sql.push_str(on.connector.as_sql());
                        on_sql.push(' ');
                    }
                    on_sql.push_str(&format!(
                        "{} {} {}",
                        self.wrap(&on.left),
                        on.operator,
                        self.wrap(&on.right)
                    ));
                }
                format!("{} join {table} on {on_sql}", join.kind.as_sql())
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn compile_wheres(&self, query: &Query) -> String {
        if query.wheres.is_empty() {
            return String::new();
        }
        format!("where {}", self.compile_conditions(&query.wheres))
    }

    fn compile_conditions(&self, conditions: &[Condition]) -> String {
        let mut sql = String::new();
        for (i, condition) in conditions.iter().enumerate() {
            if i > 0 {
                sql.push(' ');
                sql.push_str(condition.connector.as_sql());
                sql.push(' ');
            }
            sql.push_str(&self.compile_predicate(&condition.predicate));
        }
        sql
    }

    fn compile_predicate(&self, predicate: &Predicate) -> String {
        match predicate {
            Predicate::Basic {
                column, operator, ..
            } => format!("{} {operator} ?", self.wrap(column)),
            Predicate::Null { column, negated } => {
                let not = if *negated { "not " } else { "" };
                format!("{} is {not}null", self.wrap(column))
            }
            Predicate::In {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    // nothing can match an empty list
                    return String::from(if *negated { "1 = 1" } else { "0 = 1" });
                }
                let not = if *negated { "not " } else { "" };
                format!(
                    "{} {not}in ({})",
                    self.wrap(column),
                    self.parameterize(values.len())
                )
            }
            Predicate::Between {
                column, negated, ..
            } => {
                let not = if *negated { "not " } else { "" };
                format!("{} {not}between ? and ?", self.wrap(column))
            }
            Predicate::Raw { sql, .. } => sql.clone(),
            Predicate::Bitand {
                column,
                mask,
                operator,
                value,
                negated,
            } => {
                let function = if *negated { "not bitand" } else { "bitand" };
                format!("{function}({}, {mask}) {operator} {value}", self.wrap(column))
            }
            Predicate::Group(inner) => format!("({})", self.compile_conditions(inner)),
        }
    }

    fn compile_groups(&self, query: &Query) -> String {
        format!("group by {}", self.columnize(&query.groups))
    }

    fn compile_havings(&self, query: &Query) -> String {
        let mut sql = String::from("having ");
        for (i, having) in query.havings.iter().enumerate() {
            if i > 0 {
                sql.push(' ');
                sql.push_str(having.connector.as_sql());
                sql.push(' ');
            }
            sql.push_str(&having.sql);
        }
        sql
    }

    fn compile_orders(&self, orders: &[Order]) -> String {
        let list = orders
            .iter()
            .map(|order| format!("{} {}", self.wrap(&order.column), order.direction.as_sql()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("order by {list}")
    }

    fn compile_unions(&self, query: &Query) -> String {
        let mut sql = String::new();
        for union in &query.unions {
            if !sql.is_empty() {
                sql.push(' ');
            }
            sql.push_str(if union.all { "union all " } else { "union " });
            sql.push_str(&self.compile_select(&union.query));
        }
        if !query.union_orders.is_empty() {
            sql.push(' ');
            sql.push_str(&self.compile_orders(&query.union_orders));
        }
        sql
    }

    fn compile_lock(lock: &Lock) -> String {
        match lock {
            Lock::Update => String::from("for update"),
            Lock::ReadOnly => String::from("for read only"),
            Lock::Raw(sql) => sql.clone(),
        }
    }
}

impl Dialect for InformixDialect {
    fn name(&self) -> &'static str {
        "informix"
    }

    fn table_prefix(&self) -> &str {
        &self.prefix
    }

    fn wrap_value(&self, value: &str) -> String {
        if is_reserved(value) {
            return value.to_ascii_uppercase();
        }
        if value == "*" {
            return String::from(value);
        }
        value.replace('"', "")
    }

    fn compile_select(&self, query: &Query) -> String {
        let mut sql: Vec<String> = Vec::new();
        if query.aggregate.is_some() {
            sql.push(self.compile_aggregate(query));
        } else {
            sql.push(self.compile_columns(query));
        }
        sql.push(self.compile_from(query));
        if !query.joins.is_empty() {
            sql.push(self.compile_joins(query));
        }
        let wheres = self.compile_wheres(query);
        if !wheres.is_empty() {
            sql.push(wheres);
        }
        if !query.groups.is_empty() {
            sql.push(self.compile_groups(query));
        }
        if !query.havings.is_empty() {
            sql.push(self.compile_havings(query));
        }
        // a locked select cannot carry an order by clause
        if !query.orders.is_empty() && query.lock.is_none() {
            sql.push(self.compile_orders(&query.orders));
        }
        if !query.unions.is_empty() {
            sql.push(self.compile_unions(query));
        }
        if let Some(lock) = &query.lock {
            sql.push(Self::compile_lock(lock));
        }
        sql.join(" ")
    }

    fn compile_exists(&self, query: &Query) -> String {
        let mut exists_query = query.clone();
        exists_query.columns = vec![Column::Raw(String::from("1 as \"exists\""))];
        exists_query.wheres.push(Condition {
            connector: Connector::And,
            predicate: Predicate::Raw {
                sql: String::from("rownum = 1"),
                bindings: Vec::new(),
            },
        });
        self.compile_select(&exists_query)
    }

    fn compile_insert(&self, query: &Query, columns: &[String]) -> String {
        let table = self.wrap_table(&query.from);
        let cols = self.columnize(columns);
        let parameters = self.parameterize(columns.len());
        format!("insert into {table} ({cols}) values ({parameters})")
    }

    fn compile_update(&self, query: &Query, columns: &[String]) -> String {
        let table = self.wrap_table(&query.from);
        let assignments = columns
            .iter()
            .map(|column| format!("{} = ?", self.wrap(column)))
            .collect::<Vec<_>>()
            .join(", ");
        let wheres = self.compile_wheres(query);
        format!("update {table} set {assignments} {wheres}")
            .trim_end()
            .to_string()
    }

    fn compile_delete(&self, query: &Query) -> String {
        let table = self.wrap_table(&query.from);
        let wheres = self.compile_wheres(query);
        format!("delete from {table} {wheres}").trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;

    fn dialect() -> InformixDialect {
        InformixDialect::new()
    }

    #[test]
    fn test_select_star() {
        let sql = dialect().compile_select(&Query::table("users"));
        assert_eq!(sql, "select * from users");
    }

    #[test]
    fn test_skip_comes_before_first() {
        let query = Query::table("users").offset(10).limit(5);
        assert_eq!(
            dialect().compile_select(&query),
            "select skip 10 first 5 * from users"
        );
    }

    #[test]
    fn test_zero_pagination_is_omitted() {
        let query = Query::table("users").offset(0).limit(0);
        assert_eq!(dialect().compile_select(&query), "select * from users");
    }

    #[test]
    fn test_limit_without_offset() {
        let query = Query::table("users").limit(3);
        assert_eq!(
            dialect().compile_select(&query),
            "select first 3 * from users"
        );
    }

    #[test]
    fn test_distinct_follows_pagination() {
        let query = Query::table("users")
            .select(&["name"])
            .distinct()
            .offset(4)
            .limit(2);
        assert_eq!(
            dialect().compile_select(&query),
            "select skip 4 first 2 distinct name from users"
        );
    }

    #[test]
    fn test_basic_where() {
        let query = Query::table("users").where_clause("age", ">", 18);
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users where age > ?"
        );
    }

    #[test]
    fn test_or_where() {
        let query = Query::table("users")
            .where_clause("age", ">", 18)
            .or_where("name", "=", "admin");
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users where age > ? or name = ?"
        );
    }

    #[test]
    fn test_null_tests() {
        let query = Query::table("users")
            .where_null("deleted_at")
            .where_not_null("email");
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users where deleted_at is null and email is not null"
        );
    }

    #[test]
    fn test_where_in() {
        let query = Query::table("users").where_in("role", ["admin", "editor"]);
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users where role in (?, ?)"
        );
    }

    #[test]
    fn test_empty_in_compiles_to_constant() {
        let none: Vec<SqlValue> = Vec::new();
        let query = Query::table("users").where_in("role", none.clone());
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users where 0 = 1"
        );

        let query = Query::table("users").where_not_in("role", none);
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users where 1 = 1"
        );
    }

    #[test]
    fn test_between() {
        let query = Query::table("users").where_not_between("age", 13, 65);
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users where age not between ? and ?"
        );
    }

    #[test]
    fn test_bitand_splices_inline() {
        let query = Query::table("documents").where_bitand("flags", 4, ">", 0);
        assert_eq!(
            dialect().compile_select(&query),
            "select * from documents where bitand(flags, 4) > 0"
        );

        let query = Query::table("documents").where_not_bitand("flags", 2, "=", 2);
        assert_eq!(
            dialect().compile_select(&query),
            "select * from documents where not bitand(flags, 2) = 2"
        );
    }

    #[test]
    fn test_nested_group() {
        let query = Query::table("users")
            .where_clause("active", "=", true)
            .or_where_group(|q| q.where_clause("age", "<", 13).or_where("age", ">", 65));
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users where active = ? or (age < ? or age > ?)"
        );
    }

    #[test]
    fn test_group_by_and_having() {
        let query = Query::table("orders")
            .select(&["customer_id"])
            .group_by(&["customer_id"])
            .having_raw("count(*) > ?", vec![SqlValue::Int(3)]);
        assert_eq!(
            dialect().compile_select(&query),
            "select customer_id from orders group by customer_id having count(*) > ?"
        );
    }

    #[test]
    fn test_order_by() {
        let query = Query::table("users").order_by("name").order_by_desc("age");
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users order by name asc, age desc"
        );
    }

    #[test]
    fn test_lock_drops_order_by() {
        let query = Query::table("users")
            .where_clause("id", "=", 1)
            .order_by("name")
            .for_update();
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users where id = ? for update"
        );
    }

    #[test]
    fn test_read_only_lock() {
        let query = Query::table("users").for_read_only();
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users for read only"
        );
    }

    #[test]
    fn test_raw_lock_passes_through() {
        let query = Query::table("users").lock_raw("for update of name");
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users for update of name"
        );
    }

    #[test]
    fn test_exists_probe() {
        let query = Query::table("users").where_clause("id", "=", 7);
        assert_eq!(
            dialect().compile_exists(&query),
            "select 1 as \"exists\" from users where id = ? and rownum = 1"
        );
    }

    #[test]
    fn test_insert_is_always_single_row() {
        let query = Query::table("users");
        let sql = dialect().compile_insert(
            &query,
            &[String::from("name"), String::from("email")],
        );
        assert_eq!(sql, "insert into users (name, email) values (?, ?)");
    }

    #[test]
    fn test_update() {
        let query = Query::table("users").where_clause("id", "=", 1);
        let sql = dialect().compile_update(&query, &[String::from("name")]);
        assert_eq!(sql, "update users set name = ? where id = ?");
    }

    #[test]
    fn test_update_without_where() {
        let query = Query::table("users");
        let sql = dialect().compile_update(&query, &[String::from("name")]);
        assert_eq!(sql, "update users set name = ?");
    }

    #[test]
    fn test_delete() {
        let query = Query::table("users").where_clause("id", "=", 1);
        assert_eq!(
            dialect().compile_delete(&query),
            "delete from users where id = ?"
        );
    }

    #[test]
    fn test_aggregate_head() {
        let query = Query::table("users").count();
        assert_eq!(
            dialect().compile_select(&query),
            "select count(*) as aggregate from users"
        );
    }

    #[test]
    fn test_distinct_aggregate_column() {
        let query = Query::table("users").distinct().max("age");
        assert_eq!(
            dialect().compile_select(&query),
            "select max(distinct age) as aggregate from users"
        );
    }

    #[test]
    fn test_aggregate_ignores_pagination_head() {
        let query = Query::table("users").offset(5).limit(2).count();
        assert_eq!(
            dialect().compile_select(&query),
            "select count(*) as aggregate from users"
        );
    }

    #[test]
    fn test_reserved_identifiers_are_uppercased_unquoted() {
        let query = Query::table("orders").select(&["order", "size"]);
        assert_eq!(
            dialect().compile_select(&query),
            "select ORDER, SIZE from orders"
        );
    }

    #[test]
    fn test_quotes_are_stripped_not_added() {
        let query = Query::table("users").select(&["\"name\""]);
        assert_eq!(dialect().compile_select(&query), "select name from users");
    }

    #[test]
    fn test_wrapping_is_idempotent() {
        let d = dialect();
        assert_eq!(d.wrap_value(&d.wrap_value("order")), "ORDER");
        assert_eq!(d.wrap_value(&d.wrap_value("\"name\"")), "name");
        assert_eq!(d.wrap_value(&d.wrap_value("*")), "*");
    }

    #[test]
    fn test_aliases_and_dotted_paths() {
        let d = dialect();
        assert_eq!(d.wrap("name as n"), "name as n");
        assert_eq!(d.wrap("users.name"), "users.name");
    }

    #[test]
    fn test_table_prefix() {
        let d = InformixDialect::with_prefix("app_");
        let query = Query::table("users").select(&["users.name"]);
        assert_eq!(
            d.compile_select(&query),
            "select app_users.name from app_users"
        );
    }

    #[test]
    fn test_joins() {
        let query = Query::table("users")
            .select(&["users.name", "orders.total"])
            .join("orders", "users.id", "=", "orders.user_id")
            .left_join("invoices", "orders.id", "=", "invoices.order_id");
        assert_eq!(
            dialect().compile_select(&query),
            "select users.name, orders.total from users \
             inner join orders on users.id = orders.user_id \
             left join invoices on orders.id = invoices.order_id"
        );
    }

    #[test]
    fn test_unions_are_not_parenthesized() {
        let archived = Query::table("archived_users").where_clause("id", "=", 2);
        let query = Query::table("users")
            .where_clause("id", "=", 1)
            .union(archived)
            .union_all(Query::table("pending_users"));
        assert_eq!(
            dialect().compile_select(&query),
            "select * from users where id = ? \
             union select * from archived_users where id = ? \
             union all select * from pending_users"
        );
    }

    #[test]
    fn test_union_ordering_comes_last() {
        let query = Query::table("a")
            .union(Query::table("b"))
            .union_order_by("name");
        assert_eq!(
            dialect().compile_select(&query),
            "select * from a union select * from b order by name asc"
        );
    }
}
