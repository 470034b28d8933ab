//! Compiled SELECT shapes: head pagination, lock/order interaction,
//! reserved-word wrapping, and binding order.

mod common;
use common::*;

use ifx_core::{Query, SqlValue};

#[test]
fn paginated_report() {
    let query = Query::table("orders")
        .select(&["orders.id", "customers.name", "orders.total"])
        .join("customers", "customers.id", "=", "orders.customer_id")
        .where_clause("orders.status", "=", "shipped")
        .order_by_desc("orders.created_at")
        .offset(40)
        .limit(20);
    assert_eq!(
        compile(&query),
        "select skip 40 first 20 orders.id, customers.name, orders.total \
         from orders join customers on customers.id = orders.customer_id \
         where orders.status = ? order by orders.created_at desc"
    );
}

#[test]
fn skip_always_precedes_first() {
    let query = Query::table("users").offset(10).limit(5);
    assert_eq!(compile(&query), "select skip 10 first 5 * from users");
}

#[test]
fn zero_offset_and_limit_compile_away() {
    let query = Query::table("users").offset(0).limit(0);
    assert_eq!(compile(&query), "select * from users");
}

#[test]
fn locked_read_loses_its_ordering() {
    let query = Query::table("jobs")
        .where_clause("queue", "=", "default")
        .order_by("id")
        .limit(1)
        .for_update();
    assert_eq!(
        compile(&query),
        "select first 1 * from jobs where queue = ? for update"
    );

    let unlocked = Query::table("jobs")
        .where_clause("queue", "=", "default")
        .order_by("id")
        .limit(1);
    assert_eq!(
        compile(&unlocked),
        "select first 1 * from jobs where queue = ? order by id asc"
    );
}

#[test]
fn reserved_identifiers_are_uppercased() {
    let query = Query::table("files")
        .select(&["name", "size", "interval"])
        .where_clause("size", ">", 1024)
        .order_by("size");
    assert_eq!(
        compile(&query),
        "select name, SIZE, INTERVAL from files where SIZE > ? order by SIZE asc"
    );
}

#[test]
fn quote_characters_are_stripped() {
    let query = Query::table("users").select(&["\"email\"", "\"login\""]);
    assert_eq!(compile(&query), "select email, login from users");
}

#[test]
fn star_passes_through_wrapping() {
    let query = Query::table("users").select(&["*"]);
    assert_eq!(compile(&query), "select * from users");

    let counted = Query::table("users").count();
    assert_eq!(compile(&counted), "select count(*) as aggregate from users");
}

#[test]
fn existence_probe_appends_rownum_guard() {
    let query = Query::table("users").where_clause("email", "=", "x@y.z");
    assert_eq!(
        compile_exists(&query),
        "select 1 as \"exists\" from users where email = ? and rownum = 1"
    );
}

#[test]
fn prefix_reaches_tables_and_qualified_columns() {
    let query = Query::table("orders")
        .select(&["orders.id", "status"])
        .join("customers", "customers.id", "=", "orders.customer_id");
    assert_eq!(
        compile_prefixed("app_", &query),
        "select app_orders.id, status from app_orders \
         join app_customers on app_customers.id = app_orders.customer_id"
    );
}

#[test]
fn union_with_final_ordering() {
    let archived = Query::table("archived_orders").select(&["id"]);
    let query = Query::table("orders")
        .select(&["id"])
        .union(archived)
        .union_order_by("id");
    assert_eq!(
        compile(&query),
        "select id from orders union select id from archived_orders order by id asc"
    );
}

#[test]
fn bitand_filter_renders_inline() {
    let query = Query::table("users")
        .where_bitand("flags", 4, "=", 4)
        .where_clause("active", "=", 1);
    assert_eq!(
        compile(&query),
        "select * from users where bitand(flags, 4) = 4 and active = ?"
    );
    // the mask and comparison value never become placeholders
    assert_eq!(query.bindings(), vec![SqlValue::Int(1)]);
}

#[test]
fn bindings_follow_placeholder_order() {
    let query = Query::table("orders")
        .where_clause("status", "=", "open")
        .where_in("region", [1, 2, 3])
        .where_between("total", 10, 500)
        .having_raw("count(*) > ?", vec![SqlValue::Int(5)]);
    assert_eq!(
        compile(&query),
        "select * from orders where status = ? and region in (?, ?, ?) \
         and total between ? and ? having count(*) > ?"
    );
    assert_eq!(
        query.bindings(),
        vec![
            SqlValue::Text(String::from("open")),
            SqlValue::Int(1),
            SqlValue::Int(2),
            SqlValue::Int(3),
            SqlValue::Int(10),
            SqlValue::Int(500),
            SqlValue::Int(5),
        ]
    );
}
