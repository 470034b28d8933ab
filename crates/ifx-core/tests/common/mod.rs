#![allow(dead_code)]

use ifx_core::schema::Blueprint;
use ifx_core::{Dialect, InformixDialect, InformixSchemaDialect, Query, SchemaDialect};

pub fn compile(query: &Query) -> String {
    InformixDialect::new().compile_select(query)
}

pub fn compile_prefixed(prefix: &str, query: &Query) -> String {
    InformixDialect::with_prefix(prefix).compile_select(query)
}

pub fn compile_exists(query: &Query) -> String {
    InformixDialect::new().compile_exists(query)
}

pub fn ddl(blueprint: &Blueprint) -> Vec<String> {
    InformixSchemaDialect::new().compile(blueprint)
}

pub fn ddl_prefixed(prefix: &str, blueprint: &Blueprint) -> Vec<String> {
    InformixSchemaDialect::with_prefix(prefix).compile(blueprint)
}

pub fn single_ddl(blueprint: &Blueprint) -> String {
    let mut statements = ddl(blueprint);
    assert_eq!(
        statements.len(),
        1,
        "Expected a single statement, got: {statements:?}"
    );
    statements.remove(0)
}
