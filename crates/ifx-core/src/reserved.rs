//! Informix reserved words.
//!
//! Identifiers that collide with a reserved word cannot be double-quoted the
//! way other engines allow; the grammars upper-case them instead and leave
//! every other identifier bare. The table is the SQL keyword list from the
//! IBM Informix documentation.

/// Reserved words, upper-cased and sorted for binary search.
static RESERVED_WORDS: &[&str] = &[
    "ADD",
    "AFTER",
    "ALL",
    "ALTER",
    "AND",
    "ANY",
    "AS",
    "ASC",
    "AT",
    "AUDIT",
    "AUTHORIZATION",
    "AVG",
    "BEFORE",
    "BEGIN",
    "BETWEEN",
    "BY",
    "CALL",
    "CASCADE",
    "CASE",
    "CHAR",
    "CHARACTER",
    "CHECK",
    "CLOSE",
    "CLUSTER",
    "COLUMN",
    "COMMIT",
    "CONNECT",
    "CONSTRAINT",
    "CONTINUE",
    "COUNT",
    "CREATE",
    "CURRENT",
    "CURSOR",
    "DATABASE",
    "DATE",
    "DATETIME",
    "DAY",
    "DBA",
    "DEC",
    "DECIMAL",
    "DECLARE",
    "DEFAULT",
    "DEFER",
    "DELETE",
    "DESC",
    "DESCRIBE",
    "DISCONNECT",
    "DISTINCT",
    "DOUBLE",
    "DROP",
    "EACH",
    "ELSE",
    "END",
    "ESCAPE",
    "EXCLUSIVE",
    "EXEC",
    "EXECUTE",
    "EXISTS",
    "EXIT",
    "EXPLAIN",
    "EXTEND",
    "EXTENT",
    "FETCH",
    "FILE",
    "FIRST",
    "FLOAT",
    "FOR",
    "FOREIGN",
    "FRACTION",
    "FREE",
    "FROM",
    "GRANT",
    "GROUP",
    "HAVING",
    "HOUR",
    "IF",
    "IMMEDIATE",
    "IN",
    "INDEX",
    "INSERT",
    "INT",
    "INTEGER",
    "INTERVAL",
    "INTO",
    "IS",
    "ISOLATION",
    "JOIN",
    "KEY",
    "LANGUAGE",
    "LEFT",
    "LEVEL",
    "LIKE",
    "LOCK",
    "LOG",
    "MATCHES",
    "MAX",
    "MIN",
    "MINUTE",
    "MODE",
    "MONEY",
    "MONTH",
    "NCHAR",
    "NEXT",
    "NOT",
    "NULL",
    "NUMERIC",
    "NVARCHAR",
    "OF",
    "ON",
    "OPEN",
    "OPTION",
    "OR",
    "ORDER",
    "OUTER",
    "PAGE",
    "PRECISION",
    "PREPARE",
    "PRIMARY",
    "PRIOR",
    "PRIVILEGES",
    "PROCEDURE",
    "PUBLIC",
    "READ",
    "REAL",
    "RECOVER",
    "REFERENCES",
    "RELEASE",
    "RENAME",
    "REPEATABLE",
    "RESERVE",
    "RESUME",
    "REVOKE",
    "RIGHT",
    "ROLLBACK",
    "ROLLFORWARD",
    "ROW",
    "ROWID",
    "ROWS",
    "SCHEMA",
    "SECOND",
    "SELECT",
    "SERIAL",
    "SESSION",
    "SET",
    "SHARE",
    "SIZE",
    "SMALLFLOAT",
    "SMALLINT",
    "SOME",
    "SQL",
    "STABILITY",
    "START",
    "STATISTICS",
    "STEP",
    "SUM",
    "SYNONYM",
    "TABLE",
    "TEMP",
    "TEXT",
    "THEN",
    "TIME",
    "TO",
    "TODAY",
    "TRANSACTION",
    "TRIGGER",
    "UNION",
    "UNIQUE",
    "UNITS",
    "UNLOCK",
    "UPDATE",
    "USER",
    "USING",
    "VALUES",
    "VARCHAR",
    "VIEW",
    "WAIT",
    "WHEN",
    "WHENEVER",
    "WHERE",
    "WHILE",
    "WITH",
    "WORK",
    "YEAR",
];

/// Returns `true` when the identifier is an Informix reserved word.
///
/// The check is case-insensitive and total: any string can be asked.
#[must_use]
pub fn is_reserved(ident: &str) -> bool {
    let upper = ident.to_ascii_uppercase();
    RESERVED_WORDS.binary_search(&upper.as_str()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        // binary_search depends on this
        let mut sorted = RESERVED_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, RESERVED_WORDS);
    }

    #[test]
    fn test_keywords_are_reserved() {
        assert!(is_reserved("select"));
        assert!(is_reserved("TABLE"));
        assert!(is_reserved("Order"));
        assert!(is_reserved("serial"));
        assert!(is_reserved("matches"));
    }

    #[test]
    fn test_plain_identifiers_are_not_reserved() {
        assert!(!is_reserved("users"));
        assert!(!is_reserved("created_at"));
        assert!(!is_reserved("selector"));
        assert!(!is_reserved(""));
        assert!(!is_reserved("*"));
    }
}
