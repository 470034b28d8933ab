//! Query model.
//!
//! A [`Query`] is an owned description of a single SQL statement. The fluent
//! methods only record structure; turning it into SQL text is the dialect's
//! job (see [`crate::dialect`]), and bind values stay positional throughout.

use crate::value::{SqlValue, ToSqlValue};

/// Select-list entry: a plain column reference or a raw SQL fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Column reference, possibly dotted or aliased (`t.col`, `col as c`).
    Name(String),
    /// Raw SQL spliced into the select list verbatim.
    Raw(String),
}

/// AND/OR connector between predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// Joins with `and`.
    And,
    /// Joins with `or`.
    Or,
}

impl Connector {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// A predicate together with its connector to the previous one.
///
/// The connector of the first entry in a list is never rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// How this predicate attaches to the preceding one.
    pub connector: Connector,
    /// The predicate itself.
    pub predicate: Predicate,
}

/// The predicate forms the dialect knows how to compile.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column op ?`
    Basic {
        /// Column reference.
        column: String,
        /// Comparison operator, spliced verbatim.
        operator: String,
        /// Bound value.
        value: SqlValue,
    },
    /// `column is [not] null`
    Null {
        /// Column reference.
        column: String,
        /// `is not null` when set.
        negated: bool,
    },
    /// `column [not] in (?, ...)`; an empty list compiles to a constant
    /// falsehood (truth when negated).
    In {
        /// Column reference.
        column: String,
        /// Bound values.
        values: Vec<SqlValue>,
        /// `not in` when set.
        negated: bool,
    },
    /// `column [not] between ? and ?`
    Between {
        /// Column reference.
        column: String,
        /// Lower bound.
        low: SqlValue,
        /// Upper bound.
        high: SqlValue,
        /// `not between` when set.
        negated: bool,
    },
    /// Raw SQL with positional bindings.
    Raw {
        /// The fragment, spliced verbatim.
        sql: String,
        /// Bindings the fragment's placeholders consume.
        bindings: Vec<SqlValue>,
    },
    /// `[not ]bitand(column, mask) op value`; the integers splice inline,
    /// they are not bound.
    Bitand {
        /// Column reference.
        column: String,
        /// Bit mask applied to the column.
        mask: i64,
        /// Comparison operator.
        operator: String,
        /// Comparison value.
        value: i64,
        /// Prefixes the function with `not` when set.
        negated: bool,
    },
    /// Parenthesized group of conditions.
    Group(Vec<Condition>),
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A single `order by` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Column reference.
    pub column: String,
    /// Sort direction.
    pub direction: Direction,
}

/// A raw `having` fragment with its connector and bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Having {
    /// How this fragment attaches to the preceding one.
    pub connector: Connector,
    /// The fragment, spliced verbatim.
    pub sql: String,
    /// Bindings the fragment's placeholders consume.
    pub bindings: Vec<SqlValue>,
}

/// Row locking clause.
///
/// Informix rejects `order by` in locked selects, so the dialect drops the
/// ordering when any of these is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lock {
    /// `for update`
    Update,
    /// `for read only`
    ReadOnly,
    /// A raw lock clause passed through verbatim.
    Raw(String),
}

/// A query glued onto this one with `union`.
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    /// The unioned query.
    pub query: Query,
    /// `union all` when set.
    pub all: bool,
}

/// Aggregate head replacing the select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    /// Aggregate function name (`count`, `sum`, ...).
    pub function: String,
    /// Aggregated column, `*` for whole rows.
    pub column: String,
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `inner join`
    Inner,
    /// `left join`
    Left,
    /// `right join`
    Right,
    /// `cross join`
    Cross,
}

impl JoinKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Left => "left",
            Self::Right => "right",
            Self::Cross => "cross",
        }
    }
}

/// A column-equals-column join condition.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOn {
    /// How this condition attaches to the preceding one.
    pub connector: Connector,
    /// Left-hand column reference.
    pub left: String,
    /// Comparison operator.
    pub operator: String,
    /// Right-hand column reference.
    pub right: String,
}

/// A join clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Join type.
    pub kind: JoinKind,
    /// Joined table, possibly aliased.
    pub table: String,
    /// `on` conditions; empty for cross joins.
    pub ons: Vec<JoinOn>,
}

/// An owned, dialect-independent description of a single query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    /// Source table, possibly aliased.
    pub from: String,
    /// `distinct` flag.
    pub distinct: bool,
    /// Select list; empty means `*`.
    pub columns: Vec<Column>,
    /// Join clauses.
    pub joins: Vec<Join>,
    /// `where` conditions.
    pub wheres: Vec<Condition>,
    /// `group by` columns.
    pub groups: Vec<String>,
    /// `having` fragments.
    pub havings: Vec<Having>,
    /// `order by` entries.
    pub orders: Vec<Order>,
    /// Row limit; compiles into the select head as `first`.
    pub limit: Option<u64>,
    /// Row offset; compiles into the select head as `skip`.
    pub offset: Option<u64>,
    /// Locking clause.
    pub lock: Option<Lock>,
    /// Unioned queries.
    pub unions: Vec<Union>,
    /// Ordering applied after the last union arm.
    pub union_orders: Vec<Order>,
    /// Aggregate head; replaces the select list when present.
    pub aggregate: Option<Aggregate>,
}

impl Query {
    /// Starts a query against the given table.
    #[must_use]
    pub fn table(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            ..Self::default()
        }
    }

    /// Replaces the select list with the given columns.
    #[must_use]
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns = columns
            .iter()
            .map(|c| Column::Name(String::from(*c)))
            .collect();
        self
    }

    /// Appends a raw fragment to the select list.
    #[must_use]
    pub fn select_raw(mut self, sql: impl Into<String>) -> Self {
        self.columns.push(Column::Raw(sql.into()));
        self
    }

    /// Appends a column to the select list.
    #[must_use]
    pub fn add_select(mut self, column: impl Into<String>) -> Self {
        self.columns.push(Column::Name(column.into()));
        self
    }

    /// Marks the query `distinct`.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Adds an inner join.
    #[must_use]
    pub fn join(
        self,
        table: impl Into<String>,
        left: impl Into<String>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        self.join_kind(JoinKind::Inner, table, left, operator, right)
    }

    /// Adds a left join.
    #[must_use]
    pub fn left_join(
        self,
        table: impl Into<String>,
        left: impl Into<String>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        self.join_kind(JoinKind::Left, table, left, operator, right)
    }

    /// Adds a right join.
    #[must_use]
    pub fn right_join(
        self,
        table: impl Into<String>,
        left: impl Into<String>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        self.join_kind(JoinKind::Right, table, left, operator, right)
    }

    /// Adds a cross join.
    #[must_use]
    pub fn cross_join(mut self, table: impl Into<String>) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Cross,
            table: table.into(),
            ons: Vec::new(),
        });
        self
    }

    fn join_kind(
        mut self,
        kind: JoinKind,
        table: impl Into<String>,
        left: impl Into<String>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        self.joins.push(Join {
            kind,
            table: table.into(),
            ons: vec![JoinOn {
                connector: Connector::And,
                left: left.into(),
                operator: operator.into(),
                right: right.into(),
            }],
        });
        self
    }

    /// Adds an `and`-connected comparison.
    #[must_use]
    pub fn where_clause(
        self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl ToSqlValue,
    ) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Basic {
                column: column.into(),
                operator: operator.into(),
                value: value.to_sql_value(),
            },
        )
    }

    /// Adds an `or`-connected comparison.
    #[must_use]
    pub fn or_where(
        self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl ToSqlValue,
    ) -> Self {
        self.push_where(
            Connector::Or,
            Predicate::Basic {
                column: column.into(),
                operator: operator.into(),
                value: value.to_sql_value(),
            },
        )
    }

    /// Adds a `column is null` test.
    #[must_use]
    pub fn where_null(self, column: impl Into<String>) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Null {
                column: column.into(),
                negated: false,
            },
        )
    }

    /// Adds a `column is not null` test.
    #[must_use]
    pub fn where_not_null(self, column: impl Into<String>) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Null {
                column: column.into(),
                negated: true,
            },
        )
    }

    /// Adds a `column in (...)` test.
    #[must_use]
    pub fn where_in<V: ToSqlValue>(
        self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        self.push_where(
            Connector::And,
            Predicate::In {
                column: column.into(),
                values,
                negated: false,
            },
        )
    }

    /// Adds a `column not in (...)` test.
    #[must_use]
    pub fn where_not_in<V: ToSqlValue>(
        self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        self.push_where(
            Connector::And,
            Predicate::In {
                column: column.into(),
                values,
                negated: true,
            },
        )
    }

    /// Adds a `column between ? and ?` test.
    #[must_use]
    pub fn where_between(
        self,
        column: impl Into<String>,
        low: impl ToSqlValue,
        high: impl ToSqlValue,
    ) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Between {
                column: column.into(),
                low: low.to_sql_value(),
                high: high.to_sql_value(),
                negated: false,
            },
        )
    }

    /// Adds a `column not between ? and ?` test.
    #[must_use]
    pub fn where_not_between(
        self,
        column: impl Into<String>,
        low: impl ToSqlValue,
        high: impl ToSqlValue,
    ) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Between {
                column: column.into(),
                low: low.to_sql_value(),
                high: high.to_sql_value(),
                negated: true,
            },
        )
    }

    /// Adds a raw `and`-connected fragment.
    #[must_use]
    pub fn where_raw(self, sql: impl Into<String>, bindings: Vec<SqlValue>) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Raw {
                sql: sql.into(),
                bindings,
            },
        )
    }

    /// Adds a raw `or`-connected fragment.
    #[must_use]
    pub fn or_where_raw(self, sql: impl Into<String>, bindings: Vec<SqlValue>) -> Self {
        self.push_where(
            Connector::Or,
            Predicate::Raw {
                sql: sql.into(),
                bindings,
            },
        )
    }

    /// Adds a `bitand(column, mask) op value` test.
    #[must_use]
    pub fn where_bitand(
        self,
        column: impl Into<String>,
        mask: i64,
        operator: impl Into<String>,
        value: i64,
    ) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Bitand {
                column: column.into(),
                mask,
                operator: operator.into(),
                value,
                negated: false,
            },
        )
    }

    /// Adds a `not bitand(column, mask) op value` test.
    #[must_use]
    pub fn where_not_bitand(
        self,
        column: impl Into<String>,
        mask: i64,
        operator: impl Into<String>,
        value: i64,
    ) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Bitand {
                column: column.into(),
                mask,
                operator: operator.into(),
                value,
                negated: true,
            },
        )
    }

    /// Adds a parenthesized group built by the closure.
    ///
    /// The closure receives an empty query and only its conditions are kept.
    #[must_use]
    pub fn where_group(self, f: impl FnOnce(Self) -> Self) -> Self {
        self.push_group(Connector::And, f)
    }

    /// Adds an `or`-connected parenthesized group built by the closure.
    #[must_use]
    pub fn or_where_group(self, f: impl FnOnce(Self) -> Self) -> Self {
        self.push_group(Connector::Or, f)
    }

    fn push_group(mut self, connector: Connector, f: impl FnOnce(Self) -> Self) -> Self {
        let nested = f(Self::default());
        if !nested.wheres.is_empty() {
            self.wheres.push(Condition {
                connector,
                predicate: Predicate::Group(nested.wheres),
            });
        }
        self
    }

    fn push_where(mut self, connector: Connector, predicate: Predicate) -> Self {
        self.wheres.push(Condition {
            connector,
            predicate,
        });
        self
    }

    /// Appends `group by` columns.
    #[must_use]
    pub fn group_by(mut self, columns: &[&str]) -> Self {
        self.groups
            .extend(columns.iter().map(|c| String::from(*c)));
        self
    }

    /// Appends a raw `having` fragment.
    #[must_use]
    pub fn having_raw(mut self, sql: impl Into<String>, bindings: Vec<SqlValue>) -> Self {
        self.havings.push(Having {
            connector: Connector::And,
            sql: sql.into(),
            bindings,
        });
        self
    }

    /// Appends an `or`-connected raw `having` fragment.
    #[must_use]
    pub fn or_having_raw(mut self, sql: impl Into<String>, bindings: Vec<SqlValue>) -> Self {
        self.havings.push(Having {
            connector: Connector::Or,
            sql: sql.into(),
            bindings,
        });
        self
    }

    /// Appends an ascending `order by` entry.
    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.orders.push(Order {
            column: column.into(),
            direction: Direction::Asc,
        });
        self
    }

    /// Appends a descending `order by` entry.
    #[must_use]
    pub fn order_by_desc(mut self, column: impl Into<String>) -> Self {
        self.orders.push(Order {
            column: column.into(),
            direction: Direction::Desc,
        });
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the row offset.
    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Locks matched rows for update.
    #[must_use]
    pub fn for_update(mut self) -> Self {
        self.lock = Some(Lock::Update);
        self
    }

    /// Declares the cursor read only.
    #[must_use]
    pub fn for_read_only(mut self) -> Self {
        self.lock = Some(Lock::ReadOnly);
        self
    }

    /// Sets a raw lock clause.
    #[must_use]
    pub fn lock_raw(mut self, sql: impl Into<String>) -> Self {
        self.lock = Some(Lock::Raw(sql.into()));
        self
    }

    /// Glues another query on with `union`.
    #[must_use]
    pub fn union(mut self, query: Self) -> Self {
        self.unions.push(Union { query, all: false });
        self
    }

    /// Glues another query on with `union all`.
    #[must_use]
    pub fn union_all(mut self, query: Self) -> Self {
        self.unions.push(Union { query, all: true });
        self
    }

    /// Appends an ascending ordering after the last union arm.
    #[must_use]
    pub fn union_order_by(mut self, column: impl Into<String>) -> Self {
        self.union_orders.push(Order {
            column: column.into(),
            direction: Direction::Asc,
        });
        self
    }

    /// Replaces the select list with an aggregate head.
    #[must_use]
    pub fn aggregate(mut self, function: impl Into<String>, column: impl Into<String>) -> Self {
        self.aggregate = Some(Aggregate {
            function: function.into(),
            column: column.into(),
        });
        self
    }

    /// Counts rows.
    #[must_use]
    pub fn count(self) -> Self {
        self.aggregate("count", "*")
    }

    /// Sums a column.
    #[must_use]
    pub fn sum(self, column: impl Into<String>) -> Self {
        self.aggregate("sum", column)
    }

    /// Averages a column.
    #[must_use]
    pub fn avg(self, column: impl Into<String>) -> Self {
        self.aggregate("avg", column)
    }

    /// Takes the minimum of a column.
    #[must_use]
    pub fn min(self, column: impl Into<String>) -> Self {
        self.aggregate("min", column)
    }

    /// Takes the maximum of a column.
    #[must_use]
    pub fn max(self, column: impl Into<String>) -> Self {
        self.aggregate("max", column)
    }

    /// Collects the bind values in the order the compiled SQL consumes them:
    /// wheres, havings, then union arms.
    ///
    /// `bitand` integers splice inline and contribute nothing here.
    #[must_use]
    pub fn bindings(&self) -> Vec<SqlValue> {
        let mut out = Vec::new();
        collect_condition_bindings(&self.wheres, &mut out);
        for having in &self.havings {
            out.extend(having.bindings.iter().cloned());
        }
        for union in &self.unions {
            out.extend(union.query.bindings());
        }
        out
    }
}

fn collect_condition_bindings(conditions: &[Condition], out: &mut Vec<SqlValue>) {
    for condition in conditions {
        match &condition.predicate {
            Predicate::Basic { value, .. } => out.push(value.clone()),
            Predicate::Null { .. } | Predicate::Bitand { .. } => {}
            Predicate::In { values, .. } => out.extend(values.iter().cloned()),
            Predicate::Between { low, high, .. } => {
                out.push(low.clone());
                out.push(high.clone());
            }
            Predicate::Raw { bindings, .. } => out.extend(bindings.iter().cloned()),
            Predicate::Group(inner) => collect_condition_bindings(inner, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_starts_empty() {
        let query = Query::table("users");
        assert_eq!(query.from, "users");
        assert!(query.columns.is_empty());
        assert!(query.wheres.is_empty());
        assert!(query.bindings().is_empty());
    }

    #[test]
    fn test_bindings_follow_clause_order() {
        let query = Query::table("users")
            .where_clause("age", ">", 18)
            .where_in("role", ["admin", "editor"])
            .where_between("score", 10, 20)
            .having_raw("count(*) > ?", vec![SqlValue::Int(5)]);

        assert_eq!(
            query.bindings(),
            vec![
                SqlValue::Int(18),
                SqlValue::Text(String::from("admin")),
                SqlValue::Text(String::from("editor")),
                SqlValue::Int(10),
                SqlValue::Int(20),
                SqlValue::Int(5),
            ]
        );
    }

    #[test]
    fn test_bitand_contributes_no_bindings() {
        let query = Query::table("flags").where_bitand("mask", 4, ">", 0);
        assert!(query.bindings().is_empty());
    }

    #[test]
    fn test_group_collects_nested_bindings() {
        let query = Query::table("users")
            .where_clause("active", "=", true)
            .or_where_group(|q| q.where_clause("age", "<", 13).or_where("age", ">", 65));

        assert_eq!(
            query.bindings(),
            vec![SqlValue::Bool(true), SqlValue::Int(13), SqlValue::Int(65)]
        );
        assert_eq!(query.wheres.len(), 2);
    }

    #[test]
    fn test_empty_group_is_dropped() {
        let query = Query::table("users").where_group(|q| q);
        assert!(query.wheres.is_empty());
    }

    #[test]
    fn test_union_bindings_follow_the_outer_query() {
        let inner = Query::table("archived").where_clause("id", "=", 2);
        let query = Query::table("users")
            .where_clause("id", "=", 1)
            .union(inner);

        assert_eq!(
            query.bindings(),
            vec![SqlValue::Int(1), SqlValue::Int(2)]
        );
    }
}
