//! Column definitions for schema blueprints.
//!
//! The fluent builder records the portable description; mapping it onto
//! Informix types (`serial`, `lvarchar`, `datetime year to second`, ...) is
//! the schema dialect's job.

/// Portable column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// Fixed-width character data.
    Char {
        /// Declared width.
        length: u32,
    },
    /// Variable-width character data.
    String {
        /// Declared width.
        length: u32,
    },
    /// Unbounded text.
    Text,
    /// Unbounded text (medium flavor; same storage on this engine).
    MediumText,
    /// Unbounded text (long flavor; same storage on this engine).
    LongText,
    /// 8-bit integer range.
    TinyInteger,
    /// 16-bit integer range.
    SmallInteger,
    /// 24-bit integer range.
    MediumInteger,
    /// 32-bit integer range.
    Integer,
    /// 64-bit integer range.
    BigInteger,
    /// Approximate numeric.
    Float {
        /// Total digits.
        total: u32,
        /// Digits after the point.
        places: u32,
    },
    /// Approximate numeric, double precision.
    Double {
        /// Total digits.
        total: u32,
        /// Digits after the point.
        places: u32,
    },
    /// Exact numeric.
    Decimal {
        /// Total digits.
        total: u32,
        /// Digits after the point.
        places: u32,
    },
    /// Boolean, stored as `char(1)`.
    Boolean,
    /// Enumerated value; the engine stores it as plain varchar.
    Enum,
    /// Calendar date.
    Date,
    /// Date and time, to second precision.
    DateTime,
    /// Time of day, to second precision.
    Time,
    /// Creation timestamp defaulting to the current moment.
    Timestamp,
    /// Raw bytes.
    Binary,
}

impl ColumnType {
    /// Returns `true` for the integer types that can become serials.
    #[must_use]
    pub const fn is_serial(&self) -> bool {
        matches!(
            self,
            Self::TinyInteger
                | Self::SmallInteger
                | Self::MediumInteger
                | Self::Integer
                | Self::BigInteger
        )
    }
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Boolean default; rendered as `'1'`/`'0'` for the `char(1)` storage.
    Boolean(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default.
    String(String),
    /// Raw SQL expression (e.g. `today`).
    Expression(String),
}

impl DefaultValue {
    /// Returns the SQL representation of the default value.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Boolean(b) => String::from(if *b { "'1'" } else { "'0'" }),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

/// A complete column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Portable type.
    pub column_type: ColumnType,
    /// Whether NULL is allowed. Columns are `not null` unless opted out.
    pub nullable: bool,
    /// Default value, rendered before the nullability token.
    pub default: Option<DefaultValue>,
    /// Serial flag; implies a primary key on this column.
    pub auto_increment: bool,
    /// Position hint: place this column before the named one.
    pub before: Option<String>,
}

/// Fluent column builder.
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    name: String,
    column_type: ColumnType,
    nullable: bool,
    default: Option<DefaultValue>,
    auto_increment: bool,
    before: Option<String>,
}

impl ColumnBuilder {
    /// Creates a new column builder with name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            default: None,
            auto_increment: false,
            before: None,
        }
    }

    /// Allows NULL.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as a serial. Only meaningful on integer types.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets a boolean default value.
    #[must_use]
    pub fn default_bool(mut self, value: bool) -> Self {
        self.default = Some(DefaultValue::Boolean(value));
        self
    }

    /// Sets an integer default value.
    #[must_use]
    pub fn default_int(mut self, value: i64) -> Self {
        self.default = Some(DefaultValue::Integer(value));
        self
    }

    /// Sets a float default value.
    #[must_use]
    pub fn default_float(mut self, value: f64) -> Self {
        self.default = Some(DefaultValue::Float(value));
        self
    }

    /// Sets a string default value.
    #[must_use]
    pub fn default_str(mut self, value: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::String(value.into()));
        self
    }

    /// Sets a raw SQL expression as default (e.g. `today`).
    #[must_use]
    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Expression(expr.into()));
        self
    }

    /// Places the column before the named one.
    #[must_use]
    pub fn before(mut self, column: impl Into<String>) -> Self {
        self.before = Some(column.into());
        self
    }

    /// Builds the column definition.
    #[must_use]
    pub fn build(self) -> ColumnDefinition {
        ColumnDefinition {
            name: self.name,
            column_type: self.column_type,
            nullable: self.nullable,
            default: self.default,
            auto_increment: self.auto_increment,
            before: self.before,
        }
    }
}

// =============================================================================
// Shorthand Functions for Common Types
// =============================================================================

/// Creates a fixed-width char column builder.
#[must_use]
pub fn char(name: impl Into<String>, length: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Char { length })
}

/// Creates a variable-width string column builder.
#[must_use]
pub fn string(name: impl Into<String>, length: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::String { length })
}

/// Creates a text column builder.
#[must_use]
pub fn text(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Text)
}

/// Creates a medium text column builder.
#[must_use]
pub fn medium_text(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::MediumText)
}

/// Creates a long text column builder.
#[must_use]
pub fn long_text(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::LongText)
}

/// Creates a tiny integer column builder.
#[must_use]
pub fn tiny_integer(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::TinyInteger)
}

/// Creates a small integer column builder.
#[must_use]
pub fn small_integer(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::SmallInteger)
}

/// Creates a medium integer column builder.
#[must_use]
pub fn medium_integer(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::MediumInteger)
}

/// Creates an integer column builder.
#[must_use]
pub fn integer(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Integer)
}

/// Creates a big integer column builder.
#[must_use]
pub fn big_integer(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::BigInteger)
}

/// Creates an auto-incrementing integer primary key column builder.
#[must_use]
pub fn increments(name: impl Into<String>) -> ColumnBuilder {
    integer(name).auto_increment()
}

/// Creates an auto-incrementing big integer primary key column builder.
#[must_use]
pub fn big_increments(name: impl Into<String>) -> ColumnBuilder {
    big_integer(name).auto_increment()
}

/// Creates a float column builder.
#[must_use]
pub fn float(name: impl Into<String>, total: u32, places: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Float { total, places })
}

/// Creates a double column builder.
#[must_use]
pub fn double(name: impl Into<String>, total: u32, places: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Double { total, places })
}

/// Creates a decimal column builder.
#[must_use]
pub fn decimal(name: impl Into<String>, total: u32, places: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Decimal { total, places })
}

/// Creates a boolean column builder.
#[must_use]
pub fn boolean(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Boolean)
}

/// Creates an enum column builder.
#[must_use]
pub fn enumeration(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Enum)
}

/// Creates a date column builder.
#[must_use]
pub fn date(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Date)
}

/// Creates a date-time column builder.
#[must_use]
pub fn date_time(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::DateTime)
}

/// Creates a time column builder.
#[must_use]
pub fn time(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Time)
}

/// Creates a timestamp column builder.
#[must_use]
pub fn timestamp(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Timestamp)
}

/// Creates a binary column builder.
#[must_use]
pub fn binary(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Binary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_not_null_by_default() {
        let col = string("name", 100).build();
        assert_eq!(col.name, "name");
        assert_eq!(col.column_type, ColumnType::String { length: 100 });
        assert!(!col.nullable);
        assert!(!col.auto_increment);
    }

    #[test]
    fn test_nullable_opt_in() {
        let col = text("bio").nullable().build();
        assert!(col.nullable);
    }

    #[test]
    fn test_increments_marks_serial() {
        let col = increments("id").build();
        assert_eq!(col.column_type, ColumnType::Integer);
        assert!(col.auto_increment);
        assert!(col.column_type.is_serial());

        let col = big_increments("id").build();
        assert_eq!(col.column_type, ColumnType::BigInteger);
        assert!(col.auto_increment);
    }

    #[test]
    fn test_defaults() {
        let col = boolean("active").default_bool(true).build();
        assert_eq!(col.default, Some(DefaultValue::Boolean(true)));

        let col = integer("count").default_int(0).build();
        assert_eq!(col.default, Some(DefaultValue::Integer(0)));

        let col = date("starts_on").default_expr("today").build();
        assert_eq!(
            col.default,
            Some(DefaultValue::Expression(String::from("today")))
        );
    }

    #[test]
    fn test_default_value_to_sql() {
        assert_eq!(DefaultValue::Boolean(true).to_sql(), "'1'");
        assert_eq!(DefaultValue::Boolean(false).to_sql(), "'0'");
        assert_eq!(DefaultValue::Integer(42).to_sql(), "42");
        assert_eq!(DefaultValue::Float(3.5).to_sql(), "3.5");
        assert_eq!(DefaultValue::String(String::from("new")).to_sql(), "'new'");
        assert_eq!(
            DefaultValue::String(String::from("it's")).to_sql(),
            "'it''s'"
        );
        assert_eq!(
            DefaultValue::Expression(String::from("today")).to_sql(),
            "today"
        );
    }

    #[test]
    fn test_before_hint() {
        let col = string("middle_name", 50).nullable().before("last_name").build();
        assert_eq!(col.before.as_deref(), Some("last_name"));
    }
}
