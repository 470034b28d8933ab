//! Informix schema dialect.
//!
//! Turns blueprints into Informix DDL: `create [temp] table` with key
//! constraints folded into the column list, `alter table ... add` for
//! later columns, standalone `alter`/`create index`/`rename` statements
//! for everything else, plus the `systables`/`syscolumns` catalog
//! probes used for introspection.

use crate::reserved::is_reserved;
use crate::schema::blueprint::{Blueprint, Command, ForeignCommand, Storage};
use crate::schema::column::{ColumnDefinition, ColumnType};

use super::SchemaDialect;

/// Schema dialect for IBM Informix.
#[derive(Debug, Clone, Default)]
pub struct InformixSchemaDialect {
    prefix: String,
}

impl InformixSchemaDialect {
    /// Creates a new Informix schema dialect without a table prefix.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefix: String::new(),
        }
    }

    /// Creates a dialect that prepends `prefix` to every table name.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Maps a column definition to its Informix type.
    ///
    /// Serial types only apply to auto-incrementing integer columns;
    /// `serial(1)` / `serial8(1)` restart the sequence at one. Character
    /// columns degrade from `char` through `varchar` to `lvarchar`, and
    /// anything past the engine limit is clamped to `lvarchar(32739)`.
    #[must_use]
    pub fn data_type(&self, column: &ColumnDefinition) -> String {
        match &column.column_type {
            ColumnType::Char { length } => {
                if *length < 256 {
                    format!("char({length})")
                } else {
                    String::from("char(255)")
                }
            }
            ColumnType::String { length } => {
                if *length < 256 {
                    format!("varchar({length})")
                } else if *length < 32_740 {
                    format!("lvarchar({length})")
                } else {
                    String::from("lvarchar(32739)")
                }
            }
            ColumnType::Text | ColumnType::MediumText | ColumnType::LongText => {
                String::from("text")
            }
            ColumnType::TinyInteger | ColumnType::SmallInteger => String::from("smallint"),
            ColumnType::MediumInteger => String::from("integer"),
            ColumnType::Integer => {
                if column.auto_increment {
                    String::from("serial(1)")
                } else {
                    String::from("int")
                }
            }
            ColumnType::BigInteger => {
                if column.auto_increment {
                    String::from("serial8(1)")
                } else {
                    String::from("int8")
                }
            }
            ColumnType::Float { total, places }
            | ColumnType::Double { total, places }
            | ColumnType::Decimal { total, places } => {
                format!("decimal({total}, {places})")
            }
            ColumnType::Boolean => String::from("char(1)"),
            ColumnType::Enum => String::from("varchar(255)"),
            ColumnType::Date => String::from("date"),
            ColumnType::DateTime => String::from("datetime year to second"),
            ColumnType::Time => String::from("datetime hour to second"),
            ColumnType::Timestamp => {
                String::from("datetime year to second default current year to second")
            }
            ColumnType::Binary => String::from("byte"),
        }
    }

    // ============================================================
    // Column and key rendering
    // ============================================================

    /// Renders every column as `name type [default ...] [not null] [before ...]`.
    ///
    /// The default clause has to precede the nullability token or Informix
    /// rejects the definition.
    fn get_columns(&self, blueprint: &Blueprint) -> Vec<String> {
        blueprint
            .columns
            .iter()
            .map(|column| self.get_column(column))
            .collect()
    }

    fn get_column(&self, column: &ColumnDefinition) -> String {
        let mut sql = format!(
            "{} {}",
            self.wrap_value(&column.name),
            self.data_type(column)
        );
        if let Some(default) = &column.default {
            sql.push_str(" default ");
            sql.push_str(&default.to_sql());
        }
        if !column.nullable {
            sql.push_str(" not null");
        }
        if let Some(before) = &column.before {
            sql.push_str(" before ");
            sql.push_str(&self.wrap_value(before));
        }
        sql
    }

    /// Resolves the primary key folded into a `create` or `add` statement.
    ///
    /// An explicit primary command wins; otherwise the first serial column
    /// implies one, named by the usual `{table}_{column}_primary` convention.
    fn primary_key(&self, blueprint: &Blueprint) -> Option<(String, Vec<String>)> {
        for command in &blueprint.commands {
            if let Command::Primary { name, columns } = command {
                return Some((name.clone(), columns.clone()));
            }
        }
        blueprint
            .columns
            .iter()
            .find(|column| column.auto_increment && column.column_type.is_serial())
            .map(|column| {
                let columns = vec![column.name.clone()];
                (blueprint.index_name("primary", &columns), columns)
            })
    }

    /// Renders the inline primary key clause, or nothing when the blueprint
    /// defines no key.
    fn add_primary_keys(&self, blueprint: &Blueprint) -> String {
        self.primary_key(blueprint)
            .map_or_else(String::new, |(name, columns)| {
                format!(
                    ", primary key ( {} ) constraint {name}",
                    self.columnize(&columns)
                )
            })
    }

    /// Renders the inline foreign key clauses for a `create table`.
    ///
    /// Inline form carries the constraint name before the referential
    /// action; the standalone `alter table` form puts it after.
    fn add_foreign_keys(&self, blueprint: &Blueprint) -> String {
        let mut sql = String::new();
        for command in &blueprint.commands {
            if let Command::Foreign(foreign) = command {
                sql.push_str(&format!(
                    ", foreign key ( {} ) references {} ( {} ) constraint {}",
                    self.columnize(&foreign.columns),
                    self.wrap_table(&foreign.on),
                    self.columnize(&foreign.references),
                    foreign.name
                ));
                if let Some(action) = &foreign.on_delete {
                    sql.push_str(" on delete ");
                    sql.push_str(action);
                }
            }
        }
        sql
    }

    // ============================================================
    // Statement compilation
    // ============================================================

    fn compile_create(&self, blueprint: &Blueprint) -> String {
        let mut sql = if blueprint.temporary {
            String::from("create temp table ")
        } else {
            String::from("create table ")
        };
        sql.push_str(&self.wrap_table(&blueprint.table));
        sql.push_str(" ( ");
        sql.push_str(&self.get_columns(blueprint).join(", "));
        sql.push_str(&self.add_foreign_keys(blueprint));
        sql.push_str(&self.add_primary_keys(blueprint));
        sql.push_str(" )");
        match &blueprint.storage {
            Some(Storage::Raw(clause)) => {
                sql.push(' ');
                sql.push_str(clause);
            }
            Some(Storage::Sizes { extent, next }) => {
                // sizes at or below the 32 KB page floor are left to the engine
                if *extent > 32 {
                    sql.push_str(&format!(" extent size {extent}"));
                }
                if *next > 32 {
                    sql.push_str(&format!(" next size {next}"));
                }
            }
            None => {}
        }
        sql
    }

    fn compile_add(&self, blueprint: &Blueprint) -> String {
        format!(
            "alter table {} add ( {}{} )",
            self.wrap_table(&blueprint.table),
            self.get_columns(blueprint).join(", "),
            self.add_primary_keys(blueprint)
        )
    }

    fn compile_primary(&self, blueprint: &Blueprint, name: &str, columns: &[String]) -> String {
        format!(
            "alter table {} add constraint primary key ({}) constraint {name}",
            self.wrap_table(&blueprint.table),
            self.columnize(columns)
        )
    }

    fn compile_unique(&self, blueprint: &Blueprint, name: &str, columns: &[String]) -> String {
        format!(
            "alter table {} add constraint unique ( {} ) constraint {name}",
            self.wrap_table(&blueprint.table),
            self.columnize(columns)
        )
    }

    fn compile_index(&self, blueprint: &Blueprint, name: &str, columns: &[String]) -> String {
        format!(
            "create index {name} on {} ( {} )",
            self.wrap_table(&blueprint.table),
            self.columnize(columns)
        )
    }

    fn compile_foreign(&self, blueprint: &Blueprint, foreign: &ForeignCommand) -> String {
        let mut sql = format!(
            "alter table {} add constraint foreign key ( {} ) references {} ( {} )",
            self.wrap_table(&blueprint.table),
            self.columnize(&foreign.columns),
            self.wrap_table(&foreign.on),
            self.columnize(&foreign.references)
        );
        if let Some(action) = &foreign.on_delete {
            sql.push_str(" on delete ");
            sql.push_str(action);
        }
        sql.push_str(" constraint ");
        sql.push_str(&foreign.name);
        sql
    }
}

impl SchemaDialect for InformixSchemaDialect {
    fn name(&self) -> &'static str {
        "informix"
    }

    fn table_prefix(&self) -> &str {
        &self.prefix
    }

    /// Reserved words are emitted uppercase and unquoted so the engine
    /// resolves them as identifiers; everything else passes through
    /// untouched.
    fn wrap_value(&self, value: &str) -> String {
        if is_reserved(value) {
            value.to_ascii_uppercase()
        } else {
            value.to_string()
        }
    }

    fn compile(&self, blueprint: &Blueprint) -> Vec<String> {
        let creating = blueprint.creating();
        let mut statements = Vec::new();
        if !creating && !blueprint.columns.is_empty() {
            statements.push(self.compile_add(blueprint));
        }
        // primary keys are folded into create and add statements; only a
        // blueprint carrying no new columns compiles one standalone
        let primary_inlined = creating || !blueprint.columns.is_empty();
        for command in &blueprint.commands {
            match command {
                Command::Create => statements.push(self.compile_create(blueprint)),
                Command::Primary { name, columns } => {
                    if !primary_inlined {
                        statements.push(self.compile_primary(blueprint, name, columns));
                    }
                }
                Command::Unique { name, columns } => {
                    statements.push(self.compile_unique(blueprint, name, columns));
                }
                Command::Index { name, columns } => {
                    statements.push(self.compile_index(blueprint, name, columns));
                }
                Command::Foreign(foreign) => {
                    if !creating {
                        statements.push(self.compile_foreign(blueprint, foreign));
                    }
                }
                Command::Drop => {
                    statements.push(format!("drop table {}", self.wrap_table(&blueprint.table)));
                }
                Command::DropColumn { columns } => statements.push(format!(
                    "alter table {} drop ( {} )",
                    self.wrap_table(&blueprint.table),
                    self.columnize(columns)
                )),
                Command::DropPrimary { name }
                | Command::DropUnique { name }
                | Command::DropForeign { name } => statements.push(format!(
                    "alter table {} drop constraint {name}",
                    self.wrap_table(&blueprint.table)
                )),
                Command::DropIndex { name } => statements.push(format!("drop index {name}")),
                Command::Rename { to } => statements.push(format!(
                    "rename table {} to {}",
                    self.wrap_table(&blueprint.table),
                    self.wrap_table(to)
                )),
                Command::RenameColumn { from, to } => statements.push(format!(
                    "rename column {}.{from} to {to}",
                    self.wrap_table(&blueprint.table)
                )),
            }
        }
        statements
    }

    fn compile_table_exists(&self) -> &'static str {
        "select * from systables where tabname=lower(?)"
    }

    fn compile_column_listing(&self) -> &'static str {
        "select b.colname from systables a join syscolumns b on a.tabid=b.tabid where a.tabname=lower(?)"
    }
}
