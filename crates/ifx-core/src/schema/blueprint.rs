//! Table blueprints.
//!
//! A [`Blueprint`] records the columns and commands of one schema change.
//! Compilation into statements happens in [`super::dialect`]; the blueprint
//! itself never produces SQL.

use super::column::{ColumnBuilder, ColumnDefinition};

/// Table-level storage options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// A raw storage clause appended to `create table` verbatim.
    Raw(String),
    /// First and next extent sizes in kilobytes. Either is emitted only
    /// when it exceeds the engine minimum of 32.
    Sizes {
        /// First extent size.
        extent: u32,
        /// Next extent size.
        next: u32,
    },
}

/// A foreign key description for [`Blueprint::foreign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    columns: Vec<String>,
    on: String,
    references: Vec<String>,
    on_delete: Option<String>,
    name: Option<String>,
}

impl ForeignKey {
    /// Describes a foreign key from `columns` to `on (references)`.
    #[must_use]
    pub fn new(columns: &[&str], on: impl Into<String>, references: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            on: on.into(),
            references: references.iter().map(|c| String::from(*c)).collect(),
            on_delete: None,
            name: None,
        }
    }

    /// Sets the referential action taken on delete (e.g. `cascade`).
    #[must_use]
    pub fn on_delete(mut self, action: impl Into<String>) -> Self {
        self.on_delete = Some(action.into());
        self
    }

    /// Overrides the generated constraint name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A named foreign key command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignCommand {
    /// Constraint name.
    pub name: String,
    /// Referencing columns.
    pub columns: Vec<String>,
    /// Referenced table.
    pub on: String,
    /// Referenced columns.
    pub references: Vec<String>,
    /// Referential action on delete, if any.
    pub on_delete: Option<String>,
}

/// A schema command recorded on a blueprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the table from the blueprint's columns.
    Create,
    /// Add a primary key constraint.
    Primary {
        /// Constraint name.
        name: String,
        /// Key columns.
        columns: Vec<String>,
    },
    /// Add a unique constraint.
    Unique {
        /// Constraint name.
        name: String,
        /// Key columns.
        columns: Vec<String>,
    },
    /// Create a plain index.
    Index {
        /// Index name.
        name: String,
        /// Indexed columns.
        columns: Vec<String>,
    },
    /// Add a foreign key constraint.
    Foreign(ForeignCommand),
    /// Drop the table.
    Drop,
    /// Drop columns.
    DropColumn {
        /// Column names.
        columns: Vec<String>,
    },
    /// Drop a primary key constraint by name.
    DropPrimary {
        /// Constraint name.
        name: String,
    },
    /// Drop a unique constraint by name.
    DropUnique {
        /// Constraint name.
        name: String,
    },
    /// Drop an index by name.
    DropIndex {
        /// Index name.
        name: String,
    },
    /// Drop a foreign key constraint by name.
    DropForeign {
        /// Constraint name.
        name: String,
    },
    /// Rename the table.
    Rename {
        /// New table name.
        to: String,
    },
    /// Rename a column.
    RenameColumn {
        /// Current column name.
        from: String,
        /// New column name.
        to: String,
    },
}

/// An owned description of one schema change against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    /// Table the change applies to.
    pub table: String,
    /// Whether a created table is a temp table.
    pub temporary: bool,
    /// Columns to create or add.
    pub columns: Vec<ColumnDefinition>,
    /// Commands in declaration order.
    pub commands: Vec<Command>,
    /// Storage options for `create table`.
    pub storage: Option<Storage>,
}

impl Blueprint {
    /// Starts a blueprint that creates the table.
    #[must_use]
    pub fn create(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            temporary: false,
            columns: Vec::new(),
            commands: vec![Command::Create],
            storage: None,
        }
    }

    /// Starts a blueprint that alters an existing table. Added columns
    /// compile to a single `alter table ... add ( ... )`.
    #[must_use]
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            temporary: false,
            columns: Vec::new(),
            commands: Vec::new(),
            storage: None,
        }
    }

    /// Starts a blueprint that drops the table.
    #[must_use]
    pub fn drop(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            temporary: false,
            columns: Vec::new(),
            commands: vec![Command::Drop],
            storage: None,
        }
    }

    /// Marks a created table as a temp table.
    #[must_use]
    pub fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }

    /// Sets first/next extent sizes for the created table.
    #[must_use]
    pub fn extent_sizes(mut self, extent: u32, next: u32) -> Self {
        self.storage = Some(Storage::Sizes { extent, next });
        self
    }

    /// Appends a raw storage clause to the created table.
    #[must_use]
    pub fn storage_raw(mut self, clause: impl Into<String>) -> Self {
        self.storage = Some(Storage::Raw(clause.into()));
        self
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: ColumnBuilder) -> Self {
        self.columns.push(column.build());
        self
    }

    /// Adds a primary key over the given columns, named by convention.
    #[must_use]
    pub fn primary(mut self, columns: &[&str]) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| String::from(*c)).collect();
        let name = self.index_name("primary", &columns);
        self.commands.push(Command::Primary { name, columns });
        self
    }

    /// Adds a unique constraint over the given columns, named by convention.
    #[must_use]
    pub fn unique(mut self, columns: &[&str]) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| String::from(*c)).collect();
        let name = self.index_name("unique", &columns);
        self.commands.push(Command::Unique { name, columns });
        self
    }

    /// Adds a plain index over the given columns, named by convention.
    #[must_use]
    pub fn index(mut self, columns: &[&str]) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| String::from(*c)).collect();
        let name = self.index_name("index", &columns);
        self.commands.push(Command::Index { name, columns });
        self
    }

    /// Adds a foreign key.
    #[must_use]
    pub fn foreign(mut self, key: ForeignKey) -> Self {
        let name = key
            .name
            .unwrap_or_else(|| index_name(&self.table, "foreign", &key.columns));
        self.commands.push(Command::Foreign(ForeignCommand {
            name,
            columns: key.columns,
            on: key.on,
            references: key.references,
            on_delete: key.on_delete,
        }));
        self
    }

    /// Drops columns.
    #[must_use]
    pub fn drop_column(mut self, columns: &[&str]) -> Self {
        self.commands.push(Command::DropColumn {
            columns: columns.iter().map(|c| String::from(*c)).collect(),
        });
        self
    }

    /// Drops a primary key constraint by name.
    #[must_use]
    pub fn drop_primary(mut self, name: impl Into<String>) -> Self {
        self.commands.push(Command::DropPrimary { name: name.into() });
        self
    }

    /// Drops a unique constraint by name.
    #[must_use]
    pub fn drop_unique(mut self, name: impl Into<String>) -> Self {
        self.commands.push(Command::DropUnique { name: name.into() });
        self
    }

    /// Drops an index by name.
    #[must_use]
    pub fn drop_index(mut self, name: impl Into<String>) -> Self {
        self.commands.push(Command::DropIndex { name: name.into() });
        self
    }

    /// Drops a foreign key constraint by name.
    #[must_use]
    pub fn drop_foreign(mut self, name: impl Into<String>) -> Self {
        self.commands.push(Command::DropForeign { name: name.into() });
        self
    }

    /// Renames the table.
    #[must_use]
    pub fn rename_to(mut self, to: impl Into<String>) -> Self {
        self.commands.push(Command::Rename { to: to.into() });
        self
    }

    /// Renames a column.
    #[must_use]
    pub fn rename_column(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.commands.push(Command::RenameColumn {
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Returns `true` when the blueprint creates its table.
    #[must_use]
    pub fn creating(&self) -> bool {
        self.commands.iter().any(|c| matches!(c, Command::Create))
    }

    /// Builds the conventional `{table}_{columns}_{kind}` index name.
    #[must_use]
    pub fn index_name(&self, kind: &str, columns: &[String]) -> String {
        index_name(&self.table, kind, columns)
    }
}

fn index_name(table: &str, kind: &str, columns: &[String]) -> String {
    let name = format!("{table}_{}_{kind}", columns.join("_"));
    name.to_lowercase().replace(['-', '.'], "_")
}
