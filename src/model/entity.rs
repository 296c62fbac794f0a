//! Table and joined-view descriptors consumed by the SQL builder.

/// One stored column. `pg_type` is used for placeholder casts (`$1::date`) so string values bind correctly.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    pub pg_type: &'static str,
}

impl Column {
    /// Custom enum types are schema-qualified (e.g. `public.os`) and projected as text.
    pub fn is_custom_type(&self) -> bool {
        self.pg_type.contains('.')
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Entity {
    pub table: &'static str,
    pub pk: &'static str,
    /// Writable columns in insert order. The primary key is not listed.
    pub columns: &'static [Column],
    /// Label used in "not found" messages.
    pub label: &'static str,
}

impl Entity {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Table reference with the alias used in a joined select.
#[derive(Clone, Copy, Debug)]
pub struct Source {
    pub entity: &'static Entity,
    pub alias: &'static str,
}

/// `LEFT JOIN <target> ON <left_alias>.<left_column> = <target alias>.<right_column>`
#[derive(Clone, Copy, Debug)]
pub struct Join {
    pub target: Source,
    pub left_alias: &'static str,
    pub left_column: &'static str,
    pub right_column: &'static str,
}

/// One projected column: `<alias>.<column> AS <output>`.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    pub alias: &'static str,
    pub column: &'static str,
    pub output: &'static str,
    pub as_text: bool,
}

impl Field {
    pub const fn new(alias: &'static str, column: &'static str, output: &'static str) -> Self {
        Field {
            alias,
            column,
            output,
            as_text: false,
        }
    }

    pub const fn text(alias: &'static str, column: &'static str, output: &'static str) -> Self {
        Field {
            alias,
            column,
            output,
            as_text: true,
        }
    }
}

/// A read model: base table, left joins and aliased output columns. Rows are ordered by the base primary key.
#[derive(Clone, Copy, Debug)]
pub struct View {
    pub base: Source,
    pub joins: &'static [Join],
    pub fields: &'static [Field],
}
