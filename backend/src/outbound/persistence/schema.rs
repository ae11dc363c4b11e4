//! Logical schema for the marketplace store, rendered per dialect.
//!
//! The tables are described once. Only the surrogate key declaration and the
//! physical type names change between SQLite and PostgreSQL; column sets,
//! nullability, defaults and constraints are identical.

use super::Dialect;

/// Logical column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Auto-incrementing integer primary key.
    SurrogateKey,
    Integer,
    Real,
    Text,
}

impl ColumnKind {
    fn render(self, dialect: Dialect) -> &'static str {
        match (self, dialect) {
            (Self::SurrogateKey, Dialect::Sqlite) => "INTEGER PRIMARY KEY AUTOINCREMENT",
            (Self::SurrogateKey, Dialect::Postgres) => "BIGSERIAL PRIMARY KEY",
            (Self::Integer, Dialect::Sqlite) => "INTEGER",
            (Self::Integer, Dialect::Postgres) => "BIGINT",
            (Self::Real, Dialect::Sqlite) => "REAL",
            (Self::Real, Dialect::Postgres) => "DOUBLE PRECISION",
            (Self::Text, _) => "TEXT",
        }
    }
}

/// Column description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub unique: bool,
    pub default: Option<&'static str>,
    pub check: Option<&'static str>,
    pub references: Option<(&'static str, &'static str)>,
}

impl ColumnSpec {
    const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            unique: false,
            default: None,
            check: None,
            references: None,
        }
    }

    const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    const fn default(mut self, expr: &'static str) -> Self {
        self.default = Some(expr);
        self
    }

    const fn check(mut self, expr: &'static str) -> Self {
        self.check = Some(expr);
        self
    }

    const fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some((table, column));
        self
    }

    fn render(&self, dialect: Dialect) -> String {
        let mut out = format!("{} {}", self.name, self.kind.render(dialect));
        if self.kind != ColumnKind::SurrogateKey && !self.nullable {
            out.push_str(" NOT NULL");
        }
        if self.unique {
            out.push_str(" UNIQUE");
        }
        if let Some(default) = self.default {
            out.push_str(" DEFAULT ");
            out.push_str(default);
        }
        if let Some(check) = self.check {
            out.push_str(&format!(" CHECK ({check})"));
        }
        if let Some((table, column)) = self.references {
            out.push_str(&format!(" REFERENCES {table}({column})"));
        }
        out
    }
}

/// Table description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
    pub checks: &'static [&'static str],
}

impl TableSpec {
    pub fn create_statement(&self, dialect: Dialect) -> String {
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.render(dialect))
            .collect();
        parts.extend(self.checks.iter().map(|check| format!("CHECK ({check})")));
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            parts.join(", ")
        )
    }
}

/// Secondary index description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: &'static str,
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

impl IndexSpec {
    pub fn create_statement(&self) -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            self.name,
            self.table,
            self.columns.join(", ")
        )
    }
}

pub const USERS: TableSpec = TableSpec {
    name: "users",
    columns: &[
        ColumnSpec::new("id", ColumnKind::SurrogateKey),
        ColumnSpec::new("name", ColumnKind::Text),
        ColumnSpec::new("email", ColumnKind::Text).unique(),
        ColumnSpec::new("password_hash", ColumnKind::Text),
        ColumnSpec::new("role", ColumnKind::Text).check("role IN ('user', 'provider')"),
    ],
    checks: &[],
};

pub const PROVIDERS: TableSpec = TableSpec {
    name: "providers",
    columns: &[
        ColumnSpec::new("id", ColumnKind::SurrogateKey),
        ColumnSpec::new("name", ColumnKind::Text).unique(),
        ColumnSpec::new("email", ColumnKind::Text).unique(),
        ColumnSpec::new("specialty", ColumnKind::Text),
        ColumnSpec::new("rating", ColumnKind::Real),
        ColumnSpec::new("jobs", ColumnKind::Integer),
        ColumnSpec::new("img", ColumnKind::Text),
    ],
    checks: &[],
};

pub const REQUESTS: TableSpec = TableSpec {
    name: "requests",
    columns: &[
        ColumnSpec::new("id", ColumnKind::SurrogateKey),
        ColumnSpec::new("title", ColumnKind::Text),
        ColumnSpec::new("category", ColumnKind::Text),
        ColumnSpec::new("date", ColumnKind::Text),
        ColumnSpec::new("budget", ColumnKind::Integer),
        ColumnSpec::new("status", ColumnKind::Text)
            .default("'pending'")
            .check("status IN ('pending', 'confirmed')"),
        ColumnSpec::new("user_id", ColumnKind::Integer).references("users", "id"),
        ColumnSpec::new("provider_id", ColumnKind::Integer)
            .nullable()
            .references("providers", "id"),
    ],
    checks: &["status = 'pending' OR provider_id IS NOT NULL"],
};

/// Tables in dependency order.
pub const TABLES: [TableSpec; 3] = [USERS, PROVIDERS, REQUESTS];

pub const INDEXES: [IndexSpec; 2] = [
    IndexSpec {
        name: "requests_user_id_idx",
        table: "requests",
        columns: &["user_id"],
    },
    IndexSpec {
        name: "requests_status_idx",
        table: "requests",
        columns: &["status"],
    },
];

/// Every DDL statement needed for a fresh store, in execution order.
pub fn schema_statements(dialect: Dialect) -> Vec<String> {
    TABLES
        .iter()
        .map(|table| table.create_statement(dialect))
        .chain(INDEXES.iter().map(IndexSpec::create_statement))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn normalise(ddl: &str, dialect: Dialect) -> String {
        let key = ColumnKind::SurrogateKey.render(dialect);
        let ddl = ddl.replace(key, "<KEY>");
        match dialect {
            Dialect::Sqlite => ddl,
            Dialect::Postgres => ddl
                .replace("DOUBLE PRECISION", "REAL")
                .replace("BIGINT", "INTEGER"),
        }
    }

    #[rstest]
    fn logical_schema_is_identical_across_dialects() {
        let sqlite = schema_statements(Dialect::Sqlite);
        let postgres = schema_statements(Dialect::Postgres);
        assert_eq!(sqlite.len(), postgres.len());
        for (lite, pg) in sqlite.iter().zip(&postgres) {
            assert_eq!(normalise(lite, Dialect::Sqlite), normalise(pg, Dialect::Postgres));
        }
    }

    #[rstest]
    #[case(Dialect::Sqlite, "id INTEGER PRIMARY KEY AUTOINCREMENT")]
    #[case(Dialect::Postgres, "id BIGSERIAL PRIMARY KEY")]
    fn surrogate_keys_follow_the_dialect(#[case] dialect: Dialect, #[case] expected: &str) {
        for table in TABLES {
            assert!(table.create_statement(dialect).contains(expected));
        }
    }

    #[rstest]
    fn requests_table_carries_lifecycle_constraints() {
        let ddl = REQUESTS.create_statement(Dialect::Sqlite);
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS requests ("));
        assert!(ddl.contains("status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'confirmed'))"));
        assert!(ddl.contains("user_id INTEGER NOT NULL REFERENCES users(id)"));
        assert!(ddl.contains("provider_id INTEGER REFERENCES providers(id)"));
        assert!(ddl.contains("CHECK (status = 'pending' OR provider_id IS NOT NULL)"));
    }

    #[rstest]
    fn emails_are_unique_in_both_tables() {
        for table in [USERS, PROVIDERS] {
            assert!(table
                .create_statement(Dialect::Postgres)
                .contains("email TEXT NOT NULL UNIQUE"));
        }
    }

    #[rstest]
    fn indexes_are_idempotent() {
        let statements = schema_statements(Dialect::Postgres);
        assert!(statements[3].starts_with("CREATE INDEX IF NOT EXISTS requests_user_id_idx"));
    }
}
