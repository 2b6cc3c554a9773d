//! SQL dialects
//!
//! Maps the workbench's dialect names onto the fallback parser's dialect
//! objects and onto the structured grammar profiles. Structured grammars
//! are built once per dialect and cached process-wide; they are immutable
//! after construction and safe to share across sessions.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;
use sqlparser::dialect::{
    BigQueryDialect, Dialect as FallbackDialect, GenericDialect, MySqlDialect, PostgreSqlDialect,
    SQLiteDialect,
};

use crate::sql::grammar::StructuredGrammar;

/// Supported query dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgresql,
    Mysql,
    Sqlite,
    Mariadb,
    Bigquery,
    Generic,
}

impl Dialect {
    /// Resolve a dialect name from the host. Unknown names fall back to
    /// PostgreSQL, the workbench's default.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "mysql" => Dialect::Mysql,
            "sqlite" => Dialect::Sqlite,
            "mariadb" => Dialect::Mariadb,
            "bigquery" => Dialect::Bigquery,
            "generic" => Dialect::Generic,
            _ => Dialect::Postgresql,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Postgresql => "postgresql",
            Dialect::Mysql => "mysql",
            Dialect::Sqlite => "sqlite",
            Dialect::Mariadb => "mariadb",
            Dialect::Bigquery => "bigquery",
            Dialect::Generic => "generic",
        }
    }

    /// Dialect object for the fallback parser.
    pub(crate) fn fallback_dialect(&self) -> Box<dyn FallbackDialect> {
        match self {
            Dialect::Postgresql => Box::new(PostgreSqlDialect {}),
            Dialect::Mysql | Dialect::Mariadb => Box::new(MySqlDialect {}),
            Dialect::Sqlite => Box::new(SQLiteDialect {}),
            Dialect::Bigquery => Box::new(BigQueryDialect {}),
            Dialect::Generic => Box::new(GenericDialect {}),
        }
    }
}

/// Lexical and grammatical quirks the structured grammar needs to know.
#[derive(Debug, Clone, Copy)]
pub struct DialectProfile {
    pub name: &'static str,
    /// Identifier quote character (`"` for postgres, `` ` `` for mysql).
    pub ident_quote: char,
    pub supports_ilike: bool,
    /// `expr::type` cast operator.
    pub cast_op: bool,
    /// `$1`-style positional placeholders.
    pub dollar_placeholders: bool,
    /// `?`-style positional placeholders.
    pub question_placeholders: bool,
    /// `RETURNING` clause on writes.
    pub supports_returning: bool,
}

impl DialectProfile {
    pub fn postgres() -> Self {
        Self {
            name: "postgresql",
            ident_quote: '"',
            supports_ilike: true,
            cast_op: true,
            dollar_placeholders: true,
            question_placeholders: false,
            supports_returning: true,
        }
    }

    pub fn mysql() -> Self {
        Self {
            name: "mysql",
            ident_quote: '`',
            supports_ilike: false,
            cast_op: false,
            dollar_placeholders: false,
            question_placeholders: true,
            supports_returning: false,
        }
    }
}

static GRAMMARS: Lazy<HashMap<Dialect, StructuredGrammar>> = Lazy::new(|| {
    let mut grammars = HashMap::new();
    grammars.insert(
        Dialect::Postgresql,
        StructuredGrammar::new(DialectProfile::postgres()),
    );
    grammars.insert(Dialect::Mysql, StructuredGrammar::new(DialectProfile::mysql()));
    grammars.insert(
        Dialect::Mariadb,
        StructuredGrammar::new(DialectProfile::mysql()),
    );
    grammars
});

/// The cached structured grammar for `dialect`, if one is registered.
/// Dialects without one are validated by the fallback parser alone.
pub fn structured_grammar(dialect: Dialect) -> Option<&'static StructuredGrammar> {
    GRAMMARS.get(&dialect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_default_to_postgres() {
        assert_eq!(Dialect::from_name("postgresql"), Dialect::Postgresql);
        assert_eq!(Dialect::from_name("MySQL"), Dialect::Mysql);
        assert_eq!(Dialect::from_name("no-such-dialect"), Dialect::Postgresql);
    }

    #[test]
    fn structured_grammars_cover_postgres_and_mysql_family() {
        assert!(structured_grammar(Dialect::Postgresql).is_some());
        assert!(structured_grammar(Dialect::Mysql).is_some());
        assert!(structured_grammar(Dialect::Mariadb).is_some());
        assert!(structured_grammar(Dialect::Sqlite).is_none());
        assert!(structured_grammar(Dialect::Bigquery).is_none());
    }

    #[test]
    fn cached_instances_are_reused() {
        let first = structured_grammar(Dialect::Postgresql).unwrap() as *const _;
        let second = structured_grammar(Dialect::Postgresql).unwrap() as *const _;
        assert_eq!(first, second);
    }
}
