//! Structured query grammar
//!
//! Recursive-descent parser over the spanned token stream, covering the
//! statements a workbench editor actually sees: SELECT (with joins,
//! subqueries and UNION chains), INSERT, UPDATE and DELETE. Errors carry
//! exact token spans and raw parser phrasings; the query validator
//! rewrites those phrasings for display.
//!
//! Statements the grammar does not recognize produce no markers at all,
//! so an unknown statement head can never become a false positive — the
//! fallback parser covers those.

use crate::sql::dialect::DialectProfile;
use crate::sql::lexer::{tokenize, RawError, Span, Token, TokenKind};

/// A dialect-specific grammar instance. Immutable after construction;
/// built once per dialect and shared (see `dialect::structured_grammar`).
#[derive(Debug)]
pub struct StructuredGrammar {
    profile: DialectProfile,
}

impl StructuredGrammar {
    pub fn new(profile: DialectProfile) -> Self {
        Self { profile }
    }

    /// Check `code`, returning zero or more located raw errors.
    pub fn check(&self, code: &str) -> Vec<RawError> {
        let tokens = match tokenize(code, &self.profile) {
            Ok(tokens) => tokens,
            Err(err) => return vec![err],
        };
        Parser {
            tokens,
            pos: 0,
            profile: &self.profile,
            eof_span: end_of_input_span(code),
            errors: Vec::new(),
        }
        .run()
    }
}

fn end_of_input_span(code: &str) -> Span {
    let line_count = code.split('\n').count();
    let last_len = code
        .split('\n')
        .next_back()
        .map_or(0, |l| l.chars().count());
    let start_col = last_len.max(1);
    Span {
        start_line: line_count,
        start_col,
        end_line: line_count,
        end_col: start_col + 1,
    }
}

/// Clause keywords that, seen after their slot in the clause chain, mean
/// the clause is out of order rather than merely unexpected.
fn is_clause_keyword(text: &str) -> bool {
    matches!(
        text.to_ascii_uppercase().as_str(),
        "FROM" | "WHERE" | "GROUP" | "HAVING" | "ORDER" | "LIMIT" | "OFFSET"
    )
}

type PResult<T> = Result<T, RawError>;

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    profile: &'a DialectProfile,
    eof_span: Span,
    errors: Vec<RawError>,
}

impl Parser<'_> {
    fn run(mut self) -> Vec<RawError> {
        while self.peek().is_some() {
            if self.eat_kind(TokenKind::Semi) {
                continue;
            }
            let outcome = if self.at_keyword("SELECT") {
                Some(self.select_stmt())
            } else if self.at_keyword("INSERT") {
                Some(self.insert_stmt())
            } else if self.at_keyword("UPDATE") {
                Some(self.update_stmt())
            } else if self.at_keyword("DELETE") {
                Some(self.delete_stmt())
            } else {
                None
            };
            match outcome {
                // Unrecognized statement head: leave it to the fallback parser.
                None => self.skip_statement(),
                Some(Err(err)) => {
                    self.errors.push(err);
                    self.skip_statement();
                }
                Some(Ok(())) => {
                    if self.at_kind(TokenKind::Semi) {
                        self.bump();
                    } else if self.peek().is_some() {
                        let err = self.mismatched("';'");
                        self.errors.push(err);
                        self.skip_statement();
                    }
                }
            }
        }
        self.errors
    }

    // ----- token access ---------------------------------------------------

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn at_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn eat_kind(&mut self, kind: TokenKind) -> bool {
        if self.at_kind(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn at_keyword(&self, kw: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(kw))
    }

    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.at_keyword(kw) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn at_op(&self, op: &str) -> bool {
        self.peek().is_some_and(|t| t.is_op(op))
    }

    fn eat_op(&mut self, op: &str) -> bool {
        if self.at_op(op) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn at_op_in(&self, ops: &[&str]) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == TokenKind::Op && ops.contains(&t.text.as_str()))
    }

    fn skip_statement(&mut self) {
        while let Some(t) = self.peek() {
            let is_semi = t.kind == TokenKind::Semi;
            self.bump();
            if is_semi {
                break;
            }
        }
    }

    // ----- error construction --------------------------------------------

    fn found(&self) -> (String, Span) {
        match self.peek() {
            Some(t) => (t.text.clone(), t.span),
            None => ("<EOF>".to_string(), self.eof_span),
        }
    }

    fn mismatched(&self, expecting: &str) -> RawError {
        let (found, span) = self.found();
        RawError {
            message: format!("mismatched input '{found}' expecting {expecting}"),
            span,
        }
    }

    fn missing(&self, what: &str) -> RawError {
        let (found, span) = self.found();
        RawError {
            message: format!("missing '{what}' at '{found}'"),
            span,
        }
    }

    fn no_viable(&self) -> RawError {
        let (found, span) = self.found();
        RawError {
            message: format!("no viable alternative at input '{found}'"),
            span,
        }
    }

    fn not_valid_here(&self) -> RawError {
        let (found, span) = self.found();
        RawError {
            message: format!("'{found}' is not valid at this position"),
            span,
        }
    }

    fn expect_keyword(&mut self, kw: &str) -> PResult<()> {
        if self.eat_keyword(kw) {
            Ok(())
        } else {
            Err(self.missing(kw))
        }
    }

    fn expect_kind(&mut self, kind: TokenKind, what: &str) -> PResult<()> {
        if self.eat_kind(kind) {
            Ok(())
        } else {
            Err(self.missing(what))
        }
    }

    fn expect_ident(&mut self, expecting: &str) -> PResult<()> {
        if self.at_kind(TokenKind::Ident) || self.at_kind(TokenKind::QuotedIdent) {
            self.bump();
            Ok(())
        } else {
            Err(self.mismatched(expecting))
        }
    }

    // ----- statements -----------------------------------------------------

    fn select_stmt(&mut self) -> PResult<()> {
        self.expect_keyword("SELECT")?;
        if self.at_keyword("DISTINCT") || self.at_keyword("ALL") {
            self.bump();
        }
        self.select_item()?;
        while self.eat_kind(TokenKind::Comma) {
            self.select_item()?;
        }
        if self.eat_keyword("FROM") {
            self.table_ref()?;
            while self.eat_kind(TokenKind::Comma) {
                self.table_ref()?;
            }
        }
        if self.eat_keyword("WHERE") {
            self.expr()?;
        }
        if self.eat_keyword("GROUP") {
            self.expect_keyword("BY")?;
            self.expr()?;
            while self.eat_kind(TokenKind::Comma) {
                self.expr()?;
            }
        }
        if self.eat_keyword("HAVING") {
            self.expr()?;
        }
        if self.eat_keyword("ORDER") {
            self.expect_keyword("BY")?;
            self.order_item()?;
            while self.eat_kind(TokenKind::Comma) {
                self.order_item()?;
            }
        }
        if self.eat_keyword("LIMIT") {
            self.expr()?;
            // mysql LIMIT offset, count
            if self.eat_kind(TokenKind::Comma) {
                self.expr()?;
            }
        }
        if self.eat_keyword("OFFSET") {
            self.expr()?;
        }
        if self.eat_keyword("UNION") || self.eat_keyword("EXCEPT") || self.eat_keyword("INTERSECT")
        {
            if self.at_keyword("ALL") || self.at_keyword("DISTINCT") {
                self.bump();
            }
            return self.select_stmt();
        }
        match self.peek() {
            None => Ok(()),
            Some(t) if matches!(t.kind, TokenKind::Semi | TokenKind::RParen) => Ok(()),
            Some(t) if t.kind == TokenKind::Keyword && is_clause_keyword(&t.text) => {
                Err(self.not_valid_here())
            }
            Some(_) => Err(self.mismatched("',', 'FROM' or end of statement")),
        }
    }

    fn select_item(&mut self) -> PResult<()> {
        if self.eat_op("*") {
            return Ok(());
        }
        self.expr()?;
        // Column aliases require an explicit AS here; a bare identifier
        // after an expression is the "missing comma or FROM" defect this
        // grammar exists to catch.
        if self.eat_keyword("AS") {
            self.expect_ident("an identifier")?;
        }
        Ok(())
    }

    fn table_ref(&mut self) -> PResult<()> {
        self.table_primary()?;
        loop {
            let mut is_cross = false;
            if self.eat_keyword("JOIN") {
                // bare JOIN
            } else if self.eat_keyword("INNER") {
                self.expect_keyword("JOIN")?;
            } else if self.at_keyword("LEFT") || self.at_keyword("RIGHT") || self.at_keyword("FULL")
            {
                self.bump();
                self.eat_keyword("OUTER");
                self.expect_keyword("JOIN")?;
            } else if self.eat_keyword("CROSS") {
                self.expect_keyword("JOIN")?;
                is_cross = true;
            } else {
                break;
            }
            self.table_primary()?;
            if !is_cross {
                if self.eat_keyword("ON") {
                    self.expr()?;
                } else if self.eat_keyword("USING") {
                    self.expect_kind(TokenKind::LParen, "(")?;
                    self.expect_ident("a column name")?;
                    while self.eat_kind(TokenKind::Comma) {
                        self.expect_ident("a column name")?;
                    }
                    self.expect_kind(TokenKind::RParen, ")")?;
                }
                // a join without ON is left to the rule layer to flag
            }
        }
        Ok(())
    }

    fn table_primary(&mut self) -> PResult<()> {
        if self.eat_kind(TokenKind::LParen) {
            if self.at_keyword("SELECT") {
                self.select_stmt()?;
            } else {
                self.expr()?;
            }
            self.expect_kind(TokenKind::RParen, ")")?;
        } else {
            self.qualified_name()?;
        }
        // table aliases may be bare or use AS
        if self.eat_keyword("AS") {
            self.expect_ident("an alias")?;
        } else if self.at_kind(TokenKind::Ident) || self.at_kind(TokenKind::QuotedIdent) {
            self.bump();
        }
        Ok(())
    }

    fn qualified_name(&mut self) -> PResult<()> {
        self.expect_ident("a table name")?;
        while self.eat_kind(TokenKind::Dot) {
            self.expect_ident("an identifier")?;
        }
        Ok(())
    }

    fn insert_stmt(&mut self) -> PResult<()> {
        self.expect_keyword("INSERT")?;
        self.expect_keyword("INTO")?;
        self.qualified_name()?;
        if self.eat_kind(TokenKind::LParen) {
            self.expect_ident("a column name")?;
            while self.eat_kind(TokenKind::Comma) {
                self.expect_ident("a column name")?;
            }
            self.expect_kind(TokenKind::RParen, ")")?;
        }
        if self.eat_keyword("VALUES") {
            self.values_tuple()?;
            while self.eat_kind(TokenKind::Comma) {
                self.values_tuple()?;
            }
        } else if self.at_keyword("SELECT") {
            self.select_stmt()?;
        } else {
            return Err(self.mismatched("'VALUES' or 'SELECT'"));
        }
        self.returning_clause()
    }

    fn values_tuple(&mut self) -> PResult<()> {
        self.expect_kind(TokenKind::LParen, "(")?;
        self.expr()?;
        while self.eat_kind(TokenKind::Comma) {
            self.expr()?;
        }
        self.expect_kind(TokenKind::RParen, ")")
    }

    fn update_stmt(&mut self) -> PResult<()> {
        self.expect_keyword("UPDATE")?;
        self.qualified_name()?;
        self.expect_keyword("SET")?;
        self.assignment()?;
        while self.eat_kind(TokenKind::Comma) {
            self.assignment()?;
        }
        if self.eat_keyword("WHERE") {
            self.expr()?;
        }
        self.returning_clause()
    }

    fn assignment(&mut self) -> PResult<()> {
        self.qualified_name()?;
        if !self.eat_op("=") {
            return Err(self.missing("="));
        }
        self.expr()
    }

    fn delete_stmt(&mut self) -> PResult<()> {
        self.expect_keyword("DELETE")?;
        self.expect_keyword("FROM")?;
        self.qualified_name()?;
        if self.eat_keyword("AS") {
            self.expect_ident("an alias")?;
        } else if self.at_kind(TokenKind::Ident) || self.at_kind(TokenKind::QuotedIdent) {
            self.bump();
        }
        if self.eat_keyword("WHERE") {
            self.expr()?;
        }
        self.returning_clause()
    }

    fn returning_clause(&mut self) -> PResult<()> {
        if self.profile.supports_returning && self.eat_keyword("RETURNING") {
            self.select_item()?;
            while self.eat_kind(TokenKind::Comma) {
                self.select_item()?;
            }
        }
        Ok(())
    }

    fn order_item(&mut self) -> PResult<()> {
        self.expr()?;
        if self.at_keyword("ASC") || self.at_keyword("DESC") {
            self.bump();
        }
        // NULLS FIRST / NULLS LAST; not reserved words, so matched by text
        if self.at_ident_text("NULLS") {
            self.bump();
            if self.at_ident_text("FIRST") || self.at_ident_text("LAST") {
                self.bump();
            } else {
                return Err(self.mismatched("'FIRST' or 'LAST'"));
            }
        }
        Ok(())
    }

    fn at_ident_text(&self, text: &str) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == TokenKind::Ident && t.text.eq_ignore_ascii_case(text))
    }

    // ----- expressions ----------------------------------------------------

    fn expr(&mut self) -> PResult<()> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> PResult<()> {
        self.and_expr()?;
        while self.eat_keyword("OR") {
            self.and_expr()?;
        }
        Ok(())
    }

    fn and_expr(&mut self) -> PResult<()> {
        self.not_expr()?;
        while self.eat_keyword("AND") {
            self.not_expr()?;
        }
        Ok(())
    }

    fn not_expr(&mut self) -> PResult<()> {
        if self.eat_keyword("NOT") {
            self.not_expr()
        } else {
            self.comparison()
        }
    }

    fn comparison(&mut self) -> PResult<()> {
        self.additive()?;
        if self.at_op_in(&["=", "<", ">", "<=", ">=", "<>", "!="]) {
            self.bump();
            return self.additive();
        }
        if self.eat_keyword("IS") {
            self.eat_keyword("NOT");
            if self.eat_keyword("NULL") || self.eat_keyword("TRUE") || self.eat_keyword("FALSE") {
                return Ok(());
            }
            return Err(self.mismatched("'NULL'"));
        }
        let negated = self.eat_keyword("NOT");
        if self.at_keyword("LIKE") || self.at_keyword("ILIKE") {
            self.bump();
            return self.additive();
        }
        if self.eat_keyword("IN") {
            self.expect_kind(TokenKind::LParen, "(")?;
            if self.at_keyword("SELECT") {
                self.select_stmt()?;
            } else {
                self.expr()?;
                while self.eat_kind(TokenKind::Comma) {
                    self.expr()?;
                }
            }
            return self.expect_kind(TokenKind::RParen, ")");
        }
        if self.eat_keyword("BETWEEN") {
            self.additive()?;
            self.expect_keyword("AND")?;
            return self.additive();
        }
        if negated {
            return Err(self.mismatched("'LIKE', 'IN' or 'BETWEEN'"));
        }
        Ok(())
    }

    fn additive(&mut self) -> PResult<()> {
        self.term()?;
        while self.at_op_in(&["+", "-", "||"]) {
            self.bump();
            self.term()?;
        }
        Ok(())
    }

    fn term(&mut self) -> PResult<()> {
        self.factor()?;
        while self.at_op_in(&["*", "/", "%"]) {
            self.bump();
            self.factor()?;
        }
        Ok(())
    }

    fn factor(&mut self) -> PResult<()> {
        if self.at_op_in(&["-", "+"]) {
            self.bump();
            return self.factor();
        }
        self.primary()
    }

    fn primary(&mut self) -> PResult<()> {
        let kind = match self.peek() {
            Some(t) => t.kind,
            None => return Err(self.no_viable()),
        };
        match kind {
            TokenKind::Number | TokenKind::Str | TokenKind::Placeholder => self.bump(),
            TokenKind::Keyword => {
                if self.at_keyword("NULL") || self.at_keyword("TRUE") || self.at_keyword("FALSE") {
                    self.bump();
                } else if self.at_keyword("CASE") {
                    self.case_expr()?;
                } else if self.at_keyword("CAST") {
                    self.cast_expr()?;
                } else if self.eat_keyword("EXISTS") {
                    self.expect_kind(TokenKind::LParen, "(")?;
                    self.select_stmt()?;
                    self.expect_kind(TokenKind::RParen, ")")?;
                } else {
                    return Err(self.no_viable());
                }
            }
            TokenKind::Ident | TokenKind::QuotedIdent => {
                self.bump();
                while self.eat_kind(TokenKind::Dot) {
                    if self.at_op("*") {
                        self.bump();
                        break;
                    }
                    self.expect_ident("an identifier")?;
                }
                if self.eat_kind(TokenKind::LParen) {
                    self.call_args()?;
                }
            }
            TokenKind::LParen => {
                self.bump();
                if self.at_keyword("SELECT") {
                    self.select_stmt()?;
                } else {
                    self.expr()?;
                    while self.eat_kind(TokenKind::Comma) {
                        self.expr()?;
                    }
                }
                self.expect_kind(TokenKind::RParen, ")")?;
            }
            _ => return Err(self.no_viable()),
        }
        if self.profile.cast_op {
            while self.eat_op("::") {
                self.type_name()?;
            }
        }
        Ok(())
    }

    fn call_args(&mut self) -> PResult<()> {
        if self.eat_kind(TokenKind::RParen) {
            return Ok(());
        }
        self.eat_keyword("DISTINCT");
        if self.at_op("*") {
            self.bump();
        } else {
            self.expr()?;
        }
        while self.eat_kind(TokenKind::Comma) {
            self.expr()?;
        }
        self.expect_kind(TokenKind::RParen, ")")
    }

    fn case_expr(&mut self) -> PResult<()> {
        self.expect_keyword("CASE")?;
        if !self.at_keyword("WHEN") {
            self.expr()?;
        }
        if !self.at_keyword("WHEN") {
            return Err(self.missing("WHEN"));
        }
        while self.eat_keyword("WHEN") {
            self.expr()?;
            self.expect_keyword("THEN")?;
            self.expr()?;
        }
        if self.eat_keyword("ELSE") {
            self.expr()?;
        }
        self.expect_keyword("END")
    }

    fn cast_expr(&mut self) -> PResult<()> {
        self.expect_keyword("CAST")?;
        self.expect_kind(TokenKind::LParen, "(")?;
        self.expr()?;
        self.expect_keyword("AS")?;
        self.type_name()?;
        self.expect_kind(TokenKind::RParen, ")")
    }

    fn type_name(&mut self) -> PResult<()> {
        self.expect_ident("a type name")?;
        // two-word types like DOUBLE PRECISION
        if self.at_kind(TokenKind::Ident) {
            self.bump();
        }
        if self.eat_kind(TokenKind::LParen) {
            if !self.at_kind(TokenKind::Number) {
                return Err(self.mismatched("a number"));
            }
            self.bump();
            if self.eat_kind(TokenKind::Comma) {
                if !self.at_kind(TokenKind::Number) {
                    return Err(self.mismatched("a number"));
                }
                self.bump();
            }
            self.expect_kind(TokenKind::RParen, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::dialect::DialectProfile;

    fn postgres() -> StructuredGrammar {
        StructuredGrammar::new(DialectProfile::postgres())
    }

    fn mysql() -> StructuredGrammar {
        StructuredGrammar::new(DialectProfile::mysql())
    }

    #[test]
    fn accepts_literal_select() {
        assert!(postgres().check("SELECT 1").is_empty());
        assert!(postgres().check("SELECT 'hello', 2.5").is_empty());
    }

    #[test]
    fn accepts_a_realistic_query() {
        let sql = "SELECT u.id, count(*) AS n\n\
                   FROM users u\n\
                   LEFT JOIN orders o ON o.user_id = u.id\n\
                   WHERE u.active = TRUE AND u.name ILIKE '%smith%'\n\
                   GROUP BY u.id\n\
                   HAVING count(*) > 1\n\
                   ORDER BY n DESC\n\
                   LIMIT 10 OFFSET 20";
        assert!(postgres().check(sql).is_empty());
    }

    #[test]
    fn bare_identifier_after_expression_is_mismatched_input() {
        let errors = postgres().check("SELECT name users");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("mismatched input 'users'"));
        assert_eq!(errors[0].span.start_line, 1);
        assert_eq!(errors[0].span.start_col, 13);
        assert_eq!(errors[0].span.end_col, 18);
    }

    #[test]
    fn trailing_comma_hits_no_viable_alternative() {
        let errors = postgres().check("SELECT a, FROM t");
        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .message
            .starts_with("no viable alternative at input 'FROM'"));
    }

    #[test]
    fn missing_by_after_group() {
        let errors = postgres().check("SELECT a FROM t GROUP x");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("missing 'BY'"));
    }

    #[test]
    fn unclosed_paren_reports_missing() {
        let errors = postgres().check("SELECT count(id FROM t");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("missing ')'"));
    }

    #[test]
    fn out_of_order_clause_is_not_valid_here() {
        let errors = postgres().check("SELECT a FROM t GROUP BY a WHERE a > 1");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "'WHERE' is not valid at this position");
    }

    #[test]
    fn writes_parse_cleanly() {
        assert!(postgres()
            .check("INSERT INTO users (id, name) VALUES (1, 'a'), (2, 'b')")
            .is_empty());
        assert!(postgres()
            .check("UPDATE users SET name = 'x', active = FALSE WHERE id = $1 RETURNING id")
            .is_empty());
        assert!(postgres().check("DELETE FROM users WHERE id IN (1, 2, 3)").is_empty());
    }

    #[test]
    fn unknown_statements_produce_no_markers() {
        assert!(postgres()
            .check("CREATE TABLE t (id int primary key)")
            .is_empty());
        assert!(postgres()
            .check("WITH x AS (SELECT 1) SELECT * FROM x")
            .is_empty());
    }

    #[test]
    fn each_bad_statement_gets_its_own_error() {
        let errors = postgres().check("SELECT name users; SELECT a, FROM t");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].span.start_line, 1);
        assert!(errors[1].span.start_col > errors[0].span.start_col);
    }

    #[test]
    fn subqueries_and_set_operations_are_supported() {
        assert!(postgres()
            .check("SELECT * FROM (SELECT id FROM users) AS u WHERE id IN (SELECT user_id FROM orders)")
            .is_empty());
        assert!(postgres()
            .check("SELECT a FROM t UNION ALL SELECT b FROM u")
            .is_empty());
        assert!(postgres()
            .check("SELECT a FROM t EXCEPT SELECT a FROM u INTERSECT SELECT a FROM v")
            .is_empty());
    }

    #[test]
    fn order_by_accepts_nulls_placement() {
        assert!(postgres()
            .check("SELECT a FROM t ORDER BY a DESC NULLS LAST, b NULLS FIRST")
            .is_empty());
        let errors = postgres().check("SELECT a FROM t ORDER BY a NULLS");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("mismatched input"));
    }

    #[test]
    fn mysql_rejects_the_postgres_cast_operator() {
        assert!(postgres().check("SELECT id::text FROM t").is_empty());
        let errors = mysql().check("SELECT id::text FROM t");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn case_expression_parses() {
        let sql = "SELECT CASE WHEN a > 1 THEN 'big' ELSE 'small' END FROM t";
        assert!(postgres().check(sql).is_empty());
    }

    #[test]
    fn incomplete_input_points_at_end_of_input() {
        let errors = postgres().check("SELECT a FROM");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("'<EOF>'"));
    }
}
