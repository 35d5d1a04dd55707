//! Pull SQL out of model output and vet it before execution.

use thiserror::Error;

const SQL_QUERY_MARKER: &str = "SQLQuery:";
const END_MARKERS: [&str; 2] = ["SQLResult:", "Answer:"];

/// Reasons a generated statement is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlGuardError {
    /// Nothing left once markers and fences were stripped.
    #[error("the model did not produce a SQL query")]
    Empty,
    /// More than one statement was produced.
    #[error("only a single statement may be executed")]
    MultipleStatements,
    /// The statement is not a query.
    #[error("only SELECT queries are allowed, got: {keyword}")]
    NotAQuery { keyword: String },
}

/// Extract the SQL statement from a completion.
///
/// Handles a leading `SQLQuery:` marker, trailing `SQLResult:`/`Answer:`
/// sections, and Markdown code fences.
///
/// # Examples
/// ```
/// use sqlqa::domain::sql_chain::extract_sql_query;
///
/// let sql = extract_sql_query("SQLQuery: SELECT 1\nSQLResult: [1]");
/// assert_eq!(sql, "SELECT 1");
/// ```
pub fn extract_sql_query(completion: &str) -> String {
    let trimmed = completion.trim();
    let after_marker = trimmed
        .find(SQL_QUERY_MARKER)
        .map_or(trimmed, |start| &trimmed[start + SQL_QUERY_MARKER.len()..]);
    let end = END_MARKERS
        .iter()
        .filter_map(|marker| after_marker.find(marker))
        .min()
        .unwrap_or(after_marker.len());
    strip_code_fence(after_marker[..end].trim()).to_owned()
}

fn strip_code_fence(sql: &str) -> &str {
    let inner = sql
        .strip_prefix("```sql")
        .or_else(|| sql.strip_prefix("```"))
        .unwrap_or(sql);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Check that `sql` is one read-only query and return it without a
/// trailing semicolon.
///
/// Semicolons inside the body are rejected outright, including those in
/// string literals.
pub fn ensure_read_only(sql: &str) -> Result<&str, SqlGuardError> {
    let statement = sql.trim().trim_end_matches(';').trim_end();
    if statement.is_empty() {
        return Err(SqlGuardError::Empty);
    }
    if statement.contains(';') {
        return Err(SqlGuardError::MultipleStatements);
    }
    let keyword = statement
        .trim_start_matches('(')
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default();
    if keyword.eq_ignore_ascii_case("select") || keyword.eq_ignore_ascii_case("with") {
        Ok(statement)
    } else {
        Err(SqlGuardError::NotAQuery {
            keyword: keyword.to_ascii_uppercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::marker("SQLQuery: SELECT * FROM users LIMIT 5\nSQLResult: ...", "SELECT * FROM users LIMIT 5")]
    #[case::bare(" SELECT * FROM users LIMIT 5", "SELECT * FROM users LIMIT 5")]
    #[case::answer_tail("SELECT 1\nAnswer: one", "SELECT 1")]
    #[case::fenced("```sql\nSELECT 1\n```", "SELECT 1")]
    #[case::fenced_after_marker("SQLQuery: ```SELECT 1```", "SELECT 1")]
    #[case::earliest_tail("SELECT 1\nAnswer: x\nSQLResult: y", "SELECT 1")]
    fn extracts_sql(#[case] completion: &str, #[case] expected: &str) {
        assert_eq!(extract_sql_query(completion), expected);
    }

    #[rstest]
    #[case("SELECT 1;", "SELECT 1")]
    #[case("  select \"Assets\" from \"MyAiView\" ;  ", "select \"Assets\" from \"MyAiView\"")]
    #[case("WITH t AS (SELECT 1) SELECT * FROM t", "WITH t AS (SELECT 1) SELECT * FROM t")]
    #[case("(SELECT 1)", "(SELECT 1)")]
    fn accepts_single_queries(#[case] sql: &str, #[case] expected: &str) {
        assert_eq!(ensure_read_only(sql), Ok(expected));
    }

    #[rstest]
    #[case("", SqlGuardError::Empty)]
    #[case(" ; ", SqlGuardError::Empty)]
    #[case("SELECT 1; DROP TABLE x", SqlGuardError::MultipleStatements)]
    #[case("DELETE FROM x", SqlGuardError::NotAQuery { keyword: "DELETE".to_owned() })]
    #[case("update x set y = 1", SqlGuardError::NotAQuery { keyword: "UPDATE".to_owned() })]
    fn rejects_everything_else(#[case] sql: &str, #[case] expected: SqlGuardError) {
        assert_eq!(ensure_read_only(sql), Err(expected));
    }
}
