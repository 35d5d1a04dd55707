//! Prompt templates for SQL generation, checking, and answer phrasing.

use crate::domain::ports::{QueryRows, RelationInfo};

/// Stop sequence ending the SQL generation step.
pub const SQL_RESULT_STOP: &str = "\nSQLResult:";

const SAMPLE_NULL: &str = "NULL";

/// Prompt asking the model for one PostgreSQL query answering `input`.
///
/// The prompt ends with `SQLQuery:` so the completion is the query itself.
pub fn generation_prompt(table_info: &str, top_k: usize, input: &str) -> String {
    format!(
        r#"You are a PostgreSQL expert. Given an input question, first create a syntactically correct PostgreSQL query to run, then look at the results of the query and return the answer to the input question.
Unless the user specifies in the question a specific number of examples to obtain, query for at most {top_k} results using the LIMIT clause as per PostgreSQL. You can order the results to return the most informative data in the database.
Never query for all columns from a table. You must query only the columns that are needed to answer the question. Wrap each column name in double quotes (") to denote them as delimited identifiers.
Pay attention to use only the column names you can see in the tables below. Be careful to not query for columns that do not exist. Also, pay attention to which column is in which table.
Pay attention to use CURRENT_DATE function to get the current date, if the question involves "today".

Use the following format:

Question: Question here
SQLQuery: SQL Query to run
SQLResult: Result of the SQLQuery
Answer: Final answer here

Only use the following tables:
{table_info}

Question: {input}
SQLQuery:"#
    )
}

/// Prompt asking the model to re-check a generated query.
pub fn query_checker_prompt(sql: &str) -> String {
    format!(
        "{sql}
Double check the PostgreSQL query above for common mistakes, including:
- Using NOT IN with NULL values
- Using UNION when UNION ALL should have been used
- Using BETWEEN for exclusive ranges
- Data type mismatch in predicates
- Properly quoting identifiers
- Using the correct number of arguments for functions
- Casting to the correct data type
- Using the proper columns for joins

If there are any of the above mistakes, rewrite the query. If there are no mistakes, just reproduce the original query.

Output the final SQL query only.

SQL Query: "
    )
}

/// Continue the generation prompt with the executed query and its rows.
pub fn answer_prompt(generation_prompt: &str, sql: &str, rows: &QueryRows) -> String {
    format!("{generation_prompt} {sql}\nSQLResult: {rows}\nAnswer:")
}

/// Render relations as `CREATE TABLE` blocks followed by sample rows.
pub fn render_table_info(relations: &[RelationInfo]) -> String {
    relations
        .iter()
        .map(render_relation)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_relation(relation: &RelationInfo) -> String {
    let columns = relation
        .columns
        .iter()
        .map(|column| format!("\t{} {}", quote_identifier(&column.name), column.data_type))
        .collect::<Vec<_>>()
        .join(",\n");
    let mut rendered = format!(
        "CREATE TABLE {} (\n{columns}\n)",
        quote_identifier(&relation.name)
    );
    if relation.sample_rows.is_empty() {
        return rendered;
    }

    let header = relation
        .columns
        .iter()
        .map(|column| column.name.as_str())
        .collect::<Vec<_>>()
        .join("\t");
    let rows = relation
        .sample_rows
        .iter()
        .map(|row| {
            relation
                .columns
                .iter()
                .map(|column| match row.get(&column.name) {
                    None | Some(serde_json::Value::Null) => SAMPLE_NULL.to_owned(),
                    Some(serde_json::Value::String(text)) => text.clone(),
                    Some(other) => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n");
    rendered.push_str(&format!(
        "\n\n/*\n{count} rows from {name} table:\n{header}\n{rows}\n*/",
        count = relation.sample_rows.len(),
        name = relation.name,
    ));
    rendered
}

/// Quote a PostgreSQL identifier, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ColumnInfo;
    use serde_json::{Map, json};

    fn relation(sample_rows: Vec<Map<String, serde_json::Value>>) -> RelationInfo {
        RelationInfo {
            name: "MyAiView".to_owned(),
            columns: vec![
                ColumnInfo {
                    name: "Assets".to_owned(),
                    data_type: "text".to_owned(),
                },
                ColumnInfo {
                    name: "Quantity".to_owned(),
                    data_type: "integer".to_owned(),
                },
            ],
            sample_rows,
        }
    }

    fn row(value: serde_json::Value) -> Map<String, serde_json::Value> {
        value.as_object().cloned().expect("object row")
    }

    #[test]
    fn renders_schema_and_samples_in_column_order() {
        let rendered = render_table_info(&[relation(vec![
            row(json!({"Quantity": 2, "Assets": "Deep Fryer"})),
            row(json!({"Assets": null})),
        ])]);

        assert_eq!(
            rendered,
            "CREATE TABLE \"MyAiView\" (\n\t\"Assets\" text,\n\t\"Quantity\" integer\n)\n\n\
             /*\n2 rows from MyAiView table:\nAssets\tQuantity\nDeep Fryer\t2\nNULL\tNULL\n*/"
        );
    }

    #[test]
    fn omits_sample_block_for_empty_relations() {
        let rendered = render_table_info(&[relation(Vec::new())]);
        assert!(rendered.ends_with("integer\n)"));
        assert!(!rendered.contains("/*"));
    }

    #[test]
    fn generation_prompt_ends_ready_for_sql() {
        let prompt = generation_prompt("CREATE TABLE \"t\" ()", 10, "\nThe question: hi\n");
        assert!(prompt.contains("query for at most 10 results"));
        assert!(prompt.contains("Only use the following tables:\nCREATE TABLE \"t\" ()"));
        assert!(prompt.ends_with("Question: \nThe question: hi\n\nSQLQuery:"));
    }

    #[test]
    fn answer_prompt_appends_sql_and_rows() {
        let rows = QueryRows(vec![json!({"Manufacturer": "Antunes"})]);
        let prompt = answer_prompt("...SQLQuery:", "SELECT 1", &rows);
        assert_eq!(
            prompt,
            "...SQLQuery: SELECT 1\nSQLResult: [{\"Manufacturer\":\"Antunes\"}]\nAnswer:"
        );
    }

    #[test]
    fn quotes_embedded_double_quotes() {
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
