//! Prompt text handed to the SQL gateway by the query pipeline.
//!
//! The wording is load-bearing for answer quality and is kept byte for byte,
//! including the worked example written against the production view and its
//! trailing whitespace.

use super::Question;

/// Instructional block prepended to the question on the fallback attempt.
pub const FALLBACK_INSTRUCTIONS: &str = "- Return only 10 rows if the user doesn't specify the row count.
- Retrieve only distinct results.
- Inform the user if all records cannot be displayed upon request.
- Indicate that details are null or unavailable if the query returns no records.
- Do not provide an answer if the question is unrelated to the database.
- If the column name is not specified in the question, use the last value in the question as the asset item or name.
- If there is confusion in selecting which column to choose in the WHERE clause, select all related columns based on the values given in the question's context.
- This is the test sql query and user question.
- Assets and Locations are the main columns to query.
- The Question :- what is the Manufacturer of the Deep Fryer
- The SQL Query :-  SELECT DISTINCT [Manufacturer]
                    FROM [MyAiView]
                    WHERE [Assets] LIKE '%Deep Fryer%'
                    OR [CategoryName] LIKE '%Fryer%'
                    OR [Manufacturer] LIKE '%Antunes%'
                    OR [ModelNo.] LIKE '%G12001%'
                    OR [Model#] LIKE '%G12001%'  
                    OR [Model Number] LIKE '%G12001%'
                    OR [Endoflife] LIKE '%2022-04-04%'
                    ORDER BY [Manufacturer] DESC
                    OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY;
";

/// Prompt for the first attempt: the literal question and nothing else.
///
/// # Examples
/// ```
/// use sqlqa::domain::{Question, prompts::primary_prompt};
///
/// let question = Question::new("how many fryers are there").unwrap();
/// assert_eq!(primary_prompt(&question), "\nThe question: how many fryers are there\n");
/// ```
pub fn primary_prompt(question: &Question) -> String {
    format!("\nThe question: {question}\n")
}

/// Prompt for the second attempt: instructions, the question, and the short
/// summary of what went wrong the first time.
pub fn fallback_prompt(question: &Question, error_summary: &str) -> String {
    format!("\n{FALLBACK_INSTRUCTIONS}\nThe question: {question}\nThe error: {error_summary}\n")
}
