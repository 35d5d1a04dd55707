//! Scripted port implementations shared by the endpoint tests.

#![allow(dead_code, reason = "each test crate uses a subset of the doubles")]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use sqlqa::domain::Question;
use sqlqa::domain::ports::{
    ColumnInfo, CompletionClient, CompletionError, CompletionRequest, GatewayAnswer,
    PipelineOutcome, QueryRows, QueryService, RelationInfo, SqlGateway, SqlGatewayError,
    ViewDatabase, ViewDatabaseError,
};

/// Gateway replaying scripted results and recording every prompt.
#[derive(Default)]
pub struct ScriptedGateway {
    script: Mutex<VecDeque<Result<GatewayAnswer, SqlGatewayError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new(script: impl IntoIterator<Item = Result<GatewayAnswer, SqlGatewayError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

pub fn answered(text: &str) -> Result<GatewayAnswer, SqlGatewayError> {
    Ok(GatewayAnswer {
        answer: text.to_owned(),
        sql: "SELECT 1".to_owned(),
    })
}

#[async_trait]
impl SqlGateway for ScriptedGateway {
    async fn answer(&self, prompt: &str) -> Result<GatewayAnswer, SqlGatewayError> {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_owned());
        self.script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or_else(|| Err(SqlGatewayError::generation("script exhausted")))
    }
}

/// Query service that panics, standing in for a bug deep in the pipeline.
pub struct PanickingService;

#[async_trait]
impl QueryService for PanickingService {
    async fn answer(&self, _question: &Question) -> PipelineOutcome {
        panic!("pipeline exploded");
    }
}

/// Completion model replaying scripted texts and recording requests.
#[derive(Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    stall: bool,
}

impl ScriptedCompletion {
    pub fn new(replies: impl IntoIterator<Item = Result<String, CompletionError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            stall: false,
        }
    }

    /// A model that never answers.
    pub fn stalled() -> Self {
        Self {
            stall: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        if self.stall {
            std::future::pending::<()>().await;
        }
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::rejected("no scripted reply")))
    }
}

/// In-memory view with one relation and scripted query results.
pub struct FixtureView {
    results: Mutex<VecDeque<Result<QueryRows, ViewDatabaseError>>>,
    executed: Mutex<Vec<String>>,
}

impl FixtureView {
    pub fn new(results: impl IntoIterator<Item = Result<QueryRows, ViewDatabaseError>>) -> Self {
        Self {
            results: Mutex::new(results.into_iter().collect()),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().expect("executed lock").clone()
    }
}

#[async_trait]
impl ViewDatabase for FixtureView {
    async fn describe(&self) -> Result<Vec<RelationInfo>, ViewDatabaseError> {
        let mut row = Map::new();
        row.insert("Assets".to_owned(), json!("Deep Fryer"));
        row.insert("Manufacturer".to_owned(), json!("Antunes"));
        Ok(vec![RelationInfo {
            name: "MyAiView".to_owned(),
            columns: vec![
                ColumnInfo {
                    name: "Assets".to_owned(),
                    data_type: "text".to_owned(),
                },
                ColumnInfo {
                    name: "Manufacturer".to_owned(),
                    data_type: "text".to_owned(),
                },
            ],
            sample_rows: vec![row],
        }])
    }

    async fn run_read_only(&self, sql: &str) -> Result<QueryRows, ViewDatabaseError> {
        self.executed
            .lock()
            .expect("executed lock")
            .push(sql.to_owned());
        self.results
            .lock()
            .expect("results lock")
            .pop_front()
            .unwrap_or_else(|| Ok(QueryRows(vec![Value::Null])))
    }
}
