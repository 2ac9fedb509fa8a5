//! Backend response bodies decoded and loaded into a board.

use super::helpers::{Backend, backend};
use rstest::rstest;
use taskdeck::task::{
    domain::{OwnerId, TaskStatus, decode_rows},
    services::TaskBoardError,
};

fn payload(owner: OwnerId, status: &str, completed_at: &str) -> String {
    format!(
        r#"[{{
            "id": "6a1f0c2e-4b9d-4c1e-9a57-0f3d2b8e7c11",
            "user_id": "{owner}",
            "project_id": null,
            "title": "Finish lab",
            "description": "Measure the pendulum period",
            "priority": "high",
            "status": "{status}",
            "difficulty": 3,
            "estimated_hours": 2.5,
            "actual_hours": null,
            "due_date": null,
            "tags": null,
            "completed_at": {completed_at},
            "created_at": "2025-09-01T09:00:00Z",
            "updated_at": "2025-09-01T09:00:00Z"
        }}]"#
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn decoded_rows_load_into_the_board(backend: Backend) -> eyre::Result<()> {
    let owner = OwnerId::new();
    let body = payload(owner, "completed", r#""2025-09-02T09:00:00Z""#);
    for row in decode_rows(&body)? {
        backend.persistence.seed(row);
    }

    let board = backend.open(owner)?;
    board.refresh().await?;
    let tasks = board.tasks();
    let task = tasks
        .first()
        .ok_or_else(|| eyre::eyre!("decoded task not loaded"))?;

    eyre::ensure!(task.status() == TaskStatus::Completed, "status lost");
    eyre::ensure!(task.tags().is_empty(), "null tags should load as empty");
    eyre::ensure!(task.completed_at().is_some(), "completion time lost");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_row_without_timestamp_is_rejected(backend: Backend) -> eyre::Result<()> {
    let owner = OwnerId::new();
    let body = payload(owner, "completed", "null");
    for row in decode_rows(&body)? {
        backend.persistence.seed(row);
    }

    let board = backend.open(owner)?;
    let result = board.refresh().await;

    let Err(TaskBoardError::DataShape(err)) = result else {
        return Err(eyre::eyre!("expected a data shape error, got {result:?}"));
    };
    eyre::ensure!(err.field() == "completed_at", "wrong field {}", err.field());
    eyre::ensure!(board.tasks().is_empty(), "malformed rows were loaded");
    Ok(())
}

#[rstest]
fn non_array_body_is_rejected() {
    let result = decode_rows(r#"{"id": "not-a-list"}"#);

    let Err(err) = result else {
        panic!("object body should not decode as rows");
    };
    assert_eq!(err.field(), "payload");
}
