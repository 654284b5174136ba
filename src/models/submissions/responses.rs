use serde::Serialize;
use ts_rs::TS;

use super::entities::{Submission, SubmissionState};
use crate::models::PaginatedResponse;

/// 创建提交后的回执
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionReceipt {
    pub task_id: i64,
    pub task_code: String,
    pub state: SubmissionState,
}

impl From<&Submission> for SubmissionReceipt {
    fn from(submission: &Submission) -> Self {
        Self {
            task_id: submission.task_id,
            task_code: submission.task_code.clone(),
            state: submission.state,
        }
    }
}

pub type SubmissionListResponse = PaginatedResponse<Submission>;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct MySubmissionsResponse {
    pub items: Vec<Submission>,
}
