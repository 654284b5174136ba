use serde::Serialize;
use ts_rs::TS;

use super::entities::{Activity, StatusView};
use crate::models::submissions::entities::SubmissionState;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityListResponse {
    pub user_id: i64,
    pub items: Vec<Activity>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct EvaluateStatusResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub status: StatusView,
    /// 若此刻提交将被记录的状态
    pub initial_state: SubmissionState,
    pub evaluated_at: chrono::DateTime<chrono::Utc>,
}
