use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交的生命周期状态，写入时确定
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionState {
    OnTime,
    Late,
    /// 仅出现在历史数据中，新提交不会写入此状态
    Pending,
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionState::OnTime => write!(f, "on_time"),
            SubmissionState::Late => write!(f, "late"),
            SubmissionState::Pending => write!(f, "pending"),
        }
    }
}

impl std::str::FromStr for SubmissionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on_time" => Ok(SubmissionState::OnTime),
            "late" => Ok(SubmissionState::Late),
            "pending" => Ok(SubmissionState::Pending),
            _ => Err(format!("Invalid submission state: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub task_id: i64,
    pub task_code: String,
    pub owner_id: i64,
    // 资料被删除后为空
    pub material_id: Option<i64>,
    // 提交时的资料标题快照
    pub task_name: String,
    pub file_ref: String,
    pub comment: Option<String>,
    pub remark: Option<f64>,
    pub remark_comment: Option<String>,
    pub state: SubmissionState,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_by: Option<i64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.remark.is_some()
    }
}
