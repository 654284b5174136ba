use serde::Deserialize;
use ts_rs::TS;

use super::entities::SubmissionState;

/// 创建提交请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub material_id: Option<i64>,
    pub comment: Option<String>,
    pub file_ref: Option<String>,
}

/// 评分请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub remark: f64,
    pub remark_comment: Option<String>,
}

/// 提交列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub material_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub state: Option<SubmissionState>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub material_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub state: Option<SubmissionState>,
}

impl From<SubmissionListParams> for SubmissionListQuery {
    fn from(params: SubmissionListParams) -> Self {
        Self {
            page: params.page,
            size: params.size,
            material_id: params.material_id,
            owner_id: params.owner_id,
            state: params.state,
        }
    }
}

// 写入存储层的新提交
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub task_code: String,
    pub owner_id: i64,
    pub material_id: i64,
    pub task_name: String,
    pub file_ref: String,
    pub comment: Option<String>,
    pub state: SubmissionState,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

// 评分结果
#[derive(Debug, Clone)]
pub struct SubmissionGrade {
    pub remark: f64,
    pub remark_comment: Option<String>,
    pub graded_by: i64,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}
