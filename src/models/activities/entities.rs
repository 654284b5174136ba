use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::materials::entities::Material;
use crate::models::submissions::entities::Submission;

// 学生对某份资料的完成状态，每次读取时计算，不落库
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub enum ActivityStatus {
    Pending,
    Submitted,
    SubmittedLate,
    Missed,
}

// 前端展示用的色调
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub enum StatusTone {
    Info,
    Success,
    Warning,
    Danger,
}

impl ActivityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "Pending",
            ActivityStatus::Submitted => "Submitted",
            ActivityStatus::SubmittedLate => "Submitted Late",
            ActivityStatus::Missed => "Empty (Missed)",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            ActivityStatus::Pending => StatusTone::Info,
            ActivityStatus::Submitted => StatusTone::Success,
            ActivityStatus::SubmittedLate => StatusTone::Warning,
            ActivityStatus::Missed => StatusTone::Danger,
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 状态及其展示信息
#[derive(Debug, Clone, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct StatusView {
    pub status: ActivityStatus,
    pub label: String,
    pub tone: StatusTone,
}

impl From<ActivityStatus> for StatusView {
    fn from(status: ActivityStatus) -> Self {
        Self {
            status,
            label: status.label().to_string(),
            tone: status.tone(),
        }
    }
}

/// 一份资料与当前用户最近一次提交的配对
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct Activity {
    pub material: Material,
    pub submission: Option<Submission>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub status: StatusView,
}
