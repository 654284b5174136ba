use serde::Deserialize;
use ts_rs::TS;

use super::entities::MaterialKind;

/// 创建资料请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct CreateMaterialRequest {
    pub title: String,
    pub description: Option<String>,
    pub kind: MaterialKind,
    pub reference: String,
    pub deadline: Option<String>, // RFC 3339，如 "2026-01-24T12:00:00Z"
    pub max_score: Option<f64>,
    pub late_accepted: Option<bool>,
}

/// 更新资料请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<MaterialKind>,
    pub reference: Option<String>,
    pub deadline: Option<String>,
    /// 为 true 时移除截止时间
    #[serde(default)]
    pub clear_deadline: bool,
    pub max_score: Option<f64>,
    #[serde(default)]
    pub clear_max_score: bool,
    pub late_accepted: Option<bool>,
}

/// 资料列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub created_by: Option<i64>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct MaterialListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub created_by: Option<i64>,
}

impl From<MaterialListParams> for MaterialListQuery {
    fn from(params: MaterialListParams) -> Self {
        Self {
            page: params.page,
            size: params.size,
            search: params.search,
            created_by: params.created_by,
        }
    }
}

// 已校验的新资料
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub title: String,
    pub description: Option<String>,
    pub kind: MaterialKind,
    pub reference: String,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub max_score: Option<f64>,
    pub late_accepted: bool,
    pub created_by: i64,
}

// 已校验的资料修改；外层 None 表示不修改
#[derive(Debug, Clone, Default)]
pub struct MaterialChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub kind: Option<MaterialKind>,
    pub reference: Option<String>,
    pub deadline: Option<Option<chrono::DateTime<chrono::Utc>>>,
    pub max_score: Option<Option<f64>>,
    pub late_accepted: Option<bool>,
}
