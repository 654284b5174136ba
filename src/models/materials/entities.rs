use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 资料类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub enum MaterialKind {
    File, // 上传的文件，reference 为 file_ref
    Link, // 外部链接，reference 为 URL
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialKind::File => write!(f, "file"),
            MaterialKind::Link => write!(f, "link"),
        }
    }
}

impl std::str::FromStr for MaterialKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(MaterialKind::File),
            "link" => Ok(MaterialKind::Link),
            _ => Err(format!("Invalid material kind: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct Material {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub kind: MaterialKind,
    pub reference: String,
    // 截止时间，为空时永远不会缺交
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    // 满分，为空表示不设上限
    pub max_score: Option<f64>,
    // 截止后是否仍接受提交
    pub late_accepted: bool,
    pub created_by: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
