use serde::Deserialize;
use ts_rs::TS;

/// 状态预览请求，时间均为 RFC 3339 文本
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct EvaluateStatusRequest {
    pub deadline: Option<String>,
    #[serde(default)]
    pub late_accepted: bool,
    /// 是否已有提交
    #[serde(default)]
    pub submitted: bool,
    pub submitted_at: Option<String>,
    /// 参考时间，缺省为服务器当前时间
    pub now: Option<String>,
}
