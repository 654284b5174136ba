//! 提交实体

use sea_orm::entity::prelude::*;

use crate::errors::{LmsError, Result as LmsResult};
use crate::utils::timestamp::{from_unix, from_unix_opt};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub task_code: String,
    pub owner_id: i64,
    pub material_id: Option<i64>,
    pub task_name: String,
    pub file_ref: String,
    pub comment: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub remark: Option<f64>,
    pub remark_comment: Option<String>,
    pub state: String,
    pub submitted_at: i64,
    pub graded_by: Option<i64>,
    pub graded_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::materials::Entity",
        from = "Column::MaterialId",
        to = "super::materials::Column::Id"
    )]
    Material,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> LmsResult<crate::models::submissions::entities::Submission> {
        use crate::models::submissions::entities::{Submission, SubmissionState};

        Ok(Submission {
            state: self
                .state
                .parse::<SubmissionState>()
                .map_err(LmsError::serialization)?,
            submitted_at: from_unix(self.submitted_at)?,
            graded_at: from_unix_opt(self.graded_at)?,
            task_id: self.id,
            task_code: self.task_code,
            owner_id: self.owner_id,
            material_id: self.material_id,
            task_name: self.task_name,
            file_ref: self.file_ref,
            comment: self.comment,
            remark: self.remark,
            remark_comment: self.remark_comment,
            graded_by: self.graded_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionState;

    fn row(state: &str, submitted_at: i64) -> Model {
        Model {
            id: 7,
            task_code: "TSK-ABCD1234".into(),
            owner_id: 3,
            material_id: Some(1),
            task_name: "Week 1".into(),
            file_ref: "2024/01/a.pdf".into(),
            comment: None,
            remark: None,
            remark_comment: None,
            state: state.into(),
            submitted_at,
            graded_by: None,
            graded_at: None,
        }
    }

    #[test]
    fn test_into_submission_keeps_legacy_pending_state() {
        let submission = row("pending", 1_704_844_800).into_submission().unwrap();
        assert_eq!(submission.state, SubmissionState::Pending);
        assert_eq!(submission.task_id, 7);
    }

    #[test]
    fn test_into_submission_rejects_out_of_range_timestamp() {
        let err = row("late", i64::MAX).into_submission().unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    #[test]
    fn test_into_submission_rejects_unknown_state() {
        assert!(row("rejected", 0).into_submission().is_err());
    }
}
