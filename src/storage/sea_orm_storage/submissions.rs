//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions, Model};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    submissions::{
        entities::Submission,
        requests::{NewSubmission, SubmissionGrade, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(&self, submission: NewSubmission) -> Result<Submission> {
        let model = ActiveModel {
            task_code: Set(submission.task_code),
            owner_id: Set(submission.owner_id),
            material_id: Set(Some(submission.material_id)),
            task_name: Set(submission.task_name),
            file_ref: Set(submission.file_ref),
            comment: Set(submission.comment),
            state: Set(submission.state.to_string()),
            submitted_at: Set(submission.submitted_at.timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建提交失败: {e}")))?;

        result.into_submission()
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交失败: {e}")))?;

        result.map(Model::into_submission).transpose()
    }

    /// 分页列出提交
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let (page, size) = PaginationQuery::normalize(query.page, query.size);

        let mut select = Submissions::find();

        if let Some(material_id) = query.material_id {
            select = select.filter(Column::MaterialId.eq(material_id));
        }
        if let Some(owner_id) = query.owner_id {
            select = select.filter(Column::OwnerId.eq(owner_id));
        }
        if let Some(state) = query.state {
            select = select.filter(Column::State.eq(state.to_string()));
        }

        let paginator = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交总数失败: {e}")))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(SubmissionListResponse {
            items: submissions
                .into_iter()
                .map(Model::into_submission)
                .collect::<Result<Vec<_>>>()?,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 列出用户的全部提交
    pub async fn list_user_submissions_impl(&self, owner_id: i64) -> Result<Vec<Submission>> {
        let submissions = Submissions::find()
            .filter(Column::OwnerId.eq(owner_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询用户提交失败: {e}")))?;

        submissions.into_iter().map(Model::into_submission).collect()
    }

    /// 写入评分
    pub async fn grade_submission_impl(
        &self,
        id: i64,
        grade: SubmissionGrade,
    ) -> Result<Option<Submission>> {
        if self.get_submission_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            remark: Set(Some(grade.remark)),
            remark_comment: Set(grade.remark_comment),
            graded_by: Set(Some(grade.graded_by)),
            graded_at: Set(Some(grade.graded_at.timestamp())),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("写入评分失败: {e}")))?;

        self.get_submission_by_id_impl(id).await
    }

    /// 删除提交
    pub async fn delete_submission_impl(&self, id: i64) -> Result<bool> {
        let result = Submissions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
