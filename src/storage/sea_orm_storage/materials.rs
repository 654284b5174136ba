//! 课程资料存储操作

use super::SeaOrmStorage;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials, Model};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    materials::{
        entities::Material,
        requests::{MaterialChanges, MaterialListQuery, NewMaterial},
        responses::MaterialListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建资料
    pub async fn create_material_impl(&self, material: NewMaterial) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(material.title),
            description: Set(material.description),
            kind: Set(material.kind.to_string()),
            reference: Set(material.reference),
            deadline: Set(material.deadline.map(|d| d.timestamp())),
            max_score: Set(material.max_score),
            late_accepted: Set(material.late_accepted),
            created_by: Set(material.created_by),
            uploaded_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建资料失败: {e}")))?;

        result.into_material()
    }

    /// 通过 ID 获取资料
    pub async fn get_material_by_id_impl(&self, id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询资料失败: {e}")))?;

        result.map(Model::into_material).transpose()
    }

    /// 分页列出资料
    pub async fn list_materials_with_pagination_impl(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse> {
        let (page, size) = PaginationQuery::normalize(query.page, query.size);

        let mut select = Materials::find();

        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            select = select.filter(Column::Title.like(contains_pattern(search)));
        }

        if let Some(created_by) = query.created_by {
            select = select.filter(Column::CreatedBy.eq(created_by));
        }

        let paginator = select
            .order_by_desc(Column::UploadedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("查询资料总数失败: {e}")))?;

        let materials = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询资料列表失败: {e}")))?;

        Ok(MaterialListResponse {
            items: materials
                .into_iter()
                .map(Model::into_material)
                .collect::<Result<Vec<_>>>()?,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 列出全部资料，最新上传在前
    pub async fn list_all_materials_impl(&self) -> Result<Vec<Material>> {
        let materials = Materials::find()
            .order_by_desc(Column::UploadedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询资料列表失败: {e}")))?;

        materials.into_iter().map(Model::into_material).collect()
    }

    /// 更新资料
    pub async fn update_material_impl(
        &self,
        id: i64,
        changes: MaterialChanges,
    ) -> Result<Option<Material>> {
        if self.get_material_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = changes.title {
            model.title = Set(title);
        }
        if let Some(description) = changes.description {
            model.description = Set(description);
        }
        if let Some(kind) = changes.kind {
            model.kind = Set(kind.to_string());
        }
        if let Some(reference) = changes.reference {
            model.reference = Set(reference);
        }
        if let Some(deadline) = changes.deadline {
            model.deadline = Set(deadline.map(|d| d.timestamp()));
        }
        if let Some(max_score) = changes.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(late_accepted) = changes.late_accepted {
            model.late_accepted = Set(late_accepted);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新资料失败: {e}")))?;

        self.get_material_by_id_impl(id).await
    }

    /// 删除资料，提交记录保留并清空资料引用
    pub async fn delete_material_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LmsError::database_operation(format!("开启事务失败: {e}")))?;

        Submissions::update_many()
            .col_expr(
                SubmissionColumn::MaterialId,
                Expr::value(Option::<i64>::None),
            )
            .filter(SubmissionColumn::MaterialId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("解除提交引用失败: {e}")))?;

        let result = Materials::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除资料失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
