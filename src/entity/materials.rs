//! 课程资料实体

use sea_orm::entity::prelude::*;

use crate::errors::{LmsError, Result as LmsResult};
use crate::utils::timestamp::{from_unix, from_unix_opt};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub kind: String,
    pub reference: String,
    pub deadline: Option<i64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub max_score: Option<f64>,
    pub late_accepted: bool,
    pub created_by: i64,
    pub uploaded_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_material(self) -> LmsResult<crate::models::materials::entities::Material> {
        use crate::models::materials::entities::{Material, MaterialKind};

        Ok(Material {
            kind: self
                .kind
                .parse::<MaterialKind>()
                .map_err(LmsError::serialization)?,
            deadline: from_unix_opt(self.deadline)?,
            uploaded_at: from_unix(self.uploaded_at)?,
            updated_at: from_unix(self.updated_at)?,
            id: self.id,
            title: self.title,
            description: self.description,
            reference: self.reference,
            max_score: self.max_score,
            late_accepted: self.late_accepted,
            created_by: self.created_by,
        })
    }
}
