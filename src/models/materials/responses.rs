use super::entities::Material;
use crate::models::PaginatedResponse;

pub type MaterialListResponse = PaginatedResponse<Material>;
