use super::entities::User;
use crate::models::PaginatedResponse;

// 用户列表响应
pub type UserListResponse = PaginatedResponse<User>;
