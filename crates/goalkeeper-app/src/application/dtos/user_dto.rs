use serde::{Deserialize, Serialize};

use goalkeeper_domain::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub nickname: String,
    pub email: Option<String>,
    pub provider: String,
    pub total_streak: u32,
    pub last_check_date: Option<String>,
    pub level: u32,
    pub exp: u32,
    pub cash: i64,
    pub created_at: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            nickname: user.nickname().to_string(),
            email: user.email().map(str::to_string),
            provider: user.provider().as_str().to_string(),
            total_streak: user.total_streak(),
            last_check_date: user.last_check_date().map(|d| d.to_rfc3339()),
            level: user.level(),
            exp: user.exp(),
            cash: user.cash(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResultDto {
    pub user: UserDto,
    pub is_new_user: bool,
}
