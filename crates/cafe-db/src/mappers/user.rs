//! User model -> entity mapper

use cafe_core::entities::User;
use cafe_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            name: model.name,
            surname: model.surname,
            nickname: model.nickname,
            email: model.email,
            avatar_path: model.avatar_path,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
