use uuid::Uuid;

use super::tags::{entity_tags, list_tags, Tag, TagKind};
use super::{AdminApi, Endpoint};
use crate::error::Result;
use crate::schema::{Page, User, UserQuery, UserRole, UserRoleBody};

impl AdminApi {
    pub async fn users(&self, filters: &UserQuery) -> Result<Page<User>> {
        let endpoint = Endpoint::get("getUsers", "/users").query(filters)?;
        self.query(endpoint, |page: &Page<User>| list_tags(TagKind::User, page.items.iter().map(|u| &u.id)))
            .await
    }

    pub async fn user(&self, id: Uuid) -> Result<User> {
        self.query(Endpoint::get("getUser", format!("/users/{id}")), |u: &User| vec![Tag::id(TagKind::User, u.id)])
            .await
    }

    pub async fn update_user_role(&self, id: Uuid, role: UserRole) -> Result<User> {
        let endpoint = Endpoint::patch("updateUserRole", format!("/users/{id}/role"))
            .invalidates(entity_tags(TagKind::User, id));
        self.command(endpoint, Some(&UserRoleBody { role })).await
    }
}
