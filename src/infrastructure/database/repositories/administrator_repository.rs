use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::{db_err, is_unique_violation};
use crate::domain::{
    Administrator, AdministratorRepository, DomainError, DomainResult, NewAdministrator, Role,
};
use crate::infrastructure::database::entities::administrator;
use crate::shared::PageRequest;

pub struct SeaOrmAdministratorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAdministratorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: administrator::Model) -> DomainResult<Administrator> {
    let role: Role = model.role.parse().map_err(|e| {
        DomainError::Persistence(format!("administrator {} has {}", model.id, e))
    })?;

    Ok(Administrator {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        role,
    })
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AdministratorRepository for SeaOrmAdministratorRepository {
    async fn create(&self, dto: NewAdministrator) -> DomainResult<Administrator> {
        let role = dto.role.unwrap_or_default();

        let new_admin = administrator::ActiveModel {
            email: Set(dto.email.clone()),
            password_hash: Set(dto.password_hash),
            role: Set(role.as_str().to_string()),
            ..Default::default()
        };

        let model = new_admin.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict(format!("Administrator with email '{}'", dto.email))
            } else {
                db_err(e)
            }
        })?;

        model_to_domain(model)
    }

    async fn list(&self, page: PageRequest) -> DomainResult<Vec<Administrator>> {
        let mut query = administrator::Entity::find().order_by_asc(administrator::Column::Id);

        if let Some((offset, limit)) = page.window() {
            query = query.offset(offset).limit(limit);
        }

        let models = query.all(&self.db).await.map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Administrator>> {
        let model = administrator::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(model_to_domain).transpose()
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Administrator>> {
        let model = administrator::Entity::find()
            .filter(administrator::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(model_to_domain).transpose()
    }

    async fn count(&self) -> DomainResult<u64> {
        administrator::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;

    fn new_admin(email: &str, role: Option<Role>) -> NewAdministrator {
        NewAdministrator {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_defaults_role() {
        let repo = SeaOrmAdministratorRepository::new(test_database().await);

        let created = repo.create(new_admin("ed@fleet.io", None)).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.role, Role::Editor);

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_by_id(created.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = SeaOrmAdministratorRepository::new(test_database().await);

        repo.create(new_admin("adm@fleet.io", Some(Role::Admin)))
            .await
            .unwrap();
        let err = repo
            .create(new_admin("adm@fleet.io", Some(Role::Editor)))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_by_email_and_paginated_list() {
        let repo = SeaOrmAdministratorRepository::new(test_database().await);
        for i in 0..15 {
            repo.create(new_admin(&format!("user{i}@fleet.io"), None))
                .await
                .unwrap();
        }

        let found = repo.find_by_email("user3@fleet.io").await.unwrap().unwrap();
        assert_eq!(found.email, "user3@fleet.io");
        assert!(repo.find_by_email("nobody@fleet.io").await.unwrap().is_none());

        assert_eq!(repo.list(PageRequest::page(1)).await.unwrap().len(), 10);
        let second = repo.list(PageRequest::page(2)).await.unwrap();
        assert_eq!(second.len(), 5);
        assert_eq!(second[0].email, "user10@fleet.io");
        assert_eq!(repo.list(PageRequest::all()).await.unwrap().len(), 15);
        assert!(repo.list(PageRequest::page(3)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn huge_page_is_empty() {
        let repo = SeaOrmAdministratorRepository::new(test_database().await);
        repo.create(new_admin("adm@fleet.io", Some(Role::Admin)))
            .await
            .unwrap();

        assert!(repo
            .list(PageRequest::page(1_000_000_000_000_000_000))
            .await
            .unwrap()
            .is_empty());
        assert!(repo.list(PageRequest::page(u64::MAX)).await.unwrap().is_empty());
    }
}
