use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::db_err;
use crate::domain::{DomainError, DomainResult, NewVehicle, Vehicle, VehicleQuery, VehicleRepository};
use crate::infrastructure::database::entities::vehicle;

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: vehicle::Model) -> Vehicle {
    Vehicle {
        id: model.id,
        brand: model.brand,
        model: model.model,
        year: model.year,
    }
}

/// `%needle%` with LIKE wildcards in the needle escaped, ASCII-lowercased to
/// match against SQLite's ASCII-only `lower(column)`.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_ascii_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn contains_ignore_case(column: vehicle::Column, needle: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(contains_pattern(needle)).escape('\\'))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn create(&self, dto: NewVehicle) -> DomainResult<Vehicle> {
        let new_vehicle = vehicle::ActiveModel {
            brand: Set(dto.brand),
            model: Set(dto.model),
            year: Set(dto.year),
            ..Default::default()
        };

        let model = new_vehicle.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn list(&self, query: VehicleQuery) -> DomainResult<Vec<Vehicle>> {
        let mut select = vehicle::Entity::find();

        if let Some(brand) = query.brand_filter() {
            select = select.filter(contains_ignore_case(vehicle::Column::Brand, brand));
        }
        if let Some(model) = query.model_filter() {
            select = select.filter(contains_ignore_case(vehicle::Column::Model, model));
        }

        select = select.order_by_asc(vehicle::Column::Id);

        if let Some((offset, limit)) = query.page.window() {
            select = select.offset(offset).limit(limit);
        }

        let models = select.all(&self.db).await.map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn update(&self, dto: &Vehicle) -> DomainResult<Vehicle> {
        let existing = vehicle::Entity::find_by_id(dto.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(DomainError::NotFound {
                entity: "Vehicle",
                id: dto.id,
            })?;

        let mut active: vehicle::ActiveModel = existing.into();
        active.brand = Set(dto.brand.clone());
        active.model = Set(dto.model.clone());
        active.year = Set(dto.year);

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn delete(&self, dto: &Vehicle) -> DomainResult<()> {
        let existing = vehicle::Entity::find_by_id(dto.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                id: dto.id,
            });
        };

        existing.delete(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
