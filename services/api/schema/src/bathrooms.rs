use sea_orm::entity::prelude::*;

/// A bathroom location. `rating` and `review_count` are derived from `reviews`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bathrooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub building: String,
    pub floor: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub is_accessible: bool,
    /// `male`, `female` or `all`.
    pub gender: String,
    pub created_by: Option<Uuid>,
    pub rating: f64,
    pub review_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
