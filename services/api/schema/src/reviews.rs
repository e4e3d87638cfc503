use sea_orm::entity::prelude::*;

/// A user's review of a bathroom.
///
/// Either `rating` is set, or all of `cleanliness`, `privacy` and `accessibility` are.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub bathroom_id: Uuid,
    pub user_id: Uuid,
    pub rating: Option<i16>,
    pub cleanliness: Option<i16>,
    pub privacy: Option<i16>,
    pub accessibility: Option<i16>,
    pub best_for: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bathrooms::Entity",
        from = "Column::BathroomId",
        to = "super::bathrooms::Column::Id",
        on_delete = "Cascade"
    )]
    Bathroom,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::bathrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bathroom.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
