use sea_orm::entity::prelude::*;

/// Append-only audit record of a raw badge action. Device columns are
/// nullable so anonymous triggers still leave a trail.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_type_id: i32,
    pub device_id: Option<String>,
    pub device_mac: Option<String>,
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
