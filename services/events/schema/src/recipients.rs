use sea_orm::entity::prelude::*;

/// Bulk-imported, ticketed award attendee.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub award_event_id: Uuid,
    pub name: String,
    pub follower_count: i64,
    #[sea_orm(unique)]
    pub token: String,
    /// `generated` or `redeemed`.
    pub status: String,
    pub redeemed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::award_events::Entity",
        from = "Column::AwardEventId",
        to = "super::award_events::Column::Id",
        on_delete = "Cascade"
    )]
    AwardEvent,
}

impl Related<super::award_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AwardEvent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
