use sea_orm::entity::prelude::*;

/// Votable contest. Exactly one of `event_id` (attendance flow) or
/// `award_event_id` (award flow) is set.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub event_id: Option<Uuid>,
    pub award_event_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub show_results: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id",
        on_delete = "Cascade"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::award_events::Entity",
        from = "Column::AwardEventId",
        to = "super::award_events::Column::Id",
        on_delete = "Cascade"
    )]
    AwardEvent,
    #[sea_orm(has_many = "super::votes::Entity")]
    Votes,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::award_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AwardEvent.def()
    }
}

impl Related<super::votes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
