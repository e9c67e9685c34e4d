use sea_orm::entity::prelude::*;

/// One recorded vote. Immutable once inserted.
///
/// `(uniqueness_key, voter_phone)` carries a unique index: `uniqueness_key` is
/// `event:<owner id>` or `category:<category id>` depending on the voting flow.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category_id: Uuid,
    /// Owner of the category (event or award event id).
    pub event_id: Uuid,
    /// Nominee id (award flow) or attendee id (attendance flow).
    pub nominee_id: Uuid,
    pub voter_phone: String,
    pub voter_name: Option<String>,
    pub weight: Option<i32>,
    pub uniqueness_key: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
