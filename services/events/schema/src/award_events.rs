use sea_orm::entity::prelude::*;

/// Standalone voting ceremony with its own branding, categories and nominees.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "award_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub header_image: Option<String>,
    /// Ordered JSON array of sponsor image URLs.
    pub sponsor_images: Json,
    /// Index into `sponsor_images` of the digital media sponsor, if any.
    pub digital_media_sponsor_index: Option<i32>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::categories::Entity")]
    Categories,
    #[sea_orm(has_many = "super::nominees::Entity")]
    Nominees,
    #[sea_orm(has_many = "super::recipients::Entity")]
    Recipients,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::nominees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Nominees.def()
    }
}

impl Related<super::recipients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
