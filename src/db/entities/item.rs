use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Integer")]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_date: DateTimeUtc,
    pub modified_date: Option<DateTimeUtc>,
    pub completed_date: Option<DateTimeUtc>,
    #[sea_orm(default_value = true)]
    pub is_active: bool,
}

impl ActiveModelBehavior for ActiveModel {}
