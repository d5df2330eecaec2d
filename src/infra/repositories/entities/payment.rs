//! Payment ledger database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::PaymentRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_email: String,
    pub amount: f64,
    #[sea_orm(unique)]
    pub transaction_id: String,
    pub date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PaymentRecord {
    fn from(model: Model) -> Self {
        PaymentRecord {
            id: model.id,
            user_email: model.user_email,
            amount: model.amount,
            transaction_id: model.transaction_id,
            date: model.date,
        }
    }
}
