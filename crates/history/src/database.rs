//! sea-orm backed record sources.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{Condition, QueryFilter, QueryOrder, QuerySelect, prelude::*, sea_query::Expr};

use crate::{
    HistoryError, RawRecord, RecordScope, RecordSource, ResultHistory, RowRange, SourceKind,
    betting, deposits, digital_cards, game_topups, gift_cards, transfers, withdrawals,
};

/// Reads one source collection from the wallet database.
#[derive(Clone, Debug)]
pub struct DatabaseSource {
    database: DatabaseConnection,
    kind: SourceKind,
}

impl DatabaseSource {
    pub fn new(database: DatabaseConnection, kind: SourceKind) -> Self {
        Self { database, kind }
    }

    /// One source per collection, all sharing `database`.
    pub fn all(database: &DatabaseConnection) -> Vec<Arc<dyn RecordSource>> {
        SourceKind::ALL
            .into_iter()
            .map(|kind| Arc::new(Self::new(database.clone(), kind)) as Arc<dyn RecordSource>)
            .collect()
    }

    fn condition(&self, scope: &RecordScope) -> ResultHistory<Condition> {
        let id = scope.identity();
        let condition = match (self.kind, scope) {
            (SourceKind::Deposits, RecordScope::Owner(_)) => {
                Condition::all().add(deposits::Column::UserId.eq(id))
            }
            (SourceKind::Withdrawals, RecordScope::Owner(_)) => {
                Condition::all().add(withdrawals::Column::UserId.eq(id))
            }
            (SourceKind::Betting, RecordScope::Owner(_)) => {
                Condition::all().add(betting::Column::UserId.eq(id))
            }
            (SourceKind::GameTopups, RecordScope::Owner(_)) => {
                Condition::all().add(game_topups::Column::UserId.eq(id))
            }
            (SourceKind::DigitalCards, RecordScope::Owner(_)) => {
                Condition::all().add(digital_cards::Column::UserId.eq(id))
            }
            (SourceKind::Transfers, RecordScope::SenderOrRecipient(_)) => Condition::any()
                .add(transfers::Column::SenderId.eq(id))
                .add(transfers::Column::RecipientId.eq(id)),
            (SourceKind::GiftCards, RecordScope::Redeemer(_)) => Condition::all()
                .add(gift_cards::Column::UsedBy.eq(id))
                .add(gift_cards::Column::IsUsed.eq(true)),
            (kind, scope) => {
                return Err(HistoryError::source_failed(
                    kind,
                    format!("unsupported scope {scope:?}"),
                ));
            }
        };
        Ok(condition)
    }
}

#[async_trait]
impl RecordSource for DatabaseSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, scope: &RecordScope, range: RowRange) -> ResultHistory<Vec<RawRecord>> {
        let condition = self.condition(scope)?;
        let db = &self.database;

        let records: Vec<RawRecord> = match self.kind {
            SourceKind::Deposits => deposits::Entity::find()
                .filter(condition)
                .order_by_desc(deposits::Column::CreatedAt)
                .order_by_desc(deposits::Column::Id)
                .offset(range.offset)
                .limit(range.limit)
                .all(db)
                .await?
                .into_iter()
                .map(|m| RawRecord::Deposit(m.into()))
                .collect(),
            SourceKind::Withdrawals => withdrawals::Entity::find()
                .filter(condition)
                .order_by_desc(withdrawals::Column::CreatedAt)
                .order_by_desc(withdrawals::Column::Id)
                .offset(range.offset)
                .limit(range.limit)
                .all(db)
                .await?
                .into_iter()
                .map(|m| RawRecord::Withdrawal(m.into()))
                .collect(),
            SourceKind::Transfers => transfers::Entity::find()
                .filter(condition)
                .order_by_desc(transfers::Column::CreatedAt)
                .order_by_desc(transfers::Column::Id)
                .offset(range.offset)
                .limit(range.limit)
                .all(db)
                .await?
                .into_iter()
                .map(|m| RawRecord::Transfer(m.into()))
                .collect(),
            SourceKind::GiftCards => gift_cards::Entity::find()
                .filter(condition)
                .order_by_desc(Expr::cust("COALESCE(used_at, created_at)"))
                .order_by_desc(gift_cards::Column::Id)
                .offset(range.offset)
                .limit(range.limit)
                .all(db)
                .await?
                .into_iter()
                .map(|m| RawRecord::GiftCard(m.into()))
                .collect(),
            SourceKind::Betting => betting::Entity::find()
                .find_also_related(betting::platforms::Entity)
                .filter(condition)
                .order_by_desc(betting::Column::CreatedAt)
                .order_by_desc(betting::Column::Id)
                .offset(range.offset)
                .limit(range.limit)
                .all(db)
                .await?
                .into_iter()
                .map(|row| RawRecord::Betting(row.into()))
                .collect(),
            SourceKind::GameTopups => game_topups::Entity::find()
                .find_also_related(game_topups::platforms::Entity)
                .filter(condition)
                .order_by_desc(game_topups::Column::CreatedAt)
                .order_by_desc(game_topups::Column::Id)
                .offset(range.offset)
                .limit(range.limit)
                .all(db)
                .await?
                .into_iter()
                .map(|row| RawRecord::GameTopup(row.into()))
                .collect(),
            SourceKind::DigitalCards => digital_cards::Entity::find()
                .find_also_related(digital_cards::card_types::Entity)
                .filter(condition)
                .order_by_desc(digital_cards::Column::CreatedAt)
                .order_by_desc(digital_cards::Column::Id)
                .offset(range.offset)
                .limit(range.limit)
                .all(db)
                .await?
                .into_iter()
                .map(|row| RawRecord::DigitalCard(row.into()))
                .collect(),
        };

        Ok(records)
    }
}
