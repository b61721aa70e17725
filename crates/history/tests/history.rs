use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement, Value};

use history::{
    Aggregator, DatabaseSource, HistoryConfig, HistoryError, LoadOptions, RawRecord, RecordScope,
    RecordSource, ResultHistory, RowRange, SourceKind, TransactionHistory, TransactionKind,
    fetch_source,
};
use migration::MigratorTrait;

async fn db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

async fn exec(db: &DatabaseConnection, sql: &str, values: Vec<Value>) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(backend, sql, values))
        .await
        .unwrap();
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
}

async fn deposit(db: &DatabaseConnection, id: &str, user: &str, amount: f64, when: DateTime<Utc>) {
    exec(
        db,
        "INSERT INTO deposits (id, user_id, payment_method, amount, status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
        vec![
            id.into(),
            user.into(),
            "baridimob".into(),
            amount.into(),
            "completed".into(),
            when.into(),
        ],
    )
    .await;
}

async fn withdrawal(
    db: &DatabaseConnection,
    id: &str,
    user: &str,
    amount: f64,
    status: &str,
    when: DateTime<Utc>,
) {
    exec(
        db,
        "INSERT INTO withdrawals (id, user_id, withdrawal_method, amount, status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
        vec![
            id.into(),
            user.into(),
            "ccp".into(),
            amount.into(),
            status.into(),
            when.into(),
        ],
    )
    .await;
}

async fn transfer(
    db: &DatabaseConnection,
    id: &str,
    sender: &str,
    recipient: &str,
    amount: f64,
    when: DateTime<Utc>,
) {
    exec(
        db,
        "INSERT INTO transfers (id, sender_id, recipient_id, sender_phone, recipient_phone, \
         transaction_number, amount, status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        vec![
            id.into(),
            sender.into(),
            recipient.into(),
            format!("phone-{sender}").into(),
            format!("phone-{recipient}").into(),
            format!("TRX-{id}").into(),
            amount.into(),
            "completed".into(),
            when.into(),
        ],
    )
    .await;
}

async fn gift_card(
    db: &DatabaseConnection,
    id: &str,
    used_by: Option<&str>,
    used_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
) {
    exec(
        db,
        "INSERT INTO gift_cards (id, card_code, amount, is_used, used_by, used_at, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        vec![
            id.into(),
            format!("CODE-{id}").into(),
            1000.0.into(),
            used_by.is_some().into(),
            used_by.map(ToString::to_string).into(),
            used_at.into(),
            created_at.into(),
        ],
    )
    .await;
}

async fn catalogs(db: &DatabaseConnection) {
    exec(
        db,
        "INSERT INTO betting_platforms (id, name) VALUES (?, ?)",
        vec!["p1".into(), "1xBet".into()],
    )
    .await;
    exec(
        db,
        "INSERT INTO game_platforms (id, name) VALUES (?, ?)",
        vec!["g1".into(), "Free Fire".into()],
    )
    .await;
    exec(
        db,
        "INSERT INTO digital_card_types (id, name) VALUES (?, ?)",
        vec!["c1".into(), "Google Play".into()],
    )
    .await;
}

async fn betting(
    db: &DatabaseConnection,
    id: &str,
    user: &str,
    platform: Option<&str>,
    transaction_type: &str,
    amount: Option<f64>,
    when: DateTime<Utc>,
) {
    exec(
        db,
        "INSERT INTO betting_transactions (id, user_id, platform_id, transaction_type, amount, \
         status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        vec![
            id.into(),
            user.into(),
            platform.map(ToString::to_string).into(),
            transaction_type.into(),
            amount.into(),
            "approved".into(),
            when.into(),
        ],
    )
    .await;
}

async fn game_topup(db: &DatabaseConnection, id: &str, user: &str, when: DateTime<Utc>) {
    exec(
        db,
        "INSERT INTO game_topup_orders (id, user_id, platform_id, amount, status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
        vec![
            id.into(),
            user.into(),
            "g1".into(),
            450.0.into(),
            "completed".into(),
            when.into(),
        ],
    )
    .await;
}

async fn digital_card(db: &DatabaseConnection, id: &str, user: &str, when: DateTime<Utc>) {
    exec(
        db,
        "INSERT INTO digital_card_orders (id, user_id, card_type_id, amount_usd, total_dzd, \
         status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        vec![
            id.into(),
            user.into(),
            "c1".into(),
            10.0.into(),
            2400.0.into(),
            "pending".into(),
            when.into(),
        ],
    )
    .await;
}

fn aggregator(db: &DatabaseConnection) -> Aggregator {
    Aggregator::from_database(db, HistoryConfig::default()).unwrap()
}

fn amounts(page: &history::HistoryPage) -> Vec<Decimal> {
    page.transactions.iter().map(|t| t.amount).collect()
}

/// Always fails, standing in for an unreachable collection.
struct OfflineSource(SourceKind);

#[async_trait]
impl RecordSource for OfflineSource {
    fn kind(&self) -> SourceKind {
        self.0
    }

    async fn fetch(&self, _scope: &RecordScope, _range: RowRange) -> ResultHistory<Vec<RawRecord>> {
        Err(HistoryError::source_failed(self.0, "connection reset"))
    }
}

#[tokio::test]
async fn deposits_withdrawal_and_transfer_merge_newest_first() {
    let db = db().await;
    deposit(&db, "d1", "alice", 100.0, at(1, 11)).await;
    deposit(&db, "d2", "alice", 200.0, at(1, 12)).await;
    withdrawal(&db, "w1", "alice", 50.0, "pending", at(1, 10)).await;
    transfer(&db, "t1", "alice", "bob", 30.0, at(1, 9)).await;

    let page = aggregator(&db)
        .collect("alice", &LoadOptions::default())
        .await
        .unwrap();

    assert_eq!(page.total_count, 4);
    assert_eq!(
        amounts(&page),
        vec![
            Decimal::from(200),
            Decimal::from(100),
            Decimal::from(-50),
            Decimal::from(-30)
        ]
    );
    let kinds: Vec<_> = page.transactions.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TransactionKind::Deposit,
            TransactionKind::Deposit,
            TransactionKind::Withdrawal,
            TransactionKind::TransferSent
        ]
    );
    assert_eq!(page.transactions[2].status, "pending");
    assert_eq!(
        page.transactions[3].reference_number.as_deref(),
        Some("TRX-t1")
    );
}

#[tokio::test]
async fn every_source_is_signed_by_kind() {
    let db = db().await;
    catalogs(&db).await;
    deposit(&db, "d1", "alice", -100.0, at(2, 8)).await;
    withdrawal(&db, "w1", "alice", 500.0, "approved", at(2, 9)).await;
    transfer(&db, "t1", "alice", "bob", 30.0, at(2, 10)).await;
    transfer(&db, "t2", "bob", "alice", 40.0, at(2, 11)).await;
    gift_card(&db, "gc1", Some("alice"), Some(at(2, 12)), at(1, 1)).await;
    betting(&db, "b1", "alice", Some("p1"), "deposit", Some(250.0), at(2, 13)).await;
    betting(&db, "b2", "alice", Some("p1"), "withdraw", Some(150.0), at(2, 14)).await;
    game_topup(&db, "gt1", "alice", at(2, 15)).await;
    digital_card(&db, "dc1", "alice", at(2, 16)).await;

    let page = aggregator(&db)
        .collect("alice", &LoadOptions::default())
        .await
        .unwrap();

    assert_eq!(page.total_count, 9);
    assert_eq!(page.transactions.len(), 9);
    assert!(
        page.transactions
            .windows(2)
            .all(|w| w[0].occurred_at >= w[1].occurred_at)
    );

    let by_id = |id: &str| {
        page.transactions
            .iter()
            .find(|t| t.id == id)
            .unwrap()
            .clone()
    };
    assert_eq!(by_id("d1").amount, Decimal::from(100));
    assert_eq!(by_id("w1").amount, Decimal::from(-500));
    assert_eq!(by_id("t1").kind, TransactionKind::TransferSent);
    assert_eq!(by_id("t1").amount, Decimal::from(-30));
    assert_eq!(by_id("t2").kind, TransactionKind::TransferReceived);
    assert_eq!(by_id("t2").amount, Decimal::from(40));
    assert_eq!(by_id("t2").description, "from phone-bob");
    assert_eq!(by_id("gc1").amount, Decimal::from(1000));
    assert_eq!(by_id("gc1").occurred_at, at(2, 12));
    assert_eq!(by_id("b1").amount, Decimal::from(-250));
    assert_eq!(by_id("b1").description, "deposit at 1xBet");
    assert_eq!(by_id("b2").amount, Decimal::from(150));
    assert_eq!(by_id("gt1").amount, Decimal::from(-450));
    assert_eq!(by_id("gt1").description, "top-up Free Fire");
    assert_eq!(by_id("dc1").amount, Decimal::from(-2400));
    assert_eq!(by_id("dc1").description, "Google Play order ($10)");
}

#[tokio::test]
async fn display_limit_keeps_total_count() {
    let db = db().await;
    for i in 0..5u32 {
        deposit(&db, &format!("d{i}"), "alice", 10.0, at(3, i)).await;
    }

    let aggregator = aggregator(&db);
    let page = aggregator
        .collect("alice", &LoadOptions::with_display_limit(2))
        .await
        .unwrap();
    assert_eq!(page.total_count, 5);
    assert_eq!(page.transactions.len(), 2);
    assert_eq!(page.transactions[0].id, "d4");
    assert_eq!(page.transactions[1].id, "d3");

    let page = aggregator
        .collect("alice", &LoadOptions::with_display_limit(50))
        .await
        .unwrap();
    assert_eq!(page.total_count, 5);
    assert_eq!(page.transactions.len(), 5);

    let page = aggregator
        .collect("alice", &LoadOptions::with_display_limit(0))
        .await
        .unwrap();
    assert_eq!(page.total_count, 5);
    assert!(page.transactions.is_empty());
}

#[tokio::test]
async fn identities_only_see_their_records() {
    let db = db().await;
    deposit(&db, "d-alice", "alice", 10.0, at(4, 1)).await;
    deposit(&db, "d-bob", "bob", 10.0, at(4, 2)).await;
    withdrawal(&db, "w-bob", "bob", 5.0, "pending", at(4, 3)).await;
    gift_card(&db, "gc-bob", Some("bob"), Some(at(4, 4)), at(4, 0)).await;
    gift_card(&db, "gc-unused", None, None, at(4, 0)).await;

    let aggregator = aggregator(&db);
    let alice = aggregator
        .collect("alice", &LoadOptions::default())
        .await
        .unwrap();
    let bob = aggregator
        .collect("bob", &LoadOptions::default())
        .await
        .unwrap();

    let alice_ids: Vec<_> = alice.transactions.iter().map(|t| t.id.as_str()).collect();
    let bob_ids: Vec<_> = bob.transactions.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(alice_ids, vec!["d-alice"]);
    assert_eq!(bob_ids, vec!["gc-bob", "w-bob", "d-bob"]);
}

#[tokio::test]
async fn id_collisions_across_kinds_are_kept() {
    let db = db().await;
    deposit(&db, "x1", "alice", 10.0, at(5, 1)).await;
    withdrawal(&db, "x1", "alice", 10.0, "approved", at(5, 2)).await;

    let page = aggregator(&db)
        .collect("alice", &LoadOptions::default())
        .await
        .unwrap();

    assert_eq!(page.total_count, 2);
    let keys: HashSet<_> = page
        .transactions
        .iter()
        .map(|t| (t.id.as_str(), t.kind))
        .collect();
    assert!(keys.contains(&("x1", TransactionKind::Deposit)));
    assert!(keys.contains(&("x1", TransactionKind::Withdrawal)));
}

#[tokio::test]
async fn one_failing_source_fails_the_whole_load() {
    let db = db().await;
    deposit(&db, "d1", "alice", 10.0, at(6, 1)).await;

    let mut builder = Aggregator::builder();
    for kind in SourceKind::ALL {
        let source: Arc<dyn RecordSource> = if kind == SourceKind::GameTopups {
            Arc::new(OfflineSource(kind))
        } else {
            Arc::new(DatabaseSource::new(db.clone(), kind))
        };
        builder = builder.source(source);
    }
    let aggregator = Arc::new(builder.build().unwrap());

    let err = aggregator
        .collect("alice", &LoadOptions::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        HistoryError::source_failed(SourceKind::GameTopups, "connection reset")
    );

    let history = TransactionHistory::new(aggregator);
    let snapshot = history.load(Some("alice"), LoadOptions::default()).await;
    assert!(snapshot.transactions.is_empty());
    assert_eq!(snapshot.total_count, 0);
    assert!(!snapshot.is_loading);
    assert!(snapshot.is_error());
}

#[tokio::test]
async fn chunked_fetch_matches_single_fetch() {
    let db = db().await;
    for i in 0..25 {
        let when = at(7, 0) + chrono::Duration::minutes(i);
        deposit(&db, &format!("d{i:02}"), "alice", 1.0, when).await;
    }

    let source = DatabaseSource::new(db.clone(), SourceKind::Deposits);
    let chunked = fetch_source(
        &source,
        "alice",
        &HistoryConfig {
            chunk_size: 10,
            max_rows_per_source: 100,
        },
    )
    .await
    .unwrap();
    let single = fetch_source(
        &source,
        "alice",
        &HistoryConfig {
            chunk_size: 100,
            max_rows_per_source: 100,
        },
    )
    .await
    .unwrap();

    assert_eq!(chunked.len(), 25);
    assert_eq!(chunked, single);
}

#[tokio::test]
async fn row_ceiling_keeps_newest_rows() {
    let db = db().await;
    for i in 0..12u32 {
        deposit(&db, &format!("d{i:02}"), "alice", 1.0, at(8, i)).await;
    }

    let aggregator = Aggregator::from_database(
        &db,
        HistoryConfig {
            chunk_size: 5,
            max_rows_per_source: 100,
        },
    )
    .unwrap();
    let page = aggregator
        .collect(
            "alice",
            &LoadOptions {
                display_limit: None,
                max_rows_per_source: Some(7),
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total_count, 7);
    assert_eq!(page.transactions[0].id, "d11");
    assert_eq!(page.transactions[6].id, "d05");
}

#[tokio::test]
async fn gift_card_without_used_at_uses_created_at() {
    let db = db().await;
    gift_card(&db, "gc1", Some("alice"), None, at(9, 7)).await;

    let page = aggregator(&db)
        .collect("alice", &LoadOptions::default())
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.transactions[0].kind, TransactionKind::GiftCard);
    assert_eq!(page.transactions[0].occurred_at, at(9, 7));
}

#[tokio::test]
async fn gift_card_ceiling_keeps_latest_effective_time() {
    let db = db().await;
    gift_card(&db, "gc-old", Some("alice"), Some(at(9, 3)), at(9, 1)).await;
    gift_card(&db, "gc-new", Some("alice"), None, at(9, 5)).await;

    let page = aggregator(&db)
        .collect(
            "alice",
            &LoadOptions {
                display_limit: None,
                max_rows_per_source: Some(1),
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.transactions[0].id, "gc-new");
    assert_eq!(page.transactions[0].occurred_at, at(9, 5));
}

#[tokio::test]
async fn malformed_rows_are_coerced() {
    let db = db().await;
    catalogs(&db).await;
    betting(&db, "b1", "alice", None, "deposit", None, at(10, 1)).await;

    let page = aggregator(&db)
        .collect("alice", &LoadOptions::default())
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.transactions[0].amount, Decimal::ZERO);
    assert_eq!(page.transactions[0].description, "deposit at unknown platform");
}

#[tokio::test]
async fn history_without_identity_is_empty() {
    let db = db().await;
    deposit(&db, "d1", "alice", 10.0, at(11, 1)).await;

    let history = TransactionHistory::new(Arc::new(aggregator(&db)));
    let snapshot = history.load(None, LoadOptions::default()).await;
    assert!(snapshot.transactions.is_empty());
    assert_eq!(snapshot.total_count, 0);
    assert!(!snapshot.is_loading);
    assert!(!snapshot.is_error());

    let snapshot = history.load(Some("alice"), LoadOptions::default()).await;
    assert_eq!(snapshot.total_count, 1);

    deposit(&db, "d2", "alice", 10.0, at(11, 2)).await;
    let snapshot = history.refetch().await;
    assert_eq!(snapshot.total_count, 2);
    assert_eq!(snapshot.transactions[0].id, "d2");
}

#[tokio::test]
async fn duplicate_sources_are_rejected() {
    let db = db().await;
    let err = Aggregator::builder()
        .database(&db)
        .source(Arc::new(DatabaseSource::new(db.clone(), SourceKind::Deposits)))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        HistoryError::InvalidConfig("deposits source registered more than once".to_string())
    );
}
