use finboard_core::transactions::TransactionQuery;
use finboard_server::{
    build_state,
    config::Config,
    seed::{self, SeedOptions},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

#[tokio::test]
async fn seeding_fills_an_empty_database_once() {
    let dir = tempdir().unwrap();
    let config = Config {
        db_path: dir.path().join("seed.db").to_string_lossy().to_string(),
        jwt_secret: Some(vec![1u8; 32]),
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let options = SeedOptions {
        transactions: 40,
        reset: false,
    };
    let report = seed::run(&state, &options, &mut rng).await.unwrap();
    assert_eq!(report.categories.len(), 15);
    assert_eq!(report.transactions_created, 40);
    assert_eq!(report.budgets_created, 10);
    assert_eq!(report.summary.transaction_count, 40);

    // Refuses to run twice without a reset
    assert!(seed::run(&state, &options, &mut rng).await.is_err());

    let reset = SeedOptions {
        transactions: 10,
        reset: true,
    };
    let report = seed::run(&state, &reset, &mut rng).await.unwrap();
    assert_eq!(report.summary.transaction_count, 10);
    let listed = state
        .transaction_service
        .get_transactions(TransactionQuery::default())
        .unwrap();
    assert_eq!(listed.len(), 10);
}
