//! Integration tests for the reconciliation service against a real store.

use reparr::db::Store;
use reparr::models::media::MediaState;
use reparr::parser::{VersionResolver, VersionRule};
use reparr::services::{ReconcileService, SeaOrmReconcileService};
use std::path::{Path, PathBuf};

async fn temp_store() -> (Store, PathBuf) {
    let db_path = std::env::temp_dir().join(format!("reparr-test-{}.db", uuid::Uuid::new_v4()));
    let store = Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store");
    (store, db_path)
}

fn cleanup(db_path: &Path) {
    std::fs::remove_file(db_path).ok();
}

fn resolver_4k_1080p() -> VersionResolver {
    VersionResolver::new(
        vec![
            VersionRule::new("4K", vec!["2160p".to_string(), "4K".to_string()]),
            VersionRule::new("1080p", vec!["1080p".to_string()]),
        ],
        "SD",
    )
}

#[tokio::test]
async fn reconcile_updates_drifted_record() {
    let (store, db_path) = temp_store().await;
    let id = store
        .insert_media(
            "Show",
            Some("Show.S01E01.1080p.mkv"),
            Some("4K"),
            MediaState::Collected,
        )
        .await
        .unwrap();

    let service = SeaOrmReconcileService::new(store.clone(), resolver_4k_1080p());
    let summary = service.reconcile(false).await.unwrap();

    assert_eq!(summary.examined, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.changes.len(), 1);
    assert_eq!(summary.changes[0].stored.as_deref(), Some("4K"));
    assert_eq!(summary.changes[0].resolved, "1080p");

    let record = store.get_media(id).await.unwrap().unwrap();
    assert_eq!(record.version.as_deref(), Some("1080p"));
    assert!(record.last_updated.is_some());

    cleanup(&db_path);
}

#[tokio::test]
async fn reconcile_is_idempotent() {
    let (store, db_path) = temp_store().await;
    store
        .insert_media(
            "Show",
            Some("Show.S01E01.1080p.mkv"),
            Some("4K"),
            MediaState::Collected,
        )
        .await
        .unwrap();
    store
        .insert_media(
            "Movie",
            Some("Movie.2023.2160p.HDR.mkv"),
            None,
            MediaState::Collected,
        )
        .await
        .unwrap();

    let service = SeaOrmReconcileService::new(store.clone(), resolver_4k_1080p());

    let first = service.reconcile(false).await.unwrap();
    assert_eq!(first.updated, 2);

    let second = service.reconcile(false).await.unwrap();
    assert_eq!(second.examined, 2);
    assert_eq!(second.updated, 0);
    assert!(second.changes.is_empty());

    cleanup(&db_path);
}

#[tokio::test]
async fn reconcile_leaves_agreeing_record_untouched() {
    let (store, db_path) = temp_store().await;
    let id = store
        .insert_media(
            "Show",
            Some("Show.S01E01.1080p.mkv"),
            Some("1080p"),
            MediaState::Collected,
        )
        .await
        .unwrap();

    let service = SeaOrmReconcileService::new(store.clone(), resolver_4k_1080p());
    let summary = service.reconcile(false).await.unwrap();

    assert_eq!(summary.examined, 1);
    assert_eq!(summary.updated, 0);

    // Untouched means no write at all, not just the same value.
    let record = store.get_media(id).await.unwrap().unwrap();
    assert!(record.last_updated.is_none());

    cleanup(&db_path);
}

#[tokio::test]
async fn reconcile_ignores_records_outside_collected() {
    let (store, db_path) = temp_store().await;
    let id = store
        .insert_media(
            "Wanted Show",
            Some("Wanted.Show.1080p.mkv"),
            Some("4K"),
            MediaState::Wanted,
        )
        .await
        .unwrap();

    let service = SeaOrmReconcileService::new(store.clone(), resolver_4k_1080p());
    let summary = service.reconcile(false).await.unwrap();

    assert_eq!(summary.examined, 0);
    assert_eq!(summary.updated, 0);

    let record = store.get_media(id).await.unwrap().unwrap();
    assert_eq!(record.version.as_deref(), Some("4K"));

    cleanup(&db_path);
}

#[tokio::test]
async fn reconcile_skips_records_without_filename() {
    let (store, db_path) = temp_store().await;
    let id = store
        .insert_media("No File", None, Some("4K"), MediaState::Collected)
        .await
        .unwrap();

    let service = SeaOrmReconcileService::new(store.clone(), resolver_4k_1080p());
    let summary = service.reconcile(false).await.unwrap();

    assert_eq!(summary.examined, 1);
    assert_eq!(summary.updated, 0);

    let record = store.get_media(id).await.unwrap().unwrap();
    assert_eq!(record.version.as_deref(), Some("4K"));

    cleanup(&db_path);
}

#[tokio::test]
async fn reconcile_applies_default_when_no_rule_matches() {
    let (store, db_path) = temp_store().await;
    let id = store
        .insert_media(
            "Movie",
            Some("Movie.2023.720p.mkv"),
            None,
            MediaState::Collected,
        )
        .await
        .unwrap();

    let service = SeaOrmReconcileService::new(store.clone(), resolver_4k_1080p());
    let summary = service.reconcile(false).await.unwrap();

    assert_eq!(summary.updated, 1);

    let record = store.get_media(id).await.unwrap().unwrap();
    assert_eq!(record.version.as_deref(), Some("SD"));

    cleanup(&db_path);
}

#[tokio::test]
async fn dry_run_persists_nothing() {
    let (store, db_path) = temp_store().await;
    let id = store
        .insert_media(
            "Show",
            Some("Show.S01E01.1080p.mkv"),
            Some("4K"),
            MediaState::Collected,
        )
        .await
        .unwrap();

    let service = SeaOrmReconcileService::new(store.clone(), resolver_4k_1080p());
    let summary = service.reconcile(true).await.unwrap();

    assert_eq!(summary.updated, 1);
    assert_eq!(summary.changes.len(), 1);

    let record = store.get_media(id).await.unwrap().unwrap();
    assert_eq!(record.version.as_deref(), Some("4K"));

    // The real pass afterwards still sees the drift.
    let applied = service.reconcile(false).await.unwrap();
    assert_eq!(applied.updated, 1);

    cleanup(&db_path);
}

#[tokio::test]
async fn report_resolves_versions() {
    let (store, db_path) = temp_store().await;
    store
        .insert_media(
            "Alpha",
            Some("Alpha.2160p.mkv"),
            Some("4K"),
            MediaState::Collected,
        )
        .await
        .unwrap();
    store
        .insert_media(
            "Beta",
            Some("Beta.720p.mkv"),
            None,
            MediaState::Collected,
        )
        .await
        .unwrap();

    let service = SeaOrmReconcileService::new(store.clone(), resolver_4k_1080p());
    let rows = service.report(false, 1, 100).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "Alpha");
    assert_eq!(rows[0].resolved_version, "4K");
    assert!(!rows[0].has_drift());
    assert_eq!(rows[1].title, "Beta");
    assert_eq!(rows[1].resolved_version, "SD");
    assert!(rows[1].has_drift());

    cleanup(&db_path);
}

#[tokio::test]
async fn unclassified_report_excludes_matching_filenames() {
    let (store, db_path) = temp_store().await;
    store
        .insert_media(
            "Classified",
            Some("Classified.1080p.mkv"),
            Some("1080p"),
            MediaState::Collected,
        )
        .await
        .unwrap();
    store
        .insert_media(
            "Mystery",
            Some("Mystery.720p.mkv"),
            None,
            MediaState::Collected,
        )
        .await
        .unwrap();
    store
        .insert_media("No File", None, None, MediaState::Collected)
        .await
        .unwrap();

    let service = SeaOrmReconcileService::new(store.clone(), resolver_4k_1080p());
    let rows = service.report(true, 1, 100).await.unwrap();

    let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Mystery", "No File"]);

    cleanup(&db_path);
}

#[tokio::test]
async fn report_paginates_by_title() {
    let (store, db_path) = temp_store().await;
    for title in ["Charlie", "Alpha", "Beta"] {
        let file = format!("{title}.1080p.mkv");
        store
            .insert_media(title, Some(file.as_str()), Some("1080p"), MediaState::Collected)
            .await
            .unwrap();
    }

    let service = SeaOrmReconcileService::new(store.clone(), resolver_4k_1080p());

    let page1 = service.report(false, 1, 2).await.unwrap();
    let page2 = service.report(false, 2, 2).await.unwrap();

    assert_eq!(page1.len(), 2);
    assert_eq!(page1[0].title, "Alpha");
    assert_eq!(page1[1].title, "Beta");
    assert_eq!(page2.len(), 1);
    assert_eq!(page2[0].title, "Charlie");

    cleanup(&db_path);
}

#[tokio::test]
async fn run_history_is_recorded() {
    let (store, db_path) = temp_store().await;
    store
        .insert_media(
            "Show",
            Some("Show.1080p.mkv"),
            Some("4K"),
            MediaState::Collected,
        )
        .await
        .unwrap();

    let service = SeaOrmReconcileService::new(store.clone(), resolver_4k_1080p());
    service.reconcile(true).await.unwrap();
    service.reconcile(false).await.unwrap();

    let runs = store.recent_runs(10).await.unwrap();
    assert_eq!(runs.len(), 2);

    // Most recent first.
    assert!(!runs[0].dry_run);
    assert_eq!(runs[0].updated, 1);
    assert!(runs[1].dry_run);
    assert_eq!(runs[1].updated, 1);

    cleanup(&db_path);
}
