//! Board catalogue operations against in-memory storage.

use super::helpers::{Harness, harness};
use chrono::{TimeDelta, Utc};
use eyre::ensure;
use rstest::rstest;
use taskboard::board::{
    domain::{Board, BoardListFilter},
    ports::IdentityError,
    services::{BoardStats, BoardSyncError, CatalogConfig},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_board_adds_default_columns(harness: Harness) -> eyre::Result<()> {
    let catalog = harness.catalog(CatalogConfig::default());

    let snapshot = catalog.create_board(" Roadmap ", "bg-purple-500").await?;

    let titles: Vec<&str> = snapshot
        .columns
        .iter()
        .map(|entry| entry.column().title())
        .collect();
    ensure!(snapshot.board.title() == "Roadmap");
    ensure!(titles == vec!["To Do", "In Progress", "Review", "Done"]);
    let positions: Vec<i64> = snapshot
        .columns
        .iter()
        .map(|entry| entry.column().position())
        .collect();
    ensure!(positions == vec![0, 1, 2, 3]);

    let loaded = harness.sync.load(snapshot.board.id()).await?;
    ensure!(loaded.columns == snapshot.columns);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_board_honours_custom_columns(harness: Harness) -> eyre::Result<()> {
    let config = CatalogConfig {
        default_columns: vec!["Inbox".to_owned(), "Archive".to_owned()],
        ..CatalogConfig::default()
    };

    let snapshot = harness.catalog(config).create_board("Mail", "bg-sky-500").await?;

    ensure!(snapshot.columns.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_board_rejects_blank_title(harness: Harness) -> eyre::Result<()> {
    let catalog = harness.catalog(CatalogConfig::default());

    let result = catalog.create_board("   ", Board::DEFAULT_COLOR).await;

    ensure!(matches!(result, Err(BoardSyncError::Domain(_))));
    ensure!(catalog.list_boards().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filtered_matches_title_case_insensitively(harness: Harness) -> eyre::Result<()> {
    let catalog = harness.catalog(CatalogConfig::without_default_columns());
    for title in ["Q3 Roadmap", "Hiring", "roadmap archive"] {
        catalog.create_board(title, Board::DEFAULT_COLOR).await?;
    }
    let today = Utc::now().date_naive();

    let found = catalog
        .list_filtered(
            &BoardListFilter::default()
                .with_search("ROADMAP")
                .created_from(today - TimeDelta::days(1))
                .created_to(today + TimeDelta::days(1)),
        )
        .await?;

    let titles: Vec<&str> = found.iter().map(Board::title).collect();
    ensure!(titles == vec!["roadmap archive", "Q3 Roadmap"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_stats_counts_recent_activity(harness: Harness) -> eyre::Result<()> {
    let catalog = harness.catalog(CatalogConfig::without_default_columns());
    for title in ["One", "Two"] {
        catalog.create_board(title, Board::DEFAULT_COLOR).await?;
    }

    let now = catalog.dashboard_stats(Utc::now()).await?;
    let later = catalog
        .dashboard_stats(Utc::now() + TimeDelta::days(30))
        .await?;

    ensure!(
        now == BoardStats {
            total_boards: 2,
            recently_active: 2,
        }
    );
    ensure!(later.total_boards == 2);
    ensure!(later.recently_active == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_requires_a_signed_in_user(harness: Harness) -> eyre::Result<()> {
    let catalog = harness.catalog(CatalogConfig::default());
    harness.identity.set_user(None);

    let result = catalog.list_boards().await;

    ensure!(matches!(
        result,
        Err(BoardSyncError::Identity(IdentityError::Unauthenticated))
    ));
    ensure!(result.as_ref().is_err_and(BoardSyncError::is_blocking));
    Ok(())
}
