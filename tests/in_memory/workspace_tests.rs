//! Loading, filtering and optimistic edits through the workspace.

use super::helpers::{Harness, column_id, harness, task_id, titles};
use eyre::ensure;
use rstest::rstest;
use taskboard::board::{
    domain::{BoardId, BoardUpdate, FilterCriteria, Priority, TaskDraft},
    services::{BoardSyncError, CatalogConfig, WorkspaceConfig, WorkspaceStatus},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_loads_columns_in_position_order(harness: Harness) -> eyre::Result<()> {
    let board_id = harness.seed_board(&["T1", "T2"]).await?;
    let mut workspace = harness.workspace(WorkspaceConfig::default());

    workspace.open(board_id).await?;

    let order: Vec<&str> = workspace
        .model()
        .columns()
        .iter()
        .map(|entry| entry.column().title())
        .collect();
    ensure!(order == vec!["To Do", "In Progress", "Review", "Done"]);
    ensure!(*workspace.status() == WorkspaceStatus::Ready);
    ensure!(workspace.board().map(|board| board.id()) == Some(board_id));
    ensure!(workspace.view() == workspace.model().to_columns());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_of_missing_board_shows_blocking_error(harness: Harness) -> eyre::Result<()> {
    let mut workspace = harness.workspace(WorkspaceConfig::default());

    let result = workspace.open(BoardId::new()).await;

    ensure!(result.as_ref().is_err_and(BoardSyncError::is_blocking));
    ensure!(matches!(workspace.status(), WorkspaceStatus::LoadFailed(_)));
    ensure!(workspace.model().is_empty());
    ensure!(workspace.board().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_of_inconsistent_board_shows_blocking_error(harness: Harness) -> eyre::Result<()> {
    let board_id = harness.seed_board(&["T1"]).await?;
    harness.repository.repeat_first_column();
    let mut workspace = harness.workspace(WorkspaceConfig::default());

    let result = workspace.open(board_id).await;

    ensure!(matches!(result, Err(BoardSyncError::InconsistentBoard { .. })));
    ensure!(result.as_ref().is_err_and(BoardSyncError::is_blocking));
    ensure!(matches!(workspace.status(), WorkspaceStatus::LoadFailed(_)));
    ensure!(workspace.model().is_empty());
    ensure!(workspace.board().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_before_open_is_rejected(harness: Harness) -> eyre::Result<()> {
    let mut workspace = harness.workspace(WorkspaceConfig::default());

    let result = workspace.reload().await;

    ensure!(matches!(result, Err(BoardSyncError::NoBoardOpen)));
    ensure!(*workspace.status() == WorkspaceStatus::Unloaded);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_abandons_active_drag(harness: Harness) -> eyre::Result<()> {
    let board_id = harness.seed_board(&["T1"]).await?;
    let mut workspace = harness.workspace(WorkspaceConfig::default());
    workspace.open(board_id).await?;
    let t1 = task_id(workspace.model(), "T1")?;
    workspace.drag_start(t1)?;

    workspace.reload().await?;

    ensure!(workspace.active_task().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_change_view_and_counts_only(harness: Harness) -> eyre::Result<()> {
    let board_id = harness.seed_board(&["Plan launch"]).await?;
    let mut workspace = harness.workspace(WorkspaceConfig::default());
    workspace.open(board_id).await?;
    let todo = column_id(workspace.model(), "To Do")?;
    for (title, priority) in [("Fix outage", Priority::High), ("Tidy docs", Priority::Low)] {
        let draft = TaskDraft::new(title)?.with_priority(priority);
        workspace.create_task(todo, draft).await?;
    }

    workspace.set_filters(FilterCriteria::default().with_priority(Priority::High));

    ensure!(titles(&workspace.view(), "To Do") == vec!["Fix outage"]);
    ensure!(workspace.filtered_task_count() == 1);
    ensure!(workspace.total_task_count() == 3);
    ensure!(titles(workspace.model().columns(), "To Do") == vec!["Plan launch", "Fix outage", "Tidy docs"]);

    workspace.clear_filters();
    ensure!(workspace.filters().is_empty());
    ensure!(workspace.filtered_task_count() == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_in_first_column_appends(harness: Harness) -> eyre::Result<()> {
    let board_id = harness.seed_board(&["T1"]).await?;
    let mut workspace = harness.workspace(WorkspaceConfig::default());
    workspace.open(board_id).await?;

    let created = workspace
        .create_task_in_first_column(TaskDraft::new("T2")?)
        .await?;

    ensure!(created.position() == 1);
    ensure!(titles(workspace.model().columns(), "To Do") == vec!["T1", "T2"]);
    workspace.reload().await?;
    ensure!(titles(workspace.model().columns(), "To Do") == vec!["T1", "T2"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_without_columns_sets_notice(harness: Harness) -> eyre::Result<()> {
    let snapshot = harness
        .catalog(CatalogConfig::without_default_columns())
        .create_board("Empty", "bg-gray-500")
        .await?;
    let mut workspace = harness.workspace(WorkspaceConfig::default());
    workspace.open(snapshot.board.id()).await?;

    let result = workspace
        .create_task_in_first_column(TaskDraft::new("Orphan")?)
        .await;

    ensure!(matches!(result, Err(BoardSyncError::NoColumnAvailable)));
    ensure!(workspace.notice().is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_column_is_appended_last(harness: Harness) -> eyre::Result<()> {
    let board_id = harness.seed_board(&[]).await?;
    let mut workspace = harness.workspace(WorkspaceConfig::default());
    workspace.open(board_id).await?;

    let created = workspace.create_column("Blocked").await?;

    ensure!(created.position() == 4);
    let last = workspace.model().columns().last().map(|entry| entry.id());
    ensure!(last == Some(created.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rename_column_reverts_when_storage_fails(harness: Harness) -> eyre::Result<()> {
    let board_id = harness.seed_board(&[]).await?;
    let mut workspace = harness.workspace(WorkspaceConfig::default());
    workspace.open(board_id).await?;
    let review = column_id(workspace.model(), "Review")?;
    harness.repository.fail_updates();

    let result = workspace.rename_column(review, "QA").await;

    ensure!(matches!(result, Err(BoardSyncError::MutationFailure { .. })));
    ensure!(column_id(workspace.model(), "Review")? == review);
    ensure!(workspace.notice().is_some());
    ensure!(*workspace.status() == WorkspaceStatus::Ready);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rename_column_persists(harness: Harness) -> eyre::Result<()> {
    let board_id = harness.seed_board(&[]).await?;
    let mut workspace = harness.workspace(WorkspaceConfig::default());
    workspace.open(board_id).await?;
    let review = column_id(workspace.model(), "Review")?;

    workspace.rename_column(review, "QA").await?;
    workspace.reload().await?;

    ensure!(column_id(workspace.model(), "QA")? == review);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_board_restores_metadata_on_failure(harness: Harness) -> eyre::Result<()> {
    let board_id = harness.seed_board(&[]).await?;
    let mut workspace = harness.workspace(WorkspaceConfig::default());
    workspace.open(board_id).await?;
    harness.repository.fail_updates();

    let update = BoardUpdate::new().with_title("Relaunch").with_color("bg-red-500");
    let result = workspace.update_board(update).await;

    ensure!(result.is_err());
    ensure!(workspace.board().map(|board| board.title().to_owned()) == Some("Launch".to_owned()));
    ensure!(workspace.notice().is_some());
    workspace.clear_notice();
    ensure!(workspace.notice().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_board_rejects_blank_title_without_storage_call(
    harness: Harness,
) -> eyre::Result<()> {
    let board_id = harness.seed_board(&[]).await?;
    let mut workspace = harness.workspace(WorkspaceConfig::default());
    workspace.open(board_id).await?;

    let result = workspace.update_board(BoardUpdate::new().with_title("  ")).await;

    ensure!(matches!(result, Err(BoardSyncError::Domain(_))));
    ensure!(workspace.board().map(|board| board.title().to_owned()) == Some("Launch".to_owned()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_board_persists_new_title(harness: Harness) -> eyre::Result<()> {
    let board_id = harness.seed_board(&[]).await?;
    let mut workspace = harness.workspace(WorkspaceConfig::default());
    workspace.open(board_id).await?;

    let updated = workspace
        .update_board(BoardUpdate::new().with_title("Relaunch"))
        .await?;
    workspace.reload().await?;

    ensure!(updated.title() == "Relaunch");
    ensure!(workspace.board().map(|board| board.title().to_owned()) == Some("Relaunch".to_owned()));
    Ok(())
}
