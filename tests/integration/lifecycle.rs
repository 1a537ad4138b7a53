use herdbook::{
    hook::{DataHook, LoadStatus},
    model::reference::{BreedFilters, UpdateReferenceDto},
    service::reference::BreedService,
    Error, ErrorKind,
};
use herdbook_test_utils::prelude::*;
use serde_json::json;

use super::setup::client_for;

/// Tests the full lifecycle of a catalog entry driven through a data hook.
///
/// Verifies that the list starts empty on 404, that a stale update is reported as a
/// conflict without touching the list, and that delete followed by restore brings the
/// record back with `deletedAt` cleared and a higher version.
///
/// Expected: Ok with one live breed at version 3 at the end
#[tokio::test]
async fn breed_delete_restore_round_trip() -> Result<(), Error> {
    let mut restored = factory::mock_breed("b1");
    restored["version"] = json!(3);

    let test = TestBuilder::new()
        .with_error_endpoint("GET", &api_path("breeds"), 404, 1)
        .with_error_endpoint("PATCH", &api_path("breeds/b1"), 409, 1)
        .with_record_endpoint(
            "DELETE",
            &api_path("breeds/b1"),
            factory::mock_deleted_breed("b1", 2),
            1,
        )
        .with_list_endpoint(&api_path("breeds"), Vec::new(), 1)
        .with_record_endpoint("POST", &api_path("breeds/b1/restore"), restored.clone(), 1)
        .with_list_endpoint(&api_path("breeds"), vec![restored], 1)
        .build()
        .await;

    let hook = DataHook::new(BreedService::global(client_for(&test)?)?, BreedFilters::default());

    hook.refetch().await;
    assert_eq!(hook.state().status, LoadStatus::Success);
    assert!(hook.state().items.is_empty());

    let stale = UpdateReferenceDto {
        version: 1,
        name: Some("Renamed".to_string()),
        ..Default::default()
    };
    let err = hook.update("b1", &stale).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    hook.delete("b1").await?;
    assert!(hook.state().items.is_empty());

    let breed = hook.restore("b1").await?;
    assert!(breed.deleted_at.is_none());
    assert_eq!(breed.version, 3);

    let state = hook.state();
    assert_eq!(state.items.len(), 1);
    assert!(state.items[0].deleted_at.is_none());
    test.assert_mocks();

    Ok(())
}
