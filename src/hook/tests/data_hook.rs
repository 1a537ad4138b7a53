use std::{io::Write, time::Duration};

use serde_json::json;

use crate::{
    error::ErrorKind,
    hook::{DataHook, FetchPolicy, LoadStatus},
    model::{
        animal::{AnimalFilters, AnimalStatus},
        reference::{BreedFilters, CreateBreedDto},
    },
};

use super::*;

/// Expect a refetch to publish items and pagination metadata
#[tokio::test]
async fn refetch_publishes_items() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_paginated_endpoint(
            &farm_path("animals"),
            vec![factory::mock_animal("a1", 1)],
            1,
            20,
            1,
            1,
        )
        .build()
        .await;

    let hook = DataHook::new(animal_service(&test)?, AnimalFilters::default());
    let mut updates = hook.subscribe();
    assert_eq!(hook.state().status, LoadStatus::Idle);

    assert!(hook.refetch().await);

    assert!(updates.has_changed().unwrap_or(false));
    let state = updates.borrow_and_update().clone();
    assert_eq!(state.status, LoadStatus::Success);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.meta.map(|meta| meta.total), Some(1));
    assert!(state.error.is_none());
    test.assert_mocks();

    Ok(())
}

/// Expect equal filter values built separately to issue a single request
#[tokio::test]
async fn equal_filters_fetch_once() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_list_endpoint(&farm_path("animals"), vec![factory::mock_animal("a1", 1)], 1)
        .build()
        .await;

    let build_filters = || AnimalFilters {
        status: Some(AnimalStatus::Alive),
        lot_id: Some("l1".to_string()),
        ..Default::default()
    };

    let hook = DataHook::new(animal_service(&test)?, AnimalFilters::default());
    assert!(hook.set_filters(build_filters()).await);
    assert!(!hook.set_filters(build_filters()).await);

    assert_eq!(hook.filters(), build_filters());
    test.assert_mocks();

    Ok(())
}

/// Expect changed filters to refetch with the new query
#[tokio::test]
async fn changed_filters_refetch() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/api/v1/breeds")
                .match_query(Matcher::Missing)
                .with_status(200)
                .with_body(json!({"data": [factory::mock_breed("b1"), factory::mock_breed("b2")]}).to_string())
                .expect(1)
                .create()
        })
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/api/v1/breeds")
                .match_query(Matcher::UrlEncoded("speciesId".into(), "sp-ovine".into()))
                .with_status(200)
                .with_body(json!({"data": [factory::mock_breed("b3")]}).to_string())
                .expect(1)
                .create()
        })
        .build()
        .await;

    let hook = DataHook::new(breed_service(&test)?, BreedFilters::default());
    hook.refetch().await;
    assert_eq!(hook.state().items.len(), 2);

    let fetched = hook
        .set_filters(BreedFilters {
            species_id: Some("sp-ovine".to_string()),
            ..Default::default()
        })
        .await;

    assert!(fetched);
    assert_eq!(hook.state().items[0].id, "b3");
    test.assert_mocks();

    Ok(())
}

/// Expect a failed fetch to keep the previous items and store the error
#[tokio::test]
async fn failure_preserves_items() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_list_endpoint(&farm_path("animals"), vec![factory::mock_animal("a1", 1)], 1)
        .with_error_endpoint("GET", &farm_path("animals"), 500, 1)
        .build()
        .await;

    let hook = DataHook::new(animal_service(&test)?, AnimalFilters::default());
    hook.refetch().await;
    hook.refetch().await;

    let state = hook.state();
    assert_eq!(state.status, LoadStatus::Error);
    assert_eq!(state.items.len(), 1);
    let error = state.error.unwrap();
    assert_eq!(error.kind, ErrorKind::Server);
    assert_eq!(error.status, Some(500));
    test.assert_mocks();

    Ok(())
}

/// Expect a 404 list to load as empty rather than as an error
#[tokio::test]
async fn not_found_loads_empty() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_error_endpoint("GET", &farm_path("animals"), 404, 1)
        .build()
        .await;

    let hook = DataHook::new(animal_service(&test)?, AnimalFilters::default());
    hook.refetch().await;

    let state = hook.state();
    assert_eq!(state.status, LoadStatus::Success);
    assert!(state.items.is_empty());
    assert!(state.error.is_none());
    test.assert_mocks();

    Ok(())
}

/// Expect a successful mutation to be followed by a refetch
#[tokio::test]
async fn mutation_refetches() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_record_endpoint("POST", &api_path("breeds"), factory::mock_breed("b9"), 1)
        .with_list_endpoint(&api_path("breeds"), vec![factory::mock_breed("b9")], 1)
        .build()
        .await;

    let hook = DataHook::new(breed_service(&test)?, BreedFilters::default());
    let dto = CreateBreedDto {
        species_id: "sp-bovine".to_string(),
        name: "Breed b9".to_string(),
        description: None,
    };
    let created = hook.create(&dto).await?;

    assert_eq!(created.id, "b9");
    assert_eq!(hook.state().items.len(), 1);
    test.assert_mocks();

    Ok(())
}

/// Expect a failed mutation to return its error without refetching
#[tokio::test]
async fn failed_mutation_is_returned() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_error_endpoint("DELETE", &api_path("breeds/b1"), 409, 1)
        .with_list_endpoint(&api_path("breeds"), Vec::new(), 0)
        .build()
        .await;

    let hook = DataHook::new(breed_service(&test)?, BreedFilters::default());
    let result = hook.delete("b1").await;

    assert!(result.unwrap_err().is_conflict());
    assert_eq!(hook.state().status, LoadStatus::Idle);
    test.assert_mocks();

    Ok(())
}

/// Expect restore to refetch and show the restored record
#[tokio::test]
async fn restore_refetches() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_record_endpoint("POST", &api_path("breeds/b1/restore"), factory::mock_breed("b1"), 1)
        .with_list_endpoint(&api_path("breeds"), vec![factory::mock_breed("b1")], 1)
        .build()
        .await;

    let hook = DataHook::new(breed_service(&test)?, BreedFilters::default());
    hook.restore("b1").await?;

    assert_eq!(hook.state().items[0].id, "b1");
    test.assert_mocks();

    Ok(())
}

/// Expect the superseded fetch to be discarded and only the latest to land
#[tokio::test]
async fn overlapping_fetches_keep_latest() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/api/v1/farms/farm-0001/animals")
                .match_query(Matcher::Any)
                .with_status(200)
                .with_body(json!({"data": [factory::mock_animal("a1", 1)]}).to_string())
                .expect_at_least(1)
                .create()
        })
        .build()
        .await;

    let hook = DataHook::new(animal_service(&test)?, AnimalFilters::default());
    assert_eq!(hook.policy(), FetchPolicy::CancelPrevious);

    let (first, second) = tokio::join!(hook.refetch(), hook.refetch());

    assert!(first && second);
    let state = hook.state();
    assert_eq!(state.status, LoadStatus::Success);
    assert_eq!(state.items.len(), 1);

    Ok(())
}

/// Expect the in-flight guard to drop a fetch issued while one is pending
#[tokio::test]
async fn skip_policy_drops_overlapping_fetch() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_list_endpoint(&farm_path("animals"), vec![factory::mock_animal("a1", 1)], 1)
        .build()
        .await;

    let hook = DataHook::with_policy(
        animal_service(&test)?,
        AnimalFilters::default(),
        FetchPolicy::SkipWhileInFlight,
    );

    let (first, second) = tokio::join!(hook.refetch(), hook.refetch());

    assert!(first);
    assert!(!second);
    assert_eq!(hook.state().status, LoadStatus::Success);
    test.assert_mocks();

    Ok(())
}

/// Expect a superseded slow response to be discarded in favour of the latest filters
#[tokio::test]
async fn superseded_response_is_discarded() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/api/v1/breeds")
                .match_query(Matcher::UrlEncoded("speciesId".into(), "sp-bovine".into()))
                .with_status(200)
                .with_chunked_body(|body| {
                    std::thread::sleep(Duration::from_millis(300));
                    body.write_all(json!({"data": [factory::mock_breed("a1")]}).to_string().as_bytes())
                })
                .expect(1)
                .create()
        })
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/api/v1/breeds")
                .match_query(Matcher::UrlEncoded("speciesId".into(), "sp-ovine".into()))
                .with_status(200)
                .with_body(json!({"data": [factory::mock_breed("b1")]}).to_string())
                .expect(1)
                .create()
        })
        .build()
        .await;

    let hook = DataHook::new(breed_service(&test)?, BreedFilters::default());
    let for_species = |species: &str| BreedFilters {
        species_id: Some(species.to_string()),
        ..Default::default()
    };

    let (first, second) = tokio::join!(hook.set_filters(for_species("sp-bovine")), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        hook.set_filters(for_species("sp-ovine")).await
    });

    assert!(first && second);
    let state = hook.state();
    assert_eq!(state.status, LoadStatus::Success);
    assert!(state.error.is_none());
    let ids: Vec<&str> = state.items.iter().map(|breed| breed.id.as_str()).collect();
    assert_eq!(ids, vec!["b1"]);
    assert_eq!(hook.filters(), for_species("sp-ovine"));
    test.assert_mocks();

    Ok(())
}

/// Expect the refetch after a mutation to run even while a fetch is pending under the skip
/// policy
#[tokio::test]
async fn skip_policy_keeps_mutation_refetch() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/api/v1/breeds")
                .match_query(Matcher::Any)
                .with_status(200)
                .with_chunked_body(|body| {
                    std::thread::sleep(Duration::from_millis(300));
                    body.write_all(br#"{"data": []}"#)
                })
                .expect(1)
                .create()
        })
        .with_record_endpoint("POST", &api_path("breeds"), factory::mock_breed("b9"), 1)
        .with_list_endpoint(&api_path("breeds"), vec![factory::mock_breed("b9")], 1)
        .build()
        .await;

    let hook = DataHook::with_policy(
        breed_service(&test)?,
        BreedFilters::default(),
        FetchPolicy::SkipWhileInFlight,
    );
    let dto = CreateBreedDto {
        species_id: "sp-bovine".to_string(),
        name: "Breed b9".to_string(),
        description: None,
    };

    let (fetched, created) = tokio::join!(hook.refetch(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        hook.create(&dto).await
    });

    assert!(fetched);
    assert_eq!(created?.id, "b9");
    let state = hook.state();
    assert_eq!(state.status, LoadStatus::Success);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, "b9");
    test.assert_mocks();

    Ok(())
}
