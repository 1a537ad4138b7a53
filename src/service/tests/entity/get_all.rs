use crate::{
    model::{
        animal::{AnimalFilters, AnimalStatus},
        api::{PaginationMeta, SortOrder},
        reference::BreedFilters,
        vaccination::VaccinationFilters,
    },
    service::vaccination::VaccinationService,
};

use super::*;

/// Expect Ok with records of a paginated list and its metadata
#[tokio::test]
async fn returns_paginated_records() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_paginated_endpoint(
            &farm_path("animals"),
            vec![factory::mock_animal("a1", 1), factory::mock_animal("a2", 3)],
            1,
            20,
            2,
            1,
        )
        .build()
        .await;

    let page = animal_service(&test)?
        .get_all(&AnimalFilters::default())
        .await?;

    assert_eq!(page.len(), 2);
    assert_eq!(page.items[1].version, 3);
    let meta = page.meta.unwrap();
    assert_eq!(meta, PaginationMeta::new(2, 1, 20));
    assert!(meta.is_consistent(page.len()));
    test.assert_mocks();

    Ok(())
}

/// Expect Ok with an empty page when the list endpoint answers 404
#[tokio::test]
async fn not_found_is_empty_page() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_error_endpoint("GET", &farm_path("animals"), 404, 1)
        .build()
        .await;

    let page = animal_service(&test)?
        .get_all(&AnimalFilters::default())
        .await?;

    assert!(page.is_empty());
    assert!(page.meta.is_none());
    test.assert_mocks();

    Ok(())
}

/// Expect Err for server failures other than 404
#[tokio::test]
async fn propagates_server_errors() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_error_endpoint("GET", &farm_path("animals"), 500, 1)
        .build()
        .await;

    let result = animal_service(&test)?
        .get_all(&AnimalFilters::default())
        .await;

    assert_eq!(result.unwrap_err().status(), Some(500));
    test.assert_mocks();

    Ok(())
}

/// Expect only defined filter fields to be sent, with their wire names
#[tokio::test]
async fn sends_defined_filters_only() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/api/v1/farms/farm-0001/animals")
                .match_query(Matcher::Exact(
                    "breedId=b1&sortOrder=desc&status=alive".to_string(),
                ))
                .with_status(200)
                .with_body(r#"{"data":[]}"#)
                .expect(1)
                .create()
        })
        .build()
        .await;

    let filters = AnimalFilters {
        breed_id: Some("b1".to_string()),
        status: Some(AnimalStatus::Alive),
        search: Some(String::new()),
        sort_order: Some(SortOrder::Desc),
        ..Default::default()
    };
    animal_service(&test)?.get_all(&filters).await?;

    test.assert_mocks();

    Ok(())
}

/// Expect resources with their own parameter names to keep them on the wire
#[tokio::test]
async fn keeps_resource_specific_parameter_names() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/api/v1/farms/farm-0001/vaccinations")
                .match_query(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("dateFrom".into(), "2025-01-01".into()),
                    Matcher::UrlEncoded("order".into(), "asc".into()),
                ]))
                .with_status(200)
                .with_body("[]")
                .expect(1)
                .create()
        })
        .build()
        .await;

    let service = VaccinationService::for_farm(client_for(&test)?, TEST_FARM_ID)?;
    let filters = VaccinationFilters {
        date_from: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
        order: Some(SortOrder::Asc),
        ..Default::default()
    };
    service.get_all(&filters).await?;

    test.assert_mocks();

    Ok(())
}

/// Expect double-wrapped catalog responses to be normalized
#[tokio::test]
async fn unwraps_double_wrapped_catalog() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_json_endpoint(
            "GET",
            &api_path("breeds"),
            200,
            serde_json::json!({
                "success": true,
                "data": factory::mock_paginated(vec![factory::mock_breed("b1")], 1, 50, 1)
            }),
            1,
        )
        .build()
        .await;

    let page = breed_service(&test)?
        .get_all(&BreedFilters::default())
        .await?;

    assert_eq!(page.items[0].id, "b1");
    assert_eq!(page.meta.map(|meta| meta.total), Some(1));
    test.assert_mocks();

    Ok(())
}
