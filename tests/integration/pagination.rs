use herdbook::{
    model::animal::AnimalFilters, service::animal::AnimalService, Error,
};
use herdbook_test_utils::prelude::*;

use super::setup::client_for;

/// Tests walking every page of a paginated list.
///
/// Verifies that each page holds at most `limit` records and reports
/// `totalPages == ceil(total / limit)`.
///
/// Expected: Ok with 5 animals over 3 pages
#[tokio::test]
async fn pages_respect_envelope_invariants() -> Result<(), Error> {
    let animals: Vec<_> = (1..=5)
        .map(|n| factory::mock_animal(&format!("a{}", n), 1))
        .collect();

    let mut builder = TestBuilder::new();
    for (index, chunk) in animals.chunks(2).enumerate() {
        let page = (index + 1) as u32;
        let items = chunk.to_vec();
        builder = builder.with_mock_endpoint(move |server| {
            server
                .mock("GET", "/api/v1/farms/farm-0001/animals")
                .match_query(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("page".into(), page.to_string()),
                    Matcher::UrlEncoded("limit".into(), "2".into()),
                ]))
                .with_status(200)
                .with_body(factory::mock_paginated(items, page, 2, 5).to_string())
                .expect(1)
                .create()
        });
    }
    let test = builder.build().await;

    let service = AnimalService::for_farm(client_for(&test)?, TEST_FARM_ID)?;
    let mut seen = Vec::new();
    let mut page = 1;
    loop {
        let filters = AnimalFilters {
            page: Some(page),
            limit: Some(2),
            ..Default::default()
        };
        let result = service.get_all(&filters).await?;
        let meta = result.meta.unwrap();

        assert!(meta.is_consistent(result.len()));
        assert_eq!(meta.total_pages, 3);
        seen.extend(result.items.into_iter().map(|animal| animal.id));

        if page >= meta.total_pages {
            break;
        }
        page += 1;
    }

    assert_eq!(seen, vec!["a1", "a2", "a3", "a4", "a5"]);
    test.assert_mocks();

    Ok(())
}
