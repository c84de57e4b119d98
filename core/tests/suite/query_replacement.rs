use anyhow::Result;
use assert_matches::assert_matches;
use catalog_core::PagerConfig;
use catalog_core::QuerySession;
use catalog_core::ScrollDirection;
use catalog_core::SessionSnapshot;
use catalog_core::Window;
use catalog_protocol::CatalogError;
use core_test_support::Call;
use core_test_support::FakeCatalog;
use core_test_support::names;
use core_test_support::query;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn first_rows(term: &str) -> Vec<String> {
    (0..35).map(|n| format!("{term}-{n}")).collect()
}

fn catalog() -> Arc<FakeCatalog> {
    Arc::new(
        FakeCatalog::new(100)
            .with_results("forest", 300)
            .with_results("desert", 300),
    )
}

#[tokio::test]
async fn new_query_resets_window_and_cache() -> Result<()> {
    let catalog = catalog();
    let session = QuerySession::new(catalog.clone(), PagerConfig::default());
    session.issue(query(&["forest"])).await?;
    for _ in 0..30 {
        session.scroll(ScrollDirection::Forward).await?;
    }
    assert_eq!(session.resident_pages(), vec![0, 1]);

    let rows = session.issue(query(&["desert"])).await?;
    assert_eq!(names(&rows), first_rows("desert"));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.query, Some(query(&["desert"])));
    assert_eq!(snapshot.window, Window::new(0, 35));
    assert_eq!(snapshot.resident_pages, vec![0]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn in_flight_page_of_old_query_is_discarded() -> Result<()> {
    let catalog = catalog();
    let session = Arc::new(QuerySession::new(catalog.clone(), PagerConfig::default()));
    let forest = query(&["forest"]);
    session.issue(forest.clone()).await?;
    for _ in 0..21 {
        session.scroll(ScrollDirection::Forward).await?;
    }

    let gate = catalog.hold_page(&forest, 1);
    let scroll = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.scroll(ScrollDirection::Forward).await }
    });
    gate.entered().await;

    session.issue(query(&["desert"])).await?;
    gate.release();

    assert_eq!(scroll.await?, Err(CatalogError::QuerySuperseded));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.query, Some(query(&["desert"])));
    assert_eq!(snapshot.window, Window::new(0, 35));
    assert_eq!(snapshot.resident_pages, vec![0]);
    assert_eq!(names(&snapshot.rows), first_rows("desert"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_first_page_loses_to_newer_query() -> Result<()> {
    let catalog = catalog();
    let session = Arc::new(QuerySession::new(catalog.clone(), PagerConfig::default()));
    let forest = query(&["forest"]);

    let gate = catalog.hold_page(&forest, 0);
    let slow = tokio::spawn({
        let session = Arc::clone(&session);
        let forest = forest.clone();
        async move { session.issue(forest).await }
    });
    gate.entered().await;

    session.issue(query(&["desert"])).await?;
    gate.release();

    assert_eq!(slow.await?, Err(CatalogError::QuerySuperseded));
    assert_eq!(session.query(), Some(query(&["desert"])));
    assert_eq!(names(&session.current_rows()), first_rows("desert"));
    Ok(())
}

#[tokio::test]
async fn failed_query_leaves_an_empty_table() -> Result<()> {
    let catalog = catalog();
    let session = QuerySession::new(catalog.clone(), PagerConfig::default());
    session.issue(query(&["forest"])).await?;

    let desert = query(&["desert"]);
    catalog.fail_page(&desert, 0);
    let err = session.issue(desert).await.unwrap_err();
    assert_matches!(err, CatalogError::FetchFailed { .. });

    assert_eq!(session.snapshot(), SessionSnapshot::default());
    assert_eq!(
        session.scroll(ScrollDirection::Forward).await,
        Err(CatalogError::NoActiveQuery)
    );
    Ok(())
}

#[tokio::test]
async fn free_text_is_sanitized_before_issuing() -> Result<()> {
    let catalog = Arc::new(FakeCatalog::new(100).with_results("forest/tree", 10));
    let session = QuerySession::new(catalog.clone(), PagerConfig::default());

    let err = session.issue_text("/// ").await.unwrap_err();
    assert_matches!(err, CatalogError::InvalidQuery { .. });
    assert!(catalog.calls().is_empty());

    let rows = session.issue_text("//forest//tree/").await?;
    assert_eq!(rows.len(), 10);
    let active = session.query().map(|q| q.to_string());
    assert_eq!(active.as_deref(), Some("forest/tree"));
    Ok(())
}

#[tokio::test]
async fn seed_issues_the_first_suggestion() -> Result<()> {
    let catalog = Arc::new(
        FakeCatalog::new(100)
            .with_suggestions(&["forest", "desert"])
            .with_results("forest", 40),
    );
    let session = QuerySession::new(catalog.clone(), PagerConfig::default());

    let seeded = session.seed().await?;
    let (seed_query, rows) = seeded.ok_or_else(|| anyhow::anyhow!("expected a seed query"))?;
    assert_eq!(seed_query, query(&["forest"]));
    assert_eq!(names(&rows), first_rows("forest"));
    assert_eq!(
        catalog.calls(),
        vec![
            Call::Suggest,
            Call::Search {
                terms: vec!["forest".to_string()],
                page: 0,
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn seed_without_suggestions_does_nothing() -> Result<()> {
    let catalog = Arc::new(FakeCatalog::new(100));
    let session = QuerySession::new(catalog.clone(), PagerConfig::default());

    assert_eq!(session.seed().await?, None);
    assert_eq!(session.query(), None);
    assert_eq!(catalog.calls(), vec![Call::Suggest]);
    Ok(())
}
