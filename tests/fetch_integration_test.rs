use character_migration::core::Fetcher;
use character_migration::{DataFetcher, HttpResourceClient, MigrationError, Record, ResourceKind};
use httpmock::prelude::*;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn character(id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "status": "Alive",
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": {
            "name": "Earth (C-137)",
            "url": "https://rickandmortyapi.com/api/location/1"
        },
        "location": {
            "name": "Citadel of Ricks",
            "url": "https://rickandmortyapi.com/api/location/3"
        },
        "image": format!("https://rickandmortyapi.com/api/character/avatar/{}.jpeg", id),
        "episode": ["https://rickandmortyapi.com/api/episode/1"],
        "url": format!("https://rickandmortyapi.com/api/character/{}", id),
        "created": "2017-11-04T18:48:46.250Z"
    })
}

fn location(id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "type": "Planet",
        "dimension": "Dimension C-137",
        "residents": ["https://rickandmortyapi.com/api/character/38"],
        "url": format!("https://rickandmortyapi.com/api/location/{}", id),
        "created": "2017-11-10T12:42:04.162Z"
    })
}

fn fetcher(server: &MockServer) -> DataFetcher<HttpResourceClient> {
    let client = HttpResourceClient::new(Duration::from_secs(5)).unwrap();
    DataFetcher::new(client, server.url("/api"))
}

#[tokio::test]
async fn test_follows_relative_next_cursor() {
    let server = MockServer::start();

    let page_one = server.mock(|when, then| {
        when.method(GET).path("/api/character").query_param("page", "1");
        then.status(200).json_body(serde_json::json!({
            "info": {"count": 2, "pages": 2, "next": "/character?page=2", "prev": null},
            "results": [character(1, "Rick Sanchez")]
        }));
    });
    let page_two = server.mock(|when, then| {
        when.method(GET).path("/api/character").query_param("page", "2");
        then.status(200).json_body(serde_json::json!({
            "info": {"count": 2, "pages": 2, "next": "", "prev": "/character?page=1"},
            "results": [character(2, "Morty Smith")]
        }));
    });

    let records = fetcher(&server)
        .fetch_all(ResourceKind::Character, &CancellationToken::new())
        .await
        .unwrap();

    page_one.assert();
    page_two.assert();
    assert_eq!(records.len(), 2);
    match (&records[0], &records[1]) {
        (Record::Character(first), Record::Character(second)) => {
            assert_eq!(first.name, "Rick Sanchez");
            assert_eq!(second.name, "Morty Smith");
            assert_eq!(first.origin.name, "Earth (C-137)");
        }
        other => panic!("expected characters, got {:?}", other),
    }
}

#[tokio::test]
async fn test_follows_absolute_next_cursor() {
    let server = MockServer::start();
    let next = server.url("/api/location?page=2");

    let page_one = server.mock(|when, then| {
        when.method(GET).path("/api/location").query_param("page", "1");
        then.status(200).json_body(serde_json::json!({
            "info": {"count": 3, "pages": 2, "next": next, "prev": null},
            "results": [location(1, "Earth (C-137)"), location(2, "Abadango")]
        }));
    });
    let page_two = server.mock(|when, then| {
        when.method(GET).path("/api/location").query_param("page", "2");
        then.status(200).json_body(serde_json::json!({
            "info": {"count": 3, "pages": 2, "next": null, "prev": null},
            "results": [location(3, "Citadel of Ricks")]
        }));
    });

    let records = fetcher(&server)
        .fetch_all(ResourceKind::Location, &CancellationToken::new())
        .await
        .unwrap();

    page_one.assert();
    page_two.assert();
    let ids: Vec<i64> = records.iter().map(Record::id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_next_cursor_not_page_counter() {
    let server = MockServer::start();

    let page_one = server.mock(|when, then| {
        when.method(GET).path("/api/location").query_param("page", "1");
        then.status(200).json_body(serde_json::json!({
            "info": {"count": 2, "pages": 2, "next": "/location?page=7", "prev": null},
            "results": [location(1, "Earth (C-137)")]
        }));
    });
    let page_seven = server.mock(|when, then| {
        when.method(GET).path("/api/location").query_param("page", "7");
        then.status(200).json_body(serde_json::json!({
            "info": {"count": 2, "pages": 2, "next": null, "prev": null},
            "results": [location(20, "Earth (Replacement Dimension)")]
        }));
    });

    let records = fetcher(&server)
        .fetch_all(ResourceKind::Location, &CancellationToken::new())
        .await
        .unwrap();

    page_one.assert();
    page_seven.assert();
    let ids: Vec<i64> = records.iter().map(Record::id).collect();
    assert_eq!(ids, vec![1, 20]);
}

#[tokio::test]
async fn test_server_error_on_second_page_aborts() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/character").query_param("page", "1");
        then.status(200).json_body(serde_json::json!({
            "info": {"count": 2, "pages": 2, "next": "/character?page=2", "prev": null},
            "results": [character(1, "Rick Sanchez")]
        }));
    });
    let failing = server.mock(|when, then| {
        when.method(GET).path("/api/character").query_param("page", "2");
        then.status(500);
    });

    let err = fetcher(&server)
        .fetch_all(ResourceKind::Character, &CancellationToken::new())
        .await
        .unwrap_err();

    // exactly one attempt, no retry
    failing.assert_hits(1);
    match err {
        MigrationError::Transport { url, reason } => {
            assert!(url.ends_with("/api/character?page=2"));
            assert!(reason.contains("500"));
        }
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_html_body_is_decode_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/location");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>maintenance</html>");
    });

    let err = fetcher(&server)
        .fetch_all(ResourceKind::Location, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, MigrationError::Decode { .. }));
}
