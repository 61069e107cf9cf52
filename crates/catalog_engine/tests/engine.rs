use std::sync::Arc;
use std::time::Duration;

use catalog_core::{Character, ResourceList};
use catalog_engine::{
    CatalogClient, CatalogError, CharacterSource, EngineEvent, EngineHandle, TransportFailure,
};

/// Serves canned pages keyed by endpoint, with an artificial delay for `slow`.
struct StubSource;

fn character(id: i64, name: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        series_available_count: 0,
        image_path: "https://img.example.com/x".to_string(),
        image_extension: "jpg".to_string(),
        comics: ResourceList::default(),
        events: ResourceList::default(),
        stories: ResourceList::default(),
    }
}

#[async_trait::async_trait]
impl CharacterSource for StubSource {
    async fn load(&self, endpoint: &str) -> Result<Vec<Character>, CatalogError> {
        match endpoint {
            "slow" => {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(vec![character(1, "Slow")])
            }
            "fast" => Ok(vec![character(2, "Fast")]),
            _ => Err(CatalogError::Transport(TransportFailure::HttpStatus(503))),
        }
    }
}

fn engine() -> EngineHandle {
    catalog_logging::initialize_for_tests();
    let client = Arc::new(CatalogClient::new(Arc::new(StubSource)));
    EngineHandle::new(client).expect("engine")
}

fn drain(engine: &EngineHandle, window: Duration) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    let deadline = std::time::Instant::now() + window;
    while let Some(remaining) = deadline.checked_duration_since(std::time::Instant::now()) {
        match engine.recv_timeout(remaining) {
            Some(event) => events.push(event),
            None => break,
        }
    }
    events
}

#[test]
fn only_the_latest_request_completes() {
    let engine = engine();
    engine.fetch(1, "slow").unwrap();
    engine.fetch(2, "fast").unwrap();

    let events = drain(&engine, Duration::from_millis(600));
    assert_eq!(
        events,
        vec![EngineEvent::FetchCompleted {
            request_id: 2,
            result: Ok(vec![character(2, "Fast")]),
        }]
    );
}

#[test]
fn single_request_delivers_its_result() {
    let engine = engine();
    engine.fetch(5, "slow").unwrap();

    let events = drain(&engine, Duration::from_millis(600));
    assert_eq!(
        events,
        vec![EngineEvent::FetchCompleted {
            request_id: 5,
            result: Ok(vec![character(1, "Slow")]),
        }]
    );
}

#[test]
fn failures_are_delivered_once() {
    let engine = engine();
    engine.fetch(9, "broken").unwrap();

    let events = drain(&engine, Duration::from_millis(300));
    assert_eq!(
        events,
        vec![EngineEvent::FetchCompleted {
            request_id: 9,
            result: Err(CatalogError::Transport(TransportFailure::HttpStatus(503))),
        }]
    );
    assert!(engine.try_recv().is_none());
}
