//! Integration tests for the host event bus and inspector.

use devlens::HostEventPayload;

use crate::helpers;

#[tokio::test]
async fn inspector_click_resolves_to_a_source_location() {
    let (session, _clock, _editor) = helpers::test_session();
    let host = session.host();
    let mut events = host.events().subscribe();

    let inspector = host.inspector().expect("session attaches an inspector");
    inspector.enable();
    inspector.click("http://localhost:3000", "pages/index.vue", 14, 2);

    let event = events.recv().await.unwrap();
    assert_eq!(
        event.payload,
        HostEventPayload::InspectorClick {
            base_url: "http://localhost:3000".to_string(),
            file: "pages/index.vue".to_string(),
            line: 14,
            column: 2,
        }
    );
}

#[tokio::test]
async fn inspector_close_disables_from_any_state() {
    let (session, _clock, _editor) = helpers::test_session();
    let host = session.host();
    let inspector = host.inspector().unwrap();

    inspector.enable();
    inspector.close();
    assert!(!inspector.is_enabled());

    let mut events = host.events().subscribe();
    inspector.click("http://localhost:3000", "pages/index.vue", 1, 1);
    assert!(events.try_recv().is_err(), "clicks while disabled are ignored");
}

#[tokio::test]
async fn navigation_events_reach_listeners() {
    let (session, _clock, _editor) = helpers::test_session();
    let mut events = session.host().events().subscribe();

    session.host().events().emit(HostEventPayload::DevtoolsNavigate {
        path: "/modules".to_string(),
    });

    match events.recv().await.unwrap().payload {
        HostEventPayload::DevtoolsNavigate { path } => assert_eq!(path, "/modules"),
        other => panic!("unexpected event: {other:?}"),
    }
}
