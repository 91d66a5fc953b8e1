//! Integration tests for module tab registration and actions.

use std::time::Duration;

use devlens::{
    ErrorKind, LaunchAction, LaunchView, ModuleTab, ModuleView, RefreshEvent, TabView,
    action_handler,
};

use crate::helpers;

#[tokio::test]
async fn registered_iframe_tab_is_queryable_by_panels() {
    let (session, _clock, _editor) = helpers::test_session();
    let panel = session.attach_panel();

    session
        .tabs()
        .register(ModuleTab::new("perf", "Performance", ModuleView::iframe("/perf")).with_icon("carbon:meter"))
        .await;

    let tabs = panel.get_iframe_tabs().await.unwrap();
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].name, "perf");
    assert_eq!(
        tabs[0].view,
        TabView::Iframe {
            src: "/perf".to_string()
        }
    );
}

#[tokio::test]
async fn tab_action_completion_pushes_a_custom_tabs_refresh() {
    let (session, _clock, _editor) = helpers::test_session();
    let panel = session.attach_panel();

    let view = LaunchView::new("Start the profiler").with_action(LaunchAction::new(
        "Start",
        action_handler(|| async { Ok(()) }),
    ));
    session
        .tabs()
        .register(ModuleTab::new("profiler", "Profiler", ModuleView::Launch(view)))
        .await;
    // Drain the registration refresh.
    tokio::time::timeout(Duration::from_secs(1), panel.next_refresh())
        .await
        .unwrap();

    let initiated = panel.custom_tab_action("profiler", 0).await.unwrap();
    assert!(initiated);

    let event = tokio::time::timeout(Duration::from_secs(1), panel.next_refresh())
        .await
        .expect("refresh should arrive")
        .unwrap();
    assert_eq!(event, RefreshEvent::CustomTabs);
}

#[tokio::test]
async fn invalid_action_indices_surface_as_typed_errors() {
    let (session, _clock, _editor) = helpers::test_session();
    let panel = session.attach_panel();

    let view = LaunchView::new("Run").with_action(LaunchAction::new(
        "Start",
        action_handler(|| async { Ok(()) }),
    ));
    session
        .tabs()
        .register(ModuleTab::new("run", "Run", ModuleView::Launch(view)))
        .await;

    let err = panel.custom_tab_action("run", 9).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::OutOfRange);

    let err = panel.custom_tab_action("missing", 0).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn unsubscribed_panels_do_not_receive_refreshes() {
    let (session, _clock, _editor) = helpers::test_session();
    let panel = session.attach_panel();
    panel.session().unsubscribe(RefreshEvent::CustomTabs);

    session
        .tabs()
        .register(ModuleTab::new("perf", "Performance", ModuleView::iframe("/perf")))
        .await;

    let refresh = tokio::time::timeout(Duration::from_millis(100), panel.next_refresh()).await;
    assert!(refresh.is_err(), "no push should arrive");
}

#[tokio::test]
async fn shutdown_clears_the_tab_registry() {
    let (session, _clock, _editor) = helpers::test_session();
    session
        .tabs()
        .register(ModuleTab::new("perf", "Performance", ModuleView::iframe("/perf")))
        .await;

    session.shutdown().await;
    assert!(session.tabs().list().await.is_empty());
}
