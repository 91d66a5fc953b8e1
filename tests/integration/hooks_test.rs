//! Integration tests for hook metrics flowing from host to panel.

use crate::helpers;

#[tokio::test]
async fn tracked_hook_lifecycle_is_visible_over_the_bridge() {
    let (session, clock, _editor) = helpers::test_session();
    let panel = session.attach_panel();

    clock.set(0);
    session.host().seed_hooks([("app:created", 1)]);
    for t in [10, 20, 30] {
        clock.set(t);
        session.host().hook_fired("app:created");
    }
    clock.set(40);
    session.recorder().untrack("app:created");

    let hooks = panel.get_server_hooks().await.unwrap();
    assert_eq!(hooks.len(), 1);
    assert_eq!(hooks[0].name, "app:created");
    assert_eq!(hooks[0].start, 0);
    assert_eq!(hooks[0].end, Some(40));
    assert_eq!(hooks[0].duration, Some(40));
    assert_eq!(hooks[0].executions, vec![10, 20, 30]);
}

#[tokio::test]
async fn executions_after_untrack_are_ignored() {
    let (session, clock, _editor) = helpers::test_session();
    let panel = session.attach_panel();

    session.host().seed_hooks([("page:start", 1)]);
    clock.set(10);
    session.host().hook_fired("page:start");
    session.recorder().untrack("page:start");
    clock.set(20);
    session.host().hook_fired("page:start");

    let hooks = panel.get_server_hooks().await.unwrap();
    assert_eq!(hooks[0].executions, vec![10]);
}

#[tokio::test]
async fn untracked_firings_never_surface() {
    let (session, _clock, _editor) = helpers::test_session();
    let panel = session.attach_panel();

    session.host().hook_fired("ghost:hook");

    let hooks = panel.get_server_hooks().await.unwrap();
    assert!(hooks.iter().all(|h| h.name != "ghost:hook"));
}
