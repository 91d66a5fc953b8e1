//! Integration tests for the query function set over the memory transport.

use crate::helpers;

#[tokio::test]
async fn all_read_only_queries_answer_from_the_fixtures() {
    let (session, _clock, _editor) = helpers::test_session();
    let panel = session.attach_panel();

    let config = panel.get_config().await.unwrap();
    assert_eq!(config.options["devtools"], true);

    let components = panel.get_components().await.unwrap();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].name, "AppHeader");

    let imports = panel.get_auto_imports().await.unwrap();
    assert_eq!(imports.imports[0].from, "#app");

    let pages = panel.get_server_pages().await.unwrap();
    assert_eq!(pages[0].path, "/");

    let layouts = panel.get_layouts().await.unwrap();
    assert_eq!(layouts[0].name, "default");

    let versions = panel.get_versions().await.unwrap();
    assert_eq!(versions.host, "3.0.0");
}

#[tokio::test]
async fn open_in_editor_reaches_the_collaborator() {
    let (session, _clock, editor) = helpers::test_session();
    let panel = session.attach_panel();

    panel.open_in_editor("pages/index.vue").await.unwrap();

    assert_eq!(
        editor.opened.lock().unwrap().as_slice(),
        ["pages/index.vue"]
    );
}

#[tokio::test]
async fn panels_are_served_independently_and_concurrently() {
    let (session, _clock, _editor) = helpers::test_session();
    let first = session.attach_panel();
    let second = session.attach_panel();

    let (a, b) = tokio::join!(first.get_versions(), second.get_components());
    assert_eq!(a.unwrap().host, "3.0.0");
    assert_eq!(b.unwrap().len(), 2);

    assert_ne!(first.session().id(), second.session().id());
}

#[tokio::test]
async fn request_ids_correlate_interleaved_calls() {
    let (session, _clock, _editor) = helpers::test_session();
    let panel = session.attach_panel();

    // Many sequential calls over one session: each response must resolve
    // the matching request.
    for _ in 0..20 {
        let versions = panel.get_versions().await.unwrap();
        assert_eq!(versions.host, "3.0.0");
    }
}
