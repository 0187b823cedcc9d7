//! Navigation scenarios against the built-in music app table.

use std::sync::Arc;

use music_app_router::config::loader::parse_config;
use music_app_router::routing::{BasePath, History, Route, RouteTable, RouterState};
use music_app_router::{Router, RoutingError};

#[tokio::test]
async fn test_initial_load_at_root() {
    let router = Router::music_app();
    router.resolve("/").await.unwrap();

    let active = router.active().unwrap();
    assert_eq!(active.view.as_str(), "ScalesView");
    assert_eq!(active.name.as_deref(), Some("scales"));
}

#[tokio::test]
async fn test_navigate_to_metronome() {
    let router = Router::music_app();
    router.navigate("metronome", &[]).await.unwrap();
    assert_eq!(router.active().unwrap().view.as_str(), "MetronomeView");
}

#[tokio::test]
async fn test_not_found_after_progressions() {
    let router = Router::music_app();
    router.resolve("/progressions").await.unwrap();

    let err = router.resolve("/nope").await.unwrap_err();
    assert!(matches!(err, RoutingError::NotFound { .. }));
    assert_eq!(router.active().unwrap().view.as_str(), "ProgressionsView");
}

#[tokio::test]
async fn test_repeated_navigation_to_chords() {
    let router = Router::music_app();
    for _ in 0..2 {
        let nav = router.navigate("chords", &[]).await.unwrap();
        assert_eq!(nav.activated().unwrap().view.as_str(), "ChordsView");
        assert_eq!(router.active().unwrap().view.as_str(), "ChordsView");
        assert_eq!(router.state(), RouterState::Idle);
    }
}

#[tokio::test]
async fn test_named_redirect_is_followed() {
    let mut routes = RouteTable::music_app_routes();
    routes[0] = Route::redirect("/", "/scales").named("home");
    let table = RouteTable::new(routes, Default::default()).unwrap();
    let router = Router::new(table, BasePath::default());

    let nav = router.navigate("home", &[]).await.unwrap();
    let active = nav.into_activated().unwrap();
    assert_eq!(active.name.as_deref(), Some("scales"));
    assert_eq!(active.redirected_from.as_deref(), Some("/"));
}

#[tokio::test]
async fn test_configured_router_with_history() {
    let config = parse_config(
        r#"
        [router]
        base_path = "/theory"
        sensitive = false

        [[routes]]
        path = "/"
        redirect = "/chords"

        [[routes]]
        path = "/chords"
        name = "chords"
        view = "ChordsView"

        [[routes]]
        path = "/metronome"
        name = "metronome"
        view = "MetronomeView"
        lazy = true
        "#,
        None,
    )
    .unwrap();
    let table = config.route_table().unwrap();
    let router = Arc::new(Router::new(table, config.router.base()));
    let mut history = History::new(router.clone());

    history.push("/theory").await.unwrap();
    history.push("/theory/METRONOME").await.unwrap();
    assert_eq!(history.entries(), ["/theory/chords", "/theory/metronome"]);

    history.back().await.unwrap().unwrap();
    assert_eq!(router.active().unwrap().view.as_str(), "ChordsView");
}
