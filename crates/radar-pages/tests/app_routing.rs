//! End-to-end routing tests for the RADAR route table.

use radar_conf::FrontendSettings;
use radar_core::Component;
use radar_pages::routes::{DEMANDAS, HOME, INTERRUPCOES};
use radar_pages::{AppShell, launch, launch_from_env};
use radar_urls::client_router::{
	MemoryHistory, NavigationOutcome, OutletState, RouteView, Router,
};
use rstest::*;
use serial_test::serial;
use std::cell::RefCell;
use std::rc::Rc;

fn outlet_log(router: &Router) -> Rc<RefCell<Vec<String>>> {
	let log = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&log);
	router.outlet().subscribe(move |state| {
		let entry = match state {
			OutletState::Empty => "empty".to_string(),
			OutletState::Loading { route } => format!("loading:{}", route),
			OutletState::Mounted { route, .. } => {
				format!("mounted:{}", route.as_deref().unwrap_or("-"))
			}
			OutletState::Unmatched { path, .. } => format!("unmatched:{}", path),
			OutletState::Failed { route, .. } => format!("failed:{}", route),
		};
		sink.borrow_mut().push(entry);
	});
	log
}

fn load_count(router: &Router, name: &str) -> usize {
	match router.table().get(name).map(|route| route.view()) {
		Some(RouteView::Lazy(lazy)) => lazy.load_count(),
		_ => 0,
	}
}

fn settings(base_url: &str) -> FrontendSettings {
	FrontendSettings {
		base_url: base_url.to_string(),
		..Default::default()
	}
}

#[fixture]
fn router() -> Router {
	launch(&settings("/"), MemoryHistory::new("/")).unwrap().router
}

#[rstest]
fn test_root_mounts_home_without_loading() {
	let launched = launch(&settings("/"), MemoryHistory::new("/")).unwrap();
	let log = outlet_log(&launched.router);

	assert!(!launched.initial.is_pending());
	let _ = launched.router.push("/").unwrap();

	assert_eq!(*log.borrow(), vec!["mounted:home"]);
	let html = launched.router.render_current().unwrap().render_to_string();
	assert!(html.contains("view-home"));
}

#[rstest]
#[tokio::test]
async fn test_first_visit_to_interrupcoes_loads_then_mounts(router: Router) {
	let log = outlet_log(&router);

	let nav = router.push("/interrupcoes").unwrap();
	assert!(nav.is_pending());
	assert!(router.render_current().is_none());

	let outcome = nav.settle().await.unwrap();

	assert_eq!(
		outcome,
		NavigationOutcome::Mounted {
			route: Some(INTERRUPCOES.to_string())
		}
	);
	assert_eq!(
		*log.borrow(),
		vec!["loading:interrupcoes", "mounted:interrupcoes"]
	);
	assert_eq!(load_count(&router, INTERRUPCOES), 1);
}

#[rstest]
#[tokio::test]
async fn test_second_visit_to_demandas_mounts_immediately(router: Router) {
	router.push("/demandas").unwrap().settle().await.unwrap();
	router.push("/").unwrap().settle().await.unwrap();

	let log = outlet_log(&router);
	let again = router.push("/demandas").unwrap();

	assert!(!again.is_pending());
	assert_eq!(*log.borrow(), vec!["mounted:demandas"]);
	assert_eq!(load_count(&router, DEMANDAS), 1);
}

#[rstest]
fn test_unknown_path_mounts_nothing(router: Router) {
	let nav = router.push("/unknown").unwrap();

	assert_eq!(
		nav.outcome(),
		Some(&NavigationOutcome::Unmatched {
			path: "/unknown".to_string()
		})
	);
	assert!(router.current_route().get().is_none());
	assert!(router.render_current().is_none());
	assert_eq!(load_count(&router, INTERRUPCOES), 0);
	assert_eq!(load_count(&router, DEMANDAS), 0);
}

#[rstest]
#[case("/", Some(HOME))]
#[case("/interrupcoes", Some(INTERRUPCOES))]
#[case("/demandas", Some(DEMANDAS))]
#[case("/interrupcoes/", Some(INTERRUPCOES))]
#[case("/demandas/2026", None)]
#[case("/relatorios", None)]
fn test_each_path_selects_one_route(
	router: Router,
	#[case] path: &str,
	#[case] expected: Option<&str>,
) {
	let matched = router.resolve(path);
	assert_eq!(matched.as_ref().and_then(|m| m.name()), expected);
}

#[rstest]
#[tokio::test]
async fn test_sessions_do_not_share_loaded_views() {
	let first = launch(&settings("/"), MemoryHistory::new("/demandas")).unwrap();
	first.initial.settle().await.unwrap();

	let second = launch(&settings("/"), MemoryHistory::new("/demandas")).unwrap();
	assert!(second.initial.is_pending());
	assert_eq!(load_count(&first.router, DEMANDAS), 1);
	assert_eq!(load_count(&second.router, DEMANDAS), 0);
}

#[rstest]
#[tokio::test]
async fn test_superseded_load_is_not_shown(router: Router) {
	let stale = router.push("/interrupcoes").unwrap();
	let _ = router.push("/").unwrap();

	assert_eq!(stale.settle().await.unwrap(), NavigationOutcome::Superseded);
	assert_eq!(router.outlet().get().mounted_route(), Some(HOME));

	let revisit = router.push("/interrupcoes").unwrap();
	assert!(!revisit.is_pending());
}

#[rstest]
#[tokio::test]
async fn test_shell_under_base_path() {
	let launched = launch(&settings("/radar"), MemoryHistory::new("/radar/demandas")).unwrap();
	let router = launched.router.clone();
	launched.initial.settle().await.unwrap();

	let html = AppShell::new(&router, &launched.settings)
		.render()
		.render_to_string();

	assert!(html.contains("href=\"/radar/\""));
	assert!(html.contains(
		"<a href=\"/radar/demandas\" data-link=\"true\" class=\"nav-link\" aria-current=\"page\">Demandas</a>"
	));
	assert!(html.contains("Maio/2026"));
}

#[rstest]
#[serial(radar_env)]
fn test_base_url_from_environment() {
	// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		std::env::set_var("RADAR_BASE_URL", "/radar");
	}

	let launched = launch_from_env(MemoryHistory::new("/radar/interrupcoes")).unwrap();

	// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		std::env::remove_var("RADAR_BASE_URL");
	}

	assert_eq!(launched.settings.base_url, "/radar");
	assert_eq!(
		launched.router.current_route().get().and_then(|r| r.name),
		Some(INTERRUPCOES.to_string())
	);
	assert!(launched.initial.is_pending());
}
