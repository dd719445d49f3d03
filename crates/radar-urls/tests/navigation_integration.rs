//! Navigation context integration tests.

use radar_core::Page;
use radar_urls::client_router::{
	BasePath, History, HistoryState, MemoryHistory, NavigationOutcome, OutletState, RouteTable,
	Router, ViewFactory,
};
use rstest::*;
use std::cell::RefCell;
use std::collections::HashMap;
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

#[fixture]
fn router() -> Router {
	let table = RouteTable::builder()
		.named_route("home", "/", || Page::text("Início"))
		.named_lazy_route("relatorio", "/relatorios/{ano}", || async {
			tokio::task::yield_now().await;
			Ok(ViewFactory::new(|| Page::text("Relatório")))
		})
		.build()
		.unwrap();
	Router::new(table, MemoryHistory::new("/app/")).with_base(BasePath::new("/app"))
}

#[rstest]
#[tokio::test]
async fn test_outlet_transitions_for_lazy_route(router: Router) {
	let log = outlet_log(&router);

	router.start().unwrap().settle().await.unwrap();
	let nav = router.push_named("relatorio", &[("ano", "2025")]).unwrap();
	let outcome = nav.settle().await.unwrap();

	assert_eq!(
		outcome,
		NavigationOutcome::Mounted {
			route: Some("relatorio".to_string())
		}
	);
	assert_eq!(
		*log.borrow(),
		vec!["mounted:home", "loading:relatorio", "mounted:relatorio"]
	);
	assert_eq!(
		router.current_route().get().map(|r| r.params),
		Some(HashMap::from([("ano".to_string(), "2025".to_string())]))
	);
}

#[rstest]
#[tokio::test]
async fn test_params_share_one_lazy_view(router: Router) {
	router.push("/relatorios/2024").unwrap().settle().await.unwrap();
	let second = router.push("/relatorios/2025").unwrap();
	assert!(!second.is_pending());
}

#[rstest]
fn test_query_and_hash_are_kept(router: Router) {
	let _ = router.push("/?municipio=Boa+Vista#mapa").unwrap();

	let location = router.current_location().get();
	assert_eq!(location.path, "/");
	assert_eq!(location.query_param("municipio"), Some("Boa Vista"));
	assert_eq!(location.hash.as_deref(), Some("mapa"));
	assert_eq!(router.outlet().get().mounted_route(), Some("home"));
}

#[rstest]
fn test_replace_does_not_grow_history() {
	let table = RouteTable::builder()
		.named_route("home", "/", || Page::text("Início"))
		.named_route("sobre", "/sobre", || Page::text("Sobre"))
		.build()
		.unwrap();
	let history = Rc::new(RefCell::new(MemoryHistory::new("/")));
	let router = Router::new(table, SharedHistory(Rc::clone(&history)));

	router.start().unwrap();
	let _ = router.replace_named("sobre", &[]).unwrap();

	assert_eq!(history.borrow().len(), 1);
	assert_eq!(history.borrow().location(), "/sobre");
	assert_eq!(
		history.borrow().state().and_then(|s| s.route_name),
		Some("sobre".to_string())
	);
}

/// Lets the test inspect the history after handing it to the router.
struct SharedHistory(Rc<RefCell<MemoryHistory>>);

impl History for SharedHistory {
	fn location(&self) -> String {
		self.0.borrow().location()
	}

	fn state(&self) -> Option<HistoryState> {
		self.0.borrow().state()
	}

	fn push(
		&mut self,
		url: &str,
		state: &HistoryState,
	) -> Result<(), String> {
		self.0.borrow_mut().push(url, state)
	}

	fn replace(
		&mut self,
		url: &str,
		state: &HistoryState,
	) -> Result<(), String> {
		self.0.borrow_mut().replace(url, state)
	}

	fn go(&mut self, delta: isize) -> bool {
		self.0.borrow_mut().go(delta)
	}
}
