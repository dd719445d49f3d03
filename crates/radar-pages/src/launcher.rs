//! Application startup.
//!
//! [`launch`] wires settings, the route table and a history into a
//! navigation context and performs the initial navigation. On `wasm32`,
//! [`mount`] does the same against the browser and renders the shell into
//! `#app`.

use crate::logging::init_logging;
use crate::routes::app_routes;
use radar_conf::settings::DefaultSource;
use radar_conf::{FrontendSettings, SettingsError, SettingsLoader};
use radar_urls::client_router::{BasePath, History, Navigation, Router, RouterError};
use serde_json::Value;

/// Base path baked in at build time, overridable at runtime.
const BUILD_BASE_URL: Option<&str> = option_env!("RADAR_BASE_URL");

/// Startup failures.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
	/// Settings could not be loaded.
	#[error("Failed to load settings: {0}")]
	Settings(#[from] SettingsError),
	/// The route table is invalid.
	#[error("Failed to build routes: {0}")]
	Router(#[from] RouterError),
}

/// A started application.
#[derive(Debug)]
pub struct Launched {
	/// Settings the application started with.
	pub settings: FrontendSettings,
	/// The navigation context.
	pub router: Router,
	/// The initial navigation, pending when the first view is lazy.
	pub initial: Navigation,
}

/// Returns the settings loader used at startup.
///
/// Layers, lowest first: built-in defaults, the base path baked in at
/// build time, then `RADAR_*` environment variables.
pub fn settings_loader() -> SettingsLoader {
	let mut baked = DefaultSource::new();
	if let Some(base_url) = BUILD_BASE_URL {
		baked = baked.with_value("base_url", Value::String(base_url.to_string()));
	}
	SettingsLoader::new().source(baked)
}

/// Starts the application on the given history.
///
/// # Errors
///
/// Fails when the route table cannot be built or the host rejects the
/// initial history update.
pub fn launch(
	settings: &FrontendSettings,
	history: impl History + 'static,
) -> Result<Launched, LaunchError> {
	let table = app_routes()?;
	let router = Router::new(table, history).with_base(BasePath::new(&settings.base_url));

	tracing::info!(
		app = %settings.app_name,
		environment = %settings.environment,
		base = %router.base(),
		routes = router.table().route_count(),
		"Starting RADAR"
	);

	let initial = router.start()?;
	Ok(Launched {
		settings: settings.clone(),
		router,
		initial,
	})
}

/// Loads settings, installs logging and starts the application.
pub fn launch_from_env(history: impl History + 'static) -> Result<Launched, LaunchError> {
	let settings = settings_loader().load()?;
	init_logging(&settings);
	launch(&settings, history)
}

#[cfg(target_arch = "wasm32")]
pub use self::browser::mount;

#[cfg(target_arch = "wasm32")]
mod browser {
	use super::{Launched, launch_from_env};
	use crate::layout::AppShell;
	use radar_core::Component;
	use radar_urls::client_router::{BrowserHistory, Navigation, Router};
	use wasm_bindgen::JsCast;
	use wasm_bindgen::prelude::*;
	use web_sys::{Element, Event, MouseEvent};

	fn drive(navigation: Navigation) {
		if navigation.is_pending() {
			wasm_bindgen_futures::spawn_local(async move {
				// Failures are logged and shown by the outlet.
				let _ = navigation.settle().await;
			});
		}
	}

	fn is_plain_click(event: &Event) -> bool {
		match event.dyn_ref::<MouseEvent>() {
			Some(mouse) => {
				mouse.button() == 0
					&& !mouse.ctrl_key()
					&& !mouse.meta_key()
					&& !mouse.shift_key()
					&& !mouse.alt_key()
			}
			None => true,
		}
	}

	fn handle_click(router: &Router, event: &Event) {
		if event.default_prevented() || !is_plain_click(event) {
			return;
		}
		let Some(anchor) = event
			.target()
			.and_then(|target| target.dyn_into::<Element>().ok())
			.and_then(|element| element.closest("a[data-link]").ok().flatten())
		else {
			return;
		};
		let Some(href) = anchor.get_attribute("href") else {
			return;
		};
		let Some(url) = router.base().strip(&href).map(str::to_string) else {
			return;
		};

		event.prevent_default();
		let result = if anchor.has_attribute("data-replace") {
			router.replace(&url)
		} else {
			router.push(&url)
		};
		match result {
			Ok(navigation) => drive(navigation),
			Err(error) => tracing::error!(%url, %error, "Navigation failed"),
		}
	}

	/// Mounts RADAR into the `#app` element and starts routing.
	#[wasm_bindgen]
	pub fn mount() -> Result<(), JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
		let document = window
			.document()
			.ok_or_else(|| JsValue::from_str("No document object"))?;
		let app_element = document
			.get_element_by_id("app")
			.ok_or_else(|| JsValue::from_str("No #app element found"))?;

		let Launched {
			settings,
			router,
			initial,
		} = launch_from_env(BrowserHistory::new())
			.map_err(|error| JsValue::from_str(&error.to_string()))?;

		let shell = AppShell::new(&router, &settings);
		let render = move || {
			// SAFETY(XSS): render_to_string() escapes all text and attribute values.
			app_element.set_inner_html(&shell.render().render_to_string());
		};
		render();
		router.outlet().subscribe(move |_| render());
		drive(initial);

		let click_router = router.clone();
		let click_handler = Closure::wrap(Box::new(move |event: Event| {
			handle_click(&click_router, &event);
		}) as Box<dyn FnMut(_)>);
		document.add_event_listener_with_callback("click", click_handler.as_ref().unchecked_ref())?;
		click_handler.forget();

		let popstate_handler = Closure::wrap(Box::new(move |_event: Event| {
			drive(router.handle_pop());
		}) as Box<dyn FnMut(_)>);
		window.add_event_listener_with_callback(
			"popstate",
			popstate_handler.as_ref().unchecked_ref(),
		)?;
		popstate_handler.forget();

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use radar_urls::client_router::{MemoryHistory, NavigationOutcome, OutletState};
	use rstest::rstest;

	fn settings(base_url: &str) -> FrontendSettings {
		FrontendSettings {
			base_url: base_url.to_string(),
			..Default::default()
		}
	}

	#[rstest]
	fn test_launch_mounts_home_under_base() {
		let launched = launch(&settings("/radar"), MemoryHistory::new("/radar/")).unwrap();

		assert_eq!(
			launched.initial.outcome(),
			Some(&NavigationOutcome::Mounted {
				route: Some("home".to_string())
			})
		);
		assert_eq!(launched.router.href_named("demandas", &[]).unwrap(), "/radar/demandas");
	}

	#[rstest]
	#[tokio::test]
	async fn test_launch_on_lazy_route_is_pending() {
		let launched = launch(&settings("/"), MemoryHistory::new("/interrupcoes")).unwrap();
		assert!(launched.initial.is_pending());
		assert!(launched.router.outlet().get().is_loading());

		let outcome = launched.initial.settle().await.unwrap();
		assert_eq!(
			outcome,
			NavigationOutcome::Mounted {
				route: Some("interrupcoes".to_string())
			}
		);
	}

	#[rstest]
	fn test_launch_outside_base_mounts_nothing() {
		let launched = launch(&settings("/radar"), MemoryHistory::new("/outro")).unwrap();
		assert!(matches!(
			launched.router.outlet().get(),
			OutletState::Unmatched { .. }
		));
	}
}
