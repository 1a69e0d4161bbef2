// ============================================================================
// SIGN-IN PWA - FRONTEND MVVM (RUST PURO)
// ============================================================================
// - Views: funciones que renderizan DOM (sin lógica)
// - ViewModels: estado + lógica UI
// - Services: SOLO comunicación HTTP y navegación
// - State: Rc<RefCell> + notificaciones
// - Models: tipos y errores
// ============================================================================

mod app;
mod config;
mod dom;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_logger::Config;
use web_sys::{Event, PageTransitionEvent};

use crate::app::App;
use crate::config::CONFIG;
use crate::models::RedirectTarget;
use crate::state::{LifecycleAction, PageEvent};
use crate::utils::{current_search, query_param, REDIRECT_PARAM};

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 [APP] Sign-in arrancando");

    // El query param se lee una sola vez, aquí
    let redirect = RedirectTarget::from_param(query_param(&current_search(), REDIRECT_PARAM));
    log::debug!("[APP] redirect = '{}'", redirect.as_str());

    start_component(redirect)?;

    // Listeners de window: se registran una sola vez
    if let Some(window) = web_sys::window() {
        crate::dom::on_event(&window, "pagehide", |e| {
            handle_page_event(PageEvent::Hide { persisted: persisted(&e) })
        })?;
        crate::dom::on_event(&window, "pageshow", |e| {
            handle_page_event(PageEvent::Show { persisted: persisted(&e) })
        })?;
    }

    Ok(())
}

/// Crear, renderizar y montar un componente nuevo en APP
fn start_component(redirect: RedirectTarget) -> Result<(), JsValue> {
    let mut app = App::new(redirect)?;
    app.render()?;
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    APP.with(|cell| {
        if let Some(app) = cell.borrow().as_ref() {
            app.mount();
        }
    });
    Ok(())
}

fn persisted(event: &Event) -> bool {
    event
        .dyn_ref::<PageTransitionEvent>()
        .map(PageTransitionEvent::persisted)
        .unwrap_or(false)
}

fn handle_page_event(event: PageEvent) {
    match event.action() {
        LifecycleAction::Suspend => {
            log::debug!("[APP] {:?}: cancelando peticiones en vuelo", event);
            APP.with(|cell| {
                if let Some(app) = cell.borrow().as_ref() {
                    app.suspend();
                }
            });
        }
        LifecycleAction::Remount => {
            log::info!("🔄 [APP] Página restaurada de la back/forward cache, remontando");
            let previous = APP.with(|cell| cell.borrow_mut().take());
            let redirect = previous
                .as_ref()
                .map(|app| app.redirect().clone())
                .unwrap_or_default();
            if let Some(previous) = previous {
                previous.suspend();
            }
            if let Err(e) = start_component(redirect) {
                log::error!("❌ [APP] Error remontando: {}", crate::dom::js_error_message(&e));
            }
        }
        LifecycleAction::Ignore => {}
    }
}

/// Re-render completo del componente montado
pub fn rerender_app() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            if let Err(e) = app.render() {
                log::error!("❌ [APP] Error re-renderizando: {}", crate::dom::js_error_message(&e));
            }
        } else {
            log::warn!("⚠️ [APP] rerender sin componente montado");
        }
    });
}

/// Desmontar desde JavaScript
#[wasm_bindgen]
pub fn unmount_sign_in() {
    let app = APP.with(|cell| cell.borrow_mut().take());
    if let Some(mut app) = app {
        app.unmount();
    }
}
