// ============================================================================
// APP - Monta el componente de inicio de sesión en el elemento raíz
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::models::RedirectTarget;
use crate::services::{ApiClient, BrowserNavigator};
use crate::state::{CancellationToken, ViewPhase};
use crate::viewmodels::{BrowserSignIn, SignInViewModel};
use crate::views::{read_form, render_app, restore_form};

pub struct App {
    view_model: Rc<BrowserSignIn>,
    root: Option<Element>,
    redirect: RedirectTarget,
}

impl App {
    pub fn new(redirect: RedirectTarget) -> Result<Self, JsValue> {
        let root = get_element_by_id(&CONFIG.root_element_id).ok_or_else(|| {
            JsValue::from_str(&format!("No #{} element found", CONFIG.root_element_id))
        })?;

        let token = CancellationToken::new();
        let view_model = Rc::new(SignInViewModel::new(
            ApiClient::new(token.clone()),
            BrowserNavigator,
            redirect.clone(),
            token,
        ));

        // Varios cambios seguidos (check + diálogo) => un solo re-render
        let render_pending = Rc::new(Cell::new(false));
        view_model.state().subscribe_to_changes(move || {
            if render_pending.replace(true) {
                return;
            }
            let render_pending = Rc::clone(&render_pending);
            Timeout::new(0, move || {
                render_pending.set(false);
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self {
            view_model,
            root: Some(root),
            redirect,
        })
    }

    /// Lanza la comprobación de sesión
    pub fn mount(&self) {
        let view_model = Rc::clone(&self.view_model);
        spawn_local(async move {
            view_model.check_session().await;
        });
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        let Some(root) = &self.root else {
            log::debug!("[APP] render() tras desmontar, ignorado");
            return Ok(());
        };

        // Lo tecleado sobrevive al re-render que muestra el diálogo
        let typed = (self.view_model.state().phase() == ViewPhase::Ready).then(read_form);

        set_inner_html(root, "");
        let view = render_app(&self.view_model)?;
        append_child(root, &view)?;

        if let Some(credentials) = typed {
            restore_form(&credentials);
        }
        Ok(())
    }

    /// Destino leído al cargar; se reutiliza al volver de la back/forward cache
    pub fn redirect(&self) -> &RedirectTarget {
        &self.redirect
    }

    /// `pagehide`: aborta peticiones en vuelo y deja el DOM como está
    pub fn suspend(&self) {
        self.view_model.teardown();
    }

    /// Aborta peticiones en vuelo y vacía el elemento raíz
    pub fn unmount(&mut self) {
        self.view_model.teardown();
        if let Some(root) = self.root.take() {
            set_inner_html(&root, "");
        }
    }
}
