pub mod loading;
pub mod dialog;
pub mod sign_in;

pub use loading::render_loading;
pub use dialog::render_dialog;
pub use sign_in::{read_form, render_sign_in, restore_form};

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::state::ViewPhase;
use crate::viewmodels::BrowserSignIn;

/// Vista raíz según la fase
pub fn render_app(view_model: &Rc<BrowserSignIn>) -> Result<Element, JsValue> {
    match view_model.state().phase() {
        ViewPhase::Loading => render_loading("Checking authentication"),
        ViewPhase::Ready => render_sign_in(view_model),
        ViewPhase::Navigating => render_loading("Redirecting"),
    }
}
