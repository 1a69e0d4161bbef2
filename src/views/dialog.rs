// ============================================================================
// DIALOG VIEW - Modal de error con botón Cancel
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::state::DialogState;
use crate::viewmodels::BrowserSignIn;

/// Siempre se renderiza; `visible` decide la clase `open`
pub fn render_dialog(dialog: &DialogState, view_model: &Rc<BrowserSignIn>) -> Result<Element, JsValue> {
    let overlay_class = if dialog.visible {
        "dialog-overlay open"
    } else {
        "dialog-overlay"
    };

    let cancel_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-text btn-primary")
        .text("Cancel")
        .build();

    {
        let view_model = Rc::clone(view_model);
        on_click(&cancel_btn, move |_| view_model.dismiss_dialog())?;
    }

    let panel = ElementBuilder::new("div")?
        .class("dialog")
        .attr("role", "dialog")?
        .attr("aria-modal", "true")?
        .attr("aria-labelledby", "sign-in-dialog-title")?
        .child(
            ElementBuilder::new("h2")?
                .id("sign-in-dialog-title")?
                .class("dialog-title")
                .text(&dialog.title)
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("dialog-content")
                .child(ElementBuilder::new("p")?.class("body2").text(&dialog.message).build())?
                .build(),
        )?
        .child(ElementBuilder::new("div")?.class("dialog-actions").child(cancel_btn)?.build())?
        .build();

    let overlay = ElementBuilder::new("div")?
        .class(overlay_class)
        .attr("aria-hidden", if dialog.visible { "false" } else { "true" })?
        .child(panel)?
        .build();

    Ok(overlay)
}
