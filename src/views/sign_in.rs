// ============================================================================
// SIGN-IN VIEW - Formulario de inicio de sesión
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{input_value, on_submit, set_input_value, ElementBuilder};
use crate::models::Credentials;
use crate::utils::{EMAIL_INPUT_ID, PASSWORD_INPUT_ID};
use crate::viewmodels::BrowserSignIn;
use crate::views::render_dialog;

pub fn render_sign_in(view_model: &Rc<BrowserSignIn>) -> Result<Element, JsValue> {
    let dialog = render_dialog(&view_model.state().dialog.get(), view_model)?;

    let avatar = ElementBuilder::new("div")?
        .class("avatar")
        .attr("aria-hidden", "true")?
        .text("🔒")
        .build();

    let heading = ElementBuilder::new("h1")?.class("h5").text("Sign in").build();

    let email = text_field(EMAIL_INPUT_ID, "Email Address", "email", "email")?;
    let password = text_field(PASSWORD_INPUT_ID, "Password", "password", "current-password")?;

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-contained full-width")
        .text("Sign In")
        .build();

    let form = ElementBuilder::new("form")?
        .class("sign-in-form")
        .child(email)?
        .child(password)?
        .child(submit_btn)?
        .build();

    {
        let view_model = Rc::clone(view_model);
        on_submit(&form, move |e| {
            e.prevent_default();
            let credentials = read_form();
            let view_model = Rc::clone(&view_model);
            spawn_local(async move {
                view_model.submit(credentials).await;
            });
        })?;
    }

    let card = ElementBuilder::new("div")?
        .class("sign-in-card")
        .child(avatar)?
        .child(heading)?
        .child(form)?
        .build();

    Ok(ElementBuilder::new("main")?
        .class("container-xs")
        .child(dialog)?
        .child(card)?
        .build())
}

/// Campo requerido con etiqueta
fn text_field(id: &str, label: &str, input_type: &str, autocomplete: &str) -> Result<Element, JsValue> {
    let label_el = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(&format!("{} *", label))
        .build();

    let mut input = ElementBuilder::new("input")?
        .id(id)?
        .attr("name", id)?
        .attr("type", input_type)?
        .attr("autocomplete", autocomplete)?
        .flag("required")?;
    if id == EMAIL_INPUT_ID {
        input = input.flag("autofocus")?;
    }

    Ok(ElementBuilder::new("div")?
        .class("text-field")
        .child(label_el)?
        .child(input.build())?
        .build())
}

/// Valores actuales del formulario (`email` viaja como username)
pub fn read_form() -> Credentials {
    Credentials::new(
        input_value(EMAIL_INPUT_ID).unwrap_or_default(),
        input_value(PASSWORD_INPUT_ID).unwrap_or_default(),
    )
}

/// Reponer lo tecleado tras un re-render completo
pub fn restore_form(credentials: &Credentials) {
    set_input_value(EMAIL_INPUT_ID, &credentials.username);
    set_input_value(PASSWORD_INPUT_ID, &credentials.password);
}
