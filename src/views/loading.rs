// ============================================================================
// LOADING VIEW - Spinner mientras se comprueba la sesión
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;

pub fn render_loading(message: &str) -> Result<Element, JsValue> {
    let spinner = ElementBuilder::new("div")?
        .class("spinner")
        .attr("role", "progressbar")?
        .build();

    let heading = ElementBuilder::new("h4")?
        .class("loading-message")
        .text(message)
        .build();

    Ok(ElementBuilder::new("div")?
        .class("loading-screen")
        .child(ElementBuilder::new("div")?.child(spinner)?.build())?
        .child(ElementBuilder::new("div")?.class("loading-label").child(heading)?.build())?
        .build())
}
