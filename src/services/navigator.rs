// ============================================================================
// NAVIGATOR - Navegación de página completa
// ============================================================================

use crate::dom::js_error_message;

/// Navegación del navegador, separada para poder sustituirla en tests
pub trait Navigator {
    /// Emitir la navegación. `Err` si el navegador la rechaza.
    fn navigate(&self, url: &str) -> Result<(), String>;
}

/// `window.location.href = url`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) -> Result<(), String> {
        let window = web_sys::window().ok_or_else(|| "No window".to_string())?;
        window
            .location()
            .set_href(url)
            .map_err(|e| js_error_message(&e))
    }
}
