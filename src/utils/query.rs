// ============================================================================
// QUERY - URLs y cuerpos form-urlencoded
// ============================================================================

use url::form_urlencoded;

use crate::models::{Credentials, RedirectTarget};

/// Query string actual de la página (`?a=b`), vacía fuera del navegador
pub fn current_search() -> String {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default()
}

/// Buscar un parámetro en un query string, con o sin `?` inicial
pub fn query_param(search: &str, name: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Unir origen y ruta sin duplicar la barra
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// URL de login con el destino codificado como valor de query
pub fn build_login_url(base_url: &str, login_path: &str, redirect: &RedirectTarget) -> String {
    let encoded: String = form_urlencoded::byte_serialize(redirect.as_str().as_bytes()).collect();
    format!("{}?redirect={}", join_url(base_url, login_path), encoded)
}

/// Cuerpo `application/x-www-form-urlencoded` con `username` y `password`
pub fn encode_credentials(credentials: &Credentials) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("username", &credentials.username)
        .append_pair("password", &credentials.password)
        .finish()
}
