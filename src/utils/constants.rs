/// Endpoint de comprobación de sesión
pub const DEFAULT_WHOAMI_PATH: &str = "/auth/api/whoami";

/// Endpoint de login (recibe `?redirect=`)
pub const DEFAULT_LOGIN_PATH: &str = "/auth/api/login";

/// Elemento raíz donde se monta el componente
pub const DEFAULT_ROOT_ELEMENT_ID: &str = "app";

/// Query param con el destino tras autenticarse
pub const REDIRECT_PARAM: &str = "redirect";

/// IDs de los campos del formulario. El campo `email` viaja como `username`.
pub const EMAIL_INPUT_ID: &str = "email";
pub const PASSWORD_INPUT_ID: &str = "password";
