pub mod sign_in_viewmodel;

pub use sign_in_viewmodel::SignInViewModel;

use crate::services::{ApiClient, BrowserNavigator};

/// ViewModel tal como se monta en el navegador
pub type BrowserSignIn = SignInViewModel<ApiClient, BrowserNavigator>;
