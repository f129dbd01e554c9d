use tracing::instrument;

use super::Outcome;
use crate::{
    client::{api::BlogApi, notify::Notifier, store::ClientStore},
    users::dto::LoginRequest,
};

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default)]
pub struct LoginPage {
    pub form: LoginForm,
    loading: bool,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates a form field by its input name; unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: &str) {
        match name {
            "email" => self.form.email = value.to_string(),
            "password" => self.form.password = value.to_string(),
            _ => {}
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn button_label(&self) -> &'static str {
        if self.loading {
            "Logging in..."
        } else {
            "Signin"
        }
    }

    #[instrument(skip_all)]
    pub async fn submit(
        &mut self,
        api: &dyn BlogApi,
        store: &mut ClientStore,
        notifier: &mut Notifier,
    ) -> Outcome {
        self.loading = true;
        let req = LoginRequest {
            email: self.form.email.clone(),
            password: self.form.password.clone(),
        };
        let result = api.login(&req).await;
        self.loading = false;

        let res = match result {
            Ok(res) if res.success => res,
            Ok(_) => return Outcome::Stay,
            Err(e) => {
                notifier.error(e.user_message("Login failed"));
                return Outcome::Stay;
            }
        };

        if let Err(e) = store.login_user(res.user, res.token) {
            notifier.error(e.user_message("Login failed"));
            return Outcome::Stay;
        }
        notifier.success(res.message);
        Outcome::Navigate("/")
    }
}
