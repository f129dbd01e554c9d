use tracing::instrument;

use super::Outcome;
use crate::{
    client::{api::BlogApi, notify::Notifier},
    users::dto::RegisterRequest,
};

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default)]
pub struct RegisterPage {
    pub form: RegisterForm,
    loading: bool,
}

impl RegisterPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, name: &str, value: &str) {
        match name {
            "name" => self.form.name = value.to_string(),
            "email" => self.form.email = value.to_string(),
            "password" => self.form.password = value.to_string(),
            _ => {}
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[instrument(skip_all)]
    pub async fn submit(&mut self, api: &dyn BlogApi, notifier: &mut Notifier) -> Outcome {
        self.loading = true;
        let req = RegisterRequest {
            email: self.form.email.clone(),
            password: self.form.password.clone(),
            name: self.form.name.clone(),
        };
        let result = api.register(&req).await;
        self.loading = false;

        match result {
            Ok(res) => {
                notifier.success(res.message);
                self.form = RegisterForm::default();
                Outcome::Navigate("/login")
            }
            Err(e) => {
                notifier.error(e.user_message("Registration failed"));
                Outcome::Stay
            }
        }
    }
}
