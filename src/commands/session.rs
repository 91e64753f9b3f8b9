use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{LogInForm, User};
use crate::{App, Result};
use anyhow::Context;

/// Exchanges `form` for a user id and persists the session. `admin` selects the role the API is
/// asked to act as.
pub async fn login(app: &App, form: &LogInForm, admin: bool) -> Result<Out<User>> {
    let email = form.validate()?;
    let user_id = app
        .api()
        .log_in(email, &form.password)
        .await
        .context("Unable to log in")
        .pub_result(ErrorType::Request)?;
    let user = app.sign_in(user_id, admin).await?;
    Ok(Out::new("Login successful", user))
}

pub async fn logout(app: &App) -> Result<Out<()>> {
    app.sign_out().await?;
    Ok("Logout successful".into())
}

/// Reports who is signed in. Being signed out is not an error.
pub async fn whoami(app: &App) -> Result<Out<Option<User>>> {
    let user = app.session().current_user();
    let message = match user {
        Some(user) if user.is_admin() => format!("Signed in as user {} (admin)", user.user_id()),
        Some(user) => format!("Signed in as user {}", user.user_id()),
        None => "Nobody is signed in".to_string(),
    };
    Ok(Out::new(message, user))
}
