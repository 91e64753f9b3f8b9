use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::UserProfile;
use crate::{App, Result};
use anyhow::Context;

/// Fetches the profile of the signed-in user.
pub async fn profile(app: &App) -> Result<Out<UserProfile>> {
    let user = app.session().require_user()?;
    let profile = app
        .api()
        .fetch_profile(user)
        .await
        .context("Unable to load the profile")
        .pub_result(ErrorType::Request)?;

    let mut lines = vec![format!("{} <{}>", profile.name, profile.email)];
    let fields = [
        ("Date of birth", &profile.date_of_birth),
        ("Present address", &profile.present_address),
        ("Permanent address", &profile.permanent_address),
        ("City", &profile.city),
        ("Postal code", &profile.postal_code),
        ("Country", &profile.country),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            lines.push(format!("{label}: {value}"));
        }
    }
    Ok(Out::new(lines.join("\n"), profile))
}
