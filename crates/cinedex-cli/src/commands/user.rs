use anyhow::Result;
use chrono::NaiveDate;
use cinedex_core::user::{NewUser, ProfileUpdate};

use super::context::AppContext;
use super::output::print_json;

pub async fn register(
    ctx: &AppContext,
    username: String,
    password: String,
    email: String,
    birthday: Option<NaiveDate>,
) -> Result<()> {
    let profile = ctx
        .accounts
        .register(NewUser {
            username,
            password,
            email,
            birthday,
        })
        .await?;
    print_json(&profile)
}

pub async fn login(ctx: &AppContext, username: &str, password: &str) -> Result<()> {
    let profile = ctx.accounts.login(username, password).await?;
    print_json(&profile)
}

pub async fn show(ctx: &AppContext, username: &str) -> Result<()> {
    let profile = ctx.accounts.get_profile(username).await?;
    print_json(&profile)
}

pub async fn list(ctx: &AppContext) -> Result<()> {
    let profiles = ctx.accounts.list_profiles().await?;
    print_json(&profiles)
}

/// Builds the update payload from command-line flags. No `--favorite` flags
/// means the favorites list is left alone.
pub fn profile_update(
    username: Option<String>,
    password: Option<String>,
    email: Option<String>,
    birthday: Option<NaiveDate>,
    favorites: Vec<String>,
) -> ProfileUpdate {
    ProfileUpdate {
        username,
        password,
        email,
        birthday,
        favorite_movie_ids: (!favorites.is_empty()).then_some(favorites),
    }
}

pub async fn update(ctx: &AppContext, username: &str, update: ProfileUpdate) -> Result<()> {
    let profile = ctx.accounts.update_profile(username, update).await?;
    print_json(&profile)
}

pub async fn delete(ctx: &AppContext, username: &str) -> Result<()> {
    ctx.accounts.delete_account(username).await?;
    print_json(&serde_json::json!({ "deleted": username }))
}
