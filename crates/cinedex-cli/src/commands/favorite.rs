use anyhow::Result;

use super::context::AppContext;
use super::output::print_json;

pub async fn add(ctx: &AppContext, username: &str, movie: &str, by_title: bool) -> Result<()> {
    let profile = if by_title {
        ctx.accounts.add_favorite_by_title(username, movie).await?
    } else {
        ctx.accounts.add_favorite(username, movie).await?
    };
    print_json(&profile)
}

pub async fn remove(ctx: &AppContext, username: &str, movie: &str, by_title: bool) -> Result<()> {
    let profile = if by_title {
        ctx.accounts.remove_favorite_by_title(username, movie).await?
    } else {
        ctx.accounts.remove_favorite(username, movie).await?
    };
    print_json(&profile)
}

pub async fn list(ctx: &AppContext, username: &str) -> Result<()> {
    let movies = ctx.accounts.favorite_movies(username).await?;
    print_json(&movies)
}
