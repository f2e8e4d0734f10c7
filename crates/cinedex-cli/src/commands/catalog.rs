use anyhow::Result;

use super::context::AppContext;
use super::output::print_json;

pub async fn list_movies(ctx: &AppContext) -> Result<()> {
    print_json(&ctx.catalog.list_movies().await?)
}

pub async fn show_movie(ctx: &AppContext, title: &str) -> Result<()> {
    print_json(&ctx.catalog.movie_by_title(title).await?)
}

pub async fn list_genres(ctx: &AppContext) -> Result<()> {
    print_json(&ctx.catalog.list_genres().await?)
}

pub async fn show_genre(ctx: &AppContext, name: &str) -> Result<()> {
    print_json(&ctx.catalog.genre_by_name(name).await?)
}

pub async fn show_director(ctx: &AppContext, name: &str) -> Result<()> {
    print_json(&ctx.catalog.director_by_name(name).await?)
}
