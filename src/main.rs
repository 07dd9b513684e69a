mod core;
mod error;
mod handlers;
mod impls;
mod metrics;
mod response;
#[cfg(test)]
mod test_util;

use std::sync::Arc;

use actix_web::web::{delete, get, post, put, scope, Data};
use actix_web::HttpServer;
use sqlx::postgres::PgPoolOptions;

use impls::memory::cache::MemoryCache;
use impls::memory::search::MemorySearch;

type Cache = MemoryCache;
type Search = MemorySearch;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let database_url = dotenv::var("DATABASE_URL")?;
    let bind_addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let pool = PgPoolOptions::new().max_connections(5).connect(&database_url).await?;
    let cache = Arc::new(Cache::default());
    let index = Arc::new(Search::default());
    metrics::spawn_reporter(pool.clone(), cache.clone(), index.clone());
    log::info!("listening on {}", bind_addr);
    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::from(cache.clone()))
            .app_data(Data::from(index.clone()))
            .service(
                scope("{module}")
                    .service(
                        scope("questions")
                            .route("", post().to(handlers::question::create::<Cache, Search>))
                            .route("search", get().to(handlers::question::search::<Search>))
                            .route("updates", post().to(handlers::question::new_updates::<Cache>))
                            .route("list", post().to(handlers::question::list::<Cache>))
                            .route("all", delete().to(handlers::question::purge::<Cache, Search>))
                            .route("{id}", get().to(handlers::question::detail::<Cache>))
                            .route("{id}", put().to(handlers::question::update::<Cache, Search>))
                            .route("{id}", delete().to(handlers::question::delete::<Cache, Search>)),
                    )
                    .service(
                        scope("sub-questions")
                            .route("", post().to(handlers::sub_question::create::<Cache, Search>))
                            .route("{id}", get().to(handlers::sub_question::detail))
                            .route("{id}", put().to(handlers::sub_question::update::<Cache, Search>))
                            .route("{id}", delete().to(handlers::sub_question::delete::<Cache, Search>)),
                    )
                    .service(
                        scope("fill-in-the-blank-answers")
                            .route("", post().to(handlers::answer::create::<Cache, Search>))
                            .route("{id}", get().to(handlers::answer::detail))
                            .route("{id}", put().to(handlers::answer::update::<Cache, Search>))
                            .route("{id}", delete().to(handlers::answer::delete::<Cache, Search>)),
                    )
                    .service(
                        scope("choice-one-options")
                            .route("", post().to(handlers::option::create::<Cache, Search>))
                            .route("{id}", get().to(handlers::option::detail))
                            .route("{id}", put().to(handlers::option::update::<Cache, Search>))
                            .route("{id}", delete().to(handlers::option::delete::<Cache, Search>)),
                    )
                    .service(
                        scope("matching-pairs")
                            .route("", post().to(handlers::matching::create::<Cache, Search>))
                            .route("{id}", get().to(handlers::matching::detail))
                            .route("{id}", put().to(handlers::matching::update::<Cache, Search>))
                            .route("{id}", delete().to(handlers::matching::delete::<Cache, Search>)),
                    )
                    .service(
                        scope("true-false-items")
                            .route("", post().to(handlers::true_false::create::<Cache, Search>))
                            .route("{id}", get().to(handlers::true_false::detail))
                            .route("{id}", put().to(handlers::true_false::update::<Cache, Search>))
                            .route("{id}", delete().to(handlers::true_false::delete::<Cache, Search>)),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await?;
    Ok(())
}
