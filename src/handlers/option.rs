use actix_web::web::{Data, Json, Path};
use actix_web::HttpResponse;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::models::option::{ChoiceOption, Create as OptionCreate, FieldUpdate};
use crate::core::ports::cache::DetailCache;
use crate::core::ports::search::SearchIndex;
use crate::core::services::option as service;
use crate::error::Error;
use crate::impls::postgres::PgStore;

pub async fn create<C, X>(path: Path<(String,)>, Json(data): Json<OptionCreate>, db: Data<PgPool>, cache: Data<C>, index: Data<X>) -> Result<HttpResponse, Error>
where
    C: DetailCache + 'static,
    X: SearchIndex + 'static,
{
    let module = path.into_inner().0.parse()?;
    let mut store = PgStore::new(db.begin().await?);
    let option = service::create_option(&mut store, cache.get_ref(), index.get_ref(), module, data).await?;
    store.into_inner().commit().await?;
    Ok(HttpResponse::Created().json(option))
}

pub async fn detail(path: Path<(String, Uuid)>, db: Data<PgPool>) -> Result<Json<ChoiceOption>, Error> {
    let (module, id) = path.into_inner();
    let mut store = PgStore::new(db.acquire().await?);
    let option = service::option_detail(&mut store, module.parse()?, id).await?;
    Ok(Json(option))
}

pub async fn update<C, X>(path: Path<(String, Uuid)>, Json(update): Json<FieldUpdate>, db: Data<PgPool>, cache: Data<C>, index: Data<X>) -> Result<HttpResponse, Error>
where
    C: DetailCache + 'static,
    X: SearchIndex + 'static,
{
    let (module, id) = path.into_inner();
    let mut store = PgStore::new(db.begin().await?);
    service::update_option(&mut store, cache.get_ref(), index.get_ref(), module.parse()?, id, update).await?;
    store.into_inner().commit().await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn delete<C, X>(path: Path<(String, Uuid)>, db: Data<PgPool>, cache: Data<C>, index: Data<X>) -> Result<HttpResponse, Error>
where
    C: DetailCache + 'static,
    X: SearchIndex + 'static,
{
    let (module, id) = path.into_inner();
    let mut store = PgStore::new(db.begin().await?);
    service::delete_option(&mut store, cache.get_ref(), index.get_ref(), module.parse()?, id).await?;
    store.into_inner().commit().await?;
    Ok(HttpResponse::NoContent().finish())
}
