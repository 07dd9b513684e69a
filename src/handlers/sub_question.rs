use actix_web::web::{Data, Json, Path};
use actix_web::HttpResponse;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::models::sub_question::{Create as SubQuestionCreate, FieldUpdate, SubQuestion};
use crate::core::ports::cache::DetailCache;
use crate::core::ports::search::SearchIndex;
use crate::core::services::sub_question as service;
use crate::error::Error;
use crate::impls::postgres::PgStore;

pub async fn create<C, X>(path: Path<(String,)>, Json(data): Json<SubQuestionCreate>, db: Data<PgPool>, cache: Data<C>, index: Data<X>) -> Result<HttpResponse, Error>
where
    C: DetailCache + 'static,
    X: SearchIndex + 'static,
{
    let module = path.into_inner().0.parse()?;
    let mut store = PgStore::new(db.begin().await?);
    let sub = service::create_sub_question(&mut store, cache.get_ref(), index.get_ref(), module, data).await?;
    store.into_inner().commit().await?;
    Ok(HttpResponse::Created().json(sub))
}

pub async fn detail(path: Path<(String, Uuid)>, db: Data<PgPool>) -> Result<Json<SubQuestion>, Error> {
    let (module, id) = path.into_inner();
    let mut store = PgStore::new(db.acquire().await?);
    let sub = service::sub_question_detail(&mut store, module.parse()?, id).await?;
    Ok(Json(sub))
}

pub async fn update<C, X>(path: Path<(String, Uuid)>, Json(update): Json<FieldUpdate>, db: Data<PgPool>, cache: Data<C>, index: Data<X>) -> Result<HttpResponse, Error>
where
    C: DetailCache + 'static,
    X: SearchIndex + 'static,
{
    let (module, id) = path.into_inner();
    let mut store = PgStore::new(db.begin().await?);
    service::update_sub_question(&mut store, cache.get_ref(), index.get_ref(), module.parse()?, id, update).await?;
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
    service::delete_sub_question(&mut store, cache.get_ref(), index.get_ref(), module.parse()?, id).await?;
    store.into_inner().commit().await?;
    Ok(HttpResponse::NoContent().finish())
}
