use actix_web::web::{Data, Json, Path, Query};
use actix_web::HttpResponse;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::models::detail::QuestionDetail;
use crate::core::models::question::{Create as QuestionCreate, FieldUpdate, Module, VersionCheck};
use crate::core::models::search::{SearchDocument, SearchQuery};
use crate::core::ports::cache::DetailCache;
use crate::core::ports::search::SearchIndex;
use crate::core::services::question as service;
use crate::error::Error;
use crate::impls::postgres::PgStore;
use crate::response::{List, Page, Success};

pub async fn create<C, X>(path: Path<(String,)>, Json(data): Json<QuestionCreate>, db: Data<PgPool>, cache: Data<C>, index: Data<X>) -> Result<HttpResponse, Error>
where
    C: DetailCache + 'static,
    X: SearchIndex + 'static,
{
    let module: Module = path.into_inner().0.parse()?;
    let mut store = PgStore::new(db.begin().await?);
    let question = service::create_question(&mut store, cache.get_ref(), index.get_ref(), module, data).await?;
    store.into_inner().commit().await?;
    Ok(HttpResponse::Created().json(question))
}

pub async fn detail<C>(path: Path<(String, Uuid)>, db: Data<PgPool>, cache: Data<C>) -> Result<Json<QuestionDetail>, Error>
where
    C: DetailCache + 'static,
{
    let (module, id) = path.into_inner();
    let mut store = PgStore::new(db.acquire().await?);
    let detail = service::question_detail(&mut store, cache.get_ref(), module.parse()?, id).await?;
    Ok(Json(detail))
}

pub async fn update<C, X>(path: Path<(String, Uuid)>, Json(update): Json<FieldUpdate>, db: Data<PgPool>, cache: Data<C>, index: Data<X>) -> Result<HttpResponse, Error>
where
    C: DetailCache + 'static,
    X: SearchIndex + 'static,
{
    let (module, id) = path.into_inner();
    let mut store = PgStore::new(db.begin().await?);
    service::update_question_field(&mut store, cache.get_ref(), index.get_ref(), module.parse()?, id, update).await?;
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
    service::delete_question(&mut store, cache.get_ref(), index.get_ref(), module.parse()?, id).await?;
    store.into_inner().commit().await?;
    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Deserialize)]
pub struct UpdatesRequest {
    pub questions: Vec<VersionCheck>,
}

pub async fn new_updates<C>(path: Path<(String,)>, Json(req): Json<UpdatesRequest>, db: Data<PgPool>, cache: Data<C>) -> Result<Json<Success<List<QuestionDetail>>>, Error>
where
    C: DetailCache + 'static,
{
    let module: Module = path.into_inner().0.parse()?;
    let mut store = PgStore::new(db.acquire().await?);
    let changed = service::new_updates(&mut store, cache.get_ref(), module, req.questions).await?;
    let total = changed.len() as i64;
    Ok(Json(Success::new(List::new(changed, total))))
}

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    pub question_ids: Vec<Uuid>,
}

pub async fn list<C>(path: Path<(String,)>, Json(req): Json<ListRequest>, db: Data<PgPool>, cache: Data<C>) -> Result<Json<Success<List<QuestionDetail>>>, Error>
where
    C: DetailCache + 'static,
{
    let module: Module = path.into_inner().0.parse()?;
    let mut store = PgStore::new(db.acquire().await?);
    let details = service::questions_by_ids(&mut store, cache.get_ref(), module, req.question_ids).await?;
    let total = details.len() as i64;
    Ok(Json(Success::new(List::new(details, total))))
}

pub async fn search<X>(path: Path<(String,)>, Query(query): Query<SearchQuery>, index: Data<X>) -> Result<Json<Success<Page<SearchDocument>>>, Error>
where
    X: SearchIndex + 'static,
{
    let module: Module = path.into_inner().0.parse()?;
    let (page, limit) = (query.page, query.limit);
    let (questions, total) = service::search_questions(index.get_ref(), module, query).await?;
    Ok(Json(Success::new(Page { questions, total, page, limit })))
}

pub async fn purge<C, X>(path: Path<(String,)>, db: Data<PgPool>, cache: Data<C>, index: Data<X>) -> Result<HttpResponse, Error>
where
    C: DetailCache + 'static,
    X: SearchIndex + 'static,
{
    let module: Module = path.into_inner().0.parse()?;
    let mut store = PgStore::new(db.begin().await?);
    service::purge_module(&mut store, cache.get_ref(), index.get_ref(), module).await?;
    store.into_inner().commit().await?;
    Ok(HttpResponse::NoContent().finish())
}
