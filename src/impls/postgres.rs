use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query, query_as, Executor, FromRow, Postgres};
use uuid::Uuid;

use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert},
    matching::{Insert as MatchingInsert, MatchingPair},
    option::{ChoiceOption, Insert as OptionInsert},
    question::{Insert as QuestionInsert, Module, Question},
    sub_question::{Insert as SubQuestionInsert, SubQuestion},
    true_false::{Insert as TrueFalseInsert, TrueFalseItem},
};
use crate::core::ports::repository::{AnswerStore, MatchingStore, OptionStore, QuestionStore, SubQuestionStore, TrueFalseStore};
use crate::error::Error;

/// Repository adapter over any sqlx Postgres executor, so pool connections
/// and open transactions run through the same code.
pub struct PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    executor: E,
}

impl<E> PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn into_inner(self) -> E {
        self.executor
    }
}

#[derive(Debug, FromRow)]
struct QuestionRow {
    id: Uuid,
    module: String,
    question_type: String,
    topics: Vec<String>,
    instruction: String,
    title: String,
    passages: Vec<String>,
    image_urls: Vec<String>,
    max_time: i32,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = Error;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let module = row.module.parse::<Module>().map_err(|_| Error::Internal(format!("corrupt module value {}", row.module)))?;
        let type_ = row
            .question_type
            .parse()
            .map_err(|_| Error::Internal(format!("corrupt question type value {}", row.question_type)))?;
        Ok(Question {
            id: row.id,
            module,
            type_,
            topics: row.topics,
            instruction: row.instruction,
            title: row.title,
            passages: row.passages,
            image_urls: row.image_urls,
            max_time: row.max_time,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl<E> QuestionStore for PgStore<E>
where
    E: Send,
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, data: QuestionInsert) -> Result<Question, Error> {
        let row: QuestionRow = query_as(
            "
        INSERT INTO questions (id, module, question_type, topics, instruction, title, passages, image_urls, max_time, version)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 1)
        RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.module.as_str())
        .bind(data.type_.as_str())
        .bind(&data.topics)
        .bind(&data.instruction)
        .bind(&data.title)
        .bind(&data.passages)
        .bind(&data.image_urls)
        .bind(data.max_time)
        .fetch_one(&mut self.executor)
        .await?;
        row.try_into()
    }

    async fn get(&mut self, id: Uuid) -> Result<Question, Error> {
        let row: Option<QuestionRow> = query_as("SELECT * FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?;
        row.ok_or_else(|| Error::not_found("question"))?.try_into()
    }

    async fn query(&mut self, ids: &[Uuid]) -> Result<Vec<Question>, Error> {
        let rows: Vec<QuestionRow> = query_as("SELECT * FROM questions WHERE id = ANY($1) ORDER BY created_at")
            .bind(ids.to_vec())
            .fetch_all(&mut self.executor)
            .await?;
        rows.into_iter().map(Question::try_from).collect()
    }

    async fn update(&mut self, question: &Question) -> Result<(), Error> {
        query(
            "
        UPDATE questions
        SET topics = $1, instruction = $2, title = $3, passages = $4, image_urls = $5, max_time = $6, version = $7, updated_at = $8
        WHERE id = $9",
        )
        .bind(&question.topics)
        .bind(&question.instruction)
        .bind(&question.title)
        .bind(&question.passages)
        .bind(&question.image_urls)
        .bind(question.max_time)
        .bind(question.version)
        .bind(question.updated_at)
        .bind(question.id)
        .execute(&mut self.executor)
        .await?;
        Ok(())
    }

    async fn delete(&mut self, id: Uuid) -> Result<u64, Error> {
        let res = query("DELETE FROM questions WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected())
    }

    async fn delete_by_module(&mut self, module: Module) -> Result<u64, Error> {
        let res = query("DELETE FROM questions WHERE module = $1")
            .bind(module.as_str())
            .execute(&mut self.executor)
            .await?;
        Ok(res.rows_affected())
    }
}

#[async_trait]
impl<E> SubQuestionStore for PgStore<E>
where
    E: Send,
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, data: SubQuestionInsert) -> Result<SubQuestion, Error> {
        query_as(
            "
        INSERT INTO sub_questions (id, question_id, content, audio_url)
        VALUES ($1, $2, $3, $4)
        RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.question_id)
        .bind(&data.content)
        .bind(&data.audio_url)
        .fetch_one(&mut self.executor)
        .await
        .map_err(|e| match &e {
            // unique constraint on question_id: one sub-question per root
            sqlx::Error::Database(d) if d.code().as_deref() == Some("23505") => Error::InvalidInput("question already has a sub-question".into()),
            _ => Error::Database(e),
        })
    }

    async fn get(&mut self, id: Uuid) -> Result<SubQuestion, Error> {
        query_as("SELECT * FROM sub_questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?
            .ok_or_else(|| Error::not_found("sub-question"))
    }

    async fn get_by_question(&mut self, question_id: Uuid) -> Result<Option<SubQuestion>, Error> {
        let sub = query_as("SELECT * FROM sub_questions WHERE question_id = $1")
            .bind(question_id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(sub)
    }

    async fn update(&mut self, sub_question: &SubQuestion) -> Result<(), Error> {
        query("UPDATE sub_questions SET content = $1, audio_url = $2 WHERE id = $3")
            .bind(&sub_question.content)
            .bind(&sub_question.audio_url)
            .bind(sub_question.id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn delete(&mut self, id: Uuid) -> Result<u64, Error> {
        let res = query("DELETE FROM sub_questions WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected())
    }
}

#[async_trait]
impl<E> AnswerStore for PgStore<E>
where
    E: Send,
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, data: AnswerInsert) -> Result<Answer, Error> {
        let answer = query_as(
            "
        INSERT INTO answers (id, question_id, sub_question_id, content, explanation)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.question_id)
        .bind(data.sub_question_id)
        .bind(&data.content)
        .bind(&data.explanation)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(answer)
    }

    async fn get(&mut self, id: Uuid) -> Result<Answer, Error> {
        query_as("SELECT * FROM answers WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?
            .ok_or_else(|| Error::not_found("answer"))
    }

    async fn list_by_sub_question(&mut self, sub_question_id: Uuid) -> Result<Vec<Answer>, Error> {
        let answers = query_as("SELECT * FROM answers WHERE sub_question_id = $1 ORDER BY created_at")
            .bind(sub_question_id)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(answers)
    }

    async fn update(&mut self, answer: &Answer) -> Result<(), Error> {
        query("UPDATE answers SET content = $1, explanation = $2 WHERE id = $3")
            .bind(&answer.content)
            .bind(&answer.explanation)
            .bind(answer.id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn delete(&mut self, id: Uuid) -> Result<u64, Error> {
        let res = query("DELETE FROM answers WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected())
    }
}

#[async_trait]
impl<E> OptionStore for PgStore<E>
where
    E: Send,
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, data: OptionInsert) -> Result<ChoiceOption, Error> {
        let option = query_as(
            "
        INSERT INTO options (id, question_id, sub_question_id, content, is_correct, explanation)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.question_id)
        .bind(data.sub_question_id)
        .bind(&data.content)
        .bind(data.is_correct)
        .bind(&data.explanation)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(option)
    }

    async fn get(&mut self, id: Uuid) -> Result<ChoiceOption, Error> {
        query_as("SELECT * FROM options WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?
            .ok_or_else(|| Error::not_found("option"))
    }

    async fn list_by_sub_question(&mut self, sub_question_id: Uuid) -> Result<Vec<ChoiceOption>, Error> {
        let options = query_as("SELECT * FROM options WHERE sub_question_id = $1 ORDER BY created_at")
            .bind(sub_question_id)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(options)
    }

    async fn update(&mut self, option: &ChoiceOption) -> Result<(), Error> {
        query("UPDATE options SET content = $1, is_correct = $2, explanation = $3 WHERE id = $4")
            .bind(&option.content)
            .bind(option.is_correct)
            .bind(&option.explanation)
            .bind(option.id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn delete(&mut self, id: Uuid) -> Result<u64, Error> {
        let res = query("DELETE FROM options WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected())
    }

    async fn clear_correct_except(&mut self, sub_question_id: Uuid, keep: Uuid) -> Result<u64, Error> {
        let res = query("UPDATE options SET is_correct = FALSE WHERE sub_question_id = $1 AND id <> $2 AND is_correct")
            .bind(sub_question_id)
            .bind(keep)
            .execute(&mut self.executor)
            .await?;
        Ok(res.rows_affected())
    }
}

#[async_trait]
impl<E> MatchingStore for PgStore<E>
where
    E: Send,
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, data: MatchingInsert) -> Result<MatchingPair, Error> {
        let pair = query_as(
            "
        INSERT INTO matching_pairs (id, question_id, left_text, right_text, explanation)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.question_id)
        .bind(&data.left)
        .bind(&data.right)
        .bind(&data.explanation)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(pair)
    }

    async fn get(&mut self, id: Uuid) -> Result<MatchingPair, Error> {
        query_as("SELECT * FROM matching_pairs WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?
            .ok_or_else(|| Error::not_found("matching pair"))
    }

    async fn list_by_question(&mut self, question_id: Uuid) -> Result<Vec<MatchingPair>, Error> {
        let pairs = query_as("SELECT * FROM matching_pairs WHERE question_id = $1 ORDER BY created_at")
            .bind(question_id)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(pairs)
    }

    async fn update(&mut self, pair: &MatchingPair) -> Result<(), Error> {
        query("UPDATE matching_pairs SET left_text = $1, right_text = $2, explanation = $3 WHERE id = $4")
            .bind(&pair.left)
            .bind(&pair.right)
            .bind(&pair.explanation)
            .bind(pair.id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn delete(&mut self, id: Uuid) -> Result<u64, Error> {
        let res = query("DELETE FROM matching_pairs WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected())
    }
}

#[async_trait]
impl<E> TrueFalseStore for PgStore<E>
where
    E: Send,
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, data: TrueFalseInsert) -> Result<TrueFalseItem, Error> {
        let item = query_as(
            "
        INSERT INTO true_false_items (id, question_id, statement, answer, explanation)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.question_id)
        .bind(&data.statement)
        .bind(data.answer)
        .bind(&data.explanation)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(item)
    }

    async fn get(&mut self, id: Uuid) -> Result<TrueFalseItem, Error> {
        query_as("SELECT * FROM true_false_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?
            .ok_or_else(|| Error::not_found("true/false item"))
    }

    async fn list_by_question(&mut self, question_id: Uuid) -> Result<Vec<TrueFalseItem>, Error> {
        let items = query_as("SELECT * FROM true_false_items WHERE question_id = $1 ORDER BY created_at")
            .bind(question_id)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(items)
    }

    async fn update(&mut self, item: &TrueFalseItem) -> Result<(), Error> {
        query("UPDATE true_false_items SET statement = $1, answer = $2, explanation = $3 WHERE id = $4")
            .bind(&item.statement)
            .bind(item.answer)
            .bind(&item.explanation)
            .bind(item.id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn delete(&mut self, id: Uuid) -> Result<u64, Error> {
        let res = query("DELETE FROM true_false_items WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected())
    }
}
