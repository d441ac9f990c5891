use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    pkg::internal::{
        adaptors::jobs::spec::{JobEntry, JobPatch, NewJob},
        sql::{bind_values, sql_for_partial_update, SqlValue},
    },
    prelude::{JobliteError, Result},
};

pub struct JobMutator<'a> {
    pool: &'a PgPool,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        JobMutator { pool }
    }

    /// Job titles carry no uniqueness rule of their own; a `Duplicate` error
    /// only arises when the schema itself enforces a unique key.
    pub async fn create(&self, job: NewJob) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, salary, equity, company_handle
            "#,
        )
        .bind(&job.title)
        .bind(job.salary)
        .bind(job.equity)
        .bind(&job.company_handle)
        .fetch_one(self.pool)
        .await
        .map_err(|e| JobliteError::on_insert(e, format!("duplicate job: {}", job.title)))?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, patch: JobPatch) -> Result<JobEntry> {
        let mut data: Vec<(&str, SqlValue)> = Vec::new();
        if let Some(title) = patch.title {
            data.push(("title", SqlValue::Text(title)));
        }
        if let Some(salary) = patch.salary {
            data.push(("salary", SqlValue::Int(salary)));
        }
        if let Some(equity) = patch.equity {
            data.push(("equity", SqlValue::Float(equity)));
        }
        // Rejects empty patches before any statement reaches the store.
        let update = sql_for_partial_update(data, &HashMap::new())?;
        let id_idx = update.values.len() + 1;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} \
             RETURNING id, title, salary, equity, company_handle",
            update.set_cols, id_idx
        );
        tracing::debug!("updating job {}: {}", id, &update.set_cols);
        let row = bind_values(sqlx::query_as::<_, JobEntry>(&sql), update.values)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        row.ok_or_else(|| JobliteError::NotFound(format!("no job: {id}")))
    }

    pub async fn remove(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(JobliteError::NotFound(format!("no job: {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::internal::adaptors::jobs::{selectors::JobSelector, testutil::test_pool};

    fn sample_job(title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            salary: Some(90000),
            equity: Some(0.05),
            company_handle: "acme".to_string(),
        }
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "requires a postgres database"]
    async fn test_create_then_get_roundtrip() -> Result<()> {
        let pool = test_pool().await?;
        let mutator = JobMutator::new(&pool);
        let created = mutator.create(sample_job("roundtrip engineer")).await?;
        let fetched = JobSelector::new(&pool).get(created.id).await?;
        assert_eq!(created, fetched);
        mutator.remove(created.id).await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "requires a postgres database"]
    async fn test_update_changes_only_given_fields() -> Result<()> {
        let pool = test_pool().await?;
        let mutator = JobMutator::new(&pool);
        let created = mutator.create(sample_job("patchable engineer")).await?;
        let patch = JobPatch {
            salary: Some(120000),
            ..Default::default()
        };
        let updated = mutator.update(created.id, patch).await?;
        assert_eq!(updated.salary, Some(120000));
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.equity, created.equity);
        assert_eq!(updated.company_handle, created.company_handle);
        mutator.remove(created.id).await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "requires a postgres database"]
    async fn test_empty_patch_is_rejected_without_touching_the_row() -> Result<()> {
        let pool = test_pool().await?;
        let mutator = JobMutator::new(&pool);
        let created = mutator.create(sample_job("untouched engineer")).await?;
        let err = mutator
            .update(created.id, JobPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, JobliteError::InvalidRequest(_)));
        let fetched = JobSelector::new(&pool).get(created.id).await?;
        assert_eq!(fetched, created);
        mutator.remove(created.id).await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "requires a postgres database"]
    async fn test_update_missing_job_is_not_found() -> Result<()> {
        let pool = test_pool().await?;
        let mutator = JobMutator::new(&pool);
        let patch = JobPatch {
            title: Some("ghost".into()),
            ..Default::default()
        };
        let err = mutator.update(-1, patch).await.unwrap_err();
        assert!(matches!(err, JobliteError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "requires a postgres database"]
    async fn test_remove_twice_fails_the_second_time() -> Result<()> {
        let pool = test_pool().await?;
        let mutator = JobMutator::new(&pool);
        let created = mutator.create(sample_job("short lived engineer")).await?;
        mutator.remove(created.id).await?;
        let err = mutator.remove(created.id).await.unwrap_err();
        assert!(matches!(err, JobliteError::NotFound(_)));
        Ok(())
    }
}
