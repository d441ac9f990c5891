use sqlx::PgPool;

use crate::{
    pkg::internal::{
        adaptors::jobs::spec::{JobEntry, JobFilter},
        sql::{bind_values, SqlValue},
    },
    prelude::{JobliteError, Result},
};

pub struct JobSelector<'a> {
    pool: &'a PgPool,
}

/// Assembles the filtered listing statement: one WHERE expression and one
/// bound value per filter present, AND-composed, ordered by title.
fn find_all_query(filter: &JobFilter) -> (String, Vec<SqlValue>) {
    let mut sql = String::from("SELECT id, title, salary, equity, company_handle FROM jobs");
    let mut wheres: Vec<String> = Vec::new();
    let mut values: Vec<SqlValue> = Vec::new();

    if let Some(title) = &filter.title {
        values.push(SqlValue::Text(format!("%{title}%")));
        wheres.push(format!("title ILIKE ${}", values.len()));
    }
    if let Some(min_salary) = filter.min_salary {
        values.push(SqlValue::Int(min_salary));
        wheres.push(format!("salary >= ${}", values.len()));
    }
    if filter.has_equity == Some(true) {
        wheres.push("equity > 0".to_string());
    }
    if !wheres.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&wheres.join(" AND "));
    }
    sql.push_str(" ORDER BY title");
    (sql, values)
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        JobSelector { pool }
    }

    pub async fn find_all(&self, filter: &JobFilter) -> Result<Vec<JobEntry>> {
        let (sql, values) = find_all_query(filter);
        let rows = bind_values(sqlx::query_as::<_, JobEntry>(&sql), values)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, salary, equity, company_handle FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        row.ok_or_else(|| JobliteError::NotFound(format!("no job: {id}")))
    }
}
