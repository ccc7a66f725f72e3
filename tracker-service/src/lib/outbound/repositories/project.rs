use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::project::errors::ProjectError;
use crate::project::models::CreateProjectCommand;
use crate::project::models::Project;
use crate::project::models::ProjectTitle;
use crate::project::ports::ProjectRepository;

/// Project repository backed by Postgres.
///
/// Title uniqueness lives in the `projects_title_key` constraint.
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> ProjectError {
    ProjectError::Database(e.to_string())
}

fn row_to_project(row: &PgRow) -> Result<Project, ProjectError> {
    let title: String = row.try_get("title").map_err(db_err)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(db_err)?;

    Ok(Project {
        id: row.try_get("id").map_err(db_err)?,
        owner_id: row.try_get("owner_id").map_err(db_err)?,
        title: ProjectTitle::new(&title)?,
        description: row.try_get("description").map_err(db_err)?,
        created_at,
    })
}

fn map_title_conflict(e: sqlx::Error, title: &ProjectTitle) -> ProjectError {
    if let Some(db_error) = e.as_database_error() {
        if db_error.is_unique_violation() && db_error.constraint() == Some("projects_title_key") {
            return ProjectError::TitleTaken(title.to_string());
        }
    }
    db_err(e)
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn insert(
        &self,
        owner_id: i64,
        command: CreateProjectCommand,
    ) -> Result<Project, ProjectError> {
        let row = sqlx::query(
            r#"
            INSERT INTO projects (owner_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, title, description, created_at
            "#,
        )
        .bind(owner_id)
        .bind(command.title.as_str())
        .bind(&command.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_title_conflict(e, &command.title))?;

        row_to_project(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, ProjectError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, title, description, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_project).transpose()
    }

    async fn update(&self, project: Project) -> Result<Project, ProjectError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET title = $2, description = $3
            WHERE id = $1
            "#,
        )
        .bind(project.id)
        .bind(project.title.as_str())
        .bind(&project.description)
        .execute(&self.pool)
        .await
        .map_err(|e| map_title_conflict(e, &project.title))?;

        if result.rows_affected() == 0 {
            return Err(ProjectError::NotFound(project.id));
        }

        Ok(project)
    }
}
