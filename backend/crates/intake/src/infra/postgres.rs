//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{ApplicationId, ContactId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{ContactSubmission, JobApplication};
use crate::domain::repository::{ApplicationRepository, ContactRepository};
use crate::domain::value_object::{ApplicationStatus, ContactStatus};
use crate::error::{IntakeError, IntakeResult};

const CONTACT_COLUMNS: &str = r#"
    contact_id,
    name,
    email,
    phone,
    message,
    status,
    created_at,
    updated_at
"#;

const APPLICATION_COLUMNS: &str = r#"
    application_id,
    full_name,
    email,
    phone,
    position,
    experience,
    education,
    resume_url,
    cover_letter,
    status,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed store for both submission kinds
#[derive(Clone)]
pub struct PgIntakeRepository {
    pool: PgPool,
}

impl PgIntakeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ContactRepository for PgIntakeRepository {
    async fn create_contact(&self, contact: &ContactSubmission) -> IntakeResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contact_submissions (
                contact_id, name, email, phone, message, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(contact.contact_id.as_uuid())
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(contact.phone.as_deref())
        .bind(&contact.message)
        .bind(contact.status.as_str())
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_contacts(&self) -> IntakeResult<Vec<ContactSubmission>> {
        let sql = format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_submissions ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, ContactRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ContactRow::into_contact).collect()
    }

    async fn update_contact_status(
        &self,
        contact_id: &ContactId,
        status: ContactStatus,
    ) -> IntakeResult<Option<ContactSubmission>> {
        let sql = format!(
            r#"
            UPDATE contact_submissions
            SET status = $2, updated_at = NOW()
            WHERE contact_id = $1
            RETURNING {CONTACT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(contact_id.as_uuid())
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ContactRow::into_contact).transpose()
    }
}

impl ApplicationRepository for PgIntakeRepository {
    async fn create_application(&self, application: &JobApplication) -> IntakeResult<()> {
        sqlx::query(
            r#"
            INSERT INTO job_applications (
                application_id,
                full_name,
                email,
                phone,
                position,
                experience,
                education,
                resume_url,
                cover_letter,
                status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(application.application_id.as_uuid())
        .bind(&application.full_name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.position)
        .bind(application.experience)
        .bind(&application.education)
        .bind(&application.resume_url)
        .bind(application.cover_letter.as_deref())
        .bind(application.status.as_str())
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_applications(&self) -> IntakeResult<Vec<JobApplication>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM job_applications ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ApplicationRow::into_application).collect()
    }

    async fn update_application_status(
        &self,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> IntakeResult<Option<JobApplication>> {
        let sql = format!(
            r#"
            UPDATE job_applications
            SET status = $2, updated_at = NOW()
            WHERE application_id = $1
            RETURNING {APPLICATION_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(application_id.as_uuid())
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ApplicationRow::into_application).transpose()
    }
}

// ============================================================================
// Row types
// ============================================================================

fn corrupt(table: &str, id: Uuid, err: IntakeError) -> IntakeError {
    IntakeError::Internal(format!("Corrupt {table} row {id}: {err}"))
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    contact_id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContactRow {
    fn into_contact(self) -> IntakeResult<ContactSubmission> {
        let id = self.contact_id;
        Ok(ContactSubmission {
            contact_id: ContactId::from_uuid(id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            status: self
                .status
                .parse()
                .map_err(|e| corrupt("contact_submissions", id, e))?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    application_id: Uuid,
    full_name: String,
    email: String,
    phone: String,
    position: String,
    experience: i32,
    education: String,
    resume_url: String,
    cover_letter: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApplicationRow {
    fn into_application(self) -> IntakeResult<JobApplication> {
        let id = self.application_id;
        Ok(JobApplication {
            application_id: ApplicationId::from_uuid(id),
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            experience: self.experience,
            education: self.education,
            resume_url: self.resume_url,
            cover_letter: self.cover_letter,
            status: self
                .status
                .parse()
                .map_err(|e| corrupt("job_applications", id, e))?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
