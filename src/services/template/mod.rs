// Event Template service
// Stores meditation event templates in SQLite

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::models::event_template::{EventTemplate, Visibility};
use crate::models::recurrence::RecurrenceRule;
use crate::services::database::utc_from_column;

const TEMPLATE_COLUMNS: &str = "id, title, description, start_time, duration_minutes, recurrence,
     tradition, visibility, creator_id, created_at";

/// Read access to templates, as needed by the listing and detail services.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateLookup {
    fn find_template(&self, id: &str) -> Result<Option<EventTemplate>>;

    /// Global templates plus the viewer's private ones.
    fn visible_templates(&self, viewer: Option<String>) -> Result<Vec<EventTemplate>>;
}

pub struct TemplateService<'a> {
    conn: &'a Connection,
}

impl<'a> TemplateService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Persist a new template, assigning an id when it has none.
    pub fn create(&self, mut template: EventTemplate) -> Result<EventTemplate> {
        if template.id.is_empty() {
            template.id = Uuid::new_v4().to_string();
        }
        template.validate().map_err(|e| anyhow!(e))?;

        let created_at = Utc::now();

        self.conn
            .execute(
                "INSERT INTO event_templates (id, title, description, start_time, duration_minutes,
                 recurrence, tradition, visibility, creator_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    template.id,
                    template.title,
                    template.description,
                    template.start.to_rfc3339(),
                    template.duration_minutes,
                    template.recurrence.as_str(),
                    template.tradition,
                    template.visibility.as_str(),
                    template.creator_id,
                    created_at.to_rfc3339(),
                ],
            )
            .with_context(|| format!("Failed to insert template {}", template.id))?;

        log::info!(
            "Created {} template '{}' ({})",
            template.recurrence,
            template.title,
            template.id
        );

        template.created_at = Some(created_at);
        Ok(template)
    }

    /// Get a template by id
    pub fn get(&self, id: &str) -> Result<Option<EventTemplate>> {
        let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM event_templates WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], map_template_row)
            .optional()
            .with_context(|| format!("Failed to load template {}", id))
    }

    /// Every template ordered by start time.
    pub fn list_all(&self) -> Result<Vec<EventTemplate>> {
        let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM event_templates ORDER BY start_time ASC, title ASC");
        let mut stmt = self.conn.prepare(&sql)?;

        let templates = stmt
            .query_map([], map_template_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to fetch templates")?;

        Ok(templates)
    }

    /// Global templates plus private templates created by `viewer`.
    pub fn list_visible(&self, viewer: Option<&str>) -> Result<Vec<EventTemplate>> {
        let sql = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM event_templates
             WHERE visibility = 'global' OR (?1 IS NOT NULL AND creator_id = ?1)
             ORDER BY start_time ASC, title ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let templates = stmt
            .query_map(params![viewer], map_template_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to fetch visible templates")?;

        Ok(templates)
    }

    /// Delete a template. Its occurrences disappear with it since they are
    /// never stored.
    pub fn delete(&self, id: &str) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM event_templates WHERE id = ?1", params![id])
            .context("Failed to delete template")?;

        if deleted == 0 {
            return Err(anyhow!("Template {} not found", id));
        }

        log::info!("Deleted template {}", id);
        Ok(())
    }
}

impl TemplateLookup for TemplateService<'_> {
    fn find_template(&self, id: &str) -> Result<Option<EventTemplate>> {
        self.get(id)
    }

    fn visible_templates(&self, viewer: Option<String>) -> Result<Vec<EventTemplate>> {
        self.list_visible(viewer.as_deref())
    }
}

fn map_template_row(row: &Row<'_>) -> rusqlite::Result<EventTemplate> {
    let recurrence = row
        .get::<_, String>(5)?
        .parse::<RecurrenceRule>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    let visibility = row
        .get::<_, String>(7)?
        .parse::<Visibility>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, e.into()))?;

    Ok(EventTemplate {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        start: utc_from_column(row.get(3)?, 3)?,
        duration_minutes: row.get(4)?,
        recurrence,
        tradition: row.get(6)?,
        visibility,
        creator_id: row.get(8)?,
        created_at: Some(utc_from_column(row.get(9)?, 9)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::Database;
    use crate::services::occurrence::OccurrenceError;
    use chrono::{DateTime, TimeZone};

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap()
    }

    fn weekly_sit() -> EventTemplate {
        EventTemplate::builder()
            .title("Weekly Zazen")
            .description("Silent sitting")
            .start(start())
            .duration_minutes(40)
            .recurrence(RecurrenceRule::Weekly)
            .tradition("Zen")
            .build()
            .unwrap()
    }

    #[test]
    fn test_create_assigns_uuid() {
        let db = setup_test_db();
        let service = TemplateService::new(db.connection());

        let created = service.create(weekly_sit()).unwrap();

        assert!(Uuid::try_parse(&created.id).is_ok());
        assert!(created.created_at.is_some());
    }

    #[test]
    fn test_create_and_get() {
        let db = setup_test_db();
        let service = TemplateService::new(db.connection());

        let created = service.create(weekly_sit()).unwrap();
        let fetched = service.get(&created.id).unwrap().unwrap();

        assert_eq!(fetched.title, "Weekly Zazen");
        assert_eq!(fetched.description.as_deref(), Some("Silent sitting"));
        assert_eq!(fetched.start, start());
        assert_eq!(fetched.duration_minutes, 40);
        assert_eq!(fetched.recurrence, RecurrenceRule::Weekly);
        assert_eq!(fetched.tradition.as_deref(), Some("Zen"));
        assert_eq!(fetched.visibility, Visibility::Global);
    }

    #[test]
    fn test_create_keeps_supplied_id() {
        let db = setup_test_db();
        let service = TemplateService::new(db.connection());

        let mut template = weekly_sit();
        template.id = "3f2b8c1e-9d4a-4e6b-a1f0-7c5d2e8b9a41".to_string();
        let created = service.create(template).unwrap();

        assert_eq!(created.id, "3f2b8c1e-9d4a-4e6b-a1f0-7c5d2e8b9a41");
    }

    #[test]
    fn test_create_rejects_invalid_template() {
        let db = setup_test_db();
        let service = TemplateService::new(db.connection());

        let mut template = weekly_sit();
        template.title = String::new();

        assert!(service.create(template).is_err());
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_get_missing_template() {
        let db = setup_test_db();
        let service = TemplateService::new(db.connection());

        assert!(service.get("3f2b8c1e-9d4a-4e6b-a1f0-7c5d2e8b9a41").unwrap().is_none());
    }

    #[test]
    fn test_list_all_orders_by_start() {
        let db = setup_test_db();
        let service = TemplateService::new(db.connection());

        let mut later = weekly_sit();
        later.title = "Later".to_string();
        later.start = start() + chrono::Duration::days(3);
        service.create(later).unwrap();
        service.create(weekly_sit()).unwrap();

        let templates = service.list_all().unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].title, "Weekly Zazen");
        assert_eq!(templates[1].title, "Later");
    }

    #[test]
    fn test_list_visible_filters_private_templates() {
        let db = setup_test_db();
        let service = TemplateService::new(db.connection());

        service.create(weekly_sit()).unwrap();
        let private = EventTemplate::builder()
            .title("Home Practice")
            .start(start())
            .private("user-1")
            .build()
            .unwrap();
        service.create(private).unwrap();

        assert_eq!(service.list_visible(None).unwrap().len(), 1);
        assert_eq!(service.list_visible(Some("user-2")).unwrap().len(), 1);
        assert_eq!(service.list_visible(Some("user-1")).unwrap().len(), 2);
    }

    #[test]
    fn test_delete() {
        let db = setup_test_db();
        let service = TemplateService::new(db.connection());

        let created = service.create(weekly_sit()).unwrap();
        service.delete(&created.id).unwrap();

        assert!(service.get(&created.id).unwrap().is_none());
        assert!(service.delete(&created.id).is_err());
    }

    #[test]
    fn test_unknown_stored_rule_is_reported() {
        let db = setup_test_db();
        let service = TemplateService::new(db.connection());

        let created = service.create(weekly_sit()).unwrap();
        db.connection()
            .execute(
                "UPDATE event_templates SET recurrence = 'fortnightly' WHERE id = ?1",
                params![created.id],
            )
            .unwrap();

        let err = service.get(&created.id).unwrap_err();
        let rule_error = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<OccurrenceError>())
            .cloned();
        assert_eq!(
            rule_error,
            Some(OccurrenceError::UnknownRecurrenceRule("fortnightly".to_string()))
        );
    }
}
