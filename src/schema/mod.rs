//! Declarative entity configuration.
//!
//! Every tab the console shows is described here: table entities carry their
//! backend path, primary key, and field list; custom entities name the
//! renderer that draws them. Adding a column or a whole entity is a registry
//! edit, not new UI code.

mod field_type;

pub use field_type::FieldType;

use crate::types::VALID_REQUEST_STATUSES;

/// Application title shown in the header and the login screen.
pub const APP_NAME: &str = "Ремонт Климатического Оборудования";

/// Role values offered by the user form, in display order.
pub const USER_TYPE_OPTIONS: &[&str] = &[
    "Менеджер",
    "Специалист",
    "Оператор",
    "Заказчик",
    "Менеджер по качеству",
];

/// One field of a table entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub readonly: bool,
    pub show_in_table: bool,
    pub options: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            key,
            label,
            field_type,
            required: false,
            readonly: false,
            show_in_table: false,
            options: &[],
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub const fn in_table(mut self) -> Self {
        self.show_in_table = true;
        self
    }

    pub const fn with_options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// Backend table with generic CRUD rendering.
    Table {
        api_path: &'static str,
        primary_key: &'static str,
        fields: &'static [FieldSpec],
    },
    /// Tab drawn by a named renderer instead of the generic table.
    Custom { render_function: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    pub key: &'static str,
    pub label: &'static str,
    /// Roles allowed to open this tab. Empty means unrestricted.
    pub roles_allowed: &'static [&'static str],
    pub kind: EntityKind,
}

impl EntitySchema {
    pub fn is_table(&self) -> bool {
        matches!(self.kind, EntityKind::Table { .. })
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match &self.kind {
            EntityKind::Table { fields, .. } => fields,
            EntityKind::Custom { .. } => &[],
        }
    }

    /// Fields shown as table columns, in declaration order.
    pub fn table_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields().iter().filter(|field| field.show_in_table)
    }

    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|field| field.key == key)
    }

    pub fn api_path(&self) -> Option<&'static str> {
        match &self.kind {
            EntityKind::Table { api_path, .. } => Some(api_path),
            EntityKind::Custom { .. } => None,
        }
    }

    pub fn primary_key(&self) -> Option<&'static str> {
        match &self.kind {
            EntityKind::Table { primary_key, .. } => Some(primary_key),
            EntityKind::Custom { .. } => None,
        }
    }

    pub fn render_function(&self) -> Option<&'static str> {
        match &self.kind {
            EntityKind::Table { .. } => None,
            EntityKind::Custom { render_function } => Some(render_function),
        }
    }
}

static REQUEST_FIELDS: [FieldSpec; 10] = [
    FieldSpec::new("request_id", "№", FieldType::Text)
        .readonly()
        .in_table(),
    FieldSpec::new("start_date", "Дата", FieldType::Date)
        .required()
        .in_table(),
    FieldSpec::new("climate_tech_type", "Оборудование", FieldType::Text)
        .required()
        .in_table(),
    FieldSpec::new("climate_tech_model", "Модель", FieldType::Text)
        .required()
        .in_table(),
    FieldSpec::new("problem_description", "Описание проблемы", FieldType::Textarea),
    FieldSpec::new("request_status", "Статус", FieldType::Select)
        .with_options(VALID_REQUEST_STATUSES)
        .in_table(),
    FieldSpec::new("master_id", "Ответственный (ID)", FieldType::Number),
    FieldSpec::new("client_id", "Клиент (ID)", FieldType::Number),
    FieldSpec::new("repair_parts", "Запчасти/Неисправности", FieldType::Text),
    FieldSpec::new("completion_date", "Дата завершения", FieldType::Date),
];

static USER_FIELDS: [FieldSpec; 6] = [
    FieldSpec::new("user_id", "ID", FieldType::Text)
        .readonly()
        .in_table(),
    FieldSpec::new("full_name", "ФИО", FieldType::Text)
        .required()
        .in_table(),
    FieldSpec::new("login", "Логин", FieldType::Text)
        .required()
        .in_table(),
    FieldSpec::new("phone", "Телефон", FieldType::Tel).in_table(),
    FieldSpec::new("user_type", "Роль", FieldType::Select)
        .with_options(USER_TYPE_OPTIONS)
        .required()
        .in_table(),
    FieldSpec::new("password", "Пароль", FieldType::Password),
];

/// Entity registry in tab display order.
static ENTITIES: [EntitySchema; 4] = [
    EntitySchema {
        key: "requests",
        label: "Заявки",
        roles_allowed: &[
            "Оператор",
            "Специалист",
            "Менеджер",
            "Менеджер по качеству",
            "admin",
        ],
        kind: EntityKind::Table {
            api_path: "/api/requests",
            primary_key: "request_id",
            fields: &REQUEST_FIELDS,
        },
    },
    EntitySchema {
        key: "statistics",
        label: "Статистика",
        roles_allowed: &["Менеджер", "Менеджер по качеству", "admin"],
        kind: EntityKind::Custom {
            render_function: "renderStatistics",
        },
    },
    EntitySchema {
        key: "quality",
        label: "Качество",
        roles_allowed: &["Менеджер по качеству", "admin"],
        kind: EntityKind::Custom {
            render_function: "renderQuality",
        },
    },
    EntitySchema {
        key: "users",
        label: "Пользователи",
        roles_allowed: &["Менеджер", "Менеджер по качеству", "admin"],
        kind: EntityKind::Table {
            api_path: "/api/users",
            primary_key: "user_id",
            fields: &USER_FIELDS,
        },
    },
];

/// All registered entities in tab display order.
pub fn entities() -> &'static [EntitySchema] {
    &ENTITIES
}

/// Look up an entity by its registry key.
pub fn entity(key: &str) -> Option<&'static EntitySchema> {
    ENTITIES.iter().find(|entity| entity.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_drives_tabs() {
        let keys: Vec<&str> = entities().iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["requests", "statistics", "quality", "users"]);
    }

    #[test]
    fn test_entity_lookup() {
        assert_eq!(entity("requests").unwrap().label, "Заявки");
        assert!(entity("unknown").is_none());
    }

    #[test]
    fn test_requests_schema_shape() {
        let requests = entity("requests").unwrap();
        assert!(requests.is_table());
        assert_eq!(requests.api_path(), Some("/api/requests"));
        assert_eq!(requests.primary_key(), Some("request_id"));
        assert_eq!(requests.fields().len(), 10);

        let columns: Vec<&str> = requests.table_fields().map(|f| f.key).collect();
        assert_eq!(
            columns,
            vec![
                "request_id",
                "start_date",
                "climate_tech_type",
                "climate_tech_model",
                "request_status"
            ]
        );
    }

    #[test]
    fn test_request_status_field_offers_all_statuses() {
        let field = entity("requests").unwrap().field("request_status").unwrap();
        assert_eq!(field.field_type, FieldType::Select);
        assert_eq!(field.options.len(), 5);
        assert_eq!(field.options[0], "Новая заявка");
    }

    #[test]
    fn test_custom_tabs_name_their_renderer() {
        assert_eq!(
            entity("statistics").unwrap().render_function(),
            Some("renderStatistics")
        );
        assert_eq!(
            entity("quality").unwrap().render_function(),
            Some("renderQuality")
        );
        assert!(entity("statistics").unwrap().fields().is_empty());
    }

    #[test]
    fn test_users_schema_shape() {
        let users = entity("users").unwrap();
        assert_eq!(users.primary_key(), Some("user_id"));
        let password = users.field("password").unwrap();
        assert_eq!(password.field_type, FieldType::Password);
        assert!(!password.show_in_table);
        let role = users.field("user_type").unwrap();
        assert_eq!(role.options, USER_TYPE_OPTIONS);
    }

    #[test]
    fn test_quality_is_the_most_restricted_tab() {
        let quality = entity("quality").unwrap();
        assert_eq!(quality.roles_allowed, &["Менеджер по качеству", "admin"]);
    }

    #[test]
    fn test_registry_conventions_hold() {
        for schema in entities() {
            for field in schema.fields() {
                assert_eq!(
                    field.field_type == FieldType::Select,
                    !field.options.is_empty(),
                    "{}.{} options do not match its type",
                    schema.key,
                    field.key
                );
            }
            if let Some(primary_key) = schema.primary_key() {
                assert!(
                    schema.field(primary_key).is_some(),
                    "{} primary key is not a field",
                    schema.key
                );
            } else {
                assert!(!schema.is_table());
            }
        }
    }
}
