//! Stored tables and the payloads accepted for each of them.

use super::entity::{Column, Entity};
use super::payload::{FieldRule, PayloadSchema};

pub const PREFERRED_OS: &[&str] = &["Linux", "Windows", "MacOS"];

pub const DEVELOPERS: Entity = Entity {
    table: "developers",
    pk: "id",
    columns: &[
        Column { name: "name", pg_type: "varchar" },
        Column { name: "email", pg_type: "varchar" },
        Column { name: "developerInfoId", pg_type: "integer" },
    ],
    label: "Developer",
};

pub const DEVELOPER_INFOS: Entity = Entity {
    table: "developer_infos",
    pk: "id",
    columns: &[
        Column { name: "developerSince", pg_type: "date" },
        Column { name: "preferredOS", pg_type: "public.os" },
    ],
    label: "Developer infos",
};

pub const PROJECTS: Entity = Entity {
    table: "projects",
    pk: "id",
    columns: &[
        Column { name: "name", pg_type: "varchar" },
        Column { name: "description", pg_type: "text" },
        Column { name: "estimatedTime", pg_type: "varchar" },
        Column { name: "repository", pg_type: "varchar" },
        Column { name: "startDate", pg_type: "date" },
        Column { name: "endDate", pg_type: "date" },
        Column { name: "developerId", pg_type: "integer" },
    ],
    label: "Project",
};

pub const TECHNOLOGIES: Entity = Entity {
    table: "technologies",
    pk: "id",
    columns: &[Column { name: "name", pg_type: "varchar" }],
    label: "Technology",
};

pub const PROJECTS_TECHNOLOGIES: Entity = Entity {
    table: "projects_technologies",
    pk: "id",
    columns: &[
        Column { name: "addedIn", pg_type: "date" },
        Column { name: "technologyId", pg_type: "integer" },
        Column { name: "projectId", pg_type: "integer" },
    ],
    label: "Project technology",
};

pub const DEVELOPER_CREATE: PayloadSchema = PayloadSchema {
    required: &["name", "email"],
    optional: &["developerInfoId"],
    rules: &[("developerInfoId", FieldRule::Integer)],
};

pub const DEVELOPER_UPDATE: PayloadSchema = PayloadSchema {
    required: &[],
    optional: &["name", "email", "developerInfoId"],
    rules: &[("developerInfoId", FieldRule::Integer)],
};

pub const DEVELOPER_INFO_CREATE: PayloadSchema = PayloadSchema {
    required: &["developerSince", "preferredOS"],
    optional: &[],
    rules: &[("preferredOS", FieldRule::OneOf(PREFERRED_OS))],
};

pub const DEVELOPER_INFO_UPDATE: PayloadSchema = PayloadSchema {
    required: &[],
    optional: &["developerSince", "preferredOS"],
    rules: &[("preferredOS", FieldRule::OneOf(PREFERRED_OS))],
};

pub const PROJECT_CREATE: PayloadSchema = PayloadSchema {
    required: &["name", "description", "estimatedTime", "repository", "startDate", "developerId"],
    optional: &["endDate"],
    rules: &[("developerId", FieldRule::NotNull), ("developerId", FieldRule::Integer)],
};

pub const PROJECT_UPDATE: PayloadSchema = PayloadSchema {
    required: &[],
    optional: &["name", "description", "estimatedTime", "repository", "startDate", "endDate", "developerId"],
    rules: &[("developerId", FieldRule::NotNull), ("developerId", FieldRule::Integer)],
};

pub const TECHNOLOGY_ATTACH: PayloadSchema = PayloadSchema {
    required: &["name"],
    optional: &["addedIn"],
    rules: &[],
};
