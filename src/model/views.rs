//! Joined read models returned by the GET endpoints and technology attach.

use super::entity::{Field, Join, Source, View};
use super::tables::{DEVELOPERS, DEVELOPER_INFOS, PROJECTS, PROJECTS_TECHNOLOGIES, TECHNOLOGIES};

const DEVELOPER: Source = Source { entity: &DEVELOPERS, alias: "d" };
const INFO: Source = Source { entity: &DEVELOPER_INFOS, alias: "di" };
const PROJECT: Source = Source { entity: &PROJECTS, alias: "p" };
const PAIRING: Source = Source { entity: &PROJECTS_TECHNOLOGIES, alias: "pt" };
const TECHNOLOGY: Source = Source { entity: &TECHNOLOGIES, alias: "t" };

const DEVELOPER_FIELDS: [Field; 6] = [
    Field::new("d", "id", "developerID"),
    Field::new("d", "name", "developerName"),
    Field::new("d", "email", "developerEmail"),
    Field::new("d", "developerInfoId", "developerInfoID"),
    Field::new("di", "developerSince", "developerInfoDeveloperSince"),
    Field::text("di", "preferredOS", "developerInfoPreferredOS"),
];

const INFO_JOIN: Join = Join {
    target: INFO,
    left_alias: "d",
    left_column: "developerInfoId",
    right_column: "id",
};

/// Developer with its info profile, one row per developer.
pub const DEVELOPER_VIEW: View = View {
    base: DEVELOPER,
    joins: &[INFO_JOIN],
    fields: &DEVELOPER_FIELDS,
};

/// Developer, info, projects and their technologies: one row per (project, technology).
pub const DEVELOPER_PROJECTS_VIEW: View = View {
    base: DEVELOPER,
    joins: &[
        INFO_JOIN,
        Join {
            target: PROJECT,
            left_alias: "d",
            left_column: "id",
            right_column: "developerId",
        },
        Join {
            target: PAIRING,
            left_alias: "p",
            left_column: "id",
            right_column: "projectId",
        },
        Join {
            target: TECHNOLOGY,
            left_alias: "pt",
            left_column: "technologyId",
            right_column: "id",
        },
    ],
    fields: &[
        DEVELOPER_FIELDS[0],
        DEVELOPER_FIELDS[1],
        DEVELOPER_FIELDS[2],
        DEVELOPER_FIELDS[3],
        DEVELOPER_FIELDS[4],
        DEVELOPER_FIELDS[5],
        Field::new("p", "id", "projectID"),
        Field::new("p", "name", "projectName"),
        Field::new("p", "description", "projectDescription"),
        Field::new("p", "estimatedTime", "projectEstimatedTime"),
        Field::new("p", "repository", "projectRepository"),
        Field::new("p", "startDate", "projectStartDate"),
        Field::new("p", "endDate", "projectEndDate"),
        Field::new("t", "id", "technologyID"),
        Field::new("t", "name", "technologyName"),
    ],
};

/// Project with its technologies: one row per attached technology, or one row with null technology.
pub const PROJECT_VIEW: View = View {
    base: PROJECT,
    joins: &[
        Join {
            target: PAIRING,
            left_alias: "p",
            left_column: "id",
            right_column: "projectId",
        },
        Join {
            target: TECHNOLOGY,
            left_alias: "pt",
            left_column: "technologyId",
            right_column: "id",
        },
    ],
    fields: &[
        Field::new("p", "id", "projectID"),
        Field::new("p", "name", "projectName"),
        Field::new("p", "description", "projectDescription"),
        Field::new("p", "estimatedTime", "projectEstimatedTime"),
        Field::new("p", "repository", "projectRepository"),
        Field::new("p", "startDate", "projectStartDate"),
        Field::new("p", "endDate", "projectEndDate"),
        Field::new("p", "developerId", "projectDeveloperID"),
        Field::new("t", "id", "technologyID"),
        Field::new("t", "name", "technologyName"),
    ],
};

/// A technology with the projects it is attached to.
pub const TECHNOLOGY_PROJECTS_VIEW: View = View {
    base: TECHNOLOGY,
    joins: &[
        Join {
            target: PAIRING,
            left_alias: "t",
            left_column: "id",
            right_column: "technologyId",
        },
        Join {
            target: PROJECT,
            left_alias: "pt",
            left_column: "projectId",
            right_column: "id",
        },
    ],
    fields: &[
        Field::new("t", "id", "technologyID"),
        Field::new("t", "name", "technologyName"),
        Field::new("pt", "addedIn", "addedIn"),
        Field::new("p", "id", "projectID"),
        Field::new("p", "name", "projectName"),
        Field::new("p", "description", "projectDescription"),
        Field::new("p", "estimatedTime", "projectEstimatedTime"),
        Field::new("p", "repository", "projectRepository"),
        Field::new("p", "startDate", "projectStartDate"),
        Field::new("p", "endDate", "projectEndDate"),
    ],
};
