use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token pair issued by the identity provider. Observed and mirrored to
/// local storage, never minted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

impl Session {
    pub fn is_expired(&self, now_epoch_secs: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= now_epoch_secs,
            None => false,
        }
    }
}

/// Provider-issued identity subject carried inside a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Auth state change notifications, in the provider's emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// Row in the `profiles` table. `name` wins over the legacy `full_name`
/// column when both are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl ProfileRow {
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.full_name.as_deref().filter(|n| !n.trim().is_empty()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "Lecture Notes")]
    LectureNotes,
    #[serde(rename = "Textbook")]
    Textbook,
    #[serde(rename = "Research Paper")]
    ResearchPaper,
    #[serde(rename = "Lab Equipment")]
    LabEquipment,
    #[serde(rename = "Software License")]
    SoftwareLicense,
    #[serde(rename = "Video Lecture")]
    VideoLecture,
    #[serde(rename = "PDF Document")]
    PdfDocument,
    #[serde(rename = "Other")]
    Other,
}

impl ResourceType {
    pub const ALL: [ResourceType; 8] = [
        ResourceType::LectureNotes,
        ResourceType::Textbook,
        ResourceType::ResearchPaper,
        ResourceType::LabEquipment,
        ResourceType::SoftwareLicense,
        ResourceType::VideoLecture,
        ResourceType::PdfDocument,
        ResourceType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::LectureNotes => "Lecture Notes",
            ResourceType::Textbook => "Textbook",
            ResourceType::ResearchPaper => "Research Paper",
            ResourceType::LabEquipment => "Lab Equipment",
            ResourceType::SoftwareLicense => "Software License",
            ResourceType::VideoLecture => "Video Lecture",
            ResourceType::PdfDocument => "PDF Document",
            ResourceType::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<ResourceType> {
        ResourceType::ALL.iter().copied().find(|t| t.as_str() == value)
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uploaded-file descriptor. The four columns are all-present or
/// all-absent together; partial rows collapse to absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub url: String,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResourceRow", into = "ResourceRow")]
pub struct ResourceRecord {
    pub id: String,
    pub name: String,
    pub resource_type: ResourceType,
    pub course: String,
    pub year: i32,
    pub description: String,
    pub keywords: Vec<String>,
    pub file: Option<FileMetadata>,
    pub uploader_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Wire shape of a `resources` row: file metadata is four nullable
/// columns, folded into `Option<FileMetadata>` on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub course: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ResourceRow> for ResourceRecord {
    fn from(row: ResourceRow) -> Self {
        let file = match (
            row.file_url,
            row.file_name,
            row.file_mime_type,
            row.file_size_bytes,
        ) {
            (Some(url), Some(name), Some(mime_type), Some(size_bytes)) => Some(FileMetadata {
                url,
                name,
                mime_type,
                size_bytes,
            }),
            _ => None,
        };
        ResourceRecord {
            id: row.id,
            name: row.name,
            resource_type: row.resource_type,
            course: row.course,
            year: row.year,
            description: row.description,
            keywords: row.keywords,
            file,
            uploader_id: row.uploader_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<ResourceRecord> for ResourceRow {
    fn from(record: ResourceRecord) -> Self {
        let (file_url, file_name, file_mime_type, file_size_bytes) = match record.file {
            Some(file) => (
                Some(file.url),
                Some(file.name),
                Some(file.mime_type),
                Some(file.size_bytes),
            ),
            None => (None, None, None, None),
        };
        ResourceRow {
            id: record.id,
            name: record.name,
            resource_type: record.resource_type,
            course: record.course,
            year: record.year,
            description: record.description,
            keywords: record.keywords,
            file_url,
            file_name,
            file_mime_type,
            file_size_bytes,
            uploader_id: record.uploader_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_metadata_requires_all_four_columns() {
        let json = r#"{
            "id": "1", "name": "Notes", "type": "Lecture Notes",
            "course": "PHY301", "year": 2023, "description": "",
            "keywords": [],
            "file_url": "https://cdn/x.pdf", "file_name": "x.pdf",
            "file_mime_type": "application/pdf", "file_size_bytes": 1200
        }"#;
        let record: ResourceRecord = serde_json::from_str(json).expect("parse");
        let file = record.file.expect("file metadata");
        assert_eq!(file.name, "x.pdf");
        assert_eq!(file.size_bytes, 1200);
    }

    #[test]
    fn partial_file_columns_collapse_to_absent() {
        let json = r#"{
            "id": "1", "name": "Notes", "type": "Textbook",
            "course": "MTH205", "year": 2022, "description": "",
            "keywords": [], "file_url": "https://cdn/x.pdf",
            "file_name": null, "file_mime_type": null, "file_size_bytes": null
        }"#;
        let record: ResourceRecord = serde_json::from_str(json).expect("parse");
        assert!(record.file.is_none());
    }

    #[test]
    fn record_round_trips_through_row_columns() {
        let json = serde_json::json!({
            "id": "42", "name": "Manual", "type": "Lab Equipment",
            "course": "CHM410", "year": 2021, "description": "d",
            "keywords": ["lab"],
            "file_url": "u", "file_name": "n", "file_mime_type": "m",
            "file_size_bytes": 9
        });
        let record: ResourceRecord = serde_json::from_value(json).expect("parse");
        let back = serde_json::to_value(&record).expect("serialize");
        assert_eq!(back["type"], "Lab Equipment");
        assert_eq!(back["file_size_bytes"], 9);
    }

    #[test]
    fn resource_type_parses_display_values() {
        for ty in ResourceType::ALL {
            assert_eq!(ResourceType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(ResourceType::parse("Mixtape"), None);
    }

    #[test]
    fn session_expiry_uses_epoch_seconds() {
        let session = Session {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: Some(1_000),
            user: SessionUser {
                id: "u1".into(),
                email: None,
                user_metadata: UserMetadata::default(),
            },
        };
        assert!(session.is_expired(1_000));
        assert!(!session.is_expired(999));
    }

    #[test]
    fn profile_row_prefers_name_over_full_name() {
        let row = ProfileRow {
            id: "u".into(),
            name: Some("Jane".into()),
            full_name: Some("Jane Doe".into()),
            ..Default::default()
        };
        assert_eq!(row.display_name(), Some("Jane"));
        let row = ProfileRow {
            id: "u".into(),
            name: Some("  ".into()),
            full_name: Some("Jane Doe".into()),
            ..Default::default()
        };
        assert_eq!(row.display_name(), Some("Jane Doe"));
    }
}
