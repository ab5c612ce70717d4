//! Support tickets and contact-form submissions.

use serde::{Deserialize, Serialize};

use super::{PersonRef, text};
use crate::core::format::{capitalize, format_date, iso_date, month_to_date};
use crate::core::listing::Searchable;
use crate::core::status::Status;
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTicket {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<PersonRef>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketView {
    pub ticket_id: String,
    pub name: String,
    pub email: String,
    pub category: String,
    pub subject: String,
    pub status: Status,
    pub created: String,
}

impl From<RawTicket> for TicketView {
    fn from(raw: RawTicket) -> Self {
        let user = raw.user.unwrap_or_default();
        Self {
            name: user.full_name(),
            email: text(&user.email),
            category: capitalize(raw.category.as_deref().unwrap_or("general")),
            subject: text(&raw.subject),
            status: raw
                .status
                .as_deref()
                .map(Status::from_api)
                .unwrap_or(Status::Open),
            created: format_date(raw.created_at.as_deref()),
            ticket_id: raw.id,
        }
    }
}

impl TicketView {
    pub fn can_resolve(&self) -> bool {
        !self.status.is_resolved()
    }

    /// File name for the downloaded PDF.
    pub fn download_name(&self) -> String {
        ticket_file_name(&self.ticket_id)
    }
}

pub fn ticket_file_name(ticket_id: &str) -> String {
    format!("ticket-{ticket_id}.pdf")
}

impl Searchable for TicketView {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.ticket_id.as_str(),
            self.name.as_str(),
            self.category.as_str(),
            self.status.api_value(),
        ]
    }
}

/// Filter for `GET /admin/tickets`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub page: usize,
    pub limit: usize,
}

impl TicketQuery {
    /// Month to date, first page.
    pub fn current_month(today: NaiveDate, limit: usize) -> Self {
        let (start_date, end_date) = month_to_date(today);
        Self {
            start_date,
            end_date,
            page: 1,
            limit,
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("startDate", iso_date(self.start_date)),
            ("endDate", iso_date(self.end_date)),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Body of `PATCH /admin/tickets/:id/resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketResolution {
    pub resolution: String,
}

impl TicketResolution {
    /// `None` when the text is blank; the confirm button stays disabled.
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        (!text.is_empty()).then(|| Self {
            resolution: text.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContact {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub query: String,
    pub kind: String,
    pub received: String,
}

impl From<RawContact> for ContactView {
    fn from(raw: RawContact) -> Self {
        Self {
            name: text(&raw.name),
            email: text(&raw.email),
            subject: text(&raw.subject),
            query: text(&raw.query),
            kind: capitalize(raw.kind.as_deref().unwrap_or_default()),
            received: format_date(raw.created_at.as_deref()),
            id: raw.id,
        }
    }
}

impl Searchable for ContactView {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.subject.as_str(),
            self.query.as_str(),
            self.kind.as_str(),
        ]
    }
}

/// `/contacts` answers with a bare array or with an envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContactsPayload {
    Bare(Vec<RawContact>),
    Wrapped { data: Vec<RawContact> },
}

impl ContactsPayload {
    pub fn into_contacts(self) -> Vec<RawContact> {
        match self {
            Self::Bare(contacts) | Self::Wrapped { data: contacts } => contacts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::listing::filter_items;

    fn ticket(json: &str) -> TicketView {
        TicketView::from(serde_json::from_str::<RawTicket>(json).unwrap())
    }

    #[test]
    fn test_ticket_mapping() {
        let view = ticket(
            r#"{
                "_id": "t-100",
                "user": {"firstName": "Jay", "lastName": "Student", "email": "jay@lms.io"},
                "category": "technical",
                "subject": "Video will not play",
                "status": "in-progress",
                "createdAt": "2025-05-12T08:30:00Z"
            }"#,
        );

        assert_eq!(view.ticket_id, "t-100");
        assert_eq!(view.name, "Jay Student");
        assert_eq!(view.category, "Technical");
        assert_eq!(view.status, Status::InProgress);
        assert!(view.can_resolve());
        assert_eq!(view.download_name(), "ticket-t-100.pdf");
    }

    #[test]
    fn test_ticket_without_user() {
        let view = ticket(r#"{"_id":"t-1","status":"resolved"}"#);
        assert_eq!(view.name, "Unknown");
        assert_eq!(view.category, "General");
        assert!(!view.can_resolve());
    }

    #[test]
    fn test_ticket_search_covers_status() {
        let tickets = vec![
            ticket(r#"{"_id":"t-1","category":"billing","status":"open"}"#),
            ticket(r#"{"_id":"t-2","category":"technical","status":"resolved"}"#),
        ];

        assert_eq!(filter_items(&tickets, "RESOLV").len(), 1);
        assert_eq!(filter_items(&tickets, "billing")[0].ticket_id, "t-1");
    }

    #[test]
    fn test_ticket_query_defaults_to_month_to_date() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 19).unwrap();
        let query = TicketQuery::current_month(today, 10);

        assert_eq!(
            query.query_pairs(),
            vec![
                ("startDate", "2025-05-01".to_string()),
                ("endDate", "2025-05-19".to_string()),
                ("page", "1".to_string()),
                ("limit", "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_resolution_requires_text() {
        assert_eq!(TicketResolution::new("  "), None);
        assert_eq!(
            TicketResolution::new(" Reset the password "),
            Some(TicketResolution {
                resolution: "Reset the password".into()
            })
        );
    }

    #[test]
    fn test_contacts_payload_shapes() {
        let bare: ContactsPayload =
            serde_json::from_str(r#"[{"_id":"k1","name":"Ann","type":"feedback"}]"#).unwrap();
        let wrapped: ContactsPayload = serde_json::from_str(
            r#"{"success":true,"data":[{"_id":"k2","name":"Bo","type":"support"}]}"#,
        )
        .unwrap();

        let bare = bare.into_contacts();
        assert_eq!(bare.len(), 1);
        assert_eq!(ContactView::from(bare[0].clone()).kind, "Feedback");
        assert_eq!(wrapped.into_contacts()[0].name.as_deref(), Some("Bo"));
    }

    #[test]
    fn test_contact_search_fields() {
        let contacts: Vec<ContactView> = vec![
            RawContact {
                id: "1".into(),
                name: Some("Ann".into()),
                query: Some("Refund please".into()),
                ..Default::default()
            }
            .into(),
            RawContact {
                id: "2".into(),
                name: Some("Bo".into()),
                kind: Some("partnership".into()),
                ..Default::default()
            }
            .into(),
        ];

        assert_eq!(filter_items(&contacts, "refund")[0].name, "Ann");
        assert_eq!(filter_items(&contacts, "Partner")[0].name, "Bo");
    }
}
