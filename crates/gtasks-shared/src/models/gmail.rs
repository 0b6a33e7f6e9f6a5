//! Message models for the Gmail v1 API.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Minimal reference to a message, as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRef {
    pub id: String,
    #[serde(default, alias = "threadId", skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

/// Search results at either fetch depth.
///
/// A bare id/thread listing when content was not requested, or hydrated
/// summaries when it was. Serializes untagged so each branch renders as a
/// plain JSON array.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EmailSearchResults {
    Refs(Vec<MessageRef>),
    Summaries(Vec<MessageSummary>),
}

impl EmailSearchResults {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Refs(refs) => refs.len(),
            Self::Summaries(summaries) => summaries.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Headline view of a message built from `format=metadata` headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSummary {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Full message content with the decoded plain-text body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailContent {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub body: String,
}

/// Request body for sending an email.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OutgoingEmail {
    #[validate(length(min = 1, message = "at least one recipient is required"))]
    pub to: Vec<String>,
    #[validate(length(min = 1, max = 998, message = "subject must be 1-998 characters"))]
    pub subject: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<String>,
    /// When true the body is sent as text/html instead of text/plain.
    #[serde(default)]
    pub html: bool,
}

/// Outcome of a send request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOutcome {
    pub id: String,
    #[serde(default, alias = "threadId", skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    #[serde(default, alias = "labelIds", skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<String>,
}

/// Structured search criteria translated into a Gmail query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_attachment: Option<bool>,
    /// Inclusive lower bound, `YYYY/MM/DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Exclusive upper bound, `YYYY/MM/DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FilterCriteria {
    /// Renders the criteria as a Gmail search query. Empty criteria produce
    /// an empty string, which upstream treats as "match everything".
    pub fn to_query(&self) -> String {
        let mut parts = Vec::new();
        if let Some(from) = &self.from {
            parts.push(format!("from:{from}"));
        }
        if let Some(subject) = &self.subject {
            parts.push(format!("subject:{subject}"));
        }
        if self.has_attachment == Some(true) {
            parts.push("has:attachment".to_string());
        }
        if let Some(after) = &self.after {
            parts.push(format!("after:{after}"));
        }
        if let Some(before) = &self.before {
            parts.push(format!("before:{before}"));
        }
        match self.is_read {
            Some(true) => parts.push("is:read".to_string()),
            Some(false) => parts.push("is:unread".to_string()),
            None => {}
        }
        if let Some(label) = &self.label {
            parts.push(format!("label:{label}"));
        }
        parts.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_filter_criteria_full_query() {
        let criteria = FilterCriteria {
            from: Some("alice@example.com".to_string()),
            subject: Some("invoice".to_string()),
            has_attachment: Some(true),
            after: Some("2026/01/01".to_string()),
            before: Some("2026/02/01".to_string()),
            is_read: Some(false),
            label: Some("work".to_string()),
        };
        assert_eq!(
            criteria.to_query(),
            "from:alice@example.com subject:invoice has:attachment \
             after:2026/01/01 before:2026/02/01 is:unread label:work"
        );
    }

    #[test]
    fn test_filter_criteria_read_flag() {
        let read = FilterCriteria {
            is_read: Some(true),
            ..FilterCriteria::default()
        };
        assert_eq!(read.to_query(), "is:read");

        let no_attachment = FilterCriteria {
            has_attachment: Some(false),
            ..FilterCriteria::default()
        };
        // has_attachment=false adds no term rather than a negation
        assert!(no_attachment.to_query().is_empty());
        assert!(no_attachment.is_empty());
    }

    #[test]
    fn test_message_ref_accepts_camel_case() {
        let json = r#"{"id": "m1", "threadId": "t9"}"#;
        let msg: MessageRef = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "m1");
        assert_eq!(msg.thread_id.as_deref(), Some("t9"));
    }

    #[test]
    fn test_outgoing_email_validation() {
        let ok = OutgoingEmail {
            to: vec!["bob@example.com".to_string()],
            subject: "Hello".to_string(),
            body: "Hi Bob".to_string(),
            cc: vec![],
            bcc: vec![],
            html: false,
        };
        assert!(ok.validate().is_ok());

        let no_recipients = OutgoingEmail { to: vec![], ..ok.clone() };
        assert!(no_recipients.validate().is_err());

        let empty_subject = OutgoingEmail {
            subject: String::new(),
            ..ok
        };
        assert!(empty_subject.validate().is_err());
    }
}
