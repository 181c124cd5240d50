use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
	Success,
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationLink {
	pub url: String,
	pub label: String,
}

/// A message for the editor, handed back to the presentation layer with the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
	pub kind: NotificationKind,
	pub text: String,
	pub link: Option<NotificationLink>,
}
impl NotificationEvent {
	pub fn success(text: impl Into<String>) -> Self {
		Self { kind: NotificationKind::Success, text: text.into(), link: None }
	}

	pub fn error(text: impl Into<String>) -> Self {
		Self { kind: NotificationKind::Error, text: text.into(), link: None }
	}

	pub fn with_link(mut self, url: impl Into<String>, label: impl Into<String>) -> Self {
		self.link = Some(NotificationLink { url: url.into(), label: label.into() });

		self
	}
}
