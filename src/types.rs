//! Type definitions for Trello API payloads.
//!
//! These types use a hybrid approach: a small typed core for the fields the
//! server inspects, with remaining fields captured as raw JSON so responses
//! pass through to the caller unreduced.

use serde::{Deserialize, Serialize};
use serde_json::Map;

/// A Trello board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// The board ID.
    pub id: String,

    /// The board name.
    #[serde(default)]
    pub name: Option<String>,

    /// Whether the board is closed (archived).
    #[serde(default)]
    pub closed: bool,

    /// All other fields from the API response.
    #[serde(flatten)]
    pub fields: Map<String, serde_json::Value>,
}

/// A list on a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    /// The list ID.
    pub id: String,

    /// The list name.
    #[serde(default)]
    pub name: Option<String>,

    /// Whether the list is archived.
    #[serde(default)]
    pub closed: bool,

    /// The board the list belongs to.
    #[serde(default, rename = "idBoard")]
    pub id_board: Option<String>,

    /// All other fields.
    #[serde(flatten)]
    pub fields: Map<String, serde_json::Value>,
}

/// A card on a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// The card ID.
    pub id: String,

    /// The card name.
    #[serde(default)]
    pub name: Option<String>,

    /// The list the card sits in.
    #[serde(default, rename = "idList")]
    pub id_list: Option<String>,

    /// Whether the card is archived.
    #[serde(default)]
    pub closed: bool,

    /// All other fields.
    #[serde(flatten)]
    pub fields: Map<String, serde_json::Value>,
}

/// A board or card member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// The member ID.
    pub id: String,

    /// The member's username.
    #[serde(default)]
    pub username: Option<String>,

    /// The member's display name.
    #[serde(default, rename = "fullName")]
    pub full_name: Option<String>,

    /// All other fields.
    #[serde(flatten)]
    pub fields: Map<String, serde_json::Value>,
}

/// A label on a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// The label ID.
    pub id: String,

    /// The label name.
    #[serde(default)]
    pub name: Option<String>,

    /// The label color.
    #[serde(default)]
    pub color: Option<String>,

    /// All other fields.
    #[serde(flatten)]
    pub fields: Map<String, serde_json::Value>,
}

/// A checklist on a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    /// The checklist ID.
    pub id: String,

    /// The checklist name.
    #[serde(default)]
    pub name: Option<String>,

    /// The card the checklist belongs to.
    #[serde(default, rename = "idCard")]
    pub id_card: Option<String>,

    /// Items on the checklist.
    #[serde(default, rename = "checkItems")]
    pub check_items: Vec<ChecklistItem>,

    /// All other fields.
    #[serde(flatten)]
    pub fields: Map<String, serde_json::Value>,
}

/// A single item on a checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// The item ID.
    pub id: String,

    /// The item name.
    #[serde(default)]
    pub name: Option<String>,

    /// The item state: "complete" or "incomplete".
    #[serde(default)]
    pub state: Option<String>,

    /// All other fields.
    #[serde(flatten)]
    pub fields: Map<String, serde_json::Value>,
}

/// An emoji reaction on an action (typically a comment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    /// The reaction ID.
    pub id: String,

    /// The member who reacted.
    #[serde(default, rename = "idMember")]
    pub id_member: Option<String>,

    /// All other fields, including the emoji description.
    #[serde(flatten)]
    pub fields: Map<String, serde_json::Value>,
}

/// Projection returned by the generic attachment fetch tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentContent {
    /// The resolved file name.
    pub file_name: String,
    /// The resolved MIME type.
    pub mime_type: String,
    /// The attachment size in bytes.
    pub size_bytes: u64,
    /// The attachment bytes, base64-encoded.
    pub data: String,
}

/// Projection returned by the attachment download tools.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDownload {
    /// Where the attachment was written.
    pub path: String,
    /// The resolved MIME type.
    pub mime_type: String,
    /// The attachment size in bytes.
    pub size_bytes: u64,
}

/// Raw bytes fetched from an attachment URL, with metadata from the
/// response headers.
#[derive(Debug, Clone)]
pub struct AttachmentPayload {
    /// The attachment bytes.
    pub bytes: Vec<u8>,
    /// MIME type from the `Content-Type` header, if present.
    pub mime_type: Option<String>,
    /// File name from the `Content-Disposition` header, if present.
    pub file_name: Option<String>,
}
