//! Parameter types for MCP tool inputs.
//!
//! Argument names are camelCase on the wire (`boardId`, `listId`, ...);
//! schema validation happens before any handler runs.

use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters for listing the authenticated member's boards (none needed).
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetBoardsParams {}

/// Parameters for fetching a single board.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetBoardParams {
    /// The ID of the board
    pub board_id: String,
}

/// Parameters for listing the members of a board.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetBoardMembersParams {
    /// The ID of the board
    pub board_id: String,
}

/// Parameters for listing the lists on a board.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetListsParams {
    /// The ID of the board
    pub board_id: String,
}

/// Parameters for creating a list.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListParams {
    /// The ID of the board the list will be created on
    pub board_id: String,
    /// The name of the list
    pub name: String,
    /// Position of the list (top, bottom, or a positive number)
    #[serde(default)]
    pub position: Option<String>,
}

/// Parameters for updating a list.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListParams {
    /// The ID of the list to update
    pub list_id: String,
    /// New name for the list
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the list should be archived
    #[serde(default)]
    pub closed: Option<bool>,
    /// New position for the list
    #[serde(default)]
    pub position: Option<f64>,
}

/// Parameters for fetching cards from a board or list.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCardsParams {
    /// The ID of the board (if getting all cards from a board)
    #[serde(default)]
    pub board_id: Option<String>,
    /// The ID of the list (if getting cards from a specific list)
    #[serde(default)]
    pub list_id: Option<String>,
}

/// Parameters for fetching a single card.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCardParams {
    /// The ID of the card
    pub card_id: String,
}

/// Parameters for creating a card.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardParams {
    /// The ID of the list where the card will be created
    pub list_id: String,
    /// The name/title of the card
    pub name: String,
    /// The description of the card
    #[serde(default)]
    pub description: Option<String>,
    /// Due date for the card (ISO 8601 format)
    #[serde(default)]
    pub due: Option<String>,
    /// Position of the card (top, bottom, or a positive number)
    #[serde(default)]
    pub position: Option<String>,
}

/// Parameters for updating a card.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardParams {
    /// The ID of the card to update
    pub card_id: String,
    /// New name for the card
    #[serde(default)]
    pub name: Option<String>,
    /// New description for the card
    #[serde(default)]
    pub description: Option<String>,
    /// New due date (ISO 8601 format)
    #[serde(default)]
    pub due: Option<String>,
    /// Whether the due date is complete
    #[serde(default)]
    pub due_complete: Option<bool>,
    /// Whether the card should be closed/archived
    #[serde(default)]
    pub closed: Option<bool>,
}

/// Parameters for moving a card to another list.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardParams {
    /// The ID of the card to move
    pub card_id: String,
    /// The ID of the target list
    pub list_id: String,
    /// Position in the target list (top, bottom, or a positive number)
    #[serde(default)]
    pub position: Option<String>,
}

/// Parameters for deleting a card.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCardParams {
    /// The ID of the card to delete
    pub card_id: String,
}

/// Parameters for adding or removing a card member.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardMemberParams {
    /// The ID of the card
    pub card_id: String,
    /// The ID of the member
    pub member_id: String,
}

/// Parameters for listing the labels on a board.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetLabelsParams {
    /// The ID of the board
    pub board_id: String,
}

/// The set of colors Trello accepts for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Yellow,
    Purple,
    Blue,
    Red,
    Green,
    Orange,
    Black,
    Sky,
    Pink,
    Lime,
}

impl LabelColor {
    /// The color as the API expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Black => "black",
            Self::Sky => "sky",
            Self::Pink => "pink",
            Self::Lime => "lime",
        }
    }
}

/// Parameters for creating a label.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabelParams {
    /// The ID of the board the label belongs to
    pub board_id: String,
    /// The name of the label
    pub name: String,
    /// The label color
    pub color: LabelColor,
}

/// Parameters for adding or removing a label on a card.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardLabelParams {
    /// The ID of the card
    pub card_id: String,
    /// The ID of the label
    pub label_id: String,
}

/// Parameters for listing the checklists on a card.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCardChecklistsParams {
    /// The ID of the card
    pub card_id: String,
}

/// Parameters for creating a checklist on a card.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChecklistParams {
    /// The ID of the card
    pub card_id: String,
    /// The name of the checklist
    pub name: String,
}

/// Parameters for adding an item to a checklist.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddChecklistItemParams {
    /// The ID of the checklist
    pub checklist_id: String,
    /// The name of the item
    pub name: String,
    /// Position of the item (top, bottom, or a positive number)
    #[serde(default)]
    pub position: Option<String>,
}

/// The completion state of a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckItemState {
    Complete,
    Incomplete,
}

impl CheckItemState {
    /// The state as the API expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Incomplete => "incomplete",
        }
    }
}

/// Parameters for setting a checklist item's state.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChecklistItemParams {
    /// The ID of the card the checklist belongs to
    pub card_id: String,
    /// The ID of the checklist item
    pub item_id: String,
    /// The new state of the item
    pub state: CheckItemState,
}

/// Parameters for deleting a checklist.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteChecklistParams {
    /// The ID of the checklist to delete
    pub checklist_id: String,
}

/// Parameters for deleting a checklist item.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteChecklistItemParams {
    /// The ID of the checklist
    pub checklist_id: String,
    /// The ID of the item to delete
    pub item_id: String,
}

/// Parameters for fetching an attachment as inline image content.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FetchImageParams {
    /// The Trello attachment URL to fetch
    pub url: String,
    /// Optional friendly file name for the returned image
    #[serde(default)]
    pub file_name: Option<String>,
    /// MIME type to assume when the URL extension is not recognized
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Parameters for fetching an attachment as base64 data with metadata.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FetchAttachmentParams {
    /// The Trello attachment URL to fetch
    pub url: String,
    /// Optional file name override for the returned attachment
    #[serde(default)]
    pub file_name: Option<String>,
    /// MIME type to assume when neither the response nor the URL reveal one
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Parameters for downloading an attachment into a temporary directory.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadAttachmentToTmpParams {
    /// The Trello attachment URL to fetch
    pub url: String,
    /// Optional file name override for the downloaded attachment
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Parameters for downloading an attachment to a caller-chosen path.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadAttachmentToPathParams {
    /// The Trello attachment URL to fetch
    pub url: String,
    /// Destination file path, or a directory (trailing separator) to infer
    /// the file name into
    pub path: String,
    /// Optional file name override when the destination is a directory
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Parameters for listing reactions on an action.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetActionReactionsParams {
    /// The Trello action ID (typically a comment action) to inspect
    pub action_id: String,
}

/// Parameters for adding a reaction to an action.
///
/// At least one of `shortName`, `unified`, or `native` must identify the
/// emoji; the constraint is enforced by the handler.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActionReactionParams {
    /// The Trello action ID to react to
    pub action_id: String,
    /// Emoji short name (e.g., thumbsup)
    #[serde(default)]
    pub short_name: Option<String>,
    /// Unicode codepoint string (e.g., 1F44D)
    #[serde(default)]
    pub unified: Option<String>,
    /// Native emoji character
    #[serde(default)]
    pub native: Option<String>,
    /// Optional skin tone variation string (e.g., 1F3FD)
    #[serde(default)]
    pub skin_variation: Option<String>,
}

/// Parameters for removing a reaction from an action.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteActionReactionParams {
    /// The Trello action ID hosting the reaction
    pub action_id: String,
    /// The reaction ID to remove
    pub reaction_id: String,
}
