//! MCP server implementation for Trello.

mod attachments;
mod helpers;
pub mod params;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, ErrorData as McpError, Implementation, ProtocolVersion,
    ServerCapabilities, ServerInfo,
};
use rmcp::{tool, tool_handler, tool_router, ServerHandler};

use crate::client::TrelloClient;
use crate::types::{
    AttachmentContent, AttachmentDownload, Board, Card, Checklist, ChecklistItem, Label, List,
    Member, Reaction,
};
use crate::Error;

use attachments::*;
use helpers::*;
pub use params::*;

/// MCP server for Trello operations.
#[derive(Debug, Clone)]
pub struct TrelloServer {
    client: TrelloClient,
    tool_router: ToolRouter<TrelloServer>,
}

#[tool_router]
impl TrelloServer {
    /// Create a server around an existing client.
    pub fn new(client: TrelloClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// Create a server from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are absent or
    /// malformed.
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(TrelloClient::from_env()?))
    }

    // ========================================================================
    // Boards
    // ========================================================================

    /// List all boards for the authenticated member.
    #[tool(description = "Get all boards for the authenticated user")]
    async fn get_boards(
        &self,
        _params: Parameters<GetBoardsParams>,
    ) -> Result<CallToolResult, McpError> {
        let boards: Vec<Board> = self
            .client
            .get("/members/me/boards", &[])
            .await
            .map_err(|e| error_to_mcp("Failed to get boards", e))?;

        json_response(&boards)
    }

    /// Get one board with its open lists and cards expanded.
    #[tool(description = "Get detailed information about a specific board, \
            including its open lists and cards, labels, and members")]
    async fn get_board(
        &self,
        params: Parameters<GetBoardParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let board: Board = self
            .client
            .get(
                &format!("/boards/{}", p.board_id),
                &[
                    ("lists", "open"),
                    ("cards", "open"),
                    ("labels", "all"),
                    ("members", "all"),
                    ("memberships", "all"),
                ],
            )
            .await
            .map_err(|e| error_to_mcp("Failed to get board", e))?;

        json_response(&board)
    }

    /// List the members of a board.
    #[tool(description = "Get all members of a board")]
    async fn get_board_members(
        &self,
        params: Parameters<GetBoardMembersParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let members: Vec<Member> = self
            .client
            .get(&format!("/boards/{}/members", p.board_id), &[])
            .await
            .map_err(|e| error_to_mcp("Failed to get board members", e))?;

        json_response(&members)
    }

    // ========================================================================
    // Lists
    // ========================================================================

    /// List the lists on a board.
    #[tool(description = "Get all lists on a board")]
    async fn get_lists(
        &self,
        params: Parameters<GetListsParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let lists: Vec<List> = self
            .client
            .get(&format!("/boards/{}/lists", p.board_id), &[])
            .await
            .map_err(|e| error_to_mcp("Failed to get lists", e))?;

        json_response(&lists)
    }

    /// Create a list on a board.
    #[tool(description = "Create a new list on a board")]
    async fn create_list(
        &self,
        params: Parameters<CreateListParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let body = serde_json::json!({
            "name": p.name,
            "idBoard": p.board_id,
            "pos": p.position.as_deref().unwrap_or("bottom"),
        });
        let list: List = self
            .client
            .post("/lists", &body)
            .await
            .map_err(|e| error_to_mcp("Failed to create list", e))?;

        json_response(&list)
    }

    /// Update properties of a list.
    #[tool(description = "Update properties of an existing list \
            (name, archived state, or position)")]
    async fn update_list(
        &self,
        params: Parameters<UpdateListParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;

        let mut data = serde_json::Map::new();
        if let Some(name) = p.name {
            data.insert("name".to_string(), serde_json::json!(name));
        }
        if let Some(closed) = p.closed {
            data.insert("closed".to_string(), serde_json::json!(closed));
        }
        if let Some(position) = p.position {
            data.insert("pos".to_string(), serde_json::json!(position));
        }
        if data.is_empty() {
            return Err(validation_error(
                "at least one of name, closed, or position is required",
            ));
        }

        let list: List = self
            .client
            .put(&format!("/lists/{}", p.list_id), &data)
            .await
            .map_err(|e| error_to_mcp("Failed to update list", e))?;

        json_response(&list)
    }

    // ========================================================================
    // Cards
    // ========================================================================

    /// Get cards from a board or list.
    #[tool(description = "Get cards from a board or list. Provide listId to \
            get cards from a specific list, or boardId for all cards on a board")]
    async fn get_cards(
        &self,
        params: Parameters<GetCardsParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;

        let path = if let Some(list_id) = p.list_id.as_ref().filter(|v| !v.is_empty()) {
            format!("/lists/{}/cards", list_id)
        } else if let Some(board_id) = p.board_id.as_ref().filter(|v| !v.is_empty()) {
            format!("/boards/{}/cards", board_id)
        } else {
            return Err(validation_error("Either boardId or listId must be provided"));
        };

        let cards: Vec<Card> = self
            .client
            .get(&path, &[])
            .await
            .map_err(|e| error_to_mcp("Failed to get cards", e))?;

        json_response(&cards)
    }

    /// Get one card with its sub-resources expanded.
    #[tool(description = "Get detailed information about a specific card, \
            including members, labels, checklists, and attachments")]
    async fn get_card(
        &self,
        params: Parameters<GetCardParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let card: Card = self
            .client
            .get(
                &format!("/cards/{}", p.card_id),
                &[
                    ("members", "true"),
                    ("labels", "true"),
                    ("checklists", "all"),
                    ("attachments", "true"),
                ],
            )
            .await
            .map_err(|e| error_to_mcp("Failed to get card", e))?;

        json_response(&card)
    }

    /// Create a card in a list.
    #[tool(description = "Create a new card in a list")]
    async fn create_card(
        &self,
        params: Parameters<CreateCardParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;

        let mut data = serde_json::Map::new();
        data.insert("name".to_string(), serde_json::json!(p.name));
        data.insert(
            "desc".to_string(),
            serde_json::json!(p.description.unwrap_or_default()),
        );
        data.insert("idList".to_string(), serde_json::json!(p.list_id));
        data.insert(
            "pos".to_string(),
            serde_json::json!(p.position.as_deref().unwrap_or("bottom")),
        );
        if let Some(due) = p.due {
            data.insert("due".to_string(), serde_json::json!(due));
        }

        let card: Card = self
            .client
            .post("/cards", &data)
            .await
            .map_err(|e| error_to_mcp("Failed to create card", e))?;

        json_response(&card)
    }

    /// Update properties of a card.
    #[tool(description = "Update properties of an existing card \
            (name, description, due date, due-complete flag, or archived state)")]
    async fn update_card(
        &self,
        params: Parameters<UpdateCardParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;

        let mut data = serde_json::Map::new();
        if let Some(name) = p.name {
            data.insert("name".to_string(), serde_json::json!(name));
        }
        if let Some(description) = p.description {
            data.insert("desc".to_string(), serde_json::json!(description));
        }
        if let Some(due) = p.due {
            data.insert("due".to_string(), serde_json::json!(due));
        }
        if let Some(due_complete) = p.due_complete {
            data.insert("dueComplete".to_string(), serde_json::json!(due_complete));
        }
        if let Some(closed) = p.closed {
            data.insert("closed".to_string(), serde_json::json!(closed));
        }
        if data.is_empty() {
            return Err(validation_error(
                "at least one field to update is required",
            ));
        }

        let card: Card = self
            .client
            .put(&format!("/cards/{}", p.card_id), &data)
            .await
            .map_err(|e| error_to_mcp("Failed to update card", e))?;

        json_response(&card)
    }

    /// Move a card to a different list.
    #[tool(description = "Move a card to a different list")]
    async fn move_card(
        &self,
        params: Parameters<MoveCardParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let body = serde_json::json!({
            "idList": p.list_id,
            "pos": p.position.as_deref().unwrap_or("bottom"),
        });
        let card: Card = self
            .client
            .put(&format!("/cards/{}", p.card_id), &body)
            .await
            .map_err(|e| error_to_mcp("Failed to move card", e))?;

        json_response(&card)
    }

    /// Delete a card permanently.
    #[tool(description = "Delete a card permanently")]
    async fn delete_card(
        &self,
        params: Parameters<DeleteCardParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        self.client
            .delete(&format!("/cards/{}", p.card_id))
            .await
            .map_err(|e| error_to_mcp("Failed to delete card", e))?;

        success_response(&format!("Successfully deleted card {}", p.card_id))
    }

    /// Add a member to a card.
    #[tool(description = "Add a member to a card")]
    async fn add_card_member(
        &self,
        params: Parameters<CardMemberParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let body = serde_json::json!({"value": p.member_id});
        self.client
            .post_empty(&format!("/cards/{}/idMembers", p.card_id), &body)
            .await
            .map_err(|e| error_to_mcp("Failed to add card member", e))?;

        success_response(&format!(
            "Successfully added member {} to card {}",
            p.member_id, p.card_id
        ))
    }

    /// Remove a member from a card.
    #[tool(description = "Remove a member from a card")]
    async fn remove_card_member(
        &self,
        params: Parameters<CardMemberParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        self.client
            .delete(&format!("/cards/{}/idMembers/{}", p.card_id, p.member_id))
            .await
            .map_err(|e| error_to_mcp("Failed to remove card member", e))?;

        success_response(&format!(
            "Successfully removed member {} from card {}",
            p.member_id, p.card_id
        ))
    }

    // ========================================================================
    // Labels
    // ========================================================================

    /// List the labels on a board.
    #[tool(description = "Get all labels defined on a board")]
    async fn get_labels(
        &self,
        params: Parameters<GetLabelsParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let labels: Vec<Label> = self
            .client
            .get(&format!("/boards/{}/labels", p.board_id), &[])
            .await
            .map_err(|e| error_to_mcp("Failed to get labels", e))?;

        json_response(&labels)
    }

    /// Create a label on a board.
    #[tool(description = "Create a new label on a board. Color must be one of \
            yellow, purple, blue, red, green, orange, black, sky, pink, lime")]
    async fn create_label(
        &self,
        params: Parameters<CreateLabelParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let body = serde_json::json!({
            "name": p.name,
            "color": p.color.as_str(),
            "idBoard": p.board_id,
        });
        let label: Label = self
            .client
            .post("/labels", &body)
            .await
            .map_err(|e| error_to_mcp("Failed to create label", e))?;

        json_response(&label)
    }

    /// Add a label to a card.
    #[tool(description = "Add a label to a card")]
    async fn add_card_label(
        &self,
        params: Parameters<CardLabelParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let body = serde_json::json!({"value": p.label_id});
        self.client
            .post_empty(&format!("/cards/{}/idLabels", p.card_id), &body)
            .await
            .map_err(|e| error_to_mcp("Failed to add label to card", e))?;

        success_response(&format!(
            "Successfully added label {} to card {}",
            p.label_id, p.card_id
        ))
    }

    /// Remove a label from a card.
    #[tool(description = "Remove a label from a card")]
    async fn remove_card_label(
        &self,
        params: Parameters<CardLabelParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        self.client
            .delete(&format!("/cards/{}/idLabels/{}", p.card_id, p.label_id))
            .await
            .map_err(|e| error_to_mcp("Failed to remove label from card", e))?;

        success_response(&format!(
            "Successfully removed label {} from card {}",
            p.label_id, p.card_id
        ))
    }

    // ========================================================================
    // Checklists
    // ========================================================================

    /// List the checklists on a card.
    #[tool(description = "Get all checklists on a card, including their items")]
    async fn get_card_checklists(
        &self,
        params: Parameters<GetCardChecklistsParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let checklists: Vec<Checklist> = self
            .client
            .get(&format!("/cards/{}/checklists", p.card_id), &[])
            .await
            .map_err(|e| error_to_mcp("Failed to get checklists", e))?;

        json_response(&checklists)
    }

    /// Create a checklist on a card.
    #[tool(description = "Create a new checklist on a card")]
    async fn create_checklist(
        &self,
        params: Parameters<CreateChecklistParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let body = serde_json::json!({
            "idCard": p.card_id,
            "name": p.name,
        });
        let checklist: Checklist = self
            .client
            .post("/checklists", &body)
            .await
            .map_err(|e| error_to_mcp("Failed to create checklist", e))?;

        json_response(&checklist)
    }

    /// Add an item to a checklist.
    #[tool(description = "Add an item to a checklist")]
    async fn add_checklist_item(
        &self,
        params: Parameters<AddChecklistItemParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let body = serde_json::json!({
            "name": p.name,
            "pos": p.position.as_deref().unwrap_or("bottom"),
        });
        let item: ChecklistItem = self
            .client
            .post(&format!("/checklists/{}/checkItems", p.checklist_id), &body)
            .await
            .map_err(|e| error_to_mcp("Failed to add checklist item", e))?;

        json_response(&item)
    }

    /// Set a checklist item's completion state.
    #[tool(description = "Mark a checklist item as complete or incomplete")]
    async fn update_checklist_item(
        &self,
        params: Parameters<UpdateChecklistItemParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let body = serde_json::json!({"state": p.state.as_str()});
        self.client
            .put_empty(
                &format!("/cards/{}/checkItem/{}", p.card_id, p.item_id),
                &body,
            )
            .await
            .map_err(|e| error_to_mcp("Failed to update checklist item", e))?;

        success_response(&format!(
            "Successfully marked checklist item {} as {}",
            p.item_id,
            p.state.as_str()
        ))
    }

    /// Delete a checklist.
    #[tool(description = "Delete a checklist from a card")]
    async fn delete_checklist(
        &self,
        params: Parameters<DeleteChecklistParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        self.client
            .delete(&format!("/checklists/{}", p.checklist_id))
            .await
            .map_err(|e| error_to_mcp("Failed to delete checklist", e))?;

        success_response(&format!(
            "Successfully deleted checklist {}",
            p.checklist_id
        ))
    }

    /// Delete an item from a checklist.
    #[tool(description = "Delete an item from a checklist")]
    async fn delete_checklist_item(
        &self,
        params: Parameters<DeleteChecklistItemParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        self.client
            .delete(&format!(
                "/checklists/{}/checkItems/{}",
                p.checklist_id, p.item_id
            ))
            .await
            .map_err(|e| error_to_mcp("Failed to delete checklist item", e))?;

        success_response(&format!(
            "Successfully deleted checklist item {}",
            p.item_id
        ))
    }

    // ========================================================================
    // Attachments
    // ========================================================================

    /// Fetch an attachment and return it as inline image content.
    #[tool(description = "Fetch a single image from a Trello attachment URL \
            and return it as inline base64 image content")]
    async fn fetch_image_by_url(
        &self,
        params: Parameters<FetchImageParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let payload = self
            .client
            .fetch_attachment(&p.url)
            .await
            .map_err(|e| error_to_mcp("Failed to fetch image", e))?;

        let default_mime = p.mime_type.as_deref().unwrap_or("image/jpeg");
        let mime_type = mime_type_from_url(&p.url, default_mime);
        let data = BASE64.encode(&payload.bytes);

        Ok(CallToolResult::success(vec![Content::image(
            data, mime_type,
        )]))
    }

    /// Fetch an attachment and return base64 data with metadata.
    #[tool(description = "Fetch a Trello attachment of any type and return \
            its base64 data along with file name, MIME type, and size")]
    async fn fetch_attachment(
        &self,
        params: Parameters<FetchAttachmentParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let payload = self
            .client
            .fetch_attachment(&p.url)
            .await
            .map_err(|e| error_to_mcp("Failed to fetch attachment", e))?;

        let file_name = infer_file_name(
            p.file_name.as_deref(),
            payload.file_name.as_deref(),
            &p.url,
        );
        let default_mime = p.mime_type.as_deref().unwrap_or("application/octet-stream");
        let mime_type = payload
            .mime_type
            .clone()
            .unwrap_or_else(|| mime_type_from_url(&p.url, default_mime));

        json_response(&AttachmentContent {
            file_name,
            mime_type,
            size_bytes: payload.bytes.len() as u64,
            data: BASE64.encode(&payload.bytes),
        })
    }

    /// Download an attachment into a fresh temporary directory.
    #[tool(description = "Download a Trello attachment to a temporary system \
            directory and return its path, MIME type, and size")]
    async fn download_attachment_to_tmp(
        &self,
        params: Parameters<DownloadAttachmentToTmpParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let payload = self
            .client
            .fetch_attachment(&p.url)
            .await
            .map_err(|e| error_to_mcp("Failed to fetch attachment", e))?;

        let file_name = infer_file_name(
            p.file_name.as_deref(),
            payload.file_name.as_deref(),
            &p.url,
        );

        let dir = tempfile::Builder::new()
            .prefix("trellomcp-")
            .tempdir()
            .map_err(|e| to_mcp_error("Failed to create temporary directory", e))?
            .keep();
        let target = dir.join(&file_name);

        tokio::fs::write(&target, &payload.bytes)
            .await
            .map_err(|e| to_mcp_error("Failed to write attachment", e))?;

        let mime_type = payload.mime_type.clone().unwrap_or_else(|| {
            mime_type_from_url(&target.to_string_lossy(), "application/octet-stream")
        });

        json_response(&AttachmentDownload {
            path: target.to_string_lossy().into_owned(),
            mime_type,
            size_bytes: payload.bytes.len() as u64,
        })
    }

    /// Download an attachment to a caller-chosen file or directory.
    #[tool(description = "Download a Trello attachment to a specific path. \
            A path ending in a separator (or naming an existing directory) is \
            treated as a directory and the file name is inferred. Parent \
            directories are created as needed")]
    async fn download_attachment_to_path(
        &self,
        params: Parameters<DownloadAttachmentToPathParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let payload = self
            .client
            .fetch_attachment(&p.url)
            .await
            .map_err(|e| error_to_mcp("Failed to fetch attachment", e))?;

        let file_name = infer_file_name(
            p.file_name.as_deref(),
            payload.file_name.as_deref(),
            &p.url,
        );
        let target = resolve_destination(&p.path, &file_name);

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| to_mcp_error("Failed to create destination directory", e))?;
        }
        tokio::fs::write(&target, &payload.bytes)
            .await
            .map_err(|e| to_mcp_error("Failed to write attachment", e))?;

        let mime_type = payload.mime_type.clone().unwrap_or_else(|| {
            mime_type_from_url(&target.to_string_lossy(), "application/octet-stream")
        });

        json_response(&AttachmentDownload {
            path: target.to_string_lossy().into_owned(),
            mime_type,
            size_bytes: payload.bytes.len() as u64,
        })
    }

    // ========================================================================
    // Reactions
    // ========================================================================

    /// List reactions on an action.
    #[tool(description = "List all reactions attached to a specific Trello \
            action (e.g., a comment)")]
    async fn get_action_reactions(
        &self,
        params: Parameters<GetActionReactionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let reactions: Vec<Reaction> = self
            .client
            .get(&format!("/actions/{}/reactions", p.action_id), &[])
            .await
            .map_err(|e| error_to_mcp("Failed to get reactions", e))?;

        json_response(&reactions)
    }

    /// Add a reaction to an action.
    #[tool(description = "Add a reaction to a Trello action using emoji \
            identifiers. Provide at least one of shortName, unified, or native")]
    async fn create_action_reaction(
        &self,
        params: Parameters<CreateActionReactionParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;

        let short_name = p.short_name.as_deref().map(str::trim).filter(|v| !v.is_empty());
        let unified = p.unified.as_deref().map(str::trim).filter(|v| !v.is_empty());
        let native = p.native.as_deref().map(str::trim).filter(|v| !v.is_empty());
        let skin_variation = p
            .skin_variation
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if short_name.is_none() && unified.is_none() && native.is_none() {
            return Err(validation_error(
                "Provide at least one of shortName, unified, or native to identify the emoji",
            ));
        }

        let mut data = serde_json::Map::new();
        if let Some(value) = short_name {
            data.insert("shortName".to_string(), serde_json::json!(value));
        }
        if let Some(value) = unified {
            data.insert("unified".to_string(), serde_json::json!(value));
        }
        if let Some(value) = native {
            data.insert("native".to_string(), serde_json::json!(value));
        }
        if let Some(value) = skin_variation {
            data.insert("skinVariation".to_string(), serde_json::json!(value));
        }

        let reaction: Reaction = self
            .client
            .post(&format!("/actions/{}/reactions", p.action_id), &data)
            .await
            .map_err(|e| error_to_mcp("Failed to create reaction", e))?;

        json_response(&reaction)
    }

    /// Remove a reaction from an action.
    #[tool(description = "Remove a specific reaction from a Trello action")]
    async fn delete_action_reaction(
        &self,
        params: Parameters<DeleteActionReactionParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        self.client
            .delete(&format!(
                "/actions/{}/reactions/{}",
                p.action_id, p.reaction_id
            ))
            .await
            .map_err(|e| error_to_mcp("Failed to delete reaction", e))?;

        success_response(&format!(
            "Successfully removed reaction {} from action {}",
            p.reaction_id, p.action_id
        ))
    }
}

#[tool_handler]
impl ServerHandler for TrelloServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "trellomcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Trello MCP server providing tools for working with boards, lists, \
                 cards, labels, checklists, attachments, and reactions. Authenticate \
                 with the TRELLO_API_KEY and TRELLO_TOKEN environment variables."
                    .to_string(),
            ),
        }
    }
}
