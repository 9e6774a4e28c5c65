//! Schema dumping for MCP tool inspection.

use schemars::schema_for;
use trellomcp::server::params::*;

/// Tool schema info for display.
struct ToolSchema {
    name: &'static str,
    description: &'static str,
    schema: serde_json::Value,
}

macro_rules! tool_schema {
    ($name:literal, $description:literal, $params:ty) => {
        ToolSchema {
            name: $name,
            description: $description,
            schema: serde_json::to_value(schema_for!($params)).unwrap(),
        }
    };
}

/// Dump tool schemas to stdout.
pub fn dump_schemas(filter: Option<&str>) {
    let tools = vec![
        tool_schema!("get_boards", "Get all boards for the authenticated user", GetBoardsParams),
        tool_schema!("get_board", "Get detailed information about a board", GetBoardParams),
        tool_schema!("get_board_members", "Get all members of a board", GetBoardMembersParams),
        tool_schema!("get_lists", "Get all lists on a board", GetListsParams),
        tool_schema!("create_list", "Create a new list on a board", CreateListParams),
        tool_schema!("update_list", "Update properties of a list", UpdateListParams),
        tool_schema!("get_cards", "Get cards from a board or list", GetCardsParams),
        tool_schema!("get_card", "Get detailed information about a card", GetCardParams),
        tool_schema!("create_card", "Create a new card in a list", CreateCardParams),
        tool_schema!("update_card", "Update properties of a card", UpdateCardParams),
        tool_schema!("move_card", "Move a card to a different list", MoveCardParams),
        tool_schema!("delete_card", "Delete a card permanently", DeleteCardParams),
        tool_schema!("add_card_member", "Add a member to a card", CardMemberParams),
        tool_schema!("remove_card_member", "Remove a member from a card", CardMemberParams),
        tool_schema!("get_labels", "Get all labels on a board", GetLabelsParams),
        tool_schema!("create_label", "Create a new label on a board", CreateLabelParams),
        tool_schema!("add_card_label", "Add a label to a card", CardLabelParams),
        tool_schema!("remove_card_label", "Remove a label from a card", CardLabelParams),
        tool_schema!("get_card_checklists", "Get all checklists on a card", GetCardChecklistsParams),
        tool_schema!("create_checklist", "Create a new checklist on a card", CreateChecklistParams),
        tool_schema!("add_checklist_item", "Add an item to a checklist", AddChecklistItemParams),
        tool_schema!("update_checklist_item", "Mark a checklist item complete or incomplete", UpdateChecklistItemParams),
        tool_schema!("delete_checklist", "Delete a checklist", DeleteChecklistParams),
        tool_schema!("delete_checklist_item", "Delete a checklist item", DeleteChecklistItemParams),
        tool_schema!("fetch_image_by_url", "Fetch an attachment as inline image content", FetchImageParams),
        tool_schema!("fetch_attachment", "Fetch an attachment as base64 data with metadata", FetchAttachmentParams),
        tool_schema!("download_attachment_to_tmp", "Download an attachment to a temporary directory", DownloadAttachmentToTmpParams),
        tool_schema!("download_attachment_to_path", "Download an attachment to a specific path", DownloadAttachmentToPathParams),
        tool_schema!("get_action_reactions", "List reactions on an action", GetActionReactionsParams),
        tool_schema!("create_action_reaction", "Add a reaction to an action", CreateActionReactionParams),
        tool_schema!("delete_action_reaction", "Remove a reaction from an action", DeleteActionReactionParams),
    ];

    let filtered: Vec<_> = match filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            tools
                .into_iter()
                .filter(|t| t.name.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => tools,
    };

    if filtered.is_empty() {
        eprintln!("No matching tools found for filter: {:?}", filter);
        std::process::exit(1);
    }

    for tool in filtered {
        println!("=== {} ===", tool.name);
        println!("Description: {}", tool.description);
        println!();
        println!(
            "{}",
            serde_json::to_string_pretty(&tool.schema).expect("Failed to serialize schema")
        );
        println!();
    }
}
