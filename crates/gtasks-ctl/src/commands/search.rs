//! Task search command handler for the gtasks CLI

use gtasks_shared::errors::ClientResult;
use gtasks_shared::GtasksConfig;

use crate::commands::{print_json, tasks_service};
use crate::output;

pub(crate) async fn handle_search_command(
    query: &str,
    list_id: Option<&str>,
    json: bool,
    config: &GtasksConfig,
) -> ClientResult<()> {
    let service = tasks_service(config)?;

    match service.search_tasks(query, list_id).await {
        Ok(hits) => {
            if json {
                return print_json(&hits);
            }
            if hits.is_empty() {
                output::warning(format!("No tasks matched '{query}'"));
                return Ok(());
            }
            output::header(format!("Tasks matching '{query}' ({})", hits.len()));
            for hit in &hits {
                let glyph = if hit.task.is_completed() { "✓" } else { "○" };
                output::item(format!(
                    "{glyph} {} ({}) in {}",
                    hit.task.title, hit.task.id, hit.list_title
                ));
            }
            Ok(())
        }
        Err(e) => {
            output::error(format!("Search failed: {e}"));
            Err(e)
        }
    }
}
