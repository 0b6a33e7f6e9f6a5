//! Gmail command handlers for the gtasks CLI

use gtasks_shared::errors::{ClientError, ClientResult};
use gtasks_shared::models::gmail::{EmailSearchResults, MessageSummary, OutgoingEmail};
use gtasks_shared::GtasksConfig;

use crate::commands::{gmail_service, print_json};
use crate::output;
use crate::EmailCommands;

pub(crate) async fn handle_email_command(
    cmd: EmailCommands,
    config: &GtasksConfig,
) -> ClientResult<()> {
    let service = gmail_service(config)?;

    match cmd {
        EmailCommands::Send {
            to,
            subject,
            body,
            cc,
            bcc,
            html,
        } => {
            let email = OutgoingEmail {
                to,
                subject,
                body,
                cc,
                bcc,
                html,
            };
            match service.send_email(&email).await {
                Ok(outcome) => {
                    output::success("Email sent");
                    output::label("  Message ID", &outcome.id);
                    if let Some(thread_id) = &outcome.thread_id {
                        output::label("  Thread ID", thread_id);
                    }
                }
                Err(e) => {
                    output::error(format!("Failed to send email: {e}"));
                    return Err(e);
                }
            }
        }
        EmailCommands::Read { message_id, json } => match service.read_email(&message_id).await {
            Ok(Some(content)) => {
                if json {
                    return print_json(&content);
                }
                output::header(&content.subject);
                output::label("  From", &content.from);
                output::label("  Date", &content.date);
                output::blank();
                output::plain(&content.body);
            }
            Ok(None) => {
                output::error(format!("Message {message_id} not found"));
                return Err(ClientError::api_error(
                    404,
                    format!("Message {message_id} not found"),
                ));
            }
            Err(e) => {
                output::error(format!("Failed to read email: {e}"));
                return Err(e);
            }
        },
        EmailCommands::Search {
            query,
            max_results,
            include_content,
            json,
        } => match service
            .search_emails(&query, max_results, include_content)
            .await
        {
            Ok(results) => {
                if json {
                    return print_json(&results);
                }
                if results.is_empty() {
                    output::warning(format!("No emails matched '{query}'"));
                    return Ok(());
                }
                output::header(format!("Emails matching '{query}' ({})", results.len()));
                match &results {
                    EmailSearchResults::Refs(refs) => {
                        for message in refs {
                            output::item(&message.id);
                        }
                        output::muted("  (pass --include-content for subjects and senders)");
                    }
                    EmailSearchResults::Summaries(summaries) => {
                        for summary in summaries {
                            print_summary_line(summary);
                        }
                    }
                }
            }
            Err(e) => {
                output::error(format!("Email search failed: {e}"));
                return Err(e);
            }
        },
        EmailCommands::Unread { max_results, json } => {
            match service.unread_emails(max_results).await {
                Ok(summaries) => {
                    if json {
                        return print_json(&summaries);
                    }
                    if summaries.is_empty() {
                        output::success("No unread emails");
                        return Ok(());
                    }
                    output::header(format!("Unread emails ({})", summaries.len()));
                    for summary in &summaries {
                        print_summary_line(summary);
                    }
                }
                Err(e) => {
                    output::error(format!("Failed to fetch unread emails: {e}"));
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}

fn print_summary_line(summary: &MessageSummary) {
    output::item(format!(
        "{} ({}) from {}",
        summary.subject, summary.id, summary.from
    ));
    if !summary.snippet.is_empty() {
        output::muted(format!("      {}", summary.snippet));
    }
}
