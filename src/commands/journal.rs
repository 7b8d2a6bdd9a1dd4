use colored::Colorize;

use crate::api::{JournalEntry, JournalRecord};
use crate::cli::JournalCommand;
use crate::commands::{Context, date_or_today, parse_date};
use crate::error::{ServiceError, ServiceResult};

pub async fn run(ctx: &Context, command: JournalCommand) -> ServiceResult<()> {
    match command {
        JournalCommand::List => {
            let entries = ctx.journal.get_all_entries().await?;
            ctx.emit(&entries, |e| render_entries(e))
        }
        JournalCommand::Add { date, content } => {
            let entry = JournalEntry {
                date: date_or_today(date.as_deref())?,
                content,
            };
            let record = ctx.journal.create_entry(&entry).await?;
            ctx.emit(&record, |r| format!("{}\n{}", "Saved".green().bold(), render_entry(r)))
        }
        JournalCommand::Edit { id, date, content } => {
            // Without --date the entry keeps the date it was written on.
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => stored_entry(ctx, &id).await?.date,
            };
            let entry = JournalEntry { date, content };
            let record = ctx.journal.update_entry(&id, &entry).await?;
            ctx.emit(&record, |r| format!("{}\n{}", "Updated".green().bold(), render_entry(r)))
        }
    }
}

/// There is no single-entry endpoint, so the entry is looked up in the full list.
async fn stored_entry(ctx: &Context, id: &str) -> ServiceResult<JournalEntry> {
    ctx.journal
        .get_all_entries()
        .await?
        .into_iter()
        .find(|record| record.entry_id == id)
        .map(JournalEntry::from)
        .ok_or_else(|| ServiceError::EntryNotFound(id.to_string()))
}

pub fn render_entry(record: &JournalRecord) -> String {
    format!(
        "{} {}\n{}",
        record.entry_date.bold(),
        record.entry_id.dimmed(),
        record.entry_body
    )
}

/// Entries sorted oldest first; the server returns them in storage order.
pub fn render_entries(records: &[JournalRecord]) -> String {
    if records.is_empty() {
        return "The journal is empty.".dimmed().to_string();
    }
    let mut sorted: Vec<&JournalRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.entry_date.cmp(&b.entry_date));
    sorted
        .into_iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpClient;
    use crate::api::testing::RecordingTransport;
    use serde_json::json;

    fn record(id: &str, date: &str, body: &str) -> JournalRecord {
        JournalRecord {
            entry_id: id.to_string(),
            entry_date: date.to_string(),
            entry_body: body.to_string(),
        }
    }

    #[test]
    fn entries_render_in_date_order() {
        let rendered = render_entries(&[
            record("j-2", "2024-03-05", "Second day"),
            record("j-1", "2024-03-01", "First day"),
        ]);
        let first = rendered.find("First day").unwrap();
        let second = rendered.find("Second day").unwrap();
        assert!(first < second);
    }

    #[test]
    fn empty_journal_renders_placeholder() {
        assert!(render_entries(&[]).contains("The journal is empty."));
    }

    #[tokio::test]
    async fn add_with_explicit_date_sends_renamed_body() {
        let transport = RecordingTransport::with_json(vec![json!({
            "entry_id": "j-1",
            "entry_date": "2024-03-01",
            "entry_body": "Started the prototype"
        })]);
        let ctx = Context::new(HttpClient::new(transport.clone()), true);

        run(
            &ctx,
            JournalCommand::Add {
                date: Some("2024-03-01".to_string()),
                content: "Started the prototype".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(
            transport.last_request().body,
            Some(json!({ "entry_date": "2024-03-01", "entry_body": "Started the prototype" }))
        );
    }

    #[tokio::test]
    async fn invalid_date_never_reaches_the_server() {
        let transport = RecordingTransport::with_json(vec![]);
        let ctx = Context::new(HttpClient::new(transport.clone()), true);

        let result = run(
            &ctx,
            JournalCommand::Edit {
                id: "j-1".to_string(),
                date: Some("03/01/2024".to_string()),
                content: "Typo".to_string(),
            },
        )
        .await;

        assert!(result.is_err());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn edit_without_date_keeps_stored_date() {
        let transport = RecordingTransport::with_json(vec![
            json!([
                { "entry_id": "j-1", "entry_date": "2023-11-02", "entry_body": "Old text" },
                { "entry_id": "j-2", "entry_date": "2023-11-03", "entry_body": "Other day" }
            ]),
            json!({ "entry_id": "j-1", "entry_date": "2023-11-02", "entry_body": "New text" }),
        ]);
        let ctx = Context::new(HttpClient::new(transport.clone()), true);

        run(
            &ctx,
            JournalCommand::Edit {
                id: "j-1".to_string(),
                date: None,
                content: "New text".to_string(),
            },
        )
        .await
        .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].path, "/journal/all");
        assert_eq!(requests[1].path, "/journal/updateJournalEntry/j-1");
        assert_eq!(
            requests[1].body,
            Some(json!({
                "entry_id": "j-1",
                "entry_date": "2023-11-02",
                "entry_body": "New text"
            }))
        );
    }

    #[tokio::test]
    async fn edit_of_unknown_entry_is_rejected() {
        let transport = RecordingTransport::with_json(vec![json!([])]);
        let ctx = Context::new(HttpClient::new(transport.clone()), true);

        let err = run(
            &ctx,
            JournalCommand::Edit {
                id: "j-404".to_string(),
                date: None,
                content: "Lost".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::EntryNotFound(id) if id == "j-404"));
        assert_eq!(transport.requests().len(), 1);
    }
}
