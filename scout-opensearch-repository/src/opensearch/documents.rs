//! Document batch preparation for the ingestion endpoint.

use crate::errors::SearchError;
use scout_opensearch_shared::{CommandKind, DocumentCommand, Searchable};

/// A batch of document commands ready to push.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentBatch {
    /// Application the batch is pushed to.
    pub app_name: String,
    /// Table inside the application.
    pub table_name: String,
    /// JSON array of commands.
    pub payload: String,
    /// Number of commands in `payload`.
    pub len: usize,
}

/// Build one command per record, skipping records with nothing to index.
pub fn build_commands<R: Searchable>(records: &[R], kind: CommandKind) -> Vec<DocumentCommand> {
    records
        .iter()
        .filter_map(|record| DocumentCommand::from_record(kind, record))
        .collect()
}

/// Prepare the batch for `records`.
///
/// The application and table are taken from the first record. Returns
/// `Ok(None)` when there is nothing to push.
pub fn prepare_batch<R: Searchable>(
    records: &[R],
    kind: CommandKind,
) -> Result<Option<DocumentBatch>, SearchError> {
    let Some(first) = records.first() else {
        return Ok(None);
    };

    let commands = build_commands(records, kind);
    if commands.is_empty() {
        return Ok(None);
    }

    Ok(Some(DocumentBatch {
        app_name: first.search_app_name(),
        table_name: first.search_table_name(),
        payload: serde_json::to_string(&commands)?,
        len: commands.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_opensearch_shared::{DocumentId, FieldMap};
    use serde_json::{json, Value};

    struct Article {
        id: u64,
        title: &'static str,
    }

    impl Searchable for Article {
        fn search_key(&self) -> DocumentId {
            DocumentId::from(self.id)
        }

        fn to_searchable_fields(&self) -> FieldMap {
            let mut fields = FieldMap::new();
            if !self.title.is_empty() {
                fields.insert("id".to_string(), json!(self.id));
                fields.insert("title".to_string(), json!(self.title));
            }
            fields
        }

        fn search_app_name(&self) -> String {
            "blog".to_string()
        }

        fn search_table_name(&self) -> String {
            "articles".to_string()
        }
    }

    #[test]
    fn test_empty_batch() {
        let records: Vec<Article> = vec![];
        assert!(prepare_batch(&records, CommandKind::Add).unwrap().is_none());
    }

    #[test]
    fn test_skips_empty_records() {
        let records = vec![
            Article { id: 1, title: "Rust" },
            Article { id: 2, title: "" },
            Article { id: 3, title: "Search" },
            Article { id: 4, title: "" },
        ];

        let batch = prepare_batch(&records, CommandKind::Add).unwrap().unwrap();

        assert_eq!(batch.len, 2);
        assert_eq!(batch.app_name, "blog");
        assert_eq!(batch.table_name, "articles");

        let payload: Value = serde_json::from_str(&batch.payload).unwrap();
        assert_eq!(
            payload,
            json!([
                {"cmd": "ADD", "fields": {"id": 1, "title": "Rust"}},
                {"cmd": "ADD", "fields": {"id": 3, "title": "Search"}}
            ])
        );
    }

    #[test]
    fn test_all_records_empty() {
        let records = vec![Article { id: 1, title: "" }];
        assert!(prepare_batch(&records, CommandKind::Delete).unwrap().is_none());
    }

    #[test]
    fn test_delete_commands() {
        let records = vec![Article { id: 9, title: "Gone" }];
        let commands = build_commands(&records, CommandKind::Delete);

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].cmd, CommandKind::Delete);
    }
}
