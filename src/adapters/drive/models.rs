//! Drive v3 response models

use serde::{Deserialize, Serialize};

/// File metadata as returned with `fields=files(id, name)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
}

/// One page of a `files.list` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,

    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_list_deserialization() {
        let list: FileList = serde_json::from_str(
            r#"{"nextPageToken":"tok","files":[{"id":"1AbC","name":"Ledger"}]}"#,
        )
        .unwrap();

        assert_eq!(list.next_page_token.as_deref(), Some("tok"));
        assert_eq!(
            list.files,
            vec![DriveFile {
                id: "1AbC".to_string(),
                name: "Ledger".to_string()
            }]
        );
    }

    #[test]
    fn test_file_list_empty() {
        let list: FileList = serde_json::from_str("{}").unwrap();
        assert!(list.files.is_empty());
        assert!(list.next_page_token.is_none());
    }
}
