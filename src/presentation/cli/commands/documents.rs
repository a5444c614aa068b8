use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::application::Depository;
use crate::domain::entities::document::{Document, DocumentPayload};

/// Where the content of a create or update comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentContent {
    File(PathBuf),
    Text(String),
}

impl DocumentContent {
    pub async fn load(&self) -> Result<Vec<u8>> {
        match self {
            Self::File(path) => tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read content file {}", path.display())),
            Self::Text(text) => Ok(text.clone().into_bytes()),
        }
    }
}

/// JSON view of a document; non UTF-8 content is base64-encoded
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentView<'a> {
    name: &'a str,
    uri: &'a str,
    content_type: &'a str,
    size: usize,
    content_encoding: &'static str,
    content: String,
}

impl<'a> From<&'a Document> for DocumentView<'a> {
    fn from(document: &'a Document) -> Self {
        let (content_encoding, content) = match std::str::from_utf8(&document.content) {
            Ok(text) => ("utf-8", text.to_string()),
            Err(_) => ("base64", general_purpose::STANDARD.encode(&document.content)),
        };
        Self {
            name: &document.name,
            uri: &document.uri,
            content_type: &document.content_type,
            size: document.content.len(),
            content_encoding,
            content,
        }
    }
}

/// Handler for the documents commands
pub struct DocumentsCommand<'a> {
    depository: &'a Depository,
    verbose: bool,
}

impl<'a> DocumentsCommand<'a> {
    pub fn new(depository: &'a Depository, verbose: bool) -> Self {
        Self {
            depository,
            verbose,
        }
    }

    pub async fn list(&self, project_id: &str, branch_name: &str, json: bool) -> Result<()> {
        let documents = self
            .depository
            .documents()
            .list(project_id, branch_name)
            .await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&documents)?);
            return Ok(());
        }

        for document in documents {
            if self.verbose {
                println!("{}  {}", document.uri, document.content_type.dimmed());
            } else {
                println!("{}", document.uri);
            }
        }
        Ok(())
    }

    pub async fn get(
        &self,
        project_id: &str,
        branch_name: &str,
        uri: &str,
        output: Option<&Path>,
        json: bool,
    ) -> Result<()> {
        let document = self
            .depository
            .documents()
            .get(project_id, branch_name, uri)
            .await?;

        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&DocumentView::from(&document))?
            );
            return Ok(());
        }

        match output {
            Some(path) => {
                tokio::fs::write(path, &document.content)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!(
                    "{} Wrote {} ({} bytes, {})",
                    "✓".green().bold(),
                    path.display(),
                    document.content.len(),
                    document.content_type
                );
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&document.content)?;
                stdout.flush()?;
            }
        }
        Ok(())
    }

    pub async fn create(
        &self,
        project_id: &str,
        branch_name: &str,
        uri: &str,
        content: DocumentContent,
    ) -> Result<()> {
        let payload = DocumentPayload::new(uri, content.load().await?);
        self.depository
            .documents()
            .create(project_id, branch_name, &payload)
            .await?;

        println!(
            "{} Created {} in {}/{}",
            "✓".green().bold(),
            uri.bold(),
            project_id,
            branch_name
        );
        Ok(())
    }

    pub async fn update(
        &self,
        project_id: &str,
        branch_name: &str,
        uri: &str,
        content: DocumentContent,
    ) -> Result<()> {
        let payload = DocumentPayload::content_only(content.load().await?);
        self.depository
            .documents()
            .update(project_id, branch_name, uri, &payload)
            .await?;

        println!(
            "{} Updated {} in {}/{}",
            "✓".green().bold(),
            uri.bold(),
            project_id,
            branch_name
        );
        Ok(())
    }

    pub async fn delete(&self, project_id: &str, branch_name: &str, uri: &str) -> Result<()> {
        self.depository
            .documents()
            .delete(project_id, branch_name, uri)
            .await?;

        println!(
            "{} Deleted {} from {}/{}",
            "✓".green().bold(),
            uri.bold(),
            project_id,
            branch_name
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_content_from_text_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("body.bin");
        std::fs::write(&file, [0u8, 159, 146, 150]).unwrap();

        assert_eq!(
            DocumentContent::Text("hello".to_string()).load().await.unwrap(),
            b"hello".to_vec()
        );
        assert_eq!(
            DocumentContent::File(file).load().await.unwrap(),
            vec![0u8, 159, 146, 150]
        );
        assert!(DocumentContent::File(temp_dir.path().join("absent"))
            .load()
            .await
            .is_err());
    }

    #[test]
    fn test_document_view_encodes_binary_content() {
        let text = Document {
            name: "index.md".to_string(),
            uri: "index.md".to_string(),
            content_type: "text/markdown".to_string(),
            content: b"# Title".to_vec(),
        };
        let json = serde_json::to_value(DocumentView::from(&text)).unwrap();
        assert_eq!(json["contentType"], "text/markdown");
        assert_eq!(json["content"], "# Title");
        assert_eq!(json["contentEncoding"], "utf-8");
        assert_eq!(json["size"], 7);

        let binary = Document {
            content: vec![0xff, 0xfe],
            ..text
        };
        let json = serde_json::to_value(DocumentView::from(&binary)).unwrap();
        assert_eq!(json["contentEncoding"], "base64");
        assert_eq!(json["content"], "//4=");
        assert_eq!(json["size"], 2);
    }
}
