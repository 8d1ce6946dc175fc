use crate::core::{ExportArtifact, Quote};
use crate::utils::error::{QuoteError, Result};

pub const EXPORT_FILE_NAME: &str = "quotes.json";
pub const EXPORT_CONTENT_TYPE: &str = "application/json";

/// Pretty-printed JSON of the whole collection, unfiltered.
pub fn export_to_file(quotes: &[Quote]) -> Result<ExportArtifact> {
    let json = serde_json::to_string_pretty(quotes)?;
    Ok(ExportArtifact {
        file_name: EXPORT_FILE_NAME.to_string(),
        content_type: EXPORT_CONTENT_TYPE.to_string(),
        bytes: json.into_bytes(),
    })
}

/// Parses an exported file back into a collection.
///
/// Only the top level is checked: it must be a JSON array. Entries are read
/// leniently and are never rejected individually.
pub fn import_from_file(contents: &str) -> Result<Vec<Quote>> {
    let value: serde_json::Value = serde_json::from_str(contents)
        .map_err(|e| QuoteError::validation(format!("Import file is not valid JSON: {}", e)))?;

    match value {
        serde_json::Value::Array(entries) => Ok(entries.iter().map(Quote::from_loose).collect()),
        _ => Err(QuoteError::validation(
            "Import file must contain a JSON array of quotes",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed_quotes;

    #[test]
    fn test_export_is_pretty_json_array() {
        let artifact = export_to_file(&seed_quotes()).unwrap();

        assert_eq!(artifact.file_name, "quotes.json");
        assert_eq!(artifact.content_type, "application/json");

        let text = String::from_utf8(artifact.bytes).unwrap();
        assert!(text.starts_with("[\n"));
        assert!(text.contains("\"category\": \"Dreams\""));
    }

    #[test]
    fn test_import_reads_exported_file() {
        let quotes = vec![Quote::new("Test", "Life"), Quote::new("Other", "Work")];
        let artifact = export_to_file(&quotes).unwrap();

        let imported = import_from_file(std::str::from_utf8(&artifact.bytes).unwrap()).unwrap();

        assert_eq!(imported, quotes);
    }

    #[test]
    fn test_import_rejects_non_array() {
        for contents in [r#"{"text": "a", "category": "b"}"#, "42", "\"quotes\"", "null"] {
            let result = import_from_file(contents);
            assert!(
                matches!(result, Err(QuoteError::ValidationError { .. })),
                "accepted {}",
                contents
            );
        }
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        assert!(matches!(
            import_from_file("[{\"text\": "),
            Err(QuoteError::ValidationError { .. })
        ));
        assert!(import_from_file("").is_err());
    }

    #[test]
    fn test_import_passes_malformed_entries_through() {
        let imported = import_from_file(r#"[{"text": "ok", "category": "A"}, {"foo": 1}, 7]"#)
            .unwrap();

        assert_eq!(imported.len(), 3);
        assert_eq!(imported[0], Quote::new("ok", "A"));
        assert_eq!(imported[1], Quote::new("", ""));
    }

    #[test]
    fn test_import_empty_array() {
        assert!(import_from_file("[]").unwrap().is_empty());
    }
}
