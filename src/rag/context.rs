// Context block assembly for grounded prompts
use serde_json::Value as JsonValue;

use crate::errors::Result;
use crate::vector_db::SearchResult;

/// Metadata key holding the page number of a chunk
pub const PAGE_LABEL_KEY: &str = "page_label";
/// Metadata key holding the file the chunk came from
pub const SOURCE_KEY: &str = "source";

/// Separator between records: two blank lines
pub const RECORD_SEPARATOR: &str = "\n\n\n";

/// Format one search result as a context record
///
/// `index` is the result's position in the store's ranking and is only used
/// to identify the offending result when metadata is missing.
pub fn format_record(index: usize, result: &SearchResult) -> Result<String> {
    let page_label = render_value(result.metadata_value(PAGE_LABEL_KEY, index)?);
    let source = render_value(result.metadata_value(SOURCE_KEY, index)?);

    Ok(format!(
        "Page Content: {}\nPage Number: {}\nFile Location: {}",
        result.page_content, page_label, source
    ))
}

/// Build the context block from results in store order
///
/// Zero results give an empty block; the caller decides what that means.
pub fn build_context(results: &[SearchResult]) -> Result<String> {
    let records = results
        .iter()
        .enumerate()
        .map(|(idx, result)| format_record(idx, result))
        .collect::<Result<Vec<_>>>()?;

    Ok(records.join(RECORD_SEPARATOR))
}

/// Strings are inserted raw, everything else as its JSON text
fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RagError;
    use quickcheck_macros::quickcheck;
    use serde_json::json;

    fn result(content: &str, page_label: JsonValue, source: &str) -> SearchResult {
        SearchResult::new(content)
            .with_metadata(PAGE_LABEL_KEY, page_label)
            .with_metadata(SOURCE_KEY, json!(source))
    }

    #[test]
    fn test_two_results_block() {
        let results = vec![
            result("A", json!("1"), "f.pdf"),
            result("B", json!("2"), "f.pdf"),
        ];

        let block = build_context(&results).unwrap();
        assert_eq!(
            block,
            "Page Content: A\nPage Number: 1\nFile Location: f.pdf\n\n\n\
             Page Content: B\nPage Number: 2\nFile Location: f.pdf"
        );
    }

    #[test]
    fn test_empty_results_give_empty_block() {
        assert_eq!(build_context(&[]).unwrap(), "");
    }

    #[test]
    fn test_numeric_page_label() {
        let record = format_record(0, &result("Intro", json!(7), "book.pdf")).unwrap();
        assert_eq!(record, "Page Content: Intro\nPage Number: 7\nFile Location: book.pdf");
    }

    #[test]
    fn test_bool_and_null_labels_render_as_json() {
        let record = format_record(0, &result("Cover", json!(true), "book.pdf")).unwrap();
        assert_eq!(record, "Page Content: Cover\nPage Number: true\nFile Location: book.pdf");

        let record = format_record(0, &result("Cover", JsonValue::Null, "book.pdf")).unwrap();
        assert_eq!(record, "Page Content: Cover\nPage Number: null\nFile Location: book.pdf");
    }

    #[test]
    fn test_missing_source_fails() {
        let results = vec![
            result("A", json!("1"), "f.pdf"),
            SearchResult::new("B").with_metadata(PAGE_LABEL_KEY, json!("2")),
        ];

        match build_context(&results) {
            Err(RagError::MissingMetadata { key, index }) => {
                assert_eq!(key, SOURCE_KEY);
                assert_eq!(index, 1);
            }
            other => panic!("expected missing metadata, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_page_label_fails() {
        let results = vec![SearchResult::new("A").with_metadata(SOURCE_KEY, json!("f.pdf"))];
        assert!(matches!(
            build_context(&results),
            Err(RagError::MissingMetadata { .. })
        ));
    }

    #[test]
    fn test_content_is_not_trimmed() {
        let record = format_record(0, &result("  spaced \n", json!("3"), "a.pdf")).unwrap();
        assert!(record.starts_with("Page Content:   spaced \n\nPage Number: 3"));
    }

    #[quickcheck]
    fn prop_one_record_per_result(contents: Vec<String>) -> bool {
        // the separator cannot appear inside these records, so it splits them back apart
        let contents: Vec<String> = contents.into_iter().map(|c| c.replace('\n', " ")).collect();
        let results: Vec<SearchResult> = contents
            .iter()
            .map(|c| result(c, json!("1"), "f.pdf"))
            .collect();

        let block = build_context(&results).unwrap();
        if results.is_empty() {
            return block.is_empty();
        }
        block.split(RECORD_SEPARATOR).count() == results.len()
    }
}
