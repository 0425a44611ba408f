use serde_json::Value;

use crate::drive::types::GoogleDocument;

const CELL_DELIMITER: &str = " | ";

/// Concatenates every paragraph text run of a document, in document order.
pub fn document_text(document: &GoogleDocument) -> String {
    document
        .body
        .iter()
        .flat_map(|body| &body.content)
        .filter_map(|element| element.paragraph.as_ref())
        .flat_map(|paragraph| &paragraph.elements)
        .filter_map(|element| element.text_run.as_ref())
        .filter_map(|run| run.content.as_deref())
        .collect()
}

/// Renders sheets as a `Sheet: <title>` header, one line per row and a blank
/// separator line.
pub fn spreadsheet_text(sheets: &[(String, Vec<Vec<Value>>)]) -> String {
    let mut lines = Vec::new();
    for (title, rows) in sheets {
        lines.push(format!("Sheet: {title}"));
        for row in rows {
            lines.push(row.iter().map(cell_text).collect::<Vec<_>>().join(CELL_DELIMITER));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// PDF text extraction is not supported; only the size is reported.
pub fn pdf_placeholder(size: usize) -> String {
    format!("PDF file downloaded (size: {size} bytes). Text extraction is not supported.")
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::drive::types::{Body, Paragraph, ParagraphElement, StructuralElement, TextRun};

    fn rows(value: Value) -> Vec<Vec<Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_document_text_concatenates_runs_in_order() {
        for count in [0, 1, 2, 17] {
            let runs: Vec<String> = (0..count).map(|i| format!("run {i}\n")).collect();
            let refs: Vec<&str> = runs.iter().map(String::as_str).collect();

            let text = document_text(&GoogleDocument::from_runs(&refs));

            assert_eq!(text, runs.concat());
        }
    }

    #[test]
    fn test_document_text_skips_non_text_elements() {
        let document = GoogleDocument {
            body: Some(Body {
                content: vec![
                    StructuralElement { paragraph: None },
                    StructuralElement {
                        paragraph: Some(Paragraph {
                            elements: vec![
                                ParagraphElement {
                                    text_run: Some(TextRun { content: Some("Hello, ".into()) }),
                                },
                                ParagraphElement { text_run: None },
                                ParagraphElement {
                                    text_run: Some(TextRun { content: Some("world".into()) }),
                                },
                            ],
                        }),
                    },
                ],
            }),
        };

        assert_eq!(document_text(&document), "Hello, world");
    }

    #[test]
    fn test_document_text_without_body() {
        assert_eq!(document_text(&GoogleDocument::default()), "");
    }

    #[test]
    fn test_spreadsheet_text_layout() {
        let sheets = vec![
            ("Staff".to_string(), rows(json!([["Name", "Team"], ["Ann", "HR"]]))),
            ("Budget".to_string(), rows(json!([["Q1", 1200]]))),
        ];

        let text = spreadsheet_text(&sheets);

        assert_eq!(text, "Sheet: Staff\nName | Team\nAnn | HR\n\nSheet: Budget\nQ1 | 1200\n");
    }

    #[test]
    fn test_spreadsheet_text_counts_headers_and_rows() {
        let sheets = vec![
            ("A".to_string(), rows(json!([["1"], ["2"], ["3"]]))),
            ("B".to_string(), rows(json!([]))),
            ("C".to_string(), rows(json!([["x", "y", "z"]]))),
        ];

        let text = spreadsheet_text(&sheets);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.iter().filter(|l| l.starts_with("Sheet: ")).count(), 3);
        assert_eq!(lines.iter().filter(|l| !l.is_empty() && !l.starts_with("Sheet: ")).count(), 4);
        assert!(lines.contains(&"x | y | z"));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("text")), "text");
        assert_eq!(cell_text(&json!(3.5)), "3.5");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&Value::Null), "");
    }

    #[test]
    fn test_pdf_placeholder() {
        assert_eq!(
            pdf_placeholder(2048),
            "PDF file downloaded (size: 2048 bytes). Text extraction is not supported."
        );
    }
}
