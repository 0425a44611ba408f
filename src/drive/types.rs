//! Subsets of the Docs and Sheets API responses the bot reads.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleDocument {
    pub body: Option<Body>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuralElement {
    pub paragraph: Option<Paragraph>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElement {
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextRun {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Spreadsheet {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetProperties {
    pub title: String,
}

/// Response of `spreadsheets.values.get`. Rows are ragged and trailing empty
/// cells are omitted by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetValues {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl GoogleDocument {
    /// A document whose body is one paragraph per run.
    #[cfg(test)]
    pub fn from_runs(runs: &[&str]) -> Self {
        let content = runs
            .iter()
            .map(|run| StructuralElement {
                paragraph: Some(Paragraph {
                    elements: vec![ParagraphElement {
                        text_run: Some(TextRun { content: Some(run.to_string()) }),
                    }],
                }),
            })
            .collect();

        Self { body: Some(Body { content }) }
    }
}
