use std::borrow::Cow;

use crate::assistant::DocumentContent;

pub const SEARCH_SYSTEM_MESSAGE: &str =
    "You are an assistant for corporate documents. Answer briefly and to the point.";

pub const SUMMARY_SYSTEM_MESSAGE: &str = "You are an assistant for analyzing documents.";

const TRUNCATION_MARKER: &str = "...";

/// Keeps the first `max_chars` characters of `content`, marking the cut with
/// an ellipsis.
pub fn truncate_content(content: &str, max_chars: usize) -> Cow<'_, str> {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{TRUNCATION_MARKER}", &content[..cut])),
        None => Cow::Borrowed(content),
    }
}

/// Renders documents as the context block of a prompt.
pub fn build_context(documents: &[DocumentContent], max_chars: usize) -> String {
    documents
        .iter()
        .map(|doc| {
            format!(
                "Document: {}\nContent: {}\n",
                doc.name,
                truncate_content(&doc.content, max_chars)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn search_prompt(context: &str, question: &str) -> String {
    format!(
        "Context from documents:\n{context}\n\n\
         User question: {question}\n\n\
         Answer the user's question using only the information from the documents above. \
         If the documents do not contain the information needed, say so explicitly. \
         Keep the answer short and to the point."
    )
}

pub fn summary_prompt(name: &str, content: &str) -> String {
    format!(
        "Document: {name}\nContent: {content}\n\n\
         Write a short description of this document (2-3 sentences)."
    )
}
