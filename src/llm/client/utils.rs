use crate::llm::client::types::{ContentBlock, ModelResponse, SearchItem, SearchResultContent};
use crate::types::{SourceInfo, dedup_sources};

/// 从响应中提取的文本与来源
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    pub text: String,
    pub sources: Vec<SourceInfo>,
}

/// 拼接全部文本块，并收集引用与检索结果中的URL（按URL去重）
pub fn extract_text_and_sources(response: &ModelResponse) -> SearchOutcome {
    let mut text_parts = Vec::new();
    let mut sources = Vec::new();

    for block in &response.content {
        match block {
            ContentBlock::Text { text, citations } => {
                if !text.is_empty() {
                    text_parts.push(text.as_str());
                }
                sources.extend(
                    citations
                        .iter()
                        .map(|cite| SourceInfo::new(&cite.url, &cite.title)),
                );
            }
            ContentBlock::WebSearchResult(SearchResultContent::Results(items)) => {
                sources.extend(items.iter().filter_map(|item| match item {
                    SearchItem::Hit(hit) => Some(SourceInfo::new(&hit.url, &hit.title)),
                    SearchItem::Error(_) => None,
                }));
            }
            ContentBlock::WebSearchResult(SearchResultContent::Error(_))
            | ContentBlock::ServerToolUse { .. }
            | ContentBlock::Other(_) => {}
        }
    }

    SearchOutcome {
        text: text_parts.join("\n"),
        sources: dedup_sources(sources),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::types::SourceRef;

    fn source(url: &str, title: &str) -> SourceRef {
        SourceRef {
            url: url.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_extract_joins_text_and_dedups_sources() {
        let response = ModelResponse {
            content: vec![
                ContentBlock::ServerToolUse {
                    query: "Acme".to_string(),
                },
                ContentBlock::WebSearchResult(SearchResultContent::Results(vec![
                    SearchItem::Hit(source("https://a.example", "A")),
                    SearchItem::Error("unavailable".to_string()),
                    SearchItem::Hit(source("https://b.example", "B")),
                ])),
                ContentBlock::Text {
                    text: "first".to_string(),
                    citations: vec![source("https://b.example", "B cited")],
                },
                ContentBlock::Text {
                    text: String::new(),
                    citations: vec![],
                },
                ContentBlock::Text {
                    text: "second".to_string(),
                    citations: vec![source("https://c.example", "C")],
                },
            ],
        };

        let outcome = extract_text_and_sources(&response);

        assert_eq!(outcome.text, "first\nsecond");
        let urls: Vec<_> = outcome.sources.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://a.example", "https://b.example", "https://c.example"]
        );
        assert_eq!(outcome.sources[1].title, "B");
    }

    #[test]
    fn test_extract_from_empty_response() {
        let outcome = extract_text_and_sources(&ModelResponse::default());
        assert_eq!(outcome, SearchOutcome::default());
    }
}
