//! 模型请求与响应的类型定义

use serde_json::Value;
use tracing::debug;

/// 单次模型请求
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub prompt: String,
    pub max_tokens: u32,
    /// None 表示不启用web检索
    pub web_search: Option<WebSearch>,
}

/// web检索能力及其调用上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebSearch {
    pub max_uses: u32,
}

/// 引用或检索结果中的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub url: String,
    pub title: String,
}

/// 检索结果包中的单项
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchItem {
    Hit(SourceRef),
    /// 检索失败的条目，携带错误码
    Error(String),
}

/// web_search_tool_result 块的内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResultContent {
    Results(Vec<SearchItem>),
    /// 整个检索调用失败
    Error(String),
}

/// 响应中的内容块
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// 纯文本，可能带有引用
    Text {
        text: String,
        citations: Vec<SourceRef>,
    },
    /// 检索结果包
    WebSearchResult(SearchResultContent),
    /// 模型发起的检索请求（只记录检索词）
    ServerToolUse { query: String },
    /// 未识别的块类型
    Other(String),
}

/// 模型响应
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelResponse {
    pub content: Vec<ContentBlock>,
}

impl ModelResponse {
    /// 只有一个文本块的响应
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text {
                text: text.into(),
                citations: Vec::new(),
            }],
        }
    }

    /// 从解码后的JSON构建响应；结构不符时得到空响应而不是错误
    pub fn from_value(value: &Value) -> Self {
        match value.get("content") {
            Some(Value::Array(blocks)) => Self {
                content: blocks.iter().map(ContentBlock::from_value).collect(),
            },
            other => {
                debug!(content = ?other.map(json_kind), "response content is not a list");
                Self::default()
            }
        }
    }
}

impl ContentBlock {
    pub fn from_value(value: &Value) -> Self {
        let kind = str_field(value, "type");
        match kind.as_str() {
            "text" => ContentBlock::Text {
                text: str_field(value, "text"),
                citations: value
                    .get("citations")
                    .and_then(Value::as_array)
                    .map(|items| items.iter().filter_map(source_ref).collect())
                    .unwrap_or_default(),
            },
            "web_search_tool_result" => {
                ContentBlock::WebSearchResult(match value.get("content") {
                    Some(Value::Array(items)) => {
                        SearchResultContent::Results(items.iter().map(search_item).collect())
                    }
                    Some(other) => {
                        debug!(content = %other, "web search returned a non-list result");
                        SearchResultContent::Error(str_field(other, "error_code"))
                    }
                    None => SearchResultContent::Results(Vec::new()),
                })
            }
            "server_tool_use" => ContentBlock::ServerToolUse {
                query: value
                    .get("input")
                    .map(|input| str_field(input, "query"))
                    .unwrap_or_default(),
            },
            _ => {
                debug!(block_type = %kind, "unknown content block");
                ContentBlock::Other(kind)
            }
        }
    }
}

fn search_item(value: &Value) -> SearchItem {
    if str_field(value, "type") == "web_search_tool_result_error" {
        debug!(item = %value, "web search error item");
        return SearchItem::Error(str_field(value, "error_code"));
    }
    match source_ref(value) {
        Some(source) => SearchItem::Hit(source),
        None => SearchItem::Error(String::from("missing_url")),
    }
}

fn source_ref(value: &Value) -> Option<SourceRef> {
    let url = str_field(value, "url");
    if url.is_empty() {
        return None;
    }
    Some(SourceRef {
        url,
        title: str_field(value, "title"),
    })
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
