//! 模型回答的归一化：从自由文本中提取JSON，并尽力转换为类型化记录。
//!
//! 这里的所有函数都是全函数：任何输入都会得到一个（可能为空的）结果，
//! 解析失败只会产生 debug 级别的日志。

use serde_json::{Map, Value};
use tracing::debug;

use crate::types::{
    CompanyInfo, Competitor, CompetitorInfo, CustomerInfo, DEFAULT_COORDINATE, NewsItem,
    Position, SimilarCase, SnsInfo, TimelineEvent,
};

/// 解析结果的JSON对象
pub type JsonObject = Map<String, Value>;

/// key_findings 缺失时使用的唯一要点
pub const DEFAULT_KEY_FINDING: &str = "分析データの詳細は各セクションをご確認ください。";

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// 定位图坐标的取值范围
const COORDINATE_MIN: f64 = 0.0;
const COORDINATE_MAX: f64 = 10.0;

/// 从回答文本中提取JSON对象。
///
/// 依次尝试 ```json 代码块、任意 ``` 代码块、首个 `{` 到最后一个 `}`。
/// 第一个出现了开始标记的策略决定结果：缺少结束标记、解析失败或者不是对象都返回空对象。
pub fn parse_json_from_text(text: &str) -> JsonObject {
    let Some(candidate) = extract_candidate(text) else {
        return JsonObject::new();
    };
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return JsonObject::new();
    }

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            debug!(kind = ?other, "parsed JSON is not an object");
            JsonObject::new()
        }
        Err(err) => {
            debug!(error = %err, "JSON parse error");
            JsonObject::new()
        }
    }
}

fn extract_candidate(text: &str) -> Option<&str> {
    if let Some(start) = text.find(JSON_FENCE) {
        let body = &text[start + JSON_FENCE.len()..];
        return fenced_body(body);
    }

    if let Some(start) = text.find(FENCE) {
        let body = skip_info_string(&text[start + FENCE.len()..]);
        return fenced_body(body);
    }

    let open = text.find('{')?;
    let close = text.rfind('}')?;
    if close <= open {
        debug!("no brace-delimited object in text");
        return None;
    }
    Some(&text[open..=close])
}

fn fenced_body(body: &str) -> Option<&str> {
    match body.find(FENCE) {
        Some(end) => Some(&body[..end]),
        None => {
            debug!("code fence is not closed");
            None
        }
    }
}

/// ``` 后紧跟的语言标记行（如 `javascript`）不属于内容
fn skip_info_string(body: &str) -> &str {
    let Some(line_end) = body.find('\n') else {
        return body;
    };
    let first_line = body[..line_end].trim();
    let is_info_string = !first_line.is_empty()
        && first_line
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'));
    if is_info_string {
        &body[line_end + 1..]
    } else {
        body
    }
}

/// 任意JSON值转字符串：null为空串，数组与对象为紧凑JSON
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// 定位图坐标：数字或可解析为数字的字符串，其余情况取 5.0，结果限制在 [0, 10]
pub fn loose_coordinate(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(coordinate) if coordinate.is_finite() => {
            coordinate.clamp(COORDINATE_MIN, COORDINATE_MAX)
        }
        _ => DEFAULT_COORDINATE,
    }
}

fn text_field(data: &JsonObject, key: &str) -> String {
    data.get(key).map(stringify).unwrap_or_default()
}

/// 期望列表的字段上出现标量时包装为单元素列表
fn text_list_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(stringify).collect(),
        Value::Null => Vec::new(),
        scalar => vec![stringify(scalar)],
    }
}

fn text_list(data: &JsonObject, key: &str) -> Vec<String> {
    data.get(key).map(text_list_value).unwrap_or_default()
}

fn record_list<T: FromLoose>(data: &JsonObject, key: &str) -> Vec<T> {
    match data.get(key) {
        Some(Value::Array(items)) => items.iter().map(T::from_loose).collect(),
        Some(other) => {
            debug!(field = key, value = %other, "expected a list of records");
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// 从任意JSON值宽松地构造记录，非对象输入得到默认记录
pub trait FromLoose: Default {
    fn from_object(data: &JsonObject) -> Self;

    fn from_loose(value: &Value) -> Self {
        match value.as_object() {
            Some(data) => Self::from_object(data),
            None => {
                debug!(value = %value, "expected an object, using defaults");
                Self::default()
            }
        }
    }
}

impl FromLoose for TimelineEvent {
    fn from_object(data: &JsonObject) -> Self {
        Self {
            year: text_field(data, "year"),
            description: text_field(data, "description"),
        }
    }
}

impl FromLoose for NewsItem {
    fn from_object(data: &JsonObject) -> Self {
        Self {
            title: text_field(data, "title"),
            date: text_field(data, "date"),
            summary: text_field(data, "summary"),
            url: text_field(data, "url"),
        }
    }
}

impl FromLoose for SnsInfo {
    fn from_object(data: &JsonObject) -> Self {
        Self {
            platform: text_field(data, "platform"),
            summary: text_field(data, "summary"),
            tone: text_field(data, "tone"),
            key_topics: text_list(data, "key_topics"),
        }
    }
}

impl FromLoose for Competitor {
    fn from_object(data: &JsonObject) -> Self {
        Self {
            name: text_field(data, "name"),
            description: text_field(data, "description"),
            strengths: text_field(data, "strengths"),
            weaknesses: text_field(data, "weaknesses"),
            differentiation: text_field(data, "differentiation"),
            position_x: loose_coordinate(data.get("position_x")),
            position_y: loose_coordinate(data.get("position_y")),
        }
    }
}

impl FromLoose for SimilarCase {
    fn from_object(data: &JsonObject) -> Self {
        Self {
            company: text_field(data, "company"),
            industry: text_field(data, "industry"),
            description: text_field(data, "description"),
            relevance: text_field(data, "relevance"),
        }
    }
}

/// Company分析结果；没有解析出任何内容时只保留客户名
pub fn normalize_company(data: &JsonObject, client_name: &str) -> CompanyInfo {
    if data.is_empty() {
        return CompanyInfo::named(client_name);
    }

    let name = text_field(data, "name");
    CompanyInfo {
        name: if name.trim().is_empty() {
            client_name.to_string()
        } else {
            name
        },
        official_url: text_field(data, "official_url"),
        mission_vision: text_field(data, "mission_vision"),
        business_overview: text_field(data, "business_overview"),
        products_services: text_field(data, "products_services"),
        timeline: record_list(data, "timeline"),
        recent_news: record_list(data, "recent_news"),
        ir_summary: text_field(data, "ir_summary"),
        sns_analysis: record_list(data, "sns_analysis"),
        brand_momentum: text_field(data, "brand_momentum"),
    }
}

pub fn normalize_competitor(data: &JsonObject) -> CompetitorInfo {
    if data.is_empty() {
        return CompetitorInfo::default();
    }

    CompetitorInfo {
        direct_competitors: record_list(data, "direct_competitors"),
        indirect_competitors: record_list(data, "indirect_competitors"),
        industry_position: text_field(data, "industry_position"),
        positioning_axis_x: text_field(data, "positioning_axis_x"),
        positioning_axis_y: text_field(data, "positioning_axis_y"),
        analyzed_company_position: Position {
            x: loose_coordinate(data.get("target_company_position_x")),
            y: loose_coordinate(data.get("target_company_position_y")),
        },
    }
}

pub fn normalize_customer(data: &JsonObject) -> CustomerInfo {
    CustomerInfo {
        market_size: text_field(data, "market_size"),
        market_trend: text_field(data, "market_trend"),
        target_segments: text_list(data, "target_segments"),
        target_description: text_field(data, "target_description"),
        similar_cases: record_list(data, "similar_cases"),
    }
}

/// key_findings 缺失（或为null）时返回默认要点
pub fn normalize_key_findings(data: &JsonObject) -> Vec<String> {
    match data.get("key_findings") {
        None | Some(Value::Null) => vec![DEFAULT_KEY_FINDING.to_string()],
        Some(value) => text_list_value(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_fence() {
        let text = "結果です。\n```json\n{\"name\": \"Acme\"}\n```\n以上";
        let data = parse_json_from_text(text);
        assert_eq!(data.get("name"), Some(&json!("Acme")));
    }

    #[test]
    fn test_parse_generic_fence_with_info_string() {
        let text = "```javascript\n{\"a\": 1}\n```";
        assert_eq!(parse_json_from_text(text).get("a"), Some(&json!(1)));

        let text = "```\n{\"b\": 2}\n```";
        assert_eq!(parse_json_from_text(text).get("b"), Some(&json!(2)));
    }

    #[test]
    fn test_parse_braces_without_fence() {
        let text = "前置き {\"x\": {\"y\": true}} 後書き";
        let data = parse_json_from_text(text);
        assert_eq!(data.get("x"), Some(&json!({"y": true})));
    }

    #[test]
    fn test_unclosed_json_fence_yields_empty() {
        let text = "```json\n{\"name\": \"Acme\"}";
        assert!(parse_json_from_text(text).is_empty());
    }

    #[test]
    fn test_garbage_and_non_object_yield_empty() {
        for text in [
            "",
            "no json here",
            "} backwards {",
            "```json\n[1, 2, 3]\n```",
            "```json\n{broken\n```",
            "```json\n\n```",
        ] {
            assert!(parse_json_from_text(text).is_empty(), "input: {:?}", text);
        }
    }

    #[test]
    fn test_stringify_is_total() {
        assert_eq!(stringify(&Value::Null), "");
        assert_eq!(stringify(&json!("text")), "text");
        assert_eq!(stringify(&json!(42)), "42");
        assert_eq!(stringify(&json!(1.5)), "1.5");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&json!([1, "a"])), "[1,\"a\"]");
        assert_eq!(stringify(&json!({"k": 1})), "{\"k\":1}");
    }

    #[test]
    fn test_loose_coordinate() {
        assert_eq!(loose_coordinate(Some(&json!(7))), 7.0);
        assert_eq!(loose_coordinate(Some(&json!(" 3.5 "))), 3.5);
        assert_eq!(loose_coordinate(Some(&json!("high"))), 5.0);
        assert_eq!(loose_coordinate(Some(&json!(null))), 5.0);
        assert_eq!(loose_coordinate(Some(&json!([1]))), 5.0);
        assert_eq!(loose_coordinate(Some(&json!("NaN"))), 5.0);
        assert_eq!(loose_coordinate(Some(&json!(15))), 10.0);
        assert_eq!(loose_coordinate(Some(&json!(-2))), 0.0);
        assert_eq!(loose_coordinate(None), 5.0);
    }

    #[test]
    fn test_competitor_with_bad_coordinate_defaults_to_center() {
        let competitor = Competitor::from_loose(&json!({
            "name": "Beta",
            "position_x": "high",
            "position_y": 2
        }));
        assert_eq!(competitor.name, "Beta");
        assert_eq!(competitor.position_x, 5.0);
        assert_eq!(competitor.position_y, 2.0);
    }

    #[test]
    fn test_non_object_record_becomes_default() {
        let event = TimelineEvent::from_loose(&json!("1990 創業"));
        assert_eq!(event, TimelineEvent::default());
        let competitor = Competitor::from_loose(&json!(3));
        assert_eq!(competitor.position_x, 5.0);
    }

    #[test]
    fn test_sns_scalar_topics_become_single_item() {
        let sns = SnsInfo::from_loose(&json!({"platform": "X", "key_topics": "新商品"}));
        assert_eq!(sns.key_topics, vec!["新商品".to_string()]);
    }

    #[test]
    fn test_normalize_company_empty_uses_client_name() {
        let company = normalize_company(&JsonObject::new(), "Acme");
        assert_eq!(company, CompanyInfo::named("Acme"));
    }

    #[test]
    fn test_normalize_company_coerces_fields() {
        let data = parse_json_from_text(
            r#"```json
            {
              "name": "",
              "business_overview": 123,
              "timeline": [{"year": 1990, "description": "創業"}, "bad"],
              "recent_news": {"title": "not a list"},
              "sns_analysis": [{"platform": "X", "tone": "ポジティブ", "key_topics": ["a", 1]}]
            }
            ```"#,
        );
        let company = normalize_company(&data, "Acme");

        assert_eq!(company.name, "Acme");
        assert_eq!(company.business_overview, "123");
        assert_eq!(company.timeline.len(), 2);
        assert_eq!(company.timeline[0].year, "1990");
        assert_eq!(company.timeline[1], TimelineEvent::default());
        assert!(company.recent_news.is_empty());
        assert_eq!(company.sns_analysis[0].key_topics, vec!["a", "1"]);
    }

    #[test]
    fn test_normalize_competitor_reads_target_position() {
        let data = parse_json_from_text(
            r#"{"direct_competitors": [{"name": "Beta", "position_x": 7, "position_y": 8}],
                "target_company_position_x": "6", "target_company_position_y": null}"#,
        );
        let info = normalize_competitor(&data);

        assert_eq!(info.direct_competitors.len(), 1);
        assert!(info.indirect_competitors.is_empty());
        assert_eq!(info.analyzed_company_position, Position { x: 6.0, y: 5.0 });
    }

    #[test]
    fn test_normalize_customer_scalar_segments() {
        let data = parse_json_from_text(r#"{"target_segments": "20代女性", "similar_cases": null}"#);
        let info = normalize_customer(&data);

        assert_eq!(info.target_segments, vec!["20代女性".to_string()]);
        assert!(info.similar_cases.is_empty());
    }

    #[test]
    fn test_normalize_key_findings() {
        assert_eq!(
            normalize_key_findings(&JsonObject::new()),
            vec![DEFAULT_KEY_FINDING.to_string()]
        );

        let data = parse_json_from_text(r#"{"key_findings": "ひとつだけ"}"#);
        assert_eq!(normalize_key_findings(&data), vec!["ひとつだけ".to_string()]);

        let data = parse_json_from_text(r#"{"key_findings": ["A", "B"]}"#);
        assert_eq!(normalize_key_findings(&data), vec!["A", "B"]);
    }
}
