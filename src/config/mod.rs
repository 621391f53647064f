use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::generator::chart::ChartStyle;
use crate::generator::deck::DeckStyle;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "threec.toml";

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 归档JSON与pptx的输出目录
    pub output_path: PathBuf,

    /// 是否启用详细日志
    pub verbose: bool,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 调研流程配置
    pub research: ResearchConfig,

    /// 幻灯片样式
    pub deck: DeckStyle,

    /// 图表样式
    pub chart: ChartStyle,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// anthropic-version 请求头
    pub anthropic_version: String,

    /// 调研使用的模型
    pub model: String,

    /// 调研阶段的最大tokens
    pub max_tokens: u32,

    /// 要点总结阶段的最大tokens
    pub synthesis_max_tokens: u32,

    /// 单次请求允许的web检索次数
    pub web_search_max_uses: u32,

    /// 触发限流后的重试次数（不含首次调用）
    pub retry_attempts: u32,

    /// 限流重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// 调研流程配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ResearchConfig {
    /// 各分析阶段之间的固定等待（毫秒），用于规避限流
    pub phase_delay_ms: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("output"),
            verbose: false,
            llm: LLMConfig::default(),
            research: ResearchConfig::default(),
            deck: DeckStyle::default(),
            chart: ChartStyle::default(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.anthropic.com"),
            anthropic_version: String::from("2023-06-01"),
            model: String::from("claude-haiku-4-5-20251001"),
            max_tokens: 8192,
            synthesis_max_tokens: 2048,
            web_search_max_uses: 3,
            retry_attempts: 2,
            retry_delay_ms: 30_000,
            timeout_seconds: 300,
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            phase_delay_ms: 15_000,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
