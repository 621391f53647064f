use crate::config::{Config, DEFAULT_CONFIG_FILE};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// threec-deck - 由LLM检索驱动的3C分析与演示文稿生成工具
#[derive(Parser, Debug)]
#[command(name = "threec-deck")]
#[command(
    about = "Research a client company, its competitors and its customers with web-search backed LLM calls, then lay the findings out as an editable PowerPoint deck."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 输出路径（存档与演示文稿）
    #[arg(short, long, global = true)]
    pub output_path: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 使用的模型
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// LLM API KEY
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// LLM API基地址
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// 各分析阶段之间的等待（毫秒）
    #[arg(long, global = true)]
    pub phase_delay_ms: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 执行3C分析，保存存档并生成演示文稿
    Run {
        /// 客户名/品牌名
        #[arg(long)]
        client: String,

        /// 行业
        #[arg(long)]
        industry: String,

        /// 说明会（オリエン）信息
        #[arg(long, default_value = "")]
        orientation: String,

        /// 只保存存档，不生成演示文稿
        #[arg(long)]
        no_deck: bool,
    },
    /// 从已保存的存档重新生成演示文稿
    Render {
        /// 存档文件路径
        #[arg(long)]
        archive: PathBuf,
    },
    /// 列出输出目录中的历史存档
    History,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定的配置文件必须可读
            Config::from_file(config_path)
                .with_context(|| format!("⚠️ 无法读取配置文件 {:?}", config_path))?
        } else {
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(DEFAULT_CONFIG_FILE);

            if default_config_path.exists() {
                Config::from_file(&default_config_path).with_context(|| {
                    format!("⚠️ 无法读取默认配置文件 {:?}", default_config_path)
                })?
            } else {
                Config::default()
            }
        };

        // 覆盖配置文件中的设置
        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(api_key) = self.api_key {
            config.llm.api_key = api_key;
        }
        if let Some(api_base_url) = self.api_base_url {
            config.llm.api_base_url = api_base_url;
        }
        if let Some(phase_delay_ms) = self.phase_delay_ms {
            config.research.phase_delay_ms = phase_delay_ms;
        }
        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }
}
