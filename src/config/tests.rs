#[cfg(test)]
mod tests {
    use crate::config::{Config, LLMConfig, ResearchConfig};
    use crate::generator::chart::ChartStyle;
    use crate::generator::deck::DeckStyle;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.output_path, PathBuf::from("output"));
        assert!(!config.verbose);
        assert_eq!(config.deck, DeckStyle::default());
        assert_eq!(config.chart, ChartStyle::default());
    }

    #[test]
    fn test_llm_config_default() {
        let config = LLMConfig::default();

        // api_key may be empty if env var is not set
        assert_eq!(config.api_base_url, "https://api.anthropic.com");
        assert!(!config.model.is_empty());
        assert_eq!(config.max_tokens, 8192);
        assert_eq!(config.synthesis_max_tokens, 2048);
        assert_eq!(config.web_search_max_uses, 3);
        assert_eq!(config.retry_attempts, 2);
        assert_eq!(config.retry_delay_ms, 30_000);
        assert_eq!(config.timeout_seconds, 300);
    }

    #[test]
    fn test_research_config_default() {
        let config = ResearchConfig::default();
        assert_eq!(config.phase_delay_ms, 15_000);
    }

    #[test]
    fn test_deck_style_default_canvas_is_16_9() {
        let style = DeckStyle::default();

        assert_eq!(style.slide_width_emu, 12_192_000);
        assert_eq!(style.slide_height_emu, 6_858_000);
        assert_eq!(style.questions_per_slide, 12);
        assert!(style.content_top < style.content_bottom);
    }

    #[test]
    fn test_chart_style_default_tolerance() {
        let style = ChartStyle::default();

        assert_eq!(style.label_tolerance_x, 0.8);
        assert_eq!(style.label_tolerance_y, 0.6);
        assert_eq!(style.max_timeline_events, 8);
        assert_eq!(style.default_axis_x, "軸1");
    }

    #[test]
    fn test_config_from_file_partial() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("threec.toml");
        fs::write(
            &config_path,
            r#"
output_path = "reports"
verbose = true

[llm]
api_key = "sk-test"
retry_attempts = 4

[research]
phase_delay_ms = 0

[deck]
font = "Arial"
"#,
        )
        .unwrap();

        let config = Config::from_file(&config_path).unwrap();

        assert_eq!(config.output_path, PathBuf::from("reports"));
        assert!(config.verbose);
        assert_eq!(config.llm.api_key, "sk-test");
        assert_eq!(config.llm.retry_attempts, 4);
        // 未指定的字段保持默认值
        assert_eq!(config.llm.retry_delay_ms, 30_000);
        assert_eq!(config.research.phase_delay_ms, 0);
        assert_eq!(config.deck.font, "Arial");
        assert_eq!(config.deck.primary, "1A1A2E");
    }

    #[test]
    fn test_config_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::from_file(&temp_dir.path().join("nope.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "output_path = [").unwrap();

        let result = Config::from_file(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };

        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
