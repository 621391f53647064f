use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info};

use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::deck::DeckBuilder;
use crate::generator::outlet::archive::{DECK_EXTENSION, archive_file_name, load_archive};
use crate::generator::outlet::{DiskOutlet, Outlet, OutletReceipt, PptxWriter};
use crate::generator::research::{self, ProgressReporter, ResearchRequest};
use crate::types::ResearchResult;

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: HashMap<&'static str, Instant>,
    phase_durations: Vec<(&'static str, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: HashMap::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &'static str) {
        self.phase_start_times.insert(phase_name, Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &'static str) -> Option<Duration> {
        let start_time = self.phase_start_times.remove(phase_name)?;
        let duration = start_time.elapsed();
        self.phase_durations.push((phase_name, duration));
        Some(duration)
    }

    pub fn total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 按阶段结束顺序输出的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.total_duration().as_secs_f64()
        );
        if !self.phase_durations.is_empty() {
            report.push_str("\n各阶段执行时间:\n");
            for (phase, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }
        report
    }
}

/// 时间跟踪常量
pub struct TimingKeys;

impl TimingKeys {
    pub const RESEARCH: &'static str = "research";
    pub const LAYOUT: &'static str = "layout";
    pub const OUTPUT: &'static str = "output";
}

/// 一次运行的产出
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub result: ResearchResult,
    pub receipt: OutletReceipt,
}

/// 启动3C分析工作流：调研 → 排版 → 输出
pub async fn launch(
    config: &Config,
    request: &ResearchRequest,
    with_deck: bool,
    progress: &dyn ProgressReporter,
) -> Result<RunOutcome> {
    let context = GeneratorContext::new(config.clone())?;
    launch_with_context(&context, request, with_deck, progress).await
}

/// 使用给定上下文执行工作流。调研完整结束之前不会写出任何文件
pub async fn launch_with_context(
    context: &GeneratorContext,
    request: &ResearchRequest,
    with_deck: bool,
    progress: &dyn ProgressReporter,
) -> Result<RunOutcome> {
    let config = &context.config;
    let mut timing = TimingScope::new();

    timing.start_phase(TimingKeys::RESEARCH);
    let result = research::execute(context, request, progress).await?;
    timing.end_phase(TimingKeys::RESEARCH);

    timing.start_phase(TimingKeys::LAYOUT);
    let deck = if with_deck {
        Some(DeckBuilder::new(config.deck.clone(), config.chart.clone()).build(&result)?)
    } else {
        None
    };
    timing.end_phase(TimingKeys::LAYOUT);

    timing.start_phase(TimingKeys::OUTPUT);
    let outlet = DiskOutlet::new(&config.output_path, PptxWriter::new(&config.deck.font));
    let receipt = outlet.save(&result, deck.as_ref()).await?;
    timing.end_phase(TimingKeys::OUTPUT);

    info!(client = %result.client_name, "workflow finished");
    debug!("{}", timing.generate_timing_report());

    Ok(RunOutcome { result, receipt })
}

/// 从存档重新生成演示文稿，写入输出目录
pub fn render_archive(config: &Config, archive: &Path) -> Result<OutletReceipt> {
    let result = load_archive(archive)?;
    let deck = DeckBuilder::new(config.deck.clone(), config.chart.clone()).build(&result)?;

    let deck_file_name = archive_file_name(&result.client_name, &result.created_at, DECK_EXTENSION);
    let deck_path = config.output_path.join(&deck_file_name);
    PptxWriter::new(&config.deck.font).write_to_file(&deck, &deck_path)?;
    info!(path = %deck_path.display(), "deck rendered from archive");

    Ok(OutletReceipt {
        archive_path: Some(archive.to_path_buf()),
        deck_path: Some(deck_path),
        deck_bytes: None,
        deck_file_name,
    })
}
