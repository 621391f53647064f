use anyhow::Result;
use clap::Parser;
use threec_deck::cli::{Args, Command};
use threec_deck::generator::outlet::{list_archives, load_archive};
use threec_deck::generator::research::{Phase, ResearchRequest};
use threec_deck::generator::workflow::{launch, render_archive};

fn phase_icon(phase: Phase) -> &'static str {
    match phase {
        Phase::Company => "🏢",
        Phase::Competitor => "⚔️",
        Phase::Customer => "👥",
        Phase::Summary => "📝",
        Phase::Done => "✅",
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    let command = args.command.clone();
    let config = args.into_config()?;
    init_tracing(config.verbose);

    match command {
        Command::Run {
            client,
            industry,
            orientation,
            no_deck,
        } => {
            println!("🚀 开始3C分析: {}（{}）", client, industry);
            let request = ResearchRequest::new(&client, &industry).with_orientation(&orientation);
            let progress =
                |phase: Phase, detail: &str| println!("{} {}", phase_icon(phase), detail);

            let outcome = launch(&config, &request, !no_deck, &progress).await?;
            println!(
                "\n🎉 分析完成: 关键发现 {} 条，信息来源 {} 条",
                outcome.result.key_findings.len(),
                outcome.result.sources.len()
            );
        }
        Command::Render { archive } => {
            let receipt = render_archive(&config, &archive)?;
            if let Some(deck_path) = receipt.deck_path {
                println!("💾 已生成演示文稿: {}", deck_path.display());
            }
        }
        Command::History => {
            let archives = list_archives(&config.output_path)?;
            if archives.is_empty() {
                println!("📭 暂无存档: {}", config.output_path.display());
            }
            for path in archives {
                match load_archive(&path) {
                    Ok(result) => println!(
                        "📄 {}  {}（{}）  {}",
                        result.created_at,
                        result.client_name,
                        result.industry,
                        path.display()
                    ),
                    Err(e) => println!("⚠️ {}: {}", path.display(), e),
                }
            }
        }
    }

    Ok(())
}
