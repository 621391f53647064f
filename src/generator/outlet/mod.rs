use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::generator::deck::Deck;
use crate::generator::outlet::archive::{DECK_EXTENSION, archive_file_name, save_archive};
use crate::types::ResearchResult;

pub mod archive;
pub mod pptx;

pub use archive::{list_archives, load_archive};
pub use pptx::PptxWriter;

/// 输出结果
#[derive(Debug, Clone, Default)]
pub struct OutletReceipt {
    pub archive_path: Option<PathBuf>,
    pub deck_path: Option<PathBuf>,
    /// 演示文稿的字节（内存交付）
    pub deck_bytes: Option<Vec<u8>>,
    /// 与存档同名的 .pptx 文件名
    pub deck_file_name: String,
}

pub trait Outlet {
    async fn save(&self, result: &ResearchResult, deck: Option<&Deck>) -> Result<OutletReceipt>;
}

/// 写入输出目录：JSON存档与 .pptx
pub struct DiskOutlet {
    output_dir: PathBuf,
    writer: PptxWriter,
}

impl DiskOutlet {
    pub fn new(output_dir: impl Into<PathBuf>, writer: PptxWriter) -> Self {
        Self {
            output_dir: output_dir.into(),
            writer,
        }
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, result: &ResearchResult, deck: Option<&Deck>) -> Result<OutletReceipt> {
        println!("\n🖊️ 结果存储中...");
        let mut receipt = MemoryOutlet::new(self.writer.clone())
            .save(result, deck)
            .await?;

        let archive_path = save_archive(&self.output_dir, result)?;
        println!("💾 已保存存档: {}", archive_path.display());
        receipt.archive_path = Some(archive_path);

        if let Some(bytes) = &receipt.deck_bytes {
            let deck_path = self.output_dir.join(&receipt.deck_file_name);
            fs::write(&deck_path, bytes)
                .with_context(|| format!("Failed to write deck: {}", deck_path.display()))?;
            println!("💾 已保存演示文稿: {}", deck_path.display());
            receipt.deck_path = Some(deck_path);
        }

        Ok(receipt)
    }
}

/// 只在内存中生成演示文稿，不写文件
pub struct MemoryOutlet {
    writer: PptxWriter,
}

impl MemoryOutlet {
    pub fn new(writer: PptxWriter) -> Self {
        Self { writer }
    }
}

impl Outlet for MemoryOutlet {
    async fn save(&self, result: &ResearchResult, deck: Option<&Deck>) -> Result<OutletReceipt> {
        let deck_bytes = deck.map(|deck| self.writer.write(deck)).transpose()?;
        Ok(OutletReceipt {
            archive_path: None,
            deck_path: None,
            deck_bytes,
            deck_file_name: archive_file_name(
                &result.client_name,
                &result.created_at,
                DECK_EXTENSION,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::deck::DeckBuilder;

    fn sample() -> (ResearchResult, Deck) {
        let mut result = ResearchResult::new("Acme", "小売");
        result.created_at = "2025-01-15 09:30".to_string();
        let deck = DeckBuilder::default().build(&result).unwrap();
        (result, deck)
    }

    #[tokio::test]
    async fn test_memory_outlet_returns_bytes_only() {
        let (result, deck) = sample();
        let receipt = MemoryOutlet::new(PptxWriter::new("Noto Sans JP"))
            .save(&result, Some(&deck))
            .await
            .unwrap();

        assert!(receipt.archive_path.is_none());
        assert_eq!(receipt.deck_file_name, "3C分析_Acme_2025-01-15_09-30.pptx");
        assert_eq!(&receipt.deck_bytes.unwrap()[..2], b"PK");
    }

    #[tokio::test]
    async fn test_disk_outlet_writes_archive_and_deck() {
        let dir = tempfile::tempdir().unwrap();
        let (result, deck) = sample();
        let outlet = DiskOutlet::new(dir.path(), PptxWriter::new("Noto Sans JP"));

        let receipt = outlet.save(&result, Some(&deck)).await.unwrap();
        assert!(receipt.archive_path.unwrap().exists());
        let deck_path = receipt.deck_path.unwrap();
        assert!(deck_path.ends_with("3C分析_Acme_2025-01-15_09-30.pptx"));
        assert!(deck_path.exists());
    }

    #[tokio::test]
    async fn test_disk_outlet_without_deck() {
        let dir = tempfile::tempdir().unwrap();
        let (result, _) = sample();
        let outlet = DiskOutlet::new(dir.path(), PptxWriter::new("Noto Sans JP"));

        let receipt = outlet.save(&result, None).await.unwrap();
        assert!(receipt.archive_path.is_some());
        assert!(receipt.deck_path.is_none());
        assert!(receipt.deck_bytes.is_none());
    }
}
