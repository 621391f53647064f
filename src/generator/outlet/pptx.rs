//! 将 [`Deck`] 序列化为 Office Open XML 演示文稿包（.pptx）。
//!
//! 包结构：内容类型、包关系、docProps、presentation、一个母版、一个空白版式、主题、
//! 各幻灯片及其引用的PNG图片。

use std::fmt::Write as _;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::generator::deck::{
    Align, Deck, EMU_PER_INCH, FilledShape, Frame, Geometry, Paragraph, Picture, Shape, Slide,
    Table, TableCell, TextAnchor, TextBox,
};

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const GENERATOR: &str = "threec-deck";

/// 转义XML文本与属性值中的特殊字符
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            // XML 1.0 不允许的控制字符
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => escaped.push(c),
        }
    }
    escaped
}

fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

fn xfrm(frame: &Frame, prefix: &str) -> String {
    format!(
        r#"<{prefix}:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></{prefix}:xfrm>"#,
        emu(frame.left),
        emu(frame.top),
        emu(frame.width).max(0),
        emu(frame.height).max(0),
    )
}

/// 演示文稿写出器
#[derive(Debug, Clone)]
pub struct PptxWriter {
    font: String,
}

impl PptxWriter {
    /// font 同时用于拉丁文与东亚文字
    pub fn new(font: impl Into<String>) -> Self {
        Self { font: font.into() }
    }

    /// 在内存中生成完整的 .pptx
    pub fn write(&self, deck: &Deck) -> Result<Vec<u8>> {
        let mut package = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut add = |name: &str, bytes: &[u8]| -> Result<()> {
            package
                .start_file(name, options)
                .with_context(|| format!("Failed to start package part: {}", name))?;
            package
                .write_all(bytes)
                .with_context(|| format!("Failed to write package part: {}", name))?;
            Ok(())
        };

        let mut media_count = 0;
        let mut slide_parts = Vec::with_capacity(deck.slides.len());
        for slide in &deck.slides {
            let part = SlidePart::render(slide, &self.font, &mut media_count);
            slide_parts.push(part);
        }

        add("[Content_Types].xml", content_types(deck.slides.len()).as_bytes())?;
        add("_rels/.rels", package_rels().as_bytes())?;
        add("docProps/core.xml", core_properties(deck).as_bytes())?;
        add("docProps/app.xml", app_properties(deck).as_bytes())?;
        add("ppt/presentation.xml", presentation(deck).as_bytes())?;
        add(
            "ppt/_rels/presentation.xml.rels",
            presentation_rels(deck.slides.len()).as_bytes(),
        )?;
        add("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER.as_bytes())?;
        add(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            SLIDE_MASTER_RELS.as_bytes(),
        )?;
        add("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT.as_bytes())?;
        add(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            SLIDE_LAYOUT_RELS.as_bytes(),
        )?;
        add("ppt/theme/theme1.xml", theme(&self.font).as_bytes())?;

        for (index, part) in slide_parts.iter().enumerate() {
            let number = index + 1;
            add(&format!("ppt/slides/slide{}.xml", number), part.xml.as_bytes())?;
            add(
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                part.rels().as_bytes(),
            )?;
            for (media_name, png) in &part.media {
                add(&format!("ppt/media/{}", media_name), png)?;
            }
        }

        let bytes = package
            .finish()
            .context("Failed to finalize presentation package")?
            .into_inner();
        debug!(
            slides = deck.slides.len(),
            media = media_count,
            bytes = bytes.len(),
            "presentation package written"
        );
        Ok(bytes)
    }

    pub fn write_to_file(&self, deck: &Deck, path: &Path) -> Result<()> {
        let bytes = self.write(deck)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, bytes).with_context(|| format!("Failed to write deck: {}", path.display()))
    }
}

/// 一张幻灯片的XML及其图片
struct SlidePart {
    xml: String,
    /// (文件名, PNG)；关系ID依次为 rId2、rId3…
    media: Vec<(String, Vec<u8>)>,
}

impl SlidePart {
    fn render(slide: &Slide, font: &str, media_count: &mut usize) -> Self {
        let mut media = Vec::new();
        let mut shapes = String::new();
        // id 1 为形状树本身
        let mut next_id = 2;

        for shape in &slide.shapes {
            let id = next_id;
            next_id += 1;
            match shape {
                Shape::Text(text_box) => shapes.push_str(&text_shape(id, text_box, font)),
                Shape::Filled(filled) => shapes.push_str(&filled_shape(id, filled)),
                Shape::Picture(picture) => {
                    *media_count += 1;
                    let media_name = format!("image{}.png", media_count);
                    media.push((media_name, picture.png.clone()));
                    let rel_id = format!("rId{}", media.len() + 1);
                    shapes.push_str(&picture_shape(id, picture, &rel_id));
                }
                Shape::Table(table) => shapes.push_str(&table_shape(id, table, font)),
            }
        }

        let background = slide
            .background
            .as_ref()
            .map(|color| {
                format!(
                    r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
                    escape_xml(color)
                )
            })
            .unwrap_or_default();

        let xml = format!(
            r#"{XML_DECLARATION}<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld>{background}<p:spTree>{GROUP_HEADER}{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
        );
        Self { xml, media }
    }

    fn rels(&self) -> String {
        let mut rels = format!(
            r#"{XML_DECLARATION}<Relationships xmlns="{NS_RELS}"><Relationship Id="rId1" Type="{REL_BASE}/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#
        );
        for (index, (media_name, _)) in self.media.iter().enumerate() {
            let _ = write!(
                rels,
                r#"<Relationship Id="rId{}" Type="{REL_BASE}/image" Target="../media/{}"/>"#,
                index + 2,
                media_name
            );
        }
        rels.push_str("</Relationships>");
        rels
    }
}

const GROUP_HEADER: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

fn run_properties(paragraph: &Paragraph, font: &str) -> String {
    let font = escape_xml(font);
    format!(
        r#"<a:rPr lang="ja-JP" altLang="en-US" sz="{}" b="{}" dirty="0"><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:latin typeface="{font}"/><a:ea typeface="{font}"/></a:rPr>"#,
        (paragraph.size_pt * 100.0).round() as i64,
        if paragraph.bold { 1 } else { 0 },
        escape_xml(&paragraph.color),
    )
}

/// 段落内的 `\n` 输出为 `<a:br/>`
fn paragraph_xml(paragraph: &Paragraph, font: &str) -> String {
    let algn = match paragraph.align {
        Align::Left => "l",
        Align::Center => "ctr",
        Align::Right => "r",
    };
    let properties = run_properties(paragraph, font);

    let mut xml = format!(r#"<a:p><a:pPr algn="{algn}"/>"#);
    for (index, line) in paragraph.text.split('\n').enumerate() {
        if index > 0 {
            let _ = write!(xml, "<a:br>{properties}</a:br>");
        }
        let _ = write!(xml, "<a:r>{properties}<a:t>{}</a:t></a:r>", escape_xml(line));
    }
    xml.push_str("</a:p>");
    xml
}

fn text_shape(id: usize, text_box: &TextBox, font: &str) -> String {
    let wrap = if text_box.wrap { "square" } else { "none" };
    let anchor = match text_box.anchor {
        TextAnchor::Top => "t",
        TextAnchor::Middle => "ctr",
        TextAnchor::Bottom => "b",
    };
    let insets = if text_box.tight {
        r#" lIns="0" tIns="0" rIns="0" bIns="0""#
    } else {
        ""
    };
    let vert = if text_box.vertical {
        r#" vert="vert270""#
    } else {
        ""
    };
    let paragraphs: String = text_box
        .paragraphs
        .iter()
        .map(|paragraph| paragraph_xml(paragraph, font))
        .collect();

    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="TextBox {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="{wrap}"{insets}{vert} rtlCol="0" anchor="{anchor}"><a:noAutofit/></a:bodyPr><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#,
        xfrm(&text_box.frame, "a"),
    )
}

fn filled_shape(id: usize, filled: &FilledShape) -> String {
    let geometry = match filled.geometry {
        Geometry::Rect => "rect",
        Geometry::Ellipse => "ellipse",
    };
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Shape {id}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr>{}<a:prstGeom prst="{geometry}"><a:avLst/></a:prstGeom><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:ln><a:noFill/></a:ln></p:spPr></p:sp>"#,
        xfrm(&filled.frame, "a"),
        escape_xml(&filled.fill),
    )
}

fn picture_shape(id: usize, picture: &Picture, rel_id: &str) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture {id}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
        xfrm(&picture.frame, "a"),
    )
}

fn table_cell(cell: &TableCell, font: &str) -> String {
    let paragraph = Paragraph {
        text: cell.text.clone(),
        size_pt: cell.size_pt,
        bold: cell.bold,
        color: cell.color.clone(),
        align: Align::Left,
    };
    let fill = cell
        .fill
        .as_ref()
        .map(|color| format!(r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, escape_xml(color)))
        .unwrap_or_default();
    format!(
        r#"<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>{}</a:txBody><a:tcPr>{fill}</a:tcPr></a:tc>"#,
        paragraph_xml(&paragraph, font),
    )
}

fn table_shape(id: usize, table: &Table, font: &str) -> String {
    let grid: String = table
        .column_widths
        .iter()
        .map(|width| format!(r#"<a:gridCol w="{}"/>"#, emu(*width)))
        .collect();
    let rows: String = table
        .rows
        .iter()
        .map(|row| {
            let cells: String = row.cells.iter().map(|cell| table_cell(cell, font)).collect();
            format!(r#"<a:tr h="{}">{cells}</a:tr>"#, emu(row.height))
        })
        .collect();

    format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{id}" name="Table {id}"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr>{}<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr firstRow="1" bandRow="1"/><a:tblGrid>{grid}</a:tblGrid>{rows}</a:tbl></a:graphicData></a:graphic></p:graphicFrame>"#,
        xfrm(&table.frame, "p"),
    )
}

fn content_types(slide_count: usize) -> String {
    let mut xml = format!(
        r#"{XML_DECLARATION}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#
    );
    for number in 1..=slide_count {
        let _ = write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{number}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
        );
    }
    xml.push_str("</Types>");
    xml
}

fn package_rels() -> String {
    format!(
        r#"{XML_DECLARATION}<Relationships xmlns="{NS_RELS}"><Relationship Id="rId1" Type="{REL_BASE}/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="{REL_BASE}/extended-properties" Target="docProps/app.xml"/></Relationships>"#
    )
}

fn core_properties(deck: &Deck) -> String {
    let title = deck
        .slides
        .first()
        .map(|slide| escape_xml(&slide.title))
        .unwrap_or_default();
    format!(
        r#"{XML_DECLARATION}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{title}</dc:title><dc:creator>{GENERATOR}</dc:creator></cp:coreProperties>"#
    )
}

fn app_properties(deck: &Deck) -> String {
    format!(
        r#"{XML_DECLARATION}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>{GENERATOR}</Application><Slides>{}</Slides></Properties>"#,
        deck.slides.len()
    )
}

/// 关系ID：rId1 母版、rId2 主题、rId3 起为幻灯片
fn presentation(deck: &Deck) -> String {
    let slide_ids: String = (0..deck.slides.len())
        .map(|index| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + index, index + 3))
        .collect();
    format!(
        r#"{XML_DECLARATION}<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{slide_ids}</p:sldIdLst><p:sldSz cx="{}" cy="{}"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
        deck.width_emu, deck.height_emu,
    )
}

fn presentation_rels(slide_count: usize) -> String {
    let mut xml = format!(
        r#"{XML_DECLARATION}<Relationships xmlns="{NS_RELS}"><Relationship Id="rId1" Type="{REL_BASE}/slideMaster" Target="slideMasters/slideMaster1.xml"/><Relationship Id="rId2" Type="{REL_BASE}/theme" Target="theme/theme1.xml"/>"#
    );
    for number in 1..=slide_count {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{REL_BASE}/slide" Target="slides/slide{number}.xml"/>"#,
            number + 2
        );
    }
    xml.push_str("</Relationships>");
    xml
}

const SLIDE_MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst><p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles></p:sldMaster>"#;

const SLIDE_MASTER_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/></Relationships>"#;

const SLIDE_LAYOUT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1"><p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#;

const SLIDE_LAYOUT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#;

/// 最小主题：配色、字体（主/次字体均为 font）与格式方案
fn theme(font: &str) -> String {
    let font = escape_xml(font);
    let solid = |val: &str| format!(r#"<a:solidFill><a:schemeClr val="{val}"/></a:solidFill>"#);
    let line = |width: u32| {
        format!(
            r#"<a:ln w="{width}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln>"#
        )
    };
    let fills = solid("phClr").repeat(3);
    let lines = format!("{}{}{}", line(6350), line(12700), line(19050));
    let effects = "<a:effectStyle><a:effectLst/></a:effectStyle>".repeat(3);

    format!(
        r#"{XML_DECLARATION}<a:theme xmlns:a="{NS_A}" name="{GENERATOR}"><a:themeElements><a:clrScheme name="{GENERATOR}"><a:dk1><a:srgbClr val="000000"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1A1A2E"/></a:dk2><a:lt2><a:srgbClr val="F5F5F5"/></a:lt2><a:accent1><a:srgbClr val="0F3460"/></a:accent1><a:accent2><a:srgbClr val="E94560"/></a:accent2><a:accent3><a:srgbClr val="27AE60"/></a:accent3><a:accent4><a:srgbClr val="16213E"/></a:accent4><a:accent5><a:srgbClr val="2980B9"/></a:accent5><a:accent6><a:srgbClr val="999999"/></a:accent6><a:hlink><a:srgbClr val="2980B9"/></a:hlink><a:folHlink><a:srgbClr val="16213E"/></a:folHlink></a:clrScheme><a:fontScheme name="{GENERATOR}"><a:majorFont><a:latin typeface="{font}"/><a:ea typeface="{font}"/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="{font}"/><a:ea typeface="{font}"/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="{GENERATOR}"><a:fillStyleLst>{fills}</a:fillStyleLst><a:lnStyleLst>{lines}</a:lnStyleLst><a:effectStyleLst>{effects}</a:effectStyleLst><a:bgFillStyleLst>{fills}</a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::deck::{DeckBuilder, SlideKind};
    use crate::types::{Competitor, ResearchResult};
    use std::io::Read;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    fn sample_deck() -> Deck {
        let mut result = ResearchResult::new("Acme & <Co>", "小売");
        result.competitor.direct_competitors = vec![Competitor {
            name: "Beta".to_string(),
            ..Default::default()
        }];
        DeckBuilder::default().build(&result).unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape_xml("x\u{0}y"), "xy");
    }

    #[test]
    fn test_package_parts() {
        let deck = sample_deck();
        let bytes = PptxWriter::new("Noto Sans JP").write(&deck).unwrap();
        assert_eq!(&bytes[..2], b"PK");

        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "docProps/core.xml",
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }
        let slide_count = names
            .iter()
            .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
            .count();
        assert_eq!(slide_count, deck.slides.len());
        // 没有沿革事件时只有定位图一张图片
        assert!(names.contains(&"ppt/media/image1.png"));

        let presentation = read_part(&bytes, "ppt/presentation.xml");
        assert!(presentation.contains(r#"<p:sldSz cx="12192000" cy="6858000"/>"#));
    }

    #[test]
    fn test_cover_text_escaped_with_font() {
        let deck = sample_deck();
        let bytes = PptxWriter::new("Noto Sans JP").write(&deck).unwrap();
        let cover = read_part(&bytes, "ppt/slides/slide1.xml");

        assert!(cover.contains("Acme &amp; &lt;Co&gt;"));
        assert!(cover.contains(r#"<a:ea typeface="Noto Sans JP"/>"#));
        assert!(cover.contains(r#"<a:srgbClr val="1A1A2E"/></a:solidFill><a:effectLst/></p:bgPr>"#));
    }

    #[test]
    fn test_line_breaks_become_br() {
        let paragraph = Paragraph::new("2001\n上場", 6.0, "333333");
        let xml = paragraph_xml(&paragraph, "Noto Sans JP");
        assert_eq!(xml.matches("<a:br>").count(), 1);
        assert!(xml.contains("<a:t>2001</a:t>"));
        assert!(xml.contains("<a:t>上場</a:t>"));
        assert!(xml.contains(r#"sz="600""#));
    }

    #[test]
    fn test_picture_relationship() {
        let deck = sample_deck();
        let index = deck
            .slides
            .iter()
            .position(|s| s.kind == SlideKind::CompetitorMap)
            .unwrap();
        let bytes = PptxWriter::new("Noto Sans JP").write(&deck).unwrap();
        let rels = read_part(&bytes, &format!("ppt/slides/_rels/slide{}.xml.rels", index + 1));
        assert!(rels.contains(r#"Target="../media/image1.png""#));
        let slide = read_part(&bytes, &format!("ppt/slides/slide{}.xml", index + 1));
        assert!(slide.contains(r#"r:embed="rId2""#));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deck.pptx");
        PptxWriter::new("Noto Sans JP")
            .write_to_file(&sample_deck(), &path)
            .unwrap();
        assert!(path.exists());
    }
}
