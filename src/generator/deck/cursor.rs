use crate::generator::deck::{
    DeckStyle, FilledShape, Frame, Geometry, POINTS_PER_INCH, Paragraph, Shape, Slide, SlideKind,
    TextBox,
};

const TITLE_FRAME: Frame = Frame::new(0.5, 0.3, 11.0, 0.6);
const SUBTITLE_FRAME: Frame = Frame::new(0.5, 0.9, 11.0, 0.3);
const BAR_LEFT: f64 = 0.5;
const BAR_TOP: f64 = 0.9;
const BAR_WIDTH: f64 = 11.0;
const BAR_THICKNESS_PT: f64 = 3.0;

/// 浮点累加的误差容限
const EPSILON: f64 = 1e-9;

/// 续页标题的形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// 第二页起标题追加「（続き）」
    Suffix,
    /// 多于一页时每页追加「（n）」
    Numbered,
}

/// 章节内的纵向游标：统一的换页策略。
///
/// 每个块放置前检查 `y + height > content_bottom`，超出时开启续页并回到顶部。
/// 页面顶部的块即使超高也直接放置。可选的每页条目上限用于讨论问题。
pub struct SectionCursor<'s> {
    style: &'s DeckStyle,
    kind: SlideKind,
    title: String,
    bar_color: Option<String>,
    subtitle: Option<Paragraph>,
    continuation: Continuation,
    top: f64,
    item_cap: Option<usize>,
    pages: Vec<Vec<Shape>>,
    y: f64,
    placed_on_page: bool,
    items_on_page: usize,
}

impl<'s> SectionCursor<'s> {
    pub fn new(kind: SlideKind, title: impl Into<String>, style: &'s DeckStyle) -> Self {
        Self {
            style,
            kind,
            title: title.into(),
            bar_color: None,
            subtitle: None,
            continuation: Continuation::Suffix,
            top: style.content_top,
            item_cap: None,
            pages: vec![Vec::new()],
            y: style.content_top,
            placed_on_page: false,
            items_on_page: 0,
        }
    }

    /// 标题下的强调线
    pub fn with_bar(mut self, color: &str) -> Self {
        self.bar_color = Some(color.to_string());
        self
    }

    /// 每页重复的副标题行
    pub fn with_subtitle(mut self, subtitle: Paragraph) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    pub fn numbered(mut self) -> Self {
        self.continuation = Continuation::Numbered;
        self
    }

    /// 内容起点（每页相同）
    pub fn with_top(mut self, top: f64) -> Self {
        self.top = top;
        self.y = top;
        self
    }

    pub fn with_item_cap(mut self, cap: usize) -> Self {
        self.item_cap = Some(cap.max(1));
        self
    }

    pub fn style(&self) -> &'s DeckStyle {
        self.style
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn fits(&self, height: f64) -> bool {
        self.y + height <= self.style.content_bottom + EPSILON
    }

    pub fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = self.top;
        self.placed_on_page = false;
        self.items_on_page = 0;
    }

    /// 保证接下来 height 高度的内容在同一页
    pub fn ensure(&mut self, height: f64) {
        if self.placed_on_page && !self.fits(height) {
            self.new_page();
        }
    }

    /// 放置一个块，返回其顶部坐标
    pub fn place(&mut self, height: f64) -> f64 {
        self.ensure(height);
        let y = self.y;
        self.y += height;
        self.placed_on_page = true;
        y
    }

    /// 放置一个计入每页上限的条目
    pub fn place_item(&mut self, height: f64) -> f64 {
        if let Some(cap) = self.item_cap
            && self.items_on_page >= cap
        {
            self.new_page();
        }
        let y = self.place(height);
        self.items_on_page += 1;
        y
    }

    /// 添加到当前页
    pub fn push(&mut self, shape: Shape) {
        if let Some(page) = self.pages.last_mut() {
            page.push(shape);
        }
    }

    pub fn push_text(&mut self, text_box: TextBox) {
        self.push(Shape::Text(text_box));
    }

    /// 添加到指定页（用于跨页表格等需要事后组装的内容）
    pub fn push_on(&mut self, page: usize, shape: Shape) {
        if let Some(content) = self.pages.get_mut(page) {
            content.push(shape);
        }
    }

    pub fn finish(self) -> Vec<Slide> {
        let total = self.pages.len();
        self.pages
            .into_iter()
            .enumerate()
            .map(|(index, content)| {
                let title = match self.continuation {
                    Continuation::Suffix if index > 0 => format!("{}（続き）", self.title),
                    Continuation::Numbered if total > 1 => {
                        format!("{}（{}）", self.title, index + 1)
                    }
                    _ => self.title.clone(),
                };

                let mut slide = Slide::new(self.kind, title.clone());
                slide.shapes = header_shapes(
                    &title,
                    self.bar_color.as_deref(),
                    self.subtitle.as_ref(),
                    self.style,
                );
                slide.shapes.extend(content);
                slide
            })
            .collect()
    }
}

/// 标题、强调线与副标题
pub fn header_shapes(
    title: &str,
    bar_color: Option<&str>,
    subtitle: Option<&Paragraph>,
    style: &DeckStyle,
) -> Vec<Shape> {
    let mut shapes = vec![Shape::Text(TextBox::new(
        TITLE_FRAME,
        Paragraph::new(title, style.size_title, &style.primary).bold(),
    ))];

    if let Some(color) = bar_color {
        shapes.push(Shape::Filled(FilledShape {
            frame: Frame::new(
                BAR_LEFT,
                BAR_TOP,
                BAR_WIDTH,
                BAR_THICKNESS_PT / POINTS_PER_INCH,
            ),
            geometry: Geometry::Rect,
            fill: color.to_string(),
        }));
    }
    if let Some(subtitle) = subtitle {
        shapes.push(Shape::Text(TextBox::new(SUBTITLE_FRAME, subtitle.clone())));
    }
    shapes
}
