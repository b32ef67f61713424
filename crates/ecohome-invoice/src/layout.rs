//! Page geometry and pagination.
//!
//! Text is set in Courier, where every glyph advances 0.6 em, so widths are
//! exact and alignment needs no font metrics tables.

use rust_decimal::Decimal;

use ecohome_core::error::AppError;
use ecohome_entity::cart::CartLine;

use crate::money::format_money;

/// US Letter width in points.
pub const PAGE_WIDTH: f64 = 612.0;
/// US Letter height in points.
pub const PAGE_HEIGHT: f64 = 792.0;
/// Margin on every side, in points.
pub const MARGIN: f64 = 72.0;

const GLYPH_ADVANCE_EM: f64 = 0.6;
const LINE_SPACING: f64 = 1.4;

const TITLE_SIZE: f64 = 25.0;
const SUBTITLE_SIZE: f64 = 18.0;
const ITEM_SIZE: f64 = 12.0;
const TOTAL_SIZE: f64 = 16.0;
const PAGE_NUMBER_SIZE: f64 = 10.0;
const PAGE_NUMBER_BASELINE: f64 = 36.0;
const SECTION_GAP: f64 = 12.0;

const ELLIPSIS: &str = "...";

/// The two faces used by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Courier.
    Regular,
    /// Courier-Bold.
    Bold,
}

impl Font {
    /// Resource name referenced from content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }

    /// PostScript name of the standard Type 1 font.
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Courier",
            Self::Bold => "Courier-Bold",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

/// One positioned string. `x`/`y` is the baseline origin in PDF user space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub font: Font,
    pub size: f64,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Everything drawn on one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Text in drawing order.
    pub runs: Vec<TextRun>,
    /// Heights of full-width horizontal rules.
    pub rules: Vec<f64>,
}

impl PageLayout {
    /// Text runs set at the item size, i.e. invoice lines.
    pub fn item_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.runs.iter().filter(|r| r.size == ITEM_SIZE)
    }
}

/// Fixed header and footer text for an invoice.
#[derive(Debug, Clone)]
pub struct InvoiceText<'a> {
    pub store_name: &'a str,
    pub title: &'a str,
    pub currency_symbol: &'a str,
}

/// Width of `text` at `size` points.
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_ADVANCE_EM
}

/// Number of characters that fit between the margins at `size` points.
fn chars_per_line(size: f64) -> usize {
    ((PAGE_WIDTH - 2.0 * MARGIN) / (size * GLYPH_ADVANCE_EM)).floor() as usize
}

/// Cuts `text` to at most `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= ELLIPSIS.len() {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Formats `name ×quantity — $amount`, shortening the name to fit one line.
pub fn item_text(line: &CartLine, currency_symbol: &str) -> Result<String, AppError> {
    let amount = line.line_total().ok_or_else(|| {
        AppError::render(format!("Amount for product '{}' is too large", line.product_id))
    })?;
    let suffix = format!(" ×{} — {}{}", line.quantity, currency_symbol, format_money(amount));
    let max = chars_per_line(ITEM_SIZE);
    let name_budget = max.saturating_sub(suffix.chars().count());
    let name = truncate(line.name.trim(), name_budget);
    Ok(truncate(&format!("{name}{suffix}"), max))
}

struct Cursor {
    pages: Vec<PageLayout>,
    y: f64,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![PageLayout::default()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn page(&mut self) -> &mut PageLayout {
        // `pages` starts non-empty and only grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn ensure_room(&mut self, height: f64) {
        if self.y - height < MARGIN {
            self.pages.push(PageLayout::default());
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn line(&mut self, text: &str, font: Font, size: f64, align: Align) {
        let height = size * LINE_SPACING;
        self.ensure_room(height);

        let text = truncate(text, chars_per_line(size));
        let width = text_width(&text, size);
        let x = match align {
            Align::Left => MARGIN,
            Align::Center => (PAGE_WIDTH - width) / 2.0,
            Align::Right => PAGE_WIDTH - MARGIN - width,
        };
        let y = self.y - size;

        self.page().runs.push(TextRun {
            font,
            size,
            x,
            y,
            text,
        });
        self.y -= height;
    }

    fn gap(&mut self, height: f64) {
        self.y -= height;
    }

    fn rule(&mut self) {
        self.ensure_room(SECTION_GAP);
        let y = self.y - SECTION_GAP / 2.0;
        self.page().rules.push(y);
        self.y -= SECTION_GAP;
    }
}

/// Lays out the whole invoice and numbers its pages.
///
/// The header appears once at the top of the first page; item lines flow
/// onto as many pages as needed; the total follows the last item.
pub fn paginate(
    lines: &[CartLine],
    total: Decimal,
    text: &InvoiceText<'_>,
) -> Result<Vec<PageLayout>, AppError> {
    let mut cursor = Cursor::new();

    cursor.line(text.store_name, Font::Bold, TITLE_SIZE, Align::Center);
    cursor.line(text.title, Font::Regular, SUBTITLE_SIZE, Align::Center);
    cursor.rule();

    for line in lines {
        cursor.line(
            &item_text(line, text.currency_symbol)?,
            Font::Regular,
            ITEM_SIZE,
            Align::Left,
        );
    }

    cursor.gap(SECTION_GAP);
    cursor.rule();
    let total_text = format!("Total: {}{}", text.currency_symbol, format_money(total));
    cursor.line(&total_text, Font::Bold, TOTAL_SIZE, Align::Right);

    let mut pages = cursor.pages;
    let count = pages.len();
    for (index, page) in pages.iter_mut().enumerate() {
        let label = format!("Page {} of {count}", index + 1);
        page.runs.push(TextRun {
            font: Font::Regular,
            size: PAGE_NUMBER_SIZE,
            x: (PAGE_WIDTH - text_width(&label, PAGE_NUMBER_SIZE)) / 2.0,
            y: PAGE_NUMBER_BASELINE,
            text: label,
        });
    }
    Ok(pages)
}
