use crate::core::{InvoiceData, InvoiceLineItem};
use crate::errors::{AppError, AppResult};
use crate::utils::date::{format_date, format_datetime};
use crate::utils::{format_currency, format_hours};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;

// US Letter, in points
const PAGE_W: f32 = 612.0;
const PAGE_H: f32 = 792.0;
const MARGIN: f32 = 50.0;
const CONTENT_W: f32 = PAGE_W - 2.0 * MARGIN;

const TABLE_TOP: f32 = 600.0;
const CONTINUED_TABLE_TOP: f32 = 730.0;
const HEADER_GAP: f32 = 25.0;
const ROW_H: f32 = 20.0;
/// Rows stop once y drops below this.
const MIN_ROW_Y: f32 = 100.0;

const MARKER_Y: f32 = 80.0;
const FOOTER_Y: [f32; 2] = [60.0, 45.0];
const NOTES_SIZE: f32 = 10.0;
const NOTES_LINE_H: f32 = 12.0;
/// "Notes:" label plus the gap down to the first line.
const NOTES_HEAD: f32 = 40.0 + 20.0;

const TABLE_HEADERS: [&str; 5] = ["Employee", "Week Ending", "Hours", "Rate", "Amount"];
const COLUMN_WIDTHS: [f32; 5] = [200.0, 100.0, 70.0, 70.0, 80.0];

pub const CONTINUATION_MARKER: &str = "(Continued on next page)";

const F_REGULAR: Name<'static> = Name(b"F1");
const F_BOLD: Name<'static> = Name(b"F2");

const GRAY_LINE: (f32, f32, f32) = (0.8, 0.8, 0.8);

/// Fixed text at the top and bottom of every invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct Letterhead {
    pub company_name: String,
    pub address_lines: Vec<String>,
    pub payment_due_days: u32,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            company_name: "STAFFING COMPANY".to_string(),
            address_lines: vec![
                "123 Business Street, Suite 100".to_string(),
                "Business City, State 12345".to_string(),
            ],
            payment_due_days: 30,
        }
    }
}

/// A rendered invoice document.
#[derive(Debug, Clone)]
pub struct InvoicePdf {
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub continuation_markers: usize,
}

impl InvoicePdf {
    /// Lays out `data` on as many pages as its rows need.
    /// Fails as a whole; no partial document is returned.
    pub fn render(data: &InvoiceData, letterhead: &Letterhead) -> AppResult<Self> {
        validate(data)?;

        let mut pdf = PdfManager::new();
        let mut content = pdf.new_page();

        pdf.draw_letterhead(&mut content, data, letterhead);
        pdf.draw_table_header(&mut content, TABLE_TOP);

        let mut y = TABLE_TOP - HEADER_GAP;
        for item in &data.items {
            pdf.draw_item(&mut content, y, item);
            y -= ROW_H;

            if y < MIN_ROW_Y {
                content = pdf.continue_on_next_page(content);
                pdf.draw_table_header(&mut content, CONTINUED_TABLE_TOP);
                y = CONTINUED_TABLE_TOP - HEADER_GAP;
            }
        }

        // total row
        pdf.draw_divider(&mut content, y - 5.0);
        y -= 25.0;
        pdf.draw_text(&mut content, MARGIN + 370.0, y, 12.0, F_BOLD, "Total:");
        pdf.draw_text(
            &mut content,
            MARGIN + 460.0,
            y,
            12.0,
            F_BOLD,
            &format_currency(data.total_amount),
        );

        if let Some(notes) = &data.notes {
            let lines = wrap_notes(notes, CONTENT_W);
            let block = NOTES_HEAD + lines.len().saturating_sub(1) as f32 * NOTES_LINE_H;

            // move the whole block when it fits on a fresh page, or when not
            // even the label and first line fit here
            let fits_here = y - block >= MIN_ROW_Y;
            let fits_fresh = CONTINUED_TABLE_TOP - block >= MIN_ROW_Y;
            let head_fits = y - NOTES_HEAD >= MIN_ROW_Y;
            if !fits_here && (fits_fresh || !head_fits) {
                content = pdf.continue_on_next_page(content);
                y = CONTINUED_TABLE_TOP;
            }

            y -= 40.0;
            pdf.draw_text(&mut content, MARGIN, y, 11.0, F_BOLD, "Notes:");
            y -= 20.0;
            for line in &lines {
                if y < MIN_ROW_Y {
                    content = pdf.continue_on_next_page(content);
                    y = CONTINUED_TABLE_TOP;
                }
                pdf.draw_text(&mut content, MARGIN, y, NOTES_SIZE, F_REGULAR, line);
                y -= NOTES_LINE_H;
            }
        }

        pdf.draw_footer(&mut content, letterhead);
        pdf.finalize_page(content);

        let pages = pdf.page_count();
        let continuation_markers = pdf.continuation_markers;
        log::debug!(
            "invoice #{} rendered: {} items on {} page(s)",
            data.invoice_number,
            data.items.len(),
            pages
        );

        Ok(Self {
            bytes: pdf.finish(),
            pages,
            continuation_markers,
        })
    }
}

fn validate(data: &InvoiceData) -> AppResult<()> {
    if !data.total_amount.is_finite() {
        return Err(AppError::Render(format!(
            "invoice #{} has a non-finite total",
            data.invoice_number
        )));
    }
    for item in &data.items {
        if !(item.hours.is_finite() && item.rate.is_finite() && item.amount.is_finite()) {
            return Err(AppError::Render(format!(
                "invoice #{}: line for {} has a non-finite amount",
                data.invoice_number, item.employee
            )));
        }
    }
    Ok(())
}

/// Helvetica advance widths (AFM, 1/1000 em) for ' ' through '~'.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Anything outside printable ASCII is measured as a full em, the widest
/// WinAnsi glyph.
fn glyph_width(ch: char, size: f32) -> f32 {
    let units = match ch {
        ' '..='~' => HELVETICA_WIDTHS[ch as usize - ' ' as usize],
        _ => 1000,
    };
    f32::from(units) * size / 1000.0
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().map(|ch| glyph_width(ch, size)).sum()
}

/// A word of notes text, measured in points.
#[derive(Debug)]
struct NoteWord<'a> {
    text: &'a str,
    width: f32,
}

impl Fragment for NoteWord<'_> {
    fn width(&self) -> f64 {
        f64::from(self.width)
    }

    fn whitespace_width(&self) -> f64 {
        f64::from(glyph_width(' ', NOTES_SIZE))
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Splits a word wider than `max` into pieces that each fit.
fn split_wide_word(word: &str, max: f32) -> Vec<NoteWord<'_>> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut width = 0.0;
    for (i, ch) in word.char_indices() {
        let w = glyph_width(ch, NOTES_SIZE);
        if width + w > max && i > start {
            pieces.push(NoteWord {
                text: &word[start..i],
                width,
            });
            start = i;
            width = 0.0;
        }
        width += w;
    }
    pieces.push(NoteWord {
        text: &word[start..],
        width,
    });
    pieces
}

/// Wraps notes so that no line is wider than `max` points at the notes size.
fn wrap_notes(notes: &str, max: f32) -> Vec<String> {
    let words: Vec<NoteWord> = notes
        .split_whitespace()
        .flat_map(|word| {
            let width = text_width(word, NOTES_SIZE);
            if width > max {
                split_wide_word(word, max)
            } else {
                vec![NoteWord { text: word, width }]
            }
        })
        .collect();

    wrap_first_fit(&words, &[f64::from(max)])
        .into_iter()
        .map(|line| {
            line.iter()
                .map(|w| w.text)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Standard fonts only cover Latin-1; anything else prints as '?'.
fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,

    continuation_markers: usize,
}

impl PdfManager {
    fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,
            next_id: 5,
            font_id,
            bold_font_id,
            continuation_markers: 0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
            .contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(F_REGULAR, self.font_id);
        fonts.pair(F_BOLD, self.bold_font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    /// Marks the current page as continued and opens the next one.
    fn continue_on_next_page(&mut self, mut content: Content) -> Content {
        content.save_state();
        content.set_fill_rgb(0.5, 0.5, 0.5);
        self.draw_text(&mut content, MARGIN, MARKER_Y, 10.0, F_REGULAR, CONTINUATION_MARKER);
        content.restore_state();
        self.continuation_markers += 1;

        self.finalize_page(content);
        log::debug!("page {} full, continuing", self.page_count());

        let mut next = self.new_page();
        self.draw_text(&mut next, MARGIN, 750.0, 14.0, F_BOLD, "INVOICE (Continued)");
        next
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, font: Name, text: &str) {
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&encode(text)));
        content.end_text();
    }

    fn draw_divider(&self, content: &mut Content, y: f32) {
        let (r, g, b) = GRAY_LINE;
        content.save_state();
        content.set_stroke_rgb(r, g, b);
        content.set_line_width(1.0);
        content.move_to(MARGIN, y);
        content.line_to(MARGIN + CONTENT_W, y);
        content.stroke();
        content.restore_state();
    }

    fn draw_letterhead(&self, content: &mut Content, data: &InvoiceData, letterhead: &Letterhead) {
        content.save_state();
        content.set_fill_rgb(0.1, 0.1, 0.4);
        self.draw_text(content, MARGIN, 730.0, 24.0, F_BOLD, &letterhead.company_name);
        content.restore_state();

        for (i, line) in letterhead.address_lines.iter().take(2).enumerate() {
            let y = 710.0 - 15.0 * i as f32;
            self.draw_text(content, MARGIN, y, 10.0, F_REGULAR, line);
        }

        let right = MARGIN + 400.0;
        self.draw_text(content, right, 730.0, 18.0, F_BOLD, "INVOICE");
        self.draw_text(
            content,
            right,
            710.0,
            12.0,
            F_REGULAR,
            &format!("#{}", data.invoice_number),
        );
        self.draw_text(
            content,
            right,
            695.0,
            10.0,
            F_REGULAR,
            &format!("Date: {}", format_datetime(&data.generated_at)),
        );

        self.draw_divider(content, 680.0);

        // Bill to | period
        self.draw_text(content, MARGIN, 660.0, 12.0, F_BOLD, "BILL TO:");
        self.draw_text(content, MARGIN, 645.0, 11.0, F_REGULAR, &data.client_name);
        if let Some(email) = &data.client_email {
            self.draw_text(content, MARGIN, 630.0, 10.0, F_REGULAR, email);
        }

        self.draw_text(content, MARGIN + 300.0, 660.0, 12.0, F_BOLD, "PERIOD:");
        self.draw_text(
            content,
            MARGIN + 300.0,
            645.0,
            11.0,
            F_REGULAR,
            &format!(
                "{} to {}",
                format_date(data.period_start),
                format_date(data.period_end)
            ),
        );
    }

    fn draw_table_header(&self, content: &mut Content, y: f32) {
        let mut x = MARGIN;
        for (header, w) in TABLE_HEADERS.iter().zip(COLUMN_WIDTHS) {
            self.draw_text(content, x, y, 10.0, F_BOLD, header);
            x += w;
        }
        self.draw_divider(content, y - 5.0);
    }

    fn draw_item(&self, content: &mut Content, y: f32, item: &InvoiceLineItem) {
        let mut x = MARGIN;

        self.draw_text(content, x, y, 10.0, F_REGULAR, &item.employee);
        x += COLUMN_WIDTHS[0];

        self.draw_text(content, x, y, 10.0, F_REGULAR, &format_date(item.week_ending));
        x += COLUMN_WIDTHS[1];

        self.draw_text(content, x + 35.0, y, 10.0, F_REGULAR, &format_hours(item.hours));
        x += COLUMN_WIDTHS[2];

        self.draw_text(content, x, y, 10.0, F_REGULAR, &format_currency(item.rate));
        x += COLUMN_WIDTHS[3];

        self.draw_text(content, x, y, 10.0, F_REGULAR, &format_currency(item.amount));
    }

    fn draw_footer(&self, content: &mut Content, letterhead: &Letterhead) {
        let x = MARGIN + CONTENT_W / 2.0 - 70.0;
        self.draw_text(content, x, FOOTER_Y[0], 10.0, F_REGULAR, "Thank you for your business!");
        self.draw_text(
            content,
            x,
            FOOTER_Y[1],
            10.0,
            F_REGULAR,
            &format!("Payment due within {} days", letterhead.payment_due_days),
        );
    }

    fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);

        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.iter().copied());
        drop(pages);

        self.pdf.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn data(n: usize) -> InvoiceData {
        let week = NaiveDate::from_ymd_opt(2023, 3, 17).unwrap();
        let items = (0..n)
            .map(|i| InvoiceLineItem {
                employee: format!("Employee {i}"),
                week_ending: week,
                hours: 40.0,
                rate: 50.0,
                amount: 2000.0,
            })
            .collect();
        InvoiceData {
            invoice_number: "000123".into(),
            client_name: "Acme Corporation".into(),
            client_email: Some("billing@acme.com".into()),
            period_start: NaiveDate::from_ymd_opt(2023, 3, 11).unwrap(),
            period_end: week,
            items,
            total_amount: 2000.0 * n as f64,
            generated_at: Utc.with_ymd_and_hms(2023, 3, 16, 10, 0, 0).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn first_page_holds_twenty_three_rows() {
        let out = InvoicePdf::render(&data(23), &Letterhead::default()).unwrap();
        assert_eq!(out.pages, 1);
        assert_eq!(out.continuation_markers, 0);
        assert!(out.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn twenty_fourth_row_forces_a_break() {
        let out = InvoicePdf::render(&data(24), &Letterhead::default()).unwrap();
        assert_eq!(out.pages, 2);
        assert_eq!(out.continuation_markers, 1);
    }

    #[test]
    fn continuation_pages_hold_thirty_one_rows() {
        // 24 on the first page, 31 on the second, the rest on the third
        let out = InvoicePdf::render(&data(60), &Letterhead::default()).unwrap();
        assert_eq!(out.pages, 3);
        assert_eq!(out.continuation_markers, 2);

        let out = InvoicePdf::render(&data(55), &Letterhead::default()).unwrap();
        assert_eq!(out.pages, 3);
    }

    #[test]
    fn long_notes_move_to_a_fresh_page() {
        let mut d = data(22);
        d.notes = Some("Net 30. ".repeat(80));
        let out = InvoicePdf::render(&d, &Letterhead::default()).unwrap();
        assert_eq!(out.pages, 2);
        assert_eq!(out.continuation_markers, 1);
    }

    #[test]
    fn notes_that_outgrow_a_page_keep_paginating() {
        let mut d = data(22);
        d.notes = Some("Net 30. ".repeat(2000));
        let lines = wrap_notes(d.notes.as_deref().unwrap(), CONTENT_W).len();
        assert!(lines > 100);

        let out = InvoicePdf::render(&d, &Letterhead::default()).unwrap();
        // rows on page 1, then at most 53 note lines per page
        assert!(out.pages >= 2 + lines / 53);
        assert_eq!(out.continuation_markers, out.pages - 1);
    }

    #[test]
    fn wrapped_notes_stay_inside_the_content_width() {
        let notes = "WMWMWMWMWM ".repeat(10) + &"W".repeat(80) + " fin.";
        let lines = wrap_notes(&notes, CONTENT_W);

        assert!(lines.len() > 2);
        for line in &lines {
            assert!(
                text_width(line, NOTES_SIZE) <= CONTENT_W,
                "{line:?} is {}pt wide",
                text_width(line, NOTES_SIZE)
            );
        }
        // the 80-glyph word is split, its tail shares a line with the last word
        let tail = format!("{} fin.", "W".repeat(26));
        assert_eq!(lines.last(), Some(&tail));
    }

    #[test]
    fn helvetica_widths_match_the_metrics() {
        assert_eq!(text_width("W", 10.0), 9.44);
        assert!((text_width("il", 10.0) - 4.44).abs() < 1e-4);
        assert_eq!(text_width("~", 1000.0), 584.0);
    }

    #[test]
    fn non_finite_amounts_fail_the_render() {
        let mut d = data(2);
        d.items[1].amount = f64::NAN;
        assert!(matches!(
            InvoicePdf::render(&d, &Letterhead::default()),
            Err(AppError::Render(_))
        ));
    }

    #[test]
    fn non_latin_text_is_replaced() {
        assert_eq!(encode("Zoë"), b"Zo\xeb".to_vec());
        assert_eq!(encode("Łukasz"), b"?ukasz".to_vec());
    }
}
