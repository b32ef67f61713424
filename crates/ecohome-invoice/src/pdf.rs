//! Incremental PDF 1.4 writer.
//!
//! Object layout, numbered from 1:
//!
//! | # | object |
//! |---|---|
//! | 1 | catalog |
//! | 2 | page tree |
//! | 3, 4 | Courier, Courier-Bold |
//! | 5 | document info |
//! | 6 + 2i | page i |
//! | 7 + 2i | content stream of page i |
//!
//! Each call to [`Iterator::next`] yields the file header, one object, or
//! the cross-reference table with the trailer, in that order.

use std::fmt::Write as _;

use bytes::Bytes;

use crate::encoding::pdf_literal;
use crate::layout::{Font, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, PageLayout};

const HEADER: &[u8] = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";
const FIXED_OBJECTS: usize = 5;
const CATALOG: usize = 1;
const PAGE_TREE: usize = 2;
const INFO: usize = 5;

fn page_object(index: usize) -> usize {
    FIXED_OBJECTS + 1 + 2 * index
}

fn content_object(index: usize) -> usize {
    page_object(index) + 1
}

fn font_object(font: Font) -> usize {
    match font {
        Font::Regular => 3,
        Font::Bold => 4,
    }
}

/// Streams a laid-out document as PDF bytes.
#[derive(Debug)]
pub struct PdfStream {
    pages: Vec<PageLayout>,
    producer: String,
    title: String,
    /// Next object number to emit; 0 until the header is out.
    next_object: usize,
    /// Byte offset of every emitted object, by object number - 1.
    offsets: Vec<usize>,
    written: usize,
    finished: bool,
}

impl PdfStream {
    /// Prepares a stream for already paginated content.
    pub fn new(pages: Vec<PageLayout>, producer: impl Into<String>, title: impl Into<String>) -> Self {
        let total = FIXED_OBJECTS + 2 * pages.len();
        Self {
            pages,
            producer: producer.into(),
            title: title.into(),
            next_object: 0,
            offsets: Vec::with_capacity(total),
            written: 0,
            finished: false,
        }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn object_count(&self) -> usize {
        FIXED_OBJECTS + 2 * self.pages.len()
    }

    fn object_body(&self, number: usize) -> Vec<u8> {
        match number {
            CATALOG => dictionary(number, &format!("<< /Type /Catalog /Pages {PAGE_TREE} 0 R >>")),
            PAGE_TREE => {
                let kids = (0..self.pages.len())
                    .map(|i| format!("{} 0 R", page_object(i)))
                    .collect::<Vec<_>>()
                    .join(" ");
                dictionary(
                    number,
                    &format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", self.pages.len()),
                )
            }
            3 | 4 => {
                let font = if number == 3 { Font::Regular } else { Font::Bold };
                dictionary(
                    number,
                    &format!(
                        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                        font.base_font()
                    ),
                )
            }
            INFO => dictionary(
                number,
                &format!(
                    "<< /Producer ({}) /Title ({}) >>",
                    pdf_literal(&self.producer),
                    pdf_literal(&self.title)
                ),
            ),
            n if (n - FIXED_OBJECTS - 1) % 2 == 0 => {
                let index = (n - FIXED_OBJECTS - 1) / 2;
                dictionary(
                    number,
                    &format!(
                        "<< /Type /Page /Parent {PAGE_TREE} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                         /Resources << /Font << /{} {} 0 R /{} {} 0 R >> >> /Contents {} 0 R >>",
                        Font::Regular.resource_name(),
                        font_object(Font::Regular),
                        Font::Bold.resource_name(),
                        font_object(Font::Bold),
                        content_object(index)
                    ),
                )
            }
            n => {
                let index = (n - FIXED_OBJECTS - 2) / 2;
                let content = content_stream(&self.pages[index]);
                let mut out = format!("{number} 0 obj\n<< /Length {} >>\nstream\n", content.len())
                    .into_bytes();
                out.extend_from_slice(content.as_bytes());
                out.extend_from_slice(b"\nendstream\nendobj\n");
                out
            }
        }
    }

    fn trailer(&self) -> Vec<u8> {
        let size = self.object_count() + 1;
        let mut out = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            let _ = write!(out, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            out,
            "trailer\n<< /Size {size} /Root {CATALOG} 0 R /Info {INFO} 0 R >>\nstartxref\n{}\n%%EOF\n",
            self.written
        );
        out.into_bytes()
    }

    /// Drains the stream into one buffer.
    pub fn collect_bytes(self) -> Vec<u8> {
        let mut out = Vec::new();
        for chunk in self {
            out.extend_from_slice(&chunk);
        }
        out
    }
}

impl Iterator for PdfStream {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let chunk = if self.next_object == 0 {
            self.next_object = 1;
            HEADER.to_vec()
        } else if self.next_object <= self.object_count() {
            let body = self.object_body(self.next_object);
            self.offsets.push(self.written);
            self.next_object += 1;
            body
        } else {
            self.finished = true;
            self.trailer()
        };

        self.written += chunk.len();
        Some(Bytes::from(chunk))
    }
}

fn dictionary(number: usize, body: &str) -> Vec<u8> {
    format!("{number} 0 obj\n{body}\nendobj\n").into_bytes()
}

/// Drawing operators for one page. Pure ASCII.
fn content_stream(page: &PageLayout) -> String {
    let mut out = String::new();
    for y in &page.rules {
        let _ = writeln!(
            out,
            "0.5 w {MARGIN:.2} {y:.2} m {:.2} {y:.2} l S",
            PAGE_WIDTH - MARGIN
        );
    }
    for run in &page.runs {
        let _ = writeln!(
            out,
            "BT /{} {:.2} Tf {:.2} {:.2} Td ({}) Tj ET",
            run.font.resource_name(),
            run.size,
            run.x,
            run.y,
            pdf_literal(&run.text)
        );
    }
    out
}
