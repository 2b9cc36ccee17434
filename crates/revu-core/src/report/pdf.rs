//! Minimal PDF 1.4 writer for laid-out pages.
//!
//! Only what the report needs: the three standard Type 1 fonts with
//! WinAnsi encoding, gray rectangle fills, single-line text, and one
//! JPEG XObject passed through with `DCTDecode`. Output carries no
//! timestamps or IDs so identical pages serialize to identical bytes.

use crate::report::image::JpegInfo;
use crate::report::layout::{DrawOp, Font, PAGE_HEIGHT, PAGE_WIDTH, Page};

const PT_PER_MM: f64 = 72.0 / 25.4;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_IDS: [(Font, &str, usize); 3] = [
    (Font::Helvetica, "Helvetica", 3),
    (Font::HelveticaBold, "Helvetica-Bold", 4),
    (Font::Courier, "Courier", 5),
];
const FIRST_FREE_ID: usize = 6;

/// A JPEG ready to embed.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedImage<'a> {
    pub data: &'a [u8],
    pub info: JpegInfo,
}

struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = b"%PDF-1.4\n".to_vec();
        // Binary comment so transfer tools treat the file as binary.
        buf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, dict: &str) {
        self.offsets.push((id, self.buf.len()));
        self.put(&format!("{id} 0 obj\n{dict}\nendobj\n"));
    }

    fn stream(&mut self, id: usize, dict_entries: &str, data: &[u8]) {
        self.offsets.push((id, self.buf.len()));
        self.put(&format!(
            "{id} 0 obj\n<< {dict_entries}/Length {} >>\nstream\n",
            data.len()
        ));
        self.buf.extend_from_slice(data);
        self.put("\nendstream\nendobj\n");
    }

    fn put(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    fn finish(mut self) -> Vec<u8> {
        self.offsets.sort_unstable();
        let xref_at = self.buf.len();
        let size = self.offsets.len() + 1;

        self.put(&format!("xref\n0 {size}\n0000000000 65535 f \n"));
        let entries: Vec<String> = self
            .offsets
            .iter()
            .map(|(_, offset)| format!("{offset:010} 00000 n \n"))
            .collect();
        for entry in entries {
            self.put(&entry);
        }
        self.put(&format!(
            "trailer\n<< /Size {size} /Root {CATALOG_ID} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        ));
        self.buf
    }
}

/// Serialize pages into a complete PDF file.
///
/// `Image` ops draw `image`; without one they are skipped.
pub fn write_pdf(pages: &[Page], image: Option<EmbeddedImage<'_>>) -> Vec<u8> {
    let mut w = PdfWriter::new();

    let image_id = image.map(|_| FIRST_FREE_ID);
    let first_page_id = FIRST_FREE_ID + usize::from(image.is_some());
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| first_page_id + 2 * i).collect();

    w.object(
        CATALOG_ID,
        &format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>"),
    );

    let kids: Vec<String> = page_ids.iter().map(|id| format!("{id} 0 R")).collect();
    w.object(
        PAGES_ID,
        &format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        ),
    );

    for (_, base_font, id) in FONT_IDS {
        w.object(
            id,
            &format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{base_font} /Encoding /WinAnsiEncoding >>"
            ),
        );
    }

    if let (Some(id), Some(img)) = (image_id, image) {
        let color_space = match img.info.components {
            1 => "/DeviceGray",
            4 => "/DeviceCMYK",
            _ => "/DeviceRGB",
        };
        w.stream(
            id,
            &format!(
                "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace {color_space} /BitsPerComponent 8 /Filter /DCTDecode ",
                img.info.width, img.info.height
            ),
            img.data,
        );
    }

    let fonts: Vec<String> = FONT_IDS
        .iter()
        .enumerate()
        .map(|(n, (_, _, id))| format!("/F{} {id} 0 R", n + 1))
        .collect();
    let xobjects = match image_id {
        Some(id) => format!(" /XObject << /Im1 {id} 0 R >>"),
        None => String::new(),
    };
    let resources = format!("<< /Font << {} >>{xobjects} >>", fonts.join(" "));

    for (page, page_id) in pages.iter().zip(&page_ids) {
        let content_id = page_id + 1;
        w.object(
            *page_id,
            &format!(
                "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {} {}] /Resources {resources} /Contents {content_id} 0 R >>",
                num(PAGE_WIDTH * PT_PER_MM),
                num(PAGE_HEIGHT * PT_PER_MM)
            ),
        );
        let content = page_content(page, image.is_some());
        w.stream(content_id, "", &content);
    }

    w.finish()
}

fn page_content(page: &Page, has_image: bool) -> Vec<u8> {
    let mut out = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                gray,
            } => {
                out.extend_from_slice(
                    format!(
                        "{} g\n{} {} {} {} re f\n0 g\n",
                        num(f64::from(*gray) / 255.0),
                        num(x * PT_PER_MM),
                        num((PAGE_HEIGHT - y - height) * PT_PER_MM),
                        num(width * PT_PER_MM),
                        num(height * PT_PER_MM)
                    )
                    .as_bytes(),
                );
            }
            DrawOp::Text {
                x,
                y,
                font,
                size,
                text,
            } => {
                out.extend_from_slice(
                    format!(
                        "BT /{} {} Tf {} {} Td (",
                        font_resource(*font),
                        num(*size),
                        num(x * PT_PER_MM),
                        num((PAGE_HEIGHT - y) * PT_PER_MM)
                    )
                    .as_bytes(),
                );
                out.extend_from_slice(&escape_text(text));
                out.extend_from_slice(b") Tj ET\n");
            }
            DrawOp::Image {
                x,
                y,
                width,
                height,
            } => {
                if !has_image {
                    continue;
                }
                out.extend_from_slice(
                    format!(
                        "q {} 0 0 {} {} {} cm /Im1 Do Q\n",
                        num(width * PT_PER_MM),
                        num(height * PT_PER_MM),
                        num(x * PT_PER_MM),
                        num((PAGE_HEIGHT - y - height) * PT_PER_MM)
                    )
                    .as_bytes(),
                );
            }
        }
    }

    out
}

fn font_resource(font: Font) -> String {
    let n = FONT_IDS
        .iter()
        .position(|(f, _, _)| *f == font)
        .unwrap_or(0);
    format!("F{}", n + 1)
}

fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".into() } else { s.into() }
}

/// Encode as WinAnsi and escape for a PDF literal string.
fn escape_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let byte = win_ansi(ch);
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            0x20..=0x7E => out.push(byte),
            _ => out.extend_from_slice(format!("\\{byte:03o}").as_bytes()),
        }
    }
    out
}

fn win_ansi(ch: char) -> u8 {
    match ch {
        '\t' => b' ',
        '\u{20}'..='\u{7E}' => ch as u8,
        '\u{A0}'..='\u{FF}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '™' => 0x99,
        _ => b'?',
    }
}
