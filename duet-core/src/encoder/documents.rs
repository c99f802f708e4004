//! Text documents of the EPUB package
//!
//! Chapter pages, the table-of-contents page, the NCX and the OPF all use
//! CRLF line endings. The container descriptor uses bare CR. Every text
//! entry is stored as UTF-16LE behind a byte-order mark.

use crate::config::PackageProfile;
use crate::error::ContentError;
use crate::types::{Chapter, ManifestEntry};
use chrono::NaiveDate;

/// File name of the embedded stylesheet, relative to `OEBPS/`
pub const STYLESHEET_NAME: &str = "cssTemplate_v1.0.css";

/// The embedded stylesheet
pub const STYLESHEET: &str = include_str!("../../assets/cssTemplate_v1.0.css");

/// Path of the OPF document inside the archive
pub const OPF_PATH: &str = "OEBPS/content.opf";

/// Path of the NCX document inside the archive
pub const NCX_PATH: &str = "OEBPS/toc.ncx";

/// Path of the container descriptor inside the archive
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

const ADEPT_RESOURCE: &str = "urn:uuid:072446c8-f17a-4aeb-b293-b77e018d278d";
const TOC_TITLE: &str = "Table of Contents";

/// Line-oriented text buffer
struct Lines {
    buf: String,
    eol: &'static str,
}

impl Lines {
    fn crlf() -> Self {
        Self {
            buf: String::new(),
            eol: "\r\n",
        }
    }

    fn cr() -> Self {
        Self {
            buf: String::new(),
            eol: "\r",
        }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        self.buf.push_str(text.as_ref());
        self.buf.push_str(self.eol);
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// File name of the table-of-contents page for a package
pub fn toc_page_name(isbn: &str) -> String {
    format!("{isbn}toc.xhtml")
}

/// Encode a text entry as UTF-16LE with a leading byte-order mark
pub fn encode_utf16(text: &str) -> Vec<u8> {
    std::iter::once(0xFEFF_u16)
        .chain(text.encode_utf16())
        .flat_map(u16::to_le_bytes)
        .collect()
}

/// Renders every text document of one export
#[derive(Debug, Clone)]
pub struct DocumentBuilder<'a> {
    title: &'a str,
    isbn: &'a str,
    profile: &'a PackageProfile,
    date: NaiveDate,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(
        title: &'a str,
        isbn: &'a str,
        profile: &'a PackageProfile,
        date: NaiveDate,
    ) -> Self {
        Self {
            title,
            isbn,
            profile,
            date,
        }
    }

    /// XHTML head shared by chapter and TOC pages
    fn page_head(&self, out: &mut Lines, title: &str) {
        out.line("<html xmlns=\"http://www.w3.org/1999/xhtml\">");
        out.line("<head>");
        out.line(format!("<title>{}</title>", escape_xml(title)));
        out.line(format!(
            "<link href=\"{STYLESHEET_NAME}\" rel=\"stylesheet\" type=\"text/css\"/>"
        ));
        out.line(format!(
            "<meta content=\"{ADEPT_RESOURCE}\" name=\"Adept.expected.resource\"/>"
        ));
        out.line("</head>");
    }

    /// Render the page for the chapter at 1-based input position `sequence`.
    ///
    /// Returns `Ok(None)` when the original text is blank. Each non-blank
    /// original line is followed by the translation line at the same index;
    /// a blank original line drops its translation line too. Line counts of
    /// the two texts must match.
    pub fn chapter(
        &self,
        sequence: usize,
        chapter: &Chapter,
    ) -> Result<Option<String>, ContentError> {
        if chapter.original.is_blank() {
            return Ok(None);
        }

        let originals = chapter.original.lines();
        let translations = chapter.translation.lines();
        if originals.len() != translations.len() {
            return Err(ContentError::ContentMismatch {
                chapter: sequence,
                original_lines: originals.len(),
                translation_lines: translations.len(),
            });
        }

        let mut out = Lines::crlf();
        self.page_head(&mut out, &chapter.original.title);
        out.line("<body>");
        out.line(format!(
            "<p class=\"chaptertitle\">{}</p>",
            escape_xml(&chapter.original.title)
        ));
        out.line(format!(
            "<p class=\"chaptertitle\">{}</p>",
            escape_xml(&chapter.translation.title)
        ));
        out.line("<hr/>");

        for (original, translation) in originals.iter().zip(&translations) {
            if original.trim().is_empty() {
                continue;
            }
            out.line(format!("<p>{}</p>", escape_xml(original)));
            out.line(format!("<p>{}</p>", escape_xml(translation)));
        }

        out.line("</body>");
        out.line("</html>");
        Ok(Some(out.finish()))
    }

    /// Render the table-of-contents page
    pub fn toc_page(&self, entries: &[ManifestEntry]) -> String {
        let mut out = Lines::crlf();
        self.page_head(&mut out, TOC_TITLE);
        out.line("<body>");
        out.line("<div class=\"story\">");
        out.line(format!("<p class=\"toctitle\">{TOC_TITLE}</p>"));
        for entry in entries {
            out.line(format!(
                "<p class=\"contentschaptertitle\"><a href=\"{}\">{}</a></p>",
                escape_xml(&entry.file_name),
                escape_xml(&entry.title)
            ));
        }
        out.line("</div>");
        out.line("</body>");
        out.line("</html>");
        out.finish()
    }

    /// Render the NCX navigation document. Play order is the chapter's
    /// position in the input, so dropped chapters leave gaps.
    pub fn ncx(&self, entries: &[ManifestEntry]) -> String {
        let mut out = Lines::crlf();
        out.line("<?xml version=\"1.0\"?>");
        out.line(
            "<!DOCTYPE ncx PUBLIC \"-//NISO//DTD ncx 2005-1//EN\" \"http://www.daisy.org/z3986/2005/ncx-2005-1.dtd\">",
        );
        out.line("<ncx xmlns=\"http://www.daisy.org/z3986/2005/ncx/\" version=\"2005-1\">");
        out.line("<head>");
        out.line(format!("<meta name=\"dtb:uid\" content=\"{}\"/>", self.isbn));
        out.line("</head>");
        out.line("<docTitle>");
        out.line(format!("<text>{}</text>", escape_xml(self.title)));
        out.line("</docTitle>");
        out.line("<navMap>");
        for entry in entries {
            out.line(format!(
                "<navPoint id=\"navpoint-{0}\" playOrder=\"{0}\">",
                entry.sequence
            ));
            out.line("<navLabel>");
            out.line(format!("<text>{}</text>", escape_xml(&entry.title)));
            out.line("</navLabel>");
            out.line(format!("<content src=\"{}\"/>", escape_xml(&entry.file_name)));
            out.line("</navPoint>");
        }
        out.line("</navMap>");
        out.line("</ncx>");
        out.finish()
    }

    /// Render the OPF package document
    pub fn opf(&self, entries: &[ManifestEntry]) -> String {
        let title = escape_xml(self.title);
        let toc_page = toc_page_name(self.isbn);

        let mut out = Lines::crlf();
        out.line(
            "<package xmlns=\"http://www.idpf.org/2007/opf\" unique-identifier=\"BookId\" version=\"2.0\">",
        );
        out.line("<metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\">");
        out.line(format!("<dc:title>{title}</dc:title>"));
        out.line(format!(
            "<dc:creator>{}</dc:creator>",
            escape_xml(&self.profile.creator)
        ));
        out.line(format!(
            "<dc:publisher>{}</dc:publisher>",
            escape_xml(&self.profile.publisher)
        ));
        out.line("<dc:format/>");
        out.line(format!("<dc:date>{}</dc:date>", self.date.format("%Y-%m-%d")));
        out.line("<dc:subject/>");
        out.line(format!("<dc:description>{title}</dc:description>"));
        out.line("<dc:rights/>");
        out.line(format!(
            "<dc:language>{}</dc:language>",
            escape_xml(&self.profile.language)
        ));
        out.line(format!(
            "<dc:identifier id=\"BookId\">{}</dc:identifier>",
            self.isbn
        ));
        out.line("<meta content=\"cover\" name=\"cover\"/>");
        out.line("</metadata>");

        out.line("<manifest>");
        out.line(format!(
            "<item href=\"{STYLESHEET_NAME}\" id=\"cssTemplate\" media-type=\"text/css\"/>"
        ));
        out.line("<item href=\"toc.ncx\" id=\"ncx\" media-type=\"application/x-dtbncx+xml\"/>");
        out.line(format!(
            "<item href=\"{toc_page}\" id=\"toc\" media-type=\"application/xhtml+xml\"/>"
        ));
        for entry in entries {
            out.line(format!(
                "<item href=\"{}\" id=\"{}\" media-type=\"application/xhtml+xml\"/>",
                escape_xml(&entry.file_name),
                entry.id
            ));
        }
        out.line("</manifest>");

        out.line("<spine toc=\"ncx\">");
        out.line("<itemref idref=\"toc\" linear=\"yes\"/>");
        for entry in entries {
            out.line(format!("<itemref idref=\"{}\" linear=\"yes\"/>", entry.id));
        }
        out.line("</spine>");

        out.line("<guide>");
        out.line(format!(
            "<reference href=\"{toc_page}\" title=\"{TOC_TITLE}\" type=\"toc\"/>"
        ));
        out.line("</guide>");
        out.line("</package>");
        out.finish()
    }

    /// Render the OCF container descriptor pointing at the OPF
    pub fn container(&self) -> String {
        let mut out = Lines::cr();
        out.line("<?xml version=\"1.0\"?>");
        out.line(
            "<container version=\"1.0\" xmlns=\"urn:oasis:names:tc:opendocument:xmlns:container\">",
        );
        out.line("  <rootfiles>");
        out.line(format!(
            "    <rootfile full-path=\"{OPF_PATH}\" media-type=\"application/oebps-package+xml\"/>"
        ));
        out.line("  </rootfiles>");
        out.line("</container>");
        out.finish()
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextBlock;

    const ISBN: &str = "9780010000009";

    fn builder(profile: &PackageProfile) -> DocumentBuilder<'_> {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        DocumentBuilder::new("My Book", ISBN, profile, date)
    }

    fn chapter(original: &str, translation: &str) -> Chapter {
        Chapter::new(
            TextBlock::new("One", original),
            TextBlock::new("Un", translation),
        )
    }

    fn entries() -> Vec<ManifestEntry> {
        vec![
            ManifestEntry::new(1, ISBN, "First"),
            ManifestEntry::new(3, ISBN, "Third"),
        ]
    }

    #[test]
    fn test_chapter_interleaves_lines() {
        let profile = PackageProfile::default();
        let page = builder(&profile)
            .chapter(1, &chapter("Hello\nWorld", "Bonjour\nMonde"))
            .unwrap()
            .unwrap();

        assert!(page.contains(
            "<hr/>\r\n<p>Hello</p>\r\n<p>Bonjour</p>\r\n<p>World</p>\r\n<p>Monde</p>\r\n</body>"
        ));
        assert!(page.contains("<title>One</title>"));
        assert!(page.contains("<p class=\"chaptertitle\">One</p>\r\n<p class=\"chaptertitle\">Un</p>"));
        assert!(page.contains("Adept.expected.resource"));
    }

    #[test]
    fn test_blank_original_line_skips_translation_line() {
        let profile = PackageProfile::default();
        let page = builder(&profile)
            .chapter(1, &chapter("A\r\n  \r\nB", "a\r\nkept?\r\nb"))
            .unwrap()
            .unwrap();

        assert!(!page.contains("kept?"));
        assert!(page.contains("<p>A</p>\r\n<p>a</p>\r\n<p>B</p>\r\n<p>b</p>"));
    }

    #[test]
    fn test_blank_chapter_produces_nothing() {
        let profile = PackageProfile::default();
        let builder = builder(&profile);
        assert!(builder.chapter(1, &chapter("", "x")).unwrap().is_none());
        assert!(builder.chapter(1, &chapter(" \n\t", "x")).unwrap().is_none());
    }

    #[test]
    fn test_line_count_mismatch() {
        let profile = PackageProfile::default();
        let err = builder(&profile)
            .chapter(4, &chapter("a\nb\nc", "x\ny"))
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::ContentMismatch {
                chapter: 4,
                original_lines: 3,
                translation_lines: 2
            }
        ));
    }

    #[test]
    fn test_text_is_escaped() {
        let profile = PackageProfile::default();
        let page = builder(&profile)
            .chapter(1, &chapter("Tom & <Jerry>", "x"))
            .unwrap()
            .unwrap();
        assert!(page.contains("<p>Tom &amp; &lt;Jerry&gt;</p>"));
    }

    #[test]
    fn test_toc_page_lists_entries_in_order() {
        let profile = PackageProfile::default();
        let page = builder(&profile).toc_page(&entries());
        let first = page.find("9780010000009c000001.xhtml\">First</a>").unwrap();
        let third = page.find("9780010000009c000003.xhtml\">Third</a>").unwrap();
        assert!(first < third);
        assert!(page.contains("<p class=\"toctitle\">Table of Contents</p>"));
    }

    #[test]
    fn test_ncx_play_order_keeps_gaps() {
        let profile = PackageProfile::default();
        let ncx = builder(&profile).ncx(&entries());
        assert!(ncx.contains("<navPoint id=\"navpoint-1\" playOrder=\"1\">"));
        assert!(ncx.contains("<navPoint id=\"navpoint-3\" playOrder=\"3\">"));
        assert!(!ncx.contains("playOrder=\"2\""));
        assert!(ncx.contains("<content src=\"9780010000009c000003.xhtml\"/>"));
        assert!(ncx.contains("<meta name=\"dtb:uid\" content=\"9780010000009\"/>"));
        assert!(ncx.contains("<text>My Book</text>"));
    }

    #[test]
    fn test_opf_metadata_manifest_and_spine() {
        let profile = PackageProfile::default();
        let opf = builder(&profile).opf(&entries());

        assert!(opf.contains("<dc:title>My Book</dc:title>"));
        assert!(opf.contains("<dc:creator>zunwno</dc:creator>"));
        assert!(opf.contains("<dc:publisher>ZT</dc:publisher>"));
        assert!(opf.contains("<dc:date>2024-05-17</dc:date>"));
        assert!(opf.contains("<dc:language>en</dc:language>"));
        assert!(opf.contains("<dc:identifier id=\"BookId\">9780010000009</dc:identifier>"));
        assert!(opf.contains(
            "<item href=\"9780010000009c000003.xhtml\" id=\"c000003\" media-type=\"application/xhtml+xml\"/>"
        ));
        assert!(opf.contains(
            "<spine toc=\"ncx\">\r\n<itemref idref=\"toc\" linear=\"yes\"/>\r\n<itemref idref=\"c000001\" linear=\"yes\"/>\r\n<itemref idref=\"c000003\" linear=\"yes\"/>\r\n</spine>"
        ));
        assert!(opf.contains("<reference href=\"9780010000009toc.xhtml\" title=\"Table of Contents\" type=\"toc\"/>"));
    }

    #[test]
    fn test_container_uses_cr_only() {
        let profile = PackageProfile::default();
        let container = builder(&profile).container();
        assert!(!container.contains('\n'));
        assert!(container.contains("full-path=\"OEBPS/content.opf\""));
        assert!(container.ends_with("</container>\r"));
    }

    #[test]
    fn test_utf16_encoding() {
        assert_eq!(encode_utf16("A"), vec![0xFF, 0xFE, 0x41, 0x00]);
        assert_eq!(encode_utf16("é"), vec![0xFF, 0xFE, 0xE9, 0x00]);
    }
}
