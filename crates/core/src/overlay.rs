//! SVG overlay construction.
//!
//! The overlay is an SVG document the size of the template holding one `<text>` element per
//! layout field. User text only ever reaches the markup through [`escape_markup`].

use std::fmt::Write as _;

use crate::layout::{CertificateLayout, FontWeight};
use crate::markup::escape_markup;
use crate::validation::CertificateRequest;

/// A text run as placed on the overlay, before escaping.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub id: &'static str,
    pub text: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayMarkup {
    width: u32,
    height: u32,
    runs: Vec<TextRun>,
    svg: String,
}

impl OverlayMarkup {
    /// Build the overlay for `request` on a `width` x `height` template.
    pub fn build(
        layout: &CertificateLayout,
        request: &CertificateRequest,
        width: u32,
        height: u32,
    ) -> Self {
        let mut svg = String::new();
        let mut runs = Vec::with_capacity(layout.fields().len());

        // Writing into a String cannot fail.
        let _ = writeln!(
            svg,
            r#"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">"#
        );

        for field in layout.fields() {
            let text = field.content(request);
            let style = &field.style;

            let _ = write!(
                svg,
                r#"  <text id="{}" x="{}" y="{}" font-family="{}" font-size="{}""#,
                field.id, field.x, field.y, style.font_family, style.font_size
            );
            if style.font_weight == FontWeight::Bold {
                svg.push_str(r#" font-weight="bold""#);
            }
            let _ = writeln!(
                svg,
                r#" fill="{}" letter-spacing="{}">{}</text>"#,
                style.fill,
                style.letter_spacing,
                escape_markup(&text)
            );

            runs.push(TextRun {
                id: field.id,
                text,
                x: field.x,
                y: field.y,
            });
        }

        svg.push_str("</svg>\n");

        Self {
            width,
            height,
            runs,
            svg,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn as_str(&self) -> &str {
        &self.svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay(name: &str, tax_id: &str) -> OverlayMarkup {
        let req = CertificateRequest::from_params(Some(name), Some(tax_id)).unwrap();
        OverlayMarkup::build(&CertificateLayout::standard(), &req, 400, 600)
    }

    fn text_nodes(doc: &roxmltree::Document<'_>) -> Vec<(String, String, String)> {
        doc.descendants()
            .filter(|n| n.has_tag_name("text"))
            .map(|n| {
                (
                    n.attribute("x").unwrap_or_default().to_string(),
                    n.attribute("y").unwrap_or_default().to_string(),
                    n.text().unwrap_or_default().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn sized_to_template_with_three_runs() {
        let markup = overlay("João Silva", "123.456.789-00");
        let doc = roxmltree::Document::parse(markup.as_str()).expect("well-formed svg");

        let root = doc.root_element();
        assert_eq!(root.attribute("width"), Some("400"));
        assert_eq!(root.attribute("height"), Some("600"));

        assert_eq!(
            text_nodes(&doc),
            vec![
                ("120".into(), "215".into(), "JOÃO SILVA".into()),
                ("120".into(), "245".into(), "123.456.789-00".into()),
                ("55".into(), "445".into(), "JOÃO SILVA".into()),
            ]
        );
    }

    #[test]
    fn styles_are_written_per_run() {
        let markup = overlay("a", "b");
        let doc = roxmltree::Document::parse(markup.as_str()).unwrap();
        let texts: Vec<_> = doc.descendants().filter(|n| n.has_tag_name("text")).collect();

        assert_eq!(texts[0].attribute("font-weight"), Some("bold"));
        assert_eq!(texts[0].attribute("font-size"), Some("18"));
        assert_eq!(texts[0].attribute("fill"), Some("#003366"));
        assert_eq!(texts[0].attribute("letter-spacing"), Some("0.5"));
        assert_eq!(texts[0].attribute("font-family"), Some("Arial, sans-serif"));

        assert_eq!(texts[2].attribute("font-weight"), None);
        assert_eq!(texts[2].attribute("font-size"), Some("12"));
        assert_eq!(texts[2].attribute("fill"), Some("white"));
        assert_eq!(texts[2].attribute("letter-spacing"), Some("1"));
    }

    #[test]
    fn script_tags_stay_text() {
        let markup = overlay("<script>alert(1)</script>", "1");
        assert!(!markup.as_str().contains("<script>"));
        assert!(markup.as_str().contains("&lt;SCRIPT&gt;ALERT(1)&lt;/SCRIPT&gt;"));

        let doc = roxmltree::Document::parse(markup.as_str()).unwrap();
        assert!(doc.descendants().all(|n| !n.has_tag_name("script")));
        assert_eq!(
            text_nodes(&doc)[0].2,
            "<SCRIPT>ALERT(1)</SCRIPT>".to_string()
        );
    }

    #[test]
    fn reserved_characters_round_trip_through_the_parser() {
        let name = r#"O'Neil & "Sons" <Ltd>"#;
        let tax_id = r#"1<2>&'3'"4""#;
        let markup = overlay(name, tax_id);

        for run in markup.runs() {
            let escaped = escape_markup(&run.text);
            assert!(markup.as_str().contains(&escaped));
        }

        let doc = roxmltree::Document::parse(markup.as_str()).unwrap();
        let texts = text_nodes(&doc);
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[0].2, name.to_uppercase());
        assert_eq!(texts[1].2, tax_id);
        assert_eq!(texts[2].2, name.to_uppercase());
    }

    #[test]
    fn attribute_injection_is_neutralised() {
        let markup = overlay(r#""><rect width="999"/>"#, "1");
        let doc = roxmltree::Document::parse(markup.as_str()).unwrap();
        assert!(doc.descendants().all(|n| !n.has_tag_name("rect")));
    }

    #[test]
    fn runs_record_unescaped_positions() {
        let markup = overlay("Ana", "1");
        let ids: Vec<&str> = markup.runs().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["name", "tax-id", "holder"]);
        assert_eq!(markup.width(), 400);
        assert_eq!(markup.height(), 600);
    }
}
