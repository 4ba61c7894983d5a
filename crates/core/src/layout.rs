//! Layout descriptor for the certificate template.
//!
//! Each [`TextField`] names the request value it prints, how the value is cased, where it sits
//! in template pixel space and how it is styled.

use crate::constants::{FIELD_FILL, HOLDER_FILL, OVERLAY_FONT_FAMILY};
use crate::validation::CertificateRequest;

/// Which request value a field prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    Name,
    TaxId,
}

/// Case transformation applied before escaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCase {
    Upper,
    AsIs,
}

impl TextCase {
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Upper => text.to_uppercase(),
            Self::AsIs => text.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: &'static str,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub fill: &'static str,
    pub letter_spacing: f32,
}

/// One text run on the template.
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    /// Short identifier, used in logs and in the markup as an element id.
    pub id: &'static str,
    pub source: FieldSource,
    pub case: TextCase,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
}

impl TextField {
    /// The cased, unescaped content this field prints for `request`.
    pub fn content(&self, request: &CertificateRequest) -> String {
        let raw = match self.source {
            FieldSource::Name => request.name(),
            FieldSource::TaxId => request.tax_id(),
        };
        self.case.apply(raw)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CertificateLayout {
    fields: Vec<TextField>,
}

impl CertificateLayout {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self { fields }
    }

    /// The layout of the shipped template: name and CPF after their labels, plus the holder
    /// name printed on the card.
    pub fn standard() -> Self {
        let label_style = TextStyle {
            font_family: OVERLAY_FONT_FAMILY,
            font_size: 18.0,
            font_weight: FontWeight::Bold,
            fill: FIELD_FILL,
            letter_spacing: 0.5,
        };

        Self::new(vec![
            TextField {
                id: "name",
                source: FieldSource::Name,
                case: TextCase::Upper,
                x: 120.0,
                y: 215.0,
                style: label_style.clone(),
            },
            TextField {
                id: "tax-id",
                source: FieldSource::TaxId,
                case: TextCase::AsIs,
                x: 120.0,
                y: 245.0,
                style: label_style,
            },
            TextField {
                id: "holder",
                source: FieldSource::Name,
                case: TextCase::Upper,
                x: 55.0,
                y: 445.0,
                style: TextStyle {
                    font_family: OVERLAY_FONT_FAMILY,
                    font_size: 12.0,
                    font_weight: FontWeight::Normal,
                    fill: HOLDER_FILL,
                    letter_spacing: 1.0,
                },
            },
        ])
    }

    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }
}

impl Default for CertificateLayout {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_positions() {
        let layout = CertificateLayout::standard();
        let positions: Vec<(f32, f32)> = layout.fields().iter().map(|f| (f.x, f.y)).collect();
        assert_eq!(positions, vec![(120.0, 215.0), (120.0, 245.0), (55.0, 445.0)]);
    }

    #[test]
    fn only_name_fields_are_upper_cased() {
        let req = CertificateRequest::from_params(Some("Ana ß"), Some("abc.def")).unwrap();
        let contents: Vec<String> = CertificateLayout::standard()
            .fields()
            .iter()
            .map(|f| f.content(&req))
            .collect();
        assert_eq!(contents, vec!["ANA SS", "abc.def", "ANA SS"]);
    }

    #[test]
    fn holder_style_differs_from_label_style() {
        let layout = CertificateLayout::standard();
        let holder = &layout.fields()[2].style;
        assert_eq!(holder.font_size, 12.0);
        assert_eq!(holder.font_weight, FontWeight::Normal);
        assert_eq!(holder.fill, "white");
        assert_eq!(holder.letter_spacing, 1.0);

        let name = &layout.fields()[0].style;
        assert_eq!(name, &layout.fields()[1].style);
        assert_eq!(name.font_weight, FontWeight::Bold);
        assert_eq!(name.fill, "#003366");
    }
}
