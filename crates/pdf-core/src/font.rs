//! Standard font handling for PDF documents
//!
//! Only the 14 base faces every PDF reader ships with are supported, so no
//! font program is ever embedded. Text for these faces is written in
//! WinAnsiEncoding.

use lopdf::{Dictionary, Object};

/// One of the 14 standard Type1 faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
    Symbol,
    ZapfDingbats,
}

impl StandardFont {
    /// PostScript name used as the `BaseFont` of the font dictionary
    pub fn postscript_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
            StandardFont::Symbol => "Symbol",
            StandardFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Look up a face by name
    ///
    /// Accepts PostScript names (`Helvetica-Bold`), the same names without
    /// punctuation (`HelveticaBold`, `TimesRomanBold`) and a few common
    /// aliases. Matching is case-insensitive. Returns `None` for anything
    /// else; callers decide what the fallback is.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let font = match key.as_str() {
            "helvetica" | "arial" | "sansserif" | "sans" => StandardFont::Helvetica,
            "helveticabold" | "arialbold" => StandardFont::HelveticaBold,
            "helveticaoblique" | "helveticaitalic" => StandardFont::HelveticaOblique,
            "helveticaboldoblique" | "helveticabolditalic" => StandardFont::HelveticaBoldOblique,
            "times" | "timesroman" | "timesnewroman" | "serif" => StandardFont::TimesRoman,
            "timesbold" | "timesromanbold" => StandardFont::TimesBold,
            "timesitalic" | "timesromanitalic" => StandardFont::TimesItalic,
            "timesbolditalic" | "timesromanbolditalic" => StandardFont::TimesBoldItalic,
            "courier" | "couriernew" | "monospace" => StandardFont::Courier,
            "courierbold" => StandardFont::CourierBold,
            "courieroblique" | "courieritalic" => StandardFont::CourierOblique,
            "courierboldoblique" | "courierbolditalic" => StandardFont::CourierBoldOblique,
            "symbol" => StandardFont::Symbol,
            "zapfdingbats" => StandardFont::ZapfDingbats,
            _ => return None,
        };
        Some(font)
    }

    /// The bold sibling of this face
    ///
    /// Faces that are already bold, and faces without a bold variant
    /// (Symbol, ZapfDingbats), return themselves.
    pub fn bold(self) -> Self {
        match self {
            StandardFont::Helvetica => StandardFont::HelveticaBold,
            StandardFont::HelveticaOblique => StandardFont::HelveticaBoldOblique,
            StandardFont::TimesRoman => StandardFont::TimesBold,
            StandardFont::TimesItalic => StandardFont::TimesBoldItalic,
            StandardFont::Courier => StandardFont::CourierBold,
            StandardFont::CourierOblique => StandardFont::CourierBoldOblique,
            other => other,
        }
    }

    /// Symbolic faces have their own built-in encoding
    pub fn is_symbolic(self) -> bool {
        matches!(self, StandardFont::Symbol | StandardFont::ZapfDingbats)
    }

    /// Build the font dictionary for this face
    pub fn to_dictionary(self) -> Dictionary {
        let mut dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            (
                "BaseFont",
                Object::Name(self.postscript_name().as_bytes().to_vec()),
            ),
        ]);
        if !self.is_symbolic() {
            dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        }
        dict
    }
}

/// Encode text as WinAnsi (Windows-1252) bytes
///
/// Tabs and line breaks become spaces since a text run is a single line.
/// Characters with no WinAnsi code are replaced with `?`. The second value
/// of the tuple counts the replaced characters.
pub fn encode_win_ansi(text: &str) -> (Vec<u8>, usize) {
    let mut bytes = Vec::with_capacity(text.len());
    let mut replaced = 0;

    for c in text.chars() {
        let code = match c {
            '\t' | '\n' | '\r' => Some(b' '),
            ' '..='~' => Some(c as u8),
            '\u{A0}'..='\u{FF}' => Some(c as u32 as u8),
            _ => win_ansi_extra(c),
        };
        match code {
            Some(b) => bytes.push(b),
            None => {
                bytes.push(b'?');
                replaced += 1;
            }
        }
    }

    (bytes, replaced)
}

/// Code points Windows-1252 places in the 0x80-0x9F range
fn win_ansi_extra(c: char) -> Option<u8> {
    let code = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

/// Hex-encode bytes for a `Tj` operand, e.g. `<48656C6C6F>`
pub(crate) fn to_hex_string(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2 + 2);
    hex.push('<');
    for b in bytes {
        hex.push_str(&format!("{b:02X}"));
    }
    hex.push('>');
    hex
}
