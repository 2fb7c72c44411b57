use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const DEFAULT_POINT_SIZE: u32 = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    fn parse_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "PLAIN" => Some(Self::Plain),
            "BOLD" => Some(Self::Bold),
            "ITALIC" => Some(Self::Italic),
            "BOLDITALIC" => Some(Self::BoldItalic),
            _ => None,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

/// Font used by the wiki markup editor.
///
/// The textual form is `family[-style][-size]` (or the same with spaces as separators), e.g.
/// `Monaco 13` or `Fira Code-BOLD-14`. When the text contains a `-`, dashes separate the parts and
/// the family may contain spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditorFont {
    pub family: String,
    pub style: FontStyle,
    pub size: u32,
}

impl Default for EditorFont {
    fn default() -> Self {
        Self {
            family: "Monaco".to_string(),
            style: FontStyle::Plain,
            size: 13,
        }
    }
}

impl EditorFont {
    pub fn new(family: impl Into<String>, style: FontStyle, size: u32) -> Self {
        Self {
            family: family.into(),
            style,
            size,
        }
    }

    pub fn decode(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidFont {
            text: text.to_string(),
        };

        let trimmed = text.trim();
        let sep = if trimmed.contains('-') { '-' } else { ' ' };
        let mut parts: Vec<&str> = trimmed.split(sep).filter(|p| !p.is_empty()).collect();

        let mut size = DEFAULT_POINT_SIZE;
        if parts.len() > 1 {
            if let Some(last) = parts.last().and_then(|p| p.trim().parse::<u32>().ok()) {
                if last == 0 {
                    return Err(invalid());
                }
                size = last;
                parts.pop();
            }
        }

        let mut style = FontStyle::Plain;
        if parts.len() > 1 {
            if let Some(parsed) = parts.last().and_then(|p| FontStyle::parse_token(p)) {
                style = parsed;
                parts.pop();
            }
        }

        let family = parts.join(&sep.to_string()).trim().to_string();
        if family.is_empty() {
            return Err(invalid());
        }

        Ok(Self { family, style, size })
    }

    pub fn encode(&self) -> String {
        let mut out = self.family.clone();
        match self.style {
            FontStyle::Plain => {}
            FontStyle::Bold => out.push_str("-BOLD"),
            FontStyle::Italic => out.push_str("-ITALIC"),
            FontStyle::BoldItalic => out.push_str("-BOLDITALIC"),
        }
        out.push('-');
        out.push_str(&self.size.to_string());
        out
    }
}

impl fmt::Display for EditorFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for EditorFont {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl Serialize for EditorFont {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for EditorFont {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::decode(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_space_separated_default() {
        let font = EditorFont::decode("Monaco 13").unwrap();
        assert_eq!(font, EditorFont::default());
    }

    #[test]
    fn decodes_dash_separated_with_style() {
        let font = EditorFont::decode("Fira Code-BOLDITALIC-14").unwrap();
        assert_eq!(font.family, "Fira Code");
        assert_eq!(font.style, FontStyle::BoldItalic);
        assert_eq!(font.size, 14);
        assert!(font.style.is_bold() && font.style.is_italic());
    }

    #[test]
    fn missing_size_falls_back_to_twelve_points() {
        let font = EditorFont::decode("Menlo-italic").unwrap();
        assert_eq!(font.family, "Menlo");
        assert_eq!(font.style, FontStyle::Italic);
        assert_eq!(font.size, 12);

        let font = EditorFont::decode("Consolas").unwrap();
        assert_eq!(font.family, "Consolas");
        assert_eq!(font.size, 12);
    }

    #[test]
    fn encode_writes_style_suffix() {
        let font = EditorFont::new("Menlo", FontStyle::Bold, 11);
        assert_eq!(font.encode(), "Menlo-BOLD-11");
        assert_eq!(EditorFont::decode(&font.encode()).unwrap(), font);
        assert_eq!(EditorFont::default().encode(), "Monaco-13");
    }

    #[test]
    fn rejects_empty_family_and_zero_size() {
        assert!(EditorFont::decode("").is_err());
        assert!(EditorFont::decode("   ").is_err());
        assert!(EditorFont::decode("Monaco-0").is_err());
    }
}
