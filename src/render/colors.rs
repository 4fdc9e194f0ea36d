//! Color definitions and the `r,g,b[,a]` token codec

use serde::{Deserialize, Serialize};

/// RGBA color (0 to 255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const RED: Color = Color::new(255, 0, 0);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Encode as comma-separated channels; alpha is omitted when opaque so
    /// the common case matches what older decoders expect
    pub fn encode(&self) -> String {
        if self.a == 255 {
            format!("{},{},{}", self.r, self.g, self.b)
        } else {
            format!("{},{},{},{}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parse `r,g,b` or `r,g,b,a`; `None` on any malformed channel
    pub fn parse(token: &str) -> Option<Color> {
        let channels: Vec<&str> = token.split(',').collect();
        if channels.len() != 3 && channels.len() != 4 {
            return None;
        }
        let mut parsed = [0u8; 4];
        parsed[3] = 255;
        for (i, channel) in channels.iter().enumerate() {
            parsed[i] = channel.trim().parse().ok()?;
        }
        Some(Color::with_alpha(parsed[0], parsed[1], parsed[2], parsed[3]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_channels() {
        assert_eq!(Color::parse("255,0,0"), Some(Color::RED));
        assert_eq!(Color::parse(" 0, 0 ,0 "), Some(Color::BLACK));
    }

    #[test]
    fn test_parse_four_channels() {
        assert_eq!(
            Color::parse("10,20,30,40"),
            Some(Color::with_alpha(10, 20, 30, 40))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Color::parse(""), None);
        assert_eq!(Color::parse("255,0"), None);
        assert_eq!(Color::parse("255,0,0,0,0"), None);
        assert_eq!(Color::parse("red,0,0"), None);
        assert_eq!(Color::parse("300,0,0"), None);
    }

    #[test]
    fn test_encode_round_trip() {
        for color in [Color::RED, Color::with_alpha(1, 2, 3, 4)] {
            assert_eq!(Color::parse(&color.encode()), Some(color));
        }
    }
}
