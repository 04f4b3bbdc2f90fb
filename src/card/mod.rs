//! Magnetic stripe card data.

mod track2;

pub use track2::{parse_track2, Track2Error};

use serde::Serialize;

/// Card details decoded from track 2. Never stored by the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardData {
    /// Primary account number.
    pub number: String,
    /// Three-digit service code.
    pub service_code: String,
    /// The raw track, unmodified.
    pub track2: String,
}

impl CardData {
    /// PAN with everything but the first six and last four digits masked.
    pub fn masked_number(&self) -> String {
        let len = self.number.len();
        if len <= 10 {
            return "*".repeat(len);
        }
        self.number
            .char_indices()
            .map(|(i, c)| if i < 6 || i >= len - 4 { c } else { '*' })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(number: &str) -> CardData {
        CardData {
            number: number.to_string(),
            service_code: "221".to_string(),
            track2: String::new(),
        }
    }

    #[test]
    fn test_masked_number_keeps_bin_and_last_four() {
        assert_eq!(card("4575270595153145").masked_number(), "457527******3145");
    }

    #[test]
    fn test_masked_number_short_pan_fully_masked() {
        assert_eq!(card("12345").masked_number(), "*****");
    }
}
