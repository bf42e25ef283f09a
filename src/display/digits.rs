//! Six-digit clock face and flip tracking

use serde::{Deserialize, Serialize};

/// Largest value the six-digit face can show (99:59:59)
pub const MAX_DISPLAY_SECONDS: u64 = 99 * 3600 + 59 * 60 + 59;

/// How long a digit flip animation lasts on the client
pub const FLIP_DURATION_MS: u64 = 600;

/// Digit slot names, left to right
pub const DIGIT_NAMES: [&str; 6] = [
    "hours-tens",
    "hours-ones",
    "minutes-tens",
    "minutes-ones",
    "seconds-tens",
    "seconds-ones",
];

/// Split seconds into `[h/10, h%10, m/10, m%10, s/10, s%10]`
pub fn split_digits(seconds: u64) -> [u8; 6] {
    let seconds = seconds.min(MAX_DISPLAY_SECONDS);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    [
        (hours / 10) as u8,
        (hours % 10) as u8,
        (minutes / 10) as u8,
        (minutes % 10) as u8,
        (secs / 10) as u8,
        (secs % 10) as u8,
    ]
}

/// Format seconds as "HH:MM:SS"
pub fn format_hms(seconds: u64) -> String {
    let d = split_digits(seconds);
    format!("{}{}:{}{}:{}{}", d[0], d[1], d[2], d[3], d[4], d[5])
}

/// One digit slot as the client should draw it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlipDigit {
    pub name: String,
    pub value: u8,
    /// Value shown before the last change, while a flip is in progress
    pub previous: Option<u8>,
    pub flipping: bool,
}

/// Remembers the digits last drawn so changes can be animated
#[derive(Debug, Clone)]
pub struct DigitBoard {
    current: [u8; 6],
    flipping: [Option<u8>; 6],
}

impl DigitBoard {
    pub fn new(seconds: u64) -> Self {
        Self {
            current: split_digits(seconds),
            flipping: [None; 6],
        }
    }

    /// Show a new value. Changed digits flip only when `animate` is set.
    pub fn update(&mut self, seconds: u64, animate: bool) -> Vec<FlipDigit> {
        let next = split_digits(seconds);
        for (i, value) in next.iter().enumerate() {
            self.flipping[i] = if animate && *value != self.current[i] {
                Some(self.current[i])
            } else {
                None
            };
        }
        self.current = next;
        self.digits()
    }

    pub fn digits(&self) -> Vec<FlipDigit> {
        DIGIT_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| FlipDigit {
                name: name.to_string(),
                value: self.current[i],
                previous: self.flipping[i],
                flipping: self.flipping[i].is_some(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_digits() {
        assert_eq!(split_digits(0), [0, 0, 0, 0, 0, 0]);
        assert_eq!(split_digits(59), [0, 0, 0, 0, 5, 9]);
        assert_eq!(split_digits(25 * 60), [0, 0, 2, 5, 0, 0]);
        assert_eq!(split_digits(3661), [0, 1, 0, 1, 0, 1]);
        assert_eq!(split_digits(12 * 3600 + 34 * 60 + 56), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_split_digits_saturates() {
        assert_eq!(split_digits(MAX_DISPLAY_SECONDS), [9, 9, 5, 9, 5, 9]);
        assert_eq!(split_digits(100 * 3600), [9, 9, 5, 9, 5, 9]);
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(61), "00:01:01");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(300), "00:05:00");
    }

    #[test]
    fn test_board_flips_changed_digits_when_animating() {
        let mut board = DigitBoard::new(60);
        let digits = board.update(59, true);

        let flipping: Vec<&str> = digits
            .iter()
            .filter(|d| d.flipping)
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(flipping, vec!["minutes-ones", "seconds-tens", "seconds-ones"]);
        assert_eq!(digits[3].previous, Some(1));
        assert_eq!(digits[3].value, 0);
        let values: Vec<u8> = digits.iter().map(|d| d.value).collect();
        assert_eq!(values, vec![0, 0, 0, 0, 5, 9]);
    }

    #[test]
    fn test_board_without_animation_never_flips() {
        let mut board = DigitBoard::new(60);
        let digits = board.update(59, false);
        assert!(digits.iter().all(|d| !d.flipping && d.previous.is_none()));
    }

    #[test]
    fn test_board_clears_flip_on_unchanged_update() {
        let mut board = DigitBoard::new(10);
        board.update(9, true);
        let digits = board.update(9, true);
        assert!(digits.iter().all(|d| !d.flipping));
    }
}
