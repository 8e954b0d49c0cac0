use chrono::{Local, NaiveDateTime};
use rand::Rng;

pub const DEFAULT_PREFIX: &str = "PNR";
pub const DEFAULT_SUFFIX_DIGITS: u32 = 4;

/// Largest suffix width that still fits the random draw in a `u64`.
const MAX_SUFFIX_DIGITS: u32 = 18;

/// Builds booking references of the form `<prefix><YYYYmmddHHMMSS><random digits>`.
///
/// The timestamp keeps references roughly sortable by booking time; the
/// random suffix separates bookings made within the same second. Collisions
/// are still possible and are resolved by the issuer retrying with a fresh
/// reference.
#[derive(Debug, Clone)]
pub struct PnrGenerator {
    prefix: String,
    suffix_digits: u32,
}

impl PnrGenerator {
    pub fn new(prefix: impl Into<String>, suffix_digits: u32) -> Self {
        Self {
            prefix: prefix.into(),
            suffix_digits: suffix_digits.min(MAX_SUFFIX_DIGITS),
        }
    }

    pub fn generate(&self) -> String {
        self.generate_at(Local::now().naive_local(), &mut rand::thread_rng())
    }

    pub fn generate_at<R: Rng + ?Sized>(&self, at: NaiveDateTime, rng: &mut R) -> String {
        let stamp = at.format("%Y%m%d%H%M%S");
        if self.suffix_digits == 0 {
            return format!("{}{}", self.prefix, stamp);
        }

        let bound = 10u64.pow(self.suffix_digits);
        let suffix = rng.gen_range(0..bound);
        format!(
            "{}{}{:0width$}",
            self.prefix,
            stamp,
            suffix,
            width = self.suffix_digits as usize
        )
    }
}

/// Source of fresh booking references for the issuer.
pub trait PnrSource: Send + Sync {
    fn next_pnr(&self) -> String;
}

impl PnrSource for PnrGenerator {
    fn next_pnr(&self) -> String {
        self.generate()
    }
}

impl Default for PnrGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_SUFFIX_DIGITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::{rngs::StdRng, SeedableRng};

    fn booking_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_pnr_embeds_timestamp_and_suffix() {
        let generator = PnrGenerator::default();
        let mut rng = StdRng::seed_from_u64(7);

        let pnr = generator.generate_at(booking_time(), &mut rng);

        assert!(pnr.starts_with("PNR20240101093005"));
        assert_eq!(pnr.len(), 3 + 14 + 4);
        assert!(pnr[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_zero_digit_suffix_is_plain_timestamp() {
        let generator = PnrGenerator::new("PNR", 0);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(generator.generate_at(booking_time(), &mut rng), "PNR20240101093005");
    }

    #[test]
    fn test_same_second_references_differ() {
        let generator = PnrGenerator::new("T", 8);
        let mut rng = StdRng::seed_from_u64(42);

        let first = generator.generate_at(booking_time(), &mut rng);
        let second = generator.generate_at(booking_time(), &mut rng);

        assert_ne!(first, second);
    }
}
