use proptest::prelude::*;

use dompet_types::{
    AmountError, Balance, ImageError, ProfileImage, TopUpAmount, MAX_PROFILE_IMAGE_BYTES,
    TOP_UP_MAX, TOP_UP_MIN,
};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

proptest! {
    /// TopUpAmount::new accepts exactly the positive integers.
    #[test]
    fn top_up_new_accepts_positive(amount in 0u64..10_000_000) {
        let result = TopUpAmount::new(amount);
        if amount == 0 {
            prop_assert_eq!(result, Err(AmountError::Zero));
        } else {
            prop_assert_eq!(result.map(|a| a.amount()), Ok(amount));
        }
    }

    /// TopUpAmount::checked agrees with the documented inclusive range.
    #[test]
    fn top_up_checked_matches_range(amount in 1u64..2_000_000) {
        let in_range = (TOP_UP_MIN..=TOP_UP_MAX).contains(&amount);
        prop_assert_eq!(TopUpAmount::checked(amount).is_ok(), in_range);
    }

    /// Balance::covers is a plain >= comparison.
    #[test]
    fn balance_covers_is_ge(balance in 0u64..10_000_000, tariff in 0u64..10_000_000) {
        prop_assert_eq!(Balance::new(balance).covers(tariff), balance >= tariff);
    }

    /// A PNG payload is accepted iff it is within the size limit.
    #[test]
    fn png_accepted_iff_within_limit(len in 8usize..(MAX_PROFILE_IMAGE_BYTES * 2)) {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.resize(len, 0xAB);
        let result = ProfileImage::new("p.png", bytes);
        if len <= MAX_PROFILE_IMAGE_BYTES {
            prop_assert!(result.is_ok());
        } else {
            let is_too_large = matches!(result, Err(ImageError::TooLarge { .. }));
            prop_assert!(is_too_large);
        }
    }

    /// Payloads without a JPEG or PNG signature are always rejected.
    #[test]
    fn unknown_signature_rejected(mut bytes in prop::collection::vec(any::<u8>(), 1..512)) {
        // Force a leading byte that starts neither signature.
        bytes[0] = 0x00;
        prop_assert_eq!(
            ProfileImage::new("x", bytes),
            Err(ImageError::UnsupportedFormat)
        );
    }
}
