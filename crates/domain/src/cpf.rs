//! Checksum validation for the Brazilian CPF identifier.
//!
//! A CPF is eleven decimal digits; the last two are check digits derived
//! from the first nine by a weighted sum. Validation is pure and total:
//! any string is accepted as input and the answer is always a boolean.

/// Returns only the decimal digits of `input`, in order.
///
/// Submitted CPFs routinely arrive punctuated ("529.982.247-25"); every
/// consumer works on the stripped form.
#[must_use]
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Validates a CPF number, with or without punctuation.
///
/// Rejects anything that is not exactly eleven digits after stripping, and
/// the trivial repeated-digit sequences ("00000000000" through
/// "99999999999") which pass the arithmetic but are not assignable.
#[must_use]
pub fn validate_cpf(input: &str) -> bool {
    let digits = strip_non_digits(input);
    if digits.len() != 11 {
        return false;
    }

    let values: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    if values.iter().all(|&d| d == values[0]) {
        return false;
    }

    let first = check_digit(&values[..9], 10);
    let second = check_digit(&values[..10], 11);

    values[9] == first && values[10] == second
}

/// Computes one weighted check digit.
///
/// Position `i` weighs `start - i`; the digit is `(sum * 10 % 11) % 10`.
fn check_digit(digits: &[u32], start: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(position, &digit)| digit * (start - position as u32))
        .sum();
    (sum * 10 % 11) % 10
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{strip_non_digits, validate_cpf};

    // Reference CPFs with correct check digits.
    const VALID: &[&str] = &["52998224725", "11144477735", "93541134780"];

    #[test]
    fn accepts_reference_cpfs() {
        for cpf in VALID {
            assert!(validate_cpf(cpf), "expected {cpf} to validate");
        }
    }

    #[test]
    fn accepts_punctuated_form() {
        assert!(validate_cpf("529.982.247-25"));
        assert!(validate_cpf(" 111.444.777-35 "));
    }

    #[test]
    fn rejects_repeated_digit_sequences() {
        for digit in 0..=9u32 {
            let cpf = digit.to_string().repeat(11);
            assert!(!validate_cpf(&cpf), "expected {cpf} to be rejected");
        }
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert!(!validate_cpf(""));
        assert!(!validate_cpf("5299822472"));
        assert!(!validate_cpf("529982247251"));
        assert!(!validate_cpf("abc"));
    }

    #[test]
    fn rejects_single_digit_flips() {
        let reference = "52998224725";
        for position in 0..reference.len() {
            let mut flipped: Vec<char> = reference.chars().collect();
            let original = flipped[position].to_digit(10).unwrap_or(0);
            let replacement = (original + 1) % 10;
            flipped[position] = char::from_digit(replacement, 10).unwrap_or('0');
            let candidate: String = flipped.into_iter().collect();
            assert!(
                !validate_cpf(&candidate),
                "flip at {position} produced a CPF that still validates: {candidate}"
            );
        }
    }

    #[test]
    fn strip_keeps_digit_order() {
        assert_eq!(strip_non_digits("12a3.4-5"), "12345");
    }

    proptest! {
        #[test]
        fn never_panics_on_arbitrary_input(input in ".*") {
            let _ = validate_cpf(&input);
        }

        #[test]
        fn rejects_everything_shorter_or_longer_than_eleven(digits in "[0-9]{0,10}|[0-9]{12,20}") {
            prop_assert!(!validate_cpf(&digits));
        }
    }
}
