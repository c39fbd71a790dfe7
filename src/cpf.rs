//! CPF (Brazilian 11-digit national ID) masking and length validation.
//!
//! Input is reduced to ASCII digits, truncated to [`CPF_DIGITS`], and only
//! punctuated once all eleven digits are present. Partial input is never
//! masked progressively.

/// Number of digits in a complete CPF.
pub const CPF_DIGITS: usize = 11;

/// Placeholder shown in an empty CPF input.
pub const CPF_PLACEHOLDER: &str = "000.000.000-00";

/// Inline message shown when the digit count requirement is not met.
pub const CPF_LENGTH_MESSAGE: &str = "CPF must have 11 digits";

/// Result of masking raw CPF input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskedCpf {
    /// What the input field shows: `ddd.ddd.ddd-dd` when complete, bare digits otherwise.
    pub display: String,
    /// Digits only, at most [`CPF_DIGITS`] long.
    pub digits: String,
}

impl MaskedCpf {
    pub fn is_valid(&self) -> bool {
        self.digits.len() == CPF_DIGITS
    }
}

/// Every ASCII digit of `input`, in order, without truncation.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// True when `input` carries more digits than a CPF can hold.
pub fn overflows(input: &str) -> bool {
    input.chars().filter(char::is_ascii_digit).count() > CPF_DIGITS
}

/// Strip, truncate and (when complete) punctuate raw CPF input.
pub fn mask(input: &str) -> MaskedCpf {
    let digits: String = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(CPF_DIGITS)
        .collect();
    let display = if digits.len() == CPF_DIGITS {
        // All chars are ASCII digits, so byte slicing stays on char boundaries.
        format!(
            "{}.{}.{}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..11]
        )
    } else {
        digits.clone()
    };
    MaskedCpf { display, digits }
}

/// Display form of `input`; shorthand for `mask(input).display`.
pub fn format_cpf(input: &str) -> String {
    mask(input).display
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_input_is_punctuated() {
        assert_eq!(format_cpf("11122233344"), "111.222.333-44");
        assert!(mask("11122233344").is_valid());
    }

    #[test]
    fn partial_input_stays_bare() {
        assert_eq!(format_cpf("111"), "111");
        assert_eq!(format_cpf("1112223334"), "1112223334");
        assert!(!mask("1112223334").is_valid());
        assert_eq!(format_cpf(""), "");
    }

    #[test]
    fn punctuation_and_letters_are_stripped() {
        assert_eq!(format_cpf("111.222.333-44"), "111.222.333-44");
        assert_eq!(mask("111.222.333-44").digits, "11122233344");
        assert_eq!(format_cpf("a1b2c3"), "123");
        assert_eq!(format_cpf(" 111 222 333 44 "), "111.222.333-44");
    }

    #[test]
    fn excess_digits_are_dropped_after_the_eleventh() {
        let m = mask("111222333445566");
        assert_eq!(m.digits, "11122233344");
        assert_eq!(m.display, "111.222.333-44");
        assert!(overflows("111222333445"));
        assert!(!overflows("111.222.333-44"));
    }

    #[test]
    fn digit_projection_never_exceeds_eleven() {
        let inputs = [
            "",
            "0",
            "123456789012345678901234567890",
            "111.222.333-44.555",
            "１２３", // full-width digits are not ASCII digits
            "999999999999",
            "abc",
            "12-34-56-78-90-12",
        ];
        for input in inputs {
            let m = mask(input);
            assert!(m.digits.len() <= CPF_DIGITS, "{input:?} produced {:?}", m.digits);
            assert!(m.digits.chars().all(|c| c.is_ascii_digit()));
        }
        assert_eq!(mask("１２３").digits, "");
    }

    #[test]
    fn masking_is_idempotent() {
        for input in ["11122233344", "123", "98765432100999"] {
            let once = format_cpf(input);
            assert_eq!(format_cpf(&once), once);
        }
    }
}
