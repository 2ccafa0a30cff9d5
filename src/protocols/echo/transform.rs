//! Alternating-case line transform.

/// Transform one line into alternating case.
///
/// A capitalize-next flag starts true; each ASCII letter is emitted upper-
/// or lowercase per the flag and flips it. Non-letters are copied through
/// without consuming a capitalization slot, so the alternation continues
/// across runs of spaces and punctuation.
pub fn transform(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut capitalize = true;

    for c in input.chars() {
        if c.is_ascii_alphabetic() {
            output.push(if capitalize {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            });
            capitalize = !capitalize;
        } else {
            output.push(c);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternates_case() {
        assert_eq!(transform("hello world"), "HeLlO wOrLd");
        assert_eq!(transform("HELLO WORLD"), "HeLlO wOrLd");
    }

    #[test]
    fn test_non_letters_transparent() {
        // The hyphen and digits are copied unchanged and do not flip the
        // flag; the alternation continues around them.
        assert_eq!(transform("a-b"), "A-b");
        assert_eq!(transform("ab12cd"), "Ab12Cd");
        assert_eq!(transform("123"), "123");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(transform(""), "");
    }

    #[test]
    fn test_double_application_is_not_a_round_trip() {
        // Applying the transform twice does not restore the input.
        let input = "hello world";
        let once = transform(input);
        let twice = transform(&once);
        assert_eq!(twice, "HeLlO wOrLd");
        assert_ne!(twice, input);
    }
}
