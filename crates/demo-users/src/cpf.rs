//! CPF (Cadastro de Pessoas Físicas) check digits and formatting.

/// Digits in a complete CPF, check digits included.
pub const CPF_DIGITS: usize = 11;

const BASE_DIGITS: usize = 9;

/// Computes the two check digits for a nine-digit CPF base.
///
/// # Example
///
/// ```
/// use demo_users::cpf_check_digits;
///
/// assert_eq!(cpf_check_digits(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), [2, 5]);
/// ```
pub fn cpf_check_digits(base: &[u8; BASE_DIGITS]) -> [u8; 2] {
    let first = check_digit(base);
    let mut extended = [0_u8; BASE_DIGITS + 1];
    extended[..BASE_DIGITS].copy_from_slice(base);
    extended[BASE_DIGITS] = first;
    [first, check_digit(&extended)]
}

/// Modulo-11 check digit with descending weights ending at 2.
fn check_digit(digits: &[u8]) -> u8 {
    let sum: usize = digits
        .iter()
        .zip((2..=digits.len() + 1).rev())
        .map(|(digit, weight)| usize::from(*digit) * weight)
        .sum();
    match sum % 11 {
        0 | 1 => 0,
        remainder => u8::try_from(11 - remainder).unwrap_or(0),
    }
}

/// Formats eleven digits with the `999.999.999-99` mask.
pub fn format_cpf(digits: &[u8; CPF_DIGITS]) -> String {
    let mut formatted = String::with_capacity(CPF_DIGITS + 3);
    for (index, digit) in digits.iter().enumerate() {
        match index {
            3 | 6 => formatted.push('.'),
            9 => formatted.push('-'),
            _ => {}
        }
        formatted.push(char::from(b'0' + digit % 10));
    }
    formatted
}

/// Returns `true` when `raw` holds eleven digits with matching check digits.
///
/// Formatting characters are ignored. Repeated-digit sequences such as
/// `111.111.111-11` pass the arithmetic but are rejected.
///
/// # Example
///
/// ```
/// use demo_users::is_valid_cpf;
///
/// assert!(is_valid_cpf("529.982.247-25"));
/// assert!(!is_valid_cpf("529.982.247-26"));
/// ```
pub fn is_valid_cpf(raw: &str) -> bool {
    let digits: Vec<u8> = raw
        .chars()
        .filter_map(|ch| ch.to_digit(10))
        .filter_map(|digit| u8::try_from(digit).ok())
        .collect();
    let Ok(digits) = <[u8; CPF_DIGITS]>::try_from(digits) else {
        return false;
    };
    if digits.iter().all(|digit| *digit == digits[0]) {
        return false;
    }
    let mut base = [0_u8; BASE_DIGITS];
    base.copy_from_slice(&digits[..BASE_DIGITS]);
    cpf_check_digits(&base) == [digits[9], digits[10]]
}
