use rand::Rng;

const INVOICE_PREFIX: &str = "INV-";
const INVOICE_SUFFIX_LEN: usize = 6;

/// Primary keys for every table.
pub fn generate_id() -> String {
    nanoid::nanoid!()
}

/// Random uppercase hex string of `len` characters.
pub fn random_hex(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let nibble: u32 = rng.gen_range(0..16);
            std::char::from_digit(nibble, 16)
                .unwrap_or('0')
                .to_ascii_uppercase()
        })
        .collect()
}

/// `INV-` followed by six uppercase hex characters.
pub fn generate_invoice_number() -> String {
    format!("{}{}", INVOICE_PREFIX, random_hex(INVOICE_SUFFIX_LEN))
}

pub fn is_invoice_number(value: &str) -> bool {
    match value.strip_prefix(INVOICE_PREFIX) {
        Some(suffix) => {
            suffix.len() == INVOICE_SUFFIX_LEN
                && suffix
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_number_format() {
        for _ in 0..100 {
            let invoice = generate_invoice_number();
            assert!(is_invoice_number(&invoice), "bad invoice number {}", invoice);
            assert!(invoice.len() <= 20);
        }
    }

    #[test]
    fn rejects_foreign_formats() {
        assert!(!is_invoice_number("INV-abc123"));
        assert!(!is_invoice_number("INV-ABC12"));
        assert!(!is_invoice_number("INX-ABC123"));
        assert!(is_invoice_number("INV-0F9A1C"));
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }
}
