//! Display masks for Brazilian documents.
//!
//! Counterpart of [`crate::validate`]: these take already-validated values and
//! render them the way forms and lists display them. Inputs with unexpected
//! digit counts come back unchanged.

use crate::validate::strip_non_digits;

/// `52998224725` → `529.982.247-25`.
pub fn format_cpf(cpf: &str) -> String {
    let d = strip_non_digits(cpf);
    if d.len() != 11 {
        return cpf.to_string();
    }
    format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..])
}

/// `11912345678` → `(11) 91234-5678`; `1131234567` → `(11) 3123-4567`.
pub fn format_phone(phone: &str) -> String {
    let d = strip_non_digits(phone);
    match d.len() {
        11 => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
        10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => phone.to_string(),
    }
}

/// `01310100` → `01310-100`.
pub fn format_zip(zip: &str) -> String {
    let d = strip_non_digits(zip);
    if d.len() != 8 {
        return zip.to_string();
    }
    format!("{}-{}", &d[..5], &d[5..])
}
