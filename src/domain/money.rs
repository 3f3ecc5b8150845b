//! Fixed currency policy for everything the shop shows a customer: whole
//! pesos, dot-grouped thousands, "$ " prefix (the es-AR convention).

/// Coerce NaN/infinite amounts to zero so sums always stay renderable.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Render an amount in the shop's format, e.g. `20000.0` -> `"$ 20.000"`.
pub fn format_ars(amount: f64) -> String {
    let pesos = sanitize_amount(amount).round() as i64;
    let digits = pesos.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if pesos < 0 {
        format!("-$ {grouped}")
    } else {
        format!("$ {grouped}")
    }
}
