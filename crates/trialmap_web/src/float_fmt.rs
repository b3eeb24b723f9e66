//! Float formatting for SVG coordinates and percentages.
//!
//! Floats are scaled and rounded into an `i64`, then formatted as integers, so
//! no `format!` of a float reaches the wasm build.

/// `v` with exactly `decimals` fractional digits. Non-finite values format as `"0"`
/// since they only ever end up in SVG attributes.
pub fn fmt_f64_fixed(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }

    let decimals = decimals.min(9);
    let scale = 10_i64.pow(decimals as u32);
    let scaled = (v * scale as f64).round();
    if scaled.abs() > i64::MAX as f64 {
        return "0".to_string();
    }

    let scaled = scaled as i64;
    let mut out = String::new();
    if scaled < 0 {
        out.push('-');
    }
    let abs = scaled.unsigned_abs();
    let scale = scale as u64;
    out.push_str(&(abs / scale).to_string());

    if decimals > 0 {
        let frac = (abs % scale).to_string();
        out.push('.');
        for _ in frac.len()..decimals {
            out.push('0');
        }
        out.push_str(&frac);
    }
    out
}
