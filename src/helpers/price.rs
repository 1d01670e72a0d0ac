use serde_json::Value;

const PRICE_SIGN: &str = "R$";

/// Maps the upstream price tier to a display string. Level 1 already renders
/// two signs; that offset is part of the existing frontend contract.
pub fn to_price_signs(price_level: Option<&Value>) -> String {
    let level = match price_level {
        Some(Value::Number(number)) => number.as_i64(),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    match level {
        None => String::new(),
        Some(level) if level <= 0 => PRICE_SIGN.to_string(),
        Some(level) => PRICE_SIGN.repeat(level.saturating_add(1).min(5) as usize),
    }
}
