use log::debug;

use crate::format::round_hundredths;
use crate::model::IngredientEntry;

/// Split a delimited ingredient field into structured entries.
///
/// Fragments are separated by commas or newlines. Each fragment must look
/// like `[amount][ws]<unit> <name>`, where the amount is an integer, decimal
/// or `a/b` fraction and the unit is a run of ASCII letters. Fragments of any
/// other shape are dropped. Output order follows input order.
pub fn parse_ingredient_line(raw: &str) -> Vec<IngredientEntry> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .filter_map(|fragment| {
            let entry = parse_fragment(fragment);
            if entry.is_none() {
                debug!("Dropping unparseable ingredient fragment: {:?}", fragment);
            }
            entry
        })
        .collect()
}

fn parse_fragment(fragment: &str) -> Option<IngredientEntry> {
    let quantity_end = fragment
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '/'))
        .unwrap_or(fragment.len());
    let (quantity, rest) = fragment.split_at(quantity_end);
    let rest = rest.trim_start();

    let unit_end = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    if unit_end == 0 {
        return None;
    }
    let (unit, rest) = rest.split_at(unit_end);

    // Unit and name must be separated by whitespace
    let mut chars = rest.chars();
    if !chars.next().is_some_and(char::is_whitespace) {
        return None;
    }
    let name = chars.as_str().trim();
    if name.is_empty() {
        return None;
    }

    let amount = if quantity.is_empty() {
        1.0
    } else {
        parse_amount(quantity).unwrap_or_else(|| {
            debug!("Unreadable amount {:?}, defaulting to 1", quantity);
            1.0
        })
    };

    Some(IngredientEntry {
        amount,
        unit: unit.to_string(),
        name: name.to_string(),
        formatted_amount: round_hundredths(amount).to_string(),
    })
}

/// Evaluate an amount token: `3`, `0.75`, `.5` or `1/2`.
pub fn parse_amount(token: &str) -> Option<f64> {
    let value = match token.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = parse_decimal(numerator)?;
            let denominator = parse_decimal(denominator)?;
            if denominator == 0.0 {
                return None;
            }
            numerator / denominator
        }
        None => parse_decimal(token)?,
    };
    value.is_finite().then_some(value)
}

fn parse_decimal(token: &str) -> Option<f64> {
    let well_formed = !token.is_empty()
        && token.chars().all(|c| c.is_ascii_digit() || c == '.')
        && token.chars().any(|c| c.is_ascii_digit())
        && token.matches('.').count() <= 1;
    if !well_formed {
        return None;
    }
    token.parse::<f64>().ok()
}
