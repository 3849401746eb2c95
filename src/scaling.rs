use std::fmt;

use crate::error::AdjustError;
use crate::format::{round_hundredths, to_mixed_fraction_with_precision, DEFAULT_PRECISION};
use crate::model::{Cell, IngredientEntry};

/// Reference serving count that dataset quantities are written for
pub const BASE_SERVINGS: u32 = 2;

/// How an ingredient's quantity responds to a change in servings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingClass {
    /// Proportional to servings
    Linear,
    /// Grows with the logarithm of servings (strong flavourings)
    Logarithmic,
    /// Same quantity for any batch size (whole spices)
    Fixed,
}

impl ScalingClass {
    /// Multiplier applied to a base-servings amount
    pub fn factor(self, requested: u32, base: u32) -> f64 {
        if requested == 0 {
            return match self {
                ScalingClass::Fixed => 1.0,
                _ => 0.0,
            };
        }
        let requested = f64::from(requested);
        let base = f64::from(base);
        match self {
            ScalingClass::Fixed => 1.0,
            ScalingClass::Logarithmic => requested.ln() / base.ln(),
            ScalingClass::Linear => requested / base,
        }
    }
}

/// A keyword set and the scaling class it selects
#[derive(Debug, Clone, Copy)]
pub struct ScalingRule {
    pub class: ScalingClass,
    pub keywords: &'static [&'static str],
}

/// Rules in precedence order; the first rule with a keyword contained in the
/// lowercased ingredient name wins.
pub const SCALING_RULES: &[ScalingRule] = &[
    ScalingRule {
        class: ScalingClass::Fixed,
        keywords: &[
            "cardamom",
            "cloves",
            "cinnamon",
            "bay leaf",
            "mustard",
            "curry leaves",
        ],
    },
    ScalingRule {
        class: ScalingClass::Logarithmic,
        keywords: &["salt", "spice", "turmeric", "chilli", "pepper", "masala"],
    },
    ScalingRule {
        class: ScalingClass::Linear,
        keywords: &[
            "rice", "flour", "water", "milk", "oil", "ghee", "sugar", "jaggery", "coconut", "curd",
        ],
    },
];

/// Scaling class for an ingredient name; unknown ingredients scale linearly.
pub fn classify(name: &str) -> ScalingClass {
    let name = name.to_lowercase();
    SCALING_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| name.contains(k)))
        .map(|rule| rule.class)
        .unwrap_or(ScalingClass::Linear)
}

/// Cooking time after scaling, or `N/A` when the source was not numeric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaledTime {
    Minutes(i64),
    NotAvailable,
}

impl fmt::Display for ScaledTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaledTime::Minutes(m) => write!(f, "{}", m),
            ScaledTime::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl From<ScaledTime> for Cell {
    fn from(time: ScaledTime) -> Self {
        match time {
            ScaledTime::Minutes(m) => Cell::Number(m as f64),
            ScaledTime::NotAvailable => Cell::Text("N/A".to_string()),
        }
    }
}

/// Applies the scaling rules against a fixed base serving count
#[derive(Debug, Clone, Copy)]
pub struct ScalingEngine {
    base_servings: u32,
    precision: f64,
}

impl Default for ScalingEngine {
    fn default() -> Self {
        Self {
            base_servings: BASE_SERVINGS,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl ScalingEngine {
    /// Engine for a custom base; below 2 the logarithmic rule is undefined.
    pub fn new(base_servings: u32) -> Result<Self, AdjustError> {
        if base_servings < 2 {
            return Err(AdjustError::InvalidBaseServings(base_servings));
        }
        Ok(Self {
            base_servings,
            ..Self::default()
        })
    }

    /// Fraction resolution used for `formatted_amount`
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    pub fn base_servings(&self) -> u32 {
        self.base_servings
    }

    /// Rescale one entry. The amount is rounded to hundredths while the
    /// display string is derived from the unrounded value.
    pub fn scale_ingredient(&self, entry: &IngredientEntry, requested: u32) -> IngredientEntry {
        let class = classify(&entry.name);
        let scaled = entry.amount * class.factor(requested, self.base_servings);
        IngredientEntry {
            amount: round_hundredths(scaled),
            formatted_amount: to_mixed_fraction_with_precision(scaled, self.precision),
            ..entry.clone()
        }
    }

    /// Linear scaling of a cooking time, rounded half-to-even to whole minutes
    pub fn scale_cooking_time(&self, time: &Cell, requested: u32) -> ScaledTime {
        time.as_number()
            .map(|t| (t * (f64::from(requested) / f64::from(self.base_servings))).round_ties_even())
            .filter(|t| t.is_finite() && t.abs() < i64::MAX as f64)
            .map(|t| ScaledTime::Minutes(t as i64))
            .unwrap_or(ScaledTime::NotAvailable)
    }
}
