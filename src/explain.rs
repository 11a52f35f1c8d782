//! Natural-language explanations.

use std::cmp::Ordering;

use crate::classify::Label;
use crate::features::{Factor, Impact};

pub const ERROR_EXPLANATION: &str = "Unable to analyze the text due to an error.";

/// Up to `n` factors of one impact, highest score first. Ties keep
/// extraction order.
fn top(factors: &[Factor], impact: Impact, n: usize) -> Vec<&Factor> {
    let mut picked: Vec<&Factor> = factors.iter().filter(|f| f.impact == impact).collect();
    picked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    picked.truncate(n);
    picked
}

fn joined_names(factors: &[&Factor]) -> String {
    factors
        .iter()
        .map(|f| f.name.to_lowercase())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render(label: Label, confidence: f64, factors: &[Factor]) -> String {
    let mut explanation = match label {
        Label::Error => return ERROR_EXPLANATION.to_string(),
        Label::Fake => format!("This text appears to be fake news with {confidence:.1}% confidence."),
        Label::Real => {
            format!("This text appears to be legitimate news with {confidence:.1}% confidence.")
        }
        Label::Inconclusive => {
            format!("The analysis is inconclusive with {confidence:.1}% confidence.")
        }
    };

    let concerns = top(factors, Impact::Negative, 2);
    if !concerns.is_empty() {
        explanation.push_str(&format!(" Key concerns include {}.", joined_names(&concerns)));
    }
    let positives = top(factors, Impact::Positive, 1);
    if !positives.is_empty() {
        explanation.push_str(&format!(
            " Positive indicators include {}.",
            joined_names(&positives)
        ));
    }
    explanation
}
