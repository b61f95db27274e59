use std::error::Error;

use crate::policies::{HeuristicPolicy, RandomPolicy};
use crate::policy::Policy;

/// Returns a normalized label for a policy spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Create a policy from a CLI-style spec.
/// Supported specs:
/// - heuristic[:wild_bias]
/// - greedy
/// - random
pub fn create_policy_from_spec(spec: &str) -> Result<Box<dyn Policy>, Box<dyn Error>> {
    match label_for_spec(spec).as_str() {
        "heuristic" => {
            let bias = match spec.split_once(':') {
                Some((_, value)) => {
                    let bias = value
                        .trim()
                        .parse::<f64>()
                        .map_err(|_| format!("invalid wild bias in policy spec: {spec}"))?;
                    if !(0.0..=1.0).contains(&bias) {
                        return Err(format!("wild bias must be within 0..=1: {spec}").into());
                    }
                    bias
                }
                None => crate::policies::heuristic::DEFAULT_WILD_BIAS,
            };
            Ok(Box::new(HeuristicPolicy::with_wild_bias(bias)))
        }
        "greedy" => Ok(Box::new(HeuristicPolicy::with_wild_bias(0.0))),
        "random" => Ok(Box::new(RandomPolicy::new())),
        _ => Err(format!("unrecognized policy spec: {spec}").into()),
    }
}
