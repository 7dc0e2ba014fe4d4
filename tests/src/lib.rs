//! Cross-crate tests: wound image → region statistics → fuzzy risk → stratum.

#[cfg(test)]
mod follow_up;
#[cfg(test)]
mod pipeline;
