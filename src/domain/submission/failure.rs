//! Mapping of raw submission errors to user-facing messages.

/// Substring (lowercase) to canned message; first match wins.
const KNOWN_FAILURES: &[(&str, &str)] = &[
    ("user rejected", "Transaction was rejected in the wallet"),
    ("insufficient funds", "Insufficient funds to cover the transaction and fees"),
    ("gas", "Gas estimation failed; check the form values and try again"),
    ("network", "Network error; check your connection and try again"),
    ("revert", "The contract reverted the transaction; check the form values"),
];

/// Message shown to the user for a failed submission.
pub fn user_message(raw: &str) -> String {
    let lower = raw.to_lowercase();
    KNOWN_FAILURES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, message)| (*message).to_string())
        .unwrap_or_else(|| raw.to_string())
}
