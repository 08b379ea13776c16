//! Numeric rules for deriving bridge parameters.

/// Minimum account-creation amounts for a `(locking, issuing)` pair of chain reserves.
///
/// The amounts are crossed: a cross-chain account creation submitted on one chain creates the
/// account on the *other* chain, so it must cover that chain's reserve.
pub fn account_create_amounts(reserves: (u64, u64)) -> (String, String) {
    (reserves.1.to_string(), reserves.0.to_string())
}
