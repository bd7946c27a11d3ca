multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Round State — lifecycle states
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub enum RoundState {
    /// Voting period. Contributions accepted, ballots not yet tallied.
    Active,
    /// The tally contract has processed all ballots. Derived from the
    /// tally oracle on read, never written to storage.
    Tallied,
    /// Round aborted by the authority. Contributions refundable. Terminal.
    Cancelled,
    /// Matching funds pulled, alpha fixed, claims open. Terminal.
    Finalized,
}
