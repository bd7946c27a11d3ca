#![no_std]

multiversx_sc::imports!();

pub mod funding_source_proxy;
pub mod recipient_registry_proxy;
pub mod tally_proxy;
pub mod types;

use types::RoundState;

// ============================================================
// Constants
// ============================================================

/// Token units per voice credit: 1 voice credit per 10^-5 EGLD
/// (EGLD has 18 decimals).
pub const VOICE_CREDIT_FACTOR: u64 = 10_000_000_000_000;

/// Fixed-point precision of the alpha scalar.
pub const ALPHA_PRECISION: u64 = 1_000_000_000_000_000_000;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait FundingRound {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, tally_address: ManagedAddress, recipient_registry_address: ManagedAddress) {
        self.tally_address().set(&tally_address);
        self.recipient_registry_address().set(&recipient_registry_address);
        self.round_state().set(RoundState::Active);
        self.total_contributions().set(BigUint::zero());
        self.contributor_count().set(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: contribute
    // One deposit per address; deposits convert to voice credits
    // at VOICE_CREDIT_FACTOR. Signup with the voting protocol
    // happens against the external contracts, not here.
    // ========================================================

    #[endpoint(contribute)]
    #[payable("EGLD")]
    fn contribute(&self) {
        let state = self.round_state().get();
        require!(state != RoundState::Cancelled, "Round has been cancelled");
        require!(state != RoundState::Finalized, "Already finalized");

        let caller = self.blockchain().get_caller();
        let payment_amount = self.call_value().egld_value().clone_value();

        require!(
            self.contribution(&caller).is_empty(),
            "Already contributed"
        );

        let voice_credits = &payment_amount / VOICE_CREDIT_FACTOR;
        require!(voice_credits > 0u64, "Contribution too small");

        self.contribution(&caller).set(&payment_amount);
        self.total_contributions()
            .update(|total| *total += &payment_amount);
        self.contributor_count().update(|count| *count += 1);

        self.contribution_event(&caller, &payment_amount, &voice_credits);
    }

    // ========================================================
    // ENDPOINT: withdrawContribution
    // Refund path, only meaningful after cancellation. The ledger
    // entry is cleared before the transfer, so a reentrant call
    // sees zero.
    // ========================================================

    #[endpoint(withdrawContribution)]
    fn withdraw_contribution(&self) -> BigUint {
        require!(
            self.round_state().get() == RoundState::Cancelled,
            "Round has not been cancelled"
        );

        let caller = self.blockchain().get_caller();
        let amount = self.contribution(&caller).take();
        if amount > 0u64 {
            self.total_contributions()
                .update(|total| *total -= &amount);
            self.send().direct_egld(&caller, &amount);
            self.contribution_withdrawn_event(&caller, &amount);
        }
        amount
    }

    // ========================================================
    // ENDPOINT: addFundingSource
    // Registers a matching-pool source. Append-only: sources are
    // pulled in registration order at finalization and never
    // removed.
    // ========================================================

    #[only_owner]
    #[endpoint(addFundingSource)]
    fn add_funding_source(&self, source: ManagedAddress) {
        let added = self.funding_sources().insert(source.clone());
        require!(added, "Funding source already added");

        self.funding_source_added_event(&source);
    }

    // ========================================================
    // ENDPOINT: cancel
    // Aborts the round and unlocks contribution refunds. Mutually
    // exclusive with finalization.
    // ========================================================

    #[only_owner]
    #[endpoint(cancel)]
    fn cancel(&self) {
        let state = self.round_state().get();
        require!(state != RoundState::Finalized, "Already finalized");
        require!(state != RoundState::Cancelled, "Round has been cancelled");

        self.round_state().set(RoundState::Cancelled);

        self.round_cancelled_event();
    }

    // ========================================================
    // ENDPOINT: finalize
    // Verifies the total spent voice credits against the tally
    // contract, pulls matching funds and fixes alpha. One-shot.
    // ========================================================

    #[only_owner]
    #[endpoint(finalize)]
    fn finalize(
        &self,
        total_spent: BigUint,
        total_spent_salt: BigUint,
        results_commitment: BigUint,
        per_vo_spent_commitment: BigUint,
    ) {
        self.require_can_finalize();
        require!(
            self.is_ballots_tallied(),
            "Ballots have not been tallied"
        );
        require!(total_spent > 0u64, "No votes");

        let tally_addr = self.tally_address().get();
        let verified: bool = self
            .tx()
            .to(&tally_addr)
            .typed(tally_proxy::TallyProxy)
            .verify_spent_voice_credits(
                total_spent.clone(),
                total_spent_salt,
                results_commitment,
                per_vo_spent_commitment,
            )
            .returns(ReturnsResult)
            .sync_call_readonly();
        require!(verified, "Incorrect spent voice credits proof");

        self.finalize_round(total_spent);
    }

    // ========================================================
    // ENDPOINT: claimFunds
    // Pays a recipient's quadratic allocation after finalization.
    // The claim flag is set before the transfer. An unassigned
    // (zero) registry slot routes the amount back to the round
    // authority.
    // ========================================================

    #[endpoint(claimFunds)]
    fn claim_funds(
        &self,
        recipient_index: u64,
        spent: BigUint,
        proof: ManagedVec<BigUint>,
        spent_salt: BigUint,
        results_commitment: BigUint,
        spent_voice_credits_commitment: BigUint,
    ) {
        let state = self.round_state().get();
        require!(state != RoundState::Cancelled, "Round has been cancelled");
        require!(state == RoundState::Finalized, "Round not finalized");

        let vote_option_tree_depth = self.vote_option_tree_depth();
        let tally_addr = self.tally_address().get();
        let verified: bool = self
            .tx()
            .to(&tally_addr)
            .typed(tally_proxy::TallyProxy)
            .verify_per_vo_spent_voice_credits(
                recipient_index,
                spent.clone(),
                proof,
                spent_salt,
                vote_option_tree_depth,
                spent_voice_credits_commitment,
                results_commitment,
            )
            .returns(ReturnsResult)
            .sync_call_readonly();
        require!(verified, "Incorrect per-VO spent voice credits proof");

        let registry_addr = self.recipient_registry_address().get();
        let recipient: ManagedAddress = self
            .tx()
            .to(&registry_addr)
            .typed(recipient_registry_proxy::RecipientRegistryProxy)
            .get_recipient(recipient_index)
            .returns(ReturnsResult)
            .sync_call_readonly();

        self.settle_claim(recipient_index, recipient, spent);
    }

    // ========================================================
    // INTERNAL: finalization
    // ========================================================

    fn require_can_finalize(&self) {
        let state = self.round_state().get();
        require!(state != RoundState::Cancelled, "Round has been cancelled");
        require!(state != RoundState::Finalized, "Already finalized");
    }

    /// Settlement half of finalize, after the tally proofs check out.
    /// Pulls matching funds, snapshots the budget and derives alpha
    /// from it. The budget snapshot and the pulled funds are the same
    /// transaction, so they cannot diverge.
    fn finalize_round(&self, total_spent: BigUint) {
        self.require_can_finalize();
        require!(total_spent > 0u64, "No votes");

        self.pull_matching_funds();

        let budget = self
            .blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0);
        let total_votes_squares = &total_spent * &total_spent;
        let alpha = self.compute_alpha(&budget, &total_votes_squares, &total_spent);

        let contributions = &total_spent * VOICE_CREDIT_FACTOR;
        let matching_pool_size = budget - contributions;

        self.total_spent().set(&total_spent);
        self.matching_pool_size().set(&matching_pool_size);
        self.alpha().set(&alpha);
        self.round_state().set(RoundState::Finalized);

        self.round_finalized_event(&total_spent, &matching_pool_size, &alpha);
    }

    /// Settlement half of claimFunds, after proof verification and
    /// recipient resolution. Claim flag first, transfer last.
    fn settle_claim(&self, recipient_index: u64, recipient: ManagedAddress, spent: BigUint) {
        require!(
            !self.recipient_claimed(&recipient).get(),
            "Funds already claimed"
        );
        self.recipient_claimed(&recipient).set(true);

        let allocated = self.allocated_amount(&self.alpha().get(), &spent);

        let payout_target = if recipient.is_zero() {
            // Unassigned slot: residual goes back to the round authority.
            self.blockchain().get_owner_address()
        } else {
            recipient.clone()
        };

        if allocated > 0u64 {
            self.send().direct_egld(&payout_target, &allocated);
        }
        self.funds_claimed_event(recipient_index, &recipient, &allocated);
    }

    // ========================================================
    // INTERNAL: quadratic funding arithmetic
    // ========================================================

    /// Capital-constraint scaling factor:
    ///
    ///   alpha = (budget - totalSpent*F) * P / (F * (totalVotesSquares - totalSpent))
    ///
    /// Truncating division biases every payout down, so the claims in
    /// aggregate can never exceed the budget.
    fn compute_alpha(
        &self,
        budget: &BigUint,
        total_votes_squares: &BigUint,
        total_spent: &BigUint,
    ) -> BigUint {
        let contributions = total_spent * VOICE_CREDIT_FACTOR;
        require!(budget >= &contributions, "Invalid budget");
        require!(
            total_votes_squares > total_spent,
            "No project has more than one vote"
        );

        let quadratic_votes = total_votes_squares - total_spent;
        ((budget - &contributions) * ALPHA_PRECISION) / (quadratic_votes * VOICE_CREDIT_FACTOR)
    }

    /// Payout for one recipient:
    ///
    ///   amount = (alpha * spent^2 + (1 - alpha) * spent) * F / P
    ///
    /// rearranged so both accumulations stay non-negative before the
    /// subtraction. BigUint subtraction signals an error on underflow
    /// rather than wrapping.
    fn allocated_amount(&self, alpha: &BigUint, spent: &BigUint) -> BigUint {
        let linear_scaled = (alpha * VOICE_CREDIT_FACTOR) * spent;
        let quadratic = &linear_scaled * spent;
        let linear_full = (BigUint::from(ALPHA_PRECISION) * VOICE_CREDIT_FACTOR) * spent;

        (quadratic + linear_full - linear_scaled) / ALPHA_PRECISION
    }

    // ========================================================
    // INTERNAL: matching pool accumulator
    // ========================================================

    /// Pulls min(pledged, balance) from every registered source, in
    /// registration order. A source that cannot deliver fails the
    /// whole transaction, so fund movement is all-or-nothing.
    fn pull_matching_funds(&self) {
        let own_address = self.blockchain().get_sc_address();
        for source in self.funding_sources().iter() {
            let pledged: BigUint = self
                .tx()
                .to(&source)
                .typed(funding_source_proxy::FundingSourceProxy)
                .get_pledged_amount(own_address.clone())
                .returns(ReturnsResult)
                .sync_call_readonly();
            let available: BigUint = self
                .tx()
                .to(&source)
                .typed(funding_source_proxy::FundingSourceProxy)
                .get_pledge_balance()
                .returns(ReturnsResult)
                .sync_call_readonly();

            let amount = core::cmp::min(pledged, available);
            if amount > 0u64 {
                self.tx()
                    .to(&source)
                    .typed(funding_source_proxy::FundingSourceProxy)
                    .claim_pledge(amount)
                    .sync_call();
            }
        }
    }

    // ========================================================
    // INTERNAL: tally oracle reads
    // ========================================================

    fn is_ballots_tallied(&self) -> bool {
        let tally_addr = self.tally_address().get();
        self.tx()
            .to(&tally_addr)
            .typed(tally_proxy::TallyProxy)
            .is_tallied()
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    fn vote_option_tree_depth(&self) -> u32 {
        let tally_addr = self.tally_address().get();
        let depths: MultiValue4<u32, u32, u32, u32> = self
            .tx()
            .to(&tally_addr)
            .typed(tally_proxy::TallyProxy)
            .get_tree_depths()
            .returns(ReturnsResult)
            .sync_call_readonly();
        let (_state_depth, _message_sub_depth, _message_depth, vote_option_depth) =
            depths.into_tuple();
        vote_option_depth
    }

    // ========================================================
    // VIEWS — read-only queries
    // ========================================================

    #[view(getRoundState)]
    fn get_round_state(&self) -> RoundState {
        let state = self.round_state().get();
        if state == RoundState::Active && self.is_ballots_tallied() {
            return RoundState::Tallied;
        }
        state
    }

    /// Matching funds available right now: own balance net of
    /// outstanding contributions, plus whatever each registered source
    /// has both pledged and can deliver.
    #[view(getMatchingFunds)]
    fn get_matching_funds(&self) -> BigUint {
        let own_address = self.blockchain().get_sc_address();
        let balance = self
            .blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0);
        let outstanding = self.total_contributions().get();

        let mut total = if balance > outstanding {
            balance - outstanding
        } else {
            BigUint::zero()
        };
        for source in self.funding_sources().iter() {
            let pledged: BigUint = self
                .tx()
                .to(&source)
                .typed(funding_source_proxy::FundingSourceProxy)
                .get_pledged_amount(own_address.clone())
                .returns(ReturnsResult)
                .sync_call_readonly();
            let available: BigUint = self
                .tx()
                .to(&source)
                .typed(funding_source_proxy::FundingSourceProxy)
                .get_pledge_balance()
                .returns(ReturnsResult)
                .sync_call_readonly();
            total += core::cmp::min(pledged, available);
        }
        total
    }

    /// Estimated payout for `spent` voice credits against the stored
    /// alpha. Before finalization alpha is zero and the estimate
    /// degenerates to the linear amount.
    #[view(getAllocatedAmount)]
    fn get_allocated_amount(&self, spent: BigUint) -> BigUint {
        self.allocated_amount(&self.alpha().get(), &spent)
    }

    #[view(getContribution)]
    fn get_contribution(&self, contributor: &ManagedAddress) -> BigUint {
        self.contribution(contributor).get()
    }

    #[view(getVoiceCredits)]
    fn get_voice_credits(&self, contributor: &ManagedAddress) -> BigUint {
        self.contribution(contributor).get() / VOICE_CREDIT_FACTOR
    }

    #[view(hasClaimedFunds)]
    fn has_claimed_funds(&self, recipient: &ManagedAddress) -> bool {
        self.recipient_claimed(recipient).get()
    }

    #[view(getFundingSources)]
    fn get_funding_sources(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for source in self.funding_sources().iter() {
            result.push(source);
        }
        result
    }

    #[view(getTotalContributions)]
    fn get_total_contributions(&self) -> BigUint {
        self.total_contributions().get()
    }

    #[view(getRoundInfo)]
    fn get_round_info(&self) -> MultiValue4<BigUint, BigUint, BigUint, u64> {
        (
            self.total_spent().get(),
            self.matching_pool_size().get(),
            self.alpha().get(),
            self.contributor_count().get(),
        )
            .into()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("contribution")]
    fn contribution_event(
        &self,
        #[indexed] contributor: &ManagedAddress,
        #[indexed] amount: &BigUint,
        voice_credits: &BigUint,
    );

    #[event("contributionWithdrawn")]
    fn contribution_withdrawn_event(
        &self,
        #[indexed] contributor: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("fundingSourceAdded")]
    fn funding_source_added_event(&self, #[indexed] source: &ManagedAddress);

    #[event("roundFinalized")]
    fn round_finalized_event(
        &self,
        #[indexed] total_spent: &BigUint,
        #[indexed] matching_pool_size: &BigUint,
        alpha: &BigUint,
    );

    #[event("roundCancelled")]
    fn round_cancelled_event(&self);

    #[event("fundsClaimed")]
    fn funds_claimed_event(
        &self,
        #[indexed] recipient_index: u64,
        #[indexed] recipient: &ManagedAddress,
        amount: &BigUint,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Configuration ──

    #[storage_mapper("tallyAddress")]
    fn tally_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("recipientRegistryAddress")]
    fn recipient_registry_address(&self) -> SingleValueMapper<ManagedAddress>;

    // ── Round state ──

    #[storage_mapper("roundState")]
    fn round_state(&self) -> SingleValueMapper<RoundState>;

    #[storage_mapper("totalSpent")]
    fn total_spent(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("matchingPoolSize")]
    fn matching_pool_size(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("alpha")]
    fn alpha(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("fundingSources")]
    fn funding_sources(&self) -> SetMapper<ManagedAddress>;

    // ── Contribution ledger ──

    #[storage_mapper("contribution")]
    fn contribution(&self, contributor: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("totalContributions")]
    fn total_contributions(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("contributorCount")]
    fn contributor_count(&self) -> SingleValueMapper<u64>;

    // ── Claim ledger ──

    #[storage_mapper("recipientClaimed")]
    fn recipient_claimed(&self, recipient: &ManagedAddress) -> SingleValueMapper<bool>;
}
