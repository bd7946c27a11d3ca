use multiversx_sc::proxy_imports::*;

pub struct FundingSourceProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for FundingSourceProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = FundingSourceProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        FundingSourceProxyMethods { wrapped_tx: tx }
    }
}

pub struct FundingSourceProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, To, Gas> FundingSourceProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    /// Amount the source has pledged to the given beneficiary round.
    pub fn get_pledged_amount<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        beneficiary: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getPledgedAmount")
            .argument(&beneficiary)
            .original_result()
    }

    /// Liquid EGLD the source can actually send.
    pub fn get_pledge_balance(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getPledgeBalance")
            .original_result()
    }

    /// Pull `amount` EGLD from the source to the caller. The source must
    /// send the exact amount or fail the whole transaction.
    pub fn claim_pledge<Arg0: ProxyArg<BigUint<Env::Api>>>(
        self,
        amount: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("claimPledge")
            .argument(&amount)
            .original_result()
    }
}
