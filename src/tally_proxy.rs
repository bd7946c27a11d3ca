use multiversx_sc::proxy_imports::*;

pub struct TallyProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for TallyProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = TallyProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        TallyProxyMethods { wrapped_tx: tx }
    }
}

pub struct TallyProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, To, Gas> TallyProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn is_tallied(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("isTallied")
            .original_result()
    }

    pub fn verify_spent_voice_credits<
        Arg0: ProxyArg<BigUint<Env::Api>>,
        Arg1: ProxyArg<BigUint<Env::Api>>,
        Arg2: ProxyArg<BigUint<Env::Api>>,
        Arg3: ProxyArg<BigUint<Env::Api>>,
    >(
        self,
        total_spent: Arg0,
        salt: Arg1,
        results_commitment: Arg2,
        per_vo_spent_commitment: Arg3,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("verifySpentVoiceCredits")
            .argument(&total_spent)
            .argument(&salt)
            .argument(&results_commitment)
            .argument(&per_vo_spent_commitment)
            .original_result()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn verify_per_vo_spent_voice_credits<
        Arg0: ProxyArg<u64>,
        Arg1: ProxyArg<BigUint<Env::Api>>,
        Arg2: ProxyArg<ManagedVec<Env::Api, BigUint<Env::Api>>>,
        Arg3: ProxyArg<BigUint<Env::Api>>,
        Arg4: ProxyArg<u32>,
        Arg5: ProxyArg<BigUint<Env::Api>>,
        Arg6: ProxyArg<BigUint<Env::Api>>,
    >(
        self,
        vote_option_index: Arg0,
        spent: Arg1,
        proof: Arg2,
        salt: Arg3,
        vote_option_tree_depth: Arg4,
        spent_commitment: Arg5,
        results_commitment: Arg6,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("verifyPerVOSpentVoiceCredits")
            .argument(&vote_option_index)
            .argument(&spent)
            .argument(&proof)
            .argument(&salt)
            .argument(&vote_option_tree_depth)
            .argument(&spent_commitment)
            .argument(&results_commitment)
            .original_result()
    }

    pub fn get_tree_depths(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, MultiValue4<u32, u32, u32, u32>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getTreeDepths")
            .original_result()
    }
}
