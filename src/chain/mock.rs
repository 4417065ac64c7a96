use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use alloy_primitives::{Address, Bytes, U256};

use super::{encode_address_word, ChainClient};
use crate::errors::ChainClientError;
use crate::types::CallRequest;

/// In-memory chain that records every query it answers.
#[derive(Debug, Default)]
pub(crate) struct MockChainClient {
    balances: HashMap<Address, U256>,
    code: HashMap<Address, Bytes>,
    transaction_counts: HashMap<Address, u64>,
    call_output: Bytes,
    call_outputs_by_selector: HashMap<[u8; 4], Bytes>,
    gas_estimate: u64,
    failing: HashSet<&'static str>,
    calls: RefCell<Vec<&'static str>>,
    call_requests: RefCell<Vec<CallRequest>>,
}

impl MockChainClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_balance(mut self, address: Address, balance: U256) -> Self {
        self.balances.insert(address, balance);
        self
    }

    pub(crate) fn with_code(mut self, address: Address) -> Self {
        self.code.insert(address, Bytes::from_static(&[0x60, 0x80, 0x60, 0x40, 0x52]));
        self
    }

    pub(crate) fn with_transaction_count(mut self, address: Address, count: u64) -> Self {
        self.transaction_counts.insert(address, count);
        self
    }

    /// `eth_call` returns `address` as a single ABI word.
    pub(crate) fn with_simulated_address(mut self, address: Address) -> Self {
        self.call_output = Bytes::copy_from_slice(encode_address_word(address).as_slice());
        self
    }

    pub(crate) fn with_call_output(mut self, output: Bytes) -> Self {
        self.call_output = output;
        self
    }

    /// `eth_call` returns `output` when the call data starts with `selector`.
    pub(crate) fn with_call_output_for(mut self, selector: [u8; 4], output: Bytes) -> Self {
        self.call_outputs_by_selector.insert(selector, output);
        self
    }

    pub(crate) fn with_gas_estimate(mut self, gas: u64) -> Self {
        self.gas_estimate = gas;
        self
    }

    /// Make every request for `method` fail.
    pub(crate) fn failing(mut self, method: &'static str) -> Self {
        self.failing.insert(method);
        self
    }

    /// Method names of every query answered so far, in order.
    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    /// Requests passed to `eth_call` / `eth_estimateGas`, in order.
    pub(crate) fn call_requests(&self) -> Vec<CallRequest> {
        self.call_requests.borrow().clone()
    }

    fn record(&self, method: &'static str) -> Result<(), ChainClientError> {
        self.calls.borrow_mut().push(method);
        if self.failing.contains(method) {
            return Err(ChainClientError::Rpc {
                method,
                message: "connection reset".to_string(),
            });
        }
        Ok(())
    }
}

impl ChainClient for MockChainClient {
    fn get_balance(&self, address: Address) -> Result<U256, ChainClientError> {
        self.record("eth_getBalance")?;
        Ok(self.balances.get(&address).copied().unwrap_or_default())
    }

    fn get_code(&self, address: Address) -> Result<Bytes, ChainClientError> {
        self.record("eth_getCode")?;
        Ok(self.code.get(&address).cloned().unwrap_or_default())
    }

    fn get_transaction_count(&self, address: Address) -> Result<u64, ChainClientError> {
        self.record("eth_getTransactionCount")?;
        Ok(self.transaction_counts.get(&address).copied().unwrap_or_default())
    }

    fn call(&self, request: &CallRequest) -> Result<Bytes, ChainClientError> {
        self.record("eth_call")?;
        self.call_requests.borrow_mut().push(request.clone());
        let output = request
            .data
            .get(..4)
            .and_then(|selector| <[u8; 4]>::try_from(selector).ok())
            .and_then(|selector| self.call_outputs_by_selector.get(&selector))
            .unwrap_or(&self.call_output);
        Ok(output.clone())
    }

    fn estimate_gas(&self, request: &CallRequest) -> Result<u64, ChainClientError> {
        self.record("eth_estimateGas")?;
        self.call_requests.borrow_mut().push(request.clone());
        Ok(self.gas_estimate)
    }
}
