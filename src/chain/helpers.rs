use alloy_primitives::{Address, B256};

use crate::constants::{ADDRESS_LENGTH, WORD_LENGTH};

/// Decode an address from the first ABI word of a call result (left-padded with zeros).
///
/// Returns `None` when the output is shorter than one word or the padding is not zero.
pub fn decode_address_word(output: &[u8]) -> Option<Address> {
    let word = output.get(..WORD_LENGTH)?;
    let (padding, address) = word.split_at(WORD_LENGTH - ADDRESS_LENGTH);
    if padding.iter().any(|b| *b != 0) {
        return None;
    }
    Some(Address::from_slice(address))
}

/// Encode an address into an ABI word (left-padded).
pub fn encode_address_word(addr: Address) -> B256 {
    let mut bytes = [0u8; WORD_LENGTH];
    bytes[WORD_LENGTH - ADDRESS_LENGTH..].copy_from_slice(addr.as_slice());
    B256::from(bytes)
}
