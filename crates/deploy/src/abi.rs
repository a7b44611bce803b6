//! ABI encoding for the CryptoDevs constructor.

use alloy_primitives::{Address, Bytes};

/// Size of an ABI word in bytes.
const WORD: usize = 32;

/// ABI-encode the CryptoDevs constructor arguments.
///
/// Constructor: `(string metadataURL, address whitelistContractAddress)`.
/// Head: word 0 is the offset to the string tail (2 head words * 32 = 0x40),
/// word 1 the left-padded address. Tail: string length followed by the
/// UTF-8 bytes, right-padded to a word boundary.
pub fn encode_constructor_args(metadata_url: &str, whitelist_contract: &Address) -> Bytes {
    let data = metadata_url.as_bytes();
    let mut out = Vec::with_capacity(3 * WORD + data.len().next_multiple_of(WORD));

    out.extend_from_slice(&abi_word_u64(2 * WORD as u64));
    out.extend_from_slice(&abi_word_address(whitelist_contract));

    out.extend_from_slice(&abi_word_u64(data.len() as u64));
    out.extend_from_slice(data);
    let rem = data.len() % WORD;
    if rem != 0 {
        out.resize(out.len() + WORD - rem, 0);
    }

    out.into()
}

/// Full init code for a deployment transaction: the creation bytecode with
/// the encoded constructor arguments appended.
pub fn init_code(bytecode: &Bytes, constructor_args: &Bytes) -> Bytes {
    let mut out = Vec::with_capacity(bytecode.len() + constructor_args.len());
    out.extend_from_slice(bytecode);
    out.extend_from_slice(constructor_args);
    out.into()
}

fn abi_word_u64(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

fn abi_word_address(address: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 20..].copy_from_slice(address.as_slice());
    word
}
