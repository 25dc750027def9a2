use tokenbridge_primitives::{
    mapping::{TokenMapping, TokenMappingEntry},
    receipt::{ReceiptId, ReceiptRecord},
    standard::TokenMetadata,
    Address, U256,
};

pub fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

pub fn fungible_entry(foreign: u8, local: u8) -> TokenMappingEntry {
    TokenMappingEntry::active(TokenMapping::new(
        addr(foreign),
        addr(local),
        TokenMetadata::fungible("Wrapped Token", "WTK", 18),
        1_700_000_000_000,
    ))
}

pub fn nft_entry(foreign: u8, local: u8) -> TokenMappingEntry {
    TokenMappingEntry::active(TokenMapping::new(
        addr(foreign),
        addr(local),
        TokenMetadata::non_fungible("Wrapped Art", "WART", Some("ipfs://art/".to_owned())),
        1_700_000_000_000,
    ))
}

pub fn receipt(local: u8, id: &str, instance_id: Option<u64>, amount: u64) -> ReceiptRecord {
    ReceiptRecord {
        receipt_id: ReceiptId::from(id),
        local_token: addr(local),
        instance_id: instance_id.map(U256::from),
        amount: U256::from(amount),
        consumed_at: 1_700_000_000_500,
    }
}
