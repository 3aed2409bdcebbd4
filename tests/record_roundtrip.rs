//! Record round-trip tests
//!
//! `TokenData` mirrors a packed wire record (contract address, chain id,
//! risk scores, timestamps) and exercises every field kind the marshal
//! supports.
//!
//! Usage:
//!   cargo test --test record_roundtrip

use bytemarshal::codec::{self, Endianness, StringEncoding};
use bytemarshal::{Field, FieldReader, FieldWriter, Marshal, MarshalConfig, Packing, Record, Result};
use proptest::prelude::*;

/// Token analysis record.
#[derive(Debug, Clone, PartialEq)]
struct TokenData {
    contract_address: [u8; 32],
    chain_id: u32,
    risk_score: u8,
    honeypot: bool,
    buy_tax: u16,
    sell_tax: u16,
    analysis_timestamp_ns: u64,
    liquidity_usd: f64,
    holder_count: i32,
    symbol: String,
}

const TOKEN_DATA_SIZE: usize = 32 + 4 + 1 + 1 + 2 + 2 + 8 + 8 + 4 + 12;

impl Record for TokenData {
    const FIELDS: &'static [Field] = &[
        Field::bytes("contract_address", 32),
        Field::u32("chain_id"),
        Field::u8("risk_score"),
        Field::bool("honeypot"),
        Field::u16("buy_tax"),
        Field::u16("sell_tax"),
        Field::u64("analysis_timestamp_ns"),
        Field::f64("liquidity_usd"),
        Field::i32("holder_count"),
        Field::text("symbol", 12),
    ];

    fn write_fields(&self, out: &mut FieldWriter<'_>) -> Result<()> {
        out.put_bytes(&self.contract_address)?;
        out.put(self.chain_id)?;
        out.put(self.risk_score)?;
        out.put(self.honeypot)?;
        out.put(self.buy_tax)?;
        out.put(self.sell_tax)?;
        out.put(self.analysis_timestamp_ns)?;
        out.put(self.liquidity_usd)?;
        out.put(self.holder_count)?;
        out.put_text(&self.symbol)
    }

    fn read_fields(input: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            contract_address: input.get_array()?,
            chain_id: input.get()?,
            risk_score: input.get()?,
            honeypot: input.get()?,
            buy_tax: input.get()?,
            sell_tax: input.get()?,
            analysis_timestamp_ns: input.get()?,
            liquidity_usd: input.get()?,
            holder_count: input.get()?,
            symbol: input.get_text()?,
        })
    }
}

impl TokenData {
    fn sample(seed: u64) -> Self {
        let mut hash = seed;
        for _ in 0..10 {
            hash = hash.wrapping_mul(6364136223846793005).wrapping_add(1);
        }

        let mut contract_address = [0u8; 32];
        for (i, byte) in contract_address.iter_mut().enumerate() {
            *byte = (hash >> (i % 8 * 8)) as u8;
        }

        Self {
            contract_address,
            chain_id: [1, 8453, 501][(hash % 3) as usize],
            risk_score: (hash % 100) as u8,
            honeypot: hash % 10 < 2,
            buy_tax: ((hash >> 8) % 30) as u16,
            sell_tax: ((hash >> 16) % 50) as u16,
            analysis_timestamp_ns: hash >> 1,
            liquidity_usd: (hash % 1_000_000) as f64 * 100.25,
            holder_count: ((hash >> 24) % 10000) as i32,
            symbol: "HRMS".to_owned(),
        }
    }
}

#[test]
fn test_token_data_width() {
    assert_eq!(TokenData::width(), TOKEN_DATA_SIZE);
}

#[test]
fn test_token_data_round_trip() {
    let mut marshal = Marshal::new();
    for seed in 0..64 {
        let token = TokenData::sample(seed);
        let bytes = marshal.structure_to_bytes(&token).unwrap();
        assert_eq!(bytes.len(), TOKEN_DATA_SIZE);
        assert_eq!(marshal.bytes_to_structure::<TokenData>(&bytes).unwrap(), token);
    }
}

#[test]
fn test_fields_land_at_declared_offsets() {
    let token = TokenData::sample(3);
    let bytes = Marshal::new().structure_to_bytes(&token).unwrap();

    assert_eq!(&bytes[..32], &token.contract_address);
    assert_eq!(codec::get_uint32_at(&bytes, 32).unwrap(), token.chain_id);
    assert_eq!(bytes[36], token.risk_score);
    assert_eq!(codec::get_bool_at(&bytes, 37).unwrap(), token.honeypot);
    assert_eq!(codec::get_uint16_at(&bytes, 38).unwrap(), token.buy_tax);
    assert_eq!(codec::get_uint16_at(&bytes, 40).unwrap(), token.sell_tax);
    assert_eq!(codec::get_uint64_at(&bytes, 42).unwrap(), token.analysis_timestamp_ns);
    assert_eq!(
        codec::get_double_at(&bytes, 50).unwrap().to_bits(),
        token.liquidity_usd.to_bits()
    );
    assert_eq!(codec::get_int32_at(&bytes, 58).unwrap(), token.holder_count);
    assert_eq!(codec::get_string_at(&bytes, 62, 4).unwrap(), "HRMS");
    assert!(bytes[66..].iter().all(|&b| b == 0));
}

#[test]
fn test_compose_two_records_in_one_buffer() {
    let mut marshal = Marshal::new();
    let first = TokenData::sample(1);
    let second = TokenData::sample(2);

    let mut frame = vec![0u8; TOKEN_DATA_SIZE * 2];
    let written = marshal.structure_to_bytes_into(&first, &mut frame, 0).unwrap();
    marshal.structure_to_bytes_into(&second, &mut frame, written).unwrap();

    assert_eq!(marshal.bytes_to_structure_at::<TokenData>(&frame, 0).unwrap(), first);
    assert_eq!(
        marshal.bytes_to_structure_at::<TokenData>(&frame, TOKEN_DATA_SIZE).unwrap(),
        second
    );
}

#[test]
fn test_symbol_too_long_is_rejected() {
    let mut token = TokenData::sample(4);
    token.symbol = "THIRTEEN-CHAR".to_owned();
    let err = Marshal::new().structure_to_bytes(&token).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_utf16_text_fields() {
    let config = MarshalConfig {
        string_encoding: StringEncoding::Utf16Le,
        ..MarshalConfig::default()
    };
    let mut marshal = Marshal::with_config(&config);
    let mut token = TokenData::sample(5);
    token.symbol = "ÆTH".to_owned();

    let bytes = marshal.structure_to_bytes(&token).unwrap();
    assert_eq!(&bytes[62..68], &[0xC6, 0x00, b'T', 0x00, b'H', 0x00]);
    assert_eq!(marshal.bytes_to_structure::<TokenData>(&bytes).unwrap(), token);
}

#[test]
fn test_decoding_with_other_endianness_differs() {
    let token = TokenData::sample(6);
    let little = Marshal::new().structure_to_bytes(&token).unwrap();

    let config = MarshalConfig {
        endianness: Endianness::Big,
        ..MarshalConfig::default()
    };
    let mut big_marshal = Marshal::with_config(&config);
    let big = big_marshal.structure_to_bytes(&token).unwrap();

    assert_eq!(&little[..32], &big[..32]);
    assert_eq!(
        codec::read::<u32>(&big, 32, Endianness::Big).unwrap(),
        codec::read::<u32>(&little, 32, Endianness::Little).unwrap()
    );
    assert_eq!(big_marshal.bytes_to_structure::<TokenData>(&big).unwrap(), token);
}

/// Same fields as `Header` in C with natural alignment.
#[derive(Debug, PartialEq)]
struct Header {
    version: u8,
    length: u32,
    flags: u16,
    sequence: u64,
}

impl Record for Header {
    const FIELDS: &'static [Field] = &[
        Field::u8("version"),
        Field::u32("length"),
        Field::u16("flags"),
        Field::u64("sequence"),
    ];
    const PACKING: Packing = Packing::Natural;

    fn write_fields(&self, out: &mut FieldWriter<'_>) -> Result<()> {
        out.put(self.version)?;
        out.put(self.length)?;
        out.put(self.flags)?;
        out.put(self.sequence)
    }

    fn read_fields(input: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            version: input.get()?,
            length: input.get()?,
            flags: input.get()?,
            sequence: input.get()?,
        })
    }
}

#[test]
fn test_natural_alignment_matches_repr_c() {
    let header = Header {
        version: 1,
        length: 0x0102_0304,
        flags: 0xBEEF,
        sequence: 9,
    };
    let bytes = Marshal::new().structure_to_bytes(&header).unwrap();
    assert_eq!(bytes.len(), 24);
    assert_eq!(
        bytes,
        [
            1, 0, 0, 0, 0x04, 0x03, 0x02, 0x01, 0xEF, 0xBE, 0, 0, 0, 0, 0, 0, 9, 0, 0, 0, 0, 0, 0,
            0
        ]
    );
}

proptest! {
    #[test]
    fn prop_token_round_trip(
        contract_address in any::<[u8; 32]>(),
        chain_id in any::<u32>(),
        risk_score in any::<u8>(),
        honeypot in any::<bool>(),
        buy_tax in any::<u16>(),
        sell_tax in any::<u16>(),
        analysis_timestamp_ns in any::<u64>(),
        liquidity_bits in any::<u64>(),
        holder_count in any::<i32>(),
        symbol in "[A-Za-z0-9]{0,12}",
    ) {
        let token = TokenData {
            contract_address,
            chain_id,
            risk_score,
            honeypot,
            buy_tax,
            sell_tax,
            analysis_timestamp_ns,
            liquidity_usd: f64::from_bits(liquidity_bits),
            holder_count,
            symbol,
        };
        let mut marshal = Marshal::new();
        let bytes = marshal.structure_to_bytes(&token).unwrap();
        let decoded: TokenData = marshal.bytes_to_structure(&bytes).unwrap();

        prop_assert_eq!(decoded.liquidity_usd.to_bits(), liquidity_bits);
        prop_assert_eq!(&decoded.contract_address, &token.contract_address);
        prop_assert_eq!(decoded.chain_id, token.chain_id);
        prop_assert_eq!(decoded.holder_count, token.holder_count);
        prop_assert_eq!(decoded.symbol, token.symbol);
    }

    #[test]
    fn prop_any_start_index_within_bounds(start in 0usize..64, extra in 0usize..8) {
        let token = TokenData::sample(start as u64);
        let mut marshal = Marshal::new();
        let mut buffer = vec![0u8; start + TOKEN_DATA_SIZE + extra];
        marshal.structure_to_bytes_into(&token, &mut buffer, start).unwrap();
        let decoded = marshal.bytes_to_structure_at::<TokenData>(&buffer, start).unwrap();
        prop_assert_eq!(decoded, token);

        let too_far = start + extra + 1;
        let overflow = marshal.structure_to_bytes_into(&TokenData::sample(0), &mut buffer, too_far);
        prop_assert!(overflow.is_err());
    }
}
