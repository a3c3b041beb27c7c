//! End-to-end decoding of hex transmissions.

use bits_decoder::{
    DEFAULT_MAX_DEPTH, DecodeConfig, Decoder, Error, EvalError, OperatorKind, Packet, ParseError,
    ReadError, Summary, Transmission, decode_hex, evaluate_hex,
};
use proptest::prelude::*;

const KINDS: [OperatorKind; 7] = [
    OperatorKind::Sum,
    OperatorKind::Product,
    OperatorKind::Minimum,
    OperatorKind::Maximum,
    OperatorKind::GreaterThan,
    OperatorKind::LessThan,
    OperatorKind::EqualTo,
];

/// Writes `packet` as '0'/'1' characters. Odd versions use the sub-packet
/// count header, even versions the total-length header.
fn encode(packet: &Packet, out: &mut String) {
    fn push(out: &mut String, value: u64, width: usize) {
        for shift in (0..width).rev() {
            out.push(if (value >> shift) & 1 == 1 { '1' } else { '0' });
        }
    }

    match packet {
        Packet::Literal { version, value } => {
            push(out, u64::from(*version), 3);
            push(out, 4, 3);
            let significant = 64 - value.leading_zeros() as usize;
            let groups = significant.div_ceil(4).max(1);
            for group in (0..groups).rev() {
                push(out, u64::from(group != 0), 1);
                push(out, (value >> (group * 4)) & 0xF, 4);
            }
        }
        Packet::Operator {
            version,
            kind,
            children,
        } => {
            push(out, u64::from(*version), 3);
            push(out, u64::from(kind.type_id()), 3);

            let mut body = String::new();
            for child in children {
                encode(child, &mut body);
            }

            if version % 2 == 1 {
                push(out, 1, 1);
                push(out, children.len() as u64, 11);
            } else {
                push(out, 0, 1);
                push(out, body.len() as u64, 15);
            }
            out.push_str(&body);
        }
    }
}

fn to_hex(packet: &Packet) -> String {
    let mut bits = String::new();
    encode(packet, &mut bits);
    bits_to_hex(bits)
}

fn bits_to_hex(mut bits: String) -> String {
    while bits.len() % 4 != 0 {
        bits.push('0');
    }

    bits.as_bytes()
        .chunks(4)
        .map(|nibble| {
            let digit = u32::from_str_radix(std::str::from_utf8(nibble).unwrap(), 2).unwrap();
            char::from_digit(digit, 16).unwrap().to_ascii_uppercase()
        })
        .collect()
}

/// `depth - 1` single-child sums wrapped around the literal 7.
fn nested_sums(depth: usize) -> String {
    let mut bits = String::new();
    for _ in 1..depth {
        bits.push_str("000000");
        bits.push('1');
        bits.push_str("00000000001");
    }
    bits.push_str("000100");
    bits.push_str("00111");

    bits_to_hex(bits)
}

fn arb_packet() -> impl Strategy<Value = Packet> {
    let leaf = (0u8..8, any::<u64>()).prop_map(|(version, value)| Packet::literal(version, value));
    leaf.prop_recursive(4, 48, 5, |inner| {
        (
            0u8..8,
            prop::sample::select(KINDS.to_vec()),
            prop::collection::vec(inner, 1..5),
        )
            .prop_map(|(version, kind, children)| Packet::operator(version, kind, children))
    })
}

#[test]
fn test_literal_transmission() {
    assert_eq!(decode_hex("D2FE28").unwrap(), Packet::literal(6, 2021));
    assert_eq!(decode_hex("D2FE28").unwrap().version_sum(), 6);
}

#[test]
fn test_total_length_transmission() {
    let packet = decode_hex("38006F45291200").unwrap();
    let values: Vec<u64> = packet
        .children()
        .iter()
        .map(|child| child.value().unwrap())
        .collect();
    assert_eq!(values, vec![10, 20]);
    assert_eq!(packet.version_sum(), 9);
}

#[test]
fn test_sub_packet_count_transmission() {
    let packet = decode_hex("EE00D40C823060").unwrap();
    let values: Vec<u64> = packet
        .children()
        .iter()
        .map(|child| child.value().unwrap())
        .collect();
    assert_eq!(values, vec![1, 2, 3]);
    assert_eq!(packet.version_sum(), 14);
}

#[test]
fn test_version_sums() {
    for (hex, expected) in [
        ("8A004A801A8002F478", 16),
        ("620080001611562C8802118E34", 12),
        ("C0015000016115A2E0802F182340", 23),
        ("A0016C880162017C3686B18A3D4780", 31),
    ] {
        assert_eq!(decode_hex(hex).unwrap().version_sum(), expected, "{hex}");
    }
}

#[test]
fn test_values() {
    for (hex, expected) in [
        ("C200B40A82", 3),
        ("04005AC33890", 54),
        ("880086C3E88112", 7),
        ("CE00C43D881120", 9),
        ("D8005AC2A8F0", 1),
        ("F600BC2D8F", 0),
        ("9C005AC2F8F0", 0),
        ("9C0141080250320F1802104A08", 1),
    ] {
        assert_eq!(evaluate_hex(hex).unwrap().value, expected, "{hex}");
    }
}

#[test]
fn test_operator_shapes() {
    let sum = decode_hex("C200B40A82").unwrap();
    assert_eq!(sum.kind(), Some(OperatorKind::Sum));
    assert_eq!(sum.children().len(), 2);

    let product = decode_hex("04005AC33890").unwrap();
    assert_eq!(
        product,
        Packet::operator(
            0,
            OperatorKind::Product,
            vec![Packet::literal(5, 6), Packet::literal(3, 9)]
        )
    );

    let equality = decode_hex("9C0141080250320F1802104A08").unwrap();
    assert_eq!(equality.kind(), Some(OperatorKind::EqualTo));
    let kinds: Vec<_> = equality.children().iter().map(Packet::kind).collect();
    assert_eq!(
        kinds,
        vec![Some(OperatorKind::Sum), Some(OperatorKind::Product)]
    );
}

#[test]
fn test_summary() {
    assert_eq!(
        evaluate_hex("9C0141080250320F1802104A08").unwrap(),
        Summary {
            version_sum: 20,
            value: 1
        }
    );
}

#[test]
fn test_invalid_hex() {
    assert!(matches!(
        evaluate_hex("XYZ"),
        Err(Error::Parse(ParseError::InvalidHex(_)))
    ));
}

#[test]
fn test_truncated_transmission() {
    assert!(matches!(
        evaluate_hex("38006F452912"),
        Err(Error::Parse(ParseError::MalformedInput(
            ReadError::OutOfBounds { .. }
        )))
    ));
}

#[test]
fn test_wrong_arity_transmission() {
    let tree = Packet::operator(
        1,
        OperatorKind::GreaterThan,
        vec![
            Packet::literal(0, 3),
            Packet::literal(0, 2),
            Packet::literal(0, 1),
        ],
    );
    assert_eq!(
        evaluate_hex(&to_hex(&tree)).unwrap_err(),
        Error::Eval(EvalError::WrongArity {
            kind: OperatorKind::GreaterThan,
            expected: 2,
            found: 3
        })
    );
}

#[test]
fn test_empty_operator_transmission() {
    let tree = Packet::operator(2, OperatorKind::Product, vec![]);
    assert_eq!(
        evaluate_hex(&to_hex(&tree)).unwrap_err(),
        Error::Eval(EvalError::EmptyOperator(OperatorKind::Product))
    );
}

#[test]
fn test_decoder_with_config() {
    let mut config = DecodeConfig::new();
    config.set_max_literal_bits(12).set_max_depth(2);
    let decoder = Decoder::new(config);

    assert_eq!(decoder.decode_hex("D2FE28").unwrap(), Packet::literal(6, 2021));
    assert_eq!(
        decoder.decode_hex("9C0141080250320F1802104A08").unwrap_err(),
        ParseError::TooDeep { max_depth: 2 }
    );
}

#[test]
fn test_default_depth_limit_fits_test_thread_stack() {
    // plain #[test] threads get a 2 MiB stack
    let packet = decode_hex(&nested_sums(DEFAULT_MAX_DEPTH)).unwrap();
    assert_eq!(packet.depth(), DEFAULT_MAX_DEPTH);
    assert_eq!(packet.version_sum(), 0);
    assert_eq!(packet.value(), Ok(7));

    assert_eq!(
        decode_hex(&nested_sums(DEFAULT_MAX_DEPTH + 1)).unwrap_err(),
        ParseError::TooDeep {
            max_depth: DEFAULT_MAX_DEPTH
        }
    );
}

#[test]
fn test_transmission_reader_ignores_padding() {
    let transmission = Transmission::from_hex("D2FE28").unwrap();
    let mut reader = transmission.reader();
    let packet = Decoder::default().decode(&mut reader).unwrap();
    assert_eq!(packet.value().unwrap(), 2021);
    assert_eq!(reader.read_bits(reader.remaining()).unwrap(), 0);
}

proptest! {
    #[test]
    fn prop_literal_round_trip(version in 0u8..8, value in any::<u64>()) {
        let packet = Packet::literal(version, value);
        prop_assert_eq!(decode_hex(&to_hex(&packet)).unwrap(), packet);
    }

    #[test]
    fn prop_tree_round_trip(packet in arb_packet()) {
        prop_assert_eq!(decode_hex(&to_hex(&packet)).unwrap(), packet);
    }

    #[test]
    fn prop_version_sum_is_additive(packet in arb_packet()) {
        let children: u64 = packet.children().iter().map(Packet::version_sum).sum();
        prop_assert_eq!(packet.version_sum(), u64::from(packet.version()) + children);
    }

    #[test]
    fn prop_value_is_pure(packet in arb_packet()) {
        let first = packet.value();
        prop_assert_eq!(first, packet.value());
    }
}
