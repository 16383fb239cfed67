//! Pack/unpack codec for reflection instruction streams
//!
//! The wire form is printable text: slots of [`OP_BITS`] bits are
//! accumulated little-end-first into 60-bit groups, and each group is
//! rendered as 12 base-36 digits (the final group unpadded). 60 bits keeps
//! every group below both `u64::MAX` and 36^12, so the encoding survives
//! runtimes whose only numeric type is a double.
//!
//! When the literal stack is non-empty, the packed value is an ordered
//! sequence carrying the stack first and the encoded opcode text last.

use thiserror::Error;
use vela_ast::Expression;

use crate::op::{TypeOp, OP_BITS, OP_BOUND};

/// Slots per encoded group
pub const CHUNK_SLOTS: usize = 10;

/// Base-36 digits per full encoded group
pub const CHUNK_CHARS: usize = 12;

/// Errors that can occur while decoding a packed stream
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// A character outside the base-36 alphabet
    #[error("invalid base-36 digit {0:?} at offset {1}")]
    InvalidDigit(char, usize),

    /// A slot that does not name an opcode
    #[error("invalid opcode {0} in packed stream")]
    InvalidOp(u8),
}

/// One entry of the literal stack
#[derive(Debug, Clone, PartialEq)]
pub enum StackEntry {
    /// A string literal or property name
    String(String),
    /// A numeric literal
    Number(f64),
    /// A boolean literal
    Boolean(bool),
    /// A lazy reference: a zero-parameter closure that evaluates to a class
    /// constructor or enum object at runtime
    LazyRef(Expression),
}

/// The (opcodes, literal stack) pair produced by the type extractor
///
/// `ops` is the interleaved slot stream: opcode values with each parameter
/// index following its opcode. The literal stack is append-only and
/// deduplicated at insertion, so indices are stable and minimal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackStruct {
    pub ops: Vec<u8>,
    pub stack: Vec<StackEntry>,
}

impl PackStruct {
    /// Create an empty pack
    pub fn new() -> Self {
        PackStruct::default()
    }

    /// Check whether nothing was emitted
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Append an opcode
    pub fn push_op(&mut self, op: TypeOp) {
        self.ops.push(op.to_u8());
    }

    /// Append a parameter slot holding a literal-stack index
    pub fn push_param(&mut self, index: usize) {
        debug_assert!(
            index < OP_BOUND as usize,
            "literal stack index {} exceeds one slot",
            index
        );
        self.ops.push(index as u8);
    }

    /// Find or insert a stack entry, returning its index.
    ///
    /// The stack stays small in practice, so a linear scan keeps insertion
    /// order deterministic without an index map.
    pub fn stack_index(&mut self, entry: StackEntry) -> usize {
        if let Some(index) = self.stack.iter().position(|e| *e == entry) {
            return index;
        }
        self.stack.push(entry);
        self.stack.len() - 1
    }
}

/// The wire representation of a pack
#[derive(Debug, Clone, PartialEq)]
pub enum Packed {
    /// Encoded opcodes only (empty literal stack)
    Text(String),
    /// Literal stack in order, then the encoded opcodes
    WithStack(Vec<StackEntry>, String),
}

impl Packed {
    /// The encoded opcode text (always the last element of the wire form)
    pub fn encoded(&self) -> &str {
        match self {
            Packed::Text(text) => text,
            Packed::WithStack(_, text) => text,
        }
    }

    /// The literal stack prefix, if any
    pub fn stack(&self) -> &[StackEntry] {
        match self {
            Packed::Text(_) => &[],
            Packed::WithStack(stack, _) => stack,
        }
    }
}

/// Serialize a pack into its wire form
pub fn pack(pack: PackStruct) -> Packed {
    let text = encode_slots(&pack.ops);
    if pack.stack.is_empty() {
        Packed::Text(text)
    } else {
        Packed::WithStack(pack.stack, text)
    }
}

/// Decode a wire form back into (opcodes, literal stack).
///
/// Inverse of [`pack`] modulo the trailing `end` sentinel, which decoding
/// strips. A parameter slot demanded past the end of the stream reads as
/// index 0; trailing zero slots do not survive the numeric encoding.
pub fn unpack(packed: &Packed) -> Result<PackStruct, DecodeError> {
    let (stack, text) = match packed {
        Packed::Text(text) => (Vec::new(), text.as_str()),
        Packed::WithStack(stack, text) => (stack.clone(), text.as_str()),
    };
    let slots = decode_groups(text)?;
    let ops = read_ops(&slots)?;
    Ok(PackStruct { ops, stack })
}

/// Render the slot stream (plus the `end` sentinel) as base-36 text
fn encode_slots(ops: &[u8]) -> String {
    let mut slots = Vec::with_capacity(ops.len() + 1);
    slots.extend_from_slice(ops);
    slots.push(TypeOp::End.to_u8());

    let groups = slots.chunks(CHUNK_SLOTS).count();
    let mut text = String::new();
    for (i, group) in slots.chunks(CHUNK_SLOTS).enumerate() {
        let mut value: u64 = 0;
        for (j, &slot) in group.iter().enumerate() {
            value |= u64::from(slot) << (OP_BITS * j as u32);
        }
        let digits = to_base36(value);
        if i + 1 < groups {
            for _ in digits.len()..CHUNK_CHARS {
                text.push('0');
            }
        }
        text.push_str(&digits);
    }
    text
}

/// Parse base-36 text back into the raw slot stream
fn decode_groups(text: &str) -> Result<Vec<u8>, DecodeError> {
    let chars: Vec<char> = text.chars().collect();
    let groups = chars.chunks(CHUNK_CHARS).count();
    let mut slots = Vec::new();

    for (g, group) in chars.chunks(CHUNK_CHARS).enumerate() {
        let mut value: u64 = 0;
        for (k, &ch) in group.iter().enumerate() {
            let digit = ch
                .to_digit(36)
                .ok_or(DecodeError::InvalidDigit(ch, g * CHUNK_CHARS + k))?;
            value = value * 36 + u64::from(digit);
        }
        if g + 1 < groups {
            // Full groups carry exactly CHUNK_SLOTS slots, zeros included
            for _ in 0..CHUNK_SLOTS {
                slots.push((value & u64::from(OP_BOUND - 1)) as u8);
                value >>= OP_BITS;
            }
        } else {
            // The final group ends where its residue runs out
            while value > 0 {
                slots.push((value & u64::from(OP_BOUND - 1)) as u8);
                value >>= OP_BITS;
            }
        }
    }
    Ok(slots)
}

/// Re-interleave raw slots into the opcode/parameter stream, stopping at
/// the `end` sentinel
fn read_ops(slots: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut ops = Vec::new();
    let mut i = 0;
    while i < slots.len() {
        let raw = slots[i];
        i += 1;
        if raw == TypeOp::End.to_u8() {
            break;
        }
        let op = TypeOp::from_u8(raw).ok_or(DecodeError::InvalidOp(raw))?;
        ops.push(raw);
        for _ in 0..op.param_slots() {
            let param = if i < slots.len() {
                let p = slots[i];
                i += 1;
                p
            } else {
                0
            };
            ops.push(param);
        }
    }
    Ok(ops)
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_ast::factory;

    #[test]
    fn empty_pack_roundtrips() {
        let packed = pack(PackStruct::new());
        assert!(matches!(packed, Packed::Text(_)));
        let out = unpack(&packed).unwrap();
        assert!(out.ops.is_empty());
        assert!(out.stack.is_empty());
    }

    #[test]
    fn parameterless_sequence_roundtrips() {
        let mut ps = PackStruct::new();
        ps.push_op(TypeOp::String);
        ps.push_op(TypeOp::Number);
        ps.push_op(TypeOp::Null);
        ps.push_op(TypeOp::Union);
        ps.push_op(TypeOp::Property);
        let expected = ps.ops.clone();

        let out = unpack(&pack(ps)).unwrap();
        assert_eq!(out.ops, expected);
    }

    #[test]
    fn stack_and_params_roundtrip_in_order() {
        let mut ps = PackStruct::new();
        let a = ps.stack_index(StackEntry::String("a".to_string()));
        ps.push_op(TypeOp::String);
        ps.push_op(TypeOp::PropertySignature);
        ps.push_param(a);
        let b = ps.stack_index(StackEntry::String("b".to_string()));
        ps.push_op(TypeOp::Number);
        ps.push_op(TypeOp::PropertySignature);
        ps.push_param(b);
        ps.push_op(TypeOp::ObjectLiteral);

        let packed = pack(ps.clone());
        assert!(matches!(packed, Packed::WithStack(ref s, _) if s.len() == 2));

        let out = unpack(&packed).unwrap();
        assert_eq!(out.ops, ps.ops);
        assert_eq!(
            out.stack,
            vec![
                StackEntry::String("a".to_string()),
                StackEntry::String("b".to_string()),
            ]
        );
    }

    #[test]
    fn stack_entries_deduplicate() {
        let mut ps = PackStruct::new();
        let first = ps.stack_index(StackEntry::String("id".to_string()));
        let second = ps.stack_index(StackEntry::String("id".to_string()));
        let third = ps.stack_index(StackEntry::Number(42.0));
        assert_eq!(first, second);
        assert_eq!(third, 1);
        assert_eq!(ps.stack.len(), 2);
    }

    #[test]
    fn lazy_refs_to_same_target_share_an_index() {
        let mut ps = PackStruct::new();
        let first = ps.stack_index(StackEntry::LazyRef(factory::arrow_thunk(factory::ident(
            "Model",
        ))));
        let second = ps.stack_index(StackEntry::LazyRef(factory::arrow_thunk(factory::ident(
            "Model",
        ))));
        let other = ps.stack_index(StackEntry::LazyRef(factory::arrow_thunk(factory::ident(
            "Other",
        ))));
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn long_sequences_span_multiple_groups() {
        let mut ps = PackStruct::new();
        for _ in 0..25 {
            ps.push_op(TypeOp::Number);
        }
        let expected = ps.ops.clone();

        let packed = pack(ps);
        // 26 slots with the sentinel: two full groups plus a remainder
        assert!(packed.encoded().len() > CHUNK_CHARS * 2);
        let out = unpack(&packed).unwrap();
        assert_eq!(out.ops, expected);
    }

    #[test]
    fn group_boundary_cases_roundtrip() {
        // Slot counts that land exactly on and around group boundaries
        for count in [9usize, 10, 11, 19, 20, 21] {
            let mut ps = PackStruct::new();
            for _ in 0..count {
                ps.push_op(TypeOp::Any);
            }
            let expected = ps.ops.clone();
            let out = unpack(&pack(ps)).unwrap();
            assert_eq!(out.ops, expected, "failed for {} slots", count);
        }
    }

    #[test]
    fn trailing_zero_param_index_survives() {
        // propertySignature<0> as the very last instruction: the zero
        // parameter slot vanishes into the numeric encoding and must read
        // back as index 0
        let mut ps = PackStruct::new();
        ps.stack_index(StackEntry::String("a".to_string()));
        ps.push_op(TypeOp::String);
        ps.push_op(TypeOp::PropertySignature);
        ps.push_param(0);
        let expected = ps.ops.clone();

        let out = unpack(&pack(ps)).unwrap();
        assert_eq!(out.ops, expected);
    }

    #[test]
    fn packed_form_shape() {
        // Without a stack: a bare string. With one: stack prefix, encoded
        // text last.
        let mut plain = PackStruct::new();
        plain.push_op(TypeOp::String);
        assert!(matches!(pack(plain), Packed::Text(_)));

        let mut with_stack = PackStruct::new();
        with_stack.stack_index(StackEntry::String("x".to_string()));
        with_stack.push_op(TypeOp::Literal);
        with_stack.push_param(0);
        let packed = pack(with_stack);
        assert_eq!(packed.stack().len(), 1);
        assert!(!packed.encoded().is_empty());
    }

    #[test]
    fn rejects_text_outside_the_alphabet() {
        let err = unpack(&Packed::Text("ab!cd".to_string())).unwrap_err();
        assert_eq!(err, DecodeError::InvalidDigit('!', 2));
    }

    #[test]
    fn rejects_unknown_opcodes() {
        // Slot value 63 names no opcode; craft it directly
        let text = encode_slots(&[63]);
        let err = unpack(&Packed::Text(text)).unwrap_err();
        assert_eq!(err, DecodeError::InvalidOp(63));
    }

    #[test]
    fn encoded_text_is_printable_base36() {
        let mut ps = PackStruct::new();
        for op in [TypeOp::String, TypeOp::Union, TypeOp::Float64Array] {
            ps.push_op(op);
        }
        let packed = pack(ps);
        assert!(packed
            .encoded()
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
