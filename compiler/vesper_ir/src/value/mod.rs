//! Compile-time constant values.
//!
//! `ConstValue` is the closed sum over every value shape the optimizer can
//! know at compile time. One variant per kind keeps the per-kind predicates a
//! single exhaustive match, and the four no-payload kinds (`None`, `True`,
//! `False`, `Ellipsis`) are zero-sized variant cases.
//!
//! All heap payloads go through the factory methods below; `Heap::new` is
//! crate-private, so the factories are the only way to build container and
//! string values. The empty-mapping payload is a single process-wide
//! allocation shared by every empty `map` constant.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::discriminant;
use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::heap::Heap;

/// Kind tag for a constant value. One tag per concrete value shape.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConstKind {
    None,
    True,
    False,
    Ellipsis,
    Int,
    BigInt,
    Float,
    Complex,
    ByteStr,
    Str,
    Bytes,
    Tuple,
    List,
    Set,
    Map,
    Slice,
    TypeRef,
}

impl ConstKind {
    /// Stable tag name, used in change rationales and node snapshots.
    pub const fn name(self) -> &'static str {
        match self {
            ConstKind::None => "none",
            ConstKind::True => "true",
            ConstKind::False => "false",
            ConstKind::Ellipsis => "ellipsis",
            ConstKind::Int => "int",
            ConstKind::BigInt => "bigint",
            ConstKind::Float => "float",
            ConstKind::Complex => "complex",
            ConstKind::ByteStr => "bstr",
            ConstKind::Str => "text",
            ConstKind::Bytes => "bytes",
            ConstKind::Tuple => "tuple",
            ConstKind::List => "list",
            ConstKind::Set => "set",
            ConstKind::Map => "map",
            ConstKind::Slice => "slice",
            ConstKind::TypeRef => "type",
        }
    }
}

impl fmt::Display for ConstKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Payload of a slice constant. Each bound is itself a constant, usually
/// an integer or `none`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SliceValue {
    pub start: ConstValue,
    pub stop: ConstValue,
    pub step: ConstValue,
}

/// A value fully known at compile time.
#[derive(Clone)]
pub enum ConstValue {
    // No-payload singleton kinds
    None,
    True,
    False,
    Ellipsis,

    // Numbers
    /// Machine integer.
    Int(i64),
    /// Wide integer, produced when a literal or fold overflows `Int`.
    BigInt(i128),
    /// IEEE 754 double.
    Float(f64),
    /// Complex number.
    Complex { real: f64, imag: f64 },

    // Strings
    /// Narrow byte string literal.
    ByteStr(Heap<Vec<u8>>),
    /// Text string.
    Str(Heap<String>),
    /// Immutable byte sequence.
    Bytes(Heap<Vec<u8>>),

    // Containers
    Tuple(Heap<Vec<ConstValue>>),
    List(Heap<Vec<ConstValue>>),
    /// Deduplicated, first-occurrence ordered.
    Set(Heap<Vec<ConstValue>>),
    /// Insertion-ordered key/value pairs, keys unique.
    Map(Heap<Vec<(ConstValue, ConstValue)>>),

    // Structured scalars
    Slice(Heap<SliceValue>),
    /// Reference to a built-in type, by canonical name.
    TypeRef(&'static str),
}

fn empty_map_payload() -> &'static Heap<Vec<(ConstValue, ConstValue)>> {
    static EMPTY: OnceLock<Heap<Vec<(ConstValue, ConstValue)>>> = OnceLock::new();
    EMPTY.get_or_init(|| Heap::new(Vec::new()))
}

// Factory Methods (ONLY way to construct heap payloads)

impl ConstValue {
    /// Create a machine integer value.
    #[inline]
    pub const fn int(n: i64) -> Self {
        ConstValue::Int(n)
    }

    /// Create a wide integer value.
    #[inline]
    pub const fn big_int(n: i128) -> Self {
        ConstValue::BigInt(n)
    }

    /// Create a float value.
    #[inline]
    pub const fn float(f: f64) -> Self {
        ConstValue::Float(f)
    }

    /// Create a complex value.
    #[inline]
    pub const fn complex(real: f64, imag: f64) -> Self {
        ConstValue::Complex { real, imag }
    }

    /// The boolean singleton for `b`.
    #[inline]
    pub const fn from_bool(b: bool) -> Self {
        if b {
            ConstValue::True
        } else {
            ConstValue::False
        }
    }

    /// Create a text string value.
    #[inline]
    pub fn str(s: impl Into<String>) -> Self {
        ConstValue::Str(Heap::new(s.into()))
    }

    /// Create a narrow byte string value.
    #[inline]
    pub fn byte_str(bytes: Vec<u8>) -> Self {
        ConstValue::ByteStr(Heap::new(bytes))
    }

    /// Create a byte sequence value.
    #[inline]
    pub fn bytes(bytes: Vec<u8>) -> Self {
        ConstValue::Bytes(Heap::new(bytes))
    }

    /// Create a tuple value.
    #[inline]
    pub fn tuple(elements: Vec<ConstValue>) -> Self {
        ConstValue::Tuple(Heap::new(elements))
    }

    /// Create a list value.
    #[inline]
    pub fn list(elements: Vec<ConstValue>) -> Self {
        ConstValue::List(Heap::new(elements))
    }

    /// Create a set value. Elements are deduplicated, keeping the first
    /// occurrence's position.
    pub fn set(elements: Vec<ConstValue>) -> Self {
        let mut seen = FxHashSet::default();
        let mut unique = Vec::with_capacity(elements.len());
        for element in elements {
            if seen.insert(element.clone()) {
                unique.push(element);
            }
        }
        ConstValue::Set(Heap::new(unique))
    }

    /// Create a mapping value. Duplicate keys collapse to the last value,
    /// keeping the first occurrence's position. The empty mapping shares one
    /// canonical payload process-wide.
    pub fn map(entries: Vec<(ConstValue, ConstValue)>) -> Self {
        if entries.is_empty() {
            return ConstValue::Map(empty_map_payload().clone());
        }
        let mut index: FxHashMap<ConstValue, usize> = FxHashMap::default();
        let mut pairs: Vec<(ConstValue, ConstValue)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            if let Some(&at) = index.get(&key) {
                pairs[at].1 = value;
            } else {
                index.insert(key.clone(), pairs.len());
                pairs.push((key, value));
            }
        }
        ConstValue::Map(Heap::new(pairs))
    }

    /// Create a slice value.
    #[inline]
    pub fn slice(start: ConstValue, stop: ConstValue, step: ConstValue) -> Self {
        ConstValue::Slice(Heap::new(SliceValue { start, stop, step }))
    }

    /// Create a reference to a built-in type by canonical name.
    #[inline]
    pub const fn type_ref(name: &'static str) -> Self {
        ConstValue::TypeRef(name)
    }
}

// Queries

impl ConstValue {
    /// The kind tag of this value.
    pub const fn kind(&self) -> ConstKind {
        match self {
            ConstValue::None => ConstKind::None,
            ConstValue::True => ConstKind::True,
            ConstValue::False => ConstKind::False,
            ConstValue::Ellipsis => ConstKind::Ellipsis,
            ConstValue::Int(_) => ConstKind::Int,
            ConstValue::BigInt(_) => ConstKind::BigInt,
            ConstValue::Float(_) => ConstKind::Float,
            ConstValue::Complex { .. } => ConstKind::Complex,
            ConstValue::ByteStr(_) => ConstKind::ByteStr,
            ConstValue::Str(_) => ConstKind::Str,
            ConstValue::Bytes(_) => ConstKind::Bytes,
            ConstValue::Tuple(_) => ConstKind::Tuple,
            ConstValue::List(_) => ConstKind::List,
            ConstValue::Set(_) => ConstKind::Set,
            ConstValue::Map(_) => ConstKind::Map,
            ConstValue::Slice(_) => ConstKind::Slice,
            ConstValue::TypeRef(_) => ConstKind::TypeRef,
        }
    }

    /// Runtime type name, as used in fault messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            ConstValue::None => "none",
            ConstValue::True | ConstValue::False => "bool",
            ConstValue::Ellipsis => "ellipsis",
            ConstValue::Int(_) => "int",
            ConstValue::BigInt(_) => "bigint",
            ConstValue::Float(_) => "float",
            ConstValue::Complex { .. } => "complex",
            ConstValue::ByteStr(_) => "bstr",
            ConstValue::Str(_) => "text",
            ConstValue::Bytes(_) => "bytes",
            ConstValue::Tuple(_) => "tuple",
            ConstValue::List(_) => "list",
            ConstValue::Set(_) => "set",
            ConstValue::Map(_) => "map",
            ConstValue::Slice(_) => "slice",
            ConstValue::TypeRef(_) => "type",
        }
    }

    /// Truth value. Known for every constant kind.
    pub fn truth_value(&self) -> bool {
        match self {
            ConstValue::None | ConstValue::False => false,
            ConstValue::True | ConstValue::Ellipsis | ConstValue::Slice(_) => true,
            ConstValue::TypeRef(_) => true,
            ConstValue::Int(n) => *n != 0,
            ConstValue::BigInt(n) => *n != 0,
            ConstValue::Float(f) => *f != 0.0,
            ConstValue::Complex { real, imag } => *real != 0.0 || *imag != 0.0,
            ConstValue::ByteStr(b) | ConstValue::Bytes(b) => !b.is_empty(),
            ConstValue::Str(s) => !s.is_empty(),
            ConstValue::Tuple(e) | ConstValue::List(e) | ConstValue::Set(e) => !e.is_empty(),
            ConstValue::Map(pairs) => !pairs.is_empty(),
        }
    }

    /// Whether this is one of the boolean singletons.
    pub const fn is_bool(&self) -> bool {
        matches!(self, ConstValue::True | ConstValue::False)
    }

    /// Whether this is a number. Booleans count as numbers; complex values
    /// do not (they are not ordered).
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            ConstValue::Int(_)
                | ConstValue::BigInt(_)
                | ConstValue::Float(_)
                | ConstValue::True
                | ConstValue::False
        )
    }

    /// Whether this value can serve as a sequence index.
    pub const fn is_index(&self) -> bool {
        matches!(
            self,
            ConstValue::Int(_) | ConstValue::BigInt(_) | ConstValue::True | ConstValue::False
        )
    }

    /// Whether this is a mapping.
    pub const fn is_mapping(&self) -> bool {
        matches!(self, ConstValue::Map(_))
    }

    /// Whether this is a text string.
    pub const fn is_text(&self) -> bool {
        matches!(self, ConstValue::Str(_))
    }

    /// Whether this is a byte-string kind (narrow string or byte sequence).
    pub const fn is_byte_string(&self) -> bool {
        matches!(self, ConstValue::ByteStr(_) | ConstValue::Bytes(_))
    }

    /// Whether the value (or, for tuples, any element) is mutable.
    pub fn is_mutable(&self) -> bool {
        match self {
            ConstValue::List(_) | ConstValue::Set(_) | ConstValue::Map(_) => true,
            ConstValue::Tuple(elements) => elements.iter().any(ConstValue::is_mutable),
            _ => false,
        }
    }

    /// Whether the value can be used as a set element or mapping key.
    pub fn is_hashable(&self) -> bool {
        match self {
            ConstValue::List(_) | ConstValue::Set(_) | ConstValue::Map(_) | ConstValue::Slice(_) => {
                false
            }
            ConstValue::Tuple(elements) => elements.iter().all(ConstValue::is_hashable),
            _ => true,
        }
    }

    /// Whether iterating this value is known to succeed.
    pub const fn is_iterable(&self) -> bool {
        matches!(
            self,
            ConstValue::ByteStr(_)
                | ConstValue::Str(_)
                | ConstValue::Bytes(_)
                | ConstValue::Tuple(_)
                | ConstValue::List(_)
                | ConstValue::Set(_)
                | ConstValue::Map(_)
        )
    }

    /// Number of elements iteration yields, if iterable.
    pub fn iteration_length(&self) -> Option<usize> {
        match self {
            ConstValue::Str(s) => Some(s.chars().count()),
            ConstValue::ByteStr(b) | ConstValue::Bytes(b) => Some(b.len()),
            ConstValue::Tuple(e) | ConstValue::List(e) | ConstValue::Set(e) => Some(e.len()),
            ConstValue::Map(pairs) => Some(pairs.len()),
            _ => None,
        }
    }

    /// The `index`-th iteration element, if iterable and in range.
    ///
    /// Text iterates per character, narrow byte strings per one-byte string,
    /// byte sequences per integer, mappings per key.
    pub fn iteration_element(&self, index: usize) -> Option<ConstValue> {
        match self {
            ConstValue::Str(s) => s.chars().nth(index).map(|c| ConstValue::str(c.to_string())),
            ConstValue::ByteStr(b) => b.get(index).map(|&b| ConstValue::byte_str(vec![b])),
            ConstValue::Bytes(b) => b.get(index).map(|&b| ConstValue::int(i64::from(b))),
            ConstValue::Tuple(e) | ConstValue::List(e) | ConstValue::Set(e) => {
                e.get(index).cloned()
            }
            ConstValue::Map(pairs) => pairs.get(index).map(|(key, _)| key.clone()),
            _ => Option::None,
        }
    }

    /// All iteration elements in order, if iterable.
    pub fn iteration_elements(&self) -> Option<Vec<ConstValue>> {
        let length = self.iteration_length()?;
        let mut elements = Vec::with_capacity(length);
        for index in 0..length {
            elements.push(self.iteration_element(index)?);
        }
        Some(elements)
    }

    /// The value as an integer, truncating floats, or `None` if not a number.
    pub fn integer_value(&self) -> Option<i128> {
        match self {
            ConstValue::Int(n) => Some(i128::from(*n)),
            ConstValue::BigInt(n) => Some(*n),
            ConstValue::True => Some(1),
            ConstValue::False => Some(0),
            ConstValue::Float(f) if f.is_finite() && f.abs() < 2f64.powi(127) => {
                #[allow(clippy::cast_possible_truncation)]
                Some(f.trunc() as i128)
            }
            _ => Option::None,
        }
    }

    /// The text payload, if this is a text string.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            ConstValue::Str(s) => Some(s.as_str()),
            _ => Option::None,
        }
    }

    /// Textual representation of the value under the target encoding, or
    /// `None` when there is none (narrow byte strings with non-ASCII bytes).
    pub fn text_repr(&self) -> Option<String> {
        match self {
            ConstValue::Str(s) => Some(s.to_string()),
            ConstValue::ByteStr(bytes) => {
                if bytes.is_ascii() {
                    Some(bytes.iter().map(|&b| b as char).collect())
                } else {
                    Option::None
                }
            }
            other => Some(other.repr()),
        }
    }

    /// Source-like display form, used for diagnostics and node details.
    pub fn repr(&self) -> String {
        match self {
            ConstValue::None => "none".to_string(),
            ConstValue::True => "true".to_string(),
            ConstValue::False => "false".to_string(),
            ConstValue::Ellipsis => "...".to_string(),
            ConstValue::Int(n) => n.to_string(),
            ConstValue::BigInt(n) => n.to_string(),
            ConstValue::Float(f) => float_repr(*f),
            ConstValue::Complex { real, imag } => complex_repr(*real, *imag),
            ConstValue::Str(s) => quote_text(s),
            ConstValue::ByteStr(bytes) => format!("b{}", quote_bytes(bytes)),
            ConstValue::Bytes(bytes) => format!("bytes{}", quote_bytes(bytes)),
            ConstValue::Tuple(elements) => {
                if elements.len() == 1 {
                    format!("({},)", elements[0].repr())
                } else {
                    format!("({})", join_reprs(elements))
                }
            }
            ConstValue::List(elements) => format!("[{}]", join_reprs(elements)),
            ConstValue::Set(elements) => {
                if elements.is_empty() {
                    "set()".to_string()
                } else {
                    format!("{{{}}}", join_reprs(elements))
                }
            }
            ConstValue::Map(pairs) => {
                let inner: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key.repr(), value.repr()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            ConstValue::Slice(slice) => format!(
                "slice({}, {}, {})",
                slice.start.repr(),
                slice.stop.repr(),
                slice.step.repr()
            ),
            ConstValue::TypeRef(name) => format!("<type '{name}'>"),
        }
    }

    /// Payload length and its synthesis threshold, for sized kinds.
    pub fn sized_payload(&self) -> Option<(usize, usize)> {
        match self {
            ConstValue::Str(s) => Some((s.len(), 1000)),
            ConstValue::ByteStr(b) | ConstValue::Bytes(b) => Some((b.len(), 256)),
            ConstValue::Tuple(e) | ConstValue::List(e) | ConstValue::Set(e) => {
                Some((e.len(), 256))
            }
            ConstValue::Map(pairs) => Some((pairs.len(), 256)),
            _ => Option::None,
        }
    }
}

fn join_reprs(elements: &[ConstValue]) -> String {
    let parts: Vec<String> = elements.iter().map(ConstValue::repr).collect();
    parts.join(", ")
}

/// Float display matching the target runtime: integral values keep a
/// trailing `.0`, non-finite values print as `inf`/`-inf`/`nan`.
fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let base = format!("{f}");
    if base.contains('.') || base.contains('e') || base.contains('E') {
        base
    } else {
        format!("{base}.0")
    }
}

fn complex_repr(real: f64, imag: f64) -> String {
    // Complex display drops the trailing `.0` of integral parts.
    fn part(f: f64) -> String {
        let text = float_repr(f);
        match text.strip_suffix(".0") {
            Some(stripped) => stripped.to_string(),
            Option::None => text,
        }
    }

    if real == 0.0 && real.is_sign_positive() {
        format!("{}j", part(imag))
    } else if imag.is_sign_negative() {
        format!("({}-{}j)", part(real), part(-imag))
    } else {
        format!("({}+{}j)", part(real), part(imag))
    }
}

fn quote_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn quote_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('\'');
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            b'\r' => out.push_str("\\r"),
            0x20..=0x7e => out.push(b as char),
            other => out.push_str(&format!("\\x{other:02x}")),
        }
    }
    out.push('\'');
    out
}

// Trait Implementations

impl PartialEq for ConstValue {
    fn eq(&self, other: &Self) -> bool {
        use ConstValue as V;
        match (self, other) {
            (V::None, V::None)
            | (V::True, V::True)
            | (V::False, V::False)
            | (V::Ellipsis, V::Ellipsis) => true,
            (V::Int(a), V::Int(b)) => a == b,
            (V::BigInt(a), V::BigInt(b)) => a == b,
            // Bit comparison keeps Eq lawful; a NaN constant equals itself.
            (V::Float(a), V::Float(b)) => a.to_bits() == b.to_bits(),
            (
                V::Complex { real: ar, imag: ai },
                V::Complex { real: br, imag: bi },
            ) => ar.to_bits() == br.to_bits() && ai.to_bits() == bi.to_bits(),
            (V::ByteStr(a), V::ByteStr(b)) | (V::Bytes(a), V::Bytes(b)) => a == b,
            (V::Str(a), V::Str(b)) => a == b,
            (V::Tuple(a), V::Tuple(b)) | (V::List(a), V::List(b)) | (V::Set(a), V::Set(b)) => {
                a == b
            }
            (V::Map(a), V::Map(b)) => a == b,
            (V::Slice(a), V::Slice(b)) => a == b,
            (V::TypeRef(a), V::TypeRef(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ConstValue {}

impl Hash for ConstValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
        match self {
            ConstValue::None | ConstValue::True | ConstValue::False | ConstValue::Ellipsis => {}
            ConstValue::Int(n) => n.hash(state),
            ConstValue::BigInt(n) => n.hash(state),
            ConstValue::Float(f) => f.to_bits().hash(state),
            ConstValue::Complex { real, imag } => {
                real.to_bits().hash(state);
                imag.to_bits().hash(state);
            }
            ConstValue::ByteStr(b) | ConstValue::Bytes(b) => b.hash(state),
            ConstValue::Str(s) => s.hash(state),
            ConstValue::Tuple(e) | ConstValue::List(e) | ConstValue::Set(e) => e.hash(state),
            ConstValue::Map(pairs) => pairs.hash(state),
            ConstValue::Slice(slice) => slice.hash(state),
            ConstValue::TypeRef(name) => name.hash(state),
        }
    }
}

impl fmt::Debug for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.repr())
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repr())
    }
}
