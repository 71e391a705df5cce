use super::*;
use crate::error::DoesNotFit;

/// An immediate class: a word belongs to it when `word & MASK == FLAG`.
pub trait Tagged
where
    Self: Sized + Copy,
{
    const MASK: u64;
    const FLAG: u64;

    #[inline(always)]
    fn is(value: Value) -> bool {
        value.0 & Self::MASK == Self::FLAG
    }

    fn tag(self) -> Value;

    /// Decodes a word that already passed [Tagged::is]. Words of another
    /// class decode to garbage.
    fn untag_word(word: u64) -> Self;

    #[inline(always)]
    fn untag(value: Value) -> Option<Self> {
        if Self::is(value) {
            Some(Self::untag_word(value.0))
        } else {
            None
        }
    }
}

impl Fixnum {
    pub fn new(int: i64) -> Result<Fixnum, DoesNotFit> {
        if (FIXNUM_MIN..=FIXNUM_MAX).contains(&int) {
            Ok(Fixnum(int))
        } else {
            Err(DoesNotFit::Integer(int))
        }
    }
}

impl Tagged for Fixnum {
    const MASK: u64 = FIXNUM_MASK;
    const FLAG: u64 = FIXNUM_FLAG;

    #[inline(always)]
    fn tag(self) -> Value {
        Value(((self.0 as u64) << 1) | FIXNUM_FLAG)
    }

    #[inline(always)]
    fn untag_word(word: u64) -> Self {
        Fixnum((word as i64) >> 1)
    }
}

/// Raw pattern whose flonum slot is taken by `+0.0`.
const ZERO_SLOT: u64 = 0x3000_0000_0000_0000;
/// Raw pattern whose flonum slot is taken by the canonical NaN.
const NAN_SLOT: u64 = 0x3000_0000_0000_0001;

const CANONICAL_NAN: u64 = 0x7ff8_0000_0000_0000;

const FLONUM_ZERO: u64 = 0x8000_0000_0000_0002;
const FLONUM_NAN: u64 = 0x8000_0000_0000_000a;

impl Flonum {
    /// Packs `float` when bits 62..60 of its pattern are `011` or `100`,
    /// plus `+0.0` and the canonical NaN. Everything else must be boxed.
    pub fn new(float: f64) -> Result<Flonum, DoesNotFit> {
        let bits = float.to_bits();
        let band = (bits >> 60) & 0x7;

        if (band == 3 || band == 4) && bits != ZERO_SLOT && bits != NAN_SLOT {
            Ok(Flonum(float))
        } else if bits == 0 || bits == CANONICAL_NAN {
            Ok(Flonum(float))
        } else {
            Err(DoesNotFit::Float(float))
        }
    }
}

impl Tagged for Flonum {
    const MASK: u64 = FLONUM_MASK;
    const FLAG: u64 = FLONUM_FLAG;

    fn tag(self) -> Value {
        let bits = self.0.to_bits();
        match bits {
            0 => Value(FLONUM_ZERO),
            CANONICAL_NAN => Value(FLONUM_NAN),
            bits => Value((bits.rotate_left(3) & !0x01) | FLONUM_FLAG),
        }
    }

    fn untag_word(word: u64) -> Self {
        match word {
            FLONUM_ZERO => Flonum(0.0),
            FLONUM_NAN => Flonum(f64::from_bits(CANONICAL_NAN)),
            word => {
                // bit 63 holds bit 60 of the float, which fixes the two
                // exponent bits the flag overwrote: 1 -> 01, 0 -> 10.
                let high = 2 - (word >> 63);
                Flonum(f64::from_bits((high | (word & !0x03)).rotate_right(3)))
            }
        }
    }
}

impl Tagged for StaticSymbol {
    const MASK: u64 = SYMBOL_MASK;
    const FLAG: u64 = SYMBOL_FLAG;

    #[inline(always)]
    fn tag(self) -> Value {
        Value(((self.0 .0 as u64) << SPECIAL_SHIFT) | SYMBOL_FLAG)
    }

    #[inline(always)]
    fn untag_word(word: u64) -> Self {
        StaticSymbol(SymbolId((word >> SPECIAL_SHIFT) as u32))
    }
}

impl<T: Tagged> From<T> for Value {
    #[inline(always)]
    fn from(value: T) -> Self {
        value.tag()
    }
}
