use crate::{BitCounter, BitReader, BitWrite, SerdeErr};

/// A value that knows how to write itself into a bit stream and read itself
/// back out again
pub trait Serde: Sized + Clone {
    fn ser(&self, writer: &mut dyn BitWrite);

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr>;

    /// Number of bits `ser` will write for this value
    fn bit_length(&self) -> u32 {
        let mut counter = BitCounter::new();
        self.ser(&mut counter);
        counter.bits()
    }
}

/// Implemented by types whose encoded size never depends on the value
pub trait ConstBitLength {
    fn const_bit_length() -> u32;
}
