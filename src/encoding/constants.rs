//! Constants for the CQL value wire format.

/// Collection and composite-key framing.
pub mod frame {
    /// Size in bytes of every count and length prefix.
    pub const PREFIX_LEN: usize = 2;
    /// Byte closing each fragment of a composite routing key.
    pub const COMPOSITE_TERMINATOR: u8 = 0x00;
}

/// Wire widths of the fixed-width scalars.
pub mod widths {
    /// `boolean`.
    pub const BOOLEAN: usize = 1;
    /// `int` and `float`.
    pub const FOUR: usize = 4;
    /// `bigint`, `counter`, `double` and `timestamp`.
    pub const EIGHT: usize = 8;
    /// `uuid` and `timeuuid`.
    pub const UUID: usize = 16;
}
