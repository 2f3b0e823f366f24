//! Packet header types and flag constants.
//!
//! The public header has no fixed layout: the widths of the connection-ID
//! and sequence-number fields are selected by bits inside the first byte,
//! so those widths must be derived before any later field can be located.
//! The width functions here are pure and are pinned by tests independently
//! of the buffer-reading code.

/// Public flags byte at the start of every packet.
///
/// Bits `0x0C` select the connection-ID width and bits `0x30` select the
/// sequence-number width. The low two bits double as the packet type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublicFlags(u8);

impl PublicFlags {
    /// Set iff the packet carries a 4-byte protocol version. A client keeps
    /// setting this until the server agrees on a version.
    pub const VERSION: u8 = 0x01;

    /// Set to mark a public-reset packet.
    pub const PUBLIC_RESET: u8 = 0x02;

    /// Low two bits, read together as the packet type.
    pub const PACKET_TYPE_MASK: u8 = 0x03;

    /// Two bits selecting the connection-ID width.
    pub const CONNECTION_ID_MASK: u8 = 0x0C;
    /// 8-byte connection ID (the default until negotiated down).
    pub const CONNECTION_ID_8_BYTES: u8 = 0x0C;
    /// 4-byte connection ID.
    pub const CONNECTION_ID_4_BYTES: u8 = 0x08;
    /// 1-byte connection ID.
    pub const CONNECTION_ID_1_BYTE: u8 = 0x04;
    /// Connection ID omitted.
    pub const CONNECTION_ID_OMITTED: u8 = 0x00;

    /// Two bits selecting how many low-order sequence-number bytes are sent.
    pub const SEQUENCE_NUMBER_MASK: u8 = 0x30;
    /// 6-byte sequence number.
    pub const SEQUENCE_NUMBER_6_BYTES: u8 = 0x30;
    /// 4-byte sequence number.
    pub const SEQUENCE_NUMBER_4_BYTES: u8 = 0x20;
    /// 2-byte sequence number.
    pub const SEQUENCE_NUMBER_2_BYTES: u8 = 0x10;
    /// 1-byte sequence number.
    pub const SEQUENCE_NUMBER_1_BYTE: u8 = 0x00;

    /// Creates flags from a raw byte.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the raw flag byte.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns `true` if a 4-byte protocol version field is present.
    #[must_use]
    pub const fn has_version(self) -> bool {
        self.0 & Self::VERSION != 0
    }

    /// Returns `true` if this is a public-reset packet.
    #[must_use]
    pub const fn is_public_reset(self) -> bool {
        self.0 & Self::PUBLIC_RESET != 0
    }

    /// Returns the packet type: the low two bits of the flags.
    #[must_use]
    pub const fn packet_type(self) -> u8 {
        self.0 & Self::PACKET_TYPE_MASK
    }

    /// Returns the connection-ID field width in bytes: 8, 4, 1 or 0.
    #[must_use]
    pub const fn connection_id_width(self) -> usize {
        match self.0 & Self::CONNECTION_ID_MASK {
            Self::CONNECTION_ID_8_BYTES => 8,
            Self::CONNECTION_ID_4_BYTES => 4,
            Self::CONNECTION_ID_1_BYTE => 1,
            _ => 0,
        }
    }

    /// Returns the sequence-number field width in bytes: 6, 4, 2 or 1.
    #[must_use]
    pub const fn sequence_number_width(self) -> usize {
        match self.0 & Self::SEQUENCE_NUMBER_MASK {
            Self::SEQUENCE_NUMBER_6_BYTES => 6,
            Self::SEQUENCE_NUMBER_4_BYTES => 4,
            Self::SEQUENCE_NUMBER_2_BYTES => 2,
            _ => 1,
        }
    }

    /// Returns the flag bits selecting a connection-ID width, or `None` if
    /// the width is not one of 0, 1, 4 or 8 bytes.
    #[must_use]
    pub const fn connection_id_bits(width: usize) -> Option<u8> {
        match width {
            8 => Some(Self::CONNECTION_ID_8_BYTES),
            4 => Some(Self::CONNECTION_ID_4_BYTES),
            1 => Some(Self::CONNECTION_ID_1_BYTE),
            0 => Some(Self::CONNECTION_ID_OMITTED),
            _ => None,
        }
    }

    /// Returns the flag bits selecting a sequence-number width, or `None`
    /// if the width is not one of 1, 2, 4 or 6 bytes.
    #[must_use]
    pub const fn sequence_number_bits(width: usize) -> Option<u8> {
        match width {
            6 => Some(Self::SEQUENCE_NUMBER_6_BYTES),
            4 => Some(Self::SEQUENCE_NUMBER_4_BYTES),
            2 => Some(Self::SEQUENCE_NUMBER_2_BYTES),
            1 => Some(Self::SEQUENCE_NUMBER_1_BYTE),
            _ => None,
        }
    }

    /// Returns a copy with the version bit set.
    #[must_use]
    pub const fn with_version(self) -> Self {
        Self(self.0 | Self::VERSION)
    }
}

/// Private flags byte following the sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrivateFlags(u8);

impl PrivateFlags {
    /// For data packets, the packet carries its one entropy bit; for FEC
    /// packets, the XOR of the protected packets' entropy.
    pub const ENTROPY: u8 = 0x01;

    /// Set iff the FEC-group offset byte is present.
    pub const FEC_GROUP: u8 = 0x02;

    /// Set iff this packet is an FEC redundancy packet.
    pub const FEC: u8 = 0x04;

    /// Creates flags from a raw byte.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the raw flag byte.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns `true` if the entropy bit is set.
    #[must_use]
    pub const fn has_entropy(self) -> bool {
        self.0 & Self::ENTROPY != 0
    }

    /// Returns `true` if an FEC-group offset byte follows the flags.
    #[must_use]
    pub const fn has_fec_group(self) -> bool {
        self.0 & Self::FEC_GROUP != 0
    }

    /// Returns `true` if this is an FEC redundancy packet.
    #[must_use]
    pub const fn is_fec_packet(self) -> bool {
        self.0 & Self::FEC != 0
    }

    /// Returns a copy with the FEC-group bit set.
    #[must_use]
    pub const fn with_fec_group(self) -> Self {
        Self(self.0 | Self::FEC_GROUP)
    }
}

/// One packet's decoded public and private header.
///
/// Constructed fresh per buffer and immutable after parse. Optional fields
/// are present iff the corresponding flag bits say so; their widths are
/// derived from [`PublicFlags`] alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketHeader {
    /// Public flags byte.
    pub public_flags: PublicFlags,
    /// Connection ID, absent when the flags select a zero width.
    pub connection_id: Option<u64>,
    /// Protocol version, present iff [`PublicFlags::VERSION`] is set.
    pub version: Option<u32>,
    /// Packet sequence number (low-order bytes per the selected width).
    pub sequence_number: u64,
    /// Private flags byte.
    pub private_flags: PrivateFlags,
    /// FEC group offset, present iff [`PrivateFlags::FEC_GROUP`] is set.
    pub fec_group_offset: Option<u8>,
}

impl PacketHeader {
    /// Creates a data-packet header with the full 8-byte connection ID and
    /// 6-byte sequence number, the widths used before any negotiation.
    #[must_use]
    pub const fn data_packet(connection_id: u64, sequence_number: u64) -> Self {
        Self {
            public_flags: PublicFlags::from_raw(
                PublicFlags::CONNECTION_ID_8_BYTES | PublicFlags::SEQUENCE_NUMBER_6_BYTES,
            ),
            connection_id: Some(connection_id),
            version: None,
            sequence_number,
            private_flags: PrivateFlags::from_raw(0),
            fec_group_offset: None,
        }
    }

    /// Returns the packet type: the low two bits of the public flags.
    #[must_use]
    pub const fn packet_type(self) -> u8 {
        self.public_flags.packet_type()
    }

    /// Returns the first sequence number of this packet's FEC group, or
    /// `None` when the packet declares no group.
    ///
    /// The subtraction wraps, matching the unsigned arithmetic of the wire.
    #[must_use]
    pub fn fec_group_number(self) -> Option<u64> {
        self.fec_group_offset
            .map(|offset| self.sequence_number.wrapping_sub(u64::from(offset)))
    }
}
