//! Protocol error codes carried by `RST_STREAM`, `CONNECTION_CLOSE` and
//! `GOAWAY` frames.
//!
//! The numeric values are fixed by the wire protocol and are not dense:
//! codes 21 and 47 were retired and must never be reassigned, and later
//! additions were appended out of numeric order. The table below keeps the
//! registry's grouping rather than sorting by value.

use std::fmt;

macro_rules! error_codes {
    ($($(#[$doc:meta])* $name:ident = $code:literal => $wire:literal,)+) => {
        /// A registered protocol error code.
        ///
        /// `#[non_exhaustive]` because peers running newer protocol
        /// revisions may send codes this registry does not know; frame
        /// codecs therefore carry raw `u32` values and convert through
        /// [`ErrorCode::from_code`] only at the edges.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        #[non_exhaustive]
        pub enum ErrorCode {
            $($(#[$doc])* $name = $code,)+
        }

        impl ErrorCode {
            /// The wire value of this code.
            #[must_use]
            pub const fn code(self) -> u32 {
                self as u32
            }

            /// Looks up a wire value, returning `None` for unregistered or
            /// retired codes.
            #[must_use]
            pub const fn from_code(code: u32) -> Option<Self> {
                match code {
                    $($code => Some(Self::$name),)+
                    _ => None,
                }
            }

            /// The registry name of this code.
            #[must_use]
            pub const fn wire_name(self) -> &'static str {
                match self {
                    $(Self::$name => $wire,)+
                }
            }
        }
    };
}

error_codes! {
    /// No error.
    NoError = 0 => "QUIC_NO_ERROR",
    /// Connection has reached an invalid state.
    InternalError = 1 => "QUIC_INTERNAL_ERROR",
    /// Data frames arrived after a FIN or reset.
    StreamDataAfterTermination = 2 => "QUIC_STREAM_DATA_AFTER_TERMINATION",
    /// Packet header is malformed.
    InvalidPacketHeader = 3 => "QUIC_INVALID_PACKET_HEADER",
    /// Frame data is malformed.
    InvalidFrameData = 4 => "QUIC_INVALID_FRAME_DATA",
    /// FEC data is malformed.
    InvalidFecData = 5 => "QUIC_INVALID_FEC_DATA",
    /// `RST_STREAM` frame data is malformed.
    InvalidRstStreamData = 6 => "QUIC_INVALID_RST_STREAM_DATA",
    /// `CONNECTION_CLOSE` frame data is malformed.
    InvalidConnectionCloseData = 7 => "QUIC_INVALID_CONNECTION_CLOSE_DATA",
    /// `GOAWAY` frame data is malformed.
    InvalidGoAwayData = 8 => "QUIC_INVALID_GOAWAY_DATA",
    /// ACK frame data is malformed.
    InvalidAckData = 9 => "QUIC_INVALID_ACK_DATA",
    /// Version negotiation packet is malformed.
    InvalidVersionNegotiationPacket = 10 => "QUIC_INVALID_VERSION_NEGOTIATION_PACKET",
    /// Public reset packet is malformed.
    InvalidPublicRstPacket = 11 => "QUIC_INVALID_PUBLIC_RST_PACKET",
    /// Decryption failed.
    DecryptionFailure = 12 => "QUIC_DECRYPTION_FAILURE",
    /// Encryption failed.
    EncryptionFailure = 13 => "QUIC_ENCRYPTION_FAILURE",
    /// Packet exceeded the maximum packet size.
    PacketTooLarge = 14 => "QUIC_PACKET_TOO_LARGE",
    /// Data was sent for a stream that does not exist.
    PacketForNonexistentStream = 15 => "QUIC_PACKET_FOR_NONEXISTENT_STREAM",
    /// The peer is going away; may be a client or server.
    PeerGoingAway = 16 => "QUIC_PEER_GOING_AWAY",
    /// A stream ID was invalid.
    InvalidStreamId = 17 => "QUIC_INVALID_STREAM_ID",
    /// Too many streams already open.
    TooManyOpenStreams = 18 => "QUIC_TOO_MANY_OPEN_STREAMS",
    /// Received a public reset for this connection.
    PublicReset = 19 => "QUIC_PUBLIC_RESET",
    /// Invalid protocol version.
    InvalidVersion = 20 => "QUIC_INVALID_VERSION",
    // 21 retired.
    /// The header ID for a stream was too far from the previous one.
    InvalidHeaderId = 22 => "QUIC_INVALID_HEADER_ID",
    /// A negotiable handshake parameter had an invalid value.
    InvalidNegotiatedValue = 23 => "QUIC_INVALID_NEGOTIATED_VALUE",
    /// Decompression failed.
    DecompressionFailure = 24 => "QUIC_DECOMPRESSION_FAILURE",
    /// The negotiated (or default) idle timeout was hit.
    ConnectionTimedOut = 25 => "QUIC_CONNECTION_TIMED_OUT",
    /// An error occurred while migrating addresses.
    ErrorMigratingAddress = 26 => "QUIC_ERROR_MIGRATING_ADDRESS",
    /// An error occurred while writing to the socket.
    PacketWriteError = 27 => "QUIC_PACKET_WRITE_ERROR",
    /// The handshake failed.
    HandshakeFailed = 28 => "QUIC_HANDSHAKE_FAILED",
    /// A handshake message contained out-of-order tags.
    CryptoTagsOutOfOrder = 29 => "QUIC_CRYPTO_TAGS_OUT_OF_ORDER",
    /// A handshake message contained too many entries.
    CryptoTooManyEntries = 30 => "QUIC_CRYPTO_TOO_MANY_ENTRIES",
    /// A handshake message contained an invalid value length.
    CryptoInvalidValueLength = 31 => "QUIC_CRYPTO_INVALID_VALUE_LENGTH",
    /// A crypto message arrived after the handshake completed.
    CryptoMessageAfterHandshakeComplete = 32 => "QUIC_CRYPTO_MESSAGE_AFTER_HANDSHAKE_COMPLETE",
    /// A crypto message carried an illegal message tag.
    InvalidCryptoMessageType = 33 => "QUIC_INVALID_CRYPTO_MESSAGE_TYPE",
    /// A crypto message carried an illegal parameter.
    InvalidCryptoMessageParameter = 34 => "QUIC_INVALID_CRYPTO_MESSAGE_PARAMETER",
    /// A crypto message was missing a mandatory parameter.
    CryptoMessageParameterNotFound = 35 => "QUIC_CRYPTO_MESSAGE_PARAMETER_NOT_FOUND",
    /// A crypto parameter had no overlap with the local parameter.
    CryptoMessageParameterNoOverlap = 36 => "QUIC_CRYPTO_MESSAGE_PARAMETER_NO_OVERLAP",
    /// A crypto parameter contained too few values.
    CryptoMessageIndexNotFound = 37 => "QUIC_CRYPTO_MESSAGE_INDEX_NOT_FOUND",
    /// Internal error in crypto processing.
    CryptoInternalError = 38 => "QUIC_CRYPTO_INTERNAL_ERROR",
    /// A handshake message specified an unsupported version.
    CryptoVersionNotSupported = 39 => "QUIC_CRYPTO_VERSION_NOT_SUPPORTED",
    /// No common crypto primitives between the peers.
    CryptoNoSupport = 40 => "QUIC_CRYPTO_NO_SUPPORT",
    /// The server rejected the client hello too many times.
    CryptoTooManyRejects = 41 => "QUIC_CRYPTO_TOO_MANY_REJECTS",
    /// The client rejected the server's certificate chain or signature.
    ProofInvalid = 42 => "QUIC_PROOF_INVALID",
    /// A crypto message carried a duplicate tag.
    CryptoDuplicateTag = 43 => "QUIC_CRYPTO_DUPLICATE_TAG",
    /// A crypto message arrived at the wrong encryption level.
    CryptoEncryptionLevelIncorrect = 44 => "QUIC_CRYPTO_ENCRYPTION_LEVEL_INCORRECT",
    /// The server config has expired.
    CryptoServerConfigExpired = 45 => "QUIC_CRYPTO_SERVER_CONFIG_EXPIRED",
    /// STREAM frame data is malformed.
    InvalidStreamData = 46 => "QUIC_INVALID_STREAM_DATA",
    // 47 retired.
    /// The packet contained no payload.
    MissingPayload = 48 => "QUIC_MISSING_PAYLOAD",
    /// A priority was invalid.
    InvalidPriority = 49 => "QUIC_INVALID_PRIORITY",
    /// A STREAM frame arrived with no data and no FIN.
    InvalidStreamFrame = 50 => "QUIC_INVALID_STREAM_FRAME",
    /// An error occurred while reading from the socket.
    PacketReadError = 51 => "QUIC_PACKET_READ_ERROR",
    /// An invalid channel ID signature was supplied.
    InvalidChannelIdSignature = 52 => "QUIC_INVALID_CHANNEL_ID_SIGNATURE",
    /// Symmetric key setup failed.
    CryptoSymmetricKeySetupFailed = 53 => "QUIC_CRYPTO_SYMMETRIC_KEY_SETUP_FAILED",
    /// A handshake message arrived while validating the previous one.
    CryptoMessageWhileValidatingClientHello = 54 => "QUIC_CRYPTO_MESSAGE_WHILE_VALIDATING_CLIENT_HELLO",
    /// Version negotiation appears to have been tampered with.
    VersionNegotiationMismatch = 55 => "QUIC_VERSION_NEGOTIATION_MISMATCH",
    /// Invalid data on the headers stream.
    InvalidHeadersStreamData = 56 => "QUIC_INVALID_HEADERS_STREAM_DATA",
    /// `WINDOW_UPDATE` frame data is malformed.
    InvalidWindowUpdateData = 57 => "QUIC_INVALID_WINDOW_UPDATE_DATA",
    /// `BLOCKED` frame data is malformed.
    InvalidBlockedData = 58 => "QUIC_INVALID_BLOCKED_DATA",
    /// The peer received more data than flow control allows.
    FlowControlReceivedTooMuchData = 59 => "QUIC_FLOW_CONTROL_RECEIVED_TOO_MUCH_DATA",
    /// `STOP_WAITING` frame data is malformed.
    InvalidStopWaitingData = 60 => "QUIC_INVALID_STOP_WAITING_DATA",
    /// STREAM frame data is not encrypted.
    UnencryptedStreamData = 61 => "QUIC_UNENCRYPTED_STREAM_DATA",
    /// The connection was IP pooled into an existing connection.
    ConnectionIpPooled = 62 => "QUIC_CONNECTION_IP_POOLED",
    /// The peer sent more data than flow control allows.
    FlowControlSentTooMuchData = 63 => "QUIC_FLOW_CONTROL_SENT_TOO_MUCH_DATA",
    /// The peer received an invalid flow control window.
    FlowControlInvalidWindow = 64 => "QUIC_FLOW_CONTROL_INVALID_WINDOW",
    /// A server config update arrived before the handshake completed.
    CryptoUpdateBeforeHandshakeComplete = 65 => "QUIC_CRYPTO_UPDATE_BEFORE_HANDSHAKE_COMPLETE",
    /// The peer has not been sending FIN or RST for its streams.
    TooManyUnfinishedStreams = 66 => "QUIC_TOO_MANY_UNFINISHED_STREAMS",
    /// The overall connection timeout was hit.
    ConnectionOverallTimedOut = 67 => "QUIC_CONNECTION_OVERALL_TIMED_OUT",
    /// Too many outstanding sent packets.
    TooManyOutstandingSentPackets = 68 => "QUIC_TOO_MANY_OUTSTANDING_SENT_PACKETS",
    /// Too many outstanding received packets.
    TooManyOutstandingReceivedPackets = 69 => "QUIC_TOO_MANY_OUTSTANDING_RECEIVED_PACKETS",
    /// The job loading the server config was cancelled.
    ConnectionCancelled = 70 => "QUIC_CONNECTION_CANCELLED",
    /// Disabled because of a high packet loss rate.
    BadPacketLossRate = 71 => "QUIC_BAD_PACKET_LOSS_RATE",
    /// Upper bound of the registry; not a real error.
    LastError = 72 => "QUIC_LAST_ERROR",
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
