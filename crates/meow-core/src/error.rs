use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeowError {
    /// Represents an unsupported carrier media. For example, a WAV file is not supported
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents an image whose bit budget cannot even hold the container header
    #[error("Image is too small to carry a MEOW container ({0} bytes of bit budget)")]
    ImageTooSmall(usize),

    /// Represents a compressed payload that exceeds the capacity of the carrier image
    #[error("Payload too large: {needed} bytes needed, but the image can carry only {capacity} bytes")]
    PayloadTooLarge { needed: usize, capacity: usize },

    /// Represents a bit sequence longer than the embedder can place into the image
    #[error("Insufficient capacity: the bit sequence does not fit into the image")]
    InsufficientCapacity,

    /// Represents an image without the MEOW marker. This is the regular outcome for plain images
    #[error("Not a MEOW container")]
    NotAMeowContainer,

    /// Represents a bitstream that ends before the declared payload, or that is not byte aligned
    #[error("Truncated bitstream")]
    TruncatedBitstream,

    /// Represents a payload that was fully read but cannot be decompressed or parsed
    #[error("Embedded payload is corrupt: {0}")]
    CorruptPayload(String),

    /// Represents a metadata record that cannot be turned into JSON
    #[error("Metadata record cannot be serialized")]
    MetadataSerialization(#[source] serde_json::Error),

    /// Represents metadata handed in by a caller that is not a JSON object
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    /// Represents a bits per channel setting other than 1, 2, 4 or 8
    #[error("Unsupported number of bits per channel: {0}")]
    InvalidBitsPerChannel(u8),

    /// Represents an empty or duplicated color channel scan order
    #[error("Invalid color channel order")]
    InvalidChannelOrder,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,
}

impl MeowError {
    /// true if the error only says that the image does not carry a MEOW container,
    /// callers usually fall back to treat the file as a plain image
    pub fn is_plain_image(&self) -> bool {
        matches!(self, MeowError::NotAMeowContainer)
    }
}
