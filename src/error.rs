use thiserror::Error;

/// Fatal faults surfaced by the machine core.
///
/// `DiskUnsupportedCommand` and unmapped I/O ports are deliberately absent
/// here: the former is reported to the guest through the disk's own error
/// register, the latter isn't an error at all (reads return 0xFF, writes are
/// dropped).
#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("address {address:#x} is out of range")]
    AddressOutOfRange { address: u32 },

    #[error("unimplemented opcode {opcode:#04x} at {cs:#06x}:{ip:#06x}")]
    UnimplementedOpcode { opcode: u8, cs: u16, ip: u16 },

    #[error("disk i/o error: {0}")]
    DiskIoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EmulatorError>;
