pub const FLAG_MB: u8 = 0x80;
pub const FLAG_ME: u8 = 0x40;
pub const FLAG_CF: u8 = 0x20;
pub const FLAG_SR: u8 = 0x10;
pub const FLAG_IL: u8 = 0x08;
pub const TNF_MASK: u8 = 0x07;

pub const TNF_MEDIA: u8 = 0x02;

pub const SHORT_PAYLOAD_MAX: usize = u8::MAX as usize;
pub const LONG_LENGTH_SIZE: usize = 4;
