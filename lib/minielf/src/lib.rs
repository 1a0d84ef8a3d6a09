#![cfg_attr(not(test), no_std)]

pub const MAGIC: [u8; 4] = *b"\x7fELF";

pub const CLASS_32: u8 = 1;
pub const CLASS_64: u8 = 2;

pub const DATA_LE: u8 = 1;
pub const DATA_BE: u8 = 2;

/// Size of the fixed ELF header region (64-bit layout).
pub const HEADER_SIZE: usize = 0x40;

/// Byte ranges of the 64-bit ELF header fields.
pub mod layout {
    use core::ops::Range;

    pub const MAGIC: Range<usize> = 0x00..0x04;
    pub const CLASS: usize = 0x04;
    pub const DATA: usize = 0x05;
    /// `EI_VERSION`, `EI_OSABI`, `EI_ABIVERSION` and `EI_PAD`.
    pub const IDENT_REST: Range<usize> = 0x06..0x10;
    /// `e_type` and `e_machine`.
    pub const TYPE_MACHINE: Range<usize> = 0x10..0x14;
    pub const VERSION: Range<usize> = 0x14..0x18;
    /// `e_entry` and `e_phoff`.
    pub const ENTRY_PH_OFF: Range<usize> = 0x18..0x28;
    pub const ENTRY: Range<usize> = 0x18..0x20;
    pub const PH_OFF: Range<usize> = 0x20..0x28;
    pub const SH_OFF: Range<usize> = 0x28..0x30;
    pub const FLAGS: Range<usize> = 0x30..0x34;
    pub const HEADER_SIZE: Range<usize> = 0x34..0x36;
    /// `e_phentsize` and `e_phnum`.
    pub const PH_ENTRY: Range<usize> = 0x36..0x3a;
    pub const PH_ENTRY_NUM: Range<usize> = 0x38..0x3a;
    /// `e_shentsize`, `e_shnum` and `e_shstrndx`.
    pub const SH_ENTRY: Range<usize> = 0x3a..0x40;
    pub const SH_ENTRY_SIZE: Range<usize> = 0x3a..0x3c;
    pub const SH_ENTRY_NUM: Range<usize> = 0x3c..0x3e;
    pub const SH_STR_INDEX: Range<usize> = 0x3e..0x40;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Elf32,
    Elf64,
}

impl Class {
    pub const fn to_raw(self) -> u8 {
        match self {
            Self::Elf32 => CLASS_32,
            Self::Elf64 => CLASS_64,
        }
    }

    pub const fn from_raw(val: u8) -> Option<Self> {
        match val {
            CLASS_32 => Some(Self::Elf32),
            CLASS_64 => Some(Self::Elf64),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Data {
    Little,
    Big,
}

impl Data {
    pub const fn to_raw(self) -> u8 {
        match self {
            Self::Little => DATA_LE,
            Self::Big => DATA_BE,
        }
    }

    pub const fn from_raw(val: u8) -> Option<Self> {
        match val {
            DATA_LE => Some(Self::Little),
            DATA_BE => Some(Self::Big),
            _ => None,
        }
    }
}

/// The header fields relevant to section header stripping, decoded under the declared byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 4],
    pub class: Class,
    pub data: Data,
    pub version: u32,
    pub entry: u64,
    pub ph_off: u64,
    pub sh_off: u64,
    pub header_size: u16,
    pub ph_entry_num: u16,
    pub sh_entry_size: u16,
    pub sh_entry_num: u16,
    pub sh_str_index: u16,
}

impl Header {
    /// Decodes a 64-bit header from the start of `bytes`.
    ///
    /// Returns `None` if `bytes` is shorter than [`HEADER_SIZE`], or if the class is not 64-bit or
    /// the data encoding is unknown.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; HEADER_SIZE] = bytes.get(..HEADER_SIZE)?.try_into().ok()?;

        let class = Class::from_raw(bytes[layout::CLASS])?;
        if class != Class::Elf64 {
            return None;
        }
        let data = Data::from_raw(bytes[layout::DATA])?;

        let mut magic = [0; 4];
        magic.copy_from_slice(&bytes[layout::MAGIC]);

        Some(Self {
            magic,
            class,
            data,
            version: read_u32(data, &bytes[layout::VERSION]),
            entry: read_u64(data, &bytes[layout::ENTRY]),
            ph_off: read_u64(data, &bytes[layout::PH_OFF]),
            sh_off: read_u64(data, &bytes[layout::SH_OFF]),
            header_size: read_u16(data, &bytes[layout::HEADER_SIZE]),
            ph_entry_num: read_u16(data, &bytes[layout::PH_ENTRY_NUM]),
            sh_entry_size: read_u16(data, &bytes[layout::SH_ENTRY_SIZE]),
            sh_entry_num: read_u16(data, &bytes[layout::SH_ENTRY_NUM]),
            sh_str_index: read_u16(data, &bytes[layout::SH_STR_INDEX]),
        })
    }

    pub fn is_valid(&self) -> bool {
        self.magic == MAGIC && self.header_size as usize == HEADER_SIZE
    }

    pub fn has_section_headers(&self) -> bool {
        self.sh_off != 0 || self.sh_entry_num != 0
    }
}

fn read_u16(data: Data, bytes: &[u8]) -> u16 {
    let mut buf = [0; 2];
    buf.copy_from_slice(bytes);
    match data {
        Data::Little => u16::from_le_bytes(buf),
        Data::Big => u16::from_be_bytes(buf),
    }
}

fn read_u32(data: Data, bytes: &[u8]) -> u32 {
    let mut buf = [0; 4];
    buf.copy_from_slice(bytes);
    match data {
        Data::Little => u32::from_le_bytes(buf),
        Data::Big => u32::from_be_bytes(buf),
    }
}

fn read_u64(data: Data, bytes: &[u8]) -> u64 {
    let mut buf = [0; 8];
    buf.copy_from_slice(bytes);
    match data {
        Data::Little => u64::from_le_bytes(buf),
        Data::Big => u64::from_be_bytes(buf),
    }
}
