use std::error;
use std::fmt;
use std::ops::Range;

use log::{debug, trace};
use minielf::{layout, Class, Data, HEADER_SIZE, MAGIC};

use crate::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The input is too short to hold an ELF header.
    TruncatedInput { len: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedInput { len } => write!(
                f,
                "input is {len} bytes, shorter than the {HEADER_SIZE}-byte ELF header"
            ),
        }
    }
}

impl error::Error for Error {}

/// How the multi-byte fields tied to the declared byte order are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Identity,
    Reverse,
}

impl ByteOrder {
    /// Selects the order for a header originally declaring `original` whose encoding is being
    /// overridden with `requested`.
    pub fn select(original: u8, requested: Option<Data>) -> Self {
        match requested {
            Some(data) if data.to_raw() != original => Self::Reverse,
            _ => Self::Identity,
        }
    }
}

/// Produces a copy of `input` with the section header fields of its ELF header zeroed and the
/// overrides in `config` applied.
///
/// Only `e_version` and `e_ehsize` are byte-swapped when the endianness override differs from the
/// declared one; every other multi-byte field is copied as-is.
///
/// # Errors
///
/// Returns [`Error::TruncatedInput`] if `input` is shorter than [`HEADER_SIZE`].
pub fn transform(input: &[u8], config: &Config) -> Result<Vec<u8>, Error> {
    if input.len() < HEADER_SIZE {
        return Err(Error::TruncatedInput { len: input.len() });
    }

    let original_class = input[layout::CLASS];
    let original_data = input[layout::DATA];
    let order = ByteOrder::select(original_data, config.data);

    debug!(
        "class {:#04x} -> {:#04x}, data {:#04x} -> {:#04x}, order {:?}",
        original_class,
        config.class.map_or(original_class, Class::to_raw),
        original_data,
        config.data.map_or(original_data, Data::to_raw),
        order
    );

    let mut writer = HeaderWriter::with_capacity(input.len());

    writer.put(layout::MAGIC, &MAGIC);
    writer.put_byte(
        layout::CLASS,
        config.class.map_or(original_class, Class::to_raw),
    );
    writer.put_byte(
        layout::DATA,
        config.data.map_or(original_data, Data::to_raw),
    );
    writer.copy(input, layout::IDENT_REST);
    writer.copy(input, layout::TYPE_MACHINE);
    writer.copy_ordered(input, layout::VERSION, order);
    writer.copy(input, layout::ENTRY_PH_OFF);
    writer.zero(layout::SH_OFF);
    writer.copy(input, layout::FLAGS);
    writer.copy_ordered(input, layout::HEADER_SIZE, order);
    writer.copy(input, layout::PH_ENTRY);
    writer.zero(layout::SH_ENTRY);
    writer.copy(input, HEADER_SIZE..input.len());

    Ok(writer.finish())
}

/// Forward-only builder for the output buffer.
///
/// Every field must start exactly where the previous one ended.
struct HeaderWriter {
    buf: Vec<u8>,
}

impl HeaderWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn put(&mut self, field: Range<usize>, bytes: &[u8]) {
        self.check_offset(&field);
        debug_assert_eq!(field.len(), bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    fn put_byte(&mut self, off: usize, val: u8) {
        self.put(off..off + 1, &[val]);
    }

    fn copy(&mut self, input: &[u8], field: Range<usize>) {
        let bytes = &input[field.clone()];
        self.put(field, bytes);
    }

    fn copy_ordered(&mut self, input: &[u8], field: Range<usize>, order: ByteOrder) {
        self.check_offset(&field);
        let bytes = &input[field];
        match order {
            ByteOrder::Identity => self.buf.extend_from_slice(bytes),
            ByteOrder::Reverse => self.buf.extend(bytes.iter().rev()),
        }
    }

    fn zero(&mut self, field: Range<usize>) {
        self.check_offset(&field);
        trace!("zeroing {:#x}..{:#x}", field.start, field.end);
        self.buf.resize(field.end, 0);
    }

    fn check_offset(&self, field: &Range<usize>) {
        debug_assert_eq!(self.buf.len(), field.start, "header fields written out of order");
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}
