/// Appended to the input file name when no output path is given.
pub const OUTPUT_SUFFIX: &str = "_fk";

/// `rwxrwxr-x`
pub const OUTPUT_MODE: u32 = 0o775;
