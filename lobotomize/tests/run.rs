use std::fs;
use std::path::Path;

use lobotomize::{run, Options};
use lobotomy::{Config, Data};
use minielf::{layout, Header, HEADER_SIZE};

fn sample_elf() -> Vec<u8> {
    let mut bytes = vec![0; HEADER_SIZE];
    bytes[layout::MAGIC].copy_from_slice(b"\x7fELF");
    bytes[layout::CLASS] = 2;
    bytes[layout::DATA] = 1;
    bytes[layout::IDENT_REST][0] = 1;
    bytes[layout::TYPE_MACHINE].copy_from_slice(&[2, 0, 0x3e, 0]);
    bytes[layout::VERSION].copy_from_slice(&[1, 0, 0, 0]);
    bytes[layout::ENTRY].copy_from_slice(&0x401000u64.to_le_bytes());
    bytes[layout::PH_OFF].copy_from_slice(&0x40u64.to_le_bytes());
    bytes[layout::SH_OFF].copy_from_slice(&0x1200u64.to_le_bytes());
    bytes[layout::HEADER_SIZE].copy_from_slice(&[0x40, 0]);
    bytes[layout::PH_ENTRY].copy_from_slice(&[0x38, 0, 1, 0]);
    bytes[layout::SH_ENTRY].copy_from_slice(&[0x40, 0, 12, 0, 11, 0]);
    bytes.extend(std::iter::repeat(0xcc).take(0x1000));
    bytes
}

fn options(input: &Path) -> Options<'_> {
    Options {
        input,
        output: None,
        config: Config::default(),
    }
}

#[test]
fn writes_default_output_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog");
    fs::write(&input, sample_elf()).unwrap();

    let output = run(&options(&input)).unwrap();

    assert_eq!(output, dir.path().join("prog_fk"));
    let written = fs::read(&output).unwrap();
    assert_eq!(written.len(), sample_elf().len());

    let header = Header::parse(&written).unwrap();
    assert!(header.is_valid());
    assert!(!header.has_section_headers());
    assert_eq!(header.entry, 0x401000);
    assert_eq!(header.ph_off, 0x40);

    // Input is left alone.
    assert_eq!(fs::read(&input).unwrap(), sample_elf());
}

#[test]
fn writes_explicit_output_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog");
    let output = dir.path().join("renamed");
    fs::write(&input, sample_elf()).unwrap();

    let written_to = run(&Options {
        input: &input,
        output: Some(&output),
        config: Config {
            class: None,
            data: Some(Data::Big),
        },
    })
    .unwrap();

    assert_eq!(written_to, output);
    assert!(!dir.path().join("prog_fk").exists());

    let written = fs::read(&output).unwrap();
    assert_eq!(written[layout::DATA], 2);
    assert_eq!(written[layout::VERSION], [0, 0, 0, 1]);
    assert_eq!(written[layout::HEADER_SIZE], [0, 0x40]);
}

#[test]
fn rewrites_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog");
    fs::write(&input, sample_elf()).unwrap();

    run(&Options {
        input: &input,
        output: Some(&input),
        config: Config::default(),
    })
    .unwrap();

    let written = fs::read(&input).unwrap();
    assert_eq!(written.len(), sample_elf().len());
    assert!(written[layout::SH_OFF].iter().all(|&b| b == 0));
    assert!(written[layout::SH_ENTRY].iter().all(|&b| b == 0));
}

#[cfg(unix)]
#[test]
fn output_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog");
    fs::write(&input, sample_elf()).unwrap();

    let output = run(&options(&input)).unwrap();

    let mode = fs::metadata(output).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o775);
}

#[test]
fn truncated_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("short");
    fs::write(&input, &sample_elf()[..32]).unwrap();

    let err = run(&options(&input)).unwrap_err();

    assert!(err.root_cause().to_string().contains("32 bytes"));
    assert!(!dir.path().join("short_fk").exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nope");

    let err = run(&options(&input)).unwrap_err();

    assert!(err.to_string().contains("failed to read"));
    assert!(!dir.path().join("nope_fk").exists());
}
