use std::fs;
use tempfile::TempDir;
use huffpack::{compress_file, decompress_file, run, Conf, Error, Mode, QuietUi};

const TEXT: &[u8] = b"It was the best of times, it was the worst of times.";

fn dir_with_input(content: &[u8]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input.txt"), content).unwrap();
    dir
}

#[test]
fn compress_and_decompress() {
    let dir = dir_with_input(TEXT);
    let input = dir.path().join("input.txt");
    let stats = compress_file(&Conf::new(&input, Mode::Compress), &QuietUi).unwrap();
    let compressed = dir.path().join("input.txt.out");
    assert_eq!(stats.input_bytes, TEXT.len() as u64);
    assert_eq!(fs::metadata(&compressed).unwrap().len(), stats.output_bytes);

    let restored = dir.path().join("restored.txt");
    let conf = Conf::new(&compressed, Mode::Decompress).with_output(&restored);
    let stats = run(&conf, &QuietUi).unwrap();
    assert_eq!(stats.output_bytes, TEXT.len() as u64);
    assert_eq!(fs::read(restored).unwrap(), TEXT);
}

#[test]
fn missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let conf = Conf::new(dir.path().join("none"), Mode::Compress);
    assert!(matches!(run(&conf, &QuietUi), Err(Error::InputMissingOrEmpty { .. })));
    assert!(!conf.output_path().exists());
}

#[test]
fn empty_input() {
    let dir = dir_with_input(b"");
    for mode in [Mode::Compress, Mode::Decompress] {
        let conf = Conf::new(dir.path().join("input.txt"), mode);
        assert!(matches!(run(&conf, &QuietUi), Err(Error::InputMissingOrEmpty { .. })));
        assert!(!conf.output_path().exists());
    }
}

#[test]
fn directory_as_input() {
    let dir = tempfile::tempdir().unwrap();
    let conf = Conf::new(dir.path(), Mode::Compress).with_output(dir.path().join("out"));
    assert!(matches!(run(&conf, &QuietUi), Err(Error::InputMissingOrEmpty { .. })));
}

#[test]
fn unwritable_output() {
    let dir = dir_with_input(TEXT);
    let conf = Conf::new(dir.path().join("input.txt"), Mode::Compress)
        .with_output(dir.path().join("no_such_dir").join("out"));
    assert!(matches!(run(&conf, &QuietUi), Err(Error::OutputUnwritable { .. })));
}

#[test]
fn truncated_file_leaves_partial_output() {
    let dir = dir_with_input(TEXT);
    let compressed = dir.path().join("input.txt.out");
    compress_file(&Conf::new(dir.path().join("input.txt"), Mode::Compress), &QuietUi).unwrap();
    let mut content = fs::read(&compressed).unwrap();
    content.truncate(content.len() - 3);
    fs::write(&compressed, content).unwrap();

    let restored = dir.path().join("restored.txt");
    let result = decompress_file(&Conf::new(&compressed, Mode::Decompress).with_output(&restored), &QuietUi);
    let Err(Error::TruncatedBody { decoded, expected }) = result else { panic!("expected truncated body error") };
    assert_eq!(expected, TEXT.len() as u64);
    assert!(decoded < expected);
    let partial = fs::read(restored).unwrap();
    assert_eq!(partial.len() as u64, decoded);
    assert!(TEXT.starts_with(&partial));
}

#[test]
fn corrupt_header() {
    let dir = dir_with_input(&[5]);
    let conf = Conf::new(dir.path().join("input.txt"), Mode::Decompress);
    assert!(matches!(run(&conf, &QuietUi), Err(Error::CorruptHeader(_))));
}
