//! Opening plain and gzip-compressed input files.

use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use flate2::read::GzDecoder;

/// The extension that marks a gzip-compressed file.
const GZIP_EXTENSION: &str = "gz";

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// Opens a file for buffered reading.
///
/// Files ending in `.gz` are transparently decompressed.
pub fn open<P>(path: P) -> io::Result<Box<dyn BufRead>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)?;

    let compressed = path
        .extension()
        .map(|ext| ext == GZIP_EXTENSION)
        .unwrap_or(false);

    match compressed {
        true => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        false => Ok(Box::new(BufReader::new(file))),
    }
}

/// Reads a line from a buffered reader, stripping the line ending.
pub(crate) fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead + ?Sized,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_read_line() {
        let data = b"hello\r\nworld!";
        let mut cursor = io::Cursor::new(data);

        let mut buffer = String::new();
        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "hello");
        assert_eq!(len, 7);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "world!");
        assert_eq!(len, 6);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "");
        assert_eq!(len, 0);
    }

    #[test]
    fn open_plain_and_gzip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("io")?;

        let plain = dir.path().join("plain.txt");
        std::fs::write(&plain, "plain\n")?;

        let gzipped = dir.path().join("gzipped.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&gzipped)?, Compression::default());
        encoder.write_all(b"gzipped\n")?;
        encoder.finish()?;

        let mut buffer = String::new();

        read_line(&mut open(&plain)?, &mut buffer)?;
        assert_eq!(buffer, "plain");

        read_line(&mut open(&gzipped)?, &mut buffer)?;
        assert_eq!(buffer, "gzipped");

        Ok(())
    }

    #[test]
    fn open_missing_file() {
        let err = open("this/path/does/not/exist.txt").map(|_| ()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
