use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use oml_pdus::commands::BS11_MAX_SEGMENT_LINE;

/// Longest file id accepted in a header or manifest entry
pub const MAX_FILE_ID_LEN: usize = 12;
/// Versions longer than this are truncated
pub const MAX_FILE_VERSION_LEN: usize = 80;

const HEADER_MAGIC: &[u8] = b"@(#)";

/// Line-oriented reader over a software image. Always holds the next line, so the
/// final segment can be flagged as such when it is sent.
pub trait SegmentSource {
    /// The line the next call to `next_line` will return
    fn peek_line(&self) -> Option<&[u8]>;
    fn next_line(&mut self) -> io::Result<Option<Vec<u8>>>;
    /// True once the line most recently returned was the final one
    fn is_last_segment(&self) -> bool;
    fn bytes_consumed(&self) -> u64;
    fn total_len(&self) -> u64;

    fn progress_percent(&self) -> u8 {
        let total = self.total_len();
        if total == 0 {
            return 100;
        }
        (self.bytes_consumed().saturating_mul(100) / total).min(100) as u8
    }
}

/// Reads lines of at most `BS11_MAX_SEGMENT_LINE` bytes, CR/LF included.
/// Longer lines are handed out in pieces.
pub struct LineSource<R: BufRead> {
    reader: R,
    lookahead: Option<Vec<u8>>,
    consumed: u64,
    total: u64,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(mut reader: R, total: u64) -> io::Result<Self> {
        let lookahead = read_line_bounded(&mut reader, BS11_MAX_SEGMENT_LINE)?;
        Ok(Self { reader, lookahead, consumed: 0, total })
    }
}

impl<R: BufRead> SegmentSource for LineSource<R> {
    fn peek_line(&self) -> Option<&[u8]> {
        self.lookahead.as_deref()
    }

    fn next_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let Some(line) = self.lookahead.take() else {
            return Ok(None);
        };
        self.consumed += line.len() as u64;
        self.lookahead = read_line_bounded(&mut self.reader, BS11_MAX_SEGMENT_LINE)?;
        Ok(Some(line))
    }

    fn is_last_segment(&self) -> bool {
        self.lookahead.is_none()
    }

    fn bytes_consumed(&self) -> u64 {
        self.consumed
    }

    fn total_len(&self) -> u64 {
        self.total
    }
}

/// Reads up to and including the next LF, or `max` bytes, whichever comes first.
/// Returns None at end of input.
fn read_line_bounded<R: BufRead>(reader: &mut R, max: usize) -> io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    while line.len() < max {
        let available = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }
        let room = max - line.len();
        let window = &available[..available.len().min(room)];
        let (take, found_lf) = match window.iter().position(|&b| b == b'\n') {
            Some(idx) => (idx + 1, true),
            None => (window.len(), false),
        };
        line.extend_from_slice(&window[..take]);
        reader.consume(take);
        if found_lf {
            break;
        }
    }
    Ok(if line.is_empty() { None } else { Some(line) })
}

/// Opens software images and manifests by path
pub trait FileOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn SegmentSource>>;
    /// Whole-file read, used for manifests
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsOpener;

impl FileOpener for FsOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn SegmentSource>> {
        let file = File::open(path)?;
        let total = file.metadata()?.len();
        let source = LineSource::new(BufReader::new(file), total)?;
        Ok(Box::new(source))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// In-memory file set for tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct MemOpener {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    fn get(&self, path: &Path) -> io::Result<&Vec<u8>> {
        self.files
            .get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display())))
    }
}

impl FileOpener for MemOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn SegmentSource>> {
        let data = self.get(path)?.clone();
        let total = data.len() as u64;
        Ok(Box::new(LineSource::new(Cursor::new(data), total)?))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.get(path).cloned()
    }
}

/// File identification from the first line of a software image: `@(#)<id>:<version>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub file_id: Vec<u8>,
    pub file_version: Vec<u8>,
}

impl FileHeader {
    pub fn parse(line: &[u8]) -> Option<Self> {
        let rest = line.strip_prefix(HEADER_MAGIC)?;
        let (file_id, file_version) = parse_id_version(rest)?;
        Some(FileHeader { file_id, file_version })
    }
}

/// Parses `<id>:<version>`. The id is 1 to 12 non-blank bytes. The version runs up to the
/// first whitespace (CR/LF included) and is cut at 80 bytes.
pub fn parse_id_version(text: &[u8]) -> Option<(Vec<u8>, Vec<u8>)> {
    let colon = text.iter().position(|&b| b == b':')?;
    let (id, rest) = (&text[..colon], &text[colon + 1..]);
    if id.is_empty() || id.len() > MAX_FILE_ID_LEN || id.iter().any(|b| b.is_ascii_whitespace()) {
        return None;
    }
    let version_len = rest.iter().position(|b| b.is_ascii_whitespace()).unwrap_or(rest.len());
    if version_len == 0 {
        return None;
    }
    let version = &rest[..version_len.min(MAX_FILE_VERSION_LEN)];
    Some((id.to_vec(), version.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookahead_flags_last_line() {
        let data = b"@(#)BTSBMC76:v1\r\nline1\r\nline2\r\n".to_vec();
        let mut src = LineSource::new(Cursor::new(data), 32).unwrap();
        assert_eq!(src.peek_line(), Some(&b"@(#)BTSBMC76:v1\r\n"[..]));
        assert_eq!(src.next_line().unwrap().unwrap(), b"@(#)BTSBMC76:v1\r\n");
        assert!(!src.is_last_segment());
        assert_eq!(src.next_line().unwrap().unwrap(), b"line1\r\n");
        assert!(!src.is_last_segment());
        assert_eq!(src.next_line().unwrap().unwrap(), b"line2\r\n");
        assert!(src.is_last_segment());
        assert_eq!(src.next_line().unwrap(), None);
        assert_eq!(src.bytes_consumed(), 31);
    }

    #[test]
    fn test_long_lines_are_split() {
        let mut data = vec![b'a'; BS11_MAX_SEGMENT_LINE + 10];
        data.extend_from_slice(b"\r\n");
        let total = data.len() as u64;
        let mut src = LineSource::new(Cursor::new(data), total).unwrap();
        assert_eq!(src.next_line().unwrap().unwrap().len(), BS11_MAX_SEGMENT_LINE);
        assert_eq!(src.next_line().unwrap().unwrap().len(), 12);
        assert!(src.is_last_segment());
        assert_eq!(src.progress_percent(), 100);
    }

    #[test]
    fn test_unterminated_last_line() {
        let mut src = LineSource::new(Cursor::new(b"a\nb".to_vec()), 3).unwrap();
        assert_eq!(src.next_line().unwrap().unwrap(), b"a\n");
        assert_eq!(src.progress_percent(), 66);
        assert_eq!(src.next_line().unwrap().unwrap(), b"b");
        assert!(src.is_last_segment());
    }

    #[test]
    fn test_header_parse() {
        let hdr = FileHeader::parse(b"@(#)BTSBMC76:PH 1.2\r\n").unwrap();
        assert_eq!(hdr.file_id, b"BTSBMC76");
        assert_eq!(hdr.file_version, b"PH");

        assert!(FileHeader::parse(b"#(@)BTSBMC76:v1\r\n").is_none());
        assert!(FileHeader::parse(b"@(#)BTSBMC76\r\n").is_none());
        assert!(FileHeader::parse(b"@(#)0123456789abc:v1\r\n").is_none());
        assert!(FileHeader::parse(b"@(#):v1\r\n").is_none());
        assert!(FileHeader::parse(b"@(#)ID:\r\n").is_none());
    }

    #[test]
    fn test_version_truncated() {
        let mut line = b"@(#)ID:".to_vec();
        line.extend(vec![b'9'; 100]);
        let hdr = FileHeader::parse(&line).unwrap();
        assert_eq!(hdr.file_version.len(), MAX_FILE_VERSION_LEN);
    }

    #[test]
    fn test_mem_opener() {
        let mut opener = MemOpener::new();
        opener.insert("/sw/a.swl", b"x\r\n".to_vec());
        let src = opener.open(Path::new("/sw/a.swl")).unwrap();
        assert_eq!(src.total_len(), 3);
        let err = opener.open(Path::new("/sw/missing")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
