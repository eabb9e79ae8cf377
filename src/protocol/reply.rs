//! FTP reply reading and parsing
//!
//! A reply is one or more text lines. The first line starts with a
//! three-digit status code. When the fourth character is `-` the reply
//! continues until a line that starts with the same code followed by a space.

use std::fmt;
use std::io::BufRead;

use log::debug;

use crate::error::ReplyError;

/// One logical server reply
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    code: u16,
    lines: Vec<String>,
}

impl Reply {
    /// Builds a reply from raw lines, validating the leading status code.
    pub fn from_lines(lines: Vec<String>) -> Result<Self, ReplyError> {
        let first = lines.first().ok_or(ReplyError::ConnectionClosed)?;
        if first.is_empty() {
            return Err(ReplyError::ConnectionClosed);
        }
        let code = parse_code(first).ok_or_else(|| ReplyError::Malformed(first.clone()))?;
        Ok(Self { code, lines })
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn first_line(&self) -> &str {
        &self.lines[0]
    }

    /// Text of the first line after the code and separator
    pub fn message(&self) -> &str {
        self.first_line().get(4..).unwrap_or("")
    }

    pub fn is_multiline(&self) -> bool {
        self.lines.len() > 1
    }

    pub fn is_one_of(&self, codes: &[u16]) -> bool {
        codes.contains(&self.code)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

fn parse_code(line: &str) -> Option<u16> {
    let digits = line.as_bytes().get(..3)?;
    if !digits.iter().all(u8::is_ascii_digit) || !(b'1'..=b'5').contains(&digits[0]) {
        return None;
    }
    line[..3].parse().ok()
}

/// Reads one line from the control stream.
///
/// The line ends at LF; a CR directly before the LF is dropped. A CR
/// anywhere else stays in the line. Returns an empty string once the
/// stream is exhausted.
pub fn read_line<R: BufRead>(reader: &mut R) -> std::io::Result<String> {
    let mut buf = Vec::new();
    reader.read_until(b'\n', &mut buf)?;
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Reads the raw lines of one logical reply.
///
/// An empty vector means the stream closed before any data arrived.
pub fn read_reply_lines<R: BufRead>(reader: &mut R) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let first = read_line(reader)?;
    if first.is_empty() {
        return Ok(lines);
    }

    let bytes = first.as_bytes();
    let code = if bytes.len() >= 4 && bytes[3] == b'-' {
        Some(bytes[..3].to_vec())
    } else {
        None
    };
    lines.push(first);

    if let Some(code) = code {
        loop {
            let line = read_line(reader)?;
            if line.is_empty() {
                // closed mid-reply
                break;
            }
            let b = line.as_bytes();
            let done = b.len() >= 4 && b[..3] == code[..] && b[3] == b' ';
            lines.push(line);
            if done {
                break;
            }
        }
    }

    Ok(lines)
}

/// Reads and validates one logical reply.
pub fn read_reply<R: BufRead>(reader: &mut R) -> Result<Reply, ReplyError> {
    let lines = read_reply_lines(reader)?;
    let reply = Reply::from_lines(lines)?;
    debug!(
        "Reply {} ({} line{}): {}",
        reply.code(),
        reply.lines().len(),
        if reply.is_multiline() { "s" } else { "" },
        reply.first_line()
    );
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines(input: &[u8]) -> Vec<String> {
        read_reply_lines(&mut Cursor::new(input.to_vec())).unwrap()
    }

    #[test]
    fn test_single_line_reply() {
        assert_eq!(lines(b"220 Welcome\r\n"), vec!["220 Welcome"]);
        assert_eq!(lines(b"200 OK\r\n331 next\r\n"), vec!["200 OK"]);
    }

    #[test]
    fn test_multiline_reply_stops_at_terminator() {
        let input = b"226-Part1\r\n226-Part2\r\n  indented\r\n226 Done\r\n221 Bye\r\n";
        let mut cursor = Cursor::new(input.to_vec());
        let first = read_reply_lines(&mut cursor).unwrap();
        assert_eq!(first, vec!["226-Part1", "226-Part2", "  indented", "226 Done"]);
        assert_eq!(read_reply_lines(&mut cursor).unwrap(), vec!["221 Bye"]);
    }

    #[test]
    fn test_multiline_ignores_other_codes() {
        let input = b"230-Hello\r\n220 not the end\r\n230-still going\r\n230 Done\r\n";
        assert_eq!(
            lines(input),
            vec!["230-Hello", "220 not the end", "230-still going", "230 Done"]
        );
    }

    #[test]
    fn test_lone_cr_is_preserved() {
        assert_eq!(
            read_line(&mut Cursor::new(b"AB\rCD\r\n".to_vec())).unwrap(),
            "AB\rCD"
        );
        assert_eq!(
            read_line(&mut Cursor::new(b"X\r\r\n".to_vec())).unwrap(),
            "X\r"
        );
    }

    #[test]
    fn test_bare_lf_ends_line() {
        let mut cursor = Cursor::new(b"200 one\n200 two\r\n".to_vec());
        assert_eq!(read_line(&mut cursor).unwrap(), "200 one");
        assert_eq!(read_line(&mut cursor).unwrap(), "200 two");
    }

    #[test]
    fn test_eof_yields_empty_reply() {
        assert!(lines(b"").is_empty());
        let err = read_reply(&mut Cursor::new(Vec::new())).unwrap_err();
        assert!(matches!(err, ReplyError::ConnectionClosed));
    }

    #[test]
    fn test_eof_mid_multiline() {
        assert_eq!(lines(b"211-Features\r\n EPSV\r\n"), vec!["211-Features", " EPSV"]);
    }

    #[test]
    fn test_read_reply_parses_code() {
        let reply = read_reply(&mut Cursor::new(b"331 Password required\r\n".to_vec())).unwrap();
        assert_eq!(reply.code(), 331);
        assert_eq!(reply.message(), "Password required");
        assert!(reply.is_one_of(&[230, 331]));
        assert!(!reply.is_multiline());
    }

    #[test]
    fn test_malformed_reply() {
        let err = read_reply(&mut Cursor::new(b"hello there\r\n".to_vec())).unwrap_err();
        assert!(matches!(err, ReplyError::Malformed(_)));
        assert!(Reply::from_lines(vec!["999 nope".into()]).is_err());
        assert!(Reply::from_lines(vec!["22".into()]).is_err());
    }
}
