//! Minimal NumPy `.npy` (format 1.0) support for flat `f64` arrays.
//!
//! Files are little-endian `<f8`, C order, one-dimensional, so that
//! `numpy.load` returns an array of shape `(n,)`.

use crate::error::{Result, SynthError};
use std::io::{Read, Write};
use std::path::Path;

const MAGIC: &[u8; 6] = b"\x93NUMPY";
/// Magic, two version bytes, and the u16 header length.
const PREAMBLE_LEN: usize = MAGIC.len() + 2 + 2;
const ALIGNMENT: usize = 64;

fn header(len: usize) -> Vec<u8> {
    let dict = format!("{{'descr': '<f8', 'fortran_order': False, 'shape': ({len},), }}");
    // Pad with spaces so data starts on an aligned offset; header ends in '\n'.
    let unpadded = PREAMBLE_LEN + dict.len() + 1;
    let padding = (ALIGNMENT - unpadded % ALIGNMENT) % ALIGNMENT;
    let mut bytes = dict.into_bytes();
    bytes.extend(std::iter::repeat(b' ').take(padding));
    bytes.push(b'\n');
    bytes
}

/// Write `values` as a one-dimensional `.npy` array.
pub fn write_npy<W: Write>(values: &[f64], mut writer: W) -> Result<()> {
    let header = header(values.len());
    let header_len = u16::try_from(header.len())
        .map_err(|_| SynthError::InvalidParameter("npy header too long".to_string()))?;

    writer.write_all(MAGIC)?;
    writer.write_all(&[1, 0])?;
    writer.write_all(&header_len.to_le_bytes())?;
    writer.write_all(&header)?;
    for v in values {
        writer.write_all(&v.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `values` to `path` as a `.npy` file.
pub fn write_npy_f64<P: AsRef<Path>>(path: P, values: &[f64]) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_npy(values, std::io::BufWriter::new(file))
}

fn parse_shape(header: &str) -> Result<usize> {
    let malformed = || SynthError::InvalidParameter(format!("unsupported npy header: {header}"));

    if !header.contains("'descr': '<f8'") || !header.contains("'fortran_order': False") {
        return Err(malformed());
    }
    let start = header.find("'shape': (").ok_or_else(malformed)? + "'shape': (".len();
    let end = start + header[start..].find(')').ok_or_else(malformed)?;
    let dims: Vec<&str> = header[start..end]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    match dims.as_slice() {
        [n] => n.parse().map_err(|_| malformed()),
        _ => Err(malformed()),
    }
}

/// Read a one-dimensional `<f8` array written by [`write_npy`] (or numpy).
pub fn read_npy<R: Read>(mut reader: R) -> Result<Vec<f64>> {
    let mut preamble = [0u8; 8];
    reader.read_exact(&mut preamble)?;
    if &preamble[..6] != MAGIC {
        return Err(SynthError::InvalidParameter("not an npy file".to_string()));
    }

    let header_len = match preamble[6] {
        1 => {
            let mut len = [0u8; 2];
            reader.read_exact(&mut len)?;
            u16::from_le_bytes(len) as usize
        }
        2 | 3 => {
            let mut len = [0u8; 4];
            reader.read_exact(&mut len)?;
            u32::from_le_bytes(len) as usize
        }
        v => {
            return Err(SynthError::InvalidParameter(format!(
                "unsupported npy version {v}"
            )))
        }
    };

    let mut header = vec![0u8; header_len];
    reader.read_exact(&mut header)?;
    let header = String::from_utf8_lossy(&header);
    let n = parse_shape(&header)?;

    let mut values = Vec::with_capacity(n);
    let mut buf = [0u8; 8];
    for _ in 0..n {
        reader.read_exact(&mut buf)?;
        values.push(f64::from_le_bytes(buf));
    }
    Ok(values)
}

/// Read a `.npy` file from `path`.
pub fn read_npy_f64<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_npy(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_aligned() {
        let mut buf: Vec<u8> = Vec::new();
        write_npy(&[1.0, 2.0, 3.0], &mut buf).unwrap();

        assert_eq!(&buf[..6], MAGIC);
        assert_eq!(&buf[6..8], &[1u8, 0u8]);
        let header_len = u16::from_le_bytes([buf[8], buf[9]]) as usize;
        let data_start = PREAMBLE_LEN + header_len;
        assert_eq!(data_start % ALIGNMENT, 0);
        assert_eq!(buf[data_start - 1], b'\n');
        assert_eq!(buf.len(), data_start + 3 * 8);

        let text = std::str::from_utf8(&buf[PREAMBLE_LEN..data_start]).unwrap();
        assert!(text.starts_with("{'descr': '<f8', 'fortran_order': False, 'shape': (3,), }"));
    }

    #[test]
    fn values_are_little_endian() {
        let mut buf: Vec<u8> = Vec::new();
        write_npy(&[0.5], &mut buf).unwrap();
        let tail = &buf[buf.len() - 8..];
        assert_eq!(tail, &0.5f64.to_le_bytes());
    }

    #[test]
    fn read_back() {
        let values = [21.03, 99.98, 100.4];
        let mut buf: Vec<u8> = Vec::new();
        write_npy(&values, &mut buf).unwrap();
        assert_eq!(read_npy(buf.as_slice()).unwrap(), values.to_vec());
    }

    #[test]
    fn empty_array() {
        let mut buf: Vec<u8> = Vec::new();
        write_npy(&[], &mut buf).unwrap();
        assert!(read_npy(buf.as_slice()).unwrap().is_empty());
    }

    #[test]
    fn rejects_garbage() {
        let bytes = b"definitely not numpy data";
        assert!(read_npy(&bytes[..]).is_err());
    }

    #[test]
    fn rejects_two_dimensional() {
        assert!(parse_shape("{'descr': '<f8', 'fortran_order': False, 'shape': (3, 2), }").is_err());
        assert_eq!(
            parse_shape("{'descr': '<f8', 'fortran_order': False, 'shape': (12,), }").unwrap(),
            12
        );
    }
}
