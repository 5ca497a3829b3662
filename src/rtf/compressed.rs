//! Compressed RTF containers (MS-OXRTFCP).
//!
//! Outlook stores message bodies as RTF wrapped in a 16-byte header, either
//! LZ77-compressed (`LZFu`) or stored as is (`MELA`). Only decompression is
//! supported.

use super::error::{RtfError, RtfResult};
use crc_fast::CrcParams;
use zerocopy::FromBytes;
use zerocopy_derive::{FromBytes as DeriveFromBytes, Immutable, KnownLayout};

const COMPRESSED_SIGNATURE: &[u8; 4] = b"LZFu";
const UNCOMPRESSED_SIGNATURE: &[u8; 4] = b"MELA";

/// Dictionary preload shared by every LZFu stream.
const INIT_DICT: &[u8] = b"{\\rtf1\\ansi\\mac\\deff0\\deftab720{\\fonttbl;}\
{\\f0\\fnil \\froman \\fswiss \\fmodern \\fscript \\fdecor MS Sans SerifSymbolArial\
Times New RomanCourier{\\colortbl\\red0\\green0\\blue0\r\n\\par \\pard\\plain\\f0\\fs20\
\\b\\i\\u\\tab\\tx";

const INIT_DICT_SIZE: usize = 207;
const DICT_SIZE: usize = 4096;
const HEADER_SIZE: usize = 16;

/// Container checksum: reflected CRC-32 (0x04C11DB7) starting at zero,
/// without a final XOR.
fn lzfu_crc(data: &[u8]) -> u32 {
    let params = CrcParams::new("CRC-32/LZFU", 32, 0x04c1_1db7, 0, true, 0, 0x2dfd_2d88);
    crc_fast::checksum_with_params(params, data) as u32
}

#[repr(C)]
#[derive(Debug, Clone, Copy, DeriveFromBytes, Immutable, KnownLayout)]
struct Header {
    /// Size of everything after this field, little-endian
    compressed_size: [u8; 4],
    raw_size: [u8; 4],
    signature: [u8; 4],
    crc32: [u8; 4],
}

impl Header {
    #[inline]
    fn raw_size(&self) -> usize {
        u32::from_le_bytes(self.raw_size) as usize
    }

    #[inline]
    fn crc32(&self) -> u32 {
        u32::from_le_bytes(self.crc32)
    }
}

/// Whether `data` starts with a compressed RTF header.
pub fn is_compressed_rtf(data: &[u8]) -> bool {
    if data.len() < HEADER_SIZE {
        return false;
    }
    let signature = &data[8..12];
    signature == COMPRESSED_SIGNATURE || signature == UNCOMPRESSED_SIGNATURE
}

/// Unwrap a compressed RTF container into raw RTF bytes.
///
/// A CRC mismatch is logged and the payload decoded anyway.
///
/// # Errors
///
/// Returns [`RtfError::InvalidCompressedHeader`] when the header is truncated
/// and [`RtfError::UnknownCompression`] for an unrecognized signature.
pub fn decompress(data: &[u8]) -> RtfResult<Vec<u8>> {
    if data.len() < HEADER_SIZE {
        return Err(RtfError::InvalidCompressedHeader(format!(
            "need {HEADER_SIZE} bytes, got {}",
            data.len()
        )));
    }
    let (header, body) = Header::read_from_prefix(data)
        .map_err(|_| RtfError::InvalidCompressedHeader("unreadable header".to_string()))?;
    let declared = u32::from_le_bytes(header.compressed_size) as usize;
    if declared != body.len() + 12 {
        log::debug!(
            target: "rtf.compressed",
            "header declares {declared} bytes, container holds {}",
            body.len() + 12
        );
    }

    match &header.signature {
        COMPRESSED_SIGNATURE => {
            let crc = lzfu_crc(body);
            if crc != header.crc32() {
                log::warn!(
                    target: "rtf.compressed",
                    "CRC mismatch: header {:#010x}, computed {crc:#010x}",
                    header.crc32()
                );
            }
            Ok(decompress_lzfu(body, header.raw_size()))
        },
        UNCOMPRESSED_SIGNATURE => {
            let size = header.raw_size().min(body.len());
            Ok(body[..size].to_vec())
        },
        other => Err(RtfError::UnknownCompression(*other)),
    }
}

fn decompress_lzfu(body: &[u8], raw_size: usize) -> Vec<u8> {
    let mut dict = [b' '; DICT_SIZE];
    dict[..INIT_DICT_SIZE].copy_from_slice(&INIT_DICT[..INIT_DICT_SIZE]);
    let mut write = INIT_DICT_SIZE;
    // raw_size comes from the file; cap the preallocation
    let mut output = Vec::with_capacity(raw_size.min(body.len().saturating_mul(8)));
    let mut input = body.iter().copied();

    while let Some(control) = input.next() {
        for bit in 0..8 {
            if control & (1 << bit) == 0 {
                let Some(literal) = input.next() else {
                    return output;
                };
                output.push(literal);
                dict[write] = literal;
                write = (write + 1) % DICT_SIZE;
                continue;
            }

            let (Some(high), Some(low)) = (input.next(), input.next()) else {
                return output;
            };
            let token = u16::from_be_bytes([high, low]);
            let offset = usize::from(token >> 4);
            let length = usize::from(token & 0x0F) + 2;
            if offset == write {
                return output;
            }
            for step in 0..length {
                let byte = dict[(offset + step) % DICT_SIZE];
                output.push(byte);
                dict[write] = byte;
                write = (write + 1) % DICT_SIZE;
            }
        }
    }

    log::debug!(target: "rtf.compressed", "LZFu stream ended without an end marker");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(signature: &[u8; 4], raw_size: u32, body: &[u8]) -> Vec<u8> {
        let crc = if signature == COMPRESSED_SIGNATURE {
            lzfu_crc(body)
        } else {
            0
        };
        let mut data = Vec::new();
        data.extend_from_slice(&(body.len() as u32 + 12).to_le_bytes());
        data.extend_from_slice(&raw_size.to_le_bytes());
        data.extend_from_slice(signature);
        data.extend_from_slice(&crc.to_le_bytes());
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn test_detection() {
        assert!(is_compressed_rtf(&container(b"LZFu", 0, &[])));
        assert!(is_compressed_rtf(&container(b"MELA", 0, &[])));
        assert!(!is_compressed_rtf(b"{\\rtf1\\ansi Hello World}"));
        assert!(!is_compressed_rtf(&[0u8; 8]));
    }

    #[test]
    fn test_stored_container() {
        let rtf = b"{\\rtf1\\ansi Hello}";
        let data = container(b"MELA", rtf.len() as u32, rtf);
        assert_eq!(decompress(&data).unwrap(), rtf);
    }

    #[test]
    fn test_lzfu_literals_and_references() {
        // Reference to "{\rtf" at dictionary offset 0, literal '1', end marker at 213
        let body = [0b0000_0101, 0x00, 0x03, b'1', 0x0D, 0x50];
        let data = container(b"LZFu", 6, &body);
        assert_eq!(decompress(&data).unwrap(), b"{\\rtf1");
    }

    #[test]
    fn test_checksum() {
        assert_eq!(lzfu_crc(b""), 0);
        assert_eq!(lzfu_crc(b"123456789"), 0x2dfd_2d88);
    }

    #[test]
    fn test_outlook_sample_container() {
        let data = [
            0x2d, 0x00, 0x00, 0x00, 0x2b, 0x00, 0x00, 0x00, 0x4c, 0x5a, 0x46, 0x75, 0xf1, 0xc5,
            0xc7, 0xa7, 0x03, 0x00, 0x0a, 0x00, 0x72, 0x63, 0x70, 0x67, 0x31, 0x32, 0x35, 0x42,
            0x32, 0x0a, 0xf3, 0x20, 0x68, 0x65, 0x6c, 0x09, 0x00, 0x20, 0x62, 0x77, 0x05, 0xb0,
            0x6c, 0x64, 0x7d, 0x0a, 0x80, 0x0f, 0xa0,
        ];
        let (header, body) = Header::read_from_prefix(&data[..]).unwrap();
        assert_eq!(header.crc32(), 0xa7c7_c5f1);
        assert_eq!(lzfu_crc(body), header.crc32());
        assert_eq!(
            decompress(&data).unwrap(),
            b"{\\rtf1\\ansi\\ansicpg1252\\pard hello world}\r\n"
        );
    }

    #[test]
    fn test_crc_mismatch_is_tolerated() {
        let body = [0b0000_0010, b'{', 0x0D, 0x00];
        let mut data = container(b"LZFu", 1, &body);
        data[12] ^= 0xFF;
        assert_eq!(decompress(&data).unwrap(), b"{");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            decompress(&[0u8; 4]),
            Err(RtfError::InvalidCompressedHeader(_))
        ));
        let data = container(b"ZZZZ", 0, b"");
        assert!(matches!(
            decompress(&data),
            Err(RtfError::UnknownCompression(signature)) if &signature == b"ZZZZ"
        ));
    }
}
