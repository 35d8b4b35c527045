//! Footer encoding and decoding

use super::{FileFooter, FooterError};
use crate::config::{FOOTER_MAGIC, FOOTER_VERSION};
use bytes::{Buf, BufMut, Bytes, BytesMut};

type Result<T> = std::result::Result<T, FooterError>;

// magic + version + num_rows + blocklet_count + column_count + info_len + crc
const MIN_FOOTER_SIZE: usize = 4 + 4 + 8 + 4 + 4 + 4 + 4;

impl FileFooter {
    /// Serialize the footer with a trailing checksum
    ///
    /// Fails when a count or length does not fit its `u32` field.
    pub fn encode(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(MIN_FOOTER_SIZE + self.columns.len() * 16);

        buf.put_slice(FOOTER_MAGIC);
        buf.put_u32_le(self.version);
        buf.put_u64_le(self.num_rows);
        buf.put_u32_le(self.blocklet_count);

        buf.put_u32_le(length_field(self.columns.len(), "column count")?);
        for column in &self.columns {
            put_string(&mut buf, column, "column name")?;
        }

        put_string(&mut buf, &self.segment_info, "segment info")?;

        let checksum = crc32fast::hash(&buf);
        buf.put_u32_le(checksum);

        Ok(buf.freeze())
    }

    /// Parse a footer produced by [`FileFooter::encode`]
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_FOOTER_SIZE {
            return Err(FooterError::Truncated {
                needed: MIN_FOOTER_SIZE - data.len(),
            });
        }

        let (body, mut trailer) = data.split_at(data.len() - 4);
        let expected = trailer.get_u32_le();
        let actual = crc32fast::hash(body);
        if expected != actual {
            return Err(FooterError::ChecksumMismatch { expected, actual });
        }

        let mut cursor = body;
        if &cursor[..4] != FOOTER_MAGIC {
            return Err(FooterError::InvalidFormat("Invalid footer magic".into()));
        }
        cursor.advance(4);

        let version = cursor.get_u32_le();
        if version > FOOTER_VERSION {
            return Err(FooterError::UnsupportedVersion(version));
        }
        let num_rows = cursor.get_u64_le();
        let blocklet_count = cursor.get_u32_le();

        let column_count = cursor.get_u32_le() as usize;
        let mut columns = Vec::with_capacity(column_count.min(cursor.remaining() / 4));
        for _ in 0..column_count {
            columns.push(read_string(&mut cursor)?);
        }

        let segment_info = read_string(&mut cursor)?;

        if cursor.has_remaining() {
            return Err(FooterError::InvalidFormat(format!(
                "{} trailing bytes after footer",
                cursor.remaining()
            )));
        }

        Ok(Self {
            version,
            num_rows,
            blocklet_count,
            columns,
            segment_info,
        })
    }
}

fn length_field(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| FooterError::InvalidFormat(format!("{} {} exceeds u32 field", what, len)))
}

fn put_string(buf: &mut BytesMut, s: &str, what: &str) -> Result<()> {
    buf.put_u32_le(length_field(s.len(), what)?);
    buf.put_slice(s.as_bytes());
    Ok(())
}

fn read_string(cursor: &mut &[u8]) -> Result<String> {
    ensure(cursor, 4)?;
    let len = cursor.get_u32_le() as usize;
    ensure(cursor, len)?;
    let s = String::from_utf8(cursor[..len].to_vec())
        .map_err(|e| FooterError::InvalidFormat(e.to_string()))?;
    cursor.advance(len);
    Ok(s)
}

fn ensure(cursor: &&[u8], len: usize) -> Result<()> {
    if cursor.remaining() < len {
        return Err(FooterError::Truncated {
            needed: len - cursor.remaining(),
        });
    }
    Ok(())
}
