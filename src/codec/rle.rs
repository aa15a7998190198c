use std::iter;

use crate::{
    binary::byte_reader::ByteReader,
    error::{CodecError, Result},
};

pub const KEY: u8 = 254;
pub const MIN_RUN_LENGTH: usize = 3;
pub const MAX_RUN_LENGTH: usize = u8::MAX as usize + 1;

pub fn encode(bytes: &[u8]) -> Vec<u8> {
    if bytes.len() < MIN_RUN_LENGTH {
        return bytes.to_vec();
    }

    let mut encoded = Vec::with_capacity(bytes.len());
    let mut offset = 0;

    while offset < bytes.len() {
        let value = bytes[offset];
        let run = bytes[offset..]
            .iter()
            .take(MAX_RUN_LENGTH)
            .take_while(|&&byte| byte == value)
            .count();

        if run >= MIN_RUN_LENGTH || value == KEY {
            encoded.extend([KEY, (run - 1) as u8, value]);
        } else {
            encoded.extend(iter::repeat(value).take(run));
        }

        offset += run;
    }

    encoded
}

pub fn decode(bytes: &[u8]) -> Result<Vec<u8>> {
    if bytes.len() < MIN_RUN_LENGTH {
        return Ok(bytes.to_vec());
    }

    let mut reader = ByteReader::new(bytes);
    let mut decoded = Vec::with_capacity(bytes.len() * 2);

    while let Some(byte) = reader.read_byte() {
        if byte != KEY {
            decoded.push(byte);
            continue;
        }

        let [count, value] = reader.read_array().ok_or_else(|| {
            CodecError::format(format!(
                "run-length escape at offset {} is truncated",
                reader.offset - 1
            ))
        })?;
        decoded.extend(iter::repeat(value).take(count as usize + 1));
    }

    Ok(decoded)
}
