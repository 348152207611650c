use crate::errors::CoreError;
use super::encryption::KdfParams;

/// Magic bytes identifying an Optivest ledger file.
pub const MAGIC: &[u8; 4] = b"OPTV";

/// Current file format version.
pub const CURRENT_VERSION: u16 = 1;

/// Conventional file extension for ledger files.
pub const FILE_EXTENSION: &str = "optv";

/// Header size in bytes:
/// magic(4) + version(2) + kdf_params(12) + salt(16) + nonce(12) + payload_len(8) = 54
pub const HEADER_SIZE: usize = 54;

/// Bounds accepted for KDF parameters read from a file, so a crafted header
/// cannot make key derivation allocate unbounded memory.
const MEMORY_COST_KIB: std::ops::RangeInclusive<u32> = 8..=1_048_576;
const TIME_COST: std::ops::RangeInclusive<u32> = 1..=20;
const PARALLELISM: std::ops::RangeInclusive<u32> = 1..=16;

/// Header of an encrypted ledger file.
#[derive(Debug)]
pub struct FileHeader {
    pub version: u16,
    pub kdf_params: KdfParams,
    pub salt: [u8; 16],
    pub nonce: [u8; 12],
    pub payload_len: u64,
}

/// Assemble a ledger file from its header fields and encrypted payload.
///
/// Layout (all integers little-endian):
/// ```text
/// [OPTV: 4B] [version: 2B] [memory_cost: 4B] [time_cost: 4B] [parallelism: 4B]
/// [salt: 16B] [nonce: 12B] [payload_len: 8B] [payload: variable]
/// ```
pub fn write_file(
    version: u16,
    kdf_params: &KdfParams,
    salt: &[u8; 16],
    nonce: &[u8; 12],
    payload: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&version.to_le_bytes());
    for param in [kdf_params.memory_cost, kdf_params.time_cost, kdf_params.parallelism] {
        buf.extend_from_slice(&param.to_le_bytes());
    }
    buf.extend_from_slice(salt);
    buf.extend_from_slice(nonce);
    buf.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Parse a ledger file, returning its header and the encrypted payload.
pub fn read_file(data: &[u8]) -> Result<(FileHeader, &[u8]), CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(format!(
            "File too small to be a ledger file ({} bytes)",
            data.len()
        )));
    }

    let mut cursor = Cursor { data, pos: 0 };

    if cursor.take::<4>()? != *MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes: not an Optivest ledger file".into(),
        ));
    }

    let version = u16::from_le_bytes(cursor.take()?);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let kdf_params = KdfParams {
        memory_cost: u32::from_le_bytes(cursor.take()?),
        time_cost: u32::from_le_bytes(cursor.take()?),
        parallelism: u32::from_le_bytes(cursor.take()?),
    };
    check_range("memory_cost", kdf_params.memory_cost, &MEMORY_COST_KIB)?;
    check_range("time_cost", kdf_params.time_cost, &TIME_COST)?;
    check_range("parallelism", kdf_params.parallelism, &PARALLELISM)?;

    let salt = cursor.take::<16>()?;
    let nonce = cursor.take::<12>()?;
    let payload_len = u64::from_le_bytes(cursor.take()?);

    let remaining = cursor.remaining();
    if (remaining.len() as u64) < payload_len {
        return Err(CoreError::InvalidFileFormat(format!(
            "File truncated: expected {payload_len} payload bytes, got {}",
            remaining.len()
        )));
    }
    let payload = &remaining[..payload_len as usize];

    Ok((
        FileHeader {
            version,
            kdf_params,
            salt,
            nonce,
            payload_len,
        },
        payload,
    ))
}

fn check_range(name: &str, value: u32, range: &std::ops::RangeInclusive<u32>) -> Result<(), CoreError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidFileFormat(format!(
            "KDF {name} out of safe range: {value} (expected {}..={})",
            range.start(),
            range.end()
        )))
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], CoreError> {
        let end = self.pos + N;
        let bytes: [u8; N] = self
            .data
            .get(self.pos..end)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| CoreError::InvalidFileFormat(format!("Unexpected end of header at byte {}", self.pos)))?;
        self.pos = end;
        Ok(bytes)
    }

    fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}
